//! Factory registry and container for Swine.

pub mod container;
pub mod error;
pub mod key;
pub mod provider;
pub mod registry;

pub use container::{Container, ContainerBuilder, ResolverApi, prelude};
pub use error::{NotRegisteredError, Result, SwineError};
pub use key::DependencyKey;
pub use provider::Provider;
pub use registry::Resolver;
