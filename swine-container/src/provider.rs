//! Provider trait: a module of related factory registrations.
//!
//! # Examples
//! ```rust
//! use swine_container::prelude::*;
//!
//! struct GreetingProvider;
//!
//! impl Provider for GreetingProvider {
//!     fn register(&self, container: &Container) {
//!         container
//!             .register::<String>(|_| Ok("hello".to_string()))
//!             .register_with::<String, &'static str>(|_, name| Ok(format!("hello, {name}")));
//!     }
//! }
//!
//! let container = Container::builder().add_provider(&GreetingProvider).build();
//! let greeting: String = container.resolve_with("swine").unwrap();
//! assert_eq!(greeting, "hello, swine");
//! ```

use crate::container::Container;

/// A module that registers related factories into a container.
///
/// Split registrations by domain instead of one giant setup block;
/// each provider can then be swapped for a mock as a unit.
pub trait Provider: Send + Sync {
    /// Register factories into the container.
    fn register(&self, container: &Container);

    /// Optional: human-readable name for logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
