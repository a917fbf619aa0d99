//! # Swine
//!
//! Mock `User` and `Avatar` entities built on small capability protocols,
//! wired together through a factory container.
//!
//! ```
//! use std::sync::Arc;
//! use swine::{Indexable, Presentable, User, setup};
//!
//! let container = setup();
//! let user: Arc<dyn User> = container.resolve_with("test001".to_string()).unwrap();
//! user.create(None);
//! assert_eq!(user.uid(), 1);
//! ```

pub mod avatar;
pub mod capability;
pub mod user;
pub mod wiring;

pub use avatar::{Avatar, DEFAULT_IMAGE_URL, MockAvatar};
pub use capability::{CREATED_UID, Completion, Indexable, Presentable, UNSET_UID, Uid};
pub use swine_container::*;
pub use swine_support::*;
pub use user::{MockUser, User};
pub use wiring::{MockProvider, setup};
