//! Standard registrations for the mock entities.

use std::sync::Arc;

use swine_container::{Container, Provider};

use crate::avatar::{Avatar, MockAvatar};
use crate::user::{MockUser, User};

/// Registers `MockUser` and `MockAvatar` as the `User` and `Avatar`
/// implementations, each with a zero-argument and a one-argument factory.
///
/// The avatar factory taking an author holds it weakly; keep a handle to
/// the user you pass in for as long as the avatar's author is needed.
pub struct MockProvider;

impl Provider for MockProvider {
    fn register(&self, container: &Container) {
        container
            .register::<Arc<dyn User>>(|_| Ok(Arc::new(MockUser::new()) as Arc<dyn User>))
            .register_with::<Arc<dyn User>, String>(|_, username| {
                Ok(Arc::new(MockUser::with_username(username)) as Arc<dyn User>)
            })
            .register::<Arc<dyn Avatar>>(|_| Ok(Arc::new(MockAvatar::new()) as Arc<dyn Avatar>))
            .register_with::<Arc<dyn Avatar>, Arc<dyn User>>(|_, author| {
                Ok(Arc::new(MockAvatar::with_author(&author)) as Arc<dyn Avatar>)
            });
    }
}

/// Builds a container holding the [`MockProvider`] registrations.
pub fn setup() -> Container {
    Container::builder().add_provider(&MockProvider).build()
}
