//! The `Avatar` domain protocol and its mock implementation.
//!
//! An avatar points back at the user who authored it. When that user was
//! handed in by a caller, the user usually owns the avatar too, so the
//! link is weak. When `show` fetched the user itself nobody else owns it,
//! so the avatar keeps it alive.

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use swine_container::{Resolver, ResolverApi, Result};
use swine_support::rendering::{NIL, render_address, render_record};
use tracing::{debug, instrument};

use crate::capability::{Indexable, Presentable, UNSET_UID, Uid};
use crate::user::User;

/// Image every avatar starts with.
pub const DEFAULT_IMAGE_URL: &str = "http://www.superarts.org/swine/default.png";

/// A user's picture.
///
/// Resolved from the container as `Arc<dyn Avatar>`, either with no
/// argument or with its author as an `Arc<dyn User>`. `Display` renders
/// the record dump.
pub trait Avatar: Presentable + fmt::Display + Send + Sync {
    fn image_url(&self) -> String;

    fn set_image_url(&self, url: &str);

    /// The author, if set and still alive.
    fn author(&self) -> Option<Arc<dyn User>>;

    /// Links `author` without taking ownership.
    fn set_author(&self, author: &Arc<dyn User>);
}

/// Image location a fetched avatar gets.
pub fn fetched_image_url(uid: Uid) -> String {
    format!("http://test.com/image{uid:03}.png")
}

enum AuthorLink {
    Linked(Weak<dyn User>),
    Fetched(Arc<dyn User>),
}

impl AuthorLink {
    fn get(&self) -> Option<Arc<dyn User>> {
        match self {
            AuthorLink::Linked(weak) => weak.upgrade(),
            AuthorLink::Fetched(user) => Some(user.clone()),
        }
    }
}

struct AvatarState {
    uid: Uid,
    image_url: String,
    author: Option<AuthorLink>,
}

/// In-memory [`Avatar`].
pub struct MockAvatar {
    state: RwLock<AvatarState>,
}

impl MockAvatar {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(AvatarState {
                uid: UNSET_UID,
                image_url: DEFAULT_IMAGE_URL.to_string(),
                author: None,
            }),
        }
    }

    /// Links `author` weakly: the caller must keep another handle to it,
    /// otherwise [`Avatar::author`] is `None` straight away.
    pub fn with_author(author: &Arc<dyn User>) -> Self {
        let avatar = Self::new();
        avatar.set_author(author);
        avatar
    }
}

impl Default for MockAvatar {
    fn default() -> Self {
        Self::new()
    }
}

impl Indexable for MockAvatar {
    fn uid(&self) -> Uid {
        self.state.read().uid
    }

    fn set_uid(&self, uid: Uid) {
        self.state.write().uid = uid;
    }
}

impl Presentable for MockAvatar {
    /// Sets the image location from `uid`, then resolves a fresh user,
    /// shows it under the same id and attaches it as the author.
    #[instrument(skip(self, resolver), name = "avatar_show")]
    fn show(self: Arc<Self>, uid: Uid, resolver: &dyn Resolver) -> Result<()> {
        {
            let mut state = self.state.write();
            state.uid = uid;
            state.image_url = fetched_image_url(uid);
        }

        let author: Arc<dyn User> = resolver.resolve()?;
        author.clone().show(uid, resolver)?;
        self.state.write().author = Some(AuthorLink::Fetched(author));

        debug!(uid, "Avatar fetched");
        Ok(())
    }
}

impl Avatar for MockAvatar {
    fn image_url(&self) -> String {
        self.state.read().image_url.clone()
    }

    fn set_image_url(&self, url: &str) {
        self.state.write().image_url = url.to_string();
    }

    fn author(&self) -> Option<Arc<dyn User>> {
        self.state.read().author.as_ref().and_then(AuthorLink::get)
    }

    fn set_author(&self, author: &Arc<dyn User>) {
        self.state.write().author = Some(AuthorLink::Linked(Arc::downgrade(author)));
    }
}

impl fmt::Display for MockAvatar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (uid, image_url) = {
            let state = self.state.read();
            (state.uid, state.image_url.clone())
        };
        let author = self
            .author()
            .map_or_else(|| NIL.to_string(), |a| render_address(Arc::as_ptr(&a)));

        let title = format!("MockAvatar {}", render_address(self as *const Self));
        f.write_str(&render_record(
            &title,
            &[
                ("ID", uid.to_string()),
                ("imageURL", image_url),
                ("author", author),
                ("validity", self.is_valid().to_string()),
            ],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::CREATED_UID;
    use crate::user::MockUser;
    use swine_container::Container;

    fn user() -> Arc<dyn User> {
        Arc::new(MockUser::with_username("test001"))
    }

    #[test]
    fn new_avatar_has_default_image() {
        let avatar = MockAvatar::new();
        assert_eq!(avatar.uid(), UNSET_UID);
        assert_eq!(avatar.image_url(), DEFAULT_IMAGE_URL);
        assert!(avatar.author().is_none());
    }

    #[test]
    fn author_is_the_given_user() {
        let author = user();
        let avatar = MockAvatar::with_author(&author);

        assert!(Arc::ptr_eq(&avatar.author().unwrap(), &author));
    }

    #[test]
    fn linked_author_is_not_owned() {
        let author = user();
        let avatar = MockAvatar::with_author(&author);
        assert_eq!(Arc::strong_count(&author), 1);

        drop(author);
        assert!(avatar.author().is_none());
    }

    #[test]
    fn user_and_avatar_do_not_keep_each_other_alive() {
        let author = user();
        let avatar: Arc<dyn Avatar> = Arc::new(MockAvatar::with_author(&author));
        author.set_avatar(Some(avatar.clone()));

        let weak_author = Arc::downgrade(&author);
        drop(author);
        assert!(weak_author.upgrade().is_none());
        assert_eq!(Arc::strong_count(&avatar), 1);
    }

    #[test]
    fn sole_author_handle_leaves_no_author() {
        let avatar = MockAvatar::with_author(&user());
        assert!(avatar.author().is_none());
    }

    #[test]
    fn dump_through_trait_object() {
        let author = user();
        let avatar: Arc<dyn Avatar> = Arc::new(MockAvatar::with_author(&author));
        let dump = avatar.to_string();
        assert!(dump.starts_with("MockAvatar 0x"));
        assert!(dump.contains(&format!("\tauthor: {:p}\n", Arc::as_ptr(&author).cast::<()>())));
    }

    #[test]
    fn create_marks_valid() {
        let avatar = MockAvatar::with_author(&user());
        avatar.create(None);
        assert_eq!(avatar.uid(), CREATED_UID);
        assert!(avatar.is_valid());
    }

    #[test]
    fn fetched_image_url_pads_to_three_digits() {
        assert_eq!(fetched_image_url(42), "http://test.com/image042.png");
        assert_eq!(fetched_image_url(3), "http://test.com/image003.png");
    }

    #[test]
    fn show_without_user_factory_fails() {
        let avatar = Arc::new(MockAvatar::new());
        let err = avatar.clone().show(9, &Container::new()).err();

        assert!(err.is_some_and(|e| e.is_not_registered()));
        assert_eq!(avatar.image_url(), fetched_image_url(9));
        assert!(avatar.author().is_none());
    }

    #[test]
    fn display_dumps_fields() {
        let avatar = MockAvatar::new();
        let dump = avatar.to_string();
        assert!(dump.starts_with("MockAvatar 0x"));
        assert!(dump.contains("\timageURL: http://www.superarts.org/swine/default.png\n"));
        assert!(dump.contains("\tauthor: nil\n"));
    }
}
