//! The `User` domain protocol and its mock implementation.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use swine_container::{Resolver, ResolverApi, Result};
use swine_support::rendering::{NIL, render_address, render_record};
use tracing::{debug, instrument};

use crate::avatar::Avatar;
use crate::capability::{Indexable, Presentable, UNSET_UID, Uid};

/// A user account, optionally owning an avatar.
///
/// Resolved from the container as `Arc<dyn User>`, either with no argument
/// or with the username as a `String`. `Display` renders the record dump.
pub trait User: Presentable + fmt::Display + Send + Sync {
    fn username(&self) -> Option<String>;

    fn set_username(&self, username: &str);

    fn avatar(&self) -> Option<Arc<dyn Avatar>>;

    fn set_avatar(&self, avatar: Option<Arc<dyn Avatar>>);
}

/// Username a fetched user gets: `test` plus the id padded to three digits.
pub fn fetched_username(uid: Uid) -> String {
    format!("test{uid:03}")
}

struct UserState {
    uid: Uid,
    username: Option<String>,
    avatar: Option<Arc<dyn Avatar>>,
}

/// In-memory [`User`].
pub struct MockUser {
    state: RwLock<UserState>,
}

impl MockUser {
    /// A user with no identifier, username or avatar.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(UserState {
                uid: UNSET_UID,
                username: None,
                avatar: None,
            }),
        }
    }

    pub fn with_username(username: impl Into<String>) -> Self {
        let user = Self::new();
        user.state.write().username = Some(username.into());
        user
    }
}

impl Default for MockUser {
    fn default() -> Self {
        Self::new()
    }
}

impl Indexable for MockUser {
    fn uid(&self) -> Uid {
        self.state.read().uid
    }

    fn set_uid(&self, uid: Uid) {
        self.state.write().uid = uid;
    }
}

impl Presentable for MockUser {
    /// Sets the username from `uid`, then resolves an avatar authored by
    /// this user, creates it and attaches it.
    #[instrument(skip(self, resolver), name = "user_show")]
    fn show(self: Arc<Self>, uid: Uid, resolver: &dyn Resolver) -> Result<()> {
        {
            let mut state = self.state.write();
            state.uid = uid;
            state.username = Some(fetched_username(uid));
        }

        let author: Arc<dyn User> = self.clone();
        let avatar: Arc<dyn Avatar> = resolver.resolve_with(author)?;
        avatar.create(None);
        self.set_avatar(Some(avatar));

        debug!(uid, "User fetched");
        Ok(())
    }
}

impl User for MockUser {
    fn username(&self) -> Option<String> {
        self.state.read().username.clone()
    }

    fn set_username(&self, username: &str) {
        self.state.write().username = Some(username.to_string());
    }

    fn avatar(&self) -> Option<Arc<dyn Avatar>> {
        self.state.read().avatar.clone()
    }

    fn set_avatar(&self, avatar: Option<Arc<dyn Avatar>>) {
        self.state.write().avatar = avatar;
    }
}

impl fmt::Display for MockUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (uid, username, avatar) = {
            let state = self.state.read();
            (
                state.uid,
                state.username.clone().unwrap_or_else(|| NIL.to_string()),
                state
                    .avatar
                    .as_ref()
                    .map_or_else(|| NIL.to_string(), |a| render_address(Arc::as_ptr(a))),
            )
        };

        let title = format!("MockUser {}", render_address(self as *const Self));
        f.write_str(&render_record(
            &title,
            &[
                ("ID", uid.to_string()),
                ("username", username),
                ("avatar", avatar),
                ("validity", self.is_valid().to_string()),
            ],
        ))
    }
}
