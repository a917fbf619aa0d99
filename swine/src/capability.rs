//! Capability protocols shared by every entity.
//!
//! [`Indexable`] gives an entity an identity, [`Presentable`] adds the two
//! lifecycle transitions: `create` (persist, simulated) and `show` (fetch
//! by id, simulated). Both come with default behaviour where the rule is
//! the same for every entity.

use std::sync::Arc;

use swine_container::{Resolver, Result, SwineError};
use tracing::debug;

/// Entity identifier. Negative means "not created or fetched yet".
pub type Uid = i64;

/// Sentinel identifier of a fresh entity.
pub const UNSET_UID: Uid = -1;

/// Identifier every successful `create` assigns.
pub const CREATED_UID: Uid = 1;

/// Callback run once `create` finishes. Always receives `None`.
pub type Completion<'a> = Box<dyn FnOnce(Option<&SwineError>) + 'a>;

/// Something with an identifier.
pub trait Indexable {
    fn uid(&self) -> Uid;

    fn set_uid(&self, uid: Uid);

    /// Valid once an identifier has been assigned.
    fn is_valid(&self) -> bool {
        self.uid() >= 0
    }
}

/// An entity that can be created and fetched.
pub trait Presentable: Indexable {
    /// Marks the entity as created, then runs `completion` with no error.
    ///
    /// Calling it again re-assigns the same identifier.
    fn create(&self, completion: Option<Completion<'_>>) {
        self.set_uid(CREATED_UID);
        debug!(uid = CREATED_UID, "Entity created");
        if let Some(done) = completion {
            done(None);
        }
    }

    /// Simulates fetching the entity with identifier `uid`.
    ///
    /// Fills the fields derived from `uid` and attaches a linked entity
    /// obtained from `resolver`.
    ///
    /// # Errors
    /// Whatever resolving the linked entity returns, typically
    /// [`SwineError::NotRegistered`].
    fn show(self: Arc<Self>, uid: Uid, resolver: &dyn Resolver) -> Result<()>;
}
