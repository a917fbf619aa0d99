//! Factory registry: the table behind the container.
//!
//! The registry maps a [`DependencyKey`] to the factory that builds
//! instances for it. Registering the same key twice replaces the first
//! factory.

use std::any::Any;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, trace};

use crate::error::SwineError;
use crate::key::DependencyKey;

/// Type-erased constructor argument handed to a factory.
pub type Argument = Option<Box<dyn Any + Send>>;

/// Type-erased instance produced by a factory.
pub type Instance = Box<dyn Any + Send + Sync>;

/// Type alias for factory functions.
///
/// A factory receives a [`Resolver`] (so it can resolve other registrations)
/// plus the type-erased argument, and returns a boxed instance or an error.
///
/// `Arc` rather than `Box`: the registry clones the factory out of its
/// table before calling it, so a factory may re-enter the container.
pub type FactoryFn = Arc<dyn Fn(&dyn Resolver, Argument) -> Result<Instance, SwineError> + Send + Sync>;

/// Trait for resolving registrations by key.
///
/// This is what factories and entities receive. Typed access lives on
/// [`ResolverApi`](crate::container::ResolverApi).
pub trait Resolver: Send + Sync {
    fn resolve_key(&self, key: &DependencyKey, argument: Argument) -> Result<Instance, SwineError>;
}

/// Registration entry for a single factory.
#[derive(Clone)]
pub struct Registration {
    pub key: DependencyKey,
    pub factory: FactoryFn,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration").field("key", &self.key).finish()
    }
}

/// Stores all factory registrations.
#[derive(Debug, Default)]
pub struct Registry {
    registrations: DashMap<DependencyKey, Registration>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a factory under its key.
    ///
    /// Returns the registration that was replaced, if any.
    pub fn register(&self, registration: Registration) -> Option<Registration> {
        let key = registration.key.clone();
        let previous = self.registrations.insert(key.clone(), registration);

        if previous.is_some() {
            debug!(key = %key, "Replaced existing registration");
        } else {
            debug!(key = %key, arity = key.arity(), "Registered factory");
        }
        previous
    }

    /// Looks up a registration by key.
    ///
    /// The entry is cloned so no map guard outlives the call.
    pub fn get(&self, key: &DependencyKey) -> Option<Registration> {
        let found = self.registrations.get(key).map(|entry| entry.value().clone());
        trace!(key = %key, found = found.is_some(), "Registry lookup");
        found
    }

    pub fn contains(&self, key: &DependencyKey) -> bool {
        self.registrations.contains_key(key)
    }

    /// Returns the number of registered factories.
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Returns true if no factories are registered.
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Returns every registered key, in no particular order.
    pub fn registered_keys(&self) -> Vec<DependencyKey> {
        self.registrations.iter().map(|entry| entry.key().clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Database;

    fn factory_of(value: i32) -> FactoryFn {
        Arc::new(move |_: &dyn Resolver, _: Argument| -> Result<Instance, SwineError> {
            Ok(Box::new(value))
        })
    }

    fn make_reg(key: DependencyKey, value: i32) -> Registration {
        Registration { key, factory: factory_of(value) }
    }

    struct NoResolver;

    impl Resolver for NoResolver {
        fn resolve_key(&self, key: &DependencyKey, _: Argument) -> Result<Instance, SwineError> {
            Err(SwineError::construction(key, "unused"))
        }
    }

    fn produce(reg: &Registration) -> i32 {
        let boxed = (reg.factory)(&NoResolver, None).unwrap();
        *boxed.downcast::<i32>().unwrap()
    }

    #[test]
    fn register_and_get() {
        let reg = Registry::new();
        let key = DependencyKey::of::<Database>();
        assert!(reg.register(make_reg(key.clone(), 1)).is_none());
        assert!(reg.contains(&key));
        assert_eq!(produce(&reg.get(&key).unwrap()), 1);
    }

    #[test]
    fn last_registration_wins() {
        let reg = Registry::new();
        let key = DependencyKey::of::<Database>();
        reg.register(make_reg(key.clone(), 1));
        let replaced = reg.register(make_reg(key.clone(), 2));

        assert!(replaced.is_some());
        assert_eq!(reg.len(), 1);
        assert_eq!(produce(&reg.get(&key).unwrap()), 2);
    }

    #[test]
    fn shapes_are_separate_entries() {
        let reg = Registry::new();
        reg.register(make_reg(DependencyKey::of::<Database>(), 1));
        reg.register(make_reg(DependencyKey::with_argument::<Database, String>(), 2));

        assert_eq!(reg.len(), 2);
        assert_eq!(reg.registered_keys().len(), 2);
        assert!(reg.get(&DependencyKey::with_argument::<Database, u8>()).is_none());
    }

    #[test]
    fn empty_registry() {
        let reg = Registry::new();
        assert!(reg.is_empty());
        assert!(reg.get(&DependencyKey::of::<Database>()).is_none());
    }
}
