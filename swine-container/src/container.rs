//! # The Container
//!
//! A table of factories keyed by produced type and argument shape. Every
//! resolution calls the matching factory and hands back a fresh value;
//! there are no singletons, scopes or disposal.
//!
//! The container is an ordinary value owned by whoever builds it. Pass it
//! (or `&dyn Resolver`) to the code that needs to resolve.
//!
//! # Examples
//! ```rust
//! use swine_container::prelude::*;
//! use std::sync::Arc;
//!
//! trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! struct Plain(String);
//! impl Greeter for Plain {
//!     fn greet(&self) -> String { format!("hello, {}", self.0) }
//! }
//!
//! let container = Container::builder()
//!     .register::<Arc<dyn Greeter>>(|_| Ok(Arc::new(Plain("world".into()))))
//!     .register_with::<Arc<dyn Greeter>, String>(|_, name| Ok(Arc::new(Plain(name))))
//!     .build();
//!
//! let default: Arc<dyn Greeter> = container.resolve().unwrap();
//! assert_eq!(default.greet(), "hello, world");
//!
//! let named: Arc<dyn Greeter> = container.resolve_with("swine".to_string()).unwrap();
//! assert_eq!(named.greet(), "hello, swine");
//! ```

use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

use swine_support::rendering::suggest_similar;
use tracing::{debug, info, trace};

use crate::error::{NotRegisteredError, Result, SwineError};
use crate::key::DependencyKey;
use crate::provider::Provider;
use crate::registry::{Argument, FactoryFn, Instance, Registration, Registry, Resolver};

const MAX_SUGGESTIONS: usize = 3;

// ============================================================
// ContainerBuilder
// ============================================================

/// Chained registration front-end for a new [`Container`].
///
/// ```rust,ignore
/// let container = Container::builder()
///     .register::<Arc<dyn User>>(|_| Ok(Arc::new(MockUser::new())))
///     .add_provider(&AvatarProvider)
///     .build();
/// ```
pub struct ContainerBuilder {
    container: Container,
}

impl ContainerBuilder {
    fn new() -> Self {
        Self { container: Container::new() }
    }

    /// See [`Container::register`].
    pub fn register<T: Send + Sync + 'static>(
        self,
        factory: impl Fn(&dyn Resolver) -> Result<T> + Send + Sync + 'static,
    ) -> Self {
        self.container.register(factory);
        self
    }

    /// See [`Container::register_with`].
    pub fn register_with<T: Send + Sync + 'static, A: Send + 'static>(
        self,
        factory: impl Fn(&dyn Resolver, A) -> Result<T> + Send + Sync + 'static,
    ) -> Self {
        self.container.register_with(factory);
        self
    }

    /// Add a [`Provider`] module.
    pub fn add_provider(self, provider: &dyn Provider) -> Self {
        self.container.add_provider(provider);
        self
    }

    pub fn build(self) -> Container {
        info!(registered = self.container.len(), "Container built");
        self.container
    }
}

// ═══════════════════════════════════════════
// Container
// ═══════════════════════════════════════════

/// Factory table resolving types with zero or one constructor argument.
#[derive(Default)]
pub struct Container {
    registry: Registry,
}

impl Container {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new builder.
    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::new()
    }

    /// Register a zero-argument factory for `T`.
    ///
    /// Replaces any earlier zero-argument factory for `T`.
    pub fn register<T: Send + Sync + 'static>(
        &self,
        factory: impl Fn(&dyn Resolver) -> Result<T> + Send + Sync + 'static,
    ) -> &Self {
        let factory: FactoryFn = Arc::new(move |resolver: &dyn Resolver, _: Argument| -> Result<Instance> {
            Ok(Box::new(factory(resolver)?))
        });
        self.registry.register(Registration { key: DependencyKey::of::<T>(), factory });
        self
    }

    /// Register a factory building `T` from one argument of type `A`.
    ///
    /// Replaces any earlier factory for the same `(T, A)` pair. The
    /// zero-argument factory for `T`, if any, is unaffected.
    pub fn register_with<T: Send + Sync + 'static, A: Send + 'static>(
        &self,
        factory: impl Fn(&dyn Resolver, A) -> Result<T> + Send + Sync + 'static,
    ) -> &Self {
        let key = DependencyKey::with_argument::<T, A>();
        let factory_key = key.clone();
        let factory: FactoryFn = Arc::new(move |resolver: &dyn Resolver, argument: Argument| -> Result<Instance> {
            let argument = take_argument::<A>(&factory_key, argument)?;
            Ok(Box::new(factory(resolver, argument)?))
        });
        self.registry.register(Registration { key, factory });
        self
    }

    /// Let a [`Provider`] register its factories here.
    pub fn add_provider(&self, provider: &dyn Provider) -> &Self {
        debug!(provider = provider.name(), "Adding provider");
        provider.register(self);
        self
    }

    /// Resolve `T` through its zero-argument factory.
    ///
    /// # Errors
    /// [`SwineError::NotRegistered`] if no zero-argument factory exists for `T`.
    pub fn resolve<T: Send + Sync + 'static>(&self) -> Result<T> {
        let key = DependencyKey::of::<T>();
        trace!(key = %key, "Resolving");
        let boxed = self.resolve_internal(&key, None)?;
        downcast_instance(&key, boxed)
    }

    /// Resolve `T` through its factory taking an `A`.
    ///
    /// The argument type must match the registration exactly: a factory
    /// registered for `Arc<dyn Trait>` is not found with an `Arc<Concrete>`.
    ///
    /// # Errors
    /// [`SwineError::NotRegistered`] if no factory exists for `(T, A)`.
    pub fn resolve_with<T: Send + Sync + 'static, A: Send + 'static>(&self, argument: A) -> Result<T> {
        let key = DependencyKey::with_argument::<T, A>();
        trace!(key = %key, "Resolving with argument");
        let argument: Box<dyn Any + Send> = Box::new(argument);
        let boxed = self.resolve_internal(&key, Some(argument))?;
        downcast_instance(&key, boxed)
    }

    pub fn is_registered<T: 'static>(&self) -> bool {
        self.registry.contains(&DependencyKey::of::<T>())
    }

    pub fn is_registered_with<T: 'static, A: 'static>(&self) -> bool {
        self.registry.contains(&DependencyKey::with_argument::<T, A>())
    }

    /// Number of registered factories, counting each argument shape.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Internal resolve — returns the type-erased value.
    fn resolve_internal(&self, key: &DependencyKey, argument: Argument) -> Result<Instance> {
        let registration = self.registry.get(key).ok_or_else(|| {
            debug!(key = %key, "No factory registered");
            SwineError::NotRegistered(NotRegisteredError {
                requested: key.clone(),
                suggestions: self.find_suggestions(key),
            })
        })?;

        let resolver: &dyn Resolver = self;
        (registration.factory)(resolver, argument)
    }

    /// Same type with another argument shape first, then look-alike names.
    fn find_suggestions(&self, key: &DependencyKey) -> Vec<DependencyKey> {
        let keys = self.registry.registered_keys();

        let same_type: Vec<DependencyKey> = keys
            .iter()
            .filter(|k| k.produced_type_id() == key.produced_type_id())
            .cloned()
            .collect();
        if !same_type.is_empty() {
            return same_type;
        }

        let names: Vec<String> = keys.iter().map(ToString::to_string).collect();
        let available: Vec<&str> = names.iter().map(String::as_str).collect();
        let picked = suggest_similar(&key.to_string(), &available, MAX_SUGGESTIONS);

        keys.into_iter()
            .filter(|k| picked.contains(&k.to_string()))
            .collect()
    }
}

impl Resolver for Container {
    fn resolve_key(&self, key: &DependencyKey, argument: Argument) -> Result<Instance> {
        self.resolve_internal(key, argument)
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("registered", &self.registry.len())
            .finish()
    }
}

// ═══════════════════════════════════════════
// Typed access for any Resolver
// ═══════════════════════════════════════════

/// Typed resolution on top of [`Resolver`].
///
/// Use this inside factories and entity code that only holds a
/// `&dyn Resolver`:
///
/// ```rust,ignore
/// container.register::<Session>(|r| {
///     let user: Arc<dyn User> = r.resolve_with("guest".to_string())?;
///     Ok(Session::new(user))
/// });
/// ```
pub trait ResolverApi {
    fn resolve<T: Send + Sync + 'static>(&self) -> Result<T>;
    fn resolve_with<T: Send + Sync + 'static, A: Send + 'static>(&self, argument: A) -> Result<T>;
}

impl<R: Resolver + ?Sized> ResolverApi for R {
    fn resolve<T: Send + Sync + 'static>(&self) -> Result<T> {
        let key = DependencyKey::of::<T>();
        let boxed = self.resolve_key(&key, None)?;
        downcast_instance(&key, boxed)
    }

    fn resolve_with<T: Send + Sync + 'static, A: Send + 'static>(&self, argument: A) -> Result<T> {
        let key = DependencyKey::with_argument::<T, A>();
        let argument: Box<dyn Any + Send> = Box::new(argument);
        let boxed = self.resolve_key(&key, Some(argument))?;
        downcast_instance(&key, boxed)
    }
}

fn downcast_instance<T: 'static>(key: &DependencyKey, boxed: Instance) -> Result<T> {
    boxed
        .downcast::<T>()
        .map(|b| *b)
        .map_err(|_| SwineError::construction(key, format!("Type mismatch: expected {}", type_name::<T>())))
}

fn take_argument<A: 'static>(key: &DependencyKey, argument: Argument) -> Result<A> {
    let boxed = argument.ok_or_else(|| SwineError::construction(key, "Missing constructor argument"))?;
    boxed.downcast::<A>().map(|b| *b).map_err(|_| {
        SwineError::construction(key, format!("Argument type mismatch: expected {}", type_name::<A>()))
    })
}

// ═══════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════

pub mod prelude {
    pub use super::{Container, ContainerBuilder, ResolverApi};
    pub use crate::error::{Result, SwineError};
    pub use crate::key::DependencyKey;
    pub use crate::provider::Provider;
    pub use crate::registry::Resolver;
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
