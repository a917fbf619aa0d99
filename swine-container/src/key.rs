//! Registration keys.
//!
//! [`DependencyKey`] identifies one factory in the container. It combines
//! the [`TypeId`] of the produced type with the shape of the constructor
//! argument: none, or exactly one argument of a given type.

use std::any::{TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Type identity plus a readable name for messages.
#[derive(Clone, Copy)]
struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    fn of<T: ?Sized + 'static>() -> Self {
        Self { id: TypeId::of::<T>(), name: type_name::<T>() }
    }
}

/// Uniquely identifies a factory in the container.
///
/// # Examples
/// ```
/// use swine_container::key::DependencyKey;
///
/// let plain = DependencyKey::of::<String>();
/// assert_eq!(plain.argument_type_name(), None);
///
/// let shaped = DependencyKey::with_argument::<String, u32>();
/// assert_eq!(shaped.argument_type_name(), Some("u32"));
/// assert_ne!(plain, shaped);
/// ```
#[derive(Clone)]
pub struct DependencyKey {
    produced: TypeTag,
    argument: Option<TypeTag>,
}

impl DependencyKey {
    /// Key for a factory producing `T` from no argument.
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self { produced: TypeTag::of::<T>(), argument: None }
    }

    /// Key for a factory producing `T` from one argument of type `A`.
    #[inline]
    pub fn with_argument<T: ?Sized + 'static, A: ?Sized + 'static>() -> Self {
        Self {
            produced: TypeTag::of::<T>(),
            argument: Some(TypeTag::of::<A>()),
        }
    }

    /// Returns the [`TypeId`] of the produced type.
    #[inline]
    pub fn produced_type_id(&self) -> TypeId {
        self.produced.id
    }

    /// Returns the produced type's name.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.produced.name
    }

    /// Returns the [`TypeId`] of the argument, if the factory takes one.
    #[inline]
    pub fn argument_type_id(&self) -> Option<TypeId> {
        self.argument.map(|tag| tag.id)
    }

    #[inline]
    pub fn argument_type_name(&self) -> Option<&'static str> {
        self.argument.map(|tag| tag.name)
    }

    /// Number of constructor arguments: 0 or 1.
    #[inline]
    pub fn arity(&self) -> usize {
        usize::from(self.argument.is_some())
    }
}

impl PartialEq for DependencyKey {
    fn eq(&self, other: &Self) -> bool {
        self.produced.id == other.produced.id
            && self.argument_type_id() == other.argument_type_id()
    }
}

impl Eq for DependencyKey {}

impl Hash for DependencyKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.produced.id.hash(state);
        self.argument_type_id().hash(state);
    }
}

impl fmt::Debug for DependencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.argument {
            Some(arg) => write!(f, "DependencyKey({}, argument={})", self.produced.name, arg.name),
            None => write!(f, "DependencyKey({})", self.produced.name),
        }
    }
}

impl fmt::Display for DependencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.argument {
            Some(arg) => write!(f, "{} (argument: {})", self.produced.name, arg.name),
            None => write!(f, "{}", self.produced.name),
        }
    }
}
