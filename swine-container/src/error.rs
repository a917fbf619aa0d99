//! Error types for container operations.

use crate::key::DependencyKey;
use std::fmt;
use swine_support::rendering::shorten_type_name;

/// Main error type for all Swine operations.
#[derive(Debug, thiserror::Error)]
pub enum SwineError {
    /// No factory was registered for the requested type and argument shape.
    #[error("{}", .0)]
    NotRegistered(NotRegisteredError),

    /// A factory failed, or produced/received a value of the wrong type.
    #[error("Failed to construct {key}: {source}")]
    ConstructionFailed {
        key: DependencyKey,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl SwineError {
    pub(crate) fn construction(key: &DependencyKey, message: impl Into<String>) -> Self {
        SwineError::ConstructionFailed {
            key: key.clone(),
            source: message.into().into(),
        }
    }

    /// Returns `true` if this error means "nothing registered".
    pub fn is_not_registered(&self) -> bool {
        matches!(self, SwineError::NotRegistered(_))
    }
}

/// Error when no factory matches a resolution request.
#[derive(Debug)]
pub struct NotRegisteredError {
    /// The key that was requested
    pub requested: DependencyKey,
    /// Registered keys that look like what was meant
    pub suggestions: Vec<DependencyKey>,
}

impl fmt::Display for NotRegisteredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dependency not registered: {}", self.requested)?;

        if !self.suggestions.is_empty() {
            write!(f, "\n  Did you mean one of:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n    - {suggestion}")?;
            }
        }

        let produced = shorten_type_name(self.requested.type_name());
        match self.requested.argument_type_name() {
            Some(argument) => write!(
                f,
                "\n  Hint: Did you forget to call .register_with::<{produced}, {}>()?",
                shorten_type_name(argument)
            ),
            None => write!(f, "\n  Hint: Did you forget to call .register::<{produced}>()?"),
        }
    }
}

/// Convenient Result type for Swine operations.
pub type Result<T> = std::result::Result<T, SwineError>;
