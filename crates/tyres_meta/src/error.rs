use alloc::boxed::Box;
use alloc::string::String;

use thiserror::Error;

use crate::info::{IntegralKind, Target, TypeHandle};

/// An opaque failure reported by a host type system.
///
/// Probes over hosts that can refuse an introspection request wrap the
/// host's error in [`MetaError::Host`]; the resolvers pass it through as is.
pub type HostError = Box<dyn core::error::Error + Send + Sync>;

// -----------------------------------------------------------------------------
// MetaError

/// Error returned by probes and resolvers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MetaError {
    /// The handle does not name a type or member of the host.
    ///
    /// This is a caller contract violation; retrying cannot succeed.
    #[error("invalid descriptor {0:?}")]
    InvalidDescriptor(Target),

    #[error("type `{0}` is not an enum")]
    NotAnEnum(String),

    /// Neither a name variant nor the numeric fallback matched the token.
    #[error("no constant of enum `{enum_type}` matches `{token}`")]
    NoMatchingEnumValue { enum_type: String, token: String },

    #[error("host type system error: {0}")]
    Host(#[source] HostError),
}

impl MetaError {
    #[inline]
    pub(crate) fn invalid(target: impl Into<Target>) -> Self {
        Self::InvalidDescriptor(target.into())
    }
}

// -----------------------------------------------------------------------------
// RegisterError

/// Error returned while registering types into a
/// [`TypeRegistry`](crate::registry::TypeRegistry).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RegisterError {
    #[error("type handle {0:?} is not registered")]
    InvalidDescriptor(TypeHandle),

    #[error("a type with path `{0}` is already registered")]
    DuplicatePath(String),

    #[error("enum `{path}` declares constant `{name}` more than once")]
    DuplicateConstant { path: String, name: String },

    #[error("value {value} of `{path}::{name}` does not fit in `{underlying}`")]
    ValueOutOfRange {
        path: String,
        name: String,
        value: i128,
        underlying: IntegralKind,
    },

    #[error("`{0}` is not a generic type definition")]
    NotAGenericDefinition(String),

    #[error("`{path}` expects {expected} generic arguments, found {found}")]
    ArityMismatch {
        path: String,
        expected: usize,
        found: usize,
    },
}
