//! The resolvers.
//!
//! ## Menu
//!
//! - [`AttributeResolver`]: attachments of a kind on a type or member, optionally inherited.
//! - [`GenericHierarchyMatcher`]: whether a type derives from an open generic definition.
//! - [`EnumValueResolver`]: maps tokens such as `"ACTIVES"` or `"1"` onto enum constants.
//!
//! Each resolver borrows a [`TypeProbe`](crate::probe::TypeProbe) and holds no
//! other state, so they are `Copy` and can be created per call.

// -----------------------------------------------------------------------------
// Modules

mod attribute;
mod enum_value;
mod generic;

// -----------------------------------------------------------------------------
// Exports

pub use attribute::{Attachments, AttributeResolver};
pub use enum_value::{EnumValue, EnumValueResolver, NumericFallback, ResolverOptions};
pub use generic::GenericHierarchyMatcher;

// -----------------------------------------------------------------------------
// Tests
