//! The built-in host type system.
//!
//! A [`TypeRegistry`] stores type descriptors built with [`TypeBuilder`] and
//! [`EnumBuilder`]. It implements [`TypeProbe`](crate::probe::TypeProbe),
//! so every resolver in this crate can query it.

// -----------------------------------------------------------------------------
// Modules

mod builder;
mod type_registry;

// -----------------------------------------------------------------------------
// Exports

pub use crate::info::IntegralKind;
pub use builder::{EnumBuilder, TypeBuilder};
pub use type_registry::TypeRegistry;
