//! Singular and plural transforms.
//!
//! An [`Inflector`] is registered on a [`Locale`](crate::Locale). When present,
//! name variant generation adds the singular and plural forms of every
//! casing variant of a name.

// -----------------------------------------------------------------------------
// Modules

mod english;

// -----------------------------------------------------------------------------
// Exports

pub use english::EnglishInflector;

use alloc::borrow::Cow;

// -----------------------------------------------------------------------------
// Inflector

/// Language-specific singular/plural transforms.
///
/// Implementations should preserve the casing style of their input, so that
/// `ACTIVE` pluralizes to `ACTIVES` rather than `ACTIVEs`. Words that have no
/// distinct form are returned unchanged, preferably borrowed.
pub trait Inflector: Send + Sync {
    /// Returns the plural form of `word`.
    fn pluralize<'a>(&self, word: &'a str) -> Cow<'a, str>;

    /// Returns the singular form of `word`.
    fn singularize<'a>(&self, word: &'a str) -> Cow<'a, str>;
}
