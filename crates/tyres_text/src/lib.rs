#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod casing;
mod locale;
mod variants;

pub mod inflect;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use casing::{CaseMapping, CaseRules};
pub use inflect::{EnglishInflector, Inflector};
pub use locale::{Locale, LocaleError};
pub use variants::NameVariants;
