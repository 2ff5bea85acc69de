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

mod error;
mod hash;

pub mod info;
pub mod probe;
pub mod registry;
pub mod resolve;
pub mod serde;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use error::{HostError, MetaError, RegisterError};
pub use tyres_text as text;
