//! Deserialization support.
//!
//! [`EnumSeed`] plugs an [`EnumValueResolver`](crate::resolve::EnumValueResolver)
//! into any `serde` deserializer: string payloads are resolved like tokens,
//! integer payloads by their declared value.

// -----------------------------------------------------------------------------
// Modules

mod enum_seed;

// -----------------------------------------------------------------------------
// Exports

pub use enum_seed::EnumSeed;
