//! Edge case and property tests
//!
//! - `properties` - invariants that hold for every registered language
//! - `malformed_input` - truncated sources and unknown extensions
//! - `transport` - the binary's stdin/stdout contract

pub mod malformed_input;
pub mod properties;
