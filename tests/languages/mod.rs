//! Language-specific integration tests for semantic-extract
//!
//! Every test goes through the public dispatcher (`analyze_source`) with a
//! file extension, exactly as a request would, organized by language family.
//!
//! ## Test Categories per Language
//!
//! 1. **Declarations** - functions, types, methods and properties
//! 2. **Dependencies** - imports and exports
//! 3. **Call Sites** - plain, member and receiver resolution
//! 4. **Symbols** - language-specific notable names

pub mod data_family;
pub mod dotnet_family;
pub mod functional_family;
pub mod javascript_family;
pub mod jvm_family;
pub mod markup_family;
pub mod scripting_family;
pub mod systems_family;
