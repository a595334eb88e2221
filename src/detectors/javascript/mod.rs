//! JavaScript/TypeScript/JSX/TSX language detector
//!
//! # Architecture
//!
//! 1. **Core extraction** (`core.rs`): functions, arrow functions, classes,
//!    imports, exports and calls, shared by every dialect
//! 2. **TypeScript** (`typescript.rs`): type annotations, heritage clauses
//!    and interfaces
//!
//! # Supported File Extensions
//!
//! - `.js`, `.mjs`, `.cjs` - JavaScript
//! - `.jsx` - JavaScript with JSX
//! - `.ts` - TypeScript
//! - `.tsx` - TypeScript with JSX
//!
//! Vue and Svelte script sections are routed here by the composite extractor.

pub mod core;
pub mod typescript;

use tree_sitter::Node;

use crate::schema::AnalysisResult;

pub use self::core::Dialect;

/// Extract semantic information from a JavaScript or JSX file
pub fn extract(result: &mut AnalysisResult, root: &Node, source: &str) {
    core::extract_core(result, root, source, Dialect::JavaScript);
}

/// Extract semantic information from a TypeScript or TSX file
pub fn extract_typescript(result: &mut AnalysisResult, root: &Node, source: &str) {
    core::extract_core(result, root, source, Dialect::TypeScript);
}
