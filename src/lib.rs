//! semantic-extract: multi-language semantic extraction
//!
//! This library turns one source file into a normalized inventory of its
//! functions, types, imports, exports, call sites, notable symbols and
//! syntax errors. Languages with a bundled tree-sitter grammar are walked
//! as parse trees; the rest are scanned with regular expressions; Vue and
//! Svelte components are split into sections and delegated.
//!
//! Analysis is stateless and never fails: unsupported input produces a
//! result carrying a diagnostic.
//!
//! # Example
//!
//! ```
//! use semantic_extract::analyze_source;
//!
//! let result = analyze_source("def greet(name):\n    print(name)\n", "py");
//! assert_eq!(result.language, "python");
//! assert_eq!(result.functions[0].name, "greet");
//! assert_eq!(result.calls[0].callee, "print");
//! ```

pub mod cli;
pub mod detectors;
pub mod error;
pub mod extract;
pub mod lang;
pub mod parsing;
pub mod schema;

// Re-export commonly used types
pub use cli::Cli;
pub use error::{ExtractError, Result};
pub use extract::{analyze, analyze_source, supported_languages, Extractor, LanguageInfo, REGISTRY};
pub use lang::{Lang, LangFamily};
pub use schema::{
    AnalysisRequest, AnalysisResult, Call, Export, Function, Import, Parameter, Property, Symbol,
    SyntaxError, TypeDef,
};
