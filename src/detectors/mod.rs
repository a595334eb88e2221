//! Language-specific semantic detectors
//!
//! Each detector turns one language into the shared [`AnalysisResult`]
//! shape. There are three kinds:
//!
//! 1. **Tree detectors**: walk a tree-sitter parse tree. They share the
//!    signature [`TreeExtractFn`](crate::parsing::TreeExtractFn) and are
//!    driven by [`parse_and_extract`](crate::parsing::parse_and_extract),
//!    which also collects syntax errors.
//! 2. **Heuristic detectors** (`heuristic/`): regular expressions for
//!    languages without a bundled grammar.
//! 3. **Composite detector** (`composite.rs`): Vue and Svelte components,
//!    split into sections and delegated to the detectors above.
//!
//! Shared pieces:
//!
//! - `common.rs`: tree traversal and text helpers
//! - `grammar.rs`: per-language node kinds (`LangGrammar`)
//! - `generic.rs`: call resolution and naming driven by a `LangGrammar`
//!
//! # Adding a New Language
//!
//! 1. Add the tree-sitter grammar to `Cargo.toml`, if there is one
//! 2. Add a `Lang` variant and its extensions in `lang.rs`
//! 3. Write the detector (tree or heuristic) and register it in `extract.rs`
//!
//! [`AnalysisResult`]: crate::schema::AnalysisResult

pub mod bash;
pub mod c_family;
pub mod common;
pub mod composite;
pub mod config;
pub mod csharp;
pub mod elixir;
pub mod generic;
pub mod go;
pub mod grammar;
pub mod heuristic;
pub mod java;
pub mod javascript;
pub mod lua;
pub mod markup;
pub mod ocaml;
pub mod php;
pub mod python;
pub mod ruby;
pub mod rust;
pub mod scala;
pub mod swift;

pub use grammar::LangGrammar;
