//! Parse sessions and the tree-backed extraction driver.
//!
//! A [`ParseSession`] owns the tree-sitter tree for one analysis. Nodes handed
//! out by [`ParseSession::root`] borrow the session, so they cannot outlive
//! the tree; dropping the session releases it on every exit path.
//!
//! # Example
//!
//! ```ignore
//! use semantic_extract::parsing::parse_and_extract;
//! use semantic_extract::detectors::go;
//! use semantic_extract::Lang;
//!
//! let result = parse_and_extract(Lang::Go, "package main\nfunc Foo() {}\n", go::extract);
//! assert_eq!(result.functions[0].name, "Foo");
//! ```

use tree_sitter::{Node, Parser, Tree};
use tracing::{debug, warn};

use crate::detectors::common::collect_syntax_errors;
use crate::error::{ExtractError, Result};
use crate::lang::Lang;
use crate::schema::{AnalysisResult, SyntaxError};

/// Signature shared by every tree-backed extractor.
///
/// Extractors receive the root node and the source it was parsed from, and
/// append whatever they can resolve to `result`. They never fail: a
/// candidate with missing structure is skipped.
pub type TreeExtractFn = fn(&mut AnalysisResult, &Node<'_>, &str);

/// One parsed document
pub struct ParseSession<'src> {
    lang: Lang,
    source: &'src str,
    tree: Tree,
}

impl<'src> ParseSession<'src> {
    /// Parse `source` with the grammar registered for `lang`.
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::ParseFailure` if:
    /// - The language has no grammar, or the grammar cannot be loaded
    /// - The parser gives up without producing a tree
    pub fn open(lang: Lang, source: &'src str) -> Result<Self> {
        let failure = || ExtractError::ParseFailure {
            language: lang.display_name().to_string(),
        };

        let grammar = lang.tree_sitter_language().ok_or_else(failure)?;

        let mut parser = Parser::new();
        parser.set_language(&grammar).map_err(|e| {
            warn!(language = lang.name(), error = ?e, "grammar rejected by parser");
            failure()
        })?;

        let tree = parser.parse(source, None).ok_or_else(failure)?;

        Ok(Self { lang, source, tree })
    }

    /// Root node, valid for as long as the session is alive
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    pub fn lang(&self) -> Lang {
        self.lang
    }

    /// Every ERROR or missing node, in document order
    pub fn syntax_errors(&self) -> Vec<SyntaxError> {
        collect_syntax_errors(&self.root())
    }
}

/// Parse `source` as `lang` and run a tree extractor over it.
///
/// Syntax defects are always collected, independently of what the extractor
/// manages to resolve. A parse failure yields a result carrying only the
/// language and one diagnostic.
pub fn parse_and_extract(lang: Lang, source: &str, extract: TreeExtractFn) -> AnalysisResult {
    let session = match ParseSession::open(lang, source) {
        Ok(session) => session,
        Err(err) => {
            warn!(language = lang.name(), "{}", err);
            return AnalysisResult::from_error(lang.name(), &err);
        }
    };

    let mut result = AnalysisResult::new(lang.name());
    result.errors = session.syntax_errors();
    extract(&mut result, &session.root(), session.source());

    debug!(
        language = lang.name(),
        functions = result.functions.len(),
        classes = result.classes.len(),
        calls = result.calls.len(),
        errors = result.errors.len(),
        "tree extraction finished"
    );

    result
}
