//! Semantic extraction orchestration
//!
//! Requests are routed by file extension to a canonical language id and from
//! there, through [`REGISTRY`], to the extractor for that language. Nothing
//! on this path panics or fails: every outcome is an [`AnalysisResult`],
//! with dispatcher problems reported as a single unpositioned diagnostic.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;
use tracing::debug;

use crate::detectors::composite::{self, CompositeKind};
use crate::detectors::heuristic::{self, HeuristicFn};
use crate::detectors::{
    bash, c_family, config, csharp, elixir, go, java, javascript, lua, markup, ocaml, php, python,
    ruby, rust, scala, swift,
};
use crate::error::ExtractError;
use crate::lang::Lang;
use crate::parsing::{parse_and_extract, TreeExtractFn};
use crate::schema::{AnalysisRequest, AnalysisResult};

/// How a language is analyzed
#[derive(Clone, Copy)]
pub enum Extractor {
    /// Walk a tree-sitter parse tree
    Tree(TreeExtractFn),
    /// Scan the text with regular expressions
    Heuristic(HeuristicFn),
    /// Split a component file into sections
    Composite(CompositeKind),
}

impl Extractor {
    /// Analyze `source` as `lang`
    pub fn run(&self, lang: Lang, source: &str) -> AnalysisResult {
        match self {
            Self::Tree(extract) => parse_and_extract(lang, source, *extract),
            Self::Heuristic(extract) => {
                let mut result = AnalysisResult::new(lang.name());
                extract(&mut result, source);
                result
            }
            Self::Composite(kind) => composite::extract(*kind, source),
        }
    }

    /// Short name of the backend, as shown by `--list-languages`
    pub fn backend(&self) -> &'static str {
        match self {
            Self::Tree(_) => "tree",
            Self::Heuristic(_) => "heuristic",
            Self::Composite(_) => "composite",
        }
    }
}

/// Extractor for every implemented canonical language id.
///
/// Recognized languages missing from this table (`json`, `toml`,
/// `markdown`, `xml`) are reported as not yet implemented.
pub static REGISTRY: Lazy<HashMap<&'static str, Extractor>> = Lazy::new(|| {
    use Extractor::{Composite, Heuristic, Tree};

    let entries: [(Lang, Extractor); 37] = [
        // Tree-backed
        (Lang::Php, Tree(php::extract)),
        (Lang::JavaScript, Tree(javascript::extract)),
        (Lang::Jsx, Tree(javascript::extract)),
        (Lang::TypeScript, Tree(javascript::extract_typescript)),
        (Lang::Tsx, Tree(javascript::extract_typescript)),
        (Lang::Python, Tree(python::extract)),
        (Lang::Go, Tree(go::extract)),
        (Lang::Rust, Tree(rust::extract)),
        (Lang::Java, Tree(java::extract)),
        (Lang::CSharp, Tree(csharp::extract)),
        (Lang::Ruby, Tree(ruby::extract)),
        (Lang::Swift, Tree(swift::extract)),
        (Lang::C, Tree(c_family::extract_c)),
        (Lang::Cpp, Tree(c_family::extract_cpp)),
        (Lang::Html, Tree(markup::extract_html)),
        (Lang::Css, Tree(markup::extract_css)),
        (Lang::Scss, Tree(markup::extract_scss)),
        (Lang::Yaml, Tree(config::extract_yaml)),
        (Lang::Bash, Tree(bash::extract)),
        (Lang::Scala, Tree(scala::extract)),
        (Lang::Elixir, Tree(elixir::extract)),
        (Lang::OCaml, Tree(ocaml::extract)),
        (Lang::Lua, Tree(lua::extract)),
        // Regex-backed
        (Lang::Kotlin, Heuristic(heuristic::kotlin::extract)),
        (Lang::Groovy, Heuristic(heuristic::groovy::extract)),
        (Lang::Clojure, Heuristic(heuristic::clojure::extract)),
        (Lang::Dart, Heuristic(heuristic::dart::extract)),
        (Lang::FSharp, Heuristic(heuristic::fsharp::extract)),
        (Lang::Haskell, Heuristic(heuristic::haskell::extract)),
        (Lang::Julia, Heuristic(heuristic::julia::extract)),
        (Lang::ObjC, Heuristic(heuristic::objc::extract)),
        (Lang::Perl, Heuristic(heuristic::perl::extract)),
        (Lang::R, Heuristic(heuristic::r::extract)),
        (Lang::Sql, Heuristic(heuristic::sql::extract)),
        (Lang::Zig, Heuristic(heuristic::zig::extract)),
        // Composite
        (Lang::Vue, Composite(CompositeKind::Vue)),
        (Lang::Svelte, Composite(CompositeKind::Svelte)),
    ];

    entries
        .into_iter()
        .map(|(lang, extractor)| (lang.name(), extractor))
        .collect()
});

/// Analyze one request
pub fn analyze(request: &AnalysisRequest) -> AnalysisResult {
    if !request.filename.is_empty() {
        debug!(filename = request.filename.as_str(), "analyzing request");
    }
    analyze_source(&request.content, &request.extension)
}

/// Analyze `content` as the language registered for `extension`
/// (without its leading dot)
pub fn analyze_source(content: &str, extension: &str) -> AnalysisResult {
    let lang = match Lang::from_extension(extension) {
        Ok(lang) => lang,
        Err(err) => {
            debug!(extension, "no language for extension");
            return AnalysisResult::from_error("unknown", &err);
        }
    };

    let Some(extractor) = REGISTRY.get(lang.name()) else {
        debug!(language = lang.name(), "language has no extractor");
        let err = ExtractError::NotImplemented {
            language: lang.name().to_string(),
        };
        return AnalysisResult::from_error(lang.name(), &err);
    };

    debug!(
        language = lang.name(),
        family = lang.family().name(),
        backend = extractor.backend(),
        bytes = content.len(),
        "dispatching"
    );
    extractor.run(lang, content)
}

/// One row of the extension table
#[derive(Debug, Clone, Serialize)]
pub struct LanguageInfo {
    pub language: &'static str,
    pub family: &'static str,
    pub extensions: &'static [&'static str],
    /// `tree`, `heuristic`, `composite`, or `none` when recognized only
    pub backend: &'static str,
}

/// Every recognized language, in extension-table order
pub fn supported_languages() -> Vec<LanguageInfo> {
    Lang::ALL
        .iter()
        .map(|lang| LanguageInfo {
            language: lang.name(),
            family: lang.family().name(),
            extensions: lang.extensions(),
            backend: REGISTRY.get(lang.name()).map_or("none", Extractor::backend),
        })
        .collect()
}
