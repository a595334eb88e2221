//! Regex-backed detectors
//!
//! Languages without a bundled grammar are scanned line-by-line with
//! regular expressions. The results share the tree-backed schema but are
//! heuristic: a rule can fire inside a comment or string literal, and
//! unusual formatting (a signature split across lines, say) can slip past
//! it. Heuristic results never report syntax errors.
//!
//! Every detector here has the same shape, a [`HeuristicFn`]. Rules are
//! compiled once into `Lazy<Regex>` statics with named capture groups.

use std::collections::HashSet;

use regex::{Captures, Regex};

use crate::schema::{AnalysisResult, Parameter};

pub mod clojure;
pub mod dart;
pub mod fsharp;
pub mod groovy;
pub mod haskell;
pub mod julia;
pub mod kotlin;
pub mod objc;
pub mod perl;
pub mod r;
pub mod sql;
pub mod zig;

/// Entry point of a regex-backed detector
pub type HeuristicFn = fn(&mut AnalysisResult, &str);

/// Compile a built-in rule.
///
/// Rules are string literals exercised by each module's tests, so a failure
/// here is a programming error.
pub(crate) fn rule(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid built-in rule `{pattern}`: {e}"))
}

/// 1-based line of a byte offset
pub fn line_at(text: &str, offset: usize) -> usize {
    let end = offset.min(text.len());
    text.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}

/// Line of the first non-blank character of a whole match.
///
/// A leading `^\s*` can swallow preceding blank lines, so the match start
/// itself is not reliable.
pub fn match_line(text: &str, caps: &Captures) -> usize {
    caps.get(0)
        .map(|m| {
            let skipped = m.as_str().len() - m.as_str().trim_start().len();
            line_at(text, m.start() + skipped)
        })
        .unwrap_or(1)
}

/// Trimmed, non-empty text of a named group
pub fn group<'h>(caps: &Captures<'h>, name: &str) -> Option<&'h str> {
    caps.name(name)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
}

/// Split a parameter list on commas outside any bracket pair.
///
/// Pieces are trimmed; empty pieces are dropped.
pub fn split_top_level(params: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth: usize = 0;
    let mut start = 0;
    let mut prev = ' ';

    for (i, c) in params.char_indices() {
        match c {
            '<' | '(' | '[' | '{' => depth += 1,
            // `->` and `=>` are arrows, not closing brackets
            '>' if prev == '-' || prev == '=' => {}
            '>' | ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&params[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        prev = c;
    }
    parts.push(&params[start..]);

    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// `name: Type = default` parameters (Kotlin, F# style). Modifier words
/// before the name (`vararg`, `val`) are dropped.
pub fn colon_typed_params(params: &str) -> Vec<Parameter> {
    split_top_level(params)
        .into_iter()
        .filter_map(|p| {
            let (names, type_name) = p.split_once(':').unwrap_or((p, ""));
            let name = names.split_whitespace().last()?;
            let type_name = type_name.split('=').next().unwrap_or_default();
            Some(Parameter::typed(name, type_name.trim()))
        })
        .collect()
}

/// `Type name = default` parameters (Groovy, Dart style); a lone word is
/// the name
pub fn prefix_typed_params(params: &str) -> Vec<Parameter> {
    split_top_level(params)
        .into_iter()
        .filter_map(|p| {
            let decl = p.split('=').next().unwrap_or(p);
            let words: Vec<&str> = decl.split_whitespace().collect();
            match words.as_slice() {
                [] => None,
                [name] => Some(Parameter::new(*name)),
                [type_name, .., name] => Some(Parameter::typed(*name, *type_name)),
            }
        })
        .collect()
}

/// Keywords a loose rule must never accept as a name
#[derive(Debug, Clone, Copy)]
pub struct Denylist(pub &'static [&'static str]);

impl Denylist {
    pub fn rejects(&self, word: &str) -> bool {
        self.0.contains(&word)
    }
}

/// Keep the first item of each name, in order
pub fn dedup_by_name<T>(items: Vec<T>, name: impl Fn(&T) -> &str) -> Vec<T> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(name(item).to_string()))
        .collect()
}
