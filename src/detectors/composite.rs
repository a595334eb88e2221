//! Single-file component detector (Vue, Svelte)
//!
//! A component file is split into sections with regular expressions and
//! each section is delegated to the extractor of its own language:
//!
//! - `<script>`: JavaScript or TypeScript, chosen by the `lang` attribute
//! - `<template>` (Vue only): component tags and directives, via the HTML grammar
//! - `<style>`: CSS, or SCSS for `lang="scss"`
//!
//! Every line a section reports is relative to the section, so it is rebased
//! by the number of newlines preceding the section content.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::detectors::common::{child_of_kind, find_nodes, get_node_text, start_line};
use crate::detectors::{javascript, markup};
use crate::lang::Lang;
use crate::parsing::{parse_and_extract, ParseSession, TreeExtractFn};
use crate::schema::{AnalysisResult, Symbol};

static SCRIPT: Lazy<Regex> = Lazy::new(|| section("script"));
static STYLE: Lazy<Regex> = Lazy::new(|| section("style"));

static TEMPLATE_OPEN: Lazy<Regex> = Lazy::new(|| regex_rule(r"(?i)<template\b[^>]*>"));
static TEMPLATE_CLOSE: Lazy<Regex> = Lazy::new(|| regex_rule(r"(?i)</template\s*>"));

static LANG_ATTR: Lazy<Regex> =
    Lazy::new(|| regex_rule(r#"(?i)\blang\s*=\s*["']?(?P<lang>[\w-]+)"#));

fn section(tag: &str) -> Regex {
    regex_rule(&format!(r"(?is)<{tag}\b(?P<attrs>[^>]*)>(?P<body>.*?)</{tag}\s*>"))
}

fn regex_rule(pattern: &str) -> Regex {
    crate::detectors::heuristic::rule(pattern)
}

/// Component file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeKind {
    Vue,
    Svelte,
}

impl CompositeKind {
    pub fn lang(&self) -> Lang {
        match self {
            Self::Vue => Lang::Vue,
            Self::Svelte => Lang::Svelte,
        }
    }

    fn has_template(&self) -> bool {
        matches!(self, Self::Vue)
    }
}

/// A section's body and its line offset in the file
struct Section<'a> {
    attrs: &'a str,
    body: &'a str,
    offset: usize,
}

/// Analyze a component file
pub fn extract(kind: CompositeKind, source: &str) -> AnalysisResult {
    let mut result = AnalysisResult::new(kind.lang().name());

    for script in sections(&SCRIPT, source) {
        let lang = script_lang(script.attrs);
        let extractor: TreeExtractFn = match lang {
            Lang::TypeScript | Lang::Tsx => javascript::extract_typescript,
            _ => javascript::extract,
        };
        let mut part = parse_and_extract(lang, script.body, extractor);
        part.rebase_lines(script.offset);
        result.merge(part);
    }

    if kind.has_template() {
        if let Some(template) = template_section(source) {
            result
                .symbols
                .extend(template_symbols(template.body, template.offset));
        }
    }

    for style in sections(&STYLE, source) {
        let (lang, extractor): (Lang, TreeExtractFn) = match attr_lang(style.attrs).as_deref() {
            Some("scss") => (Lang::Scss, markup::extract_scss),
            _ => (Lang::Css, markup::extract_css),
        };
        let mut part = parse_and_extract(lang, style.body, extractor);
        part.rebase_lines(style.offset);
        // Styles only contribute symbols
        result.symbols.extend(part.symbols);
    }

    debug!(
        language = result.language.as_str(),
        functions = result.functions.len(),
        symbols = result.symbols.len(),
        "component extraction finished"
    );

    result
}

fn sections<'a>(rule: &Regex, source: &'a str) -> Vec<Section<'a>> {
    rule.captures_iter(source)
        .filter_map(|caps| {
            let body = caps.name("body")?;
            Some(Section {
                attrs: caps.name("attrs").map_or("", |m| m.as_str()),
                body: body.as_str(),
                offset: newlines_before(source, body.start()),
            })
        })
        .collect()
}

/// The outermost template: first opening tag to last closing tag, so
/// nested `<template v-if>` blocks stay inside it
fn template_section(source: &str) -> Option<Section<'_>> {
    let open = TEMPLATE_OPEN.find(source)?;
    let close = TEMPLATE_CLOSE
        .find_iter(source)
        .filter(|m| m.start() >= open.end())
        .last()?;
    Some(Section {
        attrs: "",
        body: &source[open.end()..close.start()],
        offset: newlines_before(source, open.end()),
    })
}

fn newlines_before(source: &str, offset: usize) -> usize {
    source.as_bytes()[..offset].iter().filter(|&&b| b == b'\n').count()
}

fn attr_lang(attrs: &str) -> Option<String> {
    LANG_ATTR
        .captures(attrs)
        .and_then(|caps| caps.name("lang"))
        .map(|m| m.as_str().to_ascii_lowercase())
}

/// Script dialect from its `lang` attribute
fn script_lang(attrs: &str) -> Lang {
    match attr_lang(attrs).as_deref() {
        Some("ts" | "typescript") => Lang::TypeScript,
        Some("tsx") => Lang::Tsx,
        Some("jsx") => Lang::Jsx,
        _ => Lang::JavaScript,
    }
}

/// Components and directives used in a template
fn template_symbols(template: &str, offset: usize) -> Vec<Symbol> {
    let session = match ParseSession::open(Lang::Html, template) {
        Ok(session) => session,
        Err(err) => {
            debug!("{}", err);
            return Vec::new();
        }
    };
    let root = session.root();
    let mut symbols = Vec::new();

    for tag in find_nodes(&root, &["start_tag", "self_closing_tag"]) {
        if let Some(name) = child_of_kind(&tag, "tag_name").map(|n| get_node_text(&n, template)) {
            if is_component_tag(&name) {
                symbols.push(Symbol::new(name, "component", start_line(&tag) + offset));
            }
        }

        for attr in find_nodes(&tag, &["attribute"]) {
            let Some(name) = child_of_kind(&attr, "attribute_name").map(|n| get_node_text(&n, template))
            else {
                continue;
            };
            if name.starts_with("v-") || name.starts_with('@') || name.starts_with(':') {
                symbols.push(Symbol::new(name, "directive", start_line(&attr) + offset));
            }
        }
    }

    symbols
}

/// PascalCase (`UserCard`) or hyphenated (`user-card`) custom element
fn is_component_tag(name: &str) -> bool {
    let pascal = name.starts_with(|c: char| c.is_ascii_uppercase())
        && name.chars().any(|c| c.is_ascii_lowercase());
    let kebab = name.contains('-') && !name.starts_with("v-");
    pascal || kebab
}
