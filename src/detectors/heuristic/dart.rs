//! Dart detector (heuristic)

use once_cell::sync::Lazy;
use regex::Regex;

use super::{group, match_line, rule, split_top_level, Denylist};
use crate::schema::{AnalysisResult, Function, Import, Parameter, TypeDef};

static FUNCTION: Lazy<Regex> = Lazy::new(|| {
    rule(
        r"(?m)^\s*(?:(?P<static>static)\s+)?(?:(?P<ret>\w+(?:<[^>]+>)?\??)\s+)?(?P<name>\w+)\s*\((?P<params>[^)]*)\)\s*(?P<async>async\*?\s*)?(?:\{|=>)",
    )
});

static CLASS: Lazy<Regex> = Lazy::new(|| {
    rule(
        r"(?m)^\s*(?:abstract\s+)?class\s+(?P<name>\w+)(?:<[^>]+>)?(?:\s+extends\s+(?P<extends>\w+))?(?:\s+(?:implements|with)\s+(?P<implements>[^{\n]+))?",
    )
});

static IMPORT: Lazy<Regex> = Lazy::new(|| rule(r#"(?m)^import\s+['"](?P<module>[^'"]+)['"]"#));

const KEYWORDS: Denylist = Denylist(&["class", "if", "while", "for", "switch", "catch", "else"]);

/// Extract semantic information from Dart source
pub fn extract(result: &mut AnalysisResult, source: &str) {
    for caps in FUNCTION.captures_iter(source) {
        let Some(name) = group(&caps, "name").filter(|n| !KEYWORDS.rejects(n)) else {
            continue;
        };
        let ret = group(&caps, "ret");
        if ret.is_some_and(|r| KEYWORDS.rejects(r)) {
            continue;
        }
        let line = match_line(source, &caps);
        let mut func = Function::new(name, line, line);
        func.parameters = group(&caps, "params").map(parse_params).unwrap_or_default();
        func.return_type = ret.map(str::to_string);
        func.is_static = caps.name("static").is_some();
        func.is_async = caps.name("async").is_some();
        // Library-private names start with an underscore
        func.visibility = Some(if name.starts_with('_') { "private" } else { "public" }.to_string());
        result.functions.push(func);
    }

    for caps in CLASS.captures_iter(source) {
        let Some(name) = group(&caps, "name") else {
            continue;
        };
        let line = match_line(source, &caps);
        let mut class = TypeDef::new(name, line, line);
        class.extends = group(&caps, "extends").map(str::to_string);
        class.implements = group(&caps, "implements")
            .map(|list| {
                // `with A implements B` lists both mixins and interfaces
                list.replace(" implements ", ",")
                    .replace(" with ", ",")
                    .split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        result.classes.push(class);
    }

    for caps in IMPORT.captures_iter(source) {
        if let Some(module) = group(&caps, "module") {
            result
                .imports
                .push(Import::module(module, match_line(source, &caps)));
        }
    }
}

/// Positional, `[optional]` and `{named}` parameters alike
fn parse_params(params: &str) -> Vec<Parameter> {
    let flat = params.replace(['{', '}', '[', ']'], " ");
    split_top_level(&flat)
        .into_iter()
        .filter_map(|p| {
            let decl = p.split('=').next().unwrap_or(p).trim();
            let decl = decl.strip_prefix("required ").unwrap_or(decl);
            let mut words: Vec<&str> = decl.split_whitespace().collect();
            let name = words.pop()?;
            let name = name
                .strip_prefix("this.")
                .or_else(|| name.strip_prefix("super."))
                .unwrap_or(name);
            Some(Parameter::typed(name, words.join(" ")))
        })
        .collect()
}
