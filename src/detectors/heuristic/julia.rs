//! Julia detector (heuristic)

use once_cell::sync::Lazy;
use regex::Regex;

use super::{group, match_line, rule, split_top_level, Denylist};
use crate::schema::{AnalysisResult, Function, Import, Parameter, TypeDef};

static FUNCTION: Lazy<Regex> = Lazy::new(|| {
    rule(r"(?m)^\s*function\s+(?:\w+\.)?(?P<name>\w+!?)(?:\{[^}]*\})?\s*\((?P<params>[^)]*)\)(?:\s*::\s*(?P<ret>[\w{},]+))?")
});

/// One-line definitions: `area(r) = pi * r^2`
static SHORT_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    rule(r"(?m)^[\t ]*(?P<name>\w+!?)(?:\{[^}]*\})?\s*\((?P<params>[^)]*)\)(?:\s*::\s*(?P<ret>[\w{},]+))?\s*=(?:[^=]|$)")
});

static STRUCT: Lazy<Regex> = Lazy::new(|| {
    rule(r"(?m)^\s*(?:mutable\s+)?struct\s+(?P<name>\w+)(?:\{[^}]*\})?(?:\s*<:\s*(?P<extends>\w+))?")
});

static ABSTRACT: Lazy<Regex> = Lazy::new(|| {
    rule(r"(?m)^\s*abstract\s+type\s+(?P<name>\w+)(?:\{[^}]*\})?(?:\s*<:\s*(?P<extends>\w+))?")
});

static USING: Lazy<Regex> =
    Lazy::new(|| rule(r"(?m)^[\t ]*(?:using|import)[\t ]+(?P<modules>[\w.,\t ]+)"));

static INCLUDE: Lazy<Regex> =
    Lazy::new(|| rule(r#"(?m)^[\t ]*include\s*\(\s*["'](?P<path>[^"']+)["']\s*\)"#));

const KEYWORDS: Denylist = Denylist(&["if", "elseif", "while", "for", "return", "function"]);

/// Extract semantic information from Julia source
pub fn extract(result: &mut AnalysisResult, source: &str) {
    for caps in FUNCTION.captures_iter(source).chain(SHORT_FUNCTION.captures_iter(source)) {
        let Some(name) = group(&caps, "name").filter(|n| !KEYWORDS.rejects(n)) else {
            continue;
        };
        let line = match_line(source, &caps);
        let mut func = Function::new(name, line, line);
        func.parameters = group(&caps, "params").map(parse_params).unwrap_or_default();
        func.return_type = group(&caps, "ret").map(str::to_string);
        result.functions.push(func);
    }

    for caps in STRUCT.captures_iter(source).chain(ABSTRACT.captures_iter(source)) {
        let Some(name) = group(&caps, "name") else {
            continue;
        };
        let line = match_line(source, &caps);
        let mut class = TypeDef::new(name, line, line);
        class.extends = group(&caps, "extends").map(str::to_string);
        result.classes.push(class);
    }

    for caps in USING.captures_iter(source) {
        let line = match_line(source, &caps);
        let modules = group(&caps, "modules").unwrap_or_default();
        for module in modules.split(',').map(str::trim).filter(|m| !m.is_empty()) {
            result.imports.push(Import::module(module, line));
        }
    }
    for caps in INCLUDE.captures_iter(source) {
        if let Some(path) = group(&caps, "path") {
            result
                .imports
                .push(Import::module(path, match_line(source, &caps)));
        }
    }
}

/// `x::Int, y = 2; kw::Bool = false`
fn parse_params(params: &str) -> Vec<Parameter> {
    let flat = params.replace(';', ",");
    split_top_level(&flat)
        .into_iter()
        .filter_map(|p| {
            let decl = p.split('=').next().unwrap_or(p).trim();
            let (name, type_name) = decl.split_once("::").unwrap_or((decl, ""));
            let name = name.trim().trim_end_matches("...");
            (!name.is_empty()).then(|| Parameter::typed(name, type_name.trim()))
        })
        .collect()
}
