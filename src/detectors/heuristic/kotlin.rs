//! Kotlin detector (heuristic)
//!
//! `fun` declarations, classes/interfaces/objects with their supertype list,
//! and imports. Methods are reported as functions; no class bodies are
//! tracked.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{colon_typed_params, group, match_line, rule};
use crate::schema::{AnalysisResult, Function, Import, TypeDef};

static FUNCTION: Lazy<Regex> = Lazy::new(|| {
    rule(
        r"(?m)^\s*(?:(?P<vis>private|public|protected|internal)\s+)?(?:(?P<suspend>suspend)\s+)?fun\s+(?:<[^>]+>\s*)?(?P<name>\w+)\s*(?:<[^>]+>)?\s*\((?P<params>[^)]*)\)(?:\s*:\s*(?P<ret>\w+(?:<[^>]+>)?\??))?",
    )
});

static CLASS: Lazy<Regex> = Lazy::new(|| {
    rule(
        r"(?m)^\s*(?:(?:private|public|protected|internal)\s+)?(?:(?:data|sealed|abstract|open|enum|inner)\s+)?(?:class|interface|object)\s+(?P<name>\w+)(?:<[^>]*>)?(?:\s*(?:private\s+|internal\s+)?(?:constructor\s*)?\([^)]*\))?(?:\s*:\s*(?P<supers>[^{\n]+))?",
    )
});

static IMPORT: Lazy<Regex> = Lazy::new(|| rule(r"(?m)^import\s+(?P<module>\S+)"));

/// Extract semantic information from Kotlin source
pub fn extract(result: &mut AnalysisResult, source: &str) {
    for caps in FUNCTION.captures_iter(source) {
        let Some(name) = group(&caps, "name") else {
            continue;
        };
        let line = match_line(source, &caps);
        let mut func = Function::new(name, line, line);
        func.parameters = group(&caps, "params")
            .map(colon_typed_params)
            .unwrap_or_default();
        func.return_type = group(&caps, "ret").map(str::to_string);
        func.visibility = group(&caps, "vis").map(str::to_string);
        func.is_async = caps.name("suspend").is_some();
        result.functions.push(func);
    }

    for caps in CLASS.captures_iter(source) {
        let Some(name) = group(&caps, "name") else {
            continue;
        };
        let line = match_line(source, &caps);
        let mut class = TypeDef::new(name, line, line);

        if let Some(supers) = group(&caps, "supers") {
            let mut parents = super::split_top_level(supers)
                .into_iter()
                .map(supertype_name)
                .filter(|p| !p.is_empty());
            class.extends = parents.next();
            class.implements = parents.collect();
        }
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

/// `Base<T>(args)` -> `Base`
fn supertype_name(entry: &str) -> String {
    let end = entry.find(['<', '(']).unwrap_or(entry.len());
    entry[..end].trim().to_string()
}
