//! Zig detector (heuristic)
//!
//! `fn` declarations (`pub` is public, anything else private), container
//! types bound to a `const`, `@import`/`@cImport`, and the remaining
//! `const`/`var` declarations as symbols.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{colon_typed_params, group, match_line, rule};
use crate::schema::{AnalysisResult, Function, Import, Symbol, TypeDef};

static FUNCTION: Lazy<Regex> = Lazy::new(|| {
    rule(r"(?m)^[\t ]*(?P<pub>pub\s+)?(?:(?:export|extern|inline)\s+)?fn\s+(?P<name>\w+)\s*\((?P<params>[^)]*)\)\s*(?P<ret>[!?*\[\]\w.]+)?")
});

static CONTAINER: Lazy<Regex> = Lazy::new(|| {
    rule(r"(?m)^[\t ]*(?:pub\s+)?const\s+(?P<name>\w+)\s*=\s*(?:extern\s+|packed\s+)?(?:struct|enum|union|opaque)\b")
});

static IMPORT: Lazy<Regex> = Lazy::new(|| rule(r#"@import\s*\(\s*"(?P<module>[^"]+)"\s*\)"#));

static C_IMPORT: Lazy<Regex> = Lazy::new(|| rule(r"@cImport\s*\("));

static CONST: Lazy<Regex> = Lazy::new(|| {
    rule(r"(?m)^[\t ]*(?:pub\s+)?const\s+(?P<name>\w+)\s*(?::\s*[^=\n]+)?=\s*(?P<value>[^\n]*)")
});

static VAR: Lazy<Regex> = Lazy::new(|| rule(r"(?m)^[\t ]*(?:pub\s+)?var\s+(?P<name>\w+)"));

/// Extract semantic information from Zig source
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
        func.visibility = Some(
            if caps.name("pub").is_some() {
                "public"
            } else {
                "private"
            }
            .to_string(),
        );
        result.functions.push(func);
    }

    for caps in CONTAINER.captures_iter(source) {
        if let Some(name) = group(&caps, "name") {
            let line = match_line(source, &caps);
            result.classes.push(TypeDef::new(name, line, line));
        }
    }

    for caps in IMPORT.captures_iter(source) {
        if let Some(module) = group(&caps, "module") {
            result
                .imports
                .push(Import::module(module, match_line(source, &caps)));
        }
    }
    for caps in C_IMPORT.captures_iter(source) {
        result
            .imports
            .push(Import::module("<c-import>", match_line(source, &caps)));
    }

    for caps in CONST.captures_iter(source) {
        let Some(name) = group(&caps, "name") else {
            continue;
        };
        if CONTAINER.is_match(caps.get(0).map_or("", |m| m.as_str())) {
            continue;
        }
        result
            .symbols
            .push(Symbol::new(name, "constant", match_line(source, &caps)));
    }
    for caps in VAR.captures_iter(source) {
        if let Some(name) = group(&caps, "name") {
            result
                .symbols
                .push(Symbol::new(name, "variable", match_line(source, &caps)));
        }
    }
}
