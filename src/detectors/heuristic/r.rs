//! R detector (heuristic)

use once_cell::sync::Lazy;
use regex::Regex;

use super::{group, match_line, rule, split_top_level};
use crate::schema::{AnalysisResult, Function, Import, Parameter, Symbol};

static FUNCTION: Lazy<Regex> = Lazy::new(|| {
    rule(r"(?m)^[\t ]*(?P<name>[\w.]+)\s*(?:<<?-|=)\s*function\s*\((?P<params>[^)]*)\)")
});

static LIBRARY: Lazy<Regex> = Lazy::new(|| {
    rule(r#"\b(?:library|require|requireNamespace)\s*\(\s*["']?(?P<module>[\w.]+)["']?"#)
});

static SOURCE: Lazy<Regex> =
    Lazy::new(|| rule(r#"\bsource\s*\(\s*["'](?P<path>[^"']+)["']"#));

/// Non-function assignments
static VARIABLE: Lazy<Regex> =
    Lazy::new(|| rule(r"(?m)^[\t ]*(?P<name>[\w.]+)[\t ]*(?:<<?-|=)[\t ]*(?P<value>[^\s=][^\n]*)"));

/// Extract semantic information from R source
pub fn extract(result: &mut AnalysisResult, source: &str) {
    for caps in FUNCTION.captures_iter(source) {
        let Some(name) = group(&caps, "name") else {
            continue;
        };
        let line = match_line(source, &caps);
        let mut func = Function::new(name, line, line);
        func.parameters = group(&caps, "params")
            .map(|params| {
                split_top_level(params)
                    .into_iter()
                    .filter_map(|p| p.split('=').next())
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(Parameter::new)
                    .collect()
            })
            .unwrap_or_default();
        result.functions.push(func);
    }

    for caps in LIBRARY.captures_iter(source) {
        if let Some(module) = group(&caps, "module") {
            result
                .imports
                .push(Import::module(module, match_line(source, &caps)));
        }
    }
    for caps in SOURCE.captures_iter(source) {
        if let Some(path) = group(&caps, "path") {
            result
                .imports
                .push(Import::module(path, match_line(source, &caps)));
        }
    }

    for caps in VARIABLE.captures_iter(source) {
        let Some(name) = group(&caps, "name") else {
            continue;
        };
        if group(&caps, "value").is_some_and(|v| v.starts_with("function")) {
            continue;
        }
        result
            .symbols
            .push(Symbol::new(name, "variable", match_line(source, &caps)));
    }
}
