//! F# detector (heuristic)
//!
//! Curried `let` functions and `member` methods, type declarations (three
//! overlapping rules; the later two only add unseen names), `open` imports, and
//! module/namespace/value symbols.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{colon_typed_params, group, match_line, rule};
use crate::schema::{AnalysisResult, Function, Import, Parameter, Symbol, TypeDef};

static LET_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    rule(
        r"(?m)^[\t ]*let\s+(?:(?:rec|inline|private)\s+)*(?P<name>\w+)(?P<params>(?:\s+(?:\w+|\([^)]*\)))+)\s*(?::\s*(?P<ret>[^=\n]+))?=",
    )
});

static MEMBER: Lazy<Regex> = Lazy::new(|| {
    rule(
        r"(?m)^[\t ]*(?P<static>static\s+)?(?:member|override|abstract\s+member)\s+(?:\w+\.)?(?P<name>\w+)\s*\((?P<params>[^)]*)\)",
    )
});

static TYPE: Lazy<Regex> = Lazy::new(|| {
    rule(r"(?m)^[\t ]*type\s+(?P<name>\w+)(?:\s*<[^>]+>)?(?:\s*\([^)]*\))?\s*=")
});

static CLASS: Lazy<Regex> = Lazy::new(|| {
    rule(r"(?m)^[\t ]*type\s+(?P<name>\w+)\s*\([^)]*\)\s*(?:as\s+\w+)?\s*=")
});

static INTERFACE: Lazy<Regex> =
    Lazy::new(|| rule(r"(?m)^[\t ]*type\s+(?P<name>\w+)\s*=\s*interface"));

static OPEN: Lazy<Regex> = Lazy::new(|| rule(r"(?m)^[\t ]*open\s+(?P<module>[\w.]+)"));

static SCOPE: Lazy<Regex> =
    Lazy::new(|| rule(r"(?m)^[\t ]*(?P<kind>module|namespace)\s+(?:rec\s+)?(?P<name>[\w.]+)"));

/// `let name = <not a lambda>`
static VALUE: Lazy<Regex> = Lazy::new(|| rule(r"(?m)^[\t ]*let\s+(?P<name>\w+)\s*=\s*[^f\s]"));

/// Extract semantic information from F# source
pub fn extract(result: &mut AnalysisResult, source: &str) {
    for caps in LET_FUNCTION.captures_iter(source) {
        let Some(name) = group(&caps, "name") else {
            continue;
        };
        let line = match_line(source, &caps);
        let mut func = Function::new(name, line, line);
        func.parameters = group(&caps, "params").map(curried_params).unwrap_or_default();
        func.return_type = group(&caps, "ret").map(str::to_string);
        result.functions.push(func);
    }

    for caps in MEMBER.captures_iter(source) {
        let Some(name) = group(&caps, "name") else {
            continue;
        };
        let line = match_line(source, &caps);
        let mut func = Function::new(name, line, line);
        func.parameters = group(&caps, "params")
            .map(colon_typed_params)
            .unwrap_or_default();
        func.is_static = caps.name("static").is_some();
        result.functions.push(func);
    }

    // Every `type` declaration counts; the class and interface rules only
    // add names the first rule missed
    let mut types: Vec<TypeDef> = Vec::new();
    for caps in TYPE.captures_iter(source) {
        if let Some(name) = group(&caps, "name") {
            let line = match_line(source, &caps);
            types.push(TypeDef::new(name, line, line));
        }
    }
    for rule in [&*CLASS, &*INTERFACE] {
        for caps in rule.captures_iter(source) {
            let Some(name) = group(&caps, "name") else {
                continue;
            };
            if types.iter().any(|t| t.name == name) {
                continue;
            }
            let line = match_line(source, &caps);
            types.push(TypeDef::new(name, line, line));
        }
    }
    result.classes.extend(types);

    for caps in OPEN.captures_iter(source) {
        if let Some(module) = group(&caps, "module") {
            result
                .imports
                .push(Import::module(module, match_line(source, &caps)));
        }
    }

    for caps in SCOPE.captures_iter(source) {
        if let (Some(kind), Some(name)) = (group(&caps, "kind"), group(&caps, "name")) {
            result
                .symbols
                .push(Symbol::new(name, kind, match_line(source, &caps)));
        }
    }
    for caps in VALUE.captures_iter(source) {
        if let Some(name) = group(&caps, "name") {
            result
                .symbols
                .push(Symbol::new(name, "value", match_line(source, &caps)));
        }
    }
}

/// `x (y: int) z` -> x, y: int, z
fn curried_params(params: &str) -> Vec<Parameter> {
    let mut out = Vec::new();
    let mut rest = params.trim();
    while !rest.is_empty() {
        if let Some(inner) = rest.strip_prefix('(') {
            let end = inner.find(')').unwrap_or(inner.len());
            out.extend(colon_typed_params(&inner[..end]));
            rest = inner.get(end + 1..).unwrap_or_default().trim_start();
        } else {
            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            out.push(Parameter::new(&rest[..end]));
            rest = rest[end..].trim_start();
        }
    }
    out
}
