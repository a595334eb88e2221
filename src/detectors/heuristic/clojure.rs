//! Clojure detector (heuristic)
//!
//! `defn`/`defn-`/`defmacro` and named `fn` forms, record/type/protocol
//! definitions, namespace requires and imports, and `def`/`defonce` vars.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{group, match_line, rule};
use crate::schema::{AnalysisResult, Function, Import, Parameter, Symbol, TypeDef};

static DEFN: Lazy<Regex> = Lazy::new(|| {
    rule(
        r#"\(\s*(?P<form>defn-?|defmacro)\s+(?P<name>[\w\-?!*]+)\s*(?:"[^"]*"\s*)?\[(?P<params>[^\]]*)\]"#,
    )
});

static NAMED_FN: Lazy<Regex> =
    Lazy::new(|| rule(r"\(\s*fn\s+(?P<name>[\w\-?!*]+)\s*\[(?P<params>[^\]]*)\]"));

static TYPE: Lazy<Regex> = Lazy::new(|| {
    rule(r"\(\s*(?:defrecord|deftype|defprotocol|definterface)\s+(?P<name>[\w\-?!*]+)")
});

static IMPORT: Lazy<Regex> = Lazy::new(|| {
    rule(r"(?::require|:import|:use)\s*\[\s*\[?(?P<module>[\w.\-]+)|\(\s*(?:require|use|import)\s+'\[?(?P<quoted>[\w.\-]+)")
});

static NAMESPACE: Lazy<Regex> = Lazy::new(|| rule(r"\(\s*ns\s+(?P<name>[\w.\-]+)"));

static VAR: Lazy<Regex> =
    Lazy::new(|| rule(r"\(\s*(?P<form>defonce|def)\s+(?:\^\S+\s+)?(?P<name>[\w\-?!*]+)"));

/// Extract semantic information from Clojure source
pub fn extract(result: &mut AnalysisResult, source: &str) {
    for caps in DEFN.captures_iter(source).chain(NAMED_FN.captures_iter(source)) {
        let Some(name) = group(&caps, "name") else {
            continue;
        };
        let line = match_line(source, &caps);
        let mut func = Function::new(name, line, line);
        func.parameters = group(&caps, "params").map(parse_params).unwrap_or_default();
        func.visibility = match group(&caps, "form") {
            Some("defn-") => Some("private".to_string()),
            Some(_) => Some("public".to_string()),
            None => None,
        };
        result.functions.push(func);
    }

    for caps in TYPE.captures_iter(source) {
        if let Some(name) = group(&caps, "name") {
            let line = match_line(source, &caps);
            result.classes.push(TypeDef::new(name, line, line));
        }
    }

    for caps in IMPORT.captures_iter(source) {
        if let Some(module) = group(&caps, "module").or_else(|| group(&caps, "quoted")) {
            result
                .imports
                .push(Import::module(module, match_line(source, &caps)));
        }
    }

    for caps in NAMESPACE.captures_iter(source) {
        if let Some(name) = group(&caps, "name") {
            result
                .symbols
                .push(Symbol::new(name, "namespace", match_line(source, &caps)));
        }
    }
    for caps in VAR.captures_iter(source) {
        let Some(name) = group(&caps, "name") else {
            continue;
        };
        let kind = if group(&caps, "form") == Some("defonce") {
            "constant"
        } else {
            "variable"
        };
        result
            .symbols
            .push(Symbol::new(name, kind, match_line(source, &caps)));
    }
}

/// Whitespace-separated binding vector; `&` and destructuring keywords are
/// not parameters
fn parse_params(params: &str) -> Vec<Parameter> {
    params
        .split_whitespace()
        .filter(|p| *p != "&" && !p.starts_with(':'))
        .map(Parameter::new)
        .collect()
}
