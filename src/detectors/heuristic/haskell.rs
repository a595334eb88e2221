//! Haskell detector (heuristic)
//!
//! Top-level type signatures are the primary source of functions; equations
//! without a signature are added once per name. Argument names come from
//! the first equation of each function.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{group, match_line, rule, Denylist};
use crate::schema::{AnalysisResult, Function, Import, Parameter, Symbol, TypeDef};

static SIGNATURE: Lazy<Regex> =
    Lazy::new(|| rule(r"(?m)^(?P<name>\w+)[\t ]*::[\t ]*(?P<sig>[^\n]+)$"));

static EQUATION: Lazy<Regex> =
    Lazy::new(|| rule(r"(?m)^(?P<name>\w+)(?P<args>(?:[\t ]+\w+)*)[\t ]*=(?:[^=]|$)"));

static DATA: Lazy<Regex> =
    Lazy::new(|| rule(r"(?m)^(?:data|newtype)[\t ]+(?P<name>\w+)"));

static SYNONYM: Lazy<Regex> =
    Lazy::new(|| rule(r"(?m)^type[\t ]+(?:family[\t ]+)?(?P<name>\w+)(?:[\t ]+\w+)*[\t ]*="));

static CLASS: Lazy<Regex> =
    Lazy::new(|| rule(r"(?m)^class[\t ]+(?:[^=\n]*=>[\t ]*)?(?P<name>\w+)"));

static IMPORT: Lazy<Regex> =
    Lazy::new(|| rule(r"(?m)^import[\t ]+(?:qualified[\t ]+)?(?P<module>[A-Z][\w.]*)"));

static MODULE: Lazy<Regex> = Lazy::new(|| rule(r"(?m)^module[\t ]+(?P<name>[A-Z][\w.]*)"));

const KEYWORDS: Denylist = Denylist(&[
    "module", "import", "data", "type", "newtype", "class", "instance", "where", "let", "in",
    "if", "then", "else", "deriving", "infixl", "infixr", "infix",
]);

/// Extract semantic information from Haskell source
pub fn extract(result: &mut AnalysisResult, source: &str) {
    let mut functions: Vec<Function> = Vec::new();

    for caps in SIGNATURE.captures_iter(source) {
        let Some(name) = group(&caps, "name").filter(|n| !KEYWORDS.rejects(n)) else {
            continue;
        };
        let line = match_line(source, &caps);
        let mut func = Function::new(name, line, line);
        func.return_type = group(&caps, "sig").and_then(return_type);
        functions.push(func);
    }

    for caps in EQUATION.captures_iter(source) {
        let Some(name) = group(&caps, "name").filter(|n| !KEYWORDS.rejects(n)) else {
            continue;
        };
        let args: Vec<Parameter> = group(&caps, "args")
            .map(|a| a.split_whitespace().map(Parameter::new).collect())
            .unwrap_or_default();

        match functions.iter_mut().find(|f| f.name == name) {
            Some(existing) => {
                if existing.parameters.is_empty() {
                    existing.parameters = args;
                }
            }
            None => {
                let line = match_line(source, &caps);
                let mut func = Function::new(name, line, line);
                func.parameters = args;
                functions.push(func);
            }
        }
    }
    result.functions.extend(functions);

    for rule in [&*DATA, &*SYNONYM, &*CLASS] {
        for caps in rule.captures_iter(source) {
            if let Some(name) = group(&caps, "name") {
                let line = match_line(source, &caps);
                result.classes.push(TypeDef::new(name, line, line));
            }
        }
    }

    for caps in IMPORT.captures_iter(source) {
        if let Some(module) = group(&caps, "module") {
            result
                .imports
                .push(Import::module(module, match_line(source, &caps)));
        }
    }

    for caps in MODULE.captures_iter(source) {
        if let Some(name) = group(&caps, "name") {
            result
                .symbols
                .push(Symbol::new(name, "module", match_line(source, &caps)));
        }
    }
}

/// Last arrow-separated component of a signature, constraints dropped
fn return_type(sig: &str) -> Option<String> {
    let sig = sig.rsplit("=>").next().unwrap_or(sig);
    sig.rsplit("->")
        .next()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}
