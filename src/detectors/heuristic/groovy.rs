//! Groovy detector (heuristic)
//!
//! Typed and `def` methods, closures bound with `def name = {`, classes,
//! imports, and field/constant symbols.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{group, match_line, prefix_typed_params, rule, split_top_level, Denylist};
use crate::schema::{AnalysisResult, Function, Import, Symbol, TypeDef};

static METHOD: Lazy<Regex> = Lazy::new(|| {
    rule(
        r"(?m)^[\t ]*(?P<mods>(?:(?:public|private|protected|static|final|synchronized|abstract)\s+)*)(?P<ret>def|void|[\w<>,\[\]]+)\s+(?P<name>\w+)\s*\((?P<params>[^)]*)\)",
    )
});

static CLOSURE: Lazy<Regex> =
    Lazy::new(|| rule(r"(?m)^[\t ]*(?:def|final)\s+(?P<name>\w+)\s*=\s*\{"));

static CLASS: Lazy<Regex> = Lazy::new(|| {
    rule(
        r"(?m)^[\t ]*(?:(?:public|private|protected|abstract|final|static)\s+)*(?:class|interface|trait|enum)\s+(?P<name>\w+)(?:\s+extends\s+(?P<extends>\w+))?(?:\s+implements\s+(?P<implements>[^{\n]+))?",
    )
});

static IMPORT: Lazy<Regex> =
    Lazy::new(|| rule(r"(?m)^[\t ]*import\s+(?:static\s+)?(?P<module>[\w.]+)"));

static FIELD: Lazy<Regex> = Lazy::new(|| {
    rule(
        r"(?m)^[\t ]*(?:(?:public|private|protected|static|final)\s+)*(?:def|[\w<>,\[\]]+)\s+(?P<name>\w+)\s*=",
    )
});

static CONSTANT: Lazy<Regex> = Lazy::new(|| {
    rule(
        r"(?m)^[\t ]*(?:(?:public|private|protected)\s+)?static\s+final\s+[\w<>,\[\]]+\s+(?P<name>\w+)\s*=",
    )
});

/// Control-flow and declaration keywords the method rule would otherwise accept
const METHOD_DENYLIST: Denylist = Denylist(&[
    "class", "interface", "if", "while", "for", "switch", "catch", "trait", "return", "new",
]);
const FIELD_DENYLIST: Denylist = Denylist(&["class", "interface", "trait"]);

/// Extract semantic information from Groovy source
pub fn extract(result: &mut AnalysisResult, source: &str) {
    for caps in METHOD.captures_iter(source) {
        let (Some(name), Some(ret)) = (group(&caps, "name"), group(&caps, "ret")) else {
            continue;
        };
        if METHOD_DENYLIST.rejects(name) || METHOD_DENYLIST.rejects(ret) {
            continue;
        }
        let mods = group(&caps, "mods").unwrap_or_default();
        let line = match_line(source, &caps);

        let mut func = Function::new(name, line, line);
        func.parameters = group(&caps, "params")
            .map(prefix_typed_params)
            .unwrap_or_default();
        func.return_type = Some(ret.to_string());
        func.is_static = mods.contains("static");
        func.visibility = Some(
            if mods.contains("private") {
                "private"
            } else if mods.contains("protected") {
                "protected"
            } else {
                "public"
            }
            .to_string(),
        );
        result.functions.push(func);
    }

    for caps in CLOSURE.captures_iter(source) {
        if let Some(name) = group(&caps, "name") {
            let line = match_line(source, &caps);
            result.functions.push(Function::new(name, line, line));
        }
    }

    for caps in CLASS.captures_iter(source) {
        let Some(name) = group(&caps, "name") else {
            continue;
        };
        let line = match_line(source, &caps);
        let mut class = TypeDef::new(name, line, line);
        class.extends = group(&caps, "extends").map(str::to_string);
        class.implements = group(&caps, "implements")
            .map(|list| split_top_level(list).into_iter().map(str::to_string).collect())
            .unwrap_or_default();
        result.classes.push(class);
    }

    for caps in IMPORT.captures_iter(source) {
        // `import a.b.*` leaves a trailing dot
        if let Some(module) = group(&caps, "module").map(|m| m.trim_end_matches('.')) {
            result
                .imports
                .push(Import::module(module, match_line(source, &caps)));
        }
    }

    for caps in FIELD.captures_iter(source) {
        if let Some(name) = group(&caps, "name").filter(|n| !FIELD_DENYLIST.rejects(n)) {
            result
                .symbols
                .push(Symbol::new(name, "field", match_line(source, &caps)));
        }
    }
    for caps in CONSTANT.captures_iter(source) {
        if let Some(name) = group(&caps, "name") {
            result
                .symbols
                .push(Symbol::new(name, "constant", match_line(source, &caps)));
        }
    }
}
