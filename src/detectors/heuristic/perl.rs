//! Perl detector (heuristic)
//!
//! `sub` definitions, `package` declarations as types, and `use`/`require`
//! imports. `use parent`/`use base` sets the enclosing package's parent.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{group, match_line, rule};
use crate::schema::{AnalysisResult, Function, Import, Parameter, TypeDef};

static SUB: Lazy<Regex> = Lazy::new(|| {
    rule(r"(?m)^[\t ]*sub[\t ]+(?P<name>\w+)\s*(?:\((?P<params>[^)]*)\))?\s*\{")
});

static PACKAGE: Lazy<Regex> = Lazy::new(|| rule(r"(?m)^[\t ]*package[\t ]+(?P<name>[\w:]+)"));

static USE: Lazy<Regex> = Lazy::new(|| rule(r"(?m)^[\t ]*use[\t ]+(?P<module>[\w:]+)(?P<rest>[^;\n]*)"));

static REQUIRE: Lazy<Regex> =
    Lazy::new(|| rule(r#"(?m)^[\t ]*require[\t ]+['"]?(?P<module>[^'"\s;]+)['"]?"#));

/// First class name in a `use parent` argument list
static PARENT_NAME: Lazy<Regex> = Lazy::new(|| rule(r"(?P<name>[A-Za-z_]\w*(?:::\w+)*)"));

/// Extract semantic information from Perl source
pub fn extract(result: &mut AnalysisResult, source: &str) {
    for caps in SUB.captures_iter(source) {
        let Some(name) = group(&caps, "name") else {
            continue;
        };
        let line = match_line(source, &caps);
        let mut func = Function::new(name, line, line);
        func.parameters = group(&caps, "params")
            .map(|params| {
                params
                    .split(',')
                    .filter_map(|p| p.split('=').next())
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(Parameter::new)
                    .collect()
            })
            .unwrap_or_default();
        // Private by convention
        func.visibility = Some(if name.starts_with('_') { "private" } else { "public" }.to_string());
        result.functions.push(func);
    }

    for caps in PACKAGE.captures_iter(source) {
        if let Some(name) = group(&caps, "name") {
            let line = match_line(source, &caps);
            result.classes.push(TypeDef::new(name, line, line));
        }
    }

    for caps in USE.captures_iter(source) {
        let Some(module) = group(&caps, "module") else {
            continue;
        };
        let line = match_line(source, &caps);
        result.imports.push(Import::module(module, line));

        if matches!(module, "parent" | "base") {
            let parent = group(&caps, "rest").and_then(parent_class);
            let package = result
                .classes
                .iter_mut()
                .rev()
                .find(|c| c.line_start <= line);
            if let (Some(parent), Some(package)) = (parent, package) {
                package.extends = Some(parent);
            }
        }
    }
    for caps in REQUIRE.captures_iter(source) {
        if let Some(module) = group(&caps, "module") {
            result
                .imports
                .push(Import::module(module, match_line(source, &caps)));
        }
    }
}

/// `-norequire, 'Animal'` or `qw(Animal)` -> `Animal`
fn parent_class(args: &str) -> Option<String> {
    let args = args.replace("-norequire", "").replace("qw", "");
    PARENT_NAME
        .captures(&args)
        .and_then(|caps| group(&caps, "name").map(str::to_string))
}
