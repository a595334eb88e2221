//! Objective-C detector (heuristic)
//!
//! Method declarations and definitions (`+` is a class method), the
//! `@interface`/`@implementation`/`@protocol` trio, and `#import`/`#include`.
//! A class declared and implemented in the same file is reported once.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{dedup_by_name, group, match_line, rule};
use crate::schema::{AnalysisResult, Function, Import, Parameter, TypeDef};

static METHOD: Lazy<Regex> = Lazy::new(|| {
    rule(r"(?m)^[\t ]*(?P<kind>[+-])\s*\((?P<ret>[^)]+)\)\s*(?P<name>\w+)(?P<rest>[^;{\n]*)")
});

/// `label:(Type)name` pieces of a selector
static SELECTOR_PART: Lazy<Regex> =
    Lazy::new(|| rule(r":\s*\((?P<type>[^)]+)\)\s*(?P<name>\w+)"));

static INTERFACE: Lazy<Regex> = Lazy::new(|| {
    rule(r"(?m)^[\t ]*@interface\s+(?P<name>\w+)(?:\s*:\s*(?P<extends>\w+))?(?:\s*<(?P<protocols>[^>]+)>)?")
});

static IMPLEMENTATION: Lazy<Regex> =
    Lazy::new(|| rule(r"(?m)^[\t ]*@implementation\s+(?P<name>\w+)"));

static PROTOCOL: Lazy<Regex> = Lazy::new(|| rule(r"(?m)^[\t ]*@protocol\s+(?P<name>\w+)[^;\n]*$"));

static IMPORT: Lazy<Regex> =
    Lazy::new(|| rule(r#"(?m)^[\t ]*#\s*(?:import|include)\s*[<"](?P<module>[^>"]+)[>"]"#));

/// Extract semantic information from Objective-C source
pub fn extract(result: &mut AnalysisResult, source: &str) {
    for caps in METHOD.captures_iter(source) {
        let Some(name) = group(&caps, "name") else {
            continue;
        };
        let line = match_line(source, &caps);
        let mut func = Function::new(name, line, line);
        func.return_type = group(&caps, "ret").map(str::to_string);
        func.is_static = group(&caps, "kind") == Some("+");
        if let Some(rest) = caps.name("rest") {
            func.parameters = SELECTOR_PART
                .captures_iter(rest.as_str())
                .filter_map(|part| {
                    let name = group(&part, "name")?;
                    Some(Parameter::typed(name, group(&part, "type").unwrap_or_default()))
                })
                .collect();
        }
        result.functions.push(func);
    }

    let mut classes = Vec::new();
    for caps in INTERFACE.captures_iter(source) {
        let Some(name) = group(&caps, "name") else {
            continue;
        };
        let line = match_line(source, &caps);
        let mut class = TypeDef::new(name, line, line);
        class.extends = group(&caps, "extends").map(str::to_string);
        class.implements = group(&caps, "protocols")
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        classes.push(class);
    }
    for rule in [&*IMPLEMENTATION, &*PROTOCOL] {
        for caps in rule.captures_iter(source) {
            if let Some(name) = group(&caps, "name") {
                let line = match_line(source, &caps);
                classes.push(TypeDef::new(name, line, line));
            }
        }
    }
    result
        .classes
        .extend(dedup_by_name(classes, |c| c.name.as_str()));

    for caps in IMPORT.captures_iter(source) {
        if let Some(module) = group(&caps, "module") {
            result
                .imports
                .push(Import::module(module, match_line(source, &caps)));
        }
    }
}
