//! Swift language detector
//!
//! `class_declaration` covers classes, structs, enums, actors and
//! extensions; protocols are separate. Calls use `navigation_expression` for
//! the member form, and only `value_argument` entries are counted.

use tree_sitter::Node;

use crate::detectors::common::{
    child_of_kind, children, docstring, end_line, field_text, find_nodes, get_node_text,
    has_child_kind, named_children, normalize_whitespace, start_line,
};
use crate::detectors::generic::{argument_count, enclosing_function, is_type_member};
use crate::detectors::grammar::SWIFT_GRAMMAR;
use crate::schema::{non_empty, AnalysisResult, Call, Function, Import, Parameter, Property, TypeDef};

const VISIBILITY_WORDS: &[&str] = &["public", "private", "internal", "fileprivate", "open"];

/// Extract semantic information from a Swift source file
pub fn extract(result: &mut AnalysisResult, root: &Node, source: &str) {
    for node in find_nodes(root, &["function_declaration"]) {
        if is_type_member(&node, &SWIFT_GRAMMAR) {
            continue;
        }
        if let Some(func) = build_function(&node, source) {
            result.functions.push(func);
        }
    }

    for node in find_nodes(root, &["class_declaration", "protocol_declaration"]) {
        if let Some(class) = build_type(&node, source) {
            result.classes.push(class);
        }
    }

    for node in find_nodes(root, &["import_declaration"]) {
        if let Some(module) = child_of_kind(&node, "identifier") {
            result
                .imports
                .push(Import::module(get_node_text(&module, source), start_line(&node)));
        }
    }

    for node in find_nodes(root, SWIFT_GRAMMAR.call_nodes) {
        if let Some(call) = resolve_call(&node, source) {
            result.calls.push(call);
        }
    }
}

// ============================================================================
// Functions
// ============================================================================

/// Words of the `modifiers` child (`public`, `static`, `override`, ...)
fn modifiers(node: &Node, source: &str) -> Vec<String> {
    child_of_kind(node, "modifiers")
        .map(|m| {
            get_node_text(&m, source)
                .split_whitespace()
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn build_function(node: &Node, source: &str) -> Option<Function> {
    let name = field_text(node, "name", source)?;
    let mods = modifiers(node, source);

    let mut func = Function::new(name, start_line(node), end_line(node));
    func.parameters = children(node)
        .iter()
        .filter(|c| c.kind() == "parameter")
        .filter_map(|p| parse_parameter(&get_node_text(p, source)))
        .collect();
    func.return_type = field_text(node, "return_type", source);
    func.visibility = mods
        .iter()
        .find(|m| VISIBILITY_WORDS.contains(&m.as_str()))
        .cloned();
    func.is_static = mods.iter().any(|m| m == "static" || m == "class");
    func.is_async = has_child_kind(node, "async");
    func.docstring = docstring(node, source, SWIFT_GRAMMAR.comment_nodes);
    Some(func)
}

/// `label name: Type` -> (`name`, `Type`); the internal name wins over the
/// argument label
fn parse_parameter(text: &str) -> Option<Parameter> {
    let (names, type_name) = text.split_once(':')?;
    let name = names.split_whitespace().last()?;
    let type_name = type_name.split('=').next().unwrap_or(type_name);
    Some(Parameter::typed(name, normalize_whitespace(type_name)))
}

// ============================================================================
// Types
// ============================================================================

fn build_type(node: &Node, source: &str) -> Option<TypeDef> {
    let name = field_text(node, "name", source)?;
    let mut class = TypeDef::new(name, start_line(node), end_line(node));

    let mut parents = children(node)
        .into_iter()
        .filter(|c| c.kind() == "inheritance_specifier")
        .map(|c| get_node_text(&c, source));
    class.extends = parents.next();
    class.implements = parents.collect();

    let Some(body) = node.child_by_field_name("body") else {
        return Some(class);
    };

    for member in named_children(&body) {
        match member.kind() {
            "function_declaration" | "protocol_function_declaration" => {
                if let Some(method) = build_function(&member, source) {
                    class.methods.push(method);
                }
            }
            "property_declaration" | "protocol_property_declaration" => {
                if let Some(prop) = build_property(&member, source) {
                    class.properties.push(prop);
                }
            }
            _ => {}
        }
    }

    Some(class)
}

fn build_property(node: &Node, source: &str) -> Option<Property> {
    let name = field_text(node, "name", source)?;
    let type_name = child_of_kind(node, "type_annotation")
        .map(|t| normalize_whitespace(get_node_text(&t, source).trim_start_matches(':')))
        .and_then(non_empty);
    let visibility = modifiers(node, source)
        .into_iter()
        .find(|m| VISIBILITY_WORDS.contains(&m.as_str()));
    Some(Property {
        name,
        type_name,
        visibility,
    })
}

// ============================================================================
// Calls
// ============================================================================

/// `target.method(args)` is a `navigation_expression` whose suffix names the
/// method; anything else is a plain call on the expression text
fn resolve_call(node: &Node, source: &str) -> Option<Call> {
    let expr = node.child(0)?;

    let (callee, receiver) = if expr.kind() == "navigation_expression" {
        let suffix = child_of_kind(&expr, "navigation_suffix")?;
        let name = find_nodes(&suffix, &["simple_identifier"]).into_iter().next()?;
        let target = expr.child(0).map(|t| get_node_text(&t, source));
        (get_node_text(&name, source), target)
    } else {
        (get_node_text(&expr, source), None)
    };

    if callee.is_empty() {
        return None;
    }

    let arguments_count = child_of_kind(node, "call_suffix")
        .map(|suffix| argument_count(&suffix, &SWIFT_GRAMMAR))
        .unwrap_or(0);

    Some(Call {
        caller_function: enclosing_function(node, source, &SWIFT_GRAMMAR),
        callee,
        line: start_line(node),
        arguments_count,
        is_method_call: receiver.is_some(),
        receiver,
    })
}
