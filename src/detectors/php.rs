//! PHP language detector
//!
//! Functions, classes/interfaces/traits/enums with methods and properties,
//! `use` imports and the four call shapes (function, member, nullsafe member
//! and scoped/static).

use tree_sitter::Node;

use crate::detectors::common::{
    child_of_kind, children, docstring, end_line, field_text, find_nodes, get_node_text,
    named_children, start_line,
};
use crate::detectors::generic::{argument_count, enclosing_function};
use crate::detectors::grammar::PHP_GRAMMAR;
use crate::schema::{AnalysisResult, Call, Function, Import, Parameter, Property, TypeDef};

/// Extract semantic information from a PHP source file
pub fn extract(result: &mut AnalysisResult, root: &Node, source: &str) {
    // Free functions never sit inside a type body in PHP; methods use a
    // separate node kind
    for node in find_nodes(root, &["function_definition"]) {
        if let Some(func) = build_function(&node, source) {
            result.functions.push(func);
        }
    }

    for node in find_nodes(root, PHP_GRAMMAR.type_nodes) {
        if let Some(class) = build_type(&node, source) {
            result.classes.push(class);
        }
    }

    for node in find_nodes(root, &["namespace_use_clause"]) {
        let name = named_children(&node)
            .into_iter()
            .find(|c| matches!(c.kind(), "qualified_name" | "name" | "namespace_name"));
        if let Some(name) = name {
            let module = get_node_text(&name, source)
                .trim_start_matches('\\')
                .to_string();
            result.imports.push(Import::module(module, start_line(&node)));
        }
    }

    for node in find_nodes(root, PHP_GRAMMAR.call_nodes) {
        if let Some(call) = resolve_call(&node, source) {
            result.calls.push(call);
        }
    }
}

// ============================================================================
// Functions
// ============================================================================

fn build_function(node: &Node, source: &str) -> Option<Function> {
    let name = field_text(node, "name", source)?;
    let mut func = Function::new(name, start_line(node), end_line(node));
    func.parameters = node
        .child_by_field_name("parameters")
        .map(|p| extract_parameters(&p, source))
        .unwrap_or_default();
    func.return_type = field_text(node, "return_type", source);
    func.visibility = child_of_kind(node, "visibility_modifier").map(|v| get_node_text(&v, source));
    func.is_static = children(node).iter().any(|c| c.kind() == "static_modifier");
    func.docstring = docstring(node, source, PHP_GRAMMAR.comment_nodes);
    Some(func)
}

fn extract_parameters(params: &Node, source: &str) -> Vec<Parameter> {
    named_children(params)
        .iter()
        .filter(|p| {
            matches!(
                p.kind(),
                "simple_parameter" | "variadic_parameter" | "property_promotion_parameter"
            )
        })
        .filter_map(|p| {
            let name = field_text(p, "name", source)?;
            let type_name = field_text(p, "type", source).unwrap_or_default();
            Some(Parameter::typed(name, type_name))
        })
        .collect()
}

// ============================================================================
// Types
// ============================================================================

fn build_type(node: &Node, source: &str) -> Option<TypeDef> {
    let name = field_text(node, "name", source)?;
    let mut class = TypeDef::new(name, start_line(node), end_line(node));

    if let Some(base) = child_of_kind(node, "base_clause") {
        let mut parents = named_children(&base)
            .into_iter()
            .map(|n| get_node_text(&n, source));
        class.extends = parents.next();
        // Interfaces may extend several parents
        class.implements.extend(parents);
    }
    if let Some(interfaces) = child_of_kind(node, "class_interface_clause") {
        class.implements.extend(
            named_children(&interfaces)
                .iter()
                .map(|n| get_node_text(n, source)),
        );
    }

    let Some(body) = node.child_by_field_name("body") else {
        return Some(class);
    };

    for member in named_children(&body) {
        match member.kind() {
            "method_declaration" => {
                if let Some(method) = build_function(&member, source) {
                    class.methods.push(method);
                }
            }
            "property_declaration" => {
                let visibility =
                    child_of_kind(&member, "visibility_modifier").map(|v| get_node_text(&v, source));
                let type_name = field_text(&member, "type", source);
                for element in find_nodes(&member, &["property_element"]) {
                    let name = field_text(&element, "name", source).or_else(|| {
                        child_of_kind(&element, "variable_name").map(|v| get_node_text(&v, source))
                    });
                    if let Some(name) = name {
                        class.properties.push(Property {
                            name,
                            type_name: type_name.clone(),
                            visibility: visibility.clone(),
                        });
                    }
                }
            }
            _ => {}
        }
    }

    // Promoted constructor parameters are properties too
    for method in find_nodes(&body, &["property_promotion_parameter"]) {
        if let Some(name) = field_text(&method, "name", source) {
            class.properties.push(Property {
                name,
                type_name: field_text(&method, "type", source),
                visibility: child_of_kind(&method, "visibility_modifier")
                    .map(|v| get_node_text(&v, source)),
            });
        }
    }

    Some(class)
}

// ============================================================================
// Calls
// ============================================================================

fn resolve_call(node: &Node, source: &str) -> Option<Call> {
    let (callee, receiver) = match node.kind() {
        "function_call_expression" => (field_text(node, "function", source)?, None),
        "scoped_call_expression" => (
            field_text(node, "name", source)?,
            field_text(node, "scope", source),
        ),
        _ => (
            field_text(node, "name", source)?,
            field_text(node, "object", source),
        ),
    };

    Some(Call {
        caller_function: enclosing_function(node, source, &PHP_GRAMMAR),
        callee,
        line: start_line(node),
        arguments_count: argument_count(node, &PHP_GRAMMAR),
        is_method_call: receiver.is_some(),
        receiver,
    })
}
