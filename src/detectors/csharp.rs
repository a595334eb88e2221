//! C# language detector
//!
//! Classes, structs, records and interfaces with methods, properties and
//! fields; `using` directives; invocation expressions. Methods declared in a
//! type body belong to the type; local functions stay top-level.

use tree_sitter::Node;

use crate::detectors::common::{
    children, docstring, end_line, field_text, find_nodes, get_node_text, named_children,
    start_line,
};
use crate::detectors::generic::{extract_calls, is_type_member};
use crate::detectors::grammar::CSHARP_GRAMMAR;
use crate::schema::{AnalysisResult, Function, Import, Parameter, Property, TypeDef};

/// Extract semantic information from a C# source file
pub fn extract(result: &mut AnalysisResult, root: &Node, source: &str) {
    for node in find_nodes(root, &["method_declaration", "local_function_statement"]) {
        if is_type_member(&node, &CSHARP_GRAMMAR) {
            continue;
        }
        if let Some(func) = build_method(&node, source) {
            result.functions.push(func);
        }
    }

    for node in find_nodes(root, CSHARP_GRAMMAR.type_nodes) {
        if let Some(class) = build_type(&node, source) {
            result.classes.push(class);
        }
    }

    for node in find_nodes(root, &["using_directive"]) {
        // The namespace is the last name; an alias, if any, comes first
        let module = named_children(&node)
            .iter()
            .rev()
            .find(|c| matches!(c.kind(), "qualified_name" | "identifier"))
            .map(|n| get_node_text(n, source));
        if let Some(module) = module {
            result.imports.push(Import::module(module, start_line(&node)));
        }
    }

    extract_calls(result, root, source, &CSHARP_GRAMMAR);
}

// ============================================================================
// Modifiers
// ============================================================================

fn modifiers(node: &Node, source: &str) -> Vec<String> {
    children(node)
        .iter()
        .filter(|c| c.kind() == "modifier")
        .map(|c| get_node_text(c, source))
        .collect()
}

fn visibility(mods: &[String]) -> Option<String> {
    mods.iter()
        .find(|m| matches!(m.as_str(), "public" | "private" | "protected" | "internal"))
        .cloned()
}

// ============================================================================
// Methods
// ============================================================================

fn build_method(node: &Node, source: &str) -> Option<Function> {
    let name = field_text(node, "name", source)?;
    let mods = modifiers(node, source);

    let mut func = Function::new(name, start_line(node), end_line(node));
    func.parameters = node
        .child_by_field_name("parameters")
        .map(|p| extract_parameters(&p, source))
        .unwrap_or_default();
    func.return_type =
        field_text(node, "returns", source).or_else(|| field_text(node, "type", source));
    func.visibility = visibility(&mods);
    func.is_static = mods.iter().any(|m| m == "static");
    func.is_async = mods.iter().any(|m| m == "async");
    func.docstring = docstring(node, source, CSHARP_GRAMMAR.comment_nodes);
    Some(func)
}

fn extract_parameters(params: &Node, source: &str) -> Vec<Parameter> {
    named_children(params)
        .iter()
        .filter(|p| p.kind() == "parameter")
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

    // First base is the superclass, the rest are interfaces
    if let Some(bases) = children(node).into_iter().find(|c| c.kind() == "base_list") {
        let mut names = named_children(&bases)
            .into_iter()
            .map(|b| get_node_text(&b, source));
        class.extends = names.next();
        class.implements = names.collect();
    }

    if let Some(body) = node.child_by_field_name("body") {
        for member in named_children(&body) {
            match member.kind() {
                "method_declaration" | "constructor_declaration" => {
                    if let Some(method) = build_method(&member, source) {
                        class.methods.push(method);
                    }
                }
                "property_declaration" => {
                    if let Some(name) = field_text(&member, "name", source) {
                        class.properties.push(Property {
                            name,
                            type_name: field_text(&member, "type", source),
                            visibility: visibility(&modifiers(&member, source)),
                        });
                    }
                }
                "field_declaration" => {
                    let vis = visibility(&modifiers(&member, source));
                    for decl in find_nodes(&member, &["variable_declaration"]) {
                        let type_name = field_text(&decl, "type", source);
                        for declarator in named_children(&decl) {
                            if declarator.kind() != "variable_declarator" {
                                continue;
                            }
                            let name = field_text(&declarator, "name", source).or_else(|| {
                                named_children(&declarator)
                                    .first()
                                    .map(|n| get_node_text(n, source))
                            });
                            if let Some(name) = name {
                                class.properties.push(Property {
                                    name,
                                    type_name: type_name.clone(),
                                    visibility: vis.clone(),
                                });
                            }
                        }
                    }
                }
                _ => {}
            }
        }
    }

    Some(class)
}
