//! Rust language detector
//!
//! Extracts functions, structs/enums/traits/unions (with impl methods
//! attached to their type), `use` declarations and calls. Doc comments are
//! the contiguous `///` block above an item, stepping over attributes.

use tree_sitter::Node;

use crate::detectors::common::{
    child_of_kind, doc_from_comments, end_line, field_text, find_nodes, get_node_text,
    has_child_kind, leading_comments, named_children, normalize_whitespace, start_line,
};
use crate::detectors::generic::{extract_calls, is_type_member};
use crate::detectors::grammar::RUST_GRAMMAR;
use crate::schema::{AnalysisResult, Function, Import, Parameter, Property, TypeDef};

const TYPE_KINDS: &[&str] = &["struct_item", "enum_item", "trait_item", "union_item"];

/// Extract semantic information from a Rust source file
pub fn extract(result: &mut AnalysisResult, root: &Node, source: &str) {
    for node in find_nodes(root, &["function_item"]) {
        if is_type_member(&node, &RUST_GRAMMAR) {
            continue;
        }
        if let Some(func) = build_function(&node, source, false) {
            result.functions.push(func);
        }
    }

    for node in find_nodes(root, TYPE_KINDS) {
        if let Some(class) = build_type(&node, source) {
            result.classes.push(class);
        }
    }

    // Impls go last so they can find types declared anywhere in the file
    for node in find_nodes(root, &["impl_item"]) {
        attach_impl(result, &node, source);
    }

    for node in find_nodes(root, &["use_declaration"]) {
        if let Some(arg) = field_text(&node, "argument", source) {
            result
                .imports
                .push(Import::module(normalize_whitespace(&arg), start_line(&node)));
        }
    }

    extract_calls(result, root, source, &RUST_GRAMMAR);
}

// ============================================================================
// Functions
// ============================================================================

/// `associated` marks functions declared in an impl or trait body; only
/// those can be static
fn build_function(node: &Node, source: &str, associated: bool) -> Option<Function> {
    let name = field_text(node, "name", source)?;
    let mut func = Function::new(name, start_line(node), end_line(node));

    let mut has_self = false;
    if let Some(params) = node.child_by_field_name("parameters") {
        for param in named_children(&params) {
            match param.kind() {
                "parameter" => {
                    let pattern = field_text(&param, "pattern", source).unwrap_or_default();
                    let type_name = field_text(&param, "type", source).unwrap_or_default();
                    func.parameters.push(Parameter::typed(pattern, type_name));
                }
                "self_parameter" => has_self = true,
                _ => {}
            }
        }
    }

    func.return_type = field_text(node, "return_type", source);
    func.visibility = Some(visibility(node).to_string());
    func.is_async = child_of_kind(node, "function_modifiers")
        .is_some_and(|m| has_child_kind(&m, "async"));
    func.is_static = associated && !has_self;
    func.docstring = doc_comment(node, source);
    Some(func)
}

fn visibility(node: &Node) -> &'static str {
    if has_child_kind(node, "visibility_modifier") {
        "public"
    } else {
        "private"
    }
}

/// Outer doc comments only; plain `//` comments are not documentation
fn doc_comment(node: &Node, source: &str) -> Option<String> {
    let docs: Vec<Node> = leading_comments(node, RUST_GRAMMAR.comment_nodes)
        .into_iter()
        .filter(|c| {
            let text = get_node_text(c, source);
            text.starts_with("///") || text.starts_with("/**")
        })
        .collect();
    doc_from_comments(&docs, source)
}

// ============================================================================
// Types
// ============================================================================

fn build_type(node: &Node, source: &str) -> Option<TypeDef> {
    let name = field_text(node, "name", source)?;
    let mut class = TypeDef::new(name, start_line(node), end_line(node));
    let Some(body) = node.child_by_field_name("body") else {
        return Some(class);
    };

    match node.kind() {
        "trait_item" => {
            class.methods = trait_methods(&body, source);
            if let Some(bounds) = child_of_kind(node, "trait_bounds") {
                class.implements = named_children(&bounds)
                    .iter()
                    .map(|b| get_node_text(b, source))
                    .collect();
            }
        }
        "enum_item" => {
            class.properties = named_children(&body)
                .iter()
                .filter(|v| v.kind() == "enum_variant")
                .filter_map(|v| field_text(v, "name", source))
                .map(|name| Property {
                    name,
                    type_name: None,
                    visibility: None,
                })
                .collect();
        }
        _ => class.properties = struct_fields(&body, source),
    }

    Some(class)
}

fn struct_fields(body: &Node, source: &str) -> Vec<Property> {
    let mut props = Vec::new();
    match body.kind() {
        "field_declaration_list" => {
            for field in named_children(body) {
                if field.kind() != "field_declaration" {
                    continue;
                }
                if let Some(name) = field_text(&field, "name", source) {
                    props.push(Property {
                        name,
                        type_name: field_text(&field, "type", source),
                        visibility: Some(visibility(&field).to_string()),
                    });
                }
            }
        }
        // Tuple struct: positional fields are named by index
        "ordered_field_declaration_list" => {
            let types: Vec<Node> = body
                .children_by_field_name("type", &mut body.walk())
                .collect();
            for (index, ty) in types.iter().enumerate() {
                props.push(Property {
                    name: index.to_string(),
                    type_name: Some(get_node_text(ty, source)),
                    visibility: None,
                });
            }
        }
        _ => {}
    }
    props
}

fn trait_methods(body: &Node, source: &str) -> Vec<Function> {
    named_children(body)
        .iter()
        .filter(|m| matches!(m.kind(), "function_item" | "function_signature_item"))
        .filter_map(|m| build_function(m, source, true))
        .collect()
}

/// Attach an impl block's methods to its type, creating the type when it
/// is declared elsewhere
fn attach_impl(result: &mut AnalysisResult, node: &Node, source: &str) {
    let Some(type_node) = node.child_by_field_name("type") else {
        return;
    };
    let type_name = base_type_name(&type_node, source);
    let trait_name = node
        .child_by_field_name("trait")
        .map(|t| base_type_name(&t, source));

    let methods: Vec<Function> = node
        .child_by_field_name("body")
        .map(|body| {
            named_children(&body)
                .iter()
                .filter(|m| m.kind() == "function_item")
                .filter_map(|m| build_function(m, source, true))
                .collect()
        })
        .unwrap_or_default();

    let index = match result.classes.iter().position(|c| c.name == type_name) {
        Some(index) => index,
        None => {
            result
                .classes
                .push(TypeDef::new(type_name, start_line(node), end_line(node)));
            result.classes.len() - 1
        }
    };

    let class = &mut result.classes[index];
    if let Some(trait_name) = trait_name {
        if !class.implements.contains(&trait_name) {
            class.implements.push(trait_name);
        }
    }
    class.methods.extend(methods);
}

/// `Vec<T>` -> `Vec`, `crate::a::B` -> `B`, `&'a T` -> `T`
fn base_type_name(node: &Node, source: &str) -> String {
    match node.kind() {
        "generic_type" => node
            .child_by_field_name("type")
            .map(|t| base_type_name(&t, source))
            .unwrap_or_else(|| get_node_text(node, source)),
        "scoped_type_identifier" => field_text(node, "name", source)
            .unwrap_or_else(|| get_node_text(node, source)),
        "reference_type" => node
            .child_by_field_name("type")
            .map(|t| base_type_name(&t, source))
            .unwrap_or_else(|| get_node_text(node, source)),
        _ => get_node_text(node, source),
    }
}
