//! Go language detector
//!
//! Extracts from Go source files:
//! - Functions and methods, with parameters, result types and doc comments
//! - Struct and interface types; methods attach to their receiver type
//! - Import specs
//! - Function calls
//!
//! Go convention: exported names start with uppercase, which drives visibility.

use tree_sitter::Node;

use crate::detectors::common::{
    children_of_kinds, docstring, end_line, field_text, find_nodes, get_node_text, named_children,
    start_line, strip_quotes,
};
use crate::detectors::generic::extract_calls;
use crate::detectors::grammar::GO_GRAMMAR;
use crate::schema::{AnalysisResult, Function, Import, Parameter, Property, TypeDef};

/// Extract semantic information from a Go source file
pub fn extract(result: &mut AnalysisResult, root: &Node, source: &str) {
    extract_types(result, root, source);
    extract_functions(result, root, source);
    extract_imports(result, root, source);
    extract_calls(result, root, source, &GO_GRAMMAR);
}

// ============================================================================
// Functions
// ============================================================================

fn extract_functions(result: &mut AnalysisResult, root: &Node, source: &str) {
    for node in find_nodes(root, &["function_declaration", "method_declaration"]) {
        let Some(func) = build_function(&node, source) else {
            continue;
        };

        // Methods are top-level declarations in Go, so they stay in `functions`
        // and are also attached to the receiver type when it is declared here.
        if node.kind() == "method_declaration" {
            if let Some(receiver) = receiver_type(&node, source) {
                if let Some(class) = result.classes.iter_mut().find(|c| c.name == receiver) {
                    class.methods.push(func.clone());
                }
            }
        }

        result.functions.push(func);
    }
}

fn build_function(node: &Node, source: &str) -> Option<Function> {
    let name = field_text(node, "name", source)?;
    let mut func = Function::new(name.clone(), start_line(node), end_line(node));
    func.parameters = node
        .child_by_field_name("parameters")
        .map(|p| extract_parameters(&p, source))
        .unwrap_or_default();
    func.return_type = field_text(node, "result", source);
    func.visibility = Some(visibility(&name).to_string());
    func.docstring = docstring(node, source, GO_GRAMMAR.comment_nodes);
    Some(func)
}

/// One parameter per declared name; `a, b int` yields two typed entries
fn extract_parameters(params: &Node, source: &str) -> Vec<Parameter> {
    let mut out = Vec::new();
    for decl in children_of_kinds(
        params,
        &["parameter_declaration", "variadic_parameter_declaration"],
    ) {
        let type_text = field_text(&decl, "type", source).unwrap_or_default();
        let type_text = if decl.kind() == "variadic_parameter_declaration" {
            format!("...{}", type_text)
        } else {
            type_text
        };

        let names: Vec<String> = named_children(&decl)
            .iter()
            .filter(|c| c.kind() == "identifier")
            .map(|c| get_node_text(c, source))
            .collect();

        for name in names {
            out.push(Parameter::typed(name, type_text.clone()));
        }
    }
    out
}

/// Receiver type name of a method, with pointer and type arguments removed
fn receiver_type(method: &Node, source: &str) -> Option<String> {
    let receiver = method.child_by_field_name("receiver")?;
    let decl = children_of_kinds(&receiver, &["parameter_declaration"])
        .into_iter()
        .next()?;
    let text = field_text(&decl, "type", source)?;
    let base = text.trim_start_matches('*');
    let base = base.split('[').next().unwrap_or(base).trim();
    Some(base.to_string())
}

fn visibility(name: &str) -> &'static str {
    if name.chars().next().is_some_and(|c| c.is_uppercase()) {
        "public"
    } else {
        "private"
    }
}

// ============================================================================
// Types
// ============================================================================

fn extract_types(result: &mut AnalysisResult, root: &Node, source: &str) {
    for spec in find_nodes(root, &["type_spec"]) {
        let Some(name) = field_text(&spec, "name", source) else {
            continue;
        };
        let Some(type_node) = spec.child_by_field_name("type") else {
            continue;
        };

        let mut class = TypeDef::new(name, start_line(&spec), end_line(&spec));
        match type_node.kind() {
            "struct_type" => class.properties = struct_fields(&type_node, source),
            "interface_type" => class.methods = interface_methods(&type_node, source),
            _ => continue,
        }
        result.classes.push(class);
    }
}

fn struct_fields(struct_type: &Node, source: &str) -> Vec<Property> {
    let mut props = Vec::new();
    for field in find_nodes(struct_type, &["field_declaration"]) {
        let type_name = field_text(&field, "type", source);
        let names: Vec<String> = named_children(&field)
            .iter()
            .filter(|c| c.kind() == "field_identifier")
            .map(|c| get_node_text(c, source))
            .collect();

        if names.is_empty() {
            // Embedded field: the type doubles as the name
            if let Some(embedded) = type_name {
                let name = embedded.trim_start_matches('*').to_string();
                props.push(Property {
                    visibility: Some(visibility(&name).to_string()),
                    name,
                    type_name: Some(embedded),
                });
            }
            continue;
        }

        for name in names {
            props.push(Property {
                visibility: Some(visibility(&name).to_string()),
                name,
                type_name: type_name.clone(),
            });
        }
    }
    props
}

fn interface_methods(interface: &Node, source: &str) -> Vec<Function> {
    find_nodes(interface, &["method_elem", "method_spec"])
        .iter()
        .filter_map(|elem| build_function(elem, source))
        .collect()
}

// ============================================================================
// Imports
// ============================================================================

fn extract_imports(result: &mut AnalysisResult, root: &Node, source: &str) {
    for spec in find_nodes(root, &["import_spec"]) {
        let Some(path) = field_text(&spec, "path", source) else {
            continue;
        };
        let mut import = Import::module(strip_quotes(&path), start_line(&spec));
        if let Some(alias) = field_text(&spec, "name", source) {
            import.symbols.push(alias);
        }
        result.imports.push(import);
    }
}
