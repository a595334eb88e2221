//! Python language detector
//!
//! Functions, classes (with methods and class-level attributes), imports and
//! calls. Decorators are inspected for `@staticmethod` / `@classmethod`.

use tree_sitter::Node;

use crate::detectors::common::{
    child_of_kind, children, end_line, field_text, find_nodes, get_node_text, has_child_kind,
    named_children, start_line, strip_quotes,
};
use crate::detectors::generic::{extract_calls, is_type_member};
use crate::detectors::grammar::PYTHON_GRAMMAR;
use crate::schema::{AnalysisResult, Function, Import, Parameter, Property, TypeDef};

/// Extract semantic information from a Python source file
pub fn extract(result: &mut AnalysisResult, root: &Node, source: &str) {
    for node in find_nodes(root, &["function_definition"]) {
        if is_type_member(&node, &PYTHON_GRAMMAR) {
            continue;
        }
        if let Some(func) = build_function(&node, source) {
            result.functions.push(func);
        }
    }

    for node in find_nodes(root, &["class_definition"]) {
        if let Some(class) = build_class(&node, source) {
            result.classes.push(class);
        }
    }

    extract_imports(result, root, source);
    extract_calls(result, root, source, &PYTHON_GRAMMAR);
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
    func.is_async = has_child_kind(node, "async");
    func.is_static = decorators(node, source)
        .iter()
        .any(|d| d == "staticmethod" || d == "classmethod");
    func.docstring = body_docstring(node, source);
    Some(func)
}

fn extract_parameters(params: &Node, source: &str) -> Vec<Parameter> {
    let mut out = Vec::new();
    for param in named_children(params) {
        let (name, type_name) = match param.kind() {
            "identifier" => (get_node_text(&param, source), None),
            "typed_parameter" => {
                let name = named_children(&param)
                    .first()
                    .map(|n| get_node_text(n, source))
                    .unwrap_or_default();
                (name, field_text(&param, "type", source))
            }
            "default_parameter" | "typed_default_parameter" => (
                field_text(&param, "name", source).unwrap_or_default(),
                field_text(&param, "type", source),
            ),
            "list_splat_pattern" | "dictionary_splat_pattern" => {
                (get_node_text(&param, source), None)
            }
            _ => continue,
        };

        if name.is_empty() || name == "self" || name == "cls" {
            continue;
        }
        out.push(Parameter {
            name,
            type_name,
        });
    }
    out
}

/// Decorator names (without `@` or call arguments) on a wrapped definition
fn decorators(node: &Node, source: &str) -> Vec<String> {
    let Some(parent) = node.parent().filter(|p| p.kind() == "decorated_definition") else {
        return Vec::new();
    };
    children(&parent)
        .iter()
        .filter(|c| c.kind() == "decorator")
        .map(|d| {
            let text = get_node_text(d, source);
            let text = text.trim_start_matches('@').trim();
            text.split('(').next().unwrap_or(text).to_string()
        })
        .collect()
}

/// The string literal opening a function or class body
fn body_docstring(node: &Node, source: &str) -> Option<String> {
    let body = node.child_by_field_name("body")?;
    let first = named_children(&body).into_iter().next()?;
    if first.kind() != "expression_statement" {
        return None;
    }
    let string = child_of_kind(&first, "string")?;
    let text = strip_quotes(&get_node_text(&string, source));
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

// ============================================================================
// Classes
// ============================================================================

fn build_class(node: &Node, source: &str) -> Option<TypeDef> {
    let name = field_text(node, "name", source)?;
    let mut class = TypeDef::new(name, start_line(node), end_line(node));

    if let Some(bases) = node.child_by_field_name("superclasses") {
        let mut names = named_children(&bases)
            .into_iter()
            .filter(|b| b.kind() != "keyword_argument")
            .map(|b| get_node_text(&b, source));
        class.extends = names.next();
        class.implements = names.collect();
    }

    if let Some(body) = node.child_by_field_name("body") {
        for member in named_children(&body) {
            let definition = match member.kind() {
                "decorated_definition" => member.child_by_field_name("definition"),
                _ => Some(member),
            };
            let Some(definition) = definition else {
                continue;
            };

            match definition.kind() {
                "function_definition" => {
                    if let Some(method) = build_function(&definition, source) {
                        class.methods.push(method);
                    }
                }
                "expression_statement" => {
                    if let Some(prop) = class_attribute(&definition, source) {
                        class.properties.push(prop);
                    }
                }
                _ => {}
            }
        }
    }

    Some(class)
}

/// `name: type = value` or `name = value` at class level
fn class_attribute(stmt: &Node, source: &str) -> Option<Property> {
    let assignment = child_of_kind(stmt, "assignment")?;
    let left = assignment.child_by_field_name("left")?;
    if left.kind() != "identifier" {
        return None;
    }
    let name = get_node_text(&left, source);
    let visibility = if name.starts_with('_') {
        "private"
    } else {
        "public"
    };
    Some(Property {
        name,
        type_name: field_text(&assignment, "type", source),
        visibility: Some(visibility.to_string()),
    })
}

// ============================================================================
// Imports
// ============================================================================

fn extract_imports(result: &mut AnalysisResult, root: &Node, source: &str) {
    for node in find_nodes(root, &["import_statement", "import_from_statement"]) {
        let line = start_line(&node);

        if node.kind() == "import_statement" {
            for name in named_children(&node) {
                if let Some(module) = imported_name(&name, source) {
                    result.imports.push(Import::module(module, line));
                }
            }
            continue;
        }

        let Some(module) = field_text(&node, "module_name", source) else {
            continue;
        };
        let module_node = node.child_by_field_name("module_name");
        let mut import = Import::module(module, line);
        for name in named_children(&node) {
            if Some(name) == module_node {
                continue;
            }
            match name.kind() {
                "wildcard_import" => import.symbols.push("*".to_string()),
                _ => {
                    if let Some(symbol) = imported_name(&name, source) {
                        import.symbols.push(symbol);
                    }
                }
            }
        }
        result.imports.push(import);
    }
}

fn imported_name(node: &Node, source: &str) -> Option<String> {
    match node.kind() {
        "dotted_name" => Some(get_node_text(node, source)),
        "aliased_import" => field_text(node, "name", source),
        _ => None,
    }
}
