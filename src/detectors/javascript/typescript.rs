//! TypeScript-only constructs: type annotations, heritage clauses and
//! interface declarations.

use tree_sitter::Node;

use crate::detectors::common::{
    child_of_kind, end_line, field_text, get_node_text, named_children, normalize_whitespace,
    start_line,
};
use crate::detectors::javascript::core::{build_method, Dialect};
use crate::schema::{non_empty, Property, TypeDef};

/// Text of a type annotation without its leading `:`
pub fn annotation_text(annotation: &Node, source: &str) -> String {
    let text = get_node_text(annotation, source);
    normalize_whitespace(text.trim_start_matches(':'))
}

/// Declared return type of a function or method
pub fn return_type(node: &Node, source: &str) -> Option<String> {
    let annotation = node
        .child_by_field_name("return_type")
        .or_else(|| child_of_kind(node, "type_annotation"))?;
    non_empty(annotation_text(&annotation, source))
}

/// Apply `extends` / `implements` clauses of a class heritage
pub fn apply_heritage(class: &mut TypeDef, heritage: &Node, source: &str) {
    for clause in named_children(heritage) {
        match clause.kind() {
            "extends_clause" => {
                class.extends = clause
                    .child_by_field_name("value")
                    .or_else(|| named_children(&clause).into_iter().next())
                    .map(|v| get_node_text(&v, source));
            }
            "implements_clause" => {
                class.implements.extend(
                    named_children(&clause)
                        .iter()
                        .map(|t| get_node_text(t, source)),
                );
            }
            _ => {}
        }
    }
}

/// An interface becomes a type: first parent in `extends`, the rest in
/// `implements`
pub fn build_interface(node: &Node, source: &str) -> Option<TypeDef> {
    let name = field_text(node, "name", source)?;
    let mut class = TypeDef::new(name, start_line(node), end_line(node));

    if let Some(clause) = child_of_kind(node, "extends_type_clause") {
        let mut parents = named_children(&clause)
            .into_iter()
            .map(|t| get_node_text(&t, source));
        class.extends = parents.next();
        class.implements = parents.collect();
    }

    if let Some(body) = node.child_by_field_name("body") {
        for member in named_children(&body) {
            match member.kind() {
                "method_signature" => {
                    if let Some(method) = build_method(&member, source, Dialect::TypeScript) {
                        class.methods.push(method);
                    }
                }
                "property_signature" => {
                    if let Some(name) = field_text(&member, "name", source) {
                        class.properties.push(Property {
                            name,
                            type_name: member
                                .child_by_field_name("type")
                                .map(|t| annotation_text(&t, source))
                                .and_then(non_empty),
                            visibility: None,
                        });
                    }
                }
                _ => {}
            }
        }
    }

    Some(class)
}
