//! Scala language detector

use tree_sitter::Node;

use crate::detectors::common::{
    child_of_kind, docstring, end_line, field_text, find_nodes, get_node_text, named_children,
    normalize_whitespace, start_line,
};
use crate::detectors::generic::{extract_calls, is_type_member};
use crate::detectors::grammar::SCALA_GRAMMAR;
use crate::schema::{AnalysisResult, Function, Import, Parameter, Property, TypeDef};

const FUNCTION_KINDS: &[&str] = &["function_definition", "function_declaration"];

/// Extract semantic information from a Scala source file
pub fn extract(result: &mut AnalysisResult, root: &Node, source: &str) {
    for node in find_nodes(root, FUNCTION_KINDS) {
        if is_type_member(&node, &SCALA_GRAMMAR) {
            continue;
        }
        if let Some(func) = build_function(&node, source) {
            result.functions.push(func);
        }
    }

    for node in find_nodes(root, SCALA_GRAMMAR.type_nodes) {
        if let Some(class) = build_type(&node, source) {
            result.classes.push(class);
        }
    }

    for node in find_nodes(root, &["import_declaration"]) {
        let text = get_node_text(&node, source);
        let module = text.trim_start_matches("import").trim();
        if !module.is_empty() {
            result
                .imports
                .push(Import::module(normalize_whitespace(module), start_line(&node)));
        }
    }

    extract_calls(result, root, source, &SCALA_GRAMMAR);
}

fn access_modifier(node: &Node, source: &str) -> Option<String> {
    let modifiers = child_of_kind(node, "modifiers")?;
    child_of_kind(&modifiers, "access_modifier").map(|m| {
        let text = get_node_text(&m, source);
        // `private[pkg]` keeps only the keyword
        text.split('[').next().unwrap_or(&text).trim().to_string()
    })
}

fn build_function(node: &Node, source: &str) -> Option<Function> {
    let name = field_text(node, "name", source)?;
    let mut func = Function::new(name, start_line(node), end_line(node));

    // Curried definitions carry several parameter lists
    for list in node.children_by_field_name("parameters", &mut node.walk()) {
        func.parameters.extend(
            named_children(&list)
                .iter()
                .filter(|p| p.kind() == "parameter")
                .filter_map(|p| {
                    let name = field_text(p, "name", source)?;
                    Some(Parameter::typed(
                        name,
                        field_text(p, "type", source).unwrap_or_default(),
                    ))
                }),
        );
    }
    func.return_type = field_text(node, "return_type", source);
    func.visibility = access_modifier(node, source);
    func.docstring = docstring(node, source, SCALA_GRAMMAR.comment_nodes);
    Some(func)
}

fn build_type(node: &Node, source: &str) -> Option<TypeDef> {
    let name = field_text(node, "name", source)?;
    let mut class = TypeDef::new(name, start_line(node), end_line(node));

    if let Some(clause) = child_of_kind(node, "extends_clause") {
        let mut parents = named_children(&clause)
            .into_iter()
            .filter(|c| c.kind() != "arguments")
            .map(|c| get_node_text(&c, source));
        class.extends = parents.next();
        // `with` mixins
        class.implements = parents.collect();
    }

    // Constructor parameters become fields
    if let Some(params) = child_of_kind(node, "class_parameters") {
        for param in named_children(&params) {
            if param.kind() != "class_parameter" {
                continue;
            }
            if let Some(name) = field_text(&param, "name", source) {
                class.properties.push(Property {
                    name,
                    type_name: field_text(&param, "type", source),
                    visibility: access_modifier(&param, source),
                });
            }
        }
    }

    let Some(body) = child_of_kind(node, "template_body") else {
        return Some(class);
    };

    for member in named_children(&body) {
        match member.kind() {
            "function_definition" | "function_declaration" => {
                if let Some(method) = build_function(&member, source) {
                    class.methods.push(method);
                }
            }
            "val_definition" | "var_definition" | "val_declaration" | "var_declaration" => {
                let name = member
                    .child_by_field_name("pattern")
                    .or_else(|| member.child_by_field_name("name"))
                    .map(|n| get_node_text(&n, source));
                if let Some(name) = name {
                    class.properties.push(Property {
                        name,
                        type_name: field_text(&member, "type", source),
                        visibility: access_modifier(&member, source),
                    });
                }
            }
            _ => {}
        }
    }

    Some(class)
}
