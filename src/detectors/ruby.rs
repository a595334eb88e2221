//! Ruby language detector
//!
//! Methods (instance and singleton), classes and modules, `require`-style
//! imports and calls. A bare `private` / `protected` / `public` line in a
//! class body changes the visibility of the methods after it.

use tree_sitter::Node;

use crate::detectors::common::{
    count_arguments, docstring, end_line, field_text, find_nodes, get_node_text, named_children,
    start_line, strip_quotes,
};
use crate::detectors::generic::{enclosing_function, is_type_member};
use crate::detectors::grammar::RUBY_GRAMMAR;
use crate::schema::{AnalysisResult, Call, Function, Import, Parameter, TypeDef};

const METHOD_KINDS: &[&str] = &["method", "singleton_method"];
const IMPORT_METHODS: &[&str] = &["require", "require_relative", "load"];

/// Extract semantic information from a Ruby source file
pub fn extract(result: &mut AnalysisResult, root: &Node, source: &str) {
    for node in find_nodes(root, METHOD_KINDS) {
        if is_type_member(&node, &RUBY_GRAMMAR) {
            continue;
        }
        if let Some(func) = build_method(&node, source, "public") {
            result.functions.push(func);
        }
    }

    for node in find_nodes(root, &["class", "module"]) {
        if let Some(class) = build_type(&node, source) {
            result.classes.push(class);
        }
    }

    for node in find_nodes(root, &["call"]) {
        let Some(method) = field_text(&node, "method", source) else {
            continue;
        };
        if IMPORT_METHODS.contains(&method.as_str()) {
            if let Some(import) = build_import(&node, source) {
                result.imports.push(import);
            }
            continue;
        }
        result.calls.push(build_call(&node, method, source));
    }
}

// ============================================================================
// Methods
// ============================================================================

fn build_method(node: &Node, source: &str, visibility: &str) -> Option<Function> {
    let name = field_text(node, "name", source)?;
    let mut func = Function::new(name, start_line(node), end_line(node));
    func.parameters = node
        .child_by_field_name("parameters")
        .map(|p| extract_parameters(&p, source))
        .unwrap_or_default();
    func.is_static = node.kind() == "singleton_method";
    func.visibility = Some(visibility.to_string());
    func.docstring = docstring(node, source, RUBY_GRAMMAR.comment_nodes);
    Some(func)
}

fn extract_parameters(params: &Node, source: &str) -> Vec<Parameter> {
    named_children(params)
        .iter()
        .filter_map(|param| match param.kind() {
            "identifier" => Some(get_node_text(param, source)),
            "optional_parameter"
            | "keyword_parameter"
            | "splat_parameter"
            | "hash_splat_parameter"
            | "block_parameter" => field_text(param, "name", source),
            _ => None,
        })
        .map(Parameter::new)
        .collect()
}

// ============================================================================
// Classes / Modules
// ============================================================================

fn build_type(node: &Node, source: &str) -> Option<TypeDef> {
    let name = field_text(node, "name", source)?;
    let mut class = TypeDef::new(name, start_line(node), end_line(node));

    class.extends = node
        .child_by_field_name("superclass")
        .and_then(|s| named_children(&s).into_iter().next())
        .map(|s| get_node_text(&s, source));

    // The body is a `body_statement`; older grammars put members directly
    // under the class node
    let body = node
        .child_by_field_name("body")
        .unwrap_or(*node);

    let mut visibility = "public";
    for member in named_children(&body) {
        match member.kind() {
            "identifier" => match get_node_text(&member, source).as_str() {
                "private" => visibility = "private",
                "protected" => visibility = "protected",
                "public" => visibility = "public",
                _ => {}
            },
            "method" | "singleton_method" => {
                if let Some(method) = build_method(&member, source, visibility) {
                    class.methods.push(method);
                }
            }
            _ => {}
        }
    }

    Some(class)
}

// ============================================================================
// Imports / Calls
// ============================================================================

fn build_import(node: &Node, source: &str) -> Option<Import> {
    let args = node.child_by_field_name("arguments")?;
    let path = named_children(&args)
        .into_iter()
        .find(|a| a.kind() == "string")?;
    Some(Import::module(
        strip_quotes(&get_node_text(&path, source)),
        start_line(node),
    ))
}

fn build_call(node: &Node, callee: String, source: &str) -> Call {
    let receiver = field_text(node, "receiver", source);
    Call {
        caller_function: enclosing_function(node, source, &RUBY_GRAMMAR),
        callee,
        line: start_line(node),
        arguments_count: node
            .child_by_field_name("arguments")
            .map(|a| count_arguments(&a))
            .unwrap_or(0),
        is_method_call: receiver.is_some(),
        receiver,
    }
}
