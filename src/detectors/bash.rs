//! Bash language detector
//!
//! Shell scripts have no types. Every `command` is a call; `source` and `.`
//! commands are imports instead.

use tree_sitter::Node;

use crate::detectors::common::{
    child_of_kind, children, docstring, end_line, field_text, find_nodes, get_node_text,
    start_line, strip_quotes,
};
use crate::detectors::generic::enclosing_function;
use crate::detectors::grammar::BASH_GRAMMAR;
use crate::schema::{AnalysisResult, Call, Export, Function, Import, Symbol};

const SOURCE_COMMANDS: &[&str] = &["source", "."];

/// Extract semantic information from a Bash source file
pub fn extract(result: &mut AnalysisResult, root: &Node, source: &str) {
    for node in find_nodes(root, BASH_GRAMMAR.function_nodes) {
        let Some(name) = field_text(&node, "name", source) else {
            continue;
        };
        let mut func = Function::new(name, start_line(&node), end_line(&node));
        func.docstring = docstring(&node, source, BASH_GRAMMAR.comment_nodes);
        result.functions.push(func);
    }

    for node in find_nodes(root, &["variable_assignment"]) {
        if let Some(name) = field_text(&node, "name", source) {
            result
                .symbols
                .push(Symbol::new(name, "variable", start_line(&node)));
        }
    }

    for node in find_nodes(root, &["declaration_command"]) {
        extract_exports(result, &node, source);
    }

    for node in find_nodes(root, BASH_GRAMMAR.call_nodes) {
        let Some(name) = node.child_by_field_name("name") else {
            continue;
        };
        let callee = get_node_text(&name, source);
        let arguments: Vec<Node> = node
            .children_by_field_name("argument", &mut node.walk())
            .collect();

        if SOURCE_COMMANDS.contains(&callee.as_str()) {
            if let Some(path) = arguments.first() {
                result.imports.push(Import::module(
                    strip_quotes(&get_node_text(path, source)),
                    start_line(&node),
                ));
            }
            continue;
        }

        result.calls.push(Call {
            caller_function: enclosing_function(&node, source, &BASH_GRAMMAR),
            callee,
            line: start_line(&node),
            arguments_count: arguments.len(),
            is_method_call: false,
            receiver: None,
        });
    }
}

/// `export A=1 B` exports both names
fn extract_exports(result: &mut AnalysisResult, node: &Node, source: &str) {
    let is_export = node
        .child(0)
        .is_some_and(|keyword| get_node_text(&keyword, source) == "export");
    if !is_export {
        return;
    }

    let line = start_line(node);
    for child in children(node) {
        let name = match child.kind() {
            "variable_name" => Some(get_node_text(&child, source)),
            "variable_assignment" => {
                child_of_kind(&child, "variable_name").map(|n| get_node_text(&n, source))
            }
            _ => None,
        };
        if let Some(name) = name {
            result.exports.push(Export { name, line });
        }
    }
}
