//! Lua language detector

use tree_sitter::Node;

use crate::detectors::common::{
    child_of_kind, docstring, end_line, field_text, find_nodes, get_node_text, has_child_kind,
    named_children, parent_is, start_line, strip_quotes,
};
use crate::detectors::generic::resolve_call;
use crate::detectors::grammar::LUA_GRAMMAR;
use crate::schema::{AnalysisResult, Function, Import, Parameter, Symbol};

/// Extract semantic information from a Lua source file
pub fn extract(result: &mut AnalysisResult, root: &Node, source: &str) {
    for node in find_nodes(root, LUA_GRAMMAR.function_nodes) {
        if let Some(func) = build_function(&node, source) {
            result.functions.push(func);
        }
    }

    for node in find_nodes(root, &["variable_declaration"]) {
        for name in assigned_names(&node, source) {
            result.symbols.push(Symbol::new(name, "local", start_line(&node)));
        }
    }
    for node in find_nodes(root, &["assignment_statement"]) {
        // `local x = 1` wraps an assignment; it was reported above
        if parent_is(&node, &["variable_declaration"]) {
            continue;
        }
        for name in assigned_names(&node, source) {
            result.symbols.push(Symbol::new(name, "variable", start_line(&node)));
        }
    }

    for node in find_nodes(root, LUA_GRAMMAR.call_nodes) {
        if let Some(module) = required_module(&node, source) {
            result.imports.push(Import::module(module, start_line(&node)));
            continue;
        }
        if let Some(call) = resolve_call(&node, source, &LUA_GRAMMAR) {
            result.calls.push(call);
        }
    }
}

fn build_function(node: &Node, source: &str) -> Option<Function> {
    let name = field_text(node, "name", source)?;
    let mut func = Function::new(name, start_line(node), end_line(node));
    func.parameters = node
        .child_by_field_name("parameters")
        .map(|params| {
            named_children(&params)
                .iter()
                .filter(|p| matches!(p.kind(), "identifier" | "vararg_expression" | "spread"))
                .map(|p| Parameter::new(get_node_text(p, source)))
                .collect()
        })
        .unwrap_or_default();
    if has_child_kind(node, "local") {
        func.visibility = Some("local".to_string());
    }
    func.docstring = docstring(node, source, LUA_GRAMMAR.comment_nodes);
    Some(func)
}

/// Plain identifiers on the left of an assignment or local declaration
fn assigned_names(node: &Node, source: &str) -> Vec<String> {
    let target = child_of_kind(node, "assignment_statement").unwrap_or(*node);
    let names = child_of_kind(&target, "variable_list")
        .or_else(|| child_of_kind(&target, "attribute_name_list"))
        .unwrap_or(target);
    named_children(&names)
        .iter()
        .filter(|n| n.kind() == "identifier")
        .map(|n| get_node_text(n, source))
        .collect()
}

/// `require("mod")` / `require "mod"`
fn required_module(call: &Node, source: &str) -> Option<String> {
    let name = call.child_by_field_name("name")?;
    if name.kind() != "identifier" || get_node_text(&name, source) != "require" {
        return None;
    }
    let args = call.child_by_field_name("arguments")?;
    let path = if args.kind() == "string" {
        args
    } else {
        find_nodes(&args, &["string"]).into_iter().next()?
    };
    Some(strip_quotes(&get_node_text(&path, source)))
}
