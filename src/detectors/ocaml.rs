//! OCaml language detector
//!
//! A `let` binding with parameters (or bound to `fun`) is a function; any
//! other structure-level binding is a `value` symbol. `module M = struct ...
//! end` is a type whose methods are its function bindings.

use tree_sitter::Node;

use crate::detectors::common::{
    child_of_kind, docstring, end_line, field_text, find_nodes, get_node_text, named_children,
    start_line,
};
use crate::detectors::grammar::OCAML_GRAMMAR;
use crate::schema::{AnalysisResult, Call, Function, Import, Parameter, Property, Symbol, TypeDef};

/// Extract semantic information from an OCaml source file
pub fn extract(result: &mut AnalysisResult, root: &Node, source: &str) {
    extract_structure(result, root, source);

    for node in find_nodes(root, OCAML_GRAMMAR.type_nodes) {
        if let Some(module) = build_module(&node, source) {
            result.classes.push(module);
        }
    }

    for node in find_nodes(root, &["type_binding"]) {
        if let Some(name) = field_text(&node, "name", source) {
            result.symbols.push(Symbol::new(name, "type", start_line(&node)));
        }
    }

    for node in find_nodes(root, &["open_module"]) {
        if let Some(path) = child_of_kind(&node, "module_path") {
            result
                .imports
                .push(Import::module(get_node_text(&path, source), start_line(&node)));
        }
    }

    for node in find_nodes(root, OCAML_GRAMMAR.call_nodes) {
        if let Some(call) = resolve_call(&node, source) {
            result.calls.push(call);
        }
    }
}

/// Top-level bindings of the compilation unit
fn extract_structure(result: &mut AnalysisResult, root: &Node, source: &str) {
    for def in named_children(root) {
        if def.kind() != "value_definition" {
            continue;
        }
        for binding in named_children(&def) {
            if binding.kind() != "let_binding" {
                continue;
            }
            match build_function(&binding, source) {
                Some(func) => result.functions.push(func),
                None => {
                    if let Some(name) = binding_name(&binding, source) {
                        result
                            .symbols
                            .push(Symbol::new(name, "value", start_line(&binding)));
                    }
                }
            }
        }
    }
}

fn binding_name(binding: &Node, source: &str) -> Option<String> {
    let pattern = binding.child_by_field_name("pattern")?;
    (pattern.kind() == "value_name").then(|| get_node_text(&pattern, source))
}

/// A binding that takes parameters, or whose body is a lambda
fn build_function(binding: &Node, source: &str) -> Option<Function> {
    let name = binding_name(binding, source)?;
    let params: Vec<Node> = binding
        .children_by_field_name("parameter", &mut binding.walk())
        .collect();
    let is_lambda = binding
        .child_by_field_name("body")
        .is_some_and(|b| matches!(b.kind(), "fun_expression" | "function_expression"));
    if params.is_empty() && !is_lambda {
        return None;
    }

    let mut func = Function::new(name, start_line(binding), end_line(binding));
    func.parameters = params
        .iter()
        .filter_map(|p| {
            find_nodes(p, &["value_pattern", "value_name"])
                .into_iter()
                .next()
                .map(|n| Parameter::new(get_node_text(&n, source)))
        })
        .collect();
    func.return_type = field_text(binding, "type", source)
        .map(|t| t.trim_start_matches(':').trim().to_string());
    // Comments attach to the enclosing `let`, not the binding
    func.docstring = binding
        .parent()
        .and_then(|def| docstring(&def, source, OCAML_GRAMMAR.comment_nodes));
    Some(func)
}

fn build_module(node: &Node, source: &str) -> Option<TypeDef> {
    let name = child_of_kind(node, "module_name").map(|n| get_node_text(&n, source))?;
    let mut module = TypeDef::new(name, start_line(node), end_line(node));

    if let Some(body) = find_nodes(node, OCAML_GRAMMAR.body_nodes).into_iter().next() {
        for def in named_children(&body) {
            if def.kind() != "value_definition" {
                continue;
            }
            for binding in named_children(&def) {
                if binding.kind() != "let_binding" {
                    continue;
                }
                if let Some(method) = build_function(&binding, source) {
                    module.methods.push(method);
                } else if let Some(name) = binding_name(&binding, source) {
                    module.properties.push(Property {
                        name,
                        type_name: field_text(&binding, "type", source),
                        visibility: None,
                    });
                }
            }
        }
    }
    Some(module)
}

/// `f x y` or `List.map f xs`
fn resolve_call(node: &Node, source: &str) -> Option<Call> {
    let function = node.child_by_field_name("function")?;

    let (callee, receiver) = match (
        child_of_kind(&function, "module_path"),
        child_of_kind(&function, "value_name"),
    ) {
        (Some(module), Some(name)) if function.kind() == "value_path" => (
            get_node_text(&name, source),
            Some(get_node_text(&module, source)),
        ),
        _ => (get_node_text(&function, source), None),
    };

    Some(Call {
        caller_function: enclosing_binding(node, source),
        callee,
        line: start_line(node),
        arguments_count: node
            .children_by_field_name("argument", &mut node.walk())
            .count(),
        is_method_call: receiver.is_some(),
        receiver,
    })
}

fn enclosing_binding(node: &Node, source: &str) -> Option<String> {
    let mut current = node.parent();
    while let Some(parent) = current {
        if OCAML_GRAMMAR.function_nodes.contains(&parent.kind()) {
            if let Some(name) = binding_name(&parent, source) {
                return Some(name);
            }
        }
        current = parent.parent();
    }
    None
}
