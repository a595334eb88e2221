//! Elixir language detector
//!
//! Everything in Elixir's tree is a `call`: definitions (`def`, `defmodule`),
//! directives (`import`, `alias`) and ordinary invocations differ only in the
//! target identifier.

use tree_sitter::Node;

use crate::detectors::common::{
    child_of_kind, count_arguments, end_line, field_text, find_nodes, get_node_text,
    named_children, start_line,
};
use crate::schema::{AnalysisResult, Call, Function, Import, Parameter, TypeDef};

const DEF_KEYWORDS: &[&str] = &["def", "defp", "defmacro", "defmacrop"];
const IMPORT_KEYWORDS: &[&str] = &["import", "alias", "use", "require"];
/// Targets that are language constructs rather than calls
const SPECIAL_FORMS: &[&str] = &[
    "defmodule", "defstruct", "defprotocol", "defimpl", "defdelegate", "defguard", "if",
    "unless", "case", "cond", "with", "for", "receive", "try", "quote", "unquote",
];

/// Extract semantic information from an Elixir source file
pub fn extract(result: &mut AnalysisResult, root: &Node, source: &str) {
    for node in find_nodes(root, &["call"]) {
        let Some(target) = call_target(&node, source) else {
            // `Mod.fun(...)` has a `dot` target
            if in_attribute(&node, source) {
                continue;
            }
            if let Some(call) = remote_call(&node, source) {
                result.calls.push(call);
            }
            continue;
        };

        match target.as_str() {
            t if DEF_KEYWORDS.contains(&t) => {
                if module_of(&node, source).is_none() {
                    if let Some(func) = build_function(&node, &target, source) {
                        result.functions.push(func);
                    }
                }
            }
            "defmodule" => {
                if let Some(module) = build_module(&node, source) {
                    result.classes.push(module);
                }
            }
            t if IMPORT_KEYWORDS.contains(&t) => {
                if let Some(module) = first_argument(&node) {
                    result
                        .imports
                        .push(Import::module(get_node_text(&module, source), start_line(&node)));
                }
            }
            t if SPECIAL_FORMS.contains(&t) => {}
            _ => {
                if is_definition_head(&node, source) || in_attribute(&node, source) {
                    continue;
                }
                result.calls.push(Call {
                    caller_function: enclosing_function(&node, source),
                    callee: target,
                    line: start_line(&node),
                    arguments_count: argument_count(&node),
                    is_method_call: false,
                    receiver: None,
                });
            }
        }
    }
}

/// Identifier target of a local call (`def`, `import`, `foo`)
fn call_target(node: &Node, source: &str) -> Option<String> {
    let target = node.child_by_field_name("target")?;
    (target.kind() == "identifier").then(|| get_node_text(&target, source))
}

fn first_argument<'t>(node: &Node<'t>) -> Option<Node<'t>> {
    child_of_kind(node, "arguments").and_then(|args| named_children(&args).into_iter().next())
}

fn argument_count(node: &Node) -> usize {
    child_of_kind(node, "arguments")
        .map(|args| count_arguments(&args))
        .unwrap_or(0)
}

// ============================================================================
// Definitions
// ============================================================================

/// The head of `def name(args) when guard do ... end`, unwrapped from any
/// guard clause
fn definition_head<'t>(def: &Node<'t>) -> Option<Node<'t>> {
    let head = first_argument(def)?;
    if head.kind() == "binary_operator" {
        return head.child_by_field_name("left");
    }
    Some(head)
}

fn build_function(node: &Node, keyword: &str, source: &str) -> Option<Function> {
    let head = definition_head(node)?;
    let (name, parameters) = match head.kind() {
        "call" => {
            let name = field_text(&head, "target", source)?;
            let params = child_of_kind(&head, "arguments")
                .map(|args| {
                    named_children(&args)
                        .iter()
                        .map(|a| Parameter::new(get_node_text(a, source)))
                        .collect()
                })
                .unwrap_or_default();
            (name, params)
        }
        "identifier" => (get_node_text(&head, source), Vec::new()),
        _ => return None,
    };

    let mut func = Function::new(name, start_line(node), end_line(node));
    func.parameters = parameters;
    func.visibility = Some(
        if keyword.ends_with('p') {
            "private"
        } else {
            "public"
        }
        .to_string(),
    );
    func.docstring = doc_attribute(node, source);
    Some(func)
}

/// Text of a `@doc` attribute directly above a definition
fn doc_attribute(node: &Node, source: &str) -> Option<String> {
    let prev = node.prev_named_sibling()?;
    if prev.kind() != "unary_operator" {
        return None;
    }
    let text = get_node_text(&prev, source);
    let body = text.strip_prefix("@doc")?.trim();
    let body = body.trim_matches('"').trim();
    (!body.is_empty() && body != "false").then(|| body.to_string())
}

/// Whether a call is the `name(args)` head of a `def`
fn is_definition_head(node: &Node, source: &str) -> bool {
    let mut up = node.parent();
    if up.is_some_and(|p| p.kind() == "binary_operator") {
        up = up.and_then(|p| p.parent());
    }
    let Some(def) = up.and_then(|args| args.parent()) else {
        return false;
    };
    let is_def = call_target(&def, source).is_some_and(|t| DEF_KEYWORDS.contains(&t.as_str()));
    is_def && definition_head(&def).is_some_and(|head| head.id() == node.id())
}

/// Whether a call sits inside a module attribute (`@doc`, `@spec`)
fn in_attribute(node: &Node, source: &str) -> bool {
    let mut current = node.parent();
    while let Some(parent) = current {
        if parent.kind() == "unary_operator" && get_node_text(&parent, source).starts_with('@') {
            return true;
        }
        current = parent.parent();
    }
    false
}

/// Name of the `defmodule` whose body directly contains a definition
fn module_of(node: &Node, source: &str) -> Option<String> {
    let block = node.parent().filter(|p| p.kind() == "do_block")?;
    let module = block.parent()?;
    (call_target(&module, source).as_deref() == Some("defmodule"))
        .then(|| first_argument(&module).map(|n| get_node_text(&n, source)))
        .flatten()
}

fn build_module(node: &Node, source: &str) -> Option<TypeDef> {
    let name = get_node_text(&first_argument(node)?, source);
    let mut module = TypeDef::new(name, start_line(node), end_line(node));

    if let Some(block) = child_of_kind(node, "do_block") {
        for member in named_children(&block) {
            if member.kind() != "call" {
                continue;
            }
            let Some(keyword) = call_target(&member, source) else {
                continue;
            };
            if DEF_KEYWORDS.contains(&keyword.as_str()) {
                if let Some(method) = build_function(&member, &keyword, source) {
                    module.methods.push(method);
                }
            }
        }
    }
    Some(module)
}

/// Nearest enclosing `def`, by head name
fn enclosing_function(node: &Node, source: &str) -> Option<String> {
    let mut current = node.parent();
    while let Some(parent) = current {
        if parent.kind() == "call"
            && call_target(&parent, source).is_some_and(|t| DEF_KEYWORDS.contains(&t.as_str()))
        {
            if let Some(head) = definition_head(&parent) {
                let name = match head.kind() {
                    "call" => field_text(&head, "target", source),
                    _ => Some(get_node_text(&head, source)),
                };
                if name.is_some() {
                    return name;
                }
            }
        }
        current = parent.parent();
    }
    None
}

// ============================================================================
// Calls
// ============================================================================

fn remote_call(node: &Node, source: &str) -> Option<Call> {
    let target = node.child_by_field_name("target")?;
    if target.kind() != "dot" {
        return None;
    }
    let callee = field_text(&target, "right", source)?;
    let receiver = field_text(&target, "left", source);
    Some(Call {
        caller_function: enclosing_function(node, source),
        callee,
        line: start_line(node),
        arguments_count: argument_count(node),
        is_method_call: true,
        receiver,
    })
}
