//! Generic Call and Scope Resolution
//!
//! Grammar-driven helpers shared by the tree-backed detectors. Instead of
//! duplicating call-site resolution in each language module, one
//! implementation works from the node kinds in `grammar.rs`.
//!
//! # Usage
//!
//! ```ignore
//! use crate::detectors::generic::extract_calls;
//! use crate::detectors::grammar::GO_GRAMMAR;
//!
//! extract_calls(result, root, source, &GO_GRAMMAR);
//! ```

use tracing::debug;
use tree_sitter::Node;

use crate::detectors::common::{
    child_of_kinds, children, children_of_kinds, count_arguments, find_nodes, get_node_text,
    start_line,
};
use crate::detectors::grammar::LangGrammar;
use crate::schema::{AnalysisResult, Call};

// =============================================================================
// Calls
// =============================================================================

/// Append every call site under `root`, in document order
pub fn extract_calls(result: &mut AnalysisResult, root: &Node, source: &str, grammar: &LangGrammar) {
    let before = result.calls.len();
    for node in find_nodes(root, grammar.call_nodes) {
        if let Some(call) = resolve_call(&node, source, grammar) {
            result.calls.push(call);
        }
    }
    debug!(
        grammar = grammar.name,
        calls = result.calls.len() - before,
        "resolved call sites"
    );
}

/// Resolve one call node into a `Call`.
///
/// The callee expression is the `function` field, or the first child when
/// the grammar has no such field. A member-shaped callee makes a method call
/// whose name is its rightmost member identifier and whose receiver is its
/// first child.
pub fn resolve_call(node: &Node, source: &str, grammar: &LangGrammar) -> Option<Call> {
    let callee_expr = node
        .child_by_field_name("function")
        .or_else(|| node.child(0))?;

    let is_member = grammar.member_nodes.contains(&callee_expr.kind());
    let (callee, receiver) = if is_member {
        let name = children(&callee_expr)
            .into_iter()
            .rev()
            .find(|c| grammar.member_name_nodes.contains(&c.kind()))?;
        let receiver = callee_expr.child(0).map(|r| get_node_text(&r, source));
        (get_node_text(&name, source), receiver)
    } else {
        (get_node_text(&callee_expr, source), None)
    };

    if callee.is_empty() {
        return None;
    }

    Some(Call {
        caller_function: enclosing_function(node, source, grammar),
        callee,
        line: start_line(node),
        arguments_count: argument_count(node, grammar),
        is_method_call: is_member,
        receiver,
    })
}

/// Argument count of a call, from its first argument-list child
pub fn argument_count(call: &Node, grammar: &LangGrammar) -> usize {
    let Some(args) = child_of_kinds(call, grammar.argument_nodes) else {
        return 0;
    };
    match grammar.counted_argument {
        Some(kind) => children_of_kinds(&args, &[kind]).len(),
        None => count_arguments(&args),
    }
}

// =============================================================================
// Scopes
// =============================================================================

/// Name of the nearest enclosing function-like ancestor that has one
pub fn enclosing_function(node: &Node, source: &str, grammar: &LangGrammar) -> Option<String> {
    let mut current = node.parent();
    while let Some(parent) = current {
        if grammar.function_nodes.contains(&parent.kind()) {
            if let Some(name) = function_name(&parent, source) {
                return Some(name);
            }
        }
        current = parent.parent();
    }
    None
}

/// Declared name of a function-like node.
///
/// Tries the `name` field, then the C-style declarator chain, then the
/// variable or assignment an anonymous function is bound to.
pub fn function_name(node: &Node, source: &str) -> Option<String> {
    if let Some(name) = node.child_by_field_name("name") {
        return non_blank(get_node_text(&name, source));
    }

    if let Some(name) = node
        .child_by_field_name("declarator")
        .and_then(|d| declarator_name(&d, source))
    {
        return Some(name);
    }

    let parent = node.parent()?;
    let binding = match parent.kind() {
        "variable_declarator" | "pair" | "public_field_definition" | "field_definition" => parent
            .child_by_field_name("name")
            .or_else(|| parent.child_by_field_name("key"))
            .or_else(|| parent.child_by_field_name("property")),
        "assignment_expression" | "assignment" => parent.child_by_field_name("left"),
        "init_declarator" => parent.child_by_field_name("declarator"),
        _ => None,
    }?;
    non_blank(get_node_text(&binding, source))
}

/// Innermost identifier of a (possibly nested) C/C++ declarator
pub fn declarator_name(declarator: &Node, source: &str) -> Option<String> {
    let mut current = *declarator;
    loop {
        match current.kind() {
            "identifier" | "field_identifier" | "qualified_identifier" | "destructor_name"
            | "operator_name" | "type_identifier" => {
                return non_blank(get_node_text(&current, source));
            }
            _ => {}
        }
        current = current
            .child_by_field_name("declarator")
            .or_else(|| {
                children(&current).into_iter().find(|c| {
                    matches!(
                        c.kind(),
                        "identifier" | "field_identifier" | "qualified_identifier"
                    )
                })
            })?;
    }
}

/// Wrappers that may sit between a declaration and the body that owns it.
/// Class fields wrap the arrow functions assigned to them.
const MEMBER_WRAPPERS: &[&str] = &[
    "decorated_definition",
    "template_declaration",
    "field_definition",
    "public_field_definition",
];

/// Whether a declaration is owned by a type body.
///
/// Such declarations are reported as members of the enclosing type, not as
/// top-level functions or types.
pub fn is_type_member(node: &Node, grammar: &LangGrammar) -> bool {
    let mut parent = node.parent();
    while let Some(p) = parent {
        if MEMBER_WRAPPERS.contains(&p.kind()) {
            parent = p.parent();
        } else {
            break;
        }
    }
    let Some(parent) = parent else {
        return false;
    };

    if grammar.type_nodes.contains(&parent.kind()) {
        return true;
    }
    grammar.body_nodes.contains(&parent.kind())
        && parent
            .parent()
            .is_some_and(|owner| grammar.type_nodes.contains(&owner.kind()))
}

fn non_blank(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
