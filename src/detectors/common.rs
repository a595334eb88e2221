//! Common utilities shared across all tree-backed detectors
//!
//! Helpers for AST traversal, text extraction and position handling that do
//! not depend on any particular grammar.

use tree_sitter::Node;

use crate::schema::SyntaxError;

/// Message attached to every ERROR or missing node
pub const SYNTAX_ERROR_MESSAGE: &str = "Syntax error detected";

// ============================================================================
// Text Extraction
// ============================================================================

/// Get text content of a node
pub fn get_node_text(node: &Node, source: &str) -> String {
    node.utf8_text(source.as_bytes())
        .unwrap_or("")
        .to_string()
}

/// Text of the named field `field`, if present
pub fn field_text(node: &Node, field: &str, source: &str) -> Option<String> {
    node.child_by_field_name(field)
        .map(|n| get_node_text(&n, source))
}

/// Strip one layer of surrounding quote characters
pub fn strip_quotes(s: &str) -> String {
    s.trim()
        .trim_matches(|c| c == '"' || c == '\'' || c == '`')
        .to_string()
}

/// Normalize whitespace: collapse multiple spaces/newlines to single space
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ============================================================================
// Positions
// ============================================================================

/// 1-based start line of a node
pub fn start_line(node: &Node) -> usize {
    node.start_position().row + 1
}

/// 1-based end line of a node
pub fn end_line(node: &Node) -> usize {
    node.end_position().row + 1
}

// ============================================================================
// AST Traversal
// ============================================================================

/// Visit all nodes in a tree in pre-order (iterative to avoid stack overflow)
pub fn visit_all<'t, F>(node: &Node<'t>, mut visitor: F)
where
    F: FnMut(Node<'t>),
{
    let mut cursor = node.walk();
    let mut did_visit_children = false;

    loop {
        if !did_visit_children {
            visitor(cursor.node());

            if cursor.goto_first_child() {
                continue;
            }
        }

        if cursor.goto_next_sibling() {
            did_visit_children = false;
            continue;
        }

        if !cursor.goto_parent() {
            break;
        }
        did_visit_children = true;
    }
}

/// All nodes under `root` (inclusive) whose kind is in `kinds`, in document order
pub fn find_nodes<'t>(root: &Node<'t>, kinds: &[&str]) -> Vec<Node<'t>> {
    let mut found = Vec::new();
    visit_all(root, |node| {
        if kinds.contains(&node.kind()) {
            found.push(node);
        }
    });
    found
}

/// Direct children of a node
pub fn children<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

/// Named direct children of a node
pub fn named_children<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

/// First direct child of the given kind
pub fn child_of_kind<'t>(node: &Node<'t>, kind: &str) -> Option<Node<'t>> {
    children(node).into_iter().find(|c| c.kind() == kind)
}

/// First direct child whose kind is any of `kinds`
pub fn child_of_kinds<'t>(node: &Node<'t>, kinds: &[&str]) -> Option<Node<'t>> {
    children(node).into_iter().find(|c| kinds.contains(&c.kind()))
}

/// Every direct child whose kind is any of `kinds`
pub fn children_of_kinds<'t>(node: &Node<'t>, kinds: &[&str]) -> Vec<Node<'t>> {
    children(node)
        .into_iter()
        .filter(|c| kinds.contains(&c.kind()))
        .collect()
}

/// Whether a direct child has exactly this kind (anonymous keyword tokens
/// such as `async` or `static` use their text as kind)
pub fn has_child_kind(node: &Node, kind: &str) -> bool {
    child_of_kind(node, kind).is_some()
}

/// Whether the immediate parent's kind is any of `kinds`
pub fn parent_is(node: &Node, kinds: &[&str]) -> bool {
    node.parent().is_some_and(|p| kinds.contains(&p.kind()))
}

/// Number of arguments in an argument list: every child that is not a
/// bracket or separator token
pub fn count_arguments(args: &Node) -> usize {
    children(args)
        .iter()
        .filter(|c| !matches!(c.kind(), "(" | ")" | "," | "[" | "]" | "{" | "}"))
        .filter(|c| !c.is_extra())
        .count()
}

// ============================================================================
// Syntax Defects
// ============================================================================

/// One `SyntaxError` per ERROR or missing node, in pre-order
pub fn collect_syntax_errors(root: &Node) -> Vec<SyntaxError> {
    let mut errors = Vec::new();
    visit_all(root, |node| {
        if node.is_error() || node.is_missing() {
            let pos = node.start_position();
            errors.push(SyntaxError {
                line: pos.row + 1,
                column: pos.column + 1,
                message: SYNTAX_ERROR_MESSAGE.to_string(),
            });
        }
    });
    errors
}

// ============================================================================
// Doc Comments
// ============================================================================

/// Comment nodes immediately above `node`, top to bottom.
///
/// Only contiguous comments count: a blank line ends the block. Attribute
/// and decorator siblings between the comment and the declaration are
/// stepped over. When the declaration is wrapped (e.g. `export function`),
/// the wrapper's siblings are searched instead.
pub fn leading_comments<'t>(node: &Node<'t>, comment_kinds: &[&str]) -> Vec<Node<'t>> {
    let anchor = match node.parent() {
        Some(p) if WRAPPER_KINDS.contains(&p.kind()) => p,
        _ => *node,
    };

    let mut comments = Vec::new();
    let mut next_row = anchor.start_position().row;
    let mut current = anchor.prev_sibling();

    while let Some(sibling) = current {
        let kind = sibling.kind();
        let is_comment = comment_kinds.contains(&kind);
        if !is_comment && !ATTRIBUTE_KINDS.contains(&kind) {
            break;
        }
        if sibling.end_position().row + 1 < next_row {
            break;
        }
        if is_comment {
            comments.push(sibling);
        }
        next_row = sibling.start_position().row;
        current = sibling.prev_sibling();
    }

    comments.reverse();
    comments
}

const WRAPPER_KINDS: &[&str] = &["export_statement", "decorated_definition"];
const ATTRIBUTE_KINDS: &[&str] = &["attribute_item", "decorator", "attribute_list", "annotation"];

/// Doc text from a leading comment block, with comment markers removed
pub fn doc_from_comments(comments: &[Node], source: &str) -> Option<String> {
    let lines: Vec<String> = comments
        .iter()
        .flat_map(|c| {
            get_node_text(c, source)
                .lines()
                .map(clean_comment_line)
                .collect::<Vec<_>>()
        })
        .filter(|l| !l.is_empty())
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

/// Leading doc comment of a declaration, if any
pub fn docstring(node: &Node, source: &str, comment_kinds: &[&str]) -> Option<String> {
    doc_from_comments(&leading_comments(node, comment_kinds), source)
}

fn clean_comment_line(line: &str) -> String {
    let mut s = line.trim();
    for prefix in ["///", "//!", "//", "/**", "/*", "(**", "(*", "#", "--"] {
        if let Some(rest) = s.strip_prefix(prefix) {
            s = rest;
            break;
        }
    }
    let s = s.strip_suffix("*/").or_else(|| s.strip_suffix("*)")).unwrap_or(s).trim();
    s.strip_prefix('*').unwrap_or(s).trim().to_string()
}
