//! Config file detector (YAML)
//!
//! Every mapping key becomes a `key` symbol, block and flow style alike, at
//! any nesting depth.

use tree_sitter::Node;

use crate::detectors::common::{get_node_text, start_line, strip_quotes, visit_all};
use crate::schema::{AnalysisResult, Symbol};

/// Extract mapping keys from a YAML document
pub fn extract_yaml(result: &mut AnalysisResult, root: &Node, source: &str) {
    visit_all(root, |node| {
        if !matches!(node.kind(), "block_mapping_pair" | "flow_pair") {
            return;
        }
        let Some(key) = node.child_by_field_name("key") else {
            return;
        };
        let name = strip_quotes(get_node_text(&key, source).trim());
        if !name.is_empty() {
            result.symbols.push(Symbol::new(name, "key", start_line(&node)));
        }
    });
}
