//! Markup language detector (HTML, CSS, SCSS)
//!
//! Markup has no functions or calls. HTML contributes `id`/`class` symbols
//! and the scripts and stylesheets it loads; stylesheets contribute
//! selectors, custom properties and their own imports.

use tree_sitter::Node;

use crate::detectors::common::{
    child_of_kind, children, field_text, find_nodes, get_node_text, named_children, start_line,
    strip_quotes,
};
use crate::schema::{AnalysisResult, Import, Symbol};

// ============================================================================
// HTML
// ============================================================================

/// Extract symbols and imports from an HTML document
pub fn extract_html(result: &mut AnalysisResult, root: &Node, source: &str) {
    // `script_element` and `style_element` carry their own start tags
    for tag in find_nodes(root, &["start_tag", "self_closing_tag"]) {
        let attrs = attributes(&tag, source);

        for (name, value, line) in &attrs {
            match name.as_str() {
                "id" => result.symbols.push(Symbol::new(value.clone(), "id", *line)),
                "class" => {
                    for class in value.split_whitespace() {
                        result.symbols.push(Symbol::new(class, "class", *line));
                    }
                }
                _ => {}
            }
        }

        let tag_name = child_of_kind(&tag, "tag_name")
            .map(|t| get_node_text(&t, source).to_ascii_lowercase())
            .unwrap_or_default();
        let attr = |wanted: &str| attrs.iter().find(|(name, _, _)| name == wanted);

        match tag_name.as_str() {
            "script" => {
                if let Some((_, src, line)) = attr("src") {
                    result.imports.push(Import::module(src.clone(), *line));
                }
            }
            "link" => {
                let is_stylesheet = attr("rel").is_some_and(|(_, rel, _)| {
                    rel.split_whitespace()
                        .any(|r| r.eq_ignore_ascii_case("stylesheet"))
                });
                if let (true, Some((_, href, line))) = (is_stylesheet, attr("href")) {
                    result.imports.push(Import::module(href.clone(), *line));
                }
            }
            _ => {}
        }
    }
}

/// `(name, unquoted value, line)` for each valued attribute of a tag
fn attributes(tag: &Node, source: &str) -> Vec<(String, String, usize)> {
    named_children(tag)
        .into_iter()
        .filter(|a| a.kind() == "attribute")
        .filter_map(|attr| {
            let name = child_of_kind(&attr, "attribute_name")?;
            let value = child_of_kind(&attr, "quoted_attribute_value")
                .or_else(|| child_of_kind(&attr, "attribute_value"))?;
            Some((
                get_node_text(&name, source).to_ascii_lowercase(),
                strip_quotes(&get_node_text(&value, source)),
                start_line(&attr),
            ))
        })
        .collect()
}

// ============================================================================
// CSS / SCSS
// ============================================================================

/// Extract selectors, variables and imports from a CSS stylesheet
pub fn extract_css(result: &mut AnalysisResult, root: &Node, source: &str) {
    extract_stylesheet(result, root, source, false);
}

/// SCSS adds `$variables`, mixins, `@use` and `@forward` to plain CSS
pub fn extract_scss(result: &mut AnalysisResult, root: &Node, source: &str) {
    extract_stylesheet(result, root, source, true);
}

fn extract_stylesheet(result: &mut AnalysisResult, root: &Node, source: &str, scss: bool) {
    for ruleset in find_nodes(root, &["rule_set"]) {
        let Some(selectors) = child_of_kind(&ruleset, "selectors") else {
            continue;
        };
        for selector in named_children(&selectors) {
            let text = get_node_text(&selector, source);
            let kind = match text.chars().next() {
                Some('#') => "id",
                Some('.') => "class",
                _ => "selector",
            };
            result
                .symbols
                .push(Symbol::new(text, kind, start_line(&selector)));
        }
    }

    for decl in find_nodes(root, &["declaration"]) {
        let Some(property) = named_children(&decl).into_iter().next() else {
            continue;
        };
        let name = get_node_text(&property, source);
        if name.starts_with("--") || (scss && name.starts_with('$')) {
            result
                .symbols
                .push(Symbol::new(name, "variable", start_line(&decl)));
        }
    }

    for keyframes in find_nodes(root, &["keyframes_statement"]) {
        if let Some(name) = child_of_kind(&keyframes, "keyframes_name") {
            result.symbols.push(Symbol::new(
                get_node_text(&name, source),
                "keyframes",
                start_line(&keyframes),
            ));
        }
    }

    let import_kinds: &[&str] = if scss {
        &["import_statement", "use_statement", "forward_statement"]
    } else {
        &["import_statement"]
    };
    for stmt in find_nodes(root, import_kinds) {
        if let Some(module) = import_target(&stmt, source) {
            result.imports.push(Import::module(module, start_line(&stmt)));
        }
    }

    if scss {
        for mixin in find_nodes(root, &["mixin_statement"]) {
            let name = field_text(&mixin, "name", source).or_else(|| {
                child_of_kind(&mixin, "identifier").map(|n| get_node_text(&n, source))
            });
            if let Some(name) = name {
                result
                    .symbols
                    .push(Symbol::new(name, "mixin", start_line(&mixin)));
            }
        }
        // Grammars without dedicated nodes fall back to a generic at-rule
        for rule in find_nodes(root, &["at_rule"]) {
            let keyword = children(&rule)
                .into_iter()
                .find(|c| c.kind() == "at_keyword")
                .map(|k| get_node_text(&k, source));
            if matches!(keyword.as_deref(), Some("@use" | "@forward")) {
                if let Some(module) = import_target(&rule, source) {
                    result.imports.push(Import::module(module, start_line(&rule)));
                }
            }
        }
    }
}

/// First string or `url(...)` operand of an import-like rule
fn import_target(stmt: &Node, source: &str) -> Option<String> {
    let target = find_nodes(stmt, &["string_value", "call_expression"])
        .into_iter()
        .next()?;
    let text = get_node_text(&target, source);
    let text = text
        .strip_prefix("url(")
        .and_then(|t| t.strip_suffix(')'))
        .unwrap_or(&text);
    Some(strip_quotes(text.trim()))
}
