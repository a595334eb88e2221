//! Core JavaScript/TypeScript semantic extraction
//!
//! Shared by every dialect of the family. TypeScript-only constructs
//! (interfaces, heritage clauses, type annotations) live in `typescript.rs`
//! and are reached through [`Dialect`].

use tree_sitter::Node;

use crate::detectors::common::{
    child_of_kind, children, docstring, end_line, field_text, find_nodes, get_node_text,
    has_child_kind, named_children, start_line, strip_quotes,
};
use crate::detectors::generic::{extract_calls, function_name, is_type_member};
use crate::detectors::grammar::{LangGrammar, JAVASCRIPT_GRAMMAR, TYPESCRIPT_GRAMMAR};
use crate::detectors::javascript::typescript;
use crate::schema::{
    non_empty, AnalysisResult, Export, Function, Import, Parameter, Property, TypeDef,
};

/// Which grammar family produced the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    JavaScript,
    TypeScript,
}

impl Dialect {
    pub fn grammar(self) -> &'static LangGrammar {
        match self {
            Dialect::JavaScript => &JAVASCRIPT_GRAMMAR,
            Dialect::TypeScript => &TYPESCRIPT_GRAMMAR,
        }
    }
}

const FUNCTION_KINDS: &[&str] = &[
    "function_declaration",
    "generator_function_declaration",
    "function_expression",
    "function",
    "arrow_function",
];

// =============================================================================
// Main Entry Point
// =============================================================================

/// Core extraction for JavaScript/TypeScript
pub fn extract_core(result: &mut AnalysisResult, root: &Node, source: &str, dialect: Dialect) {
    let grammar = dialect.grammar();

    for node in find_nodes(root, FUNCTION_KINDS) {
        if is_type_member(&node, grammar) {
            continue;
        }
        result.functions.push(build_function(&node, source, dialect));
    }

    for node in find_nodes(root, grammar.type_nodes) {
        let class = if node.kind() == "interface_declaration" {
            typescript::build_interface(&node, source)
        } else {
            build_class(&node, source, dialect)
        };
        if let Some(class) = class {
            result.classes.push(class);
        }
    }

    extract_imports(result, root, source);
    extract_exports(result, root, source);
    extract_calls(result, root, source, grammar);
}

// =============================================================================
// Functions
// =============================================================================

/// Build a function record; anonymous functions keep an empty name
pub fn build_function(node: &Node, source: &str, dialect: Dialect) -> Function {
    let name = function_name(node, source).unwrap_or_default();
    let mut func = Function::new(name, start_line(node), end_line(node));

    func.parameters = match node.child_by_field_name("parameters") {
        Some(params) => extract_parameters(&params, source),
        // Single bare parameter of an arrow function: `x => x * 2`
        None => node
            .child_by_field_name("parameter")
            .map(|p| vec![Parameter::new(get_node_text(&p, source))])
            .unwrap_or_default(),
    };
    func.is_async = has_child_kind(node, "async");

    if dialect == Dialect::TypeScript {
        func.return_type = typescript::return_type(node, source);
    }

    func.docstring = docstring(&doc_anchor(node), source, dialect.grammar().comment_nodes);
    func
}

/// The node a leading doc comment is attached to.
///
/// For `const f = () => {}` the comment sits above the whole declaration,
/// not above the arrow function.
fn doc_anchor<'t>(node: &Node<'t>) -> Node<'t> {
    let Some(declarator) = node.parent().filter(|p| p.kind() == "variable_declarator") else {
        return *node;
    };
    declarator
        .parent()
        .filter(|d| matches!(d.kind(), "lexical_declaration" | "variable_declaration"))
        .unwrap_or(*node)
}

/// Extract function parameters
pub fn extract_parameters(params: &Node, source: &str) -> Vec<Parameter> {
    let mut out = Vec::new();
    for child in named_children(params) {
        match child.kind() {
            "identifier" => out.push(Parameter::new(get_node_text(&child, source))),
            "required_parameter" | "optional_parameter" => {
                let name = child
                    .child_by_field_name("pattern")
                    .map(|n| get_node_text(&n, source))
                    .unwrap_or_default();
                let type_name = child
                    .child_by_field_name("type")
                    .map(|t| typescript::annotation_text(&t, source));
                out.push(Parameter {
                    name,
                    type_name: type_name.and_then(non_empty),
                });
            }
            "assignment_pattern" => {
                if let Some(left) = child.child_by_field_name("left") {
                    out.push(Parameter::new(get_node_text(&left, source)));
                }
            }
            "rest_pattern" | "object_pattern" | "array_pattern" => {
                out.push(Parameter::new(get_node_text(&child, source)))
            }
            _ => {}
        }
    }
    out
}

// =============================================================================
// Classes
// =============================================================================

fn build_class(node: &Node, source: &str, dialect: Dialect) -> Option<TypeDef> {
    let name = field_text(node, "name", source)?;
    let mut class = TypeDef::new(name, start_line(node), end_line(node));

    if let Some(heritage) = child_of_kind(node, "class_heritage") {
        match dialect {
            Dialect::TypeScript => typescript::apply_heritage(&mut class, &heritage, source),
            Dialect::JavaScript => {
                class.extends = named_children(&heritage)
                    .first()
                    .map(|n| get_node_text(n, source));
            }
        }
    }

    if let Some(body) = node.child_by_field_name("body") {
        for member in named_children(&body) {
            match member.kind() {
                "method_definition" | "abstract_method_signature" | "method_signature" => {
                    if let Some(method) = build_method(&member, source, dialect) {
                        class.methods.push(method);
                    }
                }
                "field_definition" | "public_field_definition" => {
                    if let Some(prop) = build_field(&member, source) {
                        class.properties.push(prop);
                    }
                }
                _ => {}
            }
        }
    }

    Some(class)
}

/// Class method with its modifiers
pub fn build_method(node: &Node, source: &str, dialect: Dialect) -> Option<Function> {
    let name = field_text(node, "name", source)?;
    let mut method = Function::new(name, start_line(node), end_line(node));
    method.parameters = node
        .child_by_field_name("parameters")
        .map(|p| extract_parameters(&p, source))
        .unwrap_or_default();
    method.is_async = has_child_kind(node, "async");
    method.is_static = has_child_kind(node, "static");
    method.visibility = member_visibility(node, source);

    if dialect == Dialect::TypeScript {
        method.return_type = typescript::return_type(node, source);
    }
    method.docstring = docstring(node, source, dialect.grammar().comment_nodes);
    Some(method)
}

fn build_field(node: &Node, source: &str) -> Option<Property> {
    let name = node
        .child_by_field_name("property")
        .or_else(|| node.child_by_field_name("name"))
        .map(|n| get_node_text(&n, source))?;
    let type_name = node
        .child_by_field_name("type")
        .map(|t| typescript::annotation_text(&t, source))
        .and_then(non_empty);
    Some(Property {
        visibility: member_visibility(node, source)
            .or_else(|| name.starts_with('#').then(|| "private".to_string())),
        name,
        type_name,
    })
}

/// `public` / `private` / `protected` from an accessibility modifier
fn member_visibility(node: &Node, source: &str) -> Option<String> {
    child_of_kind(node, "accessibility_modifier").map(|m| get_node_text(&m, source))
}

// =============================================================================
// Imports / Exports
// =============================================================================

/// Extract import statements: default, named and namespace forms
pub fn extract_imports(result: &mut AnalysisResult, root: &Node, source: &str) {
    for node in find_nodes(root, &["import_statement"]) {
        let Some(module) = field_text(&node, "source", source) else {
            continue;
        };
        let mut import = Import::module(strip_quotes(&module), start_line(&node));

        if let Some(clause) = child_of_kind(&node, "import_clause") {
            for inner in named_children(&clause) {
                match inner.kind() {
                    "identifier" => {
                        import.is_default = true;
                        import.symbols.push(get_node_text(&inner, source));
                    }
                    "named_imports" => {
                        for spec in named_children(&inner) {
                            if spec.kind() == "import_specifier" {
                                if let Some(name) = field_text(&spec, "name", source) {
                                    import.symbols.push(name);
                                }
                            }
                        }
                    }
                    "namespace_import" => {
                        if let Some(alias) = child_of_kind(&inner, "identifier") {
                            import.symbols.push(get_node_text(&alias, source));
                        }
                    }
                    _ => {}
                }
            }
        }

        result.imports.push(import);
    }
}

/// Extract export statements.
///
/// `export default ...` yields the name `"default"`; otherwise each exported
/// declaration or specifier yields its own entry.
pub fn extract_exports(result: &mut AnalysisResult, root: &Node, source: &str) {
    for node in find_nodes(root, &["export_statement"]) {
        let line = start_line(&node);

        if children(&node).iter().any(|c| c.kind() == "default") {
            result.exports.push(Export {
                name: "default".to_string(),
                line,
            });
            continue;
        }

        if let Some(decl) = node.child_by_field_name("declaration") {
            for name in declared_names(&decl, source) {
                result.exports.push(Export { name, line });
            }
            continue;
        }

        if let Some(clause) = child_of_kind(&node, "export_clause") {
            for spec in named_children(&clause) {
                let exported = field_text(&spec, "alias", source)
                    .or_else(|| field_text(&spec, "name", source));
                if let Some(name) = exported {
                    result.exports.push(Export { name, line });
                }
            }
        }
    }
}

/// Names introduced by an exported declaration
fn declared_names(decl: &Node, source: &str) -> Vec<String> {
    match decl.kind() {
        "lexical_declaration" | "variable_declaration" => named_children(decl)
            .iter()
            .filter(|d| d.kind() == "variable_declarator")
            .filter_map(|d| field_text(d, "name", source))
            .collect(),
        _ => field_text(decl, "name", source).into_iter().collect(),
    }
}
