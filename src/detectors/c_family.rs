//! C/C++ language detector
//!
//! Functions resolve their names through the declarator chain
//! (`function_definition` -> `function_declarator` -> identifier), so pointer
//! returns and qualified C++ names (`Foo::bar`) come out right. Structs and
//! C++ classes carry fields, methods and access levels.

use tree_sitter::Node;

use crate::detectors::common::{
    child_of_kind, children, docstring, end_line, field_text, find_nodes, get_node_text,
    named_children, start_line, strip_quotes,
};
use crate::detectors::generic::{declarator_name, extract_calls, is_type_member};
use crate::detectors::grammar::{LangGrammar, CPP_GRAMMAR, C_GRAMMAR};
use crate::schema::{AnalysisResult, Function, Import, Parameter, Property, TypeDef};

/// Extract semantic information from a C source file
pub fn extract_c(result: &mut AnalysisResult, root: &Node, source: &str) {
    extract_with(result, root, source, &C_GRAMMAR);
}

/// Extract semantic information from a C++ source file
pub fn extract_cpp(result: &mut AnalysisResult, root: &Node, source: &str) {
    extract_with(result, root, source, &CPP_GRAMMAR);
}

fn extract_with(result: &mut AnalysisResult, root: &Node, source: &str, grammar: &LangGrammar) {
    for node in find_nodes(root, &["function_definition"]) {
        if is_type_member(&node, grammar) {
            continue;
        }
        if let Some(func) = build_function(&node, source, grammar) {
            result.functions.push(func);
        }
    }

    for node in find_nodes(root, grammar.type_nodes) {
        if let Some(class) = build_type(&node, source, grammar) {
            result.classes.push(class);
        }
    }

    for node in find_nodes(root, &["preproc_include"]) {
        if let Some(path) = field_text(&node, "path", source) {
            let module = strip_quotes(path.trim_start_matches('<').trim_end_matches('>'));
            result.imports.push(Import::module(module, start_line(&node)));
        }
    }

    extract_calls(result, root, source, grammar);
}

// ============================================================================
// Functions
// ============================================================================

/// The `function_declarator` under a (possibly pointer/reference) declarator
fn function_declarator<'t>(node: &Node<'t>) -> Option<Node<'t>> {
    let mut current = node.child_by_field_name("declarator")?;
    loop {
        if current.kind() == "function_declarator" {
            return Some(current);
        }
        current = current.child_by_field_name("declarator").or_else(|| {
            named_children(&current)
                .into_iter()
                .find(|c| c.kind().ends_with("declarator"))
        })?;
    }
}

fn build_function(node: &Node, source: &str, grammar: &LangGrammar) -> Option<Function> {
    let declarator = function_declarator(node)?;
    let name = declarator_name(&declarator, source)?;

    let mut func = Function::new(name, start_line(node), end_line(node));
    func.parameters = declarator
        .child_by_field_name("parameters")
        .map(|p| extract_parameters(&p, source))
        .unwrap_or_default();
    func.return_type = field_text(node, "type", source);
    func.is_static = storage_is_static(node, source);
    func.docstring = docstring(node, source, grammar.comment_nodes);
    Some(func)
}

fn storage_is_static(node: &Node, source: &str) -> bool {
    children(node)
        .iter()
        .any(|c| c.kind() == "storage_class_specifier" && get_node_text(c, source) == "static")
}

fn extract_parameters(params: &Node, source: &str) -> Vec<Parameter> {
    let mut out = Vec::new();
    for param in named_children(params) {
        if !matches!(
            param.kind(),
            "parameter_declaration" | "optional_parameter_declaration"
        ) {
            continue;
        }
        let type_name = field_text(&param, "type", source).unwrap_or_default();
        let name = param
            .child_by_field_name("declarator")
            .and_then(|d| declarator_name(&d, source))
            .unwrap_or_default();

        // `void f(void)` declares no parameters
        if name.is_empty() && (type_name.is_empty() || type_name == "void") {
            continue;
        }
        out.push(Parameter::typed(name, type_name));
    }
    out
}

// ============================================================================
// Types
// ============================================================================

fn build_type(node: &Node, source: &str, grammar: &LangGrammar) -> Option<TypeDef> {
    // `struct Foo x;` references a type without defining it
    let body = node.child_by_field_name("body")?;
    let name = field_text(node, "name", source)?;
    let mut class = TypeDef::new(name, start_line(node), end_line(node));

    if let Some(bases) = child_of_kind(node, "base_class_clause") {
        let mut names = named_children(&bases)
            .into_iter()
            .filter(|b| b.kind() != "access_specifier")
            .map(|b| get_node_text(&b, source));
        class.extends = names.next();
        class.implements = names.collect();
    }

    let mut access = if node.kind() == "class_specifier" {
        "private"
    } else {
        "public"
    };

    for member in named_children(&body) {
        // Templates wrap the member they declare
        let member = if member.kind() == "template_declaration" {
            match named_children(&member).into_iter().last() {
                Some(inner) => inner,
                None => continue,
            }
        } else {
            member
        };

        match member.kind() {
            "access_specifier" => {
                access = match get_node_text(&member, source).trim_end_matches(':').trim() {
                    "public" => "public",
                    "protected" => "protected",
                    _ => "private",
                };
            }
            "function_definition" => {
                if let Some(mut method) = build_function(&member, source, grammar) {
                    method.visibility = Some(access.to_string());
                    class.methods.push(method);
                }
            }
            "field_declaration" | "declaration" => {
                // A declarator that is a function is a method prototype
                if let Some(mut method) = build_function(&member, source, grammar) {
                    method.line_end = method.line_start;
                    method.visibility = Some(access.to_string());
                    class.methods.push(method);
                    continue;
                }
                let type_name = field_text(&member, "type", source);
                for declarator in member.children_by_field_name("declarator", &mut member.walk()) {
                    if let Some(name) = declarator_name(&declarator, source) {
                        class.properties.push(Property {
                            name,
                            type_name: type_name.clone(),
                            visibility: Some(access.to_string()),
                        });
                    }
                }
            }
            _ => {}
        }
    }

    Some(class)
}
