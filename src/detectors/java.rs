//! Java language detector
//!
//! Classes, interfaces, enums and records with their methods, constructors
//! and fields; imports; method invocations. Java keeps methods inside type
//! bodies, so top-level `functions` is usually empty.

use tree_sitter::Node;

use crate::detectors::common::{
    child_of_kind, children, docstring, end_line, field_text, find_nodes, get_node_text,
    named_children, start_line,
};
use crate::detectors::generic::{argument_count, enclosing_function, is_type_member};
use crate::detectors::grammar::JAVA_GRAMMAR;
use crate::schema::{AnalysisResult, Call, Function, Import, Parameter, Property, TypeDef};

const METHOD_KINDS: &[&str] = &["method_declaration", "constructor_declaration"];

/// Extract semantic information from a Java source file
pub fn extract(result: &mut AnalysisResult, root: &Node, source: &str) {
    for node in find_nodes(root, METHOD_KINDS) {
        if is_type_member(&node, &JAVA_GRAMMAR) {
            continue;
        }
        if let Some(func) = build_method(&node, source) {
            result.functions.push(func);
        }
    }

    for node in find_nodes(root, JAVA_GRAMMAR.type_nodes) {
        if let Some(class) = build_type(&node, source) {
            result.classes.push(class);
        }
    }

    for node in find_nodes(root, &["import_declaration"]) {
        let module = import_path(&get_node_text(&node, source));
        if !module.is_empty() {
            result.imports.push(Import::module(module, start_line(&node)));
        }
    }

    for node in find_nodes(root, JAVA_GRAMMAR.call_nodes) {
        if let Some(call) = resolve_invocation(&node, source) {
            result.calls.push(call);
        }
    }
}

/// `import static a.b.C;` -> `a.b.C`
fn import_path(text: &str) -> String {
    text.trim()
        .trim_start_matches("import")
        .trim()
        .trim_start_matches("static ")
        .trim_end_matches(';')
        .trim()
        .to_string()
}

// ============================================================================
// Modifiers
// ============================================================================

/// Keyword modifiers of a declaration, annotations excluded
fn modifiers(node: &Node, source: &str) -> Vec<String> {
    child_of_kind(node, "modifiers")
        .map(|m| {
            children(&m)
                .iter()
                .filter(|c| !c.kind().ends_with("annotation"))
                .map(|c| get_node_text(c, source))
                .collect()
        })
        .unwrap_or_default()
}

fn visibility(mods: &[String]) -> Option<String> {
    ["public", "private", "protected"]
        .into_iter()
        .find(|v| mods.iter().any(|m| m == v))
        .map(str::to_string)
}

// ============================================================================
// Methods
// ============================================================================

fn build_method(node: &Node, source: &str) -> Option<Function> {
    let name = field_text(node, "name", source)?;
    let mods = modifiers(node, source);

    let mut func = Function::new(name, start_line(node), end_line(node));
    func.parameters = node
        .child_by_field_name("parameters")
        .map(|p| extract_parameters(&p, source))
        .unwrap_or_default();
    func.return_type = field_text(node, "type", source);
    func.visibility = visibility(&mods);
    func.is_static = mods.iter().any(|m| m == "static");
    func.docstring = docstring(node, source, JAVA_GRAMMAR.comment_nodes);
    Some(func)
}

fn extract_parameters(params: &Node, source: &str) -> Vec<Parameter> {
    named_children(params)
        .iter()
        .filter_map(|param| match param.kind() {
            "formal_parameter" => {
                let name = field_text(param, "name", source)?;
                let type_name = field_text(param, "type", source).unwrap_or_default();
                Some(Parameter::typed(name, type_name))
            }
            "spread_parameter" => {
                let declarator = child_of_kind(param, "variable_declarator")?;
                let name = field_text(&declarator, "name", source)?;
                let type_name = named_children(param)
                    .iter()
                    .find(|c| c.kind() != "variable_declarator" && c.kind() != "modifiers")
                    .map(|t| format!("{}...", get_node_text(t, source)))
                    .unwrap_or_default();
                Some(Parameter::typed(name, type_name))
            }
            _ => None,
        })
        .collect()
}

// ============================================================================
// Types
// ============================================================================

fn build_type(node: &Node, source: &str) -> Option<TypeDef> {
    let name = field_text(node, "name", source)?;
    let mut class = TypeDef::new(name, start_line(node), end_line(node));

    if let Some(superclass) = node.child_by_field_name("superclass") {
        class.extends = named_children(&superclass)
            .first()
            .map(|t| get_node_text(t, source));
    }

    // Classes list interfaces in `super_interfaces`, interfaces in
    // `extends_interfaces`; both wrap a `type_list`
    for clause in ["super_interfaces", "extends_interfaces"] {
        if let Some(list) = child_of_kind(node, clause).and_then(|c| child_of_kind(&c, "type_list"))
        {
            class.implements.extend(
                named_children(&list)
                    .iter()
                    .map(|t| get_node_text(t, source)),
            );
        }
    }

    // Record components behave like final fields
    if node.kind() == "record_declaration" {
        if let Some(params) = node.child_by_field_name("parameters") {
            for param in extract_parameters(&params, source) {
                class.properties.push(Property {
                    name: param.name,
                    type_name: param.type_name,
                    visibility: Some("private".to_string()),
                });
            }
        }
    }

    if let Some(body) = node.child_by_field_name("body") {
        collect_members(&mut class, &body, source);
    }

    Some(class)
}

fn collect_members(class: &mut TypeDef, body: &Node, source: &str) {
    for member in named_children(body) {
        match member.kind() {
            "method_declaration" | "constructor_declaration" => {
                if let Some(method) = build_method(&member, source) {
                    class.methods.push(method);
                }
            }
            "field_declaration" | "constant_declaration" => {
                let mods = modifiers(&member, source);
                let type_name = field_text(&member, "type", source);
                for declarator in named_children(&member) {
                    if declarator.kind() != "variable_declarator" {
                        continue;
                    }
                    if let Some(name) = field_text(&declarator, "name", source) {
                        class.properties.push(Property {
                            name,
                            type_name: type_name.clone(),
                            visibility: visibility(&mods),
                        });
                    }
                }
            }
            // Enum bodies nest their members one level down
            "enum_body_declarations" => collect_members(class, &member, source),
            _ => {}
        }
    }
}

// ============================================================================
// Calls
// ============================================================================

/// `obj.method(args)` carries an `object` field; a bare `method(args)` does not
fn resolve_invocation(node: &Node, source: &str) -> Option<Call> {
    let callee = field_text(node, "name", source)?;
    let receiver = field_text(node, "object", source);
    Some(Call {
        caller_function: enclosing_function(node, source, &JAVA_GRAMMAR),
        callee,
        line: start_line(node),
        arguments_count: argument_count(node, &JAVA_GRAMMAR),
        is_method_call: receiver.is_some(),
        receiver,
    })
}
