//! Custom assertions for integration tests
//!
//! Helpers for checking extracted entities and the JSON wire shape.

use serde_json::Value;

use semantic_extract::{AnalysisResult, Function, TypeDef};

/// Assert that output is valid JSON and return parsed value
pub fn assert_valid_json(output: &str, context: &str) -> Value {
    serde_json::from_str(output).unwrap_or_else(|e| {
        panic!(
            "Expected valid JSON ({}): {}\nOutput:\n{}",
            context, e, output
        )
    })
}

/// Assert that every collection of a serialized result is an array
pub fn assert_collections_are_arrays(json: &Value) {
    for key in [
        "functions", "classes", "imports", "exports", "calls", "symbols", "errors",
    ] {
        assert!(
            json[key].is_array(),
            "Expected '{}' to be an array in:\n{}",
            key,
            json
        );
    }
}

/// Names of the top-level functions, in order
pub fn function_names(result: &AnalysisResult) -> Vec<&str> {
    result.functions.iter().map(|f| f.name.as_str()).collect()
}

/// Names of the types, in order
pub fn class_names(result: &AnalysisResult) -> Vec<&str> {
    result.classes.iter().map(|c| c.name.as_str()).collect()
}

/// Imported modules, in order
pub fn import_modules(result: &AnalysisResult) -> Vec<&str> {
    result.imports.iter().map(|i| i.module.as_str()).collect()
}

/// Assert that a top-level function exists and return it
pub fn assert_function<'a>(result: &'a AnalysisResult, name: &str) -> &'a Function {
    result
        .functions
        .iter()
        .find(|f| f.name == name)
        .unwrap_or_else(|| {
            panic!(
                "Expected function '{}' in {:?}",
                name,
                function_names(result)
            )
        })
}

/// Assert that a type exists and return it
pub fn assert_class<'a>(result: &'a AnalysisResult, name: &str) -> &'a TypeDef {
    result
        .classes
        .iter()
        .find(|c| c.name == name)
        .unwrap_or_else(|| panic!("Expected type '{}' in {:?}", name, class_names(result)))
}

/// Assert that a method exists on a type and return it
pub fn assert_method<'a>(class: &'a TypeDef, name: &str) -> &'a Function {
    class
        .methods
        .iter()
        .find(|m| m.name == name)
        .unwrap_or_else(|| panic!("Expected method '{}' on '{}'", name, class.name))
}

/// Assert that some call site targets `callee`
pub fn assert_call(result: &AnalysisResult, callee: &str) {
    assert!(
        result.calls.iter().any(|c| c.callee == callee),
        "Expected a call to '{}' in {:?}",
        callee,
        result.calls.iter().map(|c| c.callee.as_str()).collect::<Vec<_>>()
    );
}

/// Assert that a symbol of `kind` named `name` exists
pub fn assert_symbol(result: &AnalysisResult, name: &str, kind: &str) {
    assert!(
        result.symbols.iter().any(|s| s.name == name && s.kind == kind),
        "Expected {} symbol '{}' in {:?}",
        kind,
        name,
        result
            .symbols
            .iter()
            .map(|s| (s.name.as_str(), s.kind.as_str()))
            .collect::<Vec<_>>()
    );
}

/// Assert a clean parse
pub fn assert_no_errors(result: &AnalysisResult) {
    assert!(
        result.errors.is_empty(),
        "Expected no errors for {}, got {:?}",
        result.language,
        result.errors
    );
}
