//! Truncated sources, empty input and unknown extensions

use semantic_extract::analyze_source;

use crate::common::{assert_function, function_names};

#[test]
fn test_unknown_extension() {
    let result = analyze_source("fn main() {}", "xyz");
    assert_eq!(result.language, "unknown");
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].message.contains("xyz"));
    assert!(result.functions.is_empty());
}

#[test]
fn test_empty_extension_is_unknown() {
    let result = analyze_source("print('hi')", "");
    assert_eq!(result.language, "unknown");
    assert_eq!(result.errors.len(), 1);
}

#[test]
fn test_truncated_python_keeps_earlier_functions() {
    let source = "def ok(a):\n    return a\n\ndef broken(:\n";
    let result = analyze_source(source, "py");
    assert_eq!(result.language, "python");
    assert!(!result.errors.is_empty());
    assert!(result.errors.iter().all(|e| e.line >= 1 && e.column >= 1));
    assert_eq!(assert_function(&result, "ok").parameters.len(), 1);
}

#[test]
fn test_unterminated_brace() {
    let source = "function good(a, b) {\n  return a + b;\n}\n\nfunction bad(x) {\n  if (x) {\n";
    let result = analyze_source(source, "js");
    assert!(!result.errors.is_empty());
    assert!(result.errors.iter().all(|e| e.line >= 1 && e.column >= 1));
    let good = assert_function(&result, "good");
    assert_eq!(good.line_start, 1);
    assert_eq!(good.line_end, 3);
}

#[test]
fn test_unterminated_go_function() {
    let source = "package main\n\nfunc Done() {}\n\nfunc Open(a int {\n";
    let result = analyze_source(source, "go");
    assert!(!result.errors.is_empty());
    assert!(function_names(&result).contains(&"Done"));
}

#[test]
fn test_empty_source_is_clean() {
    for ext in ["go", "py", "rs", "ts", "vue", "sql", "kt"] {
        let result = analyze_source("", ext);
        assert!(result.errors.is_empty(), "{} reported {:?}", ext, result.errors);
        assert!(result.functions.is_empty());
    }
}

#[test]
fn test_heuristic_extractors_never_report_errors() {
    // Regex backends have no notion of a syntax error
    let garbage = "}}}} ((( fun fun( def def( @@@ \n\t\u{0}";
    for ext in ["kt", "groovy", "clj", "dart", "fs", "hs", "jl", "m", "pl", "r", "sql", "zig"] {
        let result = analyze_source(garbage, ext);
        assert!(result.errors.is_empty(), "{} reported {:?}", ext, result.errors);
    }
}

#[test]
fn test_component_without_sections() {
    let result = analyze_source("<div>static</div>\n", "svelte");
    assert_eq!(result.language, "svelte");
    assert!(result.functions.is_empty());
    assert!(result.errors.is_empty());
}

#[test]
fn test_non_ascii_source() {
    let source = "def grüße(名前):\n    return 名前\n";
    let result = analyze_source(source, "py");
    assert_eq!(function_names(&result), vec!["grüße"]);
    assert_eq!(result.functions[0].parameters[0].name, "名前");
}
