//! Invariants that hold across every registered language

use semantic_extract::{analyze_source, supported_languages, AnalysisResult, REGISTRY};

use crate::common::{assert_collections_are_arrays, assert_function, function_names};

/// A small, syntactically valid source per language id
fn minimal_fixture(language: &str) -> Option<&'static str> {
    let source = match language {
        "php" => "<?php\nfunction f() {}\n",
        "javascript" => "function f() {}\n",
        "jsx" => "const App = () => <div />;\n",
        "typescript" => "function f(x: number): number { return x; }\n",
        "tsx" => "const App = (): number => 1;\n",
        "python" => "def f():\n    pass\n",
        "go" => "package main\n\nfunc main() {}\n",
        "rust" => "fn main() {}\n",
        "java" => "class A {}\n",
        "kotlin" => "fun main() {}\n",
        "csharp" => "class A {}\n",
        "ruby" => "def f\nend\n",
        "swift" => "func f() {}\n",
        "c" => "int main(void) { return 0; }\n",
        "cpp" => "int main() { return 0; }\n",
        "vue" => "<template>\n  <div></div>\n</template>\n<script>\nexport default {};\n</script>\n",
        "svelte" => "<script>\n  let count = 1;\n</script>\n<p>{count}</p>\n",
        "html" => "<p>hi</p>\n",
        "css" => "p { color: red; }\n",
        "scss" => "$gap: 4px;\n",
        "sql" => "SELECT 1;\n",
        "yaml" => "key: value\n",
        "bash" => "echo hi\n",
        "scala" => "object Main\n",
        "groovy" => "def f() {}\n",
        "clojure" => "(defn f [x] x)\n",
        "elixir" => "defmodule A do\nend\n",
        "haskell" => "f x = x\n",
        "ocaml" => "let f x = x\n",
        "fsharp" => "let f x = x\n",
        "lua" => "local x = 1\n",
        "perl" => "sub f { 1 }\n",
        "r" => "f <- function(x) x\n",
        "julia" => "f(x) = x\n",
        "dart" => "void main() {}\n",
        "objc" => "@interface A : NSObject\n@end\n",
        "zig" => "pub fn main() void {}\n",
        _ => return None,
    };
    Some(source)
}

fn to_json(result: &AnalysisResult) -> String {
    serde_json::to_string(result).expect("result serializes")
}

#[test]
fn test_every_registered_language_has_clean_minimal_fixture() {
    for row in supported_languages() {
        if !REGISTRY.contains_key(row.language) {
            continue;
        }
        let source = minimal_fixture(row.language)
            .unwrap_or_else(|| panic!("no fixture for {}", row.language));
        let result = analyze_source(source, row.extensions[0]);
        assert_eq!(result.language, row.language);
        assert!(
            result.errors.is_empty(),
            "{} fixture reported {:?}",
            row.language,
            result.errors
        );
    }
}

#[test]
fn test_output_is_deterministic() {
    for row in supported_languages() {
        let source = minimal_fixture(row.language).unwrap_or("x");
        let ext = row.extensions[0];
        let first = to_json(&analyze_source(source, ext));
        let second = to_json(&analyze_source(source, ext));
        assert_eq!(first, second, "{} output differs between runs", row.language);
    }
}

#[test]
fn test_extension_mapping_is_stable() {
    for row in supported_languages() {
        for ext in row.extensions {
            for _ in 0..2 {
                assert_eq!(analyze_source("", ext).language, row.language);
            }
        }
    }
    assert_eq!(analyze_source("", "r").language, analyze_source("", "R").language);
    // Only explicitly registered case variants map
    assert_eq!(analyze_source("", "PY").language, "unknown");
}

#[test]
fn test_collections_serialize_as_arrays() {
    for (source, ext) in [("", "go"), ("", "xyz"), ("{}", "json"), ("x", "sql")] {
        let value = serde_json::to_value(analyze_source(source, ext)).unwrap();
        assert_collections_are_arrays(&value);
    }
}

#[test]
fn test_go_example() {
    let result = analyze_source("package main\nfunc Foo(a int) {}\n", "go");
    assert!(result.errors.is_empty());
    assert_eq!(result.functions.len(), 1);
    let foo = assert_function(&result, "Foo");
    assert_eq!(foo.parameters.len(), 1);
    assert_eq!(foo.parameters[0].name, "a");
}

#[test]
fn test_python_example() {
    let result = analyze_source("def add(x, y):\n    return x + y\n", "py");
    assert_eq!(function_names(&result), vec!["add"]);
    let params: Vec<_> = result.functions[0]
        .parameters
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(params, vec!["x", "y"]);
}

#[test]
fn test_component_lines_are_rebased() {
    // The script body starts on document line 4
    let source = "<template>\n  <p>hi</p>\n</template>\n<script>\nfunction second() {}\n</script>\n";
    for ext in ["vue", "svelte"] {
        let result = analyze_source(source, ext);
        assert_eq!(assert_function(&result, "second").line_start, 4 + 2 - 1);
    }
}

/// Slice a function's own lines out of `source` and analyze them alone
fn reextract(source: &str, ext: &str) {
    let result = analyze_source(source, ext);
    assert!(!result.functions.is_empty(), "no functions in {} fixture", ext);

    let lines: Vec<&str> = source.lines().collect();
    for func in &result.functions {
        let region = lines[func.line_start - 1..func.line_end].join("\n") + "\n";
        let again = analyze_source(&region, ext);
        let found = assert_function(&again, &func.name);
        assert_eq!(
            found.parameters.len(),
            func.parameters.len(),
            "parameter count of {} changed",
            func.name
        );
    }
}

#[test]
fn test_function_regions_reextract() {
    reextract(
        "import os\n\ndef join(a, b):\n    return os.path.join(a, b)\n\n\ndef noop():\n    pass\n",
        "py",
    );
    reextract(
        "package main\n\nfunc Add(a, b int) int {\n\treturn a + b\n}\n\nfunc Zero() int { return 0 }\n",
        "go",
    );
    reextract(
        "use std::io;\n\nfn read(path: &str, limit: usize) -> io::Result<()> {\n    Ok(())\n}\n",
        "rs",
    );
    reextract("local function clamp(x, lo, hi)\n  return x\nend\n", "lua");
    reextract("fun scale(x: Int, k: Int): Int = x * k\n", "kt");
    reextract("sub total($a, $b) {\n    return $a + $b;\n}\n", "pl");
}
