//! Markup language family integration tests
//!
//! Tests for HTML, CSS and SCSS, plus the recognized-only Markdown and XML.

use semantic_extract::analyze_source;

use crate::common::{assert_no_errors, assert_symbol, import_modules};

#[test]
fn test_html_page() {
    let source = r#"<!doctype html>
<html lang="en">
  <head>
    <link rel="stylesheet" href="styles/site.css">
    <script type="module" src="/js/main.js"></script>
  </head>
  <body>
    <nav id="top" class="nav sticky"></nav>
  </body>
</html>
"#;
    for ext in ["html", "htm"] {
        let result = analyze_source(source, ext);
        assert_eq!(result.language, "html");
        assert_no_errors(&result);
        assert!(result.functions.is_empty());
        assert!(result.calls.is_empty());

        assert_eq!(import_modules(&result), vec!["styles/site.css", "/js/main.js"]);
        assert_symbol(&result, "top", "id");
        assert_symbol(&result, "nav", "class");
        assert_symbol(&result, "sticky", "class");
        assert!(result.symbols.iter().all(|s| s.line == 8));
    }
}

#[test]
fn test_css_stylesheet() {
    let source = r#"@import "base.css";

:root {
  --gap: 8px;
}

.card > .title,
#sidebar {
  margin: var(--gap);
}
"#;
    let result = analyze_source(source, "css");
    assert_eq!(result.language, "css");
    assert_no_errors(&result);

    assert_eq!(import_modules(&result), vec!["base.css"]);
    assert_symbol(&result, "--gap", "variable");
    assert_symbol(&result, ".card > .title", "class");
    assert_symbol(&result, "#sidebar", "id");
    assert_symbol(&result, ":root", "selector");

    let sidebar = result.symbols.iter().find(|s| s.name == "#sidebar").unwrap();
    assert_eq!(sidebar.line, 8);
}

#[test]
fn test_scss_and_sass_extensions() {
    let source = "@use \"config\";\n$radius: 4px;\n.btn {\n  border-radius: $radius;\n}\n";
    for ext in ["scss", "sass"] {
        let result = analyze_source(source, ext);
        assert_eq!(result.language, "scss");
        assert_eq!(import_modules(&result), vec!["config"]);
        assert_symbol(&result, "$radius", "variable");
        assert_symbol(&result, ".btn", "class");
    }
}

#[test]
fn test_markdown_and_xml_are_recognized_only() {
    for (ext, id) in [("md", "markdown"), ("markdown", "markdown"), ("xml", "xml")] {
        let result = analyze_source("# Title\n", ext);
        assert_eq!(result.language, id);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(
            result.errors[0].message,
            format!("language not yet implemented: {}", id)
        );
        assert!(result.symbols.is_empty());
    }
}
