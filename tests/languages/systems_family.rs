//! Systems language family integration tests
//!
//! Tests for C, C++, Rust, Go and Zig.

use semantic_extract::analyze_source;

use crate::common::{
    assert_call, assert_class, assert_function, assert_method, assert_no_errors, class_names,
    function_names, import_modules,
};

// =============================================================================
// GO TESTS
// =============================================================================

mod go_tests {
    use super::*;

    #[test]
    fn test_go_service_file() {
        let source = r#"package server

import (
	"fmt"
	"net/http"
)

// Handler serves requests.
type Handler struct {
	Prefix string
	hits   int
}

// ServeHTTP answers every request.
func (h *Handler) ServeHTTP(w http.ResponseWriter, r *http.Request) {
	fmt.Fprintf(w, "%s%s", h.Prefix, r.URL.Path)
}

func newHandler(prefix string) *Handler {
	return &Handler{Prefix: prefix}
}
"#;
        let result = analyze_source(source, "go");
        assert_eq!(result.language, "go");
        assert_no_errors(&result);

        assert_eq!(import_modules(&result), vec!["fmt", "net/http"]);

        let handler = assert_class(&result, "Handler");
        assert_eq!(handler.properties.len(), 2);
        let serve = assert_method(handler, "ServeHTTP");
        assert_eq!(serve.parameters.len(), 2);
        assert_eq!(serve.visibility.as_deref(), Some("public"));

        let new_handler = assert_function(&result, "newHandler");
        assert_eq!(new_handler.visibility.as_deref(), Some("private"));
        assert_eq!(new_handler.return_type.as_deref(), Some("*Handler"));

        let fprintf = result.calls.iter().find(|c| c.callee == "Fprintf").unwrap();
        assert_eq!(fprintf.receiver.as_deref(), Some("fmt"));
        assert_eq!(fprintf.arguments_count, 4);
        assert_eq!(fprintf.caller_function.as_deref(), Some("ServeHTTP"));
    }
}

// =============================================================================
// RUST TESTS
// =============================================================================

mod rust_tests {
    use super::*;

    #[test]
    fn test_rust_struct_trait_and_impl() {
        let source = r#"use std::fmt;

/// A 2D point.
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn origin() -> Self {
        Point { x: 0.0, y: 0.0 }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

fn main() {
    let p = Point::origin();
    let d = p.distance(&p);
    println!("{}", d);
}
"#;
        let result = analyze_source(source, "rs");
        assert_eq!(result.language, "rust");
        assert_no_errors(&result);

        assert_eq!(import_modules(&result), vec!["std::fmt"]);
        assert_eq!(function_names(&result), vec!["main"]);
        assert!(!assert_function(&result, "main").is_static);

        let point = assert_class(&result, "Point");
        assert_eq!(point.properties.len(), 2);
        assert!(assert_method(point, "origin").is_static);
        let distance = assert_method(point, "distance");
        assert!(!distance.is_static);
        assert_eq!(distance.return_type.as_deref(), Some("f64"));
        assert_method(point, "fmt");

        assert_call(&result, "Point::origin");
        let call = result.calls.iter().find(|c| c.callee == "distance").unwrap();
        assert!(call.is_method_call);
        assert_eq!(call.receiver.as_deref(), Some("p"));
        assert_eq!(call.caller_function.as_deref(), Some("main"));
    }
}

// =============================================================================
// C / C++ TESTS
// =============================================================================

mod c_family_tests {
    use super::*;

    #[test]
    fn test_c_header_uses_c_extractor() {
        let source = r#"#include <stddef.h>

typedef struct buffer {
    char *data;
    size_t len;
} buffer;

size_t buffer_len(const struct buffer *b);
"#;
        let result = analyze_source(source, "h");
        assert_eq!(result.language, "c");
        assert_no_errors(&result);
        assert_eq!(import_modules(&result), vec!["stddef.h"]);
        assert_eq!(class_names(&result), vec!["buffer"]);
    }

    #[test]
    fn test_c_source_functions_and_calls() {
        let source = r#"#include <stdlib.h>

static int square(int x) {
    return x * x;
}

int main(int argc, char **argv) {
    int n = atoi(argv[1]);
    return square(n);
}
"#;
        let result = analyze_source(source, "c");
        assert_no_errors(&result);
        assert_eq!(function_names(&result), vec!["square", "main"]);
        assert!(assert_function(&result, "square").is_static);
        assert_eq!(assert_function(&result, "main").parameters.len(), 2);

        let atoi = result.calls.iter().find(|c| c.callee == "atoi").unwrap();
        assert_eq!(atoi.arguments_count, 1);
        assert_eq!(atoi.caller_function.as_deref(), Some("main"));
    }

    #[test]
    fn test_cpp_extensions_share_extractor() {
        let source = "class Shape {\npublic:\n    virtual double area() const;\n};\n";
        for ext in ["cpp", "cc", "hpp"] {
            let result = analyze_source(source, ext);
            assert_eq!(result.language, "cpp");
            assert_eq!(class_names(&result), vec!["Shape"]);
        }
    }
}

// =============================================================================
// ZIG TESTS
// =============================================================================

mod zig_tests {
    use super::*;

    #[test]
    fn test_zig_through_dispatcher() {
        let source = r#"const std = @import("std");

pub const Stack = struct {
    items: []u8,
};

pub fn main() !void {
    std.debug.print("hi\n", .{});
}
"#;
        let result = analyze_source(source, "zig");
        assert_eq!(result.language, "zig");
        assert_eq!(import_modules(&result), vec!["std"]);
        assert_eq!(class_names(&result), vec!["Stack"]);

        let main = assert_function(&result, "main");
        assert_eq!(main.line_start, 7);
        assert_eq!(main.line_end, main.line_start);
        assert_eq!(main.return_type.as_deref(), Some("!void"));
        assert_eq!(main.visibility.as_deref(), Some("public"));
    }
}
