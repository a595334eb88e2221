//! JVM language family integration tests
//!
//! Tests for Java, Kotlin, Scala, Groovy and Clojure.

use semantic_extract::analyze_source;

use crate::common::{
    assert_class, assert_function, assert_method, assert_no_errors, assert_symbol,
    class_names, function_names, import_modules,
};

// =============================================================================
// JAVA TESTS
// =============================================================================

mod java_tests {
    use super::*;

    #[test]
    fn test_java_controller() {
        let source = r#"package com.example.web;

import java.util.Optional;
import org.springframework.web.bind.annotation.GetMapping;

public class OrderController extends BaseController {
    private final OrderService service;

    public OrderController(OrderService service) {
        this.service = service;
    }

    @GetMapping("/orders")
    public Optional<Order> show(long id) {
        audit("show", id);
        return service.findById(id);
    }

    private static void audit(String action, long id) {}
}
"#;
        let result = analyze_source(source, "java");
        assert_eq!(result.language, "java");
        assert_no_errors(&result);
        assert!(result.functions.is_empty());

        assert_eq!(
            import_modules(&result),
            vec![
                "java.util.Optional",
                "org.springframework.web.bind.annotation.GetMapping"
            ]
        );

        let controller = assert_class(&result, "OrderController");
        assert_eq!(controller.extends.as_deref(), Some("BaseController"));
        assert_eq!(controller.properties[0].name, "service");

        let show = assert_method(controller, "show");
        assert_eq!(show.return_type.as_deref(), Some("Optional<Order>"));
        assert_eq!(show.parameters[0].type_name.as_deref(), Some("long"));
        assert!(assert_method(controller, "audit").is_static);

        let find = result.calls.iter().find(|c| c.callee == "findById").unwrap();
        assert_eq!(find.receiver.as_deref(), Some("service"));
        assert_eq!(find.caller_function.as_deref(), Some("show"));

        let audit = result.calls.iter().find(|c| c.callee == "audit").unwrap();
        assert_eq!(audit.arguments_count, 2);
        assert!(!audit.is_method_call);
    }
}

// =============================================================================
// KOTLIN TESTS
// =============================================================================

mod kotlin_tests {
    use super::*;

    #[test]
    fn test_kotlin_methods_reported_as_functions() {
        let source = r#"import kotlinx.serialization.Serializable

class Cart(private val items: MutableList<Item>) : Collection<Item> {
    fun total(): Int {
        return items.sumOf { it.price }
    }

    internal fun clear() = items.clear()
}
"#;
        let result = analyze_source(source, "kt");
        assert_eq!(result.language, "kotlin");
        assert_eq!(import_modules(&result), vec!["kotlinx.serialization.Serializable"]);

        let cart = assert_class(&result, "Cart");
        assert_eq!(cart.line_start, 3);
        assert_eq!(cart.extends.as_deref(), Some("Collection"));

        assert_eq!(function_names(&result), vec!["total", "clear"]);
        assert_eq!(assert_function(&result, "total").return_type.as_deref(), Some("Int"));
        assert_eq!(
            assert_function(&result, "clear").visibility.as_deref(),
            Some("internal")
        );
    }

    #[test]
    fn test_kotlin_script_extension() {
        let result = analyze_source("plugins {\n}\nfun configure() {}\n", "kts");
        assert_eq!(result.language, "kotlin");
        assert_eq!(assert_function(&result, "configure").line_start, 3);
    }
}

// =============================================================================
// SCALA TESTS
// =============================================================================

mod scala_tests {
    use super::*;

    #[test]
    fn test_scala_case_class_and_object() {
        let source = r#"import scala.concurrent.Future

case class Account(id: Long, owner: String)

object Bank {
  def open(owner: String): Account = {
    val id = nextId()
    Account(id, owner)
  }
}
"#;
        let result = analyze_source(source, "scala");
        assert_eq!(result.language, "scala");
        assert_no_errors(&result);

        assert_eq!(import_modules(&result), vec!["scala.concurrent.Future"]);
        assert_eq!(class_names(&result), vec!["Account", "Bank"]);
        assert_eq!(assert_class(&result, "Account").properties.len(), 2);

        let open = assert_method(assert_class(&result, "Bank"), "open");
        assert_eq!(open.return_type.as_deref(), Some("Account"));
        assert!(result.functions.is_empty());

        let next = result.calls.iter().find(|c| c.callee == "nextId").unwrap();
        assert_eq!(next.caller_function.as_deref(), Some("open"));
    }
}

// =============================================================================
// GROOVY TESTS
// =============================================================================

mod groovy_tests {
    use super::*;

    #[test]
    fn test_groovy_build_script() {
        let source = r#"import groovy.transform.CompileStatic

@CompileStatic
class Release {
    static final String VERSION = "1.0"

    String tag(String prefix) {
        return prefix + VERSION
    }
}
"#;
        let result = analyze_source(source, "groovy");
        assert_eq!(result.language, "groovy");
        assert_eq!(import_modules(&result), vec!["groovy.transform.CompileStatic"]);
        assert_eq!(class_names(&result), vec!["Release"]);

        let tag = assert_function(&result, "tag");
        assert_eq!(tag.line_start, 7);
        assert_eq!(tag.return_type.as_deref(), Some("String"));
        assert_symbol(&result, "VERSION", "constant");
    }
}

// =============================================================================
// CLOJURE TESTS
// =============================================================================

mod clojure_tests {
    use super::*;

    #[test]
    fn test_clojure_namespace_and_defns() {
        let source = r#"(ns shop.cart
  (:require [clojure.set :as set]))

(defn add-item
  [cart item]
  (conj cart item))

(defmulti price :kind)
"#;
        for ext in ["clj", "cljs", "cljc"] {
            let result = analyze_source(source, ext);
            assert_eq!(result.language, "clojure");
            assert_eq!(import_modules(&result), vec!["clojure.set"]);
            assert_symbol(&result, "shop.cart", "namespace");

            let add = assert_function(&result, "add-item");
            assert_eq!(add.line_start, 4);
            assert_eq!(add.parameters.len(), 2);
        }
    }

    #[test]
    fn test_edn_is_clojure() {
        let result = analyze_source("{:port 8080}\n", "edn");
        assert_eq!(result.language, "clojure");
        assert!(result.functions.is_empty());
        assert!(result.calls.is_empty());
    }
}
