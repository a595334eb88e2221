//! Data language family integration tests
//!
//! Tests for SQL and YAML, plus the recognized-only JSON and TOML.

use semantic_extract::analyze_source;

use crate::common::{assert_no_errors, assert_symbol};

#[test]
fn test_sql_migration() {
    let source = r#"-- 001_init.sql
CREATE TABLE orders (
    id SERIAL PRIMARY KEY,
    customer_id INT NOT NULL
);

CREATE INDEX idx_orders_customer ON orders (customer_id);

CREATE FUNCTION order_total(oid INT) RETURNS NUMERIC AS $$
    SELECT SUM(amount) FROM order_lines WHERE order_id = oid;
$$ LANGUAGE sql;

insert into orders (customer_id) values (7);
"#;
    let result = analyze_source(source, "sql");
    assert_eq!(result.language, "sql");
    assert!(result.functions.is_empty());

    let symbols: Vec<_> = result
        .symbols
        .iter()
        .map(|s| (s.name.as_str(), s.kind.as_str(), s.line))
        .collect();
    assert_eq!(
        symbols,
        vec![
            ("orders", "table", 2),
            ("idx_orders_customer", "index", 7),
            ("order_total", "function", 9)
        ]
    );

    let calls: Vec<_> = result
        .calls
        .iter()
        .map(|c| (c.callee.as_str(), c.receiver.as_deref(), c.line))
        .collect();
    assert_eq!(
        calls,
        vec![
            ("SELECT", Some("order_lines"), 10),
            ("INSERT", Some("orders"), 13)
        ]
    );
    assert!(result.calls.iter().all(|c| c.caller_function.is_none()));
}

#[test]
fn test_yaml_workflow() {
    let source = r#"name: ci
on:
  push:
    branches: [main]
jobs:
  test:
    runs-on: ubuntu-latest
"#;
    for ext in ["yaml", "yml"] {
        let result = analyze_source(source, ext);
        assert_eq!(result.language, "yaml");
        assert_no_errors(&result);

        let keys: Vec<_> = result.symbols.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            keys,
            vec!["name", "on", "push", "branches", "jobs", "test", "runs-on"]
        );
        assert_symbol(&result, "runs-on", "key");
        assert_eq!(result.symbols[6].line, 7);
    }
}

#[test]
fn test_json_and_toml_are_recognized_only() {
    for (ext, id) in [("json", "json"), ("toml", "toml")] {
        let result = analyze_source("{}", ext);
        assert_eq!(result.language, id);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].line, 0);
        assert_eq!(result.errors[0].column, 0);
    }
}
