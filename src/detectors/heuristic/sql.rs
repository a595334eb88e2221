//! SQL detector (heuristic)
//!
//! DDL statements become symbols; DML statements become calls whose
//! receiver is the table they touch. Keywords match case-insensitively and
//! identifiers may be quoted with `"` or backticks.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{group, line_at, match_line, rule};
use crate::schema::{AnalysisResult, Call, Symbol};

/// Optionally quoted identifier, possibly schema-qualified
const IDENT: &str = r#"["`\[]?(?:\w+["`\]]?\.["`\[]?)?(?P<name>\w+)["`\]]?"#;

static DEFINITIONS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    [
        ("table", r"CREATE\s+(?:TEMP(?:ORARY)?\s+)?TABLE\s+(?:IF\s+NOT\s+EXISTS\s+)?"),
        ("index", r"CREATE\s+(?:UNIQUE\s+)?INDEX\s+(?:CONCURRENTLY\s+)?(?:IF\s+NOT\s+EXISTS\s+)?"),
        ("view", r"CREATE\s+(?:OR\s+REPLACE\s+)?(?:MATERIALIZED\s+)?VIEW\s+(?:IF\s+NOT\s+EXISTS\s+)?"),
        ("function", r"CREATE\s+(?:OR\s+REPLACE\s+)?(?:FUNCTION|PROCEDURE)\s+"),
        ("trigger", r"CREATE\s+(?:OR\s+REPLACE\s+)?TRIGGER\s+"),
    ]
    .into_iter()
    .map(|(kind, prefix)| (kind, rule(&format!(r"(?i)\b{prefix}{IDENT}"))))
    .collect()
});

static SELECT: Lazy<Regex> = Lazy::new(|| rule(r"(?i)\bSELECT\b"));

static FROM_TABLE: Lazy<Regex> = Lazy::new(|| rule(&format!(r"(?i)\bFROM\s+{IDENT}")));

static MUTATIONS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    [
        ("INSERT", r"INSERT\s+INTO\s+"),
        ("UPDATE", r"UPDATE\s+"),
        ("DELETE", r"DELETE\s+FROM\s+"),
    ]
    .into_iter()
    .map(|(verb, prefix)| (verb, rule(&format!(r"(?i)\b{prefix}{IDENT}"))))
    .collect()
});

/// Extract semantic information from SQL source
pub fn extract(result: &mut AnalysisResult, source: &str) {
    for (kind, rule) in DEFINITIONS.iter() {
        for caps in rule.captures_iter(source) {
            if let Some(name) = group(&caps, "name") {
                result
                    .symbols
                    .push(Symbol::new(name, kind, match_line(source, &caps)));
            }
        }
    }
    result.symbols.sort_by_key(|s| s.line);

    let mut calls = Vec::new();
    for select in SELECT.find_iter(source) {
        let table = select_table(&source[select.end()..]);
        calls.push(statement_call("SELECT", table.as_deref(), line_at(source, select.start())));
    }
    for (verb, rule) in MUTATIONS.iter() {
        for caps in rule.captures_iter(source) {
            calls.push(statement_call(verb, group(&caps, "name"), match_line(source, &caps)));
        }
    }
    calls.sort_by_key(|c| c.line);
    result.calls.extend(calls);
}

/// Table named by the first `FROM` of the SELECT whose remaining text is
/// `rest`, or `None` for `SELECT 1`.
///
/// Parenthesized subqueries are blanked out. The scan stops at `;`, at the
/// paren closing an enclosing subquery, or at the next top-level SELECT.
fn select_table(rest: &str) -> Option<String> {
    let mut depth = 0usize;
    let mut visible = String::with_capacity(rest.len());
    for ch in rest.chars() {
        match ch {
            ';' if depth == 0 => break,
            ')' if depth == 0 => break,
            '(' => {
                depth += 1;
                visible.push(' ');
            }
            ')' => {
                depth -= 1;
                visible.push(' ');
            }
            _ if depth > 0 => visible.push(' '),
            _ => visible.push(ch),
        }
    }

    let end = SELECT.find(&visible).map_or(visible.len(), |m| m.start());
    let caps = FROM_TABLE.captures(&visible[..end])?;
    group(&caps, "name").map(str::to_string)
}

fn statement_call(verb: &str, table: Option<&str>, line: usize) -> Call {
    Call {
        caller_function: None,
        callee: verb.to_string(),
        line,
        arguments_count: 0,
        is_method_call: false,
        receiver: table.map(str::to_string),
    }
}
