//! JavaScript language family integration tests
//!
//! Tests for JavaScript, JSX, TypeScript, TSX and the Vue/Svelte component
//! formats whose script sections are handed to the same extractors.

use semantic_extract::analyze_source;

use crate::common::{
    assert_call, assert_class, assert_function, assert_method, assert_no_errors, assert_symbol,
    function_names, import_modules,
};

// =============================================================================
// JAVASCRIPT TESTS
// =============================================================================

mod javascript_tests {
    use super::*;

    #[test]
    fn test_javascript_functions_and_arrows() {
        let source = r#"import fs from 'fs';

export function readConfig(path) {
  return JSON.parse(fs.readFileSync(path, 'utf8'));
}

const double = (x) => x * 2;
"#;
        let result = analyze_source(source, "js");
        assert_eq!(result.language, "javascript");
        assert_no_errors(&result);

        assert_eq!(function_names(&result), vec!["readConfig", "double"]);
        assert_eq!(assert_function(&result, "readConfig").line_start, 3);
        assert_eq!(import_modules(&result), vec!["fs"]);
        assert!(result.imports[0].is_default);
        assert!(result.exports.iter().any(|e| e.name == "readConfig"));

        assert_call(&result, "parse");
        let read = result
            .calls
            .iter()
            .find(|c| c.callee == "readFileSync")
            .unwrap();
        assert!(read.is_method_call);
        assert_eq!(read.receiver.as_deref(), Some("fs"));
        assert_eq!(read.arguments_count, 2);
        assert_eq!(read.caller_function.as_deref(), Some("readConfig"));
    }

    #[test]
    fn test_module_variants_share_extractor() {
        for ext in ["mjs", "cjs"] {
            let result = analyze_source("function main() {}\n", ext);
            assert_eq!(result.language, "javascript");
            assert_eq!(function_names(&result), vec!["main"]);
        }
    }

    #[test]
    fn test_jsx_component() {
        let source = r#"import React from 'react';

export default function App({ title }) {
  return <h1 className="title">{title}</h1>;
}
"#;
        let result = analyze_source(source, "jsx");
        assert_eq!(result.language, "jsx");
        assert_no_errors(&result);
        assert_eq!(function_names(&result), vec!["App"]);
        assert_eq!(import_modules(&result), vec!["react"]);
    }
}

// =============================================================================
// TYPESCRIPT TESTS
// =============================================================================

mod typescript_tests {
    use super::*;

    #[test]
    fn test_typescript_class_and_interface() {
        let source = r#"import { Injectable } from '@angular/core';

export interface Repository<T> {
  find(id: string): T;
}

export class UserRepo implements Repository<User> {
  private cache: Map<string, User> = new Map();

  find(id: string): User {
    return this.cache.get(id);
  }
}
"#;
        let result = analyze_source(source, "ts");
        assert_eq!(result.language, "typescript");
        assert_no_errors(&result);

        assert_eq!(import_modules(&result), vec!["@angular/core"]);
        assert_eq!(result.imports[0].symbols, vec!["Injectable"]);

        let repo = assert_class(&result, "UserRepo");
        let find = assert_method(repo, "find");
        assert_eq!(find.return_type.as_deref(), Some("User"));
        assert_eq!(find.parameters[0].type_name.as_deref(), Some("string"));
        assert_eq!(repo.properties[0].name, "cache");
        assert_eq!(repo.properties[0].visibility.as_deref(), Some("private"));

        assert_class(&result, "Repository");
        assert!(result.functions.is_empty());
    }

    #[test]
    fn test_tsx_uses_typescript_grammar() {
        let source = r#"type Props = { label: string };

export const Button = ({ label }: Props) => <button>{label}</button>;
"#;
        let result = analyze_source(source, "tsx");
        assert_eq!(result.language, "tsx");
        assert_no_errors(&result);
        assert_eq!(function_names(&result), vec!["Button"]);
        assert!(result.exports.iter().any(|e| e.name == "Button"));
    }
}

// =============================================================================
// COMPONENT FORMAT TESTS
// =============================================================================

mod component_tests {
    use super::*;

    #[test]
    fn test_vue_script_lines_are_absolute() {
        // Script content starts on line 4; `greet` is on its second line
        let source = "<template>\n  <div/>\n</template>\n<script>\nfunction greet(name) {}\n</script>\n";
        let result = analyze_source(source, "vue");
        assert_eq!(result.language, "vue");
        let greet = assert_function(&result, "greet");
        assert_eq!(greet.line_start, 5);
        assert_eq!(greet.parameters.len(), 1);
    }

    #[test]
    fn test_vue_typescript_setup_and_template() {
        let source = r#"<script setup lang="ts">
import { ref } from 'vue';
import TodoItem from './TodoItem.vue';

const todos = ref<string[]>([]);

function addTodo(text: string): void {
  todos.value.push(text);
}
</script>

<template>
  <ul>
    <TodoItem v-for="t in todos" :key="t" @remove="addTodo" />
  </ul>
</template>
"#;
        let result = analyze_source(source, "vue");
        assert_eq!(result.language, "vue");

        assert_eq!(import_modules(&result), vec!["vue", "./TodoItem.vue"]);
        assert_eq!(result.imports[0].line, 2);

        let add = assert_function(&result, "addTodo");
        assert_eq!(add.line_start, 7);
        assert_eq!(add.parameters[0].type_name.as_deref(), Some("string"));

        assert_symbol(&result, "TodoItem", "component");
        assert_symbol(&result, "v-for", "directive");
        assert_symbol(&result, ":key", "directive");
        assert_symbol(&result, "@remove", "directive");
        let item = result.symbols.iter().find(|s| s.name == "TodoItem").unwrap();
        assert_eq!(item.line, 14);
    }

    #[test]
    fn test_svelte_script_and_style() {
        let source = r#"<script lang="ts">
  export let name: string;
  function shout(): string { return name.toUpperCase(); }
</script>

<h1>{shout()}</h1>

<style>
  h1 { color: purple; }
</style>
"#;
        let result = analyze_source(source, "svelte");
        assert_eq!(result.language, "svelte");
        assert_eq!(assert_function(&result, "shout").line_start, 3);
        let h1 = result
            .symbols
            .iter()
            .find(|s| s.name == "h1" && s.kind == "selector")
            .unwrap();
        assert_eq!(h1.line, 9);
    }
}
