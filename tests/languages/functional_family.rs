//! Functional language family integration tests
//!
//! Tests for Elixir, Haskell, OCaml and F#.

use semantic_extract::analyze_source;

use crate::common::{
    assert_class, assert_function, assert_method, assert_no_errors, assert_symbol, class_names,
    function_names, import_modules,
};

// =============================================================================
// ELIXIR TESTS
// =============================================================================

mod elixir_tests {
    use super::*;

    #[test]
    fn test_elixir_genserver() {
        let source = r#"defmodule Counter do
  use GenServer

  def start_link(initial) do
    GenServer.start_link(__MODULE__, initial, name: __MODULE__)
  end

  defp bump(count), do: count + 1
end
"#;
        for ext in ["ex", "exs"] {
            let result = analyze_source(source, ext);
            assert_eq!(result.language, "elixir");
            assert_no_errors(&result);

            assert_eq!(import_modules(&result), vec!["GenServer"]);
            assert!(result.functions.is_empty());

            let counter = assert_class(&result, "Counter");
            let start = assert_method(counter, "start_link");
            assert_eq!(start.line_start, 4);
            assert_eq!(start.line_end, 6);
            assert_eq!(start.parameters.len(), 1);
            assert_eq!(
                assert_method(counter, "bump").visibility.as_deref(),
                Some("private")
            );

            let call = result.calls.iter().find(|c| c.callee == "start_link").unwrap();
            assert_eq!(call.receiver.as_deref(), Some("GenServer"));
            assert_eq!(call.caller_function.as_deref(), Some("start_link"));
        }
    }
}

// =============================================================================
// HASKELL TESTS
// =============================================================================

mod haskell_tests {
    use super::*;

    #[test]
    fn test_haskell_module() {
        let source = r#"module Main where

import Data.Char (toUpper)

shout :: String -> String
shout s = map toUpper s

main :: IO ()
main = putStrLn (shout "hi")
"#;
        let result = analyze_source(source, "hs");
        assert_eq!(result.language, "haskell");
        assert_eq!(import_modules(&result), vec!["Data.Char"]);
        assert_symbol(&result, "Main", "module");

        assert_eq!(function_names(&result), vec!["shout", "main"]);
        let shout = assert_function(&result, "shout");
        assert_eq!(shout.line_start, 5);
        assert_eq!(shout.return_type.as_deref(), Some("String"));
        assert_eq!(shout.parameters.len(), 1);
    }

    #[test]
    fn test_literate_haskell_extension() {
        let result = analyze_source("double x = x * 2\n", "lhs");
        assert_eq!(result.language, "haskell");
        assert_eq!(function_names(&result), vec!["double"]);
    }
}

// =============================================================================
// OCAML TESTS
// =============================================================================

mod ocaml_tests {
    use super::*;

    #[test]
    fn test_ocaml_implementation() {
        let source = r#"open Stdlib

let square x = x * x

let sum_squares xs =
  List.fold_left (fun acc x -> acc + square x) 0 xs
"#;
        let result = analyze_source(source, "ml");
        assert_eq!(result.language, "ocaml");
        assert_no_errors(&result);

        assert_eq!(import_modules(&result), vec!["Stdlib"]);
        assert_eq!(function_names(&result), vec!["square", "sum_squares"]);
        assert_eq!(assert_function(&result, "sum_squares").line_start, 5);

        let fold = result.calls.iter().find(|c| c.callee == "fold_left").unwrap();
        assert_eq!(fold.receiver.as_deref(), Some("List"));
        assert_eq!(fold.arguments_count, 3);
        assert_eq!(fold.caller_function.as_deref(), Some("sum_squares"));
    }
}

// =============================================================================
// F# TESTS
// =============================================================================

mod fsharp_tests {
    use super::*;

    #[test]
    fn test_fsharp_script_and_signature_extensions() {
        let source = r#"module Inventory

open System

type Item = { Name: string; Qty: int }

let restock (item: Item) amount =
    { item with Qty = item.Qty + amount }
"#;
        for ext in ["fs", "fsi", "fsx"] {
            let result = analyze_source(source, ext);
            assert_eq!(result.language, "fsharp");
            assert_eq!(import_modules(&result), vec!["System"]);
            assert_eq!(class_names(&result), vec!["Item"]);
            assert_symbol(&result, "Inventory", "module");

            let restock = assert_function(&result, "restock");
            assert_eq!(restock.line_start, 7);
            let params: Vec<_> = restock
                .parameters
                .iter()
                .map(|p| (p.name.as_str(), p.type_name.as_deref()))
                .collect();
            assert_eq!(params, vec![("item", Some("Item")), ("amount", None)]);
        }
    }
}
