//! Wire schema for analysis requests and results
//!
//! Field names and order are a compatibility contract with callers. Optional
//! text fields are omitted when absent; collections are always emitted, even
//! when empty.

use serde::{Deserialize, Serialize};

use crate::error::ExtractError;

/// One analysis request, as read from the transport
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisRequest {
    /// Advisory only; never used for language detection
    pub filename: String,
    pub content: String,
    /// File extension without the leading dot
    pub extension: String,
}

/// Normalized inventory of one source file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResult {
    pub language: String,
    pub functions: Vec<Function>,
    pub classes: Vec<TypeDef>,
    pub imports: Vec<Import>,
    pub exports: Vec<Export>,
    pub calls: Vec<Call>,
    pub symbols: Vec<Symbol>,
    pub errors: Vec<SyntaxError>,
}

impl AnalysisResult {
    /// Empty result for a language
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..Default::default()
        }
    }

    /// Minimal result carrying a single diagnostic for `err`
    pub fn from_error(language: impl Into<String>, err: &ExtractError) -> Self {
        let mut result = Self::new(language);
        result.errors.push(SyntaxError::unpositioned(err.to_string()));
        result
    }

    /// Shift every line-bearing entity by `offset` lines
    pub fn rebase_lines(&mut self, offset: usize) {
        if offset == 0 {
            return;
        }
        for func in &mut self.functions {
            func.rebase(offset);
        }
        for class in &mut self.classes {
            class.line_start += offset;
            class.line_end += offset;
            for method in &mut class.methods {
                method.rebase(offset);
            }
        }
        for import in &mut self.imports {
            import.line += offset;
        }
        for export in &mut self.exports {
            export.line += offset;
        }
        for call in &mut self.calls {
            call.line += offset;
        }
        for symbol in &mut self.symbols {
            symbol.line += offset;
        }
        for error in self.errors.iter_mut().filter(|e| e.line > 0) {
            error.line += offset;
        }
    }

    /// Append every entity of `other`, keeping this result's language
    pub fn merge(&mut self, other: AnalysisResult) {
        self.functions.extend(other.functions);
        self.classes.extend(other.classes);
        self.imports.extend(other.imports);
        self.exports.extend(other.exports);
        self.calls.extend(other.calls);
        self.symbols.extend(other.symbols);
        self.errors.extend(other.errors);
    }
}

/// A declared function, method or closure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Function {
    /// Empty for anonymous closures
    pub name: String,
    pub line_start: usize,
    pub line_end: usize,
    pub parameters: Vec<Parameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    pub is_async: bool,
    pub is_static: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docstring: Option<String>,
}

impl Function {
    pub fn new(name: impl Into<String>, line_start: usize, line_end: usize) -> Self {
        Self {
            name: name.into(),
            line_start,
            line_end,
            ..Default::default()
        }
    }

    fn rebase(&mut self, offset: usize) {
        self.line_start += offset;
        self.line_end += offset;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

impl Parameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: None,
        }
    }

    pub fn typed(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: non_empty(type_name.into()),
        }
    }
}

/// Class, struct, interface, trait, record or module: one shape for all
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeDef {
    pub name: String,
    pub line_start: usize,
    pub line_end: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    pub implements: Vec<String>,
    pub methods: Vec<Function>,
    pub properties: Vec<Property>,
}

impl TypeDef {
    pub fn new(name: impl Into<String>, line_start: usize, line_end: usize) -> Self {
        Self {
            name: name.into(),
            line_start,
            line_end,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Property {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Import {
    pub module: String,
    /// Empty for whole-module imports
    pub symbols: Vec<String>,
    pub line: usize,
    pub is_default: bool,
}

impl Import {
    pub fn module(module: impl Into<String>, line: usize) -> Self {
        Self {
            module: module.into(),
            line,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Export {
    /// `"default"` marks an unnamed default export
    pub name: String,
    pub line: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Call {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caller_function: Option<String>,
    pub callee: String,
    pub line: usize,
    pub arguments_count: usize,
    pub is_method_call: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Symbol {
    pub name: String,
    /// Free-form per language: `variable`, `selector`, `component`, `key`, ...
    pub kind: String,
    pub line: usize,
}

impl Symbol {
    pub fn new(name: impl Into<String>, kind: &str, line: usize) -> Self {
        Self {
            name: name.into(),
            kind: kind.to_string(),
            line,
        }
    }
}

/// A syntax defect, or a diagnostic not tied to a position (line 0)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntaxError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl SyntaxError {
    pub fn unpositioned(message: impl Into<String>) -> Self {
        Self {
            line: 0,
            column: 0,
            message: message.into(),
        }
    }
}

/// `Some(s)` unless `s` is blank
pub fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
