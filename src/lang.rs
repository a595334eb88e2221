//! Language detection and tree-sitter grammar loading

use std::fmt;
use std::path::Path;
use tree_sitter::Language;

use crate::error::{ExtractError, Result};

/// Languages with a canonical identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Lang {
    Php,
    JavaScript,
    Jsx,
    TypeScript,
    Tsx,
    Python,
    Go,
    Rust,
    Java,
    Kotlin,
    CSharp,
    Ruby,
    Swift,
    C,
    Cpp,
    /// Vue Single File Component (.vue)
    Vue,
    /// Svelte component (.svelte)
    Svelte,
    Html,
    Css,
    Scss,
    Sql,
    Yaml,
    /// Shell/Bash scripts
    Bash,
    Scala,
    Groovy,
    Clojure,
    Elixir,
    Haskell,
    OCaml,
    FSharp,
    Lua,
    Perl,
    R,
    Julia,
    Dart,
    ObjC,
    Zig,
    // Recognized, but nothing is extracted from them yet
    Json,
    Toml,
    Markdown,
    Xml,
}

impl Lang {
    /// Every language, in extension-table order
    pub const ALL: &'static [Lang] = &[
        Self::Php,
        Self::JavaScript,
        Self::Jsx,
        Self::TypeScript,
        Self::Tsx,
        Self::Python,
        Self::Go,
        Self::Rust,
        Self::Java,
        Self::Kotlin,
        Self::CSharp,
        Self::Ruby,
        Self::Swift,
        Self::C,
        Self::Cpp,
        Self::Vue,
        Self::Svelte,
        Self::Html,
        Self::Css,
        Self::Scss,
        Self::Sql,
        Self::Yaml,
        Self::Bash,
        Self::Scala,
        Self::Groovy,
        Self::Clojure,
        Self::Elixir,
        Self::Haskell,
        Self::OCaml,
        Self::FSharp,
        Self::Lua,
        Self::Perl,
        Self::R,
        Self::Julia,
        Self::Dart,
        Self::ObjC,
        Self::Zig,
        Self::Json,
        Self::Toml,
        Self::Markdown,
        Self::Xml,
    ];

    /// Detect language from file path extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        Self::from_extension(ext)
    }

    /// Detect language from a file extension without its leading dot.
    ///
    /// Lookup is exact: `R` and `r` are both registered, `PY` is not.
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext {
            "php" => Ok(Self::Php),
            "js" | "mjs" | "cjs" => Ok(Self::JavaScript),
            "jsx" => Ok(Self::Jsx),
            "ts" => Ok(Self::TypeScript),
            "tsx" => Ok(Self::Tsx),
            "py" => Ok(Self::Python),
            "go" => Ok(Self::Go),
            "rs" => Ok(Self::Rust),
            "java" => Ok(Self::Java),
            "kt" | "kts" => Ok(Self::Kotlin),
            "cs" => Ok(Self::CSharp),
            "rb" => Ok(Self::Ruby),
            "swift" => Ok(Self::Swift),
            "c" | "h" => Ok(Self::C),
            "cpp" | "cc" | "cxx" | "hpp" | "hxx" => Ok(Self::Cpp),
            "vue" => Ok(Self::Vue),
            "svelte" => Ok(Self::Svelte),
            "html" | "htm" => Ok(Self::Html),
            "css" => Ok(Self::Css),
            "scss" | "sass" => Ok(Self::Scss),
            "sql" => Ok(Self::Sql),
            "yaml" | "yml" => Ok(Self::Yaml),
            "sh" | "bash" | "zsh" => Ok(Self::Bash),
            "scala" | "sc" => Ok(Self::Scala),
            "groovy" | "gvy" | "gy" | "gsh" => Ok(Self::Groovy),
            "clj" | "cljs" | "cljc" | "edn" => Ok(Self::Clojure),
            "ex" | "exs" => Ok(Self::Elixir),
            "hs" | "lhs" => Ok(Self::Haskell),
            "ml" | "mli" => Ok(Self::OCaml),
            "fs" | "fsi" | "fsx" => Ok(Self::FSharp),
            "lua" => Ok(Self::Lua),
            "pl" | "pm" | "t" => Ok(Self::Perl),
            "r" | "R" => Ok(Self::R),
            "jl" => Ok(Self::Julia),
            "dart" => Ok(Self::Dart),
            "m" | "mm" => Ok(Self::ObjC),
            "zig" => Ok(Self::Zig),
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            "md" | "markdown" => Ok(Self::Markdown),
            "xml" => Ok(Self::Xml),
            _ => Err(ExtractError::UnsupportedExtension {
                extension: ext.to_string(),
            }),
        }
    }

    /// Canonical identifier, used as the wire-level `language` value
    pub fn name(&self) -> &'static str {
        match self {
            Self::Php => "php",
            Self::JavaScript => "javascript",
            Self::Jsx => "jsx",
            Self::TypeScript => "typescript",
            Self::Tsx => "tsx",
            Self::Python => "python",
            Self::Go => "go",
            Self::Rust => "rust",
            Self::Java => "java",
            Self::Kotlin => "kotlin",
            Self::CSharp => "csharp",
            Self::Ruby => "ruby",
            Self::Swift => "swift",
            Self::C => "c",
            Self::Cpp => "cpp",
            Self::Vue => "vue",
            Self::Svelte => "svelte",
            Self::Html => "html",
            Self::Css => "css",
            Self::Scss => "scss",
            Self::Sql => "sql",
            Self::Yaml => "yaml",
            Self::Bash => "bash",
            Self::Scala => "scala",
            Self::Groovy => "groovy",
            Self::Clojure => "clojure",
            Self::Elixir => "elixir",
            Self::Haskell => "haskell",
            Self::OCaml => "ocaml",
            Self::FSharp => "fsharp",
            Self::Lua => "lua",
            Self::Perl => "perl",
            Self::R => "r",
            Self::Julia => "julia",
            Self::Dart => "dart",
            Self::ObjC => "objc",
            Self::Zig => "zig",
            Self::Json => "json",
            Self::Toml => "toml",
            Self::Markdown => "markdown",
            Self::Xml => "xml",
        }
    }

    /// Human-readable name, used in parse failure messages
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Php => "PHP",
            Self::JavaScript => "JavaScript",
            Self::Jsx => "JSX",
            Self::TypeScript => "TypeScript",
            Self::Tsx => "TSX",
            Self::Python => "Python",
            Self::Go => "Go",
            Self::Rust => "Rust",
            Self::Java => "Java",
            Self::Kotlin => "Kotlin",
            Self::CSharp => "C#",
            Self::Ruby => "Ruby",
            Self::Swift => "Swift",
            Self::C => "C",
            Self::Cpp => "C++",
            Self::Vue => "Vue",
            Self::Svelte => "Svelte",
            Self::Html => "HTML",
            Self::Css => "CSS",
            Self::Scss => "SCSS",
            Self::Sql => "SQL",
            Self::Yaml => "YAML",
            Self::Bash => "Bash",
            Self::Scala => "Scala",
            Self::Groovy => "Groovy",
            Self::Clojure => "Clojure",
            Self::Elixir => "Elixir",
            Self::Haskell => "Haskell",
            Self::OCaml => "OCaml",
            Self::FSharp => "F#",
            Self::Lua => "Lua",
            Self::Perl => "Perl",
            Self::R => "R",
            Self::Julia => "Julia",
            Self::Dart => "Dart",
            Self::ObjC => "Objective-C",
            Self::Zig => "Zig",
            Self::Json => "JSON",
            Self::Toml => "TOML",
            Self::Markdown => "Markdown",
            Self::Xml => "XML",
        }
    }

    /// Get the tree-sitter Language for parsing.
    ///
    /// Returns `None` for languages handled by text heuristics and for the
    /// composite formats, which parse their sections with other grammars.
    pub fn tree_sitter_language(&self) -> Option<Language> {
        let language = match self {
            Self::Php => tree_sitter_php::LANGUAGE_PHP.into(),
            Self::JavaScript | Self::Jsx => tree_sitter_javascript::LANGUAGE.into(),
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            Self::Python => tree_sitter_python::LANGUAGE.into(),
            Self::Go => tree_sitter_go::LANGUAGE.into(),
            Self::Rust => tree_sitter_rust::LANGUAGE.into(),
            Self::Java => tree_sitter_java::LANGUAGE.into(),
            Self::CSharp => tree_sitter_c_sharp::LANGUAGE.into(),
            Self::Ruby => tree_sitter_ruby::LANGUAGE.into(),
            Self::Swift => tree_sitter_swift::LANGUAGE.into(),
            Self::C => tree_sitter_c::LANGUAGE.into(),
            Self::Cpp => tree_sitter_cpp::LANGUAGE.into(),
            Self::Html => tree_sitter_html::LANGUAGE.into(),
            Self::Css => tree_sitter_css::language().into(),
            Self::Scss => tree_sitter_scss::language().into(),
            Self::Yaml => tree_sitter_yaml::language().into(),
            Self::Bash => tree_sitter_bash::LANGUAGE.into(),
            Self::Scala => tree_sitter_scala::LANGUAGE.into(),
            Self::Elixir => tree_sitter_elixir::LANGUAGE.into(),
            Self::OCaml => tree_sitter_ocaml::LANGUAGE_OCAML.into(),
            Self::Lua => tree_sitter_lua::LANGUAGE.into(),
            _ => return None,
        };
        Some(language)
    }

    /// Get the language family
    pub fn family(&self) -> LangFamily {
        match self {
            Self::JavaScript
            | Self::Jsx
            | Self::TypeScript
            | Self::Tsx
            | Self::Vue
            | Self::Svelte => LangFamily::JavaScript,
            Self::C | Self::Cpp | Self::Rust | Self::Go | Self::Zig => LangFamily::Systems,
            Self::Java | Self::Kotlin | Self::Scala | Self::Groovy | Self::Clojure => {
                LangFamily::Jvm
            }
            Self::CSharp => LangFamily::DotNet,
            Self::Swift | Self::ObjC | Self::Dart => LangFamily::Mobile,
            Self::Php
            | Self::Python
            | Self::Ruby
            | Self::Bash
            | Self::Lua
            | Self::Perl
            | Self::R
            | Self::Julia => LangFamily::Scripting,
            Self::Elixir | Self::Haskell | Self::OCaml | Self::FSharp => LangFamily::Functional,
            Self::Html | Self::Css | Self::Scss | Self::Markdown | Self::Xml => LangFamily::Markup,
            Self::Sql | Self::Yaml | Self::Json | Self::Toml => LangFamily::Data,
        }
    }

    /// Get file extensions for this language
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Php => &["php"],
            Self::JavaScript => &["js", "mjs", "cjs"],
            Self::Jsx => &["jsx"],
            Self::TypeScript => &["ts"],
            Self::Tsx => &["tsx"],
            Self::Python => &["py"],
            Self::Go => &["go"],
            Self::Rust => &["rs"],
            Self::Java => &["java"],
            Self::Kotlin => &["kt", "kts"],
            Self::CSharp => &["cs"],
            Self::Ruby => &["rb"],
            Self::Swift => &["swift"],
            Self::C => &["c", "h"],
            Self::Cpp => &["cpp", "cc", "cxx", "hpp", "hxx"],
            Self::Vue => &["vue"],
            Self::Svelte => &["svelte"],
            Self::Html => &["html", "htm"],
            Self::Css => &["css"],
            Self::Scss => &["scss", "sass"],
            Self::Sql => &["sql"],
            Self::Yaml => &["yaml", "yml"],
            Self::Bash => &["sh", "bash", "zsh"],
            Self::Scala => &["scala", "sc"],
            Self::Groovy => &["groovy", "gvy", "gy", "gsh"],
            Self::Clojure => &["clj", "cljs", "cljc", "edn"],
            Self::Elixir => &["ex", "exs"],
            Self::Haskell => &["hs", "lhs"],
            Self::OCaml => &["ml", "mli"],
            Self::FSharp => &["fs", "fsi", "fsx"],
            Self::Lua => &["lua"],
            Self::Perl => &["pl", "pm", "t"],
            Self::R => &["r", "R"],
            Self::Julia => &["jl"],
            Self::Dart => &["dart"],
            Self::ObjC => &["m", "mm"],
            Self::Zig => &["zig"],
            Self::Json => &["json"],
            Self::Toml => &["toml"],
            Self::Markdown => &["md", "markdown"],
            Self::Xml => &["xml"],
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Language family groupings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LangFamily {
    JavaScript,
    Systems,
    Jvm,
    DotNet,
    Mobile,
    Scripting,
    Functional,
    Markup,
    Data,
}

impl LangFamily {
    pub fn name(&self) -> &'static str {
        match self {
            Self::JavaScript => "javascript",
            Self::Systems => "systems",
            Self::Jvm => "jvm",
            Self::DotNet => "dotnet",
            Self::Mobile => "mobile",
            Self::Scripting => "scripting",
            Self::Functional => "functional",
            Self::Markup => "markup",
            Self::Data => "data",
        }
    }
}
