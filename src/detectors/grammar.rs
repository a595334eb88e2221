//! Language Grammar Definitions
//!
//! Per-language tree-sitter node kinds for the parts of extraction that are
//! shared: call-site resolution, enclosing-function lookup, nested-scope
//! exclusion and doc comments. Declaration shapes differ too much between
//! grammars to be table-driven, so each detector resolves those itself.
//!
//! # Adding a New Language
//!
//! 1. Add a new `LangGrammar` constant (e.g., `KOTLIN_GRAMMAR`)
//! 2. Fill in the AST node kinds from the tree-sitter grammar
//! 3. Use it from the detector through `generic.rs`

/// Language-specific AST node mappings
#[derive(Debug, Clone)]
pub struct LangGrammar {
    /// Language identifier
    pub name: &'static str,

    // =========================================================================
    // Scopes
    // =========================================================================
    /// Function-like nodes, used to attribute calls to their caller
    pub function_nodes: &'static [&'static str],

    /// Type declarations whose bodies own member functions
    pub type_nodes: &'static [&'static str],

    /// Body containers of `type_nodes`; a declaration directly inside one is
    /// a member, not a free function
    pub body_nodes: &'static [&'static str],

    // =========================================================================
    // Calls
    // =========================================================================
    /// Call expression nodes
    pub call_nodes: &'static [&'static str],

    /// Callee shapes that make a call a method call (`a.b()`)
    pub member_nodes: &'static [&'static str],

    /// Identifier kinds naming the member inside `member_nodes`
    pub member_name_nodes: &'static [&'static str],

    /// Argument list nodes, searched among the call's direct children
    pub argument_nodes: &'static [&'static str],

    /// When set, only argument-list children of this kind are counted
    pub counted_argument: Option<&'static str>,

    // =========================================================================
    // Comments
    // =========================================================================
    pub comment_nodes: &'static [&'static str],
}

pub static GO_GRAMMAR: LangGrammar = LangGrammar {
    name: "go",
    function_nodes: &["function_declaration", "method_declaration"],
    type_nodes: &["type_spec"],
    body_nodes: &[],
    call_nodes: &["call_expression"],
    member_nodes: &["selector_expression"],
    member_name_nodes: &["field_identifier"],
    argument_nodes: &["argument_list"],
    counted_argument: None,
    comment_nodes: &["comment"],
};

pub static PYTHON_GRAMMAR: LangGrammar = LangGrammar {
    name: "python",
    function_nodes: &["function_definition"],
    type_nodes: &["class_definition"],
    body_nodes: &["block"],
    call_nodes: &["call"],
    member_nodes: &["attribute"],
    member_name_nodes: &["identifier"],
    argument_nodes: &["argument_list", "generator_expression"],
    counted_argument: None,
    comment_nodes: &["comment"],
};

pub static JAVASCRIPT_GRAMMAR: LangGrammar = LangGrammar {
    name: "javascript",
    function_nodes: &[
        "function_declaration",
        "generator_function_declaration",
        "function_expression",
        "function",
        "arrow_function",
        "method_definition",
    ],
    type_nodes: &["class_declaration", "class"],
    body_nodes: &["class_body"],
    call_nodes: &["call_expression"],
    member_nodes: &["member_expression"],
    member_name_nodes: &["property_identifier", "private_property_identifier"],
    argument_nodes: &["arguments"],
    counted_argument: None,
    comment_nodes: &["comment"],
};

pub static TYPESCRIPT_GRAMMAR: LangGrammar = LangGrammar {
    name: "typescript",
    function_nodes: &[
        "function_declaration",
        "generator_function_declaration",
        "function_expression",
        "function",
        "arrow_function",
        "method_definition",
    ],
    type_nodes: &[
        "class_declaration",
        "abstract_class_declaration",
        "class",
        "interface_declaration",
    ],
    body_nodes: &["class_body", "interface_body", "object_type"],
    call_nodes: &["call_expression"],
    member_nodes: &["member_expression"],
    member_name_nodes: &["property_identifier", "private_property_identifier"],
    argument_nodes: &["arguments"],
    counted_argument: None,
    comment_nodes: &["comment"],
};

pub static RUST_GRAMMAR: LangGrammar = LangGrammar {
    name: "rust",
    function_nodes: &["function_item"],
    type_nodes: &["impl_item", "trait_item"],
    body_nodes: &["declaration_list"],
    call_nodes: &["call_expression"],
    member_nodes: &["field_expression"],
    member_name_nodes: &["field_identifier"],
    argument_nodes: &["arguments"],
    counted_argument: None,
    comment_nodes: &["line_comment", "block_comment"],
};

pub static JAVA_GRAMMAR: LangGrammar = LangGrammar {
    name: "java",
    function_nodes: &["method_declaration", "constructor_declaration"],
    type_nodes: &[
        "class_declaration",
        "interface_declaration",
        "enum_declaration",
        "record_declaration",
    ],
    body_nodes: &[
        "class_body",
        "interface_body",
        "enum_body",
        "enum_body_declarations",
    ],
    call_nodes: &["method_invocation"],
    member_nodes: &[],
    member_name_nodes: &["identifier"],
    argument_nodes: &["argument_list"],
    counted_argument: None,
    comment_nodes: &["line_comment", "block_comment"],
};

pub static CSHARP_GRAMMAR: LangGrammar = LangGrammar {
    name: "csharp",
    function_nodes: &[
        "method_declaration",
        "local_function_statement",
        "constructor_declaration",
    ],
    type_nodes: &[
        "class_declaration",
        "struct_declaration",
        "record_declaration",
        "interface_declaration",
    ],
    body_nodes: &["declaration_list"],
    call_nodes: &["invocation_expression"],
    member_nodes: &["member_access_expression"],
    member_name_nodes: &["identifier", "generic_name"],
    argument_nodes: &["argument_list"],
    counted_argument: Some("argument"),
    comment_nodes: &["comment"],
};

pub static C_GRAMMAR: LangGrammar = LangGrammar {
    name: "c",
    function_nodes: &["function_definition"],
    type_nodes: &["struct_specifier", "union_specifier"],
    body_nodes: &["field_declaration_list"],
    call_nodes: &["call_expression"],
    member_nodes: &["field_expression"],
    member_name_nodes: &["field_identifier"],
    argument_nodes: &["argument_list"],
    counted_argument: None,
    comment_nodes: &["comment"],
};

pub static CPP_GRAMMAR: LangGrammar = LangGrammar {
    name: "cpp",
    function_nodes: &["function_definition", "lambda_expression"],
    type_nodes: &["struct_specifier", "union_specifier", "class_specifier"],
    body_nodes: &["field_declaration_list"],
    call_nodes: &["call_expression"],
    member_nodes: &["field_expression"],
    member_name_nodes: &["field_identifier", "template_method"],
    argument_nodes: &["argument_list"],
    counted_argument: None,
    comment_nodes: &["comment"],
};

pub static RUBY_GRAMMAR: LangGrammar = LangGrammar {
    name: "ruby",
    function_nodes: &["method", "singleton_method"],
    type_nodes: &["class", "module", "singleton_class"],
    body_nodes: &["body_statement"],
    call_nodes: &["call"],
    member_nodes: &[],
    member_name_nodes: &["identifier", "constant"],
    argument_nodes: &["argument_list"],
    counted_argument: None,
    comment_nodes: &["comment"],
};

pub static SWIFT_GRAMMAR: LangGrammar = LangGrammar {
    name: "swift",
    function_nodes: &["function_declaration", "init_declaration"],
    type_nodes: &["class_declaration", "protocol_declaration"],
    body_nodes: &["class_body", "protocol_body", "enum_class_body"],
    call_nodes: &["call_expression"],
    member_nodes: &["navigation_expression"],
    member_name_nodes: &["simple_identifier"],
    argument_nodes: &["value_arguments"],
    counted_argument: Some("value_argument"),
    comment_nodes: &["comment", "multiline_comment"],
};

pub static PHP_GRAMMAR: LangGrammar = LangGrammar {
    name: "php",
    function_nodes: &["function_definition", "method_declaration"],
    type_nodes: &[
        "class_declaration",
        "interface_declaration",
        "trait_declaration",
        "enum_declaration",
    ],
    body_nodes: &["declaration_list", "enum_declaration_list"],
    call_nodes: &[
        "function_call_expression",
        "member_call_expression",
        "nullsafe_member_call_expression",
        "scoped_call_expression",
    ],
    member_nodes: &[],
    member_name_nodes: &["name"],
    argument_nodes: &["arguments"],
    counted_argument: Some("argument"),
    comment_nodes: &["comment"],
};

pub static SCALA_GRAMMAR: LangGrammar = LangGrammar {
    name: "scala",
    function_nodes: &["function_definition"],
    type_nodes: &["class_definition", "object_definition", "trait_definition"],
    body_nodes: &["template_body"],
    call_nodes: &["call_expression"],
    member_nodes: &["field_expression"],
    member_name_nodes: &["identifier"],
    argument_nodes: &["arguments"],
    counted_argument: None,
    comment_nodes: &["comment", "block_comment"],
};

pub static LUA_GRAMMAR: LangGrammar = LangGrammar {
    name: "lua",
    function_nodes: &["function_declaration"],
    type_nodes: &[],
    body_nodes: &[],
    call_nodes: &["function_call"],
    member_nodes: &["method_index_expression", "dot_index_expression"],
    member_name_nodes: &["identifier"],
    argument_nodes: &["arguments"],
    counted_argument: None,
    comment_nodes: &["comment"],
};

pub static BASH_GRAMMAR: LangGrammar = LangGrammar {
    name: "bash",
    function_nodes: &["function_definition"],
    type_nodes: &[],
    body_nodes: &[],
    call_nodes: &["command"],
    member_nodes: &[],
    member_name_nodes: &[],
    argument_nodes: &[],
    counted_argument: None,
    comment_nodes: &["comment"],
};

pub static OCAML_GRAMMAR: LangGrammar = LangGrammar {
    name: "ocaml",
    function_nodes: &["let_binding"],
    type_nodes: &["module_binding"],
    body_nodes: &["structure"],
    call_nodes: &["application_expression"],
    member_nodes: &["field_get_expression"],
    member_name_nodes: &["field_path", "field_name"],
    argument_nodes: &[],
    counted_argument: None,
    comment_nodes: &["comment"],
};
