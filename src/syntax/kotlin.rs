//! Built-in Kotlin highlight rules
//!
//! Node kinds follow the tree-sitter-kotlin grammar. Groups are declared in
//! evaluation order; the tier numbers decide which groups a highlight level
//! turns on.

use super::rules::{FeatureGroup, Predicate, RuleSet};

/// Children of a string literal that keep their own classification
pub const STRING_SPECIALS: &[&str] = &[
    "interpolated_expression",
    "interpolated_identifier",
    "${",
    "$",
    "}",
];

const KEYWORDS: &[&str] = &[
    "package", "import", "class", "interface", "object", "fun", "val", "var", "typealias",
    "constructor", "init", "companion", "by", "where", "get", "set", "if", "else", "when",
    "for", "while", "do", "try", "catch", "finally", "return", "throw", "break", "continue",
    "in", "!in", "is", "!is", "as", "as?", "enum", "data", "sealed", "suspend", "override",
];

const MODIFIERS: &[&str] = &[
    "class_modifier",
    "member_modifier",
    "visibility_modifier",
    "function_modifier",
    "property_modifier",
    "inheritance_modifier",
    "parameter_modifier",
    "platform_modifier",
    "variance_modifier",
    "reification_modifier",
];

const BUILTIN_FUNCTIONS: &[&str] = &[
    "println", "print", "require", "requireNotNull", "check", "checkNotNull", "error", "TODO",
    "repeat", "lazy", "run", "let", "apply", "also", "with", "takeIf", "takeUnless", "listOf",
    "mutableListOf", "setOf", "mutableSetOf", "mapOf", "mutableMapOf", "arrayOf", "emptyList",
    "emptyMap", "emptySet", "sequenceOf", "buildList", "buildString",
];

const BUILTIN_TYPES: &[&str] = &[
    "Any", "Unit", "Nothing", "Boolean", "Byte", "Short", "Int", "Long", "Float", "Double",
    "Char", "String", "Array", "List", "Map", "Set",
];

const NUMBERS: &[&str] = &[
    "integer_literal",
    "long_literal",
    "hex_literal",
    "bin_literal",
    "unsigned_literal",
    "real_literal",
];

// `<` and `>` also delimit type arguments; they count as operators only in
// comparisons
const OPERATORS: &[&str] = &[
    "+", "-", "*", "/", "%", "=", "+=", "-=", "*=", "/=", "%=", "==", "!=", "===", "!==", "<=",
    ">=", "&&", "||", "!", "++", "--", "?:", "!!", "..", "->", "::",
];

const BRACKETS: &[&str] = &["(", ")", "[", "]", "{", "}", "<", ">"];

const DELIMITERS: &[&str] = &[".", ",", ";", ":", "?."];

/// Kotlin highlight rule table
pub fn rule_set() -> RuleSet {
    RuleSet::new(vec![
        FeatureGroup::new("comment", 1).rule(
            Predicate::any_kind(&["line_comment", "multiline_comment", "shebang_line"]),
            "comment",
        ),
        FeatureGroup::new("string", 1)
            .carved(Predicate::kind("string_literal"), "string", STRING_SPECIALS)
            .rule(Predicate::kind("character_literal"), "string")
            .rule(
                Predicate::within(&["string_literal"], Predicate::any_kind(&["${", "$", "}"])),
                "punctuation.special",
            )
            .rule(
                Predicate::any_kind(&["interpolated_expression", "interpolated_identifier"]),
                "embedded",
            ),
        FeatureGroup::new("number", 1).rule(Predicate::any_kind(NUMBERS), "number"),
        FeatureGroup::new("definition", 1)
            .rule(
                Predicate::within(&["function_declaration"], Predicate::kind("simple_identifier")),
                "function",
            )
            .rule(
                Predicate::within(&["class_declaration"], Predicate::kind("type_identifier")),
                "type",
            )
            .rule(
                Predicate::within(&["object_declaration"], Predicate::kind("type_identifier")),
                "type",
            )
            .rule(
                Predicate::within(&["type_alias"], Predicate::kind("type_identifier")),
                "type",
            )
            .rule(
                Predicate::within(&["parameter"], Predicate::kind("simple_identifier")),
                "variable.parameter",
            )
            .rule(
                Predicate::within(&["class_parameter"], Predicate::kind("simple_identifier")),
                "variable.parameter",
            )
            .rule(
                Predicate::within(&["variable_declaration"], Predicate::kind("simple_identifier")),
                "variable",
            )
            .rule(
                Predicate::within(&["enum_entry"], Predicate::kind("simple_identifier")),
                "constant",
            ),
        // `it` and `field` are keywords only inside lambdas and accessors; the
        // predicate cannot see that nesting, so it matches them everywhere.
        FeatureGroup::new("keyword", 2)
            .rule(Predicate::any_kind(KEYWORDS), "keyword")
            .rule(Predicate::any_kind(MODIFIERS), "keyword")
            .rule(Predicate::text("simple_identifier", &["it", "field"]), "keyword")
            .rule(
                Predicate::child_at("this_expression", 0, Predicate::kind("this")),
                "keyword",
            )
            .rule(Predicate::kind("super_expression"), "keyword"),
        FeatureGroup::new("builtin", 2)
            .rule(
                Predicate::within(
                    &["call_expression"],
                    Predicate::text("simple_identifier", BUILTIN_FUNCTIONS),
                ),
                "function.builtin",
            )
            .rule(Predicate::text("type_identifier", BUILTIN_TYPES), "type.builtin"),
        FeatureGroup::new("constant", 2)
            .rule(Predicate::kind("boolean_literal"), "boolean")
            .rule(Predicate::kind("null_literal"), "constant.builtin")
            .rule(
                Predicate::regex("simple_identifier", "^[A-Z][A-Z0-9_]*$"),
                "constant",
            ),
        FeatureGroup::new("type", 2)
            .rule(Predicate::kind("type_identifier"), "type")
            .rule(
                Predicate::within(
                    &["call_expression"],
                    Predicate::regex("simple_identifier", "^[A-Z]"),
                ),
                "type",
            )
            .rule(
                Predicate::within(
                    &["navigation_expression"],
                    Predicate::regex("simple_identifier", "^[A-Z]"),
                ),
                "type",
            ),
        FeatureGroup::new("annotation", 2)
            .rule(Predicate::any_kind(&["annotation", "file_annotation"]), "attribute")
            .rule(Predicate::kind("label"), "label"),
        FeatureGroup::new("escape-sequence", 3)
            .overriding()
            .rule(Predicate::kind("character_escape_seq"), "escape"),
        FeatureGroup::new("function", 3)
            .rule(
                Predicate::within(&["call_expression"], Predicate::kind("simple_identifier")),
                "function.call",
            )
            .rule(
                Predicate::within(
                    &["navigation_suffix", "navigation_expression", "call_expression"],
                    Predicate::kind("simple_identifier"),
                ),
                "function.call",
            ),
        FeatureGroup::new("property", 3).rule(
            Predicate::within(&["navigation_suffix"], Predicate::kind("simple_identifier")),
            "property",
        ),
        FeatureGroup::new("operator", 4)
            .rule(Predicate::any_kind(OPERATORS), "operator")
            .rule(
                Predicate::within(&["comparison_expression"], Predicate::any_kind(&["<", ">"])),
                "operator",
            ),
        FeatureGroup::new("delimiter", 4)
            .rule(Predicate::any_kind(BRACKETS), "punctuation.bracket")
            .rule(Predicate::any_kind(DELIMITERS), "punctuation.delimiter"),
        FeatureGroup::new("error", 4)
            .overriding()
            .rule(Predicate::kind("ERROR"), "error"),
    ])
}
