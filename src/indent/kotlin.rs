//! Built-in Kotlin indentation table

use super::{Anchor, IndentMatcher, IndentRule};

/// Containers whose direct children sit one unit deeper than the line the
/// container starts on
const BLOCKS: &[&str] = &[
    "class_body",
    "enum_class_body",
    "function_body",
    "control_structure_body",
    "lambda_literal",
    "when_expression",
    "when_entry",
    "try_expression",
    "catch_block",
    "finally_block",
    "value_arguments",
    "function_value_parameters",
    "primary_constructor",
    "collection_literal",
    "indexing_suffix",
    "navigation_expression",
    "property_declaration",
    "getter",
    "setter",
    "secondary_constructor",
    "anonymous_initializer",
    "object_literal",
];

/// Kotlin indentation rules, first match wins
pub fn rules() -> Vec<IndentRule> {
    let mut rules = vec![
        // Closing delimiters line up with the construct they close
        IndentRule::new(IndentMatcher::node_is("}"), Anchor::ParentBol, 0),
        IndentRule::new(IndentMatcher::node_is(")"), Anchor::ParentBol, 0),
        IndentRule::new(IndentMatcher::node_is("]"), Anchor::ParentBol, 0),
        // Multi-line strings and comments keep their layout
        IndentRule::new(IndentMatcher::parent_is("string_literal"), Anchor::Existing, 0),
        IndentRule::new(IndentMatcher::parent_is("multiline_comment"), Anchor::Existing, 0),
        IndentRule::new(IndentMatcher::node_is("multiline_comment"), Anchor::Existing, 0),
        // A body without braces hangs one unit below its `if`/`for`/`while`
        IndentRule::new(
            IndentMatcher::node_is("control_structure_body"),
            Anchor::ParentBol,
            1,
        ),
    ];

    rules.extend(
        BLOCKS
            .iter()
            .map(|kind| IndentRule::new(IndentMatcher::parent_is(kind), Anchor::ParentBol, 1)),
    );

    rules.push(IndentRule::new(
        IndentMatcher::parent_is("source_file"),
        Anchor::ColumnZero,
        0,
    ));
    rules
}
