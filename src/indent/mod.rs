//! Context-based indentation
//!
//! The line being indented is represented by the largest node starting at its
//! first non-blank character (or by no node at all on a blank line) together
//! with that node's parent. The resolver walks `(node, parent)` pairs up the
//! ancestor chain; at each step the first rule of the table accepting the pair
//! decides the column as `anchor column + offset × unit width`. When no rule
//! accepts any pair up to the root the line goes to column 0.
//!
//! Resolution reads the tree and the table only, so the same line of the same
//! snapshot always resolves to the same column.

mod kotlin;

pub use kotlin::rules as kotlin_rules;

use crate::tree::{NodeId, SyntaxTree};

/// Which side of the `(node, parent)` pair a rule tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndentMatcher {
    /// The node itself has this kind (never matches on a blank line)
    NodeIs(String),
    /// The node's parent has this kind
    ParentIs(String),
    /// Blank line: there is no node, only a covering parent
    NoNode,
    /// Accepts every pair
    Catchall,
}

impl IndentMatcher {
    pub fn node_is(kind: &str) -> Self {
        IndentMatcher::NodeIs(kind.to_string())
    }

    pub fn parent_is(kind: &str) -> Self {
        IndentMatcher::ParentIs(kind.to_string())
    }

    /// Node kind the matcher compares against, if any
    pub fn kind(&self) -> Option<&str> {
        match self {
            IndentMatcher::NodeIs(kind) | IndentMatcher::ParentIs(kind) => Some(kind.as_str()),
            IndentMatcher::NoNode | IndentMatcher::Catchall => None,
        }
    }

    fn accepts(&self, tree: &SyntaxTree, node: Option<NodeId>, parent: Option<NodeId>) -> bool {
        match self {
            IndentMatcher::NodeIs(kind) => node.is_some_and(|n| tree.kind(n) == kind.as_str()),
            IndentMatcher::ParentIs(kind) => parent.is_some_and(|p| tree.kind(p) == kind.as_str()),
            IndentMatcher::NoNode => node.is_none(),
            IndentMatcher::Catchall => true,
        }
    }
}

/// Reference point an offset is measured from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Indentation of the line the node starts on
    NodeBol,
    /// Indentation of the line the parent starts on
    ParentBol,
    /// Indentation of the line the grandparent starts on
    GrandParentBol,
    /// The line keeps whatever indentation it already has
    Existing,
    /// Column 0
    ColumnZero,
}

/// One row of the indentation table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentRule {
    pub matcher: IndentMatcher,
    pub anchor: Anchor,
    /// Multiples of the indent unit added to the anchor column
    pub offset: i32,
}

impl IndentRule {
    pub fn new(matcher: IndentMatcher, anchor: Anchor, offset: i32) -> Self {
        Self {
            matcher,
            anchor,
            offset,
        }
    }
}

/// Widths used when measuring and producing indentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentSettings {
    /// Columns per indent unit
    pub unit_width: usize,
    /// Columns a tab advances to when measuring existing indentation
    pub tab_width: usize,
}

impl Default for IndentSettings {
    fn default() -> Self {
        Self {
            unit_width: 4,
            tab_width: 4,
        }
    }
}

/// Target column for `line`
pub fn indent_for_line(
    tree: &SyntaxTree,
    rules: &[IndentRule],
    settings: IndentSettings,
    line: usize,
) -> usize {
    if line >= tree.line_count() {
        return 0;
    }
    let bol = tree.line_bol(line);
    let node = if tree.line_is_blank(line) {
        None
    } else {
        tree.largest_node_starting_at(bol)
    };
    let parent = match node {
        Some(node) => tree.parent(node),
        // Blank line, or a line continuing a multi-line token
        None => Some(tree.smallest_node_covering(bol)),
    };
    resolve(tree, rules, settings, node, parent, line)
}

/// Target column for the line a node starts on
pub fn indent_for_node(
    tree: &SyntaxTree,
    rules: &[IndentRule],
    settings: IndentSettings,
    node: NodeId,
) -> usize {
    let line = tree.line_of(tree.range(node).start);
    resolve(tree, rules, settings, Some(node), tree.parent(node), line)
}

fn resolve(
    tree: &SyntaxTree,
    rules: &[IndentRule],
    settings: IndentSettings,
    mut node: Option<NodeId>,
    mut parent: Option<NodeId>,
    line: usize,
) -> usize {
    loop {
        for rule in rules {
            if !rule.matcher.accepts(tree, node, parent) {
                continue;
            }
            let Some(anchor) = anchor_column(tree, settings, rule.anchor, node, parent, line)
            else {
                continue;
            };
            let column = anchor as i64 + rule.offset as i64 * settings.unit_width as i64;
            tracing::trace!(
                "line {}: {:?} matched at {:?}, anchor {}",
                line,
                rule.matcher,
                node.map(|n| tree.kind(n)),
                anchor
            );
            return column.max(0) as usize;
        }

        let Some(next) = parent else {
            return 0;
        };
        node = Some(next);
        parent = tree.parent(next);
    }
}

fn anchor_column(
    tree: &SyntaxTree,
    settings: IndentSettings,
    anchor: Anchor,
    node: Option<NodeId>,
    parent: Option<NodeId>,
    line: usize,
) -> Option<usize> {
    let bol_of = |id: NodeId| {
        let line = tree.line_of(tree.range(id).start);
        tree.indentation_of_line(line, settings.tab_width)
    };
    match anchor {
        Anchor::NodeBol => node.map(bol_of),
        Anchor::ParentBol => parent.map(bol_of),
        Anchor::GrandParentBol => parent.and_then(|p| tree.parent(p)).map(bol_of),
        Anchor::Existing => Some(tree.indentation_of_line(line, settings.tab_width)),
        Anchor::ColumnZero => Some(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::TreeBuilder;

    /// Two nested blocks:
    /// ```text
    /// fun f() {
    ///     if (x) {
    ///         y()
    ///     }
    /// }
    /// ```
    fn nested_blocks() -> SyntaxTree {
        let src = "fun f() {\n    if (x) {\n        y()\n    }\n}\n";
        let mut b = TreeBuilder::new(src);
        b.start_node("source_file", 0..43)
            .start_node("function_declaration", 0..42)
            .token("fun", 0..3)
            .leaf("simple_identifier", 4..5)
            .start_node("block", 8..42)
            .token("{", 8..9)
            .start_node("if_expression", 14..40)
            .token("if", 14..16)
            .token("(", 17..18)
            .leaf("simple_identifier", 18..19)
            .token(")", 19..20)
            .start_node("block", 21..40)
            .token("{", 21..22)
            .start_node("call_expression", 31..34)
            .leaf("simple_identifier", 31..32)
            .token("(", 32..33)
            .token(")", 33..34)
            .finish_node()
            .token("}", 39..40)
            .finish_node()
            .finish_node()
            .token("}", 41..42)
            .finish_node()
            .finish_node()
            .finish_node();
        b.build()
    }

    fn block_rules() -> Vec<IndentRule> {
        vec![
            IndentRule::new(IndentMatcher::node_is("}"), Anchor::ParentBol, 0),
            IndentRule::new(IndentMatcher::parent_is("block"), Anchor::ParentBol, 1),
        ]
    }

    #[test]
    fn test_nested_block_statement_gets_two_units() {
        let tree = nested_blocks();
        let settings = IndentSettings::default();
        assert_eq!(indent_for_line(&tree, &block_rules(), settings, 2), 8);

        let wide = IndentSettings {
            unit_width: 2,
            tab_width: 4,
        };
        // Anchors are measured from the existing text (line 1 is at 4)
        assert_eq!(indent_for_line(&tree, &block_rules(), wide, 2), 6);
    }

    #[test]
    fn test_closing_brace_aligns_with_parent() {
        let tree = nested_blocks();
        let settings = IndentSettings::default();
        assert_eq!(indent_for_line(&tree, &block_rules(), settings, 3), 4);
        assert_eq!(indent_for_line(&tree, &block_rules(), settings, 4), 0);
        assert_eq!(indent_for_line(&tree, &block_rules(), settings, 1), 4);
    }

    #[test]
    fn test_no_matching_rule_falls_back_to_zero() {
        let tree = nested_blocks();
        let settings = IndentSettings::default();
        let unrelated = vec![IndentRule::new(
            IndentMatcher::parent_is("class_body"),
            Anchor::ParentBol,
            1,
        )];
        for line in 0..tree.line_count() {
            assert_eq!(indent_for_line(&tree, &unrelated, settings, line), 0);
        }
        assert_eq!(indent_for_line(&tree, &[], settings, 2), 0);
        assert_eq!(indent_for_line(&tree, &block_rules(), settings, 99), 0);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let tree = nested_blocks();
        let rules = block_rules();
        let settings = IndentSettings::default();
        let call = tree.largest_node_starting_at(31).unwrap();
        let first = indent_for_node(&tree, &rules, settings, call);
        let second = indent_for_node(&tree, &rules, settings, call);
        assert_eq!(first, 8);
        assert_eq!(first, second);
    }

    #[test]
    fn test_walks_up_until_a_rule_matches() {
        let tree = nested_blocks();
        let settings = IndentSettings::default();
        // Only the outer function is known: the inner statement inherits the
        // function body's rule from further up the chain.
        let rules = vec![IndentRule::new(
            IndentMatcher::parent_is("function_declaration"),
            Anchor::ParentBol,
            1,
        )];
        assert_eq!(indent_for_line(&tree, &rules, settings, 2), 4);
    }

    #[test]
    fn test_negative_offset_saturates() {
        let tree = nested_blocks();
        let rules = vec![IndentRule::new(IndentMatcher::Catchall, Anchor::ParentBol, -3)];
        assert_eq!(indent_for_line(&tree, &rules, IndentSettings::default(), 2), 0);
    }

    #[test]
    fn test_blank_line_uses_covering_parent() {
        let src = "class A {\n\n}\n";
        let mut b = TreeBuilder::new(src);
        b.start_node("source_file", 0..13)
            .start_node("class_declaration", 0..12)
            .token("class", 0..5)
            .leaf("type_identifier", 6..7)
            .start_node("class_body", 8..12)
            .token("{", 8..9)
            .token("}", 11..12)
            .finish_node()
            .finish_node()
            .finish_node();
        let tree = b.build();
        let settings = IndentSettings::default();
        let rules = kotlin_rules();

        assert_eq!(indent_for_line(&tree, &rules, settings, 1), 4);
        assert_eq!(indent_for_line(&tree, &rules, settings, 2), 0);

        let blank_only = vec![
            IndentRule::new(IndentMatcher::node_is("class_body"), Anchor::ColumnZero, 5),
            IndentRule::new(IndentMatcher::NoNode, Anchor::ParentBol, 2),
        ];
        assert_eq!(indent_for_line(&tree, &blank_only, settings, 1), 8);
    }
}
