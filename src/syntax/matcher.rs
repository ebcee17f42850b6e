//! Rule evaluation over a syntax tree
//!
//! Every rule of every active feature group is tested against every node
//! overlapping the requested range. Captures come out in group order, then
//! rule order, then document order; [`highlight`] resolves them into one tag
//! per byte using the override flags.

use std::ops::Range;

use super::carve::carve;
use super::highlights::{resolve_spans, Capture, Span};
use super::rules::RuleSet;
use crate::tree::SyntaxTree;

/// All captures produced by the active groups inside `range`
///
/// A node may be captured by several rules; nothing is deduplicated here.
pub fn capture<S: AsRef<str>>(
    tree: &SyntaxTree,
    rules: &RuleSet,
    features: &[S],
    range: Range<usize>,
) -> Vec<Capture> {
    let range = clamp(tree, range);
    let mut captures = Vec::new();
    if range.is_empty() {
        return captures;
    }

    let nodes = tree.nodes_in_range(range.clone());
    let active = rules
        .groups()
        .iter()
        .filter(|g| features.iter().any(|f| f.as_ref() == g.name));

    for group in active {
        let before = captures.len();
        for rule in &group.rules {
            for &node in &nodes {
                if !rule.predicate.matches(tree, node) {
                    continue;
                }
                match rule.carve {
                    Some(special) => {
                        captures.extend(
                            carve(tree, node, rule.highlight, special, range.clone())
                                .into_iter()
                                .map(|span| Capture {
                                    span,
                                    overrides: rule.overrides,
                                }),
                        );
                    }
                    None => {
                        let node_range = tree.range(node);
                        let start = node_range.start.max(range.start);
                        let end = node_range.end.min(range.end);
                        if start < end {
                            captures.push(Capture {
                                span: Span::new(start, end, rule.highlight),
                                overrides: rule.overrides,
                            });
                        }
                    }
                }
            }
        }
        tracing::trace!(
            "feature {}: {} captures over {} nodes",
            group.name,
            captures.len() - before,
            nodes.len()
        );
    }

    captures
}

/// Resolved, disjoint spans for `range`, sorted by position
pub fn highlight<S: AsRef<str>>(
    tree: &SyntaxTree,
    rules: &RuleSet,
    features: &[S],
    range: Range<usize>,
) -> Vec<Span> {
    let range = clamp(tree, range);
    let captures = capture(tree, rules, features, range.clone());
    let spans = resolve_spans(&captures, range);
    tracing::debug!(
        "highlight: {} captures resolved to {} spans",
        captures.len(),
        spans.len()
    );
    spans
}

fn clamp(tree: &SyntaxTree, range: Range<usize>) -> Range<usize> {
    let len = tree.rope().len_bytes();
    let end = range.end.min(len);
    range.start.min(end)..end
}
