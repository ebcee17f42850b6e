//! Span carving for composite nodes
//!
//! A string literal with interpolations must not paint its own tag over the
//! interpolated parts. Carving splits the literal's range at every direct
//! child of a "special" kind and keeps only the gaps, leaving the special
//! children to whatever rules classify them.

use std::ops::Range;

use super::highlights::{HighlightId, Span};
use crate::tree::{NodeId, SyntaxTree};

/// The N+1 gaps around N special children, in document order
///
/// Gaps may be empty (a special child touching the node boundary or another
/// special child).
pub fn carve_gaps(tree: &SyntaxTree, node: NodeId, special: &[&str]) -> Vec<Range<usize>> {
    let range = tree.range(node);
    let mut gaps = Vec::new();
    let mut cursor = range.start;

    for &child in tree.children(node) {
        if !special.contains(&tree.kind(child)) {
            continue;
        }
        let child_range = tree.range(child);
        gaps.push(cursor..child_range.start.max(cursor));
        cursor = child_range.end.max(cursor);
    }
    gaps.push(cursor..range.end.max(cursor));
    gaps
}

/// Spans tagged `highlight` over the node's gaps, clipped to `clip`
///
/// Empty gaps, and gaps that fall outside `clip`, produce no span.
pub fn carve(
    tree: &SyntaxTree,
    node: NodeId,
    highlight: HighlightId,
    special: &[&str],
    clip: Range<usize>,
) -> Vec<Span> {
    carve_gaps(tree, node, special)
        .into_iter()
        .filter_map(|gap| {
            let start = gap.start.max(clip.start);
            let end = gap.end.min(clip.end);
            (start < end).then(|| Span::new(start, end, highlight))
        })
        .collect()
}
