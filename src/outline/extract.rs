//! Outline extraction from the arena tree
//!
//! Walks the tree recursively and keeps only declaration nodes, each carrying
//! the declarations nested inside it.

use super::{Outline, OutlineKind, OutlineNode, OutlineRange};
use crate::qualified::QualifiedName;
use crate::tree::{NodeId, SyntaxTree};

/// Search depth used when the caller has no preference
pub const DEFAULT_DEPTH: usize = 64;

/// Extract the outline, visiting nodes at most `max_depth` levels below the
/// root
pub fn extract_outline(tree: &SyntaxTree, max_depth: usize) -> Outline {
    let mut roots = Vec::new();
    if tree.is_empty() {
        return Outline { roots };
    }
    for &child in tree.children(tree.root()) {
        collect(tree, child, 1, max_depth, &QualifiedName::default(), &mut roots);
    }
    tracing::debug!("outline: {} top-level declarations", roots.len());
    Outline { roots }
}

fn collect(
    tree: &SyntaxTree,
    node: NodeId,
    depth: usize,
    max_depth: usize,
    scope: &QualifiedName,
    out: &mut Vec<OutlineNode>,
) {
    if depth > max_depth {
        return;
    }

    let declaration = OutlineKind::from_node_kind(tree.kind(node)).and_then(|kind| {
        let name = tree.child_of_kind(node, kind.name_kind())?;
        Some((kind, tree.text(name).into_owned()))
    });

    match declaration {
        Some((kind, name)) => {
            let name = scope.child(name);
            let mut children = Vec::new();
            for &child in tree.children(node) {
                collect(tree, child, depth + 1, max_depth, &name, &mut children);
            }
            out.push(OutlineNode {
                kind,
                name,
                offset: tree.range(node).start,
                range: node_range(tree, node),
                children,
            });
        }
        // Not a declaration, or one without a name: nested declarations are
        // lifted into the enclosing scope
        None => {
            for &child in tree.children(node) {
                collect(tree, child, depth + 1, max_depth, scope, out);
            }
        }
    }
}

fn node_range(tree: &SyntaxTree, node: NodeId) -> OutlineRange {
    let range = tree.range(node);
    OutlineRange {
        start_line: tree.line_of(range.start),
        start_col: tree.column_of(range.start),
        end_line: tree.line_of(range.end),
        end_col: tree.column_of(range.end),
    }
}
