//! Code outline extraction
//!
//! Filters a syntax tree down to the declarations a navigation UI lists.
//! Extraction first builds a sparse containment tree of declarations, then
//! flattens it into positioned entries grouped by category.

mod extract;

pub use extract::{extract_outline, DEFAULT_DEPTH};

use serde::Serialize;

use crate::qualified::QualifiedName;

/// Declaration kinds the outline keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum OutlineKind {
    Class,
    Object,
    Function,
}

impl OutlineKind {
    /// Every kind, in the order categories are listed
    pub const ALL: [OutlineKind; 3] = [
        OutlineKind::Class,
        OutlineKind::Object,
        OutlineKind::Function,
    ];

    /// The declaration kind for a grammar node kind, if the outline keeps it
    pub fn from_node_kind(kind: &str) -> Option<Self> {
        match kind {
            "class_declaration" => Some(OutlineKind::Class),
            "object_declaration" => Some(OutlineKind::Object),
            "function_declaration" => Some(OutlineKind::Function),
            _ => None,
        }
    }

    /// Kind of the child holding the declaration's name
    pub fn name_kind(&self) -> &'static str {
        match self {
            OutlineKind::Class | OutlineKind::Object => "type_identifier",
            OutlineKind::Function => "simple_identifier",
        }
    }

    /// Category heading for the navigation UI
    pub fn category(&self) -> &'static str {
        match self {
            OutlineKind::Class => "Class",
            OutlineKind::Object => "Object",
            OutlineKind::Function => "Function",
        }
    }

    /// Short label for rendering in the outline tree
    pub fn label(&self) -> &'static str {
        match self {
            OutlineKind::Class => "class",
            OutlineKind::Object => "object",
            OutlineKind::Function => "fun",
        }
    }
}

/// A range in the document (line/col are 0-based, columns in characters)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct OutlineRange {
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
}

/// A declaration in the sparse tree
#[derive(Debug, Clone)]
pub struct OutlineNode {
    pub kind: OutlineKind,
    pub name: QualifiedName,
    /// Byte offset of the declaration
    pub offset: usize,
    pub range: OutlineRange,
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    /// Whether this node has children (can be expanded/collapsed)
    pub fn is_collapsible(&self) -> bool {
        !self.children.is_empty()
    }
}

/// One flattened outline entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineEntry {
    pub kind: OutlineKind,
    /// Own name, quotes stripped
    pub name: String,
    pub qualified_name: QualifiedName,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

/// Entries of one category, in document order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineGroup {
    pub category: &'static str,
    pub entries: Vec<OutlineEntry>,
}

/// Complete outline for a document
#[derive(Debug, Clone, Default)]
pub struct Outline {
    pub roots: Vec<OutlineNode>,
}

impl Outline {
    /// Check if the outline has any symbols
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Every declaration in document order
    pub fn entries(&self) -> Vec<OutlineEntry> {
        let mut out = Vec::new();
        let mut stack: Vec<&OutlineNode> = self.roots.iter().rev().collect();
        while let Some(node) = stack.pop() {
            out.push(OutlineEntry {
                kind: node.kind,
                name: node.name.last().unwrap_or_default().to_string(),
                qualified_name: node.name.clone(),
                offset: node.offset,
                line: node.range.start_line,
                column: node.range.start_col,
            });
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// Entries grouped by category; empty categories are left out
    pub fn grouped(&self) -> Vec<OutlineGroup> {
        let entries = self.entries();
        OutlineKind::ALL
            .iter()
            .filter_map(|kind| {
                let entries: Vec<_> = entries
                    .iter()
                    .filter(|e| e.kind == *kind)
                    .cloned()
                    .collect();
                (!entries.is_empty()).then(|| OutlineGroup {
                    category: kind.category(),
                    entries,
                })
            })
            .collect()
    }
}
