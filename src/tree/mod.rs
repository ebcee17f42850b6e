//! Immutable syntax tree snapshot
//!
//! Nodes live in a flat arena and refer to each other by [`NodeId`]; the parent
//! link is an index rather than a reference, so a tree can be walked upwards
//! and downwards without any shared ownership. A tree owns its source text
//! (as a rope) for the lifetime of one snapshot and is never mutated after
//! [`TreeBuilder::build`].

mod builder;

pub use builder::TreeBuilder;

use std::borrow::Cow;
use std::ops::Range;

use ropey::Rope;

/// Index of a node inside its [`SyntaxTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single node of the arena
#[derive(Debug, Clone)]
pub struct Node {
    /// Grammar type tag (e.g. `class_declaration`, `}`)
    pub kind: &'static str,
    /// Anonymous tokens (keywords, punctuation) are not named
    pub named: bool,
    /// Byte offset where the node starts (inclusive)
    pub start: usize,
    /// Byte offset where the node ends (exclusive)
    pub end: usize,
    pub parent: Option<NodeId>,
    /// Children in document order
    pub children: Vec<NodeId>,
}

/// Arena-backed syntax tree for one source snapshot
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    text: Rope,
    nodes: Vec<Node>,
}

impl SyntaxTree {
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn kind(&self, id: NodeId) -> &'static str {
        self.node(id).kind
    }

    pub fn range(&self, id: NodeId) -> Range<usize> {
        let node = self.node(id);
        node.start..node.end
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Named children only, skipping anonymous tokens
    pub fn named_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(move |child| self.node(*child).named)
    }

    /// First direct child of the given kind
    pub fn child_of_kind(&self, id: NodeId, kind: &str) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|child| self.kind(*child) == kind)
    }

    /// Source text covered by a node
    pub fn text(&self, id: NodeId) -> Cow<'_, str> {
        self.slice(self.range(id))
    }

    /// Source text for an arbitrary byte range, clamped to the document
    pub fn slice(&self, range: Range<usize>) -> Cow<'_, str> {
        let len = self.text.len_bytes();
        let end = range.end.min(len);
        let start = range.start.min(end);
        match self.text.get_byte_slice(start..end) {
            Some(slice) => slice.into(),
            None => Cow::Borrowed(""),
        }
    }

    /// Strict ancestors of a node, nearest first
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// Nodes overlapping `range`, in pre-order (document order)
    ///
    /// Subtrees entirely outside the range are not visited. Zero-width nodes
    /// (missing tokens inserted by error recovery) are skipped.
    pub fn nodes_in_range(&self, range: Range<usize>) -> Vec<NodeId> {
        let mut out = Vec::new();
        if self.nodes.is_empty() {
            return out;
        }
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            if node.start >= range.end || node.end <= range.start || node.start == node.end {
                continue;
            }
            out.push(id);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// Outermost non-root node starting exactly at `offset`
    pub fn largest_node_starting_at(&self, offset: usize) -> Option<NodeId> {
        let mut current = self.root();
        loop {
            let next = self.children(current).iter().copied().find(|child| {
                let node = self.node(*child);
                node.start <= offset && offset < node.end
            })?;
            if self.node(next).start == offset {
                return Some(next);
            }
            current = next;
        }
    }

    /// Innermost node whose range contains `offset` (the root if none does)
    pub fn smallest_node_covering(&self, offset: usize) -> NodeId {
        let mut current = self.root();
        while let Some(next) = self.children(current).iter().copied().find(|child| {
            let node = self.node(*child);
            node.start <= offset && offset < node.end
        }) {
            current = next;
        }
        current
    }

    /// Number of lines in the source (a trailing newline opens an empty line)
    pub fn line_count(&self) -> usize {
        self.text.len_lines()
    }

    /// 0-based line containing a byte offset
    pub fn line_of(&self, offset: usize) -> usize {
        self.text.byte_to_line(offset.min(self.text.len_bytes()))
    }

    /// Byte offset of the first character of a line
    pub fn line_start(&self, line: usize) -> usize {
        self.text.line_to_byte(line.min(self.text.len_lines()))
    }

    /// Character column of a byte offset within its line
    pub fn column_of(&self, offset: usize) -> usize {
        let offset = offset.min(self.text.len_bytes());
        let line = self.text.byte_to_line(offset);
        self.text.byte_to_char(offset) - self.text.line_to_char(line)
    }

    /// Byte offset of the first non-whitespace character on a line
    ///
    /// For a blank line this is the offset of the line terminator (or the end
    /// of the document on the last line).
    pub fn line_bol(&self, line: usize) -> usize {
        if line >= self.text.len_lines() {
            return self.text.len_bytes();
        }
        let mut offset = self.text.line_to_byte(line);
        for ch in self.text.line(line).chars() {
            if ch == ' ' || ch == '\t' {
                offset += ch.len_utf8();
            } else {
                break;
            }
        }
        offset
    }

    /// Whether a line holds nothing but whitespace
    pub fn line_is_blank(&self, line: usize) -> bool {
        if line >= self.text.len_lines() {
            return true;
        }
        self.text.line(line).chars().all(char::is_whitespace)
    }

    /// Visual width of a line's leading whitespace, tabs expanded to `tab_width`
    pub fn indentation_of_line(&self, line: usize, tab_width: usize) -> usize {
        if line >= self.text.len_lines() {
            return 0;
        }
        let tab_width = tab_width.max(1);
        let mut column = 0;
        for ch in self.text.line(line).chars() {
            match ch {
                ' ' => column += 1,
                '\t' => column += tab_width - (column % tab_width),
                _ => break,
            }
        }
        column
    }

    /// The whole source as a rope
    pub fn rope(&self) -> &Rope {
        &self.text
    }
}

/// Iterator over a node's ancestors
pub struct Ancestors<'a> {
    tree: &'a SyntaxTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}
