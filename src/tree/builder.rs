//! Incremental construction of a [`SyntaxTree`]
//!
//! Nodes are opened and closed in pre-order, the same order a tree-sitter
//! cursor walk produces them in.

use std::ops::Range;

use ropey::Rope;

use super::{Node, NodeId, SyntaxTree};

pub struct TreeBuilder {
    text: String,
    nodes: Vec<Node>,
    stack: Vec<NodeId>,
}

impl TreeBuilder {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            nodes: Vec::new(),
            stack: Vec::new(),
        }
    }

    /// Open a named node; subsequent nodes become its children until
    /// [`finish_node`](Self::finish_node)
    pub fn start_node(&mut self, kind: &'static str, range: Range<usize>) -> &mut Self {
        self.open(kind, true, range);
        self
    }

    /// Close the most recently opened node
    pub fn finish_node(&mut self) -> &mut Self {
        self.stack.pop();
        self
    }

    /// Add a named node without children
    pub fn leaf(&mut self, kind: &'static str, range: Range<usize>) -> &mut Self {
        self.open(kind, true, range);
        self.stack.pop();
        self
    }

    /// Add an anonymous token (keyword, punctuation)
    pub fn token(&mut self, kind: &'static str, range: Range<usize>) -> &mut Self {
        self.open(kind, false, range);
        self.stack.pop();
        self
    }

    pub(crate) fn open(&mut self, kind: &'static str, named: bool, range: Range<usize>) {
        let id = NodeId(self.nodes.len() as u32);
        let parent = self.stack.last().copied();

        if let Some(parent) = parent {
            let parent_node = &self.nodes[parent.index()];
            debug_assert!(
                parent_node.start <= range.start && range.end <= parent_node.end,
                "child {kind} {range:?} escapes parent {} {}..{}",
                parent_node.kind,
                parent_node.start,
                parent_node.end
            );
            self.nodes[parent.index()].children.push(id);
        } else {
            debug_assert!(self.nodes.is_empty(), "tree already has a root");
        }

        self.nodes.push(Node {
            kind,
            named,
            start: range.start,
            end: range.end,
            parent,
            children: Vec::new(),
        });
        self.stack.push(id);
    }

    /// Finish the tree; a builder that never opened a node yields a single
    /// anonymous root spanning the text
    pub fn build(mut self) -> SyntaxTree {
        if self.nodes.is_empty() {
            let len = self.text.len();
            self.open("", false, 0..len);
        }
        SyntaxTree {
            text: Rope::from_str(&self.text),
            nodes: self.nodes,
        }
    }
}
