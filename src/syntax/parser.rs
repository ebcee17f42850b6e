//! Tree-sitter parser state
//!
//! Owns one tree-sitter parser per language and converts each parse into an
//! arena [`SyntaxTree`] snapshot. Every call parses from scratch; no tree is
//! carried between calls.

use std::collections::HashMap;

use tree_sitter::{Parser, Tree};

use super::languages::LanguageId;
use crate::tree::{SyntaxTree, TreeBuilder};

/// Parser instances per language (tree-sitter parsers are !Sync)
pub struct ParserState {
    parsers: HashMap<LanguageId, Parser>,
}

impl ParserState {
    /// Create a new parser state with every grammar initialized
    pub fn new() -> Self {
        let mut state = Self {
            parsers: HashMap::new(),
        };
        state.init_language(LanguageId::Kotlin);
        state
    }

    fn init_language(&mut self, lang: LanguageId) {
        let ts_lang = match lang {
            LanguageId::Kotlin => tree_sitter_kotlin_codanna::language(),
            // No grammar for plain text
            LanguageId::PlainText => return,
        };

        let mut parser = Parser::new();
        if let Err(e) = parser.set_language(&ts_lang) {
            tracing::error!("Failed to set language for {:?}: {}", lang, e);
            return;
        }
        self.parsers.insert(lang, parser);
    }

    /// Whether a grammar is available for `language`
    pub fn has_parser(&self, language: LanguageId) -> bool {
        self.parsers.contains_key(&language)
    }

    /// Parse `source` into a fresh tree
    ///
    /// Returns `None` when no grammar is available or tree-sitter gives up;
    /// callers treat that as "nothing to highlight, indent or outline".
    pub fn parse(&mut self, source: &str, language: LanguageId) -> Option<SyntaxTree> {
        let Some(parser) = self.parsers.get_mut(&language) else {
            if language.has_grammar() {
                tracing::warn!("No parser for language {:?}", language);
            }
            return None;
        };

        match parser.parse(source, None) {
            Some(tree) => {
                let syntax = build_tree(&tree, source);
                tracing::trace!(
                    "Parsed {:?}: {} bytes, {} nodes",
                    language,
                    source.len(),
                    syntax.len()
                );
                Some(syntax)
            }
            None => {
                tracing::error!("Parse failed for {:?}", language);
                None
            }
        }
    }
}

impl Default for ParserState {
    fn default() -> Self {
        Self::new()
    }
}

/// Copy a tree-sitter tree into the arena with a pre-order cursor walk
fn build_tree(tree: &Tree, source: &str) -> SyntaxTree {
    let mut builder = TreeBuilder::new(source);
    let mut cursor = tree.walk();

    loop {
        let node = cursor.node();
        builder.open(node.kind(), node.is_named(), node.byte_range());
        if cursor.goto_first_child() {
            continue;
        }
        builder.finish_node();

        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return builder.build();
            }
            builder.finish_node();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kotlin_parsing() {
        let mut state = ParserState::new();
        let source = "class Foo {\n    fun bar() = 1\n}\n";
        let tree = state.parse(source, LanguageId::Kotlin).unwrap();

        assert_eq!(tree.kind(tree.root()), "source_file");
        let class = tree.child_of_kind(tree.root(), "class_declaration").unwrap();
        assert_eq!(tree.text(class), "class Foo {\n    fun bar() = 1\n}");
        assert!(tree.ancestors(class).all(|a| a == tree.root()));
    }

    #[test]
    fn test_children_stay_inside_parents() {
        let mut state = ParserState::new();
        let source = "package a.b\n\nfun main() {\n    println(\"x ${1 + 2}\")\n}\n";
        let tree = state.parse(source, LanguageId::Kotlin).unwrap();

        for id in tree.nodes_in_range(0..source.len()) {
            let range = tree.range(id);
            let mut last_end = range.start;
            for child in tree.children(id) {
                let child_range = tree.range(*child);
                assert!(child_range.start >= last_end);
                assert!(child_range.end <= range.end);
                assert_eq!(tree.parent(*child), Some(id));
                last_end = child_range.end;
            }
        }
    }

    #[test]
    fn test_plain_text_no_parsing() {
        let mut state = ParserState::new();
        assert!(state.parse("Hello, world!", LanguageId::PlainText).is_none());
        assert!(state.has_parser(LanguageId::Kotlin));
    }
}
