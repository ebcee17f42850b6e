//! Dotted symbol names
//!
//! Build tools and navigation UIs address a symbol by joining its package,
//! container and member names with `.`. Kotlin lets identifiers be quoted
//! with backticks (`` `test something`() ``), so each segment drops one
//! leading and one trailing quote character before joining.

use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::tree::{NodeId, SyntaxTree};

const QUOTES: &[char] = &['`', '"', '\''];

/// Strip at most one quote character from each end of a segment
pub fn normalize_segment(segment: &str) -> &str {
    let segment = segment.strip_prefix(QUOTES).unwrap_or(segment);
    segment.strip_suffix(QUOTES).unwrap_or(segment)
}

/// Join normalized segments with `.`
///
/// Interior dots are not escaped: `["a.b", "c"]` and `["a", "b", "c"]` give
/// the same result.
pub fn qualify<S: AsRef<str>>(segments: &[S]) -> String {
    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            out.push('.');
        }
        out.push_str(normalize_segment(segment.as_ref()));
    }
    out
}

/// Ordered raw name segments, outermost first
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    segments: Vec<String>,
}

impl QualifiedName {
    pub fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    /// A copy of this name with one more segment
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The innermost segment, normalized
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(|s| normalize_segment(s))
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&qualify(&self.segments))
    }
}

impl Serialize for QualifiedName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A part of the test target that could not be found around the cursor
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TestTargetError {
    #[error("no package declaration in this file")]
    MissingPackage,
    #[error("cursor is not inside a class or object")]
    MissingClass,
    #[error("cursor is not inside a function")]
    MissingFunction,
}

/// Names enclosing a position in the source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolContext {
    pub package: Option<String>,
    /// Innermost enclosing class or object
    pub class: Option<String>,
    /// Innermost enclosing function
    pub function: Option<String>,
}

impl SymbolContext {
    pub fn at(tree: &SyntaxTree, offset: usize) -> Self {
        let package = tree
            .child_of_kind(tree.root(), "package_header")
            .and_then(|header| tree.child_of_kind(header, "identifier"))
            .map(|id| tree.text(id).into_owned());

        let start = tree.smallest_node_covering(offset);
        let chain = std::iter::once(start).chain(tree.ancestors(start));

        let mut class = None;
        let mut function = None;
        for node in chain {
            match tree.kind(node) {
                "class_declaration" | "object_declaration" if class.is_none() => {
                    class = name_of(tree, node, "type_identifier");
                }
                "function_declaration" if function.is_none() => {
                    function = name_of(tree, node, "simple_identifier");
                }
                _ => {}
            }
        }

        Self {
            package,
            class,
            function,
        }
    }

    /// `package.Class` for running every test in the enclosing class
    pub fn class_target(&self) -> Result<String, TestTargetError> {
        let package = self.package.as_deref().ok_or(TestTargetError::MissingPackage)?;
        let class = self.class.as_deref().ok_or(TestTargetError::MissingClass)?;
        Ok(qualify(&[package, class]))
    }

    /// `package.Class.function` for running the enclosing test function
    pub fn function_target(&self) -> Result<String, TestTargetError> {
        let package = self.package.as_deref().ok_or(TestTargetError::MissingPackage)?;
        let class = self.class.as_deref().ok_or(TestTargetError::MissingClass)?;
        let function = self
            .function
            .as_deref()
            .ok_or(TestTargetError::MissingFunction)?;
        Ok(qualify(&[package, class, function]))
    }
}

fn name_of(tree: &SyntaxTree, node: NodeId, kind: &str) -> Option<String> {
    tree.child_of_kind(node, kind)
        .map(|name| tree.text(name).into_owned())
}
