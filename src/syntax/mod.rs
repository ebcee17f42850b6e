//! Syntax highlighting module
//!
//! Provides tree-sitter based syntax highlighting with:
//! - Language detection from file extensions
//! - Parsing into an immutable arena tree
//! - Declarative rule tables grouped into toggleable features
//! - Override-aware resolution into renderer spans
//!
//! ## Architecture
//!
//! ```text
//! source → ParserState::parse → SyntaxTree
//!        → matcher::capture (rules × nodes, strings carved)
//!        → resolve_spans → Vec<Span> → SyntaxHighlights (per line)
//! ```

mod carve;
mod highlights;
pub mod kotlin;
mod languages;
mod matcher;
mod parser;
mod rules;

pub use carve::{carve, carve_gaps};
pub use highlights::{
    highlight_id_for_name, highlight_name, resolve_spans, Capture, HighlightId, HighlightToken,
    LineHighlights, Span, SyntaxHighlights, HIGHLIGHT_NAMES,
};
pub use languages::LanguageId;
pub use matcher::{capture, highlight};
pub use parser::ParserState;
pub use rules::{CarveKinds, FeatureGroup, Predicate, PredicateSpec, Rule, RuleSet, RuleSpec};
