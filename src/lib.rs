//! ktmode - Kotlin editing support
//!
//! Syntax-tree analyses behind a Kotlin editing mode: rule-based highlighting,
//! context-based indentation, outline extraction and the glue around them
//! (running a test under the cursor, jumping between source and test files).
//!
//! All analyses read an immutable [`tree::SyntaxTree`] snapshot and the rule
//! tables; none of them keeps state between calls.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod gradle;
pub mod indent;
pub mod mode;
pub mod navigation;
pub mod outline;
pub mod qualified;
pub mod syntax;
pub mod tracing;
pub mod tree;

// Re-export commonly used types
pub use config::ModeConfig;
pub use mode::KotlinMode;
pub use outline::{Outline, OutlineEntry, OutlineKind};
pub use qualified::{qualify, QualifiedName, SymbolContext, TestTargetError};
pub use syntax::{Span, SyntaxHighlights};
pub use tree::{NodeId, SyntaxTree};
