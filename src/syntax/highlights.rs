//! Syntax highlighting data structures
//!
//! Defines the tag vocabulary, spans and captures, override resolution and
//! the per-line token layout handed to renderers.

use std::collections::HashMap;
use std::ops::Range;

use serde::Serialize;

use super::languages::LanguageId;
use crate::tree::SyntaxTree;

/// Capture names a highlight rule may use.
/// Index into this array is the HighlightId.
pub const HIGHLIGHT_NAMES: &[&str] = &[
    "attribute",             // annotations (@Test)
    "boolean",               // true, false
    "comment",               // line, block and shebang comments
    "constant",              // ALL_CAPS identifiers, enum entries
    "constant.builtin",      // null
    "embedded",              // interpolated expressions inside strings
    "error",                 // parse errors
    "escape",                // character escapes inside strings
    "function",              // declared function names
    "function.builtin",      // println, listOf, require
    "function.call",         // call targets
    "keyword",               // fun, val, class, contextual it/field/this
    "label",                 // return@label
    "number",                // integer, long, hex, real literals
    "operator",              // + - * / && ||
    "property",              // navigation targets (a.b)
    "punctuation",           // general
    "punctuation.bracket",   // ( ) [ ] { }
    "punctuation.delimiter", // . , ; :
    "punctuation.special",   // string interpolation markers ${ }
    "string",                // string and character literals
    "type",                  // type identifiers, capitalised call targets
    "type.builtin",          // Int, String, Unit
    "variable",              // declared variables
    "variable.builtin",      // this, super
    "variable.parameter",    // parameters
];

/// Index into HIGHLIGHT_NAMES
pub type HighlightId = u16;

/// Capture name for a highlight ID
pub fn highlight_name(id: HighlightId) -> &'static str {
    HIGHLIGHT_NAMES.get(id as usize).copied().unwrap_or("unknown")
}

/// Look up highlight ID by capture name
pub fn highlight_id_for_name(name: &str) -> Option<HighlightId> {
    // Handle hierarchical names: try exact match first, then progressively shorter
    // parents (e.g. "keyword.control.import" -> "keyword.control" -> "keyword").
    let mut current = name;
    loop {
        if let Some(pos) = HIGHLIGHT_NAMES.iter().position(|&n| n == current) {
            return Some(pos as HighlightId);
        }

        let Some(dot_pos) = current.rfind('.') else {
            break;
        };
        current = &current[..dot_pos];
    }

    None
}

/// A classified, half-open byte range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub highlight: HighlightId,
}

impl Span {
    pub fn new(start: usize, end: usize, highlight: HighlightId) -> Self {
        Self {
            start,
            end,
            highlight,
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn name(&self) -> &'static str {
        highlight_name(self.highlight)
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A span as produced by one rule, before resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capture {
    pub span: Span,
    /// Whether the producing rule replaces earlier classifications
    pub overrides: bool,
}

/// Resolve captures (in evaluation order) to at most one tag per byte
///
/// A non-override capture only fills bytes nothing earlier has classified;
/// an override capture replaces whatever earlier captures put there. The
/// result is sorted, disjoint and clipped to `range`; adjacent bytes with
/// the same tag are merged.
pub fn resolve_spans(captures: &[Capture], range: Range<usize>) -> Vec<Span> {
    if range.start >= range.end {
        return Vec::new();
    }

    let mut painted: Vec<Option<HighlightId>> = vec![None; range.end - range.start];
    for capture in captures {
        let start = capture.span.start.max(range.start);
        let end = capture.span.end.min(range.end);
        if start >= end {
            continue;
        }
        for slot in &mut painted[start - range.start..end - range.start] {
            if capture.overrides || slot.is_none() {
                *slot = Some(capture.span.highlight);
            }
        }
    }

    let mut spans: Vec<Span> = Vec::new();
    for (i, slot) in painted.into_iter().enumerate() {
        let Some(highlight) = slot else {
            continue;
        };
        let offset = range.start + i;
        match spans.last_mut() {
            Some(last) if last.end == offset && last.highlight == highlight => last.end += 1,
            _ => spans.push(Span::new(offset, offset + 1, highlight)),
        }
    }
    spans
}

/// A single highlighted span within a line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightToken {
    /// Start column (0-indexed, inclusive)
    pub start_col: usize,
    /// End column (exclusive)
    pub end_col: usize,
    /// Index into HIGHLIGHT_NAMES
    pub highlight: HighlightId,
}

/// Highlight information for a single line
#[derive(Debug, Clone, Default)]
pub struct LineHighlights {
    /// Tokens sorted by start_col
    pub tokens: Vec<HighlightToken>,
}

impl LineHighlights {
    /// Get the highlight ID for a given column, if any
    pub fn highlight_at(&self, col: usize) -> Option<HighlightId> {
        for token in &self.tokens {
            if col >= token.start_col && col < token.end_col {
                return Some(token.highlight);
            }
            if token.start_col > col {
                break; // tokens are sorted, no need to continue
            }
        }
        None
    }
}

/// Resolved highlights laid out by line, columns in characters
#[derive(Debug, Clone)]
pub struct SyntaxHighlights {
    /// Map of line number (0-indexed) → tokens
    pub lines: HashMap<usize, LineHighlights>,
    pub language: LanguageId,
}

impl Default for SyntaxHighlights {
    fn default() -> Self {
        Self::new(LanguageId::PlainText)
    }
}

impl SyntaxHighlights {
    /// Create new empty highlights for a language
    pub fn new(language: LanguageId) -> Self {
        Self {
            lines: HashMap::new(),
            language,
        }
    }

    /// Lay resolved spans out per line, splitting spans that cross lines
    pub fn from_spans(tree: &SyntaxTree, spans: &[Span], language: LanguageId) -> Self {
        let mut highlights = Self::new(language);

        for span in spans {
            let start_line = tree.line_of(span.start);
            let end_line = tree.line_of(span.end);

            for row in start_line..=end_line {
                let start_col = if row == start_line {
                    tree.column_of(span.start)
                } else {
                    0
                };
                let end_col = if row == end_line {
                    tree.column_of(span.end)
                } else {
                    line_char_len(tree, row)
                };

                if start_col < end_col {
                    highlights
                        .lines
                        .entry(row)
                        .or_default()
                        .tokens
                        .push(HighlightToken {
                            start_col,
                            end_col,
                            highlight: span.highlight,
                        });
                }
            }
        }

        // Sort tokens within each line by start column
        for line_highlights in highlights.lines.values_mut() {
            line_highlights
                .tokens
                .sort_by_key(|t| (t.start_col, t.end_col));
        }

        highlights
    }

    /// Get highlights for a specific line
    pub fn get_line(&self, line: usize) -> Option<&LineHighlights> {
        self.lines.get(&line)
    }

    /// Get highlight tokens for a line, or empty slice if none
    pub fn get_line_tokens(&self, line: usize) -> &[HighlightToken] {
        self.lines
            .get(&line)
            .map(|lh| lh.tokens.as_slice())
            .unwrap_or(&[])
    }
}

/// Characters on a line, excluding its terminator
fn line_char_len(tree: &SyntaxTree, row: usize) -> usize {
    let line = tree.rope().line(row);
    line.chars()
        .filter(|ch| *ch != '\n' && *ch != '\r')
        .count()
}
