//! Kotlin editing mode
//!
//! Bundles the grammar, the highlight and indentation tables and the user
//! configuration behind one value. The `*_source` methods parse first and
//! degrade to empty output when no tree is available.

use std::ops::Range;

use crate::config::ModeConfig;
use crate::indent::{self, IndentRule};
use crate::outline::{extract_outline, Outline};
use crate::qualified::SymbolContext;
use crate::syntax::{self, kotlin, LanguageId, ParserState, RuleSet, Span};
use crate::tree::SyntaxTree;

pub struct KotlinMode {
    parser: ParserState,
    rules: RuleSet,
    indent_rules: Vec<IndentRule>,
    features: Vec<String>,
    config: ModeConfig,
}

impl KotlinMode {
    pub fn new(config: ModeConfig) -> Self {
        let mut rules = kotlin::rule_set();
        rules.extend(&config.extra_rules);
        let features = config.active_features(&rules);
        tracing::debug!(
            "Kotlin mode: {} feature groups, active: {}",
            rules.groups().len(),
            features.join(",")
        );
        Self {
            parser: ParserState::new(),
            rules,
            indent_rules: indent::kotlin_rules(),
            features,
            config,
        }
    }

    pub fn config(&self) -> &ModeConfig {
        &self.config
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Active feature group names
    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Replace the active feature groups
    pub fn set_features(&mut self, features: Vec<String>) {
        self.features = features;
    }

    pub fn parse(&mut self, source: &str) -> Option<SyntaxTree> {
        self.parser.parse(source, LanguageId::Kotlin)
    }

    /// Resolved spans for `range` of an already parsed tree
    pub fn highlight(&self, tree: &SyntaxTree, range: Range<usize>) -> Vec<Span> {
        syntax::highlight(tree, &self.rules, &self.features, range)
    }

    pub fn highlight_source(&mut self, source: &str, range: Range<usize>) -> Vec<Span> {
        match self.parse(source) {
            Some(tree) => self.highlight(&tree, range),
            None => Vec::new(),
        }
    }

    /// Target indentation column for `line`
    pub fn indent_line(&self, tree: &SyntaxTree, line: usize) -> usize {
        indent::indent_for_line(
            tree,
            &self.indent_rules,
            self.config.indent_settings(),
            line,
        )
    }

    /// `None` when the source could not be parsed: the caller keeps the
    /// line as it is
    pub fn indent_source(&mut self, source: &str, line: usize) -> Option<usize> {
        let tree = self.parse(source)?;
        Some(self.indent_line(&tree, line))
    }

    pub fn outline(&self, tree: &SyntaxTree) -> Outline {
        extract_outline(tree, self.config.outline_depth)
    }

    pub fn outline_source(&mut self, source: &str) -> Outline {
        match self.parse(source) {
            Some(tree) => self.outline(&tree),
            None => Outline::default(),
        }
    }

    /// Package, class and function names around `offset`
    pub fn symbol_context(&self, tree: &SyntaxTree, offset: usize) -> SymbolContext {
        SymbolContext::at(tree, offset)
    }
}

impl Default for KotlinMode {
    fn default() -> Self {
        Self::new(ModeConfig::default())
    }
}
