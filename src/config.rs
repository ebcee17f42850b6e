//! Mode configuration
//!
//! Read from `~/.config/ktmode/config.yaml`. Every field has a default, so a
//! missing file, a partial file and an unreadable file all produce a usable
//! configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::indent::IndentSettings;
use crate::outline::DEFAULT_DEPTH;
use crate::syntax::{RuleSet, RuleSpec};

/// Settings threaded into highlighting, indentation and outline extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeConfig {
    /// Columns per indentation step
    #[serde(default = "default_indent_offset")]
    pub indent_offset: usize,

    /// Width of a tab when measuring existing indentation
    #[serde(default = "default_tab_width")]
    pub tab_width: usize,

    /// Feature groups with a tier up to this level are active
    #[serde(default = "default_highlight_level")]
    pub highlight_level: u8,

    /// Explicit feature list, replacing the level-based selection
    #[serde(default)]
    pub features: Option<Vec<String>>,

    #[serde(default = "default_outline_depth")]
    pub outline_depth: usize,

    /// Rules appended to the built-in highlight table
    #[serde(default)]
    pub extra_rules: Vec<RuleSpec>,
}

fn default_indent_offset() -> usize {
    4
}

fn default_tab_width() -> usize {
    4
}

fn default_highlight_level() -> u8 {
    3
}

fn default_outline_depth() -> usize {
    DEFAULT_DEPTH
}

impl Default for ModeConfig {
    fn default() -> Self {
        Self {
            indent_offset: default_indent_offset(),
            tab_width: default_tab_width(),
            highlight_level: default_highlight_level(),
            features: None,
            outline_depth: default_outline_depth(),
            extra_rules: Vec::new(),
        }
    }
}

impl ModeConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults on any error
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn indent_settings(&self) -> IndentSettings {
        IndentSettings {
            unit_width: self.indent_offset,
            tab_width: self.tab_width,
        }
    }

    /// Active feature group names for a rule set
    pub fn active_features(&self, rules: &RuleSet) -> Vec<String> {
        match &self.features {
            Some(features) => features.clone(),
            None => rules.features_for_level(self.highlight_level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::kotlin;

    #[test]
    fn test_defaults() {
        let config = ModeConfig::default();
        assert_eq!(config.indent_offset, 4);
        assert_eq!(config.tab_width, 4);
        assert_eq!(config.highlight_level, 3);
        assert_eq!(config.outline_depth, DEFAULT_DEPTH);
        assert!(config.features.is_none());
        assert!(config.extra_rules.is_empty());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: ModeConfig = serde_yaml::from_str("indent_offset: 2\n").unwrap();
        assert_eq!(config.indent_offset, 2);
        assert_eq!(config.tab_width, 4);
        assert_eq!(config.indent_settings().unit_width, 2);
    }

    #[test]
    fn test_active_features() {
        let rules = kotlin::rule_set();
        let mut config = ModeConfig {
            highlight_level: 1,
            ..ModeConfig::default()
        };
        assert_eq!(
            config.active_features(&rules),
            vec!["comment", "string", "number", "definition"]
        );

        config.features = Some(vec!["keyword".into()]);
        assert_eq!(config.active_features(&rules), vec!["keyword"]);
    }
}
