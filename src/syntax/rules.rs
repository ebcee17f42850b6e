//! Declarative highlight rules
//!
//! A rule pairs a [`Predicate`] over one candidate node with a capture tag.
//! Rules are bundled into named [`FeatureGroup`]s that callers switch on and
//! off together; a [`RuleSet`] is the ordered list of groups. Rule sets are
//! plain values built once and passed to the matcher by reference.
//!
//! Rules can also come from configuration as [`RuleSpec`]s. A spec that
//! cannot be compiled (unknown predicate type, bad regex, unknown tag) turns
//! into a rule that never matches instead of failing the whole table.

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::highlights::{highlight_id_for_name, HighlightId};
use crate::tree::{NodeId, SyntaxTree};

/// Test applied to a single candidate node
#[derive(Debug, Clone)]
pub enum Predicate {
    /// Node kind equals
    Kind(String),
    /// Node kind is one of
    AnyKind(Vec<String>),
    /// Node kind equals and its text is one of a literal set
    Text { kind: String, texts: Vec<String> },
    /// Node kind equals and its text matches
    Regex { kind: String, regex: Regex },
    /// Inner predicate holds and the parent chain (nearest first) has these kinds
    Within {
        parents: Vec<String>,
        inner: Box<Predicate>,
    },
    /// Node kind equals and its child at `index` (counting anonymous tokens)
    /// satisfies `child`
    ChildAt {
        kind: String,
        index: usize,
        child: Box<Predicate>,
    },
    /// Placeholder for rules that failed to compile
    Never,
}

impl Predicate {
    pub fn kind(kind: &str) -> Self {
        Predicate::Kind(kind.to_string())
    }

    pub fn any_kind(kinds: &[&str]) -> Self {
        Predicate::AnyKind(kinds.iter().map(|k| k.to_string()).collect())
    }

    pub fn text(kind: &str, texts: &[&str]) -> Self {
        Predicate::Text {
            kind: kind.to_string(),
            texts: texts.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Kind plus regex test; an invalid pattern yields [`Predicate::Never`]
    pub fn regex(kind: &str, pattern: &str) -> Self {
        match Regex::new(pattern) {
            Ok(regex) => Predicate::Regex {
                kind: kind.to_string(),
                regex,
            },
            Err(e) => {
                tracing::warn!("Dropping rule on {}: invalid regex {:?}: {}", kind, pattern, e);
                Predicate::Never
            }
        }
    }

    pub fn within(parents: &[&str], inner: Predicate) -> Self {
        Predicate::Within {
            parents: parents.iter().map(|p| p.to_string()).collect(),
            inner: Box::new(inner),
        }
    }

    pub fn child_at(kind: &str, index: usize, child: Predicate) -> Self {
        Predicate::ChildAt {
            kind: kind.to_string(),
            index,
            child: Box::new(child),
        }
    }

    /// Every node kind the predicate refers to, parents included
    pub fn node_kinds(&self) -> Vec<&str> {
        match self {
            Predicate::Kind(kind)
            | Predicate::Text { kind, .. }
            | Predicate::Regex { kind, .. } => vec![kind.as_str()],
            Predicate::AnyKind(kinds) => kinds.iter().map(String::as_str).collect(),
            Predicate::Within { parents, inner } => {
                let mut kinds: Vec<_> = parents.iter().map(String::as_str).collect();
                kinds.extend(inner.node_kinds());
                kinds
            }
            Predicate::ChildAt { kind, child, .. } => {
                let mut kinds = vec![kind.as_str()];
                kinds.extend(child.node_kinds());
                kinds
            }
            Predicate::Never => Vec::new(),
        }
    }

    pub fn matches(&self, tree: &SyntaxTree, node: NodeId) -> bool {
        match self {
            Predicate::Kind(kind) => tree.kind(node) == kind.as_str(),
            Predicate::AnyKind(kinds) => kinds.iter().any(|k| tree.kind(node) == k.as_str()),
            Predicate::Text { kind, texts } => {
                tree.kind(node) == kind.as_str() && {
                    let text = tree.text(node);
                    texts.iter().any(|t| t.as_str() == text)
                }
            }
            Predicate::Regex { kind, regex } => {
                tree.kind(node) == kind.as_str() && regex.is_match(&tree.text(node))
            }
            Predicate::Within { parents, inner } => {
                inner.matches(tree, node) && {
                    let mut ancestors = tree.ancestors(node);
                    parents
                        .iter()
                        .all(|p| ancestors.next().is_some_and(|a| tree.kind(a) == p.as_str()))
                }
            }
            Predicate::ChildAt { kind, index, child } => {
                tree.kind(node) == kind.as_str()
                    && tree
                        .children(node)
                        .get(*index)
                        .is_some_and(|c| child.matches(tree, *c))
            }
            Predicate::Never => false,
        }
    }
}

/// Kinds whose direct children are subtracted from a carved capture
pub type CarveKinds = &'static [&'static str];

/// One classification rule
#[derive(Debug, Clone)]
pub struct Rule {
    pub predicate: Predicate,
    pub highlight: HighlightId,
    /// Replace earlier classifications instead of filling around them
    pub overrides: bool,
    /// Emit the node's range minus these child kinds instead of the whole node
    pub carve: Option<CarveKinds>,
}

/// Named bucket of rules enabled and disabled together
#[derive(Debug, Clone)]
pub struct FeatureGroup {
    pub name: String,
    /// Priority tier; level N enables every group with `level <= N`
    pub level: u8,
    pub rules: Vec<Rule>,
    overriding: bool,
}

impl FeatureGroup {
    pub fn new(name: &str, level: u8) -> Self {
        Self {
            name: name.to_string(),
            level,
            rules: Vec::new(),
            overriding: false,
        }
    }

    /// Rules added after this call override earlier groups
    pub fn overriding(mut self) -> Self {
        self.overriding = true;
        self
    }

    pub fn rule(self, predicate: Predicate, tag: &str) -> Self {
        self.push(predicate, tag, None)
    }

    /// Rule whose capture is carved around `special` child kinds
    pub fn carved(self, predicate: Predicate, tag: &str, special: CarveKinds) -> Self {
        self.push(predicate, tag, Some(special))
    }

    fn push(mut self, predicate: Predicate, tag: &str, carve: Option<CarveKinds>) -> Self {
        let overrides = self.overriding;
        self.add(predicate, tag, overrides, carve);
        self
    }

    fn add(&mut self, predicate: Predicate, tag: &str, overrides: bool, carve: Option<CarveKinds>) {
        let Some(highlight) = highlight_id_for_name(tag) else {
            tracing::warn!("Dropping rule in feature {}: unknown tag {:?}", self.name, tag);
            return;
        };
        self.rules.push(Rule {
            predicate,
            highlight,
            overrides,
            carve,
        });
    }
}

/// Ordered feature groups; declaration order is evaluation order
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    groups: Vec<FeatureGroup>,
}

impl RuleSet {
    pub fn new(groups: Vec<FeatureGroup>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[FeatureGroup] {
        &self.groups
    }

    pub fn group(&self, name: &str) -> Option<&FeatureGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Names of the groups a level activates, in declaration order
    pub fn features_for_level(&self, level: u8) -> Vec<String> {
        self.groups
            .iter()
            .filter(|g| g.level <= level)
            .map(|g| g.name.clone())
            .collect()
    }

    /// Append configured rules, joining existing groups by name
    pub fn extend(&mut self, specs: &[RuleSpec]) {
        for spec in specs {
            let predicate = spec.predicate.compile();
            let index = match self.groups.iter().position(|g| g.name == spec.feature) {
                Some(index) => index,
                None => {
                    self.groups.push(FeatureGroup::new(&spec.feature, spec.level));
                    self.groups.len() - 1
                }
            };
            self.groups[index].add(predicate, &spec.tag, spec.overrides, None);
        }
    }
}

fn default_level() -> u8 {
    1
}

/// Highlight rule as written in configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSpec {
    /// Feature group to join (or create)
    pub feature: String,
    /// Tier of a newly created group
    #[serde(default = "default_level")]
    pub level: u8,
    /// Capture tag, one of `HIGHLIGHT_NAMES` (or a dotted child of one)
    pub tag: String,
    #[serde(default, rename = "override")]
    pub overrides: bool,
    pub predicate: PredicateSpec,
}

/// Serializable form of [`Predicate`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PredicateSpec {
    Kind {
        kind: String,
    },
    Text {
        kind: String,
        texts: Vec<String>,
    },
    Regex {
        kind: String,
        pattern: String,
    },
    Within {
        parents: Vec<String>,
        predicate: Box<PredicateSpec>,
    },
    ChildAt {
        kind: String,
        index: usize,
        child: Box<PredicateSpec>,
    },
    #[serde(other)]
    Unknown,
}

impl PredicateSpec {
    pub fn compile(&self) -> Predicate {
        match self {
            PredicateSpec::Kind { kind } => Predicate::Kind(kind.clone()),
            PredicateSpec::Text { kind, texts } => Predicate::Text {
                kind: kind.clone(),
                texts: texts.clone(),
            },
            PredicateSpec::Regex { kind, pattern } => Predicate::regex(kind, pattern),
            PredicateSpec::Within { parents, predicate } => Predicate::Within {
                parents: parents.clone(),
                inner: Box::new(predicate.compile()),
            },
            PredicateSpec::ChildAt { kind, index, child } => Predicate::ChildAt {
                kind: kind.clone(),
                index: *index,
                child: Box::new(child.compile()),
            },
            PredicateSpec::Unknown => {
                tracing::warn!("Dropping rule with unrecognized predicate type");
                Predicate::Never
            }
        }
    }
}
