//! Skill rule definitions
//!
//! Defines the configured skills, their triggers, and the order-preserving
//! rule set the activation engine evaluates.

pub mod file;

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

pub use file::{RulesError, SkillRules};

/// Priority tier of a skill, ordered from most to least urgent
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Must be loaded before responding
    Critical,

    /// Strongly recommended
    High,

    /// Suggested
    #[default]
    Medium,

    /// Optional
    Low,
}

impl Priority {
    /// All tiers in rank order
    pub const ALL: [Priority; 4] = [
        Priority::Critical,
        Priority::High,
        Priority::Medium,
        Priority::Low,
    ];

    /// Ranking ordinal (critical = 0, low = 3)
    pub fn ordinal(self) -> u8 {
        match self {
            Priority::Critical => 0,
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }

    /// Check if this priority is at least as urgent as `threshold`
    pub fn is_within(self, threshold: Priority) -> bool {
        self <= threshold
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What kind of skill a rule describes. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillKind {
    Guardrail,
    #[default]
    Domain,
}

/// How strongly the report should insist on a skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Enforcement {
    /// Execution should not proceed until the skill is used
    Block,

    #[default]
    Suggest,

    Warn,
}

/// A trigger list written as `null` is treated like a missing one
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Triggers evaluated against the prompt text
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PromptTriggers {
    /// Case-insensitive substrings
    #[serde(deserialize_with = "null_as_empty")]
    pub keywords: Vec<String>,

    /// Case-insensitive regex sources
    #[serde(deserialize_with = "null_as_empty")]
    pub intent_patterns: Vec<String>,
}

/// Triggers evaluated against the files in context
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FileTriggers {
    /// Globs a path must match
    #[serde(deserialize_with = "null_as_empty")]
    pub path_patterns: Vec<String>,

    /// Globs that rule a path out before inclusion is checked
    #[serde(deserialize_with = "null_as_empty")]
    pub path_exclusions: Vec<String>,
}

/// Conditions under which the host drops a rule before evaluation
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SkipConditions {
    /// Environment variable that disables the rule when set
    pub env_override: Option<String>,
}

/// A single configured skill
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRule {
    #[serde(rename = "type", default)]
    pub kind: SkillKind,

    #[serde(default)]
    pub enforcement: Enforcement,

    #[serde(default)]
    pub priority: Priority,

    /// Shown verbatim in the report
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub prompt_triggers: Option<PromptTriggers>,

    #[serde(default)]
    pub file_triggers: Option<FileTriggers>,

    /// Extra text shown for blocking skills
    #[serde(default)]
    pub block_message: Option<String>,

    #[serde(default)]
    pub skip_conditions: Option<SkipConditions>,
}

impl SkillRule {
    /// Create a rule with no triggers
    pub fn new(priority: Priority, description: impl Into<String>) -> Self {
        Self {
            kind: SkillKind::default(),
            enforcement: Enforcement::default(),
            priority,
            description: description.into(),
            prompt_triggers: None,
            file_triggers: None,
            block_message: None,
            skip_conditions: None,
        }
    }

    pub fn with_enforcement(mut self, enforcement: Enforcement) -> Self {
        self.enforcement = enforcement;
        self
    }

    pub fn with_block_message(mut self, message: impl Into<String>) -> Self {
        self.block_message = Some(message.into());
        self
    }

    pub fn with_env_override(mut self, var: impl Into<String>) -> Self {
        self.skip_conditions = Some(SkipConditions {
            env_override: Some(var.into()),
        });
        self
    }

    /// Set the prompt keywords
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prompt_triggers.get_or_insert_with(Default::default).keywords =
            keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Set the prompt intent regexes
    pub fn with_intent_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prompt_triggers
            .get_or_insert_with(Default::default)
            .intent_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Set the file path globs and their exclusions
    pub fn with_path_patterns<I, S, E, T>(mut self, patterns: I, exclusions: E) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        E: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.file_triggers = Some(FileTriggers {
            path_patterns: patterns.into_iter().map(Into::into).collect(),
            path_exclusions: exclusions.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Whether any trigger block is configured
    pub fn has_triggers(&self) -> bool {
        self.prompt_triggers.is_some() || self.file_triggers.is_some()
    }

    /// Environment variable that disables this rule, if any
    pub fn env_override(&self) -> Option<&str> {
        self.skip_conditions
            .as_ref()
            .and_then(|s| s.env_override.as_deref())
            .filter(|var| !var.is_empty())
    }
}

/// Named rules in configuration order
///
/// Order matters: it is the tie-break between rules of equal priority.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    entries: Vec<(String, SkillRule)>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a rule. A rule with the same name is replaced in place.
    pub fn insert(&mut self, name: impl Into<String>, rule: SkillRule) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = rule,
            None => self.entries.push((name, rule)),
        }
    }

    /// Builder form of [`RuleSet::insert`]
    pub fn with_rule(mut self, name: impl Into<String>, rule: SkillRule) -> Self {
        self.insert(name, rule);
        self
    }

    pub fn get(&self, name: &str) -> Option<&SkillRule> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, rule)| rule)
    }

    /// Iterate rules in configuration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SkillRule)> {
        self.entries.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop rules whose `envOverride` variable is reported as set by `is_set`
    pub fn without_overridden<F>(mut self, is_set: F) -> Self
    where
        F: Fn(&str) -> bool,
    {
        self.entries.retain(|(name, rule)| match rule.env_override() {
            Some(var) if is_set(var) => {
                tracing::debug!(rule = %name, var, "skill rule skipped by environment override");
                false
            }
            _ => true,
        });
        self
    }
}

impl FromIterator<(String, SkillRule)> for RuleSet {
    fn from_iter<T: IntoIterator<Item = (String, SkillRule)>>(iter: T) -> Self {
        let mut set = RuleSet::new();
        for (name, rule) in iter {
            set.insert(name, rule);
        }
        set
    }
}

impl<'de> Deserialize<'de> for RuleSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RuleSetVisitor;

        impl<'de> Visitor<'de> for RuleSetVisitor {
            type Value = RuleSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of skill name to skill rule")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                // Visit entries as they appear so document order survives
                let mut set = RuleSet::new();
                while let Some((name, rule)) = map.next_entry::<String, SkillRule>()? {
                    set.insert(name, rule);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_map(RuleSetVisitor)
    }
}
