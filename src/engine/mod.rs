//! Skill activation engine
//!
//! Evaluates the configured rule set against a single request and ranks the
//! matches into priority tiers. Pure: no I/O, no environment lookups, no
//! state carried between calls.

pub mod evaluator;
pub mod matchers;
pub mod pattern;
pub mod ranking;

use std::fmt;

use serde::Serialize;

use crate::rules::{Priority, RuleSet, SkillRule};

pub use evaluator::{Evaluation, PatternDefect, PatternSource};
pub use ranking::{Activation, Tiers};

/// The request being evaluated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    /// Prompt text as the user typed it
    pub prompt: String,

    /// Files currently in context, in order
    pub file_paths: Vec<String>,
}

impl Request {
    pub fn new<I, S>(prompt: impl Into<String>, file_paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prompt: prompt.into(),
            file_paths: file_paths.into_iter().map(Into::into).collect(),
        }
    }
}

/// Which matcher fired for a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchKind {
    Keyword,
    Intent,
    FilePath,
}

impl MatchKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchKind::Keyword => "keyword",
            MatchKind::Intent => "intent",
            MatchKind::FilePath => "file-path",
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rule whose trigger fired
#[derive(Debug, Clone, PartialEq)]
pub struct Match<'a> {
    pub name: &'a str,
    pub rule: &'a SkillRule,
    pub kind: MatchKind,

    /// The keyword, intent pattern, or file path that fired
    pub evidence: String,
}

/// Everything one activation check produced
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<'a> {
    pub activation: Activation<'a>,
    pub defects: Vec<PatternDefect>,
}

/// Evaluate and rank in one step
pub fn activate<'a>(rules: &'a RuleSet, request: &Request) -> Outcome<'a> {
    let Evaluation { matches, defects } = evaluator::evaluate(rules, request);
    Outcome {
        activation: ranking::rank(matches),
        defects,
    }
}

/// Holds a loaded rule set and reports which skills a request activates
pub struct SkillActivator {
    rules: RuleSet,
    min_priority: Priority,
}

impl SkillActivator {
    /// Create an activator reporting every tier
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            min_priority: Priority::Low,
        }
    }

    /// Only report tiers at least as urgent as `priority`
    pub fn with_min_priority(mut self, priority: Priority) -> Self {
        self.min_priority = priority;
        self
    }

    /// Main entry point: check a request and return the ranked activation
    pub fn activate(&self, request: &Request) -> Outcome<'_> {
        let outcome = activate(&self.rules, request);
        Outcome {
            activation: outcome.activation.within(self.min_priority),
            defects: outcome.defects,
        }
    }

    /// Compile every pattern and return the ones that fail
    pub fn validate(&self) -> Vec<PatternDefect> {
        evaluator::check_rules(&self.rules)
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_activator() -> SkillActivator {
        let rules = RuleSet::new()
            .with_rule(
                "deploy-checklist",
                SkillRule::new(Priority::High, "Deployment checklist")
                    .with_keywords(["deploy"]),
            )
            .with_rule(
                "secrets-guard",
                SkillRule::new(Priority::Critical, "Secret handling")
                    .with_path_patterns(["**/*.secret"], ["test/**"]),
            );
        SkillActivator::new(rules)
    }

    #[test]
    fn test_keyword_activation() {
        let activator = test_activator();
        let outcome = activator.activate(&Request::new(
            "please deploy this",
            Vec::<String>::new(),
        ));
        let tiers = outcome.activation.tiers().unwrap();
        assert_eq!(tiers.high.len(), 1);
        assert_eq!(tiers.high[0].name, "deploy-checklist");
        assert_eq!(tiers.high[0].kind, MatchKind::Keyword);
    }

    #[test]
    fn test_file_activation() {
        let activator = test_activator();
        let outcome = activator.activate(&Request::new("", ["test/a.secret", "prod/b.secret"]));
        let tiers = outcome.activation.tiers().unwrap();
        assert_eq!(tiers.critical.len(), 1);
        assert_eq!(tiers.critical[0].evidence, "prod/b.secret");
        assert_eq!(tiers.critical[0].kind, MatchKind::FilePath);
    }

    #[test]
    fn test_empty_request_inactive() {
        let activator = test_activator();
        let outcome = activator.activate(&Request::default());
        assert_eq!(outcome.activation, Activation::Inactive);
        assert!(outcome.defects.is_empty());
    }

    #[test]
    fn test_empty_rule_set_inactive() {
        let activator = SkillActivator::new(RuleSet::new());
        let outcome = activator.activate(&Request::new("deploy", ["a.secret"]));
        assert!(!outcome.activation.is_active());
    }

    #[test]
    fn test_min_priority_filters_tiers() {
        let activator = test_activator().with_min_priority(Priority::Critical);
        let outcome = activator.activate(&Request::new("deploy", Vec::<String>::new()));
        assert!(!outcome.activation.is_active());
    }

    #[test]
    fn test_idempotent() {
        let activator = test_activator();
        let request = Request::new("deploy now", ["prod/x.secret"]);
        assert_eq!(activator.activate(&request), activator.activate(&request));
    }

    #[test]
    fn test_match_kind_display() {
        assert_eq!(MatchKind::FilePath.to_string(), "file-path");
        assert_eq!(
            serde_json::to_string(&MatchKind::FilePath).unwrap(),
            "\"file-path\""
        );
    }
}
