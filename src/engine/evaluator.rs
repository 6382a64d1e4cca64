//! Rule evaluation
//!
//! Applies the matchers to every rule in the set and records at most one
//! match per rule. Patterns are compiled per evaluation and dropped with it.

use std::fmt;

use serde::Serialize;

use super::matchers;
use super::pattern::{GlobPattern, IntentPattern, PatternError};
use super::{Match, MatchKind, Request};
use crate::rules::{RuleSet, SkillRule};

/// Which trigger list a pattern was configured in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternSource {
    IntentPattern,
    PathPattern,
    PathExclusion,
}

impl fmt::Display for PatternSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PatternSource::IntentPattern => "intent pattern",
            PatternSource::PathPattern => "path pattern",
            PatternSource::PathExclusion => "path exclusion",
        })
    }
}

/// A configured pattern that could not be compiled
///
/// The pattern is treated as never matching; evaluation carries on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternDefect {
    pub rule: String,
    pub source: PatternSource,
    pub pattern: String,
    pub error: String,
}

impl fmt::Display for PatternDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: invalid {} `{}`: {}",
            self.rule, self.source, self.pattern, self.error
        )
    }
}

/// Matches in rule-set order plus any pattern defects found on the way
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation<'a> {
    pub matches: Vec<Match<'a>>,
    pub defects: Vec<PatternDefect>,
}

/// A rule's triggers with every pattern compiled
struct CompiledTriggers<'r> {
    keywords: &'r [String],
    intents: Vec<IntentPattern>,
    includes: Vec<GlobPattern>,
    excludes: Vec<GlobPattern>,
}

impl<'r> CompiledTriggers<'r> {
    fn compile(name: &str, rule: &'r SkillRule, defects: &mut Vec<PatternDefect>) -> Self {
        let prompt = rule.prompt_triggers.as_ref();
        let files = rule.file_triggers.as_ref();

        Self {
            keywords: prompt.map_or(&[][..], |t| t.keywords.as_slice()),
            intents: compile_each(
                name,
                PatternSource::IntentPattern,
                prompt.map_or(&[][..], |t| t.intent_patterns.as_slice()),
                IntentPattern::compile,
                defects,
            ),
            includes: compile_each(
                name,
                PatternSource::PathPattern,
                files.map_or(&[][..], |t| t.path_patterns.as_slice()),
                GlobPattern::compile,
                defects,
            ),
            excludes: compile_each(
                name,
                PatternSource::PathExclusion,
                files.map_or(&[][..], |t| t.path_exclusions.as_slice()),
                GlobPattern::compile,
                defects,
            ),
        }
    }

    /// First satisfied trigger: keyword, then intent, then file path
    fn first_match(&self, request: &Request) -> Option<(MatchKind, String)> {
        if !request.prompt.is_empty() {
            if let Some(keyword) = matchers::match_keyword(&request.prompt, self.keywords) {
                return Some((MatchKind::Keyword, keyword.to_string()));
            }
            if let Some(pattern) = matchers::match_intent(&request.prompt, &self.intents) {
                return Some((MatchKind::Intent, pattern.source().to_string()));
            }
        }

        matchers::match_paths(&request.file_paths, &self.includes, &self.excludes)
            .map(|path| (MatchKind::FilePath, path.to_string()))
    }
}

fn compile_each<T>(
    rule: &str,
    source: PatternSource,
    patterns: &[String],
    compile: fn(&str) -> Result<T, PatternError>,
    defects: &mut Vec<PatternDefect>,
) -> Vec<T> {
    patterns
        .iter()
        .filter_map(|pattern| match compile(pattern) {
            Ok(compiled) => Some(compiled),
            Err(e) => {
                defects.push(PatternDefect {
                    rule: rule.to_string(),
                    source,
                    pattern: pattern.clone(),
                    error: e.to_string(),
                });
                None
            }
        })
        .collect()
}

/// Evaluate every rule against the request
///
/// Rules are independent: each one is examined regardless of whether an
/// earlier rule matched.
pub fn evaluate<'a>(rules: &'a RuleSet, request: &Request) -> Evaluation<'a> {
    let mut matches = Vec::new();
    let mut defects = Vec::new();

    for (name, rule) in rules.iter() {
        if !rule.has_triggers() {
            continue;
        }

        let triggers = CompiledTriggers::compile(name, rule, &mut defects);
        if let Some((kind, evidence)) = triggers.first_match(request) {
            tracing::debug!(rule = %name, kind = %kind, evidence = %evidence, "skill rule matched");
            matches.push(Match {
                name,
                rule,
                kind,
                evidence,
            });
        }
    }

    for defect in &defects {
        tracing::warn!(
            rule = %defect.rule,
            pattern = %defect.pattern,
            error = %defect.error,
            "ignoring invalid {} in skill rule",
            defect.source
        );
    }

    Evaluation { matches, defects }
}

/// Compile every pattern in the rule set and report the ones that fail
pub fn check_rules(rules: &RuleSet) -> Vec<PatternDefect> {
    let mut defects = Vec::new();
    for (name, rule) in rules.iter() {
        CompiledTriggers::compile(name, rule, &mut defects);
    }
    defects
}
