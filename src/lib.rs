//! skill-activation - Skill suggestions for Claude Code prompts
//!
//! This library decides which configured skills are relevant to a prompt
//! and the files in context, so a prompt hook can point the assistant at
//! them before it responds.
//!
//! # Features
//!
//! - **Keyword triggers**: case-insensitive substrings of the prompt
//! - **Intent triggers**: case-insensitive regexes over the prompt
//! - **File triggers**: globs over files in context, with exclusions
//! - **Priority tiers**: critical, high, medium and low, in rule order
//! - **Defect tolerance**: a broken pattern is reported and skipped
//! - **Activation log**: optional JSONL record of every check
//!
//! # Example
//!
//! ```
//! use skill_activation::{Priority, Request, RuleSet, SkillActivator, SkillRule};
//!
//! let rules = RuleSet::new().with_rule(
//!     "deploy-checklist",
//!     SkillRule::new(Priority::High, "Deployment checklist").with_keywords(["deploy"]),
//! );
//! let activator = SkillActivator::new(rules);
//!
//! let outcome = activator.activate(&Request::new("please deploy this", Vec::<String>::new()));
//! let tiers = outcome.activation.tiers().unwrap();
//! assert_eq!(tiers.high[0].name, "deploy-checklist");
//! ```

pub mod audit;
pub mod config;
pub mod engine;
pub mod input;
pub mod output;
pub mod report;
pub mod rules;

// Re-exports for convenience
pub use config::Config;
pub use engine::{Activation, Match, MatchKind, Outcome, PatternDefect, Request, SkillActivator};
pub use input::HookInput;
pub use output::{HookOutput, OutputFormat};
pub use rules::{Enforcement, Priority, RuleSet, SkillKind, SkillRule, SkillRules};
