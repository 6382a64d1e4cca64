//! Loading of the skill rules file
//!
//! Rules live in `.claude/skills/skill-rules.json` under the project root.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::rules::RuleSet;

/// Location of the rules file relative to the project root
pub const RULES_RELATIVE_PATH: &str = ".claude/skills/skill-rules.json";

/// Errors loading the rules file
#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse skill rules: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The rules file document
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SkillRules {
    pub version: String,
    pub description: String,
    pub skills: RuleSet,
}

impl SkillRules {
    /// Parse a rules document from JSON
    pub fn from_json(json: &str) -> Result<Self, RulesError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a rules file
    pub fn from_file(path: &Path) -> Result<Self, RulesError> {
        let content = std::fs::read_to_string(path).map_err(|source| RulesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Default rules file location for a project
    pub fn default_path(project_dir: &Path) -> PathBuf {
        project_dir.join(RULES_RELATIVE_PATH)
    }
}
