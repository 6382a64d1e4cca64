//! Configuration loading for skill-activation
//!
//! Supports TOML configuration with embedded defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::rules::{Priority, SkillRules};

/// Set to skip skill activation entirely
pub const DISABLED_ENV: &str = "SKILL_ACTIVATION_DISABLED";

/// Project root provided by Claude Code
pub const PROJECT_DIR_ENV: &str = "CLAUDE_PROJECT_DIR";

/// Tracing filter directive for diagnostics
pub const LOG_ENV: &str = "SKILL_ACTIVATION_LOG";

/// Errors that can occur while loading settings
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// General configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Record every activation check to a JSONL file
    pub activation_log: bool,

    /// Path to the activation log file
    pub log_path: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            activation_log: false,
            log_path: Some("~/.claude/skill-activation/activations.jsonl".to_string()),
        }
    }
}

/// Rules file configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Rules file override; relative paths resolve against the project root
    pub path: Option<String>,

    /// Least urgent tier that is still reported
    pub min_priority: Priority,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            path: None,
            min_priority: Priority::Low,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub rules: RulesConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load() -> Self {
        // Try to load from standard locations
        let config_paths = [
            // User-specific config
            dirs::home_dir().map(|p| p.join(".claude/skill-activation/config.toml")),
            // System-wide config
            Some(PathBuf::from("/etc/skill-activation/config.toml")),
        ];

        for path in config_paths.into_iter().flatten() {
            if path.exists() {
                match Self::load_from(&path) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config");
                    }
                }
            }
        }

        // Return defaults
        Config::default()
    }

    /// Load from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Expand ~ in path strings
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    /// Get the activation log path (expanded)
    pub fn log_path(&self) -> Option<PathBuf> {
        self.general.log_path.as_deref().map(Self::expand_path)
    }

    /// Get the rules file for a project
    pub fn rules_path(&self, project_dir: &Path) -> PathBuf {
        match self.rules.path.as_deref() {
            Some(path) => project_dir.join(Self::expand_path(path)),
            None => SkillRules::default_path(project_dir),
        }
    }
}

/// Resolve the project root: the environment override, then the session's
/// working directory, then the process working directory
pub fn resolve_project_dir(env_dir: Option<String>, cwd: Option<&str>) -> PathBuf {
    env_dir
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| cwd.filter(|dir| !dir.is_empty()).map(PathBuf::from))
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Embedded default configuration
pub const DEFAULT_CONFIG_TOML: &str = r#"
[general]
activation_log = false
log_path = "~/.claude/skill-activation/activations.jsonl"

[rules]
min_priority = "low"
"#;
