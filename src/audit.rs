//! JSONL activation logging for skill-activation
//!
//! Records each activation check to a JSONL file for later analysis.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::engine::{MatchKind, Outcome};
use crate::input::HookInput;
use crate::rules::Priority;

/// Whether the check produced a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Activated,
    Inactive,
}

/// One skill in an activation entry
#[derive(Debug, Serialize)]
pub struct ActivatedSkill {
    pub name: String,
    pub priority: Priority,
    pub match_kind: MatchKind,
    pub evidence: String,
}

/// An activation log entry
#[derive(Debug, Serialize)]
pub struct ActivationEntry {
    /// Timestamp of the check
    pub timestamp: DateTime<Utc>,

    pub level: LogLevel,

    /// Session ID (if provided)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    /// Summary of the prompt
    pub prompt_summary: String,

    /// Number of files in context
    pub file_count: usize,

    /// Reported skills, most urgent first
    pub skills: Vec<ActivatedSkill>,

    /// Number of patterns that failed to compile
    pub defects: usize,
}

impl ActivationEntry {
    /// Create a new entry from input and outcome
    pub fn new(input: &HookInput, outcome: &Outcome<'_>) -> Self {
        let skills: Vec<ActivatedSkill> = outcome
            .activation
            .tiers()
            .into_iter()
            .flat_map(|tiers| tiers.iter())
            .map(|m| ActivatedSkill {
                name: m.name.to_string(),
                priority: m.rule.priority,
                match_kind: m.kind,
                evidence: m.evidence.clone(),
            })
            .collect();

        let level = if skills.is_empty() {
            LogLevel::Inactive
        } else {
            LogLevel::Activated
        };

        Self {
            timestamp: Utc::now(),
            level,
            session_id: input.session_id.clone(),
            prompt_summary: input.summary(),
            file_count: input.files_context.as_ref().map_or(0, Vec::len),
            skills,
            defects: outcome.defects.len(),
        }
    }
}

/// Activation logger
#[derive(Default)]
pub struct ActivationLogger {
    writer: Option<BufWriter<File>>,
}

impl ActivationLogger {
    /// Create a new logger; `None` or an unopenable path disables it
    pub fn new(path: Option<&Path>) -> Self {
        let writer = path.and_then(|p| {
            // Ensure parent directory exists
            if let Some(parent) = p.parent() {
                let _ = std::fs::create_dir_all(parent);
            }

            OpenOptions::new()
                .create(true)
                .append(true)
                .open(p)
                .map_err(|e| {
                    tracing::warn!(path = %p.display(), error = %e, "cannot open activation log");
                })
                .ok()
                .map(BufWriter::new)
        });

        Self { writer }
    }

    /// Log an entry
    pub fn log(&mut self, entry: &ActivationEntry) -> Result<(), std::io::Error> {
        if let Some(ref mut writer) = self.writer {
            let json = serde_json::to_string(entry)?;
            writeln!(writer, "{}", json)?;
            writer.flush()?;
        }
        Ok(())
    }

    /// Log an activation outcome
    pub fn log_outcome(
        &mut self,
        input: &HookInput,
        outcome: &Outcome<'_>,
    ) -> Result<(), std::io::Error> {
        let entry = ActivationEntry::new(input, outcome);
        self.log(&entry)
    }

    /// Check if logging is enabled
    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }
}
