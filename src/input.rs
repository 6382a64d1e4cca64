//! Input parsing for Claude Code hook JSON format
//!
//! Parses the `UserPromptSubmit` payload that Claude Code sends on stdin.

use serde::Deserialize;

use crate::engine::Request;

/// Prompt summaries are cut to this many characters
const SUMMARY_CHARS: usize = 100;

/// Main input structure from the prompt submission hook
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HookInput {
    /// Optional session identifier
    pub session_id: Option<String>,

    pub transcript_path: Option<String>,

    /// Working directory of the session
    pub cwd: Option<String>,

    pub permission_mode: Option<String>,

    /// Hook event name (e.g., "UserPromptSubmit")
    pub hook_event_name: Option<String>,

    /// The submitted prompt
    pub prompt: Option<String>,

    /// Files currently in context
    pub files_context: Option<Vec<String>>,
}

impl HookInput {
    /// Parse input from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Build the engine request; missing fields become empty
    pub fn to_request(&self) -> Request {
        Request {
            prompt: self.prompt.clone().unwrap_or_default(),
            file_paths: self.files_context.clone().unwrap_or_default(),
        }
    }

    /// Get a summary of the prompt for logging
    pub fn summary(&self) -> String {
        let prompt = self.prompt.as_deref().unwrap_or_default();
        if prompt.chars().count() > SUMMARY_CHARS {
            let truncated: String = prompt.chars().take(SUMMARY_CHARS).collect();
            format!("{}...", truncated)
        } else {
            prompt.to_string()
        }
    }
}
