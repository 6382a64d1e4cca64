//! Output formatting for Claude Code hook responses
//!
//! A prompt hook can print plain text, which is added to the context as-is,
//! or JSON carrying the same text as `additionalContext`.

use serde::Serialize;

/// How the report is written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// The report text itself
    #[default]
    Text,

    /// A hook JSON response wrapping the report
    Json,
}

/// Main output structure for Claude Code hooks
#[derive(Debug, Serialize)]
pub struct HookOutput {
    #[serde(rename = "hookSpecificOutput")]
    pub hook_specific_output: HookSpecificOutput,
}

/// Hook-specific output carrying the context to add
#[derive(Debug, Serialize)]
pub struct HookSpecificOutput {
    /// The hook event name (always "UserPromptSubmit")
    #[serde(rename = "hookEventName")]
    pub hook_event_name: String,

    #[serde(rename = "additionalContext")]
    pub additional_context: String,
}

impl HookOutput {
    /// Wrap a rendered report
    pub fn with_context(report: impl Into<String>) -> Self {
        HookOutput {
            hook_specific_output: HookSpecificOutput {
                hook_event_name: "UserPromptSubmit".to_string(),
                additional_context: report.into(),
            },
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Render a report in the requested format
pub fn format_report(report: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => report.to_string(),
        OutputFormat::Json => HookOutput::with_context(report).to_json(),
    }
}
