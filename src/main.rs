//! skill-activation - Skill suggestions for Claude Code prompts
//!
//! Runs as a `UserPromptSubmit` hook: reads the hook JSON from stdin and
//! prints a skill report to stdout when any configured skill applies.
//!
//! # Usage
//!
//! ```bash
//! # As a Claude Code hook
//! echo '{"prompt":"add an endpoint","cwd":"/work/app"}' | skill-activation
//!
//! # Check a rules file for broken patterns
//! skill-activation --validate --rules .claude/skills/skill-rules.json
//! ```

use std::env;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use skill_activation::{
    audit::ActivationLogger,
    config::{self, Config},
    input::HookInput,
    output::{self, OutputFormat},
    report,
    rules::SkillRules,
    SkillActivator,
};

/// Suggest relevant skills for a Claude Code prompt.
///
/// Environment: SKILL_ACTIVATION_DISABLED=1 skips all checks,
/// CLAUDE_PROJECT_DIR sets the project root, SKILL_ACTIVATION_LOG sets the
/// diagnostics filter.
#[derive(Parser)]
#[command(name = "skill-activation", version, about, long_about = None)]
struct Cli {
    /// Path to settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to skill-rules.json (overrides settings and project default)
    #[arg(short, long)]
    rules: Option<PathBuf>,

    /// Output format for the report
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Compile every pattern in the rules file, report defects, and exit
    #[arg(long)]
    validate: bool,

    /// Increase diagnostics verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    // stdout carries the report, so diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(config::LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_config(cli: &Cli) -> Config {
    match cli.config {
        Some(ref path) => Config::load_from(path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
            Config::default()
        }),
        None => Config::load(),
    }
}

fn rules_path(cli: &Cli, config: &Config, cwd: Option<&str>) -> PathBuf {
    match cli.rules {
        Some(ref path) => path.clone(),
        None => {
            let project_dir =
                config::resolve_project_dir(env::var(config::PROJECT_DIR_ENV).ok(), cwd);
            config.rules_path(&project_dir)
        }
    }
}

fn validate(cli: &Cli, config: &Config) -> anyhow::Result<ExitCode> {
    let path = rules_path(cli, config, None);
    let rules = SkillRules::from_file(&path)
        .with_context(|| format!("cannot validate {}", path.display()))?;

    let activator = SkillActivator::new(rules.skills);
    let defects = activator.validate();

    let mut stdout = io::stdout().lock();
    for defect in &defects {
        writeln!(stdout, "{}", defect)?;
    }

    if defects.is_empty() {
        writeln!(
            stdout,
            "{}: {} skill rules, no defects",
            path.display(),
            activator.rules().len()
        )?;
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let config = load_config(cli);

    if cli.validate {
        return validate(cli, &config);
    }

    if env::var_os(config::DISABLED_ENV).is_some() {
        tracing::debug!("skill activation disabled via {}", config::DISABLED_ENV);
        return Ok(ExitCode::SUCCESS);
    }

    let mut input_json = String::new();
    io::stdin()
        .read_to_string(&mut input_json)
        .context("failed to read hook input")?;

    // No input = nothing to check
    if input_json.trim().is_empty() {
        return Ok(ExitCode::SUCCESS);
    }

    let input = match HookInput::from_json(&input_json) {
        Ok(input) => input,
        Err(e) => {
            tracing::warn!(error = %e, "failed to parse hook input, skipping skill activation");
            return Ok(ExitCode::SUCCESS);
        }
    };

    let path = rules_path(cli, &config, input.cwd.as_deref());
    let rules = match SkillRules::from_file(&path) {
        Ok(rules) => rules.skills,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not load skill rules, skill activation disabled");
            return Ok(ExitCode::SUCCESS);
        }
    };

    let rules = rules.without_overridden(|var| env::var_os(var).is_some());
    let activator = SkillActivator::new(rules).with_min_priority(config.rules.min_priority);
    let outcome = activator.activate(&input.to_request());

    if let Some(tiers) = outcome.activation.tiers() {
        let text = report::render(tiers);
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", output::format_report(&text, cli.format))?;
        stdout.flush()?;
    }

    if config.general.activation_log {
        let mut logger = ActivationLogger::new(config.log_path().as_deref());
        if let Err(e) = logger.log_outcome(&input, &outcome) {
            tracing::warn!(error = %e, "failed to write activation log");
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("skill activation failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
