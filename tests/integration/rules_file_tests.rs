//! Integration tests for locating and validating rules files

use std::fs;
use std::path::Path;

use skill_activation::config::Config;
use skill_activation::engine::PatternSource;
use skill_activation::rules::RulesError;
use skill_activation::{SkillActivator, SkillRules};
use tempfile::TempDir;

const FIXTURE: &str = include_str!("../fixtures/skill-rules.json");

fn project_with_rules(relative: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, FIXTURE).unwrap();
    dir
}

#[test]
fn test_load_from_project_default_location() {
    let project = project_with_rules(".claude/skills/skill-rules.json");
    let path = Config::default().rules_path(project.path());
    let rules = SkillRules::from_file(&path).unwrap();

    assert_eq!(rules.version, "1.0");
    assert_eq!(
        rules.skills.names().collect::<Vec<_>>(),
        vec![
            "database-verification",
            "backend-dev-guidelines",
            "frontend-dev-guidelines",
            "error-tracking",
            "docs-style",
        ]
    );
}

#[test]
fn test_load_from_configured_location() {
    let project = project_with_rules("config/skills.json");
    let settings = project.path().join("settings.toml");
    fs::write(&settings, "[rules]\npath = \"config/skills.json\"\n").unwrap();

    let config = Config::load_from(&settings).unwrap();
    let rules = SkillRules::from_file(&config.rules_path(project.path())).unwrap();
    assert_eq!(rules.skills.len(), 5);
}

#[test]
fn test_missing_rules_file() {
    let project = TempDir::new().unwrap();
    let path = Config::default().rules_path(project.path());
    assert!(matches!(
        SkillRules::from_file(&path),
        Err(RulesError::Io { .. })
    ));
}

#[test]
fn test_malformed_rules_file() {
    let project = TempDir::new().unwrap();
    let path = project.path().join("skill-rules.json");
    fs::write(&path, r#"{"skills": {"a": {"priority": "urgent"}}}"#).unwrap();
    assert!(matches!(
        SkillRules::from_file(Path::new(&path)),
        Err(RulesError::Parse(_))
    ));
}

#[test]
fn test_validate_reports_defects() {
    let rules = SkillRules::from_json(FIXTURE).unwrap();
    let defects = SkillActivator::new(rules.skills).validate();

    assert_eq!(defects.len(), 1);
    assert_eq!(defects[0].rule, "error-tracking");
    assert_eq!(defects[0].source, PatternSource::IntentPattern);
    assert!(defects[0]
        .to_string()
        .starts_with("error-tracking: invalid intent pattern `(uncaught|unhandled) exception(`"));
}
