//! Integration tests for end-to-end skill activation

use pretty_assertions::assert_eq;
use skill_activation::{
    report, Activation, HookInput, MatchKind, Priority, Request, RuleSet, SkillActivator,
    SkillRule, SkillRules,
};

const FIXTURE: &str = include_str!("../fixtures/skill-rules.json");

fn fixture_rules() -> RuleSet {
    SkillRules::from_json(FIXTURE).unwrap().skills
}

fn hook_input(prompt: &str, files: &[&str]) -> HookInput {
    let json = serde_json::json!({
        "session_id": "integration",
        "cwd": "/work/app",
        "hook_event_name": "UserPromptSubmit",
        "prompt": prompt,
        "files_context": files,
    });
    HookInput::from_json(&json.to_string()).unwrap()
}

/// Names per tier, most urgent first
fn activated(
    activator: &SkillActivator,
    prompt: &str,
    files: &[&str],
) -> Vec<(Priority, String)> {
    let outcome = activator.activate(&hook_input(prompt, files).to_request());
    match outcome.activation.tiers() {
        Some(tiers) => tiers
            .iter()
            .map(|m| (m.rule.priority, m.name.to_string()))
            .collect(),
        None => Vec::new(),
    }
}

// ============================================================================
// Reference scenarios
// ============================================================================

#[test]
fn test_keyword_scenario() {
    let rules = RuleSet::new().with_rule(
        "A",
        SkillRule::new(Priority::High, "deploy").with_keywords(["deploy"]),
    );
    let activator = SkillActivator::new(rules);
    let outcome = activator.activate(&Request::new("please deploy this", Vec::<String>::new()));

    let tiers = outcome.activation.tiers().unwrap();
    assert_eq!(tiers.len(), 1);
    assert_eq!(tiers.high[0].name, "A");
    assert_eq!(tiers.high[0].kind, MatchKind::Keyword);
}

#[test]
fn test_excluded_path_scenario() {
    let rules = RuleSet::new().with_rule(
        "B",
        SkillRule::new(Priority::Critical, "secrets")
            .with_path_patterns(["**/*.secret"], ["test/**"]),
    );
    let activator = SkillActivator::new(rules);
    let outcome = activator.activate(&Request::new("", ["test/a.secret", "prod/b.secret"]));

    let tiers = outcome.activation.tiers().unwrap();
    assert_eq!(tiers.critical[0].name, "B");
    assert_eq!(tiers.critical[0].kind, MatchKind::FilePath);
    assert_eq!(tiers.critical[0].evidence, "prod/b.secret");
}

#[test]
fn test_empty_request_scenario() {
    let activator = SkillActivator::new(fixture_rules());
    let outcome = activator.activate(&Request::default());
    assert_eq!(outcome.activation, Activation::Inactive);
}

// ============================================================================
// Fixture rules
// ============================================================================

#[test]
fn test_keyword_any_case() {
    let activator = SkillActivator::new(fixture_rules());
    assert_eq!(
        activated(&activator, "Write a PRISMA Migration", &[]),
        vec![(Priority::Critical, "database-verification".to_string())]
    );
}

#[test]
fn test_intent_pattern() {
    let activator = SkillActivator::new(fixture_rules());
    let outcome = activator.activate(&hook_input("Drop  TABLE users", &[]).to_request());
    let tiers = outcome.activation.tiers().unwrap();
    assert_eq!(tiers.critical[0].kind, MatchKind::Intent);
    assert_eq!(tiers.critical[0].evidence, r"(alter|drop)\s+table");
}

#[test]
fn test_file_path_with_exclusion() {
    let activator = SkillActivator::new(fixture_rules());
    let input = hook_input(
        "",
        &["backend/src/routes/user.test.ts", "backend/src/routes/user.ts"],
    );
    let outcome = activator.activate(&input.to_request());
    let tiers = outcome.activation.tiers().unwrap();

    assert_eq!(tiers.high.len(), 1);
    assert_eq!(tiers.high[0].name, "backend-dev-guidelines");
    assert_eq!(tiers.high[0].evidence, "backend/src/routes/user.ts");
}

#[test]
fn test_only_excluded_files_inactive() {
    let activator = SkillActivator::new(fixture_rules());
    assert!(activated(&activator, "", &["prisma/fixtures/seed.sql"]).is_empty());
}

#[test]
fn test_single_star_stays_at_root() {
    let activator = SkillActivator::new(fixture_rules());
    assert_eq!(
        activated(&activator, "", &["README.md"]),
        vec![(Priority::Low, "docs-style".to_string())]
    );

    let outcome = activator.activate(&hook_input("", &["docs/guide/intro.md"]).to_request());
    let tiers = outcome.activation.tiers().unwrap();
    // `*.md` does not cross directories; `docs/**` does
    assert_eq!(tiers.low[0].evidence, "docs/guide/intro.md");
}

#[test]
fn test_priority_order_and_ties() {
    let activator = SkillActivator::new(fixture_rules());
    assert_eq!(
        activated(
            &activator,
            "add a react component calling the endpoint, then update prisma",
            &[]
        ),
        vec![
            (Priority::Critical, "database-verification".to_string()),
            (Priority::High, "backend-dev-guidelines".to_string()),
            (Priority::High, "frontend-dev-guidelines".to_string()),
        ]
    );
}

#[test]
fn test_first_keyword_in_list_is_evidence() {
    let activator = SkillActivator::new(fixture_rules());
    let outcome =
        activator.activate(&hook_input("express endpoint for the controller", &[]).to_request());
    let tiers = outcome.activation.tiers().unwrap();
    assert_eq!(tiers.high[0].evidence, "controller");
}

#[test_log::test]
fn test_invalid_intent_pattern_is_skipped() {
    let activator = SkillActivator::new(fixture_rules());
    let outcome = activator
        .activate(&hook_input("an exception was thrown in the worker", &[]).to_request());

    assert_eq!(outcome.defects.len(), 1);
    assert_eq!(outcome.defects[0].rule, "error-tracking");
    assert_eq!(outcome.defects[0].pattern, "(uncaught|unhandled) exception(");

    let tiers = outcome.activation.tiers().unwrap();
    assert_eq!(tiers.medium[0].name, "error-tracking");
    assert_eq!(tiers.medium[0].evidence, "exception.*?(thrown|raised)");
}

#[test]
fn test_env_override_removes_rule() {
    let rules = fixture_rules().without_overridden(|var| var == "SKIP_DB_VERIFICATION");
    let activator = SkillActivator::new(rules);
    assert!(activated(&activator, "prisma migration", &[]).is_empty());
}

#[test]
fn test_min_priority() {
    let activator = SkillActivator::new(fixture_rules()).with_min_priority(Priority::High);
    assert!(activated(&activator, "", &["README.md"]).is_empty());
    assert_eq!(activated(&activator, "new endpoint", &[]).len(), 1);
}

#[test]
fn test_idempotent() {
    let activator = SkillActivator::new(fixture_rules());
    let request = hook_input("add an endpoint", &["frontend/src/pages/home.tsx"]).to_request();
    assert_eq!(activator.activate(&request), activator.activate(&request));
}

#[test]
fn test_report_from_hook_input() {
    let activator = SkillActivator::new(fixture_rules());
    let outcome = activator.activate(&hook_input("alter table orders", &["README.md"]).to_request());
    let text = report::render(outcome.activation.tiers().unwrap());

    assert!(text.contains("CRITICAL SKILLS (REQUIRED)"));
    assert!(text.contains("  → database-verification\n"));
    assert!(text.contains("BLOCKS execution until used"));
    assert!(text.contains("Load database-verification before editing query code"));
    assert!(text.contains("OPTIONAL SKILLS:\n  → docs-style\n"));
    assert!(!text.contains("RECOMMENDED SKILLS"));
}
