//! Text report for activated skills
//!
//! Renders ranked tiers into the banner the assistant sees as extra context.

use std::fmt;

use crate::engine::{Match, Tiers};
use crate::rules::{Enforcement, Priority};

const BANNER_RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

fn heading(priority: Priority) -> &'static str {
    match priority {
        Priority::Critical => "⚠️  CRITICAL SKILLS (REQUIRED):",
        Priority::High => "📚 RECOMMENDED SKILLS:",
        Priority::Medium => "💡 SUGGESTED SKILLS:",
        Priority::Low => "📌 OPTIONAL SKILLS:",
    }
}

fn write_entry(f: &mut fmt::Formatter<'_>, priority: Priority, m: &Match<'_>) -> fmt::Result {
    writeln!(f, "  → {}", m.name)?;

    // Optional skills are listed by name only
    if priority == Priority::Low {
        return Ok(());
    }

    writeln!(f, "    {}", m.rule.description)?;
    if priority == Priority::Critical && m.rule.enforcement == Enforcement::Block {
        writeln!(f, "    🚫 BLOCKS execution until used")?;
        if let Some(message) = &m.rule.block_message {
            writeln!(f, "    {}", message)?;
        }
    }
    Ok(())
}

/// Banner report over ranked tiers. Empty tiers are left out.
pub struct Report<'t, 'a>(pub &'t Tiers<'a>);

impl fmt::Display for Report<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", BANNER_RULE)?;
        writeln!(f, "🎯 SKILL ACTIVATION CHECK")?;
        writeln!(f, "{}", BANNER_RULE)?;
        writeln!(f)?;

        for priority in Priority::ALL {
            let tier = self.0.tier(priority);
            if tier.is_empty() {
                continue;
            }

            writeln!(f, "{}", heading(priority))?;
            for m in tier {
                write_entry(f, priority, m)?;
            }
            writeln!(f)?;
        }

        writeln!(f, "ACTION: Use Skill tool to load relevant skills before responding")?;
        writeln!(f, "{}", BANNER_RULE)
    }
}

/// Render the report to a string
pub fn render(tiers: &Tiers<'_>) -> String {
    Report(tiers).to_string()
}
