//! Ranking and grouping of matches into priority tiers

use super::Match;
use crate::rules::Priority;

/// Matches grouped by priority, each tier in rule-set order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tiers<'a> {
    pub critical: Vec<Match<'a>>,
    pub high: Vec<Match<'a>>,
    pub medium: Vec<Match<'a>>,
    pub low: Vec<Match<'a>>,
}

impl<'a> Tiers<'a> {
    /// Matches in one tier
    pub fn tier(&self, priority: Priority) -> &[Match<'a>] {
        match priority {
            Priority::Critical => &self.critical,
            Priority::High => &self.high,
            Priority::Medium => &self.medium,
            Priority::Low => &self.low,
        }
    }

    fn tier_mut(&mut self, priority: Priority) -> &mut Vec<Match<'a>> {
        match priority {
            Priority::Critical => &mut self.critical,
            Priority::High => &mut self.high,
            Priority::Medium => &mut self.medium,
            Priority::Low => &mut self.low,
        }
    }

    /// All matches, most urgent tier first
    pub fn iter(&self) -> impl Iterator<Item = &Match<'a>> {
        Priority::ALL
            .into_iter()
            .flat_map(move |priority| self.tier(priority).iter())
    }

    pub fn len(&self) -> usize {
        self.critical.len() + self.high.len() + self.medium.len() + self.low.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of ranking: either nothing to report, or the tiers to report
#[derive(Debug, Clone, PartialEq)]
pub enum Activation<'a> {
    /// No skill matched; the caller must not emit a report
    Inactive,

    Active(Tiers<'a>),
}

impl<'a> Activation<'a> {
    pub fn is_active(&self) -> bool {
        matches!(self, Activation::Active(_))
    }

    pub fn tiers(&self) -> Option<&Tiers<'a>> {
        match self {
            Activation::Inactive => None,
            Activation::Active(tiers) => Some(tiers),
        }
    }

    /// Drop tiers less urgent than `threshold`
    pub fn within(self, threshold: Priority) -> Self {
        match self {
            Activation::Inactive => Activation::Inactive,
            Activation::Active(mut tiers) => {
                for priority in Priority::ALL {
                    if !priority.is_within(threshold) {
                        tiers.tier_mut(priority).clear();
                    }
                }
                if tiers.is_empty() {
                    Activation::Inactive
                } else {
                    Activation::Active(tiers)
                }
            }
        }
    }
}

/// Order matches by priority and partition them into tiers
///
/// The sort is stable, so matches of equal priority keep rule-set order.
pub fn rank<'a>(mut matches: Vec<Match<'a>>) -> Activation<'a> {
    if matches.is_empty() {
        return Activation::Inactive;
    }

    matches.sort_by_key(|m| m.rule.priority.ordinal());

    let mut tiers = Tiers::default();
    for m in matches {
        tiers.tier_mut(m.rule.priority).push(m);
    }
    Activation::Active(tiers)
}
