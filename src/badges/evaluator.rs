//! Badge eligibility evaluation
//!
//! Pure functions over the catalog and a user-statistics snapshot: which
//! badges are earned, which are nearly earned, and which to showcase.

use crate::stats::UserStatsSnapshot;

use super::catalog::BadgeCatalog;
use super::definitions::{BadgeDefinition, RequirementKind};

/// Badges within this completion ratio are reported as "almost earned".
/// The window is the same for every rarity.
const PROGRESS_WINDOW_LOW: f64 = 0.8;

const DEFAULT_PROGRESS_LIMIT: usize = 5;
const DEFAULT_SHOWCASE_CAP: usize = 6;

/// A not-yet-earned badge the subject is close to
#[derive(Debug, Clone, PartialEq)]
pub struct BadgeProgress<'a> {
    pub badge: &'a BadgeDefinition,
    /// Completion ratio clamped to [0, 1]
    pub ratio: f64,
    pub current: u64,
    pub required: u64,
}

/// Evaluates badge membership against a static catalog
#[derive(Debug, Clone)]
pub struct BadgeEvaluator {
    catalog: BadgeCatalog,
}

impl BadgeEvaluator {
    pub fn new(catalog: BadgeCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &BadgeCatalog {
        &self.catalog
    }

    /// All badges the snapshot qualifies for, in catalog order
    ///
    /// Deterministic: identical input yields identical output. A badge
    /// whose requirement value is 0 is always earned.
    pub fn earned_badges(&self, stats: &UserStatsSnapshot) -> Vec<&BadgeDefinition> {
        self.catalog
            .badges()
            .iter()
            .filter(|badge| requirement_met(badge, stats))
            .collect()
    }

    /// Badges the subject is close to earning
    ///
    /// Reports badges (outside `exclude_ids`) whose completion ratio lies in
    /// [0.8, 1.0), nearest to completion first, capped at `limit`
    /// (default 5). Manual grants have no meaningful partial progress and
    /// are never reported.
    pub fn progress_toward<'a>(
        &'a self,
        stats: &UserStatsSnapshot,
        exclude_ids: &[&str],
        limit: Option<usize>,
    ) -> Vec<BadgeProgress<'a>> {
        let limit = limit.unwrap_or(DEFAULT_PROGRESS_LIMIT);

        let mut near: Vec<BadgeProgress<'a>> = self
            .catalog
            .badges()
            .iter()
            .filter(|badge| !exclude_ids.contains(&badge.id.as_str()))
            .filter(|badge| badge.requirement.kind != RequirementKind::ManualGrant)
            .filter_map(|badge| {
                let current = counter_value(badge.requirement.kind, stats);
                let required = badge.requirement.value;
                if required == 0 {
                    return None; // always earned, nothing to progress toward
                }
                let ratio = (current as f64 / required as f64).min(1.0);
                if (PROGRESS_WINDOW_LOW..1.0).contains(&ratio) {
                    Some(BadgeProgress {
                        badge,
                        ratio,
                        current,
                        required,
                    })
                } else {
                    None
                }
            })
            .collect();

        // stable: equal ratios stay in catalog order
        near.sort_by(|a, b| b.ratio.partial_cmp(&a.ratio).expect("ratio is finite"));
        near.truncate(limit);
        near
    }

    /// Pick the badges to display on a profile
    ///
    /// Highest rarity first, catalog order within a rarity, capped at `cap`
    /// (default 6).
    pub fn showcase<'a>(
        &self,
        earned: &[&'a BadgeDefinition],
        cap: Option<usize>,
    ) -> Vec<&'a BadgeDefinition> {
        let cap = cap.unwrap_or(DEFAULT_SHOWCASE_CAP);
        let mut picked = earned.to_vec();
        picked.sort_by(|a, b| b.rarity.cmp(&a.rarity));
        picked.truncate(cap);
        picked
    }
}

/// Does the snapshot satisfy this badge's requirement?
fn requirement_met(badge: &BadgeDefinition, stats: &UserStatsSnapshot) -> bool {
    match badge.requirement.kind {
        RequirementKind::ManualGrant => stats.manually_granted_badge_ids.contains(&badge.id),
        kind => counter_value(kind, stats) >= badge.requirement.value,
    }
}

/// Read the snapshot counter a requirement kind points at
fn counter_value(kind: RequirementKind, stats: &UserStatsSnapshot) -> u64 {
    match kind {
        RequirementKind::Xp => stats.cumulative_xp.max(0) as u64,
        RequirementKind::ModulesCompleted => stats.modules_completed,
        RequirementKind::TasksCompleted => stats.tasks_completed,
        RequirementKind::StreakDays => stats.streak_days,
        RequirementKind::CollaborationCount => stats.collaboration_count,
        RequirementKind::MentorshipCount => stats.mentorship_count,
        RequirementKind::EventCount => stats.event_count,
        RequirementKind::ManualGrant => 0,
    }
}
