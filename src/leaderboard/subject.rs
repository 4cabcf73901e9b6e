//! Ranking subjects, metric accessors, and roster filters

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::levels::LevelBand;
use crate::stats::UserStatsSnapshot;

/// Metric keys the engine can score natively
///
/// Unknown keys are not an error: every subject scores 0 under them, so a
/// dashboard that ships a new metric before the engine learns it renders an
/// all-zero board instead of breaking.
pub const KNOWN_METRICS: &[&str] = &[
    "xp",
    "modules",
    "tasks",
    "streak",
    "collaborations",
    "mentorships",
    "events",
];

/// One ranking-eligible subject as supplied by the roster collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSubject {
    pub id: String,
    pub display_name: String,

    /// Grouping key for cohort-scoped boards
    #[serde(default)]
    pub cohort: Option<String>,

    /// Subjects may opt out of public rankings
    #[serde(default = "default_true")]
    pub ranking_eligible: bool,

    pub stats: UserStatsSnapshot,
}

fn default_true() -> bool {
    true
}

impl RankedSubject {
    pub fn new(id: &str, display_name: &str, stats: UserStatsSnapshot) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            cohort: None,
            ranking_eligible: true,
            stats,
        }
    }

    /// Progression tier derived from cumulative XP
    pub fn tier(&self) -> LevelBand {
        LevelBand::for_xp(self.stats.cumulative_xp)
    }
}

/// Score a subject under a metric key
///
/// Unrecognized keys score 0 for every subject (logged once per call site
/// via `warn!`), keeping boards renderable when metric additions outrun the
/// engine.
pub fn metric_score(subject: &RankedSubject, metric: &str) -> f64 {
    let stats = &subject.stats;
    match metric {
        "xp" => stats.cumulative_xp as f64,
        "modules" => stats.modules_completed as f64,
        "tasks" => stats.tasks_completed as f64,
        "streak" => stats.streak_days as f64,
        "collaborations" => stats.collaboration_count as f64,
        "mentorships" => stats.mentorship_count as f64,
        "events" => stats.event_count as f64,
        other => {
            warn!(metric = other, "unknown leaderboard metric, scoring 0");
            0.0
        }
    }
}

/// Roster predicates applied before ranking
///
/// A subject failing any supplied predicate is excluded from the board
/// entirely, not merely de-ranked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderboardFilter {
    /// Keep only subjects in this cohort
    pub cohort: Option<String>,
    /// Keep only subjects at or above this tier
    pub min_tier: Option<LevelBand>,
    /// Keep only subjects that have not opted out
    pub eligible_only: bool,
}

impl LeaderboardFilter {
    pub fn matches(&self, subject: &RankedSubject) -> bool {
        if let Some(cohort) = &self.cohort {
            if subject.cohort.as_deref() != Some(cohort.as_str()) {
                return false;
            }
        }
        if let Some(min_tier) = self.min_tier {
            if subject.tier() < min_tier {
                return false;
            }
        }
        if self.eligible_only && !subject.ranking_eligible {
            return false;
        }
        true
    }
}
