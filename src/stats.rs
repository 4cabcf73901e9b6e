//! User statistics snapshot
//!
//! The read-only view of a subject's accumulated activity that the badge
//! evaluator and leaderboard engine score against. Produced by an external
//! stats repository; never mutated here.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Point-in-time statistics for one subject
///
/// All counters are lifetime totals except `streak_days`, which is the
/// length of the currently active daily streak.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserStatsSnapshot {
    /// Running total of experience points
    pub cumulative_xp: i64,

    pub modules_completed: u64,
    pub tasks_completed: u64,

    /// Consecutive days with at least one completed activity
    pub streak_days: u64,

    pub collaboration_count: u64,
    pub mentorship_count: u64,
    pub event_count: u64,

    /// Badge ids granted by hand (moderator awards, imports)
    #[serde(default)]
    pub manually_granted_badge_ids: HashSet<String>,
}

impl UserStatsSnapshot {
    /// Snapshot with only an XP total, for callers that rank by XP alone
    pub fn with_xp(cumulative_xp: i64) -> Self {
        Self {
            cumulative_xp,
            ..Self::default()
        }
    }
}
