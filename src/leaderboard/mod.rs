//! Leaderboard generation and rank-change tracking
//!
//! The [`LeaderboardEngine`] ranks a roster of subjects by a named metric
//! (or a weighted combination of metrics) and reports each subject's rank
//! movement against the previous generation for the same metric. It is the
//! only stateful piece of the crate: a per-metric rank-history cache, owned
//! exclusively by the engine instance.

mod engine;
mod subject;
mod views;

pub use engine::{EngineError, LeaderboardEngine, LeaderboardEntry, MetricWeight};
pub use subject::{metric_score, LeaderboardFilter, RankedSubject, KNOWN_METRICS};
pub use views::{context_window, rising_entrants, stats, LeaderboardStats};
