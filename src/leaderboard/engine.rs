//! Leaderboard engine
//!
//! Builds ranked views over a subject roster and tracks rank movement
//! between successive generations. One engine instance owns one rank
//! history; construct it explicitly and share it, rather than reaching for
//! a process-wide singleton.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use tracing::debug;

use super::subject::{metric_score, LeaderboardFilter, RankedSubject};

/// Ranking failures
///
/// These indicate caller bugs, not legitimate edge cases, and are returned
/// loudly instead of being coerced to zero.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("non-finite score {score} for subject {subject_id} under metric {metric}")]
    NonFiniteScore {
        metric: String,
        subject_id: String,
        score: f64,
    },

    #[error("weighted leaderboard requires at least one metric weight")]
    EmptyWeights,
}

/// One row of a generated leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub subject_id: String,
    pub display_name: String,
    pub score: f64,
    /// 1-based, consecutive, no gaps; ties ranked by stable input order
    pub rank: usize,
    /// Previous rank minus current rank; 0 when the subject had no prior
    /// rank under this metric
    pub rank_delta: i64,
    /// Rank- or percentile-derived label, independent of the badge catalog
    pub special_badge: Option<String>,
}

/// One component of a weighted score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricWeight {
    pub metric: String,
    pub weight: f64,
}

impl MetricWeight {
    pub fn new(metric: &str, weight: f64) -> Self {
        Self {
            metric: metric.to_string(),
            weight,
        }
    }
}

/// Stateful leaderboard generator
///
/// The rank-history cache maps `metric key -> (subject id -> last rank)`.
/// Each generation fully overwrites the slot for its metric inside one lock
/// acquisition, so concurrent callers cannot interleave the read-prior /
/// write-new sequence.
#[derive(Debug, Default)]
pub struct LeaderboardEngine {
    history: Mutex<HashMap<String, HashMap<String, usize>>>,
}

impl LeaderboardEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rank the roster under a single metric
    ///
    /// Subjects failing the filter are excluded entirely. Ties keep their
    /// relative roster order. An empty filtered roster yields an empty
    /// board.
    pub fn generate(
        &self,
        subjects: &[RankedSubject],
        metric: &str,
        filter: Option<&LeaderboardFilter>,
    ) -> Result<Vec<LeaderboardEntry>, EngineError> {
        let scored: Vec<(&RankedSubject, f64)> = subjects
            .iter()
            .filter(|s| filter.map_or(true, |f| f.matches(s)))
            .map(|s| (s, metric_score(s, metric)))
            .collect();

        self.rank_scored(scored, metric)
    }

    /// Rank the roster under a weighted combination of metrics
    ///
    /// `score = round(Σ metric_score_i × weight_i)`. The board is cached
    /// under a synthetic key derived from the weight list, separate from
    /// every single-metric slot.
    pub fn generate_weighted(
        &self,
        subjects: &[RankedSubject],
        weights: &[MetricWeight],
        filter: Option<&LeaderboardFilter>,
    ) -> Result<Vec<LeaderboardEntry>, EngineError> {
        if weights.is_empty() {
            return Err(EngineError::EmptyWeights);
        }

        let cache_key = weighted_cache_key(weights);
        let scored: Vec<(&RankedSubject, f64)> = subjects
            .iter()
            .filter(|s| filter.map_or(true, |f| f.matches(s)))
            .map(|s| {
                let combined: f64 = weights
                    .iter()
                    .map(|w| metric_score(s, &w.metric) * w.weight)
                    .sum();
                (s, combined.round())
            })
            .collect();

        self.rank_scored(scored, &cache_key)
    }

    /// Independent boards for each cohort, truncated to the top `top_n`
    ///
    /// Subjects for which `cohort_key` returns `None` are skipped. Each
    /// cohort ranks under its own cache slot, so cohort boards do not
    /// overwrite the roster-wide slot for the same metric.
    pub fn top_per_cohort<F>(
        &self,
        subjects: &[RankedSubject],
        metric: &str,
        cohort_key: F,
        top_n: usize,
    ) -> Result<BTreeMap<String, Vec<LeaderboardEntry>>, EngineError>
    where
        F: Fn(&RankedSubject) -> Option<String>,
    {
        let mut groups: BTreeMap<String, Vec<&RankedSubject>> = BTreeMap::new();
        for subject in subjects {
            if let Some(key) = cohort_key(subject) {
                groups.entry(key).or_default().push(subject);
            }
        }

        let mut boards = BTreeMap::new();
        for (key, members) in groups {
            let scored: Vec<(&RankedSubject, f64)> = members
                .into_iter()
                .map(|s| (s, metric_score(s, metric)))
                .collect();
            let mut board = self.rank_scored(scored, &format!("cohort:{key}:{metric}"))?;
            board.truncate(top_n);
            boards.insert(key, board);
        }
        Ok(boards)
    }

    /// Drop all cached rank history
    pub fn reset(&self) {
        self.history.lock().expect("lock").clear();
    }

    /// Shared ranking pipeline: validate, sort, rank, diff, cache, label
    fn rank_scored(
        &self,
        mut scored: Vec<(&RankedSubject, f64)>,
        cache_key: &str,
    ) -> Result<Vec<LeaderboardEntry>, EngineError> {
        for (subject, score) in &scored {
            if !score.is_finite() {
                return Err(EngineError::NonFiniteScore {
                    metric: cache_key.to_string(),
                    subject_id: subject.id.clone(),
                    score: *score,
                });
            }
        }

        // stable: tied scores keep their roster order
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).expect("scores are finite"));

        let total = scored.len();

        // Critical section for this generation: prior ranks are read and the
        // slot is overwritten under a single lock acquisition.
        let mut history = self.history.lock().expect("lock");
        let previous = history.get(cache_key);

        let mut entries = Vec::with_capacity(total);
        let mut new_ranks = HashMap::with_capacity(total);
        for (index, (subject, score)) in scored.iter().enumerate() {
            let rank = index + 1;
            let rank_delta = previous
                .and_then(|ranks| ranks.get(&subject.id))
                .map(|prev| *prev as i64 - rank as i64)
                .unwrap_or(0);

            new_ranks.insert(subject.id.clone(), rank);
            entries.push(LeaderboardEntry {
                subject_id: subject.id.clone(),
                display_name: subject.display_name.clone(),
                score: *score,
                rank,
                rank_delta,
                special_badge: special_badge(rank, total),
            });
        }

        // Full overwrite: subjects absent from this generation lose their
        // cached rank rather than being merged forward.
        debug!(cache_key, entries = total, "overwriting rank history slot");
        history.insert(cache_key.to_string(), new_ranks);

        Ok(entries)
    }
}

/// Synthetic cache key for a weighted metric combination
fn weighted_cache_key(weights: &[MetricWeight]) -> String {
    let parts: Vec<String> = weights
        .iter()
        .map(|w| format!("{}*{}", w.metric, w.weight))
        .collect();
    format!("weighted:{}", parts.join("+"))
}

/// Rank/percentile label for a board of `total` entries
fn special_badge(rank: usize, total: usize) -> Option<String> {
    let label = match rank {
        1 => "🥇 Champion",
        2 => "🥈 Runner-up",
        3 => "🥉 Third Place",
        r if r <= 10 => "Top 10",
        r => {
            let fraction = r as f64 / total as f64;
            if fraction <= 0.10 {
                "Top 10%"
            } else if fraction <= 0.25 {
                "Top 25%"
            } else {
                return None;
            }
        }
    };
    Some(label.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::UserStatsSnapshot;

    fn subject(id: &str, xp: i64) -> RankedSubject {
        RankedSubject::new(id, id, UserStatsSnapshot::with_xp(xp))
    }

    #[test]
    fn test_ranks_are_dense_one_based() {
        let engine = LeaderboardEngine::new();
        let subjects = vec![
            subject("a", 300),
            subject("b", 300), // tie with a
            subject("c", 100),
            subject("d", 300), // tie with a and b
        ];

        let board = engine.generate(&subjects, "xp", None).unwrap();
        let ranks: Vec<_> = board.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_ties_keep_roster_order() {
        let engine = LeaderboardEngine::new();
        let subjects = vec![subject("zeta", 100), subject("alpha", 100)];

        let board = engine.generate(&subjects, "xp", None).unwrap();
        // stable order, not alphabetic
        assert_eq!(board[0].subject_id, "zeta");
        assert_eq!(board[1].subject_id, "alpha");
    }

    #[test]
    fn test_rank_delta_across_generations() {
        let engine = LeaderboardEngine::new();

        let first = vec![subject("a", 10), subject("b", 5)];
        let board = engine.generate(&first, "xp", None).unwrap();
        assert_eq!(board[0].subject_id, "a");
        assert_eq!(board.iter().map(|e| e.rank_delta).collect::<Vec<_>>(), [0, 0]);

        let second = vec![subject("a", 3), subject("b", 5)];
        let board = engine.generate(&second, "xp", None).unwrap();
        assert_eq!(board[0].subject_id, "b");
        assert_eq!(board[0].rank_delta, 1); // 2 - 1
        assert_eq!(board[1].subject_id, "a");
        assert_eq!(board[1].rank_delta, -1); // 1 - 2
    }

    #[test]
    fn test_cache_slot_fully_overwritten() {
        let engine = LeaderboardEngine::new();

        engine
            .generate(&[subject("a", 10), subject("b", 5)], "xp", None)
            .unwrap();
        // b disappears from the roster; its cached rank must be dropped
        engine.generate(&[subject("a", 10)], "xp", None).unwrap();

        let board = engine
            .generate(&[subject("b", 5), subject("a", 10)], "xp", None)
            .unwrap();
        let b = board.iter().find(|e| e.subject_id == "b").unwrap();
        assert_eq!(b.rank_delta, 0); // no prior rank after the overwrite
    }

    #[test]
    fn test_metrics_have_independent_cache_slots() {
        let engine = LeaderboardEngine::new();
        let mut a = subject("a", 10);
        a.stats.streak_days = 1;
        let mut b = subject("b", 5);
        b.stats.streak_days = 9;
        let subjects = vec![a, b];

        engine.generate(&subjects, "xp", None).unwrap();
        let streak_board = engine.generate(&subjects, "streak", None).unwrap();
        // first streak generation: no prior ranks under that metric
        assert!(streak_board.iter().all(|e| e.rank_delta == 0));
    }

    #[test]
    fn test_empty_roster_is_safe() {
        let engine = LeaderboardEngine::new();
        let board = engine.generate(&[], "xp", None).unwrap();
        assert!(board.is_empty());
    }

    #[test]
    fn test_unknown_metric_scores_everyone_zero() {
        let engine = LeaderboardEngine::new();
        let board = engine
            .generate(&[subject("a", 10), subject("b", 5)], "charisma", None)
            .unwrap();
        assert!(board.iter().all(|e| e.score == 0.0));
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn test_weighted_score_rounds_combined_sum() {
        let engine = LeaderboardEngine::new();
        let mut s = subject("a", 100);
        s.stats.streak_days = 20;

        let weights = [MetricWeight::new("xp", 0.5), MetricWeight::new("streak", 0.5)];
        let board = engine.generate_weighted(&[s], &weights, None).unwrap();
        assert_eq!(board[0].score, 60.0);
    }

    #[test]
    fn test_weighted_uses_its_own_cache_slot() {
        let engine = LeaderboardEngine::new();
        let subjects = vec![subject("a", 10), subject("b", 5)];
        engine.generate(&subjects, "xp", None).unwrap();

        let weights = [MetricWeight::new("xp", 1.0)];
        let board = engine.generate_weighted(&subjects, &weights, None).unwrap();
        // same ordering as plain xp, but no deltas: distinct cache slot
        assert!(board.iter().all(|e| e.rank_delta == 0));
    }

    #[test]
    fn test_empty_weights_rejected() {
        let engine = LeaderboardEngine::new();
        let result = engine.generate_weighted(&[subject("a", 1)], &[], None);
        assert!(matches!(result, Err(EngineError::EmptyWeights)));
    }

    #[test]
    fn test_filter_excludes_subjects_entirely() {
        let engine = LeaderboardEngine::new();
        let mut opted_out = subject("quiet", 1000);
        opted_out.ranking_eligible = false;

        let filter = LeaderboardFilter {
            eligible_only: true,
            ..LeaderboardFilter::default()
        };
        let board = engine
            .generate(&[opted_out, subject("loud", 10)], "xp", Some(&filter))
            .unwrap();
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].subject_id, "loud");
        assert_eq!(board[0].rank, 1);
    }

    #[test]
    fn test_special_badges_by_rank_and_percentile() {
        let engine = LeaderboardEngine::new();
        let subjects: Vec<RankedSubject> = (0..200)
            .map(|i| subject(&format!("s{i}"), 1000 - i as i64))
            .collect();

        let board = engine.generate(&subjects, "xp", None).unwrap();
        assert_eq!(board[0].special_badge.as_deref(), Some("🥇 Champion"));
        assert_eq!(board[1].special_badge.as_deref(), Some("🥈 Runner-up"));
        assert_eq!(board[2].special_badge.as_deref(), Some("🥉 Third Place"));
        assert_eq!(board[9].special_badge.as_deref(), Some("Top 10"));
        // rank 11 of 200 is past the top-10 cut but within the top 10%
        assert_eq!(board[10].special_badge.as_deref(), Some("Top 10%"));
        // rank 50 of 200 sits exactly on the 25% line
        assert_eq!(board[49].special_badge.as_deref(), Some("Top 25%"));
        assert_eq!(board[50].special_badge, None);
    }

    #[test]
    fn test_top_per_cohort_groups_independently() {
        let engine = LeaderboardEngine::new();
        let mut a = subject("a", 100);
        a.cohort = Some("red".to_string());
        let mut b = subject("b", 50);
        b.cohort = Some("red".to_string());
        let mut c = subject("c", 75);
        c.cohort = Some("blue".to_string());
        let d = subject("d", 999); // no cohort, skipped

        let boards = engine
            .top_per_cohort(&[a, b, c, d], "xp", |s| s.cohort.clone(), 10)
            .unwrap();

        assert_eq!(boards.len(), 2);
        assert_eq!(boards["red"].len(), 2);
        assert_eq!(boards["red"][0].subject_id, "a");
        assert_eq!(boards["red"][0].rank, 1);
        assert_eq!(boards["blue"][0].subject_id, "c");
        assert_eq!(boards["blue"][0].rank, 1);
    }

    #[test]
    fn test_top_per_cohort_does_not_disturb_metric_slot() {
        let engine = LeaderboardEngine::new();
        let mut a = subject("a", 10);
        a.cohort = Some("red".to_string());
        let mut b = subject("b", 5);
        b.cohort = Some("red".to_string());
        let subjects = vec![a, b];

        engine.generate(&subjects, "xp", None).unwrap();
        engine
            .top_per_cohort(&subjects, "xp", |s| s.cohort.clone(), 1)
            .unwrap();

        // the roster-wide slot still holds the first generation's ranks
        let board = engine.generate(&subjects, "xp", None).unwrap();
        assert!(board.iter().all(|e| e.rank_delta == 0));
    }

    #[test]
    fn test_reset_clears_history() {
        let engine = LeaderboardEngine::new();
        let subjects = vec![subject("a", 10), subject("b", 5)];

        engine.generate(&subjects, "xp", None).unwrap();
        engine.reset();

        let reordered = vec![subject("a", 1), subject("b", 5)];
        let board = engine.generate(&reordered, "xp", None).unwrap();
        assert!(board.iter().all(|e| e.rank_delta == 0));
    }

    #[test]
    fn test_non_finite_weighted_score_propagates() {
        let engine = LeaderboardEngine::new();
        let weights = [MetricWeight::new("xp", f64::INFINITY), MetricWeight::new("xp", f64::NEG_INFINITY)];
        let result = engine.generate_weighted(&[subject("a", 1)], &weights, None);
        assert!(matches!(result, Err(EngineError::NonFiniteScore { .. })));
    }
}
