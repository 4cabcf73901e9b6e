//! Read-only views over an already-generated leaderboard
//!
//! None of these recompute scores or touch the engine's rank history; they
//! slice and summarize the entry list a `generate` call returned.

use serde::{Deserialize, Serialize};

use super::engine::LeaderboardEntry;

/// Summary statistics for a board, optionally focused on one subject
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardStats {
    pub count: usize,
    pub average_score: f64,
    pub top_score: f64,
    /// Set when a focus subject was requested and found
    pub subject_rank: Option<usize>,
    /// 1-100; rank 1 is the 100th percentile
    pub subject_percentile: Option<u32>,
}

/// Summarize a board; an empty board yields zeroed stats
pub fn stats(board: &[LeaderboardEntry], subject_id: Option<&str>) -> LeaderboardStats {
    if board.is_empty() {
        return LeaderboardStats::default();
    }

    let count = board.len();
    let total: f64 = board.iter().map(|e| e.score).sum();
    let top_score = board[0].score;

    let subject_rank = subject_id
        .and_then(|id| board.iter().find(|e| e.subject_id == id))
        .map(|e| e.rank);
    let subject_percentile = subject_rank
        .map(|rank| (((count - rank + 1) as f64 / count as f64) * 100.0).round() as u32);

    LeaderboardStats {
        count,
        average_score: total / count as f64,
        top_score,
        subject_rank,
        subject_percentile,
    }
}

/// Contiguous slice of the board centered on a subject, clipped at the ends
///
/// Empty when the subject is not on the board.
pub fn context_window<'a>(
    board: &'a [LeaderboardEntry],
    subject_id: &str,
    radius: usize,
) -> &'a [LeaderboardEntry] {
    let Some(position) = board.iter().position(|e| e.subject_id == subject_id) else {
        return &[];
    };

    let start = position.saturating_sub(radius);
    let end = (position + radius + 1).min(board.len());
    &board[start..end]
}

/// Entries that climbed since the previous generation, biggest climb first
pub fn rising_entrants(board: &[LeaderboardEntry], limit: usize) -> Vec<LeaderboardEntry> {
    let mut risers: Vec<LeaderboardEntry> = board
        .iter()
        .filter(|e| e.rank_delta > 0)
        .cloned()
        .collect();
    risers.sort_by(|a, b| b.rank_delta.cmp(&a.rank_delta));
    risers.truncate(limit);
    risers
}
