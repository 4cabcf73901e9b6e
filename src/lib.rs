//! Skillforge - reward and ranking engine
//!
//! Skillforge computes the quantitative rewards of a gamified learning
//! platform: experience points for completed activities, progression tiers,
//! badge eligibility, and ranked leaderboards with rank-change tracking.
//!
//! The crate is a pure computation core. Persistence of user records,
//! identity, transport, and rendering are collaborators that feed it
//! fully-materialized inputs and consume its returned values:
//!
//! 1. An activity-completion event goes through [`xp::XpCalculator`], which
//!    yields an auditable [`xp::XpBreakdown`].
//! 2. The caller folds the XP delta into the subject's cumulative total and
//!    asks [`levels`] for the new tier.
//! 3. [`badges::BadgeEvaluator`] re-derives badge membership from the
//!    updated [`stats::UserStatsSnapshot`].
//! 4. On demand, [`leaderboard::LeaderboardEngine`] ranks the roster for a
//!    metric and diffs the result against its cached previous ranking.

pub mod badges;
pub mod leaderboard;
pub mod levels;
pub mod stats;
pub mod xp;

pub use badges::{BadgeCatalog, BadgeDefinition, BadgeEvaluator, BadgeRequirement, Rarity};
pub use leaderboard::{
    LeaderboardEngine, LeaderboardEntry, LeaderboardFilter, MetricWeight, RankedSubject,
};
pub use levels::{LevelBand, LevelChange, LevelProgress};
pub use stats::UserStatsSnapshot;
pub use xp::{ActivityCompletionEvent, ActivityKind, XpBreakdown, XpCalculator};
