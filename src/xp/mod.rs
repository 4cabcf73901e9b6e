//! Experience point calculation
//!
//! Converts a single activity-completion event into an [`XpBreakdown`]:
//! a base award plus a fixed sequence of additive bonuses, each rounded
//! independently so the same event always reproduces the same total.

mod calculator;
mod event;

pub use calculator::{XpBreakdown, XpCalculator};
pub use event::{
    ActivityCompletionEvent, ActivityKind, BonusFlags, CollaborationTier, Difficulty,
};
