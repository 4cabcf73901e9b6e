//! XP calculation pipeline
//!
//! Turns one [`ActivityCompletionEvent`] into an [`XpBreakdown`]. The
//! pipeline is a fixed sequence of stages; each stage rounds its own
//! contribution before it is added, so a breakdown can be re-derived
//! line-by-line from the event alone.

use tracing::warn;

use super::event::{ActivityCompletionEvent, ActivityKind, CollaborationTier, Difficulty};

/// Itemized XP award for one completed activity
///
/// `total_xp` is always the sum of the seven stage fields. `explanation`
/// holds one human-readable line per nonzero stage, in stage order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XpBreakdown {
    pub base_xp: i64,
    pub quality_bonus: i64,
    pub venue_bonus: i64,
    pub collaboration_bonus: i64,
    pub time_bonus: i64,
    pub streak_bonus: i64,
    pub special_bonus: i64,
    pub total_xp: i64,
    pub explanation: Vec<String>,
}

/// Quality band multipliers, matched top-down
const QUALITY_BANDS: &[(u32, f64, &str)] = &[
    (90, 1.5, "excellent"),
    (75, 1.2, "good"),
    (60, 1.0, "average"),
];

/// Multiplier and label for scores below every band threshold
const QUALITY_POOR: (f64, &str) = (0.8, "poor");

/// Physical-venue bonus as a fraction of base XP
const VENUE_MULTIPLIER: f64 = 0.5;

/// Flat XP per bonus flag
const STREAK_BONUS: i64 = 15;
const FIRST_OF_KIND_BONUS: i64 = 25;
const PERFECT_SCORE_BONUS: i64 = 50;
const EARLY_COMPLETION_BONUS: i64 = 20;

/// Stateless XP calculator
///
/// Pure function of the event: no clock, no storage, no failure modes.
/// Unrecognized kinds and missing optional fields degrade to zero
/// contributions rather than errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct XpCalculator;

impl XpCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Compute the full XP breakdown for one event
    pub fn compute(&self, event: &ActivityCompletionEvent) -> XpBreakdown {
        let mut breakdown = XpBreakdown::default();

        // Stage 1: base XP
        breakdown.base_xp = base_xp(event);
        if breakdown.base_xp != 0 {
            let label = match event.kind {
                kind if kind.is_difficulty_graded() => format!(
                    "Base XP ({}, {})",
                    kind,
                    event.difficulty.unwrap_or_default().as_str()
                ),
                kind => format!("Base XP ({kind})"),
            };
            push_line(&mut breakdown.explanation, &label, breakdown.base_xp);
        }

        // Stage 2: quality bonus (negative in the poor band)
        if let Some(score) = event.quality_score {
            let (multiplier, band) = quality_band(score);
            breakdown.quality_bonus = round(breakdown.base_xp as f64 * (multiplier - 1.0));
            if breakdown.quality_bonus != 0 {
                push_line(
                    &mut breakdown.explanation,
                    &format!("Quality bonus ({band})"),
                    breakdown.quality_bonus,
                );
            }
        }

        // Stage 3: venue bonus
        if event.at_physical_venue {
            breakdown.venue_bonus = round(breakdown.base_xp as f64 * VENUE_MULTIPLIER);
            if breakdown.venue_bonus != 0 {
                push_line(
                    &mut breakdown.explanation,
                    "In-person venue bonus",
                    breakdown.venue_bonus,
                );
            }
        }

        // Stage 4: collaboration bonus
        if let Some(tier) = event.collaboration_tier {
            breakdown.collaboration_bonus = match tier {
                CollaborationTier::Individual => 0,
                CollaborationTier::Pair => 10,
                CollaborationTier::Team => 25,
            };
            if breakdown.collaboration_bonus != 0 {
                push_line(
                    &mut breakdown.explanation,
                    "Collaboration bonus",
                    breakdown.collaboration_bonus,
                );
            }
        }

        // Stage 5: time efficiency bonus
        if let (Some(actual), Some(estimated)) = (
            event.completion_duration_minutes,
            event.estimated_duration_minutes,
        ) {
            if actual > 0 {
                let efficiency = estimated as f64 / actual as f64;
                breakdown.time_bonus = if efficiency >= 1.5 {
                    30
                } else if efficiency >= 1.2 {
                    15
                } else {
                    0
                };
                if breakdown.time_bonus != 0 {
                    push_line(
                        &mut breakdown.explanation,
                        "Time efficiency bonus",
                        breakdown.time_bonus,
                    );
                }
            }
        }

        // Stage 6: streak bonus
        if event.bonus_flags.active_streak {
            breakdown.streak_bonus = STREAK_BONUS;
            push_line(
                &mut breakdown.explanation,
                "Streak bonus",
                breakdown.streak_bonus,
            );
        }

        // Stage 7: special bonuses
        if event.bonus_flags.first_of_kind {
            breakdown.special_bonus += FIRST_OF_KIND_BONUS;
        }
        if event.bonus_flags.perfect_score {
            breakdown.special_bonus += PERFECT_SCORE_BONUS;
        }
        if event.bonus_flags.early_completion {
            breakdown.special_bonus += EARLY_COMPLETION_BONUS;
        }
        if breakdown.special_bonus != 0 {
            push_line(
                &mut breakdown.explanation,
                "Special bonus",
                breakdown.special_bonus,
            );
        }

        breakdown.total_xp = breakdown.base_xp
            + breakdown.quality_bonus
            + breakdown.venue_bonus
            + breakdown.collaboration_bonus
            + breakdown.time_bonus
            + breakdown.streak_bonus
            + breakdown.special_bonus;

        breakdown
    }
}

/// Base XP table
///
/// Modules and tasks are graded by difficulty (missing difficulty reads as
/// medium); all other kinds award a flat amount.
fn base_xp(event: &ActivityCompletionEvent) -> i64 {
    let difficulty = event.difficulty.unwrap_or_default();

    match event.kind {
        ActivityKind::Module => match difficulty {
            Difficulty::Easy => 50,
            Difficulty::Medium => 75,
            Difficulty::Hard => 100,
        },
        ActivityKind::Task => match difficulty {
            Difficulty::Easy => 75,
            Difficulty::Medium => 100,
            Difficulty::Hard => 150,
        },
        ActivityKind::Event => 40,
        ActivityKind::Collaboration => 60,
        ActivityKind::Mentorship => 80,
        ActivityKind::Achievement => 100,
        ActivityKind::Unknown => {
            warn!("unrecognized activity kind, awarding 0 base XP");
            0
        }
    }
}

/// Map a 0-100 quality score to its band multiplier and label
fn quality_band(score: u32) -> (f64, &'static str) {
    for &(threshold, multiplier, label) in QUALITY_BANDS {
        if score >= threshold {
            return (multiplier, label);
        }
    }
    QUALITY_POOR
}

/// Round half away from zero, as every stage does
fn round(value: f64) -> i64 {
    value.round() as i64
}

fn push_line(lines: &mut Vec<String>, label: &str, amount: i64) {
    lines.push(format!("{label}: {amount:+} XP"));
}
