//! Level band resolution
//!
//! Maps cumulative XP onto one of four ordered progression tiers and
//! answers "how far to the next tier" and "did this award cross a tier"
//! questions for the caller that owns the XP totals.

use serde::{Deserialize, Serialize};

/// Ordered progression tiers
///
/// Discriminants double as tier indices; ordering follows XP thresholds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum LevelBand {
    #[default]
    Novice,
    Apprentice,
    Scholar,
    Luminary,
}

/// XP thresholds, one per band, strictly increasing
const THRESHOLDS: [(LevelBand, i64); 4] = [
    (LevelBand::Novice, 0),
    (LevelBand::Apprentice, 1000),
    (LevelBand::Scholar, 2500),
    (LevelBand::Luminary, 5000),
];

impl LevelBand {
    /// Highest band whose threshold is at or below the given XP
    pub fn for_xp(cumulative_xp: i64) -> Self {
        THRESHOLDS
            .iter()
            .rev()
            .find(|(_, threshold)| cumulative_xp >= *threshold)
            .map(|(band, _)| *band)
            .unwrap_or(LevelBand::Novice)
    }

    /// XP required to enter this band
    pub fn threshold(&self) -> i64 {
        THRESHOLDS
            .iter()
            .find(|(band, _)| band == self)
            .map(|(_, threshold)| *threshold)
            .unwrap_or(0)
    }

    /// The band after this one, if any
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Novice => Some(Self::Apprentice),
            Self::Apprentice => Some(Self::Scholar),
            Self::Scholar => Some(Self::Luminary),
            Self::Luminary => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Novice => "Novice",
            Self::Apprentice => "Apprentice",
            Self::Scholar => "Scholar",
            Self::Luminary => "Luminary",
        }
    }
}

impl std::fmt::Display for LevelBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Position within the band ladder for a given XP total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub current: LevelBand,
    /// None at the top band
    pub next: Option<LevelBand>,
    /// 0-100, rounded; 100 at the top band
    pub percent_complete: u32,
    /// XP still needed to reach `next`; 0 at the top band
    pub xp_to_next: i64,
}

/// Outcome of comparing tiers before and after an XP award
///
/// A single award that jumps several tiers reports only the final tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelChange {
    pub leveled_up: bool,
    pub from: LevelBand,
    pub to: LevelBand,
}

/// Progress through the current band toward the next one
pub fn progress(cumulative_xp: i64) -> LevelProgress {
    let current = LevelBand::for_xp(cumulative_xp);

    match current.next() {
        Some(next) => {
            let floor = current.threshold();
            let span = next.threshold() - floor;
            let into_band = (cumulative_xp - floor).max(0);
            let percent = (into_band as f64 / span as f64 * 100.0).round() as u32;
            LevelProgress {
                current,
                next: Some(next),
                percent_complete: percent.min(100),
                xp_to_next: next.threshold() - cumulative_xp,
            }
        }
        None => LevelProgress {
            current,
            next: None,
            percent_complete: 100,
            xp_to_next: 0,
        },
    }
}

/// Compare tiers before and after an award
pub fn did_level_up(old_xp: i64, new_xp: i64) -> LevelChange {
    let from = LevelBand::for_xp(old_xp);
    let to = LevelBand::for_xp(new_xp);
    LevelChange {
        leveled_up: to > from,
        from,
        to,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_for_xp_at_boundaries() {
        assert_eq!(LevelBand::for_xp(0), LevelBand::Novice);
        assert_eq!(LevelBand::for_xp(999), LevelBand::Novice);
        assert_eq!(LevelBand::for_xp(1000), LevelBand::Apprentice);
        assert_eq!(LevelBand::for_xp(2499), LevelBand::Apprentice);
        assert_eq!(LevelBand::for_xp(2500), LevelBand::Scholar);
        assert_eq!(LevelBand::for_xp(5000), LevelBand::Luminary);
        assert_eq!(LevelBand::for_xp(1_000_000), LevelBand::Luminary);
    }

    #[test]
    fn test_thresholds_strictly_increasing() {
        for pair in THRESHOLDS.windows(2) {
            assert!(pair[0].1 < pair[1].1);
        }
        assert_eq!(THRESHOLDS[0].1, 0);
    }

    #[test]
    fn test_progress_midway_through_band() {
        let p = progress(1750); // halfway between 1000 and 2500
        assert_eq!(p.current, LevelBand::Apprentice);
        assert_eq!(p.next, Some(LevelBand::Scholar));
        assert_eq!(p.percent_complete, 50);
        assert_eq!(p.xp_to_next, 750);
    }

    #[test]
    fn test_progress_at_top_band() {
        let p = progress(9000);
        assert_eq!(p.current, LevelBand::Luminary);
        assert_eq!(p.next, None);
        assert_eq!(p.percent_complete, 100);
        assert_eq!(p.xp_to_next, 0);
    }

    #[test]
    fn test_level_up_detection() {
        let change = did_level_up(900, 1100);
        assert!(change.leveled_up);
        assert_eq!(change.from, LevelBand::Novice);
        assert_eq!(change.to, LevelBand::Apprentice);

        let no_change = did_level_up(1100, 1200);
        assert!(!no_change.leveled_up);
    }

    #[test]
    fn test_multi_tier_jump_reports_final_tier_only() {
        let change = did_level_up(500, 6000);
        assert!(change.leveled_up);
        assert_eq!(change.from, LevelBand::Novice);
        assert_eq!(change.to, LevelBand::Luminary);
    }
}
