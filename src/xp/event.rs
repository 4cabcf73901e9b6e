//! Activity completion events
//!
//! Immutable records produced by the activity-tracking collaborator when a
//! learner finishes a gradeable unit of work.

use serde::{Deserialize, Serialize};

/// The kind of activity that was completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    /// A learning module (difficulty-graded)
    Module,
    /// A practice task (difficulty-graded)
    Task,
    /// Attendance at a platform event
    Event,
    /// A collaborative session with other learners
    Collaboration,
    /// A mentorship session, either side
    Mentorship,
    /// A platform achievement milestone
    Achievement,
    /// Catch-all for kinds this engine does not know yet; awards no base XP
    #[serde(other)]
    Unknown,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::Task => "task",
            Self::Event => "event",
            Self::Collaboration => "collaboration",
            Self::Mentorship => "mentorship",
            Self::Achievement => "achievement",
            Self::Unknown => "unknown",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "module" => Some(Self::Module),
            "task" => Some(Self::Task),
            "event" => Some(Self::Event),
            "collaboration" => Some(Self::Collaboration),
            "mentorship" => Some(Self::Mentorship),
            "achievement" => Some(Self::Achievement),
            _ => None,
        }
    }

    /// Kinds whose base XP varies by difficulty
    pub fn is_difficulty_graded(&self) -> bool {
        matches!(self, Self::Module | Self::Task)
    }
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Difficulty grade for modules and tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

/// Group size of a collaborative activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollaborationTier {
    Individual,
    Pair,
    Team,
}

/// Per-event bonus markers set by the activity tracker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusFlags {
    /// The subject has an active daily streak
    pub active_streak: bool,
    /// First time the subject completed this kind of activity
    pub first_of_kind: bool,
    /// Perfect score on the graded portion
    pub perfect_score: bool,
    /// Finished ahead of the published deadline
    pub early_completion: bool,
}

/// One completed activity, as reported by the activity tracker
///
/// Optional fields simply suppress the bonus stages that need them; the
/// calculator never rejects an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityCompletionEvent {
    pub kind: ActivityKind,

    /// Required for modules and tasks; defaults to medium when absent
    #[serde(default)]
    pub difficulty: Option<Difficulty>,

    /// Graded quality, 0-100
    #[serde(default)]
    pub quality_score: Option<u32>,

    /// Completed at a physical venue rather than online
    #[serde(default)]
    pub at_physical_venue: bool,

    #[serde(default)]
    pub collaboration_tier: Option<CollaborationTier>,

    /// Actual time spent, in minutes
    #[serde(default)]
    pub completion_duration_minutes: Option<u32>,

    /// Expected time budget, in minutes
    #[serde(default)]
    pub estimated_duration_minutes: Option<u32>,

    #[serde(default)]
    pub bonus_flags: BonusFlags,
}

impl ActivityCompletionEvent {
    /// Minimal event of the given kind; bonus stages all disabled
    pub fn new(kind: ActivityKind) -> Self {
        Self {
            kind,
            difficulty: None,
            quality_score: None,
            at_physical_venue: false,
            collaboration_tier: None,
            completion_duration_minutes: None,
            estimated_duration_minutes: None,
            bonus_flags: BonusFlags::default(),
        }
    }
}
