//! Badge definitions and the built-in catalog
//!
//! Every badge is defined by a single counter requirement against the user
//! statistics snapshot, except manual grants, which are tested by id
//! membership.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Badge rarity, ordered lowest to highest
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    #[default]
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Rare => "Rare",
            Self::Epic => "Epic",
            Self::Legendary => "Legendary",
        }
    }
}

/// Which snapshot counter a badge requirement reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementKind {
    Xp,
    ModulesCompleted,
    TasksCompleted,
    StreakDays,
    CollaborationCount,
    MentorshipCount,
    EventCount,
    /// Granted by hand; tested against the snapshot's granted-id set
    ManualGrant,
}

/// Unlock condition: `counter(kind) >= value`
///
/// A requirement with `value = 0` is met by every subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeRequirement {
    pub kind: RequirementKind,
    pub value: u64,
}

impl BadgeRequirement {
    pub fn new(kind: RequirementKind, value: u64) -> Self {
        Self { kind, value }
    }
}

/// One badge in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeDefinition {
    /// Unique across the catalog
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub requirement: BadgeRequirement,
    pub rarity: Rarity,
    /// XP granted when the badge is first awarded
    pub reward_xp: i64,
}

impl BadgeDefinition {
    fn new(
        id: &str,
        name: &str,
        description: &str,
        icon: &str,
        requirement: BadgeRequirement,
        rarity: Rarity,
        reward_xp: i64,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            requirement,
            rarity,
            reward_xp,
        }
    }
}

/// The built-in badge catalog
///
/// Deployments can replace this via [`crate::BadgeCatalog::from_json`]; the
/// table below is the default shipped set.
pub static BUILTIN_BADGES: Lazy<Vec<BadgeDefinition>> = Lazy::new(|| {
    use RequirementKind::*;

    vec![
        // === ONBOARDING ===
        BadgeDefinition::new(
            "welcome",
            "Welcome Aboard",
            "Join the platform",
            "👋",
            BadgeRequirement::new(Xp, 0),
            Rarity::Common,
            10,
        ),
        BadgeDefinition::new(
            "first_module",
            "First Steps",
            "Complete your first module",
            "🎯",
            BadgeRequirement::new(ModulesCompleted, 1),
            Rarity::Common,
            25,
        ),
        BadgeDefinition::new(
            "first_task",
            "Hands On",
            "Complete your first task",
            "🔧",
            BadgeRequirement::new(TasksCompleted, 1),
            Rarity::Common,
            25,
        ),
        // === XP MILESTONES ===
        BadgeDefinition::new(
            "xp_1k",
            "Rising Star",
            "Earn 1,000 XP",
            "⭐",
            BadgeRequirement::new(Xp, 1000),
            Rarity::Common,
            50,
        ),
        BadgeDefinition::new(
            "xp_2500",
            "Scholar's Mark",
            "Earn 2,500 XP",
            "🌟",
            BadgeRequirement::new(Xp, 2500),
            Rarity::Rare,
            100,
        ),
        BadgeDefinition::new(
            "xp_5k",
            "Luminary",
            "Earn 5,000 XP",
            "💫",
            BadgeRequirement::new(Xp, 5000),
            Rarity::Epic,
            250,
        ),
        BadgeDefinition::new(
            "xp_10k",
            "Beyond the Ladder",
            "Earn 10,000 XP",
            "🌌",
            BadgeRequirement::new(Xp, 10000),
            Rarity::Legendary,
            500,
        ),
        // === MODULES ===
        BadgeDefinition::new(
            "modules_10",
            "Curious Mind",
            "Complete 10 modules",
            "📚",
            BadgeRequirement::new(ModulesCompleted, 10),
            Rarity::Common,
            50,
        ),
        BadgeDefinition::new(
            "modules_25",
            "Bookworm",
            "Complete 25 modules",
            "🎓",
            BadgeRequirement::new(ModulesCompleted, 25),
            Rarity::Rare,
            100,
        ),
        BadgeDefinition::new(
            "modules_50",
            "Polymath",
            "Complete 50 modules",
            "🧠",
            BadgeRequirement::new(ModulesCompleted, 50),
            Rarity::Epic,
            250,
        ),
        // === TASKS ===
        BadgeDefinition::new(
            "tasks_10",
            "Getting Things Done",
            "Complete 10 tasks",
            "💪",
            BadgeRequirement::new(TasksCompleted, 10),
            Rarity::Common,
            50,
        ),
        BadgeDefinition::new(
            "tasks_50",
            "Workhorse",
            "Complete 50 tasks",
            "🏗️",
            BadgeRequirement::new(TasksCompleted, 50),
            Rarity::Rare,
            150,
        ),
        BadgeDefinition::new(
            "tasks_100",
            "Centurion",
            "Complete 100 tasks",
            "💯",
            BadgeRequirement::new(TasksCompleted, 100),
            Rarity::Epic,
            300,
        ),
        // === STREAKS ===
        BadgeDefinition::new(
            "streak_3",
            "On Fire",
            "Keep a 3-day streak",
            "🔥",
            BadgeRequirement::new(StreakDays, 3),
            Rarity::Common,
            30,
        ),
        BadgeDefinition::new(
            "streak_7",
            "Week Warrior",
            "Keep a 7-day streak",
            "📅",
            BadgeRequirement::new(StreakDays, 7),
            Rarity::Rare,
            75,
        ),
        BadgeDefinition::new(
            "streak_30",
            "Monthly Master",
            "Keep a 30-day streak",
            "👑",
            BadgeRequirement::new(StreakDays, 30),
            Rarity::Epic,
            300,
        ),
        BadgeDefinition::new(
            "streak_100",
            "Unstoppable",
            "Keep a 100-day streak",
            "⚡",
            BadgeRequirement::new(StreakDays, 100),
            Rarity::Legendary,
            1000,
        ),
        // === COLLABORATION ===
        BadgeDefinition::new(
            "collab_5",
            "Team Player",
            "Join 5 collaborations",
            "🤝",
            BadgeRequirement::new(CollaborationCount, 5),
            Rarity::Common,
            50,
        ),
        BadgeDefinition::new(
            "collab_25",
            "Community Pillar",
            "Join 25 collaborations",
            "🏛️",
            BadgeRequirement::new(CollaborationCount, 25),
            Rarity::Epic,
            250,
        ),
        // === MENTORSHIP ===
        BadgeDefinition::new(
            "mentor_1",
            "Guide",
            "Complete a mentorship session",
            "🧭",
            BadgeRequirement::new(MentorshipCount, 1),
            Rarity::Rare,
            75,
        ),
        BadgeDefinition::new(
            "mentor_10",
            "Sensei",
            "Complete 10 mentorship sessions",
            "🥋",
            BadgeRequirement::new(MentorshipCount, 10),
            Rarity::Legendary,
            500,
        ),
        // === EVENTS ===
        BadgeDefinition::new(
            "events_3",
            "Regular",
            "Attend 3 events",
            "🎪",
            BadgeRequirement::new(EventCount, 3),
            Rarity::Common,
            40,
        ),
        BadgeDefinition::new(
            "events_10",
            "Scene Staple",
            "Attend 10 events",
            "🎟️",
            BadgeRequirement::new(EventCount, 10),
            Rarity::Rare,
            100,
        ),
        // === MANUAL GRANTS ===
        BadgeDefinition::new(
            "founding_member",
            "Founding Member",
            "Awarded to the first cohort",
            "🏆",
            BadgeRequirement::new(ManualGrant, 1),
            Rarity::Legendary,
            250,
        ),
        BadgeDefinition::new(
            "community_hero",
            "Community Hero",
            "Awarded by moderators for outstanding help",
            "🦸",
            BadgeRequirement::new(ManualGrant, 1),
            Rarity::Epic,
            200,
        ),
    ]
});

/// Clone of the built-in catalog table
pub fn builtin_badges() -> Vec<BadgeDefinition> {
    BUILTIN_BADGES.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ids_are_unique() {
        let badges = builtin_badges();
        let mut ids: Vec<_> = badges.iter().map(|b| b.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), badges.len());
    }

    #[test]
    fn test_rarity_ordering() {
        assert!(Rarity::Legendary > Rarity::Epic);
        assert!(Rarity::Epic > Rarity::Rare);
        assert!(Rarity::Rare > Rarity::Common);
    }

    #[test]
    fn test_definition_json_roundtrip() {
        let badge = &builtin_badges()[0];
        let json = serde_json::to_string(badge).unwrap();
        let back: BadgeDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(&back, badge);
    }
}
