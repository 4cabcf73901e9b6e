//! Badge catalog store
//!
//! Wraps the badge definition list behind integrity validation. Duplicate
//! ids are the one fatal startup condition: everything downstream keys
//! earned-badge state by id, so a collision would silently merge two badges.

use anyhow::Context;
use std::collections::HashSet;
use std::path::Path;

use super::definitions::{builtin_badges, BadgeDefinition};

/// Catalog construction failures; startup-only
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate badge id in catalog: {0}")]
    DuplicateId(String),
}

/// Validated, read-only badge catalog
#[derive(Debug, Clone)]
pub struct BadgeCatalog {
    badges: Vec<BadgeDefinition>,
}

impl BadgeCatalog {
    /// Build a catalog from an explicit definition list
    pub fn new(badges: Vec<BadgeDefinition>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for badge in &badges {
            if !seen.insert(badge.id.as_str()) {
                return Err(CatalogError::DuplicateId(badge.id.clone()));
            }
        }
        Ok(Self { badges })
    }

    /// The built-in catalog shipped with the crate
    pub fn builtin() -> Self {
        // the built-in table is covered by a uniqueness test
        Self::new(builtin_badges()).expect("built-in catalog is valid")
    }

    /// Parse a catalog from a JSON array of definitions
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let badges: Vec<BadgeDefinition> =
            serde_json::from_str(json).context("failed to parse badge catalog JSON")?;
        Ok(Self::new(badges)?)
    }

    /// Load a catalog from a JSON file
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read badge catalog {}", path.display()))?;
        Self::from_json(&json)
    }

    /// All definitions, in catalog order
    pub fn badges(&self) -> &[BadgeDefinition] {
        &self.badges
    }

    pub fn get(&self, id: &str) -> Option<&BadgeDefinition> {
        self.badges.iter().find(|b| b.id == id)
    }

    pub fn len(&self) -> usize {
        self.badges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.badges.is_empty()
    }

    /// Total XP available from every badge in the catalog
    pub fn total_reward_xp(&self) -> i64 {
        self.badges.iter().map(|b| b.reward_xp).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::badges::definitions::{BadgeRequirement, Rarity, RequirementKind};
    use std::io::Write;

    fn badge(id: &str) -> BadgeDefinition {
        BadgeDefinition {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            icon: "🏅".to_string(),
            requirement: BadgeRequirement::new(RequirementKind::Xp, 100),
            rarity: Rarity::Common,
            reward_xp: 10,
        }
    }

    #[test]
    fn test_builtin_catalog_validates() {
        let catalog = BadgeCatalog::builtin();
        assert!(!catalog.is_empty());
        assert!(catalog.get("first_module").is_some());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = BadgeCatalog::new(vec![badge("dup"), badge("dup")]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id == "dup"));
    }

    #[test]
    fn test_load_from_json_file() {
        let badges = vec![badge("a"), badge("b")];
        let json = serde_json::to_string(&badges).unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let catalog = BadgeCatalog::load_from_file(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.get("b").is_some());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(BadgeCatalog::from_json("not json").is_err());
    }
}
