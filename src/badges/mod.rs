//! Badge catalog and eligibility evaluation
//!
//! Badges are discrete achievements with static unlock requirements. The
//! catalog is loaded once at startup (built-in table or JSON file) and is
//! read-only afterwards; the evaluator tests a user-statistics snapshot
//! against it without mutating either side.

mod catalog;
mod definitions;
mod evaluator;

pub use catalog::{BadgeCatalog, CatalogError};
pub use definitions::{builtin_badges, BadgeDefinition, BadgeRequirement, RequirementKind, Rarity};
pub use evaluator::{BadgeEvaluator, BadgeProgress};
