//! Adventurer entity model and DTOs.

use questlog_core::progression::resolve_tier;
use questlog_core::types::{DbId, Timestamp, Xp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::character_class::ClassProgression;

/// An adventurer row. One per user; `user_id` is the primary key.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Adventurer {
    pub user_id: DbId,
    pub character_name: String,
    pub character_class_id: DbId,
    pub xp: Xp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for creating the caller's adventurer.
///
/// `character_class` is the class *name*, resolved by the handler.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAdventurer {
    #[validate(length(min = 1, max = 30, message = "must be 1 to 30 characters"))]
    pub character_name: String,
    #[validate(length(min = 1, max = 30, message = "must be 1 to 30 characters"))]
    pub character_class: String,
}

/// Request body for renaming the caller's adventurer.
///
/// Class and experience are not editable through this path.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateAdventurer {
    #[validate(length(min = 1, max = 30, message = "must be 1 to 30 characters"))]
    pub character_name: String,
}

/// Adventurer profile with the resolved tier, as shown to its owner.
#[derive(Debug, Clone, Serialize)]
pub struct AdventurerDetails {
    pub character_name: String,
    pub character_class: String,
    pub xp: Xp,
    pub tier: String,
}

impl AdventurerDetails {
    /// Build the profile, resolving the tier against the class ladder.
    pub fn new(adventurer: &Adventurer, class_name: &str, ladder: &[ClassProgression]) -> Self {
        Self {
            character_name: adventurer.character_name.clone(),
            character_class: class_name.to_string(),
            xp: adventurer.xp,
            tier: resolve_tier(adventurer.xp, ladder).to_string(),
        }
    }
}
