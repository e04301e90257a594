//! Quest entity model and DTOs.

use questlog_core::quest::{
    DifficultyRating, QuestCategory, QuestChanges, QuestField, QuestState, MAX_TITLE_LENGTH,
};
use questlog_core::types::{DbId, Timestamp, Xp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Maximum length of a single tag (characters).
pub const MAX_TAG_LENGTH: usize = MAX_TITLE_LENGTH;

/// A row from the `quests` table.
///
/// `difficulty_rating` and `category` hold the stored labels as text so rows
/// written with labels unknown to this build still load.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Quest {
    pub id: DbId,
    pub adventurer_id: DbId,
    pub title: String,
    pub details: Option<serde_json::Value>,
    pub difficulty_rating: String,
    pub category: String,
    pub deadline: Timestamp,
    pub tags: Vec<String>,
    pub completed: bool,
    pub created_at: Timestamp,
    pub completed_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

impl Quest {
    pub fn state(&self) -> QuestState {
        QuestState::from_completed(self.completed)
    }
}

/// Request body for creating a quest.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuest {
    #[validate(length(min = 1, max = 50, message = "must be 1 to 50 characters"))]
    pub title: String,
    pub details: Option<serde_json::Value>,
    pub difficulty_rating: DifficultyRating,
    pub category: QuestCategory,
    pub deadline: Timestamp,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request body for updating a quest. All fields are optional.
///
/// What actually gets written depends on the quest's state; see
/// [`questlog_core::quest::plan_quest_update`]. An explicit
/// `"details": null` clears the details; an absent key keeps them.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateQuest {
    #[validate(length(min = 1, max = 50, message = "must be 1 to 50 characters"))]
    pub title: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub details: Option<Option<serde_json::Value>>,
    pub difficulty_rating: Option<DifficultyRating>,
    pub category: Option<QuestCategory>,
    pub deadline: Option<Timestamp>,
    pub tags: Option<Vec<String>>,
    pub completed: Option<bool>,
}

impl From<UpdateQuest> for QuestChanges {
    fn from(input: UpdateQuest) -> Self {
        QuestChanges {
            title: input.title,
            details: input.details,
            difficulty_rating: input.difficulty_rating,
            tags: input.tags,
            deadline: input.deadline,
            category: input.category,
            completed: input.completed,
        }
    }
}

/// Filters for listing an adventurer's quests.
///
/// A tag filter takes precedence over a category filter; empty strings
/// count as absent.
#[derive(Debug, Clone, Default)]
pub struct QuestFilter {
    pub completed: Option<bool>,
    pub tag: Option<String>,
    pub category: Option<String>,
}

impl QuestFilter {
    pub fn new(completed: Option<bool>, tag: Option<String>, category: Option<String>) -> Self {
        let tag = tag.filter(|t| !t.is_empty());
        let category = if tag.is_some() {
            None
        } else {
            category.filter(|c| !c.is_empty())
        };
        Self {
            completed,
            tag,
            category,
        }
    }
}

/// Result of [`crate::repositories::QuestRepo::apply_update`].
#[derive(Debug, Clone)]
pub struct QuestUpdateOutcome {
    pub quest: Quest,
    /// Experience added to the owning adventurer by this update.
    pub reward_xp: Xp,
    /// Requested fields dropped because the quest was already completed.
    pub ignored: Vec<QuestField>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_filter_overrides_category() {
        let filter = QuestFilter::new(None, Some("gym".into()), Some("MainQuest".into()));
        assert_eq!(filter.tag.as_deref(), Some("gym"));
        assert_eq!(filter.category, None);
    }

    #[test]
    fn empty_strings_are_ignored() {
        let filter = QuestFilter::new(Some(true), Some(String::new()), Some(String::new()));
        assert_eq!(filter.completed, Some(true));
        assert_eq!(filter.tag, None);
        assert_eq!(filter.category, None);

        let filter = QuestFilter::new(None, Some(String::new()), Some("tutorial".into()));
        assert_eq!(filter.category.as_deref(), Some("tutorial"));
    }

    #[test]
    fn update_dto_rejects_long_title() {
        let input = UpdateQuest {
            title: Some("x".repeat(51)),
            ..Default::default()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn update_dto_deserializes_partial_payload() {
        let input: UpdateQuest =
            serde_json::from_value(serde_json::json!({ "completed": true })).unwrap();
        let changes = QuestChanges::from(input);
        assert_eq!(changes.completed, Some(true));
        assert_eq!(changes.title, None);
        assert_eq!(changes.details, None);
    }

    #[test]
    fn explicit_null_details_means_clear() {
        let input: UpdateQuest =
            serde_json::from_value(serde_json::json!({ "details": null })).unwrap();
        assert_eq!(QuestChanges::from(input).details, Some(None));

        let input: UpdateQuest =
            serde_json::from_value(serde_json::json!({ "details": { "notes": "x" } })).unwrap();
        assert_eq!(
            QuestChanges::from(input).details,
            Some(Some(serde_json::json!({ "notes": "x" })))
        );
    }

    #[test]
    fn create_dto_rejects_unknown_difficulty() {
        let result: Result<CreateQuest, _> = serde_json::from_value(serde_json::json!({
            "title": "Read a book",
            "difficulty_rating": "Extreme",
            "category": "SideQuest",
            "deadline": "2026-04-01T00:00:00Z",
        }));
        assert!(result.is_err());
    }
}
