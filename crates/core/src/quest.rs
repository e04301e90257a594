//! Quest lifecycle rules: difficulty and category enums, the completion
//! reward table, and the open/completed state machine that decides which
//! requested changes an update may apply.
//!
//! The planning function is pure. The db crate runs it against a locked
//! quest row and persists the resulting [`QuestUpdatePlan`] in a single
//! transaction, including the experience increment.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{Timestamp, Xp};

/// Maximum length of a quest title (characters).
pub const MAX_TITLE_LENGTH: usize = 50;

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

/// How hard a quest is. Drives the completion reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DifficultyRating {
    Low,
    Medium,
    High,
}

impl DifficultyRating {
    pub const ALL: [DifficultyRating; 3] = [Self::Low, Self::Medium, Self::High];

    /// The label stored in the `quests.difficulty_rating` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Experience granted when a quest of this difficulty is completed.
    pub fn reward_xp(self) -> Xp {
        match self {
            Self::Low => 200,
            Self::Medium => 500,
            Self::High => 1000,
        }
    }
}

impl fmt::Display for DifficultyRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DifficultyRating {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid difficulty_rating '{s}'. Must be one of: Low, Medium, High"
                ))
            })
    }
}

/// Completion reward for a stored difficulty label.
///
/// Labels written by a newer build (ratings this build does not know) grant
/// nothing instead of failing the update.
pub fn completion_reward_for_label(label: &str) -> Xp {
    match label.parse::<DifficultyRating>() {
        Ok(rating) => rating.reward_xp(),
        Err(_) => 0,
    }
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Kind of quest, used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestCategory {
    MainQuest,
    SideQuest,
    Tutorial,
}

impl QuestCategory {
    pub const ALL: [QuestCategory; 3] = [Self::MainQuest, Self::SideQuest, Self::Tutorial];

    /// The label stored in the `quests.category` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MainQuest => "MainQuest",
            Self::SideQuest => "SideQuest",
            Self::Tutorial => "Tutorial",
        }
    }
}

impl fmt::Display for QuestCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid category '{s}'. Must be one of: MainQuest, SideQuest, Tutorial"
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// Lifecycle state of a quest. `Open` is initial, `Completed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestState {
    Open,
    Completed,
}

impl QuestState {
    pub fn from_completed(completed: bool) -> Self {
        if completed {
            Self::Completed
        } else {
            Self::Open
        }
    }
}

/// Quest fields an update request can touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestField {
    Title,
    Details,
    DifficultyRating,
    Tags,
    Deadline,
    Category,
    Completed,
}

impl QuestField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Details => "details",
            Self::DifficultyRating => "difficulty_rating",
            Self::Tags => "tags",
            Self::Deadline => "deadline",
            Self::Category => "category",
            Self::Completed => "completed",
        }
    }
}

/// Guard table: may `field` be changed while the quest is in `state`?
///
/// | Field             | Open | Completed |
/// |-------------------|------|-----------|
/// | title             | yes  | yes       |
/// | details           | yes  | yes       |
/// | difficulty_rating | yes  | yes       |
/// | tags              | yes  | yes       |
/// | deadline          | yes  | no        |
/// | category          | yes  | no        |
/// | completed         | yes  | no        |
pub fn is_field_mutable(state: QuestState, field: QuestField) -> bool {
    match (state, field) {
        (QuestState::Open, _) => true,
        (
            QuestState::Completed,
            QuestField::Title | QuestField::Details | QuestField::DifficultyRating | QuestField::Tags,
        ) => true,
        (QuestState::Completed, QuestField::Deadline | QuestField::Category | QuestField::Completed) => {
            false
        }
    }
}

// ---------------------------------------------------------------------------
// Update planning
// ---------------------------------------------------------------------------

/// Requested changes to a quest. `None` leaves the field untouched.
///
/// `details` is nullable, so `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestChanges {
    pub title: Option<String>,
    pub details: Option<Option<serde_json::Value>>,
    pub difficulty_rating: Option<DifficultyRating>,
    pub tags: Option<Vec<String>>,
    pub deadline: Option<Timestamp>,
    pub category: Option<QuestCategory>,
    pub completed: Option<bool>,
}

/// The writes an update will perform, decided by [`plan_quest_update`].
///
/// `None` fields are left as they are in storage. `completed_at` is only
/// ever `Some` on the open -> completed edge.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestUpdatePlan {
    pub title: Option<String>,
    pub details: Option<Option<serde_json::Value>>,
    pub difficulty_rating: Option<DifficultyRating>,
    pub tags: Option<Vec<String>>,
    pub deadline: Option<Timestamp>,
    pub category: Option<QuestCategory>,
    pub completed: Option<bool>,
    pub completed_at: Option<Timestamp>,
    pub updated_at: Timestamp,
    /// Experience to add to the owning adventurer. Zero unless completing.
    pub reward_xp: Xp,
    /// Requested fields dropped because the quest is frozen.
    pub ignored: Vec<QuestField>,
    pub from: QuestState,
    pub to: QuestState,
}

impl QuestUpdatePlan {
    /// `Some((from, to))` when the update moves the quest between states.
    pub fn transition(&self) -> Option<(QuestState, QuestState)> {
        (self.from != self.to).then_some((self.from, self.to))
    }

    pub fn completes_quest(&self) -> bool {
        self.transition() == Some((QuestState::Open, QuestState::Completed))
    }
}

/// Decide what an update request may change on a quest.
///
/// * Title, details, difficulty and tags are applied in every state.
/// * On a completed quest, deadline, category and the completed flag are
///   dropped and listed in [`QuestUpdatePlan::ignored`].
/// * On an open quest they are applied; setting `completed = true` stamps
///   `completed_at` and grants the reward of the effective difficulty
///   (requested rating if given, otherwise `current_difficulty`).
/// * `updated_at` is always `now`.
///
/// `current_difficulty` is the stored label so that ratings unknown to this
/// build still plan (and grant nothing).
pub fn plan_quest_update(
    state: QuestState,
    current_difficulty: &str,
    changes: QuestChanges,
    now: Timestamp,
) -> QuestUpdatePlan {
    let mut ignored = Vec::new();

    let mut plan = QuestUpdatePlan {
        title: guard(state, QuestField::Title, changes.title, &mut ignored),
        details: guard(state, QuestField::Details, changes.details, &mut ignored),
        difficulty_rating: guard(
            state,
            QuestField::DifficultyRating,
            changes.difficulty_rating,
            &mut ignored,
        ),
        tags: guard(state, QuestField::Tags, changes.tags, &mut ignored),
        deadline: guard(state, QuestField::Deadline, changes.deadline, &mut ignored),
        category: guard(state, QuestField::Category, changes.category, &mut ignored),
        completed: guard(state, QuestField::Completed, changes.completed, &mut ignored),
        completed_at: None,
        updated_at: now,
        reward_xp: 0,
        ignored: Vec::new(),
        from: state,
        to: state,
    };
    plan.ignored = ignored;

    if state == QuestState::Open && plan.completed == Some(true) {
        plan.completed_at = Some(now);
        plan.reward_xp = match plan.difficulty_rating {
            Some(rating) => rating.reward_xp(),
            None => completion_reward_for_label(current_difficulty),
        };
        plan.to = QuestState::Completed;
    }

    plan
}

/// Pass a requested value through the guard table, recording it as ignored
/// when the field is frozen in `state`.
fn guard<T>(
    state: QuestState,
    field: QuestField,
    requested: Option<T>,
    ignored: &mut Vec<QuestField>,
) -> Option<T> {
    match requested {
        Some(value) if is_field_mutable(state, field) => Some(value),
        Some(_) => {
            ignored.push(field);
            None
        }
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn completing() -> QuestChanges {
        QuestChanges {
            completed: Some(true),
            ..Default::default()
        }
    }

    // -- rewards --------------------------------------------------------------

    #[test]
    fn reward_table() {
        assert_eq!(DifficultyRating::Low.reward_xp(), 200);
        assert_eq!(DifficultyRating::Medium.reward_xp(), 500);
        assert_eq!(DifficultyRating::High.reward_xp(), 1000);
    }

    #[test]
    fn unknown_label_grants_nothing() {
        assert_eq!(completion_reward_for_label("High"), 1000);
        assert_eq!(completion_reward_for_label("Legendary"), 0);
        assert_eq!(completion_reward_for_label(""), 0);
        assert_eq!(completion_reward_for_label("high"), 0);
    }

    #[test]
    fn labels_match_serde_names() {
        for rating in DifficultyRating::ALL {
            let json = serde_json::to_value(rating).unwrap();
            assert_eq!(json, rating.as_str());
            assert_eq!(rating.as_str().parse::<DifficultyRating>().unwrap(), rating);
        }
        for category in QuestCategory::ALL {
            let json = serde_json::to_value(category).unwrap();
            assert_eq!(json, category.as_str());
        }
    }

    #[test]
    fn invalid_category_is_a_validation_error() {
        assert_matches!(
            "Raid".parse::<QuestCategory>(),
            Err(CoreError::Validation(_))
        );
    }

    // -- guard table ----------------------------------------------------------

    #[test]
    fn open_quest_allows_every_field() {
        for field in [
            QuestField::Title,
            QuestField::Details,
            QuestField::DifficultyRating,
            QuestField::Tags,
            QuestField::Deadline,
            QuestField::Category,
            QuestField::Completed,
        ] {
            assert!(is_field_mutable(QuestState::Open, field), "{field:?}");
        }
    }

    #[test]
    fn completed_quest_freezes_lifecycle_fields() {
        assert!(is_field_mutable(QuestState::Completed, QuestField::Title));
        assert!(is_field_mutable(QuestState::Completed, QuestField::Details));
        assert!(is_field_mutable(
            QuestState::Completed,
            QuestField::DifficultyRating
        ));
        assert!(is_field_mutable(QuestState::Completed, QuestField::Tags));
        assert!(!is_field_mutable(QuestState::Completed, QuestField::Deadline));
        assert!(!is_field_mutable(QuestState::Completed, QuestField::Category));
        assert!(!is_field_mutable(QuestState::Completed, QuestField::Completed));
    }

    // -- planning -------------------------------------------------------------

    #[test]
    fn completing_open_quest_stamps_and_rewards() {
        let plan = plan_quest_update(QuestState::Open, "High", completing(), now());

        assert_eq!(plan.completed, Some(true));
        assert_eq!(plan.completed_at, Some(now()));
        assert_eq!(plan.reward_xp, 1000);
        assert_eq!(plan.updated_at, now());
        assert!(plan.completes_quest());
        assert_eq!(
            plan.transition(),
            Some((QuestState::Open, QuestState::Completed))
        );
    }

    #[test]
    fn reward_uses_requested_difficulty() {
        let changes = QuestChanges {
            difficulty_rating: Some(DifficultyRating::Low),
            completed: Some(true),
            ..Default::default()
        };
        let plan = plan_quest_update(QuestState::Open, "High", changes, now());
        assert_eq!(plan.reward_xp, 200);
        assert_eq!(plan.difficulty_rating, Some(DifficultyRating::Low));
    }

    #[test]
    fn completing_with_unknown_stored_difficulty_grants_zero() {
        let plan = plan_quest_update(QuestState::Open, "Mythic", completing(), now());
        assert!(plan.completes_quest());
        assert_eq!(plan.reward_xp, 0);
    }

    #[test]
    fn completing_twice_grants_nothing() {
        let plan = plan_quest_update(QuestState::Completed, "High", completing(), now());

        assert_eq!(plan.reward_xp, 0);
        assert_eq!(plan.completed, None);
        assert_eq!(plan.completed_at, None, "completed_at must not move");
        assert_eq!(plan.transition(), None);
        assert_eq!(plan.ignored, vec![QuestField::Completed]);
    }

    #[test]
    fn uncompleting_a_completed_quest_is_ignored() {
        let changes = QuestChanges {
            completed: Some(false),
            ..Default::default()
        };
        let plan = plan_quest_update(QuestState::Completed, "Low", changes, now());
        assert_eq!(plan.completed, None);
        assert_eq!(plan.to, QuestState::Completed);
    }

    #[test]
    fn completed_quest_drops_deadline_and_category_but_keeps_editable_fields() {
        let changes = QuestChanges {
            title: Some("Slay the dragon (done)".into()),
            details: Some(Some(serde_json::json!({ "notes": "it was a lizard" }))),
            difficulty_rating: Some(DifficultyRating::Medium),
            tags: Some(vec!["boss".into(), "boss".into()]),
            deadline: Some(now() + Duration::days(3)),
            category: Some(QuestCategory::Tutorial),
            completed: None,
        };
        let plan = plan_quest_update(QuestState::Completed, "High", changes, now());

        assert_eq!(plan.title.as_deref(), Some("Slay the dragon (done)"));
        assert_matches!(plan.details, Some(Some(_)));
        assert_eq!(plan.difficulty_rating, Some(DifficultyRating::Medium));
        assert_eq!(plan.tags.as_ref().map(Vec::len), Some(2));
        assert_eq!(plan.deadline, None);
        assert_eq!(plan.category, None);
        assert_eq!(plan.reward_xp, 0);
        assert_eq!(
            plan.ignored,
            vec![QuestField::Deadline, QuestField::Category]
        );
    }

    #[test]
    fn open_quest_applies_deadline_and_category_without_reward() {
        let deadline = now() + Duration::days(7);
        let changes = QuestChanges {
            deadline: Some(deadline),
            category: Some(QuestCategory::SideQuest),
            completed: Some(false),
            ..Default::default()
        };
        let plan = plan_quest_update(QuestState::Open, "Medium", changes, now());

        assert_eq!(plan.deadline, Some(deadline));
        assert_eq!(plan.category, Some(QuestCategory::SideQuest));
        assert_eq!(plan.completed, Some(false));
        assert_eq!(plan.completed_at, None);
        assert_eq!(plan.reward_xp, 0);
        assert!(plan.ignored.is_empty());
        assert_eq!(plan.transition(), None);
    }

    #[test]
    fn empty_update_still_refreshes_updated_at() {
        for state in [QuestState::Open, QuestState::Completed] {
            let plan = plan_quest_update(state, "Low", QuestChanges::default(), now());
            assert_eq!(plan.updated_at, now());
            assert_eq!(plan.reward_xp, 0);
            assert!(plan.ignored.is_empty());
        }
    }

    #[test]
    fn state_from_completed_flag() {
        assert_eq!(QuestState::from_completed(false), QuestState::Open);
        assert_eq!(QuestState::from_completed(true), QuestState::Completed);
    }

    #[test]
    fn clearing_details_is_planned_in_every_state() {
        for state in [QuestState::Open, QuestState::Completed] {
            let changes = QuestChanges {
                details: Some(None),
                ..Default::default()
            };
            let plan = plan_quest_update(state, "Low", changes, now());
            assert_eq!(plan.details, Some(None));
            assert!(plan.ignored.is_empty());
        }
    }
}
