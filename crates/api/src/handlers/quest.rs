//! Handlers for the `/quests` resource.
//!
//! Quests belong to the caller's adventurer; every lookup is scoped to it,
//! so another user's quest id behaves as if it did not exist.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use questlog_core::error::CoreError;
use questlog_core::types::{DbId, Xp};
use questlog_core::validation::{validate_input, validate_tags};
use questlog_db::models::quest::{CreateQuest, QuestFilter, UpdateQuest, MAX_TAG_LENGTH};
use questlog_db::repositories::{AdventurerRepo, QuestRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::adventurer::adventurer_not_found;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Postgres `numeric_value_out_of_range`.
const NUMERIC_OUT_OF_RANGE: &str = "22003";

/// Query parameters for `GET /quests`.
///
/// `tag` wins over `category` when both are given.
#[derive(Debug, Deserialize)]
pub struct QuestListParams {
    pub completed: Option<bool>,
    pub tag: Option<String>,
    pub category: Option<String>,
}

/// POST /api/v1/quests
pub async fn create_quest(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateQuest>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    validate_tags(&input.tags, MAX_TAG_LENGTH)?;
    ensure_adventurer(&state, auth.user_id).await?;

    let quest = QuestRepo::create(&state.pool, auth.user_id, &input, Utc::now()).await?;

    tracing::info!(
        quest_id = quest.id,
        adventurer_id = auth.user_id,
        difficulty_rating = %quest.difficulty_rating,
        "Quest created"
    );

    Ok(DataResponse::created(quest))
}

/// GET /api/v1/quests
pub async fn list_quests(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<QuestListParams>,
) -> AppResult<impl IntoResponse> {
    ensure_adventurer(&state, auth.user_id).await?;

    let filter = QuestFilter::new(params.completed, params.tag, params.category);
    let quests = QuestRepo::list(&state.pool, auth.user_id, &filter).await?;

    Ok(DataResponse::ok(quests))
}

/// GET /api/v1/quests/{id}
pub async fn get_quest(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(quest_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let quest = QuestRepo::find_by_id(&state.pool, quest_id, auth.user_id)
        .await?
        .ok_or_else(|| quest_not_found(quest_id))?;

    Ok(DataResponse::ok(quest))
}

/// PATCH /api/v1/quests/{id}
///
/// Apply edits and, on the first `completed: true`, grant the difficulty
/// reward to the caller's adventurer. Edits to frozen fields of a completed
/// quest are dropped without error.
pub async fn update_quest(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(quest_id): Path<DbId>,
    Json(input): Json<UpdateQuest>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    if let Some(tags) = &input.tags {
        validate_tags(tags, MAX_TAG_LENGTH)?;
    }

    let outcome =
        QuestRepo::apply_update(&state.pool, quest_id, auth.user_id, input.into(), Utc::now())
            .await
            .map_err(xp_overflow_to_validation)?
            .ok_or_else(|| quest_not_found(quest_id))?;

    tracing::info!(
        quest_id,
        adventurer_id = auth.user_id,
        reward_xp = outcome.reward_xp,
        "Quest updated"
    );

    Ok(DataResponse::ok(outcome.quest))
}

/// DELETE /api/v1/quests/{id}
pub async fn delete_quest(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(quest_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = QuestRepo::delete(&state.pool, quest_id, auth.user_id).await?;
    if !deleted {
        return Err(quest_not_found(quest_id));
    }

    tracing::info!(quest_id, adventurer_id = auth.user_id, "Quest deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Quests hang off the adventurer, so a caller without one gets 404.
async fn ensure_adventurer(state: &AppState, user_id: DbId) -> AppResult<()> {
    AdventurerRepo::find_by_user(&state.pool, user_id)
        .await?
        .ok_or_else(|| adventurer_not_found(user_id))?;
    Ok(())
}

/// The reward increment is the only arithmetic in an update, so an
/// out-of-range error means the adventurer's XP would pass [`Xp::MAX`]. The
/// whole update has been rolled back by then.
fn xp_overflow_to_validation(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(NUMERIC_OUT_OF_RANGE) => {
            AppError::Core(CoreError::Validation(format!(
                "Completing this quest would push experience past the maximum of {}",
                Xp::MAX
            )))
        }
        _ => AppError::Database(err),
    }
}

fn quest_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Quest",
        id,
    })
}
