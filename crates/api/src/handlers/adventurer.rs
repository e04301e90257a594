//! Handlers for the `/adventurers` resource.
//!
//! Each user owns at most one adventurer, addressed as `/adventurers/me`.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use questlog_core::error::CoreError;
use questlog_core::types::DbId;
use questlog_core::validation::validate_input;
use questlog_db::models::adventurer::{
    Adventurer, AdventurerDetails, CreateAdventurer, UpdateAdventurer,
};
use questlog_db::repositories::{AdventurerRepo, CharacterClassRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/adventurers
///
/// Create the caller's adventurer in the named class, starting at 0 XP.
pub async fn create_adventurer(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateAdventurer>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;

    let class = CharacterClassRepo::find_by_name(&state.pool, &input.character_class)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundByName {
                entity: "CharacterClass",
                name: input.character_class.clone(),
            })
        })?;

    let adventurer =
        AdventurerRepo::create(&state.pool, auth.user_id, &input.character_name, class.id)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                    AppError::Core(CoreError::Conflict(
                        "User already has an adventurer".into(),
                    ))
                }
                _ => AppError::Database(e),
            })?;

    tracing::info!(
        user_id = auth.user_id,
        character_class = %class.name,
        "Adventurer created"
    );

    let details = load_details(&state, &adventurer).await?;
    Ok(DataResponse::created(details))
}

/// GET /api/v1/adventurers/me
///
/// The caller's adventurer with its resolved tier.
pub async fn get_my_adventurer(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let adventurer = AdventurerRepo::find_by_user(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| adventurer_not_found(auth.user_id))?;

    let details = load_details(&state, &adventurer).await?;
    Ok(DataResponse::ok(details))
}

/// PATCH /api/v1/adventurers/me
///
/// Rename the caller's adventurer. Class and XP are not editable.
pub async fn update_my_adventurer(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateAdventurer>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;

    let adventurer = AdventurerRepo::rename(&state.pool, auth.user_id, &input.character_name)
        .await?
        .ok_or_else(|| adventurer_not_found(auth.user_id))?;

    let details = load_details(&state, &adventurer).await?;
    Ok(DataResponse::ok(details))
}

/// Attach the class name and resolve the tier against the class ladder.
async fn load_details(state: &AppState, adventurer: &Adventurer) -> AppResult<AdventurerDetails> {
    let class = CharacterClassRepo::find_by_id(&state.pool, adventurer.character_class_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CharacterClass",
            id: adventurer.character_class_id,
        }))?;
    let ladder = CharacterClassRepo::list_progressions(&state.pool, class.id).await?;

    Ok(AdventurerDetails::new(adventurer, &class.name, &ladder))
}

pub(crate) fn adventurer_not_found(user_id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Adventurer",
        id: user_id,
    })
}
