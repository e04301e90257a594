//! Handlers for the `/character-classes` resource.

use axum::extract::State;
use axum::response::IntoResponse;
use questlog_db::repositories::CharacterClassRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/character-classes
///
/// List every class with its progression ladder.
pub async fn list_classes(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let classes = CharacterClassRepo::list_with_ladders(&state.pool).await?;
    Ok(DataResponse::ok(classes))
}
