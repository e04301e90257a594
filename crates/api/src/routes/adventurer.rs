//! Route definitions for the `/adventurers` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::adventurer;
use crate::state::AppState;

/// Routes mounted at `/adventurers`.
///
/// ```text
/// POST  /     -> create_adventurer
/// GET   /me   -> get_my_adventurer
/// PATCH /me   -> update_my_adventurer
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(adventurer::create_adventurer))
        .route(
            "/me",
            get(adventurer::get_my_adventurer).patch(adventurer::update_my_adventurer),
        )
}
