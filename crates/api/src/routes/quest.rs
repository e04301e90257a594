//! Route definitions for the `/quests` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::quest;
use crate::state::AppState;

/// Routes mounted at `/quests`.
///
/// ```text
/// GET    /       -> list_quests
/// POST   /       -> create_quest
/// GET    /{id}   -> get_quest
/// PATCH  /{id}   -> update_quest
/// DELETE /{id}   -> delete_quest
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(quest::list_quests).post(quest::create_quest))
        .route(
            "/{id}",
            get(quest::get_quest)
                .patch(quest::update_quest)
                .delete(quest::delete_quest),
        )
}
