pub mod adventurer;
pub mod auth;
pub mod character_class;
pub mod health;
pub mod quest;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/register                 register (public)
/// /auth/login                    login (public)
///
/// /character-classes             list with ladders (public)
///
/// /adventurers                   create (auth)
/// /adventurers/me                get, rename (auth)
///
/// /quests                        list, create (auth)
/// /quests/{id}                   get, update, delete (auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/character-classes", character_class::router())
        .nest("/adventurers", adventurer::router())
        .nest("/quests", quest::router())
}
