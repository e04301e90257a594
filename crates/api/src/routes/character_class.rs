use axum::routing::get;
use axum::Router;

use crate::handlers::character_class;
use crate::state::AppState;

/// Routes mounted at `/character-classes`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(character_class::list_classes))
}
