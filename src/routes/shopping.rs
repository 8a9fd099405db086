use axum::{Json, extract::State};

use crate::models::AppState;
use crate::scoring::shopping_list;

/// GET /shopping-list
///
/// Distinct ingredients the planned week needs that the pantry cannot cover,
/// sorted ascending. Duplicate plan slots do not duplicate entries.
pub async fn list(State(state): State<AppState>) -> Json<Vec<String>> {
    let store = state.store.read().await;
    Json(shopping_list(store.planned_recipes(), store.pantry()))
}
