use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::models::AppState;

#[derive(Deserialize)]
pub struct NewPantryItem {
    pub name: String,
}

/// GET /pantry
pub async fn list(State(state): State<AppState>) -> Json<Vec<String>> {
    let store = state.store.read().await;
    Json(store.pantry().to_vec())
}

/// POST /pantry  { "name": "soy sauce" }
///
/// Duplicates (case/whitespace-insensitive) are silently ignored; the
/// response is always the full pantry.
///
/// # Errors
/// Returns 422 if the name is blank.
pub async fn add(
    State(state): State<AppState>,
    Json(req): Json<NewPantryItem>,
) -> AppResult<Json<Vec<String>>> {
    if req.name.trim().is_empty() {
        return Err((StatusCode::UNPROCESSABLE_ENTITY, "item name is empty".to_string()).into());
    }
    let mut store = state.store.write().await;
    if store.add_pantry_item(&req.name) {
        tracing::info!(item = %req.name.trim(), "pantry item added");
    }
    Ok(Json(store.pantry().to_vec()))
}

/// DELETE /pantry/{name}
///
/// # Errors
/// Returns 404 if no stored item has that exact spelling.
pub async fn remove(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let mut store = state.store.write().await;
    let deleted = store.remove_pantry_item(&name);
    if deleted == 0 {
        return Err(StatusCode::NOT_FOUND.into());
    }
    Ok(Json(serde_json::json!({ "deleted": deleted })))
}

/// DELETE /pantry
pub async fn clear(State(state): State<AppState>) -> Json<serde_json::Value> {
    let mut store = state.store.write().await;
    let deleted = store.clear_pantry();
    Json(serde_json::json!({ "deleted": deleted }))
}
