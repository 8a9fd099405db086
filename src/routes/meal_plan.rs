use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::error::AppResult;
use crate::models::{AppState, AssignRecipe, DayPlan};
use crate::store::{DAYS_OF_WEEK, Store};

/// GET /meal-plan
///
/// The whole week in Monday..Sunday order, recipes resolved to their current
/// state.
pub async fn get_week(State(state): State<AppState>) -> Json<Vec<DayPlan>> {
    let store = state.store.read().await;
    let week = DAYS_OF_WEEK
        .iter()
        .copied()
        .enumerate()
        .map(|(idx, day)| DayPlan {
            day,
            recipes: store
                .planned_for_day(idx)
                .iter()
                .filter_map(|&id| store.recipe(id).cloned())
                .collect(),
        })
        .collect();
    Json(week)
}

/// POST /meal-plan  { "day": "Monday", "recipe_id": 3 }
///
/// A recipe may be planned several times, across days or within one day.
///
/// # Errors
/// 422 for an unknown day label, 404 for an unknown recipe.
pub async fn assign(
    State(state): State<AppState>,
    Json(req): Json<AssignRecipe>,
) -> AppResult<Json<DayPlan>> {
    let Some(day_idx) = Store::day_index(&req.day) else {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("unknown day: {}", req.day),
        )
            .into());
    };

    let mut store = state.store.write().await;
    if store.recipe(req.recipe_id).is_none() {
        return Err(StatusCode::NOT_FOUND.into());
    }
    store.assign(day_idx, req.recipe_id);
    tracing::info!(day = %req.day, recipe_id = req.recipe_id, "recipe planned");

    Ok(Json(DayPlan {
        day: DAYS_OF_WEEK[day_idx],
        recipes: store
            .planned_for_day(day_idx)
            .iter()
            .filter_map(|&id| store.recipe(id).cloned())
            .collect(),
    }))
}

/// DELETE /meal-plan/{day}/{recipe_id}
///
/// Removes every occurrence of the recipe on that day.
///
/// # Errors
/// 422 for an unknown day label.
pub async fn unassign(
    State(state): State<AppState>,
    Path((day, recipe_id)): Path<(String, i64)>,
) -> AppResult<Json<serde_json::Value>> {
    let Some(day_idx) = Store::day_index(&day) else {
        return Err((StatusCode::UNPROCESSABLE_ENTITY, format!("unknown day: {day}")).into());
    };

    let mut store = state.store.write().await;
    let deleted = store.unassign(day_idx, recipe_id);
    Ok(Json(serde_json::json!({ "deleted": deleted })))
}
