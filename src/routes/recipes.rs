use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::error::AppResult;
use crate::models::{AppState, NewRecipe, Recipe, UpdateRecipe};
use crate::scoring::{ScoredRecipe, rank_recipes};

/// Trim authored ingredient names and drop blanks. Content is otherwise kept
/// raw; normalization happens at match time only.
fn clean_ingredients(raw: Vec<String>) -> Vec<String> {
    raw.into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// GET /recipes
pub async fn list(State(state): State<AppState>) -> Json<Vec<Recipe>> {
    let store = state.store.read().await;
    Json(store.recipes().to_vec())
}

/// GET /recipes/matches
///
/// Every recipe scored against the current pantry, ranked cookable-first.
pub async fn matches(State(state): State<AppState>) -> Json<Vec<ScoredRecipe>> {
    let store = state.store.read().await;
    Json(rank_recipes(store.recipes(), store.pantry()))
}

/// POST /recipes
///
/// # Errors
/// Returns 422 when the name is blank or no usable ingredient remains.
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<NewRecipe>,
) -> AppResult<Json<Recipe>> {
    let name = req.name.trim().to_string();
    let ingredients = clean_ingredients(req.ingredients);
    if name.is_empty() {
        return Err((StatusCode::UNPROCESSABLE_ENTITY, "recipe name is empty".to_string()).into());
    }
    if ingredients.is_empty() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            "recipe needs at least one ingredient".to_string(),
        )
            .into());
    }

    let mut store = state.store.write().await;
    let recipe = Recipe {
        id: store.next_recipe_id(),
        name,
        ingredients,
        instructions: req.instructions,
        r#type: req.r#type,
        notes: req.notes,
    };
    store.insert_recipe(recipe.clone());
    tracing::info!(id = recipe.id, name = %recipe.name, "recipe created");
    Ok(Json(recipe))
}

/// GET /recipes/{id}
///
/// # Errors
/// 404 when the recipe does not exist.
pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Json<Recipe>> {
    let store = state.store.read().await;
    store
        .recipe(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| StatusCode::NOT_FOUND.into())
}

/// PATCH /recipes/{id}
///
/// # Errors
/// 404 when the recipe does not exist, 422 when an update would leave the
/// recipe without a name or ingredients.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateRecipe>,
) -> AppResult<Json<Recipe>> {
    let mut store = state.store.write().await;
    let Some(recipe) = store.recipe_mut(id) else {
        return Err(StatusCode::NOT_FOUND.into());
    };

    if let Some(name) = req.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(
                (StatusCode::UNPROCESSABLE_ENTITY, "recipe name is empty".to_string()).into(),
            );
        }
        recipe.name = name;
    }
    if let Some(ingredients) = req.ingredients {
        let ingredients = clean_ingredients(ingredients);
        if ingredients.is_empty() {
            return Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                "recipe needs at least one ingredient".to_string(),
            )
                .into());
        }
        recipe.ingredients = ingredients;
    }
    if let Some(instructions) = req.instructions {
        recipe.instructions = instructions;
    }
    if let Some(kind) = req.r#type {
        recipe.r#type = kind;
    }
    if let Some(notes) = req.notes {
        recipe.notes = notes;
    }

    Ok(Json(recipe.clone()))
}

/// DELETE /recipes/{id}
///
/// Also unassigns the recipe from every meal-plan day.
///
/// # Errors
/// 404 when the recipe does not exist.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<serde_json::Value>> {
    let mut store = state.store.write().await;
    if !store.remove_recipe(id) {
        return Err(StatusCode::NOT_FOUND.into());
    }
    tracing::info!(id, "recipe deleted");
    Ok(Json(serde_json::json!({ "deleted": 1 })))
}
