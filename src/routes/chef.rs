//! Generative features: invent a recipe, normalize pasted text into a draft,
//! and ask for tips on cooking around missing ingredients.
//!
//! Every handler reads state, talks to the model, and only then mutates; a
//! failed call leaves pantry, recipes and plan exactly as they were.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;

use crate::error::AppResult;
use crate::llm::parse_recipe_draft;
use crate::models::{AppState, GenerateRequest, ImportRequest, Recipe, RecipeDraft};
use crate::scoring::score_recipe;

fn bad_gateway(context: &str, e: &anyhow::Error) -> (StatusCode, String) {
    (StatusCode::BAD_GATEWAY, format!("{context}: {e}"))
}

/// POST /recipes/generate  { "prompt": "something cozy with beef" }
///
/// Asks the model for a recipe built around the prompt and the current
/// pantry; the result is saved at the front of the recipe book.
///
/// # Errors
/// 422 on a blank prompt; 502 when the model call fails or returns JSON that
/// is not a recipe (nothing is saved in that case).
pub async fn generate(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> AppResult<Json<Recipe>> {
    if req.prompt.trim().is_empty() {
        return Err((StatusCode::UNPROCESSABLE_ENTITY, "prompt is empty".to_string()).into());
    }

    let pantry = {
        let store = state.store.read().await;
        store.pantry().join(", ")
    };
    let user = format!("Request: \"{}\". Pantry: {}.", req.prompt.trim(), pantry);

    let reply = state
        .generator
        .generate(&user, &state.config.system_prompt_generate)
        .await
        .map_err(|e| bad_gateway("recipe generation failed", &e))?;
    let draft = parse_recipe_draft(&reply)
        .map_err(|e| bad_gateway("recipe generation returned invalid data", &e))?;

    let mut store = state.store.write().await;
    let recipe = Recipe {
        id: store.next_recipe_id(),
        name: draft.name,
        ingredients: draft.ingredients,
        instructions: draft.instructions,
        r#type: draft.r#type,
        notes: String::new(),
    };
    store.insert_recipe_front(recipe.clone());
    tracing::info!(id = recipe.id, name = %recipe.name, "recipe generated");
    Ok(Json(recipe))
}

/// POST /recipes/import  { "text": "...pasted recipe text..." }
///
/// Normalizes messy text into a clean draft with pantry-matchable ingredient
/// names. The draft is returned for review, not saved.
///
/// # Errors
/// 422 on blank text; 502 when the model call fails or the reply cannot be
/// parsed as a recipe.
pub async fn import(
    State(state): State<AppState>,
    Json(req): Json<ImportRequest>,
) -> AppResult<Json<RecipeDraft>> {
    if req.text.trim().is_empty() {
        return Err((StatusCode::UNPROCESSABLE_ENTITY, "import text is empty".to_string()).into());
    }

    let reply = state
        .generator
        .generate(&req.text, &state.config.system_prompt_import)
        .await
        .map_err(|e| bad_gateway("recipe import failed", &e))?;
    let draft = parse_recipe_draft(&reply)
        .map_err(|e| bad_gateway("recipe import returned invalid data", &e))?;

    Ok(Json(draft))
}

#[derive(Serialize)]
pub struct ChefTips {
    pub recipe_id: i64,
    pub tips: String,
}

/// POST /recipes/{id}/tips
///
/// Tips for cooking the recipe given what the pantry is missing.
///
/// # Errors
/// 404 for an unknown recipe; 502 when the model call fails.
pub async fn tips(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ChefTips>> {
    let prompt = {
        let store = state.store.read().await;
        let Some(recipe) = store.recipe(id) else {
            return Err(StatusCode::NOT_FOUND.into());
        };
        let scored = score_recipe(recipe, store.pantry());
        format!(
            "Dish: \"{}\". Missing: {}. Pantry: {}. Give subs or tips. Short.",
            recipe.name,
            scored.missing_ingredients.join(", "),
            store.pantry().join(", "),
        )
    };

    let tips = state
        .generator
        .generate(&prompt, &state.config.system_prompt_tips)
        .await
        .map_err(|e| bad_gateway("chef tips failed", &e))?;

    Ok(Json(ChefTips { recipe_id: id, tips }))
}
