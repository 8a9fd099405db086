use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::llm::TextGenerator;
use crate::store::Store;

/* ---------- App state ---------- */

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<Store>>,
    pub generator: Arc<dyn TextGenerator>,
    pub config: Config,
}

/* ---------- API models ---------- */

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    /// Raw ingredient names as authored; normalized only at match time.
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub r#type: String,
    pub notes: String,
}

#[derive(Deserialize, Debug)]
pub struct NewRecipe {
    pub name: String,
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: String,
    #[serde(default = "default_recipe_type")]
    pub r#type: String,
    #[serde(default)]
    pub notes: String,
}

pub fn default_recipe_type() -> String {
    "Dinner".to_string()
}

#[derive(Deserialize, Debug, Default)]
pub struct UpdateRecipe {
    pub name: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<String>,
    pub r#type: Option<String>,
    pub notes: Option<String>,
}

/* ---------- Meal plan ---------- */

#[derive(Deserialize)]
pub struct AssignRecipe {
    pub day: String, // "Monday".."Sunday"
    pub recipe_id: i64,
}

#[derive(Serialize)]
pub struct DayPlan {
    pub day: &'static str,
    pub recipes: Vec<Recipe>,
}

/* ---------- Generative features ---------- */

#[derive(Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
}

#[derive(Deserialize)]
pub struct ImportRequest {
    pub text: String,
}

/// What the model is asked to return for both generation and import.
#[derive(Serialize, Deserialize, Debug)]
pub struct RecipeDraft {
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: String,
    #[serde(default = "default_recipe_type")]
    pub r#type: String,
}
