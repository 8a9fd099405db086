use clap::{ArgAction, Parser};
use std::{net::SocketAddr, path::PathBuf};

/// PantryPal server configuration
#[derive(Parser, Debug, Clone)]
#[command(name = "pantrypal", version, about = "Pantry-aware recipe matching API")]
pub struct Config {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease verbosity (-q, -qq, -qqq)
    #[arg(short = 'q', action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Address to bind the HTTP server to
    #[arg(long, env = "PANTRYPAL_BIND_ADDR", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Optional log file path (logs are written to stdout + this file)
    #[arg(long, env = "PANTRYPAL_LOG_FILE", default_value = "pantrypal.logs")]
    pub log_file: PathBuf,

    /// Start with an empty pantry and recipe book instead of the samples
    #[arg(long, env = "PANTRYPAL_NO_SEED")]
    pub no_seed: bool,

    /// LLM API key (optional; generation, import and tips fail without it)
    #[arg(long, env = "PANTRYPAL_LLM_API_KEY")]
    pub llm_api_key: Option<String>,

    /// LLM model to use
    #[arg(long, env = "PANTRYPAL_LLM_MODEL", default_value = "deepseek/deepseek-chat")]
    pub llm_model: String,

    /// LLM API URL (any OpenAI-compatible endpoint)
    #[arg(long, env = "PANTRYPAL_LLM_API_URL", default_value = "https://openrouter.ai/api/v1")]
    pub llm_api_url: String,

    /// System prompt for recipe generation
    #[arg(long, env = "PANTRYPAL_SYSTEM_PROMPT_GENERATE", default_value = DEFAULT_SYSTEM_PROMPT_GENERATE)]
    pub system_prompt_generate: String,

    /// System prompt for free-text recipe import
    #[arg(long, env = "PANTRYPAL_SYSTEM_PROMPT_IMPORT", default_value = DEFAULT_SYSTEM_PROMPT_IMPORT)]
    pub system_prompt_import: String,

    /// System prompt for chef tips
    #[arg(long, env = "PANTRYPAL_SYSTEM_PROMPT_TIPS", default_value = DEFAULT_SYSTEM_PROMPT_TIPS)]
    pub system_prompt_tips: String,
}

const DEFAULT_SYSTEM_PROMPT_GENERATE: &str = r#"You are a creative chef API. Return ONLY a JSON object:
{ "name": "string", "ingredients": ["string"], "instructions": "string", "type": "Dinner" }"#;

const DEFAULT_SYSTEM_PROMPT_IMPORT: &str = r#"You are a Data Normalization Expert for a recipe app.
Your goal is to parse messy text and extract a structured recipe.
CRITICAL: You must normalize ingredient names to be simple, singular nouns that are likely to match a pantry inventory.
Example: "2 cups of freshly chopped onions" -> "onion"
Example: "1lb ground beef (80/20)" -> "ground beef"
Example: "Salt and pepper to taste" -> "salt", "pepper"

Return ONLY a JSON object with this structure:
{
  "name": "string",
  "ingredients": ["string", "string"],
  "instructions": "string (formatted with newlines for steps)",
  "type": "Dinner"
}"#;

const DEFAULT_SYSTEM_PROMPT_TIPS: &str = "You are a helpful sous-chef.";

impl Config {
    #[must_use]
    pub fn verbosity_delta(&self) -> i16 {
        i16::from(self.verbose) - i16::from(self.quiet)
    }

    #[must_use]
    pub fn log_filter(&self) -> &'static str {
        match self.verbosity_delta() {
            d if d <= -2 => "error",
            -1 => "warn",
            0 => "info,pantrypal=info,axum=info,tower_http=info",
            1 => "debug,pantrypal=debug,axum=info,tower_http=info",
            2 => "trace,pantrypal=trace,axum=debug,tower_http=trace,hyper=info",
            _ => "trace,pantrypal=trace,axum=trace,tower_http=trace,hyper=debug",
        }
    }
}
