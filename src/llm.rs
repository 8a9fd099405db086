//! Generative-text collaborator behind a single capability: turn a prompt
//! plus a system instruction into text. The HTTP client talks to any
//! OpenAI-compatible chat endpoint; [`FakeGenerator`] scripts responses so
//! tests never touch the network.

use async_trait::async_trait;
use regex::Regex;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::{LazyLock, Mutex};
use std::time::Duration;

use crate::models::RecipeDraft;

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send a prompt and get the model's raw text reply.
    async fn generate(&self, prompt: &str, instruction: &str) -> anyhow::Result<String>;
}

/* ---------- HTTP client ---------- */

#[derive(Debug, Clone)]
pub struct LlmClient {
    pub http: reqwest::Client,
    pub base: String,
    pub token: String,
    pub model: String,
}

const LLM_TIMEOUT: Duration = Duration::from_secs(45);

impl LlmClient {
    #[must_use]
    pub fn new(base: String, token: String, model: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base,
            token,
            model,
        }
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, prompt: &str, instruction: &str) -> anyhow::Result<String> {
        #[derive(Serialize)]
        struct Msg<'a> {
            role: &'a str,
            content: &'a str,
        }
        #[derive(Serialize)]
        struct Body<'a> {
            model: &'a str,
            messages: Vec<Msg<'a>>,
            temperature: f32,
        }

        if self.token.trim().is_empty() {
            anyhow::bail!("LLM API key is not configured");
        }

        let url = format!("{}/chat/completions", self.base.trim_end_matches('/'));
        let body = Body {
            model: &self.model,
            messages: vec![
                Msg {
                    role: "system",
                    content: instruction,
                },
                Msg {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: 0.7,
        };

        let resp = self
            .http
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .timeout(LLM_TIMEOUT)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            anyhow::bail!("LLM HTTP {status}: {text}");
        }

        let envelope: JsonValue = serde_json::from_str(&text)?;
        let content = envelope
            .pointer("/choices/0/message/content")
            .and_then(|v| v.as_str())
            .or_else(|| {
                envelope
                    .get("choices")
                    .and_then(|c| c.get(0))
                    .and_then(|c0| c0.get("text"))
                    .and_then(|v| v.as_str())
            })
            .ok_or_else(|| anyhow::anyhow!("LLM response missing content"))?;

        Ok(content.to_string())
    }
}

/* ---------- Scripted generator for tests ---------- */

/// Deterministic stand-in for the model. Replies are matched by checking
/// whether the prompt contains a registered substring; unmatched prompts get
/// the default reply or an error, which makes failure paths testable too.
#[derive(Debug, Default)]
pub struct FakeGenerator {
    responses: Mutex<HashMap<String, String>>,
    default_response: Option<String>,
}

impl FakeGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_default(reply: &str) -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            default_response: Some(reply.to_string()),
        }
    }

    #[must_use]
    pub fn with_response(prompt_contains: &str, reply: &str) -> Self {
        let fake = Self::new();
        fake.add_response(prompt_contains, reply);
        fake
    }

    pub fn add_response(&self, prompt_contains: &str, reply: &str) {
        self.responses
            .lock()
            .expect("fake generator lock")
            .insert(prompt_contains.to_string(), reply.to_string());
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str, _instruction: &str) -> anyhow::Result<String> {
        let responses = self.responses.lock().expect("fake generator lock");
        for (needle, reply) in responses.iter() {
            if prompt.contains(needle) {
                return Ok(reply.clone());
            }
        }
        drop(responses);
        self.default_response
            .clone()
            .ok_or_else(|| anyhow::anyhow!("no scripted response for prompt: {prompt}"))
    }
}

/* ---------- Recovering structured recipes from model text ---------- */

/// Extract a JSON object from a ```json ... ``` fenced block. Accepts
/// ```json``` or plain ``` ``` fences, case-insensitive.
#[must_use]
pub fn extract_fenced_json(s: &str) -> Option<String> {
    static FENCE_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?is)```(?:json)?\s*(\{.*?\})\s*```").unwrap());

    FENCE_RE
        .captures(s)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Fallback: the largest balanced `{ ... }` object in the text, skipping
/// braces inside string literals.
#[must_use]
pub fn extract_largest_json_object(s: &str) -> Option<String> {
    let mut best: Option<(usize, usize)> = None;
    let mut depth: usize = 0;
    let mut start: Option<usize> = None;
    let mut in_str = false;
    let mut esc = false;

    for (i, ch) in s.char_indices() {
        if in_str {
            match ch {
                '\\' if !esc => esc = true,
                '"' if !esc => {
                    in_str = false;
                    esc = false;
                }
                _ => esc = false,
            }
            continue;
        }

        match ch {
            '"' => {
                in_str = true;
                esc = false;
            }
            '{' => {
                if depth == 0 {
                    start = Some(i);
                }
                depth += 1;
            }
            '}' => {
                if depth > 0 {
                    depth -= 1;
                    if depth == 0
                        && let Some(st) = start
                    {
                        let better = match best {
                            None => true,
                            Some((a, b)) => i - st > b - a,
                        };
                        if better {
                            best = Some((st, i));
                        }
                        start = None;
                    }
                }
            }
            _ => {}
        }
    }

    best.map(|(a, b)| s[a..=b].to_string())
}

/// Parse the model's reply into a recipe draft: direct JSON first, then a
/// fenced block, then the largest balanced object.
pub fn parse_recipe_draft(reply: &str) -> anyhow::Result<RecipeDraft> {
    if let Ok(draft) = serde_json::from_str::<RecipeDraft>(reply) {
        return Ok(draft);
    }
    if let Some(js) = extract_fenced_json(reply) {
        return Ok(serde_json::from_str(&js)?);
    }
    if let Some(js) = extract_largest_json_object(reply) {
        return Ok(serde_json::from_str(&js)?);
    }
    anyhow::bail!(
        "model did not return valid recipe JSON. Preview: {}",
        reply.chars().take(500).collect::<String>()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fenced_json_is_extracted() {
        let s = "Sure!\n```json\n{\"name\": \"Soup\"}\n```\nEnjoy.";
        assert_eq!(extract_fenced_json(s).as_deref(), Some("{\"name\": \"Soup\"}"));
    }

    #[test]
    fn largest_object_ignores_braces_in_strings() {
        let s = r#"noise {"a": "{not this}", "b": 1} trailing {"c":2}"#;
        let out = extract_largest_json_object(s).unwrap();
        assert_eq!(out, r#"{"a": "{not this}", "b": 1}"#);
    }

    #[test]
    fn draft_parses_with_defaults() {
        let draft =
            parse_recipe_draft(r#"{"name":"Soup","ingredients":["water","salt"]}"#).unwrap();
        assert_eq!(draft.name, "Soup");
        assert_eq!(draft.r#type, "Dinner");
        assert!(draft.instructions.is_empty());
    }

    #[test]
    fn draft_survives_fenced_reply() {
        let reply = "```json\n{\"name\":\"Stew\",\"ingredients\":[\"beef\"],\"instructions\":\"1. Simmer.\",\"type\":\"Dinner\"}\n```";
        let draft = parse_recipe_draft(reply).unwrap();
        assert_eq!(draft.name, "Stew");
        assert_eq!(draft.ingredients, vec!["beef"]);
    }

    #[test]
    fn garbage_reply_is_an_error() {
        assert!(parse_recipe_draft("I can't help with that.").is_err());
    }

    #[tokio::test]
    async fn fake_generator_matches_by_substring() {
        let fake = FakeGenerator::with_response("burger", "{\"name\":\"Burgers\"}");
        let out = fake.generate("make me a burger", "sys").await.unwrap();
        assert_eq!(out, "{\"name\":\"Burgers\"}");
        assert!(fake.generate("soup please", "sys").await.is_err());
    }
}
