//! Chat proxy handlers for the upstream LLM providers
//!
//! Three thin passthroughs of a user prompt to an external chat-completion
//! API. DeepSeek and Gemini fail loudly (502) when the provider is
//! unreachable or unconfigured; OpenRouter backs the public chatbot widget
//! and instead degrades to a keyword-matched scripted reply.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::warn;

use crate::database::AppState;
use crate::error::ApiError;

const DEEPSEEK_URL: &str = "https://api.deepseek.com/v1/chat/completions";
const GEMINI_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent";
const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

const OPENROUTER_SYSTEM_PROMPT: &str = "You are a helpful AI assistant specialized in helping \
people find accommodation. You should be friendly, informative, and focus on housing-related \
topics.";

/// Chat request body. The prompt is optional at the type level so a missing
/// field maps to the documented 400 instead of a deserialization rejection.
#[derive(Deserialize)]
pub struct ChatRequest {
    pub prompt: Option<String>,
}

fn require_prompt(request: ChatRequest) -> Result<String, ApiError> {
    request
        .prompt
        .filter(|prompt| !prompt.is_empty())
        .ok_or(ApiError::BadRequest("Prompt is required"))
}

/// `POST /deepseek/chat`
pub async fn deepseek_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let prompt = require_prompt(request)?;

    let key = state.chat.deepseek.as_deref().ok_or_else(|| {
        warn!("DEEPSEEK_API_KEY not set");
        ApiError::Upstream("Failed to generate response from DeepSeek.".to_string())
    })?;

    let body = json!({
        "model": "deepseek-chat",
        "messages": [
            { "role": "user", "content": prompt }
        ]
    });

    let payload: Value = state
        .http
        .post(DEEPSEEK_URL)
        .bearer_auth(key)
        .json(&body)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|err| {
            warn!(error = %err, "DeepSeek API error");
            ApiError::Upstream("Failed to generate response from DeepSeek.".to_string())
        })?
        .json()
        .await
        .map_err(|err| {
            warn!(error = %err, "DeepSeek returned an unreadable body");
            ApiError::Upstream("Failed to generate response from DeepSeek.".to_string())
        })?;

    let reply = payload
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .unwrap_or("No response from DeepSeek.")
        .to_string();

    Ok(Json(json!({ "reply": reply })))
}

/// `POST /gemini/chat`
pub async fn gemini_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let prompt = require_prompt(request)?;

    let key = state.chat.gemini.as_deref().ok_or_else(|| {
        warn!("GEMINI_API_KEY not set");
        ApiError::Upstream("Failed to generate response from Gemini.".to_string())
    })?;

    let body = json!({
        "contents": [
            { "parts": [ { "text": prompt } ] }
        ]
    });

    let payload: Value = state
        .http
        .post(GEMINI_URL)
        .query(&[("key", key)])
        .json(&body)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|err| {
            warn!(error = %err, "Gemini API error");
            ApiError::Upstream("Failed to generate response from Gemini.".to_string())
        })?
        .json()
        .await
        .map_err(|err| {
            warn!(error = %err, "Gemini returned an unreadable body");
            ApiError::Upstream("Failed to generate response from Gemini.".to_string())
        })?;

    let reply = payload
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .unwrap_or("No response from Gemini.")
        .to_string();

    Ok(Json(json!({ "reply": reply })))
}

/// `POST /openrouter/chat`
///
/// Always answers 200 once the prompt is present: a missing key or an
/// upstream failure falls back to the scripted reply so the chatbot widget
/// never surfaces a provider outage to the visitor.
pub async fn openrouter_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let prompt = require_prompt(request)?;

    let reply = match state.chat.openrouter.as_deref() {
        Some(key) => match call_openrouter(&state.http, key, &prompt).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(error = %err, "OpenRouter API error, using scripted fallback");
                fallback_reply(&prompt)
            }
        },
        None => {
            warn!("OPENROUTER_API_KEY not set, using scripted fallback");
            fallback_reply(&prompt)
        }
    };

    Ok(Json(json!({ "reply": reply })))
}

async fn call_openrouter(
    http: &reqwest::Client,
    key: &str,
    prompt: &str,
) -> Result<String, reqwest::Error> {
    let body = json!({
        "model": "deepseek/deepseek-v3-base:free",
        "messages": [
            { "role": "system", "content": OPENROUTER_SYSTEM_PROMPT },
            { "role": "user", "content": prompt }
        ],
        "max_tokens": 500,
        "temperature": 0.7
    });

    let payload: Value = http
        .post(OPENROUTER_URL)
        .bearer_auth(key)
        .header("HTTP-Referer", "http://localhost:5000")
        .header("X-Title", "Torabasa Accommodation Assistant")
        .timeout(Duration::from_secs(30))
        .json(&body)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    Ok(payload
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .unwrap_or(
            "I apologize, but I didn't receive a proper response. Could you please try asking \
             your question again?",
        )
        .to_string())
}

/// Keyword-matched canned reply used when OpenRouter is unavailable.
pub fn fallback_reply(prompt: &str) -> String {
    let mut reply = String::from("I'm having trouble connecting to my AI service right now. ");
    let lower = prompt.to_lowercase();

    if lower.contains("hello") || lower.contains("hi") {
        reply.push_str("Hello! I'm here to help you find accommodation. What are you looking for?");
    } else if lower.contains("price") || lower.contains("cost") {
        reply.push_str(
            "Our accommodations typically range from $800 to $1400 per month. What's your budget?",
        );
    } else if lower.contains("location") || lower.contains("area") {
        reply.push_str(
            "We have properties in Chitungwiza Unit A, B, C, and L. Which area interests you?",
        );
    } else {
        reply.push_str(
            "I can help you with accommodation pricing, locations, amenities, and booking. What \
             would you like to know?",
        );
    }

    reply
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_greets_on_hello() {
        let reply = fallback_reply("Hello there");
        assert!(reply.contains("Hello! I'm here to help you find accommodation"));
    }

    #[test]
    fn fallback_quotes_prices_on_cost() {
        let reply = fallback_reply("what does a room cost?");
        assert!(reply.contains("$800 to $1400"));
    }

    #[test]
    fn fallback_lists_areas_on_location() {
        let reply = fallback_reply("which LOCATION do you cover?");
        assert!(reply.contains("Chitungwiza Unit A, B, C, and L"));
    }

    #[test]
    fn fallback_defaults_to_general_help() {
        let reply = fallback_reply("do you allow pets?");
        assert!(reply.contains("pricing, locations, amenities, and booking"));
    }
}
