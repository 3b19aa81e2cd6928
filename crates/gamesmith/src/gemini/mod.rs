use crate::prelude::*;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Opaque completion backend: directive text in, completion text out.
///
/// Constructed once at startup and injected into the server state, so the
/// handlers (and their tests) never reach for a process-wide handle.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, directive: &str) -> Result<String>;
}

/// Gemini `generateContent` client that sends the directive as a single user
/// part and returns the first candidate's text.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    timeout_secs: u64,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, timeout_secs: u64) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
            timeout_secs,
        }
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    async fn complete(&self, directive: &str) -> Result<String> {
        let url = format!("{}/{}:generateContent", GEMINI_API_BASE, self.model);

        let body = json!({
            "contents": [{ "parts": [{ "text": directive }] }]
        });

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .timeout(Duration::from_secs(self.timeout_secs))
            .json(&body)
            .send()
            .await
            .map_err(|e| eyre!("Gemini request failed: {e}"))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| eyre!("Failed to read Gemini response: {e}"))?;

        if !status.is_success() {
            return Err(eyre!("Gemini API error ({}): {}", status, text));
        }

        // Minimal structs to parse the generateContent response
        #[derive(Deserialize)]
        struct Part {
            text: Option<String>,
        }
        #[derive(Deserialize)]
        struct Content {
            #[serde(default)]
            parts: Vec<Part>,
        }
        #[derive(Deserialize)]
        struct Candidate {
            content: Option<Content>,
        }
        #[derive(Deserialize)]
        struct GenerateContentResponse {
            #[serde(default)]
            candidates: Vec<Candidate>,
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text)
            .map_err(|e| eyre!("Failed to parse Gemini response: {e}\nRaw: {text}"))?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
            .ok_or_else(|| eyre!("Gemini response contained no candidate text"))
    }
}
