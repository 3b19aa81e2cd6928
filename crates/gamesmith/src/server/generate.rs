use crate::prelude::*;
use axum::extract::State;
use axum::Json;
use gamesmith_core::generate::{build_prompt, normalize, GenerationRequest, NormalizedResult};
use std::sync::Arc;

use super::AppState;

/// POST /generate: validate, build the directive, run one completion round
/// trip, and normalize whatever text came back. No retries; an upstream
/// failure is reported once.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<NormalizedResult>, ApiError> {
    if request.prompt.trim().is_empty() {
        return Err(ApiError::InvalidRequest("No prompt provided".to_string()));
    }

    if state.verbose {
        eprintln!(
            "generate: mode {:?}, prompt length {} chars",
            request.editor_mode,
            request.prompt.len()
        );
    }

    let directive = build_prompt(&request);

    let completion = state
        .client
        .complete(&directive)
        .await
        .map_err(|e| ApiError::Upstream(e.to_string()))?;

    Ok(Json(normalize(&completion, request.editor_mode.shape())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::CompletionClient;
    use gamesmith_core::generate::{EditorMode, CODE_PLACEHOLDER};

    struct StubClient {
        reply: std::result::Result<String, String>,
    }

    #[async_trait::async_trait]
    impl CompletionClient for StubClient {
        async fn complete(&self, _directive: &str) -> Result<String> {
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(message) => Err(eyre!("{message}")),
            }
        }
    }

    fn state_with(reply: std::result::Result<String, String>) -> Arc<AppState> {
        Arc::new(AppState {
            client: Box::new(StubClient { reply }),
            assets_dir: std::env::temp_dir(),
            fallback_base_url: "http://localhost:5000".to_string(),
            verbose: false,
        })
    }

    #[tokio::test]
    async fn test_missing_prompt_is_rejected_before_any_backend_call() {
        let state = state_with(Err("backend must not be reached".to_string()));

        let result = generate(State(state), Json(GenerationRequest::default())).await;

        match result {
            Err(ApiError::InvalidRequest(message)) => assert_eq!(message, "No prompt provided"),
            other => panic!("expected InvalidRequest, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_structured_completion_passes_through() {
        let state = state_with(Ok(
            r#"{"code":"function jump(){}","explanation":"adds jump"}"#.to_string(),
        ));
        let request = GenerationRequest {
            prompt: "add jump".to_string(),
            ..Default::default()
        };

        let Json(result) = generate(State(state), Json(request)).await.unwrap();

        assert_eq!(result.code.as_deref(), Some("function jump(){}"));
        assert_eq!(result.explanation, "adds jump");
    }

    #[tokio::test]
    async fn test_upstream_failure_is_surfaced_with_message() {
        let state = state_with(Err("quota exceeded".to_string()));
        let request = GenerationRequest {
            prompt: "add jump".to_string(),
            ..Default::default()
        };

        let result = generate(State(state), Json(request)).await;

        match result {
            Err(error @ ApiError::Upstream(_)) => {
                assert_eq!(error.to_string(), "Failed to generate code: quota exceeded");
            }
            other => panic!("expected Upstream, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_prose_completion_gets_placeholder_code() {
        let state = state_with(Ok("I cannot help with that.".to_string()));
        let request = GenerationRequest {
            prompt: "add jump".to_string(),
            ..Default::default()
        };

        let Json(result) = generate(State(state), Json(request)).await.unwrap();

        assert_eq!(result.code.as_deref(), Some(CODE_PLACEHOLDER));
        assert_eq!(result.explanation, "I cannot help with that.");
    }

    #[tokio::test]
    async fn test_phaser_mode_returns_explanation_only() {
        let state = state_with(Ok(
            r#"{"code":"ignored","explanation":"update the preload hook"}"#.to_string(),
        ));
        let request = GenerationRequest {
            prompt: "load the new sprite".to_string(),
            editor_mode: EditorMode::Phaser,
            ..Default::default()
        };

        let Json(result) = generate(State(state), Json(request)).await.unwrap();

        assert_eq!(result.code, None);
        assert_eq!(result.explanation, "update the preload hook");
    }
}
