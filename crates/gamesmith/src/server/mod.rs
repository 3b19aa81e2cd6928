mod assets;
mod cli;
mod generate;

pub use cli::ServeOptions;

use crate::gemini::{CompletionClient, GeminiClient};
use crate::prelude::*;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

// Image and audio uploads; axum's 2 MB default is too small.
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Shared state handed to every handler. The completion client is built once
/// at startup; per-request work never re-initializes it.
pub struct AppState {
    pub client: Box<dyn CompletionClient>,
    pub assets_dir: PathBuf,
    /// Base URL for asset links when a request carries no Host header.
    pub fallback_base_url: String,
    pub verbose: bool,
}

pub async fn run(options: ServeOptions, global: crate::Global) -> Result<()> {
    // Fail fast before binding anything.
    let api_key = std::env::var("GEMINI_API_KEY")
        .map_err(|_| eyre!("GEMINI_API_KEY env var is not set"))?;

    if global.verbose {
        eprintln!(
            "Starting gamesmith server on {}:{}...",
            options.host, options.port
        );
        eprintln!("Model: {}", options.model);
        eprintln!("Assets directory: {}", options.assets_dir.display());
    }

    tokio::fs::create_dir_all(&options.assets_dir)
        .await
        .map_err(|e| {
            eyre!(
                "Failed to create assets directory {}: {}",
                options.assets_dir.display(),
                e
            )
        })?;

    let state = Arc::new(AppState {
        client: Box::new(GeminiClient::new(
            api_key,
            options.model,
            options.timeout_secs,
        )),
        assets_dir: options.assets_dir,
        fallback_base_url: format!("http://localhost:{}", options.port),
        verbose: global.verbose,
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app_router = Router::new()
        .route("/generate", post(generate::generate))
        .route("/upload/phaser", post(assets::upload))
        .route("/assets/phaser", get(assets::list))
        .route(
            "/assets/phaser/{filename}",
            get(assets::fetch).delete(assets::remove),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", options.host, options.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    if global.verbose {
        eprintln!("gamesmith listening on http://{}", addr);
    }

    axum::serve(listener, app_router)
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}
