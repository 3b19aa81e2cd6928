use crate::prelude::*;
use axum::extract::{Multipart, Path, State};
use axum::http::header::{CONTENT_TYPE, HOST};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use gamesmith_core::assets::{
    asset_record, mime_for_extension, stored_asset, unique_stored_name, AssetRecord, StoredAsset,
};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use super::AppState;

const SUFFIX_LEN: usize = 6;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub files: Vec<StoredAsset>,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub assets: Vec<AssetRecord>,
}

fn random_suffix() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(char::from)
        .collect()
}

/// Base URL for asset links, taken from the request's Host header.
fn request_base_url(headers: &HeaderMap, state: &AppState) -> String {
    headers
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .map(|host| format!("http://{host}"))
        .unwrap_or_else(|| state.fallback_base_url.clone())
}

/// A stored name never contains separators; reject anything that does before
/// it reaches the filesystem.
fn asset_path(state: &AppState, filename: &str) -> Result<PathBuf, ApiError> {
    if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
        return Err(ApiError::NotFound(filename.to_string()));
    }
    Ok(state.assets_dir.join(filename))
}

async fn store_file(
    state: &AppState,
    original_name: &str,
    bytes: &[u8],
) -> Result<StoredAsset, ApiError> {
    let stored_name = unique_stored_name(original_name, &random_suffix());
    tokio::fs::write(state.assets_dir.join(&stored_name), bytes).await?;
    Ok(stored_asset(&stored_name, original_name, bytes.len() as u64))
}

/// POST /upload/phaser: store every part of the `files` field under a
/// collision-resistant name.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidRequest(e.to_string()))?
    {
        if field.name() != Some("files") {
            continue;
        }

        let original_name = field.file_name().unwrap_or("asset").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        files.push(store_file(&state, &original_name, &bytes).await?);
    }

    if files.is_empty() {
        return Err(ApiError::InvalidRequest("No files provided".to_string()));
    }

    if state.verbose {
        eprintln!("upload: stored {} file(s)", files.len());
    }

    Ok(Json(UploadResponse {
        message: format!("Uploaded {} file(s)", files.len()),
        files,
    }))
}

/// GET /assets/phaser: point-in-time directory scan. The filesystem is the
/// store; a concurrent delete can race this listing and that is accepted.
pub async fn list(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ListResponse>, ApiError> {
    let base_url = request_base_url(&headers, &state);

    let mut assets = Vec::new();
    let mut entries = tokio::fs::read_dir(&state.assets_dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let metadata = entry.metadata().await?;
        if !metadata.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        assets.push(asset_record(&name, metadata.len(), &base_url));
    }

    // read_dir order is platform-dependent
    assets.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(Json(ListResponse { assets }))
}

/// GET /assets/phaser/{filename}: raw bytes with the inferred content type.
pub async fn fetch(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let path = asset_path(&state, &filename)?;

    let bytes = tokio::fs::read(&path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => ApiError::NotFound(filename.clone()),
        _ => ApiError::Internal(e.to_string()),
    })?;

    Ok(([(CONTENT_TYPE, mime_for_extension(&filename))], bytes))
}

/// DELETE /assets/phaser/{filename}.
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let path = asset_path(&state, &filename)?;

    tokio::fs::remove_file(&path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => ApiError::NotFound(filename.clone()),
        _ => ApiError::Internal(e.to_string()),
    })?;

    Ok(Json(serde_json::json!({
        "message": format!("Deleted {filename}")
    })))
}
