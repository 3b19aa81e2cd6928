//! Pure transformations for the uploaded-asset store.
//!
//! The filesystem is the store: there is no index, and asset identity is the
//! stored filename. These functions shape names and records; the shell crate
//! does the actual I/O.

use serde::Serialize;
use std::path::Path;

/// One entry in the asset listing.
#[derive(Debug, Clone, Serialize)]
pub struct AssetRecord {
    pub id: String,
    pub name: String,
    pub url: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub mime_type: String,
}

/// Upload confirmation for a single stored file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAsset {
    pub filename: String,
    pub original_name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub mime_type: String,
}

/// Derive a collision-resistant stored name from an uploaded filename by
/// inserting `suffix` between the stem and the extension.
///
/// Any directory components are dropped and characters outside
/// `[A-Za-z0-9._-]` are replaced, so a stored name is always safe to join
/// onto the assets directory.
pub fn unique_stored_name(original_name: &str, suffix: &str) -> String {
    let base = Path::new(original_name)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let sanitized: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();

    match sanitized.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => {
            format!("{stem}_{suffix}.{ext}")
        }
        _ => {
            let stem = if sanitized.is_empty() { "asset" } else { &sanitized };
            format!("{stem}_{suffix}")
        }
    }
}

/// Fixed extension→mime table for the asset types the editor uploads.
pub fn mime_for_extension(filename: &str) -> &'static str {
    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "m4a" => "audio/mp4",
        "json" => "application/json",
        _ => "application/octet-stream",
    }
}

/// Public URL under which a stored asset is served.
pub fn asset_url(base_url: &str, stored_name: &str) -> String {
    format!("{}/assets/phaser/{}", base_url.trim_end_matches('/'), stored_name)
}

/// Shape a directory entry into a listing record.
pub fn asset_record(stored_name: &str, size: u64, base_url: &str) -> AssetRecord {
    AssetRecord {
        id: stored_name.to_string(),
        name: stored_name.to_string(),
        url: asset_url(base_url, stored_name),
        size,
        mime_type: mime_for_extension(stored_name).to_string(),
    }
}

/// Shape an upload result record.
pub fn stored_asset(stored_name: &str, original_name: &str, size: u64) -> StoredAsset {
    StoredAsset {
        filename: stored_name.to_string(),
        original_name: original_name.to_string(),
        size,
        mime_type: mime_for_extension(stored_name).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_inserted_before_extension() {
        assert_eq!(unique_stored_name("player.png", "a1b2c3"), "player_a1b2c3.png");
    }

    #[test]
    fn test_identical_names_with_distinct_suffixes_differ() {
        let first = unique_stored_name("jump.wav", "x1y2z3");
        let second = unique_stored_name("jump.wav", "p9q8r7");
        assert_ne!(first, second);
    }

    #[test]
    fn test_name_without_extension() {
        assert_eq!(unique_stored_name("sprite", "abc123"), "sprite_abc123");
    }

    #[test]
    fn test_directory_components_are_dropped() {
        assert_eq!(
            unique_stored_name("../../etc/passwd.png", "abc123"),
            "passwd_abc123.png"
        );
    }

    #[test]
    fn test_unsafe_characters_are_replaced() {
        assert_eq!(
            unique_stored_name("my sprite (1).png", "abc123"),
            "my_sprite__1__abc123.png"
        );
    }

    #[test]
    fn test_empty_name_gets_fallback_stem() {
        assert_eq!(unique_stored_name("", "abc123"), "asset_abc123");
    }

    #[test]
    fn test_mime_table() {
        assert_eq!(mime_for_extension("tiles.png"), "image/png");
        assert_eq!(mime_for_extension("PHOTO.JPG"), "image/jpeg");
        assert_eq!(mime_for_extension("theme.mp3"), "audio/mpeg");
        assert_eq!(mime_for_extension("map.json"), "application/json");
        assert_eq!(mime_for_extension("unknown.xyz"), "application/octet-stream");
        assert_eq!(mime_for_extension("noextension"), "application/octet-stream");
    }

    #[test]
    fn test_asset_url() {
        assert_eq!(
            asset_url("http://localhost:5000", "player_a1.png"),
            "http://localhost:5000/assets/phaser/player_a1.png"
        );
        assert_eq!(
            asset_url("http://localhost:5000/", "player_a1.png"),
            "http://localhost:5000/assets/phaser/player_a1.png"
        );
    }

    #[test]
    fn test_asset_record_shape() {
        let record = asset_record("bg_a1.png", 2048, "http://localhost:5000");
        assert_eq!(record.id, "bg_a1.png");
        assert_eq!(record.name, "bg_a1.png");
        assert_eq!(record.url, "http://localhost:5000/assets/phaser/bg_a1.png");
        assert_eq!(record.size, 2048);
        assert_eq!(record.mime_type, "image/png");
    }

    #[test]
    fn test_stored_asset_serializes_with_wire_names() {
        let record = stored_asset("bg_a1.png", "bg.png", 10);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["filename"], "bg_a1.png");
        assert_eq!(json["originalName"], "bg.png");
        assert_eq!(json["size"], 10);
        assert_eq!(json["type"], "image/png");
    }
}
