use serde::{Deserialize, Serialize};

/// Which editor surface a generation request originates from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    #[default]
    General,
    Phaser,
}

impl EditorMode {
    /// The result shape the model is asked to produce for this mode.
    ///
    /// The general editor consumes a whole-file `code` field; the Phaser
    /// editor parses file changes out of the free-text explanation and never
    /// reads a top-level `code` key.
    pub fn shape(self) -> ResultShape {
        match self {
            EditorMode::General => ResultShape::CodeAndExplanation,
            EditorMode::Phaser => ResultShape::ExplanationOnly,
        }
    }
}

/// The set of keys a normalized result must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultShape {
    CodeAndExplanation,
    ExplanationOnly,
}

impl ResultShape {
    pub fn requires_code(self) -> bool {
        matches!(self, ResultShape::CodeAndExplanation)
    }
}

/// A request for game code generation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// The user's instruction. Validated as non-empty by the handler.
    #[serde(default)]
    pub prompt: String,
    /// Existing source to modify or enhance; empty means a fresh file.
    #[serde(default)]
    pub existing_code: String,
    #[serde(default)]
    pub editor_mode: EditorMode,
}

/// The structured value recovered from a completion text.
///
/// `explanation` is always present; `code` is present exactly when the shape
/// requires it (possibly as the placeholder sentinel, never absent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub explanation: String,
}
