use super::types::{EditorMode, GenerationRequest, ResultShape};

const PREAMBLE: &str = "You are an AI assistant specialized in game development.";

const PHASER_GUIDANCE: &str = "\
Target the Phaser 3 framework and use its idioms (scenes, preload/create/update, \
the arcade physics system). Uploaded assets are served over HTTP and their URLs \
follow the pattern http://localhost:5000/assets/phaser/<filename>; load assets \
from those URLs in preload().";

/// Build the directive text sent to the completion backend.
///
/// Assembles the specialist preamble, the user's request, the optional
/// existing-code context, mode-specific guidance, and the output contract
/// into a single prompt string. Pure function of the request.
pub fn build_prompt(request: &GenerationRequest) -> String {
    let mut parts = Vec::new();

    parts.push(PREAMBLE.to_string());
    parts.push(format!(
        "Generate game code based on this user request: {}",
        request.prompt
    ));

    if !request.existing_code.is_empty() {
        parts.push(format!(
            "Here is the existing code to modify or enhance:\n```\n{}\n```",
            request.existing_code
        ));
    }

    if request.editor_mode == EditorMode::Phaser {
        parts.push(PHASER_GUIDANCE.to_string());
    }

    parts.push(output_contract(
        request.editor_mode.shape(),
        !request.existing_code.is_empty(),
    ));

    parts.join("\n\n")
}

fn output_contract(shape: ResultShape, modifying_existing: bool) -> String {
    let mut lines = vec!["Your response MUST be a single JSON object.".to_string()];

    match shape {
        ResultShape::CodeAndExplanation => {
            lines.push("It must contain exactly these keys:".to_string());
            lines.push("- code: The JavaScript/TypeScript game code implementation".to_string());
            lines.push(
                "- explanation: A detailed explanation of the code, how it works, and key concepts"
                    .to_string(),
            );
        }
        ResultShape::ExplanationOnly => {
            lines.push("It must contain exactly this key:".to_string());
            lines.push(
                "- explanation: A detailed explanation of the changes, including any code \
                 snippets and the files they belong to"
                    .to_string(),
            );
        }
    }

    lines.push(
        "No code or commentary may appear outside the fields listed above.".to_string(),
    );

    if modifying_existing {
        lines.push(
            "Describe partial modifications to the existing code rather than rewriting \
             whole files."
                .to_string(),
        );
    }

    lines.join("\n")
}
