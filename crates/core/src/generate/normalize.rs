use serde_json::{Map, Value};

use super::types::{NormalizedResult, ResultShape};

/// Sentinel returned as `code` when no structured code could be recovered.
pub const CODE_PLACEHOLDER: &str =
    "// The model did not return structured code. See the explanation.";

/// Ordered recovery strategies. Each is a pure function that either fully
/// recovers a result from the completion text or declines; the first `Some`
/// wins. Parse failures never escape a strategy.
const STRATEGIES: &[fn(&str, ResultShape) -> Option<NormalizedResult>] = &[
    parse_whole_text,
    parse_fenced_json,
    parse_embedded_object,
    partition_by_fences,
];

/// Recover a structured result from a raw completion text.
///
/// Never fails: when every extraction strategy declines, the entire raw text
/// becomes the explanation and `code` (when the shape requires one) is set to
/// [`CODE_PLACEHOLDER`].
pub fn normalize(completion: &str, shape: ResultShape) -> NormalizedResult {
    STRATEGIES
        .iter()
        .find_map(|strategy| strategy(completion, shape))
        .unwrap_or_else(|| NormalizedResult {
            code: shape.requires_code().then(|| CODE_PLACEHOLDER.to_string()),
            explanation: completion.to_string(),
        })
}

/// Strategy 1: the whole completion is one JSON value.
fn parse_whole_text(text: &str, shape: ResultShape) -> Option<NormalizedResult> {
    let value: Value = serde_json::from_str(text.trim()).ok()?;
    result_from_object(&value, shape)
}

/// Strategy 2: a JSON object inside the first triple-backtick fence,
/// optionally annotated with a language tag (```json).
fn parse_fenced_json(text: &str, shape: ResultShape) -> Option<NormalizedResult> {
    let interior = fenced_interior(text)?;
    let value: Value = serde_json::from_str(interior).ok()?;
    result_from_object(&value, shape)
}

/// Strategy 3: scan for embedded object spans. Candidates run from each `{`
/// in order of appearance to the last `}` in the text (greedy, so nested
/// braces stay inside the span); each candidate is parsed independently and
/// rejected silently, because prose around the object can contain stray
/// braces.
fn parse_embedded_object(text: &str, shape: ResultShape) -> Option<NormalizedResult> {
    let end = text.rfind('}')?;
    for (start, _) in text.match_indices('{') {
        if start > end {
            break;
        }
        if let Ok(value) = serde_json::from_str::<Value>(&text[start..=end]) {
            if let Some(result) = result_from_object(&value, shape) {
                return Some(result);
            }
        }
    }
    None
}

/// Strategy 4 (code+explanation shape only): no JSON anywhere, but the text
/// has fenced code. Fence-marker lines toggle an in-code flag; code lines
/// accumulate to `code`, everything else to `explanation`.
fn partition_by_fences(text: &str, shape: ResultShape) -> Option<NormalizedResult> {
    if !shape.requires_code() {
        return None;
    }

    let mut in_code = false;
    let mut code_lines = Vec::new();
    let mut explanation_lines = Vec::new();

    for line in text.lines() {
        if line.trim().starts_with("```") {
            in_code = !in_code;
            continue;
        }
        if in_code {
            code_lines.push(line);
        } else {
            explanation_lines.push(line);
        }
    }

    let code = code_lines.join("\n").trim().to_string();
    if code.is_empty() {
        return None;
    }

    Some(NormalizedResult {
        code: Some(code),
        explanation: explanation_lines.join("\n").trim().to_string(),
    })
}

/// Interior of the first triple-backtick fence, with the opening fence line
/// (including any language tag) and the closing fence stripped.
fn fenced_interior(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let rest = &text[open + 3..];
    let body = &rest[rest.find('\n')? + 1..];
    let close = body.find("```")?;
    Some(&body[..close])
}

/// Accept a parsed JSON value when it is an object carrying every key the
/// shape requires. Extra keys are ignored; a present-but-null key counts as
/// missing.
fn result_from_object(value: &Value, shape: ResultShape) -> Option<NormalizedResult> {
    let object = value.as_object()?;
    let explanation = required_field(object, "explanation")?;

    let code = if shape.requires_code() {
        Some(required_field(object, "code")?)
    } else {
        None
    };

    Some(NormalizedResult { code, explanation })
}

fn required_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    let value = object.get(key)?;
    if value.is_null() {
        return None;
    }
    Some(match value.as_str() {
        Some(s) => s.to_string(),
        // Keep non-string payloads instead of dropping them.
        None => value.to_string(),
    })
}
