use super::error::ProtocolError;
use super::step::{RawStep, Step};

/// Parse one raw model reply into a classified [`Step`].
///
/// Strips a surrounding fenced code block if present, then decodes the
/// remaining text as a JSON step record. Pure transform; printing the raw or
/// cleaned text is the caller's concern.
pub fn parse(raw: &str) -> Result<Step, ProtocolError> {
    let cleaned = strip_code_fence(raw.trim());

    if cleaned.is_empty() {
        return Err(ProtocolError::EmptyResponse);
    }

    let record: RawStep =
        serde_json::from_str(cleaned).map_err(|source| ProtocolError::MalformedJson {
            raw: raw.to_string(),
            source,
        })?;

    Ok(record.classify())
}

/// Best-effort removal of a single surrounding fence pair.
///
/// Assumes the fence markers sit on their own lines with no blank padding;
/// nested or malformed fences are not handled.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }

    let Some(after_open) = trimmed.find('\n') else {
        return trimmed;
    };
    let Some(close) = trimmed.rfind("```") else {
        return trimmed;
    };
    if close <= after_open {
        return trimmed;
    }

    trimmed[after_open + 1..close].trim()
}
