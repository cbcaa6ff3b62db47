use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::Tool;
use crate::protocol::{ProtocolError, strip_code_fence};

/// Tool for writing files on the model's behalf.
///
/// Accepts two payload shapes: a JSON object mapping filenames to contents
/// (each entry written independently), or a single string whose first line is
/// the filename and the remainder the content. The string form tolerates an
/// outer code fence, which is stripped before the split. Existing files are
/// overwritten without confirmation.
pub struct WriteFileTool;

#[async_trait]
impl Tool for WriteFileTool {
    fn name(&self) -> &str {
        "write_file"
    }

    fn description(&self) -> &str {
        "writes code into files; input maps each filename to its content"
    }

    async fn execute(&self, payload: Value) -> Result<String> {
        match payload {
            Value::Object(entries) => {
                let mut reports = Vec::with_capacity(entries.len());
                for (path, content) in entries {
                    let report = match content.as_str() {
                        Some(text) => write_one(&path, text).await,
                        None => format!("Failed to write {}: content is not a string", path),
                    };
                    reports.push(report);
                }
                if reports.is_empty() {
                    return Err(ProtocolError::MalformedToolInput(
                        "write_file payload contains no files".to_string(),
                    )
                    .into());
                }
                Ok(reports.join("\n"))
            }
            Value::String(blob) => {
                let blob = strip_code_fence(blob.trim());
                let Some(split) = blob.find('\n') else {
                    return Err(ProtocolError::MalformedToolInput(
                        "write_file string payload must contain a filename line followed by content"
                            .to_string(),
                    )
                    .into());
                };
                let path = blob[..split].trim();
                let content = blob[split + 1..].trim();
                Ok(write_one(path, content).await)
            }
            other => Err(ProtocolError::MalformedToolInput(format!(
                "write_file expects a filename-to-content object or a string, got: {}",
                other
            ))
            .into()),
        }
    }
}

/// Write a single file, reporting the outcome as text rather than an error
/// so that sibling entries in a map payload are written regardless.
async fn write_one(path: &str, content: &str) -> String {
    debug!(path, bytes = content.len(), "writing file");
    match tokio::fs::write(path, content).await {
        Ok(()) => format!("File written: {}", path),
        Err(e) => format!("Failed to write {}: {}", path, e),
    }
}
