use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use tokio::process::Command;
use tracing::debug;

use super::Tool;
use crate::protocol::ProtocolError;

/// Tool for executing shell commands on the model's behalf.
///
/// Runs the command to completion with no timeout and no sandboxing; the
/// command inherits the process's stdio so its output is visible to the
/// operator.
pub struct RunCommandTool;

#[async_trait]
impl Tool for RunCommandTool {
    fn name(&self) -> &str {
        "run_command"
    }

    fn description(&self) -> &str {
        "runs shell commands; input is the command string"
    }

    async fn execute(&self, payload: Value) -> Result<String> {
        let command = payload.as_str().ok_or_else(|| {
            ProtocolError::MalformedToolInput(format!(
                "run_command expects a command string, got: {}",
                payload
            ))
        })?;

        debug!(command, "running shell command");

        let status = Command::new("bash").arg("-c").arg(command).status().await;

        match status {
            Ok(status) if status.success() => Ok(format!("Command executed: {}", command)),
            Ok(status) => Ok(format!(
                "Command failed (exit code {}): {}",
                status.code().unwrap_or(-1),
                command
            )),
            Err(e) => Ok(format!("Command failed ({}): {}", e, command)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn zero_exit_reports_success() {
        let result = RunCommandTool
            .execute(json!("true"))
            .await
            .expect("should run");
        assert!(result.starts_with("Command executed"));
        assert!(result.contains("true"));
    }

    #[tokio::test]
    async fn nonzero_exit_reports_failure_with_command() {
        let result = RunCommandTool
            .execute(json!("false"))
            .await
            .expect("should run");
        assert!(result.starts_with("Command failed"));
        assert!(result.contains("false"));
    }

    #[tokio::test]
    async fn non_string_payload_is_malformed() {
        let err = RunCommandTool
            .execute(json!({"cmd": "ls"}))
            .await
            .expect_err("should fail");
        let protocol_err = err
            .downcast_ref::<ProtocolError>()
            .expect("should be a protocol error");
        assert!(matches!(protocol_err, ProtocolError::MalformedToolInput(_)));
    }
}
