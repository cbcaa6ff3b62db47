mod file;
mod registry;
mod shell;

pub use file::WriteFileTool;
pub use registry::ToolRegistry;
pub use shell::RunCommandTool;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// A tool the model can ask the loop to execute on its behalf.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool
    fn name(&self) -> &str;

    /// A description of what this tool does
    fn description(&self) -> &str;

    /// Execute the tool with the given payload, returning a human-readable
    /// status report. A payload whose shape the tool cannot interpret is an
    /// `Err`; an operation that ran but did not succeed is reported in the
    /// `Ok` text.
    async fn execute(&self, payload: Value) -> Result<String>;
}
