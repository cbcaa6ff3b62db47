#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use tecy::{Message, ModelClient, RunCommandTool, ToolRegistry, WriteFileTool};

/// A mock model client that replays scripted raw replies in order.
pub struct MockModelClient {
    replies: Mutex<VecDeque<String>>,
}

impl MockModelClient {
    /// Create a mock from a sequence of raw replies (popped in order).
    pub fn with_replies(replies: Vec<&str>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().map(str::to_string).collect()),
        }
    }
}

#[async_trait]
impl ModelClient for MockModelClient {
    async fn chat(&self, _system: &str, _transcript: &[Message]) -> Result<String> {
        let mut queue = self.replies.lock().unwrap();
        queue
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("MockModelClient: no more replies in queue"))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Create a tool registry with both real tools (same as main.rs).
pub fn create_test_tool_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(RunCommandTool);
    registry.register(WriteFileTool);
    registry
}
