pub mod chat;
pub mod llm;
pub mod protocol;
pub mod tools;

pub use chat::ChatSession;
pub use llm::{GeminiClient, Message, ModelClient, Role};
pub use protocol::{ProtocolError, Step};
pub use tools::{RunCommandTool, Tool, ToolRegistry, WriteFileTool};
