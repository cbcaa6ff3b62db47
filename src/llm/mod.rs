mod client;
mod gemini;
mod message;

pub use client::ModelClient;
pub use gemini::GeminiClient;
pub use message::{Message, Role};
