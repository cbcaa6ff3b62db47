use std::time::Duration;

use anyhow::Result;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::llm::{Message, ModelClient};
use crate::protocol::{self, ProtocolError, Step};
use crate::tools::ToolRegistry;

/// Fixed instruction establishing the JSON step protocol; the available-tools
/// section is appended from the registry.
const BASE_SYSTEM_PROMPT: &str = r#"You are Tecy, an assistant that builds basic frontend apps using HTML, CSS, and JS.
You follow the process: start -> plan -> action -> observe -> output.

Rules:
- Respond only in JSON format:
{
  "step": "action",
  "function": "write_file",
  "input": {
    "index.html": "<html>...</html>",
    "styles.css": "body { ... }",
    "script.js": "const x = ...;"
  }
}
- Always return tool input for write_file as a JSON object: { "filename": "file content" }.
- Do not use markdown code blocks (like ```html) inside JSON.
"#;

const START_INSTRUCTION: &str = "Start planning.";
const CONTINUE_JSON_INSTRUCTION: &str = "Continue to next step. Respond ONLY in JSON format.";
const CONTINUE_INSTRUCTION: &str = "Continue to next step.";

fn build_system_prompt(tools: &ToolRegistry) -> String {
    let mut entries: Vec<(String, String)> = tools
        .all()
        .iter()
        .map(|t| (t.name().to_string(), t.description().to_string()))
        .collect();
    entries.sort();

    let tool_list: Vec<String> = entries
        .iter()
        .map(|(name, description)| format!("- {}: {}", name, description))
        .collect();

    format!(
        "{}\nAvailable tools:\n{}\n\nOnly build HTML/CSS/JS projects.\nKeep the user updated step-by-step.\n",
        BASE_SYSTEM_PROMPT,
        tool_list.join("\n")
    )
}

/// One interactive chat session.
///
/// Owns the conversation transcript, which grows append-only across queries
/// for the lifetime of the session and is never persisted. `run_query` drives
/// the plan/action/observe/output state machine for one user query.
pub struct ChatSession {
    transcript: Vec<Message>,
    tools: ToolRegistry,
    system_prompt: String,
    max_round_trips: usize,
    pacing: Duration,
}

impl ChatSession {
    /// Create a session with an explicit round-trip bound and pacing delay.
    pub fn with_limits(tools: ToolRegistry, max_round_trips: usize, pacing: Duration) -> Self {
        let system_prompt = build_system_prompt(&tools);
        Self {
            transcript: Vec::new(),
            tools,
            system_prompt,
            max_round_trips,
            pacing,
        }
    }

    /// The accumulated transcript so far.
    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    /// Resolve one user query through any number of plan/action round-trips,
    /// until the model produces an `output` step or a failure aborts the
    /// query. Errors never outlive the query; the caller reports them and
    /// returns to the prompt.
    pub async fn run_query(&mut self, client: &dyn ModelClient, query: &str) -> Result<()> {
        info!(query, "resolving query");
        let mut used = 0;

        let mut raw = self
            .round_trip(client, format!("{}\n{}", query, START_INSTRUCTION), &mut used)
            .await?;

        loop {
            debug!(raw = %raw, "model reply");

            match protocol::parse(&raw)? {
                Step::Plan { description } => {
                    println!("\nPLAN: {}", display_text(description));
                    raw = self
                        .round_trip(client, CONTINUE_JSON_INSTRUCTION.to_string(), &mut used)
                        .await?;
                }
                Step::Action { function, input } => {
                    println!("\nACTION: {}", function);
                    let result = self.tools.dispatch(&function, input).await?;
                    println!("{}", result);

                    // Report the outcome back to the model as an observe turn.
                    let observe = serde_json::json!({
                        "step": "observe",
                        "output": "Tool executed successfully.",
                    })
                    .to_string();
                    let follow_up = self.round_trip(client, observe, &mut used).await?;
                    debug!(raw = %follow_up, "model follow-up");

                    // An output follow-up ends the query; any other step is
                    // dropped and the model is asked to continue.
                    if let Step::Output { description } = protocol::parse(&follow_up)? {
                        println!("\nOUTPUT: {}", display_text(description));
                        return Ok(());
                    }
                    raw = self
                        .round_trip(client, CONTINUE_INSTRUCTION.to_string(), &mut used)
                        .await?;
                }
                Step::Output { description } => {
                    println!("\nOUTPUT: {}", display_text(description));
                    return Ok(());
                }
                Step::Unrecognized { tag } => {
                    warn!(?tag, "unrecognized step tag, ending round-trip");
                    return Err(ProtocolError::UnrecognizedStep(tag).into());
                }
            }
        }
    }

    /// Send one turn to the model and record both sides in the transcript.
    /// Fails once the query's round-trip bound is crossed.
    async fn round_trip(
        &mut self,
        client: &dyn ModelClient,
        text: String,
        used: &mut usize,
    ) -> Result<String> {
        if *used >= self.max_round_trips {
            return Err(ProtocolError::RoundTripLimitExceeded(self.max_round_trips).into());
        }
        *used += 1;

        self.transcript.push(Message::user(text));
        let raw = client.chat(&self.system_prompt, &self.transcript).await?;
        self.transcript.push(Message::assistant(raw.clone()));

        // Fixed pacing against rate limits, independent of response latency.
        sleep(self.pacing).await;

        Ok(raw)
    }
}

fn display_text(description: Option<String>) -> String {
    description.unwrap_or_else(|| "(no description)".to_string())
}
