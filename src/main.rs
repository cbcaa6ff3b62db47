use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tecy::{ChatSession, GeminiClient, ModelClient, RunCommandTool, ToolRegistry, WriteFileTool};

#[derive(Parser)]
#[command(name = "tecy", version)]
#[command(about = "An interactive chat agent that builds frontend apps", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Model to use
    #[arg(long)]
    model: Option<String>,

    /// Maximum model round-trips per query
    #[arg(long, default_value_t = 32)]
    max_round_trips: usize,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive("info".parse().expect("valid log directive"))
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn create_client(model: Option<&str>) -> Result<Box<dyn ModelClient>> {
    let client = if let Some(m) = model {
        GeminiClient::new(m)?
    } else {
        GeminiClient::flash()?
    };
    Ok(Box::new(client))
}

fn create_tool_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(RunCommandTool);
    registry.register(WriteFileTool);
    registry
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let client = create_client(cli.model.as_deref()).context("failed to create model client")?;
    info!(client = %client.name(), "starting chat session");

    let tools = create_tool_registry();
    let mut session = ChatSession::with_limits(tools, cli.max_round_trips, Duration::from_secs(2));

    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        print!("\n> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF (Ctrl-D)
            break;
        }

        let query = line.trim();
        if query.is_empty() {
            continue;
        }

        // Every failure is local to the query; report it and re-prompt.
        if let Err(e) = session.run_query(client.as_ref(), query).await {
            error!(error = %e, "query aborted");
        }
    }

    Ok(())
}
