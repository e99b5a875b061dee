use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use session_store::MemorySessionStore;
use webscribe_cli::{RecorderConfig, RecorderSession, TraceRunner, TraceStep};

#[derive(Parser)]
#[command(
    name = "webscribe",
    about = "In-page interaction recorder and selector-synthesis engine",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a JSON DOM-event trace through the full recording
    /// pipeline and print the harvested action log.
    Simulate {
        /// Path to the trace file (JSON array of steps).
        #[arg(long)]
        trace: PathBuf,
        /// Optional recorder config; defaults are used when absent.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Pretty-print the harvested log.
        #[arg(long)]
        pretty: bool,
    },
    /// Print the default recorder configuration as JSON.
    DefaultConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr so stdout stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Simulate {
            trace,
            config,
            pretty,
        } => simulate(trace, config, pretty).await,
        Command::DefaultConfig => {
            println!("{}", serde_json::to_string_pretty(&RecorderConfig::default())?);
            Ok(())
        }
    }
}

async fn simulate(trace: PathBuf, config: Option<PathBuf>, pretty: bool) -> anyhow::Result<()> {
    let config = RecorderConfig::load_or_default(config.as_deref())?;
    let raw = std::fs::read_to_string(&trace)
        .with_context(|| format!("reading trace {}", trace.display()))?;
    let steps: Vec<TraceStep> =
        serde_json::from_str(&raw).with_context(|| format!("parsing trace {}", trace.display()))?;

    let debounce_ms = config.relay.debounce_ms;
    let session = RecorderSession::start(config, Arc::new(MemorySessionStore::new()));
    let mut runner = TraceRunner::new(session.clone());
    runner.run(steps).await;
    runner.settle(debounce_ms).await;

    let log = session.harvest();
    let rendered = if pretty {
        serde_json::to_string_pretty(&log)?
    } else {
        serde_json::to_string(&log)?
    };
    println!("{rendered}");
    Ok(())
}
