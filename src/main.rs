use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{self, AsyncBufReadExt, BufReader};

use zreason::config::{default_stream_config_path, load_stream_config};
use zreason::{ReasoningProcessor, UiMessage};

/// Stream reasoning deltas from stdin and print coalesced UI messages
/// as JSON lines on stdout.
#[derive(Parser)]
#[command(name = "zreason")]
struct Args {
    /// Minimum milliseconds between streamed reasoning emissions
    #[arg(long)]
    flush_interval_ms: Option<u64>,

    /// Path to a JSON config file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config_path = args.config.unwrap_or_else(default_stream_config_path);
    let mut config = load_stream_config(&config_path);
    if let Some(ms) = args.flush_interval_ms {
        config.flush_interval_ms = ms;
    }

    let emit = Arc::new(|message: UiMessage| match serde_json::to_string(&message) {
        Ok(line) => println!("{}", line),
        Err(e) => eprintln!("[EMIT] failed to serialize message: {}", e),
    });
    let processor = ReasoningProcessor::new(emit, &config);

    // Each stdin line is one delta; the concatenation is the final text
    let mut lines = BufReader::new(io::stdin()).lines();
    let mut full_text = String::new();
    while let Some(line) = lines.next_line().await? {
        let delta = format!("{}\n", line);
        full_text.push_str(&delta);
        processor.process_delta(&delta);
    }
    processor.complete(&full_text);

    Ok(())
}
