//! vtrie CLI - Command line interface for versioned_trie
//!
//! Runs a script of store commands against a fresh in-memory store and
//! prints one JSON record per command. Logs go to stderr.

use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use versioned_trie::script::{Record, ScriptRunner};
use versioned_trie::VersionedStore;

#[derive(Parser)]
#[command(name = "vtrie")]
#[command(about = "Run commands against an in-memory versioned trie store")]
#[command(version)]
struct Cli {
    /// Script to run (reads stdin when omitted)
    script: Option<PathBuf>,

    /// Output format (json or text)
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    /// Log filter, e.g. "debug" or "versioned_trie=trace"
    #[arg(short, long, env = "VTRIE_LOG")]
    log_level: Option<String>,

    /// Number of versions to reserve room for up front
    #[arg(long, default_value = "16")]
    history_capacity: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    let runner = ScriptRunner::new(VersionedStore::with_capacity(cli.history_capacity));
    let reader: Box<dyn BufRead> = match &cli.script {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    };

    runner.run(reader, |record| output(&cli.format, record))?;
    Ok(())
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn output(format: &OutputFormat, record: &Record) -> versioned_trie::Result<()> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string(record)?,
        OutputFormat::Text => serde_json::to_string_pretty(record)?,
    };
    println!("{}", rendered);
    Ok(())
}
