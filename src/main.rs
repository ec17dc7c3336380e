//! Blox CLI - run saved block graphs from the command line.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use blox::{Alert, Block, BlockRegistry, BlockType, Blox, TracingObserver, Value};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Blox - dataflow block graphs executed in rounds
#[derive(Parser)]
#[command(name = "blox")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a graph file and run it until no block is scheduled
    Run {
        /// Path to the graph JSON file
        file: PathBuf,

        /// Abort after this many rounds
        #[arg(long)]
        max_rounds: Option<usize>,

        /// Log the values flowing between blocks
        #[arg(long)]
        trace_values: bool,
    },

    /// List the block types a graph file may use
    Types,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Alert that prints messages on stdout
fn console_alert() -> Box<dyn Block> {
    Box::new(Alert::with_handler(|message| match message {
        Value::String(text) => println!("{text}"),
        other => println!("{other}"),
    }))
}

fn registry() -> BlockRegistry {
    let mut registry = BlockRegistry::with_builtins();
    registry.register_factory(Alert::TYPE_NAME, console_alert);
    registry
}

fn run(file: &Path, max_rounds: Option<usize>, trace_values: bool) -> Result<()> {
    let mut blox = Blox::load(file, &registry())
        .with_context(|| format!("failed to load {}", file.display()))?;

    let settings = blox.settings_mut();
    if max_rounds.is_some() {
        settings.max_rounds = max_rounds;
    }
    settings.trace_values |= trace_values;

    let observer = if blox.settings().trace_values {
        TracingObserver::with_values()
    } else {
        TracingObserver::new()
    };
    blox.add_observer(observer);

    tracing::info!(
        file = %file.display(),
        blocks = blox.len(),
        subscriptions = blox.subscription_count(),
        "running graph"
    );
    let report = blox
        .run()
        .with_context(|| format!("run of {} failed", file.display()))?;
    tracing::info!(
        rounds = report.rounds,
        processed = report.processed,
        "graph settled"
    );

    if !blox.variables().is_empty() {
        println!("{}", serde_json::to_string_pretty(blox.variables())?);
    }
    Ok(())
}

fn list_types() {
    for definition in registry().definitions() {
        let inputs: Vec<&str> = definition.ports.input_names().collect();
        let outputs: Vec<&str> = definition.ports.output_names().collect();
        println!(
            "{:<10} {:<8} [{}] -> [{}]  {}",
            definition.name,
            definition.category.as_str(),
            inputs.join(", "),
            outputs.join(", "),
            definition.description
        );
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run {
            file,
            max_rounds,
            trace_values,
        } => run(&file, max_rounds, trace_values),
        Commands::Types => {
            list_types();
            Ok(())
        }
    }
}
