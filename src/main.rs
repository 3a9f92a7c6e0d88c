use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::error;

use clipshelf_lib::bootstrap::{
    build_runtime, load_config, tracing::init_tracing_subscriber, wiring::resolve_paths,
};
use clipshelf_lib::probe;
use cs_core::config::AppConfig;

/// Drives the history list core against the in-memory backend.
#[derive(Debug, Parser)]
#[command(name = "clipshelf", version, about)]
struct Cli {
    /// TOML config file; paths left empty fall back to the app data dir.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the rows mounted for one scroll position.
    Window {
        #[arg(long, default_value_t = 200)]
        entries: usize,
        #[arg(long, default_value_t = 600)]
        viewport: u32,
        #[arg(long, default_value_t = 0)]
        scroll: u64,
    },
    /// Copy (or paste) the newest entries one after another.
    Sequence {
        #[arg(long, default_value_t = 3)]
        count: usize,
        /// Seconds between steps: 1, 2, 3, 4, 5 or 10.
        #[arg(long, default_value_t = 2)]
        delay: u64,
        #[arg(long)]
        reverse: bool,
        #[arg(long)]
        paste: bool,
    },
    /// Drag one entry onto a drop target, e.g. `trash`, `history::pinnedzone`,
    /// `board::<id>` or `<itemId>::dropzone`.
    Drop {
        #[arg(long, default_value_t = 10)]
        entries: usize,
        #[arg(long)]
        drag: String,
        #[arg(long)]
        target: String,
        #[arg(long, num_args = 1..)]
        select: Vec<String>,
    },
}

impl Command {
    fn seed_entries(&self) -> usize {
        match self {
            Self::Window { entries, .. } | Self::Drop { entries, .. } => *entries,
            Self::Sequence { count, .. } => *count,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        error!(error = %format!("{err:#}"), "probe failed");
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::empty(),
    };
    config.seed_entries = config.seed_entries.max(cli.command.seed_entries());
    let config = resolve_paths(&config)?;

    let log_dir = config.log_to_file.then(|| config.log_dir.clone());
    init_tracing_subscriber(log_dir.as_deref()).context("Failed to initialize tracing")?;

    let runtime = build_runtime(&config).await?;
    let lines = match cli.command {
        Command::Window { viewport, scroll, .. } => probe::window(&runtime, scroll, viewport).await,
        Command::Sequence {
            count,
            delay,
            reverse,
            paste,
        } => probe::sequence(&runtime, count, delay, reverse, paste).await?,
        Command::Drop {
            drag, target, select, ..
        } => probe::drop_onto(&runtime, &drag, &target, &select).await?,
    };

    for line in lines {
        println!("{line}");
    }
    Ok(())
}
