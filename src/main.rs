use anyhow::{Context, Result};
use arcade_snake::modes::{ArcadeMode, ArcadeOptions, SimulateOptions, run_simulation};
use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "arcade_snake")]
#[command(version, about = "Arcade Snake with combos, power-ups and an autoplay demo")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    play: PlayArgs,
}

#[derive(Subcommand)]
enum Command {
    /// Play in the terminal (default)
    Play(PlayArgs),
    /// Run the autoplay demo headless and print a JSON summary
    Simulate(SimulateArgs),
}

#[derive(Args)]
struct PlayArgs {
    /// Start on the title screen instead of the autoplay demo
    #[arg(long)]
    no_demo: bool,

    /// Where the high score is kept
    #[arg(long, default_value = ".arcade_snake_high_score.json")]
    high_score_file: PathBuf,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Seed for food and power-up placement
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args)]
struct SimulateArgs {
    /// Maximum number of ticks to run
    #[arg(long, default_value = "10000")]
    ticks: u64,

    /// Seed for food and power-up placement
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Keep boost held for the whole run
    #[arg(long)]
    boost: bool,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("arcade_snake=info"))
}

/// Send logs to a file; without one, logging stays off so the TUI is not disturbed
fn init_file_logging(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();
}

async fn play(args: PlayArgs) -> Result<()> {
    init_file_logging(args.log_file.as_deref())?;

    let mut arcade = ArcadeMode::new(ArcadeOptions {
        boot_demo: !args.no_demo,
        high_score_file: args.high_score_file,
        seed: args.seed,
    });
    arcade.run().await
}

fn simulate(args: SimulateArgs) -> Result<()> {
    init_stderr_logging();

    let summary = run_simulation(&SimulateOptions {
        ticks: args.ticks,
        seed: args.seed,
        boost: args.boost,
    });

    let json = serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
    println!("{json}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Play(args)) => play(args).await,
        Some(Command::Simulate(args)) => simulate(args),
        None => play(cli.play).await,
    }
}
