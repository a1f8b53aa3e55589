//! Tengen: a Go rules engine with a random player.
//!
//! ## Usage
//!
//! - `tengen` - Start the GTP server on stdin/stdout
//! - `tengen gtp` - Same as above
//! - `tengen demo` - Play a short random game and print the board
//!
//! Logs go to stderr (and optionally a file) so they never mix with GTP
//! responses on stdout.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use tengen::board::Board;
use tengen::bot::{GenMove, RandomBot};
use tengen::constants::{DEFAULT_KOMI, DEFAULT_SIZE, MAX_SIZE, MIN_SIZE};
use tengen::gtp::GtpEngine;
use tengen::vertex::{Color, Vertex};

/// Tengen: a Go rules engine speaking GTP
#[derive(Parser)]
#[command(name = "tengen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Initial board size
    #[arg(long, global = true, default_value_t = DEFAULT_SIZE as u64,
          value_parser = clap::value_parser!(u64).range(MIN_SIZE as u64..=MAX_SIZE as u64))]
    size: u64,

    /// Initial komi
    #[arg(long, global = true, default_value_t = DEFAULT_KOMI, allow_negative_numbers = true)]
    komi: f32,

    /// Seed for the random move generator
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Also write debug logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Increase stderr log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the GTP (Go Text Protocol) server for use with GUI applications
    Gtp,
    /// Play a short random game and print the final board
    Demo,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.log_file.as_ref())?;

    let size = cli.size as usize;
    let mut board = Board::new(size);
    board.komi = cli.komi;
    let bot = match cli.seed {
        Some(seed) => RandomBot::with_seed(seed),
        None => RandomBot::new(),
    };

    match cli.command {
        Some(Commands::Gtp) | None => {
            info!("starting GTP on a {size}x{size} board");
            let mut engine = GtpEngine::with_board(board, bot);
            let stdin = io::stdin();
            engine
                .run(stdin.lock(), io::stdout())
                .context("GTP session failed")?;
        }
        Some(Commands::Demo) => run_demo(board, bot),
    }
    Ok(())
}

fn setup_logging(verbose: u8, log_file: Option<&PathBuf>) -> Result<()> {
    let stderr_level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };

    let log_dispatcher = fern::Dispatch::new().format(|out, message, record| {
        out.finish(format_args!(
            "{}[{}][{}] {}",
            chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
            record.target(),
            record.level(),
            message
        ))
    });

    let log_dispatcher = log_dispatcher.chain(
        fern::Dispatch::new()
            .level(stderr_level)
            .chain(io::stderr()),
    );
    let log_dispatcher = match log_file {
        Some(path) => log_dispatcher.chain(
            fern::Dispatch::new()
                .level(log::LevelFilter::Debug)
                .chain(
                    fern::log_file(path)
                        .with_context(|| format!("cannot open log file {}", path.display()))?,
                ),
        ),
        None => log_dispatcher,
    };

    log_dispatcher
        .apply()
        .context("failed to install logger")?;
    Ok(())
}

fn run_demo(mut board: Board, mut bot: RandomBot) {
    println!("Tengen: Go rules engine\n");

    let max_moves = 3 * board.size() * board.size();
    let mut color = Color::Black;
    let mut played = 0;
    while played < max_moves {
        match bot.genmove(&board, color) {
            GenMove::Play(coord) => {
                board.play(color, Vertex::Play(coord));
                played += 1;
            }
            GenMove::Resign => {
                println!("{color} resigns after {played} moves\n");
                break;
            }
        }
        color = color.opponent();
    }
    println!("{board}");
}
