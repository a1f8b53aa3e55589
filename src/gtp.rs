//! Go Text Protocol (GTP) implementation.
//!
//! GTP is a text-based protocol for communicating with Go-playing programs.
//! This module implements the subset of GTP version 2 needed to referee a
//! game and answer with random moves, so the engine can be driven by GoGui,
//! Sabaki or a tournament controller.
//!
//! ## Supported Commands
//!
//! - `protocol_version`, `name`, `version` - Identification
//! - `known_command <cmd>`, `list_commands` - Command discovery
//! - `quit` - Exit the program
//! - `boardsize <size>` - Set board size (1 to 19); clears the board
//! - `clear_board` - Reset the board to empty
//! - `komi <value>` - Set komi
//! - `play <color> <vertex>` - Play a move
//! - `genmove <color>` - Generate and play a random legal move
//! - `is_legal <color> <vertex>` - `1` if the move is legal, else `0`
//! - `undo` - Take back the last move
//! - `captures <color>` - Stones captured by a color
//! - `showboard` - Render the board
//!
//! ## Example
//!
//! ```
//! use tengen::gtp::GtpEngine;
//!
//! let mut engine = GtpEngine::new();
//! let mut out = Vec::new();
//! engine.run("1 boardsize 9\n2 play b E5\n".as_bytes(), &mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "=1\n\n=2\n\n");
//! ```

use std::io::{self, BufRead, Write};

use log::{debug, info, warn};
use thiserror::Error;

use crate::board::Board;
use crate::bot::{GenMove, RandomBot};
use crate::constants::{DEFAULT_SIZE, MAX_SIZE, MIN_SIZE};
use crate::vertex::{Color, Vertex};

/// The list of known GTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "captures",
    "clear_board",
    "genmove",
    "is_legal",
    "known_command",
    "komi",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "undo",
    "version",
];

/// A failed command. The message is what follows `?` in the response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GtpError {
    #[error("syntax error")]
    Syntax,
    #[error("unacceptable size")]
    UnacceptableSize,
    #[error("illegal move")]
    IllegalMove,
    #[error("cannot undo")]
    CannotUndo,
    #[error("unknown command")]
    UnknownCommand,
}

/// GTP engine state.
pub struct GtpEngine {
    board: Board,
    bot: RandomBot,
    /// Moves actually played since the last clear, for `undo`.
    history: Vec<(Color, Vertex)>,
}

impl Default for GtpEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GtpEngine {
    /// Create a new GTP engine with an empty default-sized board.
    pub fn new() -> Self {
        Self::with_board(Board::new(DEFAULT_SIZE), RandomBot::new())
    }

    /// Create a GTP engine around an existing board and bot.
    pub fn with_board(board: Board, bot: RandomBot) -> Self {
        Self {
            board,
            bot,
            history: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Run the GTP command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = preprocess(&line?);
            if line.is_empty() {
                continue;
            }

            let (id, command_line) = Self::parse_id(&line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            debug!("gtp <- {line}");
            let response = self.execute(&command, args);
            let text = format_response(id, &response);
            debug!("gtp -> {}", text.trim_end());

            output.write_all(text.as_bytes())?;
            output.flush()?;

            if command == "quit" && response.is_ok() {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let (first, rest) = trimmed
            .split_once(' ')
            .unwrap_or((trimmed, ""));

        if !first.is_empty() && first.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(id) = first.parse::<u32>() {
                return (Some(id), rest.trim());
            }
        }

        (None, trimmed)
    }

    /// Execute a GTP command and return its payload.
    fn execute(&mut self, command: &str, args: &[&str]) -> Result<String, GtpError> {
        match command {
            "name" => Ok(env!("CARGO_PKG_NAME").to_string()),

            "version" => Ok(env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => Ok("2".to_string()),

            "list_commands" => Ok(KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let name = args.first().ok_or(GtpError::Syntax)?;
                let known = KNOWN_COMMANDS.contains(&name.to_lowercase().as_str());
                Ok(known.to_string())
            }

            "quit" => Ok(String::new()),

            "boardsize" => {
                let size: usize = parse_arg(args, 0)?;
                if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
                    return Err(GtpError::UnacceptableSize);
                }
                self.board.resize(size);
                self.history.clear();
                Ok(String::new())
            }

            "clear_board" => {
                self.board.clear();
                self.history.clear();
                info!("board cleared");
                Ok(String::new())
            }

            "komi" => {
                self.board.komi = parse_arg(args, 0)?;
                Ok(String::new())
            }

            "play" => {
                let color: Color = parse_arg(args, 0)?;
                let vertex: Vertex = parse_arg(args, 1)?;
                if !self.board.play(color, vertex) {
                    warn!("rejected illegal move {color} {vertex}");
                    return Err(GtpError::IllegalMove);
                }
                self.history.push((color, vertex));
                Ok(String::new())
            }

            "genmove" => {
                let color: Color = parse_arg(args, 0)?;
                match self.bot.genmove(&self.board, color) {
                    GenMove::Play(coord) => {
                        let vertex = Vertex::Play(coord);
                        let played = self.board.play(color, vertex);
                        debug_assert!(played, "generated an illegal move {vertex}");
                        self.history.push((color, vertex));
                        Ok(coord.to_string())
                    }
                    GenMove::Resign => Ok("resign".to_string()),
                }
            }

            "is_legal" => {
                let color: Color = parse_arg(args, 0)?;
                let vertex: Vertex = parse_arg(args, 1)?;
                let legal = self.board.is_legal(color, vertex);
                Ok(if legal { "1" } else { "0" }.to_string())
            }

            "undo" => {
                if self.history.pop().is_none() {
                    return Err(GtpError::CannotUndo);
                }
                self.replay();
                Ok(String::new())
            }

            "captures" => {
                let color: Color = parse_arg(args, 0)?;
                Ok(self.board.captures(color).to_string())
            }

            "showboard" => Ok(format!("\n{}", self.board)),

            _ => Err(GtpError::UnknownCommand),
        }
    }

    /// Rebuild the board from the move history.
    fn replay(&mut self) {
        self.board.clear();
        for &(color, vertex) in &self.history {
            let played = self.board.play(color, vertex);
            debug_assert!(played, "history holds an illegal move {color} {vertex}");
        }
    }
}

/// Parse the argument at `index`, mapping any failure to a syntax error.
fn parse_arg<T: std::str::FromStr>(args: &[&str], index: usize) -> Result<T, GtpError> {
    args.get(index)
        .ok_or(GtpError::Syntax)?
        .parse()
        .map_err(|_| GtpError::Syntax)
}

/// Clean a raw input line: drop control characters other than tab, strip
/// comments, and turn tabs into spaces.
fn preprocess(line: &str) -> String {
    let uncommented = line.split('#').next().unwrap_or("");
    uncommented
        .chars()
        .filter(|&c| c == '\t' || !c.is_control())
        .map(|c| if c == '\t' { ' ' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Format a response: `=id payload\n\n` on success, `?id message\n\n` on
/// failure. The space is left out when there is nothing after the id.
fn format_response(id: Option<u32>, response: &Result<String, GtpError>) -> String {
    let id_str = id.map(|i| i.to_string()).unwrap_or_default();
    let (prefix, message) = match response {
        Ok(payload) => ('=', payload.clone()),
        Err(err) => ('?', err.to_string()),
    };
    if message.is_empty() {
        format!("{prefix}{id_str}\n\n")
    } else {
        format!("{prefix}{id_str} {message}\n\n")
    }
}
