//! Tengen: a Go rules engine speaking GTP.
//!
//! This crate provides a Go board that tracks groups and liberties
//! incrementally, a uniform-random move generator built on the board's
//! legality check, and a Go Text Protocol front end.
//!
//! ## Modules
//!
//! - [`constants`] - Board size bounds and engine defaults
//! - [`vertex`] - Colors, coordinates and moves with their text forms
//! - [`board`] - Board state, legality, captures and ko
//! - [`bot`] - Random legal move generation
//! - [`gtp`] - GTP command loop
//!
//! ## Example
//!
//! ```
//! use tengen::board::Board;
//! use tengen::vertex::{Color, Vertex};
//!
//! let mut board = Board::new(9);
//! let d4: Vertex = "D4".parse().unwrap();
//! assert!(board.play(Color::Black, d4));
//! assert!(!board.is_legal(Color::White, d4));
//! println!("{board}");
//! ```

pub mod board;
pub mod bot;
pub mod constants;
pub mod gtp;
pub mod vertex;
