//! Uniform-random move generation.
//!
//! The bot knows nothing about Go beyond the board's legality check: it
//! collects every legal point for the side to move and picks one at random.
//! It does not avoid filling its own eyes.

use log::debug;

use crate::board::Board;
use crate::vertex::{Color, Coord, Vertex};

/// Outcome of move generation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GenMove {
    Play(Coord),
    Resign,
}

impl GenMove {
    /// The vertex to play, or `None` for a resignation.
    pub fn vertex(self) -> Option<Vertex> {
        match self {
            GenMove::Play(coord) => Some(Vertex::Play(coord)),
            GenMove::Resign => None,
        }
    }
}

/// Random legal move generator.
pub struct RandomBot {
    rng: fastrand::Rng,
}

impl Default for RandomBot {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomBot {
    /// Create a bot seeded from system entropy.
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    /// Create a bot with a fixed seed, for reproducible games.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Choose a uniformly random legal point for `color`.
    ///
    /// Resigns when no point on the board is legal.
    pub fn genmove(&mut self, board: &Board, color: Color) -> GenMove {
        let candidates: Vec<Coord> = board
            .coords()
            .filter(|&coord| board.is_legal(color, Vertex::Play(coord)))
            .collect();

        if candidates.is_empty() {
            debug!("no legal move for {color}, resigning");
            return GenMove::Resign;
        }
        let coord = candidates[self.rng.usize(..candidates.len())];
        debug!("{color} picked {coord} from {} candidates", candidates.len());
        GenMove::Play(coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genmove_is_legal() {
        let mut board = Board::new(9);
        let mut bot = RandomBot::with_seed(42);
        let mut color = Color::Black;
        for _ in 0..60 {
            match bot.genmove(&board, color) {
                GenMove::Play(coord) => {
                    assert!(board.is_legal(color, Vertex::Play(coord)));
                    assert!(board.play(color, Vertex::Play(coord)));
                }
                GenMove::Resign => break,
            }
            color = color.opponent();
        }
    }

    #[test]
    fn test_same_seed_same_moves() {
        let board = Board::new(9);
        let mut a = RandomBot::with_seed(3);
        let mut b = RandomBot::with_seed(3);
        for _ in 0..10 {
            assert_eq!(
                a.genmove(&board, Color::Black),
                b.genmove(&board, Color::Black)
            );
        }
    }

    #[test]
    fn test_resign_without_legal_move() {
        let board = Board::new(1);
        let mut bot = RandomBot::with_seed(1);
        assert_eq!(bot.genmove(&board, Color::Black), GenMove::Resign);
        assert_eq!(GenMove::Resign.vertex(), None);
    }

    #[test]
    fn test_only_legal_point_is_chosen() {
        let mut board = Board::new(2);
        // Black on A1 and B2 leaves A2 and B1 as suicide points for white.
        board.play(Color::Black, "A1".parse().unwrap());
        board.play(Color::Black, "B2".parse().unwrap());
        let mut bot = RandomBot::with_seed(9);
        assert_eq!(bot.genmove(&board, Color::White), GenMove::Resign);
        let pick = bot.genmove(&board, Color::Black);
        assert!(matches!(pick, GenMove::Play(c) if c == Coord::new(1, 2) || c == Coord::new(2, 1)));
    }
}
