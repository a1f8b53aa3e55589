//! Colors, coordinates and moves, with their GTP text forms.
//!
//! Columns use the Go letter alphabet (A-T without I), rows are 1-based
//! decimal numbers counted from the bottom edge. `pass` is the only literal
//! vertex; `resign` is reserved and only ever produced by move generation.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::constants::{COLUMNS, MAX_SIZE};

/// Stone color. The discriminant doubles as an index into per-color tables.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black = 0,
    White = 1,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::Black, Color::White];

    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::White => "white",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color: {0:?}")]
pub struct ParseColorError(pub String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "b" | "black" => Ok(Color::Black),
            "w" | "white" => Ok(Color::White),
            _ => Err(ParseColorError(s.to_string())),
        }
    }
}

/// A board point in real coordinates: `col` and `row` both in `1..=size`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Coord {
    pub col: usize,
    pub row: usize,
}

impl Coord {
    pub const fn new(col: usize, row: usize) -> Self {
        Coord { col, row }
    }

    /// Whether this coordinate lies on a board of the given size.
    #[inline]
    pub fn is_within(self, size: usize) -> bool {
        (1..=size).contains(&self.col) && (1..=size).contains(&self.row)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.col.checked_sub(1).and_then(|c| COLUMNS.get(c)) {
            Some(&letter) => write!(f, "{}{}", letter as char, self.row),
            None => write!(f, "?{}", self.row),
        }
    }
}

/// The move a player intends to make.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Vertex {
    Pass,
    Play(Coord),
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vertex::Pass => f.write_str("pass"),
            Vertex::Play(coord) => coord.fmt(f),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseVertexError {
    #[error("empty vertex")]
    Empty,
    #[error("resign is not a vertex")]
    Resign,
    #[error("invalid column in {0:?}")]
    Column(String),
    #[error("invalid row in {0:?}")]
    Row(String),
}

impl FromStr for Vertex {
    type Err = ParseVertexError;

    /// Parse `pass` or a coordinate such as `D4` (case-insensitive).
    ///
    /// Only the alphabet bounds are checked here; whether the coordinate is
    /// on the current board is the board's business.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseVertexError::Empty);
        }
        if s.eq_ignore_ascii_case("pass") {
            return Ok(Vertex::Pass);
        }
        if s.eq_ignore_ascii_case("resign") {
            return Err(ParseVertexError::Resign);
        }

        let letter = s.as_bytes()[0].to_ascii_uppercase();
        let col = COLUMNS
            .iter()
            .position(|&c| c == letter)
            .map(|i| i + 1)
            .ok_or_else(|| ParseVertexError::Column(s.to_string()))?;

        let digits = &s[1..];
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseVertexError::Row(s.to_string()));
        }
        let row: usize = digits
            .parse()
            .map_err(|_| ParseVertexError::Row(s.to_string()))?;
        if !(1..=MAX_SIZE).contains(&row) {
            return Err(ParseVertexError::Row(s.to_string()));
        }

        Ok(Vertex::Play(Coord::new(col, row)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent() {
        assert_eq!(Color::Black.opponent(), Color::White);
        assert_eq!(Color::White.opponent(), Color::Black);
        assert_eq!(Color::Black.index(), 0);
        assert_eq!(Color::White.index(), 1);
    }

    #[test]
    fn test_parse_color() {
        assert_eq!("b".parse::<Color>(), Ok(Color::Black));
        assert_eq!("WHITE".parse::<Color>(), Ok(Color::White));
        assert!("red".parse::<Color>().is_err());
    }

    #[test]
    fn test_parse_vertex_skips_i() {
        let h5: Vertex = "H5".parse().unwrap();
        let j5: Vertex = "j5".parse().unwrap();
        assert_eq!(h5, Vertex::Play(Coord::new(8, 5)));
        assert_eq!(j5, Vertex::Play(Coord::new(9, 5)));
        assert!(matches!(
            "I5".parse::<Vertex>(),
            Err(ParseVertexError::Column(_))
        ));
    }

    #[test]
    fn test_parse_vertex_errors() {
        assert_eq!("".parse::<Vertex>(), Err(ParseVertexError::Empty));
        assert_eq!("Resign".parse::<Vertex>(), Err(ParseVertexError::Resign));
        assert!(matches!("D".parse::<Vertex>(), Err(ParseVertexError::Row(_))));
        assert!(matches!("D0".parse::<Vertex>(), Err(ParseVertexError::Row(_))));
        assert!(matches!("D20".parse::<Vertex>(), Err(ParseVertexError::Row(_))));
        assert!(matches!("D4x".parse::<Vertex>(), Err(ParseVertexError::Row(_))));
        assert!(matches!("U4".parse::<Vertex>(), Err(ParseVertexError::Column(_))));
    }

    #[test]
    fn test_vertex_display() {
        assert_eq!(Vertex::Pass.to_string(), "pass");
        assert_eq!(Vertex::Play(Coord::new(19, 19)).to_string(), "T19");
        assert_eq!(Vertex::Play(Coord::new(1, 1)).to_string(), "A1");
        let v: Vertex = "PASS".parse().unwrap();
        assert_eq!(v, Vertex::Pass);
    }
}
