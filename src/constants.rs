//! Board geometry bounds and engine defaults.
//!
//! The board is stored as a 1D array with a one-point border of padding on
//! every side, so a board of size `n` occupies `(n + 2) * (n + 2)` slots.
//! Unlike a compile-time board, the size is chosen at runtime and may change
//! between games (GTP `boardsize`), so only the bounds live here.

// =============================================================================
// Board Geometry
// =============================================================================

/// Smallest accepted board size.
pub const MIN_SIZE: usize = 1;

/// Largest accepted board size. Bounded by the column alphabet below.
pub const MAX_SIZE: usize = 19;

/// Board size used when nothing else is requested.
pub const DEFAULT_SIZE: usize = 19;

/// Width of the padded board for the largest size.
pub const MAX_EXTENDED_SIZE: usize = MAX_SIZE + 2;

/// Index used for "no point" (ko cleared). Index 0 is always padding.
pub const NO_POINT: usize = 0;

/// Column letters. Go coordinates skip 'I' to avoid confusion with 'J'.
pub const COLUMNS: &[u8; MAX_SIZE] = b"ABCDEFGHJKLMNOPQRST";

// =============================================================================
// Game Defaults
// =============================================================================

/// Komi (compensation points for White).
pub const DEFAULT_KOMI: f32 = 7.5;

// =============================================================================
// Rendering
// =============================================================================

/// Black stone.
pub const STONE_BLACK: char = 'X';

/// White stone.
pub const STONE_WHITE: char = 'O';

/// Empty point.
pub const EMPTY: char = '.';
