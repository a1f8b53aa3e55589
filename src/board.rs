//! Go board with incremental group tracking.
//!
//! The board is a 1D array over an extended `(size + 2) x (size + 2)` grid
//! whose outer ring is permanently [`GridPoint::OffBoard`]. Every on-board
//! point therefore has exactly four neighbor indices, and neighbor scans never
//! need a bounds check.
//!
//! Groups (chains) are tracked with three parallel arrays indexed by point:
//! - `group_head`: the representative point of the group a stone belongs to
//! - `group_next`: a circular list threading all stones of one group
//! - `group_data`: liberty and stone counts, meaningful at head points only
//!
//! Placing a stone merges and captures groups by walking these lists, so a
//! move never rescans the whole board and never allocates.

use std::fmt;

use log::{debug, info};

use crate::constants::{
    COLUMNS, DEFAULT_KOMI, EMPTY, MAX_SIZE, MIN_SIZE, NO_POINT, STONE_BLACK, STONE_WHITE,
};
use crate::vertex::{Color, Coord, Vertex};

/// Contents of one slot of the extended grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GridPoint {
    Empty,
    Stone(Color),
    OffBoard,
}

/// Aggregate counts for one group, stored at its head point.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
struct GroupData {
    /// Distinct empty points adjacent to any stone of the group.
    liberties: u32,
    stones: u32,
}

/// Set of at most four group heads, for deduplicating a neighbor scan.
struct HeadSet {
    heads: [usize; 4],
    len: usize,
}

impl HeadSet {
    fn new() -> Self {
        HeadSet {
            heads: [NO_POINT; 4],
            len: 0,
        }
    }

    /// Returns `true` if `head` was not yet in the set.
    fn insert(&mut self, head: usize) -> bool {
        if self.heads[..self.len].contains(&head) {
            return false;
        }
        self.heads[self.len] = head;
        self.len += 1;
        true
    }
}

/// A Go board for one game at a time.
#[derive(Clone)]
pub struct Board {
    size: usize,
    extended_size: usize,
    /// Komi (compensation points for White). Stored only, never scored.
    pub komi: f32,
    grid: Vec<GridPoint>,
    group_head: Vec<usize>,
    group_next: Vec<usize>,
    group_data: Vec<GroupData>,
    /// Point forbidden for the next move, or `NO_POINT`.
    ko_point: usize,
    /// Stones captured by each color.
    captures: [u32; 2],
}

impl Board {
    /// Create an empty board.
    ///
    /// # Panics
    /// If `size` is outside `MIN_SIZE..=MAX_SIZE`. Callers validate sizes
    /// coming from user input before getting here.
    pub fn new(size: usize) -> Self {
        let mut board = Board {
            size: 0,
            extended_size: 0,
            komi: DEFAULT_KOMI,
            grid: Vec::new(),
            group_head: Vec::new(),
            group_next: Vec::new(),
            group_data: Vec::new(),
            ko_point: NO_POINT,
            captures: [0; 2],
        };
        board.resize(size);
        board
    }

    /// Change the board size, reallocating the arrays and clearing the board.
    ///
    /// # Panics
    /// If `size` is outside `MIN_SIZE..=MAX_SIZE`.
    pub fn resize(&mut self, size: usize) {
        assert!(
            (MIN_SIZE..=MAX_SIZE).contains(&size),
            "board size {size} out of range {MIN_SIZE}..={MAX_SIZE}"
        );
        self.size = size;
        self.extended_size = size + 2;
        let points = self.extended_size * self.extended_size;
        self.grid = vec![GridPoint::OffBoard; points];
        self.group_head = vec![NO_POINT; points];
        self.group_next = vec![NO_POINT; points];
        self.group_data = vec![GroupData::default(); points];
        info!("board resized to {size}x{size}");
        self.clear();
    }

    /// Reset to an empty board in place. Komi is kept.
    pub fn clear(&mut self) {
        let ext = self.extended_size;
        for xrow in 0..ext {
            for xcol in 0..ext {
                let border = xcol == 0 || xrow == 0 || xcol == ext - 1 || xrow == ext - 1;
                self.grid[xcol + xrow * ext] = if border {
                    GridPoint::OffBoard
                } else {
                    GridPoint::Empty
                };
            }
        }
        self.group_head.fill(NO_POINT);
        self.group_next.fill(NO_POINT);
        self.group_data.fill(GroupData::default());
        self.ko_point = NO_POINT;
        self.captures = [0; 2];
    }

    // =========================================================================
    // Grid & coordinates
    // =========================================================================

    pub fn size(&self) -> usize {
        self.size
    }

    /// Stones captured so far by `color`.
    pub fn captures(&self, color: Color) -> u32 {
        self.captures[color.index()]
    }

    /// The point the next player may not play on, if any.
    pub fn ko(&self) -> Option<Coord> {
        (self.ko_point != NO_POINT).then(|| self.coord(self.ko_point))
    }

    /// All on-board coordinates, row by row from the bottom.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        let size = self.size;
        (1..=size).flat_map(move |row| (1..=size).map(move |col| Coord::new(col, row)))
    }

    /// Contents of an on-board coordinate; `OffBoard` for anything else.
    pub fn point(&self, coord: Coord) -> GridPoint {
        if !coord.is_within(self.size) {
            return GridPoint::OffBoard;
        }
        self.grid[self.xpoint(coord)]
    }

    /// Liberty count of the group at `coord`, or `None` if there is no stone.
    pub fn liberties(&self, coord: Coord) -> Option<u32> {
        self.group_at(coord).map(|head| self.group_data[head].liberties)
    }

    /// Stone count of the group at `coord`, or `None` if there is no stone.
    pub fn group_size(&self, coord: Coord) -> Option<u32> {
        self.group_at(coord).map(|head| self.group_data[head].stones)
    }

    fn group_at(&self, coord: Coord) -> Option<usize> {
        match self.point(coord) {
            GridPoint::Stone(_) => Some(self.group_head[self.xpoint(coord)]),
            _ => None,
        }
    }

    /// Real coordinates equal extended ones for on-board points.
    #[inline]
    fn xpoint(&self, coord: Coord) -> usize {
        coord.col + coord.row * self.extended_size
    }

    #[inline]
    fn coord(&self, xpoint: usize) -> Coord {
        Coord::new(xpoint % self.extended_size, xpoint / self.extended_size)
    }

    /// The four orthogonal neighbors (S, W, E, N) of an on-board point.
    #[inline]
    fn neighbors(&self, xpoint: usize) -> [usize; 4] {
        let ext = self.extended_size;
        [xpoint - ext, xpoint - 1, xpoint + 1, xpoint + ext]
    }

    /// Whether the point touches any stone of the group headed at `head`.
    fn is_adjacent_to_group(&self, xpoint: usize, head: usize) -> bool {
        self.neighbors(xpoint).into_iter().any(|n| {
            matches!(self.grid[n], GridPoint::Stone(_)) && self.group_head[n] == head
        })
    }

    // =========================================================================
    // Legality
    // =========================================================================

    /// Whether `color` may play `vertex` now.
    ///
    /// Passing is always legal. A stone must go on an empty on-board point
    /// that is not the ko point and must not be suicide.
    pub fn is_legal(&self, color: Color, vertex: Vertex) -> bool {
        let coord = match vertex {
            Vertex::Pass => return true,
            Vertex::Play(coord) => coord,
        };
        if !coord.is_within(self.size) {
            return false;
        }
        let xpoint = self.xpoint(coord);
        if self.grid[xpoint] != GridPoint::Empty || xpoint == self.ko_point {
            return false;
        }
        !self.is_suicide(color, xpoint)
    }

    /// A move is not suicide if it gets a direct liberty, connects to a
    /// friendly group that keeps a liberty, or captures an enemy group.
    fn is_suicide(&self, color: Color, xpoint: usize) -> bool {
        for n in self.neighbors(xpoint) {
            match self.grid[n] {
                GridPoint::Empty => return false,
                GridPoint::Stone(c) => {
                    let libs = self.group_data[self.group_head[n]].liberties;
                    if c == color && libs > 1 {
                        return false;
                    }
                    if c != color && libs == 1 {
                        return false;
                    }
                }
                GridPoint::OffBoard => {}
            }
        }
        true
    }

    // =========================================================================
    // Play
    // =========================================================================

    /// Play a move. Returns `false` and leaves the board untouched if the
    /// move is illegal.
    pub fn play(&mut self, color: Color, vertex: Vertex) -> bool {
        if !self.is_legal(color, vertex) {
            return false;
        }
        match vertex {
            Vertex::Pass => self.ko_point = NO_POINT,
            Vertex::Play(coord) => self.place_stone(color, self.xpoint(coord)),
        }
        true
    }

    /// Place a stone on a point already known to be legal, then merge,
    /// capture and update the ko point.
    fn place_stone(&mut self, color: Color, xpoint: usize) {
        self.grid[xpoint] = GridPoint::Stone(color);
        self.group_head[xpoint] = xpoint;
        self.group_next[xpoint] = xpoint;
        let liberties = self
            .neighbors(xpoint)
            .into_iter()
            .filter(|&n| self.grid[n] == GridPoint::Empty)
            .count() as u32;
        self.group_data[xpoint] = GroupData {
            liberties,
            stones: 1,
        };

        for n in self.neighbors(xpoint) {
            if self.grid[n] != GridPoint::Stone(color) {
                continue;
            }
            let own = self.group_head[xpoint];
            let other = self.group_head[n];
            if own == other {
                continue;
            }
            // The new stone sits on one of the neighbor group's liberties.
            self.group_data[other].liberties -= 1;
            self.merge_groups(own, other);
        }

        let opponent = GridPoint::Stone(color.opponent());
        let mut touched = HeadSet::new();
        let mut captured = 0;
        let mut captured_point = NO_POINT;
        for n in self.neighbors(xpoint) {
            if self.grid[n] != opponent {
                continue;
            }
            let head = self.group_head[n];
            if !touched.insert(head) {
                continue;
            }
            self.group_data[head].liberties -= 1;
            if self.group_data[head].liberties == 0 {
                captured += self.remove_group(head);
                captured_point = n;
            }
        }
        self.captures[color.index()] += captured;

        let own = self.group_data[self.group_head[xpoint]];
        self.ko_point = if captured == 1 && own.stones == 1 && own.liberties == 1 {
            captured_point
        } else {
            NO_POINT
        };
        if captured > 0 {
            debug!(
                "{color} {} captured {captured} stone(s)",
                self.coord(xpoint)
            );
        }

        assert!(
            own.liberties > 0,
            "group at {} has no liberties after a legal move",
            self.coord(xpoint)
        );
    }

    /// Union by size: the smaller group is walked and re-pointed at the
    /// larger group's head.
    ///
    /// Liberty counts of both groups must be current (the point just played
    /// already subtracted). A liberty of the walked group is counted only if
    /// it does not already touch the surviving group, and each member is
    /// re-pointed right after its scan so liberties shared inside the walked
    /// group are counted once.
    fn merge_groups(&mut self, a: usize, b: usize) {
        let (keep, absorb) = if self.group_data[a].stones >= self.group_data[b].stones {
            (a, b)
        } else {
            (b, a)
        };

        let mut liberties = self.group_data[keep].liberties;
        let mut member = absorb;
        loop {
            for n in self.neighbors(member) {
                if self.grid[n] == GridPoint::Empty && !self.is_adjacent_to_group(n, keep) {
                    liberties += 1;
                }
            }
            self.group_head[member] = keep;
            member = self.group_next[member];
            if member == absorb {
                break;
            }
        }

        let absorbed = std::mem::take(&mut self.group_data[absorb]);
        let kept = &mut self.group_data[keep];
        kept.liberties = liberties;
        kept.stones += absorbed.stones;

        // Splice the two circular lists into one.
        self.group_next.swap(keep, absorb);
    }

    /// Remove a whole group, giving each adjacent enemy group one liberty
    /// per freed point. Returns the number of stones removed.
    ///
    /// # Panics
    /// If `head` does not hold a stone.
    fn remove_group(&mut self, head: usize) -> u32 {
        let color = match self.grid[head] {
            GridPoint::Stone(color) => color,
            other => panic!("remove_group at {} which is {other:?}", self.coord(head)),
        };
        let enemy = GridPoint::Stone(color.opponent());
        let expected = self.group_data[head].stones;

        let mut removed = 0;
        let mut member = head;
        loop {
            let next = self.group_next[member];
            let mut touched = HeadSet::new();
            for n in self.neighbors(member) {
                if self.grid[n] == enemy {
                    let enemy_head = self.group_head[n];
                    if touched.insert(enemy_head) {
                        self.group_data[enemy_head].liberties += 1;
                    }
                }
            }
            self.grid[member] = GridPoint::Empty;
            self.group_head[member] = NO_POINT;
            self.group_next[member] = NO_POINT;
            removed += 1;
            member = next;
            if member == head {
                break;
            }
        }
        self.group_data[head] = GroupData::default();

        debug_assert_eq!(removed, expected, "group list and stone count disagree");
        removed
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letters: String = COLUMNS[..self.size]
            .iter()
            .map(|&c| format!(" {}", c as char))
            .collect();
        writeln!(f, "  {letters}")?;
        for row in (1..=self.size).rev() {
            write!(f, "{row:2}")?;
            for col in 1..=self.size {
                let ch = match self.point(Coord::new(col, row)) {
                    GridPoint::Stone(Color::Black) => STONE_BLACK,
                    GridPoint::Stone(Color::White) => STONE_WHITE,
                    _ => EMPTY,
                };
                write!(f, " {ch}")?;
            }
            writeln!(f, " {row}")?;
        }
        writeln!(f, "  {letters}")?;
        write!(
            f,
            "captures: black {} white {}",
            self.captures[Color::Black.index()],
            self.captures[Color::White.index()]
        )?;
        if let Some(ko) = self.ko() {
            write!(f, ", ko {ko}")?;
        }
        Ok(())
    }
}
