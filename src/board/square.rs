//! Board squares and square sets.
//!
//! A square is a `(row, col)` pair on the fixed 8x8 grid. Row 0 is the
//! enemy's home rank, row 7 the player's. `SquareSet` is a 64-bit board
//! mask used for zones of control.

use std::fmt;
use std::str::FromStr;

/// Number of rows and columns on the board.
pub const BOARD_SIZE: u8 = 8;

/// Total number of squares on the board.
pub const SQUARE_COUNT: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    /// Creates a square, returning None when it falls off the board.
    pub const fn new(row: u8, col: u8) -> Option<Square> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Square { row, col })
        } else {
            None
        }
    }

    /// Returns the square displaced by `(dr, dc)`, clipped to the board.
    pub fn offset(self, dr: i8, dc: i8) -> Option<Square> {
        let row = i16::from(self.row) + i16::from(dr);
        let col = i16::from(self.col) + i16::from(dc);
        if (0..i16::from(BOARD_SIZE)).contains(&row) && (0..i16::from(BOARD_SIZE)).contains(&col) {
            Some(Square { row: row as u8, col: col as u8 })
        } else {
            None
        }
    }

    /// Chebyshev (king-move) distance between two squares.
    pub fn chebyshev(self, other: Square) -> u8 {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }

    /// Dense index in `0..SQUARE_COUNT`, row-major.
    pub const fn index(self) -> usize {
        (self.row as usize) * (BOARD_SIZE as usize) + self.col as usize
    }

    /// Inverse of [`Square::index`].
    pub const fn from_index(idx: usize) -> Square {
        Square {
            row: (idx / BOARD_SIZE as usize) as u8,
            col: (idx % BOARD_SIZE as usize) as u8,
        }
    }

    /// Iterates all 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..SQUARE_COUNT).map(Square::from_index)
    }
}

/// Squares are keyed as `r,c`, the same form the save blob uses.
impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl FromStr for Square {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (r, c) = s.trim().split_once(',').ok_or(())?;
        let row = r.trim().parse::<u8>().map_err(|_| ())?;
        let col = c.trim().parse::<u8>().map_err(|_| ())?;
        Square::new(row, col).ok_or(())
    }
}

/// A set of squares stored as a 64-bit mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SquareSet(u64);

impl SquareSet {
    pub const EMPTY: SquareSet = SquareSet(0);

    /// Adds a square. Adding twice is a no-op.
    pub fn insert(&mut self, sq: Square) {
        self.0 |= 1u64 << sq.index();
    }

    /// Adds the square if the displacement stays on the board.
    pub fn insert_offset(&mut self, from: Square, dr: i8, dc: i8) {
        if let Some(sq) = from.offset(dr, dc) {
            self.insert(sq);
        }
    }

    pub fn contains(self, sq: Square) -> bool {
        self.0 & (1u64 << sq.index()) != 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates the member squares in row-major order.
    pub fn iter(self) -> impl Iterator<Item = Square> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let idx = bits.trailing_zeros() as usize;
            bits &= bits - 1;
            Some(Square::from_index(idx))
        })
    }
}
