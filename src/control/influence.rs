//! Zone of control and influence tallies.
//!
//! Every unit projects influence over a set of squares determined by its
//! kind. Summing those sets per side gives a per-square tally, which is
//! then classified into player, enemy, contested, or uncontrolled.
//!
//! The tally is always recomputed from the rosters. The board is 64
//! squares, so there is nothing worth caching.

use crate::board::{Square, SquareSet, Unit, UnitKind, BOARD_SIZE, SQUARE_COUNT};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// Control classification of a single square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlStatus {
    Player,
    Enemy,
    Contested,
    Uncontrolled,
}

impl ControlStatus {
    pub const fn name(self) -> &'static str {
        match self {
            ControlStatus::Player => "player",
            ControlStatus::Enemy => "enemy",
            ControlStatus::Contested => "contested",
            ControlStatus::Uncontrolled => "none",
        }
    }
}

/// Number of units from each side projecting influence onto a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Control {
    pub player: u32,
    pub enemy: u32,
}

impl Control {
    pub const fn status(self) -> ControlStatus {
        match (self.player > 0, self.enemy > 0) {
            (true, true) => ControlStatus::Contested,
            (true, false) => ControlStatus::Player,
            (false, true) => ControlStatus::Enemy,
            (false, false) => ControlStatus::Uncontrolled,
        }
    }
}

/// Per-square influence tally, indexed by `Square::index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfluenceMap {
    cells: [Control; SQUARE_COUNT],
}

impl InfluenceMap {
    pub fn empty() -> Self {
        InfluenceMap { cells: [Control::default(); SQUARE_COUNT] }
    }

    pub fn get(&self, sq: Square) -> Control {
        self.cells[sq.index()]
    }

    pub fn status(&self, sq: Square) -> ControlStatus {
        self.get(sq).status()
    }

    /// Iterates `(square, control)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Control)> + '_ {
        self.cells.iter().enumerate().map(|(i, c)| (Square::from_index(i), *c))
    }
}

/// Returns the squares a unit of `kind` standing on `from` influences.
///
/// - king, pawn: the 8 neighbours
/// - queen: everything within Chebyshev distance 2
/// - rook: its full row and column, including its own square
/// - bishop: both full diagonals, including its own square
/// - knight: the 8 knight jumps
pub fn zone_of_control(kind: UnitKind, from: Square) -> SquareSet {
    let mut set = SquareSet::EMPTY;
    match kind {
        UnitKind::King | UnitKind::Pawn => ring(&mut set, from, 1),
        UnitKind::Queen => ring(&mut set, from, 2),
        UnitKind::Rook => {
            for i in 0..BOARD_SIZE {
                set.insert(Square { row: from.row, col: i });
                set.insert(Square { row: i, col: from.col });
            }
        }
        UnitKind::Bishop => {
            let n = BOARD_SIZE as i8;
            for i in -(n - 1)..n {
                set.insert_offset(from, i, i);
                set.insert_offset(from, i, -i);
            }
        }
        UnitKind::Knight => {
            for (dr, dc) in KNIGHT_OFFSETS {
                set.insert_offset(from, dr, dc);
            }
        }
    }
    set
}

/// All squares within `radius` of `from`, excluding `from` itself.
fn ring(set: &mut SquareSet, from: Square, radius: i8) {
    for dr in -radius..=radius {
        for dc in -radius..=radius {
            if dr != 0 || dc != 0 {
                set.insert_offset(from, dr, dc);
            }
        }
    }
}

/// Computes the influence tally for a pair of rosters.
///
/// Units of the same side stack: each adds one to every square in its zone.
pub fn compute_influence(player: &[Unit], enemy: &[Unit]) -> InfluenceMap {
    let mut map = InfluenceMap::empty();
    for unit in player {
        for sq in zone_of_control(unit.kind, unit.square).iter() {
            map.cells[sq.index()].player += 1;
        }
    }
    for unit in enemy {
        for sq in zone_of_control(unit.kind, unit.square).iter() {
            map.cells[sq.index()].enemy += 1;
        }
    }
    map
}
