//! Unit kinds, sides, and positioned units.
//!
//! Pieces borrow chess names but not chess movement: a kind only decides
//! the unit's zone of control and its base power when committed.

use super::square::Square;

/// The kind of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

pub const ALL_KINDS: [UnitKind; 6] = [
    UnitKind::King,
    UnitKind::Queen,
    UnitKind::Rook,
    UnitKind::Bishop,
    UnitKind::Knight,
    UnitKind::Pawn,
];

impl UnitKind {
    /// Base attack power when this kind is committed.
    ///
    /// Kings have no entry: a king cannot be committed.
    pub const fn base_power(self) -> Option<i32> {
        match self {
            UnitKind::Queen => Some(4),
            UnitKind::Rook => Some(3),
            UnitKind::Knight => Some(3),
            UnitKind::Bishop => Some(2),
            UnitKind::Pawn => Some(1),
            UnitKind::King => None,
        }
    }

    /// Returns the lowercase name used in commands and save files.
    pub const fn name(self) -> &'static str {
        match self {
            UnitKind::King => "king",
            UnitKind::Queen => "queen",
            UnitKind::Rook => "rook",
            UnitKind::Bishop => "bishop",
            UnitKind::Knight => "knight",
            UnitKind::Pawn => "pawn",
        }
    }

    /// Parses a kind from its lowercase name.
    pub fn from_name(s: &str) -> Option<UnitKind> {
        ALL_KINDS.iter().copied().find(|k| k.name() == s)
    }

    /// Returns the board glyph, uppercase for the player and lowercase for the enemy.
    pub const fn glyph(self, side: Side) -> char {
        let c = match self {
            UnitKind::King => 'K',
            UnitKind::Queen => 'Q',
            UnitKind::Rook => 'R',
            UnitKind::Bishop => 'B',
            UnitKind::Knight => 'N',
            UnitKind::Pawn => 'P',
        };
        match side {
            Side::Player => c,
            Side::Enemy => c.to_ascii_lowercase(),
        }
    }
}

/// One of the two opposing sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub const fn name(self) -> &'static str {
        match self {
            Side::Player => "player",
            Side::Enemy => "enemy",
        }
    }

    pub fn from_name(s: &str) -> Option<Side> {
        match s {
            "player" => Some(Side::Player),
            "enemy" => Some(Side::Enemy),
            _ => None,
        }
    }
}

/// A unit on the board. Its side is the roster that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Unit {
    pub kind: UnitKind,
    pub square: Square,
}

impl Unit {
    pub const fn new(kind: UnitKind, square: Square) -> Self {
        Unit { kind, square }
    }
}

/// A decoy: occupies a square for show and has no combat value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Decoy {
    pub square: Square,
}

/// The ordered units of one side.
///
/// Two units may share a square; nothing here prevents it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    pub side: Side,
    pub units: Vec<Unit>,
}

impl Roster {
    /// Creates an empty roster for a side.
    pub fn new(side: Side) -> Self {
        Roster { side, units: Vec::new() }
    }

    /// Creates a roster from a list of units.
    pub fn with_units(side: Side, units: Vec<Unit>) -> Self {
        Roster { side, units }
    }

    pub fn push(&mut self, unit: Unit) {
        self.units.push(unit);
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Returns the first unit standing on a square.
    pub fn at(&self, sq: Square) -> Option<&Unit> {
        self.units.iter().find(|u| u.square == sq)
    }

    /// Returns the first unit standing on a square, mutably.
    pub fn at_mut(&mut self, sq: Square) -> Option<&mut Unit> {
        self.units.iter_mut().find(|u| u.square == sq)
    }

    /// Board glyph of the first unit on a square, cased for this roster's side.
    pub fn glyph_at(&self, sq: Square) -> Option<char> {
        self.at(sq).map(|u| u.kind.glyph(self.side))
    }

    /// Returns true if any unit occupies the square.
    pub fn occupies(&self, sq: Square) -> bool {
        self.at(sq).is_some()
    }

    /// Removes the first unit on a square and returns it.
    pub fn remove_at(&mut self, sq: Square) -> Option<Unit> {
        let idx = self.units.iter().position(|u| u.square == sq)?;
        Some(self.units.remove(idx))
    }

    /// Returns the first unit of the given kind.
    pub fn find_kind(&self, kind: UnitKind) -> Option<&Unit> {
        self.units.iter().find(|u| u.kind == kind)
    }

    pub fn has_king(&self) -> bool {
        self.find_kind(UnitKind::King).is_some()
    }
}
