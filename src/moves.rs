use std::fmt;

use serde::Serialize;

use crate::types::{Color, Player, Position};

/// How a legal move relocates its piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveKind {
    Single,
    Jump,
}

/// A candidate relocation submitted by a player. Immutable once built;
/// legality is decided by [`crate::validator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    start: Position,
    end: Position,
    player: Player,
    color: Color,
}

impl Move {
    pub fn new(start: Position, end: Position, player: Player, color: Color) -> Self {
        Self {
            start,
            end,
            player,
            color,
        }
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Geometry only: one diagonal step.
    pub fn is_single_move_attempt(&self) -> bool {
        self.start.is_diagonally_adjacent(self.end)
    }

    /// Geometry only: two diagonal steps. Whether something is captured
    /// depends on the board.
    pub fn is_jump_move_attempt(&self) -> bool {
        self.start.is_jump_adjacent(self.end)
    }

    pub fn midpoint(&self) -> Option<Position> {
        self.start.midpoint(self.end)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {}", self.color, self.start, self.end)
    }
}

/// A destination reachable from a square, as offered to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LegalMove {
    pub start: Position,
    pub end: Position,
    pub kind: MoveKind,
}
