use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::turn::TurnState;

pub const BOARD_SIZE: usize = 8;

/// A board coordinate, `row` and `cell` both in `0..8` when on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub cell: u8,
}

impl Position {
    pub const fn new(row: u8, cell: u8) -> Self {
        Self { row, cell }
    }

    pub fn in_bounds(&self) -> bool {
        (self.row as usize) < BOARD_SIZE && (self.cell as usize) < BOARD_SIZE
    }

    /// Playable (dark) squares are the ones where `row + cell` is odd.
    pub fn is_playable(&self) -> bool {
        self.in_bounds() && (self.row + self.cell) % 2 == 1
    }

    pub fn is_diagonally_adjacent(&self, other: Position) -> bool {
        self.row.abs_diff(other.row) == 1 && self.cell.abs_diff(other.cell) == 1
    }

    pub fn is_jump_adjacent(&self, other: Position) -> bool {
        self.row.abs_diff(other.row) == 2 && self.cell.abs_diff(other.cell) == 2
    }

    /// The square jumped over between two jump-adjacent positions.
    pub fn midpoint(&self, other: Position) -> Option<Position> {
        if !self.is_jump_adjacent(other) {
            return None;
        }
        Some(Position::new(
            self.row.min(other.row) + 1,
            self.cell.min(other.cell) + 1,
        ))
    }

    /// Shifts by a signed delta, `None` when the result leaves the grid.
    pub fn offset(&self, d_row: i8, d_cell: i8) -> Option<Position> {
        let row = self.row.checked_add_signed(d_row)?;
        let cell = self.cell.checked_add_signed(d_cell)?;
        let pos = Position::new(row, cell);
        pos.in_bounds().then_some(pos)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.cell)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    White,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::Red => Color::White,
            Color::White => Color::Red,
        }
    }

    /// Row delta of a forward step: red advances toward row 0, white toward row 7.
    pub fn forward(self) -> i8 {
        match self {
            Color::Red => -1,
            Color::White => 1,
        }
    }

    /// The opponent's back rank, where this color's singles are kinged.
    pub fn promotion_row(self) -> u8 {
        match self {
            Color::Red => 0,
            Color::White => (BOARD_SIZE - 1) as u8,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => f.write_str("red"),
            Color::White => f.write_str("white"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceType {
    Single,
    King,
}

/// A checkers piece. Plain value: copying never aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
}

impl Piece {
    pub const fn new(piece_type: PieceType, color: Color) -> Self {
        Self { piece_type, color }
    }

    pub const fn single(color: Color) -> Self {
        Self::new(PieceType::Single, color)
    }

    pub const fn king(color: Color) -> Self {
        Self::new(PieceType::King, color)
    }

    pub fn is_king(&self) -> bool {
        self.piece_type == PieceType::King
    }

    pub fn kinged(self) -> Self {
        Self::king(self.color)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerMode {
    Normal,
    Tournament,
}

/// A participant as handed to the engine by the lobby.
/// Identity is the name: two players are equal when their names are.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    name: String,
    mode: PlayerMode,
    wins: u32,
}

impl Player {
    pub fn new(name: impl Into<String>, mode: PlayerMode) -> Self {
        Self {
            name: name.into(),
            mode,
            wins: 0,
        }
    }

    pub fn normal(name: impl Into<String>) -> Self {
        Self::new(name, PlayerMode::Normal)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> PlayerMode {
        self.mode
    }

    pub fn is_tournament(&self) -> bool {
        self.mode == PlayerMode::Tournament
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub fn record_win(&mut self) {
        self.wins += 1;
    }
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Player {}

impl Hash for Player {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// Lifecycle of a game. `Won` and `Resigned` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameState {
    InPlay,
    Won,
    Resigned,
}

/// Read-only snapshot of a game handed to renderers.
///
/// `board` holds 64 cells in row-major order:
/// 0=invalid, 1=open, 2=red single, 3=red king, 4=white single, 5=white king.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameView {
    pub board: Vec<u8>,
    /// The active turn's latest snapshot, present once it holds a move.
    pub pending_board: Option<Vec<u8>>,
    pub red_player: String,
    pub white_player: String,
    pub active_player: String,
    pub active_color: Color,
    pub state: GameState,
    pub winner: Option<String>,
    pub turn_state: Option<TurnState>,
    pub can_resign: bool,
    pub red_count: u8,
    pub white_count: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playable_squares_alternate_by_parity() {
        assert!(!Position::new(0, 0).is_playable());
        assert!(Position::new(0, 1).is_playable());
        assert!(Position::new(1, 0).is_playable());
        assert!(!Position::new(7, 7).is_playable());
        assert!(!Position::new(8, 1).is_playable());
    }

    #[test]
    fn midpoint_only_exists_for_jump_geometry() {
        let start = Position::new(2, 1);

        assert_eq!(start.midpoint(Position::new(4, 3)), Some(Position::new(3, 2)));
        assert_eq!(start.midpoint(Position::new(0, 3)), Some(Position::new(1, 2)));
        assert_eq!(start.midpoint(Position::new(3, 2)), None);
        assert_eq!(start.midpoint(Position::new(4, 1)), None);
    }

    #[test]
    fn offset_stays_on_grid() {
        let corner = Position::new(0, 1);

        assert_eq!(corner.offset(-1, 1), None);
        assert_eq!(corner.offset(1, -1), Some(Position::new(1, 0)));
        assert_eq!(Position::new(7, 6).offset(1, 1), None);
    }

    #[test]
    fn players_are_equal_by_name_only() {
        let mut a = Player::new("ada", PlayerMode::Normal);
        let b = Player::new("ada", PlayerMode::Tournament);
        a.record_win();

        assert_eq!(a, b);
        assert_ne!(a, Player::normal("grace"));
        assert_eq!(a.wins(), 1);
        assert!(b.is_tournament());
    }

    #[test]
    fn colors_advance_toward_opposite_back_rank() {
        assert_eq!(Color::Red.forward(), -1);
        assert_eq!(Color::Red.promotion_row(), 0);
        assert_eq!(Color::White.forward(), 1);
        assert_eq!(Color::White.promotion_row(), 7);
        assert_eq!(Color::Red.opponent(), Color::White);
    }
}
