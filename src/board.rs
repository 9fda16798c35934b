use std::fmt;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::types::{BOARD_SIZE, Color, Piece, Position};

const WHITE_BORDER_ROW: usize = 2;
const RED_BORDER_ROW: usize = 5;

static STANDARD_BOARD: Lazy<Board> = Lazy::new(|| {
    let mut board = Board::empty();
    for pos in playable_positions() {
        let row = pos.row as usize;
        let color = if row <= WHITE_BORDER_ROW {
            Color::White
        } else if row >= RED_BORDER_ROW {
            Color::Red
        } else {
            continue;
        };
        board.spaces[row][pos.cell as usize].add_piece(Piece::single(color));
    }
    board
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpaceState {
    Invalid,
    Open,
    Occupied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Invalid,
    Open,
    Occupied(Piece),
}

/// One cell of the grid. The piece lives inside the occupied variant, so
/// `Occupied` and "has a piece" can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Space {
    cell: u8,
    slot: Slot,
}

impl Space {
    pub fn invalid(cell: u8) -> Self {
        Self {
            cell,
            slot: Slot::Invalid,
        }
    }

    pub fn open(cell: u8) -> Self {
        Self {
            cell,
            slot: Slot::Open,
        }
    }

    pub fn with_piece(cell: u8, piece: Piece) -> Self {
        Self {
            cell,
            slot: Slot::Occupied(piece),
        }
    }

    pub fn cell_idx(&self) -> u8 {
        self.cell
    }

    pub fn state(&self) -> SpaceState {
        match self.slot {
            Slot::Invalid => SpaceState::Invalid,
            Slot::Open => SpaceState::Open,
            Slot::Occupied(_) => SpaceState::Occupied,
        }
    }

    pub fn piece(&self) -> Option<Piece> {
        match self.slot {
            Slot::Occupied(piece) => Some(piece),
            _ => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_open()
    }

    pub fn is_open(&self) -> bool {
        self.slot == Slot::Open
    }

    pub fn is_occupied(&self) -> bool {
        matches!(self.slot, Slot::Occupied(_))
    }

    /// Puts a piece on an open space. Invalid and occupied spaces are left
    /// untouched. Returns the resulting state.
    pub fn add_piece(&mut self, piece: Piece) -> SpaceState {
        if self.slot == Slot::Open {
            self.slot = Slot::Occupied(piece);
        }
        self.state()
    }

    /// Clears the space. A no-op on invalid spaces. Returns the resulting state.
    pub fn remove_piece(&mut self) -> SpaceState {
        self.take_piece();
        self.state()
    }

    fn take_piece(&mut self) -> Option<Piece> {
        match self.slot {
            Slot::Occupied(piece) => {
                self.slot = Slot::Open;
                Some(piece)
            }
            _ => None,
        }
    }

    /// Moves the piece on `source` onto this space.
    /// Fails without changes when `source` is empty or this space is not open.
    pub fn move_piece_from(&mut self, source: &mut Space) -> bool {
        if !self.is_open() || !source.is_occupied() {
            return false;
        }
        match source.take_piece() {
            Some(piece) => {
                self.slot = Slot::Occupied(piece);
                true
            }
            None => false,
        }
    }

    /// Like [`Space::move_piece_from`], also clearing the captured space.
    pub fn jump_piece_move(&mut self, source: &mut Space, captured: &mut Space) -> bool {
        if !captured.is_occupied() {
            return false;
        }
        if !self.move_piece_from(source) {
            return false;
        }
        captured.remove_piece();
        true
    }

    fn code(&self) -> u8 {
        use crate::types::PieceType::{King, Single};
        match self.slot {
            Slot::Invalid => 0,
            Slot::Open => 1,
            Slot::Occupied(piece) => match (piece.color, piece.piece_type) {
                (Color::Red, Single) => 2,
                (Color::Red, King) => 3,
                (Color::White, Single) => 4,
                (Color::White, King) => 5,
            },
        }
    }
}

/// The 8x8 grid, indexed `[row][cell]`. A plain value: cloning a board yields
/// an independent snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    spaces: [[Space; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// The standard starting layout: white on rows 0-2, red on rows 5-7.
    pub fn new() -> Self {
        *STANDARD_BOARD
    }

    /// All playable squares open, light squares invalid.
    pub fn empty() -> Self {
        let mut spaces = [[Space::invalid(0); BOARD_SIZE]; BOARD_SIZE];
        for (row, line) in spaces.iter_mut().enumerate() {
            for (cell, space) in line.iter_mut().enumerate() {
                let pos = Position::new(row as u8, cell as u8);
                *space = if pos.is_playable() {
                    Space::open(cell as u8)
                } else {
                    Space::invalid(cell as u8)
                };
            }
        }
        Self { spaces }
    }

    pub fn space(&self, pos: Position) -> Option<&Space> {
        if !pos.in_bounds() {
            return None;
        }
        Some(&self.spaces[pos.row as usize][pos.cell as usize])
    }

    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        self.space(pos).and_then(Space::piece)
    }

    pub fn is_open(&self, pos: Position) -> bool {
        self.space(pos).is_some_and(Space::is_open)
    }

    pub fn rows(&self) -> &[[Space; BOARD_SIZE]; BOARD_SIZE] {
        &self.spaces
    }

    /// Every piece of `color` with its position, in row-major order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        playable_positions().filter_map(move |pos| {
            self.piece_at(pos)
                .filter(|piece| piece.color == color)
                .map(|piece| (pos, piece))
        })
    }

    pub fn piece_count(&self, color: Color) -> u8 {
        self.pieces(color).count() as u8
    }

    /// Relocates a piece one space. Returns false with the board unchanged
    /// when either position is off the grid or the move is impossible.
    pub fn move_piece(&mut self, start: Position, end: Position) -> bool {
        if !start.in_bounds() || !end.in_bounds() || start == end {
            return false;
        }
        let mut source = self.spaces[start.row as usize][start.cell as usize];
        let mut target = self.spaces[end.row as usize][end.cell as usize];
        if !target.move_piece_from(&mut source) {
            return false;
        }
        self.spaces[start.row as usize][start.cell as usize] = source;
        self.spaces[end.row as usize][end.cell as usize] = target;
        true
    }

    /// Relocates a piece two spaces and removes the piece it jumped over.
    pub fn jump_piece(&mut self, start: Position, end: Position) -> bool {
        if !start.in_bounds() || !end.in_bounds() {
            return false;
        }
        let Some(mid) = start.midpoint(end) else {
            return false;
        };
        let mut source = self.spaces[start.row as usize][start.cell as usize];
        let mut target = self.spaces[end.row as usize][end.cell as usize];
        let mut captured = self.spaces[mid.row as usize][mid.cell as usize];
        if !target.jump_piece_move(&mut source, &mut captured) {
            return false;
        }
        self.spaces[start.row as usize][start.cell as usize] = source;
        self.spaces[end.row as usize][end.cell as usize] = target;
        self.spaces[mid.row as usize][mid.cell as usize] = captured;
        true
    }

    /// Kings every single sitting on its promotion row.
    /// Returns the positions that were promoted.
    pub fn promote_kings(&mut self) -> Vec<Position> {
        let mut promoted = Vec::new();
        for color in [Color::Red, Color::White] {
            let row = color.promotion_row() as usize;
            for space in self.spaces[row].iter_mut() {
                if let Some(piece) = space.piece()
                    && piece.color == color
                    && !piece.is_king()
                {
                    space.slot = Slot::Occupied(piece.kinged());
                    promoted.push(Position::new(row as u8, space.cell));
                }
            }
        }
        promoted
    }

    /// Flattens the grid to 64 cell codes (see [`crate::types::GameView`]).
    pub fn to_array(&self) -> [u8; BOARD_SIZE * BOARD_SIZE] {
        let mut cells = [0u8; BOARD_SIZE * BOARD_SIZE];
        for (idx, cell) in cells.iter_mut().enumerate() {
            *cell = self.spaces[idx / BOARD_SIZE][idx % BOARD_SIZE].code();
        }
        cells
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.spaces {
            for space in line {
                let ch = match space.code() {
                    0 => ' ',
                    1 => '.',
                    2 => 'r',
                    3 => 'R',
                    4 => 'w',
                    _ => 'W',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Builds standard or custom layouts by placing pieces one at a time.
#[derive(Debug, Clone)]
pub struct BoardBuilder {
    board: Board,
}

impl BoardBuilder {
    pub fn empty() -> Self {
        Self {
            board: Board::empty(),
        }
    }

    pub fn standard() -> Self {
        Self {
            board: Board::new(),
        }
    }

    /// Places `piece` at `pos`, replacing any piece already there.
    /// Ignored for light squares and off-grid positions.
    pub fn with_piece_at(mut self, piece: Piece, pos: Position) -> Self {
        if pos.in_bounds() {
            let space = &mut self.board.spaces[pos.row as usize][pos.cell as usize];
            space.remove_piece();
            space.add_piece(piece);
        }
        self
    }

    pub fn build(self) -> Board {
        self.board
    }
}

fn playable_positions() -> impl Iterator<Item = Position> {
    (0..BOARD_SIZE as u8)
        .flat_map(|row| (0..BOARD_SIZE as u8).map(move |cell| Position::new(row, cell)))
        .filter(Position::is_playable)
}
