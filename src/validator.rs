//! Move legality as pure functions of a board snapshot.
//!
//! Nothing here holds state or refers back to a game or turn: every query
//! takes the board it should look at.

use tracing::trace;

use crate::board::Board;
use crate::moves::{LegalMove, Move, MoveKind};
use crate::types::{Color, Player, Position};

const STEP_OFFSETS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const JUMP_OFFSETS: [(i8, i8); 4] = [(-2, -2), (-2, 2), (2, -2), (2, 2)];

/// Decides whether `mv` is legal for `color` on `board`, including the
/// forced-jump rule. Returns the kind of the move when it is.
pub fn validate_move(board: &Board, mv: &Move, color: Color) -> Option<MoveKind> {
    if mv.color() != color {
        return None;
    }
    let kind = classify(board, mv.start(), mv.end(), color)?;
    if kind == MoveKind::Single && jump_available(board, color) {
        trace!(%mv, "single step refused, a jump is available");
        return None;
    }
    Some(kind)
}

pub fn is_valid_move(board: &Board, mv: &Move, color: Color) -> bool {
    validate_move(board, mv, color).is_some()
}

/// True when any piece of `color` can capture somewhere on the board.
pub fn jump_available(board: &Board, color: Color) -> bool {
    board.pieces(color).any(|(start, _)| {
        destinations(start, &JUMP_OFFSETS)
            .any(|end| classify(board, start, end, color) == Some(MoveKind::Jump))
    })
}

/// True when at least one piece of `color` has a single step or a jump.
pub fn are_moves_available_for_player(board: &Board, player: &Player, color: Color) -> bool {
    let available = board.pieces(color).any(|(start, _)| {
        destinations(start, &STEP_OFFSETS)
            .chain(destinations(start, &JUMP_OFFSETS))
            .any(|end| classify(board, start, end, color).is_some())
    });
    trace!(player = player.name(), %color, available, "checked for remaining moves");
    available
}

/// Every move `color` may legally make right now. When any jump exists only
/// jumps are returned.
pub fn legal_moves(board: &Board, color: Color) -> Vec<LegalMove> {
    let mut moves: Vec<LegalMove> = board
        .pieces(color)
        .flat_map(|(start, _)| {
            destinations(start, &STEP_OFFSETS)
                .chain(destinations(start, &JUMP_OFFSETS))
                .filter_map(move |end| {
                    classify(board, start, end, color).map(|kind| LegalMove { start, end, kind })
                })
        })
        .collect();

    if moves.iter().any(|m| m.kind == MoveKind::Jump) {
        moves.retain(|m| m.kind == MoveKind::Jump);
    }
    moves
}

/// Board-local legality of a relocation, ignoring the forced-jump rule.
fn classify(board: &Board, start: Position, end: Position, color: Color) -> Option<MoveKind> {
    if start == end || !start.in_bounds() || !end.in_bounds() {
        return None;
    }
    let piece = board.piece_at(start)?;
    if piece.color != color || !board.is_open(end) {
        return None;
    }
    if !piece.is_king() && !advances(start, end, color) {
        return None;
    }

    if start.is_diagonally_adjacent(end) {
        return Some(MoveKind::Single);
    }
    let captured = board.piece_at(start.midpoint(end)?)?;
    (captured.color != color).then_some(MoveKind::Jump)
}

fn advances(start: Position, end: Position, color: Color) -> bool {
    if color.forward() < 0 {
        end.row < start.row
    } else {
        end.row > start.row
    }
}

fn destinations(start: Position, offsets: &[(i8, i8)]) -> impl Iterator<Item = Position> + '_ {
    offsets
        .iter()
        .filter_map(move |&(d_row, d_cell)| start.offset(d_row, d_cell))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardBuilder;
    use crate::types::Piece;

    fn white_player() -> Player {
        Player::normal("whitePlayer")
    }

    fn red_player() -> Player {
        Player::normal("redPlayer")
    }

    fn at(row: u8, cell: u8) -> Position {
        Position::new(row, cell)
    }

    fn white_move(start: Position, end: Position) -> Move {
        Move::new(start, end, white_player(), Color::White)
    }

    fn red_move(start: Position, end: Position) -> Move {
        Move::new(start, end, red_player(), Color::Red)
    }

    #[test]
    fn diagonal_move_from_standard_start_is_valid() {
        let board = Board::new();

        assert_eq!(
            validate_move(&board, &white_move(at(2, 1), at(3, 0)), Color::White),
            Some(MoveKind::Single)
        );
    }

    #[test]
    fn rejects_degenerate_and_off_grid_moves() {
        let board = Board::new();

        assert!(!is_valid_move(&board, &white_move(at(2, 1), at(2, 1)), Color::White));
        assert!(!is_valid_move(&board, &white_move(at(2, 1), at(9, 0)), Color::White));
        assert!(!is_valid_move(&board, &white_move(at(8, 1), at(3, 0)), Color::White));
    }

    #[test]
    fn rejects_moving_empty_square_or_opponent_piece() {
        let board = Board::new();

        assert!(!is_valid_move(&board, &white_move(at(3, 0), at(4, 1)), Color::White));
        assert!(!is_valid_move(&board, &white_move(at(5, 0), at(4, 1)), Color::White));
    }

    #[test]
    fn rejects_move_whose_recorded_color_differs() {
        let board = Board::new();

        assert!(!is_valid_move(&board, &red_move(at(5, 0), at(4, 1)), Color::White));
    }

    #[test]
    fn rejects_occupied_destination_and_non_diagonal_geometry() {
        let board = Board::new();

        assert!(!is_valid_move(&board, &white_move(at(1, 0), at(2, 1)), Color::White));
        assert!(!is_valid_move(&board, &white_move(at(2, 1), at(4, 1)), Color::White));
        assert!(!is_valid_move(&board, &white_move(at(2, 1), at(5, 4)), Color::White));
    }

    #[test]
    fn singles_only_move_forward() {
        let board = BoardBuilder::empty()
            .with_piece_at(Piece::single(Color::White), at(4, 1))
            .with_piece_at(Piece::single(Color::Red), at(3, 4))
            .build();

        assert!(!is_valid_move(&board, &white_move(at(4, 1), at(3, 2)), Color::White));
        assert!(is_valid_move(&board, &white_move(at(4, 1), at(5, 2)), Color::White));
        assert!(is_valid_move(&board, &red_move(at(3, 4), at(2, 5)), Color::Red));
        assert!(!is_valid_move(&board, &red_move(at(3, 4), at(4, 5)), Color::Red));
    }

    #[test]
    fn kings_move_backwards() {
        let board = BoardBuilder::empty()
            .with_piece_at(Piece::king(Color::White), at(4, 1))
            .build();

        assert!(is_valid_move(&board, &white_move(at(4, 1), at(3, 2)), Color::White));
        assert!(is_valid_move(&board, &white_move(at(4, 1), at(5, 0)), Color::White));
    }

    #[test]
    fn jump_needs_an_opposing_piece_in_the_middle() {
        let board = BoardBuilder::empty()
            .with_piece_at(Piece::single(Color::White), at(2, 1))
            .with_piece_at(Piece::single(Color::Red), at(3, 2))
            .with_piece_at(Piece::single(Color::White), at(2, 5))
            .with_piece_at(Piece::single(Color::White), at(3, 6))
            .build();

        assert_eq!(
            validate_move(&board, &white_move(at(2, 1), at(4, 3)), Color::White),
            Some(MoveKind::Jump)
        );
        assert!(!is_valid_move(&board, &white_move(at(2, 5), at(4, 7)), Color::White));
        assert!(!is_valid_move(&board, &white_move(at(2, 1), at(4, 5)), Color::White));
    }

    #[test]
    fn available_jump_blocks_every_single_step() {
        // red has stepped to (2, 1); white at (1, 0) and (1, 2) can capture it
        let board = BoardBuilder::empty()
            .with_piece_at(Piece::single(Color::White), at(1, 0))
            .with_piece_at(Piece::single(Color::White), at(1, 2))
            .with_piece_at(Piece::single(Color::White), at(0, 3))
            .with_piece_at(Piece::single(Color::Red), at(2, 1))
            .build();

        assert!(jump_available(&board, Color::White));
        assert!(!is_valid_move(&board, &white_move(at(0, 3), at(1, 4)), Color::White));
        assert!(!is_valid_move(&board, &white_move(at(1, 2), at(2, 3)), Color::White));
        assert!(is_valid_move(&board, &white_move(at(1, 0), at(3, 2)), Color::White));
        assert!(is_valid_move(&board, &white_move(at(1, 2), at(3, 0)), Color::White));
    }

    #[test]
    fn forced_jump_is_evaluated_per_color() {
        let board = BoardBuilder::empty()
            .with_piece_at(Piece::single(Color::White), at(1, 0))
            .with_piece_at(Piece::single(Color::White), at(2, 1))
            .with_piece_at(Piece::single(Color::Red), at(3, 2))
            .with_piece_at(Piece::single(Color::Red), at(6, 5))
            .build();

        assert!(jump_available(&board, Color::White));
        assert!(!jump_available(&board, Color::Red));
        assert!(is_valid_move(&board, &red_move(at(6, 5), at(5, 4)), Color::Red));
    }

    #[test]
    fn no_moves_when_pieces_are_blocked_or_absent() {
        let blocked = BoardBuilder::empty()
            .with_piece_at(Piece::single(Color::Red), at(7, 0))
            .with_piece_at(Piece::single(Color::White), at(6, 1))
            .with_piece_at(Piece::single(Color::White), at(5, 2))
            .build();

        assert!(!are_moves_available_for_player(&blocked, &red_player(), Color::Red));
        assert!(are_moves_available_for_player(&blocked, &white_player(), Color::White));

        let only_red = BoardBuilder::empty()
            .with_piece_at(Piece::single(Color::Red), at(1, 0))
            .build();
        assert!(!are_moves_available_for_player(&only_red, &white_player(), Color::White));
    }

    #[test]
    fn legal_moves_from_standard_start() {
        let moves = legal_moves(&Board::new(), Color::Red);

        assert_eq!(moves.len(), 7);
        assert!(moves.iter().all(|m| m.kind == MoveKind::Single));
        assert!(moves.iter().all(|m| m.start.row == 5 && m.end.row == 4));
    }

    #[test]
    fn legal_moves_only_offer_jumps_when_one_exists() {
        let board = BoardBuilder::empty()
            .with_piece_at(Piece::single(Color::White), at(2, 1))
            .with_piece_at(Piece::single(Color::Red), at(3, 2))
            .with_piece_at(Piece::single(Color::White), at(0, 5))
            .build();

        let moves = legal_moves(&board, Color::White);

        assert_eq!(
            moves,
            vec![LegalMove {
                start: at(2, 1),
                end: at(4, 3),
                kind: MoveKind::Jump
            }]
        );
    }
}
