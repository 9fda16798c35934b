use serde::Serialize;
use tracing::debug;

use crate::board::Board;
use crate::moves::{LegalMove, Move, MoveKind};
use crate::types::{Color, Player};
use crate::validator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TurnState {
    Empty,
    Stable,
    Submitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Snapshot {
    board: Board,
    kind: MoveKind,
}

/// The moves one player is assembling before handing them to the game.
///
/// Each accepted move pushes a fresh board snapshot; backing up pops it. The
/// start-of-turn board is never touched, so abandoning the turn is free.
#[derive(Debug, Clone)]
pub struct Turn {
    player: Player,
    color: Color,
    start: Board,
    snapshots: Vec<Snapshot>,
    submitted: bool,
}

impl Turn {
    pub fn new(board: Board, player: Player, color: Color) -> Self {
        debug!(player = player.name(), %color, "turn started");
        Self {
            player,
            color,
            start: board,
            snapshots: Vec::new(),
            submitted: false,
        }
    }

    /// Checks `mv` against the latest snapshot and, when legal, records it.
    ///
    /// Refused when the turn is submitted, when `mv` belongs to someone else,
    /// after a single step (it always ends the sequence), for a single step
    /// after a capture, and whenever the validator says no.
    pub fn validate_move(&mut self, mv: &Move) -> bool {
        if self.submitted || mv.player() != &self.player || self.is_closed() {
            return false;
        }

        let latest = *self.latest_board();
        let Some(kind) = validator::validate_move(&latest, mv, self.color) else {
            debug!(player = self.player.name(), %mv, "move rejected");
            return false;
        };
        if kind == MoveKind::Single && self.has_jumped() {
            debug!(player = self.player.name(), %mv, "single step after a capture rejected");
            return false;
        }

        let mut next = latest;
        let applied = match kind {
            MoveKind::Single => next.move_piece(mv.start(), mv.end()),
            MoveKind::Jump => next.jump_piece(mv.start(), mv.end()),
        };
        if !applied {
            return false;
        }

        self.snapshots.push(Snapshot { board: next, kind });
        debug!(
            player = self.player.name(),
            %mv,
            ?kind,
            moves = self.snapshots.len(),
            "move accepted"
        );
        true
    }

    /// Drops the most recent move. False when there is nothing to undo.
    pub fn backup_move(&mut self) -> bool {
        if self.submitted {
            return false;
        }
        match self.snapshots.pop() {
            Some(undone) => {
                debug!(
                    player = self.player.name(),
                    kind = ?undone.kind,
                    moves = self.snapshots.len(),
                    "move backed up"
                );
                true
            }
            None => false,
        }
    }

    pub fn state(&self) -> TurnState {
        if self.submitted {
            TurnState::Submitted
        } else if self.snapshots.is_empty() {
            TurnState::Empty
        } else {
            TurnState::Stable
        }
    }

    pub fn is_stable(&self) -> bool {
        self.state() == TurnState::Stable
    }

    pub fn can_resign(&self) -> bool {
        self.state() == TurnState::Empty
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn is_my_turn(&self, player: &Player) -> bool {
        &self.player == player
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn move_count(&self) -> usize {
        self.snapshots.len()
    }

    pub fn start_board(&self) -> &Board {
        &self.start
    }

    /// The start-of-turn board with every accepted move applied.
    pub fn latest_board(&self) -> &Board {
        self.snapshots
            .last()
            .map_or(&self.start, |snapshot| &snapshot.board)
    }

    /// What the player may still add to this turn from the latest snapshot.
    pub fn legal_moves(&self) -> Vec<LegalMove> {
        if self.submitted || self.is_closed() {
            return Vec::new();
        }
        let mut moves = validator::legal_moves(self.latest_board(), self.color);
        if self.has_jumped() {
            moves.retain(|m| m.kind == MoveKind::Jump);
        }
        moves
    }

    pub(crate) fn mark_submitted(&mut self) {
        self.submitted = true;
    }

    /// A single step ends the move sequence until it is backed up.
    fn is_closed(&self) -> bool {
        self.snapshots
            .last()
            .is_some_and(|snapshot| snapshot.kind == MoveKind::Single)
    }

    fn has_jumped(&self) -> bool {
        self.snapshots
            .iter()
            .any(|snapshot| snapshot.kind == MoveKind::Jump)
    }
}
