use tracing::{debug, info};

use crate::board::Board;
use crate::error::GameError;
use crate::moves::{LegalMove, Move};
use crate::scenario::Scenario;
use crate::turn::Turn;
use crate::types::{Color, GameState, GameView, Player, Position};
use crate::validator;

/// Something that happened to a game, reported to its observer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    TurnSubmitted { color: Color, moves: usize },
    PiecePromoted { color: Color, position: Position },
    Won { winner: Color },
    Resigned { color: Color },
}

pub trait GameObserver: Send + Sync {
    /// Called synchronously, after the game has already changed.
    fn on_event(&self, event: &GameEvent);
}

/// One match between a red and a white player. Red moves first.
pub struct Game {
    player_red: Player,
    player_white: Player,
    board: Board,
    active: Color,
    turn: Option<Turn>,
    state: GameState,
    winner: Option<Color>,
    observer: Option<Box<dyn GameObserver>>,
}

impl Game {
    pub fn new(player_red: Player, player_white: Player) -> Result<Self, GameError> {
        Self::with_scenario(player_red, player_white, Scenario::Standard)
    }

    pub fn with_scenario(
        player_red: Player,
        player_white: Player,
        scenario: Scenario,
    ) -> Result<Self, GameError> {
        if player_red.name().is_empty() || player_white.name().is_empty() {
            return Err(GameError::EmptyPlayerName);
        }
        if player_red == player_white {
            return Err(GameError::SamePlayer(player_red.name().to_string()));
        }

        info!(
            red = player_red.name(),
            white = player_white.name(),
            scenario = scenario.name(),
            "new game"
        );
        let board = scenario.board();
        let turn = Turn::new(board, player_red.clone(), Color::Red);
        Ok(Self {
            player_red,
            player_white,
            board,
            active: Color::Red,
            turn: Some(turn),
            state: GameState::InPlay,
            winner: None,
            observer: None,
        })
    }

    pub fn with_observer(mut self, observer: Box<dyn GameObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn player_red(&self) -> &Player {
        &self.player_red
    }

    pub fn player_white(&self) -> &Player {
        &self.player_white
    }

    pub fn player(&self, color: Color) -> &Player {
        match color {
            Color::Red => &self.player_red,
            Color::White => &self.player_white,
        }
    }

    /// Looks a participant up by the name the lobby knows them by.
    pub fn player_by_name(&self, name: &str) -> Option<&Player> {
        [&self.player_red, &self.player_white]
            .into_iter()
            .find(|player| player.name() == name)
    }

    /// `None` for someone who is not playing this game.
    pub fn player_color(&self, player: &Player) -> Option<Color> {
        if player == &self.player_red {
            Some(Color::Red)
        } else if player == &self.player_white {
            Some(Color::White)
        } else {
            None
        }
    }

    /// The authoritative board. Moves in an unsubmitted turn are not on it.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Whose turn it is, or once the game is won, who made the last move.
    pub fn active_player(&self) -> &Player {
        self.player(self.active)
    }

    pub fn active_color(&self) -> Color {
        self.active
    }

    pub fn is_my_turn(&self, player: &Player) -> bool {
        self.state == GameState::InPlay && self.active_player() == player
    }

    pub fn turn(&self) -> Option<&Turn> {
        self.turn.as_ref()
    }

    /// The active turn for adding or backing up moves. `None` once the game
    /// is over.
    pub fn turn_mut(&mut self) -> Option<&mut Turn> {
        if self.state != GameState::InPlay {
            return None;
        }
        self.turn.as_mut()
    }

    /// Moves the active player may add to the current turn.
    pub fn legal_moves(&self) -> Vec<LegalMove> {
        match (&self.turn, self.state) {
            (Some(turn), GameState::InPlay) => turn.legal_moves(),
            _ => Vec::new(),
        }
    }

    /// Adds a move to the active turn on behalf of `player`. False for an
    /// illegal move, a player whose turn it is not, or a finished game.
    pub fn validate_move(&mut self, player: &Player, start: Position, end: Position) -> bool {
        if !self.is_my_turn(player) {
            return false;
        }
        let mv = Move::new(start, end, player.clone(), self.active);
        self.turn_mut().is_some_and(|turn| turn.validate_move(&mv))
    }

    /// Backs up the last move of the active turn. Only the active player may.
    pub fn backup_move(&mut self, player: &Player) -> bool {
        self.is_my_turn(player) && self.turn_mut().is_some_and(Turn::backup_move)
    }

    /// Commits the active turn. Only the active player may submit, and only
    /// once the turn holds at least one move.
    pub fn submit_turn(&mut self, player: &Player) -> bool {
        if !self.is_my_turn(player) {
            return false;
        }
        let Some(mut turn) = self.turn.take_if(|turn| turn.is_stable()) else {
            return false;
        };

        turn.mark_submitted();
        self.board = *turn.latest_board();
        debug!(
            player = player.name(),
            color = %self.active,
            moves = turn.move_count(),
            "turn submitted"
        );
        self.notify(GameEvent::TurnSubmitted {
            color: self.active,
            moves: turn.move_count(),
        });

        self.make_kings();
        self.change_active_player();
        true
    }

    /// Ends the game. Allowed only on the resigning player's own turn before
    /// any move has been made in it.
    pub fn resign_game(&mut self, player: &Player) -> bool {
        if !self.is_my_turn(player) || !self.turn.as_ref().is_some_and(Turn::can_resign) {
            return false;
        }

        let color = self.active;
        info!(player = player.name(), %color, "player resigned");
        self.state = GameState::Resigned;
        self.turn = None;
        self.declare_winner(color.opponent());
        self.notify(GameEvent::Resigned { color });
        true
    }

    pub fn is_resigned(&self) -> bool {
        self.state == GameState::Resigned
    }

    pub fn is_over(&self) -> bool {
        self.state != GameState::InPlay
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn winner(&self) -> Option<&Player> {
        self.winner.map(|color| self.player(color))
    }

    pub fn view(&self) -> GameView {
        GameView {
            board: self.board.to_array().to_vec(),
            pending_board: self
                .turn
                .as_ref()
                .filter(|turn| turn.is_stable())
                .map(|turn| turn.latest_board().to_array().to_vec()),
            red_player: self.player_red.name().to_string(),
            white_player: self.player_white.name().to_string(),
            active_player: self.active_player().name().to_string(),
            active_color: self.active,
            state: self.state,
            winner: self.winner().map(|player| player.name().to_string()),
            turn_state: self.turn.as_ref().map(Turn::state),
            can_resign: self.state == GameState::InPlay
                && self.turn.as_ref().is_some_and(Turn::can_resign),
            red_count: self.board.piece_count(Color::Red),
            white_count: self.board.piece_count(Color::White),
        }
    }

    fn make_kings(&mut self) {
        for position in self.board.promote_kings() {
            let color = self
                .board
                .piece_at(position)
                .map_or(self.active, |piece| piece.color);
            debug!(%position, %color, "piece kinged");
            self.notify(GameEvent::PiecePromoted { color, position });
        }
    }

    fn change_active_player(&mut self) {
        let current = self.active;
        let next = current.opponent();
        let next_player = self.player(next).clone();

        if validator::are_moves_available_for_player(&self.board, &next_player, next) {
            self.active = next;
            self.turn = Some(Turn::new(self.board, next_player, next));
        } else {
            info!(
                loser = next_player.name(),
                winner = self.player(current).name(),
                "no moves left"
            );
            self.state = GameState::Won;
            self.declare_winner(current);
            self.notify(GameEvent::Won { winner: current });
        }
    }

    fn declare_winner(&mut self, color: Color) {
        self.winner = Some(color);
        match color {
            Color::Red => self.player_red.record_win(),
            Color::White => self.player_white.record_win(),
        }
    }

    fn notify(&self, event: GameEvent) {
        if let Some(observer) = &self.observer {
            observer.on_event(&event);
        }
    }
}
