pub mod board;
pub mod error;
pub mod game;
pub mod moves;
pub mod scenario;
pub mod turn;
pub mod types;
pub mod validator;
pub mod wasm;

pub use board::{Board, BoardBuilder, Space, SpaceState};
pub use error::GameError;
pub use game::{Game, GameEvent, GameObserver};
pub use moves::{LegalMove, Move, MoveKind};
pub use scenario::Scenario;
pub use turn::{Turn, TurnState};
pub use types::{Color, GameState, GameView, Piece, PieceType, Player, PlayerMode, Position};
