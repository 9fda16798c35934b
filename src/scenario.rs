use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardBuilder};
use crate::error::GameError;
use crate::types::{Color, Piece, Position};

/// Selects the board a game starts from. Everything but `Standard` is a
/// prepared position for demos and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scenario {
    #[default]
    Standard,
    /// Red's only piece steps into a double threat; white captures it and wins.
    NoMoreMoves,
    /// One piece each, close together.
    Endgame,
    /// Red is one step from being kinged.
    KingMe,
    /// White has no pieces at all.
    NoPieces,
}

impl Scenario {
    pub const ALL: [Scenario; 5] = [
        Scenario::Standard,
        Scenario::NoMoreMoves,
        Scenario::Endgame,
        Scenario::KingMe,
        Scenario::NoPieces,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Scenario::Standard => "standard",
            Scenario::NoMoreMoves => "no-more-moves",
            Scenario::Endgame => "endgame",
            Scenario::KingMe => "king-me",
            Scenario::NoPieces => "no-pieces",
        }
    }

    pub fn board(self) -> Board {
        let white = Piece::single(Color::White);
        let red = Piece::single(Color::Red);
        let builder = match self {
            Scenario::Standard => BoardBuilder::standard(),
            Scenario::NoMoreMoves => BoardBuilder::empty()
                .with_piece_at(white, Position::new(1, 0))
                .with_piece_at(white, Position::new(1, 2))
                .with_piece_at(white, Position::new(0, 3))
                .with_piece_at(red, Position::new(3, 0)),
            Scenario::Endgame => BoardBuilder::empty()
                .with_piece_at(white, Position::new(1, 0))
                .with_piece_at(red, Position::new(2, 1)),
            Scenario::KingMe => BoardBuilder::empty()
                .with_piece_at(red, Position::new(1, 0))
                .with_piece_at(white, Position::new(6, 1))
                .with_piece_at(white, Position::new(1, 2)),
            Scenario::NoPieces => {
                BoardBuilder::empty().with_piece_at(red, Position::new(1, 0))
            }
        };
        builder.build()
    }
}

impl FromStr for Scenario {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scenario::ALL
            .into_iter()
            .find(|scenario| scenario.name() == s)
            .ok_or_else(|| GameError::UnknownScenario(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for scenario in Scenario::ALL {
            assert_eq!(scenario.name().parse::<Scenario>(), Ok(scenario));
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert_eq!(
            "noMoreMoves".parse::<Scenario>(),
            Err(GameError::UnknownScenario("noMoreMoves".to_string()))
        );
    }

    #[test]
    fn standard_scenario_is_the_starting_board() {
        assert_eq!(Scenario::default().board(), Board::new());
    }

    #[test]
    fn prepared_boards_hold_expected_pieces() {
        let king_me = Scenario::KingMe.board();
        assert_eq!(king_me.piece_count(Color::Red), 1);
        assert_eq!(king_me.piece_count(Color::White), 2);

        let no_pieces = Scenario::NoPieces.board();
        assert_eq!(no_pieces.piece_count(Color::White), 0);
        assert_eq!(no_pieces.piece_at(Position::new(1, 0)), Some(Piece::single(Color::Red)));
    }
}
