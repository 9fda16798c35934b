//! Browser-facing wrapper. Players are identified by name. An unknown name is
//! an error; every rule rejection, including acting out of turn, is `Ok(false)`.

use wasm_bindgen::prelude::*;

use crate::error::GameError;
use crate::game::Game;
use crate::scenario::Scenario;
use crate::types::{Player, PlayerMode, Position};

#[wasm_bindgen]
pub struct WasmGame {
    game: Game,
}

#[wasm_bindgen]
impl WasmGame {
    /// `scenario` is one of the kebab-case scenario names; absent means the
    /// standard board.
    #[wasm_bindgen(constructor)]
    pub fn new(
        red: &str,
        white: &str,
        tournament: bool,
        scenario: Option<String>,
    ) -> Result<WasmGame, JsValue> {
        let scenario = match scenario.as_deref() {
            Some(name) => name.parse::<Scenario>().map_err(to_js_error)?,
            None => Scenario::Standard,
        };
        let mode = if tournament {
            PlayerMode::Tournament
        } else {
            PlayerMode::Normal
        };
        let game = Game::with_scenario(Player::new(red, mode), Player::new(white, mode), scenario)
            .map_err(to_js_error)?;
        Ok(WasmGame { game })
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.game.view()).map_err(JsValue::from)
    }

    pub fn legal_moves(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.game.legal_moves()).map_err(JsValue::from)
    }

    /// `Ok(false)` for an illegal move or a player whose turn it is not.
    pub fn validate_move(
        &mut self,
        player: &str,
        start_row: u8,
        start_cell: u8,
        end_row: u8,
        end_cell: u8,
    ) -> Result<bool, JsValue> {
        let player = self.known_player(player)?;
        Ok(self.game.validate_move(
            &player,
            Position::new(start_row, start_cell),
            Position::new(end_row, end_cell),
        ))
    }

    pub fn backup_move(&mut self, player: &str) -> Result<bool, JsValue> {
        let player = self.known_player(player)?;
        Ok(self.game.backup_move(&player))
    }

    pub fn submit_turn(&mut self, player: &str) -> Result<bool, JsValue> {
        let player = self.known_player(player)?;
        Ok(self.game.submit_turn(&player))
    }

    pub fn resign(&mut self, player: &str) -> Result<bool, JsValue> {
        let player = self.known_player(player)?;
        Ok(self.game.resign_game(&player))
    }
}

impl WasmGame {
    fn known_player(&self, name: &str) -> Result<Player, JsValue> {
        self.game
            .player_by_name(name)
            .cloned()
            .ok_or_else(|| to_js_error(GameError::UnknownPlayer(name.to_string())))
    }
}

fn to_js_error(err: GameError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
