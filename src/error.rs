use thiserror::Error;

/// Failures that are not rule violations: bad construction input and
/// unparseable boundary values. Illegal moves never surface here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("player name must not be empty")]
    EmptyPlayerName,
    #[error("a game needs two distinct players, got `{0}` twice")]
    SamePlayer(String),
    #[error("unknown scenario `{0}`")]
    UnknownScenario(String),
    #[error("`{0}` is not playing this game")]
    UnknownPlayer(String),
}
