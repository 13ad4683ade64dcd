use thiserror::Error;

use crate::games::tictactoe::Position;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("cell {position} is already occupied")]
    CellOccupied { position: Position },

    #[error("position {position} is outside the 3x3 board")]
    OutOfBounds { position: Position },

    #[error("invalid player mark: {0}")]
    InvalidMark(String),

    #[error("invalid player symbol '{0}'")]
    InvalidSymbol(String),

    #[error("no available moves")]
    NoAvailableMoves,

    #[error("failed to start search workers: {0}")]
    WorkerPool(String),

    #[error("game is already over")]
    GameOver,

    #[error("human player won against the engine; the evaluator is broken")]
    HumanWon,
}

pub type Result<T> = std::result::Result<T, EngineError>;
