use chrono::{DateTime, Utc};
use common::games::tictactoe::TicTacToeGameState;
use common::{GameId, Username};

use crate::error::ServiceError;

#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub id: GameId,
    pub owner: Username,
    pub created_at: DateTime<Utc>,
    pub state: TicTacToeGameState,
}

/// Storage for users and their games. The engine never sees this; only the
/// game service reads and writes through it.
pub trait GameRepository: Send + Sync {
    /// Fails with [`ServiceError::UserExists`] on a duplicate name.
    fn create_user(&self, username: &Username) -> Result<(), ServiceError>;

    fn user_exists(&self, username: &Username) -> Result<bool, ServiceError>;

    fn create_game(&self, owner: &Username) -> Result<GameRecord, ServiceError>;

    /// Most recently created game of `owner`, if any.
    fn latest_game(&self, owner: &Username) -> Result<Option<GameRecord>, ServiceError>;

    fn save_game(&self, game: &GameRecord) -> Result<(), ServiceError>;
}
