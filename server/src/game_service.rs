use std::sync::Arc;

use common::games::tictactoe::{
    Mark, Position, SearchStrategy, TicTacToeGameState, check_win_with_line,
};
use common::{EngineError, Username, log, log_error, log_warn};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::ServiceError;
use crate::repository::{GameRecord, GameRepository};

/// Snapshot returned to clients. `cells` is indexed `[x][y]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStatusResponse {
    pub cells: [[Option<String>; 3]; 3],
    pub status: String,
    pub winner: Option<String>,
    pub winning_line: Option<[[usize; 2]; 3]>,
}

impl GameStatusResponse {
    pub fn from_state(state: &TicTacToeGameState) -> Self {
        let cells = state
            .board
            .columns()
            .map(|column| column.map(|mark| mark.symbol().map(str::to_string)));
        let winning_line = check_win_with_line(&state.board)
            .map(|line| line.cells.map(|pos| [pos.x, pos.y]));

        Self {
            cells,
            status: state.status.as_str().to_string(),
            winner: state.winner.and_then(|m| m.symbol()).map(str::to_string),
            winning_line,
        }
    }
}

#[derive(Clone)]
pub struct GameService {
    repository: Arc<dyn GameRepository>,
    strategy: SearchStrategy,
    max_username_length: usize,
    // Serializes read-modify-write of games so concurrent clicks cannot
    // overwrite each other.
    turn_lock: Arc<Mutex<()>>,
}

impl GameService {
    pub fn new(
        repository: Arc<dyn GameRepository>,
        strategy: SearchStrategy,
        max_username_length: usize,
    ) -> Self {
        Self {
            repository,
            strategy,
            max_username_length,
            turn_lock: Arc::new(Mutex::new(())),
        }
    }

    fn parse_username(&self, raw: &str) -> Result<Username, ServiceError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ServiceError::InvalidUsername(
                "username is required".to_string(),
            ));
        }
        if trimmed.chars().count() > self.max_username_length {
            return Err(ServiceError::InvalidUsername(format!(
                "username must be at most {} characters",
                self.max_username_length
            )));
        }
        Ok(Username::from(trimmed))
    }

    fn existing_user(&self, raw: &str) -> Result<Username, ServiceError> {
        let username = self.parse_username(raw)?;
        if !self.repository.user_exists(&username)? {
            return Err(ServiceError::UnknownUser(username));
        }
        Ok(username)
    }

    pub async fn create_user(&self, raw: &str) -> Result<Username, ServiceError> {
        let username = self.parse_username(raw)?;
        self.repository.create_user(&username)?;
        log!("Created user {}", username);
        Ok(username)
    }

    /// The user's newest game, or an unsaved empty board if they have none.
    pub async fn latest_game(&self, raw: &str) -> Result<GameStatusResponse, ServiceError> {
        let username = self.existing_user(raw)?;
        let state = match self.repository.latest_game(&username)? {
            Some(game) => game.state,
            None => TicTacToeGameState::new(),
        };
        Ok(GameStatusResponse::from_state(&state))
    }

    pub async fn new_game(&self, raw: &str) -> Result<GameStatusResponse, ServiceError> {
        let username = self.existing_user(raw)?;
        let _guard = self.turn_lock.lock().await;
        let game = self.repository.create_game(&username)?;
        log!(
            "User {} started game {} at {}",
            username,
            game.id,
            game.created_at
        );
        Ok(GameStatusResponse::from_state(&game.state))
    }

    pub async fn cell_click(
        &self,
        raw: &str,
        x: usize,
        y: usize,
    ) -> Result<GameStatusResponse, ServiceError> {
        let username = self.existing_user(raw)?;
        let position = Position::new(x, y);

        let _guard = self.turn_lock.lock().await;
        let game = match self.repository.latest_game(&username)? {
            Some(game) => game,
            None => self.repository.create_game(&username)?,
        };

        if !game.state.is_valid_move(position) {
            let reason = if !game.state.status.is_open() {
                EngineError::GameOver
            } else if !position.is_on_board() {
                EngineError::OutOfBounds { position }
            } else {
                EngineError::CellOccupied { position }
            };
            log_warn!(
                "Game {}: rejected move {} from {}: {}",
                game.id,
                position,
                username,
                reason
            );
            return Err(ServiceError::IllegalMove(reason));
        }

        let (game, result) = self.play_turn(game, position).await?;
        self.repository.save_game(&game)?;

        match result {
            Ok(Some(reply)) => {
                log!(
                    "Game {}: {} played {}, engine replied {}",
                    game.id,
                    username,
                    position,
                    reply
                );
            }
            Ok(None) => {
                log!(
                    "Game {}: {} played {}, game ended in a tie",
                    game.id,
                    username,
                    position
                );
            }
            Err(EngineError::HumanWon) => {
                log_error!(
                    "Game {}: human {} won with {}; the engine is broken\n{}",
                    game.id,
                    username,
                    position,
                    game.state.board
                );
                return Err(EngineError::HumanWon.into());
            }
            Err(err) => return Err(err.into()),
        }

        if game.state.winner == Some(Mark::O) {
            log!("Game {}: engine beat {}", game.id, username);
        }

        Ok(GameStatusResponse::from_state(&game.state))
    }

    /// Runs the turn on a blocking thread; the search is CPU bound.
    async fn play_turn(
        &self,
        mut game: GameRecord,
        position: Position,
    ) -> Result<(GameRecord, Result<Option<Position>, EngineError>), ServiceError> {
        let strategy = self.strategy.clone();
        tokio::task::spawn_blocking(move || {
            let result = game.state.play_turn(position, &strategy);
            (game, result)
        })
        .await
        .map_err(|e| ServiceError::Internal(format!("engine task failed: {}", e)))
    }
}
