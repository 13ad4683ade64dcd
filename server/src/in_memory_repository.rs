use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use common::games::tictactoe::TicTacToeGameState;
use common::{GameId, Username};

use crate::error::ServiceError;
use crate::repository::{GameRecord, GameRepository};

struct Storage {
    next_game_id: GameId,
    // Games per user in creation order, so the last entry is the latest.
    games_by_user: HashMap<Username, Vec<GameRecord>>,
}

impl Default for Storage {
    fn default() -> Self {
        Self {
            next_game_id: GameId::new(1),
            games_by_user: HashMap::new(),
        }
    }
}

#[derive(Clone, Default)]
pub struct InMemoryGameRepository {
    storage: Arc<Mutex<Storage>>,
}

impl InMemoryGameRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Storage>, ServiceError> {
        self.storage
            .lock()
            .map_err(|_| ServiceError::Internal("repository lock poisoned".to_string()))
    }
}

impl GameRepository for InMemoryGameRepository {
    fn create_user(&self, username: &Username) -> Result<(), ServiceError> {
        let mut storage = self.lock()?;
        if storage.games_by_user.contains_key(username) {
            return Err(ServiceError::UserExists(username.clone()));
        }
        storage.games_by_user.insert(username.clone(), Vec::new());
        Ok(())
    }

    fn user_exists(&self, username: &Username) -> Result<bool, ServiceError> {
        Ok(self.lock()?.games_by_user.contains_key(username))
    }

    fn create_game(&self, owner: &Username) -> Result<GameRecord, ServiceError> {
        let mut storage = self.lock()?;
        let id = storage.next_game_id.clone();
        let games = storage
            .games_by_user
            .get_mut(owner)
            .ok_or_else(|| ServiceError::UnknownUser(owner.clone()))?;

        let record = GameRecord {
            id: id.clone(),
            owner: owner.clone(),
            created_at: Utc::now(),
            state: TicTacToeGameState::new(),
        };
        games.push(record.clone());
        storage.next_game_id = id.next();
        Ok(record)
    }

    fn latest_game(&self, owner: &Username) -> Result<Option<GameRecord>, ServiceError> {
        let storage = self.lock()?;
        let games = storage
            .games_by_user
            .get(owner)
            .ok_or_else(|| ServiceError::UnknownUser(owner.clone()))?;
        Ok(games.last().cloned())
    }

    fn save_game(&self, game: &GameRecord) -> Result<(), ServiceError> {
        let mut storage = self.lock()?;
        let stored = storage
            .games_by_user
            .get_mut(&game.owner)
            .and_then(|games| games.iter_mut().find(|g| g.id == game.id))
            .ok_or_else(|| ServiceError::GameNotFound(game.id.clone()))?;
        *stored = game.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::games::tictactoe::{GameStatus, Mark, Position};

    #[test]
    fn test_duplicate_user_is_rejected() {
        let repo = InMemoryGameRepository::new();
        let alice = Username::from("alice");
        repo.create_user(&alice).unwrap();
        assert!(repo.user_exists(&alice).unwrap());
        assert_eq!(repo.create_user(&alice), Err(ServiceError::UserExists(alice)));
    }

    #[test]
    fn test_latest_game_is_the_newest() {
        let repo = InMemoryGameRepository::new();
        let alice = Username::from("alice");
        repo.create_user(&alice).unwrap();
        assert_eq!(repo.latest_game(&alice).unwrap(), None);

        let first = repo.create_game(&alice).unwrap();
        let second = repo.create_game(&alice).unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(repo.latest_game(&alice).unwrap().map(|g| g.id), Some(second.id));
    }

    #[test]
    fn test_games_are_scoped_per_user() {
        let repo = InMemoryGameRepository::new();
        let alice = Username::from("alice");
        let bob = Username::from("bob");
        repo.create_user(&alice).unwrap();
        repo.create_user(&bob).unwrap();

        repo.create_game(&alice).unwrap();
        assert_eq!(repo.latest_game(&bob).unwrap(), None);
        assert!(matches!(
            repo.create_game(&Username::from("carol")),
            Err(ServiceError::UnknownUser(_))
        ));
    }

    #[test]
    fn test_save_game_replaces_state() {
        let repo = InMemoryGameRepository::new();
        let alice = Username::from("alice");
        repo.create_user(&alice).unwrap();
        let mut game = repo.create_game(&alice).unwrap();

        game.state.place_mark(Position::new(0, 0), Mark::X).unwrap();
        repo.save_game(&game).unwrap();

        let latest = repo.latest_game(&alice).unwrap().unwrap();
        assert_eq!(latest.state.status, GameStatus::InProgress);
        assert_eq!(latest.state.board.get(Position::new(0, 0)), Mark::X);
    }

    #[test]
    fn test_save_unknown_game_fails() {
        let repo = InMemoryGameRepository::new();
        let alice = Username::from("alice");
        repo.create_user(&alice).unwrap();
        let mut game = repo.create_game(&alice).unwrap();
        game.id = GameId::new(999);
        assert_eq!(
            repo.save_game(&game),
            Err(ServiceError::GameNotFound(GameId::new(999)))
        );
    }
}
