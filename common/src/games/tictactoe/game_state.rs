use crate::error::{EngineError, Result};
use super::board::Board;
use super::bot_controller::{BotInput, SearchStrategy, calculate_move};
use super::types::{GameOutcome, Mark, Position};
use super::win_detector::classify;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    New,
    InProgress,
    Won,
    Tie,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::New => "new",
            GameStatus::InProgress => "in_progress",
            GameStatus::Won => "won",
            GameStatus::Tie => "tie",
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, GameStatus::New | GameStatus::InProgress)
    }
}

/// One human-versus-engine game. The human is X and always moves first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TicTacToeGameState {
    pub board: Board,
    pub status: GameStatus,
    pub winner: Option<Mark>,
    pub human_mark: Mark,
    pub computer_mark: Mark,
    pub last_move: Option<Position>,
}

impl Default for TicTacToeGameState {
    fn default() -> Self {
        Self::new()
    }
}

impl TicTacToeGameState {
    pub fn new() -> Self {
        Self {
            board: Board::empty(),
            status: GameStatus::New,
            winner: None,
            human_mark: Mark::X,
            computer_mark: Mark::O,
            last_move: None,
        }
    }

    pub fn is_valid_move(&self, position: Position) -> bool {
        self.status.is_open() && position.is_on_board() && self.board.is_empty_at(position)
    }

    pub fn place_mark(&mut self, position: Position, mark: Mark) -> Result<()> {
        let mark = mark.as_player()?;
        if !self.status.is_open() {
            return Err(EngineError::GameOver);
        }

        self.board = self.board.try_apply_move(position, mark)?;
        self.last_move = Some(position);

        if self.status == GameStatus::New {
            self.status = GameStatus::InProgress;
        }
        Ok(())
    }

    /// Re-derives the status from the grid and returns the outcome.
    pub fn refresh_status(&mut self) -> GameOutcome {
        let outcome = classify(&self.board);
        match outcome {
            GameOutcome::XWon | GameOutcome::OWon => {
                self.status = GameStatus::Won;
                self.winner = outcome.winner();
            }
            GameOutcome::Tie => {
                self.status = GameStatus::Tie;
                self.winner = None;
            }
            GameOutcome::Undecided => {}
        }
        outcome
    }

    /// Plays the human move and, if the game is still undecided, the engine's
    /// reply. Returns the engine's move.
    ///
    /// A human win is recorded and then reported as [`EngineError::HumanWon`]:
    /// an exact engine never loses, so it means the search is broken.
    pub fn play_turn(
        &mut self,
        human_move: Position,
        strategy: &SearchStrategy,
    ) -> Result<Option<Position>> {
        self.place_mark(human_move, self.human_mark)?;

        match self.refresh_status() {
            GameOutcome::Undecided => {}
            GameOutcome::Tie => return Ok(None),
            _ => return Err(EngineError::HumanWon),
        }

        let input = BotInput::new(self.board, self.computer_mark);
        let reply = calculate_move(strategy, &input)?;
        self.place_mark(reply, self.computer_mark)?;
        self.refresh_status();

        Ok(Some(reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_is_open_and_empty() {
        let state = TicTacToeGameState::new();
        assert_eq!(state.status, GameStatus::New);
        assert_eq!(state.board, Board::empty());
        assert!(state.is_valid_move(Position::new(1, 1)));
        assert!(!state.is_valid_move(Position::new(3, 1)));
    }

    #[test]
    fn test_first_turn_uses_opening_reply() {
        let mut state = TicTacToeGameState::new();
        let reply = state
            .play_turn(Position::new(1, 0), &SearchStrategy::Sequential)
            .unwrap();
        assert_eq!(reply, Some(Position::new(1, 2)));
        assert_eq!(state.status, GameStatus::InProgress);
        assert_eq!(state.board.get(Position::new(1, 0)), Mark::X);
        assert_eq!(state.board.get(Position::new(1, 2)), Mark::O);
        assert_eq!(state.last_move, Some(Position::new(1, 2)));
    }

    #[test]
    fn test_occupied_cell_is_rejected() {
        let mut state = TicTacToeGameState::new();
        state.play_turn(Position::new(0, 0), &SearchStrategy::Sequential).unwrap();
        assert!(!state.is_valid_move(Position::new(1, 1)));
        assert_eq!(
            state.play_turn(Position::new(1, 1), &SearchStrategy::Sequential),
            Err(EngineError::CellOccupied {
                position: Position::new(1, 1)
            })
        );
    }

    #[test]
    fn test_engine_finishes_a_won_position() {
        let mut state = TicTacToeGameState::new();
        state.board = Board::from_moves(&[
            (0, 0, Mark::O),
            (1, 0, Mark::O),
            (0, 1, Mark::X),
            (1, 1, Mark::X),
        ])
        .unwrap();
        state.status = GameStatus::InProgress;

        // Human ignores the threat.
        let reply = state
            .play_turn(Position::new(0, 2), &SearchStrategy::Sequential)
            .unwrap();
        assert_eq!(reply, Some(Position::new(2, 0)));
        assert_eq!(state.status, GameStatus::Won);
        assert_eq!(state.winner, Some(Mark::O));
        assert!(!state.is_valid_move(Position::new(2, 2)));
        assert_eq!(
            state.place_mark(Position::new(2, 2), Mark::X),
            Err(EngineError::GameOver)
        );
    }

    #[test]
    fn test_human_win_is_reported() {
        let mut state = TicTacToeGameState::new();
        state.board = Board::from_moves(&[
            (0, 0, Mark::X),
            (1, 0, Mark::X),
            (0, 1, Mark::O),
            (1, 1, Mark::O),
        ])
        .unwrap();
        state.status = GameStatus::InProgress;

        let result = state.play_turn(Position::new(2, 0), &SearchStrategy::Sequential);
        assert_eq!(result, Err(EngineError::HumanWon));
        assert_eq!(state.status, GameStatus::Won);
        assert_eq!(state.winner, Some(Mark::X));
    }

    #[test]
    fn test_last_human_move_can_tie() {
        let mut state = TicTacToeGameState::new();
        // x o x
        // x o o
        // o x .
        state.board = Board::from_moves(&[
            (0, 0, Mark::X),
            (1, 0, Mark::O),
            (2, 0, Mark::X),
            (0, 1, Mark::X),
            (1, 1, Mark::O),
            (2, 1, Mark::O),
            (0, 2, Mark::O),
            (1, 2, Mark::X),
        ])
        .unwrap();
        state.status = GameStatus::InProgress;

        let reply = state
            .play_turn(Position::new(2, 2), &SearchStrategy::Sequential)
            .unwrap();
        assert_eq!(reply, None);
        assert_eq!(state.status, GameStatus::Tie);
        assert_eq!(state.winner, None);
    }
}
