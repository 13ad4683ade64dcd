mod board;
mod bot_controller;
mod game_state;
pub mod minimax;
pub mod opening_book;
mod types;
mod win_detector;

pub use board::Board;
pub use bot_controller::{
    BotInput, DEFAULT_SEARCH_WORKERS, SearchStrategy, calculate_move, score_candidates,
};
pub use game_state::{GameStatus, TicTacToeGameState};
pub use minimax::score;
pub use types::{BOARD_SIZE, GameOutcome, Mark, Position, WinningLine};
pub use win_detector::{WINNING_LINES, check_win_with_line, classify, has_won};
