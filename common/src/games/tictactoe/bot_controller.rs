use std::sync::Arc;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{EngineError, Result};
use super::board::Board;
use super::minimax::score;
use super::opening_book;
use super::types::{Mark, Position};

pub const DEFAULT_SEARCH_WORKERS: usize = 5;

const OPENING_REPLY_EMPTY_CELLS: usize = 8;

pub struct BotInput {
    pub board: Board,
    pub computer_mark: Mark,
}

impl BotInput {
    pub fn new(board: Board, computer_mark: Mark) -> Self {
        Self {
            board,
            computer_mark,
        }
    }
}

/// How top-level candidates are scored. Both strategies pick the same move.
#[derive(Clone, Debug, Default)]
pub enum SearchStrategy {
    #[default]
    Sequential,
    Parallel(Arc<ThreadPool>),
}

impl SearchStrategy {
    pub fn parallel(workers: usize) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|index| format!("minimax-worker-{}", index))
            .build()
            .map_err(|e| EngineError::WorkerPool(e.to_string()))?;
        Ok(SearchStrategy::Parallel(Arc::new(pool)))
    }

    pub fn workers(&self) -> usize {
        match self {
            SearchStrategy::Sequential => 1,
            SearchStrategy::Parallel(pool) => pool.current_num_threads(),
        }
    }
}

/// Chooses the computer's move. Does not check whether the game is already
/// decided; that is up to the caller.
pub fn calculate_move(strategy: &SearchStrategy, input: &BotInput) -> Result<Position> {
    let computer = input.computer_mark.as_player()?;
    let board = &input.board;

    let candidates = board.available_moves();
    if candidates.is_empty() {
        return Err(EngineError::NoAvailableMoves);
    }

    if candidates.len() == OPENING_REPLY_EMPTY_CELLS
        && let Some(reply) = opening_book::lookup(board)
    {
        return Ok(reply);
    }

    let scores = score_candidates(strategy, board, computer, &candidates)?;
    Ok(pick_best(&candidates, &scores))
}

/// Scores each candidate from the computer's point of view. `scores[i]`
/// belongs to `candidates[i]`.
pub fn score_candidates(
    strategy: &SearchStrategy,
    board: &Board,
    computer: Mark,
    candidates: &[Position],
) -> Result<Vec<i8>> {
    let opponent = computer
        .opponent()
        .ok_or_else(|| EngineError::InvalidMark("empty is not a player".to_string()))?;
    let evaluate = |pos: &Position| score(&board.apply_move(*pos, computer), computer, opponent);

    match strategy {
        SearchStrategy::Sequential => candidates.iter().map(evaluate).collect(),
        SearchStrategy::Parallel(pool) => {
            pool.install(|| candidates.par_iter().map(evaluate).collect())
        }
    }
}

/// First strictly best score wins, so ties go to the lowest `(x, y)`.
fn pick_best(candidates: &[Position], scores: &[i8]) -> Position {
    let mut best = 0;
    for index in 1..candidates.len() {
        if scores[index] > scores[best] {
            best = index;
        }
    }
    candidates[best]
}
