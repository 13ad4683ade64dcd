use crate::error::Result;
use super::board::Board;
use super::types::{GameOutcome, Mark, Position, WinningLine};

const fn p(x: usize, y: usize) -> Position {
    Position::new(x, y)
}

pub const WINNING_LINES: [[Position; 3]; 8] = [
    // horizontal
    [p(0, 0), p(1, 0), p(2, 0)],
    [p(0, 1), p(1, 1), p(2, 1)],
    [p(0, 2), p(1, 2), p(2, 2)],
    // vertical
    [p(0, 0), p(0, 1), p(0, 2)],
    [p(1, 0), p(1, 1), p(1, 2)],
    [p(2, 0), p(2, 1), p(2, 2)],
    // diagonal
    [p(0, 0), p(1, 1), p(2, 2)],
    [p(2, 0), p(1, 1), p(0, 2)],
];

fn line_matches(board: &Board, line: &[Position; 3], mark: Mark) -> bool {
    line.iter().all(|&cell| board.get(cell) == mark)
}

fn completes_line(board: &Board, mark: Mark) -> bool {
    WINNING_LINES
        .iter()
        .any(|line| line_matches(board, line, mark))
}

/// Whether `player` owns a full line. `Mark::Empty` is not a player.
pub fn has_won(board: &Board, player: Mark) -> Result<bool> {
    let player = player.as_player()?;
    Ok(completes_line(board, player))
}

/// X is checked before O, then fullness. A legal game never has both players
/// on a line, so the order only matters for hand-built boards.
pub fn classify(board: &Board) -> GameOutcome {
    if completes_line(board, Mark::X) {
        GameOutcome::XWon
    } else if completes_line(board, Mark::O) {
        GameOutcome::OWon
    } else if board.is_full() {
        GameOutcome::Tie
    } else {
        GameOutcome::Undecided
    }
}

pub fn check_win_with_line(board: &Board) -> Option<WinningLine> {
    [Mark::X, Mark::O].into_iter().find_map(|mark| {
        WINNING_LINES
            .iter()
            .find(|line| line_matches(board, line, mark))
            .map(|line| WinningLine::new(mark, *line))
    })
}
