use crate::error::Result;
use super::board::Board;
use super::types::{GameOutcome, Mark};
use super::win_detector::classify;

pub const WIN_SCORE: i8 = 1;
pub const TIE_SCORE: i8 = 0;
pub const LOSS_SCORE: i8 = -1;

/// Exact game value of `board` for `maximizing`, with `to_move` playing next.
///
/// The search is exhaustive and unpruned: every child is a fresh copy of
/// its parent with one more mark. Returns 1 for a forced win, 0 for a draw,
/// -1 for a forced loss.
pub fn score(board: &Board, maximizing: Mark, to_move: Mark) -> Result<i8> {
    let maximizing = maximizing.as_player()?;
    let to_move = to_move.as_player()?;
    Ok(minimax(board, maximizing, to_move))
}

fn terminal_score(outcome: GameOutcome, maximizing: Mark) -> Option<i8> {
    match outcome {
        GameOutcome::Undecided => None,
        GameOutcome::Tie => Some(TIE_SCORE),
        decided => Some(if decided.winner() == Some(maximizing) {
            WIN_SCORE
        } else {
            LOSS_SCORE
        }),
    }
}

fn minimax(board: &Board, maximizing: Mark, to_move: Mark) -> i8 {
    if let Some(value) = terminal_score(classify(board), maximizing) {
        return value;
    }

    let next_player = match to_move {
        Mark::X => Mark::O,
        _ => Mark::X,
    };

    let scores = board
        .available_moves()
        .into_iter()
        .map(|pos| minimax(&board.apply_move(pos, to_move), maximizing, next_player));

    // An undecided board always has an empty cell, so the fold sees at least
    // one child.
    if to_move == maximizing {
        scores.fold(LOSS_SCORE, i8::max)
    } else {
        scores.fold(WIN_SCORE, i8::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::games::tictactoe::Position;

    fn board(moves: &[(usize, usize, Mark)]) -> Board {
        Board::from_moves(moves).unwrap()
    }

    #[test]
    fn test_empty_board_is_a_draw_for_either_side() {
        let empty = Board::empty();
        assert_eq!(score(&empty, Mark::X, Mark::X), Ok(TIE_SCORE));
        assert_eq!(score(&empty, Mark::O, Mark::X), Ok(TIE_SCORE));
    }

    #[test]
    fn test_terminal_boards_score_directly() {
        let x_won = board(&[
            (0, 0, Mark::X),
            (1, 0, Mark::X),
            (2, 0, Mark::X),
            (0, 1, Mark::O),
            (1, 1, Mark::O),
        ]);
        assert_eq!(score(&x_won, Mark::X, Mark::O), Ok(WIN_SCORE));
        assert_eq!(score(&x_won, Mark::O, Mark::O), Ok(LOSS_SCORE));
    }

    #[test]
    fn test_immediate_win_is_found_for_side_to_move() {
        // o o .
        // x x .
        // x . .
        let b = board(&[
            (0, 0, Mark::O),
            (1, 0, Mark::O),
            (0, 1, Mark::X),
            (1, 1, Mark::X),
            (0, 2, Mark::X),
        ]);
        assert_eq!(score(&b, Mark::O, Mark::O), Ok(WIN_SCORE));
        assert_eq!(score(&b, Mark::X, Mark::X), Ok(WIN_SCORE));
    }

    #[test]
    fn test_fork_is_a_forced_loss_for_defender() {
        // x . o
        // . o .
        // . . x
        // X must block at (0, 2), which opens two lines at once.
        let b = board(&[
            (0, 0, Mark::X),
            (1, 1, Mark::O),
            (2, 2, Mark::X),
            (2, 0, Mark::O),
        ]);
        assert_eq!(score(&b, Mark::X, Mark::X), Ok(WIN_SCORE));
        assert_eq!(score(&b, Mark::O, Mark::X), Ok(LOSS_SCORE));
    }

    #[test]
    fn test_rejects_empty_player() {
        let b = Board::empty();
        assert!(matches!(
            score(&b, Mark::Empty, Mark::X),
            Err(EngineError::InvalidMark(_))
        ));
        assert!(matches!(
            score(&b, Mark::X, Mark::Empty),
            Err(EngineError::InvalidMark(_))
        ));
    }

    #[test]
    fn test_score_does_not_touch_input() {
        let b = board(&[(1, 1, Mark::X)]);
        let before = b;
        let _ = score(&b, Mark::O, Mark::O);
        assert_eq!(b, before);
        assert_eq!(b.get(Position::new(1, 1)), Mark::X);
    }
}
