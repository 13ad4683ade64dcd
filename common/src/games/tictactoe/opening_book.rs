use super::board::Board;
use super::types::Position;

const fn p(x: usize, y: usize) -> Position {
    Position::new(x, y)
}

/// Best computer reply for each possible first move. Searching from the
/// second ply is the most expensive call the engine makes and its answer
/// never changes, so it is stored here instead.
pub const OPENING_REPLIES: [(Position, Position); 9] = [
    // corners
    (p(0, 0), p(1, 1)),
    (p(2, 0), p(1, 1)),
    (p(0, 2), p(1, 1)),
    (p(2, 2), p(1, 1)),
    // edges
    (p(0, 1), p(0, 0)),
    (p(2, 1), p(0, 1)),
    (p(1, 0), p(1, 2)),
    (p(1, 2), p(1, 1)),
    // center
    (p(1, 1), p(0, 0)),
];

pub fn reply_to(first_move: Position) -> Option<Position> {
    OPENING_REPLIES
        .iter()
        .find(|(opening, _)| *opening == first_move)
        .map(|&(_, reply)| reply)
}

/// Looks up the reply when exactly one mark is on the board.
pub fn lookup(board: &Board) -> Option<Position> {
    let mut occupied = board.occupied();
    let (first_move, _) = occupied.next()?;
    if occupied.next().is_some() {
        return None;
    }
    reply_to(first_move)
}
