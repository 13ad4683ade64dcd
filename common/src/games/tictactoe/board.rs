use std::fmt;

use crate::error::{EngineError, Result};
use super::types::{BOARD_SIZE, Mark, Position};

/// A 3x3 grid stored row by row (`cells[y][x]`).
///
/// `Board` is `Copy`: deriving a child state copies the whole grid, so search
/// branches never share storage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Mark; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a board from `(x, y, mark)` placements, rejecting overlaps.
    pub fn from_moves(moves: &[(usize, usize, Mark)]) -> Result<Self> {
        let mut board = Self::empty();
        for &(x, y, mark) in moves {
            board = board.try_apply_move(Position::new(x, y), mark)?;
        }
        Ok(board)
    }

    pub fn get(&self, position: Position) -> Mark {
        self.cells[position.y][position.x]
    }

    pub fn is_empty_at(&self, position: Position) -> bool {
        self.get(position) == Mark::Empty
    }

    pub fn is_full(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|&cell| cell != Mark::Empty))
    }

    pub fn empty_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell == Mark::Empty)
            .count()
    }

    /// Copy-then-set. The caller guarantees `position` came from
    /// [`Board::available_moves`]; use [`Board::try_apply_move`] for
    /// unchecked input.
    ///
    /// # Panics
    ///
    /// If the cell is occupied or `mark` is [`Mark::Empty`].
    pub fn apply_move(&self, position: Position, mark: Mark) -> Board {
        assert!(mark != Mark::Empty, "cannot place an empty mark at {}", position);
        assert!(self.is_empty_at(position), "cell {} is occupied", position);
        let mut next = *self;
        next.cells[position.y][position.x] = mark;
        next
    }

    pub fn try_apply_move(&self, position: Position, mark: Mark) -> Result<Board> {
        let mark = mark.as_player()?;
        if !position.is_on_board() {
            return Err(EngineError::OutOfBounds { position });
        }
        if !self.is_empty_at(position) {
            return Err(EngineError::CellOccupied { position });
        }
        Ok(self.apply_move(position, mark))
    }

    /// Empty cells with x as the outer loop, so moves come out in
    /// lexicographic `(x, y)` order.
    pub fn available_moves(&self) -> Vec<Position> {
        let mut moves = Vec::with_capacity(BOARD_SIZE * BOARD_SIZE);
        for x in 0..BOARD_SIZE {
            for y in 0..BOARD_SIZE {
                if self.cells[y][x] == Mark::Empty {
                    moves.push(Position::new(x, y));
                }
            }
        }
        moves
    }

    pub fn occupied(&self) -> impl Iterator<Item = (Position, Mark)> + '_ {
        (0..BOARD_SIZE)
            .flat_map(|x| (0..BOARD_SIZE).map(move |y| Position::new(x, y)))
            .filter_map(|pos| match self.get(pos) {
                Mark::Empty => None,
                mark => Some((pos, mark)),
            })
    }

    /// Column-major view (`[x][y]`) used by the JSON status payload.
    pub fn columns(&self) -> [[Mark; BOARD_SIZE]; BOARD_SIZE] {
        let mut columns = [[Mark::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (y, row) in self.cells.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                columns[x][y] = cell;
            }
        }
        columns
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.cells.iter().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell)?;
            }
        }
        Ok(())
    }
}
