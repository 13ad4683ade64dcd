use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

pub const BOARD_SIZE: usize = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mark {
    #[default]
    Empty,
    X,
    O,
}

impl Mark {
    pub fn opponent(&self) -> Option<Mark> {
        match self {
            Mark::X => Some(Mark::O),
            Mark::O => Some(Mark::X),
            Mark::Empty => None,
        }
    }

    /// Ensures the mark names a player rather than an empty cell.
    pub fn as_player(self) -> Result<Mark, EngineError> {
        match self {
            Mark::X | Mark::O => Ok(self),
            Mark::Empty => Err(EngineError::InvalidMark("empty is not a player".to_string())),
        }
    }

    pub fn symbol(&self) -> Option<&'static str> {
        match self {
            Mark::X => Some("x"),
            Mark::O => Some("o"),
            Mark::Empty => None,
        }
    }
}

impl FromStr for Mark {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" | "X" => Ok(Mark::X),
            "o" | "O" => Ok(Mark::O),
            other => Err(EngineError::InvalidSymbol(other.to_string())),
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol().unwrap_or("."))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub fn is_on_board(&self) -> bool {
        self.x < BOARD_SIZE && self.y < BOARD_SIZE
    }
}

impl From<(usize, usize)> for Position {
    fn from((x, y): (usize, usize)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    Undecided,
    XWon,
    OWon,
    Tie,
}

impl GameOutcome {
    pub fn is_decided(&self) -> bool {
        *self != GameOutcome::Undecided
    }

    pub fn winner(&self) -> Option<Mark> {
        match self {
            GameOutcome::XWon => Some(Mark::X),
            GameOutcome::OWon => Some(Mark::O),
            GameOutcome::Undecided | GameOutcome::Tie => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinningLine {
    pub mark: Mark,
    pub cells: [Position; 3],
}

impl WinningLine {
    pub fn new(mark: Mark, cells: [Position; 3]) -> Self {
        Self { mark, cells }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_flips_players() {
        assert_eq!(Mark::X.opponent(), Some(Mark::O));
        assert_eq!(Mark::O.opponent(), Some(Mark::X));
        assert_eq!(Mark::Empty.opponent(), None);
    }

    #[test]
    fn test_parse_symbols() {
        assert_eq!("x".parse::<Mark>(), Ok(Mark::X));
        assert_eq!("O".parse::<Mark>(), Ok(Mark::O));
        assert_eq!(
            "z".parse::<Mark>(),
            Err(EngineError::InvalidSymbol("z".to_string()))
        );
        assert!("".parse::<Mark>().is_err());
    }

    #[test]
    fn test_empty_is_not_a_player() {
        assert!(Mark::Empty.as_player().is_err());
        assert_eq!(Mark::O.as_player(), Ok(Mark::O));
    }

    #[test]
    fn test_position_bounds() {
        assert!(Position::new(2, 2).is_on_board());
        assert!(!Position::new(3, 0).is_on_board());
        assert!(!Position::new(0, 3).is_on_board());
    }
}
