use std::{fmt::Display, str::FromStr};

use itertools::Itertools;
use smallvec::{smallvec, SmallVec};

use crate::{
    board::{Board, Key, BLANK},
    error::ParseHeuristicError,
};

/// The target board, indexed by tile so distances are a lookup.
#[derive(Clone, Debug)]
pub struct Goal<const N: usize> {
    board: Board<N>,
    key: Key,
    positions: SmallVec<[(usize, usize); 16]>,
}

impl<const N: usize> Goal<N> {
    pub fn new(board: Board<N>) -> Self {
        let mut positions = smallvec![(0, 0); Board::<N>::SQR_SIZE];
        for (pos, tile) in board.tiles() {
            positions[tile as usize] = pos;
        }

        Goal {
            board,
            key: board.key(),
            positions,
        }
    }

    pub fn board(&self) -> &Board<N> {
        &self.board
    }

    pub fn key(&self) -> Key {
        self.key
    }

    pub fn position_of(&self, tile: u8) -> (usize, usize) {
        self.positions[tile as usize]
    }
}

impl<const N: usize> Default for Goal<N> {
    fn default() -> Self {
        Goal::new(Board::goal())
    }
}

/// Estimate of the moves left to reach the goal. Both modes never overestimate, and
/// change by at most one per slide.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Heuristic {
    /// Numbered tiles not on their goal cell.
    Misplaced,
    /// Sum of each numbered tile's row and column distance from its goal cell.
    #[default]
    Manhattan,
}

impl Heuristic {
    pub fn estimate<const N: usize>(self, board: &Board<N>, goal: &Goal<N>) -> u32 {
        match self {
            Heuristic::Misplaced => misplaced_tiles(board, goal),
            Heuristic::Manhattan => manhattan_distance(board, goal),
        }
    }
}

// the blank is left out: counting it would score a board one slide from the goal as 2
pub fn misplaced_tiles<const N: usize>(board: &Board<N>, goal: &Goal<N>) -> u32 {
    board
        .cells()
        .zip_eq(goal.board().cells())
        .filter(|&(b, t)| b != BLANK && b != t)
        .count() as u32
}

pub fn manhattan_distance<const N: usize>(board: &Board<N>, goal: &Goal<N>) -> u32 {
    board
        .tiles()
        .filter(|&(_, tile)| tile != BLANK)
        .map(|((i, j), tile)| {
            let (gi, gj) = goal.position_of(tile);
            (i.abs_diff(gi) + j.abs_diff(gj)) as u32
        })
        .sum()
}

impl Display for Heuristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Heuristic::Misplaced => "misplaced",
            Heuristic::Manhattan => "manhattan",
        })
    }
}

impl FromStr for Heuristic {
    type Err = ParseHeuristicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "misplaced" => Ok(Heuristic::Misplaced),
            "1" | "manhattan" | "distance" => Ok(Heuristic::Manhattan),
            _ => Err(ParseHeuristicError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::board::EightPuzzle;

    fn board(s: &str) -> EightPuzzle {
        s.parse().unwrap()
    }

    #[test]
    fn zero_only_at_goal() {
        let goal = Goal::default();
        for h in [Heuristic::Misplaced, Heuristic::Manhattan] {
            assert_eq!(h.estimate(&EightPuzzle::goal(), &goal), 0);
            assert!(h.estimate(&board("1 2 3 4 5 6 7 0 8"), &goal) > 0);
        }
    }

    #[test]
    fn one_slide_from_goal() {
        let goal = Goal::default();
        let b = board("1 2 3 4 5 6 7 0 8");
        assert_eq!(misplaced_tiles(&b, &goal), 1);
        assert_eq!(manhattan_distance(&b, &goal), 1);
    }

    #[test]
    fn sample_board() {
        let goal = Goal::default();
        let b = board("5 6 8 3 4 2 1 7 0");
        assert_eq!(Heuristic::Misplaced.estimate(&b, &goal), 8);
        assert_eq!(Heuristic::Manhattan.estimate(&b, &goal), 16);
    }

    #[test]
    fn custom_goal() {
        let goal = Goal::new(board("0 1 2 3 4 5 6 7 8"));
        assert_eq!(goal.position_of(0), (0, 0));
        assert_eq!(goal.position_of(8), (2, 2));

        let b = EightPuzzle::goal();
        assert_eq!(misplaced_tiles(&b, &goal), 8);
        // every tile sits one cell before its target; 3 and 6 also have to change rows
        assert_eq!(manhattan_distance(&b, &goal), 6 + 2 * 3);
    }

    #[test]
    fn parses_selector() {
        assert_eq!("0".parse(), Ok(Heuristic::Misplaced));
        assert_eq!("Manhattan".parse(), Ok(Heuristic::Manhattan));
        assert_eq!("1".parse(), Ok(Heuristic::Manhattan));
        assert!("euclid".parse::<Heuristic>().is_err());
        assert_eq!(Heuristic::default(), Heuristic::Manhattan);
    }
}
