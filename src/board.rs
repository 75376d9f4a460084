use std::{
    fmt::{Display, Write},
    ops::{Index, IndexMut},
    str::FromStr,
};

use itertools::Itertools;
use smallvec::{smallvec, SmallVec};

use crate::error::ParseBoardError;

pub const BLANK: u8 = 0;

/// Injective encoding of a board, used to identify states during search.
pub type Key = u64;

/// A `N`×`N` sliding-tile configuration, stored row-major. `0` is the blank.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Board<const N: usize> {
    cells: [[u8; N]; N],
}

pub type EightPuzzle = Board<3>;

impl<const N: usize> Board<N> {
    pub const SQR_SIZE: usize = N * N;

    // keys are SQR_SIZE digits in base SQR_SIZE; 16^16 - 1 is the largest that fits a u64
    const SUPPORTED: () = assert!(N >= 2 && N <= 4, "board side must be between 2 and 4");

    /// The solved configuration `1, 2, …, N*N-1, 0`.
    pub fn goal() -> Self {
        let () = Self::SUPPORTED;

        let mut cells = [[BLANK; N]; N];
        for (ix, cell) in cells.iter_mut().flatten().enumerate() {
            *cell = ((ix + 1) % Self::SQR_SIZE) as u8;
        }

        Board { cells }
    }

    /// Builds a board from row-major tiles, checking that they form a permutation of
    /// `0..N*N`.
    pub fn from_cells(tiles: &[u8]) -> Result<Self, ParseBoardError> {
        let () = Self::SUPPORTED;

        if tiles.len() != Self::SQR_SIZE {
            return Err(ParseBoardError::WrongLength {
                expected: Self::SQR_SIZE,
                found: tiles.len(),
            });
        }

        let mut seen: SmallVec<[bool; 16]> = smallvec![false; Self::SQR_SIZE];
        let mut cells = [[BLANK; N]; N];
        for (cell, &value) in cells.iter_mut().flatten().zip(tiles) {
            if value as usize >= Self::SQR_SIZE {
                return Err(ParseBoardError::OutOfRange {
                    value: value as usize,
                    max: Self::SQR_SIZE - 1,
                });
            }

            if std::mem::replace(&mut seen[value as usize], true) {
                return Err(ParseBoardError::Duplicate(value));
            }

            *cell = value;
        }

        Ok(Board { cells })
    }

    pub fn cells(&self) -> impl Iterator<Item = u8> + '_ {
        self.cells.iter().flatten().copied()
    }

    /// Every tile together with its `(row, column)`.
    pub fn tiles(&self) -> impl Iterator<Item = ((usize, usize), u8)> + '_ {
        self.cells().enumerate().map(|(ix, t)| ((ix / N, ix % N), t))
    }

    pub fn key(&self) -> Key {
        let () = Self::SUPPORTED;
        self.cells()
            .fold(0, |key, tile| key * Self::SQR_SIZE as Key + tile as Key)
    }

    pub fn position_of(&self, tile: u8) -> Option<(usize, usize)> {
        self.tiles().find(|&(_, t)| t == tile).map(|(pos, _)| pos)
    }

    pub fn blank(&self) -> (usize, usize) {
        // a board always holds exactly one blank
        self.position_of(BLANK).unwrap_or((0, 0))
    }

    /// Whether `goal` is reachable from this board.
    ///
    /// Each slide either leaves the order of the numbered tiles alone (horizontal) or
    /// carries one tile past `N - 1` others (vertical). For odd `N` that keeps the
    /// inversion parity fixed; for even `N` it flips it while moving the blank one row,
    /// so inversions plus blank-row distance keeps its parity instead.
    pub fn is_solvable_towards(&self, goal: &Board<N>) -> bool {
        let mut goal_index: SmallVec<[usize; 16]> = smallvec![0; Self::SQR_SIZE];
        for (ix, tile) in goal.cells().enumerate() {
            goal_index[tile as usize] = ix;
        }

        let order: SmallVec<[usize; 16]> = self
            .cells()
            .filter(|&t| t != BLANK)
            .map(|t| goal_index[t as usize])
            .collect();

        let inversions = order
            .iter()
            .tuple_combinations()
            .filter(|&(a, b)| a > b)
            .count();

        if N % 2 == 1 {
            inversions % 2 == 0
        } else {
            (inversions + self.blank().0.abs_diff(goal.blank().0)) % 2 == 0
        }
    }
}

impl<const N: usize> Display for Board<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = (Self::SQR_SIZE - 1).to_string().len();

        let mut first = true;
        for row in &self.cells {
            if !first {
                f.write_char('\n')?;
            } else {
                first = false;
            }

            write!(f, "{}", row.iter().map(|t| format!("{:>width$}", t)).join(" "))?;
        }

        Ok(())
    }
}

impl<const N: usize> Index<(usize, usize)> for Board<N> {
    type Output = u8;
    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.cells[index.0][index.1]
    }
}

impl<const N: usize> IndexMut<(usize, usize)> for Board<N> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        &mut self.cells[index.0][index.1]
    }
}

impl<const N: usize> FromStr for Board<N> {
    type Err = ParseBoardError;

    /// Tiles in row-major order, separated by whitespace and/or commas.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tiles = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
            .map(|token| {
                let value: usize = token
                    .parse()
                    .map_err(|_| ParseBoardError::InvalidToken(token.to_string()))?;
                if value >= Self::SQR_SIZE {
                    return Err(ParseBoardError::OutOfRange {
                        value,
                        max: Self::SQR_SIZE - 1,
                    });
                }
                Ok(value as u8)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Board::from_cells(&tiles)
    }
}

#[cfg(test)]
mod test {
    use rustc_hash::FxHashSet;

    use super::*;

    #[test]
    fn goal_layout() {
        let goal = EightPuzzle::goal();
        assert_eq!(goal.cells().collect_vec(), vec![1, 2, 3, 4, 5, 6, 7, 8, 0]);
        assert_eq!(goal.blank(), (2, 2));
        assert_eq!(goal[(1, 0)], 4);

        let goal = Board::<4>::goal();
        assert_eq!(goal.blank(), (3, 3));
        assert_eq!(goal[(0, 3)], 4);
    }

    #[test]
    fn parses_whitespace_and_commas() {
        let board: EightPuzzle = "5 6 8\n3,4,2\n1 7 0".parse().unwrap();
        assert_eq!(board.cells().collect_vec(), vec![5, 6, 8, 3, 4, 2, 1, 7, 0]);
        assert_eq!(board.blank(), (2, 2));
        assert_eq!(board.position_of(3), Some((1, 0)));
    }

    #[test]
    fn rejects_malformed_boards() {
        assert_eq!(
            "1 2 3".parse::<EightPuzzle>(),
            Err(ParseBoardError::WrongLength {
                expected: 9,
                found: 3
            })
        );
        assert_eq!(
            "1 2 3 4 5 6 7 8 9".parse::<EightPuzzle>(),
            Err(ParseBoardError::OutOfRange { value: 9, max: 8 })
        );
        assert_eq!(
            "1 2 3 4 5 6 7 8 8".parse::<EightPuzzle>(),
            Err(ParseBoardError::Duplicate(8))
        );
        assert_eq!(
            "1 2 x 4 5 6 7 8 0".parse::<EightPuzzle>(),
            Err(ParseBoardError::InvalidToken("x".to_string()))
        );
    }

    #[test]
    fn keys_are_injective() {
        let small: FxHashSet<Key> = (0..4u8)
            .permutations(4)
            .map(|p| Board::<2>::from_cells(&p).unwrap().key())
            .collect();
        assert_eq!(small.len(), 24);

        let keys: FxHashSet<Key> = (0..9u8)
            .permutations(9)
            .map(|p| EightPuzzle::from_cells(&p).unwrap().key())
            .collect();
        assert_eq!(keys.len(), 362_880);
    }

    #[test]
    fn largest_key_fits() {
        let reversed = (0..16u8).rev().collect_vec();
        let board = Board::<4>::from_cells(&reversed).unwrap();
        assert_eq!(board.key(), 0xFEDC_BA98_7654_3210);
    }

    #[test]
    fn parity_on_odd_board() {
        let goal = EightPuzzle::goal();
        assert!(goal.is_solvable_towards(&goal));

        let swapped: EightPuzzle = "1 2 3 4 5 6 8 7 0".parse().unwrap();
        assert!(!swapped.is_solvable_towards(&goal));

        let sample: EightPuzzle = "5 6 8 3 4 2 1 7 0".parse().unwrap();
        assert!(sample.is_solvable_towards(&goal));
    }

    #[test]
    fn parity_on_even_board() {
        let goal = Board::<4>::goal();

        // blank one row up: tile 12 drops past three others
        let raised: Board<4> = "1 2 3 4 5 6 7 8 9 10 11 0 13 14 15 12".parse().unwrap();
        assert!(raised.is_solvable_towards(&goal));

        let swapped: Board<4> = "1 2 3 4 5 6 7 8 9 10 11 12 13 15 14 0".parse().unwrap();
        assert!(!swapped.is_solvable_towards(&goal));

        let raised_swapped: Board<4> =
            "1 2 3 4 5 6 7 8 9 10 11 0 13 15 14 12".parse().unwrap();
        assert!(!raised_swapped.is_solvable_towards(&goal));
    }

    #[test]
    fn display_pads_to_widest_tile() {
        assert_eq!(EightPuzzle::goal().to_string(), "1 2 3\n4 5 6\n7 8 0");
        assert!(Board::<4>::goal().to_string().ends_with("13 14 15  0"));
    }
}
