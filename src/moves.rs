use std::fmt::Display;

use smallvec::SmallVec;

use crate::board::{Board, BLANK};

/// A slide, named after the direction the tile next to the blank travels in.
///
/// `Up` pulls the tile below the blank up into it, so the blank itself moves down.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// Generation order; decides which of two equally ranked successors is seen first.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Offset from the blank to the tile that slides into it.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Move::Up => (1, 0),
            Move::Down => (-1, 0),
            Move::Left => (0, 1),
            Move::Right => (0, -1),
        }
    }

    pub fn opposite(self) -> Move {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Move::Up => "UP",
            Move::Down => "DOWN",
            Move::Left => "LEFT",
            Move::Right => "RIGHT",
        })
    }
}

// position of the tile that `m` would pull into the blank at `blank`
fn source<const N: usize>(blank: (usize, usize), m: Move) -> Option<(usize, usize)> {
    let (di, dj) = m.offset();
    let i = blank.0.checked_add_signed(di)?;
    let j = blank.1.checked_add_signed(dj)?;
    (i < N && j < N).then_some((i, j))
}

impl<const N: usize> Board<N> {
    /// Directions that can be played, in [`Move::ALL`] order.
    pub fn legal_moves(&self) -> SmallVec<[Move; 4]> {
        let blank = self.blank();
        Move::ALL
            .into_iter()
            .filter(|&m| source::<N>(blank, m).is_some())
            .collect()
    }

    /// The board after sliding `m`, or `None` when the blank sits on the edge that move
    /// would need to pull a tile across.
    pub fn slide(&self, m: Move) -> Option<Board<N>> {
        self.slide_from(self.blank(), m)
    }

    fn slide_from(&self, blank: (usize, usize), m: Move) -> Option<Board<N>> {
        let from = source::<N>(blank, m)?;

        let mut next = *self;
        next[blank] = self[from];
        next[from] = BLANK;
        Some(next)
    }

    /// Lazily yields `(move, board)` for every legal slide. The blank is located once.
    pub fn successors(&self) -> impl Iterator<Item = (Move, Board<N>)> {
        let board = *self;
        let blank = self.blank();
        Move::ALL
            .into_iter()
            .filter_map(move |m| board.slide_from(blank, m).map(|b| (m, b)))
    }

    /// Plays `moves` in order, stopping at the first illegal one.
    pub fn replay(&self, moves: impl IntoIterator<Item = Move>) -> Option<Board<N>> {
        moves.into_iter().try_fold(*self, |board, m| board.slide(m))
    }
}

#[cfg(test)]
mod test {
    use itertools::Itertools;

    use super::*;
    use crate::board::EightPuzzle;

    fn board(s: &str) -> EightPuzzle {
        s.parse().unwrap()
    }

    #[test]
    fn blank_in_last_cell() {
        let goal = EightPuzzle::goal();
        assert_eq!(goal.legal_moves().as_slice(), &[Move::Down, Move::Right]);
        assert_eq!(goal.slide(Move::Up), None);
        assert_eq!(goal.slide(Move::Left), None);

        assert_eq!(goal.slide(Move::Down), Some(board("1 2 3 4 5 0 7 8 6")));
        assert_eq!(goal.slide(Move::Right), Some(board("1 2 3 4 5 6 7 0 8")));
    }

    #[test]
    fn blank_in_first_cell() {
        let b = board("0 1 2 3 4 5 6 7 8");
        assert_eq!(b.legal_moves().as_slice(), &[Move::Up, Move::Left]);
        assert_eq!(b.slide(Move::Up), Some(board("3 1 2 0 4 5 6 7 8")));
        assert_eq!(b.slide(Move::Left), Some(board("1 0 2 3 4 5 6 7 8")));
    }

    #[test]
    fn centre_blank_has_four_successors_in_order() {
        let b = board("1 2 3 4 0 5 6 7 8");
        let successors = b.successors().collect_vec();
        assert_eq!(
            successors,
            vec![
                (Move::Up, board("1 2 3 4 7 5 6 0 8")),
                (Move::Down, board("1 0 3 4 2 5 6 7 8")),
                (Move::Left, board("1 2 3 4 5 0 6 7 8")),
                (Move::Right, board("1 2 3 0 4 5 6 7 8")),
            ]
        );
    }

    #[test]
    fn opposite_undoes_slide() {
        let b = board("5 6 8 3 4 2 1 7 0");
        for (m, next) in b.successors() {
            assert_eq!(next.slide(m.opposite()), Some(b));
        }
    }

    #[test]
    fn replay_stops_on_illegal_move() {
        let b = board("1 2 3 4 5 6 0 7 8");
        assert_eq!(
            b.replay([Move::Left, Move::Left]),
            Some(EightPuzzle::goal())
        );
        assert_eq!(b.replay([Move::Right]), None);
        assert_eq!(b.replay(Vec::new()), Some(b));
    }
}
