//! Optimal solver for the sliding-tile puzzle.
//!
//! A best-first (A*) search over board configurations ranks its frontier by moves
//! made plus a heuristic estimate of moves left, and reports either the shortest move
//! sequence to the goal or that the goal is out of reach.

pub mod board;
pub mod error;
pub mod heuristic;
pub mod moves;
pub mod search;

pub use board::{Board, EightPuzzle, Key, BLANK};
pub use error::{ParseBoardError, ParseHeuristicError};
pub use heuristic::{Goal, Heuristic};
pub use moves::Move;
pub use search::{Outcome, Solution, Solver, Stats};
