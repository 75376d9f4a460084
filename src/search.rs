use std::collections::{hash_map::Entry, BTreeSet};

use auto_enums::auto_enum;
use rustc_hash::FxHashMap;

use crate::{
    board::{Board, Key},
    heuristic::{Goal, Heuristic},
    moves::Move,
};

/// Search configuration: which heuristic ranks the frontier and which board is the goal.
#[derive(Clone, Debug)]
pub struct Solver<const N: usize> {
    heuristic: Heuristic,
    goal: Goal<N>,
    precheck: bool,
}

impl<const N: usize> Solver<N> {
    pub fn new(heuristic: Heuristic) -> Self {
        Solver {
            heuristic,
            goal: Goal::default(),
            precheck: false,
        }
    }

    pub fn with_goal(mut self, goal: Board<N>) -> Self {
        self.goal = Goal::new(goal);
        self
    }

    /// Report boards of the wrong parity as unsolvable without searching. Off by default,
    /// in which case they are only recognised once the frontier runs dry.
    pub fn with_precheck(mut self, precheck: bool) -> Self {
        self.precheck = precheck;
        self
    }

    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    pub fn goal(&self) -> &Goal<N> {
        &self.goal
    }

    pub fn solve(&self, initial: &Board<N>) -> Outcome {
        if self.precheck && !initial.is_solvable_towards(self.goal.board()) {
            tracing::debug!("parity check rejected board without searching");
            return Outcome::Unsolvable(Stats::default());
        }

        SearchRun::new(self, initial).run()
    }
}

/// Counters describing one search.
///
/// Every discovered board stays in memory until the run ends, so `distinct` is also the
/// number of nodes held at the end; it grows combinatorially past the 3×3 board.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Stats {
    /// The initial board plus every successor generated, repeats included.
    pub generated: usize,
    /// Distinct boards ever discovered.
    pub distinct: usize,
    /// Boards taken off the frontier.
    pub expanded: usize,
    /// Closed boards put back on the frontier after a cheaper path turned up.
    pub reopened: usize,
    pub peak_frontier: usize,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Solution {
    pub moves: Vec<Move>,
    pub stats: Stats,
}

impl Solution {
    pub fn cost(&self) -> usize {
        self.moves.len()
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Outcome {
    Solved(Solution),
    /// Every board reachable from the start was expanded without meeting the goal.
    Unsolvable(Stats),
}

impl Outcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, Outcome::Solved(_))
    }

    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Outcome::Solved(solution) => Some(solution),
            Outcome::Unsolvable(_) => None,
        }
    }

    pub fn stats(&self) -> &Stats {
        match self {
            Outcome::Solved(solution) => &solution.stats,
            Outcome::Unsolvable(stats) => stats,
        }
    }

    #[auto_enum(Iterator)]
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        match self {
            Outcome::Solved(solution) => solution.moves.iter().copied(),
            Outcome::Unsolvable(_) => std::iter::empty(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Status {
    Open,
    Closed,
}

#[derive(Clone, Debug)]
struct Node<const N: usize> {
    board: Board<N>,
    g: u32,
    h: u32,
    status: Status,
    // edge this board was reached by on its cheapest known path; `None` for the start
    parent: Option<(Key, Move)>,
}

impl<const N: usize> Node<N> {
    fn f(&self) -> u32 {
        self.g + self.h
    }
}

/// State of a single best-first search. Lives only as long as one `solve` call.
struct SearchRun<'s, const N: usize> {
    solver: &'s Solver<N>,
    // ordered by (f, key); a node's entry is removed before its g changes
    frontier: BTreeSet<(u32, Key)>,
    nodes: FxHashMap<Key, Node<N>>,
    stats: Stats,
}

impl<'s, const N: usize> SearchRun<'s, N> {
    fn new(solver: &'s Solver<N>, initial: &Board<N>) -> Self {
        let mut run = SearchRun {
            solver,
            frontier: BTreeSet::new(),
            nodes: FxHashMap::default(),
            stats: Stats::default(),
        };

        let key = initial.key();
        let h = solver.heuristic.estimate(initial, &solver.goal);
        run.nodes.insert(
            key,
            Node {
                board: *initial,
                g: 0,
                h,
                status: Status::Open,
                parent: None,
            },
        );
        run.frontier.insert((h, key));
        run.stats.generated = 1;
        run.stats.peak_frontier = 1;

        run
    }

    fn run(mut self) -> Outcome {
        tracing::debug!(heuristic = %self.solver.heuristic, "starting search");

        while let Some(key) = self.pop() {
            if key == self.solver.goal.key() {
                let moves = self.path_to(key);
                let stats = self.finish();
                tracing::debug!(moves = moves.len(), ?stats, "solved");
                return Outcome::Solved(Solution { moves, stats });
            }

            self.expand(key);
        }

        let stats = self.finish();
        tracing::debug!(?stats, "frontier exhausted");
        Outcome::Unsolvable(stats)
    }

    /// Takes the lowest `(f, key)` entry off the frontier and closes it.
    fn pop(&mut self) -> Option<Key> {
        let (_, key) = self.frontier.pop_first()?;
        if let Some(node) = self.nodes.get_mut(&key) {
            node.status = Status::Closed;
        }
        self.stats.expanded += 1;
        Some(key)
    }

    fn expand(&mut self, key: Key) {
        let Some(node) = self.nodes.get(&key) else {
            return;
        };

        let (board, g) = (node.board, node.g);
        for (m, child) in board.successors() {
            self.relax(key, g, m, child);
        }
    }

    /// Records `child` as reached from `parent` (at cost `parent_g`) by `m`, inserting,
    /// improving or reopening it as needed.
    fn relax(&mut self, parent: Key, parent_g: u32, m: Move, child: Board<N>) {
        self.stats.generated += 1;

        let key = child.key();
        let g = parent_g + 1;

        match self.nodes.entry(key) {
            Entry::Vacant(slot) => {
                let h = self.solver.heuristic.estimate(&child, &self.solver.goal);
                slot.insert(Node {
                    board: child,
                    g,
                    h,
                    status: Status::Open,
                    parent: Some((parent, m)),
                });
                self.frontier.insert((g + h, key));
            }
            Entry::Occupied(mut slot) => {
                let node = slot.get_mut();
                if g >= node.g {
                    return;
                }

                match node.status {
                    Status::Open => {
                        self.frontier.remove(&(node.f(), key));
                    }
                    Status::Closed => {
                        tracing::trace!(key, from = node.g, to = g, "reopening");
                        node.status = Status::Open;
                        self.stats.reopened += 1;
                    }
                }

                node.g = g;
                node.parent = Some((parent, m));
                self.frontier.insert((node.f(), key));
            }
        }

        self.stats.peak_frontier = self.stats.peak_frontier.max(self.frontier.len());
    }

    /// Moves from the start to `key`, following parent edges back to the start.
    fn path_to(&self, key: Key) -> Vec<Move> {
        let mut moves = Vec::new();
        let mut current = key;
        while let Some((parent, m)) = self.nodes.get(&current).and_then(|node| node.parent) {
            moves.push(m);
            current = parent;
        }

        moves.reverse();
        moves
    }

    fn finish(&self) -> Stats {
        Stats {
            distinct: self.nodes.len(),
            ..self.stats
        }
    }
}
