use crate::error::{self, Error};
use crate::puzzle::board::{GOAL, Puzzle};
use crate::search::astar::a_star;
use crate::search::bfs::breadth_first;
use crate::search::dfs::{depth_limited, iterative_deepening};
use crate::search::{InformedProblem, SearchProblem, SearchStats, Solution, Successors};
use clap::ValueEnum;
use std::fmt::Display;
use std::path::Path;

/// The 8-puzzle as a search problem: unit step cost, Manhattan heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EightPuzzle {
    start: Puzzle,
    goal: Puzzle,
}

impl EightPuzzle {
    /// Sliding `start` towards `goal`.
    #[must_use]
    pub const fn new(start: Puzzle, goal: Puzzle) -> Self {
        Self { start, goal }
    }

    /// Targets the conventional [`GOAL`].
    #[must_use]
    pub const fn with_default_goal(start: Puzzle) -> Self {
        Self::new(start, GOAL)
    }

    /// The configuration being searched for.
    #[must_use]
    pub const fn goal(&self) -> &Puzzle {
        &self.goal
    }
}

impl SearchProblem for EightPuzzle {
    type State = Puzzle;
    type Cost = u32;

    fn initial_state(&self) -> Puzzle {
        self.start
    }

    fn is_goal(&self, state: &Puzzle) -> bool {
        *state == self.goal
    }

    fn successors(&self, state: &Puzzle) -> Successors<Puzzle, u32> {
        state
            .neighbors()
            .into_iter()
            .map(|(_, next)| (next, 1))
            .collect()
    }
}

impl InformedProblem for EightPuzzle {
    fn heuristic(&self, state: &Puzzle) -> u32 {
        state.manhattan_distance(&self.goal)
    }
}

/// Search strategy used to solve a puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum Algorithm {
    /// Breadth-first search; finds a shortest solution.
    #[default]
    Bfs,
    /// Depth-limited depth-first search.
    Dfs,
    /// Iterative deepening up to the depth limit.
    Iddfs,
    /// A* with the Manhattan-distance heuristic.
    AStar,
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bfs => write!(f, "BFS"),
            Self::Dfs => write!(f, "DFS"),
            Self::Iddfs => write!(f, "Iterative deepening DFS"),
            Self::AStar => write!(f, "A*"),
        }
    }
}

/// Solves `start` towards `goal` with the chosen strategy.
///
/// `depth_limit` only applies to [`Algorithm::Dfs`] and [`Algorithm::Iddfs`].
#[must_use]
pub fn solve(
    start: Puzzle,
    goal: Puzzle,
    algorithm: Algorithm,
    depth_limit: usize,
) -> (Option<Solution<Puzzle, u32>>, SearchStats) {
    let problem = EightPuzzle::new(start, goal);
    match algorithm {
        Algorithm::Bfs => breadth_first(&problem),
        Algorithm::Dfs => depth_limited(&problem, depth_limit),
        Algorithm::Iddfs => iterative_deepening(&problem, depth_limit),
        Algorithm::AStar => a_star(&problem),
    }
}

/// Reads a puzzle from a file holding nine tiles (see [`Puzzle`]'s `FromStr`).
///
/// # Errors
///
/// If the file cannot be read or does not hold a valid puzzle.
pub fn parse_puzzle_file(path: &Path) -> error::Result<Puzzle> {
    let text = error::read_input(path)?;
    text.parse::<Puzzle>().map_err(Error::from)
}
