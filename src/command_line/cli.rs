#![allow(clippy::cast_precision_loss)]

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use log::{debug, warn};
use search_lab::csp::backtracking::{BacktrackingConfig, BacktrackingSolver, CspStats};
use search_lab::csp::heuristics::{ValueOrdering, VariableOrdering};
use search_lab::csp::map_coloring::australia;
use search_lab::csp::problem::Csp;
use search_lab::error::{self, Error, Result};
use search_lab::graph::{Graph, shortest_path};
use search_lab::kb::facts::FactBase;
use search_lab::kb::query::ask;
use search_lab::puzzle::board::{GOAL, Puzzle};
use search_lab::puzzle::solver::{self as puzzle_solver, Algorithm, parse_puzzle_file};
use search_lab::queens::min_conflicts::{
    self, DEFAULT_MAX_RESTARTS, DEFAULT_MAX_STEPS, MinConflictsConfig,
};
use search_lab::queens::board::Placement;
use search_lab::queens::{MAX_EXHAUSTIVE_N, Method, QueensStats, Solver, backtracking, bfs};
use search_lab::search::SearchStats;
use search_lab::search::dfs::DEFAULT_DEPTH_LIMIT;
use search_lab::sudoku::solver::{EXAMPLE_NINE, Sudoku, parse_sudoku_file};
use search_lab::tictactoe::game::play;
use search_lab::tictactoe::minimax::Strategy;
use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tikv_jemalloc_ctl::{epoch, stats};

use crate::command_line::menu;

/// Start position used when no puzzle is given.
pub(crate) const DEMO_PUZZLE: &str = "1 2 3 4 0 6 7 5 8";

/// Defines the command-line interface for the search-lab application.
///
/// Uses `clap` for parsing arguments. Without a subcommand the interactive
/// menu is started.
#[derive(Parser, Debug)]
#[command(
    name = "search-lab",
    version,
    about = "Classical AI search: BFS/DFS, A*, CSP, minimax and N-Queens"
)]
pub(crate) struct Cli {
    /// Specifies the subcommand to execute (e.g. `puzzle`, `csp`, `queens`).
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Which constraint problem the `csp` subcommand solves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum CspProblem {
    /// Three-colour the map of Australia.
    #[default]
    Australia,
    /// Solve a Sudoku (the classic example unless `--path` is given).
    Sudoku,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve an 8-puzzle with BFS, depth-limited DFS, iterative deepening or A*.
    Puzzle {
        /// File holding nine tiles (0 is the blank).
        #[arg(long, conflicts_with = "tiles")]
        path: Option<PathBuf>,

        /// The nine tiles inline, e.g. "1 2 3 4 0 6 7 5 8".
        #[arg(long)]
        tiles: Option<String>,

        /// Goal configuration; defaults to "1 2 3 4 5 6 7 8 0".
        #[arg(long)]
        goal: Option<String>,

        #[arg(long, value_enum, default_value_t)]
        algorithm: Algorithm,

        /// Depth cutoff for `dfs` and `iddfs`.
        #[arg(long, default_value_t = DEFAULT_DEPTH_LIMIT)]
        depth_limit: usize,
    },

    /// Solve a constraint satisfaction problem with backtracking and AC-3.
    Csp {
        #[arg(value_enum, default_value_t)]
        problem: CspProblem,

        /// Sudoku file (one row per line, `0` or `.` for blanks).
        #[arg(long)]
        path: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t)]
        variable_ordering: VariableOrdering,

        #[arg(long, value_enum, default_value_t)]
        value_ordering: ValueOrdering,

        /// Only check constraints against assigned neighbours; skip AC-3 after each assignment.
        #[arg(long, default_value_t = false)]
        no_inference: bool,
    },

    /// Find the cheapest path in a weighted graph with A*.
    Route {
        /// Graph file (`edge <from> <to> <cost>` and `h <node> <estimate>` lines);
        /// defaults to the built-in A–G graph.
        #[arg(long)]
        path: Option<PathBuf>,

        #[arg(long, default_value = "A")]
        from: String,

        #[arg(long, default_value = "G")]
        to: String,
    },

    /// Query the family-tree knowledge base.
    Kb {
        /// Fact file of `parent(x, y).` lines; defaults to the built-in family.
        #[arg(long)]
        facts: Option<PathBuf>,

        /// Queries to answer, e.g. "parents of mary". Reads queries from
        /// standard input when none are given.
        #[arg(short, long)]
        query: Vec<String>,
    },

    /// Play Tic-Tac-Toe against a minimax AI.
    Tictactoe {
        #[arg(long, value_enum, default_value_t)]
        strategy: Strategy,

        /// Let the AI make the first move.
        #[arg(long, default_value_t = false)]
        ai_starts: bool,
    },

    /// Place N non-attacking queens.
    Queens {
        /// Board size.
        #[arg(short, long, default_value_t = 8)]
        n: usize,

        #[arg(long, value_enum, default_value_t)]
        method: Method,

        /// Repair steps per random start (min-conflicts).
        #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
        max_steps: usize,

        /// Random starts before giving up (min-conflicts).
        #[arg(long, default_value_t = DEFAULT_MAX_RESTARTS)]
        max_restarts: usize,

        /// Seed for min-conflicts, for reproducible runs.
        #[arg(long)]
        seed: Option<u64>,

        /// Print every backtracking solution instead of a sample.
        #[arg(long, default_value_t = false)]
        all: bool,
    },

    /// Solve every `.puzzle` and `.sudoku` file under a directory.
    Batch {
        path: PathBuf,

        /// Strategy for `.puzzle` files.
        #[arg(long, value_enum, default_value_t = Algorithm::AStar)]
        algorithm: Algorithm,
    },

    /// Interactive text menus.
    Menu,

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct CommonOptions {
    /// Enable debug output, providing more verbose logging during the search.
    #[arg(short, long, global = true, default_value_t = false)]
    pub(crate) debug: bool,

    /// Do not print the statistics table after solving.
    #[arg(long, global = true, default_value_t = false)]
    pub(crate) no_stats: bool,

    /// Print every state on a solution path instead of only the last one.
    #[arg(short, long, global = true, default_value_t = false)]
    pub(crate) print_path: bool,
}

/// Runs the parsed command line against the process's standard streams.
///
/// # Errors
///
/// Any input, parse or terminal failure.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut out = stdout.lock();
    let command = cli.command.unwrap_or(Commands::Menu);
    dispatch(command, &cli.common, &mut input, &mut out)
}

/// Executes one subcommand, reading interactive input from `input`.
///
/// # Errors
///
/// Any input, parse or terminal failure.
pub(crate) fn dispatch(
    command: Commands,
    common: &CommonOptions,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        Commands::Puzzle {
            path,
            tiles,
            goal,
            algorithm,
            depth_limit,
        } => {
            let time = Instant::now();
            let start = match (path, tiles) {
                (Some(path), _) => parse_puzzle_file(&path)?,
                (None, Some(tiles)) => tiles.parse()?,
                (None, None) => DEMO_PUZZLE.parse()?,
            };
            let goal = goal.map_or(Ok(GOAL), |g| g.parse::<Puzzle>())?;
            debug!("parsed puzzle in {:?}", time.elapsed());
            solve_puzzle(out, start, goal, algorithm, depth_limit, common)?;
        }

        Commands::Csp {
            problem,
            path,
            variable_ordering,
            value_ordering,
            no_inference,
        } => {
            let config = BacktrackingConfig {
                variable_ordering,
                value_ordering,
                inference: !no_inference,
            };
            match problem {
                CspProblem::Australia => {
                    if path.is_some() {
                        warn!("--path is only used for Sudoku");
                    }
                    solve_map(out, &australia(), config, common)?;
                }
                CspProblem::Sudoku => {
                    let sudoku = match path {
                        Some(path) => parse_sudoku_file(&path)?,
                        None => Sudoku::new(EXAMPLE_NINE.into())?,
                    };
                    solve_sudoku(out, &sudoku, config, common)?;
                }
            }
        }

        Commands::Route { path, from, to } => {
            let graph = match path {
                Some(path) => error::read_input(&path)?.parse::<Graph>()?,
                None => Graph::example(),
            };
            solve_route(out, &graph, &from, &to, common)?;
        }

        Commands::Kb { facts, query } => {
            let kb = match facts {
                Some(path) => error::read_input(&path)?.parse::<FactBase>()?,
                None => FactBase::family(),
            };
            if query.is_empty() {
                query_loop(input, out, &kb)?;
            } else {
                for text in &query {
                    answer_query(out, &kb, text)?;
                }
            }
        }

        Commands::Tictactoe {
            strategy,
            ai_starts,
        } => {
            play(input, out, strategy, ai_starts)?;
        }

        Commands::Queens {
            n,
            method,
            max_steps,
            max_restarts,
            seed,
            all,
        } => {
            let config = MinConflictsConfig {
                max_steps,
                max_restarts,
                seed,
            };
            solve_queens(out, n, method, &config, all, common)?;
        }

        Commands::Batch { path, algorithm } => {
            let solved = solve_dir(out, &path, algorithm, common)?;
            writeln!(out, "\nSolved {solved} file(s).")?;
        }

        Commands::Menu => menu::main_menu(input, out, common)?,

        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "search-lab", out);
        }
    }
    Ok(())
}

/// Solves a puzzle and reports the path and statistics.
///
/// Returns whether a solution was found. Starts whose inversion parity
/// differs from the goal's are reported without searching.
///
/// # Errors
///
/// If writing to `out` fails.
pub(crate) fn solve_puzzle(
    out: &mut dyn Write,
    start: Puzzle,
    goal: Puzzle,
    algorithm: Algorithm,
    depth_limit: usize,
    common: &CommonOptions,
) -> Result<bool> {
    writeln!(out, "Start:\n{start}")?;
    if !start.is_solvable_towards(&goal) {
        warn!("start and goal have different inversion parity");
        writeln!(out, "The goal cannot be reached from this start.")?;
        return Ok(false);
    }

    writeln!(out, "Solving with {algorithm}...")?;
    let time = Instant::now();
    let (solution, search) = puzzle_solver::solve(start, goal, algorithm, depth_limit);
    let elapsed = time.elapsed();

    match &solution {
        Some(solution) => {
            writeln!(out, "Solution found in {} moves:", solution.moves())?;
            print_states(out, &solution.path, common.print_path)?;
        }
        None => writeln!(out, "No solution found.")?,
    }

    if !common.no_stats {
        let problem = [
            ("Algorithm", algorithm.to_string()),
            ("Manhattan distance", start.manhattan_distance(&goal).to_string()),
            ("Misplaced tiles", start.misplaced_tiles(&goal).to_string()),
        ];
        print_stats(out, &problem, elapsed, &search_counters(&search))?;
    }
    Ok(solution.is_some())
}

/// Solves a map colouring problem and prints each region's colour.
///
/// # Errors
///
/// If writing to `out` fails.
pub(crate) fn solve_map(
    out: &mut dyn Write,
    csp: &Csp<String>,
    config: BacktrackingConfig,
    common: &CommonOptions,
) -> Result<bool> {
    let time = Instant::now();
    let mut solver = BacktrackingSolver::new(csp, config);
    let solution = solver.solve();
    let elapsed = time.elapsed();

    match &solution {
        Some(values) => {
            writeln!(out, "Map colouring solution:")?;
            for (region, color) in csp.named(values) {
                writeln!(out, "  {region:<4} {color}")?;
            }
            writeln!(out, "Verified: {}", csp.verify(values))?;
        }
        None => writeln!(out, "No solution found.")?,
    }

    if !common.no_stats {
        print_stats(
            out,
            &csp_problem_lines(csp, config),
            elapsed,
            &csp_counters(solver.stats()),
        )?;
    }
    Ok(solution.is_some())
}

/// Solves a Sudoku grid through its constraint network.
///
/// # Errors
///
/// If writing to `out` fails.
pub(crate) fn solve_sudoku(
    out: &mut dyn Write,
    sudoku: &Sudoku,
    config: BacktrackingConfig,
    common: &CommonOptions,
) -> Result<bool> {
    writeln!(out, "Parsed Sudoku:\n{sudoku}")?;

    let time = Instant::now();
    let csp = sudoku.to_csp();
    let mut solver = BacktrackingSolver::new(&csp, config);
    let solution = solver.solve().map(|values| sudoku.decode(&values));
    let elapsed = time.elapsed();

    match &solution {
        Some(grid) => {
            writeln!(out, "Solution:\n{grid}")?;
            writeln!(
                out,
                "Verified: {}",
                grid.is_solved() && sudoku.agrees_with(grid)
            )?;
        }
        None => writeln!(out, "No solution found.")?,
    }

    if !common.no_stats {
        print_stats(
            out,
            &csp_problem_lines(&csp, config),
            elapsed,
            &csp_counters(solver.stats()),
        )?;
    }
    Ok(solution.is_some())
}

/// Runs A* between two graph nodes.
///
/// # Errors
///
/// If writing to `out` fails.
pub(crate) fn solve_route(
    out: &mut dyn Write,
    graph: &Graph,
    from: &str,
    to: &str,
    common: &CommonOptions,
) -> Result<bool> {
    let time = Instant::now();
    let (solution, search) = shortest_path(graph, from, to);
    let elapsed = time.elapsed();

    match &solution {
        Some(route) => writeln!(
            out,
            "Path from {from} to {to}: {}, Cost = {}",
            route.path.join(" -> "),
            route.cost
        )?,
        None => writeln!(out, "No path from {from} to {to}.")?,
    }

    if !common.no_stats {
        let problem = [
            ("Nodes", graph.nodes().len().to_string()),
            ("Edges", graph.edge_count().to_string()),
        ];
        print_stats(out, &problem, elapsed, &search_counters(&search))?;
    }
    Ok(solution.is_some())
}

/// Answers one query, printing the error message for malformed ones.
///
/// # Errors
///
/// If writing to `out` fails.
pub(crate) fn answer_query(out: &mut dyn Write, kb: &FactBase, text: &str) -> Result<()> {
    match ask(kb, text) {
        Ok(answer) => writeln!(out, "Answer: {answer}")?,
        Err(e) => writeln!(out, "Answer: {e}")?,
    }
    Ok(())
}

/// Reads queries until `exit` or end of input.
///
/// # Errors
///
/// If reading `input` or writing to `out` fails.
pub(crate) fn query_loop(input: &mut dyn BufRead, out: &mut dyn Write, kb: &FactBase) -> Result<()> {
    writeln!(out, "Family Tree Knowledge Base Parser")?;
    writeln!(
        out,
        "Examples: 'parents of mary', 'children of john', 'siblings mary and mike', \
         'grandparent john of alice'"
    )?;

    let mut line = String::new();
    loop {
        write!(out, "\nEnter query (or 'exit'): ")?;
        out.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }
        let text = line.trim();
        if text.eq_ignore_ascii_case("exit") {
            break;
        }
        answer_query(out, kb, text)?;
    }
    Ok(())
}

/// Runs the chosen N-Queens solvers one after another.
///
/// # Errors
///
/// If writing to `out` fails.
pub(crate) fn solve_queens(
    out: &mut dyn Write,
    n: usize,
    method: Method,
    config: &MinConflictsConfig,
    print_all: bool,
    common: &CommonOptions,
) -> Result<()> {
    writeln!(out, "====== {n}-Queens Problem ======\n")?;

    let solvers = method.solvers_for(n);
    if solvers != method.solvers() {
        writeln!(
            out,
            "Boards larger than {MAX_EXHAUSTIVE_N} only run min-conflicts.\n"
        )?;
    }

    for (idx, &solver) in solvers.iter().enumerate() {
        writeln!(out, "{}. {solver}:", idx + 1)?;
        let time = Instant::now();
        let stats = match solver {
            Solver::Backtracking if print_all => {
                let (solutions, stats) = backtracking::solve_all(n);
                writeln!(out, "Total Solutions Found: {}\n", solutions.len())?;
                for (i, solution) in solutions.iter().enumerate() {
                    writeln!(out, "Solution {}:\n{solution}", i + 1)?;
                }
                stats
            }
            Solver::Backtracking => {
                let (count, first, stats) = backtracking::count_and_first(n);
                writeln!(out, "Total Solutions Found: {count}\n")?;
                if let Some(sample) = first {
                    writeln!(out, "Sample Solution:\n{sample}")?;
                }
                stats
            }
            Solver::Bfs => {
                let (solution, stats) = bfs::solve(n);
                print_placement(out, solution.as_ref(), "No Solution Found.")?;
                stats
            }
            Solver::MinConflicts => {
                let (solution, stats) = min_conflicts::solve(n, config);
                print_placement(
                    out,
                    solution.as_ref(),
                    "Failed to find solution using Min-Conflicts.",
                )?;
                stats
            }
        };
        let elapsed = time.elapsed();

        if !common.no_stats {
            let problem = [("Board size", n.to_string()), ("Method", solver.to_string())];
            print_stats(out, &problem, elapsed, &queens_counters(&stats))?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn print_placement(
    out: &mut dyn Write,
    solution: Option<&Placement>,
    failure: &str,
) -> io::Result<()> {
    match solution {
        Some(placement) => writeln!(out, "Solution Found:\n{placement}"),
        None => writeln!(out, "{failure}\n"),
    }
}

/// Solves every `.puzzle` and `.sudoku` file under `path`, in file name order.
///
/// Returns the number of files that had a solution.
///
/// # Errors
///
/// If `path` is not a directory, or a file cannot be read or parsed.
pub(crate) fn solve_dir(
    out: &mut dyn Write,
    path: &Path,
    algorithm: Algorithm,
    common: &CommonOptions,
) -> Result<usize> {
    if !path.is_dir() {
        return Err(Error::NotADirectory(path.to_path_buf()));
    }

    let mut solved = 0;
    for entry in walkdir::WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
    {
        let file_path = entry.path();
        let found = match file_path.extension().and_then(|ext| ext.to_str()) {
            Some("puzzle") => {
                writeln!(out, "\nSolving: {}", file_path.display())?;
                let start = parse_puzzle_file(file_path)?;
                solve_puzzle(out, start, GOAL, algorithm, DEFAULT_DEPTH_LIMIT, common)?
            }
            Some("sudoku") => {
                writeln!(out, "\nSolving: {}", file_path.display())?;
                let sudoku = parse_sudoku_file(file_path)?;
                solve_sudoku(out, &sudoku, BacktrackingConfig::default(), common)?
            }
            _ => {
                debug!("skipping {}", file_path.display());
                continue;
            }
        };
        solved += usize::from(found);
    }
    Ok(solved)
}

/// Prints either every state of `path` or only its last one.
fn print_states<S: Display>(out: &mut dyn Write, path: &[S], every: bool) -> io::Result<()> {
    if every {
        for state in path {
            writeln!(out, "{state}\n----")?;
        }
    } else if let Some(last) = path.last() {
        writeln!(out, "Final state:\n{last}")?;
    }
    Ok(())
}

fn search_counters(s: &SearchStats) -> [(&'static str, usize); 4] {
    [
        ("Expanded", s.expanded),
        ("Generated", s.generated),
        ("Pruned", s.pruned),
        ("Max frontier", s.max_frontier),
    ]
}

fn csp_counters(s: &CspStats) -> [(&'static str, usize); 4] {
    [
        ("Assignments", s.assignments),
        ("Backtracks", s.backtracks),
        ("Revisions", s.revisions),
        ("Pruned values", s.pruned_values),
    ]
}

fn queens_counters(s: &QueensStats) -> [(&'static str, usize); 3] {
    [
        ("Nodes", s.nodes),
        ("Steps", s.steps),
        ("Restarts", s.restarts),
    ]
}

fn csp_problem_lines<T>(csp: &Csp<T>, config: BacktrackingConfig) -> [(&'static str, String); 5] {
    [
        ("Variables", csp.len().to_string()),
        ("Binary constraints", (csp.arcs().count() / 2).to_string()),
        ("Variable ordering", config.variable_ordering.to_string()),
        ("Value ordering", config.value_ordering.to_string()),
        ("Inference", if config.inference { "AC-3" } else { "none" }.to_string()),
    ]
}

/// Allocated and resident memory in MiB, as reported by jemalloc.
fn memory_usage() -> Option<(f64, f64)> {
    const MIB: f64 = 1024.0 * 1024.0;
    epoch::advance().ok()?;
    let allocated = stats::allocated::mib().ok()?.read().ok()?;
    let resident = stats::resident::mib().ok()?.read().ok()?;
    Some((allocated as f64 / MIB, resident as f64 / MIB))
}

/// Helper function to print a single statistic line in a formatted table row.
pub(crate) fn stat_line(out: &mut dyn Write, label: &str, value: impl Display) -> io::Result<()> {
    writeln!(out, "|  {label:<28} {value:>18}  |")
}

/// Helper function to print a statistic line that includes a rate (value/second).
pub(crate) fn stat_line_with_rate(
    out: &mut dyn Write,
    label: &str,
    value: usize,
    elapsed: f64,
) -> io::Result<()> {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    writeln!(out, "|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |")
}

/// Prints a summary of problem and search statistics.
///
/// # Arguments
/// * `problem` - Labelled facts about the instance being solved.
/// * `elapsed` - Duration spent by the solver.
/// * `counters` - Work counters reported by the solver, shown with a per-second rate.
pub(crate) fn print_stats(
    out: &mut dyn Write,
    problem: &[(&str, String)],
    elapsed: Duration,
    counters: &[(&str, usize)],
) -> io::Result<()> {
    let elapsed_secs = elapsed.as_secs_f64();

    writeln!(out, "\n=======================[ Problem Statistics ]=========================")?;
    for (label, value) in problem {
        stat_line(out, label, value)?;
    }

    writeln!(out, "========================[ Search Statistics ]========================")?;
    for &(label, value) in counters {
        stat_line_with_rate(out, label, value, elapsed_secs)?;
    }
    if let Some((allocated, resident)) = memory_usage() {
        stat_line(out, "Memory usage (MiB)", format!("{allocated:.2}"))?;
        stat_line(out, "Resident memory (MiB)", format!("{resident:.2}"))?;
    }
    stat_line(out, "CPU time (s)", format!("{elapsed_secs:.3}"))?;
    writeln!(out, "=====================================================================")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn quiet() -> CommonOptions {
        CommonOptions {
            no_stats: true,
            ..CommonOptions::default()
        }
    }

    fn run_args(args: &[&str], stdin: &str) -> Result<String> {
        let cli = Cli::try_parse_from(args).unwrap();
        let mut input = Cursor::new(stdin.as_bytes().to_vec());
        let mut out = Vec::new();
        let command = cli.command.unwrap_or(Commands::Menu);
        dispatch(command, &cli.common, &mut input, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_puzzle_subcommand() {
        let text = run_args(
            &["search-lab", "puzzle", "--tiles", "1 2 3 4 0 6 7 5 8", "--no-stats"],
            "",
        )
        .unwrap();
        assert!(text.contains("Solving with BFS..."));
        assert!(text.contains("Solution found in 2 moves:"));
        assert!(text.contains("Final state:\n[1, 2, 3]\n[4, 5, 6]\n[7, 8, 0]"));
        assert!(!text.contains("Problem Statistics"));
    }

    #[test]
    fn test_puzzle_prints_path_and_stats() {
        let text = run_args(
            &[
                "search-lab",
                "puzzle",
                "--algorithm",
                "a-star",
                "--print-path",
            ],
            "",
        )
        .unwrap();
        assert!(text.contains("Solving with A*..."));
        assert_eq!(text.matches("----\n").count(), 3);
        assert!(text.contains("Problem Statistics"));
        assert!(text.contains("Expanded"));
    }

    #[test]
    fn test_unreachable_goal_is_reported() {
        let start: Puzzle = "2 1 3 4 5 6 7 8 0".parse().unwrap();
        let mut out = Vec::new();
        let found = solve_puzzle(&mut out, start, GOAL, Algorithm::Bfs, 50, &quiet()).unwrap();
        assert!(!found);
        assert!(String::from_utf8(out).unwrap().contains("cannot be reached"));
    }

    #[test]
    fn test_bad_tiles_are_an_error() {
        let err = run_args(&["search-lab", "puzzle", "--tiles", "1 2 3"], "").unwrap_err();
        assert!(matches!(err, Error::Puzzle(_)));
    }

    #[test]
    fn test_csp_subcommands() {
        let text = run_args(&["search-lab", "csp", "australia", "--no-stats"], "").unwrap();
        assert!(text.contains("Map colouring solution:"));
        assert!(text.contains("Verified: true"));

        let text = run_args(&["search-lab", "csp", "sudoku"], "").unwrap();
        assert!(text.contains("Solution:\n5 3 4 | 6 7 8 | 9 1 2"));
        assert!(text.contains("Verified: true"));
        assert!(text.contains("Pruned values"));
    }

    #[test]
    fn test_route_subcommand() {
        let text = run_args(&["search-lab", "route", "--no-stats"], "").unwrap();
        assert!(text.contains("Path from A to G: A -> B -> E -> G, Cost = 4"));

        let text = run_args(&["search-lab", "route", "--from", "G", "--to", "A"], "").unwrap();
        assert!(text.contains("No path from G to A."));
    }

    #[test]
    fn test_kb_queries_and_loop() {
        let text = run_args(
            &["search-lab", "kb", "-q", "parents of mary", "-q", "who is bob"],
            "",
        )
        .unwrap();
        assert_eq!(text, "Answer: john, susan\nAnswer: Query not understood.\n");

        let text = run_args(
            &["search-lab", "kb"],
            "siblings mary and mike\nEXIT\nchildren of john\n",
        )
        .unwrap();
        assert!(text.contains("Answer: yes"));
        assert!(!text.contains("mary, mike"));
    }

    #[test]
    fn test_tictactoe_subcommand() {
        let text = run_args(&["search-lab", "tictactoe", "--ai-starts"], "").unwrap();
        assert!(text.contains("AI plays (0, 0)"));
        assert!(text.ends_with("Game abandoned.\n"));
    }

    #[test]
    fn test_queens_subcommand() {
        let text = run_args(&["search-lab", "queens", "--seed", "3", "--no-stats"], "").unwrap();
        assert!(text.contains("Total Solutions Found: 92"));
        assert!(text.contains("2. Breadth-First Search:"));
        assert!(text.contains("3. Min-Conflicts (Local Search):"));
        assert_eq!(text.matches("Solution Found:").count(), 2);

        let text = run_args(
            &["search-lab", "queens", "-n", "3", "--method", "bfs", "--no-stats"],
            "",
        )
        .unwrap();
        assert!(text.contains("No Solution Found."));
    }

    #[test]
    fn test_large_queens_board_skips_exhaustive_solvers() {
        let text = run_args(
            &["search-lab", "queens", "-n", "16", "--seed", "5", "--no-stats"],
            "",
        )
        .unwrap();
        assert!(text.contains("Boards larger than 12 only run min-conflicts."));
        assert!(text.contains("1. Min-Conflicts (Local Search):"));
        assert!(!text.contains("Backtracking Search"));
        assert!(!text.contains("Breadth-First Search"));
    }

    #[test]
    fn test_backtracking_prints_every_solution_on_request() {
        let text = run_args(
            &["search-lab", "queens", "-n", "6", "--method", "backtracking", "--all", "--no-stats"],
            "",
        )
        .unwrap();
        assert!(text.contains("Total Solutions Found: 4"));
        assert!(text.contains("Solution 4:"));
        assert!(!text.contains("Sample Solution:"));
    }

    #[test]
    fn test_batch_requires_directory() {
        let err = run_args(&["search-lab", "batch", "Cargo.toml"], "").unwrap_err();
        assert!(matches!(err, Error::NotADirectory(_)));
    }

    #[test]
    fn test_batch_solves_supported_files() {
        let dir = std::env::temp_dir().join(format!("search-lab-batch-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("a.puzzle"), "1 2 3\n4 0 6\n7 5 8\n").unwrap();
        std::fs::write(dir.join("b.puzzle"), "2 1 3\n4 5 6\n7 8 0\n").unwrap();
        std::fs::write(dir.join("c.sudoku"), "1 . . 4\n. . 1 .\n. 1 . 3\n4 . . 1\n").unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let mut out = Vec::new();
        let solved = solve_dir(&mut out, &dir, Algorithm::AStar, &quiet()).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(solved, 2);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("a.puzzle"));
        assert!(text.contains("c.sudoku"));
        assert!(!text.contains("notes.txt"));
    }

    #[test]
    fn test_stats_table_layout() {
        let mut out = Vec::new();
        print_stats(
            &mut out,
            &[("Board size", "8".to_string())],
            Duration::from_millis(10),
            &[("Nodes", 100)],
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(&format!("|  {:<28} {:>18}  |", "Board size", 8)));
        assert!(text.contains(&format!("|  {:<20} {:>12} (    10000/sec)  |", "Nodes", 100)));
        assert!(text.contains("CPU time (s)"));
    }

    #[test]
    fn test_completions() {
        let text = run_args(&["search-lab", "completions", "bash"], "").unwrap();
        assert!(text.contains("search-lab"));
    }
}
