//! Interactive text menus, one per assignment, reachable from a main menu.
//!
//! Every menu reads one line per choice. End of input backs out of whatever
//! menu is active, so piping a script into the binary always terminates.

use search_lab::csp::backtracking::BacktrackingConfig;
use search_lab::csp::map_coloring::australia;
use search_lab::error::Result;
use search_lab::graph::Graph;
use search_lab::kb::facts::FactBase;
use search_lab::puzzle::board::{GOAL, Puzzle, SIDE};
use search_lab::puzzle::solver::Algorithm;
use search_lab::queens::Method;
use search_lab::queens::min_conflicts::MinConflictsConfig;
use search_lab::search::dfs::DEFAULT_DEPTH_LIMIT;
use search_lab::sudoku::solver::{EXAMPLE_NINE, Sudoku};
use search_lab::tictactoe::game::play;
use search_lab::tictactoe::minimax::Strategy;
use std::io::{BufRead, Write};

use crate::command_line::cli::{
    CommonOptions, DEMO_PUZZLE, query_loop, solve_map, solve_puzzle, solve_queens, solve_route,
    solve_sudoku,
};

const INVALID_CHOICE: &str = "Invalid choice! Please try again.";

/// Writes `text` and reads the reply, trimmed. `None` at end of input.
fn prompt(input: &mut dyn BufRead, out: &mut dyn Write, text: &str) -> Result<Option<String>> {
    write!(out, "{text}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(out)?;
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Prints a numbered menu and reads the choice.
fn choose(
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    title: &str,
    options: &[&str],
) -> Result<Option<String>> {
    writeln!(out, "\n--- {title} ---")?;
    for (i, option) in options.iter().enumerate() {
        writeln!(out, "{}. {option}", i + 1)?;
    }
    prompt(input, out, "Enter choice: ")
}

/// The top-level menu.
///
/// # Errors
///
/// If terminal I/O fails or a built-in demo fails to build.
pub(crate) fn main_menu(
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    common: &CommonOptions,
) -> Result<()> {
    const OPTIONS: [&str; 7] = [
        "8-Puzzle (BFS / DFS)",
        "Constraint Satisfaction (Map Colouring / Sudoku)",
        "Family Tree Knowledge Base",
        "A* Search (Graph / 8-Puzzle)",
        "Tic-Tac-Toe (Minimax)",
        "N-Queens",
        "Exit",
    ];

    while let Some(choice) = choose(input, out, "Classical AI Search Lab", &OPTIONS)? {
        match choice.as_str() {
            "1" => puzzle_menu(input, out, common)?,
            "2" => csp_menu(input, out, common)?,
            "3" => query_loop(input, out, &FactBase::family())?,
            "4" => a_star_menu(input, out, common)?,
            "5" => {
                play(input, out, Strategy::default(), false)?;
            }
            "6" => queens_menu(input, out, common)?,
            "7" => break,
            _ => writeln!(out, "{INVALID_CHOICE}")?,
        }
    }
    writeln!(out, "Exiting...")?;
    Ok(())
}

/// Reads a start state as three rows of three numbers.
///
/// A row with the wrong number of entries is asked for again. `None` at end
/// of input or when the nine tiles do not form a puzzle.
fn read_puzzle(input: &mut dyn BufRead, out: &mut dyn Write) -> Result<Option<Puzzle>> {
    writeln!(out, "Enter the puzzle state row by row (use 0 for blank):")?;
    let mut rows = Vec::with_capacity(SIDE);
    while rows.len() < SIDE {
        let Some(row) = prompt(input, out, &format!("Row {}: ", rows.len() + 1))? else {
            return Ok(None);
        };
        if row.split_whitespace().count() == SIDE {
            rows.push(row);
        } else {
            writeln!(out, "Each row needs exactly {SIDE} numbers.")?;
        }
    }

    match rows.join(" ").parse::<Puzzle>() {
        Ok(puzzle) => Ok(Some(puzzle)),
        Err(e) => {
            writeln!(out, "Invalid puzzle: {e}")?;
            Ok(None)
        }
    }
}

fn puzzle_menu(input: &mut dyn BufRead, out: &mut dyn Write, common: &CommonOptions) -> Result<()> {
    let shown = CommonOptions {
        print_path: true,
        ..common.clone()
    };
    while let Some(choice) = choose(
        input,
        out,
        "8 Puzzle Solver",
        &["Solve using BFS", "Solve using DFS", "Back"],
    )? {
        let algorithm = match choice.as_str() {
            "1" => Algorithm::Bfs,
            "2" => Algorithm::Dfs,
            "3" => break,
            _ => {
                writeln!(out, "{INVALID_CHOICE}")?;
                continue;
            }
        };
        if let Some(start) = read_puzzle(input, out)? {
            solve_puzzle(out, start, GOAL, algorithm, DEFAULT_DEPTH_LIMIT, &shown)?;
        }
    }
    Ok(())
}

fn csp_menu(input: &mut dyn BufRead, out: &mut dyn Write, common: &CommonOptions) -> Result<()> {
    while let Some(choice) = choose(
        input,
        out,
        "Constraint Satisfaction Problem Solver",
        &["Solve Australia Map Coloring", "Solve Sudoku", "Back"],
    )? {
        match choice.as_str() {
            "1" => {
                solve_map(out, &australia(), BacktrackingConfig::default(), common)?;
            }
            "2" => {
                let sudoku = Sudoku::new(EXAMPLE_NINE.into())?;
                solve_sudoku(out, &sudoku, BacktrackingConfig::default(), common)?;
            }
            "3" => break,
            _ => writeln!(out, "{INVALID_CHOICE}")?,
        }
    }
    Ok(())
}

fn a_star_menu(input: &mut dyn BufRead, out: &mut dyn Write, common: &CommonOptions) -> Result<()> {
    while let Some(choice) = choose(
        input,
        out,
        "A* Algorithm Applications",
        &["Shortest Path in Graph", "Solve 8-Puzzle Problem", "Back"],
    )? {
        match choice.as_str() {
            "1" => {
                writeln!(out, "\n--- A* Search on Graph ---")?;
                solve_route(out, &Graph::example(), "A", "G", common)?;
            }
            "2" => {
                writeln!(out, "\n--- A* Search on 8-Puzzle ---")?;
                let start = DEMO_PUZZLE.parse::<Puzzle>()?;
                solve_puzzle(out, start, GOAL, Algorithm::AStar, DEFAULT_DEPTH_LIMIT, common)?;
            }
            "3" => break,
            _ => writeln!(out, "{INVALID_CHOICE}")?,
        }
    }
    Ok(())
}

fn queens_menu(input: &mut dyn BufRead, out: &mut dyn Write, common: &CommonOptions) -> Result<()> {
    let Some(reply) = prompt(input, out, "Board size (default 8): ")? else {
        return Ok(());
    };
    let n = if reply.is_empty() {
        8
    } else if let Ok(n) = reply.parse::<usize>() {
        n
    } else {
        writeln!(out, "Board size must be a whole number.")?;
        return Ok(());
    };

    solve_queens(out, n, Method::All, &MinConflictsConfig::default(), false, common)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_menu(script: &str) -> String {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        let common = CommonOptions {
            no_stats: true,
            ..CommonOptions::default()
        };
        main_menu(&mut input, &mut out, &common).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_exit_and_end_of_input() {
        let text = run_menu("7\n");
        assert!(text.contains("1. 8-Puzzle (BFS / DFS)"));
        assert!(text.ends_with("Exiting...\n"));

        assert!(run_menu("").ends_with("Exiting...\n"));
    }

    #[test]
    fn test_invalid_choice() {
        let text = run_menu("9\nabc\n7\n");
        assert_eq!(text.matches(INVALID_CHOICE).count(), 2);
    }

    #[test]
    fn test_puzzle_menu_with_bfs() {
        let text = run_menu("1\n1\n1 2 3\n4 0\n4 0 6\n7 5 8\n3\n7\n");
        assert!(text.contains("Row 3: "));
        assert!(text.contains("Each row needs exactly 3 numbers."));
        assert!(text.contains("Solving with BFS..."));
        assert!(text.contains("Solution found in 2 moves:"));
        assert_eq!(text.matches("----\n").count(), 3);
    }

    #[test]
    fn test_puzzle_menu_rejects_bad_tiles() {
        let text = run_menu("1\n2\n1 1 2\n3 4 5\n6 7 8\n3\n7\n");
        assert!(text.contains("Invalid puzzle:"));
        assert!(!text.contains("Solving with DFS..."));
    }

    #[test]
    fn test_csp_menu() {
        let text = run_menu("2\n1\n2\n3\n7\n");
        assert!(text.contains("Map colouring solution:"));
        assert!(text.contains("Solution:\n5 3 4 | 6 7 8 | 9 1 2"));
        assert_eq!(text.matches("Verified: true").count(), 2);
    }

    #[test]
    fn test_knowledge_base_menu() {
        let text = run_menu("3\nchildren of john\nexit\n7\n");
        assert!(text.contains("Answer: mary, mike"));
        assert!(text.ends_with("Exiting...\n"));
    }

    #[test]
    fn test_a_star_menu() {
        let text = run_menu("4\n1\n2\n3\n7\n");
        assert!(text.contains("Path from A to G: A -> B -> E -> G, Cost = 4"));
        assert!(text.contains("Solving with A*..."));
        assert!(text.contains("Solution found in 2 moves:"));
    }

    #[test]
    fn test_tictactoe_menu_returns_after_game() {
        let text = run_menu("5\n");
        assert!(text.contains("Tic Tac Toe - You are X, AI is O"));
        assert!(text.contains("Game abandoned."));
        assert!(text.ends_with("Exiting...\n"));
    }

    #[test]
    fn test_queens_menu() {
        let text = run_menu("6\n6\n7\n");
        assert!(text.contains("====== 6-Queens Problem ======"));
        assert!(text.contains("Total Solutions Found: 4"));

        let text = run_menu("6\n14\n7\n");
        assert!(text.contains("Boards larger than 12 only run min-conflicts."));
        assert!(!text.contains("Total Solutions Found"));

        let text = run_menu("6\neight\n7\n");
        assert!(text.contains("Board size must be a whole number."));
    }
}
