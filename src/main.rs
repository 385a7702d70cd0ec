//! # search-lab
//!
//! `search-lab` is a command-line front end for the classical AI search
//! algorithms in the `search_lab` library: uninformed and informed search on
//! the 8-puzzle, constraint satisfaction with AC-3, a family-tree knowledge
//! base, minimax Tic-Tac-Toe and N-Queens.
//!
//! ## Usage
//!
//! ```sh
//! search-lab [COMMON_OPTIONS] [SUBCOMMAND]
//! ```
//!
//! Without a subcommand the interactive menus are started.
//!
//! ### Subcommands
//!
//! 1.  **`puzzle`**: Solve an 8-puzzle with BFS, DFS, iterative deepening or A*.
//!     ```sh
//!     search-lab puzzle --tiles "1 2 3 4 0 6 7 5 8" --algorithm a-star
//!     search-lab puzzle --path start.puzzle --algorithm dfs --depth-limit 30
//!     ```
//!
//! 2.  **`csp`**: Colour the map of Australia or solve a Sudoku.
//!     ```sh
//!     search-lab csp australia
//!     search-lab csp sudoku --path grid.sudoku --variable-ordering static --no-inference
//!     ```
//!
//! 3.  **`route`**: A* between two nodes of a weighted graph.
//!     ```sh
//!     search-lab route --from A --to G
//!     ```
//!
//! 4.  **`kb`**: Ask the family-tree knowledge base.
//!     ```sh
//!     search-lab kb -q "parents of mary" -q "grandparent john of alice"
//!     ```
//!
//! 5.  **`tictactoe`**: Play against a minimax AI.
//!
//! 6.  **`queens`**: N-Queens by backtracking, BFS and min-conflicts.
//!     ```sh
//!     search-lab queens -n 8 --method min-conflicts --seed 42
//!     ```
//!
//! 7.  **`batch`**: Solve every `.puzzle` and `.sudoku` file in a directory.
//!
//! 8.  **`menu`** and **`completions <shell>`**.
//!
//! ### Common Options
//!
//! -   `-d, --debug`: Log search milestones (`RUST_LOG` overrides this).
//! -   `--no-stats`: Skip the statistics table.
//! -   `-p, --print-path`: Print every state of a found path.

use clap::Parser;

mod command_line;

use command_line::cli::{Cli, run};

/// Global allocator using `tikv-jemallocator`, which also backs the memory
/// figures in the statistics table.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.common.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
