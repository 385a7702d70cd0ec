//! The interactive human-versus-AI game loop.

use crate::tictactoe::board::{Board, Mark, parse_move};
use crate::tictactoe::minimax::{Minimax, Strategy};
use std::fmt::Display;
use std::io::{self, BufRead, Write};

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The human completed a line.
    HumanWins,
    /// The AI completed a line.
    AiWins,
    /// The board filled up without a line.
    Draw,
    /// Input ended before the game did.
    Abandoned,
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HumanWins => write!(f, "You win!"),
            Self::AiWins => write!(f, "AI wins!"),
            Self::Draw => write!(f, "It's a draw!"),
            Self::Abandoned => write!(f, "Game abandoned."),
        }
    }
}

fn finished(board: &Board) -> Option<Outcome> {
    match board.winner() {
        Some(Mark::X) => Some(Outcome::HumanWins),
        Some(Mark::O) => Some(Outcome::AiWins),
        None if !board.moves_left() => Some(Outcome::Draw),
        None => None,
    }
}

/// Reads one human move, re-prompting until a legal one arrives.
///
/// Returns `Ok(None)` at end of input.
fn read_human_move<R: BufRead + ?Sized, W: Write + ?Sized>(
    input: &mut R,
    output: &mut W,
    board: &Board,
) -> io::Result<Option<(usize, usize)>> {
    let mut line = String::new();
    loop {
        write!(output, "Enter your move (row col): ")?;
        output.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(None);
        }

        let checked = parse_move(&line).and_then(|(row, col)| {
            let mut probe = *board;
            probe.place(row, col, Mark::X).map(|()| (row, col))
        });
        match checked {
            Ok(square) => return Ok(Some(square)),
            Err(e) => writeln!(output, "Invalid move: {e}. Try again.")?,
        }
    }
}

/// Plays one game. The human is `X` and types `row col` moves; the AI is `O`.
///
/// # Errors
///
/// Only if reading `input` or writing `output` fails.
pub fn play<R: BufRead + ?Sized, W: Write + ?Sized>(
    input: &mut R,
    output: &mut W,
    strategy: Strategy,
    ai_starts: bool,
) -> io::Result<Outcome> {
    let mut board = Board::new();
    let mut ai = Minimax::new(strategy);
    let mut human_turn = !ai_starts;

    writeln!(output, "Tic Tac Toe - You are X, AI is O")?;
    let outcome = loop {
        if human_turn {
            write!(output, "\n{board}")?;
            let Some((row, col)) = read_human_move(input, output, &board)? else {
                break Outcome::Abandoned;
            };
            board.set(row, col, Mark::X);
        } else {
            let Some((row, col)) = ai.best_move(&board) else {
                break Outcome::Draw;
            };
            board.set(row, col, Mark::O);
            writeln!(output, "AI plays ({row}, {col})")?;
        }

        if let Some(outcome) = finished(&board) {
            write!(output, "\n{board}")?;
            break outcome;
        }
        human_turn = !human_turn;
    };

    writeln!(output, "{outcome}")?;
    Ok(outcome)
}
