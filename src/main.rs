use std::{
    collections::VecDeque,
    io::{self, BufRead},
};

use anyhow::Context;
use clap::Parser;
use eight_puzzle::{EightPuzzle, Heuristic, Outcome, Solver};
use itertools::Itertools;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

// Without tiles on the command line this plays rounds on stdin:
//   1. the initial board, 9 numbers with 0 for the blank
//   2. the heuristic, 0 (misplaced tiles) or 1 (Manhattan distance), unless --heuristic is set
//   3. y to play again
#[derive(Parser)]
#[command(name = "eight-puzzle")]
#[command(about = "Find the shortest solution to an 8-puzzle")]
struct Cli {
    /// Heuristic ranking the frontier: `misplaced` (0) or `manhattan` (1)
    #[arg(long, short = 'H')]
    heuristic: Option<Heuristic>,

    /// Report wrong-parity boards as unsolvable without searching
    #[arg(long)]
    precheck: bool,

    /// Print only the move list instead of every intermediate board
    #[arg(long)]
    brief: bool,

    /// Initial board in row-major order
    tiles: Vec<String>,
}

struct Prompt<R> {
    input: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Prompt<R> {
    fn token(&mut self) -> anyhow::Result<Option<String>> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }

            self.pending.extend(
                line.split(|c: char| c.is_whitespace() || c == ',')
                    .filter(|t| !t.is_empty())
                    .map(str::to_string),
            );
        }

        Ok(self.pending.pop_front())
    }

    fn tokens(&mut self, n: usize) -> anyhow::Result<Option<Vec<String>>> {
        (0..n).map(|_| self.token()).collect()
    }
}

fn report(cli: &Cli, initial: &EightPuzzle, heuristic: Heuristic) {
    let solver = Solver::new(heuristic).with_precheck(cli.precheck);

    println!("Initial state:\n{}", initial);
    println!("Goal state:\n{}", solver.goal().board());
    println!("----");

    let outcome = solver.solve(initial);
    let stats = outcome.stats();

    let solution = match &outcome {
        Outcome::Solved(solution) => solution,
        Outcome::Unsolvable(_) => {
            println!("Can not find a solution!");
            println!("Visited {} board positions.", stats.generated);
            return;
        }
    };

    println!("Found a solution in {} moves:", solution.cost());
    println!(
        "Visited {} board positions ({} distinct, {} expanded).",
        stats.generated, stats.distinct, stats.expanded
    );

    if cli.brief {
        println!("{}", outcome.moves().join(" "));
        return;
    }

    println!("----");
    println!("{}", initial);
    let mut board = *initial;
    for m in outcome.moves() {
        let Some(next) = board.slide(m) else {
            break;
        };
        board = next;
        println!("\nMove: {}\n{}", m, board);
    }
}

fn interactive(cli: &Cli) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut prompt = Prompt {
        input: stdin.lock(),
        pending: VecDeque::new(),
    };

    loop {
        println!("Enter the initial board:");
        let Some(tiles) = prompt.tokens(EightPuzzle::SQR_SIZE)? else {
            return Ok(());
        };

        let board = match tiles.join(" ").parse::<EightPuzzle>() {
            Ok(board) => board,
            Err(e) => {
                eprintln!("Invalid board: {}", e);
                prompt.pending.clear();
                continue;
            }
        };

        let heuristic = match cli.heuristic {
            Some(heuristic) => heuristic,
            None => {
                println!("Choose the heuristic: 0 for misplaced tiles, 1 for Manhattan distance.");
                let Some(choice) = prompt.token()? else {
                    return Ok(());
                };
                choice.parse::<Heuristic>().unwrap_or_else(|e| {
                    tracing::warn!("{}, falling back to the default", e);
                    Heuristic::default()
                })
            }
        };

        report(cli, &board, heuristic);

        println!("Play again? (y/n)");
        match prompt.token()? {
            Some(answer) if answer.eq_ignore_ascii_case("y") => continue,
            _ => return Ok(()),
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.tiles.is_empty() {
        return interactive(&cli);
    }

    let board: EightPuzzle = cli
        .tiles
        .join(" ")
        .parse()
        .context("reading the initial board")?;
    report(&cli, &board, cli.heuristic.unwrap_or_default());

    Ok(())
}
