//! Klotski Puzzle Solver
//!
//! Solves Klotski (Huarong Dao) sliding-block puzzles: rectangular pieces
//! slide within a bordered 4x5 board until the 2x2 general reaches the
//! exit. The solver runs a deduplicated breadth-first search and plays the
//! first solution back as a numbered move list.

use clap::{Parser, Subcommand};

use klotski::pieces::{build_pieces, GOAL_PIECE, LAYOUTS};
use klotski::{Game, GamePosition};

/// Solves Klotski sliding-block puzzles.
#[derive(Parser)]
#[command(name = "klotski")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a bundled layout and print the move list.
    Solve {
        /// Name of the bundled layout to solve.
        #[arg(long, default_value = "classic")]
        layout: String,
        /// Stop after this many solutions.
        #[arg(long, default_value_t = 1)]
        max_solutions: usize,
        /// Explicit Zobrist seed for reproducible hashing.
        #[arg(long)]
        seed: Option<u64>,
        /// Print the board after every move.
        #[arg(long)]
        boards: bool,
    },
    /// List the bundled layouts.
    List,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Solve {
            layout,
            max_solutions,
            seed,
            boards,
        }) => run_solve(&layout, max_solutions, seed, boards),
        Some(Command::List) => run_list(),
        None => run_solve("classic", 1, None, false),
    }
}

/// Solves one layout and reports the first solution found.
fn run_solve(layout_name: &str, max_solutions: usize, seed: Option<u64>, boards: bool) {
    let Some((_, layout)) = LAYOUTS.iter().find(|(name, _)| *name == layout_name) else {
        eprintln!("Unknown layout '{layout_name}'. Run 'klotski list' to see the options.");
        return;
    };

    let initial = match GamePosition::new(4, 5, build_pieces(layout), GOAL_PIECE) {
        Ok(position) => position,
        Err(error) => {
            eprintln!("Failed to set up layout '{layout_name}': {error}");
            return;
        }
    };

    println!("{initial}");

    let mut game = match seed {
        Some(seed) => Game::with_seed(initial, seed),
        None => Game::new(initial),
    };
    game.run(max_solutions);

    match game.get_solution(0) {
        Some(path) => {
            println!(
                "Solved in {} moves ({} positions explored, {} discovered).",
                path.len(),
                game.explored(),
                game.discovered()
            );
            print!("{}", format_moves(&path));
            if boards {
                for state in &path {
                    println!();
                    print!("{state}");
                }
            }
        }
        None => {
            println!(
                "No solution found ({} positions explored).",
                game.explored()
            );
        }
    }
}

/// Prints the bundled layout names.
fn run_list() {
    for (name, layout) in LAYOUTS {
        println!("{name} ({} pieces)", layout.len());
    }
}

/// Formats a solution path as a numbered move list.
fn format_moves(path: &[&GamePosition]) -> String {
    let mut output = String::new();
    for (step, state) in path.iter().enumerate() {
        if let Some(mv) = state.last_move() {
            let piece = &state.pieces()[mv.piece_index];
            output.push_str(&format!("{:>3}. {} {}", step + 1, piece.name, mv.direction));
            if mv.length > 1 {
                output.push_str(&format!(" x{}", mv.length));
            }
            output.push('\n');
        }
    }
    output
}
