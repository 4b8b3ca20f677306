use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indoc::indoc;

use akari::board::Board;
use akari::formats::text_grid;
use akari::game;
use akari::generate;
use akari::params::Params;
use akari::rng;
use akari::solve::{solve, SolveOptions};

#[derive(Parser, Debug)]
#[command(version, about, after_help = indoc! {"
    Examples:
      akari generate --params 10x10b20s4 --hard --solution
      akari generate --seed lighthouse --count 3 --json
      akari solve 3x3 a2aBaBc
      akari show 7x7 cBcga1cBagaBc2agcBc
"})]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate fresh puzzles with a guaranteed unique solution
    Generate {
        /// Parameter string: WxH, optionally b<black%>, s<symmetry 0-4>, r
        #[arg(short, long, default_value = "7x7b20s4")]
        params: String,

        /// Require at least one backtracking guess (same as trailing 'r')
        #[arg(long, default_value_t)]
        hard: bool,

        /// Seed string for reproducible output; random if omitted
        #[arg(short, long)]
        seed: Option<String>,

        /// How many puzzles to produce
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,

        /// Also print the solved grid
        #[arg(long, default_value_t)]
        solution: bool,

        /// Emit JSON records instead of plain text
        #[arg(long, default_value_t)]
        json: bool,
    },

    /// Solve a puzzle and print the solution
    Solve {
        /// Parameter string (only the WxH part matters here)
        params: String,
        /// Puzzle descriptor
        desc: String,
    },

    /// Print an unsolved puzzle
    Show {
        params: String,
        desc: String,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    match Args::parse().command {
        Command::Generate {
            params,
            hard,
            seed,
            count,
            solution,
            json,
        } => {
            let mut params = Params::decode(&params)?;
            params.hard |= hard;
            params.validate(true)?;

            let seed = seed.unwrap_or_else(|| format!("{:016x}", rand::random::<u64>()));
            eprintln!("seed: {seed}");
            let mut rng = rng::from_seed(seed.as_bytes());

            for _ in 0..count {
                let desc = generate::new_description(&params, &mut rng, true);
                if json {
                    println!(
                        "{}",
                        serde_json::json!({
                            "params": params.encode(true),
                            "seed": seed,
                            "desc": desc,
                        })
                    );
                } else {
                    println!("{}:{}", params.encode(false), desc);
                    if solution {
                        let mut board = game::new_state(&params, &desc)?;
                        let report = solve(
                            &mut board,
                            SolveOptions {
                                allow_guessing: true,
                                require_unique: false,
                            },
                        );
                        assert!(report.count > 0, "generated puzzles are always solvable");
                        print_board(&board);
                    }
                }
            }
        }

        Command::Solve { params, desc } => {
            let params = Params::decode(&params)?;
            let mut board = game::new_state(&params, &desc).context("bad puzzle description")?;
            let report = solve(
                &mut board,
                SolveOptions {
                    allow_guessing: true,
                    require_unique: false,
                },
            );
            if report.count <= 0 {
                bail!("no solution found");
            }
            print_board(&board);
            if report.deepest > 0 {
                eprintln!("needed guesswork {} level(s) deep", report.deepest);
            }
        }

        Command::Show { params, desc } => {
            let params = Params::decode(&params)?;
            let board = game::new_state(&params, &desc).context("bad puzzle description")?;
            print_board(&board);
        }
    }

    Ok(())
}

fn print_board(board: &Board) {
    for line in text_grid::text_format(board).lines() {
        for ch in line.chars() {
            match ch {
                'L' => print!("{}", "L".yellow().bold()),
                '#' | '0'..='4' => print!("{}", ch.to_string().blue().bold()),
                '.' => print!("{}", ".".yellow()),
                'x' => print!("{}", "x".red()),
                _ => print!("{ch}"),
            }
        }
        println!();
    }
}
