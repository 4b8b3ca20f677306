//! The stable surface the UI layer drives: everything here is a pure
//! function over caller-owned values.

use anyhow::bail;
use rand::rngs::StdRng;

use crate::board::Board;
use crate::formats::{desc, moves, text_grid};
use crate::generate;
use crate::params::Params;
use crate::solve::{solve, SolveOptions};

pub use crate::params::{configure, custom_params, fetch_preset, presets};

pub fn default_params() -> Params {
    Params::default()
}

pub fn new_description(params: &Params, rng: &mut StdRng) -> String {
    generate::new_description(params, rng, false)
}

pub fn validate_description(params: &Params, description: &str) -> anyhow::Result<()> {
    desc::validate(params, description)
}

pub fn new_state(params: &Params, description: &str) -> anyhow::Result<Board> {
    params.validate(false)?;
    desc::decode(params, description)
}

pub fn duplicate(state: &Board) -> Board {
    state.clone()
}

pub fn execute_move(state: &Board, move_string: &str) -> anyhow::Result<Board> {
    moves::execute(state, move_string)
}

pub fn text_format(state: &Board) -> String {
    text_grid::text_format(state)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    InProgress,
    Solved,
    Unsolvable,
}

impl Status {
    pub fn code(self) -> i32 {
        match self {
            Status::InProgress => 0,
            Status::Solved => 1,
            Status::Unsolvable => -1,
        }
    }
}

/// Unsolvable means the player has painted themself into a corner: two
/// lights clash, or a clue can no longer be satisfied.
pub fn status(state: &Board) -> Status {
    if state.completed || state.is_correct() {
        return Status::Solved;
    }
    if !state.no_overlap() {
        return Status::Unsolvable;
    }
    for y in 0..state.height() {
        for x in 0..state.width() {
            if state.number_wrong(x, y) {
                return Status::Unsolvable;
            }
        }
    }
    Status::InProgress
}

/// Produce the "give me the answer" move: `S` followed by one `L` or `I` for
/// each square whose marks differ between where the player is now and a
/// solved configuration. Prefers completing the player's position; if their
/// placements rule out every solution, solves the pristine puzzle instead.
pub fn solve_moves(original: &Board, current: &Board) -> anyhow::Result<String> {
    let opts = SolveOptions {
        allow_guessing: true,
        require_unique: false,
    };

    let mut solved = current.clone();
    if solve(&mut solved, opts).count <= 0 {
        solved = original.clone();
        if solve(&mut solved, opts).count <= 0 {
            bail!("puzzle is not solvable");
        }
    }

    let mut move_string = String::from("S");
    for y in 0..current.height() {
        for x in 0..current.width() {
            let cur = current.cell(x, y);
            let sol = solved.cell(x, y);
            if cur.is_light() != sol.is_light() || cur.is_impossible() != sol.is_impossible() {
                let op = if sol.is_light() { 'L' } else { 'I' };
                move_string.push_str(&format!(";{op}{x},{y}"));
            }
        }
    }
    Ok(move_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(width: usize, height: usize, description: &str) -> Board {
        let params = Params {
            width,
            height,
            ..Params::default()
        };
        new_state(&params, description).unwrap()
    }

    #[test]
    fn solve_move_completes_a_fresh_puzzle() {
        let fresh = state(3, 3, "a2aBaBc");
        let mv = solve_moves(&fresh, &fresh).unwrap();
        assert!(mv.starts_with('S'));
        let done = execute_move(&fresh, &mv).unwrap();
        assert!(done.completed);
        assert!(done.used_solve);
    }

    #[test]
    fn solve_move_respects_the_players_position() {
        let fresh = state(3, 3, "a2aBaBc");
        let played = execute_move(&fresh, "L0,0").unwrap();
        let mv = solve_moves(&fresh, &played).unwrap();
        // (0,0) is part of the unique solution, so no command touches it.
        assert!(!mv.contains("0,0"));
        let done = execute_move(&played, &mv).unwrap();
        assert!(done.completed);
    }

    #[test]
    fn solve_move_recovers_from_a_wrecked_position() {
        let fresh = state(3, 3, "a2aBaBc");
        // Two clashing lights: insoluble from here, so the solver falls back
        // to the pristine puzzle.
        let played = execute_move(&fresh, "L0,2;L2,2").unwrap();
        let mv = solve_moves(&fresh, &played).unwrap();
        let done = execute_move(&played, &mv).unwrap();
        assert!(done.completed);
    }

    #[test]
    fn status_reports_progress() {
        let fresh = state(2, 2, "d");
        assert_eq!(status(&fresh), Status::InProgress);
        assert_eq!(status(&fresh).code(), 0);

        let done = execute_move(&fresh, "L0,0;L1,1").unwrap();
        assert_eq!(status(&done), Status::Solved);
        assert_eq!(status(&done).code(), 1);
    }

    #[test]
    fn status_flags_a_clash_as_unsolvable() {
        let fresh = state(2, 2, "d");
        let clashed = execute_move(&fresh, "L0,0;L1,0").unwrap();
        assert_eq!(status(&clashed), Status::Unsolvable);
        assert_eq!(status(&clashed).code(), -1);
    }

    #[test]
    fn status_flags_an_oversatisfied_clue() {
        let fresh = state(3, 3, "a0g");
        let played = execute_move(&fresh, "L0,0").unwrap();
        assert_eq!(status(&played), Status::Unsolvable);
    }
}
