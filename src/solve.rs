use log::debug;

use crate::board::Board;

/// How far the solver may nest guesses before giving up on a branch.
pub const MAX_BRANCH_DEPTH: usize = 5;

/// Sentinel count: the recursion budget ran out before the branch was decided.
pub const GAVE_UP: i32 = -1;

#[derive(Clone, Copy, Debug)]
pub struct SolveOptions {
    /// Permit recursive guessing (up to [`MAX_BRANCH_DEPTH`]); without it the
    /// solver only ever applies the two propagation rules.
    pub allow_guessing: bool,
    /// Keep exploring after the first solution so the result distinguishes
    /// "exactly one" from "two or more".
    pub require_unique: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct SolveReport {
    /// `> 0`: solutions found (and the state now holds one of them);
    /// `0`: none; [`GAVE_UP`]: undecided within the recursion budget.
    pub count: i32,
    /// Deepest guess level actually reached; `0` means purely deductive.
    pub deepest: usize,
}

/// Solve (or count completions of) a possibly part-played state in place.
/// On success the state's planes are left in a solved configuration.
pub fn solve(state: &mut Board, opts: SolveOptions) -> SolveReport {
    state.clear_number_used();
    let max_depth = if opts.allow_guessing { MAX_BRANCH_DEPTH } else { 0 };
    let mut deepest = 0;
    let count = solve_sub(state, opts.require_unique, max_depth, 0, &mut deepest);
    SolveReport { count, deepest }
}

/// Unlit-square rule: if exactly one remaining position could light this
/// square, the light must go there.
fn try_solve_light(state: &mut Board, x: usize, y: usize) -> bool {
    let cell = state.cell(x, y);
    if cell.is_black() || cell.lit_count() > 0 {
        return false;
    }

    let mut sole = None;
    let mut candidates = 0;
    for (cx, cy) in state.beam(x, y).cells(true) {
        if state.could_place_light(cx, cy) {
            candidates += 1;
            sole = Some((cx, cy));
        }
    }
    if candidates != 1 {
        return false;
    }
    let (sx, sy) = sole.unwrap();
    state.set_light(sx, sy, true);
    true
}

/// Number rule: a clue whose count is already met forbids its open
/// neighbours; a clue that needs every open neighbour fills them all.
fn try_solve_number(state: &mut Board, x: usize, y: usize) -> bool {
    let cell = state.cell(x, y);
    if !cell.is_numbered() {
        return false;
    }

    let mut placed = 0;
    let mut open = vec![];
    for (nx, ny) in state.neighbours(x, y) {
        if state.cell(nx, ny).is_light() {
            placed += 1;
        } else if state.could_place_light(nx, ny) {
            open.push((nx, ny));
        }
    }
    if open.is_empty() {
        return false;
    }

    if placed == cell.clue() {
        for &(nx, ny) in &open {
            state.set_impossible(nx, ny);
        }
    } else if placed + open.len() as i16 == cell.clue() {
        for &(nx, ny) in &open {
            state.set_light(nx, ny, true);
        }
    } else {
        return false;
    }
    state.set_number_used(x, y);
    true
}

fn solve_sub(
    state: &mut Board,
    require_unique: bool,
    max_depth: usize,
    depth: usize,
    deepest: &mut usize,
) -> i32 {
    debug!("solve_sub: depth = {depth}");
    if *deepest < depth {
        *deepest = depth;
    }

    loop {
        // A clash can't be fixed by adding more lights. Our own deductions
        // never cause one, but a half-played incorrect grid can.
        if !state.no_overlap() {
            return 0;
        }
        if state.is_correct() {
            return 1;
        }

        let mut can_place = 0;
        let mut did_stuff = false;
        for y in 0..state.height() {
            for x in 0..state.width() {
                if state.could_place_light(x, y) {
                    can_place += 1;
                }
                if try_solve_light(state, x, y) {
                    did_stuff = true;
                }
                if try_solve_number(state, x, y) {
                    did_stuff = true;
                }
            }
        }
        if did_stuff {
            continue;
        }
        if can_place == 0 {
            // Some square is unlit and nothing can ever light it.
            return 0;
        }
        if depth >= max_depth {
            return GAVE_UP;
        }

        // Guess at the square that would light the most currently-unlit
        // squares (itself included); first in scan order wins ties.
        let mut best = None;
        let mut best_n = 0;
        for y in 0..state.height() {
            for x in 0..state.width() {
                if !state.could_place_light(x, y) {
                    continue;
                }
                let n = state
                    .beam(x, y)
                    .cells(true)
                    .filter(|&(cx, cy)| state.cell(cx, cy).lit_count() == 0)
                    .count();
                if n > best_n {
                    best_n = n;
                    best = Some((x, y));
                }
            }
        }
        let (bx, by) = best.expect("a placeable light must light something");

        let mut copy = state.clone();
        state.set_impossible(bx, by);
        let self_soluble = solve_sub(state, require_unique, max_depth, depth + 1, deepest);

        if !require_unique && self_soluble > 0 {
            // We only wanted solubility, and the first branch delivered.
            return self_soluble;
        }

        copy.set_light(bx, by, true);
        let copy_soluble = solve_sub(&mut copy, require_unique, max_depth, depth + 1, deepest);

        return if require_unique && (self_soluble < 0 || copy_soluble < 0) {
            // A branch we couldn't finish may hide extra solutions.
            GAVE_UP
        } else if self_soluble <= 0 && copy_soluble <= 0 {
            self_soluble
        } else if self_soluble <= 0 {
            // Only the copy reached a solution; adopt its planes so the
            // caller observes a solved state.
            *state = copy;
            copy_soluble
        } else if copy_soluble <= 0 {
            self_soluble
        } else {
            self_soluble + copy_soluble
        };
    }
}
