use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::Board;
use crate::formats::desc;
use crate::params::{Params, Symmetry};
use crate::solve::{solve, SolveOptions};

/// Attempts per black-percentage level before inflating the density.
pub const MAX_GRIDGEN_TRIES: usize = 20;

/// Produce the descriptor of a fresh puzzle with exactly one solution,
/// matching the requested difficulty. Densities that refuse to yield a good
/// puzzle are inflated by 5% at a time (topping out at 90%), and the search
/// simply keeps going until something works.
pub fn new_description(params: &Params, rng: &mut StdRng, display_cli_progress: bool) -> String {
    let (w, h) = (params.width, params.height);

    let progress = indicatif::ProgressBar::new_spinner();
    if !display_cli_progress {
        progress.finish_and_clear();
    }

    // One permutation for the whole call: the clue-removal pass must visit
    // cells in the same order on every attempt for a fixed seed.
    let mut removal_order: Vec<usize> = (0..w * h).collect();
    removal_order.shuffle(rng);

    let mut blackpc = params.black_percent;
    let mut attempts = 0usize;
    loop {
        for _ in 0..MAX_GRIDGEN_TRIES {
            attempts += 1;
            progress.tick();
            progress.set_message(format!("attempt {attempts} at {blackpc}% black"));

            let mut board = Board::blank(w, h);
            set_blacks(&mut board, params.symmetry, blackpc, rng);
            if !place_lights(&mut board, rng) {
                continue;
            }
            number_clues(&mut board);
            board.unplace_lights();

            let mut deepest = 0;
            if !puzzle_is_good(&mut board, params.hard, &mut deepest) {
                continue;
            }

            // Drop every clue the solver never leaned on, provided the
            // puzzle stays good without them.
            let mut stripped = board.clone();
            strip_unused_clues(&mut stripped);
            if puzzle_is_good(&mut stripped, params.hard, &mut deepest) {
                board = stripped;
            }

            // Then try the survivors one at a time.
            for &idx in &removal_order {
                let (x, y) = (idx % w, idx / w);
                if !board.cell(x, y).is_numbered() {
                    continue;
                }
                let clue = board.cell(x, y).clue();
                board.clear_clue(x, y);
                if !puzzle_is_good(&mut board, params.hard, &mut deepest) {
                    board.set_clue(x, y, clue);
                }
            }

            let mut final_depth = 0;
            if !puzzle_is_good(&mut board, params.hard, &mut final_depth) {
                continue;
            }
            if params.hard && final_depth == 0 {
                debug!("discarding candidate: solvable without guessing");
                continue;
            }

            board.unplace_lights();
            progress.finish_and_clear();
            info!(
                "generated a {w}x{h} puzzle after {attempts} attempt(s) at {blackpc}% black"
            );
            return desc::encode(&board);
        }
        if blackpc < 90 {
            blackpc += 5;
        }
        debug!("no luck after {MAX_GRIDGEN_TRIES} tries; now at {blackpc}% black");
    }
}

/// Fill the symmetry's fundamental region with the requested share of walls,
/// then echo it across the rest of the grid.
fn set_blacks(board: &mut Board, symmetry: Symmetry, blackpc: u32, rng: &mut StdRng) {
    let (w, h) = (board.width(), board.height());
    let (degree, rotate) = match symmetry {
        Symmetry::None => (1, false),
        Symmetry::Mirror2 => (2, false),
        Symmetry::Rot2 => (2, true),
        Symmetry::Mirror4 => (4, false),
        Symmetry::Rot4 => (4, true),
    };
    let (wodd, hodd) = (w % 2, h % 2);
    let (rw, rh) = match degree {
        4 => (w / 2 + if rotate { 0 } else { wodd }, h / 2 + hodd),
        2 => (w, h / 2 + hodd),
        _ => (w, h),
    };

    let nblack = rw * rh * blackpc as usize / 100;
    let mut region: Vec<usize> = (0..rw * rh).collect();
    region.shuffle(rng);
    for &i in region.iter().take(nblack) {
        board.set_black(i % rw, i / rw);
    }

    if degree > 1 {
        for y in 0..rh {
            for x in 0..rw {
                if !board.cell(x, y).is_black() {
                    continue;
                }
                let mut images = vec![(if rotate { w - 1 - x } else { x }, h - 1 - y)];
                if degree == 4 {
                    images.push((w - 1 - if rotate { y } else { x }, if rotate { x } else { y }));
                    images.push((
                        if rotate { y } else { w - 1 - x },
                        h - 1 - if rotate { x } else { y },
                    ));
                }
                for (ix, iy) in images {
                    board.set_black(ix, iy);
                }
            }
        }
    }

    // The 4-way rotation orbit never touches the centre of an odd board, so
    // that square gets its own independent trial.
    if symmetry == Symmetry::Rot4 && wodd == 1 && hodd == 1 && rng.gen_range(0..100) < blackpc {
        board.set_black(w / 2, h / 2);
    }
}

/// Build a valid solution in place: light every white square, then walk the
/// grid in random order switching off whole groups of visible lights wherever
/// doing so leaves every square lit. Succeeds once no two lights clash.
fn place_lights(board: &mut Board, rng: &mut StdRng) -> bool {
    let (w, h) = (board.width(), board.height());

    board.clear_marks();
    for y in 0..h {
        for x in 0..w {
            if !board.cell(x, y).is_black() {
                board.set_light(x, y, true);
            }
        }
    }

    let mut order: Vec<usize> = (0..w * h).collect();
    order.shuffle(rng);

    for &idx in &order {
        let (x, y) = (idx % w, idx / w);
        let cell = board.cell(x, y);
        if !cell.is_light() || cell.is_marked() {
            continue;
        }

        let victims: Vec<(usize, usize)> = board
            .beam(x, y)
            .cells(false)
            .filter(|&(vx, vy)| board.cell(vx, vy).is_light())
            .collect();

        // A light may only go out if nothing relies on it as its sole
        // illuminator.
        let removable = victims.iter().all(|&(vx, vy)| {
            board
                .beam(vx, vy)
                .cells(true)
                .all(|(cx, cy)| board.cell(cx, cy).lit_count() > 1)
        });
        if !removable {
            continue;
        }

        for &(vx, vy) in &victims {
            board.set_light(vx, vy, false);
        }
        board.set_mark(x, y);

        if board.no_overlap() {
            return board.all_lit();
        }
    }
    board.no_overlap() && board.all_lit()
}

/// Stamp every wall with the number of lights beside it in the seed solution.
fn number_clues(board: &mut Board) {
    for y in 0..board.height() {
        for x in 0..board.width() {
            if !board.cell(x, y).is_black() {
                continue;
            }
            let lights = board
                .neighbours(x, y)
                .into_iter()
                .filter(|&(nx, ny)| board.cell(nx, ny).is_light())
                .count();
            board.set_clue(x, y, lights as i16);
        }
    }
}

fn strip_unused_clues(board: &mut Board) {
    for y in 0..board.height() {
        for x in 0..board.width() {
            let cell = board.cell(x, y);
            if cell.is_numbered() && !cell.number_used() {
                board.clear_clue(x, y);
            }
        }
    }
}

/// Reset solver scratch, then check the candidate has exactly one solution
/// under the requested difficulty. Leaves the board in the solved
/// configuration (with NUMBER_USED stamps) for the stripping pass to read.
fn puzzle_is_good(board: &mut Board, hard: bool, deepest: &mut usize) -> bool {
    board.unplace_lights();
    let report = solve(
        board,
        SolveOptions {
            allow_guessing: hard,
            require_unique: true,
        },
    );
    *deepest = report.deepest;
    report.count == 1
}
