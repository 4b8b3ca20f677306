//! Randomized end-to-end sweep: generate puzzles across seeds, shapes, and
//! grades, then re-check every guarantee the generator makes. Compiled as its
//! own test target (see `[[test]]` in Cargo.toml) so `cargo test gen-fuzzer`
//! can run it in isolation.

use akari::formats::desc;
use akari::game;
use akari::params::{Params, Symmetry};
use akari::rng;
use akari::solve::{solve, SolveOptions, GAVE_UP};

fn check_generated(params: &Params, seed: &[u8]) {
    let mut rng = rng::from_seed(seed);
    let description = game::new_description(params, &mut rng);

    game::validate_description(params, &description)
        .expect("generator output must validate");

    let fresh = game::new_state(params, &description).unwrap();
    for y in 0..fresh.height() {
        for x in 0..fresh.width() {
            let cell = fresh.cell(x, y);
            assert!(!cell.is_light());
            assert!(!cell.is_impossible());
        }
    }

    // Exactly one completion, and the grade is as promised.
    let unique = solve(
        &mut fresh.clone(),
        SolveOptions {
            allow_guessing: true,
            require_unique: true,
        },
    );
    assert_eq!(unique.count, 1, "{description}: not unique");

    let deductive = solve(
        &mut fresh.clone(),
        SolveOptions {
            allow_guessing: false,
            require_unique: true,
        },
    );
    if params.hard {
        assert_eq!(
            deductive.count, GAVE_UP,
            "{description}: hard puzzle solvable without guessing"
        );
        assert!(unique.deepest >= 1);
    } else {
        assert_eq!(deductive.count, 1, "{description}: easy puzzle needs guessing");
        assert_eq!(deductive.deepest, 0);
    }

    // The solved state round-trips through the move protocol.
    let mv = game::solve_moves(&fresh, &fresh).unwrap();
    let done = game::execute_move(&fresh, &mv).unwrap();
    assert!(done.completed);

    // A re-decode of a re-encode is the same puzzle.
    let mut solved = fresh.clone();
    solve(
        &mut solved,
        SolveOptions {
            allow_guessing: true,
            require_unique: false,
        },
    );
    solved.unplace_lights();
    assert_eq!(desc::encode(&solved), description);
}

#[test]
fn easy_puzzles_across_seeds_and_shapes() {
    for seed in [b"fuzz-1".as_slice(), b"fuzz-2", b"fuzz-3"] {
        for (width, height, symmetry) in [
            (5, 5, Symmetry::Rot4),
            (7, 7, Symmetry::Rot4),
            (6, 4, Symmetry::Mirror2),
            (7, 5, Symmetry::None),
        ] {
            let params = Params {
                width,
                height,
                symmetry,
                ..Params::default()
            };
            check_generated(&params, seed);
        }
    }
}

#[test]
fn hard_puzzles_need_guesswork() {
    for seed in [b"hard-1".as_slice(), b"hard-2"] {
        let params = Params {
            hard: true,
            ..Params::default()
        };
        check_generated(&params, seed);
    }
}

#[test]
fn dense_grids_still_generate() {
    let params = Params {
        width: 5,
        height: 5,
        black_percent: 60,
        symmetry: Symmetry::Rot2,
        ..Params::default()
    };
    check_generated(&params, b"dense");
}
