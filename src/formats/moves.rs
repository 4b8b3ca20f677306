//! Move strings: ';'-separated commands applied to a state to produce a new
//! one. `S` stamps the state as solver-assisted, `Lx,y` toggles a light,
//! `Ix,y` toggles an impossible mark. A malformed command rejects the whole
//! move and leaves the input state untouched.

use anyhow::{anyhow, bail};

use crate::board::Board;

pub fn execute(state: &Board, move_string: &str) -> anyhow::Result<Board> {
    let mut next = state.clone();

    for cmd in move_string.split(';') {
        match cmd.chars().next() {
            Some('S') if cmd.len() == 1 => next.used_solve = true,
            Some(op @ ('L' | 'I')) => {
                let (xs, ys) = cmd[1..]
                    .split_once(',')
                    .ok_or_else(|| anyhow!("malformed command '{cmd}'"))?;
                let x: usize = xs.parse().map_err(|_| anyhow!("bad coordinate in '{cmd}'"))?;
                let y: usize = ys.parse().map_err(|_| anyhow!("bad coordinate in '{cmd}'"))?;
                if x >= next.width() || y >= next.height() {
                    bail!("coordinates out of range in '{cmd}'");
                }
                let cell = next.cell(x, y);
                if cell.is_black() {
                    bail!("({x},{y}) is a wall square");
                }

                // The light and the impossible mark are mutually exclusive;
                // each command displaces the other mark before toggling.
                if op == 'L' {
                    next.clear_impossible(x, y);
                    next.set_light(x, y, !cell.is_light());
                } else {
                    next.set_light(x, y, false);
                    next.toggle_impossible(x, y);
                }
            }
            _ => bail!("unrecognised command '{cmd}'"),
        }
    }

    if next.is_correct() {
        next.completed = true;
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::desc;
    use crate::params::Params;

    fn fresh(width: usize, height: usize, description: &str) -> Board {
        let params = Params {
            width,
            height,
            ..Params::default()
        };
        desc::decode(&params, description).unwrap()
    }

    #[test]
    fn lights_toggle() {
        let b = fresh(3, 1, "aBa");
        let b = execute(&b, "L0,0").unwrap();
        assert!(b.cell(0, 0).is_light());
        let b = execute(&b, "L0,0").unwrap();
        assert!(!b.cell(0, 0).is_light());
        assert_eq!(b.light_count(), 0);
    }

    #[test]
    fn impossible_toggles_and_displaces_lights() {
        let b = fresh(3, 1, "aBa");
        let b = execute(&b, "L0,0;I0,0").unwrap();
        assert!(!b.cell(0, 0).is_light());
        assert!(b.cell(0, 0).is_impossible());

        let b = execute(&b, "I0,0").unwrap();
        assert!(!b.cell(0, 0).is_impossible());
    }

    #[test]
    fn light_displaces_impossible() {
        let b = fresh(3, 1, "aBa");
        let b = execute(&b, "I2,0;L2,0").unwrap();
        assert!(b.cell(2, 0).is_light());
        assert!(!b.cell(2, 0).is_impossible());
    }

    #[test]
    fn rejected_moves_leave_no_trace() {
        let b = fresh(3, 1, "aBa");
        assert!(execute(&b, "L1,0").is_err(), "wall square");
        assert!(execute(&b, "L5,0").is_err(), "out of range");
        assert!(execute(&b, "L0,0;Lx,y").is_err(), "bad syntax");
        assert!(execute(&b, "L0").is_err());
        assert!(execute(&b, "").is_err());
        assert!(execute(&b, "L0,0;").is_err(), "trailing separator");
        // The original state is untouched throughout.
        assert_eq!(b.light_count(), 0);
    }

    #[test]
    fn completion_latches() {
        let b = fresh(3, 1, "aBa");
        let b = execute(&b, "L0,0;L2,0").unwrap();
        assert!(b.completed);
        // Further moves still apply, but the latch stays set.
        let b = execute(&b, "L0,0").unwrap();
        assert!(!b.cell(0, 0).is_light());
        assert!(b.completed);
    }

    #[test]
    fn solve_stamp_latches() {
        let b = fresh(3, 1, "aBa");
        let b = execute(&b, "S;L0,0").unwrap();
        assert!(b.used_solve);
        let b = execute(&b, "L2,0").unwrap();
        assert!(b.used_solve);
    }
}
