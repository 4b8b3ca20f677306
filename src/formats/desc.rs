//! The puzzle descriptor: a row-major walk of the grid with white runs
//! packed as letters ('a' = 1 .. 'z' = 26), un-numbered walls as 'B', and
//! numbered walls as their digit.

use anyhow::bail;

use crate::board::Board;
use crate::params::Params;

pub fn encode(board: &Board) -> String {
    let mut out = String::new();
    let mut run: u8 = 0;
    for y in 0..board.height() {
        for x in 0..board.width() {
            let cell = board.cell(x, y);
            if !cell.is_black() {
                run += 1;
                if run == 26 {
                    out.push('z');
                    run = 0;
                }
            } else {
                if run > 0 {
                    out.push((b'a' + run - 1) as char);
                    run = 0;
                }
                if cell.is_numbered() {
                    debug_assert!((0..=4).contains(&cell.clue()));
                    out.push(char::from_digit(cell.clue() as u32, 10).unwrap());
                } else {
                    out.push('B');
                }
            }
        }
    }
    if run > 0 {
        out.push((b'a' + run - 1) as char);
    }
    out
}

/// Build a fresh state (no lights, no marks) from a descriptor, rejecting
/// anything that does not cover the grid exactly.
pub fn decode(params: &Params, description: &str) -> anyhow::Result<Board> {
    let area = params.width * params.height;
    let mut board = Board::blank(params.width, params.height);
    let mut filled = 0;

    for c in description.chars() {
        let took = match c {
            'a'..='z' => (c as usize - 'a' as usize) + 1,
            'B' | '0'..='4' => 1,
            _ => bail!("game description contains invalid character '{c}'"),
        };
        if filled + took > area {
            bail!("game description is too long");
        }
        if c == 'B' {
            board.set_black(filled % params.width, filled / params.width);
        } else if let Some(clue) = c.to_digit(10) {
            let (x, y) = (filled % params.width, filled / params.width);
            board.set_black(x, y);
            board.set_clue(x, y, clue as i16);
        }
        filled += took;
    }
    if filled < area {
        bail!("game description is too short");
    }
    Ok(board)
}

pub fn validate(params: &Params, description: &str) -> anyhow::Result<()> {
    decode(params, description).map(|_| ())
}
