//! Bordered textual dump of a state, used by tests and the CLI.

use crate::board::{Board, Cell};

pub fn cell_glyph(cell: Cell) -> char {
    if cell.is_black() {
        if cell.is_numbered() {
            char::from_digit(cell.clue() as u32, 10).unwrap()
        } else {
            '#'
        }
    } else if cell.is_light() {
        'L'
    } else if cell.is_impossible() {
        'x'
    } else if cell.lit_count() > 0 {
        '.'
    } else {
        ' '
    }
}

/// A `(2w+1) x (2h+1)` character grid: `+` corners, `-`/`|` borders, and one
/// glyph per square.
pub fn text_format(board: &Board) -> String {
    let mut out = String::new();
    for gy in 0..2 * board.height() + 1 {
        for gx in 0..2 * board.width() + 1 {
            out.push(match (gx % 2, gy % 2) {
                (0, 0) => '+',
                (1, 0) => '-',
                (0, 1) => '|',
                _ => cell_glyph(board.cell(gx / 2, gy / 2)),
            });
        }
        out.push('\n');
    }
    out
}
