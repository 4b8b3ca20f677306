use std::fmt::Debug;

use itertools::Itertools;
use ndarray::Array2;

/// One square of the grid: a flag word plus a single count slot. For white
/// squares the count is the number of lights currently shining on the square
/// (a light also shines on itself); for numbered wall squares the same slot
/// holds the clue digit.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    flags: u8,
    count: i16,
}

const BLACK: u8 = 1 << 0;
const NUMBERED: u8 = 1 << 1;
const NUMBER_USED: u8 = 1 << 2;
const LIGHT: u8 = 1 << 3;
const IMPOSSIBLE: u8 = 1 << 4;
const MARK: u8 = 1 << 5;

impl Cell {
    pub fn is_black(&self) -> bool {
        self.flags & BLACK != 0
    }

    pub fn is_numbered(&self) -> bool {
        self.flags & NUMBERED != 0
    }

    pub fn number_used(&self) -> bool {
        self.flags & NUMBER_USED != 0
    }

    pub fn is_light(&self) -> bool {
        self.flags & LIGHT != 0
    }

    pub fn is_impossible(&self) -> bool {
        self.flags & IMPOSSIBLE != 0
    }

    pub fn is_marked(&self) -> bool {
        self.flags & MARK != 0
    }

    /// How many lights shine on this (white) square.
    pub fn lit_count(&self) -> i16 {
        debug_assert!(!self.is_black());
        self.count
    }

    /// The clue digit of this (numbered) square.
    pub fn clue(&self) -> i16 {
        debug_assert!(self.is_numbered());
        self.count
    }
}

impl Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{:06b}:{}>", self.flags, self.count)
    }
}

/// The horizontal and vertical runs of white squares visible from an origin:
/// everything a light placed there would illuminate, and symmetrically, every
/// position a light could sit at to illuminate the origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Beam {
    pub ox: usize,
    pub oy: usize,
    pub min_x: usize,
    pub max_x: usize,
    pub min_y: usize,
    pub max_y: usize,
}

impl Beam {
    /// Every square in the beam exactly once, the origin included or not.
    pub fn cells(self, include_origin: bool) -> impl Iterator<Item = (usize, usize)> {
        let row = (self.min_x..=self.max_x).map(move |x| (x, self.oy));
        let col = (self.min_y..=self.max_y)
            .filter(move |&y| y != self.oy)
            .map(move |y| (self.ox, y));
        row.chain(col)
            .filter(move |&(x, y)| include_origin || (x, y) != (self.ox, self.oy))
    }
}

/// The full puzzle state. `Clone` performs the deep duplication the solver
/// and generator rely on; nothing is shared between copies.
#[derive(Clone)]
pub struct Board {
    cells: Array2<Cell>, // indexed [[y, x]]
    nlights: usize,
    pub completed: bool,
    pub used_solve: bool,
}

impl Board {
    pub fn blank(width: usize, height: usize) -> Board {
        assert!(width > 0 && height > 0);
        Board {
            cells: Array2::default((height, width)),
            nlights: 0,
            completed: false,
            used_solve: false,
        }
    }

    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.cells[[y, x]]
    }

    /// Number of lights currently on the board.
    pub fn light_count(&self) -> usize {
        self.nlights
    }

    pub fn set_black(&mut self, x: usize, y: usize) {
        let cell = &mut self.cells[[y, x]];
        debug_assert!(!cell.is_light());
        cell.flags |= BLACK;
    }

    pub fn set_clue(&mut self, x: usize, y: usize, clue: i16) {
        let cell = &mut self.cells[[y, x]];
        debug_assert!(cell.is_black());
        cell.flags |= NUMBERED;
        cell.count = clue;
    }

    pub fn clear_clue(&mut self, x: usize, y: usize) {
        self.cells[[y, x]].flags &= !NUMBERED;
    }

    pub fn set_impossible(&mut self, x: usize, y: usize) {
        let cell = &mut self.cells[[y, x]];
        debug_assert!(!cell.is_black() && !cell.is_light());
        cell.flags |= IMPOSSIBLE;
    }

    pub fn clear_impossible(&mut self, x: usize, y: usize) {
        self.cells[[y, x]].flags &= !IMPOSSIBLE;
    }

    pub fn toggle_impossible(&mut self, x: usize, y: usize) {
        let cell = &mut self.cells[[y, x]];
        debug_assert!(!cell.is_light());
        cell.flags ^= IMPOSSIBLE;
    }

    pub fn set_mark(&mut self, x: usize, y: usize) {
        self.cells[[y, x]].flags |= MARK;
    }

    pub fn clear_marks(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.flags &= !MARK;
        }
    }

    pub fn set_number_used(&mut self, x: usize, y: usize) {
        let cell = &mut self.cells[[y, x]];
        debug_assert!(cell.is_numbered());
        cell.flags |= NUMBER_USED;
    }

    pub fn clear_number_used(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.flags &= !NUMBER_USED;
        }
    }

    /// The sole mutator of the light flag. Placing or removing a light keeps
    /// every visible square's lit count in step, so the counts never need to
    /// be recomputed from scratch.
    pub fn set_light(&mut self, x: usize, y: usize, on: bool) {
        let cell = self.cell(x, y);
        assert!(!cell.is_black(), "lights can only go on white squares");
        if cell.is_light() == on {
            return;
        }
        debug_assert!(!on || !cell.is_impossible());

        self.cells[[y, x]].flags ^= LIGHT;
        let delta: i16 = if on {
            self.nlights += 1;
            1
        } else {
            self.nlights -= 1;
            -1
        };

        let beam = self.beam(x, y);
        for (cx, cy) in beam.cells(true) {
            self.cells[[cy, cx]].count += delta;
        }
    }

    /// Walk outwards in the four cardinal directions until a wall or the edge
    /// of the grid stops the ray.
    pub fn beam(&self, x: usize, y: usize) -> Beam {
        debug_assert!(!self.cell(x, y).is_black());
        let mut b = Beam {
            ox: x,
            oy: y,
            min_x: x,
            max_x: x,
            min_y: y,
            max_y: y,
        };
        while b.min_x > 0 && !self.cell(b.min_x - 1, y).is_black() {
            b.min_x -= 1;
        }
        while b.max_x + 1 < self.width() && !self.cell(b.max_x + 1, y).is_black() {
            b.max_x += 1;
        }
        while b.min_y > 0 && !self.cell(x, b.min_y - 1).is_black() {
            b.min_y -= 1;
        }
        while b.max_y + 1 < self.height() && !self.cell(x, b.max_y + 1).is_black() {
            b.max_y += 1;
        }
        b
    }

    /// The edge-clipped 4-neighbourhood of a square.
    pub fn neighbours(&self, x: usize, y: usize) -> Vec<(usize, usize)> {
        const OFFSETS: [(isize, isize); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];
        OFFSETS
            .into_iter()
            .filter_map(|(dx, dy)| {
                let nx = x.checked_add_signed(dx)?;
                let ny = y.checked_add_signed(dy)?;
                (nx < self.width() && ny < self.height()).then_some((nx, ny))
            })
            .collect()
    }

    /// Whether a light could legally go here right now: not a wall, not
    /// marked impossible, and not already lit (a light on a lit square would
    /// shine on whatever lights it).
    pub fn could_place_light(&self, x: usize, y: usize) -> bool {
        let cell = self.cell(x, y);
        !cell.is_black() && !cell.is_impossible() && cell.count == 0
    }

    pub fn all_lit(&self) -> bool {
        (0..self.height())
            .cartesian_product(0..self.width())
            .all(|(y, x)| {
                let cell = self.cell(x, y);
                cell.is_black() || cell.lit_count() > 0
            })
    }

    /// No two lights shine on each other; equivalently, no square holding a
    /// light is lit more than once.
    pub fn no_overlap(&self) -> bool {
        (0..self.height())
            .cartesian_product(0..self.width())
            .all(|(y, x)| {
                let cell = self.cell(x, y);
                !cell.is_light() || cell.lit_count() == 1
            })
    }

    pub fn numbers_ok(&self) -> bool {
        (0..self.height())
            .cartesian_product(0..self.width())
            .all(|(y, x)| {
                let cell = self.cell(x, y);
                !cell.is_numbered() || self.adjacent_lights(x, y) == cell.clue()
            })
    }

    pub fn is_correct(&self) -> bool {
        self.all_lit() && self.no_overlap() && self.numbers_ok()
    }

    fn adjacent_lights(&self, x: usize, y: usize) -> i16 {
        self.neighbours(x, y)
            .into_iter()
            .filter(|&(nx, ny)| self.cell(nx, ny).is_light())
            .count() as i16
    }

    /// Display hint: the clue already has too many lights next to it, or can
    /// no longer be satisfied even if every open neighbour gained one.
    pub fn number_wrong(&self, x: usize, y: usize) -> bool {
        let cell = self.cell(x, y);
        if !cell.is_numbered() {
            return false;
        }
        let mut lights = 0;
        let mut open = 0;
        for (nx, ny) in self.neighbours(x, y) {
            let n = self.cell(nx, ny);
            if n.is_light() {
                lights += 1;
            } else if !n.is_black() && !n.is_impossible() && n.count == 0 {
                open += 1;
            }
        }
        lights > cell.clue() || lights + open < cell.clue()
    }

    /// Reset solver scratch: remove every light (via `set_light`, so the lit
    /// counts stay consistent) and every impossible mark.
    pub fn unplace_lights(&mut self) {
        for y in 0..self.height() {
            for x in 0..self.width() {
                if self.cell(x, y).is_light() {
                    self.set_light(x, y, false);
                }
                self.clear_impossible(x, y);
            }
        }
    }
}
