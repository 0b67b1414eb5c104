//! Text renderer for dungeons, used by the CLI for quick inspection.

use std::collections::BTreeMap;

use delve_core::{Cell, TileSink};

pub const FLOOR: char = '.';
pub const WALL: char = '#';
pub const EMPTY: char = ' ';

/// Sparse character canvas. Rows are printed top-down, so the highest `y`
/// comes first.
#[derive(Default)]
pub struct AsciiCanvas {
    glyphs: BTreeMap<Cell, char>,
}

impl AsciiCanvas {
    pub fn mark(&mut self, cell: Cell, glyph: char) {
        self.glyphs.insert(cell, glyph);
    }

    pub fn glyph(&self, cell: Cell) -> char {
        self.glyphs.get(&cell).copied().unwrap_or(EMPTY)
    }

    pub fn render(&self) -> String {
        let Some((min, max)) = self.bounds() else {
            return String::new();
        };
        let mut text = String::new();
        for y in (min.y..=max.y).rev() {
            let row: String = (min.x..=max.x).map(|x| self.glyph(Cell::new(x, y))).collect();
            text.push_str(row.trim_end());
            text.push('\n');
        }
        text
    }

    fn bounds(&self) -> Option<(Cell, Cell)> {
        let mut cells = self.glyphs.keys();
        let first = *cells.next()?;
        Some(cells.fold((first, first), |(min, max), cell| {
            (
                Cell::new(min.x.min(cell.x), min.y.min(cell.y)),
                Cell::new(max.x.max(cell.x), max.y.max(cell.y)),
            )
        }))
    }
}

impl TileSink for AsciiCanvas {
    fn clear(&mut self) {
        self.glyphs.clear();
    }

    fn paint_floor(&mut self, cell: Cell) {
        self.mark(cell, FLOOR);
    }

    fn paint_wall(&mut self, cell: Cell) {
        self.mark(cell, WALL);
    }
}
