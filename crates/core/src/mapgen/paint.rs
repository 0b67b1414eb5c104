//! Painting seam between generation and whatever draws tiles.

use crate::types::Cell;

use super::model::Dungeon;

/// Receiver for tile painting. Implemented by renderers; the generator never
/// reads anything back.
pub trait TileSink {
    fn clear(&mut self);
    fn paint_floor(&mut self, cell: Cell);
    fn paint_wall(&mut self, cell: Cell);
}

/// Clears the sink, paints every floor cell, then every derived wall cell.
pub fn paint<S: TileSink + ?Sized>(dungeon: &Dungeon, sink: &mut S) {
    sink.clear();
    for &cell in dungeon.floor() {
        sink.paint_floor(cell);
    }
    for cell in dungeon.walls() {
        sink.paint_wall(cell);
    }
}
