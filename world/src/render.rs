//! Read-only row views over the packed cell values.

use std::slice::{Chunks, Iter};

use labyrinth_core::Cell;

/// Lazy sequence of grid rows in top-to-bottom order.
///
/// Clone the iterator before consuming it, or call `render` again, to walk
/// the same snapshot more than once.
#[derive(Clone, Debug)]
pub struct RenderRows<'a> {
    rows: Chunks<'a, Cell>,
}

impl<'a> RenderRows<'a> {
    pub(crate) fn new(cells: &'a [Cell], columns: usize) -> Self {
        Self {
            rows: cells.chunks(columns.max(1)),
        }
    }

    /// Collects the remaining rows into owned packed values.
    #[must_use]
    pub fn into_packed(self) -> Vec<Vec<u32>> {
        self.map(Iterator::collect).collect()
    }
}

impl<'a> Iterator for RenderRows<'a> {
    type Item = RenderRow<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows.next().map(|row| RenderRow { cells: row.iter() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

impl ExactSizeIterator for RenderRows<'_> {}

/// Packed values of a single grid row in left-to-right order.
#[derive(Clone, Debug)]
pub struct RenderRow<'a> {
    cells: Iter<'a, Cell>,
}

impl Iterator for RenderRow<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<Self::Item> {
        self.cells.next().map(Cell::packed)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cells.size_hint()
    }
}

impl ExactSizeIterator for RenderRow<'_> {}
