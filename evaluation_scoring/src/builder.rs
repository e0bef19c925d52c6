use crate::config::RawCell;

static EMPTY_CELL: RawCell = RawCell::Empty;

/// The cells of one worksheet, addressed by (row, column) from the top-left
/// corner of the sheet.
///
/// Reading outside of the grid returns an empty cell, so that short or narrow
/// sheets are read the same way as sheets with blank cells.
///
/// ```
/// use evaluation_scoring::{CellGrid, RawCell};
///
/// let grid = CellGrid::new()
///     .with_cell(1, 2, RawCell::text("Proj X"))
///     .with_cell(3, 2, RawCell::Number(4.0));
///
/// assert_eq!(grid.height(), 4);
/// assert_eq!(grid.width(), 3);
/// assert_eq!(grid.get(1, 2), &RawCell::text("Proj X"));
/// assert_eq!(grid.get(10, 10), &RawCell::Empty);
/// ```
#[derive(PartialEq, Debug, Clone, Default)]
pub struct CellGrid {
    rows: Vec<Vec<RawCell>>,
}

impl CellGrid {
    pub fn new() -> CellGrid {
        CellGrid { rows: Vec::new() }
    }

    /// Builds a grid from rows of cells. Rows may have different lengths.
    pub fn from_rows(rows: Vec<Vec<RawCell>>) -> CellGrid {
        CellGrid { rows }
    }

    pub fn with_cell(mut self, row: usize, column: usize, cell: RawCell) -> CellGrid {
        self.set(row, column, cell);
        self
    }

    /// Sets a cell, growing the grid with empty cells as needed.
    pub fn set(&mut self, row: usize, column: usize, cell: RawCell) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= column {
            cells.resize(column + 1, RawCell::Empty);
        }
        cells[column] = cell;
    }

    pub fn get(&self, row: usize, column: usize) -> &RawCell {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .unwrap_or(&EMPTY_CELL)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(|cells| cells.len()).max().unwrap_or(0)
    }
}
