use calamine::{DataType, Range};

use crate::afweeg::*;

/// Reads one evaluator workbook into a grid of cells.
///
/// Uses the named worksheet if there is one, the first worksheet otherwise.
pub fn read_excel_grid(path: &str, worksheet_name: Option<&str>) -> ReportResult<CellGrid> {
    debug!(
        "read_excel_grid: path: {:?} worksheet: {:?}",
        path, worksheet_name
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let wrange = match worksheet_name {
        Some(name) => workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu {
                path,
                worksheet_name: name,
            })?
            .context(OpeningExcelSnafu { path })?,
        None => workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu { path })?
            .context(OpeningExcelSnafu { path })?,
    };
    Ok(range_to_grid(&wrange))
}

/// Places the cells of a range at their position in the sheet: a range that
/// starts in B2 keeps B2 at row 1, column 1.
pub fn range_to_grid(range: &Range<DataType>) -> CellGrid {
    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    let mut grid = CellGrid::new();
    for (row_idx, row) in range.rows().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            let raw = read_cell(cell);
            if raw != RawCell::Empty {
                grid.set(
                    start_row as usize + row_idx,
                    start_col as usize + col_idx,
                    raw,
                );
            }
        }
    }
    debug!(
        "range_to_grid: {} rows, {} columns",
        grid.height(),
        grid.width()
    );
    grid
}

fn read_cell(cell: &DataType) -> RawCell {
    match cell {
        DataType::String(s) => RawCell::Text(s.clone()),
        DataType::Float(f) => RawCell::Number(*f),
        DataType::Int(i) => RawCell::Number(*i as f64),
        DataType::Bool(b) => RawCell::Text(b.to_string()),
        DataType::DateTime(f) => RawCell::Number(*f),
        DataType::Error(e) => {
            debug!("read_cell: error value {:?} read as empty", e);
            RawCell::Empty
        }
        DataType::Empty => RawCell::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells() {
        assert_eq!(read_cell(&DataType::String("4".to_string())), RawCell::text("4"));
        assert_eq!(read_cell(&DataType::Float(2.5)), RawCell::Number(2.5));
        assert_eq!(read_cell(&DataType::Int(3)), RawCell::Number(3.0));
        assert_eq!(read_cell(&DataType::Bool(true)), RawCell::text("true"));
        assert_eq!(read_cell(&DataType::Empty), RawCell::Empty);
    }

    #[test]
    fn missing_workbook() {
        let res = read_excel_grid("/does/not/exist.xlsx", None);
        assert!(matches!(res, Err(ReportError::OpeningExcel { .. })));
    }
}
