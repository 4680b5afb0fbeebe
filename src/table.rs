//! Table projection: rows into an ordered column list plus cell strings.

use crate::data::{cell_text, columns};
use crate::error::RenderError;
use crate::spec::Record;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableProjection {
    pub columns: Vec<String>,
    /// One inner vector per row, aligned with `columns`.
    pub cells: Vec<Vec<String>>,
}

/// Project rows into displayable strings. The column set and order come
/// from the first record; cells missing a column render as empty strings.
pub fn project(rows: &[Record]) -> Result<TableProjection, RenderError> {
    if rows.is_empty() {
        // No first record means no column set can be derived.
        return Err(RenderError::EmptyDataset);
    }

    let columns = columns(rows);
    let cells = rows
        .iter()
        .map(|row| columns.iter().map(|col| cell_text(row.get(col))).collect())
        .collect();

    Ok(TableProjection { columns, cells })
}
