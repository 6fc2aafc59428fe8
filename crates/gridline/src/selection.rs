//! Row selection keyed by each row's `id` field.

use serde_json::Value;

use crate::error::{GridError, Result};
use crate::Row;

/// Field every row must carry when selection is enabled.
pub const ROW_ID_FIELD: &str = "id";

/// Stable identity of a row, or `None` when it has no usable id.
///
/// Strings must be non-empty; numbers are accepted as-is. Anything else
/// (null, booleans, objects) does not identify a row.
pub fn row_id(row: &Row) -> Option<String> {
    match row.get(ROW_ID_FIELD)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Fail when any row lacks an id. Called before rendering a selectable table.
pub fn validate_row_ids(rows: &[Row]) -> Result<()> {
    match rows.iter().position(|row| row_id(row).is_none()) {
        Some(index) => Err(GridError::MissingRowId { index }),
        None => Ok(()),
    }
}

/// Currently selected rows, in selection order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Selection {
    rows: Vec<Row>,
}

impl Selection {
    pub fn new(rows: Vec<Row>) -> Self {
        Selection { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn is_selected(&self, row: &Row) -> bool {
        match row_id(row) {
            Some(id) => self.rows.iter().any(|r| row_id(r).as_deref() == Some(id.as_str())),
            None => false,
        }
    }

    /// The full selection after toggling `row`: removed when present, appended
    /// otherwise. The current selection is left untouched; the host decides
    /// whether to adopt the result.
    pub fn toggled(&self, row: &Row) -> Vec<Row> {
        let Some(id) = row_id(row) else {
            return self.rows.clone();
        };
        if self.is_selected(row) {
            self.rows
                .iter()
                .filter(|r| row_id(r).as_deref() != Some(id.as_str()))
                .cloned()
                .collect()
        } else {
            let mut next = self.rows.clone();
            next.push(row.clone());
            next
        }
    }

    /// Toggle `row` in place and return the new selection.
    pub fn toggle(&mut self, row: &Row) -> &[Row] {
        self.rows = self.toggled(row);
        &self.rows
    }
}
