//! The column descriptor store.
//!
//! Holds the caller's column list together with the layout derived from it.
//! Widths are the only field mutated in place; every width or visibility
//! change recomputes pinned offsets and group widths so the two never drift
//! from the descriptors.

use std::collections::HashSet;

use tracing::debug;

use crate::column::Column;
use crate::error::{GridError, Result};
use crate::layout::{GroupWidths, PinnedPositions, VisibleKeys};

/// Column list plus its derived geometry.
#[derive(Clone, Debug)]
pub struct ColumnStore {
    columns: Vec<Column>,
    visible: Option<VisibleKeys>,
    pinned: PinnedPositions,
    group_widths: GroupWidths,
}

impl ColumnStore {
    /// Create a store, rejecting duplicate column keys.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        check_unique_keys(&columns)?;
        let mut store = ColumnStore {
            columns,
            visible: None,
            pinned: PinnedPositions::default(),
            group_widths: GroupWidths::default(),
        };
        store.recompute();
        Ok(store)
    }

    /// Restrict the displayed columns to `keys` (or show all with `None`).
    pub fn with_visible_keys(mut self, keys: Option<VisibleKeys>) -> Self {
        self.set_visible_keys(keys);
        self
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    pub fn visible_keys(&self) -> Option<&VisibleKeys> {
        self.visible.as_ref()
    }

    pub fn pinned(&self) -> &PinnedPositions {
        &self.pinned
    }

    pub fn group_widths(&self) -> &GroupWidths {
        &self.group_widths
    }

    /// Commit a new width for one column and refresh the derived layout.
    pub fn set_width(&mut self, key: &str, width: f32) -> Result<()> {
        let column = self
            .columns
            .iter_mut()
            .find(|c| c.key == key)
            .ok_or_else(|| GridError::UnknownColumn(key.to_string()))?;
        column.width = Some(width);
        debug!(column = key, width, "column width updated");
        self.recompute();
        Ok(())
    }

    pub fn set_visible_keys(&mut self, keys: Option<VisibleKeys>) {
        self.visible = keys;
        self.recompute();
    }

    /// Replace the whole column list, as a caller does between renders.
    pub fn replace(&mut self, columns: Vec<Column>) -> Result<()> {
        check_unique_keys(&columns)?;
        self.columns = columns;
        self.recompute();
        Ok(())
    }

    fn recompute(&mut self) {
        self.pinned = PinnedPositions::compute(&self.columns);
        self.group_widths = GroupWidths::compute(&self.columns, self.visible.as_ref());
    }
}

fn check_unique_keys(columns: &[Column]) -> Result<()> {
    let mut seen = HashSet::new();
    for col in columns {
        if !seen.insert(col.key.as_str()) {
            return Err(GridError::DuplicateColumnKey(col.key.clone()));
        }
    }
    Ok(())
}
