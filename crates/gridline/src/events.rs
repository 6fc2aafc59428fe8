//! Host callbacks for user interaction.
//!
//! The table never changes host-owned state (page, selection, sort) itself.
//! It reports what the user asked for and the host decides what to do:
//!
//! ```text
//! user click
//!   → DataTable event method (click_row, change_page, ...)
//!   → TableEvent
//!   → registered listeners, in registration order
//! ```
//!
//! Listeners are registered per event kind:
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use gridline::{PaginationUpdate, TableEvents};
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//! let events = TableEvents::new().on_pagination(move |update: &PaginationUpdate| {
//!     sink.lock().unwrap().push(update.page_no);
//! });
//! assert!(!events.is_empty());
//! ```

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::pagination::PaginationUpdate;
use crate::sort::SortOrder;
use crate::Row;

/// Something the user did that the host may want to act on.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TableEvent {
    /// A body row was clicked; `index` is its position on the current page.
    RowClick { index: usize, row: Row },
    /// The page or page size changed.
    Pagination(PaginationUpdate),
    /// The selection changed; carries the complete new selection.
    Selection { rows: Vec<Row> },
    /// A sortable header was clicked.
    Sort { key: String, order: SortOrder },
}

pub type RowClickFn = Arc<dyn Fn(usize, &Row) + Send + Sync>;
pub type PaginationFn = Arc<dyn Fn(&PaginationUpdate) + Send + Sync>;
pub type SelectionFn = Arc<dyn Fn(&[Row]) + Send + Sync>;
pub type SortFn = Arc<dyn Fn(&str, SortOrder) + Send + Sync>;

/// Registered listeners, grouped by event kind.
#[derive(Clone, Default)]
pub struct TableEvents {
    row_click: Vec<RowClickFn>,
    pagination: Vec<PaginationFn>,
    selection: Vec<SelectionFn>,
    sort: Vec<SortFn>,
}

impl TableEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.row_click.is_empty()
            && self.pagination.is_empty()
            && self.selection.is_empty()
            && self.sort.is_empty()
    }

    /// Rows become clickable once a row-click listener exists.
    pub fn has_row_click(&self) -> bool {
        !self.row_click.is_empty()
    }

    pub fn on_row_click<F>(mut self, f: F) -> Self
    where
        F: Fn(usize, &Row) + Send + Sync + 'static,
    {
        self.row_click.push(Arc::new(f));
        self
    }

    pub fn on_pagination<F>(mut self, f: F) -> Self
    where
        F: Fn(&PaginationUpdate) + Send + Sync + 'static,
    {
        self.pagination.push(Arc::new(f));
        self
    }

    pub fn on_selection<F>(mut self, f: F) -> Self
    where
        F: Fn(&[Row]) + Send + Sync + 'static,
    {
        self.selection.push(Arc::new(f));
        self
    }

    pub fn on_sort<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, SortOrder) + Send + Sync + 'static,
    {
        self.sort.push(Arc::new(f));
        self
    }

    /// Deliver `event` to every listener of its kind.
    pub fn emit(&self, event: &TableEvent) {
        match event {
            TableEvent::RowClick { index, row } => {
                for f in &self.row_click {
                    f(*index, row);
                }
            }
            TableEvent::Pagination(update) => {
                for f in &self.pagination {
                    f(update);
                }
            }
            TableEvent::Selection { rows } => {
                for f in &self.selection {
                    f(rows);
                }
            }
            TableEvent::Sort { key, order } => {
                for f in &self.sort {
                    f(key, *order);
                }
            }
        }
    }
}

impl fmt::Debug for TableEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableEvents")
            .field("row_click", &self.row_click.len())
            .field("pagination", &self.pagination.len())
            .field("selection", &self.selection.len())
            .field("sort", &self.sort.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn emit_reaches_only_matching_listeners() {
        let log = Arc::new(Mutex::new(Vec::<String>::new()));
        let (a, b) = (Arc::clone(&log), Arc::clone(&log));
        let events = TableEvents::new()
            .on_sort(move |key: &str, order: SortOrder| {
                a.lock().unwrap().push(format!("sort {} {:?}", key, order))
            })
            .on_pagination(move |update: &PaginationUpdate| {
                b.lock().unwrap().push(format!("page {:?}", update.page_no))
            });

        events.emit(&TableEvent::Sort {
            key: "name".into(),
            order: SortOrder::Desc,
        });
        events.emit(&TableEvent::Selection { rows: vec![] });

        assert_eq!(*log.lock().unwrap(), vec!["sort name Desc"]);
        assert!(!events.has_row_click());
    }

    #[test]
    fn listeners_run_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let (a, b) = (Arc::clone(&log), Arc::clone(&log));
        let events = TableEvents::new()
            .on_row_click(move |i: usize, _: &Row| a.lock().unwrap().push(("first", i)))
            .on_row_click(move |i: usize, _: &Row| b.lock().unwrap().push(("second", i)));

        events.emit(&TableEvent::RowClick {
            index: 3,
            row: Row::new(),
        });
        assert_eq!(*log.lock().unwrap(), vec![("first", 3), ("second", 3)]);
    }

    #[test]
    fn event_serializes_with_tag() {
        let event = TableEvent::Sort {
            key: "qty".into(),
            order: SortOrder::Asc,
        };
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            serde_json::json!({"event": "sort", "key": "qty", "order": "asc"})
        );
    }
}
