//! # Gridline - Headless Data-Table Engine
//!
//! `gridline` holds the logic behind a data-table widget without drawing
//! anything itself. A front end (web, TUI, desktop) feeds it column
//! descriptors and rows and reads back geometry, cell contents and export
//! files.
//!
//! ## Core Concepts
//!
//! - [`Column`]: declarative description of one field (width, pin side,
//!   group, visibility, renderers)
//! - [`ColumnStore`]: the column list plus its derived layout, kept in sync
//!   on every width or visibility change
//! - [`PinnedPositions`]: sticky offsets of left- and right-pinned columns
//! - [`GroupWidths`]: combined width of each header group
//! - [`ResizeController`]: drag-to-resize gestures committing into the store
//! - [`ExportFormatter`]: flattens columns, groups and rows into an
//!   [`ExportGrid`] for the CSV, text and PDF sinks
//! - [`DataTable`]: the host-facing bundle with pagination, selection,
//!   sorting, expansion and event callbacks
//!
//! ## Quick Start
//!
//! ```rust
//! use gridline::{Column, ColumnStore, Group, ExportFormatter, Pin};
//! use serde_json::json;
//!
//! let columns = vec![
//!     Column::new("id", "ID").width(60.0).pin(Pin::Left),
//!     Column::new("first", "First").group("name").width(100.0),
//!     Column::new("last", "Last").group("name").width(120.0),
//! ];
//! let store = ColumnStore::new(columns.clone()).unwrap();
//! assert_eq!(store.pinned().left_offset("id"), Some(0.0));
//! assert_eq!(store.group_widths().get("name"), Some(220.0));
//!
//! let groups = vec![Group::new("name", "Name")];
//! let rows = vec![json!({"id": 1, "first": "Ada", "last": "Lovelace"})
//!     .as_object()
//!     .cloned()
//!     .unwrap()];
//! let grid = ExportFormatter::new(&columns).groups(&groups).format(&rows);
//! assert_eq!(grid.to_csv(), "ID,First,Last\n,Name,\n1,Ada,Lovelace");
//! ```
//!
//! ## Feature Flags
//!
//! - `pdf`: PDF export through `oxidize-pdf`

pub mod column;
pub mod config;
mod error;
pub mod events;
pub mod expand;
pub mod export;
pub mod layout;
pub mod localize;
pub mod pagination;
pub mod rows;
pub mod selection;
pub mod sort;
pub mod store;
pub mod table;
mod util;

/// A record of the table: field name to JSON value.
pub type Row = serde_json::Map<String, serde_json::Value>;

// Error type
pub use error::{GridError, Result};

// Column descriptors
pub use column::{
    CellContent, CellRenderer, Column, Group, HeaderRenderer, Pin, ResizeBehavior,
    DEFAULT_COLUMN_WIDTH, MIN_COLUMN_WIDTH,
};

// Layout
pub use layout::{
    group_header_cells, CellPlacement, GroupHeaderCell, GroupWidths, PinnedPositions, PointerKind,
    Position, ResizeController, ResizeOutcome, ResizeSurface, VisibleKeys,
};
pub use store::ColumnStore;

// Export
pub use export::{
    clean_text, export_file_name, write_csv, write_text, BorderStyle, ExportConfig, ExportFormat,
    ExportFormatter, ExportGrid, GroupHeader, TextOptions,
};
#[cfg(feature = "pdf")]
pub use export::write_pdf;

// Table state
pub use config::TableDefinition;
pub use events::{TableEvent, TableEvents};
pub use expand::{Expansion, ExpansionProvider};
pub use localize::{Localizer, StringTable};
pub use pagination::{Pagination, PaginationUpdate, PAGE_SIZE_OPTIONS};
pub use rows::{rows_from_csv, rows_from_json, rows_from_yaml};
pub use selection::Selection;
pub use sort::{sort_rows, SortConfig, SortOrder};
pub use table::{DataTable, HeaderCell};
