//! The host-facing table.
//!
//! [`DataTable`] bundles the column store with rows, groups and the optional
//! features (pagination, selection, serial numbers, expansion, sorting,
//! export) and answers the questions a front end asks while rendering:
//! which columns to draw, where pinned cells sit, what each header and body
//! cell shows, and what to do when the user clicks something.
//!
//! ```rust
//! use gridline::{Column, DataTable, Pin, Row};
//! use serde_json::json;
//!
//! let rows: Vec<Row> = vec![
//!     json!({"id": 1, "name": "Ada", "city": "London"}).as_object().cloned().unwrap(),
//! ];
//! let table = DataTable::new(
//!     vec![
//!         Column::new("name", "Name").width(120.0).pin(Pin::Left),
//!         Column::new("city", "City"),
//!     ],
//!     rows,
//! )
//! .unwrap()
//! .serial_number(true);
//!
//! let keys: Vec<String> = table.display_columns().into_iter().map(|c| c.key).collect();
//! assert_eq!(keys, ["s.no.", "name", "city"]);
//! assert_eq!(table.export_grid().to_csv(), "S. No.,Name,City\n1,Ada,London");
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info};

use crate::column::{CellContent, Column, Group, ResizeBehavior};
use crate::error::{GridError, Result};
use crate::events::{TableEvent, TableEvents};
use crate::expand::{ExpandFn, ExpandedRows, Expansion, ExpansionProvider};
use crate::export::{
    cell_text, write_csv, write_text, ExportConfig, ExportFormat, ExportFormatter, ExportGrid,
    TextOptions,
};
use crate::layout::{
    group_header_cells, is_displayed, CellPlacement, GroupHeaderCell, GroupWidths, PointerKind,
    ResizeController, ResizeOutcome, ResizeSurface, VisibleKeys,
};
use crate::localize::{localize_label, localize_or, Localizer};
use crate::pagination::{serial_number, Pagination};
use crate::selection::{validate_row_ids, Selection};
use crate::sort::{SortConfig, SortOrder};
use crate::store::ColumnStore;
use crate::Row;

/// Key of the synthetic row-selection column.
pub const SELECTION_COLUMN_KEY: &str = "selected";

/// Key of the synthetic serial-number column.
pub const SERIAL_COLUMN_KEY: &str = "s.no.";

/// Label of the serial-number column when no translation exists.
pub const SERIAL_COLUMN_LABEL: &str = "S. No.";

/// Width of the synthetic selection and serial-number columns.
pub const FIXED_COLUMN_WIDTH: f32 = 80.0;

/// Canvas color painted behind pinned cells unless the host sets one.
pub const DEFAULT_BACKGROUND: &str = "#ffffff";

/// One header cell, ready to draw.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HeaderCell {
    pub key: String,
    pub label: String,
    pub width: f32,
    pub placement: CellPlacement,
    pub sortable: bool,
    /// Direction arrow to show, when this column is the active sort column.
    pub sort: Option<SortOrder>,
    pub resizable: bool,
}

/// A table: columns, rows and everything that shapes how they are shown.
pub struct DataTable {
    store: ColumnStore,
    rows: Vec<Row>,
    groups: Vec<Group>,
    pagination: Option<Pagination>,
    serial_number: bool,
    selection: Option<Selection>,
    expand: Option<ExpandFn>,
    expanded: ExpandedRows,
    sort: SortConfig,
    export: ExportConfig,
    localizer: Option<Arc<dyn Localizer>>,
    events: TableEvents,
    resize: ResizeController,
    background: String,
}

impl DataTable {
    /// Create a table over `columns` and the rows of the current page.
    pub fn new(columns: Vec<Column>, rows: Vec<Row>) -> Result<Self> {
        Ok(DataTable {
            store: ColumnStore::new(columns)?,
            rows,
            groups: Vec::new(),
            pagination: None,
            serial_number: false,
            selection: None,
            expand: None,
            expanded: ExpandedRows::default(),
            sort: SortConfig::default(),
            export: ExportConfig::default(),
            localizer: None,
            events: TableEvents::default(),
            resize: ResizeController::default(),
            background: DEFAULT_BACKGROUND.to_string(),
        })
    }

    pub fn groups(mut self, groups: Vec<Group>) -> Self {
        self.groups = groups;
        self
    }

    pub fn pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    /// Show a leading serial-number column.
    pub fn serial_number(mut self, enabled: bool) -> Self {
        self.serial_number = enabled;
        self
    }

    /// Enable row selection with `selection` as the initial state.
    ///
    /// Every row must then carry an `id`; see [`DataTable::validate`].
    pub fn row_selection(mut self, selection: Selection) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn expand(mut self, provider: impl ExpansionProvider + 'static) -> Self {
        self.expand = Some(ExpandFn::new(provider));
        self
    }

    pub fn sort(mut self, sort: SortConfig) -> Self {
        self.sort = sort;
        self
    }

    pub fn export_config(mut self, export: ExportConfig) -> Self {
        self.export = export;
        self
    }

    pub fn localizer(mut self, localizer: impl Localizer + 'static) -> Self {
        self.localizer = Some(Arc::new(localizer));
        self
    }

    /// Show only the columns whose keys are in `keys` (all when `None`).
    pub fn visible_keys(mut self, keys: Option<VisibleKeys>) -> Self {
        self.store.set_visible_keys(keys);
        self
    }

    pub fn events(mut self, events: TableEvents) -> Self {
        self.events = events;
        self
    }

    /// Surface that receives live header widths and cursor changes while
    /// resizing.
    pub fn resize_surface(mut self, surface: Arc<dyn ResizeSurface>) -> Self {
        self.resize = ResizeController::new(surface);
        self
    }

    pub fn background(mut self, color: impl Into<String>) -> Self {
        self.background = color.into();
        self
    }

    pub fn store(&self) -> &ColumnStore {
        &self.store
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Replace the rows, e.g. after the host loaded another page.
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
        self.expanded.clear();
    }

    pub fn set_pagination(&mut self, pagination: Option<Pagination>) {
        self.pagination = pagination;
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = Some(selection);
    }

    pub fn get_pagination(&self) -> Option<&Pagination> {
        self.pagination.as_ref()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn sort_config(&self) -> &SortConfig {
        &self.sort
    }

    pub fn get_export_config(&self) -> &ExportConfig {
        &self.export
    }

    pub fn get_groups(&self) -> &[Group] {
        &self.groups
    }

    fn localizer_ref(&self) -> Option<&dyn Localizer> {
        self.localizer.as_deref()
    }

    /// Check the table can be rendered.
    ///
    /// With selection enabled every row needs an `id`.
    pub fn validate(&self) -> Result<()> {
        if self.selection.is_some() {
            validate_row_ids(&self.rows)?;
        }
        Ok(())
    }

    /// Columns in display order: the synthetic selection and serial-number
    /// columns (when enabled), then every displayed caller column.
    pub fn display_columns(&self) -> Vec<Column> {
        let visible = self.store.visible_keys();
        let mut columns = self.synthetic_columns();
        columns.extend(
            self.store
                .columns()
                .iter()
                .filter(|c| is_displayed(c, visible))
                .cloned(),
        );
        columns
    }

    /// Columns offered to export. The on-screen key filter does not apply;
    /// the formatter drops hidden and export-hidden columns itself.
    pub fn export_columns(&self) -> Vec<Column> {
        let mut columns = self.synthetic_columns();
        columns.extend(self.store.columns().iter().cloned());
        columns
    }

    fn synthetic_columns(&self) -> Vec<Column> {
        let mut columns = Vec::with_capacity(self.store.columns().len() + 2);
        if self.selection.is_some() {
            columns.push(
                Column::new(SELECTION_COLUMN_KEY, "")
                    .width(FIXED_COLUMN_WIDTH)
                    .resize(ResizeBehavior::None)
                    .hidden_in_export(true),
            );
        }
        if self.serial_number {
            let label = localize_or(self.localizer_ref(), "serialNumber", SERIAL_COLUMN_LABEL);
            columns.push(
                Column::new(SERIAL_COLUMN_KEY, label)
                    .width(FIXED_COLUMN_WIDTH)
                    .resize(ResizeBehavior::None),
            );
        }
        columns
    }

    /// The column header row.
    pub fn header_cells(&self) -> Vec<HeaderCell> {
        let first_row = self.rows.first();
        let pinned = self.store.pinned();
        self.display_columns()
            .iter()
            .map(|col| {
                let label = match &col.render_header {
                    Some(render) => render
                        .call(first_row, col)
                        .as_text()
                        .unwrap_or_else(|| col.label.clone()),
                    // Synthetic labels are already localized.
                    None if is_synthetic(col) => col.label.clone(),
                    None => localize_label(self.localizer_ref(), &col.label),
                };
                HeaderCell {
                    key: col.key.clone(),
                    label,
                    width: col.effective_width(),
                    placement: pinned.placement(col, &self.background),
                    sortable: col.is_sortable(),
                    sort: self.sort.order_for(col),
                    resizable: col.resize.is_resizable(),
                }
            })
            .collect()
    }

    /// The group header row above the column headers; empty without groups.
    pub fn group_header_cells(&self) -> Vec<GroupHeaderCell> {
        if self.groups.is_empty() {
            return Vec::new();
        }
        let columns = self.display_columns();
        let widths = GroupWidths::compute(&columns, None);
        group_header_cells(&columns, &self.groups, None, &widths, self.localizer_ref())
    }

    /// Cell contents of the row at `index` on the current page.
    pub fn row_cells(&self, index: usize) -> Option<Vec<CellContent>> {
        let row = self.rows.get(index)?;
        let cells = self
            .display_columns()
            .iter()
            .map(|col| match col.key.as_str() {
                SELECTION_COLUMN_KEY if is_synthetic(col) => {
                    let checked = self.selection.as_ref().is_some_and(|s| s.is_selected(row));
                    CellContent::Rich(json!({ "checked": checked }))
                }
                SERIAL_COLUMN_KEY if is_synthetic(col) => {
                    CellContent::Number(serial_number(self.pagination.as_ref(), index) as f64)
                }
                _ => match &col.render_cell {
                    Some(render) => render.call(row, col),
                    None => CellContent::Text(cell_text(row, col)),
                },
            })
            .collect();
        Some(cells)
    }

    /// Flatten the current page for export.
    pub fn export_grid(&self) -> ExportGrid {
        let columns = self.export_columns();
        ExportFormatter::new(&columns)
            .groups(&self.groups)
            .pagination(self.pagination.as_ref())
            .serial_number(self.serial_number)
            .localizer(self.localizer_ref())
            .format(&self.rows)
    }

    /// Sinks offered by the export toolbar.
    pub fn export_buttons(&self) -> Vec<ExportFormat> {
        self.export.enabled_formats()
    }

    /// Write the current page to `dir` in `format`; returns the file path.
    pub fn export(&self, format: ExportFormat, dir: &Path) -> Result<PathBuf> {
        let path = self.export.output_path(dir, format, Utc::now());
        let grid = self.export_grid();
        match format {
            ExportFormat::Csv => write_csv(&grid, &path)?,
            ExportFormat::Text => {
                let options = TextOptions {
                    title: Some(self.export.title().to_string()),
                    ..TextOptions::default()
                };
                write_text(&grid, &path, &options)?
            }
            #[cfg(feature = "pdf")]
            ExportFormat::Pdf => crate::export::write_pdf(&grid, &path, self.export.title())?,
            #[cfg(not(feature = "pdf"))]
            ExportFormat::Pdf => return Err(GridError::UnsupportedFormat("pdf".to_string())),
        }
        info!(path = %path.display(), ?format, "table exported");
        Ok(path)
    }

    /// Caption of the page-size picker.
    pub fn rows_per_page_label(&self) -> String {
        localize_or(self.localizer_ref(), "rowsPerPage", "Rows per page:")
    }

    /// Rows react to clicks only when the host listens for them.
    pub fn rows_clickable(&self) -> bool {
        self.events.has_row_click()
    }

    /// The user clicked the body row at `index`.
    pub fn click_row(&self, index: usize) -> Option<TableEvent> {
        if !self.events.has_row_click() {
            return None;
        }
        let row = self.rows.get(index)?;
        let event = TableEvent::RowClick {
            index,
            row: row.clone(),
        };
        self.events.emit(&event);
        Some(event)
    }

    /// The user picked a page (0-based control index).
    pub fn change_page(&mut self, page_index: usize) -> Option<TableEvent> {
        let pagination = self.pagination.as_mut()?;
        let update = pagination.page_change(page_index);
        pagination.apply(&update);
        self.expanded.clear();
        debug!(page_no = ?update.page_no, "page changed");
        Some(self.emit(TableEvent::Pagination(update)))
    }

    /// The user picked a page size; the table returns to page 1.
    pub fn change_rows_per_page(&mut self, page_size: usize) -> Option<TableEvent> {
        let pagination = self.pagination.as_mut()?;
        let update = pagination.rows_per_page_change(page_size);
        pagination.apply(&update);
        self.expanded.clear();
        debug!(page_size, "page size changed");
        Some(self.emit(TableEvent::Pagination(update)))
    }

    /// The user ticked or unticked the checkbox of the row at `index`.
    ///
    /// Returns `Ok(None)` when selection is off or the index is out of range.
    pub fn toggle_row_selection(&mut self, index: usize) -> Result<Option<TableEvent>> {
        let Some(row) = self.rows.get(index) else {
            return Ok(None);
        };
        let Some(selection) = self.selection.as_mut() else {
            return Ok(None);
        };
        if crate::selection::row_id(row).is_none() {
            return Err(GridError::MissingRowId { index });
        }
        let rows = selection.toggle(row).to_vec();
        Ok(Some(self.emit(TableEvent::Selection { rows })))
    }

    /// The user clicked the header of column `key`.
    ///
    /// Non-sortable columns, including the selection and serial-number
    /// columns, ignore the click.
    pub fn click_header(&mut self, key: &str) -> Result<Option<TableEvent>> {
        let Some(column) = self.store.column(key) else {
            let synthetic = (key == SELECTION_COLUMN_KEY && self.selection.is_some())
                || (key == SERIAL_COLUMN_KEY && self.serial_number);
            if synthetic {
                return Ok(None);
            }
            return Err(GridError::UnknownColumn(key.to_string()));
        };
        let Some((key, order)) = self.sort.on_header_click(column) else {
            return Ok(None);
        };
        self.sort = SortConfig::by(key.clone(), order);
        debug!(column = %key, ?order, "sort changed");
        Ok(Some(self.emit(TableEvent::Sort { key, order })))
    }

    /// Whether rows get an expand toggle.
    pub fn is_expandable(&self) -> bool {
        self.expand.is_some()
    }

    /// Flip the expanded state of the row at `index`; returns the new state.
    pub fn toggle_expanded(&mut self, index: usize) -> bool {
        if self.expand.is_none() || index >= self.rows.len() {
            return false;
        }
        self.expanded.toggle(index)
    }

    pub fn expanded_rows(&self) -> &ExpandedRows {
        &self.expanded
    }

    /// Nested table of the row at `index`, when it is expanded.
    pub fn expansion(&self, index: usize) -> Option<Expansion> {
        if !self.expanded.is_expanded(index) {
            return None;
        }
        let provider = self.expand.as_ref()?;
        provider.call(self.rows.get(index)?)
    }

    /// Pointer went down on the resize handle of column `key` at `x`.
    ///
    /// Returns `Ok(false)` for columns without a handle.
    pub fn begin_resize(&mut self, key: &str, x: f32, kind: PointerKind) -> Result<bool> {
        let column = self
            .store
            .column(key)
            .ok_or_else(|| GridError::UnknownColumn(key.to_string()))?;
        let width = column.effective_width();
        self.resize.begin(column, x, width, kind)
    }

    /// Pointer moved during a resize; returns the committed width.
    pub fn resize_to(&mut self, x: f32) -> Result<Option<f32>> {
        self.resize.update(x, &mut self.store)
    }

    pub fn end_resize(&mut self) -> Option<ResizeOutcome> {
        self.resize.end()
    }

    pub fn cancel_resize(&mut self) {
        self.resize.cancel();
    }

    pub fn is_resizing(&self) -> bool {
        self.resize.is_active()
    }

    fn emit(&self, event: TableEvent) -> TableEvent {
        self.events.emit(&event);
        event
    }
}

/// Synthetic columns are fixed and never carry renderers.
fn is_synthetic(column: &Column) -> bool {
    (column.key == SELECTION_COLUMN_KEY || column.key == SERIAL_COLUMN_KEY)
        && column.render_cell.is_none()
        && column.resize == ResizeBehavior::None
        && column.width == Some(FIXED_COLUMN_WIDTH)
}

impl fmt::Debug for DataTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("columns", &self.store.columns().len())
            .field("rows", &self.rows.len())
            .field("groups", &self.groups.len())
            .field("pagination", &self.pagination)
            .field("serial_number", &self.serial_number)
            .field("selection", &self.selection.as_ref().map(Selection::len))
            .field("sort", &self.sort)
            .field("events", &self.events)
            .finish()
    }
}
