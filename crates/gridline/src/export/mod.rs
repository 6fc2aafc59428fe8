//! Export formatting.
//!
//! [`ExportFormatter`] flattens columns, groups and rows into an
//! [`ExportGrid`]: header labels, an optional group header row with spans,
//! and string cells aligned with the headers. The grid is sink-agnostic; the
//! CSV, text and PDF sinks all consume the same cells.
//!
//! ```rust
//! use gridline::{Column, ExportFormatter};
//! use serde_json::json;
//!
//! let columns = vec![Column::new("a", "A"), Column::new("b", "B")];
//! let rows = vec![json!({"a": 1, "b": "x,y"}).as_object().cloned().unwrap()];
//!
//! let grid = ExportFormatter::new(&columns).format(&rows);
//! assert_eq!(grid.to_csv(), "A,B\n1,\"x,y\"");
//! ```
//!
//! # Cell values
//!
//! | Source | Cell |
//! |--------|------|
//! | serial numbers on, first exported column | page-aware serial number |
//! | renderer returning text or a number | that text |
//! | renderer returning rich content | clean text of the raw field |
//! | no renderer | clean text of the raw field |
//!
//! Clean text: null or missing → empty, booleans → `Yes`/`No`, arrays → items
//! joined with `,`, objects → compact JSON.
//!
//! Cells containing a comma, double quote or newline are quoted CSV-style in
//! every sink.

mod config;
mod csv;
#[cfg(feature = "pdf")]
mod pdf;
mod text;

use std::borrow::Cow;

use serde::Serialize;
use serde_json::Value;

use crate::column::{find_group, format_number, Column, Group};
use crate::localize::{localize_label, Localizer};
use crate::pagination::{serial_number, Pagination};
use crate::Row;

pub use self::config::{export_file_name, ExportConfig, ExportFormat};
pub use self::csv::write_csv;
#[cfg(feature = "pdf")]
pub use self::pdf::write_pdf;
pub use self::text::{write_text, BorderStyle, TextOptions};

/// One cell of the export group header row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GroupHeader {
    pub group_id: Option<String>,
    /// Localized, escaped group label; empty for spacer cells over
    /// ungrouped columns.
    pub label: String,
    pub span: usize,
}

impl GroupHeader {
    fn spacer() -> Self {
        GroupHeader {
            group_id: None,
            label: String::new(),
            span: 1,
        }
    }
}

/// Normalized header and row cells shared by all export sinks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ExportGrid {
    pub headers: Vec<String>,
    /// Empty when no groups were supplied.
    pub group_headers: Vec<GroupHeader>,
    pub data_rows: Vec<Vec<String>>,
}

impl ExportGrid {
    pub fn num_columns(&self) -> usize {
        self.headers.len()
    }

    pub fn has_group_headers(&self) -> bool {
        !self.group_headers.is_empty()
    }

    /// Group header row expanded to one cell per column: each label followed
    /// by `span - 1` empty cells.
    pub fn expanded_group_row(&self) -> Vec<String> {
        let mut row = Vec::with_capacity(self.headers.len());
        for cell in &self.group_headers {
            row.push(cell.label.clone());
            row.extend(std::iter::repeat(String::new()).take(cell.span.saturating_sub(1)));
        }
        row
    }
}

/// Builds an [`ExportGrid`] from columns and rows.
#[derive(Clone, Copy)]
pub struct ExportFormatter<'a> {
    columns: &'a [Column],
    groups: &'a [Group],
    pagination: Option<&'a Pagination>,
    serial_number: bool,
    localizer: Option<&'a dyn Localizer>,
}

impl<'a> ExportFormatter<'a> {
    pub fn new(columns: &'a [Column]) -> Self {
        ExportFormatter {
            columns,
            groups: &[],
            pagination: None,
            serial_number: false,
            localizer: None,
        }
    }

    pub fn groups(mut self, groups: &'a [Group]) -> Self {
        self.groups = groups;
        self
    }

    pub fn pagination(mut self, pagination: Option<&'a Pagination>) -> Self {
        self.pagination = pagination;
        self
    }

    /// Put serial numbers in the first exported column.
    pub fn serial_number(mut self, enabled: bool) -> Self {
        self.serial_number = enabled;
        self
    }

    pub fn localizer(mut self, localizer: Option<&'a dyn Localizer>) -> Self {
        self.localizer = localizer;
        self
    }

    /// Columns that appear in the export, in list order.
    pub fn export_columns(&self) -> Vec<&'a Column> {
        self.columns.iter().filter(|c| c.is_exported()).collect()
    }

    pub fn format(&self, rows: &[Row]) -> ExportGrid {
        let columns = self.export_columns();

        let headers = columns
            .iter()
            .map(|col| escape_cell(&localize_label(self.localizer, &col.label)).into_owned())
            .collect();

        let group_headers = if self.groups.is_empty() {
            Vec::new()
        } else {
            self.group_headers(&columns)
        };

        let data_rows = rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                columns
                    .iter()
                    .enumerate()
                    .map(|(position, col)| {
                        let value = if self.serial_number && position == 0 {
                            serial_number(self.pagination, index).to_string()
                        } else {
                            cell_text(row, col)
                        };
                        escape_cell(&value).into_owned()
                    })
                    .collect()
            })
            .collect();

        ExportGrid {
            headers,
            group_headers,
            data_rows,
        }
    }

    fn group_headers(&self, columns: &[&Column]) -> Vec<GroupHeader> {
        let mut cells: Vec<GroupHeader> = Vec::new();
        for col in columns {
            let Some(group_id) = col.group_id.as_deref() else {
                cells.push(GroupHeader::spacer());
                continue;
            };
            match cells.last_mut() {
                Some(last) if last.group_id.as_deref() == Some(group_id) => last.span += 1,
                _ => cells.push(GroupHeader {
                    group_id: Some(group_id.to_string()),
                    label: find_group(self.groups, group_id)
                        .map(|g| {
                            escape_cell(&localize_label(self.localizer, &g.label)).into_owned()
                        })
                        .unwrap_or_default(),
                    span: 1,
                }),
            }
        }
        cells
    }
}

/// Export text of one cell, before escaping.
pub fn cell_text(row: &Row, column: &Column) -> String {
    if let Some(renderer) = &column.render_cell {
        if let Some(text) = renderer.call(row, column).as_text() {
            return text;
        }
    }
    clean_text(row.get(&column.key))
}

/// Plain-text rendering of a raw field value.
pub fn clean_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) if n.is_f64() => format_number(f),
            _ => n.to_string(),
        },
        Some(Value::Bool(b)) => (if *b { "Yes" } else { "No" }).to_string(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| clean_text(Some(item)))
            .collect::<Vec<_>>()
            .join(","),
        Some(object @ Value::Object(_)) => object.to_string(),
    }
}

/// Quote a cell that contains a comma, double quote or newline.
pub fn escape_cell(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}
