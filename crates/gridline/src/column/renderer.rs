//! Custom cell and header rendering.
//!
//! A column may carry a renderer that turns a row into display content. Front
//! ends draw whatever the renderer returns; exports only keep primitive
//! content and fall back to the raw field value for anything richer.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::Column;
use crate::Row;

/// Content produced by a cell or header renderer.
#[derive(Clone, Debug, PartialEq)]
pub enum CellContent {
    /// Plain text.
    Text(String),
    /// A numeric value, stringified the way a display would show it.
    Number(f64),
    /// Structured content for a front end to draw (icons, checkboxes, links).
    /// Exports cannot embed it.
    Rich(Value),
}

impl CellContent {
    /// The exportable text of this content, or `None` for rich content.
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellContent::Text(s) => Some(s.clone()),
            CellContent::Number(n) => Some(format_number(*n)),
            CellContent::Rich(_) => None,
        }
    }
}

impl From<&str> for CellContent {
    fn from(s: &str) -> Self {
        CellContent::Text(s.to_string())
    }
}

impl From<String> for CellContent {
    fn from(s: String) -> Self {
        CellContent::Text(s)
    }
}

impl From<f64> for CellContent {
    fn from(n: f64) -> Self {
        CellContent::Number(n)
    }
}

impl From<i64> for CellContent {
    fn from(n: i64) -> Self {
        CellContent::Number(n as f64)
    }
}

/// Formats a number without a trailing `.0` for integral values.
pub(crate) fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Renders the body cell of one column for one row.
pub trait CellRenderer: Send + Sync {
    fn render(&self, row: &Row, column: &Column) -> CellContent;
}

impl<F> CellRenderer for F
where
    F: Fn(&Row, &Column) -> CellContent + Send + Sync,
{
    fn render(&self, row: &Row, column: &Column) -> CellContent {
        self(row, column)
    }
}

/// Renders a column header. Receives the first row of the page, if any.
pub trait HeaderRenderer: Send + Sync {
    fn render(&self, first_row: Option<&Row>, column: &Column) -> CellContent;
}

impl<F> HeaderRenderer for F
where
    F: Fn(Option<&Row>, &Column) -> CellContent + Send + Sync,
{
    fn render(&self, first_row: Option<&Row>, column: &Column) -> CellContent {
        self(first_row, column)
    }
}

/// Shared handle to a cell renderer, cheap to clone with its column.
#[derive(Clone)]
pub struct RenderFn(pub(crate) Arc<dyn CellRenderer>);

impl RenderFn {
    pub fn new(renderer: impl CellRenderer + 'static) -> Self {
        RenderFn(Arc::new(renderer))
    }

    pub fn call(&self, row: &Row, column: &Column) -> CellContent {
        self.0.render(row, column)
    }
}

impl fmt::Debug for RenderFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RenderFn(..)")
    }
}

/// Shared handle to a header renderer.
#[derive(Clone)]
pub struct HeaderFn(pub(crate) Arc<dyn HeaderRenderer>);

impl HeaderFn {
    pub fn new(renderer: impl HeaderRenderer + 'static) -> Self {
        HeaderFn(Arc::new(renderer))
    }

    pub fn call(&self, first_row: Option<&Row>, column: &Column) -> CellContent {
        self.0.render(first_row, column)
    }
}

impl fmt::Debug for HeaderFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HeaderFn(..)")
    }
}
