//! CSV sink.
//!
//! Cells in an [`ExportGrid`] are already quoted where needed, so the sink
//! only joins them: header line, group header line (when groups exist), then
//! one line per row, with no trailing newline.

use std::fs;
use std::path::Path;

use tracing::debug;

use super::ExportGrid;
use crate::error::Result;

impl ExportGrid {
    /// Render the grid as CSV text.
    pub fn to_csv(&self) -> String {
        let mut lines: Vec<String> = Vec::with_capacity(self.data_rows.len() + 2);
        lines.push(self.headers.join(","));
        if self.has_group_headers() {
            lines.push(self.expanded_group_row().join(","));
        }
        lines.extend(self.data_rows.iter().map(|row| row.join(",")));
        lines.join("\n")
    }
}

/// Write the grid as a CSV file at `path`.
pub fn write_csv(grid: &ExportGrid, path: &Path) -> Result<()> {
    let content = grid.to_csv();
    fs::write(path, content.as_bytes())?;
    debug!(path = %path.display(), rows = grid.data_rows.len(), "CSV export written");
    Ok(())
}
