//! PDF sink (behind the `pdf` feature).
//!
//! Landscape A4 pages with the document title on top. Each page repeats the
//! group header row (as spanned cells) and the column headers.

use std::path::Path;

use oxidize_pdf::graphics::Color;
use oxidize_pdf::text::{HeaderStyle, Table, TableCell, TableOptions, TextAlign};
use oxidize_pdf::{Document, Font, Page};
use tracing::debug;

use super::ExportGrid;
use crate::error::{GridError, Result};
use crate::util::display_width;

const PAGE_WIDTH: f64 = 842.0;
const PAGE_HEIGHT: f64 = 595.0;
const MARGIN: f64 = 40.0;
const ROWS_PER_PAGE: usize = 28;

/// Write the grid as a PDF document at `path`.
pub fn write_pdf(grid: &ExportGrid, path: &Path, title: &str) -> Result<()> {
    let mut doc = Document::new();
    doc.set_title(title);

    let widths = column_widths(grid);
    let chunks: Vec<&[Vec<String>]> = if grid.data_rows.is_empty() {
        vec![grid.data_rows.as_slice()]
    } else {
        grid.data_rows.chunks(ROWS_PER_PAGE).collect()
    };
    let pages = chunks.len();

    for rows in chunks {
        let mut page = Page::new(PAGE_WIDTH, PAGE_HEIGHT);
        page.text()
            .set_font(Font::HelveticaBold, 16.0)
            .at(MARGIN, PAGE_HEIGHT - MARGIN)
            .write(title)
            .map_err(pdf_error)?;

        if !widths.is_empty() {
            let table = page_table(grid, rows, &widths)?;
            page.graphics().render_table(&table).map_err(pdf_error)?;
        }
        doc.add_page(page);
    }

    doc.save(path).map_err(pdf_error)?;
    debug!(path = %path.display(), rows = grid.data_rows.len(), pages, "PDF export written");
    Ok(())
}

fn page_table(grid: &ExportGrid, rows: &[Vec<String>], widths: &[f64]) -> Result<Table> {
    let mut table = Table::new(widths.to_vec());
    table.set_position(MARGIN, PAGE_HEIGHT - MARGIN - 24.0);
    table.set_options(TableOptions {
        font_size: 9.0,
        cell_padding: 4.0,
        border_color: Color::gray(0.3),
        header_style: Some(HeaderStyle {
            background_color: Color::rgb(0.16, 0.5, 0.73),
            text_color: Color::white(),
            font: Font::HelveticaBold,
            bold: true,
        }),
        ..Default::default()
    });

    if grid.has_group_headers() {
        let cells = grid
            .group_headers
            .iter()
            .map(|cell| {
                TableCell::with_colspan(cell.label.clone(), cell.span.max(1))
                    .set_align(TextAlign::Center)
                    .clone()
            })
            .collect();
        table.add_custom_row(cells).map_err(pdf_error)?;
    }
    table
        .add_header_row(grid.headers.clone())
        .map_err(pdf_error)?;

    let n = grid.num_columns();
    for row in rows {
        let mut cells: Vec<String> = row.iter().take(n).map(|c| c.replace('\n', " ")).collect();
        cells.resize(n, String::new());
        table.add_row(cells).map_err(pdf_error)?;
    }
    Ok(table)
}

/// Column widths proportional to content, filling the printable width.
fn column_widths(grid: &ExportGrid) -> Vec<f64> {
    let mut weights: Vec<usize> = grid.headers.iter().map(|h| display_width(h)).collect();
    for row in &grid.data_rows {
        for (w, cell) in weights.iter_mut().zip(row) {
            *w = (*w).max(display_width(cell));
        }
    }
    let weights: Vec<f64> = weights.into_iter().map(|w| w.clamp(4, 40) as f64).collect();
    let total: f64 = weights.iter().sum();
    let printable = PAGE_WIDTH - 2.0 * MARGIN;
    weights.iter().map(|w| printable * w / total).collect()
}

fn pdf_error(err: impl std::fmt::Display) -> GridError {
    GridError::Pdf(err.to_string())
}
