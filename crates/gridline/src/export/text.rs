//! Plain-text sink: a bordered table for terminals and logs.
//!
//! Columns are sized from their content (capped by
//! [`TextOptions::max_column_width`]). A group header row, when present, sits
//! above the column headers and its cells span their member columns; box
//! joints are placed so group boundaries line up with column boundaries.
//!
//! ```text
//! ┌────┬──────────────────┐
//! │    │    Full name     │
//! ├────┼────────┬─────────┤
//! │ ID │ First  │ Last    │
//! ├────┼────────┼─────────┤
//! │ 1  │ Ada    │ Lovelace│
//! └────┴────────┴─────────┘
//! ```

use std::fs;
use std::path::Path;

use console::Style;
use tracing::debug;

use super::ExportGrid;
use crate::error::Result;
use crate::util::{display_width, pad_center, pad_right, truncate_end};

/// Border style for the text table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BorderStyle {
    /// Columns separated by spaces, no rules.
    None,
    /// `+`, `-` and `|`.
    Ascii,
    /// Light box-drawing characters.
    #[default]
    Light,
}

impl BorderStyle {
    fn glyphs(self) -> Glyphs {
        match self {
            BorderStyle::None => Glyphs {
                line: ' ',
                bar: ' ',
                joints: [[' '; 3]; 3],
            },
            BorderStyle::Ascii => Glyphs {
                line: '-',
                bar: '|',
                joints: [['+'; 3]; 3],
            },
            BorderStyle::Light => Glyphs {
                line: '─',
                bar: '│',
                joints: [['┌', '┬', '┐'], ['├', '┼', '┤'], ['└', '┴', '┘']],
            },
        }
    }
}

/// Rule and separator characters. `joints[tier][pos]`: tier is top, middle or
/// bottom rule; pos is left edge, inner joint or right edge.
#[derive(Clone, Copy, Debug)]
struct Glyphs {
    line: char,
    bar: char,
    joints: [[char; 3]; 3],
}

const TOP: usize = 0;
const MIDDLE: usize = 1;
const BOTTOM: usize = 2;

/// Options for [`ExportGrid::to_text`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextOptions {
    pub border: BorderStyle,
    /// Widest a column may grow before its cells are truncated with `…`.
    pub max_column_width: usize,
    /// Bold header rows (emitted only when the terminal supports styling).
    pub styled: bool,
    /// Line printed above the table.
    pub title: Option<String>,
}

impl Default for TextOptions {
    fn default() -> Self {
        TextOptions {
            border: BorderStyle::default(),
            max_column_width: 40,
            styled: false,
            title: None,
        }
    }
}

/// Horizontal rule position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Rule {
    Top,
    /// Between the group row and the column header row.
    UnderGroups,
    Middle,
    Bottom,
}

impl ExportGrid {
    /// Render the grid as a bordered text table.
    pub fn to_text(&self, options: &TextOptions) -> String {
        let mut lines = Vec::new();
        if let Some(title) = &options.title {
            lines.push(title.clone());
        }
        if self.num_columns() == 0 {
            return lines.join("\n");
        }

        let layout = TextLayout::new(self, options.max_column_width.max(1));
        let glyphs = options.border.glyphs();
        let bordered = options.border != BorderStyle::None;
        let header_style = Style::new().bold();

        if bordered {
            lines.push(layout.rule(&glyphs, Rule::Top, self.has_group_headers()));
        }
        if self.has_group_headers() {
            let cells: Vec<String> = self
                .group_headers
                .iter()
                .zip(layout.group_spans.iter())
                .map(|(cell, &(start, span))| {
                    let inner = layout.spanned_width(start, span);
                    pad_center(&truncate_end(&cell.label, inner, "…"), inner)
                })
                .collect();
            lines.push(layout.row(&glyphs, &cells, options.styled.then_some(&header_style)));
            if bordered {
                lines.push(layout.rule(&glyphs, Rule::UnderGroups, true));
            }
        }

        let headers: Vec<String> = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, h)| layout.fit(h, i))
            .collect();
        lines.push(layout.row(&glyphs, &headers, options.styled.then_some(&header_style)));
        if bordered {
            lines.push(layout.rule(&glyphs, Rule::Middle, false));
        }

        for data in &self.data_rows {
            let cells: Vec<String> = (0..self.num_columns())
                .map(|i| layout.fit(data.get(i).map(String::as_str).unwrap_or(""), i))
                .collect();
            lines.push(layout.row(&glyphs, &cells, None));
        }
        if bordered {
            lines.push(layout.rule(&glyphs, Rule::Bottom, false));
        }

        if bordered {
            lines.join("\n")
        } else {
            lines
                .iter()
                .map(|l| l.trim_end())
                .collect::<Vec<_>>()
                .join("\n")
        }
    }
}

/// Write the grid as a text table at `path`, newline-terminated.
pub fn write_text(grid: &ExportGrid, path: &Path, options: &TextOptions) -> Result<()> {
    let mut content = grid.to_text(options);
    content.push('\n');
    fs::write(path, content.as_bytes())?;
    debug!(path = %path.display(), rows = grid.data_rows.len(), "text export written");
    Ok(())
}

/// Resolved column widths plus the column ranges covered by group cells.
struct TextLayout {
    widths: Vec<usize>,
    /// `(first column, span)` per group header cell.
    group_spans: Vec<(usize, usize)>,
}

impl TextLayout {
    fn new(grid: &ExportGrid, max_width: usize) -> Self {
        let n = grid.num_columns();
        let mut widths: Vec<usize> = grid
            .headers
            .iter()
            .map(|h| display_width(&single_line(h)))
            .collect();
        for row in &grid.data_rows {
            for (i, cell) in row.iter().take(n).enumerate() {
                widths[i] = widths[i].max(display_width(&single_line(cell)));
            }
        }
        for w in &mut widths {
            *w = (*w).clamp(1, max_width);
        }

        let mut group_spans = Vec::with_capacity(grid.group_headers.len());
        let mut start = 0;
        for cell in &grid.group_headers {
            let span = cell.span.max(1).min(n.saturating_sub(start));
            if span == 0 {
                break;
            }
            group_spans.push((start, span));
            start += span;
        }

        // Widen the last member column when a group label does not fit.
        for (cell, &(start, span)) in grid.group_headers.iter().zip(&group_spans) {
            let needed = display_width(&cell.label).min(max_width);
            let available = spanned_width(&widths, start, span);
            if needed > available {
                widths[start + span - 1] += needed - available;
            }
        }

        TextLayout {
            widths,
            group_spans,
        }
    }

    fn spanned_width(&self, start: usize, span: usize) -> usize {
        spanned_width(&self.widths, start, span)
    }

    fn fit(&self, text: &str, column: usize) -> String {
        let width = self.widths[column];
        pad_right(&truncate_end(&single_line(text), width, "…"), width)
    }

    fn is_group_boundary(&self, after_column: usize) -> bool {
        self.group_spans
            .iter()
            .any(|&(start, span)| start + span - 1 == after_column)
    }

    fn rule(&self, glyphs: &Glyphs, rule: Rule, grouped_top: bool) -> String {
        let tier = match rule {
            Rule::Top => TOP,
            Rule::UnderGroups | Rule::Middle => MIDDLE,
            Rule::Bottom => BOTTOM,
        };
        let [left, inner, right] = glyphs.joints[tier];

        let mut line = String::new();
        line.push(left);
        for (i, &w) in self.widths.iter().enumerate() {
            line.extend(std::iter::repeat(glyphs.line).take(w + 2));
            if i + 1 == self.widths.len() {
                break;
            }
            let boundary = self.is_group_boundary(i);
            let joint = match rule {
                Rule::Top if grouped_top && !boundary => glyphs.line,
                // Columns split below a group cell: open downward only.
                Rule::UnderGroups if !boundary => glyphs.joints[TOP][1],
                _ => inner,
            };
            line.push(joint);
        }
        line.push(right);
        line
    }

    fn row(&self, glyphs: &Glyphs, cells: &[String], style: Option<&Style>) -> String {
        let v = glyphs.bar.to_string();
        let body = cells
            .iter()
            .map(|cell| match style {
                Some(style) => format!(" {} ", style.apply_to(cell)),
                None => format!(" {} ", cell),
            })
            .collect::<Vec<_>>()
            .join(&v);
        format!("{}{}{}", v, body, v)
    }
}

/// Content width of a cell spanning `span` columns from `start`, counting the
/// padding and separators it swallows.
fn spanned_width(widths: &[usize], start: usize, span: usize) -> usize {
    let padded: usize = widths[start..start + span].iter().map(|w| w + 2).sum();
    padded + (span - 1) - 2
}

fn single_line(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}
