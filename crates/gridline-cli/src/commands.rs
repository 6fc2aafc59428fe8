//! Command implementations.
//!
//! Each command returns the text to print on stdout; `main` does the
//! printing so tests can drive commands directly.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use gridline::{
    rows_from_csv, rows_from_json, rows_from_yaml, BorderStyle, ColumnStore, ExportGrid,
    GroupHeaderCell, Pagination, Pin, Row, TableDefinition, TextOptions,
};
use serde::Serialize;
use tracing::debug;

use crate::cli::{Cli, Commands, ExportArgs, LayoutArgs, LayoutFormat};

/// Run the parsed command line.
pub fn run(cli: Cli) -> Result<String> {
    match cli.command {
        Commands::Export(args) => export(args),
        Commands::Layout(args) => layout(args),
    }
}

fn export(args: ExportArgs) -> Result<String> {
    let mut definition = load_definition(&args.table)?;
    let mut rows = load_rows(&args.rows)?;
    debug!(rows = rows.len(), "rows loaded");

    if args.page.is_some() || args.page_size.is_some() {
        let page_size = args
            .page_size
            .or(definition.pagination.map(|p| p.page_size))
            .unwrap_or(10);
        if page_size == 0 {
            bail!("--page-size must be at least 1");
        }
        let page = args.page.unwrap_or(1).max(1);
        let pagination = Pagination::new(page, page_size, rows.len());
        let last_page = pagination.page_count().max(1);
        if page > last_page {
            bail!("--page {} is past the last page ({})", page, last_page);
        }
        rows = rows
            .into_iter()
            .skip(pagination.offset())
            .take(page_size)
            .collect();
        definition.pagination = Some(pagination);
    }

    let table = definition
        .into_table(rows)
        .with_context(|| format!("invalid table definition {}", args.table.display()))?;

    fs::create_dir_all(&args.out)
        .with_context(|| format!("failed to create {}", args.out.display()))?;
    let path = table
        .export(args.format.into(), &args.out)
        .context("export failed")?;
    Ok(format!("wrote {}", path.display()))
}

/// Per-column geometry reported by `layout`.
#[derive(Debug, Serialize)]
struct ColumnLayout {
    key: String,
    width: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pinned: Option<Pin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    group: Option<String>,
    hidden: bool,
}

#[derive(Debug, Serialize)]
struct LayoutReport {
    columns: Vec<ColumnLayout>,
    group_widths: BTreeMap<String, f32>,
    group_header: Vec<GroupHeaderCell>,
}

fn layout(args: LayoutArgs) -> Result<String> {
    let definition = load_definition(&args.table)?;
    let table = definition
        .into_table(Vec::new())
        .with_context(|| format!("invalid table definition {}", args.table.display()))?;
    let store = table.store();

    let report = LayoutReport {
        columns: column_layouts(store),
        group_widths: store
            .group_widths()
            .iter()
            .map(|(key, width)| (key.to_string(), width))
            .collect(),
        group_header: table.group_header_cells(),
    };

    match args.output {
        LayoutFormat::Json => Ok(serde_json::to_string_pretty(&report)?),
        LayoutFormat::Yaml => Ok(serde_yaml::to_string(&report)?),
        LayoutFormat::Text => Ok(render_report(&report)),
    }
}

fn column_layouts(store: &ColumnStore) -> Vec<ColumnLayout> {
    let pinned = store.pinned();
    store
        .columns()
        .iter()
        .map(|col| ColumnLayout {
            key: col.key.clone(),
            width: col.effective_width(),
            pinned: col.pinned,
            offset: match col.pinned {
                Some(Pin::Left) => pinned.left_offset(&col.key),
                Some(Pin::Right) => pinned.right_offset(&col.key),
                None => None,
            },
            group: col.group_id.clone(),
            hidden: col.is_hidden(),
        })
        .collect()
}

fn render_report(report: &LayoutReport) -> String {
    let options = TextOptions {
        border: BorderStyle::Light,
        ..TextOptions::default()
    };

    let columns = ExportGrid {
        headers: ["Column", "Width", "Pinned", "Offset", "Group", "Hidden"]
            .map(String::from)
            .to_vec(),
        group_headers: Vec::new(),
        data_rows: report
            .columns
            .iter()
            .map(|c| {
                vec![
                    c.key.clone(),
                    c.width.to_string(),
                    match c.pinned {
                        Some(Pin::Left) => "left".to_string(),
                        Some(Pin::Right) => "right".to_string(),
                        None => String::new(),
                    },
                    c.offset.map(|o| o.to_string()).unwrap_or_default(),
                    c.group.clone().unwrap_or_default(),
                    (if c.hidden { "yes" } else { "" }).to_string(),
                ]
            })
            .collect(),
    };

    let groups = ExportGrid {
        headers: vec!["Group".to_string(), "Width".to_string()],
        group_headers: Vec::new(),
        data_rows: report
            .group_widths
            .iter()
            .map(|(key, width)| vec![key.clone(), width.to_string()])
            .collect(),
    };

    let mut out = columns.to_text(&options);
    out.push_str("\n\n");
    out.push_str(&groups.to_text(&options));
    if !report.group_header.is_empty() {
        let cells: Vec<String> = report
            .group_header
            .iter()
            .map(|cell| {
                let label = if cell.label.is_empty() { "-" } else { cell.label.as_str() };
                format!("{} x{} ({})", label, cell.span, cell.width)
            })
            .collect();
        out.push_str("\n\nGroup header: ");
        out.push_str(&cells.join(" | "));
    }
    out
}

fn load_definition(path: &Path) -> Result<TableDefinition> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let definition = match extension(path).as_str() {
        "json" => TableDefinition::from_json(&content),
        "yaml" | "yml" => TableDefinition::from_yaml(&content),
        other => bail!(
            "unsupported table definition format '{}' (expected .yaml, .yml or .json)",
            other
        ),
    };
    definition.with_context(|| format!("failed to parse {}", path.display()))
}

/// Load rows, picking the parser from the file extension.
pub fn load_rows(path: &Path) -> Result<Vec<Row>> {
    let rows = match extension(path).as_str() {
        "csv" => {
            let file =
                fs::File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
            rows_from_csv(file)
        }
        ext @ ("json" | "yaml" | "yml") => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            if ext == "json" {
                rows_from_json(&content)
            } else {
                rows_from_yaml(&content)
            }
        }
        other => bail!(
            "unsupported row format '{}' (expected .json, .yaml, .yml or .csv)",
            other
        ),
    };
    rows.with_context(|| format!("failed to parse rows from {}", path.display()))
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase()
}
