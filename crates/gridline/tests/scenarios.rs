//! End-to-end scenarios: layout, resize and export through the public API.

use std::sync::{Arc, Mutex};

use gridline::{
    Column, ColumnStore, DataTable, ExportFormat, ExportFormatter, Group, Pagination, Pin,
    PointerKind, ResizeController, ResizeSurface, Row, TableDefinition,
};
use serde_json::json;

fn rows(values: Vec<serde_json::Value>) -> Vec<Row> {
    values.into_iter().map(|v| v.as_object().cloned().unwrap()).collect()
}

#[derive(Default)]
struct Recorder {
    calls: Mutex<Vec<String>>,
}

impl ResizeSurface for Recorder {
    fn set_resize_cursor(&self, active: bool) {
        self.calls.lock().unwrap().push(format!("cursor {}", active));
    }

    fn set_header_width(&self, key: &str, width: f32) {
        self.calls.lock().unwrap().push(format!("{} = {}", key, width));
    }
}

#[test]
fn csv_quotes_commas() {
    let columns = vec![Column::new("a", "A"), Column::new("b", "B")];
    let grid = ExportFormatter::new(&columns).format(&rows(vec![json!({"a": 1, "b": "x,y"})]));
    assert_eq!(grid.to_csv(), "A,B\n1,\"x,y\"");
}

#[test]
fn serial_numbers_follow_pagination() {
    let columns = vec![Column::new("n", "N")];
    let data = rows(vec![json!({"n": "first"})]);
    let pagination = Pagination::new(2, 10, 100);

    let paged = ExportFormatter::new(&columns)
        .serial_number(true)
        .pagination(Some(&pagination))
        .format(&data);
    assert_eq!(paged.data_rows[0][0], "11");

    let unpaged = ExportFormatter::new(&columns).serial_number(true).format(&data);
    assert_eq!(unpaged.data_rows[0][0], "1");
}

#[test]
fn two_grouped_of_three_give_spacer_and_span() {
    let columns = vec![
        Column::new("a", "A"),
        Column::new("b", "B").group("g1"),
        Column::new("c", "C").group("g1"),
    ];
    let groups = vec![Group::new("g1", "Group")];
    let grid = ExportFormatter::new(&columns).groups(&groups).format(&[]);

    let cells: Vec<(&str, usize)> = grid
        .group_headers
        .iter()
        .map(|g| (g.label.as_str(), g.span))
        .collect();
    assert_eq!(cells, vec![("", 1), ("Group", 2)]);
}

#[test]
fn resize_commits_and_recomputes() {
    let columns = vec![
        Column::new("a", "A").width(100.0).pin(Pin::Left).group("g"),
        Column::new("b", "B").width(50.0).pin(Pin::Left).group("g"),
        Column::new("c", "C").width(80.0),
    ];
    let mut store = ColumnStore::new(columns).unwrap();
    let surface = Arc::new(Recorder::default());
    let mut controller = ResizeController::new(surface.clone());

    let column = store.column("a").unwrap().clone();
    assert!(controller.begin(&column, 200.0, 100.0, PointerKind::Mouse).unwrap());
    assert_eq!(controller.update(220.0, &mut store).unwrap(), Some(120.0));
    let outcome = controller.end().unwrap();

    assert_eq!(outcome.final_width, Some(120.0));
    assert_eq!(store.column("a").unwrap().width, Some(120.0));
    assert_eq!(store.pinned().left_offset("b"), Some(120.0));
    assert_eq!(store.group_widths().get("g"), Some(170.0));
    assert_eq!(
        *surface.calls.lock().unwrap(),
        vec!["cursor true", "a = 120", "cursor false"]
    );
}

#[test]
fn touch_gestures_commit_too() {
    let mut store = ColumnStore::new(vec![Column::new("a", "A").width(100.0)]).unwrap();
    let mut controller = ResizeController::headless();
    let column = store.column("a").unwrap().clone();

    controller.begin(&column, 0.0, 100.0, PointerKind::Touch).unwrap();
    controller.update(-30.0, &mut store).unwrap();
    controller.cancel();

    assert_eq!(store.column("a").unwrap().width, Some(70.0));
    assert!(!controller.is_active());
}

#[test]
fn fast_left_drag_is_clamped() {
    let mut store = ColumnStore::new(vec![Column::new("a", "A").width(100.0)]).unwrap();
    let mut controller = ResizeController::headless();
    let column = store.column("a").unwrap().clone();

    controller.begin(&column, 500.0, 100.0, PointerKind::Mouse).unwrap();
    assert_eq!(controller.update(0.0, &mut store).unwrap(), Some(gridline::MIN_COLUMN_WIDTH));
}

#[test]
fn yaml_definition_exports_to_disk() {
    let def = TableDefinition::from_yaml(
        r#"
columns:
  - key: sku
    label: SKU
  - key: qty
    label: Qty
  - key: tags
    label: Tags
export:
  filename: stock
  title: Stock
  csvEnabled: true
"#,
    )
    .unwrap();
    let table: DataTable = def
        .into_table(rows(vec![
            json!({"sku": "A-1", "qty": 3, "tags": ["new", "sale"]}),
            json!({"sku": "B-2", "qty": null, "tags": []}),
        ]))
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let csv = table.export(ExportFormat::Csv, dir.path()).unwrap();
    assert_eq!(
        std::fs::read_to_string(csv).unwrap(),
        "SKU,Qty,Tags\nA-1,3,\"new,sale\"\nB-2,,"
    );

    let text = table.export(ExportFormat::Text, dir.path()).unwrap();
    assert_eq!(text.file_name().unwrap(), "stock.txt");
    let preview = std::fs::read_to_string(text).unwrap();
    assert!(preview.starts_with("Stock\n┌"));
    assert!(preview.contains("│ A-1 │ 3   │ \"new,sale\" │"));
}
