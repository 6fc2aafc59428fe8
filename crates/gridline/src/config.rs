//! Declarative table definitions.
//!
//! Everything about a table except code (renderers, expansion providers,
//! callbacks) can be described in YAML or JSON:
//!
//! ```yaml
//! columns:
//!   - key: id
//!     label: ID
//!     width: 80
//!     pinned: left
//!   - key: first
//!     label: First
//!     groupId: name
//!   - key: last
//!     label: Last
//!     groupId: name
//! groups:
//!   - id: name
//!     label: Full name
//! serialNumber: true
//! export:
//!   filename: people
//!   csvEnabled: true
//! ```
//!
//! Field names follow the camelCase of the JSON props hosts already send;
//! snake_case spellings are accepted too.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::column::{Column, Group};
use crate::error::Result;
use crate::export::ExportConfig;
use crate::localize::StringTable;
use crate::pagination::Pagination;
use crate::selection::Selection;
use crate::sort::SortConfig;
use crate::table::DataTable;
use crate::Row;

/// A serializable table description.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDefinition {
    pub columns: Vec<Column>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<Group>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default, alias = "serial_number")]
    pub serial_number: bool,
    #[serde(default, alias = "row_selection")]
    pub row_selection: bool,
    /// Keys of the columns to show; all columns when absent.
    #[serde(
        default,
        alias = "visible_columns",
        skip_serializing_if = "Option::is_none"
    )]
    pub visible_columns: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortConfig>,
    /// Translations for labels and built-in captions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strings: Option<StringTable>,
}

impl TableDefinition {
    pub fn from_yaml(input: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(input)?)
    }

    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Build a table over `rows`.
    ///
    /// Fails on duplicate column keys, and on rows without ids when
    /// selection is enabled.
    pub fn into_table(self, rows: Vec<Row>) -> Result<DataTable> {
        let visible = self
            .visible_columns
            .map(|keys| keys.into_iter().collect::<HashSet<_>>());
        let mut table = DataTable::new(self.columns, rows)?
            .groups(self.groups)
            .serial_number(self.serial_number)
            .export_config(self.export)
            .visible_keys(visible);
        if let Some(pagination) = self.pagination {
            table = table.pagination(pagination);
        }
        if self.row_selection {
            table = table.row_selection(Selection::default());
        }
        if let Some(sort) = self.sort {
            table = table.sort(sort);
        }
        if let Some(strings) = self.strings {
            table = table.localizer(strings);
        }
        table.validate()?;
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Pin;
    use crate::error::GridError;
    use serde_json::json;

    const PEOPLE: &str = r##"
columns:
  - key: id
    label: ID
    width: 80
    pinned: left
  - key: first
    label: First
    groupId: name
  - key: last
    label: Last
    group_id: name
  - key: notes
    label: Notes
    hiddenInExport: true
groups:
  - id: name
    label: Full name
serialNumber: true
pagination:
  pageNo: 2
  pageSize: 10
  totalRecords: 25
export:
  filename: people
  csvEnabled: true
strings:
  serialNumber: "#"
"##;

    fn rows() -> Vec<Row> {
        vec![json!({"id": 7, "first": "Ada", "last": "Lovelace", "notes": "x"})
            .as_object()
            .cloned()
            .unwrap()]
    }

    #[test]
    fn parses_yaml_definition() {
        let def = TableDefinition::from_yaml(PEOPLE).unwrap();
        assert_eq!(def.columns.len(), 4);
        assert_eq!(def.columns[0].pinned, Some(Pin::Left));
        assert_eq!(def.columns[2].group_id.as_deref(), Some("name"));
        assert!(def.serial_number);
        assert_eq!(def.pagination.unwrap().page_no, 2);
        assert_eq!(def.export.filename(), "people");
    }

    #[test]
    fn builds_table_with_localized_serial_column() {
        let table = TableDefinition::from_yaml(PEOPLE).unwrap().into_table(rows()).unwrap();
        assert_eq!(
            table.export_grid().to_csv(),
            "#,ID,First,Last\n,,Full name,\n11,7,Ada,Lovelace"
        );
    }

    #[test]
    fn visible_columns_filter_display() {
        let def = TableDefinition::from_json(
            r#"{"columns": [{"key": "a", "label": "A"}, {"key": "b", "label": "B"}], "visibleColumns": ["b"]}"#,
        )
        .unwrap();
        let table = def.into_table(Vec::new()).unwrap();
        let keys: Vec<String> = table.display_columns().into_iter().map(|c| c.key).collect();
        assert_eq!(keys, ["b"]);
    }

    #[test]
    fn selection_without_ids_is_rejected() {
        let def = TableDefinition::from_json(
            r#"{"columns": [{"key": "a"}], "rowSelection": true}"#,
        )
        .unwrap();
        let rows = vec![json!({"a": 1}).as_object().cloned().unwrap()];
        assert!(matches!(
            def.into_table(rows),
            Err(GridError::MissingRowId { index: 0 })
        ));
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let def = TableDefinition::from_json(r#"{"columns": [{"key": "a"}, {"key": "a"}]}"#).unwrap();
        assert!(matches!(
            def.into_table(Vec::new()),
            Err(GridError::DuplicateColumnKey(key)) if key == "a"
        ));
    }
}
