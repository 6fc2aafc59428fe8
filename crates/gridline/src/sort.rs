//! Header-driven sort state.
//!
//! The table does not reorder host data on its own: a click on a sortable
//! header yields `(column key, new order)` for the host to act on.
//! [`sort_rows`] is provided for hosts that sort an in-memory page locally.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::column::Column;
use crate::Row;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn reversed(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Active sort column and direction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortConfig {
    #[serde(default)]
    pub order_by: Option<String>,
    #[serde(default)]
    pub order: SortOrder,
}

impl SortConfig {
    pub fn by(key: impl Into<String>, order: SortOrder) -> Self {
        SortConfig {
            order_by: Some(key.into()),
            order,
        }
    }

    /// Order to show in `column`'s header, when it is the active sort column.
    pub fn order_for(&self, column: &Column) -> Option<SortOrder> {
        (self.order_by.as_deref() == Some(column.key.as_str())).then_some(self.order)
    }

    /// Sort change requested by a click on `column`'s header.
    ///
    /// Clicking the active column flips its direction; any other sortable
    /// column starts ascending. Non-sortable columns ignore the click.
    pub fn on_header_click(&self, column: &Column) -> Option<(String, SortOrder)> {
        if !column.is_sortable() {
            return None;
        }
        let order = match self.order_for(column) {
            Some(current) => current.reversed(),
            None => SortOrder::Asc,
        };
        Some((column.key.clone(), order))
    }
}

/// Sort rows in place by one field.
///
/// Numbers compare numerically, strings lexically, booleans false-first;
/// missing and null values sort last regardless of direction.
pub fn sort_rows(rows: &mut [Row], key: &str, order: SortOrder) {
    rows.sort_by(|a, b| {
        let (a, b) = (a.get(key), b.get(key));
        match (is_blank(a), is_blank(b)) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                let ord = compare_values(a.unwrap_or(&Value::Null), b.unwrap_or(&Value::Null));
                match order {
                    SortOrder::Asc => ord,
                    SortOrder::Desc => ord.reverse(),
                }
            }
        }
    });
}

fn is_blank(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (x, y) => x.to_string().cmp(&y.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn clicking_cycles_direction() {
        let name = Column::new("name", "Name").sortable(true);
        let age = Column::new("age", "Age").sortable(true);

        let config = SortConfig::default();
        assert_eq!(config.on_header_click(&name), Some(("name".into(), SortOrder::Asc)));

        let config = SortConfig::by("name", SortOrder::Asc);
        assert_eq!(config.on_header_click(&name), Some(("name".into(), SortOrder::Desc)));
        assert_eq!(config.on_header_click(&age), Some(("age".into(), SortOrder::Asc)));

        let config = SortConfig::by("name", SortOrder::Desc);
        assert_eq!(config.on_header_click(&name), Some(("name".into(), SortOrder::Asc)));
    }

    #[test]
    fn non_sortable_columns_ignore_clicks() {
        let config = SortConfig::by("name", SortOrder::Asc);
        assert_eq!(config.on_header_click(&Column::new("name", "Name")), None);
        assert_eq!(
            config.on_header_click(&Column::new("name", "Name").sortable(false)),
            None
        );
    }

    #[test]
    fn sort_rows_numeric_and_nulls_last() {
        let mut rows: Vec<Row> = [json!({"n": 10}), json!({"n": null}), json!({"n": 2}), json!({})]
            .into_iter()
            .map(|v| v.as_object().cloned().unwrap())
            .collect();

        sort_rows(&mut rows, "n", SortOrder::Asc);
        let values: Vec<Option<i64>> = rows.iter().map(|r| r.get("n").and_then(Value::as_i64)).collect();
        assert_eq!(values, vec![Some(2), Some(10), None, None]);

        sort_rows(&mut rows, "n", SortOrder::Desc);
        let values: Vec<Option<i64>> = rows.iter().map(|r| r.get("n").and_then(Value::as_i64)).collect();
        assert_eq!(values, vec![Some(10), Some(2), None, None]);
    }
}
