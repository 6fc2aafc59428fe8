//! Group header widths and spans.
//!
//! Every visible column contributes its width to an accumulator keyed by its
//! group id, or by its own key when ungrouped, so header cells of both kinds
//! can be sized with the same lookup.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::column::{find_group, Column, Group, DEFAULT_COLUMN_WIDTH};
use crate::localize::{localize_label, Localizer};

/// Column keys the host currently shows. `None` means "all non-hidden".
pub type VisibleKeys = HashSet<String>;

/// Whether `column` is on screen under the given filter.
pub fn is_displayed(column: &Column, visible: Option<&VisibleKeys>) -> bool {
    !column.is_hidden() && visible.map_or(true, |keys| keys.contains(&column.key))
}

/// Summed widths per group id (or per key for ungrouped columns).
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GroupWidths(HashMap<String, f32>);

impl GroupWidths {
    pub fn compute(columns: &[Column], visible: Option<&VisibleKeys>) -> Self {
        let mut widths: HashMap<String, f32> = HashMap::new();
        for col in columns.iter().filter(|c| is_displayed(c, visible)) {
            *widths.entry(col.group_key().to_string()).or_insert(0.0) += col.effective_width();
        }
        GroupWidths(widths)
    }

    /// Width stored under a group id or ungrouped column key.
    pub fn get(&self, key: &str) -> Option<f32> {
        self.0.get(key).copied()
    }

    /// Width of the header cell that `column` belongs to.
    pub fn width_for(&self, column: &Column) -> f32 {
        self.get(column.group_key()).unwrap_or(DEFAULT_COLUMN_WIDTH)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// One cell of the on-screen group header row.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GroupHeaderCell {
    /// Key of the column that anchors the cell (first visible member).
    pub key: String,
    pub group_id: Option<String>,
    /// Localized group label; empty for ungrouped spacer cells.
    pub label: String,
    /// Number of visible columns the cell spans.
    pub span: usize,
    pub width: f32,
}

/// Build the group header row shown above the column headers.
///
/// Only the first displayed member of a group renders a cell; later members
/// are covered by its span even when they are not adjacent in the list.
pub fn group_header_cells(
    columns: &[Column],
    groups: &[Group],
    visible: Option<&VisibleKeys>,
    widths: &GroupWidths,
    localizer: Option<&dyn Localizer>,
) -> Vec<GroupHeaderCell> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut cells = Vec::new();

    for col in columns.iter().filter(|c| is_displayed(c, visible)) {
        match col.group_id.as_deref() {
            None => cells.push(GroupHeaderCell {
                key: col.key.clone(),
                group_id: None,
                label: String::new(),
                span: 1,
                width: widths.width_for(col),
            }),
            Some(group_id) => {
                if !seen.insert(group_id) {
                    continue;
                }
                let span = columns
                    .iter()
                    .filter(|c| c.group_id.as_deref() == Some(group_id) && is_displayed(c, visible))
                    .count();
                let label = find_group(groups, group_id)
                    .map(|g| localize_label(localizer, &g.label))
                    .unwrap_or_default();
                cells.push(GroupHeaderCell {
                    key: col.key.clone(),
                    group_id: Some(group_id.to_string()),
                    label,
                    span,
                    width: widths.width_for(col),
                });
            }
        }
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("id", "ID").width(50.0),
            Column::new("street", "Street").width(200.0).group("addr"),
            Column::new("city", "City").width(100.0).group("addr"),
            Column::new("notes", "Notes").hidden(true).group("addr"),
            Column::new("phone", "Phone").group("contact"),
        ]
    }

    #[test]
    fn sums_visible_members_per_group() {
        let widths = GroupWidths::compute(&columns(), None);
        assert_eq!(widths.get("addr"), Some(300.0));
        assert_eq!(widths.get("contact"), Some(DEFAULT_COLUMN_WIDTH));
        assert_eq!(widths.get("id"), Some(50.0));
        assert_eq!(widths.get("notes"), None);
        assert_eq!(widths.len(), 3);
    }

    #[test]
    fn visibility_filter_removes_member_width() {
        let visible: VisibleKeys = ["id", "street", "phone"].iter().map(|s| s.to_string()).collect();
        let widths = GroupWidths::compute(&columns(), Some(&visible));
        assert_eq!(widths.get("addr"), Some(200.0));
        assert_eq!(widths.get("id"), Some(50.0));
    }

    #[test]
    fn header_cells_use_first_occurrence_and_visible_span() {
        let cols = vec![
            Column::new("a", "A").group("g1"),
            Column::new("b", "B"),
            Column::new("c", "C").group("g1"),
        ];
        let groups = vec![Group::new("g1", "Group")];
        let widths = GroupWidths::compute(&cols, None);
        let cells = group_header_cells(&cols, &groups, None, &widths, None);

        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].label, "Group");
        assert_eq!(cells[0].span, 2);
        assert_eq!(cells[0].width, 300.0);
        assert_eq!(cells[1].label, "");
        assert_eq!(cells[1].key, "b");
        assert_eq!(cells[1].span, 1);
    }

    #[test]
    fn header_cells_skip_hidden_first_member() {
        let cols = vec![
            Column::new("a", "A").group("g1").hidden(true),
            Column::new("b", "B").group("g1"),
        ];
        let groups = vec![Group::new("g1", "Group")];
        let widths = GroupWidths::compute(&cols, None);
        let cells = group_header_cells(&cols, &groups, None, &widths, None);
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].key, "b");
        assert_eq!(cells[0].span, 1);
    }

    #[test]
    fn unknown_group_renders_empty_label() {
        let cols = vec![Column::new("a", "A").group("missing")];
        let widths = GroupWidths::compute(&cols, None);
        let cells = group_header_cells(&cols, &[], None, &widths, None);
        assert_eq!(cells[0].label, "");
        assert_eq!(cells[0].group_id.as_deref(), Some("missing"));
    }
}
