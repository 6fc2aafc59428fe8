//! Expandable sub-rows.
//!
//! A host may attach an [`ExpansionProvider`] that returns a nested table for
//! a row. Rows with a provider get a leading toggle cell; the nested table is
//! shown while the row is expanded. Nested tables never expand further.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::column::Column;
use crate::Row;

/// Nested table shown under an expanded row.
#[derive(Clone, Debug, Default)]
pub struct Expansion {
    /// Optional caption above the nested table.
    pub header: Option<String>,
    pub rows: Vec<Row>,
    pub columns: Vec<Column>,
    pub serial_number: bool,
}

/// Produces the nested table for a row, or `None` when it has nothing to show.
pub trait ExpansionProvider: Send + Sync {
    fn expansion(&self, row: &Row) -> Option<Expansion>;
}

impl<F> ExpansionProvider for F
where
    F: Fn(&Row) -> Option<Expansion> + Send + Sync,
{
    fn expansion(&self, row: &Row) -> Option<Expansion> {
        self(row)
    }
}

/// Shared handle to an expansion provider.
#[derive(Clone)]
pub struct ExpandFn(Arc<dyn ExpansionProvider>);

impl ExpandFn {
    pub fn new(provider: impl ExpansionProvider + 'static) -> Self {
        ExpandFn(Arc::new(provider))
    }

    pub fn call(&self, row: &Row) -> Option<Expansion> {
        self.0.expansion(row)
    }
}

impl fmt::Debug for ExpandFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ExpandFn(..)")
    }
}

/// Which rows (by index on the current page) are expanded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpandedRows(BTreeSet<usize>);

impl ExpandedRows {
    /// Flip one row; returns whether it is now expanded.
    pub fn toggle(&mut self, index: usize) -> bool {
        if self.0.remove(&index) {
            false
        } else {
            self.0.insert(index);
            true
        }
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.0.contains(&index)
    }

    /// Collapse everything, e.g. after a page change.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Caption of the toggle for a row.
    pub fn toggle_title(&self, index: usize) -> &'static str {
        if self.is_expanded(index) {
            "collapse"
        } else {
            "expand"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_round_trip() {
        let mut expanded = ExpandedRows::default();
        assert_eq!(expanded.toggle_title(3), "expand");
        assert!(expanded.toggle(3));
        assert!(expanded.is_expanded(3));
        assert_eq!(expanded.toggle_title(3), "collapse");
        assert!(!expanded.toggle(3));
        assert!(!expanded.is_expanded(3));
    }

    #[test]
    fn provider_from_closure() {
        let provider = ExpandFn::new(|row: &Row| {
            row.get("children").map(|_| Expansion {
                header: Some("Children".into()),
                ..Default::default()
            })
        });
        assert!(provider.call(&Row::new()).is_none());

        let mut row = Row::new();
        row.insert("children".into(), serde_json::json!([]));
        assert_eq!(provider.call(&row).and_then(|e| e.header).as_deref(), Some("Children"));
    }
}
