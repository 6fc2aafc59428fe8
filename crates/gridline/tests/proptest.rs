//! Property-based tests for column layout and export using proptest.

use proptest::prelude::*;
use std::collections::HashSet;

use gridline::{Column, ColumnStore, ExportFormatter, Group, GroupWidths, Pin, PinnedPositions};

// ============================================================================
// Test helpers
// ============================================================================

#[derive(Debug, Clone)]
struct ColumnSeed {
    width: u16,
    pin: Option<Pin>,
    group: Option<u8>,
    hidden: bool,
    hidden_in_export: bool,
}

fn seed_strategy() -> impl Strategy<Value = ColumnSeed> {
    (
        1u16..500,
        prop_oneof![Just(None), Just(Some(Pin::Left)), Just(Some(Pin::Right))],
        prop::option::of(0u8..3),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(width, pin, group, hidden, hidden_in_export)| ColumnSeed {
            width,
            pin,
            group,
            hidden,
            hidden_in_export,
        })
}

// Integral widths keep f32 sums exact regardless of summation order.
fn build(seeds: &[ColumnSeed]) -> Vec<Column> {
    seeds
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let mut col = Column::new(format!("c{}", i), format!("Col {}", i))
                .width(s.width as f32)
                .hidden(s.hidden)
                .hidden_in_export(s.hidden_in_export);
            if let Some(pin) = s.pin {
                col = col.pin(pin);
            }
            if let Some(g) = s.group {
                col = col.group(format!("g{}", g));
            }
            col
        })
        .collect()
}

fn groups() -> Vec<Group> {
    (0..3).map(|g| Group::new(format!("g{}", g), format!("Group {}", g))).collect()
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Left offsets start at 0 and grow by each preceding left-pinned width.
    #[test]
    fn left_offsets_are_running_sums(seeds in prop::collection::vec(seed_strategy(), 0..20)) {
        let columns = build(&seeds);
        let positions = PinnedPositions::compute(&columns);

        let mut expected = 0.0f32;
        for col in columns.iter().filter(|c| c.pinned == Some(Pin::Left)) {
            prop_assert_eq!(positions.left_offset(&col.key), Some(expected));
            expected += col.effective_width();
        }
    }

    /// The right-most right-pinned column sits at 0; offsets grow leftward.
    #[test]
    fn right_offsets_grow_leftward(seeds in prop::collection::vec(seed_strategy(), 0..20)) {
        let columns = build(&seeds);
        let positions = PinnedPositions::compute(&columns);

        let mut expected = 0.0f32;
        for col in columns.iter().rev().filter(|c| c.pinned == Some(Pin::Right)) {
            prop_assert_eq!(positions.right_offset(&col.key), Some(expected));
            expected += col.effective_width();
        }
    }

    /// `has_pinned` is true exactly when some column is pinned.
    #[test]
    fn has_pinned_matches_input(seeds in prop::collection::vec(seed_strategy(), 0..20)) {
        let columns = build(&seeds);
        let positions = PinnedPositions::compute(&columns);
        prop_assert_eq!(positions.has_pinned(), columns.iter().any(|c| c.pinned.is_some()));
    }

    /// Each group width is the sum of its displayed members.
    #[test]
    fn group_width_is_member_sum(seeds in prop::collection::vec(seed_strategy(), 0..20)) {
        let columns = build(&seeds);
        let widths = GroupWidths::compute(&columns, None);

        for (key, width) in widths.iter() {
            let sum: f32 = columns
                .iter()
                .filter(|c| !c.is_hidden() && c.group_key() == key)
                .map(|c| c.effective_width())
                .sum();
            prop_assert_eq!(width, sum);
        }
    }

    /// Filtering out one visible member lowers its group by exactly its width.
    #[test]
    fn removing_member_drops_its_width(
        seeds in prop::collection::vec(seed_strategy(), 1..20),
        pick in any::<prop::sample::Index>(),
    ) {
        let columns = build(&seeds);
        let victim = &columns[pick.index(columns.len())];
        prop_assume!(!victim.is_hidden());

        let all: HashSet<String> = columns.iter().map(|c| c.key.clone()).collect();
        let mut fewer = all.clone();
        fewer.remove(&victim.key);

        let before = GroupWidths::compute(&columns, Some(&all));
        let after = GroupWidths::compute(&columns, Some(&fewer));
        let key = victim.group_key();

        let before_width = before.get(key).unwrap_or(0.0);
        let after_width = after.get(key).unwrap_or(0.0);
        prop_assert_eq!(before_width - after_width, victim.effective_width());
    }

    /// Export header count equals the export-eligible column count, and every
    /// row has one cell per header.
    #[test]
    fn export_shape_matches_columns(
        seeds in prop::collection::vec(seed_strategy(), 0..20),
        row_count in 0usize..5,
        with_groups in any::<bool>(),
    ) {
        let columns = build(&seeds);
        let groups = if with_groups { groups() } else { Vec::new() };
        let rows: Vec<gridline::Row> = (0..row_count)
            .map(|i| {
                columns
                    .iter()
                    .map(|c| (c.key.clone(), serde_json::json!(format!("{}-{}", c.key, i))))
                    .collect()
            })
            .collect();

        let grid = ExportFormatter::new(&columns).groups(&groups).format(&rows);
        let eligible = columns.iter().filter(|c| c.is_exported()).count();

        prop_assert_eq!(grid.headers.len(), eligible);
        prop_assert_eq!(grid.data_rows.len(), row_count);
        for row in &grid.data_rows {
            prop_assert_eq!(row.len(), eligible);
        }
        if with_groups {
            let spanned: usize = grid.group_headers.iter().map(|g| g.span).sum();
            prop_assert_eq!(spanned, eligible);
            prop_assert_eq!(grid.expanded_group_row().len(), eligible);
        } else {
            prop_assert!(grid.group_headers.is_empty());
        }
    }

    /// Resizing through the store never leaves pinned offsets stale.
    #[test]
    fn width_update_keeps_layout_consistent(
        seeds in prop::collection::vec(seed_strategy(), 1..20),
        pick in any::<prop::sample::Index>(),
        new_width in 1u16..500,
    ) {
        let columns = build(&seeds);
        let key = columns[pick.index(columns.len())].key.clone();
        let mut store = ColumnStore::new(columns).unwrap();

        store.set_width(&key, new_width as f32).unwrap();

        let fresh = PinnedPositions::compute(store.columns());
        prop_assert_eq!(store.pinned(), &fresh);
        let fresh_groups = GroupWidths::compute(store.columns(), None);
        prop_assert_eq!(store.group_widths(), &fresh_groups);
    }
}
