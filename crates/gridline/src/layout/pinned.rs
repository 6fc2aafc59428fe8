//! Sticky offsets for pinned columns.
//!
//! Left-pinned columns stack from the left edge in list order; right-pinned
//! columns stack from the right edge, so the last right-pinned column in the
//! list sits flush against the edge.

use std::collections::HashMap;

use serde::Serialize;

use crate::column::{Column, Pin};

/// Cumulative offsets of pinned columns, keyed by column key.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PinnedPositions {
    left: HashMap<String, f32>,
    right: HashMap<String, f32>,
    has_pinned: bool,
}

impl PinnedPositions {
    /// Compute offsets for the current column list.
    pub fn compute(columns: &[Column]) -> Self {
        let mut left = HashMap::new();
        let mut offset = 0.0;
        for col in columns.iter().filter(|c| c.pinned == Some(Pin::Left)) {
            left.insert(col.key.clone(), offset);
            offset += col.effective_width();
        }

        let mut right = HashMap::new();
        let mut offset = 0.0;
        for col in columns
            .iter()
            .rev()
            .filter(|c| c.pinned == Some(Pin::Right))
        {
            right.insert(col.key.clone(), offset);
            offset += col.effective_width();
        }

        let has_pinned = !left.is_empty() || !right.is_empty();
        PinnedPositions {
            left,
            right,
            has_pinned,
        }
    }

    /// Offset from the left edge of a left-pinned column.
    pub fn left_offset(&self, key: &str) -> Option<f32> {
        self.left.get(key).copied()
    }

    /// Offset from the right edge of a right-pinned column.
    pub fn right_offset(&self, key: &str) -> Option<f32> {
        self.right.get(key).copied()
    }

    pub fn left(&self) -> &HashMap<String, f32> {
        &self.left
    }

    pub fn right(&self) -> &HashMap<String, f32> {
        &self.right
    }

    /// True when at least one column is pinned to either side.
    pub fn has_pinned(&self) -> bool {
        self.has_pinned
    }

    /// Placement a front end should apply to the header and body cells of `column`.
    ///
    /// `background` is the canvas color; pinned cells paint it so scrolled
    /// content underneath stays hidden.
    pub fn placement(&self, column: &Column, background: &str) -> CellPlacement {
        match column.pinned {
            None => CellPlacement::relative(),
            Some(side) => {
                let (left, right) = match side {
                    Pin::Left => (Some(self.left_offset(&column.key).unwrap_or(0.0)), None),
                    Pin::Right => (None, Some(self.right_offset(&column.key).unwrap_or(0.0))),
                };
                CellPlacement {
                    position: Position::Sticky,
                    z_index: 1,
                    background: Some(background.to_string()),
                    shadow: Some(Shadow::toward_unpinned(side)),
                    left,
                    right,
                }
            }
        }
    }
}

/// Positioning scheme of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Relative,
    Sticky,
}

/// Edge shadow cast by a pinned column onto the scrolling area.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Shadow {
    /// Horizontal offset; positive casts to the right.
    pub offset_x: f32,
    pub blur: f32,
    pub spread: f32,
    pub alpha: f32,
}

impl Shadow {
    fn toward_unpinned(side: Pin) -> Self {
        let offset_x = match side {
            Pin::Left => 2.0,
            Pin::Right => -2.0,
        };
        Shadow {
            offset_x,
            blur: 4.0,
            spread: -2.0,
            alpha: 0.1,
        }
    }

    /// CSS `box-shadow` value.
    pub fn to_css(&self) -> String {
        format!(
            "{}px 0 {}px {}px rgba(0, 0, 0, {})",
            self.offset_x, self.blur, self.spread, self.alpha
        )
    }
}

/// How a front end should position one column's cells.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CellPlacement {
    pub position: Position,
    pub z_index: u8,
    pub background: Option<String>,
    pub shadow: Option<Shadow>,
    pub left: Option<f32>,
    pub right: Option<f32>,
}

impl CellPlacement {
    fn relative() -> Self {
        CellPlacement {
            position: Position::Relative,
            z_index: 0,
            background: None,
            shadow: None,
            left: None,
            right: None,
        }
    }

    pub fn is_sticky(&self) -> bool {
        self.position == Position::Sticky
    }
}
