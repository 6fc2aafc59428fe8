//! Column geometry derived from descriptors.
//!
//! - [`PinnedPositions`]: sticky offsets for left/right pinned columns
//! - [`GroupWidths`]: summed widths per group header cell
//! - [`ResizeController`]: drag gestures that commit new widths
//!
//! All derived values are pure functions of the current column list and
//! visibility filter; [`ColumnStore`](crate::ColumnStore) keeps them current.

mod groups;
mod pinned;
mod resize;

pub use groups::{group_header_cells, is_displayed, GroupHeaderCell, GroupWidths, VisibleKeys};
pub use pinned::{CellPlacement, PinnedPositions, Position, Shadow};
pub use resize::{
    min_resize_width, Headless, PointerKind, ResizeController, ResizeOutcome, ResizeSurface,
};
