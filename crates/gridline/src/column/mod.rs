//! Column descriptors and header groups.
//!
//! A [`Column`] is the declarative description of one displayable field:
//! key, label, width, pin side, group, visibility and optional renderers.
//! Columns are built fluently and can also be loaded from YAML/JSON table
//! definitions (renderers are code-only and skipped by serde).
//!
//! ```rust
//! use gridline::{Column, Pin};
//!
//! let columns = vec![
//!     Column::new("id", "ID").width(80.0).pin(Pin::Left),
//!     Column::new("city", "City").group("address"),
//!     Column::new("zip", "Zip").group("address").hidden_in_export(true),
//! ];
//! assert_eq!(columns[0].effective_width(), 80.0);
//! assert_eq!(columns[1].effective_width(), gridline::DEFAULT_COLUMN_WIDTH);
//! ```
//!
//! Optional flags are tri-state on purpose: an unset `hidden` means "use the
//! default" and is distinct from an explicit `false`.

mod renderer;

use serde::{Deserialize, Serialize};

pub use renderer::{CellContent, CellRenderer, HeaderFn, HeaderRenderer, RenderFn};
pub(crate) use renderer::format_number;

/// Width used for columns that declare none.
pub const DEFAULT_COLUMN_WIDTH: f32 = 150.0;

/// Smallest width a resize gesture may commit.
pub const MIN_COLUMN_WIDTH: f32 = 40.0;

/// Edge of the scroll area a column sticks to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pin {
    Left,
    Right,
}

/// Whether and how a column can be resized by dragging its border.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeBehavior {
    /// No resize handle is attached.
    None,
    /// Resizable down to [`MIN_COLUMN_WIDTH`].
    #[default]
    Resizable,
    /// Resizable down to the given width.
    MinSize(f32),
}

impl ResizeBehavior {
    pub fn is_resizable(&self) -> bool {
        *self != ResizeBehavior::None
    }

    /// Lower bound for committed widths, or `None` when not resizable.
    pub fn min_size(&self) -> Option<f32> {
        match self {
            ResizeBehavior::None => None,
            ResizeBehavior::Resizable => Some(MIN_COLUMN_WIDTH),
            ResizeBehavior::MinSize(min) => Some(min.max(1.0)),
        }
    }
}

/// One displayable field or synthetic cell of a table.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Column {
    /// Unique key; also the field read from each row.
    #[serde(alias = "_key")]
    pub key: String,
    /// Header label (a localization key when a localizer is configured).
    #[serde(default)]
    pub label: String,
    /// Width in layout units. Unset or non-positive means the default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned: Option<Pin>,
    #[serde(default, alias = "groupId", skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sortable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(
        default,
        alias = "hiddenInExport",
        skip_serializing_if = "Option::is_none"
    )]
    pub hidden_in_export: Option<bool>,
    #[serde(default)]
    pub resize: ResizeBehavior,
    #[serde(skip)]
    pub render_cell: Option<RenderFn>,
    #[serde(skip)]
    pub render_header: Option<HeaderFn>,
}

impl Column {
    /// Create a column with the given key and label and default settings.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Column {
            key: key.into(),
            label: label.into(),
            width: None,
            pinned: None,
            group_id: None,
            sortable: None,
            hidden: None,
            hidden_in_export: None,
            resize: ResizeBehavior::default(),
            render_cell: None,
            render_header: None,
        }
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn pin(mut self, side: Pin) -> Self {
        self.pinned = Some(side);
        self
    }

    pub fn group(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = Some(sortable);
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = Some(hidden);
        self
    }

    pub fn hidden_in_export(mut self, hidden: bool) -> Self {
        self.hidden_in_export = Some(hidden);
        self
    }

    pub fn resize(mut self, resize: ResizeBehavior) -> Self {
        self.resize = resize;
        self
    }

    /// Shorthand for `.resize(ResizeBehavior::None)`.
    pub fn fixed(self) -> Self {
        self.resize(ResizeBehavior::None)
    }

    /// Attach a cell renderer.
    pub fn render(mut self, renderer: impl CellRenderer + 'static) -> Self {
        self.render_cell = Some(RenderFn::new(renderer));
        self
    }

    /// Attach a header renderer.
    pub fn render_header(mut self, renderer: impl HeaderRenderer + 'static) -> Self {
        self.render_header = Some(HeaderFn::new(renderer));
        self
    }

    /// Width used for layout: the declared width when positive, else the default.
    pub fn effective_width(&self) -> f32 {
        self.width
            .filter(|w| w.is_finite() && *w > 0.0)
            .unwrap_or(DEFAULT_COLUMN_WIDTH)
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden == Some(true)
    }

    /// Visible on screen and not excluded from exports.
    pub fn is_exported(&self) -> bool {
        !self.is_hidden() && self.hidden_in_export != Some(true)
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable == Some(true)
    }

    /// Key under which the group-width map stores this column's width.
    pub fn group_key(&self) -> &str {
        self.group_id.as_deref().unwrap_or(&self.key)
    }
}

/// A header label spanning the columns that share its id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub label: String,
}

impl Group {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Group {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Look up a group by id.
pub fn find_group<'a>(groups: &'a [Group], id: &str) -> Option<&'a Group> {
    groups.iter().find(|g| g.id == id)
}
