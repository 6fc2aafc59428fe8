//! Drag-to-resize for column borders.
//!
//! A [`ResizeController`] runs at most one gesture at a time. The gesture
//! captures the pointer position and the header cell's rendered width when it
//! starts; every move derives the new width from the pointer delta, applies it
//! to the header cell through the [`ResizeSurface`] and commits it to the
//! [`ColumnStore`].
//!
//! While a gesture is active the surface shows a resize cursor and suppresses
//! text selection. The session owns a guard that restores both when dropped,
//! so ending, cancelling, or dropping the controller mid-gesture all clean up.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::column::{Column, MIN_COLUMN_WIDTH};
use crate::error::{GridError, Result};
use crate::store::ColumnStore;

/// Input device driving a gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// UI side effects a resize gesture needs from the front end.
pub trait ResizeSurface: Send + Sync {
    /// Force (or release) the global resize cursor and selection suppression.
    fn set_resize_cursor(&self, active: bool);

    /// Apply a live width to the column's header cell.
    fn set_header_width(&self, key: &str, width: f32);
}

/// Surface for headless use: nothing to draw.
#[derive(Clone, Copy, Debug, Default)]
pub struct Headless;

impl ResizeSurface for Headless {
    fn set_resize_cursor(&self, _active: bool) {}
    fn set_header_width(&self, _key: &str, _width: f32) {}
}

/// Releases the resize cursor when dropped.
struct CursorGuard {
    surface: Arc<dyn ResizeSurface>,
}

impl CursorGuard {
    fn acquire(surface: Arc<dyn ResizeSurface>) -> Self {
        surface.set_resize_cursor(true);
        CursorGuard { surface }
    }
}

impl Drop for CursorGuard {
    fn drop(&mut self) {
        self.surface.set_resize_cursor(false);
    }
}

/// State captured for one gesture.
struct ResizeSession {
    key: String,
    kind: PointerKind,
    start_x: f32,
    start_width: f32,
    min_width: f32,
    last_width: Option<f32>,
    _cursor: CursorGuard,
}

/// Result of a finished gesture.
#[derive(Clone, Debug, PartialEq)]
pub struct ResizeOutcome {
    pub key: String,
    pub kind: PointerKind,
    pub start_width: f32,
    /// Last committed width, or `None` when the pointer never moved.
    pub final_width: Option<f32>,
}

/// Runs resize gestures against a column store.
pub struct ResizeController {
    surface: Arc<dyn ResizeSurface>,
    session: Option<ResizeSession>,
}

impl ResizeController {
    pub fn new(surface: Arc<dyn ResizeSurface>) -> Self {
        ResizeController {
            surface,
            session: None,
        }
    }

    /// Controller with no UI side effects.
    pub fn headless() -> Self {
        Self::new(Arc::new(Headless))
    }

    /// Start a gesture on `column`'s resize handle.
    ///
    /// `rendered_width` is the header cell's width on screen at gesture start.
    /// Returns `Ok(false)` for columns without a resize handle; no side
    /// effects happen for those.
    pub fn begin(
        &mut self,
        column: &Column,
        x: f32,
        rendered_width: f32,
        kind: PointerKind,
    ) -> Result<bool> {
        let Some(min_width) = column.resize.min_size() else {
            return Ok(false);
        };
        if let Some(active) = &self.session {
            return Err(GridError::ResizeInProgress(active.key.clone()));
        }

        debug!(column = %column.key, ?kind, start_width = rendered_width, "resize started");
        self.session = Some(ResizeSession {
            key: column.key.clone(),
            kind,
            start_x: x,
            start_width: rendered_width,
            min_width,
            last_width: None,
            _cursor: CursorGuard::acquire(Arc::clone(&self.surface)),
        });
        Ok(true)
    }

    /// Pointer moved to `x`: resize live and commit to the store.
    ///
    /// Returns the committed width, or `None` when no gesture is active.
    pub fn update(&mut self, x: f32, store: &mut ColumnStore) -> Result<Option<f32>> {
        let Some(session) = self.session.as_mut() else {
            return Ok(None);
        };

        let width = (session.start_width + (x - session.start_x)).max(session.min_width);
        self.surface.set_header_width(&session.key, width);
        store.set_width(&session.key, width)?;
        session.last_width = Some(width);
        trace!(column = %session.key, width, "resize moved");
        Ok(Some(width))
    }

    /// Pointer released: end the gesture.
    pub fn end(&mut self) -> Option<ResizeOutcome> {
        let session = self.session.take()?;
        debug!(column = %session.key, width = ?session.last_width, "resize finished");
        Some(ResizeOutcome {
            key: session.key,
            kind: session.kind,
            start_width: session.start_width,
            final_width: session.last_width,
        })
    }

    /// Abort the gesture, keeping whatever width was last committed.
    pub fn cancel(&mut self) {
        if let Some(session) = self.session.take() {
            debug!(column = %session.key, "resize cancelled");
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Key of the column being resized.
    pub fn active_column(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.key.as_str())
    }
}

impl Default for ResizeController {
    fn default() -> Self {
        Self::headless()
    }
}

impl std::fmt::Debug for ResizeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResizeController")
            .field("active_column", &self.active_column())
            .finish()
    }
}

/// Smallest width any resizable column may be dragged to.
pub fn min_resize_width(column: &Column) -> f32 {
    column.resize.min_size().unwrap_or(MIN_COLUMN_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{Pin, ResizeBehavior};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        cursor: Mutex<Vec<bool>>,
        widths: Mutex<Vec<(String, f32)>>,
    }

    impl ResizeSurface for Recorder {
        fn set_resize_cursor(&self, active: bool) {
            self.cursor.lock().unwrap().push(active);
        }

        fn set_header_width(&self, key: &str, width: f32) {
            self.widths.lock().unwrap().push((key.to_string(), width));
        }
    }

    fn store() -> ColumnStore {
        ColumnStore::new(vec![
            Column::new("a", "A").width(100.0).pin(Pin::Left).group("g"),
            Column::new("b", "B").width(80.0).pin(Pin::Left).group("g"),
            Column::new("fixed", "Fixed").fixed(),
        ])
        .unwrap()
    }

    #[test]
    fn drag_commits_start_width_plus_delta() {
        let mut store = store();
        let mut ctl = ResizeController::headless();
        let col = store.column("a").unwrap().clone();

        assert!(ctl.begin(&col, 500.0, 100.0, PointerKind::Mouse).unwrap());
        assert_eq!(ctl.update(520.0, &mut store).unwrap(), Some(120.0));

        assert_eq!(store.column("a").unwrap().width, Some(120.0));
        assert_eq!(store.pinned().left_offset("b"), Some(120.0));
        assert_eq!(store.group_widths().get("g"), Some(200.0));

        let outcome = ctl.end().unwrap();
        assert_eq!(outcome.final_width, Some(120.0));
        assert!(!ctl.is_active());
        assert_eq!(ctl.update(600.0, &mut store).unwrap(), None);
        assert_eq!(store.column("a").unwrap().width, Some(120.0));
    }

    #[test]
    fn width_is_clamped_to_minimum() {
        let mut store = store();
        let mut ctl = ResizeController::headless();
        let col = store.column("a").unwrap().clone();
        ctl.begin(&col, 500.0, 100.0, PointerKind::Touch).unwrap();
        assert_eq!(ctl.update(100.0, &mut store).unwrap(), Some(MIN_COLUMN_WIDTH));

        let col = Column::new("m", "M").resize(ResizeBehavior::MinSize(70.0));
        assert_eq!(min_resize_width(&col), 70.0);
    }

    #[test]
    fn cursor_is_released_on_end_cancel_and_drop() {
        let recorder = Arc::new(Recorder::default());
        let mut store = store();
        let col = store.column("a").unwrap().clone();

        let mut ctl = ResizeController::new(recorder.clone());
        ctl.begin(&col, 0.0, 100.0, PointerKind::Mouse).unwrap();
        ctl.update(10.0, &mut store).unwrap();
        ctl.end();
        ctl.begin(&col, 0.0, 100.0, PointerKind::Mouse).unwrap();
        ctl.cancel();
        ctl.begin(&col, 0.0, 100.0, PointerKind::Touch).unwrap();
        drop(ctl);

        assert_eq!(
            *recorder.cursor.lock().unwrap(),
            vec![true, false, true, false, true, false]
        );
        assert_eq!(*recorder.widths.lock().unwrap(), vec![("a".to_string(), 110.0)]);
    }

    #[test]
    fn fixed_columns_have_no_handle() {
        let recorder = Arc::new(Recorder::default());
        let store = store();
        let mut ctl = ResizeController::new(recorder.clone());
        let col = store.column("fixed").unwrap().clone();

        assert!(!ctl.begin(&col, 0.0, 150.0, PointerKind::Mouse).unwrap());
        assert!(!ctl.is_active());
        assert!(recorder.cursor.lock().unwrap().is_empty());
    }

    #[test]
    fn one_gesture_at_a_time() {
        let store = store();
        let mut ctl = ResizeController::headless();
        let a = store.column("a").unwrap().clone();
        let b = store.column("b").unwrap().clone();

        ctl.begin(&a, 0.0, 100.0, PointerKind::Mouse).unwrap();
        let err = ctl.begin(&b, 0.0, 80.0, PointerKind::Mouse).unwrap_err();
        assert!(matches!(err, GridError::ResizeInProgress(key) if key == "a"));
        assert_eq!(ctl.active_column(), Some("a"));
    }
}
