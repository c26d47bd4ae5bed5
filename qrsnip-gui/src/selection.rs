use qrsnip::imgproc::viewport::DisplayRect;

/// Mouse-driven selection rectangle state machine.
///
/// A press starts a new drag from any state, discarding whatever rectangle
/// existed before. Motion moves the free corner, release freezes the
/// rectangle, and `clear` returns to the empty state.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Selection {
    /// No rectangle.
    #[default]
    Idle,
    /// A drag is in progress; the rectangle follows the pointer.
    Dragging {
        /// The corner where the press happened.
        anchor: (f32, f32),
        /// The corner under the pointer.
        cursor: (f32, f32),
    },
    /// A finished rectangle, frozen until cleared or replaced.
    Selected(DisplayRect),
}

impl Selection {
    /// Start a new drag at `pos`, replacing any previous rectangle.
    pub fn press(&mut self, pos: (f32, f32)) {
        *self = Selection::Dragging {
            anchor: pos,
            cursor: pos,
        };
    }

    /// Move the free corner of an in-progress drag to `pos`.
    ///
    /// Ignored outside of a drag.
    pub fn drag(&mut self, pos: (f32, f32)) {
        if let Selection::Dragging { cursor, .. } = self {
            *cursor = pos;
        }
    }

    /// Freeze the in-progress rectangle with normalized corners.
    ///
    /// Ignored outside of a drag.
    pub fn release(&mut self) {
        if let Selection::Dragging { anchor, cursor } = *self {
            *self = Selection::Selected(DisplayRect::from_corners(anchor, cursor));
        }
    }

    /// Drop the rectangle, whatever the current state.
    pub fn clear(&mut self) {
        *self = Selection::Idle;
    }

    /// The rectangle to draw: the live one during a drag, the frozen one
    /// after release.
    pub fn rect(&self) -> Option<DisplayRect> {
        match *self {
            Selection::Idle => None,
            Selection::Dragging { anchor, cursor } => Some(DisplayRect::from_corners(anchor, cursor)),
            Selection::Selected(rect) => Some(rect),
        }
    }

    /// The frozen rectangle, if the user finished a drag.
    pub fn selected_rect(&self) -> Option<DisplayRect> {
        match *self {
            Selection::Selected(rect) => Some(rect),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Selection;

    #[test]
    fn press_drag_release_lifecycle() {
        let mut selection = Selection::default();
        assert_eq!(selection.rect(), None);

        selection.press((10.0, 20.0));
        selection.drag((30.0, 5.0));

        // live rectangle follows the pointer, nothing is frozen yet
        let live = selection.rect().unwrap();
        assert_eq!((live.min_x, live.min_y), (10.0, 5.0));
        assert_eq!((live.max_x, live.max_y), (30.0, 20.0));
        assert_eq!(selection.selected_rect(), None);

        selection.release();
        let frozen = selection.selected_rect().unwrap();
        assert_eq!((frozen.min_x, frozen.min_y), (10.0, 5.0));
        assert_eq!((frozen.max_x, frozen.max_y), (30.0, 20.0));
    }

    #[test]
    fn clear_after_select_returns_to_idle() {
        let mut selection = Selection::default();
        selection.press((0.0, 0.0));
        selection.drag((10.0, 10.0));
        selection.release();
        assert!(selection.selected_rect().is_some());

        selection.clear();
        assert_eq!(selection, Selection::Idle);
        assert_eq!(selection.rect(), None);
    }

    #[test]
    fn new_press_discards_frozen_rectangle() {
        let mut selection = Selection::default();
        selection.press((0.0, 0.0));
        selection.drag((10.0, 10.0));
        selection.release();

        selection.press((50.0, 50.0));
        assert_eq!(selection.selected_rect(), None);

        let live = selection.rect().unwrap();
        assert_eq!((live.min_x, live.min_y), (50.0, 50.0));
    }

    #[test]
    fn new_press_discards_drag_in_progress() {
        let mut selection = Selection::default();
        selection.press((0.0, 0.0));
        selection.drag((10.0, 10.0));

        selection.press((5.0, 5.0));
        selection.drag((7.0, 9.0));
        selection.release();

        let frozen = selection.selected_rect().unwrap();
        assert_eq!((frozen.min_x, frozen.min_y), (5.0, 5.0));
        assert_eq!((frozen.max_x, frozen.max_y), (7.0, 9.0));
    }

    #[test]
    fn release_without_drag_is_a_noop() {
        let mut selection = Selection::default();
        selection.release();
        assert_eq!(selection, Selection::Idle);

        selection.drag((10.0, 10.0));
        assert_eq!(selection, Selection::Idle);
    }
}
