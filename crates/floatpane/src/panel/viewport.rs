#![forbid(unsafe_code)]

//! Viewport tracking and reconciliation of floating geometry.

use floatpane_core::{
    ListenerSet, ListenerSlot, Position, Size, WINDOW_RESIZE_EVENT, clamp_offset,
};

/// Tracks the window inner size and owns the window `resize` listener.
#[derive(Debug, Clone)]
pub struct ViewportWatcher {
    viewport: Size,
}

impl ViewportWatcher {
    #[must_use]
    pub const fn new(viewport: Size) -> Self {
        Self { viewport }
    }

    /// Install the window `resize` listener.
    pub fn start(&self, listeners: &mut ListenerSet) {
        listeners.attach(ListenerSlot::Window, WINDOW_RESIZE_EVENT);
    }

    /// Remove the window `resize` listener.
    pub fn stop(&self, listeners: &mut ListenerSet) {
        listeners.detach(ListenerSlot::Window, WINDOW_RESIZE_EVENT);
    }

    /// Record a new window inner size.
    pub fn observe(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    #[must_use]
    pub const fn viewport(&self) -> Size {
        self.viewport
    }
}

/// Fit floating geometry inside `viewport`: shrink to the viewport first,
/// then slide the origin back so the far edges are visible.
#[must_use]
pub fn reconcile(position: Position, size: Size, viewport: Size) -> (Position, Size) {
    let size = Size::new(
        size.width.min(viewport.width),
        size.height.min(viewport.height),
    );
    let position = Position::new(
        clamp_offset(position.x, viewport.width - size.width),
        clamp_offset(position.y, viewport.height - size.height),
    );
    (position, size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fitting_geometry_is_untouched() {
        let (p, s) = reconcile(Position::new(10, 20), Size::new(100, 100), Size::new(800, 600));
        assert_eq!((p, s), (Position::new(10, 20), Size::new(100, 100)));
    }

    #[test]
    fn oversized_panel_shrinks_to_viewport() {
        let (p, s) = reconcile(Position::new(50, 50), Size::new(900, 700), Size::new(800, 600));
        assert_eq!(s, Size::new(800, 600));
        assert_eq!(p, Position::new(0, 0));
    }

    #[test]
    fn overflowing_origin_slides_back() {
        let (p, s) = reconcile(Position::new(750, 590), Size::new(100, 50), Size::new(800, 600));
        assert_eq!(s, Size::new(100, 50));
        assert_eq!(p, Position::new(700, 550));
    }

    #[test]
    fn negative_origin_is_lifted() {
        let (p, _) = reconcile(Position::new(-30, -1), Size::new(100, 50), Size::new(800, 600));
        assert_eq!(p, Position::new(0, 0));
    }

    #[test]
    fn watcher_owns_window_listener() {
        let mut listeners = ListenerSet::new();
        let mut watcher = ViewportWatcher::new(Size::new(1, 1));
        watcher.start(&mut listeners);
        assert!(listeners.is_listening(ListenerSlot::Window, "resize"));
        watcher.observe(Size::new(640, 480));
        assert_eq!(watcher.viewport(), Size::new(640, 480));
        watcher.stop(&mut listeners);
        assert!(listeners.is_empty());
    }
}
