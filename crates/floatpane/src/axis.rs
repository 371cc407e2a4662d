#![forbid(unsafe_code)]

//! Vertical-only drag engine with click suppression.
//!
//! [`AxisDragEngine`] moves an always-positioned element (a floating button,
//! typically) along the y axis. The host reads [`AxisDragEngine::is_moved`]
//! from its click handler: a press that ended where it started is a click,
//! anything else was a drag and the click should be swallowed.
//!
//! Unset y counts as zero when a drag starts.

use floatpane_core::{
    FrameScheduler, ListenerCommand, ListenerSet, ListenerSlot, OVERLAY_ACTIVE_CLASS,
    PointerEvent, PointerEventNames, PointerPhase, Size, StyleProperty, Surface,
    WINDOW_RESIZE_EVENT, clamp_offset,
};

use crate::config::AxisConfig;
use crate::dispatch::{Dispatch, DispatchOutcome, FrameReport, IgnoredReason, SessionKind};

/// State captured at pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AxisSession {
    /// Pointer y minus element y at pointer-down.
    grab_offset: i32,
    start_y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AxisMotion {
    session: AxisSession,
    pointer_y: i32,
}

/// Vertical drag engine bound to an element and its overlay.
pub struct AxisDragEngine<S: Surface> {
    surfaces: Option<(S, S)>,
    names: PointerEventNames,
    y: Option<i32>,
    viewport: Size,
    session: Option<AxisSession>,
    /// Start y of the last released session, while its final motion may
    /// still be pending.
    released: Option<i32>,
    is_moved: bool,
    frames: FrameScheduler<AxisMotion>,
    listeners: ListenerSet,
}

impl<S: Surface> std::fmt::Debug for AxisDragEngine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AxisDragEngine")
            .field("bound", &self.surfaces.is_some())
            .field("y", &self.y)
            .field("dragging", &self.session.is_some())
            .field("is_moved", &self.is_moved)
            .finish()
    }
}

impl<S: Surface> AxisDragEngine<S> {
    /// Bind the element and overlay, install the element `down` and window
    /// `resize` listeners, and apply `config.initial_y` when non-negative.
    pub fn new(wrapper: S, overlay: S, names: PointerEventNames, config: AxisConfig) -> Self {
        let mut listeners = ListenerSet::new();
        listeners.attach(ListenerSlot::Wrapper, names.down);
        listeners.attach(ListenerSlot::Window, WINDOW_RESIZE_EVENT);

        let mut engine = Self {
            surfaces: Some((wrapper, overlay)),
            names,
            y: None,
            viewport: config.viewport,
            session: None,
            released: None,
            is_moved: false,
            frames: FrameScheduler::new(),
            listeners,
        };
        if let Some(y) = config.initial_y.filter(|y| *y >= 0) {
            engine.set_position_y(y);
        }
        tracing::debug!(target: "floatpane.axis", initial_y = engine.y, "axis engine bound");
        engine
    }

    /// Move the element to `y` via its transform.
    pub fn set_position_y(&mut self, y: i32) {
        let Some((wrapper, _)) = self.surfaces.as_mut() else {
            return;
        };
        self.y = Some(y);
        wrapper.set_style(StyleProperty::Transform, Some(format!("translateY({y}px)")));
    }

    #[must_use]
    pub const fn position_y(&self) -> Option<i32> {
        self.y
    }

    /// True if the last press moved the element.
    #[must_use]
    pub const fn is_moved(&self) -> bool {
        self.is_moved
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub const fn viewport(&self) -> Size {
        self.viewport
    }

    #[must_use]
    pub fn listeners(&self) -> &ListenerSet {
        &self.listeners
    }

    pub fn take_listener_commands(&mut self) -> Vec<ListenerCommand> {
        self.listeners.take_commands()
    }

    /// Handle a native pointer event delivered to the listener on `slot`.
    pub fn dispatch_pointer(&mut self, slot: ListenerSlot, event: &PointerEvent) -> Dispatch {
        if self.surfaces.is_none() {
            return Dispatch::ignored(IgnoredReason::Unbound);
        }
        if !self.listeners.is_listening(slot, event.name) {
            return Dispatch::ignored(IgnoredReason::NotListening);
        }
        let dispatch = match (slot, self.names.phase_of(event.name)) {
            (ListenerSlot::Wrapper, Some(PointerPhase::Down)) => self.on_down(event),
            (ListenerSlot::Document, Some(PointerPhase::Move)) => self.on_move(event),
            (ListenerSlot::Document, Some(PointerPhase::Up)) => self.on_up(),
            _ => Dispatch::ignored(IgnoredReason::NotListening),
        };
        if let Some(reason) = dispatch.ignored_reason() {
            tracing::trace!(target: "floatpane.axis", ?slot, ?reason, "pointer event ignored");
        }
        dispatch.with_commands(self.listeners.take_commands())
    }

    /// Handle a window resize to the given inner size.
    pub fn dispatch_window_resize(&mut self, viewport: Size) -> Dispatch {
        if self.surfaces.is_none() {
            return Dispatch::ignored(IgnoredReason::Unbound);
        }
        if !self
            .listeners
            .is_listening(ListenerSlot::Window, WINDOW_RESIZE_EVENT)
        {
            return Dispatch::ignored(IgnoredReason::NotListening);
        }
        self.viewport = viewport;
        let request = self.frames.push_viewport_check();
        Dispatch::new(DispatchOutcome::ViewportQueued).with_frame_request(request)
    }

    /// Apply work coalesced since the previous frame.
    pub fn on_animation_frame(&mut self) -> FrameReport {
        let frame = self.frames.flush();
        let mut report = FrameReport::default();
        let Some(height) = self.element_height() else {
            return report;
        };
        let max_y = self.viewport.height - height;

        if frame.viewport_check {
            if let Some(y) = self.y {
                self.set_position_y(clamp_offset(y, max_y));
                report.viewport_reconciled = true;
            }
        }
        if let Some(AxisMotion { session, pointer_y }) = frame.motion {
            let y = clamp_offset(pointer_y.saturating_sub(session.grab_offset), max_y);
            self.set_position_y(y);
            report.motion_applied = true;
            if let Some(start_y) = self.released.take() {
                self.is_moved = start_y != y;
            }
        }
        report
    }

    /// Remove every listener and drop pending work. Returns the element and
    /// overlay, or `None` if already destroyed.
    pub fn destroy(&mut self) -> Option<(S, S)> {
        let (mut wrapper, mut overlay) = self.surfaces.take()?;
        let was_dragging = self.session.take().is_some();
        if was_dragging {
            wrapper.set_style(StyleProperty::UserSelect, None);
            overlay.set_class(OVERLAY_ACTIVE_CLASS, false);
        }
        self.listeners.detach_all();
        self.frames.clear();
        self.released = None;
        tracing::debug!(target: "floatpane.axis", was_dragging, "axis engine destroyed");
        Some((wrapper, overlay))
    }

    fn element_height(&self) -> Option<i32> {
        self.surfaces
            .as_ref()
            .map(|(wrapper, _)| wrapper.client_size().height)
    }

    fn on_down(&mut self, event: &PointerEvent) -> Dispatch {
        if self.session.is_some() {
            return Dispatch::ignored(IgnoredReason::SessionInProgress);
        }
        let Some(pointer) = event.client_position() else {
            return Dispatch::ignored(IgnoredReason::NoPointerPosition);
        };
        let Some((wrapper, overlay)) = self.surfaces.as_mut() else {
            return Dispatch::ignored(IgnoredReason::Unbound);
        };
        wrapper.set_style(StyleProperty::UserSelect, Some("none".into()));
        overlay.set_class(OVERLAY_ACTIVE_CLASS, true);

        let start_y = self.y.unwrap_or(0);
        self.session = Some(AxisSession {
            grab_offset: pointer.y.saturating_sub(start_y),
            start_y,
        });
        self.released = None;
        self.is_moved = false;
        self.listeners.attach(ListenerSlot::Document, self.names.move_);
        self.listeners.attach(ListenerSlot::Document, self.names.up);

        tracing::debug!(target: "floatpane.axis", start_y, pointer_y = pointer.y, "drag started");
        Dispatch::new(DispatchOutcome::DragStarted).with_prevent_default()
    }

    fn on_move(&mut self, event: &PointerEvent) -> Dispatch {
        let Some(session) = self.session else {
            return Dispatch::ignored(IgnoredReason::NoActiveSession);
        };
        let Some(pointer) = event.client_position() else {
            return Dispatch::ignored(IgnoredReason::NoPointerPosition);
        };
        let request = self.frames.push_motion(AxisMotion {
            session,
            pointer_y: pointer.y,
        });
        Dispatch::new(DispatchOutcome::MotionQueued).with_frame_request(request)
    }

    fn on_up(&mut self) -> Dispatch {
        let Some(session) = self.session.take() else {
            return Dispatch::ignored(IgnoredReason::NoActiveSession);
        };
        if let Some((wrapper, overlay)) = self.surfaces.as_mut() {
            wrapper.set_style(StyleProperty::UserSelect, None);
            overlay.set_class(OVERLAY_ACTIVE_CLASS, false);
        }
        self.listeners.detach(ListenerSlot::Document, self.names.move_);
        self.listeners.detach(ListenerSlot::Document, self.names.up);

        self.is_moved = self.y.unwrap_or(0) != session.start_y;
        if self.frames.has_pending() {
            self.released = Some(session.start_y);
        }
        tracing::debug!(
            target: "floatpane.axis",
            is_moved = self.is_moved,
            y = self.y,
            "drag ended"
        );
        Dispatch::new(DispatchOutcome::SessionEnded(SessionKind::Drag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floatpane_core::testing::RecordingSurface;
    use floatpane_core::{EventTarget, NodeId, Position};

    fn engine(initial_y: Option<i32>) -> AxisDragEngine<RecordingSurface> {
        AxisDragEngine::new(
            RecordingSurface::new(1, Size::new(48, 48), Position::default()),
            RecordingSurface::new(2, Size::new(400, 300), Position::default()),
            PointerEventNames::MOUSE,
            AxisConfig {
                initial_y,
                viewport: Size::new(400, 300),
            },
        )
    }

    fn mouse(name: &'static str, y: i32) -> PointerEvent {
        PointerEvent::mouse(name, EventTarget::node(NodeId(1)), 10, y)
    }

    fn transform(engine: &AxisDragEngine<RecordingSurface>) -> Option<String> {
        engine
            .surfaces
            .as_ref()
            .and_then(|(w, _)| w.style(StyleProperty::Transform).map(str::to_owned))
    }

    #[test]
    fn initial_y_applied_when_non_negative() {
        let e = engine(Some(120));
        assert_eq!(e.position_y(), Some(120));
        assert_eq!(transform(&e).as_deref(), Some("translateY(120px)"));
        assert_eq!(engine(Some(-5)).position_y(), None);
        assert_eq!(engine(None).position_y(), None);
    }

    #[test]
    fn press_without_motion_is_a_click() {
        let mut e = engine(Some(100));
        e.dispatch_pointer(ListenerSlot::Wrapper, &mouse("mousedown", 110));
        let up = e.dispatch_pointer(ListenerSlot::Document, &mouse("mouseup", 110));
        assert_eq!(up.outcome, DispatchOutcome::SessionEnded(SessionKind::Drag));
        assert!(!e.is_moved());
    }

    #[test]
    fn drag_moves_vertically_and_clamps() {
        let mut e = engine(Some(100));
        let down = e.dispatch_pointer(ListenerSlot::Wrapper, &mouse("mousedown", 110));
        assert!(down.prevent_default);
        assert_eq!(down.listener_commands.len(), 2);

        e.dispatch_pointer(ListenerSlot::Document, &mouse("mousemove", 160));
        assert!(e.on_animation_frame().motion_applied);
        assert_eq!(e.position_y(), Some(150));

        e.dispatch_pointer(ListenerSlot::Document, &mouse("mousemove", 900));
        e.on_animation_frame();
        assert_eq!(e.position_y(), Some(252));

        e.dispatch_pointer(ListenerSlot::Document, &mouse("mousemove", -50));
        e.on_animation_frame();
        assert_eq!(e.position_y(), Some(0));

        e.dispatch_pointer(ListenerSlot::Document, &mouse("mouseup", -50));
        assert!(e.is_moved());
        assert!(!e.listeners().is_listening(ListenerSlot::Document, "mousemove"));
    }

    #[test]
    fn motion_pending_at_release_updates_is_moved() {
        let mut e = engine(Some(100));
        e.dispatch_pointer(ListenerSlot::Wrapper, &mouse("mousedown", 110));
        e.dispatch_pointer(ListenerSlot::Document, &mouse("mousemove", 140));
        e.dispatch_pointer(ListenerSlot::Document, &mouse("mouseup", 140));
        assert!(!e.is_moved());
        e.on_animation_frame();
        assert_eq!(e.position_y(), Some(130));
        assert!(e.is_moved());
    }

    #[test]
    fn window_resize_pulls_element_back() {
        let mut e = engine(Some(250));
        let first = e.dispatch_window_resize(Size::new(400, 200));
        let second = e.dispatch_window_resize(Size::new(400, 150));
        assert!(first.request_frame);
        assert!(!second.request_frame);
        assert!(e.on_animation_frame().viewport_reconciled);
        assert_eq!(e.position_y(), Some(102));
    }

    #[test]
    fn destroy_is_idempotent_and_silences_events() {
        let mut e = engine(Some(0));
        e.dispatch_pointer(ListenerSlot::Wrapper, &mouse("mousedown", 10));
        e.take_listener_commands();
        let (_, overlay) = e.destroy().expect("bound");
        assert!(!overlay.has_class(OVERLAY_ACTIVE_CLASS));
        assert_eq!(e.take_listener_commands().len(), 4);
        assert!(e.destroy().is_none());
        assert_eq!(
            e.dispatch_pointer(ListenerSlot::Document, &mouse("mousemove", 20))
                .ignored_reason(),
            Some(IgnoredReason::Unbound)
        );
    }

    #[test]
    fn window_resize_after_destroy_is_ignored() {
        let mut e = engine(Some(250));
        let (wrapper, _) = e.destroy().expect("bound");
        let writes = wrapper.writes().len();

        let dispatch = e.dispatch_window_resize(Size::new(400, 100));
        assert_eq!(dispatch.ignored_reason(), Some(IgnoredReason::Unbound));
        assert!(!dispatch.request_frame);
        assert_eq!(e.on_animation_frame(), FrameReport::default());
        assert_eq!(e.position_y(), Some(250));
        assert_eq!(e.viewport(), Size::new(400, 300));
        assert_eq!(wrapper.writes().len(), writes);
    }
}
