#![forbid(unsafe_code)]

//! Floating panel engine: drag, eight-way resize, and static/fixed toggle.
//!
//! [`PanelEngine`] owns a panel's floating geometry and interprets pointer
//! and window events forwarded by the host. A panel starts in flow
//! ([`LayoutMode::Static`]); [`PanelEngine::static_to_fixed`] lifts it into
//! viewport coordinates where its body can be dragged. Resizing works in
//! either mode.
//!
//! # Event flow
//!
//! ```text
//! wrapper down ──► DragSessionController ──┐
//! resizer down ──► ResizeSessionController ─┼─► document move ─► FrameScheduler ─► geometry
//! window resize ─► ViewportWatcher ─────────┘    document up ───► session end + callback
//! ```
//!
//! # Invariants
//!
//! 1. While floating, geometry written by a drag, a resize, or a viewport
//!    change keeps the panel inside the viewport (`0 <= x`,
//!    `x + width <= viewport.width`, same for `y`).
//! 2. Resizing never produces a size below the configured minimum.
//! 3. At most one session (drag or resize) is open at a time. Resizer
//!    `down` always requests `stopPropagation`.
//! 4. `fixed_to_static` clears every inline style the engine wrote but
//!    keeps the geometry, so a later toggle with `using_prev_sets` restores
//!    it.
//! 5. After [`PanelEngine::destroy`] no listener is installed and every
//!    event is ignored.

pub mod drag;
pub mod resize;
pub mod viewport;

use floatpane_core::{
    DRAGGABLE_CLASS, EventTarget, FrameScheduler, FrameStats, ListenerCommand, ListenerSet,
    ListenerSlot, OVERLAY_ACTIVE_CLASS, PartialPosition, PartialSize, PointerEvent,
    PointerEventNames, PointerPhase, Position, ResizeHandle, Size, StyleProperty, Surface, px,
};

use crate::config::PanelConfig;
use crate::dispatch::{Dispatch, DispatchOutcome, FrameReport, IgnoredReason, SessionKind};
use drag::{DragSession, DragSessionController};
use resize::{ResizeBounds, ResizeSession, ResizeSessionController, resize_step};
use viewport::{ViewportWatcher, reconcile};

/// Layout mode of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LayoutMode {
    /// In normal flow; the engine writes no position.
    #[default]
    Static,
    /// Viewport-anchored at the engine's translate, draggable.
    Fixed,
}

/// Surfaces bound to a panel engine.
#[derive(Debug, Clone)]
pub struct Surfaces<S> {
    /// The positioned, resized element.
    pub wrapper: S,
    /// Full-screen overlay shown while a session is open.
    pub overlay: S,
    /// Container the resize handles are mounted into.
    pub resizer: Option<S>,
}

/// Host predicate deciding whether a pointer-down target starts a drag.
pub type CanDrag = Box<dyn Fn(&EventTarget) -> bool>;

/// Host callbacks fired when sessions end.
#[derive(Default)]
pub struct PanelEvents {
    on_move_end: Option<Box<dyn FnMut()>>,
    on_resize_end: Option<Box<dyn FnMut()>>,
}

impl PanelEvents {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Called after a drag session's pointer-up.
    #[must_use]
    pub fn on_move_end(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_move_end = Some(Box::new(f));
        self
    }

    /// Called after a resize session's pointer-up.
    #[must_use]
    pub fn on_resize_end(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_resize_end = Some(Box::new(f));
        self
    }
}

impl std::fmt::Debug for PanelEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelEvents")
            .field("on_move_end", &self.on_move_end.is_some())
            .field("on_resize_end", &self.on_resize_end.is_some())
            .finish()
    }
}

/// Additive adjustment applied to the in-flow box when floating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToggleOffset {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// How to compute floating geometry when leaving the flow.
///
/// Explicit `size`/`position` fields win; unset fields fall back to the
/// in-flow box plus `offset`. With `using_prev_sets` and remembered
/// geometry, all of that is skipped and the previous floating geometry is
/// restored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToggleOptions {
    pub size: PartialSize,
    pub position: PartialPosition,
    pub offset: ToggleOffset,
    pub using_prev_sets: bool,
}

impl ToggleOptions {
    /// Restore the previous floating geometry when there is one.
    #[must_use]
    pub fn remembered() -> Self {
        Self {
            using_prev_sets: true,
            ..Self::default()
        }
    }
}

/// Geometry currently held by an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GeometrySnapshot {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

/// Motion waiting for the next animation frame. Carries its session so a
/// move queued just before pointer-up still lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Motion {
    Drag {
        session: DragSession,
        pointer: Position,
    },
    Resize {
        session: ResizeSession,
        pointer: Position,
    },
}

/// Interactive positioning engine for a floating panel.
pub struct PanelEngine<S: Surface> {
    surfaces: Option<Surfaces<S>>,
    names: PointerEventNames,
    mode: LayoutMode,
    translate: Option<Position>,
    size: PartialSize,
    min_size: Size,
    drag: DragSessionController,
    resize: ResizeSessionController,
    viewport: ViewportWatcher,
    frames: FrameScheduler<Motion>,
    listeners: ListenerSet,
    can_drag: Option<CanDrag>,
    events: PanelEvents,
}

impl<S: Surface> std::fmt::Debug for PanelEngine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelEngine")
            .field("bound", &self.surfaces.is_some())
            .field("mode", &self.mode)
            .field("translate", &self.translate)
            .field("size", &self.size)
            .field("dragging", &self.drag.is_active())
            .field("resizing", &self.resize.is_active())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<S: Surface> PanelEngine<S> {
    /// Bind surfaces and install listeners.
    ///
    /// Mounts all eight handles into the resizer when one is given. The
    /// listener installs are queued; collect them with
    /// [`take_listener_commands`](Self::take_listener_commands).
    pub fn new(
        mut surfaces: Surfaces<S>,
        names: PointerEventNames,
        config: PanelConfig,
        can_drag: Option<CanDrag>,
        events: PanelEvents,
    ) -> Self {
        let mut listeners = ListenerSet::new();
        let drag = DragSessionController::default();
        let resize = ResizeSessionController::default();
        let viewport = ViewportWatcher::new(config.viewport);

        drag.bind(&mut listeners, names);
        if let Some(resizer) = surfaces.resizer.as_mut() {
            resizer.mount_handles(&ResizeHandle::ALL);
            resize.bind(&mut listeners, names);
        }
        viewport.start(&mut listeners);

        tracing::debug!(
            target: "floatpane.panel",
            wrapper = surfaces.wrapper.node_id().0,
            resizable = surfaces.resizer.is_some(),
            custom_can_drag = can_drag.is_some(),
            down = names.down,
            "panel engine bound"
        );

        Self {
            surfaces: Some(surfaces),
            names,
            mode: LayoutMode::Static,
            translate: None,
            size: PartialSize::UNSET,
            min_size: config.min_size(),
            drag,
            resize,
            viewport,
            frames: FrameScheduler::new(),
            listeners,
            can_drag,
            events,
        }
    }

    // -----------------------------------------------------------------------
    // Geometry API
    // -----------------------------------------------------------------------

    /// Move the wrapper to `(x, y)` via its transform.
    pub fn set_position(&mut self, x: i32, y: i32) {
        let Some(surfaces) = self.surfaces.as_mut() else {
            return;
        };
        self.translate = Some(Position::new(x, y));
        surfaces.wrapper.set_style(
            StyleProperty::Transform,
            Some(format!("translate({x}px, {y}px)")),
        );
    }

    /// Set the dimensions that are provided.
    pub fn set_size(&mut self, width: Option<i32>, height: Option<i32>) {
        let Some(surfaces) = self.surfaces.as_mut() else {
            return;
        };
        if let Some(width) = width {
            self.size.width = Some(width);
            surfaces
                .wrapper
                .set_style(StyleProperty::Width, Some(px(width)));
        }
        if let Some(height) = height {
            self.size.height = Some(height);
            surfaces
                .wrapper
                .set_style(StyleProperty::Height, Some(px(height)));
        }
    }

    /// Lift the panel out of the flow into viewport coordinates.
    pub fn static_to_fixed(&mut self, options: &ToggleOptions) {
        let Some(surfaces) = self.surfaces.as_ref() else {
            return;
        };
        let client = surfaces.wrapper.client_size();
        let origin = surfaces.wrapper.client_origin();

        self.mode = LayoutMode::Fixed;

        let restore =
            options.using_prev_sets && self.size.is_any_set() && self.translate.is_some();
        if !restore {
            let offset = options.offset;
            let width = options.size.width.unwrap_or(client.width + offset.width);
            let height = options.size.height.unwrap_or(client.height + offset.height);
            self.set_size(Some(width), Some(height));

            let x = options.position.x.unwrap_or(origin.x + offset.x);
            let y = options.position.y.unwrap_or(origin.y + offset.y);
            self.set_position(x, y);
        }

        self.reconcile_viewport();

        if let Some(surfaces) = self.surfaces.as_mut() {
            let wrapper = &mut surfaces.wrapper;
            wrapper.set_class(DRAGGABLE_CLASS, true);
            wrapper.set_style(StyleProperty::Top, Some("0".into()));
            wrapper.set_style(StyleProperty::Left, Some("0".into()));
            wrapper.set_style(StyleProperty::Position, Some("fixed".into()));
        }

        tracing::debug!(
            target: "floatpane.panel",
            restored = restore,
            x = self.translate.map(|p| p.x),
            y = self.translate.map(|p| p.y),
            width = self.size.width,
            height = self.size.height,
            "panel floating"
        );
    }

    /// Return the panel to the flow. Geometry is kept for a later restore.
    pub fn fixed_to_static(&mut self) {
        let Some(surfaces) = self.surfaces.as_mut() else {
            return;
        };
        self.mode = LayoutMode::Static;

        let wrapper = &mut surfaces.wrapper;
        wrapper.set_class(DRAGGABLE_CLASS, false);
        for property in [
            StyleProperty::Top,
            StyleProperty::Left,
            StyleProperty::Width,
            StyleProperty::Height,
            StyleProperty::Position,
            StyleProperty::Transform,
        ] {
            wrapper.set_style(property, None);
        }

        tracing::debug!(target: "floatpane.panel", "panel in flow");
    }

    /// Switch to the other layout mode.
    pub fn toggle(&mut self, options: &ToggleOptions) {
        match self.mode {
            LayoutMode::Fixed => self.fixed_to_static(),
            LayoutMode::Static => self.static_to_fixed(options),
        }
    }

    /// Current translate and size.
    #[must_use]
    pub fn position_and_size(&self) -> GeometrySnapshot {
        GeometrySnapshot {
            x: self.translate.map(|p| p.x),
            y: self.translate.map(|p| p.y),
            width: self.size.width,
            height: self.size.height,
        }
    }

    // -----------------------------------------------------------------------
    // Event dispatch
    // -----------------------------------------------------------------------

    /// Handle a native pointer event delivered to the listener on `slot`.
    pub fn dispatch_pointer(&mut self, slot: ListenerSlot, event: &PointerEvent) -> Dispatch {
        if self.surfaces.is_none() {
            return Dispatch::ignored(IgnoredReason::Unbound);
        }
        if !self.listeners.is_listening(slot, event.name) {
            tracing::trace!(
                target: "floatpane.panel",
                ?slot,
                event = event.name,
                "event without listener ignored"
            );
            return Dispatch::ignored(IgnoredReason::NotListening);
        }

        let dispatch = match (slot, self.names.phase_of(event.name)) {
            (ListenerSlot::Wrapper, Some(PointerPhase::Down)) => self.on_wrapper_down(event),
            (ListenerSlot::Resizer, Some(PointerPhase::Down)) => self.on_resizer_down(event),
            (ListenerSlot::Document, Some(PointerPhase::Move)) => self.on_document_move(event),
            (ListenerSlot::Document, Some(PointerPhase::Up)) => self.on_document_up(),
            _ => Dispatch::ignored(IgnoredReason::NotListening),
        };
        if let Some(reason) = dispatch.ignored_reason() {
            tracing::trace!(target: "floatpane.panel", ?slot, ?reason, "pointer event ignored");
        }
        dispatch.with_commands(self.listeners.take_commands())
    }

    /// Deliver an event along a propagation path, innermost slot first,
    /// stopping after any dispatch that requests `stopPropagation`.
    pub fn dispatch_bubbling(
        &mut self,
        path: &[ListenerSlot],
        event: &PointerEvent,
    ) -> Vec<Dispatch> {
        let mut out = Vec::with_capacity(path.len());
        for &slot in path {
            let dispatch = self.dispatch_pointer(slot, event);
            let stop = dispatch.stop_propagation;
            out.push(dispatch);
            if stop {
                break;
            }
        }
        out
    }

    /// Handle a window resize to the given inner size.
    pub fn dispatch_window_resize(&mut self, viewport: Size) -> Dispatch {
        if self.surfaces.is_none() {
            return Dispatch::ignored(IgnoredReason::Unbound);
        }
        if !self
            .listeners
            .is_listening(ListenerSlot::Window, floatpane_core::WINDOW_RESIZE_EVENT)
        {
            return Dispatch::ignored(IgnoredReason::NotListening);
        }
        self.viewport.observe(viewport);
        let request = self.frames.push_viewport_check();
        Dispatch::new(DispatchOutcome::ViewportQueued)
            .with_frame_request(request)
            .with_commands(self.listeners.take_commands())
    }

    /// Apply work coalesced since the previous frame.
    pub fn on_animation_frame(&mut self) -> FrameReport {
        let frame = self.frames.flush();
        let mut report = FrameReport::default();
        if self.surfaces.is_none() {
            return report;
        }

        if frame.viewport_check && self.mode == LayoutMode::Fixed {
            self.reconcile_viewport();
            report.viewport_reconciled = true;
        }

        match frame.motion {
            Some(Motion::Drag { session, pointer }) => {
                if self.mode == LayoutMode::Fixed {
                    let target =
                        session.target_position(pointer, self.viewport.viewport(), self.element_size());
                    self.set_position(target.x, target.y);
                    report.motion_applied = true;
                }
            }
            Some(Motion::Resize { session, pointer }) => {
                // A viewport change this frame may have rebased the open session.
                let session = self.resize.session().unwrap_or(session);
                let bounds = ResizeBounds {
                    viewport: self.viewport.viewport(),
                    min: self.min_size,
                    origin: (self.mode == LayoutMode::Fixed)
                        .then(|| self.translate.unwrap_or_default()),
                };
                let step = resize_step(&session, pointer, &bounds);
                if let Some(position) = step.position {
                    self.set_position(position.x, position.y);
                }
                self.set_size(Some(step.size.width), Some(step.size.height));
                report.motion_applied = true;
            }
            None => {}
        }
        report
    }

    /// Remove every listener, drop pending work, and hand the surfaces back.
    ///
    /// Returns `None` (and does nothing) if already destroyed.
    pub fn destroy(&mut self) -> Option<Surfaces<S>> {
        let mut surfaces = self.surfaces.take()?;

        let was_dragging = self.drag.stop(&mut self.listeners, self.names).is_some();
        let was_resizing = self.resize.stop(&mut self.listeners, self.names).is_some();
        if was_dragging {
            surfaces.wrapper.set_style(StyleProperty::UserSelect, None);
        }
        if was_dragging || was_resizing {
            surfaces.overlay.set_class(OVERLAY_ACTIVE_CLASS, false);
        }

        self.drag.unbind(&mut self.listeners, self.names);
        self.resize.unbind(&mut self.listeners, self.names);
        self.viewport.stop(&mut self.listeners);
        self.listeners.detach_all();
        self.frames.clear();

        tracing::debug!(
            target: "floatpane.panel",
            was_dragging,
            was_resizing,
            "panel engine destroyed"
        );
        Some(surfaces)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[must_use]
    pub const fn layout_mode(&self) -> LayoutMode {
        self.mode
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    #[must_use]
    pub const fn is_resizing(&self) -> bool {
        self.resize.is_active()
    }

    /// Last viewport reported by the host.
    #[must_use]
    pub const fn viewport(&self) -> Size {
        self.viewport.viewport()
    }

    #[must_use]
    pub const fn min_size(&self) -> Size {
        self.min_size
    }

    #[must_use]
    pub const fn names(&self) -> PointerEventNames {
        self.names
    }

    /// Listeners currently installed.
    #[must_use]
    pub fn listeners(&self) -> &ListenerSet {
        &self.listeners
    }

    /// Listener changes not yet returned in a dispatch.
    pub fn take_listener_commands(&mut self) -> Vec<ListenerCommand> {
        self.listeners.take_commands()
    }

    /// Bound surfaces, until destroyed.
    #[must_use]
    pub fn surfaces(&self) -> Option<&Surfaces<S>> {
        self.surfaces.as_ref()
    }

    #[must_use]
    pub const fn frame_stats(&self) -> FrameStats {
        self.frames.stats()
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn element_size(&self) -> Size {
        self.surfaces
            .as_ref()
            .map_or(Size::default(), |s| s.wrapper.client_size())
            .merged(self.size)
    }

    fn reconcile_viewport(&mut self) {
        let Some(position) = self.translate else {
            return;
        };
        let size = self.element_size();
        let (position, size) = reconcile(position, size, self.viewport.viewport());
        self.set_position(position.x, position.y);
        self.set_size(Some(size.width), Some(size.height));
        self.resize.rebase(size, position);
    }

    fn on_wrapper_down(&mut self, event: &PointerEvent) -> Dispatch {
        if self.mode != LayoutMode::Fixed {
            return Dispatch::ignored(IgnoredReason::NotFloating);
        }
        let Some(surfaces) = self.surfaces.as_mut() else {
            return Dispatch::ignored(IgnoredReason::Unbound);
        };
        match &self.can_drag {
            Some(can_drag) => {
                if !can_drag(&event.target) {
                    return Dispatch::ignored(IgnoredReason::TargetRejected);
                }
            }
            None => {
                if event.target.node != surfaces.wrapper.node_id() {
                    return Dispatch::ignored(IgnoredReason::TargetNotWrapper);
                }
            }
        }
        if self.drag.is_active() || self.resize.is_active() {
            return Dispatch::ignored(IgnoredReason::SessionInProgress);
        }
        let Some(pointer) = event.client_position() else {
            return Dispatch::ignored(IgnoredReason::NoPointerPosition);
        };

        surfaces
            .wrapper
            .set_style(StyleProperty::UserSelect, Some("none".into()));
        surfaces.overlay.set_class(OVERLAY_ACTIVE_CLASS, true);

        let session = DragSession::grab(pointer, self.translate.unwrap_or_default());
        self.drag.start(session, &mut self.listeners, self.names);

        tracing::debug!(
            target: "floatpane.panel",
            pointer_x = pointer.x,
            pointer_y = pointer.y,
            "drag started"
        );
        Dispatch::new(DispatchOutcome::DragStarted).with_prevent_default()
    }

    fn on_resizer_down(&mut self, event: &PointerEvent) -> Dispatch {
        let Some(surfaces) = self.surfaces.as_mut() else {
            return Dispatch::ignored(IgnoredReason::Unbound);
        };
        if self.drag.is_active() || self.resize.is_active() {
            return Dispatch::ignored(IgnoredReason::SessionInProgress)
                .with_stop_propagation()
                .with_prevent_default();
        }
        let Some(pointer) = event.client_position() else {
            return Dispatch::ignored(IgnoredReason::NoPointerPosition)
                .with_stop_propagation()
                .with_prevent_default();
        };

        let size = match self.mode {
            LayoutMode::Fixed => surfaces.wrapper.client_size().merged(self.size),
            LayoutMode::Static => surfaces.wrapper.offset_size(),
        };
        let position = self.translate.unwrap_or_default();
        surfaces.overlay.set_class(OVERLAY_ACTIVE_CLASS, true);

        let handle = event.target.handle;
        let session = ResizeSession::new(handle, pointer, size, position);
        self.resize.start(session, &mut self.listeners, self.names);

        tracing::debug!(
            target: "floatpane.panel",
            ?handle,
            mode = ?self.mode,
            width = size.width,
            height = size.height,
            "resize started"
        );
        Dispatch::new(DispatchOutcome::ResizeStarted { handle })
            .with_stop_propagation()
            .with_prevent_default()
    }

    fn on_document_move(&mut self, event: &PointerEvent) -> Dispatch {
        let Some(pointer) = event.client_position() else {
            return Dispatch::ignored(IgnoredReason::NoPointerPosition);
        };
        let motion = if let Some(session) = self.resize.session() {
            self.resize.track(pointer);
            Motion::Resize { session, pointer }
        } else if let Some(session) = self.drag.session() {
            Motion::Drag { session, pointer }
        } else {
            return Dispatch::ignored(IgnoredReason::NoActiveSession);
        };
        let request = self.frames.push_motion(motion);
        Dispatch::new(DispatchOutcome::MotionQueued).with_frame_request(request)
    }

    fn on_document_up(&mut self) -> Dispatch {
        if self.drag.is_active() {
            self.drag.stop(&mut self.listeners, self.names);
            if let Some(surfaces) = self.surfaces.as_mut() {
                surfaces.wrapper.set_style(StyleProperty::UserSelect, None);
                surfaces.overlay.set_class(OVERLAY_ACTIVE_CLASS, false);
            }
            tracing::debug!(target: "floatpane.panel", "drag ended");
            if let Some(on_move_end) = self.events.on_move_end.as_mut() {
                on_move_end();
            }
            return Dispatch::new(DispatchOutcome::SessionEnded(SessionKind::Drag));
        }
        if self.resize.is_active() {
            self.resize.stop(&mut self.listeners, self.names);
            if let Some(surfaces) = self.surfaces.as_mut() {
                surfaces.overlay.set_class(OVERLAY_ACTIVE_CLASS, false);
            }
            tracing::debug!(target: "floatpane.panel", "resize ended");
            if let Some(on_resize_end) = self.events.on_resize_end.as_mut() {
                on_resize_end();
            }
            return Dispatch::new(DispatchOutcome::SessionEnded(SessionKind::Resize));
        }
        Dispatch::ignored(IgnoredReason::NoActiveSession)
    }
}
