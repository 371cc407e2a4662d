#![forbid(unsafe_code)]

//! Resize sessions driven by the eight edge/corner handles.
//!
//! The geometry step is a pure function of the session snapshot, the
//! current pointer, and the bounds in force:
//!
//! - Side handles zero the perpendicular axis, so a top handle never
//!   changes width.
//! - Growing edges (`right`, `bottom`) add the delta; shrinking edges
//!   (`left`, `top`) subtract it.
//! - Each dimension is clamped to `[min, max]`. For a floating panel `max`
//!   is the space left before the viewport edge (growing) or the original
//!   far edge (shrinking); for an in-flow panel it is the viewport.
//! - A floating panel resized from a shrinking edge moves its origin with
//!   the pointer. When the size bottoms out at the minimum the origin pins
//!   to `far edge - min`, so the opposite edge never moves.

use floatpane_core::{
    Direction, ListenerSet, ListenerSlot, PointerEventNames, Position, ResizeHandle, Size,
};

/// State captured at pointer-down for one resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeSession {
    pub handle: Option<ResizeHandle>,
    pub direction: Direction,
    /// Pointer position at pointer-down.
    pub pointer: Position,
    /// Size at pointer-down.
    pub size: Size,
    /// Origin at pointer-down (meaningful only while floating).
    pub position: Position,
}

impl ResizeSession {
    #[must_use]
    pub fn new(
        handle: Option<ResizeHandle>,
        pointer: Position,
        size: Size,
        position: Position,
    ) -> Self {
        Self {
            handle,
            direction: Direction::from(handle),
            pointer,
            size,
            position,
        }
    }

    /// Restart the session from new geometry, keeping its handle.
    #[must_use]
    pub const fn rebased(self, pointer: Position, size: Size, position: Position) -> Self {
        Self {
            pointer,
            size,
            position,
            ..self
        }
    }
}

/// Constraints applied to one resize step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeBounds {
    pub viewport: Size,
    pub min: Size,
    /// Current origin when the panel floats; `None` when in flow.
    pub origin: Option<Position>,
}

/// Geometry produced by one resize step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeStep {
    pub size: Size,
    /// New origin; only produced for floating panels.
    pub position: Option<Position>,
}

/// Compute the geometry for the pointer at `pointer`.
#[must_use]
pub fn resize_step(session: &ResizeSession, pointer: Position, bounds: &ResizeBounds) -> ResizeStep {
    let direction = session.direction;
    let delta = pointer.offset_from(session.pointer);
    let dx = if direction.is_vertical_only() { 0 } else { delta.x };
    let dy = if direction.is_horizontal_only() { 0 } else { delta.y };

    let growth = direction.growth();
    let snap = session.size;
    let anchor = session.position;
    let min = bounds.min;

    let width = if growth.width {
        snap.width.saturating_add(dx)
    } else {
        snap.width.saturating_sub(dx)
    };
    let height = if growth.height {
        snap.height.saturating_add(dy)
    } else {
        snap.height.saturating_sub(dy)
    };

    let max = match bounds.origin {
        Some(origin) => Size::new(
            if growth.width {
                bounds.viewport.width.saturating_sub(origin.x)
            } else {
                anchor.x.saturating_add(snap.width)
            },
            if growth.height {
                bounds.viewport.height.saturating_sub(origin.y)
            } else {
                anchor.y.saturating_add(snap.height)
            },
        ),
        None => bounds.viewport,
    };

    let size = Size::new(
        clamp_dimension(width, min.width, max.width),
        clamp_dimension(height, min.height, max.height),
    );

    let position = bounds.origin.map(|_| {
        Position::new(
            anchored_origin(anchor.x, snap.width, dx, growth.width, size.width, min.width),
            anchored_origin(anchor.y, snap.height, dy, growth.height, size.height, min.height),
        )
    });

    ResizeStep { size, position }
}

/// Floor wins over ceiling: a panel is never shrunk below its minimum.
fn clamp_dimension(value: i32, min: i32, max: i32) -> i32 {
    if value <= min {
        min
    } else if value >= max {
        max
    } else {
        value
    }
}

fn anchored_origin(
    anchor: i32,
    snap_len: i32,
    delta: i32,
    growing: bool,
    len: i32,
    min_len: i32,
) -> i32 {
    if growing {
        return anchor.max(0);
    }
    if len == min_len {
        anchor.saturating_add(snap_len).saturating_sub(min_len).max(0)
    } else {
        anchor.saturating_add(delta).max(0)
    }
}

/// Owns the resizer `down` listener and the open resize session, if any.
#[derive(Debug, Clone, Default)]
pub struct ResizeSessionController {
    session: Option<ResizeSession>,
    /// Latest pointer seen by the open session.
    last_pointer: Option<Position>,
}

impl ResizeSessionController {
    /// Install the resizer `down` listener.
    pub fn bind(&self, listeners: &mut ListenerSet, names: PointerEventNames) {
        listeners.attach(ListenerSlot::Resizer, names.down);
    }

    /// Remove the resizer `down` listener.
    pub fn unbind(&self, listeners: &mut ListenerSet, names: PointerEventNames) {
        listeners.detach(ListenerSlot::Resizer, names.down);
    }

    /// Open a session and attach the document `move`/`up` sink.
    pub fn start(
        &mut self,
        session: ResizeSession,
        listeners: &mut ListenerSet,
        names: PointerEventNames,
    ) {
        self.session = Some(session);
        self.last_pointer = Some(session.pointer);
        listeners.attach(ListenerSlot::Document, names.up);
        listeners.attach(ListenerSlot::Document, names.move_);
    }

    /// Close the session and detach the document sink.
    pub fn stop(
        &mut self,
        listeners: &mut ListenerSet,
        names: PointerEventNames,
    ) -> Option<ResizeSession> {
        listeners.detach(ListenerSlot::Document, names.up);
        listeners.detach(ListenerSlot::Document, names.move_);
        self.last_pointer = None;
        self.session.take()
    }

    /// Record a pointer position delivered to the open session.
    pub fn track(&mut self, pointer: Position) {
        if self.session.is_some() {
            self.last_pointer = Some(pointer);
        }
    }

    /// Re-anchor the open session on geometry changed outside the session,
    /// measuring further motion from the latest pointer.
    pub fn rebase(&mut self, size: Size, position: Position) {
        if let (Some(session), Some(pointer)) = (self.session.as_mut(), self.last_pointer) {
            *session = session.rebased(pointer, size, position);
        }
    }

    #[must_use]
    pub const fn session(&self) -> Option<ResizeSession> {
        self.session
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.session.is_some()
    }
}
