#![forbid(unsafe_code)]

//! Drag sessions: moving a floating panel by its body.

use floatpane_core::{
    ListenerSet, ListenerSlot, PointerEventNames, Position, Size, clamp_offset,
};

/// State captured at pointer-down for one drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    /// Pointer offset from the element origin at pointer-down.
    pub location: Position,
}

impl DragSession {
    /// Begin a drag grabbed at `pointer` on an element whose origin is at
    /// `origin`.
    #[must_use]
    pub const fn grab(pointer: Position, origin: Position) -> Self {
        Self {
            location: pointer.offset_from(origin),
        }
    }

    /// New element origin for a pointer position, clamped so the element
    /// stays inside the viewport.
    #[must_use]
    pub fn target_position(&self, pointer: Position, viewport: Size, element: Size) -> Position {
        let raw = pointer.offset_from(self.location);
        Position::new(
            clamp_offset(raw.x, viewport.width - element.width),
            clamp_offset(raw.y, viewport.height - element.height),
        )
    }
}

/// Owns the wrapper `down` listener and the open drag session, if any.
#[derive(Debug, Clone, Default)]
pub struct DragSessionController {
    session: Option<DragSession>,
}

impl DragSessionController {
    /// Install the wrapper `down` listener.
    pub fn bind(&self, listeners: &mut ListenerSet, names: PointerEventNames) {
        listeners.attach(ListenerSlot::Wrapper, names.down);
    }

    /// Remove the wrapper `down` listener.
    pub fn unbind(&self, listeners: &mut ListenerSet, names: PointerEventNames) {
        listeners.detach(ListenerSlot::Wrapper, names.down);
    }

    /// Open a session and attach the document `move`/`up` sink.
    pub fn start(
        &mut self,
        session: DragSession,
        listeners: &mut ListenerSet,
        names: PointerEventNames,
    ) {
        self.session = Some(session);
        listeners.attach(ListenerSlot::Document, names.move_);
        listeners.attach(ListenerSlot::Document, names.up);
    }

    /// Close the session and detach the document sink.
    pub fn stop(
        &mut self,
        listeners: &mut ListenerSet,
        names: PointerEventNames,
    ) -> Option<DragSession> {
        listeners.detach(ListenerSlot::Document, names.move_);
        listeners.detach(ListenerSlot::Document, names.up);
        self.session.take()
    }

    #[must_use]
    pub const fn session(&self) -> Option<DragSession> {
        self.session
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.session.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floatpane_core::ListenerCommand;

    const VIEWPORT: Size = Size::new(800, 600);
    const ELEMENT: Size = Size::new(200, 100);

    #[test]
    fn grab_records_offset_from_origin() {
        let session = DragSession::grab(Position::new(150, 130), Position::new(100, 100));
        assert_eq!(session.location, Position::new(50, 30));
        assert_eq!(
            session.target_position(Position::new(250, 230), VIEWPORT, ELEMENT),
            Position::new(200, 200)
        );
    }

    #[test]
    fn target_clamps_to_viewport() {
        let session = DragSession::grab(Position::new(10, 10), Position::new(0, 0));
        assert_eq!(
            session.target_position(Position::new(-40, -40), VIEWPORT, ELEMENT),
            Position::new(0, 0)
        );
        assert_eq!(
            session.target_position(Position::new(5000, 5000), VIEWPORT, ELEMENT),
            Position::new(600, 500)
        );
    }

    #[test]
    fn start_and_stop_manage_document_sink() {
        let names = PointerEventNames::MOUSE;
        let mut listeners = ListenerSet::new();
        let mut drag = DragSessionController::default();

        drag.bind(&mut listeners, names);
        drag.start(
            DragSession::grab(Position::new(1, 1), Position::default()),
            &mut listeners,
            names,
        );
        assert!(drag.is_active());
        assert!(listeners.is_listening(ListenerSlot::Document, "mousemove"));
        assert!(listeners.is_listening(ListenerSlot::Document, "mouseup"));

        let closed = drag.stop(&mut listeners, names);
        assert_eq!(closed.map(|s| s.location), Some(Position::new(1, 1)));
        assert!(!drag.is_active());
        assert!(!listeners.is_listening(ListenerSlot::Document, "mousemove"));
        assert!(listeners.is_listening(ListenerSlot::Wrapper, "mousedown"));

        let commands = listeners.take_commands();
        assert_eq!(
            commands.last(),
            Some(&ListenerCommand::Detach {
                slot: ListenerSlot::Document,
                event: "mouseup"
            })
        );
    }

    #[test]
    fn touch_names_are_used_when_configured() {
        let names = PointerEventNames::TOUCH;
        let mut listeners = ListenerSet::new();
        let mut drag = DragSessionController::default();
        drag.start(
            DragSession::grab(Position::default(), Position::default()),
            &mut listeners,
            names,
        );
        assert!(listeners.is_listening(ListenerSlot::Document, "touchmove"));
        assert!(!listeners.is_listening(ListenerSlot::Document, "mousemove"));
    }
}
