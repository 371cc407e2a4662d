#![forbid(unsafe_code)]

//! Per-event dispatch records returned to the host.
//!
//! Every native event forwarded to an engine yields a [`Dispatch`]: what the
//! engine did with it, the listener changes the host must mirror, and the
//! `preventDefault` / `stopPropagation` / `requestAnimationFrame` calls it
//! should make on the engine's behalf. Ignored events carry a deterministic
//! [`IgnoredReason`] instead of an error.

use floatpane_core::{ListenerCommand, ResizeHandle};

/// Interaction session kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKind {
    Drag,
    Resize,
}

/// Why an incoming event was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IgnoredReason {
    /// The engine has been destroyed.
    Unbound,
    /// No listener for this event name is installed on the slot.
    NotListening,
    /// Drag requested while the surface is in flow.
    NotFloating,
    /// The host's drag predicate rejected the target.
    TargetRejected,
    /// No predicate and the target is a descendant, not the wrapper itself.
    TargetNotWrapper,
    /// Another session is already open.
    SessionInProgress,
    /// Move or up without an open session.
    NoActiveSession,
    /// The event carried no pointer coordinates.
    NoPointerPosition,
}

/// What the engine did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A drag session began.
    DragStarted,
    /// A resize session began from the given handle (if tagged).
    ResizeStarted { handle: Option<ResizeHandle> },
    /// Motion stored for the next animation frame.
    MotionQueued,
    /// Viewport reconciliation stored for the next animation frame.
    ViewportQueued,
    /// A session ended.
    SessionEnded(SessionKind),
    Ignored(IgnoredReason),
}

/// Result of one event dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub outcome: DispatchOutcome,
    /// Host should call `preventDefault()` on the native event.
    pub prevent_default: bool,
    /// Host should call `stopPropagation()` on the native event.
    pub stop_propagation: bool,
    /// Host should request an animation frame and then call
    /// `on_animation_frame`.
    pub request_frame: bool,
    /// Listener changes to mirror, in order.
    pub listener_commands: Vec<ListenerCommand>,
}

impl Dispatch {
    pub(crate) fn new(outcome: DispatchOutcome) -> Self {
        Self {
            outcome,
            prevent_default: false,
            stop_propagation: false,
            request_frame: false,
            listener_commands: Vec::new(),
        }
    }

    pub(crate) fn ignored(reason: IgnoredReason) -> Self {
        Self::new(DispatchOutcome::Ignored(reason))
    }

    pub(crate) fn with_prevent_default(mut self) -> Self {
        self.prevent_default = true;
        self
    }

    pub(crate) fn with_stop_propagation(mut self) -> Self {
        self.stop_propagation = true;
        self
    }

    pub(crate) fn with_frame_request(mut self, request: bool) -> Self {
        self.request_frame = request;
        self
    }

    pub(crate) fn with_commands(mut self, commands: Vec<ListenerCommand>) -> Self {
        self.listener_commands = commands;
        self
    }

    /// Reason the event was ignored, if it was.
    #[must_use]
    pub const fn ignored_reason(&self) -> Option<IgnoredReason> {
        match self.outcome {
            DispatchOutcome::Ignored(reason) => Some(reason),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_ignored(&self) -> bool {
        matches!(self.outcome, DispatchOutcome::Ignored(_))
    }
}

/// Effects of one animation-frame flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameReport {
    /// Viewport reconciliation ran.
    pub viewport_reconciled: bool,
    /// A coalesced motion was applied to geometry.
    pub motion_applied: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignored_dispatch_has_no_side_effects() {
        let d = Dispatch::ignored(IgnoredReason::NotListening);
        assert!(d.is_ignored());
        assert_eq!(d.ignored_reason(), Some(IgnoredReason::NotListening));
        assert!(!d.prevent_default && !d.stop_propagation && !d.request_frame);
        assert!(d.listener_commands.is_empty());
    }

    #[test]
    fn builders_set_flags() {
        let d = Dispatch::new(DispatchOutcome::MotionQueued)
            .with_prevent_default()
            .with_stop_propagation()
            .with_frame_request(true);
        assert!(d.prevent_default && d.stop_propagation && d.request_frame);
        assert_eq!(d.ignored_reason(), None);
    }
}
