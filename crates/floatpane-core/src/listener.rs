#![forbid(unsafe_code)]

//! Listener bookkeeping for host-driven engines.
//!
//! Engines never register callbacks with the platform themselves. Instead
//! they keep a [`ListenerSet`] of `(slot, event name)` pairs they are
//! listening to and emit [`ListenerCommand`]s the host mirrors onto real
//! `addEventListener` / `removeEventListener` calls. Events delivered on a
//! pair that is not in the set are dropped, which is what makes teardown
//! observable: after `destroy` the set is empty and nothing reacts.

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ListenerSlot {
    /// The positioned element.
    Wrapper,
    /// The resize-handle container.
    Resizer,
    /// Document-level sink used for in-progress sessions.
    Document,
    /// The window (viewport resize).
    Window,
}

/// Host instruction to mirror a listener change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerCommand {
    Attach {
        slot: ListenerSlot,
        event: &'static str,
    },
    Detach {
        slot: ListenerSlot,
        event: &'static str,
    },
}

/// Native name of the window resize event.
pub const WINDOW_RESIZE_EVENT: &str = "resize";

/// Set of installed listeners plus the commands not yet collected by the
/// host.
#[derive(Debug, Clone, Default)]
pub struct ListenerSet {
    installed: Vec<(ListenerSlot, &'static str)>,
    outbox: Vec<ListenerCommand>,
}

impl ListenerSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a listener. Installing twice is a no-op, as with the DOM.
    pub fn attach(&mut self, slot: ListenerSlot, event: &'static str) {
        if self.is_listening(slot, event) {
            return;
        }
        self.installed.push((slot, event));
        self.outbox.push(ListenerCommand::Attach { slot, event });
    }

    /// Remove a listener. Removing an absent listener is a no-op.
    pub fn detach(&mut self, slot: ListenerSlot, event: &'static str) {
        let before = self.installed.len();
        self.installed.retain(|&(s, e)| !(s == slot && e == event));
        if self.installed.len() != before {
            self.outbox.push(ListenerCommand::Detach { slot, event });
        }
    }

    /// Remove every listener, in installation order.
    pub fn detach_all(&mut self) {
        for (slot, event) in std::mem::take(&mut self.installed) {
            self.outbox.push(ListenerCommand::Detach { slot, event });
        }
    }

    #[must_use]
    pub fn is_listening(&self, slot: ListenerSlot, event: &str) -> bool {
        self.installed
            .iter()
            .any(|&(s, e)| s == slot && e == event)
    }

    /// Number of installed listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.installed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.installed.is_empty()
    }

    /// Iterate installed listeners.
    pub fn iter(&self) -> impl Iterator<Item = (ListenerSlot, &'static str)> + '_ {
        self.installed.iter().copied()
    }

    /// Drain commands queued since the last call.
    pub fn take_commands(&mut self) -> Vec<ListenerCommand> {
        std::mem::take(&mut self.outbox)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_is_idempotent() {
        let mut set = ListenerSet::new();
        set.attach(ListenerSlot::Wrapper, "mousedown");
        set.attach(ListenerSlot::Wrapper, "mousedown");
        assert_eq!(set.len(), 1);
        assert_eq!(
            set.take_commands(),
            vec![ListenerCommand::Attach {
                slot: ListenerSlot::Wrapper,
                event: "mousedown"
            }]
        );
        assert!(set.take_commands().is_empty());
    }

    #[test]
    fn detach_absent_emits_nothing() {
        let mut set = ListenerSet::new();
        set.detach(ListenerSlot::Document, "mousemove");
        assert!(set.take_commands().is_empty());
    }

    #[test]
    fn slots_are_distinct() {
        let mut set = ListenerSet::new();
        set.attach(ListenerSlot::Wrapper, "mousedown");
        assert!(set.is_listening(ListenerSlot::Wrapper, "mousedown"));
        assert!(!set.is_listening(ListenerSlot::Resizer, "mousedown"));
        assert!(!set.is_listening(ListenerSlot::Wrapper, "touchstart"));
    }

    #[test]
    fn detach_all_reports_each_listener() {
        let mut set = ListenerSet::new();
        set.attach(ListenerSlot::Wrapper, "mousedown");
        set.attach(ListenerSlot::Window, WINDOW_RESIZE_EVENT);
        let _ = set.take_commands();
        set.detach_all();
        assert!(set.is_empty());
        assert_eq!(
            set.take_commands(),
            vec![
                ListenerCommand::Detach {
                    slot: ListenerSlot::Wrapper,
                    event: "mousedown"
                },
                ListenerCommand::Detach {
                    slot: ListenerSlot::Window,
                    event: WINDOW_RESIZE_EVENT
                },
            ]
        );
    }
}
