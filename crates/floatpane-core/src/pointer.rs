#![forbid(unsafe_code)]

//! Pointer abstraction: one logical `down`/`move`/`up` trio for touch and
//! mouse input.
//!
//! The native event names are picked once from a [`DeviceClass`] and carried
//! by value in [`PointerEventNames`]. Engines receive the names at
//! construction; nothing here reads global state, so tests can simulate
//! either device class side by side.
//!
//! # Usage
//!
//! ```
//! use floatpane_core::pointer::{DeviceClass, PointerEventNames};
//!
//! let class = DeviceClass::from_user_agent("Mozilla/5.0 (iPhone) Mobile/15E148");
//! let names = PointerEventNames::for_device(class);
//! assert_eq!(names.down, "touchstart");
//! ```

use crate::direction::ResizeHandle;
use crate::geometry::Position;
use crate::surface::NodeId;

/// Coarse input device class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceClass {
    #[default]
    Desktop,
    Mobile,
}

impl DeviceClass {
    /// Classify a user-agent string: any `mobi` substring (case-insensitive)
    /// selects [`DeviceClass::Mobile`].
    #[must_use]
    pub fn from_user_agent(user_agent: &str) -> Self {
        if user_agent.to_lowercase().contains("mobi") {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }
}

/// Native event names backing the logical pointer trio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerEventNames {
    pub down: &'static str,
    pub move_: &'static str,
    pub up: &'static str,
}

impl PointerEventNames {
    pub const MOUSE: Self = Self {
        down: "mousedown",
        move_: "mousemove",
        up: "mouseup",
    };

    pub const TOUCH: Self = Self {
        down: "touchstart",
        move_: "touchmove",
        up: "touchend",
    };

    /// Name trio for a device class.
    #[must_use]
    pub const fn for_device(class: DeviceClass) -> Self {
        match class {
            DeviceClass::Desktop => Self::MOUSE,
            DeviceClass::Mobile => Self::TOUCH,
        }
    }

    /// Map a native name back to its logical phase.
    #[must_use]
    pub fn phase_of(&self, name: &str) -> Option<PointerPhase> {
        if name == self.down {
            Some(PointerPhase::Down)
        } else if name == self.move_ {
            Some(PointerPhase::Move)
        } else if name == self.up {
            Some(PointerPhase::Up)
        } else {
            None
        }
    }

    /// Native name for a logical phase.
    #[must_use]
    pub const fn name_of(&self, phase: PointerPhase) -> &'static str {
        match phase {
            PointerPhase::Down => self.down,
            PointerPhase::Move => self.move_,
            PointerPhase::Up => self.up,
        }
    }
}

impl Default for PointerEventNames {
    fn default() -> Self {
        Self::for_device(DeviceClass::default())
    }
}

/// Logical pointer phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// Coordinates carried by a native pointer event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerSample {
    /// Mouse event client coordinates.
    Mouse { client: Position },
    /// Active touch points, in platform order.
    Touch { touches: Vec<Position> },
}

impl PointerSample {
    /// Client position of the tracked pointer: the first touch point, or
    /// the mouse position. `None` for a touch event with no touches left.
    #[must_use]
    pub fn client_position(&self) -> Option<Position> {
        match self {
            Self::Mouse { client } => Some(*client),
            Self::Touch { touches } => touches.first().copied(),
        }
    }
}

/// Element an event was originally fired on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventTarget {
    pub node: NodeId,
    /// Tag of the resize handle hit, if the target is one.
    pub handle: Option<ResizeHandle>,
}

impl EventTarget {
    #[must_use]
    pub const fn node(node: NodeId) -> Self {
        Self { node, handle: None }
    }

    #[must_use]
    pub const fn handle(node: NodeId, handle: ResizeHandle) -> Self {
        Self {
            node,
            handle: Some(handle),
        }
    }
}

/// A native pointer event forwarded by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerEvent {
    /// Native event name (`mousedown`, `touchmove`, ...).
    pub name: &'static str,
    pub target: EventTarget,
    pub sample: PointerSample,
}

impl PointerEvent {
    /// Build a mouse event with the given native name.
    #[must_use]
    pub fn mouse(name: &'static str, target: EventTarget, x: i32, y: i32) -> Self {
        Self {
            name,
            target,
            sample: PointerSample::Mouse {
                client: Position::new(x, y),
            },
        }
    }

    /// Build a touch event tracking one finger.
    #[must_use]
    pub fn touch(name: &'static str, target: EventTarget, x: i32, y: i32) -> Self {
        Self {
            name,
            target,
            sample: PointerSample::Touch {
                touches: vec![Position::new(x, y)],
            },
        }
    }

    #[inline]
    #[must_use]
    pub fn client_position(&self) -> Option<Position> {
        self.sample.client_position()
    }
}
