#![forbid(unsafe_code)]

//! Host surfaces the engines read layout from and write inline styles to.
//!
//! A [`Surface`] is a thin view of one host element (a DOM node, a widget).
//! Engines only ever touch the handful of inline properties listed in
//! [`StyleProperty`] and toggle marker classes; everything else about the
//! element belongs to the host.

use crate::direction::ResizeHandle;
use crate::geometry::{Position, Size};

/// Stable identity of a host element, used for event-target comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// Inline style properties written by the engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleProperty {
    Transform,
    Width,
    Height,
    Top,
    Left,
    Position,
    UserSelect,
}

impl StyleProperty {
    /// CSS property name.
    #[must_use]
    pub const fn css_name(self) -> &'static str {
        match self {
            Self::Transform => "transform",
            Self::Width => "width",
            Self::Height => "height",
            Self::Top => "top",
            Self::Left => "left",
            Self::Position => "position",
            Self::UserSelect => "user-select",
        }
    }
}

/// Class added to the overlay while a session is active.
pub const OVERLAY_ACTIVE_CLASS: &str = "active";

/// Class added to the wrapper while it floats.
pub const DRAGGABLE_CLASS: &str = "draggable";

/// One host element bound to an engine.
pub trait Surface {
    /// Identity used to compare against [`crate::pointer::EventTarget`].
    fn node_id(&self) -> NodeId;

    /// Inner box size (`clientWidth`/`clientHeight`).
    fn client_size(&self) -> Size;

    /// Border box size (`offsetWidth`/`offsetHeight`).
    fn offset_size(&self) -> Size;

    /// Top-left corner of the bounding client rect.
    fn client_origin(&self) -> Position;

    /// Set an inline style property; `None` clears it.
    fn set_style(&mut self, property: StyleProperty, value: Option<String>);

    /// Add or remove a class.
    fn set_class(&mut self, class: &str, enabled: bool);

    /// Replace the element's children with the given resize handles.
    ///
    /// Only called on resizer containers.
    fn mount_handles(&mut self, handles: &[ResizeHandle]) {
        let _ = handles;
    }
}

/// Format a pixel value for an inline style.
#[inline]
#[must_use]
pub fn px(value: i32) -> String {
    format!("{value}px")
}
