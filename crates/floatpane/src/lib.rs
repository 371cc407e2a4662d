#![forbid(unsafe_code)]

//! `floatpane` positions panel-like surfaces under pointer control.
//!
//! Two engines are provided:
//! - [`PanelEngine`]: drag by the body, resize from eight handles, and toggle
//!   between in-flow and viewport-anchored layout while remembering the
//!   floating geometry.
//! - [`AxisDragEngine`]: vertical-only drag that tells a click from a move.
//!
//! Both are host-driven. The embedding environment forwards native events
//! through `dispatch_*`, mirrors the returned [`ListenerCommand`]s onto real
//! listeners, and calls `on_animation_frame` when a dispatch asks for a frame.
//! Nothing here touches a real DOM; elements are reached through the
//! [`Surface`] trait.
//!
//! # Example
//!
//! ```ignore
//! let mut panel = PanelEngine::new(surfaces, names, PanelConfig::default(), None, PanelEvents::new());
//! host.apply(panel.take_listener_commands());
//! panel.static_to_fixed(&ToggleOptions::default());
//!
//! let dispatch = panel.dispatch_pointer(ListenerSlot::Wrapper, &event);
//! host.apply(dispatch.listener_commands);
//! if dispatch.request_frame {
//!     host.request_animation_frame();
//! }
//! ```

pub mod axis;
pub mod config;
pub mod dispatch;
pub mod panel;

pub use axis::AxisDragEngine;
pub use config::{AxisConfig, ConfigError, DEFAULT_VIEWPORT, PanelConfig};
pub use dispatch::{Dispatch, DispatchOutcome, FrameReport, IgnoredReason, SessionKind};
pub use panel::{
    CanDrag, GeometrySnapshot, LayoutMode, PanelEngine, PanelEvents, Surfaces, ToggleOffset,
    ToggleOptions,
};

pub use floatpane_core::{
    DeviceClass, EventTarget, ListenerCommand, ListenerSlot, NodeId, PartialPosition,
    PartialSize, PointerEvent, PointerEventNames, Position, ResizeHandle, Size, StyleProperty,
    Surface,
};
