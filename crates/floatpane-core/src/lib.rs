#![forbid(unsafe_code)]

//! Core: pointer abstraction, geometry, surfaces, and frame scheduling.
//!
//! # Role in floatpane
//! `floatpane-core` holds everything the positioning engines share but that
//! carries no interaction policy of its own:
//!
//! - **Pointer abstraction**: one `down`/`move`/`up` trio over touch and
//!   mouse input, with names chosen from a device class.
//! - **Geometry**: integer pixel positions and sizes, with `Option` for
//!   "never set".
//! - **Directions**: resize handles tagged with the edges they drag.
//! - **Surfaces**: the trait hosts implement for the elements engines
//!   position, plus listener bookkeeping.
//! - **Frame scheduling**: latest-wins coalescing synchronized to display
//!   refresh.
//!
//! # How it fits in the system
//! The `floatpane` crate builds the panel and axis engines on top of these
//! pieces. Hosts (a wasm shell, a native toolkit) implement [`surface::Surface`]
//! and forward native events.

pub mod direction;
pub mod frame;
pub mod geometry;
pub mod listener;
pub mod pointer;
pub mod surface;

#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use direction::{Direction, Growth, HorizontalEdge, ResizeHandle, VerticalEdge};
pub use frame::{Frame, FrameScheduler, FrameStats};
pub use geometry::{PartialPosition, PartialSize, Position, Size, clamp_offset};
pub use listener::{ListenerCommand, ListenerSet, ListenerSlot, WINDOW_RESIZE_EVENT};
pub use pointer::{
    DeviceClass, EventTarget, PointerEvent, PointerEventNames, PointerPhase, PointerSample,
};
pub use surface::{DRAGGABLE_CLASS, NodeId, OVERLAY_ACTIVE_CLASS, StyleProperty, Surface, px};
