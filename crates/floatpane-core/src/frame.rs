#![forbid(unsafe_code)]

//! Frame-coalesced scheduling for high-frequency pointer and resize input.
//!
//! Pointer `move` and window `resize` events can arrive many times per
//! display refresh. [`FrameScheduler`] keeps at most one pending motion
//! (latest wins) and one pending viewport check, and tells the caller when a
//! new animation frame must be requested. The host flushes the scheduler
//! from its animation-frame callback, so geometry is written at most once
//! per frame.
//!
//! # Usage
//!
//! ```
//! use floatpane_core::frame::FrameScheduler;
//!
//! let mut frames = FrameScheduler::<i32>::new();
//! assert!(frames.push_motion(1)); // first push requests a frame
//! assert!(!frames.push_motion(2)); // already requested, replaced
//!
//! let frame = frames.flush();
//! assert_eq!(frame.motion, Some(2));
//! assert!(!frame.viewport_check);
//! ```

/// Work collected for one animation frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame<M> {
    /// Run viewport reconciliation before applying motion.
    pub viewport_check: bool,
    /// Latest motion pushed during the frame.
    pub motion: Option<M>,
}

impl<M> Frame<M> {
    /// True if the frame carries no work.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.viewport_check && self.motion.is_none()
    }
}

/// Counters for coalescing behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Frames flushed with at least one unit of work.
    pub frames: u64,
    /// Motions dropped because a newer one replaced them.
    pub coalesced_motions: u64,
}

/// Latest-wins coalescer keyed to display refresh.
///
/// Not thread-safe; lives on the single event-processing thread.
#[derive(Debug, Clone)]
pub struct FrameScheduler<M> {
    pending_motion: Option<M>,
    pending_viewport_check: bool,
    frame_requested: bool,
    stats: FrameStats,
}

impl<M> Default for FrameScheduler<M> {
    fn default() -> Self {
        Self {
            pending_motion: None,
            pending_viewport_check: false,
            frame_requested: false,
            stats: FrameStats::default(),
        }
    }
}

impl<M> FrameScheduler<M> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a motion, replacing any pending one.
    ///
    /// Returns `true` if the caller must request an animation frame.
    pub fn push_motion(&mut self, motion: M) -> bool {
        if self.pending_motion.replace(motion).is_some() {
            self.stats.coalesced_motions = self.stats.coalesced_motions.saturating_add(1);
        }
        self.request()
    }

    /// Queue a viewport reconciliation.
    ///
    /// Returns `true` if the caller must request an animation frame.
    pub fn push_viewport_check(&mut self) -> bool {
        self.pending_viewport_check = true;
        self.request()
    }

    /// Take everything queued since the last flush.
    #[must_use]
    pub fn flush(&mut self) -> Frame<M> {
        self.frame_requested = false;
        let frame = Frame {
            viewport_check: std::mem::take(&mut self.pending_viewport_check),
            motion: self.pending_motion.take(),
        };
        if !frame.is_empty() {
            self.stats.frames = self.stats.frames.saturating_add(1);
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(
            target: "floatpane.frame",
            viewport_check = frame.viewport_check,
            motion = frame.motion.is_some(),
            "frame flushed"
        );
        frame
    }

    /// Drop all pending work without applying it.
    pub fn clear(&mut self) {
        self.pending_motion = None;
        self.pending_viewport_check = false;
        self.frame_requested = false;
    }

    /// True if a flush would produce work.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending_motion.is_some() || self.pending_viewport_check
    }

    /// True if a frame was requested and not yet flushed.
    #[must_use]
    pub const fn is_frame_requested(&self) -> bool {
        self.frame_requested
    }

    #[must_use]
    pub const fn stats(&self) -> FrameStats {
        self.stats
    }

    fn request(&mut self) -> bool {
        !std::mem::replace(&mut self.frame_requested, true)
    }
}
