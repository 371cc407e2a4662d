#![forbid(unsafe_code)]

//! Geometric primitives in integer CSS pixels.
//!
//! Positions are offsets from the viewport's top-left corner. Unset values
//! are modelled with `Option` rather than sentinel numbers, so a surface that
//! legitimately sits at pixel `-1` is never confused with "never positioned".

/// A point in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Create a new position.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    #[inline]
    #[must_use]
    pub const fn offset_from(self, other: Position) -> Position {
        Position::new(
            self.x.saturating_sub(other.x),
            self.y.saturating_sub(other.y),
        )
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// Create a new size.
    #[inline]
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Fill this size's fields from a partial override.
    #[must_use]
    pub fn merged(self, partial: PartialSize) -> Size {
        Size {
            width: partial.width.unwrap_or(self.width),
            height: partial.height.unwrap_or(self.height),
        }
    }
}

/// A size whose dimensions may each be unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartialSize {
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl PartialSize {
    /// Both dimensions unset.
    pub const UNSET: Self = Self {
        width: None,
        height: None,
    };

    /// Both dimensions set.
    #[inline]
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
        }
    }

    /// True if at least one dimension has been set.
    #[inline]
    #[must_use]
    pub const fn is_any_set(&self) -> bool {
        self.width.is_some() || self.height.is_some()
    }

    /// Resolve unset dimensions to zero.
    #[inline]
    #[must_use]
    pub fn or_zero(self) -> Size {
        Size::default().merged(self)
    }
}

/// A position whose axes may each be unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PartialPosition {
    pub x: Option<i32>,
    pub y: Option<i32>,
}

impl PartialPosition {
    /// Both axes set.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }
}

/// Clamp a leading-edge offset into `[0, upper]`.
///
/// When the element is larger than the viewport `upper` is negative; the
/// lower bound wins so the element's origin stays on screen.
#[inline]
#[must_use]
pub fn clamp_offset(value: i32, upper: i32) -> i32 {
    value.min(upper).max(0)
}
