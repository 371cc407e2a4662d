#![forbid(unsafe_code)]

//! Resize handles and the edges they drag.
//!
//! Each handle mounted into a resizer carries an explicit [`ResizeHandle`]
//! tag. The tag maps to a [`Direction`]: an optional vertical edge paired
//! with an optional horizontal edge. Corner handles name both edges, side
//! handles name one.
//!
//! # Growth
//!
//! Dragging a `right` or `bottom` edge away from the anchor grows the
//! dimension; dragging a `left` or `top` edge in the positive direction
//! shrinks it (and, for a floating surface, moves its origin). See
//! [`Direction::growth`] for the exact table.

/// Vertical edge of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalEdge {
    Top,
    Bottom,
}

/// Horizontal edge of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalEdge {
    Left,
    Right,
}

/// Edge pair dragged by a resize handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Direction {
    pub vertical: Option<VerticalEdge>,
    pub horizontal: Option<HorizontalEdge>,
}

/// Which dimensions grow when the pointer moves in the positive direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Growth {
    pub width: bool,
    pub height: bool,
}

impl Direction {
    /// Direction with no edges. Treated as growing on both axes.
    pub const NONE: Self = Self {
        vertical: None,
        horizontal: None,
    };

    #[inline]
    #[must_use]
    pub const fn new(vertical: Option<VerticalEdge>, horizontal: Option<HorizontalEdge>) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }

    /// True for handles that only touch a top/bottom edge.
    #[inline]
    #[must_use]
    pub const fn is_vertical_only(&self) -> bool {
        self.vertical.is_some() && self.horizontal.is_none()
    }

    /// True for handles that only touch a left/right edge.
    #[inline]
    #[must_use]
    pub const fn is_horizontal_only(&self) -> bool {
        self.horizontal.is_some() && self.vertical.is_none()
    }

    /// Growth mapping for this direction.
    #[must_use]
    pub const fn growth(&self) -> Growth {
        use HorizontalEdge::{Left, Right};
        use VerticalEdge::{Bottom, Top};

        let (width, height) = match (self.vertical, self.horizontal) {
            (Some(Top), Some(Left)) | (None, Some(Left)) | (Some(Top), None) => (false, false),
            (Some(Top), Some(Right)) => (true, false),
            (Some(Bottom), Some(Left)) => (false, true),
            _ => (true, true),
        };
        Growth { width, height }
    }
}

/// Resize handle mounted inside a resizer container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    T,
    L,
    B,
    R,
    Tl,
    Tr,
    Bl,
    Br,
}

impl ResizeHandle {
    /// Every handle, in mount order: sides first, then corners.
    pub const ALL: [ResizeHandle; 8] = [
        Self::T,
        Self::L,
        Self::B,
        Self::R,
        Self::Tl,
        Self::Tr,
        Self::Bl,
        Self::Br,
    ];

    /// Edges dragged by this handle.
    #[must_use]
    pub const fn direction(self) -> Direction {
        use HorizontalEdge::{Left, Right};
        use VerticalEdge::{Bottom, Top};

        match self {
            Self::T => Direction::new(Some(Top), None),
            Self::L => Direction::new(None, Some(Left)),
            Self::B => Direction::new(Some(Bottom), None),
            Self::R => Direction::new(None, Some(Right)),
            Self::Tl => Direction::new(Some(Top), Some(Left)),
            Self::Tr => Direction::new(Some(Top), Some(Right)),
            Self::Bl => Direction::new(Some(Bottom), Some(Left)),
            Self::Br => Direction::new(Some(Bottom), Some(Right)),
        }
    }

    /// True for the four corner handles.
    #[inline]
    #[must_use]
    pub const fn is_corner(self) -> bool {
        matches!(self, Self::Tl | Self::Tr | Self::Bl | Self::Br)
    }

    /// Class suffix used by hosts that style handles (`resizer-tl`, ...).
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::T => "resizer-t",
            Self::L => "resizer-l",
            Self::B => "resizer-b",
            Self::R => "resizer-r",
            Self::Tl => "resizer-tl",
            Self::Tr => "resizer-tr",
            Self::Bl => "resizer-bl",
            Self::Br => "resizer-br",
        }
    }
}

impl From<Option<ResizeHandle>> for Direction {
    fn from(handle: Option<ResizeHandle>) -> Self {
        handle.map_or(Direction::NONE, ResizeHandle::direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn growth(handle: ResizeHandle) -> (bool, bool) {
        let g = handle.direction().growth();
        (g.width, g.height)
    }

    #[test]
    fn growth_table() {
        assert_eq!(growth(ResizeHandle::Tl), (false, false));
        assert_eq!(growth(ResizeHandle::L), (false, false));
        assert_eq!(growth(ResizeHandle::T), (false, false));
        assert_eq!(growth(ResizeHandle::Tr), (true, false));
        assert_eq!(growth(ResizeHandle::Bl), (false, true));
        assert_eq!(growth(ResizeHandle::Br), (true, true));
        assert_eq!(growth(ResizeHandle::R), (true, true));
        assert_eq!(growth(ResizeHandle::B), (true, true));
    }

    #[test]
    fn missing_handle_grows_both_axes() {
        let dir = Direction::from(None);
        assert_eq!(dir, Direction::NONE);
        assert_eq!(
            dir.growth(),
            Growth {
                width: true,
                height: true
            }
        );
    }

    #[test]
    fn side_handles_name_one_edge() {
        assert!(ResizeHandle::T.direction().is_vertical_only());
        assert!(ResizeHandle::B.direction().is_vertical_only());
        assert!(ResizeHandle::L.direction().is_horizontal_only());
        assert!(ResizeHandle::R.direction().is_horizontal_only());
        for corner in [
            ResizeHandle::Tl,
            ResizeHandle::Tr,
            ResizeHandle::Bl,
            ResizeHandle::Br,
        ] {
            assert!(corner.is_corner());
            let dir = corner.direction();
            assert!(!dir.is_vertical_only() && !dir.is_horizontal_only());
        }
    }

    #[test]
    fn class_names_are_unique() {
        let mut names: Vec<_> = ResizeHandle::ALL.iter().map(|h| h.class_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ResizeHandle::ALL.len());
    }
}
