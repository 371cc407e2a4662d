#![forbid(unsafe_code)]

//! In-memory [`Surface`] fake for engine tests.
//!
//! [`RecordingSurface`] behaves like a block element with a fixed natural
//! size: explicit `width`/`height` styles override the reported client size,
//! and every style write is recorded so tests can count geometry writes.

use std::collections::{BTreeMap, BTreeSet};

use crate::direction::ResizeHandle;
use crate::geometry::{Position, Size};
use crate::surface::{NodeId, StyleProperty, Surface};

#[derive(Debug, Clone)]
pub struct RecordingSurface {
    id: NodeId,
    natural_size: Size,
    origin: Position,
    styles: BTreeMap<StyleProperty, String>,
    classes: BTreeSet<String>,
    handles: Vec<ResizeHandle>,
    writes: Vec<(StyleProperty, Option<String>)>,
}

impl RecordingSurface {
    /// A surface with the given identity, natural size, and in-flow origin.
    #[must_use]
    pub fn new(id: u64, natural_size: Size, origin: Position) -> Self {
        Self {
            id: NodeId(id),
            natural_size,
            origin,
            styles: BTreeMap::new(),
            classes: BTreeSet::new(),
            handles: Vec::new(),
            writes: Vec::new(),
        }
    }

    /// Current inline value of a style property.
    #[must_use]
    pub fn style(&self, property: StyleProperty) -> Option<&str> {
        self.styles.get(&property).map(String::as_str)
    }

    /// True if no inline style is set.
    #[must_use]
    pub fn has_no_inline_style(&self) -> bool {
        self.styles.is_empty()
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Handles mounted by the engine.
    #[must_use]
    pub fn handles(&self) -> &[ResizeHandle] {
        &self.handles
    }

    /// Inline styles as a `style` attribute would read, e.g.
    /// `transform: translate(1px, 2px); width: 30px`.
    #[must_use]
    pub fn css_text(&self) -> String {
        self.styles
            .iter()
            .map(|(property, value)| format!("{}: {value}", property.css_name()))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Class of each mounted handle element, in mount order.
    #[must_use]
    pub fn handle_classes(&self) -> Vec<&'static str> {
        self.handles.iter().map(|h| h.class_name()).collect()
    }

    /// Every style write in order.
    #[must_use]
    pub fn writes(&self) -> &[(StyleProperty, Option<String>)] {
        &self.writes
    }

    /// Number of writes to one property.
    #[must_use]
    pub fn write_count(&self, property: StyleProperty) -> usize {
        self.writes.iter().filter(|(p, _)| *p == property).count()
    }

    /// Forget recorded writes, keeping current styles.
    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }

    /// Move the element in the document flow.
    pub fn set_origin(&mut self, origin: Position) {
        self.origin = origin;
    }

    fn styled_px(&self, property: StyleProperty) -> Option<i32> {
        self.styles
            .get(&property)
            .and_then(|v| v.strip_suffix("px"))
            .and_then(|v| v.parse().ok())
    }
}

impl Surface for RecordingSurface {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn client_size(&self) -> Size {
        Size::new(
            self.styled_px(StyleProperty::Width)
                .unwrap_or(self.natural_size.width),
            self.styled_px(StyleProperty::Height)
                .unwrap_or(self.natural_size.height),
        )
    }

    fn offset_size(&self) -> Size {
        self.client_size()
    }

    fn client_origin(&self) -> Position {
        self.origin
    }

    fn set_style(&mut self, property: StyleProperty, value: Option<String>) {
        self.writes.push((property, value.clone()));
        match value {
            Some(v) => {
                self.styles.insert(property, v);
            }
            None => {
                self.styles.remove(&property);
            }
        }
    }

    fn set_class(&mut self, class: &str, enabled: bool) {
        if enabled {
            self.classes.insert(class.to_owned());
        } else {
            self.classes.remove(class);
        }
    }

    fn mount_handles(&mut self, handles: &[ResizeHandle]) {
        self.handles = handles.to_vec();
    }
}
