use crate::foundation::core::{Rect, Rgba, Size};
use crate::scene::dirty::Dirty;
use crate::scene::style::Style;
use crate::text::oracle::{ShapedText, TextRequest};

/// Fixed padding added on every side of a shaped text run.
pub const TEXT_PADDING: f64 = 4.0;
pub const DEFAULT_FONT_SIZE: f32 = 16.0;
pub const DEFAULT_FONT_FAMILY: &str = "system-ui,-apple-system,sans-serif";
pub const DEFAULT_FONT_WEIGHT: u16 = 400;

/// Generational handle of a node inside a [`crate::SceneTree`].
///
/// Handles outlive the nodes they point at; a stale handle simply resolves to nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl NodeId {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub(crate) fn idx(self) -> usize {
        self.index as usize
    }

    pub fn index(self) -> u32 {
        self.index
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// A text run: the only leaf kind. Measured and shaped through a [`crate::TextOracle`].
#[derive(Clone, Debug, PartialEq)]
pub struct TextLeaf {
    pub content: String,
    pub font_size: f32,
    /// CSS-style comma separated family list.
    pub family: String,
    /// Weight in the 100..=900 range.
    pub weight: u16,
    pub color: Rgba,
    pub(crate) texture: Option<ShapedText>,
    pub(crate) degraded: bool,
}

impl TextLeaf {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            font_size: DEFAULT_FONT_SIZE,
            family: DEFAULT_FONT_FAMILY.to_owned(),
            weight: DEFAULT_FONT_WEIGHT,
            color: Rgba::BLACK,
            texture: None,
            degraded: false,
        }
    }

    pub fn request(&self) -> TextRequest {
        TextRequest {
            content: self.content.clone(),
            font_size: self.font_size,
            family: self.family.clone(),
            weight: self.weight,
        }
    }

    /// Shaped texture currently bound to this leaf, if painted since the last text change.
    pub fn texture(&self) -> Option<&ShapedText> {
        self.texture.as_ref()
    }

    /// True when the last measurement could not reach the oracle.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }
}

/// Clamp a numeric weight into 100..=900.
pub fn clamp_font_weight(weight: u16) -> u16 {
    weight.clamp(100, 900)
}

/// Parse CSS-ish weight names (`normal`, `bold`, `600`); unknown values map to 400.
pub fn parse_font_weight(s: &str) -> u16 {
    let s = s.trim().to_ascii_lowercase();
    match s.as_str() {
        "thin" | "hairline" => 100,
        "extra-light" | "extralight" | "ultra-light" => 200,
        "light" => 300,
        "normal" | "regular" => 400,
        "medium" => 500,
        "semi-bold" | "semibold" | "demi-bold" => 600,
        "bold" => 700,
        "extra-bold" | "extrabold" | "ultra-bold" => 800,
        "black" | "heavy" => 900,
        other => match other.parse::<u16>() {
            Ok(w) => clamp_font_weight(w),
            Err(_) => {
                tracing::warn!(value = other, "unknown font weight, using 400");
                DEFAULT_FONT_WEIGHT
            }
        },
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Box,
    Text(TextLeaf),
}

/// Offer received from the parent during the last layout: `(x, y, available_w, available_h)`.
pub(crate) type Offer = [f64; 4];

/// Layout and paint unit stored in the arena.
#[derive(Clone, Debug)]
pub struct Node {
    pub(crate) style: Style,
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) measured: Size,
    pub(crate) rect: Rect,
    pub(crate) last_offer: Option<Offer>,
    pub(crate) dirty: Dirty,
}

impl Node {
    pub(crate) fn new(kind: NodeKind) -> Self {
        Self {
            style: Style::default(),
            kind,
            parent: None,
            children: Vec::new(),
            measured: Size::ZERO,
            rect: Rect::ZERO,
            last_offer: None,
            dirty: Dirty::all(),
        }
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Intrinsic size; valid while MEASURE is clear.
    pub fn measured(&self) -> Size {
        self.measured
    }

    /// Resolved rect in logical pixels; valid while LAYOUT is clear.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn dirty(&self) -> Dirty {
        self.dirty
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text(_))
    }

    pub fn text(&self) -> Option<&TextLeaf> {
        match &self.kind {
            NodeKind::Text(t) => Some(t),
            NodeKind::Box => None,
        }
    }

    pub(crate) fn text_mut(&mut self) -> Option<&mut TextLeaf> {
        match &mut self.kind {
            NodeKind::Text(t) => Some(t),
            NodeKind::Box => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/node.rs"]
mod tests;
