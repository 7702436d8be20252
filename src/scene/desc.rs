use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::Rgba;
use crate::foundation::error::{StrataError, StrataResult};
use crate::scene::node::{NodeId, parse_font_weight};
use crate::scene::style::{Align, Frame, Justify, LayoutMode, MaxExtent};
use crate::scene::tree::SceneTree;

/// JSON-facing description of a node tree.
///
/// ```json
/// { "type": "box", "direction": "horizontal", "padding": 10,
///   "children": [ { "type": "text", "content": "hi", "color": [255, 0, 0] } ] }
/// ```
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SceneDesc {
    Box(BoxDesc),
    Text(TextDesc),
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct BoxDesc {
    /// Optional name, reported back by [`SceneDesc::build_named`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub direction: LayoutMode,
    #[serde(default)]
    pub spacing: f64,
    #[serde(default)]
    pub justify: Justify,
    /// Single-value alignment (cross axis, or both axes for stacks).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align_x: Option<Align>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align_y: Option<Align>,
    #[serde(flatten)]
    pub frame: Frame,
    #[serde(default)]
    pub padding: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<ColorDesc>,
    #[serde(default)]
    pub corner_radius: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pixel_snap: Option<bool>,
    #[serde(default)]
    pub children: Vec<SceneDesc>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct TextDesc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<WeightDesc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorDesc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<MaxExtent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_height: Option<MaxExtent>,
}

/// `[r, g, b]` or `[r, g, b, a]`: 0-255 channels, 0-1 alpha.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ColorDesc {
    Rgb([f64; 3]),
    Rgba([f64; 4]),
}

impl ColorDesc {
    pub fn to_rgba(self) -> Rgba {
        fn channel(v: f64) -> u8 {
            if v.is_nan() {
                0
            } else {
                v.round().clamp(0.0, 255.0) as u8
            }
        }
        let [r, g, b, a] = match self {
            Self::Rgb([r, g, b]) => [r, g, b, 1.0],
            Self::Rgba(c) => c,
        };
        Rgba::from_rgb8_alpha(channel(r), channel(g), channel(b), a as f32)
    }
}

/// Numeric weight or a CSS-style name (`"bold"`).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum WeightDesc {
    Numeric(u16),
    Named(String),
}

impl WeightDesc {
    pub fn resolve(&self) -> u16 {
        match self {
            Self::Numeric(w) => crate::scene::node::clamp_font_weight(*w),
            Self::Named(name) => parse_font_weight(name),
        }
    }
}

/// Result of [`SceneDesc::build_named`].
#[derive(Clone, Debug, PartialEq)]
pub struct BuiltScene {
    pub root: NodeId,
    /// Named nodes (those with an `id`), in name order.
    pub names: BTreeMap<String, NodeId>,
}

impl SceneDesc {
    pub fn from_reader<R: std::io::Read>(r: R) -> StrataResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| StrataError::serde(format!("parse scene JSON: {e}")))
    }

    pub fn from_json(s: &str) -> StrataResult<Self> {
        serde_json::from_str(s).map_err(|e| StrataError::serde(format!("parse scene JSON: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> StrataResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            StrataError::validation(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn to_json_pretty(&self) -> StrataResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn id(&self) -> Option<&str> {
        match self {
            Self::Box(b) => b.id.as_deref(),
            Self::Text(t) => t.id.as_deref(),
        }
    }

    /// Structural checks that soft style parsing cannot express: ids must be unique and
    /// non-empty, lengths must be finite.
    pub fn validate(&self) -> StrataResult<()> {
        let mut seen = HashSet::new();
        let mut stack = vec![self];
        while let Some(desc) = stack.pop() {
            if let Some(id) = desc.id() {
                if id.trim().is_empty() {
                    return Err(StrataError::validation("node id must be non-empty"));
                }
                if !seen.insert(id) {
                    return Err(StrataError::validation(format!("duplicate node id '{id}'")));
                }
            }
            match desc {
                Self::Box(b) => {
                    for (name, v) in [
                        ("spacing", b.spacing),
                        ("padding", b.padding),
                        ("corner_radius", b.corner_radius),
                    ] {
                        if !v.is_finite() {
                            return Err(StrataError::validation(format!(
                                "box {name} must be finite"
                            )));
                        }
                    }
                    stack.extend(b.children.iter());
                }
                Self::Text(t) => {
                    if let Some(size) = t.font_size
                        && !size.is_finite()
                    {
                        return Err(StrataError::validation("text font_size must be finite"));
                    }
                }
            }
        }
        Ok(())
    }

    /// Create the described nodes in `tree` and return the top node (not made root).
    pub fn build(&self, tree: &mut SceneTree) -> NodeId {
        let mut names = BTreeMap::new();
        self.build_into(tree, &mut names)
    }

    #[tracing::instrument(skip_all)]
    pub fn build_named(&self, tree: &mut SceneTree) -> BuiltScene {
        let mut names = BTreeMap::new();
        let root = self.build_into(tree, &mut names);
        tracing::debug!(nodes = tree.len(), named = names.len(), "built scene");
        BuiltScene { root, names }
    }

    fn build_into(&self, tree: &mut SceneTree, names: &mut BTreeMap<String, NodeId>) -> NodeId {
        let id = match self {
            Self::Box(b) => {
                let children: Vec<NodeId> = b
                    .children
                    .iter()
                    .map(|c| c.build_into(tree, names))
                    .collect();
                let id = tree.create_box();
                let mut edit = tree
                    .edit(id)
                    .direction(b.direction)
                    .spacing(b.spacing)
                    .justify(b.justify)
                    .frame_with(b.frame)
                    .padding(b.padding)
                    .corner_radius(b.corner_radius);
                if let Some(a) = b.align {
                    edit = edit.align(a);
                }
                if let Some(x) = b.align_x {
                    edit = edit.align_x(x);
                }
                if let Some(y) = b.align_y {
                    edit = edit.align_y(y);
                }
                if let Some(bg) = b.background {
                    edit = edit.background(bg.to_rgba());
                }
                if let Some(snap) = b.pixel_snap {
                    edit = edit.pixel_snap(snap);
                }
                edit.children(&children);
                id
            }
            Self::Text(t) => {
                let id = tree.create_text(t.content.clone());
                let mut edit = tree.edit(id);
                if t.font_size.is_some() || t.family.is_some() {
                    let size = t
                        .font_size
                        .unwrap_or(crate::scene::node::DEFAULT_FONT_SIZE);
                    edit = edit.font(size, t.family.as_deref());
                }
                if let Some(w) = &t.weight {
                    edit = edit.font_weight(w.resolve());
                }
                if let Some(c) = t.color {
                    edit = edit.color(c.to_rgba());
                }
                if t.max_width.is_some() || t.max_height.is_some() {
                    edit.max_size(
                        t.max_width.unwrap_or_default(),
                        t.max_height.unwrap_or_default(),
                    );
                }
                id
            }
        };
        if let Some(name) = self.id() {
            names.insert(name.to_owned(), id);
        }
        id
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/desc.rs"]
mod tests;
