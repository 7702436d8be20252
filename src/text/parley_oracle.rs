use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::core::Rgba;
use crate::foundation::error::{StrataError, StrataResult};
use crate::scene::node::TEXT_PADDING;
use crate::text::oracle::{ShapedText, TextMetrics, TextOracle, TextRequest, TextureHandle};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color carried through Parley layouts.
pub struct TextBrush {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl From<Rgba> for TextBrush {
    fn from(value: Rgba) -> Self {
        let [r, g, b, a] = value.to_rgba8();
        Self { r, g, b, a }
    }
}

#[derive(Clone)]
/// A shaped run retained by [`ParleyTextOracle`] and addressed by its [`TextureHandle`].
pub struct ShapedLayout {
    pub layout: Arc<parley::Layout<TextBrush>>,
    /// Device pixel ratio the layout was shaped at.
    pub dpr: f64,
}

impl std::fmt::Debug for ShapedLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapedLayout")
            .field("layout_ptr", &Arc::as_ptr(&self.layout))
            .field("dpr", &self.dpr)
            .finish()
    }
}

/// Text oracle backed by Parley shaping over explicitly registered font bytes.
///
/// No system fonts are consulted. A request's family list is matched against the registered
/// families (case-insensitive); unmatched lists fall back to the first registered family.
///
/// Handles are never reused, including across [`TextOracle::release_textures`].
pub struct ParleyTextOracle {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
    families: Vec<String>,
    shaped: HashMap<u64, ShapedLayout>,
    next_handle: u64,
}

impl Default for ParleyTextOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl ParleyTextOracle {
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            families: Vec::new(),
            shaped: HashMap::new(),
            next_handle: 0,
        }
    }

    /// Build an oracle with a single font loaded from disk.
    pub fn from_font_file(path: impl AsRef<Path>) -> StrataResult<Self> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        let mut oracle = Self::new();
        oracle.register_font(&bytes)?;
        Ok(oracle)
    }

    /// Register font bytes and return the primary family name they provide.
    pub fn register_font(&mut self, font_bytes: &[u8]) -> StrataResult<String> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| StrataError::validation("no font families registered from font bytes"))?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| StrataError::validation("registered font family has no name"))?
            .to_string();
        if !self.families.contains(&family_name) {
            tracing::debug!(family = %family_name, "registered font family");
            self.families.push(family_name.clone());
        }
        Ok(family_name)
    }

    pub fn families(&self) -> &[String] {
        &self.families
    }

    /// Shaped layout behind a handle returned by `shape_to_texture`.
    pub fn texture(&self, handle: TextureHandle) -> Option<&ShapedLayout> {
        self.shaped.get(&handle.0)
    }

    fn resolve_family(&self, list: &str) -> StrataResult<String> {
        for wanted in list.split(',') {
            let wanted = wanted.trim().trim_matches(|c| c == '"' || c == '\'');
            if let Some(found) = self
                .families
                .iter()
                .find(|f| f.eq_ignore_ascii_case(wanted))
            {
                return Ok(found.clone());
            }
        }
        self.families
            .first()
            .cloned()
            .ok_or_else(|| StrataError::text("no fonts registered with the text oracle"))
    }

    fn layout(
        &mut self,
        req: &TextRequest,
        scale: f32,
        brush: TextBrush,
    ) -> StrataResult<parley::Layout<TextBrush>> {
        if !req.font_size.is_finite() || req.font_size <= 0.0 {
            return Err(StrataError::text("font size must be finite and > 0"));
        }
        let family_name = self.resolve_family(&req.family)?;

        let mut builder =
            self.layout_ctx
                .ranged_builder(&mut self.font_ctx, &req.content, scale, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(req.font_size));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::new(f32::from(req.weight)),
        ));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrush> = builder.build(&req.content);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

impl TextOracle for ParleyTextOracle {
    fn measure_text(&mut self, req: &TextRequest) -> StrataResult<TextMetrics> {
        let layout = self.layout(req, 1.0, TextBrush::default())?;
        Ok(TextMetrics {
            width: f64::from(layout.width()).ceil(),
            height: f64::from(layout.height()).ceil(),
        })
    }

    fn shape_to_texture(
        &mut self,
        req: &TextRequest,
        color: Rgba,
        dpr: f64,
    ) -> StrataResult<ShapedText> {
        let layout = self.layout(req, dpr as f32, TextBrush::from(color))?;
        let scale = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        // Layout dimensions are in device pixels at `scale`.
        let width = (f64::from(layout.width()) / scale).ceil() + TEXT_PADDING * 2.0;
        let height = (f64::from(layout.height()) / scale).ceil() + TEXT_PADDING * 2.0;

        let handle = TextureHandle(self.next_handle);
        self.next_handle += 1;
        self.shaped.insert(
            handle.0,
            ShapedLayout {
                layout: Arc::new(layout),
                dpr: scale,
            },
        );
        Ok(ShapedText {
            texture: handle,
            width,
            height,
        })
    }

    fn release_textures(&mut self) {
        self.shaped.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/parley_oracle.rs"]
mod tests;
