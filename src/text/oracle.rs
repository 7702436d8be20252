use crate::foundation::core::Rgba;
use crate::foundation::error::StrataResult;
use crate::foundation::math::Fnv1a64;

/// Opaque handle to a shaped text resource owned by an oracle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(pub u64);

/// Everything that determines a text run's measured size.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRequest {
    pub content: String,
    pub font_size: f32,
    pub family: String,
    pub weight: u16,
}

impl TextRequest {
    pub fn new(content: impl Into<String>, font_size: f32) -> Self {
        Self {
            content: content.into(),
            font_size,
            family: crate::scene::node::DEFAULT_FONT_FAMILY.to_owned(),
            weight: crate::scene::node::DEFAULT_FONT_WEIGHT,
        }
    }

    /// Stable 64-bit fingerprint of the request plus paint color.
    pub fn fingerprint(&self, color: Rgba) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_str(&self.content);
        h.write_u32(self.font_size.to_bits());
        h.write_str(&self.family);
        h.write_u32(u32::from(self.weight));
        h.write_bytes(&color.to_rgba8());
        h.finish()
    }
}

/// Unpadded size of a shaped run in logical pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
}

/// Result of shaping a run for paint: a texture plus its padded logical size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapedText {
    pub texture: TextureHandle,
    pub width: f64,
    pub height: f64,
}

/// External text measurement and shaping service.
///
/// Both calls must be pure per key: the same request (and color) always yields the same output,
/// which is what lets [`crate::TextCache`] memoize them for a whole DPR epoch.
pub trait TextOracle {
    fn measure_text(&mut self, req: &TextRequest) -> StrataResult<TextMetrics>;

    fn shape_to_texture(
        &mut self,
        req: &TextRequest,
        color: Rgba,
        dpr: f64,
    ) -> StrataResult<ShapedText>;

    /// Drop every shaped resource; called when the DPR changes.
    fn release_textures(&mut self) {}
}

#[cfg(test)]
#[path = "../../tests/unit/text/oracle.rs"]
mod tests;
