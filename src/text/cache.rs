use std::collections::HashMap;

use crate::foundation::core::Rgba;
use crate::foundation::error::StrataResult;
use crate::text::oracle::{ShapedText, TextMetrics, TextOracle, TextRequest};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct MeasureKey {
    content: String,
    size_bits: u32,
    family: String,
    weight: u16,
}

impl MeasureKey {
    fn new(req: &TextRequest) -> Self {
        Self {
            content: req.content.clone(),
            size_bits: req.font_size.to_bits(),
            family: req.family.clone(),
            weight: req.weight,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct TextureKey {
    measure: MeasureKey,
    color: [u8; 4],
}

/// Hit/miss counters since construction (not reset by [`TextCache::clear`]).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextCacheStats {
    pub measure_hits: u64,
    pub measure_misses: u64,
    pub texture_hits: u64,
    pub texture_misses: u64,
}

/// Memoizes oracle calls for one DPR epoch.
///
/// Append-only: entries are never evicted individually, only dropped wholesale by
/// [`TextCache::clear`]. Failed oracle calls are not cached.
#[derive(Debug, Default)]
pub struct TextCache {
    measures: HashMap<MeasureKey, TextMetrics>,
    textures: HashMap<TextureKey, ShapedText>,
    stats: TextCacheStats,
    epoch: u64,
}

impl TextCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn measure(
        &mut self,
        oracle: &mut dyn TextOracle,
        req: &TextRequest,
    ) -> StrataResult<TextMetrics> {
        let key = MeasureKey::new(req);
        if let Some(m) = self.measures.get(&key) {
            self.stats.measure_hits += 1;
            tracing::trace!(content = %req.content, "text measure cache hit");
            return Ok(*m);
        }
        self.stats.measure_misses += 1;
        let m = oracle.measure_text(req)?;
        self.measures.insert(key, m);
        Ok(m)
    }

    pub fn texture(
        &mut self,
        oracle: &mut dyn TextOracle,
        req: &TextRequest,
        color: Rgba,
        dpr: f64,
    ) -> StrataResult<ShapedText> {
        let key = TextureKey {
            measure: MeasureKey::new(req),
            color: color.to_rgba8(),
        };
        if let Some(t) = self.textures.get(&key) {
            self.stats.texture_hits += 1;
            tracing::trace!(content = %req.content, "text texture cache hit");
            return Ok(*t);
        }
        self.stats.texture_misses += 1;
        let t = oracle.shape_to_texture(req, color, dpr)?;
        self.textures.insert(key, t);
        Ok(t)
    }

    /// Drop every entry and start a new epoch.
    pub fn clear(&mut self) {
        self.measures.clear();
        self.textures.clear();
        self.epoch += 1;
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn stats(&self) -> TextCacheStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.measures.len() + self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/cache.rs"]
mod tests;
