//! Measure (bottom-up) and layout (top-down) passes over a [`crate::SceneTree`].

pub mod arrange;
pub mod measure;

use crate::pixel::policy::PixelConfig;
use crate::text::cache::TextCache;
use crate::text::oracle::TextOracle;

/// Per-pass counters, reset for every context.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Nodes whose measured size was recomputed.
    pub measured: usize,
    /// Nodes whose rect was recomputed.
    pub laid_out: usize,
    /// Text leaves whose measurement fell back to zero size.
    pub degraded_text: usize,
}

/// State threaded through measure and layout.
pub struct PassCtx<'a> {
    pub pixel: PixelConfig,
    pub cache: &'a mut TextCache,
    pub oracle: &'a mut dyn TextOracle,
    pub stats: PassStats,
}

impl<'a> PassCtx<'a> {
    pub fn new(pixel: PixelConfig, cache: &'a mut TextCache, oracle: &'a mut dyn TextOracle) -> Self {
        Self {
            pixel,
            cache,
            oracle,
            stats: PassStats::default(),
        }
    }
}
