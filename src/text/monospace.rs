use crate::foundation::core::Rgba;
use crate::foundation::error::{StrataError, StrataResult};
use crate::scene::node::TEXT_PADDING;
use crate::text::oracle::{ShapedText, TextMetrics, TextOracle, TextRequest, TextureHandle};

/// Fixed-advance oracle for headless runs: every char is `advance * font_size` wide.
///
/// Textures are fingerprints of the request, so handles are stable across runs.
#[derive(Clone, Debug)]
pub struct MonospaceOracle {
    advance: f64,
    line_height: f64,
    measure_calls: u64,
    shape_calls: u64,
}

impl Default for MonospaceOracle {
    fn default() -> Self {
        Self::new(0.6, 1.2)
    }
}

impl MonospaceOracle {
    /// `advance` and `line_height` are ratios of the font size.
    pub fn new(advance: f64, line_height: f64) -> Self {
        Self {
            advance,
            line_height,
            measure_calls: 0,
            shape_calls: 0,
        }
    }

    pub fn measure_calls(&self) -> u64 {
        self.measure_calls
    }

    pub fn shape_calls(&self) -> u64 {
        self.shape_calls
    }

    fn metrics(&self, req: &TextRequest) -> StrataResult<TextMetrics> {
        if !req.font_size.is_finite() || req.font_size <= 0.0 {
            return Err(StrataError::text("font size must be finite and > 0"));
        }
        let size = f64::from(req.font_size);
        let mut lines = 0_usize;
        let mut widest = 0_usize;
        for line in req.content.split('\n') {
            lines += 1;
            widest = widest.max(line.chars().count());
        }
        Ok(TextMetrics {
            width: (widest as f64 * size * self.advance).ceil(),
            height: (lines as f64 * size * self.line_height).ceil(),
        })
    }
}

impl TextOracle for MonospaceOracle {
    fn measure_text(&mut self, req: &TextRequest) -> StrataResult<TextMetrics> {
        self.measure_calls += 1;
        self.metrics(req)
    }

    fn shape_to_texture(
        &mut self,
        req: &TextRequest,
        color: Rgba,
        _dpr: f64,
    ) -> StrataResult<ShapedText> {
        self.shape_calls += 1;
        let m = self.metrics(req)?;
        Ok(ShapedText {
            texture: TextureHandle(req.fingerprint(color)),
            width: m.width + TEXT_PADDING * 2.0,
            height: m.height + TEXT_PADDING * 2.0,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/monospace.rs"]
mod tests;
