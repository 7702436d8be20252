use crate::foundation::core::{Rgba, Viewport};
use crate::foundation::error::{StrataError, StrataResult};
use crate::render::vertices::{RECT_QUAD_FLOATS, TEXT_QUAD_FLOATS};
use crate::text::oracle::TextureHandle;

/// Consumer of assembled frame buffers (a GPU pipeline, a recorder, ...).
///
/// Calls arrive as `begin_frame`, one `draw_rects`, any number of `draw_text`, then `end_frame`.
pub trait PaintBackend {
    fn begin_frame(&mut self, viewport: Viewport, clear: Rgba) -> StrataResult<()>;

    /// Every box background of the frame, in paint order.
    fn draw_rects(&mut self, vertices: &[f32]) -> StrataResult<()>;

    /// One textured quad.
    fn draw_text(&mut self, texture: TextureHandle, vertices: &[f32]) -> StrataResult<()>;

    fn end_frame(&mut self) -> StrataResult<()>;
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordedFrame {
    pub viewport: Option<Viewport>,
    pub clear: Option<Rgba>,
    pub rect_vertices: Vec<f32>,
    pub text_draws: Vec<(TextureHandle, Vec<f32>)>,
}

impl RecordedFrame {
    pub fn rect_count(&self) -> usize {
        self.rect_vertices.len() / RECT_QUAD_FLOATS
    }

    pub fn text_count(&self) -> usize {
        self.text_draws.len()
    }
}

/// In-memory backend keeping the most recently completed frame.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    current: Option<RecordedFrame>,
    last: Option<RecordedFrame>,
    frames: u64,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> Option<&RecordedFrame> {
        self.last.as_ref()
    }

    /// Completed frames since construction.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Abandon the frame in progress after a rejected draw.
    fn reject(&mut self, msg: String) -> StrataError {
        self.current = None;
        StrataError::render(msg)
    }

    fn current(&mut self, op: &str) -> StrataResult<&mut RecordedFrame> {
        self.current
            .as_mut()
            .ok_or_else(|| StrataError::render(format!("{op} called outside of a frame")))
    }
}

impl PaintBackend for RecordingBackend {
    fn begin_frame(&mut self, viewport: Viewport, clear: Rgba) -> StrataResult<()> {
        if self.current.is_some() {
            return Err(StrataError::render("begin_frame called twice"));
        }
        self.current = Some(RecordedFrame {
            viewport: Some(viewport),
            clear: Some(clear),
            ..RecordedFrame::default()
        });
        Ok(())
    }

    fn draw_rects(&mut self, vertices: &[f32]) -> StrataResult<()> {
        if vertices.len() % RECT_QUAD_FLOATS != 0 {
            return Err(self.reject(format!(
                "rect buffer length {} is not a multiple of {RECT_QUAD_FLOATS}",
                vertices.len()
            )));
        }
        self.current("draw_rects")?
            .rect_vertices
            .extend_from_slice(vertices);
        Ok(())
    }

    fn draw_text(&mut self, texture: TextureHandle, vertices: &[f32]) -> StrataResult<()> {
        if vertices.len() != TEXT_QUAD_FLOATS {
            return Err(self.reject(format!(
                "text quad must have {TEXT_QUAD_FLOATS} floats, got {}",
                vertices.len()
            )));
        }
        self.current("draw_text")?
            .text_draws
            .push((texture, vertices.to_vec()));
        Ok(())
    }

    fn end_frame(&mut self) -> StrataResult<()> {
        let frame = self
            .current
            .take()
            .ok_or_else(|| StrataError::render("end_frame called outside of a frame"))?;
        self.last = Some(frame);
        self.frames += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
