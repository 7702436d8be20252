use std::collections::{HashMap, HashSet};

use crate::foundation::core::{Rgba, Viewport};
use crate::foundation::error::StrataResult;
use crate::layout::PassCtx;
use crate::pixel::policy::{PixelConfig, PixelPolicy, sanitize_dpr};
use crate::render::backend::PaintBackend;
use crate::render::vertices::{RECT_QUAD_FLOATS, TEXT_QUAD_FLOATS, rect_vertices, text_vertices};
use crate::scene::dirty::Dirty;
use crate::scene::node::NodeId;
use crate::scene::tree::SceneTree;
use crate::text::cache::{TextCache, TextCacheStats};
use crate::text::oracle::{TextOracle, TextureHandle};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Renderer configuration.
pub struct RendererSettings {
    /// Logical surface size.
    #[serde(default)]
    pub viewport: Viewport,
    /// Snapping policy and device pixel ratio.
    #[serde(default)]
    pub pixel: PixelConfig,
    /// Color the surface is cleared to before painting.
    #[serde(default = "default_clear")]
    pub clear: Rgba,
}

fn default_clear() -> Rgba {
    Rgba::new(0.95, 0.95, 0.95, 1.0)
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            pixel: PixelConfig::default(),
            clear: default_clear(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
/// What one frame did.
pub struct FrameStats {
    /// Monotonic frame number, starting at 1.
    pub frame: u64,
    pub measured: usize,
    pub laid_out: usize,
    /// Nodes whose vertex data was regenerated.
    pub painted: usize,
    pub rects: usize,
    pub text_quads: usize,
    /// Oracle invocations (measure or shape) this frame.
    pub oracle_calls: u64,
    /// Text leaves that could not be measured or shaped.
    pub degraded_text: usize,
}

enum Paint {
    Rect([f32; RECT_QUAD_FLOATS]),
    Text(TextureHandle, [f32; TEXT_QUAD_FLOATS]),
    /// Text that could not be shaped; nothing is drawn.
    Missing,
}

/// Owns a scene and drives measure → layout → paint once per requested frame.
///
/// Any number of mutations between frames coalesce into a single frame. Vertex data is cached
/// per node and regenerated only for nodes carrying the PAINT bit.
pub struct Renderer {
    tree: SceneTree,
    settings: RendererSettings,
    oracle: Box<dyn TextOracle>,
    text_cache: TextCache,
    paint_cache: HashMap<NodeId, Paint>,
    frames: u64,
}

impl Renderer {
    pub fn new(settings: RendererSettings, oracle: Box<dyn TextOracle>) -> Self {
        let mut settings = settings;
        settings.pixel.dpr = sanitize_dpr(settings.pixel.dpr);
        settings.viewport = Viewport::new(settings.viewport.width, settings.viewport.height);
        let mut tree = SceneTree::new();
        tree.request_frame();
        Self {
            tree,
            settings,
            oracle,
            text_cache: TextCache::new(),
            paint_cache: HashMap::new(),
            frames: 0,
        }
    }

    /// Take ownership of an existing tree (its root must already be set).
    pub fn with_tree(mut self, tree: SceneTree) -> Self {
        self.tree = tree;
        self.paint_cache.clear();
        self.tree.mark_all_dirty();
        self
    }

    pub fn tree(&self) -> &SceneTree {
        &self.tree
    }

    /// Mutable access for edits; mutations request a frame through their dirty bits.
    pub fn tree_mut(&mut self) -> &mut SceneTree {
        &mut self.tree
    }

    pub fn settings(&self) -> &RendererSettings {
        &self.settings
    }

    pub fn text_cache_stats(&self) -> TextCacheStats {
        self.text_cache.stats()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    pub fn request_frame(&mut self) {
        self.tree.request_frame();
    }

    pub fn needs_render(&self) -> bool {
        self.tree.frame_requested()
    }

    /// New logical surface size. Everything is remeasured since snapping depends on it.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.settings.viewport = Viewport::new(width, height);
        self.tree.mark_all_dirty();
    }

    /// New device pixel ratio. Starts a new text epoch.
    pub fn set_dpr(&mut self, dpr: f64) {
        let dpr = sanitize_dpr(dpr);
        if dpr == self.settings.pixel.dpr {
            return;
        }
        self.settings.pixel.dpr = dpr;
        self.text_cache.clear();
        self.oracle.release_textures();
        self.tree.clear_text_textures();
        self.tree.mark_all_dirty();
    }

    pub fn set_pixel_policy(&mut self, policy: PixelPolicy) {
        if policy == self.settings.pixel.policy {
            return;
        }
        self.settings.pixel.policy = policy;
        self.tree.mark_all_dirty();
    }

    /// Run one frame if one was requested.
    ///
    /// Returns `Ok(None)` without touching the backend when nothing changed since the last frame.
    /// If the backend rejects the frame the request stays raised, so the next call submits again.
    #[tracing::instrument(skip_all, fields(frame = self.frames + 1))]
    pub fn frame(&mut self, backend: &mut dyn PaintBackend) -> StrataResult<Option<FrameStats>> {
        if !self.tree.take_frame_request() {
            return Ok(None);
        }
        let calls_before = oracle_calls(self.text_cache.stats());
        let viewport = self.settings.viewport;

        let mut stats = FrameStats {
            frame: self.frames + 1,
            ..FrameStats::default()
        };

        let order = match self.tree.root() {
            Some(root) => {
                let mut ctx =
                    PassCtx::new(self.settings.pixel, &mut self.text_cache, self.oracle.as_mut());
                self.tree.measure(root, &mut ctx);
                self.tree
                    .layout(root, 0.0, 0.0, viewport.width, viewport.height, &mut ctx);
                stats.measured = ctx.stats.measured;
                stats.laid_out = ctx.stats.laid_out;
                stats.degraded_text = ctx.stats.degraded_text;
                self.tree.preorder(root)
            }
            None => Vec::new(),
        };

        let mut rects: Vec<f32> = Vec::with_capacity(order.len() * RECT_QUAD_FLOATS);
        let mut texts: Vec<(TextureHandle, [f32; TEXT_QUAD_FLOATS])> = Vec::new();
        for &id in &order {
            let dirty = self
                .tree
                .node(id)
                .is_some_and(|n| n.dirty().contains(Dirty::PAINT));
            if dirty || !self.paint_cache.contains_key(&id) {
                let paint = self.paint_node(id, &mut stats);
                self.paint_cache.insert(id, paint);
                if let Some(n) = self.tree.node_mut(id) {
                    n.dirty.remove(Dirty::PAINT);
                }
                stats.painted += 1;
            }
            match self.paint_cache.get(&id) {
                Some(Paint::Rect(v)) => rects.extend_from_slice(v),
                Some(Paint::Text(tex, v)) => texts.push((*tex, *v)),
                Some(Paint::Missing) | None => {}
            }
        }
        let visited: HashSet<NodeId> = order.iter().copied().collect();
        self.paint_cache.retain(|id, _| visited.contains(id));

        stats.rects = rects.len() / RECT_QUAD_FLOATS;
        stats.text_quads = texts.len();
        stats.oracle_calls = oracle_calls(self.text_cache.stats()) - calls_before;

        if let Err(err) = self.submit(backend, &rects, &texts) {
            tracing::warn!(error = %err, "backend rejected frame, keeping it requested");
            self.tree.request_frame();
            return Err(err);
        }
        self.frames += 1;

        tracing::debug!(
            measured = stats.measured,
            laid_out = stats.laid_out,
            painted = stats.painted,
            rects = stats.rects,
            text_quads = stats.text_quads,
            oracle_calls = stats.oracle_calls,
            "frame rendered"
        );
        if stats.degraded_text > 0 {
            tracing::warn!(count = stats.degraded_text, "frame rendered with degraded text");
        }
        Ok(Some(stats))
    }

    fn submit(
        &self,
        backend: &mut dyn PaintBackend,
        rects: &[f32],
        texts: &[(TextureHandle, [f32; TEXT_QUAD_FLOATS])],
    ) -> StrataResult<()> {
        backend.begin_frame(self.settings.viewport, self.settings.clear)?;
        backend.draw_rects(rects)?;
        for (tex, v) in texts {
            backend.draw_text(*tex, v)?;
        }
        backend.end_frame()
    }

    fn paint_node(&mut self, id: NodeId, stats: &mut FrameStats) -> Paint {
        let viewport = self.settings.viewport;
        let Some(node) = self.tree.node(id) else {
            return Paint::Missing;
        };
        let rect = node.rect();
        let Some(leaf) = node.text() else {
            let style = node.style();
            return Paint::Rect(rect_vertices(
                rect,
                style.background,
                style.corner_radius,
                viewport,
            ));
        };
        if leaf.is_degraded() {
            return Paint::Missing;
        }

        let req = leaf.request();
        let color = leaf.color;
        let shaped = match leaf.texture() {
            Some(t) => Ok(*t),
            None => self.text_cache.texture(
                self.oracle.as_mut(),
                &req,
                color,
                self.settings.pixel.dpr,
            ),
        };
        match shaped {
            Ok(shaped) => {
                if let Some(leaf) = self.tree.node_mut(id).and_then(|n| n.text_mut()) {
                    leaf.texture = Some(shaped);
                }
                Paint::Text(shaped.texture, text_vertices(rect, viewport))
            }
            Err(err) => {
                tracing::warn!(%id, content = %req.content, error = %err, "text shaping failed, skipping quad");
                stats.degraded_text += 1;
                Paint::Missing
            }
        }
    }
}

fn oracle_calls(s: TextCacheStats) -> u64 {
    s.measure_misses + s.texture_misses
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
