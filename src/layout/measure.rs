use crate::foundation::core::Size;
use crate::layout::PassCtx;
use crate::scene::dirty::Dirty;
use crate::scene::node::{NodeId, TEXT_PADDING, TextLeaf};
use crate::scene::style::{LayoutMode, Style};
use crate::scene::tree::SceneTree;

impl SceneTree {
    /// Recompute the measured size of `id` and of every descendant with MEASURE set.
    ///
    /// No-op when the node's MEASURE bit is clear. Never fails: text oracle errors degrade the
    /// leaf to zero size.
    pub fn measure(&mut self, id: NodeId, ctx: &mut PassCtx<'_>) {
        let Some(node) = self.node(id) else {
            return;
        };
        if !node.dirty.contains(Dirty::MEASURE) {
            return;
        }
        let style = node.style.clone();
        let text = node.text().cloned();
        let children = node.children.clone();
        let is_text = text.is_some();

        let (raw, degraded) = match text {
            Some(leaf) => measure_text(id, &leaf, ctx),
            None => {
                for &child in &children {
                    self.measure(child, ctx);
                }
                let sizes: Vec<Size> = children
                    .iter()
                    .filter_map(|c| self.node(*c))
                    .map(|n| n.measured)
                    .collect();
                (measure_box(&style, &sizes), None)
            }
        };

        let mut w = raw.width;
        let mut h = raw.height;
        if style.pixel_snap {
            w = ctx.pixel.snap_extent(w);
            h = ctx.pixel.snap_extent(h);
        }
        // Explicit box sizes are trusted as given. Text is always sized by its content.
        if !is_text {
            if let Some(ew) = style.width {
                w = ew;
            }
            if let Some(eh) = style.height {
                h = eh;
            }
        }

        if let Some(node) = self.node_mut(id) {
            node.measured = Size::new(w, h);
            node.dirty.remove(Dirty::MEASURE);
            node.dirty.insert(Dirty::LAYOUT | Dirty::PAINT);
            if let (Some(flag), Some(leaf)) = (degraded, node.text_mut()) {
                leaf.degraded = flag;
            }
        }
        ctx.stats.measured += 1;
    }
}

/// Intrinsic size of a box from its children's measured sizes.
pub(crate) fn measure_box(style: &Style, children: &[Size]) -> Size {
    let p2 = style.padding * 2.0;
    let n = children.len();
    let gaps = if n > 0 {
        style.spacing * (n - 1) as f64
    } else {
        0.0
    };
    let max_w = children.iter().fold(0.0_f64, |a, s| a.max(s.width));
    let max_h = children.iter().fold(0.0_f64, |a, s| a.max(s.height));
    let sum_w: f64 = children.iter().map(|s| s.width).sum();
    let sum_h: f64 = children.iter().map(|s| s.height).sum();

    match style.mode {
        LayoutMode::Stack => Size::new(
            children.iter().fold(p2, |a, s| a.max(s.width + p2)),
            children.iter().fold(p2, |a, s| a.max(s.height + p2)),
        ),
        LayoutMode::Vertical => Size::new(max_w + p2, sum_h + gaps + p2),
        LayoutMode::Horizontal => Size::new(sum_w + gaps + p2, max_h + p2),
        LayoutMode::ZStack => Size::new(max_w + p2, max_h + p2),
    }
}

fn measure_text(id: NodeId, leaf: &TextLeaf, ctx: &mut PassCtx<'_>) -> (Size, Option<bool>) {
    match ctx.cache.measure(&mut *ctx.oracle, &leaf.request()) {
        Ok(m) => (
            Size::new(m.width + TEXT_PADDING * 2.0, m.height + TEXT_PADDING * 2.0),
            Some(false),
        ),
        Err(err) => {
            tracing::warn!(%id, content = %leaf.content, error = %err, "text measurement failed, degrading to zero size");
            ctx.stats.degraded_text += 1;
            (Size::ZERO, Some(true))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/measure.rs"]
mod tests;
