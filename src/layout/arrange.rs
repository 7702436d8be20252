use crate::foundation::core::{Rect, Size};
use crate::layout::PassCtx;
use crate::scene::dirty::Dirty;
use crate::scene::node::NodeId;
use crate::scene::style::{Justify, LayoutMode, MaxExtent, Style};
use crate::scene::tree::SceneTree;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct MainAxisPlan {
    /// Offset before the first child.
    pub lead: f64,
    /// Extra gap added to the configured spacing between consecutive children.
    pub extra: f64,
}

/// Distribute `free` (interior minus the children's summed main extents) along the main axis.
///
/// `start`/`end`/`center` account for the configured spacing; the `space-*` modes split the
/// whole non-negative free space into extra gaps on top of it.
pub(crate) fn plan_main_axis(justify: Justify, free: f64, spacing: f64, n: usize) -> MainAxisPlan {
    let total_spacing = if n > 0 {
        spacing * (n - 1) as f64
    } else {
        0.0
    };
    let distributable = free.max(0.0);
    let (lead, extra) = match justify {
        Justify::Start => (0.0, 0.0),
        Justify::End => (free - total_spacing, 0.0),
        Justify::Center => ((free - total_spacing) / 2.0, 0.0),
        Justify::SpaceBetween if n >= 2 => (0.0, distributable / (n - 1) as f64),
        Justify::SpaceBetween => (0.0, 0.0),
        Justify::SpaceAround if n > 0 => {
            let gap = distributable / n as f64;
            (gap / 2.0, gap)
        }
        Justify::SpaceEvenly => {
            let gap = distributable / (n + 1) as f64;
            (gap, gap)
        }
        Justify::SpaceAround => (0.0, 0.0),
    };
    MainAxisPlan { lead, extra }
}

fn resolve_extent(max: MaxExtent, measured: f64, available: f64, text: bool) -> f64 {
    let v = match max {
        MaxExtent::Unbounded => available,
        // Text carries its own intrinsic size and is only positioned by its parent.
        _ if text => measured.min(max.limit()),
        _ => measured.min(available).min(max.limit()),
    };
    if v.is_nan() { 0.0 } else { v.max(0.0) }
}

impl SceneTree {
    /// Resolve the rect of `id` at `(x, y)` within `available_w × available_h`, then lay out its
    /// children.
    ///
    /// The rect is recomputed only when LAYOUT is set or the offer changed; children are always
    /// revisited with the (possibly reused) rect so paint-dirty descendants are reached.
    pub fn layout(
        &mut self,
        id: NodeId,
        x: f64,
        y: f64,
        available_w: f64,
        available_h: f64,
        ctx: &mut PassCtx<'_>,
    ) {
        let pixel = ctx.pixel;
        let offer = [x, y, available_w, available_h];
        let Some(node) = self.node_mut(id) else {
            return;
        };

        if node.dirty.contains(Dirty::LAYOUT) || node.last_offer != Some(offer) {
            let text = node.is_text();
            let w = resolve_extent(node.style.max_width, node.measured.width, available_w, text);
            let h = resolve_extent(node.style.max_height, node.measured.height, available_h, text);
            let (rx, ry, rw, rh) = if node.style.pixel_snap {
                pixel.snap_rect(x, y, w, h)
            } else {
                (x, y, w, h)
            };
            node.rect = Rect::new(rx, ry, rx + rw, ry + rh);
            node.last_offer = Some(offer);
            node.dirty.remove(Dirty::LAYOUT);
            node.dirty.insert(Dirty::PAINT);
            ctx.stats.laid_out += 1;
        }

        if node.is_text() || node.children.is_empty() {
            return;
        }
        let rect = node.rect;
        let style = node.style.clone();
        let children = node.children.clone();
        self.layout_children(&style, rect, &children, ctx);
    }

    fn layout_children(
        &mut self,
        style: &Style,
        rect: Rect,
        children: &[NodeId],
        ctx: &mut PassCtx<'_>,
    ) {
        let p = style.padding;
        let ix = rect.x0 + p;
        let iy = rect.y0 + p;
        let iw = (rect.width() - p * 2.0).max(0.0);
        let ih = (rect.height() - p * 2.0).max(0.0);

        let measured: Vec<(NodeId, Size)> = children
            .iter()
            .filter_map(|&c| self.node(c).map(|n| (c, n.measured)))
            .collect();

        match style.mode {
            LayoutMode::Stack => {
                for (child, _) in measured {
                    self.layout(child, ix, iy, iw, ih, ctx);
                }
            }
            LayoutMode::ZStack => {
                for (child, size) in measured {
                    let cx = ix + style.align_x.offset(iw, size.width);
                    let cy = iy + style.align_y.offset(ih, size.height);
                    self.layout(child, cx, cy, size.width, size.height, ctx);
                }
            }
            LayoutMode::Vertical => {
                let total: f64 = measured.iter().map(|(_, s)| s.height).sum();
                let plan = plan_main_axis(style.justify, ih - total, style.spacing, measured.len());
                let mut cy = iy + plan.lead;
                for (child, size) in measured {
                    let cx = ix + style.align_x.offset(iw, size.width);
                    self.layout(child, cx, cy, iw, size.height, ctx);
                    let advance = self.node(child).map_or(size.height, |n| n.rect.height());
                    cy += advance + style.spacing + plan.extra;
                }
            }
            LayoutMode::Horizontal => {
                let total: f64 = measured.iter().map(|(_, s)| s.width).sum();
                let plan = plan_main_axis(style.justify, iw - total, style.spacing, measured.len());
                let mut cx = ix + plan.lead;
                for (child, size) in measured {
                    let cy = iy + style.align_y.offset(ih, size.height);
                    self.layout(child, cx, cy, size.width, ih, ctx);
                    let advance = self.node(child).map_or(size.width, |n| n.rect.width());
                    cx += advance + style.spacing + plan.extra;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/arrange.rs"]
mod tests;
