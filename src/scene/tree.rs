use std::collections::HashSet;

use crate::foundation::core::Rgba;
use crate::foundation::math::{non_negative, positive_or};
use crate::scene::dirty::Dirty;
use crate::scene::node::{
    DEFAULT_FONT_SIZE, Node, NodeId, NodeKind, TextLeaf, clamp_font_weight,
};
use crate::scene::style::{Align, Frame, Justify, LayoutMode, MaxExtent};

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Generational arena owning every node of a scene.
///
/// Parent links are plain [`NodeId`]s; ownership is the child lists. Removing a node frees its
/// whole subtree, after which every id into it resolves to `None`.
#[derive(Debug, Default)]
pub struct SceneTree {
    slots: Vec<Slot>,
    free_list: Vec<u32>,
    root: Option<NodeId>,
    frame_requested: bool,
    live: usize,
}

impl SceneTree {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, node: Node) -> NodeId {
        self.live += 1;
        // A fresh node is dirty, so the next frame has work to do.
        self.frame_requested = true;
        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.node = Some(node);
            return NodeId::new(index, slot.generation);
        }
        #[allow(clippy::cast_possible_truncation)]
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 1,
            node: Some(node),
        });
        NodeId::new(index, 1)
    }

    /// Create a detached box with default style.
    pub fn create_box(&mut self) -> NodeId {
        self.insert(Node::new(NodeKind::Box))
    }

    /// Create a detached text leaf with default font settings.
    pub fn create_text(&mut self, content: impl Into<String>) -> NodeId {
        self.insert(Node::new(NodeKind::Text(TextLeaf::new(content))))
    }

    /// Make `id` the root. A root that still has a parent is detached from it first.
    pub fn set_root(&mut self, id: NodeId) {
        if !self.contains(id) {
            tracing::warn!(%id, "set_root with a stale node id ignored");
            return;
        }
        self.detach(id);
        self.root = Some(id);
        self.invalidate(id, Dirty::all());
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root.filter(|r| self.contains(*r))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.idx())
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.node.as_ref())
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.idx())
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.node.as_mut())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Number of live nodes, attached or not.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// True when the text leaf's last measurement fell back to zero size.
    pub fn is_degraded(&self, id: NodeId) -> bool {
        self.node(id)
            .and_then(Node::text)
            .is_some_and(TextLeaf::is_degraded)
    }

    /// Raise `bits` on `id` and escalate toward the root.
    ///
    /// Stops at the first node that already carries the bit, so repeated invalidation is linear
    /// in depth at worst. Always raises the frame request.
    pub fn invalidate(&mut self, id: NodeId, bits: Dirty) {
        self.frame_requested = true;
        let mut cur = Some(id);
        let mut bits = bits;
        while let Some(cid) = cur {
            let Some(node) = self.node_mut(cid) else {
                return;
            };
            if node.dirty.contains(bits) {
                return;
            }
            node.dirty |= bits;
            cur = node.parent;
            bits = bits.escalation();
        }
    }

    /// Set every dirty bit on every node reachable from the root.
    pub fn mark_all_dirty(&mut self) {
        self.frame_requested = true;
        let Some(root) = self.root() else {
            return;
        };
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.node_mut(id) {
                node.dirty = Dirty::all();
                stack.extend(node.children.iter().copied());
            }
        }
    }

    /// Forget every text leaf's shaped texture, e.g. after the DPR changed.
    pub(crate) fn clear_text_textures(&mut self) {
        for slot in &mut self.slots {
            if let Some(leaf) = slot.node.as_mut().and_then(Node::text_mut) {
                leaf.texture = None;
            }
        }
    }

    pub fn frame_requested(&self) -> bool {
        self.frame_requested
    }

    pub fn request_frame(&mut self) {
        self.frame_requested = true;
    }

    /// Clear and return the pending frame request.
    pub fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.frame_requested)
    }

    /// Pre-order (paint order) walk from `id`.
    pub fn preorder(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            let Some(node) = self.node(cur) else {
                continue;
            };
            out.push(cur);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    fn is_ancestor_or_self(&self, candidate: NodeId, of: NodeId) -> bool {
        let mut cur = Some(of);
        while let Some(id) = cur {
            if id == candidate {
                return true;
            }
            cur = self.parent(id);
        }
        false
    }

    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(p) = self.node_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        if let Some(n) = self.node_mut(id) {
            n.parent = None;
        }
        self.invalidate(parent, Dirty::MEASURE);
    }

    /// Remove `id` and free its whole subtree.
    pub fn remove(&mut self, id: NodeId) {
        if !self.contains(id) {
            return;
        }
        self.detach(id);
        if self.root == Some(id) {
            self.root = None;
        }
        self.free_subtree(id);
        self.frame_requested = true;
    }

    fn free_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            let Some(slot) = self
                .slots
                .get_mut(cur.idx())
                .filter(|s| s.generation == cur.generation)
            else {
                continue;
            };
            if let Some(node) = slot.node.take() {
                stack.extend(node.children);
                self.free_list.push(cur.index);
                self.live -= 1;
            }
        }
    }

    /// Replace the child list of `parent` atomically.
    ///
    /// Stale ids, `parent` itself, ancestors of `parent` and duplicates are skipped. A child owned
    /// by another box is detached from it first. Previous children absent from the new list are
    /// freed with their subtrees.
    pub(crate) fn replace_children(&mut self, parent: NodeId, new: &[NodeId]) {
        let Some(p) = self.node(parent) else {
            return;
        };
        if p.is_text() {
            tracing::warn!(%parent, "children() on a text leaf ignored");
            return;
        }

        let mut seen = HashSet::with_capacity(new.len());
        let mut accepted = Vec::with_capacity(new.len());
        for &child in new {
            if !self.contains(child) {
                tracing::warn!(%parent, %child, "skipping stale child id");
                continue;
            }
            if self.is_ancestor_or_self(child, parent) {
                tracing::warn!(%parent, %child, "skipping child that would create a cycle");
                continue;
            }
            if !seen.insert(child) {
                tracing::warn!(%parent, %child, "skipping duplicate child id");
                continue;
            }
            accepted.push(child);
        }

        let old = self
            .node_mut(parent)
            .map(|n| std::mem::take(&mut n.children))
            .unwrap_or_default();

        for &child in &accepted {
            if self.root == Some(child) {
                self.root = None;
            }
            match self.parent(child) {
                Some(prev) if prev != parent => self.detach(child),
                _ => {}
            }
            if let Some(n) = self.node_mut(child) {
                n.parent = Some(parent);
            }
        }
        for child in old {
            if !seen.contains(&child) {
                if let Some(n) = self.node_mut(child) {
                    n.parent = None;
                }
                self.free_subtree(child);
            }
        }
        if let Some(n) = self.node_mut(parent) {
            n.children = accepted;
        }
        // The new children are fully dirty or keep their own bits; the parent reflows either way.
        let children = self.children(parent).to_vec();
        for child in children {
            if let Some(n) = self.node_mut(child) {
                n.dirty |= Dirty::LAYOUT | Dirty::PAINT;
            }
        }
        self.invalidate(parent, Dirty::MEASURE);
    }

    /// Fluent mutation handle. Mutators on a stale id are no-ops.
    pub fn edit(&mut self, id: NodeId) -> NodeMut<'_> {
        NodeMut { tree: self, id }
    }
}

/// Chaining mutator handle returned by [`SceneTree::edit`].
///
/// Every mutator raises exactly one dirty category on the node and escalates it upward.
pub struct NodeMut<'a> {
    tree: &'a mut SceneTree,
    id: NodeId,
}

impl NodeMut<'_> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    fn update(self, bits: Dirty, f: impl FnOnce(&mut Node)) -> Self {
        let id = self.id;
        match self.tree.node_mut(id) {
            Some(node) => {
                f(node);
                self.tree.invalidate(id, bits);
            }
            None => tracing::warn!(%id, "mutation on a stale node id ignored"),
        }
        self
    }

    fn update_text(self, bits: Dirty, f: impl FnOnce(&mut TextLeaf)) -> Self {
        if self.tree.node(self.id).is_some_and(|n| !n.is_text()) {
            tracing::warn!(id = %self.id, "text mutator applied to a box ignored");
            return self;
        }
        self.update(bits, |node| {
            if let Some(text) = node.text_mut() {
                f(text);
                text.texture = None;
            }
        })
    }

    pub fn direction(self, mode: impl Into<LayoutMode>) -> Self {
        let mode = mode.into();
        self.update(Dirty::MEASURE, |n| n.style.mode = mode)
    }

    pub fn spacing(self, spacing: f64) -> Self {
        self.update(Dirty::MEASURE, |n| n.style.spacing = non_negative(spacing))
    }

    pub fn justify(self, justify: impl Into<Justify>) -> Self {
        let justify = justify.into();
        self.update(Dirty::LAYOUT, |n| n.style.justify = justify)
    }

    /// Single-value alignment: the cross axis for vertical/horizontal boxes, both axes otherwise.
    pub fn align(self, align: impl Into<Align>) -> Self {
        let align = align.into();
        self.update(Dirty::LAYOUT, |n| match n.style.mode {
            LayoutMode::Vertical => n.style.align_x = align,
            LayoutMode::Horizontal => n.style.align_y = align,
            LayoutMode::Stack | LayoutMode::ZStack => {
                n.style.align_x = align;
                n.style.align_y = align;
            }
        })
    }

    pub fn align_x(self, align: impl Into<Align>) -> Self {
        let align = align.into();
        self.update(Dirty::LAYOUT, |n| n.style.align_x = align)
    }

    pub fn align_y(self, align: impl Into<Align>) -> Self {
        let align = align.into();
        self.update(Dirty::LAYOUT, |n| n.style.align_y = align)
    }

    pub fn alignment(self, horizontal: impl Into<Align>, vertical: impl Into<Align>) -> Self {
        let (h, v) = (horizontal.into(), vertical.into());
        self.update(Dirty::LAYOUT, |n| {
            n.style.align_x = h;
            n.style.align_y = v;
        })
    }

    fn warn_if_text(&self, op: &'static str) {
        if self.tree.node(self.id).is_some_and(Node::is_text) {
            tracing::warn!(id = %self.id, op, "explicit size has no effect on a text leaf");
        }
    }

    /// Explicit width and height; leaves max extents untouched. Ignored by text leaves.
    pub fn frame(self, width: f64, height: f64) -> Self {
        self.warn_if_text("frame");
        self.update(Dirty::MEASURE, |n| {
            n.style.width = Some(non_negative(width));
            n.style.height = Some(non_negative(height));
        })
    }

    /// Replace all four frame fields at once; `None` clears an explicit size.
    pub fn frame_with(self, frame: Frame) -> Self {
        if frame.width.is_some() || frame.height.is_some() {
            self.warn_if_text("frame_with");
        }
        self.update(Dirty::MEASURE, |n| n.style.set_frame(frame))
    }

    pub fn max_size(self, max_width: MaxExtent, max_height: MaxExtent) -> Self {
        self.update(Dirty::MEASURE, |n| {
            let frame = Frame {
                width: n.style.width,
                height: n.style.height,
                max_width,
                max_height,
            };
            n.style.set_frame(frame);
        })
    }

    pub fn padding(self, padding: f64) -> Self {
        self.update(Dirty::MEASURE, |n| n.style.padding = non_negative(padding))
    }

    pub fn background(self, color: Rgba) -> Self {
        self.update(Dirty::PAINT, |n| n.style.background = color)
    }

    pub fn corner_radius(self, radius: f64) -> Self {
        self.update(Dirty::PAINT, |n| n.style.corner_radius = non_negative(radius))
    }

    pub fn pixel_snap(self, enabled: bool) -> Self {
        self.update(Dirty::MEASURE, |n| n.style.pixel_snap = enabled)
    }

    pub fn children(self, children: &[NodeId]) -> Self {
        self.tree.replace_children(self.id, children);
        self
    }

    pub fn content(self, content: impl Into<String>) -> Self {
        let content = content.into();
        self.update_text(Dirty::MEASURE, |t| t.content = content)
    }

    /// Font size plus an optional family list (kept when `None`).
    pub fn font(self, size: f32, family: Option<&str>) -> Self {
        let family = family.map(str::to_owned);
        self.update_text(Dirty::MEASURE, |t| {
            t.font_size = positive_or(size, DEFAULT_FONT_SIZE);
            if let Some(f) = family {
                t.family = f;
            }
        })
    }

    pub fn font_weight(self, weight: u16) -> Self {
        self.update_text(Dirty::MEASURE, |t| t.weight = clamp_font_weight(weight))
    }

    pub fn color(self, color: Rgba) -> Self {
        self.update_text(Dirty::PAINT, |t| t.color = color)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/tree.rs"]
mod tests;
