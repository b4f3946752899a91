//! Layout Engine: Arena of layout nodes with explicit lifecycle.
//!
//! Nodes live in a flat slot table indexed by [`NodeId`]; parent and child
//! relations are stored as ids, so there are no reference cycles. Every node
//! must be released explicitly. Releasing a node releases its subtree first
//! (post-order).
//!
//! The engine owns its backend. When the backend cannot be loaded it falls
//! back to [`Backend::Fixed`], which gives every node the same default
//! geometry instead of failing.

use super::flex::{self, Intrinsic};
use super::node::LayoutStyle;
use super::rect::Rect;
use crate::error::Result;
use tracing::{debug, warn};

/// Handle to a node in a [`LayoutEngine`].
///
/// Handles carry a generation, so a handle to a released node never aliases a
/// node later created in the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

/// Which layout algorithm an engine runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Backend {
    /// Single-line flexbox solver.
    #[default]
    Flex,
    /// Degraded backend: every node is `(0, 0, intrinsic_w, intrinsic_h)`.
    Fixed,
}

/// Configuration for a [`LayoutEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Width given to nodes without an explicit width.
    pub intrinsic_width: u16,
    /// Height given to nodes without an explicit height.
    pub intrinsic_height: u16,
    /// Requested backend.
    pub backend: Backend,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            intrinsic_width: 100,
            intrinsic_height: 100,
            backend: Backend::Flex,
        }
    }
}

impl LayoutConfig {
    /// Set the intrinsic size (builder pattern).
    #[must_use]
    pub const fn with_intrinsic(mut self, width: u16, height: u16) -> Self {
        self.intrinsic_width = width;
        self.intrinsic_height = height;
        self
    }

    /// Set the backend (builder pattern).
    #[must_use]
    pub const fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    const fn intrinsic(&self) -> Intrinsic {
        Intrinsic {
            width: self.intrinsic_width,
            height: self.intrinsic_height,
        }
    }
}

#[derive(Debug, Clone)]
struct LayoutNode {
    style: LayoutStyle,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Parent-relative geometry from the last `calculate_layout`.
    layout: Rect,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<LayoutNode>,
}

/// Arena-backed layout engine.
#[derive(Debug)]
pub struct LayoutEngine {
    config: LayoutConfig,
    backend: Backend,
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl LayoutEngine {
    /// Create an engine running the configured backend.
    pub fn init(config: LayoutConfig) -> Self {
        Self::with_backend(config, config.backend)
    }

    /// Create an engine whose backend comes from `loader`.
    ///
    /// A loader error is logged and replaced by [`Backend::Fixed`].
    pub fn init_with(config: LayoutConfig, loader: impl FnOnce() -> Result<Backend>) -> Self {
        let backend = loader().unwrap_or_else(|err| {
            warn!(error = %err, "layout backend unavailable, using fixed geometry");
            Backend::Fixed
        });
        Self::with_backend(config, backend)
    }

    const fn with_backend(config: LayoutConfig, backend: Backend) -> Self {
        Self {
            config,
            backend,
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }

    /// The backend in use.
    #[inline]
    pub const fn backend(&self) -> Backend {
        self.backend
    }

    /// The engine configuration.
    #[inline]
    pub const fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Number of nodes created and not yet released.
    #[inline]
    pub const fn live_nodes(&self) -> usize {
        self.live
    }

    fn node(&self, id: NodeId) -> Option<&LayoutNode> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut LayoutNode> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    /// Check if `id` refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Create a detached node.
    pub fn create_node(&mut self, style: LayoutStyle) -> NodeId {
        let node = LayoutNode {
            style,
            parent: None,
            children: Vec::new(),
            layout: Rect::ZERO,
        };
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            NodeId {
                index,
                generation: slot.generation,
            }
        } else {
            #[allow(clippy::cast_possible_truncation)]
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            NodeId {
                index,
                generation: 0,
            }
        }
    }

    /// Append `child` to `parent`'s children.
    ///
    /// A child that already has a parent is moved. Returns `false` (and changes
    /// nothing) if either node is dead or the move would create a cycle.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.contains(parent) || !self.contains(child) || self.is_ancestor(child, parent) {
            return false;
        }
        if let Some(old) = self.node(child).and_then(|n| n.parent) {
            self.remove_child(old, child);
        }
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.node_mut(parent) {
            node.children.push(child);
        }
        true
    }

    /// Detach `child` from `parent` without releasing it.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        let Some(node) = self.node_mut(parent) else {
            return false;
        };
        let before = node.children.len();
        node.children.retain(|&c| c != child);
        let removed = node.children.len() != before;
        if removed {
            if let Some(node) = self.node_mut(child) {
                node.parent = None;
            }
        }
        removed
    }

    /// Check whether `ancestor` is `node` or one of its ancestors.
    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.node(id).and_then(|n| n.parent);
        }
        false
    }

    /// The style of a node.
    pub fn style(&self, id: NodeId) -> Option<&LayoutStyle> {
        self.node(id).map(|n| &n.style)
    }

    /// Replace a node's style.
    pub fn set_style(&mut self, id: NodeId, style: LayoutStyle) -> bool {
        self.update_style(id, |s| *s = style)
    }

    /// Modify a node's style in place.
    pub fn update_style(&mut self, id: NodeId, update: impl FnOnce(&mut LayoutStyle)) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                update(&mut node.style);
                true
            }
            None => false,
        }
    }

    /// The parent of a node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// The children of a node in insertion order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map_or(&[][..], |n| n.children.as_slice())
    }

    /// Release a node and its whole subtree, children first.
    ///
    /// The node is detached from its parent. Returns the number of nodes
    /// released (zero for a dead handle).
    pub fn release(&mut self, id: NodeId) -> usize {
        if let Some(parent) = self.parent(id) {
            self.remove_child(parent, id);
        }
        self.release_subtree(id)
    }

    fn release_subtree(&mut self, id: NodeId) -> usize {
        let children = match self.node_mut(id) {
            Some(node) => std::mem::take(&mut node.children),
            None => return 0,
        };
        let mut released = 0;
        for child in children {
            released += self.release_subtree(child);
        }
        let slot = &mut self.slots[id.index as usize];
        slot.node = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.live -= 1;
        released + 1
    }

    /// Compute geometry for `root` and every descendant.
    ///
    /// The root is placed at (0, 0) with its explicit size, or the intrinsic
    /// size where unset.
    pub fn calculate_layout(&mut self, root: NodeId) {
        let Some(style) = self.style(root).copied() else {
            return;
        };
        let intrinsic = self.config.intrinsic();
        match self.backend {
            Backend::Flex => {
                let (width, height) = flex::root_size(&style, intrinsic);
                if let Some(node) = self.node_mut(root) {
                    node.layout = Rect::new(0, 0, width, height);
                }
                self.layout_children(root, width, height);
            }
            Backend::Fixed => self.fill_fixed(root, Rect::from_size(intrinsic.width, intrinsic.height)),
        }
        debug!(nodes = self.live, backend = ?self.backend, "layout calculated");
    }

    fn layout_children(&mut self, id: NodeId, width: u16, height: u16) {
        let Some(node) = self.node(id) else {
            return;
        };
        if node.children.is_empty() {
            return;
        }
        let container = node.style;
        let children = node.children.clone();
        let styles: Vec<LayoutStyle> = children
            .iter()
            .map(|&c| self.style(c).copied().unwrap_or_default())
            .collect();
        let rects = flex::place_children(&container, width, height, &styles, self.config.intrinsic());

        for (child, rect) in children.into_iter().zip(rects) {
            if let Some(node) = self.node_mut(child) {
                node.layout = rect;
            }
            self.layout_children(child, rect.width, rect.height);
        }
    }

    fn fill_fixed(&mut self, id: NodeId, rect: Rect) {
        let children = match self.node_mut(id) {
            Some(node) => {
                node.layout = rect;
                node.children.clone()
            }
            None => return,
        };
        for child in children {
            self.fill_fixed(child, rect);
        }
    }

    /// Parent-relative geometry from the last layout pass.
    pub fn relative_layout(&self, id: NodeId) -> Option<Rect> {
        self.node(id).map(|n| n.layout)
    }

    /// Absolute geometry: the node's offset summed along its parent chain.
    pub fn computed_layout(&self, id: NodeId) -> Option<Rect> {
        let mut rect = self.relative_layout(id)?;
        let mut parent = self.parent(id);
        while let Some(p) = parent {
            let node = self.node(p)?;
            rect = rect.offset(node.layout.x, node.layout.y);
            parent = node.parent;
        }
        Some(rect)
    }

    /// Release every remaining node.
    ///
    /// Returns how many nodes were still live; a non-zero count means some
    /// owner never released its nodes.
    pub fn shutdown(&mut self) -> usize {
        let leaked = self.live;
        if leaked > 0 {
            warn!(leaked, "layout engine shut down with live nodes");
        }
        // Generations advance so handles from before shutdown stay dead.
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                #[allow(clippy::cast_possible_truncation)]
                self.free.push(index as u32);
            }
        }
        self.live = 0;
        leaked
    }
}
