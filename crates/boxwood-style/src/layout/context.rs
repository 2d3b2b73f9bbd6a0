//! Per-tree layout state: the frame counter, the dirty stack and counters.
//!
//! The context is owned by whoever drives the frame loop of one tree. Two
//! trees never share estimate caches or scheduled elements.

use std::collections::HashSet;

use boxwood_dom::{ElementTree, NodeId};

use super::box_model::Size;
use super::text::{ApproximateFontMetrics, FontMetrics};

/// Elements whose layout must be recomputed, most recent last.
///
/// Adding an element already on the stack is a no-op.
#[derive(Debug, Clone, Default)]
pub struct DirtyStack {
    stack: Vec<NodeId>,
    members: HashSet<NodeId>,
}

impl DirtyStack {
    /// Create an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `node` for layout.
    pub fn add(&mut self, node: NodeId) {
        if self.members.insert(node) {
            self.stack.push(node);
        }
    }

    /// Take the most recently added node.
    pub fn pop(&mut self) -> Option<NodeId> {
        let node = self.stack.pop()?;
        let _ = self.members.remove(&node);
        Some(node)
    }

    /// Drop every entry that has an ancestor on the stack. Laying out the
    /// ancestor lays out the entry as well.
    pub fn remove_children(&mut self, tree: &ElementTree) {
        let members = &self.members;
        self.stack
            .retain(|&node| !tree.ancestors(node).any(|a| members.contains(&a)));
        self.members = self.stack.iter().copied().collect();
    }

    /// Check whether `node` is scheduled.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.members.contains(&node)
    }

    /// Number of scheduled nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Check whether nothing is scheduled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Forget every scheduled node.
    pub fn clear(&mut self) {
        self.stack.clear();
        self.members.clear();
    }
}

/// Work counters. Never reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutStats {
    /// Calls into a strategy's width or height estimate.
    pub strategy_estimates: u64,
    /// Calls into a strategy's commit.
    pub strategy_layouts: u64,
    /// Element commits, strategy or not.
    pub element_layouts: u64,
}

/// Layout state shared by every pass over one tree.
pub struct LayoutContext {
    /// Current layout frame. Estimate caches stamped with another frame are
    /// stale.
    pub frame: u32,
    /// Elements scheduled for the next incremental pass.
    pub dirty: DirtyStack,
    /// Size of the window the roots are laid out in.
    pub viewport: Size,
    /// Work counters.
    pub stats: LayoutStats,
    /// Text measurement.
    pub metrics: Box<dyn FontMetrics>,
}

impl LayoutContext {
    /// Create a context measuring text with [`ApproximateFontMetrics`].
    #[must_use]
    pub fn new(viewport: Size) -> Self {
        Self::with_metrics(viewport, Box::new(ApproximateFontMetrics))
    }

    /// Create a context with the renderer's text measurement.
    #[must_use]
    pub fn with_metrics(viewport: Size, metrics: Box<dyn FontMetrics>) -> Self {
        Self {
            frame: 0,
            dirty: DirtyStack::new(),
            viewport,
            stats: LayoutStats::default(),
            metrics,
        }
    }

    /// Start a new pass, invalidating every cached estimate at once.
    pub const fn begin_pass(&mut self) {
        self.frame = self.frame.wrapping_add(1);
    }
}

impl std::fmt::Debug for LayoutContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutContext")
            .field("frame", &self.frame)
            .field("dirty", &self.dirty)
            .field("viewport", &self.viewport)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
