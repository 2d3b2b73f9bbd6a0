//! Painter - walks a laid-out tree and produces paint records.

use std::collections::HashMap;

use boxwood_dom::{ElementFlags, ElementTree, NodeId};

use super::{PaintInfo, PaintState};
use crate::accessor::StyleStore;
use crate::block::Presence;
use crate::cascade::ComputedStyles;
use crate::layout::LayoutBox;

/// Produces paint records in tree order, parents before children.
pub struct Painter<'a> {
    tree: &'a ElementTree,
    styles: &'a ComputedStyles,
    local: &'a StyleStore,
    boxes: &'a HashMap<NodeId, LayoutBox>,
}

impl<'a> Painter<'a> {
    /// Create a painter over committed layout boxes. Paint callbacks come
    /// from `local`, so they are current even between layout updates.
    #[must_use]
    pub const fn new(
        tree: &'a ElementTree,
        styles: &'a ComputedStyles,
        local: &'a StyleStore,
        boxes: &'a HashMap<NodeId, LayoutBox>,
    ) -> Self {
        Self {
            tree,
            styles,
            local,
            boxes,
        }
    }

    /// Paint records for every visible, laid-out element.
    ///
    /// Hidden and `presence: none` elements are skipped with their subtree.
    /// `layout-only` elements are skipped themselves; their children are
    /// still painted.
    #[must_use]
    pub fn paint_infos(&self) -> Vec<PaintInfo> {
        let mut infos = Vec::new();
        for root in self.tree.roots() {
            self.collect(root, &mut infos);
        }
        infos
    }

    /// Invoke each element's paint callback with its record.
    pub fn paint(&self) {
        for info in self.paint_infos() {
            let local = self.local.get(info.node);
            if let Some(paint) = local.and_then(|block| block.paint_func.as_ref()) {
                paint(&info);
            }
        }
    }

    fn collect(&self, node: NodeId, infos: &mut Vec<PaintInfo>) {
        let flags = self.tree.flags(node);
        let presence = self.styles.get(node).presence_or_default();
        if flags.contains(ElementFlags::HIDDEN) || presence == Presence::None {
            return;
        }
        let Some(layout_box) = self.boxes.get(&node) else {
            return;
        };
        if layout_box.last_input.is_none() {
            return;
        }

        if presence != Presence::LayoutOnly {
            infos.push(PaintInfo {
                rect: layout_box.border_box,
                node,
                state: PaintState::from_flags(flags),
            });
        }
        for &child in self.tree.children(node) {
            self.collect(child, infos);
        }
    }
}
