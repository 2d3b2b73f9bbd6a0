//! Cascade: from sheets and local styles to one effective block per node.
//!
//! For every node, parents first:
//!
//! 1. Start from the element's local block, which always wins.
//! 2. Fill what is still undefined from each matching definition, most
//!    important first: higher specificity, then later sheet, then later
//!    position in the sheet.
//! 3. Replace `inherit` values with the parent's effective values.
//! 4. Inherit font properties that nothing set, and turn a relative font
//!    size into pixels.

use std::cmp::Reverse;
use std::collections::HashMap;

use boxwood_dom::{ElementTree, NodeId};

use crate::accessor::StyleStore;
use crate::block::{FontStyle, FontWeight, StyleBlock};
use crate::coord::{Coord, CoordUnit};
use crate::parser::Sheet;
use crate::selector::Specificity;

/// The ordered list of sheets the cascade matches against.
///
/// A later sheet wins over an earlier one at equal specificity.
#[derive(Debug, Clone, Default)]
pub struct StyleEngine {
    sheets: Vec<Sheet>,
}

impl StyleEngine {
    /// Create an engine with no sheets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sheet with the highest precedence so far.
    pub fn add_sheet(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }

    /// Replace every sheet.
    pub fn set_sheets(&mut self, sheets: Vec<Sheet>) {
        self.sheets = sheets;
    }

    /// The sheets, lowest precedence first.
    #[must_use]
    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    /// Matching definition blocks for `node`, most important first.
    fn matched_blocks(&self, tree: &ElementTree, node: NodeId) -> Vec<&StyleBlock> {
        let mut matched: Vec<(Specificity, usize, usize, &StyleBlock)> = Vec::new();
        for (sheet_index, sheet) in self.sheets.iter().enumerate() {
            for (index, definition) in sheet.definitions().iter().enumerate() {
                if let Some(specificity) = definition.matched_specificity(tree, node) {
                    matched.push((specificity, sheet_index, index, &definition.block));
                }
            }
        }
        matched.sort_by_key(|&(specificity, sheet, index, _)| Reverse((specificity, sheet, index)));
        matched.into_iter().map(|(_, _, _, block)| block).collect()
    }
}

/// Effective style blocks, one per node.
#[derive(Debug, Clone, Default)]
pub struct ComputedStyles {
    blocks: HashMap<NodeId, StyleBlock>,
    fallback: StyleBlock,
}

impl ComputedStyles {
    /// Effective block of `node`. Nodes the cascade never saw get an
    /// all-undefined block.
    #[must_use]
    pub fn get(&self, node: NodeId) -> &StyleBlock {
        self.blocks.get(&node).unwrap_or(&self.fallback)
    }

    /// Check whether the cascade produced a block for `node`.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.blocks.contains_key(&node)
    }

    /// Number of nodes with a block.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check whether no node has a block.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Run the cascade over the whole tree.
#[must_use]
pub fn compute_styles(tree: &ElementTree, local: &StyleStore, engine: &StyleEngine) -> ComputedStyles {
    let mut computed = ComputedStyles::default();
    for root in tree.roots() {
        compute_node_styles(tree, root, local, engine, None, &mut computed);
    }
    computed
}

fn compute_node_styles(
    tree: &ElementTree,
    node: NodeId,
    local: &StyleStore,
    engine: &StyleEngine,
    parent: Option<&StyleBlock>,
    computed: &mut ComputedStyles,
) {
    let block = cascade_one(tree, node, local, engine, parent);
    for &child in tree.children(node) {
        compute_node_styles(tree, child, local, engine, Some(&block), computed);
    }
    let _ = computed.blocks.insert(node, block);
}

/// Effective block of one node given its parent's.
fn cascade_one(
    tree: &ElementTree,
    node: NodeId,
    local: &StyleStore,
    engine: &StyleEngine,
    parent: Option<&StyleBlock>,
) -> StyleBlock {
    let mut block = local.get(node).cloned().unwrap_or_default();

    // Text never matches a selector.
    if tree.as_element(node).is_some() {
        for matched in engine.matched_blocks(tree, node) {
            block.merge_direct(matched);
        }
    }

    match parent {
        Some(parent) => {
            block.merge_parent(parent);
            inherit_font(&mut block, parent);
        }
        None => inherit_font(&mut block, &StyleBlock::default()),
    }
    block
}

/// Font properties inherit unless set. Relative font sizes resolve against
/// the parent's size here, so every effective size below the root is in
/// pixels.
fn inherit_font(block: &mut StyleBlock, parent: &StyleBlock) {
    match block.font_size.unit {
        CoordUnit::Undefined | CoordUnit::Inherit | CoordUnit::Auto => {
            block.font_size = parent.font_size;
        }
        CoordUnit::Percent | CoordUnit::Fraction => {
            block.font_size = Coord::px(block.font_size.resolve(parent.font_size_px()));
        }
        CoordUnit::Pixels => {}
    }
    if matches!(block.font_weight, FontWeight::Undefined | FontWeight::Inherit) {
        block.font_weight = parent.font_weight;
    }
    if matches!(block.font_style, FontStyle::Undefined | FontStyle::Inherit) {
        block.font_style = parent.font_style;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inherit_font_resolves_percent() {
        let parent = StyleBlock {
            font_size: Coord::px(20.0),
            font_weight: FontWeight::BOLD,
            ..StyleBlock::default()
        };
        let mut child = StyleBlock {
            font_size: Coord::percent(50.0),
            ..StyleBlock::default()
        };
        inherit_font(&mut child, &parent);
        assert_eq!(child.font_size, Coord::px(10.0));
        assert_eq!(child.font_weight, FontWeight::BOLD);
        assert_eq!(child.font_style, FontStyle::Undefined);
    }

    #[test]
    fn test_inherit_font_keeps_pixels() {
        let parent = StyleBlock::default();
        let mut child = StyleBlock {
            font_size: Coord::px(9.0),
            ..StyleBlock::default()
        };
        inherit_font(&mut child, &parent);
        assert_eq!(child.font_size, Coord::px(9.0));
    }
}
