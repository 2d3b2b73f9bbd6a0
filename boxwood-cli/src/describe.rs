//! JSON tree descriptions and layout dumps.

use boxwood_dom::{ElementData, ElementFlags, ElementTree, NodeId};
use boxwood_style::{Rect, UiDocument};
use serde::{Deserialize, Serialize};

fn default_tag() -> String {
    "div".to_string()
}

/// One node of a tree description.
///
/// ```json
/// { "tag": "panel", "classes": ["toolbar"], "height": 24,
///   "children": [ { "text": "File" } ] }
/// ```
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeDescription {
    #[serde(default = "default_tag")]
    tag: String,
    /// Makes this a text node; everything else but `children` is ignored.
    text: Option<String>,
    #[serde(default)]
    classes: Vec<String>,
    id: Option<String>,
    /// Intrinsic width reported by the element.
    width: Option<f32>,
    /// Intrinsic height reported by the element.
    height: Option<f32>,
    #[serde(default)]
    hovered: bool,
    #[serde(default)]
    pressed: bool,
    #[serde(default)]
    hidden: bool,
    #[serde(default)]
    children: Vec<NodeDescription>,
}

impl NodeDescription {
    /// Allocate this node and its subtree in `tree`.
    pub fn build(&self, tree: &mut ElementTree) -> NodeId {
        if let Some(text) = &self.text {
            return tree.alloc_text(text);
        }

        let mut data = ElementData::new(&self.tag);
        for class in &self.classes {
            data = data.with_class(class);
        }
        if let Some(id) = &self.id {
            data = data.with_id(id);
        }
        data.intrinsic.width = self.width;
        data.intrinsic.height = self.height;
        data.flags.set(ElementFlags::HOVERED, self.hovered);
        data.flags.set(ElementFlags::PRESSED_LEFT, self.pressed);
        data.flags.set(ElementFlags::HIDDEN, self.hidden);

        let node = tree.alloc_element(data);
        for child in &self.children {
            let child = child.build(tree);
            tree.append_child(node, child);
        }
        node
    }
}

/// Committed geometry of one node, nested like the tree.
#[derive(Debug, Serialize)]
pub struct NodeLayout {
    node: usize,
    label: String,
    content: Rect,
    padding_box: Rect,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<NodeLayout>,
}

/// Collect the geometry of `node` and its laid-out descendants.
pub fn dump(doc: &UiDocument, node: NodeId) -> Option<NodeLayout> {
    let layout_box = doc.layout_box(node)?;
    let tree = doc.tree();
    let label = match (tree.as_element(node), tree.as_text(node)) {
        (Some(element), _) => {
            let mut label = element.tag_name.clone();
            if let Some(id) = &element.id {
                label.push('#');
                label.push_str(id);
            }
            for class in &element.classes {
                label.push('.');
                label.push_str(class);
            }
            label
        }
        (None, Some(text)) => format!("{text:?}"),
        (None, None) => format!("{node:?}"),
    };

    Some(NodeLayout {
        node: node.0,
        label,
        content: layout_box.content,
        padding_box: layout_box.padding_box,
        children: tree
            .children(node)
            .iter()
            .filter_map(|&child| dump(doc, child))
            .collect(),
    })
}
