//! Cursor and selection.
//!
//! A cursor is a gap between children: (parent, group, index). A selection
//! is either such a gap or a whole node.

use serde::{Deserialize, Serialize};
use sprout_language::{InsertPosition, NodeCategory, NodeId, NodeTree};
use sprout_layout::LinePosition;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub parent: NodeId,
    pub group: String,
    pub index: usize,
}

impl Cursor {
    pub fn new(parent: NodeId, group: impl Into<String>, index: usize) -> Self {
        Self {
            parent,
            group: group.into(),
            index,
        }
    }

    /// Gap after the last child of `parent.group`.
    pub fn append(tree: &NodeTree, parent: NodeId, group: &str) -> Self {
        Self::new(parent, group, tree.child_count(parent, group))
    }

    /// Gap immediately before `node`. `None` for detached nodes.
    pub fn before(tree: &NodeTree, node: NodeId) -> Option<Self> {
        tree.parent(node)
            .map(|p| Self::new(p.node, p.group.clone(), p.index))
    }

    /// Gap immediately after `node`. `None` for detached nodes.
    pub fn after(tree: &NodeTree, node: NodeId) -> Option<Self> {
        tree.parent(node)
            .map(|p| Self::new(p.node, p.group.clone(), p.index + 1))
    }

    /// Category accepted at this gap; `None` when the cursor no longer points
    /// at an existing group.
    pub fn category(&self, tree: &NodeTree) -> Option<NodeCategory> {
        let group = tree.child_group(self.parent, &self.group)?;
        (self.index <= group.len()).then(|| group.category())
    }

    pub fn is_valid(&self, tree: &NodeTree) -> bool {
        self.category(tree).is_some()
    }

    pub fn position<'a>(&'a self, tree: &'a NodeTree) -> InsertPosition<'a> {
        InsertPosition {
            tree,
            parent: self.parent,
            group: &self.group,
            index: self.index,
        }
    }
}

impl From<LinePosition> for Cursor {
    /// Gap at the start of a laid-out line.
    fn from(position: LinePosition) -> Self {
        Self::new(position.parent, position.group, position.index)
    }
}

/// What an edit applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    Cursor(Cursor),
    Node(NodeId),
}

impl From<Cursor> for Selection {
    fn from(cursor: Cursor) -> Self {
        Selection::Cursor(cursor)
    }
}
