//! # Node tree
//!
//! Arena owning every node of a document (or of a detached fragment such as
//! an autocomplete candidate). All structural mutation goes through this type
//! so that parent back-references are updated in the same step as the child
//! lists they describe.

use crate::category::NodeCategory;
use crate::error::{LanguageError, LanguageResult, SchemaViolation};
use crate::node::{Arity, ChildGroup, Node, NodeId, ParentRef, PropertyValue};
use crate::registry::Registry;
use std::ops::Index;
use std::sync::Arc;
use tracing::{debug, trace};

pub struct NodeTree {
    registry: Arc<Registry>,
    nodes: Vec<Option<Node>>,
}

impl NodeTree {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            nodes: Vec::new(),
        }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    // ---------------------------------------------------------------------
    // Construction
    // ---------------------------------------------------------------------

    /// Allocate a detached node with no properties or groups yet.
    ///
    /// Only node type constructors call this; they follow up with
    /// [`add_child_group`](Self::add_child_group) for each declared group.
    pub fn create_node(&mut self, node_type: &'static str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(Node::new(node_type)));
        id
    }

    pub fn add_child_group(
        &mut self,
        id: NodeId,
        name: &'static str,
        arity: Arity,
        category: NodeCategory,
    ) {
        if let Some(node) = self.slot_mut(id) {
            if node.child_group(name).is_none() {
                node.child_groups.push(ChildGroup::new(name, arity, category));
            }
        }
    }

    /// Write a property during construction, bypassing the declared-property check.
    pub(crate) fn init_property(&mut self, id: NodeId, name: &str, value: impl Into<PropertyValue>) {
        if let Some(node) = self.slot_mut(id) {
            node.properties.insert(name.to_string(), value.into());
        }
    }

    // ---------------------------------------------------------------------
    // Reads
    // ---------------------------------------------------------------------

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn node_type(&self, id: NodeId) -> Option<&'static str> {
        self.get(id).map(Node::node_type)
    }

    pub fn parent(&self, id: NodeId) -> Option<&ParentRef> {
        self.get(id).and_then(Node::parent)
    }

    pub fn property(&self, id: NodeId, name: &str) -> Option<&PropertyValue> {
        self.get(id).and_then(|n| n.property(name))
    }

    /// String property or the empty string when absent.
    pub fn property_str(&self, id: NodeId, name: &str) -> &str {
        self.property(id, name)
            .and_then(PropertyValue::as_str)
            .unwrap_or("")
    }

    pub fn child_group(&self, id: NodeId, group: &str) -> Option<&ChildGroup> {
        self.get(id).and_then(|n| n.child_group(group))
    }

    /// Children of a group, empty when the node or group does not exist.
    pub fn children(&self, id: NodeId, group: &str) -> &[NodeId] {
        self.child_group(id, group)
            .map(ChildGroup::children)
            .unwrap_or(&[])
    }

    pub fn child_count(&self, id: NodeId, group: &str) -> usize {
        self.children(id, group).len()
    }

    pub fn first_child(&self, id: NodeId, group: &str) -> Option<NodeId> {
        self.children(id, group).first().copied()
    }

    /// Every live node reachable from `root`, depth first, groups in declaration order.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.get(id) else { continue };
            out.push(id);
            for group in node.child_groups().iter().rev() {
                stack.extend(group.children().iter().rev());
            }
        }
        out
    }

    /// Ancestors from the immediate parent up to the root.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.parent(id).map(|p| p.node);
        while let Some(node) = current {
            out.push(node);
            current = self.parent(node).map(|p| p.node);
        }
        out
    }

    /// Number of live nodes in the arena (attached or detached).
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ---------------------------------------------------------------------
    // Mutation
    // ---------------------------------------------------------------------

    /// Set a property declared by the node's type registration.
    pub fn set_property(
        &mut self,
        id: NodeId,
        name: &str,
        value: impl Into<PropertyValue>,
    ) -> LanguageResult<()> {
        let node_type = self.node_type(id).ok_or(LanguageError::NodeNotFound(id))?;
        let registration = self.registry.lookup(node_type)?;
        if !registration.properties.iter().any(|p| *p == name) {
            return Err(LanguageError::UndeclaredProperty {
                node_type: node_type.to_string(),
                property: name.to_string(),
            });
        }
        self.init_property(id, name, value);
        Ok(())
    }

    /// Insert a detached node into `parent.group` at `index`.
    pub fn insert(
        &mut self,
        parent: NodeId,
        group: &str,
        index: usize,
        child: NodeId,
    ) -> LanguageResult<()> {
        let child_type = self.node_type(child).ok_or(LanguageError::NodeNotFound(child))?;
        if self.parent(child).is_some() {
            return Err(LanguageError::AlreadyAttached(child));
        }
        if self.ancestors(parent).contains(&child) || parent == child {
            return Err(LanguageError::CycleDetected { node: child, parent });
        }

        let (arity, category, len) = {
            let parent_node = self.get(parent).ok_or(LanguageError::NodeNotFound(parent))?;
            let child_group =
                parent_node
                    .child_group(group)
                    .ok_or_else(|| LanguageError::UnknownChildGroup {
                        node_type: parent_node.node_type().to_string(),
                        group: group.to_string(),
                    })?;
            (child_group.arity(), child_group.category(), child_group.len())
        };

        if !self.registry.is_member(category, child_type) {
            return Err(SchemaViolation::CategoryMismatch {
                node_type: child_type.to_string(),
                category,
                group: group.to_string(),
            }
            .into());
        }
        if arity == Arity::Single && len >= 1 {
            return Err(SchemaViolation::ArityViolation {
                group: group.to_string(),
            }
            .into());
        }
        if index > len {
            return Err(LanguageError::IndexOutOfBounds {
                group: group.to_string(),
                index,
                len,
            });
        }

        if let Some(child_group) = self.slot_mut(parent).and_then(|n| n.child_group_mut(group)) {
            child_group.children.insert(index, child);
        }
        self.reindex(parent, group, index);
        trace!(?parent, group, index, child_type, "inserted node");
        Ok(())
    }

    pub fn append(&mut self, parent: NodeId, group: &str, child: NodeId) -> LanguageResult<()> {
        let index = self.child_count(parent, group);
        self.insert(parent, group, index, child)
    }

    /// Detach and return the child at `index`. The node stays in the arena.
    pub fn remove(&mut self, parent: NodeId, group: &str, index: usize) -> LanguageResult<NodeId> {
        let node_type = self.node_type(parent).ok_or(LanguageError::NodeNotFound(parent))?;
        let child_group = self
            .slot_mut(parent)
            .and_then(|n| n.child_group_mut(group))
            .ok_or_else(|| LanguageError::UnknownChildGroup {
                node_type: node_type.to_string(),
                group: group.to_string(),
            })?;
        let len = child_group.children.len();
        if index >= len {
            return Err(LanguageError::IndexOutOfBounds {
                group: group.to_string(),
                index,
                len,
            });
        }
        let child = child_group.children.remove(index);
        if let Some(node) = self.slot_mut(child) {
            node.parent = None;
        }
        self.reindex(parent, group, index);
        trace!(?parent, group, index, "removed node");
        Ok(child)
    }

    /// Detach a node from wherever it currently sits. No-op for roots.
    pub fn detach(&mut self, id: NodeId) -> LanguageResult<Option<ParentRef>> {
        let Some(parent) = self.parent(id).cloned() else {
            return Ok(None);
        };
        self.remove(parent.node, &parent.group, parent.index)?;
        Ok(Some(parent))
    }

    /// Remove-then-insert. On failure the node is put back where it was.
    pub fn move_node(
        &mut self,
        id: NodeId,
        new_parent: NodeId,
        group: &str,
        index: usize,
    ) -> LanguageResult<()> {
        let previous = self.detach(id)?;
        let mut target_index = index;
        if let Some(previous) = &previous {
            // Removing from the same group shifts later positions down by one.
            if previous.node == new_parent && previous.group == group && previous.index < index {
                target_index -= 1;
            }
        }
        if let Err(err) = self.insert(new_parent, group, target_index, id) {
            if let Some(previous) = previous {
                self.insert(previous.node, &previous.group, previous.index, id)?;
            }
            return Err(err);
        }
        Ok(())
    }

    /// Run the node type's `clean` pass. Types without one do nothing.
    ///
    /// A clean pass may prune children and may call `clean` on its own parent
    /// once; the chain is bounded by the height of the tree.
    pub fn clean(&mut self, id: NodeId) {
        let Some(node_type) = self.node_type(id) else {
            return;
        };
        let clean = self
            .registry
            .lookup(node_type)
            .ok()
            .and_then(|registration| registration.clean);
        if let Some(clean) = clean {
            debug!(?id, node_type, "clean");
            clean(self, id);
        }
    }

    /// Free a detached node and its whole subtree.
    pub fn discard(&mut self, id: NodeId) -> LanguageResult<()> {
        if self.parent(id).is_some() {
            return Err(LanguageError::AlreadyAttached(id));
        }
        for node in self.descendants(id) {
            if let Some(slot) = self.nodes.get_mut(node.0) {
                *slot = None;
            }
        }
        Ok(())
    }

    /// Move a detached subtree out of another tree into this one.
    ///
    /// Returns the id of the subtree root in this tree. The new root is detached.
    pub fn graft(&mut self, mut other: NodeTree, root: NodeId) -> LanguageResult<NodeId> {
        if !other.contains(root) {
            return Err(LanguageError::NodeNotFound(root));
        }
        other.detach(root)?;
        self.graft_node(&mut other, root)
            .ok_or(LanguageError::NodeNotFound(root))
    }

    fn graft_node(&mut self, other: &mut NodeTree, id: NodeId) -> Option<NodeId> {
        let mut node = other.nodes.get_mut(id.0).and_then(Option::take)?;
        let groups = std::mem::take(&mut node.child_groups);
        node.parent = None;
        let new_id = NodeId(self.nodes.len());
        self.nodes.push(Some(node));

        let mut new_groups = Vec::with_capacity(groups.len());
        for group in groups {
            let mut new_group = ChildGroup::new(group.name(), group.arity(), group.category());
            for child in group.children() {
                let Some(new_child) = self.graft_node(other, *child) else {
                    continue;
                };
                let index = new_group.children.len();
                if let Some(child_node) = self.slot_mut(new_child) {
                    child_node.parent = Some(ParentRef {
                        node: new_id,
                        group: group.name().to_string(),
                        index,
                    });
                }
                new_group.children.push(new_child);
            }
            new_groups.push(new_group);
        }
        if let Some(node) = self.slot_mut(new_id) {
            node.child_groups = new_groups;
        }
        Some(new_id)
    }

    fn slot_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Rewrite parent refs for `group` children from position `from` onward.
    fn reindex(&mut self, parent: NodeId, group: &str, from: usize) {
        let children: Vec<NodeId> = self.children(parent, group).to_vec();
        let group_name = group.to_string();
        for (index, child) in children.into_iter().enumerate().skip(from) {
            if let Some(node) = self.slot_mut(child) {
                node.parent = Some(ParentRef {
                    node: parent,
                    group: group_name.clone(),
                    index,
                });
            }
        }
    }
}

/// Panics on a stale id, like slice indexing. Use [`NodeTree::get`] when the
/// id might have been discarded.
impl Index<NodeId> for NodeTree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        match self.get(id) {
            Some(node) => node,
            None => panic!("node {:?} is not live in this tree", id),
        }
    }
}

impl std::fmt::Debug for NodeTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeTree")
            .field("nodes", &self.nodes)
            .finish_non_exhaustive()
    }
}
