//! # Tree Mutations
//!
//! High-level semantic operations on a document's node tree.
//!
//! ## Design Principles
//!
//! 1. **Intent-preserving**: Each mutation represents a semantic operation
//! 2. **Validated**: Structure is checked before anything is touched
//! 3. **Atomic**: A failed mutation leaves the tree as it was
//!
//! ## Mutation Semantics
//!
//! ### InsertNode
//! - The serialized node is built off to the side, then inserted
//! - Category and arity of the target group are enforced by the tree
//!
//! ### RemoveNode
//! - Removes node and all descendants
//! - The former parent's `clean()` runs afterwards, which may cascade upward
//!   (an expression left without tokens removes itself, and so on)
//!
//! ### MoveNode
//! - Remove-then-insert; on failure the node goes back where it was
//! - Fails if it would create a cycle
//! - The former parent is cleaned when the node leaves it
//!
//! ### SetProperty
//! - Only properties declared by the node's type can be set

use serde::{Deserialize, Serialize};
use sprout_language::{
    deserialize, LanguageError, NodeId, NodeTree, ParentRef, PropertyValue, SerializedNode,
};
use thiserror::Error;
use tracing::debug;

/// Semantic mutations (intent-preserving operations)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Insert a new subtree into `parent.group` at `index`
    InsertNode {
        parent: NodeId,
        group: String,
        index: usize,
        node: SerializedNode,
    },

    /// Remove a node (and its subtree) from the tree
    RemoveNode { node: NodeId },

    /// Move a node to a new position
    MoveNode {
        node: NodeId,
        new_parent: NodeId,
        group: String,
        index: usize,
    },

    /// Set a declared property
    SetProperty {
        node: NodeId,
        name: String,
        value: PropertyValue,
    },
}

#[derive(Error, Debug)]
pub enum MutationError {
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    #[error("Parent not found: {0:?}")]
    ParentNotFound(NodeId),

    #[error("The document root cannot be removed or moved")]
    CannotEditRoot,

    #[error("Node {0:?} is not attached to the document")]
    Detached(NodeId),

    #[error("Would create cycle")]
    CycleDetected,

    #[error("Invalid structure: {0}")]
    InvalidStructure(#[from] LanguageError),
}

impl Mutation {
    /// Apply mutation to the tree with validation. Returns the node the
    /// mutation produced or touched, if it still exists.
    pub fn apply(&self, tree: &mut NodeTree, root: NodeId) -> Result<Option<NodeId>, MutationError> {
        self.validate(tree, root)?;

        match self {
            Mutation::InsertNode {
                parent,
                group,
                index,
                node,
            } => Self::apply_insert(tree, *parent, group, *index, node).map(Some),

            Mutation::RemoveNode { node } => {
                remove_and_clean(tree, *node)?;
                Ok(None)
            }

            Mutation::MoveNode {
                node,
                new_parent,
                group,
                index,
            } => {
                let previous = tree.parent(*node).cloned();
                tree.move_node(*node, *new_parent, group, *index)?;
                if let Some(previous) = previous {
                    if previous.node != *new_parent {
                        tree.clean(previous.node);
                    }
                }
                Ok(Some(*node))
            }

            Mutation::SetProperty { node, name, value } => {
                tree.set_property(*node, name, value.clone())?;
                Ok(Some(*node))
            }
        }
    }

    fn apply_insert(
        tree: &mut NodeTree,
        parent: NodeId,
        group: &str,
        index: usize,
        serialized: &SerializedNode,
    ) -> Result<NodeId, MutationError> {
        let mut scratch = NodeTree::new(tree.registry().clone());
        let scratch_root = deserialize(&mut scratch, serialized)?;
        let node = tree.graft(scratch, scratch_root)?;
        if let Err(err) = tree.insert(parent, group, index, node) {
            tree.discard(node)?;
            return Err(err.into());
        }
        Ok(node)
    }

    /// Validate without applying
    pub fn validate(&self, tree: &NodeTree, root: NodeId) -> Result<(), MutationError> {
        match self {
            Mutation::InsertNode {
                parent,
                group,
                index,
                node,
            } => {
                let parent_type = tree
                    .node_type(*parent)
                    .ok_or(MutationError::ParentNotFound(*parent))?;
                let child_group = tree.child_group(*parent, group).ok_or_else(|| {
                    LanguageError::UnknownChildGroup {
                        node_type: parent_type.to_string(),
                        group: group.clone(),
                    }
                })?;
                if *index > child_group.len() {
                    return Err(LanguageError::IndexOutOfBounds {
                        group: group.clone(),
                        index: *index,
                        len: child_group.len(),
                    }
                    .into());
                }
                if !tree.registry().is_registered(&node.node_type) {
                    return Err(LanguageError::UnregisteredType(node.node_type.clone()).into());
                }
                Ok(())
            }

            Mutation::RemoveNode { node } => {
                Self::check_attached(tree, root, *node)?;
                Ok(())
            }

            Mutation::MoveNode {
                node, new_parent, ..
            } => {
                Self::check_attached(tree, root, *node)?;
                if !tree.contains(*new_parent) {
                    return Err(MutationError::ParentNotFound(*new_parent));
                }
                if *new_parent == *node || tree.ancestors(*new_parent).contains(node) {
                    return Err(MutationError::CycleDetected);
                }
                Ok(())
            }

            Mutation::SetProperty { node, .. } => {
                if !tree.contains(*node) {
                    return Err(MutationError::NodeNotFound(*node));
                }
                Ok(())
            }
        }
    }

    fn check_attached(tree: &NodeTree, root: NodeId, node: NodeId) -> Result<(), MutationError> {
        if !tree.contains(node) {
            return Err(MutationError::NodeNotFound(node));
        }
        if node == root {
            return Err(MutationError::CannotEditRoot);
        }
        if tree.parent(node).is_none() {
            return Err(MutationError::Detached(node));
        }
        Ok(())
    }
}

/// Detach and free `node`, then clean the group it left.
pub(crate) fn remove_and_clean(tree: &mut NodeTree, node: NodeId) -> Result<ParentRef, MutationError> {
    let parent = tree.detach(node)?.ok_or(MutationError::Detached(node))?;
    tree.discard(node)?;
    debug!(?node, parent = ?parent.node, group = %parent.group, "removed node");
    tree.clean(parent.node);
    Ok(parent)
}

/// Result of applying a mutation
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResult {
    /// New version number
    pub version: u64,

    /// Node inserted, moved or updated; `None` after a removal
    pub node: Option<NodeId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprout_language::types::{js, literals};
    use sprout_language::Registry;

    fn file_with_statement() -> (NodeTree, NodeId, NodeId, NodeId) {
        let mut tree = NodeTree::new(Registry::standard().unwrap());
        let file = js::file::create(&mut tree);
        let token = literals::create_number(&mut tree, 7.0);
        let expression = js::expression::wrap(&mut tree, token).unwrap();
        tree.append(file, "body", expression).unwrap();
        (tree, file, expression, token)
    }

    #[test]
    fn test_mutation_serialization() {
        let (_, _, expression, _) = file_with_statement();
        let mutation = Mutation::SetProperty {
            node: expression,
            name: "value".to_string(),
            value: PropertyValue::from("Hello World"),
        };

        let json = serde_json::to_string(&mutation).unwrap();
        let deserialized: Mutation = serde_json::from_str(&json).unwrap();

        assert_eq!(mutation, deserialized);
    }

    #[test]
    fn test_remove_last_token_cleans_expression() {
        let (mut tree, file, expression, token) = file_with_statement();

        Mutation::RemoveNode { node: token }.apply(&mut tree, file).unwrap();

        assert!(!tree.contains(token));
        assert!(!tree.contains(expression));
        assert_eq!(tree.child_count(file, "body"), 0);
    }

    #[test]
    fn test_cannot_remove_root() {
        let (mut tree, file, _, _) = file_with_statement();
        let err = Mutation::RemoveNode { node: file }.apply(&mut tree, file).unwrap_err();
        assert!(matches!(err, MutationError::CannotEditRoot));
    }

    #[test]
    fn test_insert_rejects_wrong_category() {
        let (mut tree, file, _, _) = file_with_statement();
        let nodes_before = tree.len();
        let mutation = Mutation::InsertNode {
            parent: file,
            group: "body".to_string(),
            index: 0,
            node: SerializedNode::new(js::DECLARED_IDENTIFIER).with_property("identifier", "x"),
        };

        let err = mutation.apply(&mut tree, file).unwrap_err();
        assert!(matches!(err, MutationError::InvalidStructure(e) if e.is_schema_violation()));
        assert_eq!(tree.child_count(file, "body"), 1);
        assert_eq!(tree.descendants(file).len(), 3);
        assert_eq!(tree.len(), nodes_before);
    }

    #[test]
    fn test_move_into_own_subtree_is_a_cycle() {
        let (mut tree, file, expression, token) = file_with_statement();
        let mutation = Mutation::MoveNode {
            node: expression,
            new_parent: token,
            group: "tokens".to_string(),
            index: 0,
        };
        assert!(matches!(
            mutation.validate(&tree, file),
            Err(MutationError::CycleDetected)
        ));
    }
}
