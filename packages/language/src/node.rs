//! # Nodes and child groups
//!
//! A [`Node`] is a typed element of the structural document. It owns a set of
//! named [`ChildGroup`]s and keeps a non-owning [`ParentRef`] back to the
//! position it occupies. Nodes live in a [`NodeTree`](crate::NodeTree) arena
//! and refer to each other by [`NodeId`].

use crate::category::NodeCategory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Handle to a node inside a [`NodeTree`](crate::NodeTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Primitive property value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Boolean(bool),
    Number(f64),
    String(String),
}

impl PropertyValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Boolean(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Boolean(value) => write!(f, "{}", value),
            PropertyValue::Number(value) => f.write_str(&sprout_syntax::js::format_number(*value)),
            PropertyValue::String(value) => f.write_str(value),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::String(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Number(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Boolean(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arity {
    /// Zero or one member
    Single,
    /// Any number of members
    Many,
}

/// Ordered, category-constrained sequence of children owned by one node.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildGroup {
    name: &'static str,
    arity: Arity,
    category: NodeCategory,
    pub(crate) children: Vec<NodeId>,
}

impl ChildGroup {
    pub(crate) fn new(name: &'static str, arity: Arity, category: NodeCategory) -> Self {
        Self {
            name,
            arity,
            category,
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn category(&self) -> NodeCategory {
        self.category
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn get(&self, index: usize) -> Option<NodeId> {
        self.children.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// Where a node sits: owning node, group name and index within that group.
///
/// This is a back-reference only; ownership runs strictly parent → child.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentRef {
    pub node: NodeId,
    pub group: String,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    node_type: &'static str,
    pub(crate) properties: BTreeMap<String, PropertyValue>,
    pub(crate) child_groups: Vec<ChildGroup>,
    pub(crate) parent: Option<ParentRef>,
}

impl Node {
    pub(crate) fn new(node_type: &'static str) -> Self {
        Self {
            node_type,
            properties: BTreeMap::new(),
            child_groups: Vec::new(),
            parent: None,
        }
    }

    pub fn node_type(&self) -> &'static str {
        self.node_type
    }

    pub fn properties(&self) -> &BTreeMap<String, PropertyValue> {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    /// Child groups in declaration order
    pub fn child_groups(&self) -> &[ChildGroup] {
        &self.child_groups
    }

    pub fn child_group(&self, name: &str) -> Option<&ChildGroup> {
        self.child_groups.iter().find(|g| g.name == name)
    }

    pub(crate) fn child_group_mut(&mut self, name: &str) -> Option<&mut ChildGroup> {
        self.child_groups.iter_mut().find(|g| g.name == name)
    }

    pub fn parent(&self) -> Option<&ParentRef> {
        self.parent.as_ref()
    }
}
