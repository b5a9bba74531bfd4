//! Serialized node format used for persistence and the clipboard.

use crate::error::{LanguageError, LanguageResult};
use crate::node::{NodeId, PropertyValue};
use crate::tree::NodeTree;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `{ type, properties, childSets }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedNode {
    #[serde(rename = "type")]
    pub node_type: String,

    #[serde(default)]
    pub properties: BTreeMap<String, PropertyValue>,

    #[serde(rename = "childSets", default)]
    pub child_sets: BTreeMap<String, Vec<SerializedNode>>,
}

impl SerializedNode {
    pub fn new(node_type: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            properties: BTreeMap::new(),
            child_sets: BTreeMap::new(),
        }
    }

    pub fn with_property(mut self, name: &str, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(name.to_string(), value.into());
        self
    }

    pub fn with_children(mut self, group: &str, children: Vec<SerializedNode>) -> Self {
        self.child_sets.insert(group.to_string(), children);
        self
    }

    pub fn string_property(&self, name: &str) -> &str {
        self.properties
            .get(name)
            .and_then(PropertyValue::as_str)
            .unwrap_or("")
    }

    pub fn number_property(&self, name: &str) -> f64 {
        self.properties
            .get(name)
            .and_then(PropertyValue::as_f64)
            .unwrap_or(0.0)
    }

    pub fn children(&self, group: &str) -> &[SerializedNode] {
        self.child_sets.get(group).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn to_json(&self) -> LanguageResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> LanguageResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> LanguageResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Serialize a node and its whole subtree.
pub fn serialize(tree: &NodeTree, id: NodeId) -> LanguageResult<SerializedNode> {
    let node = tree.get(id).ok_or(LanguageError::NodeNotFound(id))?;
    let mut child_sets = BTreeMap::new();
    for group in node.child_groups() {
        let children = group
            .children()
            .iter()
            .map(|child| serialize(tree, *child))
            .collect::<LanguageResult<Vec<_>>>()?;
        child_sets.insert(group.name().to_string(), children);
    }
    Ok(SerializedNode {
        node_type: node.node_type().to_string(),
        properties: node.properties().clone(),
        child_sets,
    })
}

/// Rebuild a detached subtree inside `tree`.
pub fn deserialize(tree: &mut NodeTree, serialized: &SerializedNode) -> LanguageResult<NodeId> {
    let deserializer = tree.registry().lookup(&serialized.node_type)?.deserializer;
    deserializer(tree, serialized)
}

/// Deserialize the children of `group` and append them to `id`.
pub fn deserialize_child_group(
    tree: &mut NodeTree,
    id: NodeId,
    group: &str,
    serialized: &SerializedNode,
) -> LanguageResult<()> {
    for child in serialized.children(group) {
        let child_id = deserialize(tree, child)?;
        tree.append(id, group, child_id)?;
    }
    Ok(())
}
