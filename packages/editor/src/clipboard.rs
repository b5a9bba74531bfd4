//! # Clipboard
//!
//! Copy exposes a node's serialized JSON under two kinds: the private
//! structured kind and a plain-text fallback carrying the same text.
//!
//! Paste prefers the structured payload, falls back to parsing the plain
//! text, then runs the result through adaptation against the destination
//! group's category. Anything that cannot be read or adapted is dropped
//! silently and the document is left alone.

use crate::cursor::Selection;
use crate::mutations::remove_and_clean;
use crate::{Document, EditorError};
use serde::{Deserialize, Serialize};
use sprout_language::{adapt, deserialize, serialize, Arity, NodeId, NodeTree, SerializedNode};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Private structured kind for serialized nodes.
pub const NODE_DATA_KIND: &str = "application/splootcodenode";
pub const TEXT_DATA_KIND: &str = "text/plain";

/// Clipboard contents keyed by data kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClipboardData {
    entries: BTreeMap<String, String>,
}

impl ClipboardData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only plain text, as pasted from outside the editor.
    pub fn from_text(text: impl Into<String>) -> Self {
        let mut data = Self::new();
        data.set(TEXT_DATA_KIND, text);
        data
    }

    pub fn set(&mut self, kind: &str, data: impl Into<String>) {
        self.entries.insert(kind.to_string(), data.into());
    }

    pub fn get(&self, kind: &str) -> Option<&str> {
        self.entries.get(kind).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The node carried by this clipboard, if any payload parses.
    pub fn node_payload(&self) -> Option<SerializedNode> {
        [NODE_DATA_KIND, TEXT_DATA_KIND]
            .iter()
            .filter_map(|kind| self.get(kind))
            .find_map(|text| SerializedNode::from_json(text).ok())
    }
}

/// Gap a paste lands in, plus the node it replaces.
struct PasteTarget {
    parent: NodeId,
    group: String,
    index: usize,
    replacing: Option<NodeId>,
}

impl Document {
    pub fn copy(&self, node: NodeId) -> Result<ClipboardData, EditorError> {
        let json = serialize(self.tree(), node)?.to_json()?;
        let mut data = ClipboardData::new();
        data.set(NODE_DATA_KIND, json.clone());
        data.set(TEXT_DATA_KIND, json);
        Ok(data)
    }

    /// Copy, then remove the node with the usual clean cascade.
    pub fn cut(&mut self, node: NodeId) -> Result<ClipboardData, EditorError> {
        if node == self.root() {
            return Err(crate::MutationError::CannotEditRoot.into());
        }
        let data = self.copy(node)?;
        remove_and_clean(self.tree_mut(), node)?;
        self.touch();
        Ok(data)
    }

    /// Paste at a cursor, or over a selected node. `Ok(None)` means the
    /// payload was ignored.
    pub fn paste(
        &mut self,
        data: &ClipboardData,
        selection: &Selection,
    ) -> Result<Option<NodeId>, EditorError> {
        let Some(serialized) = data.node_payload() else {
            debug!("clipboard holds no node payload");
            return Ok(None);
        };
        let Some(target) = self.paste_target(selection) else {
            debug!(?selection, "selection is not a paste position");
            return Ok(None);
        };
        let Some(group) = self.tree().child_group(target.parent, &target.group) else {
            warn!(group = %target.group, "paste into missing child group");
            return Ok(None);
        };
        let (category, arity, occupied) = (group.category(), group.arity(), !group.is_empty());
        if arity == Arity::Single && occupied && target.replacing.is_none() {
            debug!(group = %target.group, "single slot already filled");
            return Ok(None);
        }

        let mut scratch = NodeTree::new(self.registry().clone());
        let root = match deserialize(&mut scratch, &serialized) {
            Ok(root) => root,
            Err(err) => {
                debug!(%err, "clipboard payload does not deserialize");
                return Ok(None);
            }
        };
        let Some(adapted) = adapt(&mut scratch, root, category) else {
            return Ok(None);
        };

        let tree = self.tree_mut();
        let node = tree.graft(scratch, adapted)?;
        if let Some(replaced) = target.replacing {
            tree.detach(replaced)?;
            tree.discard(replaced)?;
        }
        tree.insert(target.parent, &target.group, target.index, node)?;
        let version = self.touch();
        debug!(version, ?node, "pasted node");
        Ok(Some(node))
    }

    fn paste_target(&self, selection: &Selection) -> Option<PasteTarget> {
        match selection {
            Selection::Cursor(cursor) => cursor.is_valid(self.tree()).then(|| PasteTarget {
                parent: cursor.parent,
                group: cursor.group.clone(),
                index: cursor.index,
                replacing: None,
            }),
            Selection::Node(node) => {
                let parent = self.tree().parent(*node)?;
                Some(PasteTarget {
                    parent: parent.node,
                    group: parent.group.clone(),
                    index: parent.index,
                    replacing: Some(*node),
                })
            }
        }
    }
}
