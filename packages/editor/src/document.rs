//! # Document Handle
//!
//! A Document owns one node tree and the root node it is edited from. The
//! root is always one of the file-level types (JavaScript file, HTML
//! document, Python file). Documents can be:
//! - **Memory-backed**: Temporary, for testing or in-memory operations
//! - **File-backed**: Loaded from and saved to a serialized `.json` file
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Deserialize → Edit → Generate / Layout → Save
//!   ↓         ↓          ↓            ↓             ↓
//! File    NodeTree   Mutations   code + lines     File
//! ```

use crate::cursor::Cursor;
use crate::{EditorError, Mutation, MutationResult};
use sprout_language::types::ROOT_TYPES;
use sprout_language::{
    deserialize, generate_code_string, serialize, suggest, Definition, GenerateOptions, NodeId,
    NodeTree, Registry, SerializedNode, SuggestedNode, SuggestionContext,
};
use sprout_layout::{layout, Layout, LayoutOptions};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Editable structural document
#[derive(Debug)]
pub struct Document {
    /// Path to the serialized file (if any)
    pub path: PathBuf,

    /// Current version number (increments on each successful edit)
    pub version: u64,

    tree: NodeTree,
    root: NodeId,

    /// Backing storage strategy
    storage: DocumentStorage,
}

/// Storage backend for document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentStorage {
    /// In-memory only (for testing, temp docs)
    Memory,

    /// File-backed (single-user editing)
    File { dirty: bool },
}

impl Document {
    /// Create an empty memory-backed document rooted at `root_type`.
    pub fn new(path: PathBuf, registry: Arc<Registry>, root_type: &str) -> Result<Self, EditorError> {
        Self::from_serialized(path, registry, &SerializedNode::new(root_type))
    }

    /// Build a memory-backed document from serialized form.
    pub fn from_serialized(
        path: PathBuf,
        registry: Arc<Registry>,
        serialized: &SerializedNode,
    ) -> Result<Self, EditorError> {
        if !ROOT_TYPES.contains(&serialized.node_type.as_str()) {
            return Err(EditorError::NotARootType(serialized.node_type.clone()));
        }
        let mut tree = NodeTree::new(registry);
        let root = deserialize(&mut tree, serialized)?;

        Ok(Self {
            path,
            version: 0,
            tree,
            root,
            storage: DocumentStorage::Memory,
        })
    }

    /// Create document from JSON text (memory-backed)
    pub fn from_json(path: PathBuf, registry: Arc<Registry>, json: &str) -> Result<Self, EditorError> {
        let serialized = SerializedNode::from_json(json)?;
        Self::from_serialized(path, registry, &serialized)
    }

    /// Load document from file (file-backed)
    pub fn load(path: PathBuf, registry: Arc<Registry>) -> Result<Self, EditorError> {
        let json = std::fs::read_to_string(&path)?;
        let mut doc = Self::from_json(path, registry, &json)?;
        doc.storage = DocumentStorage::File { dirty: false };
        info!(path = %doc.path.display(), nodes = doc.tree.len(), "loaded document");
        Ok(doc)
    }

    pub fn tree(&self) -> &NodeTree {
        &self.tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn root_type(&self) -> &'static str {
        self.tree.node_type(self.root).unwrap_or("")
    }

    pub fn registry(&self) -> &Arc<Registry> {
        self.tree.registry()
    }

    /// Callers must `touch` after a successful edit.
    pub(crate) fn tree_mut(&mut self) -> &mut NodeTree {
        &mut self.tree
    }

    /// Record a successful edit.
    pub(crate) fn touch(&mut self) -> u64 {
        self.version += 1;
        if let DocumentStorage::File { dirty } = &mut self.storage {
            *dirty = true;
        }
        self.version
    }

    /// Apply a mutation. Nothing changes when it fails.
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        let node = mutation.apply(&mut self.tree, self.root)?;
        let version = self.touch();
        debug!(version, ?mutation, "applied mutation");
        Ok(MutationResult { version, node })
    }

    /// Candidates for the slot at `cursor`. `text` drives the dynamic
    /// candidates only; use [`SuggestedNode::matches`] to narrow the list.
    pub fn suggestions(&self, cursor: &Cursor, text: &str, library: &[Definition]) -> Vec<SuggestedNode> {
        let Some(category) = cursor.category(&self.tree) else {
            return Vec::new();
        };
        let ctx = SuggestionContext::at(self.tree.registry(), cursor.position(&self.tree))
            .with_library(library);
        suggest(&ctx, category, text)
    }

    /// Insert an accepted suggestion at `cursor`.
    pub fn accept_suggestion(
        &mut self,
        cursor: &Cursor,
        suggestion: SuggestedNode,
    ) -> Result<MutationResult, EditorError> {
        let fragment = suggestion.fragment;
        let node = self.tree.graft(fragment.tree, fragment.root)?;
        if let Err(err) = self.tree.insert(cursor.parent, &cursor.group, cursor.index, node) {
            self.tree.discard(node)?;
            return Err(err.into());
        }
        let version = self.touch();
        debug!(version, title = %suggestion.title, "accepted suggestion");
        Ok(MutationResult {
            version,
            node: Some(node),
        })
    }

    pub fn serialize(&self) -> Result<SerializedNode, EditorError> {
        Ok(serialize(&self.tree, self.root)?)
    }

    pub fn to_json(&self) -> Result<String, EditorError> {
        Ok(self.serialize()?.to_json_pretty()?)
    }

    /// Generated target text for the whole document. Gaps produce nothing.
    pub fn generate(&self, options: &GenerateOptions) -> Result<String, EditorError> {
        Ok(generate_code_string(&self.tree, self.root, options)?.unwrap_or_default())
    }

    pub fn layout(&self, options: &LayoutOptions) -> Result<Layout, EditorError> {
        Ok(layout(&self.tree, self.root, options)?)
    }

    /// Check if document has unsaved changes
    pub fn is_dirty(&self) -> bool {
        match self.storage {
            DocumentStorage::File { dirty } => dirty,
            DocumentStorage::Memory => false,
        }
    }

    /// Save document to disk (if file-backed)
    pub fn save(&mut self) -> Result<(), EditorError> {
        match self.storage {
            DocumentStorage::File { .. } => {
                let json = self.to_json()?;
                std::fs::write(&self.path, json)?;
                self.storage = DocumentStorage::File { dirty: false };
                Ok(())
            }
            DocumentStorage::Memory => Err(EditorError::NotFileBacked),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprout_language::types::{html, js};

    fn registry() -> Arc<Registry> {
        Registry::standard().expect("Failed to build registry")
    }

    #[test]
    fn test_create_memory_document() {
        let doc = Document::new(PathBuf::from("main.json"), registry(), js::JAVASCRIPT_FILE)
            .expect("Failed to create document");
        assert_eq!(doc.version, 0);
        assert!(!doc.is_dirty());
        assert_eq!(doc.root_type(), js::JAVASCRIPT_FILE);
        assert_eq!(doc.generate(&GenerateOptions::default()).unwrap(), "");
    }

    #[test]
    fn test_non_root_type_is_rejected() {
        let err = Document::new(PathBuf::from("x.json"), registry(), js::SPLOOT_EXPRESSION)
            .unwrap_err();
        assert!(matches!(err, EditorError::NotARootType(name) if name == js::SPLOOT_EXPRESSION));
    }

    #[test]
    fn test_json_round_trip() {
        let doc = Document::new(PathBuf::from("index.json"), registry(), html::HTML_DOCUMENT).unwrap();
        let json = doc.to_json().unwrap();
        let restored = Document::from_json(PathBuf::from("index.json"), registry(), &json).unwrap();
        assert_eq!(restored.serialize().unwrap(), doc.serialize().unwrap());
    }

    #[test]
    fn test_memory_document_cannot_save() {
        let mut doc = Document::new(PathBuf::from("main.json"), registry(), js::JAVASCRIPT_FILE).unwrap();
        assert!(matches!(doc.save(), Err(EditorError::NotFileBacked)));
    }

    #[test]
    fn test_suggestions_are_not_filtered_by_text() {
        let doc = Document::new(PathBuf::from("main.json"), registry(), js::JAVASCRIPT_FILE).unwrap();
        let cursor = Cursor::append(doc.tree(), doc.root(), "body");

        let all = doc.suggestions(&cursor, "zz", &[]);
        assert!(all.iter().any(|s| s.title == "variable"));
        let matching: Vec<_> = all.iter().filter(|s| s.matches("zz")).collect();
        assert!(!matching.is_empty());
        assert!(matching.len() < all.len());
    }
}
