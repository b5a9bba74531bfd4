//! # Sprout Editor
//!
//! Document editing engine for structural Sprout documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ language: NodeTree, registry, suggestions   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document lifecycle + mutations      │
//! │  - Load/save serialized documents           │
//! │  - Apply mutations with validation          │
//! │  - Clipboard copy / cut / paste             │
//! │  - Regenerate code and layout               │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ layout: NodeTree → positioned lines         │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Tree is source of truth**: generated code and layout are derived views
//! 2. **Structural edits only**: node-level operations, never text diffs
//! 3. **Local recovery**: empty leftovers are cleaned up, bad pastes ignored
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sprout_editor::{Document, Mutation, Pipeline};
//!
//! let doc = Document::load("main.json".into(), Registry::standard()?)?;
//! let mut pipeline = Pipeline::new(doc);
//!
//! let result = pipeline.apply_mutation(Mutation::RemoveNode { node })?;
//! println!("{}", result.code);
//! ```

mod clipboard;
mod cursor;
mod document;
mod errors;
mod mutations;
mod pipeline;

pub use clipboard::{ClipboardData, NODE_DATA_KIND, TEXT_DATA_KIND};
pub use cursor::{Cursor, Selection};
pub use document::{Document, DocumentStorage};
pub use errors::EditorError;
pub use mutations::{Mutation, MutationError, MutationResult};
pub use pipeline::{Pipeline, PipelineResult};

// Re-export common types for convenience
pub use sprout_language::{NodeId, SerializedNode};
pub use sprout_layout::{Layout, LayoutOptions};
