//! # Editing Pipeline
//!
//! Coordinates the edit loop: Mutate → Generate → Layout
//!
//! Generated text and layout are derived views. They are recomputed from the
//! whole tree after every successful edit rather than patched.
//!
//! Once an edit is committed it is reported as a success. If the views cannot
//! be rebuilt afterwards, the previous views are kept and the failure is
//! logged.

use crate::clipboard::ClipboardData;
use crate::cursor::{Cursor, Selection};
use crate::{Document, EditorError, Mutation};
use sprout_language::{GenerateOptions, NodeId, SuggestedNode};
use sprout_layout::{Layout, LayoutOptions};
use tracing::{debug, instrument, warn};

/// Manages the full edit → render pipeline
pub struct Pipeline {
    document: Document,
    generate_options: GenerateOptions,
    layout_options: LayoutOptions,
    last_result: Option<PipelineResult>,
}

/// Result of pipeline execution
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineResult {
    /// Document version the views were built from
    pub version: u64,

    /// Node the edit produced or touched, if any
    pub node: Option<NodeId>,

    /// Generated target text
    pub code: String,

    pub layout: Layout,
}

impl Pipeline {
    /// Create pipeline for document
    pub fn new(document: Document) -> Self {
        Self::with_options(document, GenerateOptions::default(), LayoutOptions::default())
    }

    pub fn with_options(
        document: Document,
        generate_options: GenerateOptions,
        layout_options: LayoutOptions,
    ) -> Self {
        Self {
            document,
            generate_options,
            layout_options,
            last_result: None,
        }
    }

    /// Apply mutation and regenerate both views
    pub fn apply_mutation(&mut self, mutation: Mutation) -> Result<PipelineResult, EditorError> {
        let result = self.document.apply(mutation)?;
        Ok(self.render(result.node))
    }

    /// Insert an accepted suggestion and regenerate
    pub fn accept_suggestion(
        &mut self,
        cursor: &Cursor,
        suggestion: SuggestedNode,
    ) -> Result<PipelineResult, EditorError> {
        let result = self.document.accept_suggestion(cursor, suggestion)?;
        Ok(self.render(result.node))
    }

    /// Paste and regenerate. An ignored paste returns the previous views
    /// untouched.
    pub fn paste(
        &mut self,
        data: &ClipboardData,
        selection: &Selection,
    ) -> Result<PipelineResult, EditorError> {
        match self.document.paste(data, selection)? {
            Some(node) => Ok(self.render(Some(node))),
            None => match &self.last_result {
                Some(last) => Ok(last.clone()),
                None => self.full_render(),
            },
        }
    }

    pub fn cut(&mut self, node: NodeId) -> Result<(ClipboardData, PipelineResult), EditorError> {
        let data = self.document.cut(node)?;
        Ok((data, self.render(None)))
    }

    /// Full regeneration (initial render, recovery). Unlike the edit
    /// methods this reports view failures.
    pub fn full_render(&mut self) -> Result<PipelineResult, EditorError> {
        let (code, layout) = self.views()?;
        Ok(self.store(None, code, layout))
    }

    /// Rebuild views after a committed edit.
    #[instrument(skip(self), fields(version = self.document.version))]
    fn render(&mut self, node: Option<NodeId>) -> PipelineResult {
        match self.views() {
            Ok((code, layout)) => self.store(node, code, layout),
            Err(err) => {
                warn!(%err, "could not rebuild views, keeping previous ones");
                let (code, layout) = match &self.last_result {
                    Some(last) => (last.code.clone(), last.layout.clone()),
                    None => (
                        String::new(),
                        Layout {
                            root: self.document.root(),
                            lines: Vec::new(),
                        },
                    ),
                };
                self.store(node, code, layout)
            }
        }
    }

    fn views(&self) -> Result<(String, Layout), EditorError> {
        let code = self.document.generate(&self.generate_options)?;
        let layout = self.document.layout(&self.layout_options)?;
        debug!(code_len = code.len(), lines = layout.lines.len(), "regenerated views");
        Ok((code, layout))
    }

    fn store(&mut self, node: Option<NodeId>, code: String, layout: Layout) -> PipelineResult {
        let result = PipelineResult {
            version: self.document.version,
            node,
            code,
            layout,
        };
        self.last_result = Some(result.clone());
        result
    }

    /// Get current document
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Get mutable document reference. Views are stale until the next render.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Get last rendered views (if any)
    pub fn last_result(&self) -> Option<&PipelineResult> {
        self.last_result.as_ref()
    }

    /// Drop cached views
    pub fn clear_cache(&mut self) {
        self.last_result = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprout_language::types::{js, literals};
    use sprout_language::{Registry, SerializedNode};
    use std::path::PathBuf;

    fn pipeline() -> Pipeline {
        let registry = Registry::standard().unwrap();
        let doc = Document::new(PathBuf::from("main.json"), registry, js::JAVASCRIPT_FILE).unwrap();
        Pipeline::new(doc)
    }

    #[test]
    fn test_pipeline_initial_render() {
        let mut pipeline = pipeline();

        let result = pipeline.full_render().expect("Failed to render");
        assert_eq!(result.version, 0);
        assert_eq!(result.code, "");
        // append placeholder for the empty body
        assert_eq!(result.layout.lines.len(), 1);
        assert!(pipeline.last_result().is_some());
    }

    #[test]
    fn test_failed_mutation_keeps_version() {
        let mut pipeline = pipeline();
        let root = pipeline.document().root();

        let result = pipeline.apply_mutation(Mutation::RemoveNode { node: root });
        assert!(result.is_err());
        assert_eq!(pipeline.document().version, 0);
    }

    #[test]
    fn test_ignored_paste_returns_previous_views() {
        let mut pipeline = pipeline();
        let first = pipeline.full_render().unwrap();
        let root = pipeline.document().root();
        let cursor = Cursor::new(root, "body", 0);

        let result = pipeline
            .paste(&ClipboardData::from_text("just words"), &cursor.into())
            .unwrap();
        assert_eq!(result, first);
    }

    #[test]
    fn test_adjacent_token_mutation_reports_success() {
        let mut pipeline = pipeline();
        let root = pipeline.document().root();
        let statement = SerializedNode::new(js::SPLOOT_EXPRESSION).with_children(
            "tokens",
            vec![SerializedNode::new(literals::NUMERIC_LITERAL).with_property("value", 42.0)],
        );
        let expression = pipeline
            .apply_mutation(Mutation::InsertNode {
                parent: root,
                group: "body".to_string(),
                index: 0,
                node: statement,
            })
            .expect("Failed to insert statement")
            .node
            .unwrap();

        let result = pipeline
            .apply_mutation(Mutation::InsertNode {
                parent: expression,
                group: "tokens".to_string(),
                index: 1,
                node: SerializedNode::new(literals::NUMERIC_LITERAL).with_property("value", 7.0),
            })
            .expect("Committed edit should succeed");

        assert_eq!(result.version, 2);
        assert_eq!(result.code, "42;\n");
        assert_eq!(pipeline.document().tree().child_count(expression, "tokens"), 2);
        assert_eq!(pipeline.full_render().unwrap().code, "42;\n");
    }
}
