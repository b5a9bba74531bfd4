//! # Inline geometry
//!
//! Horizontal fragments produced while walking a node's layout description.
//! They carry x offsets and widths only; vertical placement belongs to
//! [`Line`](crate::Line).

use serde::Serialize;
use sprout_language::{LayoutComponent, LayoutComponentType, NodeId};

/// One drawn component of a node: keyword, property or nested child group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedInlineComponent {
    pub component: LayoutComponent,
    pub width: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child_set: Option<InlineChildSet>,
}

impl RenderedInlineComponent {
    pub fn new(component: LayoutComponent, width: f64) -> Self {
        Self {
            component,
            width,
            child_set: None,
        }
    }

    pub fn with_child_set(component: LayoutComponent, width: f64, child_set: InlineChildSet) -> Self {
        Self {
            component,
            width,
            child_set: Some(child_set),
        }
    }
}

/// The part of a child group drawn on its parent's line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineChildSet {
    pub kind: LayoutComponentType,
    /// Node owning the group
    pub parent: NodeId,
    pub group: &'static str,
    pub nodes: Vec<InlineNode>,
    pub x: f64,
    pub width: f64,
}

/// A node drawn inline, left to right.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineNode {
    pub node: NodeId,
    pub node_type: &'static str,
    pub x: f64,
    pub components: Vec<RenderedInlineComponent>,
}

impl InlineNode {
    pub fn new(node: NodeId, node_type: &'static str, x: f64) -> Self {
        Self {
            node,
            node_type,
            x,
            components: Vec::new(),
        }
    }

    pub fn push(&mut self, component: RenderedInlineComponent) {
        self.components.push(component);
    }

    /// Total width of everything this node draws on its own line.
    pub fn line_width(&self) -> f64 {
        self.components.iter().map(|c| c.width).sum()
    }

    /// Inline descendants, depth first, including this node.
    pub fn walk(&self) -> Vec<&InlineNode> {
        let mut out = vec![self];
        for component in &self.components {
            if let Some(child_set) = &component.child_set {
                for node in &child_set.nodes {
                    out.extend(node.walk());
                }
            }
        }
        out
    }
}
