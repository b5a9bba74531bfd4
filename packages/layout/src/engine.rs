//! # Layout engine
//!
//! Turns a node tree into positioned lines in two passes:
//!
//! ```text
//! render_inline_node (recursive, x only) ──▶ Vec<Line> ──▶ assign_y (linear)
//! ```
//!
//! The recursive pass never looks at absolute vertical position, so it can be
//! re-run from scratch after every mutation.

use crate::line::{Line, LinePosition};
use crate::options::LayoutOptions;
use crate::rendered::{InlineChildSet, InlineNode, RenderedInlineComponent};
use serde::Serialize;
use sprout_language::{
    LanguageError, LanguageResult, LayoutComponent, LayoutComponentType, NodeId, NodeTree,
};
use tracing::{debug, instrument};

/// Flat, vertically positioned line sequence for one root node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub root: NodeId,
    pub lines: Vec<Line>,
}

impl Layout {
    pub fn height(&self) -> f64 {
        self.lines.last().map(|l| l.y + l.height).unwrap_or(0.0)
    }

    /// Line covering vertical coordinate `y`.
    pub fn line_at_y(&self, y: f64) -> Option<&Line> {
        if y < 0.0 {
            return None;
        }
        let index = self.lines.partition_point(|line| line.y + line.height <= y);
        self.lines.get(index).filter(|line| line.contains_y(y))
    }

    /// Logical position under `y`, for renderer hit-testing.
    pub fn position_at_y(&self, y: f64) -> Option<LinePosition> {
        self.line_at_y(y).map(Line::position)
    }

    /// First line showing `node`, either as the line's own node or inline.
    pub fn line_for_node(&self, node: NodeId) -> Option<&Line> {
        self.lines.iter().find(|line| {
            line.node
                .as_ref()
                .map(|inline| inline.walk().iter().any(|n| n.node == node))
                .unwrap_or(false)
        })
    }
}

/// Lay out `root`. The root itself is not drawn; only the lines its child
/// groups produce are returned.
#[instrument(skip(tree, options), fields(root = root.index()))]
pub fn layout(tree: &NodeTree, root: NodeId, options: &LayoutOptions) -> LanguageResult<Layout> {
    let engine = LayoutEngine { tree, options };
    let (_, mut lines) = engine.render_inline_node(root, options.top_level_indent - options.indent)?;
    assign_y(&mut lines);
    debug!(lines = lines.len(), "layout complete");
    Ok(Layout { root, lines })
}

fn assign_y(lines: &mut [Line]) {
    let mut y = 0.0;
    for line in lines {
        line.y = y;
        y += line.height;
    }
}

struct LayoutEngine<'a> {
    tree: &'a NodeTree,
    options: &'a LayoutOptions,
}

impl<'a> LayoutEngine<'a> {
    /// Nodes whose layout opens with a token list own the cursor slot at the
    /// start of their line; everything else gets spacing reserved for it.
    fn has_starting_cursor(&self, node: NodeId) -> LanguageResult<bool> {
        let layout = &self.registration_layout(node)?.components;
        Ok(matches!(
            layout.first(),
            Some(LayoutComponent {
                kind: LayoutComponentType::ChildSetTokenList,
                ..
            })
        ))
    }

    fn registration_layout(&self, node: NodeId) -> LanguageResult<&'a sprout_language::NodeLayout> {
        let node_type = self
            .tree
            .node_type(node)
            .ok_or(LanguageError::NodeNotFound(node))?;
        Ok(&self.tree.registry().lookup(node_type)?.layout)
    }

    fn render_whole_lines(
        &self,
        parent: NodeId,
        group: &'static str,
        index: usize,
        node: NodeId,
        mut indent: f64,
    ) -> LanguageResult<Vec<Line>> {
        let starting_cursor = self.has_starting_cursor(node)?;
        if !starting_cursor {
            indent += self.options.node_inline_spacing;
        }
        let (inline, child_lines) = self.render_inline_node(node, indent)?;
        let mut lines = Vec::with_capacity(child_lines.len() + 1);
        lines.push(Line::new(
            parent,
            group,
            index,
            Some(inline),
            indent,
            starting_cursor,
            self.options.row_height,
        ));
        lines.extend(child_lines);
        Ok(lines)
    }

    /// Render `node` starting at horizontal offset `indent`. Returns the inline
    /// fragment plus every extra line its child groups push below it.
    fn render_inline_node(&self, node: NodeId, indent: f64) -> LanguageResult<(InlineNode, Vec<Line>)> {
        let options = self.options;
        let node_type = self
            .tree
            .node_type(node)
            .ok_or(LanguageError::NodeNotFound(node))?;
        let layout = self.registration_layout(node)?;
        let spacing = options.inline_spacing(layout.small);

        let mut extra_lines = Vec::new();
        let mut left = if layout.block { indent + spacing } else { indent };
        let mut inline = InlineNode::new(node, node_type, indent);

        for component in &layout.components {
            let group = component.identifier;
            match component.kind {
                LayoutComponentType::ChildSetBlock => {
                    let children = self.tree.children(node, group);
                    for (index, child) in children.iter().enumerate() {
                        extra_lines.extend(self.render_whole_lines(
                            node,
                            group,
                            index,
                            *child,
                            indent + options.indent,
                        )?);
                    }
                    // Append placeholder
                    extra_lines.push(Line::new(
                        node,
                        group,
                        children.len(),
                        None,
                        indent + options.indent + options.node_inline_spacing,
                        true,
                        options.row_height,
                    ));
                }
                LayoutComponentType::StringLiteral => {
                    let value = self
                        .tree
                        .property(node, group)
                        .map(|v| v.to_string())
                        .unwrap_or_default();
                    let width = options.string_width(&format!("\"\"{}", value)) + spacing;
                    left += width;
                    inline.push(RenderedInlineComponent::new(*component, width));
                }
                LayoutComponentType::Property => {
                    let value = self
                        .tree
                        .property(node, group)
                        .map(|v| v.to_string())
                        .unwrap_or_default();
                    let width = options.string_width(&value) + spacing;
                    left += width;
                    inline.push(RenderedInlineComponent::new(*component, width));
                }
                LayoutComponentType::Keyword => {
                    let width = options.string_width(group) + spacing;
                    left += width;
                    inline.push(RenderedInlineComponent::new(*component, width));
                }
                LayoutComponentType::ChildSetTree | LayoutComponentType::ChildSetTreeBrackets => {
                    let lead = options.tree_children_dot_size
                        + options.node_inline_spacing
                        + options.attached_child_spacing;
                    left += lead;
                    let children = self.tree.children(node, group);
                    let mut nodes = Vec::new();
                    if let Some(first) = children.first() {
                        let (child, child_lines) = self.render_inline_node(*first, left)?;
                        nodes.push(child);
                        extra_lines.extend(child_lines);
                    }
                    for (index, child) in children.iter().enumerate().skip(1) {
                        extra_lines.extend(self.render_whole_lines(node, group, index, *child, left)?);
                    }
                    let width = nodes.iter().map(InlineNode::line_width).sum();
                    let child_set = InlineChildSet {
                        kind: component.kind,
                        parent: node,
                        group,
                        nodes,
                        x: left,
                        width,
                    };
                    left += width;
                    inline.push(RenderedInlineComponent::with_child_set(*component, lead + width, child_set));
                }
                LayoutComponentType::ChildSetInline => {
                    let x = left;
                    let mut nodes = Vec::new();
                    for child in self.tree.children(node, group) {
                        let (child, child_lines) = self.render_inline_node(*child, left)?;
                        left += child.line_width();
                        nodes.push(child);
                        extra_lines.extend(child_lines);
                    }
                    let width = left - x;
                    let child_set = InlineChildSet {
                        kind: component.kind,
                        parent: node,
                        group,
                        nodes,
                        x,
                        width,
                    };
                    inline.push(RenderedInlineComponent::with_child_set(*component, width, child_set));
                }
                LayoutComponentType::ChildSetBreadcrumbs => {
                    // Nothing is drawn for an empty breadcrumb group.
                    if let Some(first) = self.tree.first_child(node, group) {
                        let (child, child_lines) = self.render_inline_node(first, left)?;
                        extra_lines.extend(child_lines);
                        let width = child.line_width();
                        let child_set = InlineChildSet {
                            kind: component.kind,
                            parent: node,
                            group,
                            nodes: vec![child],
                            x: left,
                            width,
                        };
                        left += width;
                        inline.push(RenderedInlineComponent::with_child_set(*component, width, child_set));
                    }
                }
                LayoutComponentType::ChildSetAttachRight => {
                    let lead = options.node_inline_spacing + options.attached_child_spacing;
                    left += lead;
                    let mut nodes = Vec::new();
                    if let Some(first) = self.tree.first_child(node, group) {
                        let (child, child_lines) = self.render_inline_node(first, left)?;
                        extra_lines.extend(child_lines);
                        nodes.push(child);
                    }
                    let width = nodes.iter().map(InlineNode::line_width).sum();
                    let child_set = InlineChildSet {
                        kind: component.kind,
                        parent: node,
                        group,
                        nodes,
                        x: left,
                        width,
                    };
                    left += width;
                    inline.push(RenderedInlineComponent::with_child_set(*component, lead + width, child_set));
                }
                LayoutComponentType::ChildSetTokenList => {
                    let x = left;
                    left += options.node_inline_spacing;
                    let mut nodes = Vec::new();
                    for child in self.tree.children(node, group) {
                        let (child, child_lines) = self.render_inline_node(*child, left)?;
                        left += child.line_width() + options.node_inline_spacing;
                        nodes.push(child);
                        extra_lines.extend(child_lines);
                    }
                    let width = left - x;
                    let child_set = InlineChildSet {
                        kind: component.kind,
                        parent: node,
                        group,
                        nodes,
                        x,
                        width,
                    };
                    inline.push(RenderedInlineComponent::with_child_set(*component, width, child_set));
                }
            }
        }

        Ok((inline, extra_lines))
    }
}
