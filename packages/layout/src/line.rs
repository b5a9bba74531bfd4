use crate::rendered::InlineNode;
use serde::Serialize;
use sprout_language::NodeId;

/// One positioned row of the visual layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    /// Node owning the child group this line belongs to
    pub parent: NodeId,
    pub group: &'static str,
    /// Position in the group; equal to the group's length for the append
    /// placeholder
    pub index: usize,
    /// `None` for the empty placeholder line
    pub node: Option<InlineNode>,
    pub indent: f64,
    /// The cursor can rest at the start of this line
    pub cursor_anchor: bool,
    pub height: f64,
    /// Assigned by the coordinate pass
    pub y: f64,
}

/// Logical position a line stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LinePosition {
    pub parent: NodeId,
    pub group: &'static str,
    pub index: usize,
    pub node: Option<NodeId>,
}

impl Line {
    pub(crate) fn new(
        parent: NodeId,
        group: &'static str,
        index: usize,
        node: Option<InlineNode>,
        indent: f64,
        cursor_anchor: bool,
        height: f64,
    ) -> Self {
        Self {
            parent,
            group,
            index,
            node,
            indent,
            cursor_anchor,
            height,
            y: 0.0,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.node.is_none()
    }

    pub fn width(&self) -> f64 {
        self.node.as_ref().map(InlineNode::line_width).unwrap_or(0.0)
    }

    pub fn contains_y(&self, y: f64) -> bool {
        y >= self.y && y < self.y + self.height
    }

    pub fn position(&self) -> LinePosition {
        LinePosition {
            parent: self.parent,
            group: self.group,
            index: self.index,
            node: self.node.as_ref().map(|n| n.node),
        }
    }
}
