use serde::{Deserialize, Serialize};

/// Spacing constants used by the layout engine, in pixels.
///
/// Loaded from the `layout` block of `sprout.config.json`; any field left out
/// keeps its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutOptions {
    /// Horizontal step for each nested block level
    pub indent: f64,
    pub node_inline_spacing: f64,
    /// Spacing for layouts flagged `small`
    pub node_inline_spacing_small: f64,
    /// Gap before a tree or attach-right child
    pub attached_child_spacing: f64,
    pub tree_children_dot_size: f64,
    /// Width of a single character of rendered text
    pub char_width: f64,
    pub row_height: f64,
    /// Indent of the first visible block level
    pub top_level_indent: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            indent: 30.0,
            node_inline_spacing: 8.0,
            node_inline_spacing_small: 2.0,
            attached_child_spacing: 18.0,
            tree_children_dot_size: 8.0,
            char_width: 8.0,
            row_height: 30.0,
            top_level_indent: 24.0,
        }
    }
}

impl LayoutOptions {
    pub fn string_width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.char_width
    }

    pub(crate) fn inline_spacing(&self, small: bool) -> f64 {
        if small {
            self.node_inline_spacing_small
        } else {
            self.node_inline_spacing
        }
    }
}
