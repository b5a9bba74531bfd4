//! # Sprout Layout
//!
//! Geometry for the structural editor. A node tree goes in, a flat list of
//! [`Line`]s comes out; each line binds a (group, index) position to an
//! optional [`InlineNode`] with its horizontal geometry and a vertical offset.
//!
//! Layout is a pure function of the tree. Callers re-run it after every
//! mutation instead of patching the previous result.
//!
//! ```rust,ignore
//! let result = layout(&tree, file, &LayoutOptions::default())?;
//! if let Some(line) = result.line_at_y(45.0) {
//!     let position = line.position();
//! }
//! ```

mod engine;
mod line;
mod options;
mod rendered;

pub use engine::{layout, Layout};
pub use line::{Line, LinePosition};
pub use options::LayoutOptions;
pub use rendered::{InlineChildSet, InlineNode, RenderedInlineComponent};

#[cfg(test)]
mod tests;
