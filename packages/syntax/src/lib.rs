//! # Sprout Syntax
//!
//! Backing syntax trees for the sub-languages a structural program can be
//! generated into, plus deterministic printers for each of them.
//!
//! ```text
//! node tree ──generate──▶ js::Program / css::StyleSheet / html::HtmlNode ──print──▶ text
//! ```
//!
//! The trees here are intentionally small: they cover the constructs the
//! built-in node types emit and nothing more.

mod context;
pub mod css;
pub mod error;
pub mod html;
pub mod js;
pub mod python;

pub use context::PrintContext;
pub use error::{SyntaxError, SyntaxResult};

#[cfg(test)]
mod tests;
