//! Built-in node types.
//!
//! Each type module exposes its type name constant, an infallible `create`
//! constructor, and a `register` function contributing its registration and
//! category memberships to the start-up [`RegistryBuilder`].

pub mod component;
pub mod html;
pub mod js;
pub mod literals;
pub mod python;
pub mod styles;

use crate::error::LanguageResult;
use crate::node::NodeId;
use crate::registry::RegistryBuilder;
use crate::tree::NodeTree;
use tracing::warn;

pub use component::{COMPONENT_DECLARATION, DECLARED_PROPERTY};
pub use html::{
    HTML_ATTRIBUTE, HTML_DOCUMENT, HTML_ELEMENT, HTML_SCRIPT_ELEMENT, HTML_STYLE_ELEMENT,
};
pub use js::{
    BINARY_OPERATOR, CALL_VARIABLE, DECLARED_IDENTIFIER, INLINE_FUNCTION_DECLARATION,
    JAVASCRIPT_FILE, SPLOOT_EXPRESSION, VARIABLE_DECLARATION, VARIABLE_REFERENCE,
};
pub use literals::{NUMERIC_LITERAL, STRING_LITERAL};
pub use python::{PYTHON_EXPRESSION, PYTHON_FILE};
pub use styles::{STYLE_PROPERTY, STYLE_RULE, STYLE_SELECTOR_BASIC};

/// Root types: documents that are never a member of any category.
pub const ROOT_TYPES: &[&str] = &[JAVASCRIPT_FILE, HTML_DOCUMENT, PYTHON_FILE];

pub fn register_all(builder: &mut RegistryBuilder) -> LanguageResult<()> {
    literals::register(builder)?;
    js::register(builder)?;
    component::register(builder)?;
    html::register(builder)?;
    styles::register(builder)?;
    python::register(builder)?;
    Ok(())
}

/// An expression container whose token list is empty.
pub(crate) fn is_empty_expression(tree: &NodeTree, id: NodeId) -> bool {
    match tree.node_type(id) {
        Some(SPLOOT_EXPRESSION) | Some(PYTHON_EXPRESSION) => tree.child_count(id, "tokens") == 0,
        _ => false,
    }
}

/// Remove and free every empty expression left in `group`.
pub(crate) fn prune_empty_expressions(tree: &mut NodeTree, id: NodeId, group: &str) {
    let children = tree.children(id, group).to_vec();
    for (index, child) in children.into_iter().enumerate().rev() {
        if !is_empty_expression(tree, child) {
            continue;
        }
        let pruned = tree
            .remove(id, group, index)
            .and_then(|removed| tree.discard(removed));
        if let Err(err) = pruned {
            warn!(?id, group, index, %err, "could not prune empty expression");
        }
    }
}

/// Clean hook shared by expression containers: an emptied expression asks its
/// parent to clean, which usually prunes it.
pub(crate) fn clean_expression(tree: &mut NodeTree, id: NodeId) {
    if tree.child_count(id, "tokens") > 0 {
        return;
    }
    if let Some(parent) = tree.parent(id).map(|p| p.node) {
        tree.clean(parent);
    }
}
