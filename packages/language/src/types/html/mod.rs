//! HTML node types.

pub mod attribute;
pub mod document;
pub mod element;
pub mod script_element;
pub mod style_element;

use crate::error::{LanguageError, LanguageResult};
use crate::generate::{generate, Generated};
use crate::node::NodeId;
use crate::registry::RegistryBuilder;
use crate::tree::NodeTree;
use crate::types::literals::string_value;
use sprout_syntax::html::{Element, HtmlNode};

pub use attribute::HTML_ATTRIBUTE;
pub use document::HTML_DOCUMENT;
pub use element::HTML_ELEMENT;
pub use script_element::HTML_SCRIPT_ELEMENT;
pub use style_element::HTML_STYLE_ELEMENT;

pub(crate) fn register(builder: &mut RegistryBuilder) -> LanguageResult<()> {
    document::register(builder)?;
    element::register(builder)?;
    attribute::register(builder)?;
    script_element::register(builder)?;
    style_element::register(builder)?;
    Ok(())
}

/// Markup for a node sitting in a DOM slot. String literals become text.
pub(crate) fn generate_dom_node(tree: &NodeTree, id: NodeId) -> LanguageResult<Option<HtmlNode>> {
    if let Some(text) = string_value(tree, id) {
        return Ok(Some(HtmlNode::Text(text.to_string())));
    }
    match generate(tree, id)? {
        None => Ok(None),
        Some(Generated::Html(node)) => Ok(Some(node)),
        Some(_) => Err(LanguageError::generation(format!(
            "{} cannot appear in markup",
            tree.node_type(id).unwrap_or("?")
        ))),
    }
}

pub(crate) fn generate_dom_children(
    tree: &NodeTree,
    id: NodeId,
    group: &str,
) -> LanguageResult<Vec<HtmlNode>> {
    let mut out = Vec::new();
    for child in tree.children(id, group) {
        if let Some(node) = generate_dom_node(tree, *child)? {
            out.push(node);
        }
    }
    Ok(out)
}

/// Copy every attribute child of `id` onto `element`.
pub(crate) fn apply_attributes(tree: &NodeTree, id: NodeId, element: &mut Element) {
    for child in tree.children(id, "attributes") {
        if tree.node_type(*child) == Some(HTML_ATTRIBUTE) {
            element.set_attribute(
                attribute::name_of(tree, *child),
                attribute::value_of(tree, *child),
            );
        }
    }
}
