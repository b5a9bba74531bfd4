use super::generate_dom_children;
use crate::category::NodeCategory;
use crate::error::LanguageResult;
use crate::generate::Generated;
use crate::node::{Arity, NodeId};
use crate::registry::RegistryBuilder;
use crate::schema::{LayoutComponent, NodeLayout, TypeRegistration};
use crate::serialize::{deserialize_child_group, SerializedNode};
use crate::tree::NodeTree;
use sprout_syntax::html::serialize_document;

/// Root of a markup document.
pub const HTML_DOCUMENT: &str = "HTML_DOCUMENT";

pub fn create(tree: &mut NodeTree) -> NodeId {
    let id = tree.create_node(HTML_DOCUMENT);
    tree.add_child_group(id, "body", Arity::Many, NodeCategory::DomNode);
    id
}

fn deserialize(tree: &mut NodeTree, serialized: &SerializedNode) -> LanguageResult<NodeId> {
    let id = create(tree);
    deserialize_child_group(tree, id, "body", serialized)?;
    Ok(id)
}

fn generate(tree: &NodeTree, id: NodeId) -> LanguageResult<Option<Generated>> {
    let children = generate_dom_children(tree, id, "body")?;
    Ok(Some(Generated::Text(serialize_document(&children))))
}

pub(crate) fn register(builder: &mut RegistryBuilder) -> LanguageResult<()> {
    builder.register_type(
        TypeRegistration::new(
            HTML_DOCUMENT,
            deserialize,
            NodeLayout::new(vec![LayoutComponent::block("body")]),
        )
        .with_child_set("body", NodeCategory::DomNode)
        .with_generator(generate),
    )
}
