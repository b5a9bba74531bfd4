use super::variable_reference;
use super::variable_reference::VARIABLE_REFERENCE;
use crate::category::NodeCategory;
use crate::error::LanguageResult;
use crate::generate::Generated;
use crate::node::NodeId;
use crate::registry::RegistryBuilder;
use crate::schema::{LayoutComponent, NodeLayout, TypeRegistration};
use crate::serialize::SerializedNode;
use crate::suggestion::{
    sanitize_identifier, Fragment, SuggestedNode, SuggestionContext, SuggestionGenerator,
};
use crate::tree::NodeTree;
use sprout_syntax::js::Expression;

/// The name introduced by a declaration.
pub const DECLARED_IDENTIFIER: &str = "DECLARED_IDENTIFIER";

pub fn create(tree: &mut NodeTree, name: &str) -> NodeId {
    let id = tree.create_node(DECLARED_IDENTIFIER);
    tree.init_property(id, "identifier", name);
    id
}

pub fn name_of(tree: &NodeTree, id: NodeId) -> &str {
    tree.property_str(id, "identifier")
}

/// Name held by the first declared identifier in `group`, if any.
pub fn declared_name<'a>(tree: &'a NodeTree, parent: NodeId, group: &str) -> Option<&'a str> {
    tree.first_child(parent, group)
        .filter(|child| tree.node_type(*child) == Some(DECLARED_IDENTIFIER))
        .map(|child| name_of(tree, child))
}

struct Generator;

impl SuggestionGenerator for Generator {
    fn static_suggestions(&self, _ctx: &SuggestionContext) -> Vec<SuggestedNode> {
        Vec::new()
    }

    fn dynamic_suggestions(&self, ctx: &SuggestionContext, text: &str) -> Vec<SuggestedNode> {
        let name = sanitize_identifier(text);
        let title = format!("identifier {}", name);
        let fragment = Fragment::build(ctx.registry, |tree| create(tree, &name));
        vec![SuggestedNode::new(fragment, title, "", true)]
    }
}

fn deserialize(tree: &mut NodeTree, serialized: &SerializedNode) -> LanguageResult<NodeId> {
    Ok(create(tree, serialized.string_property("identifier")))
}

fn generate(tree: &NodeTree, id: NodeId) -> LanguageResult<Option<Generated>> {
    Ok(Some(Generated::Expression(Expression::identifier(name_of(
        tree, id,
    )))))
}

/// A pasted declaration name becomes a reference to that name.
fn to_reference(tree: &mut NodeTree, id: NodeId) -> LanguageResult<NodeId> {
    let name = name_of(tree, id).to_string();
    Ok(variable_reference::create(tree, &name))
}

pub(crate) fn register(builder: &mut RegistryBuilder) -> LanguageResult<()> {
    builder.register_type(
        TypeRegistration::new(
            DECLARED_IDENTIFIER,
            deserialize,
            NodeLayout::new(vec![LayoutComponent::property("identifier")]),
        )
        .with_properties(&["identifier"])
        .with_generator(generate)
        .with_paste_adapter(VARIABLE_REFERENCE, to_reference),
    )?;
    builder.register_category(DECLARED_IDENTIFIER, NodeCategory::DeclaredIdentifier, Generator);
    Ok(())
}
