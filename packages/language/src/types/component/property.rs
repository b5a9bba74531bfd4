use crate::category::NodeCategory;
use crate::error::LanguageResult;
use crate::node::NodeId;
use crate::registry::RegistryBuilder;
use crate::schema::{LayoutComponent, NodeLayout, TypeRegistration};
use crate::scope::ParameterDefinition;
use crate::serialize::SerializedNode;
use crate::suggestion::{
    sanitize_identifier, Fragment, SuggestedNode, SuggestionContext, SuggestionGenerator,
};
use crate::tree::NodeTree;

/// A prop accepted by a component.
pub const DECLARED_PROPERTY: &str = "DECLARED_PROPERTY";

pub fn create(tree: &mut NodeTree, name: &str) -> NodeId {
    let id = tree.create_node(DECLARED_PROPERTY);
    tree.init_property(id, "name", name);
    tree.init_property(id, "type", "");
    id
}

pub fn definition_of(tree: &NodeTree, id: NodeId) -> ParameterDefinition {
    ParameterDefinition {
        name: tree.property_str(id, "name").to_string(),
        type_expression: tree.property_str(id, "type").to_string(),
    }
}

struct Generator;

impl SuggestionGenerator for Generator {
    fn static_suggestions(&self, _ctx: &SuggestionContext) -> Vec<SuggestedNode> {
        Vec::new()
    }

    fn dynamic_suggestions(&self, ctx: &SuggestionContext, text: &str) -> Vec<SuggestedNode> {
        let name = sanitize_identifier(text);
        let title = format!("prop {}", name);
        let fragment = Fragment::build(ctx.registry, |tree| create(tree, &name));
        vec![SuggestedNode::new(fragment, title, name, true)]
    }
}

fn deserialize(tree: &mut NodeTree, serialized: &SerializedNode) -> LanguageResult<NodeId> {
    let id = create(tree, serialized.string_property("name"));
    tree.init_property(id, "type", serialized.string_property("type"));
    Ok(id)
}

pub(crate) fn register(builder: &mut RegistryBuilder) -> LanguageResult<()> {
    builder.register_type(
        TypeRegistration::new(
            DECLARED_PROPERTY,
            deserialize,
            NodeLayout::new(vec![LayoutComponent::property("name")]),
        )
        .with_properties(&["name", "type"]),
    )?;
    builder.register_category(
        DECLARED_PROPERTY,
        NodeCategory::ComponentPropertyDeclaration,
        Generator,
    );
    Ok(())
}
