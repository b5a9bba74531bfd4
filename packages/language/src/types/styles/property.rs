use super::value_text;
use crate::category::NodeCategory;
use crate::error::LanguageResult;
use crate::generate::Generated;
use crate::node::{Arity, NodeId};
use crate::registry::RegistryBuilder;
use crate::schema::{LayoutComponent, NodeLayout, TypeRegistration};
use crate::serialize::{deserialize_child_group, SerializedNode};
use crate::suggestion::{Fragment, SuggestedNode, SuggestionContext, SuggestionGenerator};
use crate::tree::NodeTree;
use sprout_syntax::css::Declaration;

/// One `property: value` declaration.
pub const STYLE_PROPERTY: &str = "STYLE_PROPERTY";

const COMMON_PROPERTIES: &[&str] = &[
    "color",
    "background-color",
    "display",
    "margin",
    "padding",
    "font-size",
    "font-family",
    "width",
    "height",
    "border",
];

pub fn create(tree: &mut NodeTree, property: &str) -> NodeId {
    let id = tree.create_node(STYLE_PROPERTY);
    tree.init_property(id, "property", property);
    tree.add_child_group(id, "value", Arity::Single, NodeCategory::HtmlAttributeValue);
    id
}

struct Generator;

impl SuggestionGenerator for Generator {
    fn static_suggestions(&self, ctx: &SuggestionContext) -> Vec<SuggestedNode> {
        COMMON_PROPERTIES
            .iter()
            .map(|property| {
                let fragment = Fragment::build(ctx.registry, |tree| create(tree, property));
                SuggestedNode::new(fragment, format!("property {}", property), *property, true)
            })
            .collect()
    }

    fn dynamic_suggestions(&self, ctx: &SuggestionContext, text: &str) -> Vec<SuggestedNode> {
        let property: String = text
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
            .collect();
        if property.is_empty() || COMMON_PROPERTIES.contains(&property.as_str()) {
            return Vec::new();
        }
        let fragment = Fragment::build(ctx.registry, |tree| create(tree, &property));
        vec![SuggestedNode::new(
            fragment,
            format!("property {}", property),
            property,
            true,
        )]
    }
}

fn deserialize(tree: &mut NodeTree, serialized: &SerializedNode) -> LanguageResult<NodeId> {
    let id = create(tree, serialized.string_property("property"));
    deserialize_child_group(tree, id, "value", serialized)?;
    Ok(id)
}

fn generate(tree: &NodeTree, id: NodeId) -> LanguageResult<Option<Generated>> {
    let Some(value) = value_text(tree, id) else {
        return Ok(None);
    };
    Ok(Some(Generated::Declaration(Declaration {
        property: tree.property_str(id, "property").to_string(),
        value: value.to_string(),
    })))
}

pub(crate) fn register(builder: &mut RegistryBuilder) -> LanguageResult<()> {
    builder.register_type(
        TypeRegistration::new(
            STYLE_PROPERTY,
            deserialize,
            NodeLayout::new(vec![
                LayoutComponent::property("property"),
                LayoutComponent::attach_right("value"),
            ])
            .small(),
        )
        .with_properties(&["property"])
        .with_child_set("value", NodeCategory::HtmlAttributeValue)
        .with_generator(generate),
    )?;
    builder.register_category(STYLE_PROPERTY, NodeCategory::StyleSheetProperty, Generator);
    Ok(())
}
