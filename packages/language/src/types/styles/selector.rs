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
use sprout_syntax::css::Selector;

pub const STYLE_SELECTOR_BASIC: &str = "STYLE_SELECTOR_BASIC";

const SELECTOR_TYPES: &[&str] = &["class", "id", "element"];

pub fn create(tree: &mut NodeTree, selector_type: &str) -> NodeId {
    let id = tree.create_node(STYLE_SELECTOR_BASIC);
    tree.init_property(id, "selectortype", selector_type);
    tree.add_child_group(id, "value", Arity::Single, NodeCategory::HtmlAttributeValue);
    id
}

struct Generator;

impl SuggestionGenerator for Generator {
    fn static_suggestions(&self, ctx: &SuggestionContext) -> Vec<SuggestedNode> {
        SELECTOR_TYPES
            .iter()
            .map(|selector_type| {
                let fragment = Fragment::build(ctx.registry, |tree| create(tree, selector_type));
                SuggestedNode::new(
                    fragment,
                    format!("selector-basic {}", selector_type),
                    *selector_type,
                    true,
                )
            })
            .collect()
    }
}

fn deserialize(tree: &mut NodeTree, serialized: &SerializedNode) -> LanguageResult<NodeId> {
    let id = create(tree, serialized.string_property("selectortype"));
    deserialize_child_group(tree, id, "value", serialized)?;
    Ok(id)
}

/// A selector with no value yet is a gap.
fn generate(tree: &NodeTree, id: NodeId) -> LanguageResult<Option<Generated>> {
    let Some(name) = value_text(tree, id).filter(|name| !name.is_empty()) else {
        return Ok(None);
    };
    let selector = match tree.property_str(id, "selectortype") {
        "class" => Selector::Class(name.to_string()),
        "id" => Selector::Id(name.to_string()),
        _ => Selector::Type(name.to_string()),
    };
    Ok(Some(Generated::Selector(selector)))
}

pub(crate) fn register(builder: &mut RegistryBuilder) -> LanguageResult<()> {
    builder.register_type(
        TypeRegistration::new(
            STYLE_SELECTOR_BASIC,
            deserialize,
            NodeLayout::new(vec![
                LayoutComponent::property("selectortype"),
                LayoutComponent::attach_right("value"),
            ])
            .small(),
        )
        .with_properties(&["selectortype"])
        .with_child_set("value", NodeCategory::HtmlAttributeValue)
        .with_generator(generate),
    )?;
    builder.register_category(
        STYLE_SELECTOR_BASIC,
        NodeCategory::StyleSheetSelector,
        Generator,
    );
    Ok(())
}
