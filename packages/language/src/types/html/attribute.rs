use crate::category::NodeCategory;
use crate::error::LanguageResult;
use crate::generate::Generated;
use crate::node::{Arity, NodeId};
use crate::registry::RegistryBuilder;
use crate::schema::{LayoutComponent, NodeLayout, TypeRegistration};
use crate::serialize::{deserialize_child_group, SerializedNode};
use crate::suggestion::{Fragment, SuggestedNode, SuggestionContext, SuggestionGenerator};
use crate::tree::NodeTree;
use crate::types::literals::string_value;

pub const HTML_ATTRIBUTE: &str = "HTML_ATTRIBUTE";

const COMMON_ATTRIBUTES: &[(&str, &str)] = &[
    ("class", "Space-separated list of classes for styling."),
    ("id", "A unique identifier for the element."),
    ("href", "The URL a hyperlink points to."),
    ("src", "The URL of embedded content."),
    ("alt", "Replacement text for an image."),
    ("type", "The type of a control or script."),
    ("name", "The name of a form control."),
    ("value", "The value of a form control."),
    ("style", "Inline style declarations."),
    ("title", "Advisory information shown as a tooltip."),
];

pub fn create(tree: &mut NodeTree, name: &str) -> NodeId {
    let id = tree.create_node(HTML_ATTRIBUTE);
    tree.init_property(id, "name", name);
    tree.add_child_group(id, "value", Arity::Single, NodeCategory::HtmlAttributeValue);
    id
}

pub fn name_of(tree: &NodeTree, id: NodeId) -> &str {
    tree.property_str(id, "name")
}

/// Attribute value text; empty when unset.
pub fn value_of(tree: &NodeTree, id: NodeId) -> &str {
    tree.first_child(id, "value")
        .and_then(|child| string_value(tree, child))
        .unwrap_or("")
}

/// Attribute names are lower-case ASCII letters, digits and dashes.
fn attribute_name(text: &str) -> String {
    text.trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect::<String>()
        .to_ascii_lowercase()
}

struct Generator;

impl SuggestionGenerator for Generator {
    fn static_suggestions(&self, ctx: &SuggestionContext) -> Vec<SuggestedNode> {
        COMMON_ATTRIBUTES
            .iter()
            .map(|(name, documentation)| {
                let fragment = Fragment::build(ctx.registry, |tree| create(tree, name));
                SuggestedNode::new(fragment, format!("attribute {}", name), *name, true)
                    .with_documentation(*documentation)
            })
            .collect()
    }

    fn dynamic_suggestions(&self, ctx: &SuggestionContext, text: &str) -> Vec<SuggestedNode> {
        let name = attribute_name(text);
        if name.is_empty() || COMMON_ATTRIBUTES.iter().any(|(common, _)| *common == name) {
            return Vec::new();
        }
        let fragment = Fragment::build(ctx.registry, |tree| create(tree, &name));
        vec![SuggestedNode::new(fragment, format!("attribute {}", name), name, true)]
    }
}

fn deserialize(tree: &mut NodeTree, serialized: &SerializedNode) -> LanguageResult<NodeId> {
    let id = create(tree, serialized.string_property("name"));
    deserialize_child_group(tree, id, "value", serialized)?;
    Ok(id)
}

fn generate(tree: &NodeTree, id: NodeId) -> LanguageResult<Option<Generated>> {
    Ok(Some(Generated::Text(value_of(tree, id).to_string())))
}

pub(crate) fn register(builder: &mut RegistryBuilder) -> LanguageResult<()> {
    builder.register_type(
        TypeRegistration::new(
            HTML_ATTRIBUTE,
            deserialize,
            NodeLayout::new(vec![
                LayoutComponent::property("name"),
                LayoutComponent::attach_right("value"),
            ])
            .small(),
        )
        .with_properties(&["name"])
        .with_child_set("value", NodeCategory::HtmlAttributeValue)
        .with_generator(generate),
    )?;
    builder.register_category(HTML_ATTRIBUTE, NodeCategory::HtmlAttribute, Generator);
    Ok(())
}
