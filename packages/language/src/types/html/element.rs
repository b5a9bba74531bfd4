use super::document::HTML_DOCUMENT;
use super::{apply_attributes, generate_dom_children};
use crate::category::NodeCategory;
use crate::error::LanguageResult;
use crate::generate::Generated;
use crate::html_tags;
use crate::node::{Arity, NodeId};
use crate::registry::RegistryBuilder;
use crate::schema::{LayoutComponent, NodeLayout, TypeRegistration};
use crate::serialize::{deserialize_child_group, SerializedNode};
use crate::suggestion::{Fragment, SuggestedNode, SuggestionContext, SuggestionGenerator};
use crate::tree::NodeTree;
use sprout_syntax::html::{Element, HtmlNode};

pub const HTML_ELEMENT: &str = "HTML_ELEMENT";

pub fn create(tree: &mut NodeTree, tag: &str) -> NodeId {
    let id = tree.create_node(HTML_ELEMENT);
    tree.init_property(id, "tag", tag);
    tree.add_child_group(id, "attributes", Arity::Many, NodeCategory::HtmlAttribute);
    tree.add_child_group(id, "content", Arity::Many, NodeCategory::DomNode);
    id
}

pub fn tag_of(tree: &NodeTree, id: NodeId) -> &str {
    tree.property_str(id, "tag")
}

/// Tag of the element that would contain a candidate at `ctx`, if any.
pub(crate) fn parent_tag<'a>(ctx: &SuggestionContext<'a>) -> Option<&'a str> {
    let position = ctx.position?;
    (position.parent_type()? == HTML_ELEMENT).then(|| tag_of(position.tree, position.parent))
}

struct Generator;

impl SuggestionGenerator for Generator {
    /// Every tag the parent's content model accepts; `html` at document level.
    fn static_suggestions(&self, ctx: &SuggestionContext) -> Vec<SuggestedNode> {
        let tags: Vec<&html_tags::TagInfo> = match ctx.position {
            Some(position) if position.parent_type() == Some(HTML_DOCUMENT) => {
                html_tags::lookup("html").into_iter().collect()
            }
            Some(position) if position.parent_type() == Some(HTML_ELEMENT) => {
                html_tags::valid_child_tags(tag_of(position.tree, position.parent))
            }
            _ => Vec::new(),
        };
        tags.into_iter()
            .map(|info| {
                let fragment = Fragment::build(ctx.registry, |tree| create(tree, info.tag));
                SuggestedNode::new(fragment, format!("element {}", info.tag), info.tag, true)
                    .with_documentation(info.documentation)
            })
            .collect()
    }
}

fn deserialize(tree: &mut NodeTree, serialized: &SerializedNode) -> LanguageResult<NodeId> {
    let id = create(tree, serialized.string_property("tag"));
    deserialize_child_group(tree, id, "attributes", serialized)?;
    deserialize_child_group(tree, id, "content", serialized)?;
    Ok(id)
}

fn generate(tree: &NodeTree, id: NodeId) -> LanguageResult<Option<Generated>> {
    let mut element = Element::new(tag_of(tree, id));
    apply_attributes(tree, id, &mut element);
    element.children = generate_dom_children(tree, id, "content")?;
    Ok(Some(Generated::Html(HtmlNode::Element(element))))
}

pub(crate) fn register(builder: &mut RegistryBuilder) -> LanguageResult<()> {
    builder.register_type(
        TypeRegistration::new(
            HTML_ELEMENT,
            deserialize,
            NodeLayout::new(vec![
                LayoutComponent::property("tag"),
                LayoutComponent::tree("attributes"),
                LayoutComponent::block("content"),
            ]),
        )
        .with_properties(&["tag"])
        .with_child_set("attributes", NodeCategory::HtmlAttribute)
        .with_child_set("content", NodeCategory::DomNode)
        .with_generator(generate),
    )?;
    builder.register_category(HTML_ELEMENT, NodeCategory::DomNode, Generator);
    Ok(())
}
