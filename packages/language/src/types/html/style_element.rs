use super::apply_attributes;
use super::element::parent_tag;
use crate::category::NodeCategory;
use crate::error::{LanguageError, LanguageResult};
use crate::generate::{generate, Generated};
use crate::html_tags::is_tag_valid_with_parent;
use crate::node::{Arity, NodeId};
use crate::registry::RegistryBuilder;
use crate::schema::{LayoutComponent, NodeLayout, TypeRegistration};
use crate::serialize::{deserialize_child_group, SerializedNode};
use crate::suggestion::{Fragment, SuggestedNode, SuggestionContext, SuggestionGenerator};
use crate::tree::NodeTree;
use sprout_syntax::css::{print_stylesheet, StyleSheet};
use sprout_syntax::html::{escape_style_content, Element, HtmlNode};

/// `<style>` holding style rules.
pub const HTML_STYLE_ELEMENT: &str = "HTML_STYLE_ELEMENT";

pub fn create(tree: &mut NodeTree) -> NodeId {
    let id = tree.create_node(HTML_STYLE_ELEMENT);
    tree.add_child_group(id, "attributes", Arity::Many, NodeCategory::HtmlAttribute);
    tree.add_child_group(id, "content", Arity::Many, NodeCategory::StyleSheetStatement);
    id
}

pub fn generate_stylesheet(tree: &NodeTree, id: NodeId) -> LanguageResult<StyleSheet> {
    let mut sheet = StyleSheet::default();
    for child in tree.children(id, "content") {
        match generate(tree, *child)? {
            Some(Generated::Css(rule)) => sheet.rules.push(rule),
            None => {}
            Some(_) => {
                return Err(LanguageError::generation(format!(
                    "{} cannot appear in a stylesheet",
                    tree.node_type(*child).unwrap_or("?")
                )))
            }
        }
    }
    Ok(sheet)
}

struct Generator;

impl SuggestionGenerator for Generator {
    fn static_suggestions(&self, ctx: &SuggestionContext) -> Vec<SuggestedNode> {
        match parent_tag(ctx) {
            Some(tag) if is_tag_valid_with_parent("style", tag) => {
                let fragment = Fragment::build(ctx.registry, create);
                vec![SuggestedNode::new(fragment, "element style", "style css", true)
                    .with_documentation("Style information for the document.")]
            }
            _ => Vec::new(),
        }
    }
}

fn deserialize(tree: &mut NodeTree, serialized: &SerializedNode) -> LanguageResult<NodeId> {
    let id = create(tree);
    deserialize_child_group(tree, id, "attributes", serialized)?;
    deserialize_child_group(tree, id, "content", serialized)?;
    Ok(id)
}

fn generate_element(tree: &NodeTree, id: NodeId) -> LanguageResult<Option<Generated>> {
    let css = print_stylesheet(&generate_stylesheet(tree, id)?);
    let mut element = Element::new("style");
    apply_attributes(tree, id, &mut element);
    element.append(HtmlNode::Raw(escape_style_content(&css)));
    Ok(Some(Generated::Html(HtmlNode::Element(element))))
}

pub(crate) fn register(builder: &mut RegistryBuilder) -> LanguageResult<()> {
    builder.register_type(
        TypeRegistration::new(
            HTML_STYLE_ELEMENT,
            deserialize,
            NodeLayout::new(vec![
                LayoutComponent::keyword("style"),
                LayoutComponent::tree("attributes"),
                LayoutComponent::block("content"),
            ]),
        )
        .with_child_set("attributes", NodeCategory::HtmlAttribute)
        .with_child_set("content", NodeCategory::StyleSheetStatement)
        .with_generator(generate_element),
    )?;
    builder.register_category(HTML_STYLE_ELEMENT, NodeCategory::DomNode, Generator);
    Ok(())
}
