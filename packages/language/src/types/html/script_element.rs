use super::apply_attributes;
use super::element::parent_tag;
use crate::category::NodeCategory;
use crate::error::LanguageResult;
use crate::generate::{generate_statements, print_generated, GenerateOptions, Generated};
use crate::html_tags::is_tag_valid_with_parent;
use crate::node::{Arity, NodeId};
use crate::registry::RegistryBuilder;
use crate::schema::{LayoutComponent, NodeLayout, TypeRegistration};
use crate::serialize::{deserialize_child_group, SerializedNode};
use crate::suggestion::{Fragment, SuggestedNode, SuggestionContext, SuggestionGenerator};
use crate::tree::NodeTree;
use crate::types::prune_empty_expressions;
use sprout_syntax::html::{escape_script_content, Element, HtmlNode};
use sprout_syntax::js::Program;

/// `<script>` whose content is a list of script statements.
pub const HTML_SCRIPT_ELEMENT: &str = "HTML_SCRIPT_ELEMENT";

pub fn create(tree: &mut NodeTree) -> NodeId {
    let id = tree.create_node(HTML_SCRIPT_ELEMENT);
    tree.add_child_group(id, "attributes", Arity::Many, NodeCategory::HtmlAttribute);
    tree.add_child_group(id, "content", Arity::Many, NodeCategory::Statement);
    id
}

/// New script element holding a detached statement.
pub fn wrap(tree: &mut NodeTree, statement: NodeId) -> LanguageResult<NodeId> {
    let id = create(tree);
    tree.append(id, "content", statement)?;
    Ok(id)
}

/// The script content as a standalone program.
pub fn generate_program(tree: &NodeTree, id: NodeId) -> LanguageResult<Program> {
    Ok(Program::new(generate_statements(tree, id, "content")?))
}

struct Generator;

impl SuggestionGenerator for Generator {
    fn static_suggestions(&self, ctx: &SuggestionContext) -> Vec<SuggestedNode> {
        match parent_tag(ctx) {
            Some(tag) if is_tag_valid_with_parent("script", tag) => {
                let fragment = Fragment::build(ctx.registry, create);
                vec![
                    SuggestedNode::new(fragment, "element script", "script javascript", true)
                        .with_documentation(
                            "The script element allows authors to include dynamic script and data blocks in their documents.",
                        ),
                ]
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

/// The printed program is escaped so no `</script>` inside it can close the
/// element early.
fn generate(tree: &NodeTree, id: NodeId) -> LanguageResult<Option<Generated>> {
    let program = Generated::Program(generate_program(tree, id)?);
    let script = print_generated(&program, &GenerateOptions::default())?;

    let mut element = Element::new("script");
    apply_attributes(tree, id, &mut element);
    element.append(HtmlNode::Raw(escape_script_content(&script)));
    Ok(Some(Generated::Html(HtmlNode::Element(element))))
}

fn clean(tree: &mut NodeTree, id: NodeId) {
    prune_empty_expressions(tree, id, "content");
}

pub(crate) fn register(builder: &mut RegistryBuilder) -> LanguageResult<()> {
    builder.register_type(
        TypeRegistration::new(
            HTML_SCRIPT_ELEMENT,
            deserialize,
            NodeLayout::new(vec![
                LayoutComponent::keyword("script"),
                LayoutComponent::tree("attributes"),
                LayoutComponent::block("content"),
            ]),
        )
        .with_child_set("attributes", NodeCategory::HtmlAttribute)
        .with_child_set("content", NodeCategory::Statement)
        .with_generator(generate)
        .with_clean(clean),
    )?;
    builder.register_category(HTML_SCRIPT_ELEMENT, NodeCategory::DomNode, Generator);
    Ok(())
}
