use crate::category::NodeCategory;
use crate::error::{LanguageError, LanguageResult};
use crate::generate::{generate, Generated};
use crate::node::{Arity, NodeId};
use crate::registry::RegistryBuilder;
use crate::schema::{LayoutComponent, NodeLayout, TypeRegistration};
use crate::serialize::{deserialize_child_group, SerializedNode};
use crate::suggestion::{Fragment, SuggestedNode, SuggestionContext, SuggestionGenerator};
use crate::tree::NodeTree;
use sprout_syntax::css::Rule;

pub const STYLE_RULE: &str = "STYLE_RULE";

pub fn create(tree: &mut NodeTree) -> NodeId {
    let id = tree.create_node(STYLE_RULE);
    tree.add_child_group(id, "selector", Arity::Single, NodeCategory::StyleSheetSelector);
    tree.add_child_group(id, "properties", Arity::Many, NodeCategory::StyleSheetProperty);
    id
}

struct Generator;

impl SuggestionGenerator for Generator {
    fn static_suggestions(&self, ctx: &SuggestionContext) -> Vec<SuggestedNode> {
        let fragment = Fragment::build(ctx.registry, create);
        vec![SuggestedNode::new(fragment, "style rule", "style rule", true)
            .with_documentation("A selector and the declarations applied to what it matches.")]
    }
}

fn deserialize(tree: &mut NodeTree, serialized: &SerializedNode) -> LanguageResult<NodeId> {
    let id = create(tree);
    deserialize_child_group(tree, id, "selector", serialized)?;
    deserialize_child_group(tree, id, "properties", serialized)?;
    Ok(id)
}

/// A rule without a usable selector is a gap.
fn generate_rule(tree: &NodeTree, id: NodeId) -> LanguageResult<Option<Generated>> {
    let selector = match tree.first_child(id, "selector") {
        Some(selector) => generate(tree, selector)?,
        None => None,
    };
    let selector = match selector {
        Some(Generated::Selector(selector)) => selector,
        None => return Ok(None),
        Some(_) => return Err(LanguageError::generation("style rule selector is not a selector")),
    };

    let mut declarations = Vec::new();
    for child in tree.children(id, "properties") {
        match generate(tree, *child)? {
            Some(Generated::Declaration(declaration)) => declarations.push(declaration),
            None => {}
            Some(_) => {
                return Err(LanguageError::generation(
                    "style rule property is not a declaration",
                ))
            }
        }
    }
    Ok(Some(Generated::Css(Rule {
        selectors: vec![selector],
        declarations,
    })))
}

pub(crate) fn register(builder: &mut RegistryBuilder) -> LanguageResult<()> {
    builder.register_type(
        TypeRegistration::new(
            STYLE_RULE,
            deserialize,
            NodeLayout::new(vec![
                LayoutComponent::keyword("rule"),
                LayoutComponent::inline("selector"),
                LayoutComponent::block("properties"),
            ]),
        )
        .with_child_set("selector", NodeCategory::StyleSheetSelector)
        .with_child_set("properties", NodeCategory::StyleSheetProperty)
        .with_generator(generate_rule),
    )?;
    builder.register_category(STYLE_RULE, NodeCategory::StyleSheetStatement, Generator);
    Ok(())
}
