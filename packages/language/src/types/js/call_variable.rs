use crate::category::NodeCategory;
use crate::error::LanguageResult;
use crate::generate::{generate_expression, Generated};
use crate::node::{Arity, NodeId};
use crate::registry::RegistryBuilder;
use crate::schema::{LayoutComponent, NodeLayout, TypeRegistration};
use crate::scope::DefinitionKind;
use crate::serialize::{deserialize_child_group, SerializedNode};
use crate::suggestion::{Fragment, SuggestedNode, SuggestionContext, SuggestionGenerator};
use crate::tree::NodeTree;
use crate::types::js::expression::{self, SPLOOT_EXPRESSION};
use crate::types::prune_empty_expressions;
use sprout_syntax::js::Expression;
use std::collections::HashSet;

/// Call of a named function with a list of argument expressions.
pub const CALL_VARIABLE: &str = "CALL_VARIABLE";

pub fn create(tree: &mut NodeTree, name: &str) -> NodeId {
    let id = tree.create_node(CALL_VARIABLE);
    tree.init_property(id, "identifier", name);
    tree.add_child_group(id, "arguments", Arity::Many, NodeCategory::Expression);
    id
}

struct Generator;

impl SuggestionGenerator for Generator {
    fn static_suggestions(&self, ctx: &SuggestionContext) -> Vec<SuggestedNode> {
        let mut seen = HashSet::new();
        ctx.definitions()
            .into_iter()
            .filter(|definition| definition.kind == DefinitionKind::Function)
            .filter(|definition| seen.insert(definition.name.clone()))
            .map(|definition| {
                let fragment = Fragment::build(ctx.registry, |tree| create(tree, &definition.name));
                let params: Vec<&str> = definition.params.iter().map(|p| p.name.as_str()).collect();
                let title = format!("{}({})", definition.name, params.join(", "));
                let mut suggestion =
                    SuggestedNode::new(fragment, title, &definition.name, !definition.deprecated);
                if !definition.documentation.is_empty() {
                    suggestion = suggestion.with_documentation(definition.documentation.clone());
                }
                suggestion
            })
            .collect()
    }
}

fn deserialize(tree: &mut NodeTree, serialized: &SerializedNode) -> LanguageResult<NodeId> {
    let id = create(tree, serialized.string_property("identifier"));
    deserialize_child_group(tree, id, "arguments", serialized)?;
    Ok(id)
}

fn generate(tree: &NodeTree, id: NodeId) -> LanguageResult<Option<Generated>> {
    let mut arguments = Vec::new();
    for child in tree.children(id, "arguments") {
        if let Some(argument) = generate_expression(tree, *child)? {
            arguments.push(argument);
        }
    }
    let callee = Expression::identifier(tree.property_str(id, "identifier"));
    Ok(Some(Generated::Expression(Expression::call(callee, arguments))))
}

fn clean(tree: &mut NodeTree, id: NodeId) {
    prune_empty_expressions(tree, id, "arguments");
}

pub(crate) fn register(builder: &mut RegistryBuilder) -> LanguageResult<()> {
    builder.register_type(
        TypeRegistration::new(
            CALL_VARIABLE,
            deserialize,
            NodeLayout::new(vec![
                LayoutComponent::property("identifier"),
                LayoutComponent::tree_brackets("arguments"),
            ]),
        )
        .with_properties(&["identifier"])
        .with_child_set("arguments", NodeCategory::Expression)
        .with_generator(generate)
        .with_clean(clean)
        .with_paste_adapter(SPLOOT_EXPRESSION, expression::wrap),
    )?;
    builder.register_category(CALL_VARIABLE, NodeCategory::ExpressionToken, Generator);
    Ok(())
}
