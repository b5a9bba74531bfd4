use super::declared_identifier::{self, DECLARED_IDENTIFIER};
use super::expression::{self, SPLOOT_EXPRESSION};
use crate::category::NodeCategory;
use crate::error::LanguageResult;
use crate::generate::{generate_statements, Generated};
use crate::node::{Arity, NodeId};
use crate::registry::RegistryBuilder;
use crate::schema::{LayoutComponent, NodeLayout, TypeRegistration};
use crate::scope::Definition;
use crate::serialize::{deserialize_child_group, SerializedNode};
use crate::suggestion::{Fragment, SuggestedNode, SuggestionContext, SuggestionGenerator};
use crate::tree::NodeTree;
use crate::types::prune_empty_expressions;
use sprout_syntax::js::{Expression, Function};

/// Anonymous function expression, usable as a token inside an expression.
pub const INLINE_FUNCTION_DECLARATION: &str = "INLINE_FUNCTION_DECLARATION";

pub fn create(tree: &mut NodeTree) -> NodeId {
    let id = tree.create_node(INLINE_FUNCTION_DECLARATION);
    tree.add_child_group(id, "params", Arity::Many, NodeCategory::DeclaredIdentifier);
    tree.add_child_group(id, "body", Arity::Many, NodeCategory::Statement);
    id
}

fn param_names(tree: &NodeTree, id: NodeId) -> Vec<String> {
    tree.children(id, "params")
        .iter()
        .filter(|param| tree.node_type(**param) == Some(DECLARED_IDENTIFIER))
        .map(|param| declared_identifier::name_of(tree, *param).to_string())
        .collect()
}

struct Generator;

impl SuggestionGenerator for Generator {
    fn static_suggestions(&self, ctx: &SuggestionContext) -> Vec<SuggestedNode> {
        let fragment = Fragment::build(ctx.registry, create);
        vec![
            SuggestedNode::new(fragment, "inline function", "inline function", true)
                .with_documentation("An inline function or callback."),
        ]
    }
}

fn deserialize(tree: &mut NodeTree, serialized: &SerializedNode) -> LanguageResult<NodeId> {
    let id = create(tree);
    deserialize_child_group(tree, id, "params", serialized)?;
    deserialize_child_group(tree, id, "body", serialized)?;
    Ok(id)
}

fn generate(tree: &NodeTree, id: NodeId) -> LanguageResult<Option<Generated>> {
    let function = Function {
        id: None,
        params: param_names(tree, id),
        body: generate_statements(tree, id, "body")?,
    };
    Ok(Some(Generated::Expression(Expression::Function(function))))
}

fn scope_declarations(tree: &NodeTree, id: NodeId) -> Vec<Definition> {
    param_names(tree, id)
        .into_iter()
        .map(Definition::variable)
        .collect()
}

fn clean(tree: &mut NodeTree, id: NodeId) {
    prune_empty_expressions(tree, id, "body");
}

pub(crate) fn register(builder: &mut RegistryBuilder) -> LanguageResult<()> {
    builder.register_type(
        TypeRegistration::new(
            INLINE_FUNCTION_DECLARATION,
            deserialize,
            NodeLayout::new(vec![
                LayoutComponent::keyword("inline function"),
                LayoutComponent::tree_brackets("params"),
                LayoutComponent::block("body"),
            ]),
        )
        .with_child_set("params", NodeCategory::DeclaredIdentifier)
        .with_child_set("body", NodeCategory::Statement)
        .with_scope(scope_declarations)
        .with_generator(generate)
        .with_clean(clean)
        .with_paste_adapter(SPLOOT_EXPRESSION, expression::wrap),
    )?;
    builder.register_category(
        INLINE_FUNCTION_DECLARATION,
        NodeCategory::ExpressionToken,
        Generator,
    );
    Ok(())
}
