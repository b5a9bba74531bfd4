use crate::category::NodeCategory;
use crate::error::LanguageResult;
use crate::generate::{print_python, Generated};
use crate::node::{Arity, NodeId};
use crate::registry::RegistryBuilder;
use crate::schema::{LayoutComponent, NodeLayout, TypeRegistration};
use crate::serialize::{deserialize_child_group, SerializedNode};
use crate::suggestion::WrappingGenerator;
use crate::tree::NodeTree;
use crate::types::clean_expression;
use crate::types::js::expression::assemble_tokens;

pub const PYTHON_EXPRESSION: &str = "PYTHON_EXPRESSION";

pub fn create(tree: &mut NodeTree) -> NodeId {
    let id = tree.create_node(PYTHON_EXPRESSION);
    tree.add_child_group(id, "tokens", Arity::Many, NodeCategory::PythonExpressionToken);
    id
}

pub fn wrap(tree: &mut NodeTree, token: NodeId) -> LanguageResult<NodeId> {
    let id = create(tree);
    tree.append(id, "tokens", token)?;
    Ok(id)
}

fn deserialize(tree: &mut NodeTree, serialized: &SerializedNode) -> LanguageResult<NodeId> {
    let id = create(tree);
    deserialize_child_group(tree, id, "tokens", serialized)?;
    Ok(id)
}

fn generate(tree: &NodeTree, id: NodeId) -> LanguageResult<Option<Generated>> {
    match assemble_tokens(tree, id, "tokens")? {
        Some(expression) => Ok(Some(Generated::Text(print_python(&expression)?))),
        None => Ok(None),
    }
}

pub(crate) fn register(builder: &mut RegistryBuilder) -> LanguageResult<()> {
    builder.register_type(
        TypeRegistration::new(
            PYTHON_EXPRESSION,
            deserialize,
            NodeLayout::new(vec![LayoutComponent::token_list("tokens")]),
        )
        .with_child_set("tokens", NodeCategory::PythonExpressionToken)
        .with_generator(generate)
        .with_clean(clean_expression),
    )?;
    for category in [NodeCategory::PythonStatement, NodeCategory::PythonExpression] {
        builder.register_category(
            PYTHON_EXPRESSION,
            category,
            WrappingGenerator::new(NodeCategory::PythonExpressionToken, wrap),
        );
    }
    Ok(())
}
