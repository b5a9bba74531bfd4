//! Expression container: a flat token list assembled into an expression tree.

use super::binary_operator::{self, BINARY_OPERATOR};
use crate::category::NodeCategory;
use crate::error::{LanguageError, LanguageResult};
use crate::generate::{generate_expression, Generated};
use crate::node::{Arity, NodeId};
use crate::registry::RegistryBuilder;
use crate::schema::{LayoutComponent, NodeLayout, TypeRegistration};
use crate::serialize::{deserialize_child_group, SerializedNode};
use crate::suggestion::WrappingGenerator;
use crate::tree::NodeTree;
use crate::types::clean_expression;
use sprout_syntax::js::{BinaryOperator, Expression};
use tracing::debug;

pub const SPLOOT_EXPRESSION: &str = "SPLOOT_EXPRESSION";

pub fn create(tree: &mut NodeTree) -> NodeId {
    let id = tree.create_node(SPLOOT_EXPRESSION);
    tree.add_child_group(id, "tokens", Arity::Many, NodeCategory::ExpressionToken);
    id
}

/// Wrap a detached token in a new expression.
pub fn wrap(tree: &mut NodeTree, token: NodeId) -> LanguageResult<NodeId> {
    let id = create(tree);
    tree.append(id, "tokens", token)?;
    Ok(id)
}

enum Token {
    Operand(Expression),
    Operator(BinaryOperator),
}

/// Assemble the children of `group` into one expression.
///
/// Operators bind by precedence and associate to the left. Operators with no
/// operand on one side are ignored, and in a run of operands with no operator
/// between them only the first is kept. An empty list assembles to `None`.
pub fn assemble_tokens(
    tree: &NodeTree,
    id: NodeId,
    group: &str,
) -> LanguageResult<Option<Expression>> {
    let mut tokens = Vec::new();
    for child in tree.children(id, group) {
        if tree.node_type(*child) == Some(BINARY_OPERATOR) {
            tokens.push(Token::Operator(binary_operator::operator_of(tree, *child)?));
        } else if let Some(expression) = generate_expression(tree, *child)? {
            tokens.push(Token::Operand(expression));
        }
    }

    let mut operands = Vec::new();
    let mut operators = Vec::new();
    for token in tokens {
        match token {
            Token::Operand(expression) => {
                if operands.len() > operators.len() {
                    debug!("dropping operand with no operator before it");
                    continue;
                }
                operands.push(expression);
            }
            Token::Operator(operator) => {
                if operands.len() == operators.len() {
                    debug!(?operator, "dropping operator with no left operand");
                    continue;
                }
                operators.push(operator);
            }
        }
    }
    if operators.len() == operands.len() {
        if let Some(operator) = operators.pop() {
            debug!(?operator, "dropping trailing operator");
        }
    }

    let mut operands = operands.into_iter();
    let Some(first) = operands.next() else {
        return Ok(None);
    };
    let mut output = vec![first];
    let mut pending: Vec<BinaryOperator> = Vec::new();
    for (operator, operand) in operators.into_iter().zip(operands) {
        while let Some(top) = pending.last().copied() {
            if top.precedence() < operator.precedence() {
                break;
            }
            pending.pop();
            reduce(&mut output, top)?;
        }
        pending.push(operator);
        output.push(operand);
    }
    while let Some(top) = pending.pop() {
        reduce(&mut output, top)?;
    }
    Ok(output.pop())
}

fn reduce(output: &mut Vec<Expression>, operator: BinaryOperator) -> LanguageResult<()> {
    match (output.pop(), output.pop()) {
        (Some(right), Some(left)) => {
            output.push(Expression::binary(operator, left, right));
            Ok(())
        }
        _ => Err(LanguageError::generation("operator is missing an operand")),
    }
}

fn deserialize(tree: &mut NodeTree, serialized: &SerializedNode) -> LanguageResult<NodeId> {
    let id = create(tree);
    deserialize_child_group(tree, id, "tokens", serialized)?;
    Ok(id)
}

fn generate(tree: &NodeTree, id: NodeId) -> LanguageResult<Option<Generated>> {
    Ok(assemble_tokens(tree, id, "tokens")?.map(Generated::Expression))
}

pub(crate) fn register(builder: &mut RegistryBuilder) -> LanguageResult<()> {
    builder.register_type(
        TypeRegistration::new(
            SPLOOT_EXPRESSION,
            deserialize,
            NodeLayout::new(vec![LayoutComponent::token_list("tokens")]),
        )
        .with_child_set("tokens", NodeCategory::ExpressionToken)
        .with_generator(generate)
        .with_clean(clean_expression),
    )?;
    // Expressions are never suggested directly; querying these categories
    // offers every expression token wrapped in a new expression.
    for category in [NodeCategory::Statement, NodeCategory::Expression] {
        builder.register_category(
            SPLOOT_EXPRESSION,
            category,
            WrappingGenerator::new(NodeCategory::ExpressionToken, wrap),
        );
    }
    Ok(())
}
