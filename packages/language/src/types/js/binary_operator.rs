use crate::category::NodeCategory;
use crate::error::{LanguageError, LanguageResult};
use crate::node::NodeId;
use crate::registry::RegistryBuilder;
use crate::schema::{LayoutComponent, NodeLayout, TypeRegistration};
use crate::serialize::SerializedNode;
use crate::suggestion::{Fragment, SuggestedNode, SuggestionContext, SuggestionGenerator};
use crate::tree::NodeTree;
use sprout_syntax::js::BinaryOperator;

pub const BINARY_OPERATOR: &str = "BINARY_OPERATOR";

pub fn create(tree: &mut NodeTree, operator: BinaryOperator) -> NodeId {
    let id = tree.create_node(BINARY_OPERATOR);
    tree.init_property(id, "operator", operator.as_str());
    id
}

/// Operator held by a `BINARY_OPERATOR` node.
pub fn operator_of(tree: &NodeTree, id: NodeId) -> LanguageResult<BinaryOperator> {
    let symbol = tree.property_str(id, "operator");
    BinaryOperator::from_symbol(symbol)
        .ok_or_else(|| LanguageError::generation(format!("unknown operator '{}'", symbol)))
}

fn describe(operator: BinaryOperator) -> &'static str {
    match operator {
        BinaryOperator::Add => "Add",
        BinaryOperator::Subtract => "Subtract",
        BinaryOperator::Multiply => "Multiply",
        BinaryOperator::Divide => "Divide",
        BinaryOperator::Remainder => "Remainder after division",
        BinaryOperator::Equal => "Equals",
        BinaryOperator::NotEqual => "Does not equal",
        BinaryOperator::LessThan => "Less than",
        BinaryOperator::LessThanOrEqual => "Less than or equal to",
        BinaryOperator::GreaterThan => "Greater than",
        BinaryOperator::GreaterThanOrEqual => "Greater than or equal to",
        BinaryOperator::And => "Logical and",
        BinaryOperator::Or => "Logical or",
    }
}

struct Generator;

impl SuggestionGenerator for Generator {
    fn static_suggestions(&self, ctx: &SuggestionContext) -> Vec<SuggestedNode> {
        BinaryOperator::ALL
            .iter()
            .map(|operator| {
                let fragment = Fragment::build(ctx.registry, |tree| create(tree, *operator));
                SuggestedNode::new(fragment, operator.as_str(), operator.as_str(), true)
                    .with_documentation(describe(*operator))
            })
            .collect()
    }
}

fn deserialize(tree: &mut NodeTree, serialized: &SerializedNode) -> LanguageResult<NodeId> {
    let symbol = serialized.string_property("operator");
    let operator = BinaryOperator::from_symbol(symbol)
        .ok_or_else(|| LanguageError::generation(format!("unknown operator '{}'", symbol)))?;
    Ok(create(tree, operator))
}

pub(crate) fn register(builder: &mut RegistryBuilder) -> LanguageResult<()> {
    builder.register_type(
        TypeRegistration::new(
            BINARY_OPERATOR,
            deserialize,
            NodeLayout::new(vec![LayoutComponent::property("operator")]).small(),
        )
        .with_properties(&["operator"]),
    )?;
    builder.register_category(BINARY_OPERATOR, NodeCategory::ExpressionToken, Generator);
    builder.register_category(BINARY_OPERATOR, NodeCategory::PythonExpressionToken, Generator);
    Ok(())
}
