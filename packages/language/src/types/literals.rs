//! String and number literals, shared by the script, markup and python
//! sub-languages.

use crate::category::NodeCategory;
use crate::error::LanguageResult;
use crate::generate::Generated;
use crate::node::NodeId;
use crate::registry::RegistryBuilder;
use crate::schema::{LayoutComponent, NodeLayout, TypeRegistration};
use crate::serialize::SerializedNode;
use crate::suggestion::{Fragment, SuggestedNode, SuggestionContext, SuggestionGenerator};
use crate::tree::NodeTree;
use crate::types::js::expression::{self as js_expression, SPLOOT_EXPRESSION};
use crate::types::python::expression::{self as python_expression, PYTHON_EXPRESSION};
use sprout_syntax::js::{format_number, Expression};

pub const STRING_LITERAL: &str = "STRING_LITERAL";
pub const NUMERIC_LITERAL: &str = "NUMERIC_LITERAL";

pub fn create_string(tree: &mut NodeTree, value: &str) -> NodeId {
    let id = tree.create_node(STRING_LITERAL);
    tree.init_property(id, "value", value);
    id
}

pub fn create_number(tree: &mut NodeTree, value: f64) -> NodeId {
    let id = tree.create_node(NUMERIC_LITERAL);
    tree.init_property(id, "value", value);
    id
}

/// Value of a string literal, or `None` for any other node.
pub fn string_value(tree: &NodeTree, id: NodeId) -> Option<&str> {
    (tree.node_type(id)? == STRING_LITERAL).then(|| tree.property_str(id, "value"))
}

struct StringLiteralGenerator;

impl SuggestionGenerator for StringLiteralGenerator {
    fn static_suggestions(&self, _ctx: &SuggestionContext) -> Vec<SuggestedNode> {
        Vec::new()
    }

    fn dynamic_suggestions(&self, ctx: &SuggestionContext, text: &str) -> Vec<SuggestedNode> {
        let value = text
            .strip_prefix(['"', '\''])
            .map(|rest| rest.strip_suffix(['"', '\'']).unwrap_or(rest))
            .unwrap_or(text);
        if text.is_empty() {
            return Vec::new();
        }
        let fragment = Fragment::build(ctx.registry, |tree| create_string(tree, value));
        vec![SuggestedNode::new(fragment, format!("\"{}\"", value), text, true)
            .with_documentation("Text value")]
    }
}

struct NumericLiteralGenerator;

impl SuggestionGenerator for NumericLiteralGenerator {
    fn static_suggestions(&self, _ctx: &SuggestionContext) -> Vec<SuggestedNode> {
        Vec::new()
    }

    fn dynamic_suggestions(&self, ctx: &SuggestionContext, text: &str) -> Vec<SuggestedNode> {
        let Ok(value) = text.trim().parse::<f64>() else {
            return Vec::new();
        };
        if !value.is_finite() {
            return Vec::new();
        }
        let fragment = Fragment::build(ctx.registry, |tree| create_number(tree, value));
        vec![SuggestedNode::new(fragment, format_number(value), text, true)]
    }
}

fn deserialize_string(tree: &mut NodeTree, serialized: &SerializedNode) -> LanguageResult<NodeId> {
    Ok(create_string(tree, serialized.string_property("value")))
}

fn deserialize_number(tree: &mut NodeTree, serialized: &SerializedNode) -> LanguageResult<NodeId> {
    Ok(create_number(tree, serialized.number_property("value")))
}

fn generate_string(tree: &NodeTree, id: NodeId) -> LanguageResult<Option<Generated>> {
    Ok(Some(Generated::Expression(Expression::string(
        tree.property_str(id, "value"),
    ))))
}

fn generate_number(tree: &NodeTree, id: NodeId) -> LanguageResult<Option<Generated>> {
    let value = tree
        .property(id, "value")
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);
    Ok(Some(Generated::Expression(Expression::Number(value))))
}

pub(crate) fn register(builder: &mut RegistryBuilder) -> LanguageResult<()> {
    builder.register_type(
        TypeRegistration::new(
            STRING_LITERAL,
            deserialize_string,
            NodeLayout::new(vec![LayoutComponent::string_literal("value")]),
        )
        .with_properties(&["value"])
        .with_generator(generate_string)
        .with_paste_adapter(SPLOOT_EXPRESSION, js_expression::wrap)
        .with_paste_adapter(PYTHON_EXPRESSION, python_expression::wrap),
    )?;
    for category in [
        NodeCategory::ExpressionToken,
        NodeCategory::DomNode,
        NodeCategory::HtmlAttributeValue,
        NodeCategory::PythonExpressionToken,
    ] {
        builder.register_category(STRING_LITERAL, category, StringLiteralGenerator);
    }

    builder.register_type(
        TypeRegistration::new(
            NUMERIC_LITERAL,
            deserialize_number,
            NodeLayout::new(vec![LayoutComponent::property("value")]),
        )
        .with_properties(&["value"])
        .with_generator(generate_number)
        .with_paste_adapter(SPLOOT_EXPRESSION, js_expression::wrap)
        .with_paste_adapter(PYTHON_EXPRESSION, python_expression::wrap),
    )?;
    for category in [NodeCategory::ExpressionToken, NodeCategory::PythonExpressionToken] {
        builder.register_category(NUMERIC_LITERAL, category, NumericLiteralGenerator);
    }
    Ok(())
}
