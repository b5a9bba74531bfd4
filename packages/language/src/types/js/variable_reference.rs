use crate::category::NodeCategory;
use crate::error::LanguageResult;
use crate::generate::Generated;
use crate::node::NodeId;
use crate::registry::RegistryBuilder;
use crate::schema::{LayoutComponent, NodeLayout, TypeRegistration};
use crate::scope::{resolve, DefinitionKind};
use crate::serialize::SerializedNode;
use crate::suggestion::{
    sanitize_identifier, Fragment, SuggestedNode, SuggestionContext, SuggestionGenerator,
};
use crate::tree::NodeTree;
use crate::types::js::expression::{self, SPLOOT_EXPRESSION};
use crate::types::python::{self, PYTHON_EXPRESSION};
use sprout_syntax::js::Expression;
use std::collections::HashSet;

pub const VARIABLE_REFERENCE: &str = "VARIABLE_REFERENCE";

pub fn create(tree: &mut NodeTree, name: &str) -> NodeId {
    let id = tree.create_node(VARIABLE_REFERENCE);
    tree.init_property(id, "identifier", name);
    id
}

struct Generator;

impl SuggestionGenerator for Generator {
    /// Every variable in scope, innermost first, shadowed names once.
    fn static_suggestions(&self, ctx: &SuggestionContext) -> Vec<SuggestedNode> {
        let mut seen = HashSet::new();
        ctx.definitions()
            .into_iter()
            .filter(|definition| definition.kind == DefinitionKind::Variable)
            .filter(|definition| seen.insert(definition.name.clone()))
            .map(|definition| {
                let fragment = Fragment::build(ctx.registry, |tree| create(tree, &definition.name));
                let suggestion =
                    SuggestedNode::new(fragment, &definition.name, &definition.name, true);
                if definition.documentation.is_empty() {
                    suggestion
                } else {
                    suggestion.with_documentation(definition.documentation)
                }
            })
            .collect()
    }

    /// A reference to whatever was typed; valid only if it resolves.
    fn dynamic_suggestions(&self, ctx: &SuggestionContext, text: &str) -> Vec<SuggestedNode> {
        let text = text.trim();
        if text.is_empty() || text.parse::<f64>().is_ok() {
            return Vec::new();
        }
        let name = sanitize_identifier(text);
        let definitions = ctx.definitions();
        let valid = resolve(&definitions, &[], &name).is_some();
        let fragment = Fragment::build(ctx.registry, |tree| create(tree, &name));
        vec![SuggestedNode::new(fragment, name.clone(), name, valid)]
    }
}

fn deserialize(tree: &mut NodeTree, serialized: &SerializedNode) -> LanguageResult<NodeId> {
    Ok(create(tree, serialized.string_property("identifier")))
}

fn generate(tree: &NodeTree, id: NodeId) -> LanguageResult<Option<Generated>> {
    Ok(Some(Generated::Expression(Expression::identifier(
        tree.property_str(id, "identifier"),
    ))))
}

pub(crate) fn register(builder: &mut RegistryBuilder) -> LanguageResult<()> {
    builder.register_type(
        TypeRegistration::new(
            VARIABLE_REFERENCE,
            deserialize,
            NodeLayout::new(vec![LayoutComponent::property("identifier")]),
        )
        .with_properties(&["identifier"])
        .with_generator(generate)
        .with_paste_adapter(SPLOOT_EXPRESSION, expression::wrap)
        .with_paste_adapter(PYTHON_EXPRESSION, python::expression::wrap),
    )?;
    builder.register_category(VARIABLE_REFERENCE, NodeCategory::ExpressionToken, Generator);
    builder.register_category(VARIABLE_REFERENCE, NodeCategory::PythonExpressionToken, Generator);
    Ok(())
}
