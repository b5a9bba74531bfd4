use super::declared_identifier::declared_name;
use crate::category::NodeCategory;
use crate::error::LanguageResult;
use crate::generate::{generate_expression, Generated};
use crate::node::{Arity, NodeId};
use crate::registry::RegistryBuilder;
use crate::schema::{LayoutComponent, NodeLayout, TypeRegistration};
use crate::scope::Definition;
use crate::serialize::{deserialize_child_group, SerializedNode};
use crate::suggestion::{Fragment, SuggestedNode, SuggestionContext, SuggestionGenerator};
use crate::tree::NodeTree;
use crate::types::prune_empty_expressions;
use sprout_syntax::js::{DeclarationKind, Statement};

pub const VARIABLE_DECLARATION: &str = "VARIABLE_DECLARATION";

pub fn create(tree: &mut NodeTree) -> NodeId {
    let id = tree.create_node(VARIABLE_DECLARATION);
    tree.add_child_group(id, "identifier", Arity::Single, NodeCategory::DeclaredIdentifier);
    tree.add_child_group(id, "init", Arity::Single, NodeCategory::Expression);
    id
}

struct Generator;

impl SuggestionGenerator for Generator {
    fn static_suggestions(&self, ctx: &SuggestionContext) -> Vec<SuggestedNode> {
        let fragment = Fragment::build(ctx.registry, create);
        vec![SuggestedNode::new(fragment, "variable", "variable let", true)
            .with_documentation("Declare a new variable.")]
    }
}

fn deserialize(tree: &mut NodeTree, serialized: &SerializedNode) -> LanguageResult<NodeId> {
    let id = create(tree);
    deserialize_child_group(tree, id, "identifier", serialized)?;
    deserialize_child_group(tree, id, "init", serialized)?;
    Ok(id)
}

/// Nameless declarations are a gap.
fn generate(tree: &NodeTree, id: NodeId) -> LanguageResult<Option<Generated>> {
    let Some(name) = declared_name(tree, id, "identifier") else {
        return Ok(None);
    };
    let init = match tree.first_child(id, "init") {
        Some(init) => generate_expression(tree, init)?,
        None => None,
    };
    Ok(Some(Generated::Statement(Statement::VariableDeclaration {
        kind: DeclarationKind::Let,
        name: name.to_string(),
        init,
    })))
}

fn declarations(tree: &NodeTree, id: NodeId) -> Vec<Definition> {
    declared_name(tree, id, "identifier")
        .map(|name| vec![Definition::variable(name)])
        .unwrap_or_default()
}

fn clean(tree: &mut NodeTree, id: NodeId) {
    prune_empty_expressions(tree, id, "init");
}

pub(crate) fn register(builder: &mut RegistryBuilder) -> LanguageResult<()> {
    builder.register_type(
        TypeRegistration::new(
            VARIABLE_DECLARATION,
            deserialize,
            NodeLayout::new(vec![
                LayoutComponent::keyword("variable"),
                LayoutComponent::inline("identifier"),
                LayoutComponent::attach_right("init"),
            ]),
        )
        .with_child_set("identifier", NodeCategory::DeclaredIdentifier)
        .with_child_set("init", NodeCategory::Expression)
        .with_generator(generate)
        .with_clean(clean)
        .with_declarations(declarations),
    )?;
    builder.register_category(VARIABLE_DECLARATION, NodeCategory::Statement, Generator);
    Ok(())
}
