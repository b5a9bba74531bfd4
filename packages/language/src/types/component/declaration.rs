use super::property::{self, DECLARED_PROPERTY};
use crate::category::NodeCategory;
use crate::error::LanguageResult;
use crate::generate::{generate_statements, Generated};
use crate::node::{Arity, NodeId};
use crate::registry::RegistryBuilder;
use crate::schema::{LayoutComponent, NodeLayout, TypeRegistration};
use crate::scope::{Definition, ParameterDefinition};
use crate::serialize::{deserialize_child_group, SerializedNode};
use crate::suggestion::{Fragment, SuggestedNode, SuggestionContext, SuggestionGenerator};
use crate::tree::NodeTree;
use crate::types::html::script_element::{self, HTML_SCRIPT_ELEMENT};
use crate::types::js::declared_identifier::declared_name;
use crate::types::prune_empty_expressions;
use sprout_syntax::js::{Function, Statement};

pub const COMPONENT_DECLARATION: &str = "COMPONENT_DECLARATION";

pub fn create(tree: &mut NodeTree) -> NodeId {
    let id = tree.create_node(COMPONENT_DECLARATION);
    tree.add_child_group(id, "identifier", Arity::Single, NodeCategory::DeclaredIdentifier);
    tree.add_child_group(
        id,
        "props",
        Arity::Many,
        NodeCategory::ComponentPropertyDeclaration,
    );
    tree.add_child_group(id, "body", Arity::Many, NodeCategory::Statement);
    id
}

fn props(tree: &NodeTree, id: NodeId) -> Vec<ParameterDefinition> {
    tree.children(id, "props")
        .iter()
        .filter(|prop| tree.node_type(**prop) == Some(DECLARED_PROPERTY))
        .map(|prop| property::definition_of(tree, *prop))
        .collect()
}

struct Generator;

impl SuggestionGenerator for Generator {
    fn static_suggestions(&self, ctx: &SuggestionContext) -> Vec<SuggestedNode> {
        let fragment = Fragment::build(ctx.registry, create);
        vec![SuggestedNode::new(fragment, "component", "component", true)
            .with_documentation("A new component.")]
    }
}

fn deserialize(tree: &mut NodeTree, serialized: &SerializedNode) -> LanguageResult<NodeId> {
    let id = create(tree);
    deserialize_child_group(tree, id, "identifier", serialized)?;
    deserialize_child_group(tree, id, "props", serialized)?;
    deserialize_child_group(tree, id, "body", serialized)?;
    Ok(id)
}

/// `export function <Name>(props) { <body> }`. Nameless components are a gap.
fn generate(tree: &NodeTree, id: NodeId) -> LanguageResult<Option<Generated>> {
    let Some(name) = declared_name(tree, id, "identifier") else {
        return Ok(None);
    };
    let function = Function {
        id: Some(name.to_string()),
        params: vec!["props".to_string()],
        body: generate_statements(tree, id, "body")?,
    };
    Ok(Some(Generated::Statement(Statement::export(
        Statement::FunctionDeclaration(function),
    ))))
}

/// The component itself, visible to later siblings.
fn declarations(tree: &NodeTree, id: NodeId) -> Vec<Definition> {
    let Some(name) = declared_name(tree, id, "identifier") else {
        return Vec::new();
    };
    vec![Definition::component(name, props(tree, id)).with_documentation("Component")]
}

/// Inside the body: `props` and each declared prop name.
fn scope_declarations(tree: &NodeTree, id: NodeId) -> Vec<Definition> {
    let mut out = vec![Definition::variable("props")];
    out.extend(
        props(tree, id)
            .into_iter()
            .map(|prop| Definition::variable(prop.name)),
    );
    out
}

fn clean(tree: &mut NodeTree, id: NodeId) {
    prune_empty_expressions(tree, id, "body");
}

pub(crate) fn register(builder: &mut RegistryBuilder) -> LanguageResult<()> {
    builder.register_type(
        TypeRegistration::new(
            COMPONENT_DECLARATION,
            deserialize,
            NodeLayout::new(vec![
                LayoutComponent::keyword("component"),
                LayoutComponent::inline("identifier"),
                LayoutComponent::tree("props"),
                LayoutComponent::block("body"),
            ]),
        )
        .with_child_set("identifier", NodeCategory::DeclaredIdentifier)
        .with_child_set("props", NodeCategory::ComponentPropertyDeclaration)
        .with_child_set("body", NodeCategory::Statement)
        .with_scope(scope_declarations)
        .with_declarations(declarations)
        .with_generator(generate)
        .with_clean(clean)
        .with_paste_adapter(HTML_SCRIPT_ELEMENT, script_element::wrap),
    )?;
    builder.register_category(COMPONENT_DECLARATION, NodeCategory::Statement, Generator);
    Ok(())
}
