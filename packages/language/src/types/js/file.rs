use crate::category::NodeCategory;
use crate::error::LanguageResult;
use crate::generate::{generate_statements, Generated};
use crate::node::{Arity, NodeId};
use crate::registry::RegistryBuilder;
use crate::schema::{LayoutComponent, NodeLayout, TypeRegistration};
use crate::serialize::{deserialize_child_group, SerializedNode};
use crate::tree::NodeTree;
use crate::types::prune_empty_expressions;
use sprout_syntax::js::Program;

/// Root of a script document.
pub const JAVASCRIPT_FILE: &str = "JAVASCRIPT_FILE";

pub fn create(tree: &mut NodeTree) -> NodeId {
    let id = tree.create_node(JAVASCRIPT_FILE);
    tree.add_child_group(id, "body", Arity::Many, NodeCategory::Statement);
    id
}

fn deserialize(tree: &mut NodeTree, serialized: &SerializedNode) -> LanguageResult<NodeId> {
    let id = create(tree);
    deserialize_child_group(tree, id, "body", serialized)?;
    Ok(id)
}

fn generate(tree: &NodeTree, id: NodeId) -> LanguageResult<Option<Generated>> {
    let body = generate_statements(tree, id, "body")?;
    Ok(Some(Generated::Program(Program::new(body))))
}

fn clean(tree: &mut NodeTree, id: NodeId) {
    prune_empty_expressions(tree, id, "body");
}

pub(crate) fn register(builder: &mut RegistryBuilder) -> LanguageResult<()> {
    builder.register_type(
        TypeRegistration::new(
            JAVASCRIPT_FILE,
            deserialize,
            NodeLayout::new(vec![LayoutComponent::block("body")]),
        )
        .with_child_set("body", NodeCategory::Statement)
        .with_generator(generate)
        .with_clean(clean),
    )
}
