use crate::category::NodeCategory;
use crate::error::{LanguageError, LanguageResult};
use crate::generate::{generate, Generated};
use crate::node::{Arity, NodeId};
use crate::registry::RegistryBuilder;
use crate::schema::{LayoutComponent, NodeLayout, TypeRegistration};
use crate::serialize::{deserialize_child_group, SerializedNode};
use crate::tree::NodeTree;
use crate::types::prune_empty_expressions;

/// Root of a python module.
pub const PYTHON_FILE: &str = "PYTHON_FILE";

pub fn create(tree: &mut NodeTree) -> NodeId {
    let id = tree.create_node(PYTHON_FILE);
    tree.add_child_group(id, "body", Arity::Many, NodeCategory::PythonStatement);
    id
}

fn deserialize(tree: &mut NodeTree, serialized: &SerializedNode) -> LanguageResult<NodeId> {
    let id = create(tree);
    deserialize_child_group(tree, id, "body", serialized)?;
    Ok(id)
}

/// One line per statement.
fn generate_file(tree: &NodeTree, id: NodeId) -> LanguageResult<Option<Generated>> {
    let mut out = String::new();
    for child in tree.children(id, "body") {
        match generate(tree, *child)? {
            Some(Generated::Text(line)) => {
                out.push_str(&line);
                out.push('\n');
            }
            None => {}
            Some(_) => {
                return Err(LanguageError::generation(format!(
                    "{} is not a python statement",
                    tree.node_type(*child).unwrap_or("?")
                )))
            }
        }
    }
    Ok(Some(Generated::Text(out)))
}

fn clean(tree: &mut NodeTree, id: NodeId) {
    prune_empty_expressions(tree, id, "body");
}

pub(crate) fn register(builder: &mut RegistryBuilder) -> LanguageResult<()> {
    builder.register_type(
        TypeRegistration::new(
            PYTHON_FILE,
            deserialize,
            NodeLayout::new(vec![LayoutComponent::block("body")]),
        )
        .with_child_set("body", NodeCategory::PythonStatement)
        .with_generator(generate_file)
        .with_clean(clean),
    )
}
