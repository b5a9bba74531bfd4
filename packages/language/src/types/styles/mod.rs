//! Style sheet node types.

pub mod property;
pub mod rule;
pub mod selector;

use crate::error::LanguageResult;
use crate::node::NodeId;
use crate::registry::RegistryBuilder;
use crate::tree::NodeTree;
use crate::types::literals::string_value;

pub use property::STYLE_PROPERTY;
pub use rule::STYLE_RULE;
pub use selector::STYLE_SELECTOR_BASIC;

pub(crate) fn register(builder: &mut RegistryBuilder) -> LanguageResult<()> {
    rule::register(builder)?;
    selector::register(builder)?;
    property::register(builder)?;
    Ok(())
}

/// Text of the string literal in the `value` group.
pub(crate) fn value_text(tree: &NodeTree, id: NodeId) -> Option<&str> {
    tree.first_child(id, "value")
        .and_then(|child| string_value(tree, child))
}
