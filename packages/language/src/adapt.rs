//! Cross-type adaptation for paste and drop.

use crate::category::NodeCategory;
use crate::node::NodeId;
use crate::tree::NodeTree;
use tracing::{debug, warn};

/// Make a detached node legal in `destination`.
///
/// Returns the node itself when its type is already a member; otherwise the
/// first registered paste adapter whose target type is a member builds a new
/// node around (or from) it. `None` means no conversion path exists and the
/// caller should abandon the operation.
pub fn adapt(tree: &mut NodeTree, node: NodeId, destination: NodeCategory) -> Option<NodeId> {
    let node_type = tree.node_type(node)?;
    let registry = tree.registry().clone();
    if registry.is_member(destination, node_type) {
        return Some(node);
    }

    let registration = registry.lookup(node_type).ok()?;
    for (target_type, adapter) in &registration.paste_adapters {
        if !registry.is_member(destination, target_type) {
            continue;
        }
        match adapter(tree, node) {
            Ok(adapted) => {
                debug!(from = node_type, to = *target_type, %destination, "adapted node");
                return Some(adapted);
            }
            Err(err) => {
                warn!(from = node_type, to = *target_type, %err, "paste adapter failed");
            }
        }
    }

    debug!(node_type, %destination, "cannot adapt");
    None
}

/// Whether [`adapt`] could succeed, without building anything.
pub fn can_adapt(tree: &NodeTree, node: NodeId, destination: NodeCategory) -> bool {
    let Some(node_type) = tree.node_type(node) else {
        return false;
    };
    let registry = tree.registry();
    registry.is_member(destination, node_type)
        || registry.lookup(node_type).is_ok_and(|registration| {
            registration
                .paste_adapters
                .iter()
                .any(|(target, _)| registry.is_member(destination, target))
        })
}
