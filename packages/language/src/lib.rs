//! # Sprout Language
//!
//! The structural document model: typed nodes in category-constrained child
//! groups, the registry describing every node type, and the three passes that
//! run over a tree.
//!
//! ```text
//! Registry (start-up) ──▶ NodeTree ──┬──▶ suggest   (candidates for a slot)
//!                                    ├──▶ generate  (backing syntax / text)
//!                                    └──▶ adapt     (paste into another slot)
//! ```
//!
//! ```rust,ignore
//! let registry = Registry::standard()?;
//! let mut tree = NodeTree::new(registry.clone());
//! let file = types::js::file::create(&mut tree);
//! let code = generate_code_string(&tree, file, &GenerateOptions::default())?;
//! ```

pub mod adapt;
pub mod category;
pub mod error;
pub mod generate;
pub mod html_tags;
pub mod node;
pub mod registry;
pub mod schema;
pub mod scope;
pub mod serialize;
pub mod suggestion;
pub mod tree;
pub mod types;

pub use adapt::{adapt, can_adapt};
pub use category::NodeCategory;
pub use error::{LanguageError, LanguageResult, SchemaViolation};
pub use generate::{
    generate, generate_code_string, generate_expression, generate_statements, GenerateOptions,
    Generated,
};
pub use node::{Arity, ChildGroup, Node, NodeId, ParentRef, PropertyValue};
pub use registry::{Registry, RegistryBuilder};
pub use schema::{LayoutComponent, LayoutComponentType, NodeLayout, TypeRegistration};
pub use scope::{visible_definitions, Definition, DefinitionKind, ParameterDefinition};
pub use serialize::{deserialize, serialize, SerializedNode};
pub use suggestion::{
    suggest, Fragment, InsertPosition, SuggestedNode, SuggestionContext, SuggestionGenerator,
    WrappingGenerator,
};
pub use tree::NodeTree;

#[cfg(test)]
mod tests;
