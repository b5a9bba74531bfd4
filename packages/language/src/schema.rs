//! # Type registrations
//!
//! The structural contract of a node type: declared properties, child groups
//! with their categories, the layout description, and the behaviour hooks
//! (deserialize, generate, adapt, clean, scope) that shared traversal code
//! dispatches through.

use crate::category::NodeCategory;
use crate::error::LanguageResult;
use crate::generate::Generated;
use crate::node::NodeId;
use crate::scope::Definition;
use crate::serialize::SerializedNode;
use crate::tree::NodeTree;
use serde::{Deserialize, Serialize};

/// Build a node (and its subtree) from its serialized form.
pub type Deserializer = fn(&mut NodeTree, &SerializedNode) -> LanguageResult<NodeId>;

/// Produce the backing syntax for a node. `Ok(None)` is a generation gap.
pub type GenerateFn = fn(&NodeTree, NodeId) -> LanguageResult<Option<Generated>>;

/// Build a new node of another type around (or from) a detached node.
pub type PasteAdapter = fn(&mut NodeTree, NodeId) -> LanguageResult<NodeId>;

/// Prune meaningless children after an edit; may clean the parent once.
pub type CleanFn = fn(&mut NodeTree, NodeId);

/// Names a node makes visible in a lexical scope.
pub type DeclarationsFn = fn(&NodeTree, NodeId) -> Vec<Definition>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutComponentType {
    /// Fixed text
    Keyword,
    /// A property value shown as-is
    Property,
    /// A property value shown in quotes
    StringLiteral,
    /// Children laid out inline, one after another
    ChildSetInline,
    /// Children each start an indented line of their own
    ChildSetBlock,
    /// First child continues the line, the rest hang below it
    ChildSetTree,
    /// Same as tree, drawn with brackets
    ChildSetTreeBrackets,
    /// Children flow inline as a token sequence
    ChildSetTokenList,
    /// Single child drawn immediately to the right
    ChildSetAttachRight,
    /// Single child drawn at the start of the line
    ChildSetBreadcrumbs,
}

impl LayoutComponentType {
    pub fn is_child_set(&self) -> bool {
        !matches!(
            self,
            LayoutComponentType::Keyword
                | LayoutComponentType::Property
                | LayoutComponentType::StringLiteral
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayoutComponent {
    pub kind: LayoutComponentType,
    /// Keyword text, property name, or child group name depending on `kind`
    pub identifier: &'static str,
}

impl LayoutComponent {
    pub const fn new(kind: LayoutComponentType, identifier: &'static str) -> Self {
        Self { kind, identifier }
    }

    pub const fn keyword(text: &'static str) -> Self {
        Self::new(LayoutComponentType::Keyword, text)
    }

    pub const fn property(name: &'static str) -> Self {
        Self::new(LayoutComponentType::Property, name)
    }

    pub const fn string_literal(name: &'static str) -> Self {
        Self::new(LayoutComponentType::StringLiteral, name)
    }

    pub const fn inline(group: &'static str) -> Self {
        Self::new(LayoutComponentType::ChildSetInline, group)
    }

    pub const fn block(group: &'static str) -> Self {
        Self::new(LayoutComponentType::ChildSetBlock, group)
    }

    pub const fn tree(group: &'static str) -> Self {
        Self::new(LayoutComponentType::ChildSetTree, group)
    }

    pub const fn tree_brackets(group: &'static str) -> Self {
        Self::new(LayoutComponentType::ChildSetTreeBrackets, group)
    }

    pub const fn token_list(group: &'static str) -> Self {
        Self::new(LayoutComponentType::ChildSetTokenList, group)
    }

    pub const fn attach_right(group: &'static str) -> Self {
        Self::new(LayoutComponentType::ChildSetAttachRight, group)
    }

    pub const fn breadcrumbs(group: &'static str) -> Self {
        Self::new(LayoutComponentType::ChildSetBreadcrumbs, group)
    }
}

/// Ordered description of how a node is drawn.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct NodeLayout {
    pub components: Vec<LayoutComponent>,
    /// Use the tighter inline spacing
    pub small: bool,
    /// Reserve leading space inside the node's box
    pub block: bool,
}

impl NodeLayout {
    pub fn new(components: Vec<LayoutComponent>) -> Self {
        Self {
            components,
            small: false,
            block: false,
        }
    }

    pub fn small(mut self) -> Self {
        self.small = true;
        self
    }

    pub fn block(mut self) -> Self {
        self.block = true;
        self
    }
}

/// Schema entry for one node type.
#[derive(Clone)]
pub struct TypeRegistration {
    pub type_name: &'static str,
    pub deserializer: Deserializer,
    pub properties: Vec<&'static str>,
    pub child_sets: Vec<(&'static str, NodeCategory)>,
    pub layout: NodeLayout,
    pub has_scope: bool,
    /// Keyed by the type the adapter produces, tried in registration order
    pub paste_adapters: Vec<(&'static str, PasteAdapter)>,
    pub generate: Option<GenerateFn>,
    pub clean: Option<CleanFn>,
    /// Definitions visible to later siblings
    pub declarations: Option<DeclarationsFn>,
    /// Definitions visible inside this node's own scope (params, props)
    pub scope_declarations: Option<DeclarationsFn>,
}

impl TypeRegistration {
    pub fn new(type_name: &'static str, deserializer: Deserializer, layout: NodeLayout) -> Self {
        Self {
            type_name,
            deserializer,
            properties: Vec::new(),
            child_sets: Vec::new(),
            layout,
            has_scope: false,
            paste_adapters: Vec::new(),
            generate: None,
            clean: None,
            declarations: None,
            scope_declarations: None,
        }
    }

    pub fn with_properties(mut self, properties: &[&'static str]) -> Self {
        self.properties.extend_from_slice(properties);
        self
    }

    pub fn with_child_set(mut self, name: &'static str, category: NodeCategory) -> Self {
        self.child_sets.push((name, category));
        self
    }

    pub fn with_scope(mut self, scope_declarations: DeclarationsFn) -> Self {
        self.has_scope = true;
        self.scope_declarations = Some(scope_declarations);
        self
    }

    pub fn with_paste_adapter(mut self, target_type: &'static str, adapter: PasteAdapter) -> Self {
        self.paste_adapters.push((target_type, adapter));
        self
    }

    pub fn with_generator(mut self, generate: GenerateFn) -> Self {
        self.generate = Some(generate);
        self
    }

    pub fn with_clean(mut self, clean: CleanFn) -> Self {
        self.clean = Some(clean);
        self
    }

    pub fn with_declarations(mut self, declarations: DeclarationsFn) -> Self {
        self.declarations = Some(declarations);
        self
    }

    pub fn child_set_category(&self, name: &str) -> Option<NodeCategory> {
        self.child_sets
            .iter()
            .find(|(group, _)| *group == name)
            .map(|(_, category)| *category)
    }
}

impl std::fmt::Debug for TypeRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistration")
            .field("type_name", &self.type_name)
            .field("properties", &self.properties)
            .field("child_sets", &self.child_sets)
            .field("has_scope", &self.has_scope)
            .field(
                "paste_adapters",
                &self.paste_adapters.iter().map(|(t, _)| *t).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}
