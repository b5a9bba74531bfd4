//! Lexical scope records.
//!
//! Library definitions arrive from outside as plain data; declarations inside
//! the document are collected on demand by walking up from an insert position.

use crate::node::NodeId;
use crate::tree::NodeTree;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefinitionKind {
    Variable,
    Function,
    Component,
}

/// A parameter or component prop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDefinition {
    pub name: String,
    #[serde(default)]
    pub type_expression: String,
}

impl ParameterDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_expression: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Definition {
    pub kind: DefinitionKind,
    pub name: String,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub documentation: String,
    /// Function parameters or component props
    #[serde(default)]
    pub params: Vec<ParameterDefinition>,
}

impl Definition {
    pub fn variable(name: impl Into<String>) -> Self {
        Self::new(DefinitionKind::Variable, name)
    }

    pub fn function(name: impl Into<String>, params: Vec<ParameterDefinition>) -> Self {
        Self {
            params,
            ..Self::new(DefinitionKind::Function, name)
        }
    }

    pub fn component(name: impl Into<String>, props: Vec<ParameterDefinition>) -> Self {
        Self {
            params: props,
            ..Self::new(DefinitionKind::Component, name)
        }
    }

    fn new(kind: DefinitionKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            deprecated: false,
            documentation: String::new(),
            params: Vec::new(),
        }
    }

    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = documentation.into();
        self
    }
}

/// Definitions visible at `parent.group[index]`, innermost first.
///
/// At each level, earlier siblings contribute their declarations; every
/// enclosing node flagged `has_scope` contributes its own scope (params,
/// props). Shadowed names are kept; callers see the innermost first.
pub fn visible_definitions(
    tree: &NodeTree,
    parent: NodeId,
    group: &str,
    index: usize,
) -> Vec<Definition> {
    let mut out = Vec::new();
    let mut position = Some((parent, group.to_string(), index));

    while let Some((node, group, index)) = position {
        let siblings = tree.children(node, &group);
        for sibling in siblings[..index.min(siblings.len())].iter().rev() {
            out.extend(declarations_of(tree, *sibling));
        }
        if let Some(scope) = tree
            .node_type(node)
            .and_then(|t| tree.registry().lookup(t).ok())
            .filter(|registration| registration.has_scope)
            .and_then(|registration| registration.scope_declarations)
        {
            out.extend(scope(tree, node));
        }
        position = tree
            .parent(node)
            .map(|p| (p.node, p.group.clone(), p.index));
    }
    out
}

/// Declarations a node makes visible to its later siblings.
pub fn declarations_of(tree: &NodeTree, id: NodeId) -> Vec<Definition> {
    tree.node_type(id)
        .and_then(|t| tree.registry().lookup(t).ok())
        .and_then(|registration| registration.declarations)
        .map(|declarations| declarations(tree, id))
        .unwrap_or_default()
}

/// Innermost visible definition called `name`, falling back to `library`.
pub fn resolve<'a>(
    visible: &'a [Definition],
    library: &'a [Definition],
    name: &str,
) -> Option<&'a Definition> {
    visible
        .iter()
        .chain(library.iter())
        .find(|definition| definition.name == name)
}
