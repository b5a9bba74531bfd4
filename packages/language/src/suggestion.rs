//! # Suggestion engine
//!
//! Generators registered against a category propose candidate nodes for an
//! insert position. Candidates are built in their own [`Fragment`] so that a
//! query never touches the document; accepting one means grafting its
//! fragment into the document tree.
//!
//! Static candidates of every generator come first, then dynamic ones, each in
//! generator registration order.

use crate::category::NodeCategory;
use crate::error::LanguageResult;
use crate::node::NodeId;
use crate::registry::Registry;
use crate::scope::{visible_definitions, Definition};
use crate::tree::NodeTree;
use std::sync::Arc;
use tracing::{debug, warn};

/// A detached subtree in a tree of its own.
#[derive(Debug)]
pub struct Fragment {
    pub tree: NodeTree,
    pub root: NodeId,
}

impl Fragment {
    /// Build a fragment by running `create` against a fresh tree.
    pub fn build(registry: &Arc<Registry>, create: impl FnOnce(&mut NodeTree) -> NodeId) -> Self {
        let mut tree = NodeTree::new(registry.clone());
        let root = create(&mut tree);
        Self { tree, root }
    }

    pub fn node_type(&self) -> &'static str {
        self.tree.node_type(self.root).unwrap_or_default()
    }
}

/// An autocomplete candidate: a fully built node that is not attached yet.
#[derive(Debug)]
pub struct SuggestedNode {
    pub fragment: Fragment,
    pub title: String,
    pub search_key: String,
    pub valid: bool,
    pub documentation: Option<String>,
}

impl SuggestedNode {
    pub fn new(
        fragment: Fragment,
        title: impl Into<String>,
        search_key: impl Into<String>,
        valid: bool,
    ) -> Self {
        Self {
            fragment,
            title: title.into(),
            search_key: search_key.into(),
            valid,
            documentation: None,
        }
    }

    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }

    pub fn node_type(&self) -> &'static str {
        self.fragment.node_type()
    }

    /// Case-insensitive match of typed text against the search key or title.
    pub fn matches(&self, text: &str) -> bool {
        let text = text.trim().to_lowercase();
        text.is_empty()
            || self.search_key.to_lowercase().contains(&text)
            || self.title.to_lowercase().contains(&text)
    }
}

/// Where a candidate would be inserted.
#[derive(Debug, Clone, Copy)]
pub struct InsertPosition<'a> {
    pub tree: &'a NodeTree,
    pub parent: NodeId,
    pub group: &'a str,
    pub index: usize,
}

impl<'a> InsertPosition<'a> {
    pub fn parent_type(&self) -> Option<&'static str> {
        self.tree.node_type(self.parent)
    }
}

pub struct SuggestionContext<'a> {
    pub registry: &'a Arc<Registry>,
    pub position: Option<InsertPosition<'a>>,
    /// Externally loaded library definitions
    pub library: &'a [Definition],
}

impl<'a> SuggestionContext<'a> {
    /// A context with no insert position, used for detached queries.
    pub fn detached(registry: &'a Arc<Registry>) -> Self {
        Self {
            registry,
            position: None,
            library: &[],
        }
    }

    pub fn at(registry: &'a Arc<Registry>, position: InsertPosition<'a>) -> Self {
        Self {
            registry,
            position: Some(position),
            library: &[],
        }
    }

    pub fn with_library(mut self, library: &'a [Definition]) -> Self {
        self.library = library;
        self
    }

    /// Document definitions in scope at the position, then the library.
    pub fn definitions(&self) -> Vec<Definition> {
        let mut out = match &self.position {
            Some(position) => {
                visible_definitions(position.tree, position.parent, position.group, position.index)
            }
            None => Vec::new(),
        };
        out.extend(self.library.iter().cloned());
        out
    }
}

pub trait SuggestionGenerator: Send + Sync {
    /// Candidates that do not depend on typed text.
    fn static_suggestions(&self, ctx: &SuggestionContext) -> Vec<SuggestedNode>;

    /// Candidates synthesized from the typed text.
    fn dynamic_suggestions(&self, _ctx: &SuggestionContext, _text: &str) -> Vec<SuggestedNode> {
        Vec::new()
    }
}

/// Wrapping constructor: builds a container around a detached node.
pub type WrapFn = fn(&mut NodeTree, NodeId) -> LanguageResult<NodeId>;

/// Generator for a synthetic category: queries the generators of `source` and
/// wraps each candidate with `wrap`.
pub struct WrappingGenerator {
    pub source: NodeCategory,
    pub wrap: WrapFn,
}

impl WrappingGenerator {
    pub fn new(source: NodeCategory, wrap: WrapFn) -> Self {
        Self { source, wrap }
    }

    fn wrap_all(&self, suggestions: Vec<SuggestedNode>) -> Vec<SuggestedNode> {
        suggestions
            .into_iter()
            .filter_map(|mut suggestion| {
                let inner = suggestion.fragment.root;
                match (self.wrap)(&mut suggestion.fragment.tree, inner) {
                    Ok(wrapper) => {
                        suggestion.fragment.root = wrapper;
                        Some(suggestion)
                    }
                    Err(err) => {
                        warn!(%err, title = %suggestion.title, "could not wrap suggestion");
                        None
                    }
                }
            })
            .collect()
    }
}

impl SuggestionGenerator for WrappingGenerator {
    fn static_suggestions(&self, ctx: &SuggestionContext) -> Vec<SuggestedNode> {
        let inner = ctx
            .registry
            .generators_for(self.source)
            .iter()
            .flat_map(|generator| generator.static_suggestions(ctx))
            .collect();
        self.wrap_all(inner)
    }

    fn dynamic_suggestions(&self, ctx: &SuggestionContext, text: &str) -> Vec<SuggestedNode> {
        let inner = ctx
            .registry
            .generators_for(self.source)
            .iter()
            .flat_map(|generator| generator.dynamic_suggestions(ctx, text))
            .collect();
        self.wrap_all(inner)
    }
}

/// Candidates for `category` at the context's position.
///
/// Anything a generator returns whose type is not a member of `category` is
/// dropped with a warning, so callers can insert every result as-is.
pub fn suggest(ctx: &SuggestionContext, category: NodeCategory, text: &str) -> Vec<SuggestedNode> {
    let generators = ctx.registry.generators_for(category);
    let mut out: Vec<SuggestedNode> = generators
        .iter()
        .flat_map(|generator| generator.static_suggestions(ctx))
        .collect();
    out.extend(
        generators
            .iter()
            .flat_map(|generator| generator.dynamic_suggestions(ctx, text)),
    );

    let total = out.len();
    out.retain(|suggestion| {
        let member = ctx.registry.is_member(category, suggestion.node_type());
        if !member {
            warn!(
                node_type = suggestion.node_type(),
                %category,
                "generator returned a non-member candidate"
            );
        }
        member
    });
    debug!(%category, text, total, kept = out.len(), "suggest");
    out
}

/// Turn free text into an identifier.
///
/// Anything outside ASCII letters, digits and `_` becomes a word break, so
/// the result is always a valid script identifier. When the text has breaks, every word
/// after the first gets an upper-case initial and lower-case rest. An empty
/// result or one starting with a digit is prefixed with `_`.
pub fn sanitize_identifier(text: &str) -> String {
    let replaced: String = text
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace() { c } else { ' ' })
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();

    let mut name = if replaced.contains(' ') {
        replaced
            .split(' ')
            .enumerate()
            .map(|(index, word)| {
                if index == 0 {
                    return word.to_string();
                }
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => {
                        first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                    }
                    None => String::new(),
                }
            })
            .collect::<String>()
    } else {
        replaced
    };

    if name.chars().next().map_or(true, |c| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name
}
