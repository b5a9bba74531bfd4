//! # Schema and category registry
//!
//! Start-up builds one [`Registry`] through a [`RegistryBuilder`]: each node
//! type module contributes its [`TypeRegistration`] and announces which
//! categories it fills. `build()` validates the collected records, after which
//! the registry is read-only and shared behind an `Arc`.
//!
//! ```rust,ignore
//! let registry = Registry::standard()?;
//! let members = registry.category_members(NodeCategory::DomNode);
//! ```

use crate::category::NodeCategory;
use crate::error::{LanguageError, LanguageResult};
use crate::schema::TypeRegistration;
use crate::suggestion::SuggestionGenerator;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Default)]
struct CategoryEntry {
    members: Vec<&'static str>,
    generators: Vec<Arc<dyn SuggestionGenerator>>,
}

/// Read-only table of node types and the categories they fill.
pub struct Registry {
    types: HashMap<&'static str, TypeRegistration>,
    categories: HashMap<NodeCategory, CategoryEntry>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Registry holding every built-in node type.
    pub fn standard() -> LanguageResult<Arc<Registry>> {
        let mut builder = Registry::builder();
        crate::types::register_all(&mut builder)?;
        Ok(Arc::new(builder.build()?))
    }

    pub fn lookup(&self, type_name: &str) -> LanguageResult<&TypeRegistration> {
        self.types
            .get(type_name)
            .ok_or_else(|| LanguageError::UnregisteredType(type_name.to_string()))
    }

    pub fn is_registered(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    /// Registered type names, sorted
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.types.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Types allowed to occupy `category`, in registration order.
    pub fn category_members(&self, category: NodeCategory) -> &[&'static str] {
        self.categories
            .get(&category)
            .map(|entry| entry.members.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_member(&self, category: NodeCategory, type_name: &str) -> bool {
        self.category_members(category).contains(&type_name)
    }

    /// Suggestion generators for `category`, in registration order.
    pub fn generators_for(&self, category: NodeCategory) -> &[Arc<dyn SuggestionGenerator>] {
        self.categories
            .get(&category)
            .map(|entry| entry.generators.as_slice())
            .unwrap_or(&[])
    }

    /// Every category a type is a member of.
    pub fn categories_of(&self, type_name: &str) -> Vec<NodeCategory> {
        NodeCategory::ALL
            .iter()
            .copied()
            .filter(|category| self.is_member(*category, type_name))
            .collect()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("types", &self.type_names())
            .finish_non_exhaustive()
    }
}

/// Collects registrations during start-up.
#[derive(Default)]
pub struct RegistryBuilder {
    types: HashMap<&'static str, TypeRegistration>,
    categories: HashMap<NodeCategory, CategoryEntry>,
}

impl RegistryBuilder {
    /// Fails when the type name is already taken.
    pub fn register_type(&mut self, registration: TypeRegistration) -> LanguageResult<()> {
        let name = registration.type_name;
        if self.types.contains_key(name) {
            return Err(LanguageError::DuplicateType(name.to_string()));
        }
        debug!(type_name = name, "registered node type");
        self.types.insert(name, registration);
        Ok(())
    }

    /// Make `type_name` a member of `category` and attach its generator.
    pub fn register_category(
        &mut self,
        type_name: &'static str,
        category: NodeCategory,
        generator: impl SuggestionGenerator + 'static,
    ) {
        let entry = self.add_member(type_name, category);
        entry.generators.push(Arc::new(generator));
    }

    /// Membership without a generator; the type is only ever produced by
    /// other means (deserialization, adaptation, a wrapping generator).
    pub fn register_category_member(&mut self, type_name: &'static str, category: NodeCategory) {
        self.add_member(type_name, category);
    }

    fn add_member(&mut self, type_name: &'static str, category: NodeCategory) -> &mut CategoryEntry {
        let entry = self.categories.entry(category).or_default();
        if !entry.members.contains(&type_name) {
            entry.members.push(type_name);
        }
        entry
    }

    /// Validate and freeze. Every category member must be a registered type.
    pub fn build(self) -> LanguageResult<Registry> {
        for (category, entry) in &self.categories {
            for member in &entry.members {
                if !self.types.contains_key(member) {
                    return Err(LanguageError::UnregisteredType(format!(
                        "{} (member of {})",
                        member, category
                    )));
                }
            }
        }
        info!(
            types = self.types.len(),
            categories = self.categories.len(),
            "node type registry ready"
        );
        Ok(Registry {
            types: self.types,
            categories: self.categories,
        })
    }
}
