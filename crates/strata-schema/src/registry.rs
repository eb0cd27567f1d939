//! The type registry: the single source of truth for which element types a
//! model declares.
//!
//! A type enters the registry only when its declaration has completed
//! ([`ElementTypeBuilder::build`](crate::ElementTypeBuilder::build)); there are
//! no tentative entries. Deferred operations therefore either find a fully
//! declared type or nothing at all.

use indexmap::IndexMap;
use log::debug;

use strata_core::identifier::Id;

use crate::{
    element_type::ElementType,
    error::{Result, SchemaError},
};

/// Mapping from type identifier to declared element type, in declaration
/// order.
///
/// Types enter only through [`ElementTypeBuilder::build`](crate::ElementTypeBuilder::build):
///
/// ```compile_fail
/// let mut registry = strata_schema::TypeRegistry::new();
/// ```
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: IndexMap<Id, ElementType>,
}

impl TypeRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Registers a fully declared type.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DuplicateType`] if a type with the same
    /// identifier is already registered; the registered type is unchanged.
    pub(crate) fn register(&mut self, element_type: ElementType) -> Result<()> {
        let id = element_type.id();
        if self.types.contains_key(&id) {
            return Err(SchemaError::DuplicateType { id });
        }
        debug!(id:%; "Registering element type");
        self.types.insert(id, element_type);
        Ok(())
    }

    /// Looks up a type by identifier.
    pub fn get(&self, id: Id) -> Option<&ElementType> {
        self.types.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: Id) -> Option<&mut ElementType> {
        self.types.get_mut(&id)
    }

    /// Returns `true` if a type with this identifier is registered.
    pub fn contains(&self, id: Id) -> bool {
        self.types.contains_key(&id)
    }

    /// Looks up a type by namespace URI and local name.
    pub fn find_by_name(&self, namespace_uri: Option<&str>, local_name: &str) -> Option<&ElementType> {
        self.types
            .values()
            .find(|element_type| element_type.name().matches(namespace_uri, local_name))
    }

    /// Iterates registered types in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ElementType> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
