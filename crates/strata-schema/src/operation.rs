//! Deferred build operations and the queue that runs them.
//!
//! Declaring a type never looks at other types. Every cross-type fact a
//! declaration implies (a base type, the element type of a collection, the
//! target of a reference) is captured as a [`BuildOperation`] and appended to
//! the model's [`BuildQueue`]. The queue is drained only after every type has
//! been declared, so each lookup sees the complete [`TypeRegistry`].
//!
//! Operations are consumed by value when they run: an operation can neither
//! run twice nor be skipped without the queue reporting an error.

use log::{debug, trace};

use strata_core::identifier::Id;

use crate::{
    collection::CollectionId,
    error::{Result, SchemaError, TypeUsage},
    registry::TypeRegistry,
};

/// One unit of cross-type resolution captured during declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOperation {
    /// Resolve the base type named by `extends_type`.
    ResolveBaseType { element_type: Id, base: Id },

    /// Resolve the element type of a child collection, then run the
    /// collection's nested operations.
    ResolveCollection(CollectionOperation),

    /// Resolve the target type of a collection's reference.
    ResolveReference { collection: CollectionId, target: Id },
}

impl BuildOperation {
    /// Runs the operation against a fully populated registry.
    ///
    /// Returns the number of operations executed, nested ones included.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UndeclaredType`] if a named type is missing.
    pub(crate) fn execute(self, registry: &mut TypeRegistry) -> Result<usize> {
        match self {
            BuildOperation::ResolveBaseType { element_type, base } => {
                trace!(element_type:%, base:%; "Resolving base type");
                let base_type =
                    registry
                        .get_mut(base)
                        .ok_or(SchemaError::UndeclaredType {
                            owner: element_type,
                            missing: base,
                            usage: TypeUsage::BaseType,
                        })?;
                base_type.register_extending_type(element_type);
                Ok(1)
            }
            BuildOperation::ResolveCollection(operation) => operation.execute(registry),
            BuildOperation::ResolveReference { collection, target } => {
                trace!(collection:%, target:%; "Resolving reference target");
                let target_type =
                    registry
                        .get_mut(target)
                        .ok_or(SchemaError::UndeclaredType {
                            owner: collection.owner(),
                            missing: target,
                            usage: TypeUsage::ReferenceTarget,
                        })?;
                target_type.register_incoming_reference(collection);
                Ok(1)
            }
        }
    }
}

/// Deferred operation of one child-element collection.
///
/// Owns the operations of anything attached to the collection (its reference),
/// which run only after the collection's own element type has resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionOperation {
    collection: CollectionId,
    element_type: Id,
    nested: Vec<BuildOperation>,
}

impl CollectionOperation {
    pub(crate) fn new(collection: CollectionId, element_type: Id) -> Self {
        Self {
            collection,
            element_type,
            nested: Vec::new(),
        }
    }

    pub(crate) fn push_nested(&mut self, operation: BuildOperation) {
        self.nested.push(operation);
    }

    /// The collection this operation resolves.
    pub fn collection(&self) -> CollectionId {
        self.collection
    }

    /// Operations that run after the element type has resolved.
    pub fn nested(&self) -> &[BuildOperation] {
        &self.nested
    }

    fn execute(self, registry: &mut TypeRegistry) -> Result<usize> {
        let owner = self.collection.owner();
        trace!(owner:%, element_type:% = self.element_type; "Resolving child collection");

        if !registry.contains(self.element_type) {
            return Err(SchemaError::UndeclaredType {
                owner,
                missing: self.element_type,
                usage: TypeUsage::ChildElement,
            });
        }
        if let Some(owner_type) = registry.get_mut(owner) {
            owner_type.register_child_element_type(self.element_type);
        }

        let mut executed = 1;
        for operation in self.nested {
            executed += operation.execute(registry)?;
        }
        Ok(executed)
    }
}

/// Ordered queue of deferred operations for a whole model.
///
/// Only [`ModelBuilder`](crate::ModelBuilder) fills and drains a queue; it can
/// be inspected but not run from outside:
///
/// ```compile_fail
/// let queue = strata_schema::BuildQueue::new();
/// ```
#[derive(Debug, Default)]
pub struct BuildQueue {
    operations: Vec<BuildOperation>,
}

impl BuildQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends operations in the order they were configured.
    pub(crate) fn extend(&mut self, operations: impl IntoIterator<Item = BuildOperation>) {
        self.operations.extend(operations);
    }

    /// Number of top-level operations waiting to run.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Iterates pending operations in execution order.
    pub fn iter(&self) -> impl Iterator<Item = &BuildOperation> {
        self.operations.iter()
    }

    /// Drains the queue, running every operation exactly once, in order.
    ///
    /// Stops at the first failing operation. Returns the number of operations
    /// executed, nested ones included.
    pub(crate) fn run(self, registry: &mut TypeRegistry) -> Result<usize> {
        debug!(operations = self.operations.len(); "Running deferred build operations");
        let mut executed = 0;
        for operation in self.operations {
            executed += operation.execute(registry)?;
        }
        Ok(executed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element_type::ElementType;

    fn registry_with(names: &[&str]) -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        for name in names {
            registry
                .register(ElementType::new(Id::new(name), "test"))
                .unwrap();
        }
        registry
    }

    #[test]
    fn test_collection_operation_registers_child_type() {
        let mut registry = registry_with(&["Parent", "Child"]);
        let operation = BuildOperation::ResolveCollection(CollectionOperation::new(
            CollectionId::new(Id::new("Parent"), 0),
            Id::new("Child"),
        ));

        assert_eq!(operation.execute(&mut registry), Ok(1));
        let parent = registry.get(Id::new("Parent")).unwrap();
        assert!(parent.child_element_types().any(|id| id == "Child"));
    }

    #[test]
    fn test_collection_operation_missing_element() {
        let mut registry = registry_with(&["Parent"]);
        let operation = BuildOperation::ResolveCollection(CollectionOperation::new(
            CollectionId::new(Id::new("Parent"), 0),
            Id::new("Ghost"),
        ));

        assert_eq!(
            operation.execute(&mut registry),
            Err(SchemaError::UndeclaredType {
                owner: Id::new("Parent"),
                missing: Id::new("Ghost"),
                usage: TypeUsage::ChildElement,
            })
        );
    }

    #[test]
    fn test_nested_reference_runs_after_containment() {
        let mut registry = registry_with(&["Parent", "Child"]);
        let collection = CollectionId::new(Id::new("Parent"), 0);
        let mut operation = CollectionOperation::new(collection, Id::new("Child"));
        operation.push_nested(BuildOperation::ResolveReference {
            collection,
            target: Id::new("Missing"),
        });

        let err = BuildOperation::ResolveCollection(operation)
            .execute(&mut registry)
            .unwrap_err();

        // containment resolved before the reference failed
        let parent = registry.get(Id::new("Parent")).unwrap();
        assert!(parent.child_element_types().any(|id| id == "Child"));
        assert_eq!(
            err,
            SchemaError::UndeclaredType {
                owner: Id::new("Parent"),
                missing: Id::new("Missing"),
                usage: TypeUsage::ReferenceTarget,
            }
        );
    }

    #[test]
    fn test_queue_counts_nested_operations() {
        let mut registry = registry_with(&["Parent", "Child", "Target", "Base"]);
        let collection = CollectionId::new(Id::new("Parent"), 0);
        let mut operation = CollectionOperation::new(collection, Id::new("Child"));
        operation.push_nested(BuildOperation::ResolveReference {
            collection,
            target: Id::new("Target"),
        });

        let mut queue = BuildQueue::new();
        queue.extend([
            BuildOperation::ResolveBaseType {
                element_type: Id::new("Parent"),
                base: Id::new("Base"),
            },
            BuildOperation::ResolveCollection(operation),
        ]);
        assert_eq!(queue.len(), 2);

        assert_eq!(queue.run(&mut registry), Ok(3));
        let target = registry.get(Id::new("Target")).unwrap();
        assert_eq!(target.incoming_references(), &[collection]);
        let base = registry.get(Id::new("Base")).unwrap();
        assert_eq!(base.extending_types(), &[Id::new("Parent")]);
    }
}
