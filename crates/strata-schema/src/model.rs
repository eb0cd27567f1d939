//! Model assembly: the two-phase protocol and the finished model.
//!
//! Phase 1 declares types through [`ModelBuilder::define_type`]. Declarations
//! are purely local and may appear in any order, including forward references
//! to types declared later. Phase 2 is [`ModelBuilder::build`], which drains
//! the deferred operation queue against the complete registry and produces an
//! immutable [`Model`].

use std::collections::HashSet;

use log::{debug, info, trace};

use strata_core::identifier::Id;

use crate::{
    collection::{ChildElementCollection, CollectionId},
    config::AssemblyConfig,
    element_type::{ElementType, ElementTypeBuilder},
    error::{Result, SchemaError},
    operation::BuildQueue,
    registry::TypeRegistry,
};

/// Phase-1 context of a model under construction.
///
/// # Example
///
/// ```
/// use strata_schema::ModelBuilder;
///
/// let mut builder = ModelBuilder::new("shop");
///
/// // `Order` names `LineItem` before it is declared
/// let mut order = builder.define_type("Order");
/// let items = order.child_element_collection("LineItem").required().build();
/// order.build().expect("declared once");
/// builder.define_type("LineItem").build().expect("declared once");
///
/// let model = builder.build().expect("every type is declared");
/// let order = model.get_type("Order".into()).expect("registered");
/// assert!(order.has_child_element_type("LineItem".into()));
/// assert_eq!(model.collection(items).map(|c| c.min_occurs()), Some(1));
/// ```
#[derive(Debug)]
pub struct ModelBuilder {
    name: String,
    config: AssemblyConfig,
    registry: TypeRegistry,
    queue: BuildQueue,
    // first declaration error; assembly refuses to run past it
    failure: Option<SchemaError>,
}

impl ModelBuilder {
    /// Starts a model with the default [`AssemblyConfig`].
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, AssemblyConfig::default())
    }

    pub fn with_config(name: impl Into<String>, config: AssemblyConfig) -> Self {
        Self {
            name: name.into(),
            config,
            registry: TypeRegistry::new(),
            queue: BuildQueue::new(),
            failure: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Begins the declaration of a type.
    ///
    /// The type becomes visible to the model only when the returned builder's
    /// [`build`](ElementTypeBuilder::build) is called.
    pub fn define_type(&mut self, id: impl Into<Id>) -> ElementTypeBuilder<'_> {
        let element_type = ElementType::new(id.into(), &self.name);
        trace!(id:% = element_type.id(); "Defining element type");
        ElementTypeBuilder::new(
            &mut self.registry,
            &mut self.queue,
            &mut self.failure,
            element_type,
        )
    }

    /// Returns `true` if a type with this identifier has completed its
    /// declaration.
    pub fn is_declared(&self, id: impl Into<Id>) -> bool {
        self.registry.contains(id.into())
    }

    /// The first error reported while declaring, if any.
    pub fn failure(&self) -> Option<&SchemaError> {
        self.failure.as_ref()
    }

    /// Number of top-level deferred operations waiting for phase 2.
    pub fn pending_operations(&self) -> usize {
        self.queue.len()
    }

    /// Runs phase 2 and returns the assembled model.
    ///
    /// Every deferred operation runs exactly once, in the order it was
    /// configured. With [`BoundsValidation::Eager`](strata_core::validation::BoundsValidation::Eager)
    /// every collection's bounds are checked afterwards.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] encountered. A declaration error
    /// (a duplicate type or a second reference) is returned even if the
    /// caller ignored it when it was reported, and no deferred operation
    /// runs. Otherwise the error is an undeclared type named by any
    /// declaration or, in eager mode, a bound violation. No model is
    /// produced on failure.
    pub fn build(self) -> Result<Model> {
        let Self {
            name,
            config,
            mut registry,
            queue,
            failure,
        } = self;

        if let Some(err) = failure {
            debug!(model:% = name, code:% = err.code(); "Declaration failed, skipping assembly");
            return Err(err);
        }

        info!(model:% = name, types = registry.len(); "Assembling model");
        let executed = queue.run(&mut registry)?;
        debug!(executed; "Deferred operations completed");

        let model = Model { name, registry };
        if config.bounds_validation.is_eager() {
            debug!("Validating collection bounds");
            model.validate_collections()?;
        }

        info!(model:% = model.name(); "Model assembled");
        Ok(model)
    }
}

/// An assembled, read-only metamodel.
///
/// Every identifier reachable from the model names a registered type.
#[derive(Debug, Clone)]
pub struct Model {
    name: String,
    registry: TypeRegistry,
}

impl Model {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks up a type by identifier.
    pub fn get_type(&self, id: Id) -> Option<&ElementType> {
        self.registry.get(id)
    }

    /// Looks up a type by namespace URI and local name.
    pub fn type_for_name(&self, namespace_uri: Option<&str>, local_name: &str) -> Option<&ElementType> {
        self.registry.find_by_name(namespace_uri, local_name)
    }

    /// Iterates all types in declaration order.
    pub fn types(&self) -> impl Iterator<Item = &ElementType> {
        self.registry.iter()
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Resolves a collection handle.
    pub fn collection(&self, id: CollectionId) -> Option<&ChildElementCollection> {
        self.registry
            .get(id.owner())
            .and_then(|owner| owner.collection(id.index()))
    }

    /// Child types declared directly on `id`.
    pub fn child_element_types(&self, id: Id) -> Vec<Id> {
        self.registry
            .get(id)
            .map(|element_type| element_type.child_element_types().collect())
            .unwrap_or_default()
    }

    /// Child types of `id` including those inherited along its base-type
    /// chain, base types first.
    pub fn all_child_element_types(&self, id: Id) -> Vec<Id> {
        let mut chain = Vec::new();
        let mut visited = HashSet::new();
        let mut current = Some(id);
        while let Some(type_id) = current {
            if !visited.insert(type_id) {
                break;
            }
            let Some(element_type) = self.registry.get(type_id) else {
                break;
            };
            chain.push(element_type);
            current = element_type.base_type();
        }

        let mut seen = HashSet::new();
        chain
            .iter()
            .rev()
            .flat_map(|element_type| element_type.child_element_types())
            .filter(|child| seen.insert(*child))
            .collect()
    }

    /// Types that directly extend `id`.
    pub fn extending_types(&self, id: Id) -> &[Id] {
        self.registry
            .get(id)
            .map(ElementType::extending_types)
            .unwrap_or_default()
    }

    /// Reference collections that target `id`.
    pub fn incoming_references(&self, id: Id) -> &[CollectionId] {
        self.registry
            .get(id)
            .map(ElementType::incoming_references)
            .unwrap_or_default()
    }

    /// Validates the bounds of every collection in the model.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError::BoundViolation`](crate::SchemaError::BoundViolation)
    /// in declaration order.
    pub fn validate_collections(&self) -> Result<()> {
        self.registry
            .iter()
            .flat_map(ElementType::collections)
            .try_for_each(ChildElementCollection::validate)
    }
}
