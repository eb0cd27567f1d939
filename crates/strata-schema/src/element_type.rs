//! Element types and the builder that declares them.
//!
//! An [`ElementType`] is one node kind of the metamodel. It is declared through
//! an [`ElementTypeBuilder`], which collects purely local configuration and the
//! deferred operations that the model resolves once every type is known.

use indexmap::IndexSet;
use log::debug;

use strata_core::{identifier::Id, name::QualifiedName, occurs::MaxOccurs};

use crate::{
    collection::{ChildElementCollection, CollectionBuilder, CollectionId},
    error::{Result, SchemaError},
    operation::{BuildOperation, BuildQueue, CollectionOperation},
    registry::TypeRegistry,
};

/// One node kind of a metamodel.
///
/// Owns the child-element collections it declares. The resolved facts
/// (registered child types, extending types, incoming references) are filled
/// in while the model is assembled and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementType {
    id: Id,
    model_name: String,
    name: QualifiedName,
    is_abstract: bool,
    base_type: Option<Id>,
    collections: Vec<ChildElementCollection>,
    child_element_types: IndexSet<Id>,
    extending_types: Vec<Id>,
    incoming_references: Vec<CollectionId>,
}

impl ElementType {
    pub(crate) fn new(id: Id, model_name: &str) -> Self {
        Self {
            id,
            model_name: model_name.to_string(),
            name: QualifiedName::local(id.name()),
            is_abstract: false,
            base_type: None,
            collections: Vec::new(),
            child_element_types: IndexSet::new(),
            extending_types: Vec::new(),
            incoming_references: Vec::new(),
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    /// Name of the model this type belongs to.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Qualified name of the node kind.
    pub fn name(&self) -> &QualifiedName {
        &self.name
    }

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    /// The declared base type, if the type extends another.
    pub fn base_type(&self) -> Option<Id> {
        self.base_type
    }

    /// Child-element collections in declaration order.
    pub fn collections(&self) -> &[ChildElementCollection] {
        &self.collections
    }

    /// The collection declared at `index`.
    pub fn collection(&self, index: usize) -> Option<&ChildElementCollection> {
        self.collections.get(index)
    }

    /// Element types registered as children of this type.
    pub fn child_element_types(&self) -> impl Iterator<Item = Id> + '_ {
        self.child_element_types.iter().copied()
    }

    /// Returns `true` if `child` is a registered child type of this type.
    pub fn has_child_element_type(&self, child: Id) -> bool {
        self.child_element_types.contains(&child)
    }

    /// Types that declared this type as their base.
    pub fn extending_types(&self) -> &[Id] {
        &self.extending_types
    }

    /// Reference collections whose target is this type.
    pub fn incoming_references(&self) -> &[CollectionId] {
        &self.incoming_references
    }

    pub(crate) fn set_abstract(&mut self) {
        self.is_abstract = true;
    }

    pub(crate) fn set_name(&mut self, namespace_uri: Option<&str>, local_name: &str) {
        self.name = QualifiedName::new(namespace_uri, local_name);
    }

    pub(crate) fn register_child_element_type(&mut self, child: Id) {
        self.child_element_types.insert(child);
    }

    pub(crate) fn register_extending_type(&mut self, extending: Id) {
        if !self.extending_types.contains(&extending) {
            self.extending_types.push(extending);
        }
    }

    pub(crate) fn register_incoming_reference(&mut self, collection: CollectionId) {
        self.incoming_references.push(collection);
    }
}

/// Builder declaring one element type.
///
/// Created by [`ModelBuilder::define_type`](crate::ModelBuilder::define_type).
/// Nothing is visible to the rest of the model until [`build`](Self::build)
/// registers the type and hands its deferred operations to the model's queue.
///
/// # Example
///
/// ```
/// use strata_core::identifier::Id;
/// use strata_schema::ModelBuilder;
///
/// let mut model = ModelBuilder::new("bpmn");
///
/// let mut task = model.define_type("Task");
/// task.namespace_uri("http://example.org/bpmn")
///     .extends_type("FlowNode");
/// task.child_element("Documentation");
/// task.build().expect("Task is declared once");
///
/// let mut flow_node = model.define_type("FlowNode");
/// flow_node.abstract_type();
/// flow_node.build().expect("FlowNode is declared once");
///
/// model.define_type("Documentation").build().expect("declared once");
///
/// let model = model.build().expect("all types are declared");
/// assert_eq!(model.extending_types(Id::new("FlowNode")), &[Id::new("Task")]);
/// ```
#[must_use = "a type is registered only when `build` is called"]
pub struct ElementTypeBuilder<'m> {
    registry: &'m mut TypeRegistry,
    queue: &'m mut BuildQueue,
    failure: &'m mut Option<SchemaError>,
    element_type: ElementType,
    collection_operations: Vec<CollectionOperation>,
    // number of collections declared when the base type was last set
    base_position: usize,
}

impl<'m> ElementTypeBuilder<'m> {
    pub(crate) fn new(
        registry: &'m mut TypeRegistry,
        queue: &'m mut BuildQueue,
        failure: &'m mut Option<SchemaError>,
        element_type: ElementType,
    ) -> Self {
        Self {
            registry,
            queue,
            failure,
            element_type,
            collection_operations: Vec::new(),
            base_position: 0,
        }
    }

    /// Identifier of the type being declared.
    pub fn id(&self) -> Id {
        self.element_type.id
    }

    /// Places the type's qualified name in `namespace_uri`.
    pub fn namespace_uri(&mut self, namespace_uri: &str) -> &mut Self {
        let local_name = self.element_type.name.local_name().to_string();
        self.element_type.set_name(Some(namespace_uri), &local_name);
        self
    }

    /// Declares `base` as the base type. Resolved after all types are declared.
    ///
    /// Calling it again replaces the base type; the resolution then takes the
    /// position of the last call among the collection declarations.
    pub fn extends_type(&mut self, base: impl Into<Id>) -> &mut Self {
        self.element_type.base_type = Some(base.into());
        self.base_position = self.collection_operations.len();
        self
    }

    /// Marks the type abstract.
    pub fn abstract_type(&mut self) -> &mut Self {
        self.element_type.set_abstract();
        self
    }

    /// Declares a child-element collection of `element` instances.
    ///
    /// The collection's deferred operation is queued now, in declaration order;
    /// `element` need not be declared yet.
    pub fn child_element_collection(&mut self, element: impl Into<Id>) -> CollectionBuilder<'_> {
        let element = element.into();
        let id = CollectionId::new(self.element_type.id, self.element_type.collections.len());
        debug!(owner:% = self.element_type.id, element:%; "Declaring child collection");

        self.element_type
            .collections
            .push(ChildElementCollection::new(id, element));
        self.collection_operations
            .push(CollectionOperation::new(id, element));

        let operation_index = self.collection_operations.len() - 1;
        CollectionBuilder::new(
            &mut self.element_type.collections[id.index()],
            &mut self.collection_operations[operation_index],
            &mut *self.failure,
        )
    }

    /// Declares a single child element: a collection with at most one
    /// `element` instance.
    pub fn child_element(&mut self, element: impl Into<Id>) -> CollectionBuilder<'_> {
        let mut builder = self.child_element_collection(element);
        builder.max_occurs(MaxOccurs::Bounded(1));
        builder
    }

    /// Completes the declaration and registers the type.
    ///
    /// The type's deferred operations join the model queue in the order they
    /// were configured: base-type resolution sits wherever
    /// [`extends_type`](Self::extends_type) was called relative to the
    /// collection declarations.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DuplicateType`] if the model already declares a
    /// type with this identifier. The error is also recorded on the model, so
    /// [`ModelBuilder::build`](crate::ModelBuilder::build) fails even if this
    /// result is ignored.
    pub fn build(self) -> Result<Id> {
        let id = self.element_type.id;
        let base_operation = self
            .element_type
            .base_type
            .map(|base| BuildOperation::ResolveBaseType {
                element_type: id,
                base,
            });

        if let Err(err) = self.registry.register(self.element_type) {
            self.failure.get_or_insert_with(|| err.clone());
            return Err(err);
        }

        debug!(
            id:%,
            collections = self.collection_operations.len();
            "Element type declared"
        );
        let mut operations: Vec<BuildOperation> = self
            .collection_operations
            .into_iter()
            .map(BuildOperation::ResolveCollection)
            .collect();
        if let Some(operation) = base_operation {
            operations.insert(self.base_position, operation);
        }
        self.queue.extend(operations);
        Ok(id)
    }
}
