//! Child-element collection descriptors and their builder.
//!
//! A [`ChildElementCollection`] describes one containment relationship: the
//! owning type, the element type, occurrence bounds, mutability, and an
//! optional [`ElementReference`]. It is configured through a
//! [`CollectionBuilder`] during declaration and becomes read-only once the
//! model is assembled.
//!
//! # Lazy bounds validation
//!
//! `min_occurs` and `max_occurs` may be set in either order, so the builder
//! never compares them. The invariant `min_occurs <= max_occurs` is checked at
//! the first structural use of the descriptor ([`ChildElementCollection::validate`],
//! [`occurrence_bounds`](ChildElementCollection::occurrence_bounds),
//! [`check_occurrences`](ChildElementCollection::check_occurrences) or
//! [`ensure_mutable`](ChildElementCollection::ensure_mutable)).

use std::fmt;

use log::trace;

use strata_core::{identifier::Id, occurs::MaxOccurs, reference::ReferenceKind};

use crate::{
    error::{Result, SchemaError},
    operation::{BuildOperation, CollectionOperation},
    reference::ElementReference,
};

/// Stable handle of a child-element collection.
///
/// Identifies the collection by its owning type and declaration index, so the
/// handle stays valid from declaration through the finished [`Model`](crate::Model).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollectionId {
    owner: Id,
    index: usize,
}

impl CollectionId {
    pub(crate) fn new(owner: Id, index: usize) -> Self {
        Self { owner, index }
    }

    /// The type that owns the collection.
    pub fn owner(&self) -> Id {
        self.owner
    }

    /// Position of the collection among its owner's collections.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.owner, self.index)
    }
}

/// Descriptor of one containment relationship between two element types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildElementCollection {
    id: CollectionId,
    element_type: Id,
    min_occurs: usize,
    max_occurs: MaxOccurs,
    immutable: bool,
    reference: Option<ElementReference>,
}

impl ChildElementCollection {
    pub(crate) fn new(id: CollectionId, element_type: Id) -> Self {
        Self {
            id,
            element_type,
            min_occurs: 0,
            max_occurs: MaxOccurs::Unbounded,
            immutable: false,
            reference: None,
        }
    }

    /// Handle of this collection.
    pub fn id(&self) -> CollectionId {
        self.id
    }

    /// The owning (parent) type.
    pub fn owner(&self) -> Id {
        self.id.owner
    }

    /// The element (child) type.
    pub fn element_type(&self) -> Id {
        self.element_type
    }

    /// Configured lower bound, unchecked.
    pub fn min_occurs(&self) -> usize {
        self.min_occurs
    }

    /// Configured upper bound, unchecked.
    pub fn max_occurs(&self) -> MaxOccurs {
        self.max_occurs
    }

    pub fn is_immutable(&self) -> bool {
        self.immutable
    }

    /// The attached reference, if this is a reference collection.
    pub fn reference(&self) -> Option<&ElementReference> {
        self.reference.as_ref()
    }

    /// Checks the `min_occurs <= max_occurs` invariant.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::BoundViolation`] naming the owning and element
    /// types and both bounds.
    pub fn validate(&self) -> Result<()> {
        match self.max_occurs {
            MaxOccurs::Bounded(max) if !self.max_occurs.admits_min(self.min_occurs) => {
                Err(SchemaError::BoundViolation {
                    owner: self.owner(),
                    element: self.element_type,
                    min: self.min_occurs,
                    max,
                })
            }
            _ => Ok(()),
        }
    }

    /// Returns the validated `(min_occurs, max_occurs)` pair.
    pub fn occurrence_bounds(&self) -> Result<(usize, MaxOccurs)> {
        self.validate()?;
        Ok((self.min_occurs, self.max_occurs))
    }

    /// Returns `true` if an instance of the owner may hold `count` children of
    /// this collection.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::BoundViolation`] if the bounds themselves are
    /// inconsistent.
    pub fn check_occurrences(&self, count: usize) -> Result<bool> {
        let (min, max) = self.occurrence_bounds()?;
        Ok(count >= min && max.permits(count))
    }

    /// Checks that the collection's contents may be changed at runtime.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::BoundViolation`] for inconsistent bounds, or
    /// [`SchemaError::ImmutableCollection`] if the collection is immutable.
    pub fn ensure_mutable(&self) -> Result<()> {
        self.validate()?;
        if self.immutable {
            return Err(SchemaError::ImmutableCollection {
                owner: self.owner(),
                element: self.element_type,
            });
        }
        Ok(())
    }
}

/// Fluent builder for one child-element collection.
///
/// Created by [`ElementTypeBuilder::child_element_collection`](crate::ElementTypeBuilder::child_element_collection)
/// or [`ElementTypeBuilder::child_element`](crate::ElementTypeBuilder::child_element).
/// Configuration is purely local: nothing here consults other types. The
/// builder's deferred operation was queued when the builder was created and
/// resolves the element type (and the reference target, if any) once every
/// type of the model is declared.
///
/// # Example
///
/// ```
/// use strata_schema::ModelBuilder;
///
/// let mut model = ModelBuilder::new("example");
/// let mut process = model.define_type("Process");
/// let flows = process
///     .child_element_collection("SequenceFlow")
///     .min_occurs(1)
///     .immutable()
///     .build();
/// process.build().expect("Process is declared once");
/// model.define_type("SequenceFlow").build().expect("declared once");
///
/// let model = model.build().expect("all types are declared");
/// assert_eq!(model.collection(flows).map(|c| c.min_occurs()), Some(1));
/// ```
pub struct CollectionBuilder<'t> {
    descriptor: &'t mut ChildElementCollection,
    operation: &'t mut CollectionOperation,
    failure: &'t mut Option<SchemaError>,
}

impl<'t> CollectionBuilder<'t> {
    pub(crate) fn new(
        descriptor: &'t mut ChildElementCollection,
        operation: &'t mut CollectionOperation,
        failure: &'t mut Option<SchemaError>,
    ) -> Self {
        Self {
            descriptor,
            operation,
            failure,
        }
    }

    /// Disallows runtime mutation of the collection's contents. Idempotent.
    pub fn immutable(&mut self) -> &mut Self {
        self.descriptor.immutable = true;
        self
    }

    /// Sets the lower occurrence bound.
    pub fn min_occurs(&mut self, min: usize) -> &mut Self {
        self.descriptor.min_occurs = min;
        self
    }

    /// Sets the upper occurrence bound: a count or [`MaxOccurs::Unbounded`].
    pub fn max_occurs(&mut self, max: MaxOccurs) -> &mut Self {
        self.descriptor.max_occurs = max;
        self
    }

    /// Requires at least one child.
    pub fn required(&mut self) -> &mut Self {
        self.min_occurs(1)
    }

    /// Returns the handle of the descriptor being built.
    ///
    /// Every call returns the same handle, so configuration applied after an
    /// earlier `build()` is visible through the handle it returned.
    pub fn build(&self) -> CollectionId {
        self.descriptor.id
    }

    /// The descriptor in its current configuration.
    pub fn descriptor(&self) -> &ChildElementCollection {
        self.descriptor
    }

    /// Declares the elements to be references to `target` by qualified name.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DuplicateReference`] if a reference of either
    /// kind is already attached. The existing reference is kept and the error
    /// is recorded on the model, failing its assembly.
    pub fn with_qualified_name_reference(&mut self, target: impl Into<Id>) -> Result<&mut Self> {
        self.attach_reference(target.into(), ReferenceKind::QualifiedName)
    }

    /// Declares the elements to be references to `target` by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DuplicateReference`] if a reference of either
    /// kind is already attached. The existing reference is kept and the error
    /// is recorded on the model, failing its assembly.
    pub fn with_identifier_reference(&mut self, target: impl Into<Id>) -> Result<&mut Self> {
        self.attach_reference(target.into(), ReferenceKind::Identifier)
    }

    fn attach_reference(&mut self, target: Id, kind: ReferenceKind) -> Result<&mut Self> {
        if let Some(existing) = &self.descriptor.reference {
            let err = SchemaError::DuplicateReference {
                owner: self.descriptor.owner(),
                element: self.descriptor.element_type,
                existing: existing.kind(),
            };
            self.failure.get_or_insert_with(|| err.clone());
            return Err(err);
        }

        let collection = self.descriptor.id;
        trace!(collection:%, target:%, kind:%; "Attaching reference");
        self.descriptor.reference = Some(ElementReference::new(collection, target, kind));
        self.operation
            .push_nested(BuildOperation::ResolveReference { collection, target });
        Ok(self)
    }
}
