//! Reference descriptors for child-element collections.
//!
//! A collection with an [`ElementReference`] does not own its elements: each
//! element links to an instance of the target type elsewhere in the document,
//! either by identifier or by qualified name.

use strata_core::{identifier::Id, reference::ReferenceKind};

use crate::collection::CollectionId;

/// Describes how the elements of one collection link to instances of a
/// target type.
///
/// A collection carries at most one reference; see
/// [`CollectionBuilder::with_identifier_reference`](crate::CollectionBuilder::with_identifier_reference).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementReference {
    collection: CollectionId,
    target_type: Id,
    kind: ReferenceKind,
}

impl ElementReference {
    pub(crate) fn new(collection: CollectionId, target_type: Id, kind: ReferenceKind) -> Self {
        Self {
            collection,
            target_type,
            kind,
        }
    }

    /// The collection whose elements act as references.
    pub fn collection(&self) -> CollectionId {
        self.collection
    }

    /// The type the references point at.
    pub fn target_type(&self) -> Id {
        self.target_type
    }

    /// The resolution mode of the reference.
    pub fn kind(&self) -> ReferenceKind {
        self.kind
    }
}
