//! Declaration files: a TOML description of a metamodel.
//!
//! A declaration file lists element types in any order. Each type may name a
//! base type and declare child-element collections, optionally acting as
//! references to another type:
//!
//! ```toml
//! name = "process"
//!
//! [[types]]
//! name = "Process"
//! extends = "BaseElement"
//!
//! [[types.collections]]
//! element = "FlowRef"
//! max_occurs = 3
//! reference = { target = "FlowNode", kind = "identifier" }
//! ```
//!
//! Loading a file only deserializes it. [`ModelDeclaration::declare`] replays
//! the declarations through a [`ModelBuilder`], which defers every cross-type
//! lookup to assembly.

use log::{debug, trace};
use serde::Deserialize;

use strata_core::{occurs::MaxOccurs, reference::ReferenceKind};
use strata_schema::{CollectionBuilder, ModelBuilder, Result};

/// A whole declaration file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelDeclaration {
    name: String,

    #[serde(default)]
    types: Vec<TypeDeclaration>,
}

impl ModelDeclaration {
    /// Name of the declared model.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type declarations in file order.
    pub fn types(&self) -> &[TypeDeclaration] {
        &self.types
    }

    /// Declares every type into `builder`, in file order.
    ///
    /// # Errors
    ///
    /// Returns declaration-time errors only: a type declared twice. Names of
    /// other types are not looked up here.
    pub fn declare(&self, builder: &mut ModelBuilder) -> Result<()> {
        debug!(model:% = self.name, types = self.types.len(); "Declaring model types");
        self.types
            .iter()
            .try_for_each(|declaration| declaration.declare(builder))
    }
}

/// One element type.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeDeclaration {
    name: String,

    #[serde(default)]
    namespace: Option<String>,

    #[serde(default)]
    extends: Option<String>,

    #[serde(default, rename = "abstract")]
    is_abstract: bool,

    #[serde(default)]
    collections: Vec<CollectionDeclaration>,
}

impl TypeDeclaration {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn collections(&self) -> &[CollectionDeclaration] {
        &self.collections
    }

    fn declare(&self, builder: &mut ModelBuilder) -> Result<()> {
        trace!(declaration:? = self; "Declaring type");
        let mut element_type = builder.define_type(self.name.as_str());

        if let Some(namespace) = &self.namespace {
            element_type.namespace_uri(namespace);
        }
        if let Some(base) = &self.extends {
            element_type.extends_type(base.as_str());
        }
        if self.is_abstract {
            element_type.abstract_type();
        }

        for collection in &self.collections {
            let mut collection_builder = if collection.single {
                element_type.child_element(collection.element.as_str())
            } else {
                element_type.child_element_collection(collection.element.as_str())
            };
            collection.configure(&mut collection_builder)?;
        }

        element_type.build().map(|_| ())
    }
}

/// One child-element collection of a type.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectionDeclaration {
    element: String,

    #[serde(default)]
    min_occurs: Option<usize>,

    #[serde(default)]
    max_occurs: Option<MaxOccurs>,

    /// Declare a single child element (`max_occurs = 1`).
    #[serde(default)]
    single: bool,

    #[serde(default)]
    required: bool,

    #[serde(default)]
    immutable: bool,

    #[serde(default)]
    reference: Option<ReferenceDeclaration>,
}

impl CollectionDeclaration {
    pub fn element(&self) -> &str {
        &self.element
    }

    fn configure(&self, builder: &mut CollectionBuilder<'_>) -> Result<()> {
        if self.required {
            builder.required();
        }
        if let Some(min) = self.min_occurs {
            builder.min_occurs(min);
        }
        if let Some(max) = self.max_occurs {
            builder.max_occurs(max);
        }
        if self.immutable {
            builder.immutable();
        }
        if let Some(reference) = &self.reference {
            let target = reference.target.as_str();
            match reference.kind {
                ReferenceKind::Identifier => builder.with_identifier_reference(target)?,
                ReferenceKind::QualifiedName => builder.with_qualified_name_reference(target)?,
            };
        }
        Ok(())
    }
}

/// Reference attached to a collection.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferenceDeclaration {
    target: String,

    #[serde(default = "default_reference_kind")]
    kind: ReferenceKind,
}

fn default_reference_kind() -> ReferenceKind {
    ReferenceKind::Identifier
}
