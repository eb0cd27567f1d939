//! Strata Schema - declarative metamodel assembly.
//!
//! A metamodel is a set of element types connected by child-element
//! collections, base-type relations and references. Types are declared in
//! any order through fluent builders; every relation that names another type
//! is deferred and resolved in a second phase, once the whole model is known.
//!
//! - [`ModelBuilder`] - phase-1 context: declares types, then assembles
//! - [`ElementTypeBuilder`] / [`CollectionBuilder`] - fluent declaration
//! - [`BuildQueue`] / [`BuildOperation`] - deferred cross-type resolution
//! - [`Model`] - the assembled, read-only result
//!
//! # Example
//!
//! ```
//! use strata_core::identifier::Id;
//! use strata_schema::{ModelBuilder, SchemaError};
//!
//! let mut builder = ModelBuilder::new("bpmn");
//!
//! let mut process = builder.define_type("Process");
//! process
//!     .child_element_collection("SequenceFlow")
//!     .with_identifier_reference("FlowNode")?;
//! process.build()?;
//!
//! builder.define_type("SequenceFlow").build()?;
//! builder.define_type("FlowNode").build()?;
//!
//! let model = builder.build()?;
//! assert_eq!(model.incoming_references(Id::new("FlowNode")).len(), 1);
//! # Ok::<(), SchemaError>(())
//! ```

pub mod config;
pub mod error;

mod collection;
mod element_type;
mod model;
mod operation;
mod reference;
mod registry;

pub use collection::{ChildElementCollection, CollectionBuilder, CollectionId};
pub use config::AssemblyConfig;
pub use element_type::{ElementType, ElementTypeBuilder};
pub use error::{ErrorCode, Result, SchemaError, TypeUsage};
pub use model::{Model, ModelBuilder};
pub use operation::{BuildOperation, BuildQueue, CollectionOperation};
pub use reference::ElementReference;
pub use registry::TypeRegistry;
