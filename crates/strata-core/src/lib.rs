//! Strata Core Types
//!
//! This crate provides the foundational value types shared by every Strata
//! crate:
//!
//! - **Identifiers**: Process-wide, string-interned type identifiers ([`identifier::Id`])
//! - **Qualified names**: Namespace-aware element names ([`name::QualifiedName`])
//! - **Occurrence bounds**: Upper bounds for child collections ([`occurs::MaxOccurs`])
//! - **Reference kinds**: How a reference collection resolves its targets ([`reference::ReferenceKind`])
//! - **Validation policy**: When descriptor bounds are checked ([`validation::BoundsValidation`])

pub mod identifier;
pub mod name;
pub mod occurs;
pub mod reference;
pub mod validation;
