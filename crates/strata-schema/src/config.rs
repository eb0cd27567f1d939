//! Assembly configuration.

use strata_core::validation::BoundsValidation;

/// Configuration for the assembly phase.
///
/// Holds the policies [`ModelBuilder::build`](crate::ModelBuilder::build)
/// applies after the deferred operations have run.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssemblyConfig {
    /// When collection bounds are validated
    pub bounds_validation: BoundsValidation,
}

impl AssemblyConfig {
    /// Create a new AssemblyConfig with the given bounds validation policy
    pub fn new(bounds_validation: BoundsValidation) -> Self {
        Self { bounds_validation }
    }
}
