//! Policies controlling when descriptor invariants are checked.

use serde::Deserialize;

/// When the `min_occurs <= max_occurs` invariant of child collections is
/// validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundsValidation {
    /// Validate at the first structural use of a descriptor.
    #[default]
    Lazy,
    /// Additionally validate every descriptor at the end of model assembly.
    Eager,
}

impl BoundsValidation {
    /// Returns `true` for [`BoundsValidation::Eager`].
    pub fn is_eager(self) -> bool {
        matches!(self, BoundsValidation::Eager)
    }
}
