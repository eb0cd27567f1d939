//! Type identifiers backed by a process-wide string interner.
//!
//! Every element type in a Strata model is keyed by an [`Id`]. Interning makes
//! identifiers `Copy`, cheap to hash and safe to share between threads, so a
//! finished model can be read concurrently without synchronization.

use std::{
    convert::Infallible,
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner shared by all identifiers in the process.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

/// Run `f` with exclusive access to the global interner.
fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    f(&mut interner)
}

/// Opaque, process-wide unique identifier of an element type.
///
/// Two identifiers created from the same name are equal, and comparing or
/// hashing them never touches the interner.
///
/// # Examples
///
/// ```
/// use strata_core::identifier::Id;
///
/// let process = Id::new("Process");
/// let again: Id = "Process".into();
///
/// assert_eq!(process, again);
/// assert_eq!(process, "Process");
/// assert_eq!(process.to_string(), "Process");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates (or looks up) the identifier for `name`.
    pub fn new(name: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(name)))
    }

    /// Returns the interned name as an owned string.
    pub fn name(&self) -> String {
        with_interner(|interner| {
            interner
                .resolve(self.0)
                .map(str::to_owned)
                .unwrap_or_default()
        })
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl std::str::FromStr for Id {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<&String> for Id {
    fn from(name: &String) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "Process"`
    fn eq(&self, other: &str) -> bool {
        with_interner(|interner| interner.resolve(self.0) == Some(other))
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
