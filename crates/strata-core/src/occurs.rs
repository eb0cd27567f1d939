//! Occurrence bounds for child-element collections.
//!
//! A collection's lower bound is a plain `usize`; the upper bound is a
//! [`MaxOccurs`], which is either a count or unbounded.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, de};
use thiserror::Error;

/// Keyword accepted by [`MaxOccurs::from_str`] for an unbounded collection.
pub const UNBOUNDED: &str = "unbounded";

/// Upper occurrence bound of a child-element collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MaxOccurs {
    /// At most this many children.
    Bounded(usize),
    /// Any number of children.
    #[default]
    Unbounded,
}

impl MaxOccurs {
    /// Returns the numeric bound, or `None` when unbounded.
    pub fn bound(self) -> Option<usize> {
        match self {
            MaxOccurs::Bounded(n) => Some(n),
            MaxOccurs::Unbounded => None,
        }
    }

    /// Returns `true` if this is [`MaxOccurs::Unbounded`].
    pub fn is_unbounded(self) -> bool {
        matches!(self, MaxOccurs::Unbounded)
    }

    /// Returns `true` if `count` does not exceed this bound.
    pub fn permits(self, count: usize) -> bool {
        self.bound().is_none_or(|max| count <= max)
    }

    /// Returns `true` if `min` is an admissible lower bound for this upper bound.
    pub fn admits_min(self, min: usize) -> bool {
        self.permits(min)
    }
}

impl From<usize> for MaxOccurs {
    fn from(n: usize) -> Self {
        MaxOccurs::Bounded(n)
    }
}

impl fmt::Display for MaxOccurs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaxOccurs::Bounded(n) => write!(f, "{n}"),
            MaxOccurs::Unbounded => f.write_str(UNBOUNDED),
        }
    }
}

/// Error returned when a string is neither a count nor `unbounded`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid max occurs `{0}`, expected a non-negative integer or `unbounded`")]
pub struct ParseMaxOccursError(String);

impl FromStr for MaxOccurs {
    type Err = ParseMaxOccursError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(UNBOUNDED) || trimmed == "*" {
            return Ok(MaxOccurs::Unbounded);
        }
        trimmed
            .parse::<usize>()
            .map(MaxOccurs::Bounded)
            .map_err(|_| ParseMaxOccursError(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for MaxOccurs {
    /// Accepts either an integer (`3`) or a keyword string (`"unbounded"`).
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Count(usize),
            Keyword(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Count(n) => Ok(MaxOccurs::Bounded(n)),
            Repr::Keyword(keyword) => keyword.parse().map_err(de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unbounded() {
        assert_eq!(MaxOccurs::default(), MaxOccurs::Unbounded);
        assert!(MaxOccurs::default().is_unbounded());
    }

    #[test]
    fn test_bound() {
        assert_eq!(MaxOccurs::Bounded(4).bound(), Some(4));
        assert_eq!(MaxOccurs::Unbounded.bound(), None);
    }

    #[test]
    fn test_permits() {
        assert!(MaxOccurs::Bounded(2).permits(2));
        assert!(!MaxOccurs::Bounded(2).permits(3));
        assert!(MaxOccurs::Unbounded.permits(usize::MAX));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("7".parse::<MaxOccurs>(), Ok(MaxOccurs::Bounded(7)));
        assert_eq!("unbounded".parse::<MaxOccurs>(), Ok(MaxOccurs::Unbounded));
        assert_eq!("Unbounded".parse::<MaxOccurs>(), Ok(MaxOccurs::Unbounded));
        assert_eq!("*".parse::<MaxOccurs>(), Ok(MaxOccurs::Unbounded));
        assert!("-1".parse::<MaxOccurs>().is_err());
        assert!("many".parse::<MaxOccurs>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(MaxOccurs::Bounded(3).to_string(), "3");
        assert_eq!(MaxOccurs::Unbounded.to_string(), "unbounded");
    }
}
