//! Part capability tags.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Capability a part advertises to systems that query it.
///
/// Tags are resolved at query time, so a part can gain or lose a capability
/// while the simulation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub enum PartTag {
    /// Temporary support fixture that is released by decoupling.
    Clamp,
}

impl std::fmt::Display for PartTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Clamp => write!(f, "clamp"),
        }
    }
}
