//! Error types for assembly operations.

use thiserror::Error;

/// Errors that can occur while editing an assembly world.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    /// Invalid part ID referenced.
    #[error("invalid part ID: {0}")]
    InvalidPartId(u64),

    /// Invalid body ID referenced.
    #[error("invalid body ID: {0}")]
    InvalidBodyId(u64),

    /// Invalid vessel ID referenced.
    #[error("invalid vessel ID: {0}")]
    InvalidVesselId(u64),

    /// The part already carries a rigid body.
    #[error("part {part_id} already has rigid body {body_id}")]
    BodyAlreadyAttached {
        /// The part that already has a body.
        part_id: u64,
        /// The body it carries.
        body_id: u64,
    },

    /// A joint was requested on a part with no rigid body to attach to.
    #[error("part {part_id} has no rigid body to attach a joint to")]
    MissingRigidBody {
        /// The part without a body.
        part_id: u64,
    },

    /// Invalid configuration.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the configuration error.
        reason: String,
    },
}

impl SimError {
    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Check if this is a configuration error.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. })
    }

    /// Check if this error names an entity that does not exist.
    #[must_use]
    pub fn is_unknown_entity(&self) -> bool {
        matches!(
            self,
            Self::InvalidPartId(_) | Self::InvalidBodyId(_) | Self::InvalidVesselId(_)
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SimError::InvalidPartId(42);
        assert!(err.to_string().contains("42"));

        let err = SimError::BodyAlreadyAttached {
            part_id: 3,
            body_id: 9,
        };
        let msg = err.to_string();
        assert!(msg.contains('3') && msg.contains('9'));

        let err = SimError::invalid_config("negative strength");
        assert!(err.to_string().contains("negative strength"));
    }

    #[test]
    fn test_error_predicates() {
        let err = SimError::invalid_config("test");
        assert!(err.is_config_error());
        assert!(!err.is_unknown_entity());

        let err = SimError::InvalidVesselId(1);
        assert!(err.is_unknown_entity());
        assert!(!err.is_config_error());

        let err = SimError::MissingRigidBody { part_id: 1 };
        assert!(!err.is_unknown_entity());
    }
}
