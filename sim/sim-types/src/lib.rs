//! Core types for assembly simulation.
//!
//! This crate provides the vocabulary shared by the assembly world and the
//! systems that edit it:
//!
//! - [`PartId`], [`BodyId`], [`VesselId`], [`JointId`], [`HandlerId`] - Opaque handles
//! - [`JointSettings`] - Anchor, axes, motion locks and break thresholds of a joint
//! - [`PartTag`] - Capabilities queried on parts
//! - [`SimError`] - Errors from world edits
//!
//! # Design Philosophy
//!
//! These types are **pure data**. They carry no solver and no bookkeeping;
//! the world that owns the entities lives in `sim-core`.
//!
//! # Example
//!
//! ```
//! use sim_types::{BodyId, JointSettings, MotionLocks, ProjectionMode};
//!
//! let settings = JointSettings::new()
//!     .with_connected_body(BodyId::new(2))
//!     .with_motion(MotionLocks::locked())
//!     .with_projection(ProjectionMode::PositionAndRotation);
//!
//! assert!(settings.is_unbreakable());
//! assert_eq!(settings.motion.locked_dof(), 6);
//! ```

#![doc(html_root_url = "https://docs.rs/sim-types/0.1.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(clippy::missing_const_for_fn, clippy::missing_errors_doc)]

mod error;
mod ids;
mod joint;
mod part;

pub use error::SimError;
pub use ids::{BodyId, HandlerId, JointId, PartId, VesselId};
pub use joint::{JointMotion, JointSettings, MotionLocks, ProjectionMode};
pub use part::PartTag;

// Re-export math types for convenience
pub use nalgebra::{Point3, Vector3};

/// Result type for assembly operations.
pub type Result<T> = std::result::Result<T, SimError>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        assert_eq!(PartId::new(3).to_string(), "Part(3)");
        assert_eq!(BodyId::from(4).to_string(), "Body(4)");
        assert_eq!(VesselId::new(5).to_string(), "Vessel(5)");
        assert_eq!(JointId::new(6).raw(), 6);
        assert_eq!(HandlerId::new(7).to_string(), "Handler(7)");
    }

    #[test]
    fn test_ids_are_ordered() {
        let mut ids = vec![PartId::new(3), PartId::new(1), PartId::new(2)];
        ids.sort();
        assert_eq!(ids, vec![PartId::new(1), PartId::new(2), PartId::new(3)]);
    }
}
