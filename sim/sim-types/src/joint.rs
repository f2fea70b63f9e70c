//! Configurable joint settings.
//!
//! A configurable joint links the rigid body of the part it is attached to
//! with an optional connected body. Each of the six degrees of freedom can be
//! left free, limited, or locked, and the joint breaks once the constraint
//! force or torque exceeds its break threshold.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::BodyId;

/// Motion allowed along one degree of freedom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum JointMotion {
    /// Unconstrained.
    #[default]
    Free,
    /// Constrained to a range.
    Limited,
    /// No relative motion.
    Locked,
}

impl std::fmt::Display for JointMotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Free => write!(f, "free"),
            Self::Limited => write!(f, "limited"),
            Self::Locked => write!(f, "locked"),
        }
    }
}

/// Per-axis motion settings for the three linear and three angular DOF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotionLocks {
    /// Translation along the joint X axis.
    pub x: JointMotion,
    /// Translation along the joint Y axis.
    pub y: JointMotion,
    /// Translation along the joint Z axis.
    pub z: JointMotion,
    /// Rotation about the joint X axis.
    pub angular_x: JointMotion,
    /// Rotation about the joint Y axis.
    pub angular_y: JointMotion,
    /// Rotation about the joint Z axis.
    pub angular_z: JointMotion,
}

impl MotionLocks {
    /// All six degrees of freedom free.
    #[must_use]
    pub const fn free() -> Self {
        Self::uniform(JointMotion::Free)
    }

    /// All six degrees of freedom locked.
    #[must_use]
    pub const fn locked() -> Self {
        Self::uniform(JointMotion::Locked)
    }

    /// Every axis set to the same motion.
    #[must_use]
    pub const fn uniform(motion: JointMotion) -> Self {
        Self {
            x: motion,
            y: motion,
            z: motion,
            angular_x: motion,
            angular_y: motion,
            angular_z: motion,
        }
    }

    fn axes(&self) -> [JointMotion; 6] {
        [
            self.x,
            self.y,
            self.z,
            self.angular_x,
            self.angular_y,
            self.angular_z,
        ]
    }

    /// Number of locked degrees of freedom.
    #[must_use]
    pub fn locked_dof(&self) -> usize {
        self.axes()
            .iter()
            .filter(|m| **m == JointMotion::Locked)
            .count()
    }

    /// Check whether every degree of freedom is locked.
    #[must_use]
    pub fn is_fully_locked(&self) -> bool {
        self.locked_dof() == 6
    }
}

/// How the engine corrects drift of a joint that cannot be satisfied exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ProjectionMode {
    /// No projection.
    #[default]
    None,
    /// Snap both position and rotation back onto the constraint each step.
    PositionAndRotation,
}

/// Settings of a configurable joint component.
///
/// # Example
///
/// ```
/// use sim_types::{BodyId, JointSettings, MotionLocks};
///
/// let settings = JointSettings::new()
///     .with_connected_body(BodyId::new(7))
///     .with_motion(MotionLocks::locked())
///     .with_break_threshold(5_000.0);
///
/// assert!(settings.motion.is_fully_locked());
/// assert!(!settings.is_unbreakable());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointSettings {
    /// Body on the far side of the joint. `None` anchors the joint to the world.
    pub connected_body: Option<BodyId>,
    /// Anchor point in the owning body's local frame.
    pub anchor: Point3<f64>,
    /// Primary joint axis in the owning body's local frame.
    pub axis: Vector3<f64>,
    /// Secondary joint axis; together with `axis` it fixes the joint frame.
    pub secondary_axis: Vector3<f64>,
    /// Per-axis motion settings.
    pub motion: MotionLocks,
    /// Force above which the joint breaks.
    pub break_force: f64,
    /// Torque above which the joint breaks.
    pub break_torque: f64,
    /// Drift correction mode.
    pub projection: ProjectionMode,
}

impl Default for JointSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl JointSettings {
    /// Unconnected, fully free, unbreakable joint at the local origin.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connected_body: None,
            anchor: Point3::origin(),
            axis: Vector3::x(),
            secondary_axis: Vector3::y(),
            motion: MotionLocks::free(),
            break_force: f64::INFINITY,
            break_torque: f64::INFINITY,
            projection: ProjectionMode::None,
        }
    }

    /// Set the connected body.
    #[must_use]
    pub fn with_connected_body(mut self, body: BodyId) -> Self {
        self.connected_body = Some(body);
        self
    }

    /// Set the anchor point.
    #[must_use]
    pub fn with_anchor(mut self, anchor: Point3<f64>) -> Self {
        self.anchor = anchor;
        self
    }

    /// Set the primary axis.
    #[must_use]
    pub fn with_axis(mut self, axis: Vector3<f64>) -> Self {
        self.axis = axis;
        self
    }

    /// Set the secondary axis.
    #[must_use]
    pub fn with_secondary_axis(mut self, axis: Vector3<f64>) -> Self {
        self.secondary_axis = axis;
        self
    }

    /// Set the per-axis motion.
    #[must_use]
    pub fn with_motion(mut self, motion: MotionLocks) -> Self {
        self.motion = motion;
        self
    }

    /// Set the break force.
    #[must_use]
    pub fn with_break_force(mut self, force: f64) -> Self {
        self.break_force = force;
        self
    }

    /// Set the break torque.
    #[must_use]
    pub fn with_break_torque(mut self, torque: f64) -> Self {
        self.break_torque = torque;
        self
    }

    /// Set break force and break torque to the same value.
    #[must_use]
    pub fn with_break_threshold(self, threshold: f64) -> Self {
        self.with_break_force(threshold).with_break_torque(threshold)
    }

    /// Set the projection mode.
    #[must_use]
    pub fn with_projection(mut self, projection: ProjectionMode) -> Self {
        self.projection = projection;
        self
    }

    /// Check whether neither force nor torque can ever break the joint.
    #[must_use]
    pub fn is_unbreakable(&self) -> bool {
        self.break_force == f64::INFINITY && self.break_torque == f64::INFINITY
    }
}
