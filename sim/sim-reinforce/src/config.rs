//! Configuration for clamp reinforcement.

use sim_types::{Result, SimError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Break threshold used for clamp joints when none is configured.
pub const DEFAULT_CLAMP_JOINT_STRENGTH: f64 = 1.0e6;

/// Kind of extra joint a clamp creates on unpack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ClampJointMode {
    /// Clamp-to-target joint with a finite break threshold.
    #[default]
    Normal,
    /// Self-connected joint on the target with no break threshold.
    ///
    /// Stiffer than any finite joint, but it must be thrown away on every
    /// vessel change.
    InfiniteStrength,
}

impl std::fmt::Display for ClampJointMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::InfiniteStrength => write!(f, "infinite strength"),
        }
    }
}

/// Settings shared by every clamp reinforcement instance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReinforcementConfig {
    /// Which joint to create.
    pub mode: ClampJointMode,
    /// Break force and break torque of normal clamp joints.
    pub clamp_joint_strength: f64,
}

impl Default for ReinforcementConfig {
    fn default() -> Self {
        Self {
            mode: ClampJointMode::Normal,
            clamp_joint_strength: DEFAULT_CLAMP_JOINT_STRENGTH,
        }
    }
}

impl ReinforcementConfig {
    /// Normal joints breaking at the given strength.
    #[must_use]
    pub fn normal(strength: f64) -> Self {
        Self {
            mode: ClampJointMode::Normal,
            clamp_joint_strength: strength,
        }
    }

    /// Infinite-strength joints.
    #[must_use]
    pub fn infinite_strength() -> Self {
        Self {
            mode: ClampJointMode::InfiniteStrength,
            ..Default::default()
        }
    }

    /// Set the joint mode.
    #[must_use]
    pub fn with_mode(mut self, mode: ClampJointMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the strength of normal joints.
    #[must_use]
    pub fn with_strength(mut self, strength: f64) -> Self {
        self.clamp_joint_strength = strength;
        self
    }

    /// Check whether infinite-strength joints are configured.
    #[must_use]
    pub fn has_infinite_strength(&self) -> bool {
        self.mode == ClampJointMode::InfiniteStrength
    }

    /// Break threshold of the joints this configuration produces.
    #[must_use]
    pub fn break_threshold(&self) -> f64 {
        match self.mode {
            ClampJointMode::Normal => self.clamp_joint_strength,
            ClampJointMode::InfiniteStrength => f64::INFINITY,
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.clamp_joint_strength.is_finite() {
            return Err(SimError::invalid_config(
                "clamp_joint_strength must be finite; use infinite strength mode instead",
            ));
        }

        if self.clamp_joint_strength <= 0.0 {
            return Err(SimError::invalid_config(
                "clamp_joint_strength must be positive",
            ));
        }

        Ok(())
    }
}
