//! Extra joints between a launch clamp and the part it holds.
//!
//! The engine's native clamp attachment flexes under large assemblies. Each
//! clamp therefore gets a [`ClampReinforcement`] that adds one stiffening
//! joint when the clamp enters physics, watches for the clamp being
//! decoupled, and removes its joints again when it leaves physics.
//!
//! # Lifecycle
//!
//! ```text
//!   on_unpack ──► create joint ──► subscribe (if a joint exists)
//!                                      │
//!   on_vessel_modified ◄───────────────┘  (zero or more times)
//!     1. destroy infinite-strength joints
//!     2. neighbor left our vessel? ──► sweep, unsubscribe
//!
//!   on_pack / on_destroy ──► unsubscribe, drop every joint
//! ```
//!
//! While the instance is observed outside a handler, it is subscribed
//! exactly when it still owns at least one joint.

use hashbrown::HashSet;
use sim_types::{
    BodyId, HandlerId, JointId, JointSettings, MotionLocks, PartId, Point3, ProjectionMode,
    Result, Vector3, VesselId,
};
use tracing::{debug, trace, warn};

use crate::config::{ClampJointMode, ReinforcementConfig};
use crate::scene::AssemblyScene;

/// Outcome of a global invalidation sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Vessels inspected, in the order they were first reached.
    pub vessels: Vec<VesselId>,
    /// Non-clamp parts whose joints were inspected.
    pub parts_scanned: usize,
    /// Clamp parts left untouched.
    pub clamps_skipped: usize,
    /// Joints destroyed because they had no connected body.
    pub orphaned_destroyed: usize,
    /// Joints destroyed because they spanned two vessels.
    pub cross_vessel_destroyed: usize,
}

impl SweepReport {
    /// Total number of foreign joints the sweep destroyed.
    #[must_use]
    pub fn destroyed(&self) -> usize {
        self.orphaned_destroyed + self.cross_vessel_destroyed
    }
}

/// Reinforcement state of a single clamp.
#[derive(Debug, Clone)]
pub struct ClampReinforcement {
    /// The clamp part.
    part: PartId,
    /// Identity used on the vessel-modified bus.
    handler: HandlerId,
    config: ReinforcementConfig,
    /// Normal clamp-to-target joints, attached to the clamp.
    joints: Vec<JointId>,
    /// Self-connected joints, attached to the target.
    hacked_joints: Vec<JointId>,
    /// Parts stiffened against, in registration order.
    neighbors: Vec<PartId>,
    subscribed: bool,
}

impl ClampReinforcement {
    /// Create an inactive instance for a clamp part.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(part: PartId, handler: HandlerId, config: ReinforcementConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            part,
            handler,
            config,
            joints: Vec::new(),
            hacked_joints: Vec::new(),
            neighbors: Vec::new(),
            subscribed: false,
        })
    }

    /// The clamp part.
    #[must_use]
    pub fn part(&self) -> PartId {
        self.part
    }

    /// Identity used on the vessel-modified bus.
    #[must_use]
    pub fn handler(&self) -> HandlerId {
        self.handler
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &ReinforcementConfig {
        &self.config
    }

    /// Normal joints owned by this instance.
    #[must_use]
    pub fn joints(&self) -> &[JointId] {
        &self.joints
    }

    /// Infinite-strength joints owned by this instance.
    #[must_use]
    pub fn hacked_joints(&self) -> &[JointId] {
        &self.hacked_joints
    }

    /// Parts this instance has stiffened against.
    #[must_use]
    pub fn neighbors(&self) -> &[PartId] {
        &self.neighbors
    }

    /// Check whether the instance is registered for vessel-modified
    /// notifications.
    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    /// Check whether the instance owns any joint.
    #[must_use]
    pub fn has_joints(&self) -> bool {
        !self.joints.is_empty() || !self.hacked_joints.is_empty()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// The clamp entered physics: stiffen it against its parent.
    ///
    /// A clamp without a parent is left alone. A parent without a rigid body
    /// is still recorded as a neighbor, but gets no joint.
    pub fn on_unpack<S: AssemblyScene + ?Sized>(&mut self, scene: &mut S) {
        let Some(target) = scene.parent_of(self.part) else {
            trace!(clamp = %self.part, "clamp has no parent, nothing to reinforce");
            return;
        };

        if !self.neighbors.contains(&target) {
            self.neighbors.push(target);
        }

        match scene.body_of(target) {
            Some(target_body) => match self.config.mode {
                ClampJointMode::InfiniteStrength => {
                    self.create_infinite_strength_joint(scene, target, target_body);
                }
                ClampJointMode::Normal => self.strut_connect(scene, target, target_body),
            },
            None => trace!(
                clamp = %self.part,
                target = %target,
                "target has no rigid body yet, skipping joint"
            ),
        }

        debug!(
            clamp = scene.part_name(self.part).unwrap_or("?"),
            target = scene.part_name(target).unwrap_or("?"),
            mode = %self.config.mode,
            joints = self.joints.len() + self.hacked_joints.len(),
            "added clamp joints to increase stiffness"
        );

        if self.has_joints() {
            self.subscribe(scene);
        }
    }

    /// The clamp left physics: drop every joint and stop listening.
    pub fn on_pack<S: AssemblyScene + ?Sized>(&mut self, scene: &mut S) {
        self.unsubscribe(scene);

        for joint in self.joints.drain(..) {
            scene.destroy_joint(joint);
        }
        for joint in self.hacked_joints.drain(..) {
            scene.destroy_joint(joint);
        }
        self.neighbors.clear();
    }

    /// The clamp is being removed from the world.
    ///
    /// Normal joints are attached to the clamp and go with it. Infinite
    /// strength joints live on the target, so they are destroyed here.
    pub fn on_destroy<S: AssemblyScene + ?Sized>(&mut self, scene: &mut S) {
        self.unsubscribe(scene);

        for joint in self.hacked_joints.drain(..) {
            scene.destroy_joint(joint);
        }
        self.joints.clear();
        self.neighbors.clear();
    }

    /// Some vessel's membership may have changed.
    ///
    /// Infinite-strength joints never survive a notification. If a neighbor
    /// now sits in another vessel than the clamp, the clamp was decoupled and
    /// a full sweep runs; its report is returned.
    pub fn on_vessel_modified<S: AssemblyScene + ?Sized>(
        &mut self,
        scene: &mut S,
    ) -> Option<SweepReport> {
        if !self.subscribed {
            return None;
        }

        // Forced state changes (e.g. teleporting the vessel) keep the clamp in
        // its vessel, so the divergence check below cannot catch them.
        for joint in self.hacked_joints.drain(..) {
            scene.destroy_joint(joint);
        }

        let own_vessel = scene.vessel_of(self.part);
        let decoupled = self
            .neighbors
            .iter()
            .any(|neighbor| scene.vessel_of(*neighbor) != own_vessel);

        if decoupled {
            debug!(
                clamp = scene.part_name(self.part).unwrap_or("?"),
                "decoupling clamp, destroying all extra joints"
            );
            return Some(self.break_all_invalid_joints(scene));
        }

        if self.joints.is_empty() {
            self.unsubscribe(scene);
        }
        None
    }

    // =========================================================================
    // Invalidation
    // =========================================================================

    /// Drop own joints and every stale joint in the neighbors' vessels.
    ///
    /// Joints on clamp parts are never touched; each clamp cleans up after
    /// itself.
    fn break_all_invalid_joints<S: AssemblyScene + ?Sized>(&mut self, scene: &mut S) -> SweepReport {
        self.unsubscribe(scene);

        for joint in self.joints.drain(..) {
            scene.destroy_joint(joint);
        }

        let mut report = SweepReport::default();
        let mut visited = HashSet::new();

        for neighbor in std::mem::take(&mut self.neighbors) {
            let Some(vessel) = scene.vessel_of(neighbor) else {
                continue;
            };
            if !visited.insert(vessel) {
                continue;
            }
            report.vessels.push(vessel);

            for part in scene.parts_of(vessel) {
                if scene.is_clamp(part) {
                    report.clamps_skipped += 1;
                    continue;
                }
                report.parts_scanned += 1;

                let part_vessel = scene.vessel_of(part);
                for joint in scene.joints_on(part) {
                    let Some(body) = scene.connected_body(joint) else {
                        if scene.destroy_joint(joint) {
                            report.orphaned_destroyed += 1;
                        }
                        continue;
                    };
                    let Some(connected_part) = scene.body_owner(body) else {
                        continue;
                    };
                    if scene.vessel_of(connected_part) != part_vessel
                        && scene.destroy_joint(joint)
                    {
                        report.cross_vessel_destroyed += 1;
                    }
                }
            }
        }

        debug!(
            clamp = %self.part,
            vessels = report.vessels.len(),
            destroyed = report.destroyed(),
            "swept invalid joints"
        );
        report
    }

    // =========================================================================
    // Joint construction
    // =========================================================================

    fn strut_connect<S: AssemblyScene + ?Sized>(
        &mut self,
        scene: &mut S,
        target: PartId,
        target_body: BodyId,
    ) {
        let settings = JointSettings::new()
            .with_connected_body(target_body)
            .with_anchor(Point3::origin())
            .with_axis(Vector3::x())
            .with_secondary_axis(Vector3::z())
            .with_break_threshold(self.config.break_threshold())
            .with_motion(MotionLocks::locked());

        match scene.create_joint(self.part, settings) {
            Ok(joint) => self.joints.push(joint),
            Err(err) => warn!(
                clamp = %self.part,
                target = %target,
                error = %err,
                "could not create clamp joint"
            ),
        }
    }

    /// Connect the target to itself.
    ///
    /// The engine rejects the joint as illegal but keeps it, and the clamp
    /// attachment then behaves as fully rigid.
    fn create_infinite_strength_joint<S: AssemblyScene + ?Sized>(
        &mut self,
        scene: &mut S,
        target: PartId,
        target_body: BodyId,
    ) {
        let settings = JointSettings::new()
            .with_connected_body(target_body)
            .with_anchor(Point3::origin())
            .with_axis(Vector3::x())
            .with_secondary_axis(Vector3::z())
            .with_break_threshold(self.config.break_threshold())
            .with_motion(MotionLocks::locked())
            .with_projection(ProjectionMode::PositionAndRotation);

        debug!(target = %target, "creating self-connected joint; an illegal joint report is expected");
        match scene.create_joint(target, settings) {
            Ok(joint) => self.hacked_joints.push(joint),
            Err(err) => warn!(
                clamp = %self.part,
                target = %target,
                error = %err,
                "could not create infinite strength joint"
            ),
        }
    }

    // =========================================================================
    // Subscription
    // =========================================================================

    fn subscribe<S: AssemblyScene + ?Sized>(&mut self, scene: &mut S) {
        if self.subscribed {
            return;
        }
        scene.subscribe(self.handler);
        self.subscribed = true;
    }

    fn unsubscribe<S: AssemblyScene + ?Sized>(&mut self, scene: &mut S) {
        if !self.subscribed {
            return;
        }
        scene.unsubscribe(self.handler);
        self.subscribed = false;
    }
}
