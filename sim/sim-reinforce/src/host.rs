//! Dispatcher that owns the world and every clamp instance.
//!
//! [`ClampHost`] plays the part of the simulation's callback loop: it relays
//! lifecycle signals to the right [`ClampReinforcement`] and delivers
//! vessel-modified notifications to the registered handlers.
//!
//! Delivery uses the handler list as it stood when the notification was
//! broadcast. A handler that unregisters while the broadcast is running is
//! not called again for it.

use hashbrown::HashMap;
use sim_core::{VesselModified, World};
use sim_types::{HandlerId, PartId, PartTag, Result, SimError, VesselId};
use tracing::debug;

use crate::clamp::{ClampReinforcement, SweepReport};
use crate::config::ReinforcementConfig;

/// Owner of an assembly world and its clamp reinforcement instances.
#[derive(Debug, Clone)]
pub struct ClampHost {
    world: World,
    config: ReinforcementConfig,
    /// Instances keyed by their bus identity.
    clamps: HashMap<HandlerId, ClampReinforcement>,
    /// Clamp part to bus identity.
    by_part: HashMap<PartId, HandlerId>,
}

impl ClampHost {
    /// Wrap a world, using `config` for every clamp added later.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(world: World, config: ReinforcementConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            world,
            config,
            clamps: HashMap::new(),
            by_part: HashMap::new(),
        })
    }

    /// The managed world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the managed world.
    ///
    /// Membership edits made here raise notifications that are delivered on
    /// the next [`dispatch_pending`](Self::dispatch_pending).
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Configuration given to new clamps.
    #[must_use]
    pub fn config(&self) -> &ReinforcementConfig {
        &self.config
    }

    /// Reinforcement instance of a clamp part.
    #[must_use]
    pub fn clamp(&self, part: PartId) -> Option<&ClampReinforcement> {
        self.by_part.get(&part).and_then(|h| self.clamps.get(h))
    }

    /// Iterate over all instances.
    pub fn clamps(&self) -> impl Iterator<Item = &ClampReinforcement> {
        self.clamps.values()
    }

    /// Number of managed clamps.
    #[must_use]
    pub fn clamp_count(&self) -> usize {
        self.clamps.len()
    }

    /// Turn a part into a reinforced clamp.
    ///
    /// The part is tagged as a clamp. Adding the same part twice returns the
    /// existing handler.
    ///
    /// # Errors
    ///
    /// Returns an error if the part does not exist.
    pub fn add_clamp(&mut self, part: PartId) -> Result<HandlerId> {
        if let Some(handler) = self.by_part.get(&part) {
            return Ok(*handler);
        }
        self.world.tag_part(part, PartTag::Clamp)?;

        let handler = self.world.vessel_events_mut().allocate_handler();
        let clamp = ClampReinforcement::new(part, handler, self.config.clone())?;
        self.clamps.insert(handler, clamp);
        self.by_part.insert(part, handler);
        Ok(handler)
    }

    // =========================================================================
    // Lifecycle signals
    // =========================================================================

    /// Deliver the unpack signal to one clamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the part is not a managed clamp.
    pub fn unpack(&mut self, part: PartId) -> Result<()> {
        let handler = self.handler_of(part)?;
        if let Some(clamp) = self.clamps.get_mut(&handler) {
            clamp.on_unpack(&mut self.world);
        }
        Ok(())
    }

    /// Deliver the pack signal to one clamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the part is not a managed clamp.
    pub fn pack(&mut self, part: PartId) -> Result<()> {
        let handler = self.handler_of(part)?;
        if let Some(clamp) = self.clamps.get_mut(&handler) {
            clamp.on_pack(&mut self.world);
        }
        Ok(())
    }

    /// Unpack every clamp, in part order.
    pub fn unpack_all(&mut self) {
        for handler in self.handlers_by_part() {
            if let Some(clamp) = self.clamps.get_mut(&handler) {
                clamp.on_unpack(&mut self.world);
            }
        }
    }

    /// Pack every clamp, in part order.
    pub fn pack_all(&mut self) {
        for handler in self.handlers_by_part() {
            if let Some(clamp) = self.clamps.get_mut(&handler) {
                clamp.on_pack(&mut self.world);
            }
        }
    }

    /// Remove a clamp part from the world.
    ///
    /// The instance receives the destroy signal first, then the part and its
    /// attached joints are removed and the resulting notifications are
    /// delivered.
    ///
    /// # Errors
    ///
    /// Returns an error if the part is not a managed clamp.
    pub fn destroy_clamp(&mut self, part: PartId) -> Result<ClampReinforcement> {
        let handler = self.handler_of(part)?;
        self.by_part.remove(&part);
        let mut clamp = self
            .clamps
            .remove(&handler)
            .ok_or(SimError::InvalidPartId(part.raw()))?;

        clamp.on_destroy(&mut self.world);
        self.world.remove_part(part);
        self.dispatch_pending();
        Ok(clamp)
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Split a part off into a new vessel and deliver the notifications.
    ///
    /// # Errors
    ///
    /// Returns an error if the part does not exist.
    pub fn decouple(&mut self, part: PartId) -> Result<(VesselId, Vec<SweepReport>)> {
        let vessel = self.world.decouple(part)?;
        Ok((vessel, self.dispatch_pending()))
    }

    /// Broadcast a notification that changes no membership, such as a
    /// forced state change of a whole vessel.
    pub fn notify_vessel_modified(&mut self, event: VesselModified) -> Vec<SweepReport> {
        self.world.raise_vessel_modified(event);
        self.dispatch_pending()
    }

    /// Deliver every notification raised since the last dispatch.
    ///
    /// Returns the reports of the sweeps the notifications triggered.
    pub fn dispatch_pending(&mut self) -> Vec<SweepReport> {
        let mut reports = Vec::new();
        for event in self.world.take_pending_events() {
            let recipients = self.world.vessel_events().snapshot();
            debug!(
                vessel = ?event.vessel,
                handlers = recipients.len(),
                "delivering vessel modified"
            );
            for handler in recipients {
                if !self.world.vessel_events().is_subscribed(handler) {
                    continue;
                }
                let Some(clamp) = self.clamps.get_mut(&handler) else {
                    continue;
                };
                if let Some(report) = clamp.on_vessel_modified(&mut self.world) {
                    reports.push(report);
                }
            }
        }
        reports
    }

    fn handler_of(&self, part: PartId) -> Result<HandlerId> {
        self.by_part
            .get(&part)
            .copied()
            .ok_or(SimError::InvalidPartId(part.raw()))
    }

    fn handlers_by_part(&self) -> Vec<HandlerId> {
        let mut entries: Vec<(PartId, HandlerId)> =
            self.by_part.iter().map(|(p, h)| (*p, *h)).collect();
        entries.sort();
        entries.into_iter().map(|(_, h)| h).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn host_with_clamp() -> (ClampHost, PartId, PartId) {
        let mut world = World::new();
        let vessel = world.add_vessel("stack");
        let tank = world.add_part(vessel, None, "tank").unwrap();
        let clamp = world.add_part(vessel, Some(tank), "clamp").unwrap();
        world.attach_body(tank).unwrap();
        world.attach_body(clamp).unwrap();

        let mut host = ClampHost::new(world, ReinforcementConfig::default()).unwrap();
        host.add_clamp(clamp).unwrap();
        (host, tank, clamp)
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let err = ClampHost::new(World::new(), ReinforcementConfig::normal(-1.0)).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_add_clamp_tags_part_once() {
        let (mut host, _, clamp) = host_with_clamp();
        let handler = host.clamp(clamp).unwrap().handler();

        assert_eq!(host.add_clamp(clamp).unwrap(), handler);
        assert_eq!(host.clamp_count(), 1);
        assert!(host.world().part(clamp).unwrap().is_clamp());
        assert!(host.add_clamp(PartId::new(999)).is_err());
    }

    #[test]
    fn test_signals_to_unknown_part_fail() {
        let (mut host, tank, _) = host_with_clamp();
        assert_eq!(host.unpack(tank), Err(SimError::InvalidPartId(tank.raw())));
        assert!(host.pack(tank).is_err());
        assert!(host.destroy_clamp(tank).is_err());
    }

    #[test]
    fn test_dispatch_skips_handlers_removed_mid_broadcast() {
        let (mut host, _, clamp) = host_with_clamp();
        host.unpack(clamp).unwrap();

        // Two notifications in one dispatch: the first sweeps and
        // unregisters the clamp, the second must not reach it.
        let debris = host.world_mut().decouple(clamp).unwrap();
        assert!(host.world().part(clamp).unwrap().vessel() == Some(debris));

        let reports = host.dispatch_pending();
        assert_eq!(reports.len(), 1);
        assert!(!host.clamp(clamp).unwrap().is_subscribed());
    }

    #[test]
    fn test_destroy_clamp_removes_part_and_joints() {
        let (mut host, _, clamp) = host_with_clamp();
        host.unpack(clamp).unwrap();
        let joint = host.clamp(clamp).unwrap().joints()[0];

        let destroyed = host.destroy_clamp(clamp).unwrap();
        assert!(!destroyed.is_subscribed());
        assert!(!destroyed.has_joints());
        assert!(host.world().part(clamp).is_none());
        assert!(!host.world().is_joint_alive(joint));
        assert!(host.clamp(clamp).is_none());
        assert!(host.world().vessel_events().is_empty());
    }
}
