//! The engine surface clamp reinforcement runs against.
//!
//! [`AssemblyScene`] lists exactly the queries and primitives the
//! reinforcement logic needs from the physics and assembly layer. Every query
//! reads current state; implementations must not hand out cached answers.

use sim_core::World;
use sim_types::{BodyId, HandlerId, JointId, JointSettings, PartId, Result, VesselId};

/// Query and mutation surface of the assembly layer.
pub trait AssemblyScene {
    /// Current vessel of a part.
    fn vessel_of(&self, part: PartId) -> Option<VesselId>;

    /// Active rigid body of a part.
    fn body_of(&self, part: PartId) -> Option<BodyId>;

    /// Part a part is attached to.
    fn parent_of(&self, part: PartId) -> Option<PartId>;

    /// Parts currently belonging to a vessel.
    fn parts_of(&self, vessel: VesselId) -> Vec<PartId>;

    /// Joint components attached to a part.
    fn joints_on(&self, part: PartId) -> Vec<JointId>;

    /// Check whether a part is a clamp-like fixture.
    fn is_clamp(&self, part: PartId) -> bool;

    /// Part that owns a rigid body.
    fn body_owner(&self, body: BodyId) -> Option<PartId>;

    /// Connected body of a live joint. Stale handles have none.
    fn connected_body(&self, joint: JointId) -> Option<BodyId>;

    /// Display name of a part, for log messages.
    fn part_name(&self, part: PartId) -> Option<&str>;

    /// Attach a configurable joint to a part.
    fn create_joint(&mut self, owner: PartId, settings: JointSettings) -> Result<JointId>;

    /// Destroy a joint. Stale handles are ignored; returns whether a live
    /// joint was removed.
    fn destroy_joint(&mut self, joint: JointId) -> bool;

    /// Register a vessel-modified handler. Returns `false` if already
    /// registered.
    fn subscribe(&mut self, handler: HandlerId) -> bool;

    /// Unregister a vessel-modified handler. Returns `false` if it was not
    /// registered.
    fn unsubscribe(&mut self, handler: HandlerId) -> bool;
}

impl AssemblyScene for World {
    fn vessel_of(&self, part: PartId) -> Option<VesselId> {
        self.part(part).and_then(|p| p.vessel())
    }

    fn body_of(&self, part: PartId) -> Option<BodyId> {
        self.part(part).and_then(|p| p.body())
    }

    fn parent_of(&self, part: PartId) -> Option<PartId> {
        self.part(part).and_then(|p| p.parent())
    }

    fn parts_of(&self, vessel: VesselId) -> Vec<PartId> {
        World::parts_of(self, vessel).to_vec()
    }

    fn joints_on(&self, part: PartId) -> Vec<JointId> {
        World::joints_on(self, part).to_vec()
    }

    fn is_clamp(&self, part: PartId) -> bool {
        self.part(part).is_some_and(|p| p.is_clamp())
    }

    fn body_owner(&self, body: BodyId) -> Option<PartId> {
        World::body_owner(self, body)
    }

    fn connected_body(&self, joint: JointId) -> Option<BodyId> {
        self.joint(joint).and_then(|j| j.connected_body())
    }

    fn part_name(&self, part: PartId) -> Option<&str> {
        self.part(part).map(|p| p.name())
    }

    fn create_joint(&mut self, owner: PartId, settings: JointSettings) -> Result<JointId> {
        self.add_joint(owner, settings)
    }

    fn destroy_joint(&mut self, joint: JointId) -> bool {
        World::destroy_joint(self, joint)
    }

    fn subscribe(&mut self, handler: HandlerId) -> bool {
        self.vessel_events_mut().subscribe(handler)
    }

    fn unsubscribe(&mut self, handler: HandlerId) -> bool {
        self.vessel_events_mut().unsubscribe(handler)
    }
}
