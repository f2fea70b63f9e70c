//! Assembly world container and entity management.
//!
//! The [`World`] owns every part, rigid body, vessel and joint component of a
//! simulated assembly. Ownership follows the engine rules the reinforcement
//! systems rely on:
//!
//! - a rigid body belongs to exactly one part;
//! - a joint component belongs to the part it is attached to, and removing the
//!   part removes its joints;
//! - removing a body detaches it from every joint that named it as the
//!   connected body;
//! - handles to removed entities stay stale and are never reused.

use hashbrown::{HashMap, HashSet};
use sim_types::{BodyId, JointId, JointSettings, PartId, PartTag, SimError, VesselId};
use tracing::debug;

use crate::events::{EventBus, VesselModified};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A structural part of an assembly.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Part {
    id: PartId,
    name: String,
    parent: Option<PartId>,
    vessel: Option<VesselId>,
    body: Option<BodyId>,
    tags: HashSet<PartTag>,
    /// Joint components attached to this part, in creation order.
    joints: Vec<JointId>,
}

impl Part {
    fn new(id: PartId, name: String, parent: Option<PartId>, vessel: VesselId) -> Self {
        Self {
            id,
            name,
            parent,
            vessel: Some(vessel),
            body: None,
            tags: HashSet::new(),
            joints: Vec::new(),
        }
    }

    /// Part identifier.
    #[must_use]
    pub fn id(&self) -> PartId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Part this one is attached to, if any.
    #[must_use]
    pub fn parent(&self) -> Option<PartId> {
        self.parent
    }

    /// Vessel the part currently belongs to.
    #[must_use]
    pub fn vessel(&self) -> Option<VesselId> {
        self.vessel
    }

    /// Active rigid body, if the part is physically simulated.
    #[must_use]
    pub fn body(&self) -> Option<BodyId> {
        self.body
    }

    /// Check whether the part advertises a capability.
    #[must_use]
    pub fn has_tag(&self, tag: PartTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Check whether the part is a clamp-like fixture.
    #[must_use]
    pub fn is_clamp(&self) -> bool {
        self.has_tag(PartTag::Clamp)
    }

    /// Joint components attached to this part.
    #[must_use]
    pub fn joints(&self) -> &[JointId] {
        &self.joints
    }
}

/// A group of parts simulated as one connected assembly.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vessel {
    id: VesselId,
    name: String,
    parts: Vec<PartId>,
}

impl Vessel {
    /// Vessel identifier.
    #[must_use]
    pub fn id(&self) -> VesselId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Member parts in insertion order.
    #[must_use]
    pub fn parts(&self) -> &[PartId] {
        &self.parts
    }

    /// Check whether a part is a member.
    #[must_use]
    pub fn contains(&self, part: PartId) -> bool {
        self.parts.contains(&part)
    }
}

/// A rigid body and the part that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RigidBody {
    /// Unique identifier.
    pub id: BodyId,
    /// Owning part.
    pub part: PartId,
}

/// A configurable joint component attached to a part.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Joint {
    id: JointId,
    owner: PartId,
    settings: JointSettings,
}

impl Joint {
    /// Joint handle.
    #[must_use]
    pub fn id(&self) -> JointId {
        self.id
    }

    /// Part the component is attached to.
    #[must_use]
    pub fn owner(&self) -> PartId {
        self.owner
    }

    /// Joint settings.
    #[must_use]
    pub fn settings(&self) -> &JointSettings {
        &self.settings
    }

    /// Body on the far side of the joint.
    #[must_use]
    pub fn connected_body(&self) -> Option<BodyId> {
        self.settings.connected_body
    }
}

/// The assembly world containing all entities.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct World {
    /// All parts, indexed by ID.
    parts: HashMap<PartId, Part>,
    /// All rigid bodies, indexed by ID.
    bodies: HashMap<BodyId, RigidBody>,
    /// All vessels, indexed by ID.
    vessels: HashMap<VesselId, Vessel>,
    /// All joint components, indexed by ID.
    joints: HashMap<JointId, Joint>,
    /// Next available part ID.
    next_part_id: u64,
    /// Next available body ID.
    next_body_id: u64,
    /// Next available vessel ID.
    next_vessel_id: u64,
    /// Next available joint ID.
    next_joint_id: u64,
    /// Registry for vessel-modified notifications.
    vessel_events: EventBus,
    /// Notifications raised by edits and not yet delivered.
    pending_events: Vec<VesselModified>,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Create an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parts: HashMap::new(),
            bodies: HashMap::new(),
            vessels: HashMap::new(),
            joints: HashMap::new(),
            next_part_id: 1,
            next_body_id: 1,
            next_vessel_id: 1,
            next_joint_id: 1,
            vessel_events: EventBus::new(),
            pending_events: Vec::new(),
        }
    }

    /// Number of parts.
    #[must_use]
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// Number of rigid bodies.
    #[must_use]
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Number of vessels.
    #[must_use]
    pub fn vessel_count(&self) -> usize {
        self.vessels.len()
    }

    /// Number of live joint components.
    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    // =========================================================================
    // Vessel Management
    // =========================================================================

    /// Add an empty vessel and return its ID.
    pub fn add_vessel(&mut self, name: impl Into<String>) -> VesselId {
        let id = VesselId::new(self.next_vessel_id);
        self.next_vessel_id += 1;

        self.vessels.insert(
            id,
            Vessel {
                id,
                name: name.into(),
                parts: Vec::new(),
            },
        );
        id
    }

    /// Get a vessel by ID.
    #[must_use]
    pub fn vessel(&self, id: VesselId) -> Option<&Vessel> {
        self.vessels.get(&id)
    }

    /// Iterate over all vessels.
    pub fn vessels(&self) -> impl Iterator<Item = &Vessel> {
        self.vessels.values()
    }

    /// Member parts of a vessel. Unknown vessels have no members.
    #[must_use]
    pub fn parts_of(&self, vessel: VesselId) -> &[PartId] {
        self.vessels.get(&vessel).map_or(&[], |v| v.parts.as_slice())
    }

    // =========================================================================
    // Part Management
    // =========================================================================

    /// Add a part to a vessel, optionally attached to a parent part.
    ///
    /// # Errors
    ///
    /// Returns an error if the vessel or the parent does not exist.
    pub fn add_part(
        &mut self,
        vessel: VesselId,
        parent: Option<PartId>,
        name: impl Into<String>,
    ) -> sim_types::Result<PartId> {
        if !self.vessels.contains_key(&vessel) {
            return Err(SimError::InvalidVesselId(vessel.raw()));
        }
        if let Some(parent) = parent {
            if !self.parts.contains_key(&parent) {
                return Err(SimError::InvalidPartId(parent.raw()));
            }
        }

        let id = PartId::new(self.next_part_id);
        self.next_part_id += 1;

        self.parts
            .insert(id, Part::new(id, name.into(), parent, vessel));
        if let Some(v) = self.vessels.get_mut(&vessel) {
            v.parts.push(id);
        }
        Ok(id)
    }

    /// Get a part by ID.
    #[must_use]
    pub fn part(&self, id: PartId) -> Option<&Part> {
        self.parts.get(&id)
    }

    /// Iterate over all parts.
    pub fn parts(&self) -> impl Iterator<Item = &Part> {
        self.parts.values()
    }

    /// Give a part a capability.
    ///
    /// # Errors
    ///
    /// Returns an error if the part does not exist.
    pub fn tag_part(&mut self, part: PartId, tag: PartTag) -> sim_types::Result<()> {
        let p = self
            .parts
            .get_mut(&part)
            .ok_or(SimError::InvalidPartId(part.raw()))?;
        p.tags.insert(tag);
        Ok(())
    }

    /// Take a capability away from a part. Returns whether the part had it.
    ///
    /// # Errors
    ///
    /// Returns an error if the part does not exist.
    pub fn untag_part(&mut self, part: PartId, tag: PartTag) -> sim_types::Result<bool> {
        let p = self
            .parts
            .get_mut(&part)
            .ok_or(SimError::InvalidPartId(part.raw()))?;
        Ok(p.tags.remove(&tag))
    }

    /// Direct children of a part, sorted by ID.
    #[must_use]
    pub fn children_of(&self, part: PartId) -> Vec<PartId> {
        let mut children: Vec<PartId> = self
            .parts
            .values()
            .filter(|p| p.parent == Some(part))
            .map(|p| p.id)
            .collect();
        children.sort();
        children
    }

    /// A part and all of its descendants, parents before children.
    #[must_use]
    pub fn subtree(&self, root: PartId) -> Vec<PartId> {
        if !self.parts.contains_key(&root) {
            return Vec::new();
        }
        let mut children: HashMap<PartId, Vec<PartId>> = HashMap::new();
        for part in self.parts.values() {
            if let Some(parent) = part.parent {
                children.entry(parent).or_default().push(part.id);
            }
        }
        for list in children.values_mut() {
            list.sort();
        }

        let mut order = vec![root];
        let mut cursor = 0;
        while cursor < order.len() {
            if let Some(list) = children.get(&order[cursor]) {
                order.extend_from_slice(list);
            }
            cursor += 1;
        }
        order
    }

    /// Remove a part and everything it owns.
    ///
    /// Attached joints are destroyed, the rigid body is removed, children are
    /// left without a parent and the part's vessel is flagged as modified.
    pub fn remove_part(&mut self, id: PartId) -> Option<Part> {
        if !self.parts.contains_key(&id) {
            return None;
        }

        let attached: Vec<JointId> = self.parts.get(&id).map(|p| p.joints.clone())?;
        for joint in attached {
            self.destroy_joint(joint);
        }
        self.remove_body(id);

        let part = self.parts.remove(&id)?;
        for child in self.parts.values_mut().filter(|p| p.parent == Some(id)) {
            child.parent = None;
        }
        if let Some(vessel) = part.vessel {
            if let Some(v) = self.vessels.get_mut(&vessel) {
                v.parts.retain(|p| *p != id);
            }
            self.pending_events.push(VesselModified::of(vessel));
        }

        debug!(part = %id, name = %part.name, "removed part");
        Some(part)
    }

    // =========================================================================
    // Body Management
    // =========================================================================

    /// Give a part an active rigid body.
    ///
    /// # Errors
    ///
    /// Returns an error if the part does not exist or already has a body.
    pub fn attach_body(&mut self, part: PartId) -> sim_types::Result<BodyId> {
        let p = self
            .parts
            .get_mut(&part)
            .ok_or(SimError::InvalidPartId(part.raw()))?;
        if let Some(existing) = p.body {
            return Err(SimError::BodyAlreadyAttached {
                part_id: part.raw(),
                body_id: existing.raw(),
            });
        }

        let id = BodyId::new(self.next_body_id);
        self.next_body_id += 1;

        p.body = Some(id);
        self.bodies.insert(id, RigidBody { id, part });
        Ok(id)
    }

    /// Remove a part's rigid body, if it has one.
    ///
    /// Joints that named the body as their connected body are left
    /// unconnected.
    pub fn remove_body(&mut self, part: PartId) -> Option<BodyId> {
        let body = self.parts.get_mut(&part)?.body.take()?;
        self.bodies.remove(&body);
        for joint in self.joints.values_mut() {
            if joint.settings.connected_body == Some(body) {
                joint.settings.connected_body = None;
            }
        }
        Some(body)
    }

    /// Get a body by ID.
    #[must_use]
    pub fn body(&self, id: BodyId) -> Option<&RigidBody> {
        self.bodies.get(&id)
    }

    /// Part that owns a body.
    #[must_use]
    pub fn body_owner(&self, id: BodyId) -> Option<PartId> {
        self.bodies.get(&id).map(|b| b.part)
    }

    // =========================================================================
    // Joint Management
    // =========================================================================

    /// Attach a configurable joint component to a part.
    ///
    /// # Errors
    ///
    /// Returns an error if the owner does not exist, has no rigid body, or
    /// the connected body does not exist.
    pub fn add_joint(
        &mut self,
        owner: PartId,
        settings: JointSettings,
    ) -> sim_types::Result<JointId> {
        let part = self
            .parts
            .get(&owner)
            .ok_or(SimError::InvalidPartId(owner.raw()))?;
        if part.body.is_none() {
            return Err(SimError::MissingRigidBody {
                part_id: owner.raw(),
            });
        }
        if let Some(connected) = settings.connected_body {
            if !self.bodies.contains_key(&connected) {
                return Err(SimError::InvalidBodyId(connected.raw()));
            }
        }

        let id = JointId::new(self.next_joint_id);
        self.next_joint_id += 1;

        self.joints.insert(
            id,
            Joint {
                id,
                owner,
                settings,
            },
        );
        if let Some(p) = self.parts.get_mut(&owner) {
            p.joints.push(id);
        }
        Ok(id)
    }

    /// Destroy a joint component.
    ///
    /// Destroying a stale handle is a no-op; returns whether a live joint was
    /// removed.
    pub fn destroy_joint(&mut self, id: JointId) -> bool {
        let Some(joint) = self.joints.remove(&id) else {
            return false;
        };
        if let Some(p) = self.parts.get_mut(&joint.owner) {
            p.joints.retain(|j| *j != id);
        }
        true
    }

    /// Get a joint by ID.
    #[must_use]
    pub fn joint(&self, id: JointId) -> Option<&Joint> {
        self.joints.get(&id)
    }

    /// Check whether a handle still names a live joint.
    #[must_use]
    pub fn is_joint_alive(&self, id: JointId) -> bool {
        self.joints.contains_key(&id)
    }

    /// Iterate over all live joints.
    pub fn joints(&self) -> impl Iterator<Item = &Joint> {
        self.joints.values()
    }

    /// Joint components attached to a part. Unknown parts have none.
    #[must_use]
    pub fn joints_on(&self, part: PartId) -> &[JointId] {
        self.parts.get(&part).map_or(&[], |p| p.joints.as_slice())
    }

    // =========================================================================
    // Vessel Membership
    // =========================================================================

    /// Move a single part into another vessel.
    ///
    /// Both vessels are flagged as modified.
    ///
    /// # Errors
    ///
    /// Returns an error if the part or the vessel does not exist.
    pub fn move_to_vessel(&mut self, part: PartId, vessel: VesselId) -> sim_types::Result<()> {
        if !self.vessels.contains_key(&vessel) {
            return Err(SimError::InvalidVesselId(vessel.raw()));
        }
        let previous = self
            .parts
            .get(&part)
            .ok_or(SimError::InvalidPartId(part.raw()))?
            .vessel;
        if previous == Some(vessel) {
            return Ok(());
        }

        self.set_membership(part, vessel);
        if let Some(previous) = previous {
            self.pending_events.push(VesselModified::of(previous));
        }
        self.pending_events.push(VesselModified::of(vessel));
        Ok(())
    }

    /// Split a part and its descendants off into a new vessel.
    ///
    /// The part loses its parent. Both the old and the new vessel are flagged
    /// as modified. Returns the new vessel.
    ///
    /// # Errors
    ///
    /// Returns an error if the part does not exist.
    pub fn decouple(&mut self, part: PartId) -> sim_types::Result<VesselId> {
        let (name, previous) = {
            let p = self
                .parts
                .get(&part)
                .ok_or(SimError::InvalidPartId(part.raw()))?;
            (p.name.clone(), p.vessel)
        };

        let vessel = self.add_vessel(format!("{name} debris"));
        let moved = self.subtree(part);
        for member in &moved {
            self.set_membership(*member, vessel);
        }
        if let Some(p) = self.parts.get_mut(&part) {
            p.parent = None;
        }

        if let Some(previous) = previous {
            self.pending_events.push(VesselModified::of(previous));
        }
        self.pending_events.push(VesselModified::of(vessel));

        debug!(
            part = %part,
            new_vessel = %vessel,
            moved = moved.len(),
            "decoupled part"
        );
        Ok(vessel)
    }

    fn set_membership(&mut self, part: PartId, vessel: VesselId) {
        let Some(p) = self.parts.get_mut(&part) else {
            return;
        };
        let previous = p.vessel.replace(vessel);
        if let Some(previous) = previous {
            if let Some(v) = self.vessels.get_mut(&previous) {
                v.parts.retain(|m| *m != part);
            }
        }
        if let Some(v) = self.vessels.get_mut(&vessel) {
            v.parts.push(part);
        }
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Registry of vessel-modified handlers.
    #[must_use]
    pub fn vessel_events(&self) -> &EventBus {
        &self.vessel_events
    }

    /// Mutable registry of vessel-modified handlers.
    pub fn vessel_events_mut(&mut self) -> &mut EventBus {
        &mut self.vessel_events
    }

    /// Flag a vessel as modified without changing membership.
    pub fn raise_vessel_modified(&mut self, event: VesselModified) {
        self.pending_events.push(event);
    }

    /// Take the notifications raised since the last call.
    pub fn take_pending_events(&mut self) -> Vec<VesselModified> {
        std::mem::take(&mut self.pending_events)
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Check the cross references between entities.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first inconsistent entity.
    pub fn validate(&self) -> sim_types::Result<()> {
        for part in self.parts.values() {
            if let Some(vessel) = part.vessel {
                let listed = self.vessels.get(&vessel).is_some_and(|v| v.contains(part.id));
                if !listed {
                    return Err(SimError::InvalidVesselId(vessel.raw()));
                }
            }
            if let Some(body) = part.body {
                if self.body_owner(body) != Some(part.id) {
                    return Err(SimError::InvalidBodyId(body.raw()));
                }
            }
            if let Some(parent) = part.parent {
                if !self.parts.contains_key(&parent) {
                    return Err(SimError::InvalidPartId(parent.raw()));
                }
            }
        }
        for joint in self.joints.values() {
            let attached = self
                .parts
                .get(&joint.owner)
                .is_some_and(|p| p.joints.contains(&joint.id));
            if !attached {
                return Err(SimError::InvalidPartId(joint.owner.raw()));
            }
            if let Some(body) = joint.settings.connected_body {
                if !self.bodies.contains_key(&body) {
                    return Err(SimError::InvalidBodyId(body.raw()));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use sim_types::MotionLocks;

    fn stack(world: &mut World) -> (VesselId, PartId, PartId, PartId) {
        let vessel = world.add_vessel("stack");
        let root = world.add_part(vessel, None, "pod").unwrap();
        let tank = world.add_part(vessel, Some(root), "tank").unwrap();
        let engine = world.add_part(vessel, Some(tank), "engine").unwrap();
        for part in [root, tank, engine] {
            world.attach_body(part).unwrap();
        }
        (vessel, root, tank, engine)
    }

    #[test]
    fn test_add_part_requires_vessel_and_parent() {
        let mut world = World::new();
        assert_eq!(
            world.add_part(VesselId::new(99), None, "x"),
            Err(SimError::InvalidVesselId(99))
        );

        let vessel = world.add_vessel("v");
        assert_eq!(
            world.add_part(vessel, Some(PartId::new(42)), "x"),
            Err(SimError::InvalidPartId(42))
        );

        let part = world.add_part(vessel, None, "x").unwrap();
        assert_eq!(world.parts_of(vessel), &[part]);
        assert_eq!(world.part(part).unwrap().vessel(), Some(vessel));
    }

    #[test]
    fn test_attach_body_once() {
        let mut world = World::new();
        let vessel = world.add_vessel("v");
        let part = world.add_part(vessel, None, "x").unwrap();

        let body = world.attach_body(part).unwrap();
        assert_eq!(world.body_owner(body), Some(part));
        assert!(matches!(
            world.attach_body(part),
            Err(SimError::BodyAlreadyAttached { .. })
        ));
    }

    #[test]
    fn test_add_joint_needs_owner_body() {
        let mut world = World::new();
        let vessel = world.add_vessel("v");
        let part = world.add_part(vessel, None, "x").unwrap();

        let err = world.add_joint(part, JointSettings::new()).unwrap_err();
        assert_eq!(err, SimError::MissingRigidBody { part_id: part.raw() });

        world.attach_body(part).unwrap();
        let err = world
            .add_joint(part, JointSettings::new().with_connected_body(BodyId::new(77)))
            .unwrap_err();
        assert_eq!(err, SimError::InvalidBodyId(77));
    }

    #[test]
    fn test_destroy_joint_is_idempotent() {
        let mut world = World::new();
        let (_, root, tank, _) = stack(&mut world);
        let tank_body = world.part(tank).unwrap().body().unwrap();

        let joint = world
            .add_joint(
                root,
                JointSettings::new()
                    .with_connected_body(tank_body)
                    .with_motion(MotionLocks::locked()),
            )
            .unwrap();
        assert_eq!(world.joints_on(root), &[joint]);

        assert!(world.destroy_joint(joint));
        assert!(!world.destroy_joint(joint));
        assert!(world.joints_on(root).is_empty());
        assert!(!world.is_joint_alive(joint));
    }

    #[test]
    fn test_remove_part_cascades() {
        let mut world = World::new();
        let (vessel, root, tank, engine) = stack(&mut world);
        let tank_body = world.part(tank).unwrap().body().unwrap();

        let on_tank = world.add_joint(tank, JointSettings::new()).unwrap();
        let into_tank = world
            .add_joint(root, JointSettings::new().with_connected_body(tank_body))
            .unwrap();

        world.take_pending_events();
        let removed = world.remove_part(tank).unwrap();
        assert_eq!(removed.id(), tank);

        assert!(!world.is_joint_alive(on_tank));
        assert!(world.is_joint_alive(into_tank));
        assert!(world.joint(into_tank).unwrap().connected_body().is_none());
        assert!(world.body(tank_body).is_none());
        assert_eq!(world.part(engine).unwrap().parent(), None);
        assert!(!world.vessel(vessel).unwrap().contains(tank));
        assert_eq!(
            world.take_pending_events(),
            vec![VesselModified::of(vessel)]
        );
        world.validate().unwrap();
    }

    #[test]
    fn test_decouple_moves_subtree() {
        let mut world = World::new();
        let (vessel, root, tank, engine) = stack(&mut world);
        world.take_pending_events();

        let debris = world.decouple(tank).unwrap();

        assert_ne!(debris, vessel);
        assert_eq!(world.parts_of(vessel), &[root]);
        assert_eq!(world.parts_of(debris), &[tank, engine]);
        assert_eq!(world.part(tank).unwrap().parent(), None);
        assert_eq!(world.part(engine).unwrap().parent(), Some(tank));
        assert_eq!(world.vessel(debris).unwrap().name(), "tank debris");
        assert_eq!(
            world.take_pending_events(),
            vec![VesselModified::of(vessel), VesselModified::of(debris)]
        );
        assert!(world.take_pending_events().is_empty());
        world.validate().unwrap();
    }

    #[test]
    fn test_move_to_same_vessel_is_silent() {
        let mut world = World::new();
        let (vessel, root, _, _) = stack(&mut world);
        world.take_pending_events();

        world.move_to_vessel(root, vessel).unwrap();
        assert!(world.take_pending_events().is_empty());

        let other = world.add_vessel("other");
        world.move_to_vessel(root, other).unwrap();
        assert_eq!(world.parts_of(other), &[root]);
        assert_eq!(world.take_pending_events().len(), 2);
    }

    #[test]
    fn test_tags() {
        let mut world = World::new();
        let vessel = world.add_vessel("v");
        let part = world.add_part(vessel, None, "clamp").unwrap();

        assert!(!world.part(part).unwrap().is_clamp());
        world.tag_part(part, PartTag::Clamp).unwrap();
        assert!(world.part(part).unwrap().is_clamp());
        assert!(world.untag_part(part, PartTag::Clamp).unwrap());
        assert!(!world.untag_part(part, PartTag::Clamp).unwrap());
        assert!(world.tag_part(PartId::new(99), PartTag::Clamp).is_err());
    }

    #[test]
    fn test_subtree_order() {
        let mut world = World::new();
        let (_, root, tank, engine) = stack(&mut world);
        assert_eq!(world.subtree(root), vec![root, tank, engine]);
        assert_eq!(world.children_of(root), vec![tank]);
        assert!(world.subtree(PartId::new(500)).is_empty());
    }

    #[test]
    fn test_subtree_of_branching_tree_is_breadth_first() {
        let mut world = World::new();
        let vessel = world.add_vessel("v");
        let root = world.add_part(vessel, None, "root").unwrap();
        let left = world.add_part(vessel, Some(root), "left").unwrap();
        let right = world.add_part(vessel, Some(root), "right").unwrap();
        let left_leaf = world.add_part(vessel, Some(left), "left leaf").unwrap();
        let right_leaf = world.add_part(vessel, Some(right), "right leaf").unwrap();
        let deep = world.add_part(vessel, Some(left_leaf), "deep").unwrap();
        let other = world.add_part(vessel, None, "other root").unwrap();

        assert_eq!(
            world.subtree(root),
            vec![root, left, right, left_leaf, right_leaf, deep]
        );
        assert_eq!(world.subtree(right), vec![right, right_leaf]);
        assert_eq!(world.subtree(other), vec![other]);
    }
}
