//! Assembly world for simulated vessels.
//!
//! This crate provides the entity bookkeeping that reinforcement systems run
//! against. It builds on [`sim_types`] for handles and joint settings.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         World                                │
//! │  Contains: parts, rigid bodies, vessels, joint components   │
//! │  Provides: ownership cascade, decoupling, membership queries│
//! └─────────────────────────┬───────────────────────────────────┘
//!                           │ raises
//!                           ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        EventBus                              │
//! │  Registry of vessel-modified handlers, snapshot delivery    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The world does not solve constraints. Joint components are records of what
//! the physics engine has been asked to enforce.
//!
//! Everything here is plain data behind handles, so a world can be built,
//! cloned and inspected without a running physics engine.
//!
//! # Quick Start
//!
//! ```
//! use sim_core::World;
//! use sim_types::{JointSettings, MotionLocks};
//!
//! let mut world = World::new();
//! let vessel = world.add_vessel("stack");
//! let base = world.add_part(vessel, None, "base").unwrap();
//! let top = world.add_part(vessel, Some(base), "top").unwrap();
//! world.attach_body(base).unwrap();
//! let top_body = world.attach_body(top).unwrap();
//!
//! let joint = world
//!     .add_joint(
//!         base,
//!         JointSettings::new()
//!             .with_connected_body(top_body)
//!             .with_motion(MotionLocks::locked()),
//!     )
//!     .unwrap();
//!
//! // Splitting the top off leaves the joint spanning two vessels.
//! let debris = world.decouple(top).unwrap();
//! assert_ne!(world.part(top).unwrap().vessel(), Some(vessel));
//! assert_eq!(world.part(top).unwrap().vessel(), Some(debris));
//! assert!(world.is_joint_alive(joint));
//! ```

#![doc(html_root_url = "https://docs.rs/sim-core/0.1.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(clippy::missing_const_for_fn)]

pub mod events;
mod world;

pub use events::{EventBus, VesselModified};
pub use world::{Joint, Part, RigidBody, Vessel, World};

// Re-export key types from sim-types for convenience
pub use sim_types::{
    BodyId, HandlerId, JointId, JointMotion, JointSettings, MotionLocks, PartId, PartTag,
    ProjectionMode, SimError, VesselId,
};
