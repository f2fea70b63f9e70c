//! Clamp joint reinforcement.
//!
//! Launch clamps hold a vessel in place until it is released. The engine's
//! native clamp attachment is too soft for large vessels, which then flex or
//! shake themselves apart on the pad. This crate adds a stiffening joint per
//! clamp while the vessel is physically simulated and tears it down safely
//! when the clamp is released or the vessel leaves physics.
//!
//! # Components
//!
//! - [`ClampReinforcement`] - Per-clamp joint factory, neighbor registry and
//!   invalidation monitor
//! - [`AssemblyScene`] - Engine surface the reinforcement runs against,
//!   implemented for [`sim_core::World`]
//! - [`ClampHost`] - Dispatches lifecycle signals and vessel-modified
//!   notifications to every clamp
//! - [`ReinforcementConfig`] - Joint mode and break strength
//!
//! # Joint Modes
//!
//! | Mode | Attached to | Connected body | Break threshold | Dropped on |
//! |------|-------------|----------------|-----------------|------------|
//! | Normal | clamp | target | configured, finite | decouple, pack |
//! | Infinite strength | target | target itself | unbounded | any vessel change |
//!
//! # Example
//!
//! ```
//! use sim_core::World;
//! use sim_reinforce::{ClampHost, ReinforcementConfig};
//!
//! let mut world = World::new();
//! let vessel = world.add_vessel("rocket");
//! let tank = world.add_part(vessel, None, "tank").unwrap();
//! let clamp = world.add_part(vessel, Some(tank), "clamp").unwrap();
//! world.attach_body(tank).unwrap();
//! world.attach_body(clamp).unwrap();
//!
//! let mut host = ClampHost::new(world, ReinforcementConfig::default()).unwrap();
//! host.add_clamp(clamp).unwrap();
//! host.unpack_all();
//! assert_eq!(host.clamp(clamp).unwrap().joints().len(), 1);
//!
//! // Releasing the clamp sweeps its joint away.
//! let (_, reports) = host.decouple(clamp).unwrap();
//! assert_eq!(reports.len(), 1);
//! assert!(!host.clamp(clamp).unwrap().is_subscribed());
//! ```

#![doc(html_root_url = "https://docs.rs/sim-reinforce/0.1.0")]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(missing_docs)]
#![allow(clippy::missing_const_for_fn)]

mod clamp;
mod config;
mod host;
mod scene;

pub use clamp::{ClampReinforcement, SweepReport};
pub use config::{ClampJointMode, ReinforcementConfig, DEFAULT_CLAMP_JOINT_STRENGTH};
pub use host::ClampHost;
pub use scene::AssemblyScene;

// Re-export the world types callers need alongside the host
pub use sim_core::{VesselModified, World};
