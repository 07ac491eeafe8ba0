//! Scene simulation
//!
//! Everything between the physics engine and the renderer lives here:
//! - Ring geometry generation
//! - Entity registry with two-phase removal
//! - Escape detection and removal
//! - The fixed timestep frame loop
//!
//! Iteration order is registry insertion order throughout.

pub mod entity;
pub mod escape;
pub mod frame;
pub mod geometry;
pub mod registry;
pub mod removal;
pub mod scene;

#[cfg(test)]
pub(crate) mod test_utils;

pub use entity::{BoundaryEntity, ContainmentSpec, Entity, EntityKind, PointEntity};
pub use frame::{FrameLoop, FramePacer, LoopState};
pub use geometry::{Chord, generate};
pub use registry::SceneRegistry;
pub use scene::{BALL_KEY, RING_KEY, Simulation, spawn_ball, spawn_boundary};
