//! Rigid-body world behind a narrow adapter trait.
//!
//! The scene only needs to add/remove bodies and shapes, read transforms and
//! spin the ring. `RapierWorld` is the production implementation.

use std::fmt;

use glam::Vec2;
use rapier2d::prelude::*;

use crate::error::PhysicsError;

pub use rapier2d::prelude::{ColliderHandle as ShapeHandle, RigidBodyHandle as BodyHandle};

/// How a body moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Integrated under gravity and contacts
    Dynamic,
    /// Moved only by explicit transform writes
    Kinematic,
}

/// Rigid body to create
#[derive(Debug, Clone, Copy)]
pub struct BodyDesc {
    pub kind: BodyKind,
    pub position: Vec2,
    /// Continuous collision detection (keeps fast balls out of thin walls)
    pub ccd: bool,
}

impl BodyDesc {
    pub fn dynamic(position: Vec2) -> Self {
        Self {
            kind: BodyKind::Dynamic,
            position,
            ccd: true,
        }
    }

    pub fn kinematic(position: Vec2) -> Self {
        Self {
            kind: BodyKind::Kinematic,
            position,
            ccd: false,
        }
    }
}

/// Collider geometry, in the parent body's local frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeGeometry {
    Circle { radius: f32 },
    /// Rounded segment from `a` to `b`
    Segment { a: Vec2, b: Vec2, radius: f32 },
}

/// Collider to attach to a body
#[derive(Debug, Clone, Copy)]
pub struct ShapeDesc {
    pub geometry: ShapeGeometry,
    /// Explicit mass; `None` leaves the engine's density default
    pub mass: Option<f32>,
    pub elasticity: f32,
    pub friction: f32,
}

/// What the scene needs from a physics engine
pub trait PhysicsAdapter {
    /// Advance the world by `dt` seconds.
    fn step(&mut self, dt: f32);

    fn add_body(&mut self, body: BodyDesc) -> BodyHandle;

    fn add_shape(&mut self, shape: ShapeDesc, parent: BodyHandle) -> ShapeHandle;

    fn remove_shape(&mut self, handle: ShapeHandle) -> Result<(), PhysicsError>;

    /// Removes the body. Shapes still attached go with it.
    fn remove_body(&mut self, handle: BodyHandle) -> Result<(), PhysicsError>;

    /// World-space position of a body
    fn position(&self, body: BodyHandle) -> Option<Vec2>;

    /// Orientation of a body (radians)
    fn orientation(&self, body: BodyHandle) -> Option<f32>;

    fn set_orientation(&mut self, body: BodyHandle, angle: f32) -> Result<(), PhysicsError>;
}

/// Physics world containing all `Rapier2D` components.
pub struct RapierWorld {
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub integration_parameters: IntegrationParameters,
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: DefaultBroadPhase,
    pub narrow_phase: NarrowPhase,
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,
    pub ccd_solver: CCDSolver,
    pub gravity: Vector,
    pub frame: u64,
}

impl fmt::Debug for RapierWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RapierWorld")
            .field("frame", &self.frame)
            .field("rigid_body_count", &self.rigid_body_set.len())
            .field("collider_count", &self.collider_set.len())
            .finish_non_exhaustive()
    }
}

impl RapierWorld {
    /// Creates an empty world with the given gravity (pixels/s², y down).
    pub fn with_gravity(gravity: Vec2) -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            gravity: Vector::new(gravity.x, gravity.y),
            frame: 0,
        }
    }

    pub fn body_count(&self) -> usize {
        self.rigid_body_set.len()
    }

    pub fn shape_count(&self) -> usize {
        self.collider_set.len()
    }
}

impl PhysicsAdapter for RapierWorld {
    fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        self.physics_pipeline.step(
            self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            &(),
            &(),
        );
        self.frame += 1;
    }

    fn add_body(&mut self, body: BodyDesc) -> BodyHandle {
        let builder = match body.kind {
            BodyKind::Dynamic => RigidBodyBuilder::dynamic(),
            BodyKind::Kinematic => RigidBodyBuilder::kinematic_position_based(),
        };
        let rigid_body = builder
            .translation(Vector::new(body.position.x, body.position.y))
            .ccd_enabled(body.ccd)
            .build();
        self.rigid_body_set.insert(rigid_body)
    }

    fn add_shape(&mut self, shape: ShapeDesc, parent: BodyHandle) -> ShapeHandle {
        let builder = match shape.geometry {
            ShapeGeometry::Circle { radius } => ColliderBuilder::ball(radius),
            ShapeGeometry::Segment { a, b, radius } => ColliderBuilder::capsule_from_endpoints(
                Vector::new(a.x, a.y),
                Vector::new(b.x, b.y),
                radius,
            ),
        };
        // Contact restitution is the average of both colliders (Rapier's default rule)
        let builder = builder.restitution(shape.elasticity).friction(shape.friction);
        let collider = match shape.mass {
            Some(mass) => builder.mass(mass).build(),
            None => builder.build(),
        };
        self.collider_set
            .insert_with_parent(collider, parent, &mut self.rigid_body_set)
    }

    fn remove_shape(&mut self, handle: ShapeHandle) -> Result<(), PhysicsError> {
        self.collider_set
            .remove(
                handle,
                &mut self.island_manager,
                &mut self.rigid_body_set,
                true,
            )
            .map(|_| ())
            .ok_or(PhysicsError::UnknownShape(handle))
    }

    fn remove_body(&mut self, handle: BodyHandle) -> Result<(), PhysicsError> {
        self.rigid_body_set
            .remove(
                handle,
                &mut self.island_manager,
                &mut self.collider_set,
                &mut self.impulse_joint_set,
                &mut self.multibody_joint_set,
                true,
            )
            .map(|_| ())
            .ok_or(PhysicsError::UnknownBody(handle))
    }

    fn position(&self, body: BodyHandle) -> Option<Vec2> {
        self.rigid_body_set.get(body).map(|b| {
            let t = b.translation();
            Vec2::new(t.x, t.y)
        })
    }

    fn orientation(&self, body: BodyHandle) -> Option<f32> {
        self.rigid_body_set.get(body).map(|b| b.rotation().angle())
    }

    fn set_orientation(&mut self, body: BodyHandle, angle: f32) -> Result<(), PhysicsError> {
        let rigid_body = self
            .rigid_body_set
            .get_mut(body)
            .ok_or(PhysicsError::UnknownBody(body))?;
        rigid_body.set_rotation(Rotation::from_angle(angle), true);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball_shape() -> ShapeDesc {
        ShapeDesc {
            geometry: ShapeGeometry::Circle { radius: 20.0 },
            mass: Some(1.0),
            elasticity: 0.9,
            friction: 0.1,
        }
    }

    #[test]
    fn test_step_advances_frame() {
        let mut world = RapierWorld::with_gravity(Vec2::new(0.0, 900.0));
        assert_eq!(world.frame, 0);
        world.step(1.0 / 60.0);
        world.step(1.0 / 60.0);
        assert_eq!(world.frame, 2);
    }

    #[test]
    fn test_dynamic_body_falls() {
        let mut world = RapierWorld::with_gravity(Vec2::new(0.0, 900.0));
        let body = world.add_body(BodyDesc::dynamic(Vec2::new(300.0, 200.0)));
        world.add_shape(ball_shape(), body);

        for _ in 0..30 {
            world.step(1.0 / 60.0);
        }

        let pos = world.position(body).unwrap();
        assert!((pos.x - 300.0).abs() < 1e-3);
        // y grows downward
        assert!(pos.y > 250.0);
    }

    #[test]
    fn test_kinematic_orientation_roundtrip() {
        let mut world = RapierWorld::with_gravity(Vec2::ZERO);
        let ring = world.add_body(BodyDesc::kinematic(Vec2::new(300.0, 300.0)));

        world.set_orientation(ring, 0.25).unwrap();
        assert!((world.orientation(ring).unwrap() - 0.25).abs() < 1e-5);

        world.step(1.0 / 60.0);
        assert!((world.orientation(ring).unwrap() - 0.25).abs() < 1e-5);
        assert_eq!(world.position(ring), Some(Vec2::new(300.0, 300.0)));
    }

    #[test]
    fn test_add_and_remove() {
        let mut world = RapierWorld::with_gravity(Vec2::ZERO);
        let body = world.add_body(BodyDesc::dynamic(Vec2::new(50.0, 50.0)));
        let shape = world.add_shape(ball_shape(), body);
        assert_eq!(world.body_count(), 1);
        assert_eq!(world.shape_count(), 1);

        world.remove_shape(shape).unwrap();
        world.remove_body(body).unwrap();
        assert_eq!(world.body_count(), 0);
        assert_eq!(world.shape_count(), 0);
        assert!(world.position(body).is_none());
    }

    #[test]
    fn test_double_remove_is_an_error() {
        let mut world = RapierWorld::with_gravity(Vec2::ZERO);
        let body = world.add_body(BodyDesc::dynamic(Vec2::ZERO));
        let shape = world.add_shape(ball_shape(), body);

        world.remove_shape(shape).unwrap();
        assert_eq!(world.remove_shape(shape), Err(PhysicsError::UnknownShape(shape)));

        world.remove_body(body).unwrap();
        assert_eq!(world.remove_body(body), Err(PhysicsError::UnknownBody(body)));
        assert_eq!(
            world.set_orientation(body, 1.0),
            Err(PhysicsError::UnknownBody(body))
        );
    }
}
