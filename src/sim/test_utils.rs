//! Test utilities for scene-level tests without a real physics engine.
//!
//! `ScriptedPhysics` moves dynamic bodies along straight lines at a fixed
//! velocity and counts every release call, so tests can place a ball exactly
//! where they need it and check handle bookkeeping.

use std::collections::HashMap;

use glam::Vec2;

use super::registry::SceneRegistry;
use super::scene::{spawn_ball, spawn_boundary};
use crate::error::PhysicsError;
use crate::physics::{BodyDesc, BodyHandle, BodyKind, PhysicsAdapter, ShapeDesc, ShapeHandle};
use crate::renderer::vertex::colors;
use crate::settings::{BallSettings, BoundarySettings};

struct ScriptedBody {
    kind: BodyKind,
    position: Vec2,
    velocity: Vec2,
    angle: f32,
    alive: bool,
}

/// Straight-line physics with release bookkeeping.
#[derive(Default)]
pub(crate) struct ScriptedPhysics {
    bodies: Vec<ScriptedBody>,
    shapes: Vec<(ShapeDesc, bool)>,
    body_releases: HashMap<BodyHandle, u32>,
    shape_releases: HashMap<ShapeHandle, u32>,
    pub steps: u32,
}

impl ScriptedPhysics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_velocity(&mut self, body: BodyHandle, velocity: Vec2) {
        self.body_mut(body).velocity = velocity;
    }

    pub fn set_position(&mut self, body: BodyHandle, position: Vec2) {
        self.body_mut(body).position = position;
    }

    pub fn body_releases(&self, body: BodyHandle) -> u32 {
        self.body_releases.get(&body).copied().unwrap_or(0)
    }

    pub fn shape_releases(&self, shape: ShapeHandle) -> u32 {
        self.shape_releases.get(&shape).copied().unwrap_or(0)
    }

    pub fn live_bodies(&self) -> usize {
        self.bodies.iter().filter(|b| b.alive).count()
    }

    pub fn live_shapes(&self) -> usize {
        self.shapes.iter().filter(|(_, alive)| *alive).count()
    }

    pub fn shape(&self, shape: ShapeHandle) -> &ShapeDesc {
        &self.shapes[shape.into_raw_parts().0 as usize].0
    }

    fn body_mut(&mut self, body: BodyHandle) -> &mut ScriptedBody {
        &mut self.bodies[body.into_raw_parts().0 as usize]
    }

    fn live_body(&self, body: BodyHandle) -> Option<&ScriptedBody> {
        self.bodies
            .get(body.into_raw_parts().0 as usize)
            .filter(|b| b.alive)
    }
}

impl PhysicsAdapter for ScriptedPhysics {
    fn step(&mut self, dt: f32) {
        for body in self.bodies.iter_mut().filter(|b| b.alive) {
            if body.kind == BodyKind::Dynamic {
                body.position += body.velocity * dt;
            }
        }
        self.steps += 1;
    }

    fn add_body(&mut self, body: BodyDesc) -> BodyHandle {
        self.bodies.push(ScriptedBody {
            kind: body.kind,
            position: body.position,
            velocity: Vec2::ZERO,
            angle: 0.0,
            alive: true,
        });
        BodyHandle::from_raw_parts(self.bodies.len() as u32 - 1, 0)
    }

    fn add_shape(&mut self, shape: ShapeDesc, _parent: BodyHandle) -> ShapeHandle {
        self.shapes.push((shape, true));
        ShapeHandle::from_raw_parts(self.shapes.len() as u32 - 1, 0)
    }

    fn remove_shape(&mut self, handle: ShapeHandle) -> Result<(), PhysicsError> {
        *self.shape_releases.entry(handle).or_default() += 1;
        match self.shapes.get_mut(handle.into_raw_parts().0 as usize) {
            Some((_, alive)) if *alive => {
                *alive = false;
                Ok(())
            }
            _ => Err(PhysicsError::UnknownShape(handle)),
        }
    }

    fn remove_body(&mut self, handle: BodyHandle) -> Result<(), PhysicsError> {
        *self.body_releases.entry(handle).or_default() += 1;
        match self.bodies.get_mut(handle.into_raw_parts().0 as usize) {
            Some(body) if body.alive => {
                body.alive = false;
                Ok(())
            }
            _ => Err(PhysicsError::UnknownBody(handle)),
        }
    }

    fn position(&self, body: BodyHandle) -> Option<Vec2> {
        self.live_body(body).map(|b| b.position)
    }

    fn orientation(&self, body: BodyHandle) -> Option<f32> {
        self.live_body(body).map(|b| b.angle)
    }

    fn set_orientation(&mut self, body: BodyHandle, angle: f32) -> Result<(), PhysicsError> {
        match self.bodies.get_mut(body.into_raw_parts().0 as usize) {
            Some(b) if b.alive => {
                b.angle = angle;
                Ok(())
            }
            _ => Err(PhysicsError::UnknownBody(body)),
        }
    }
}

/// Default ball at `position`
pub(crate) fn insert_ball<P: PhysicsAdapter>(
    registry: &mut SceneRegistry,
    physics: &mut P,
    key: &str,
    position: Vec2,
) -> BodyHandle {
    let settings = BallSettings {
        position,
        ..Default::default()
    };
    spawn_ball(registry, physics, key, &settings, colors::WHITE).unwrap();
    registry.get(key).unwrap().body()
}

/// Default 32/4 ring at `center`
pub(crate) fn insert_ring<P: PhysicsAdapter>(
    registry: &mut SceneRegistry,
    physics: &mut P,
    key: &str,
    center: Vec2,
    radius: f32,
) -> BodyHandle {
    let settings = BoundarySettings {
        center,
        radius,
        ..Default::default()
    };
    spawn_boundary(registry, physics, key, &settings, colors::WHITE).unwrap();
    registry.get(key).unwrap().body()
}
