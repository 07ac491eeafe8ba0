//! Scene construction and the owned simulation aggregate
//!
//! `Simulation` owns the physics world and the registry; the frame loop
//! borrows it for one tick at a time.

use glam::Vec2;

use super::entity::{BoundaryEntity, ContainmentSpec, Entity, EntityKind, PointEntity};
use super::geometry;
use super::registry::SceneRegistry;
use crate::error::{PhysicsError, SimError};
use crate::normalize_angle;
use crate::physics::{BodyDesc, BodyHandle, PhysicsAdapter, ShapeDesc, ShapeGeometry};
use crate::renderer::vertex::colors;
use crate::renderer::{Color, RenderAdapter};
use crate::settings::{BallSettings, BoundarySettings, Settings};

pub const BALL_KEY: &str = "ball";
pub const RING_KEY: &str = "ground";

/// Create a dynamic ball body and register it under `key`.
pub fn spawn_ball<P: PhysicsAdapter + ?Sized>(
    registry: &mut SceneRegistry,
    physics: &mut P,
    key: &str,
    ball: &BallSettings,
    color: Color,
) -> Result<(), SimError> {
    // Checked before touching physics so a rejected key leaks no handles
    if registry.contains(key) {
        return Err(SimError::DuplicateKey(key.to_string()));
    }

    let body = physics.add_body(BodyDesc::dynamic(ball.position));
    let shape = physics.add_shape(
        ShapeDesc {
            geometry: ShapeGeometry::Circle {
                radius: ball.radius,
            },
            mass: Some(ball.mass),
            elasticity: ball.elasticity,
            friction: ball.friction,
        },
        body,
    );

    registry.insert(
        key,
        Entity::point(PointEntity {
            body,
            shape,
            radius: ball.radius,
            color,
        }),
    )
}

/// Create a kinematic ring body with one segment per chord and register it.
pub fn spawn_boundary<P: PhysicsAdapter + ?Sized>(
    registry: &mut SceneRegistry,
    physics: &mut P,
    key: &str,
    ring: &BoundarySettings,
    color: Color,
) -> Result<(), SimError> {
    let chords = geometry::generate(ring.radius, ring.segment_count, ring.opening_size)?;
    if registry.contains(key) {
        return Err(SimError::DuplicateKey(key.to_string()));
    }

    let body = physics.add_body(BodyDesc::kinematic(ring.center));
    let segments = chords
        .iter()
        .map(|chord| {
            physics.add_shape(
                ShapeDesc {
                    geometry: ShapeGeometry::Segment {
                        a: chord.p1,
                        b: chord.p2,
                        radius: ring.thickness,
                    },
                    mass: None,
                    elasticity: ring.elasticity(),
                    friction: ring.friction,
                },
                body,
            )
        })
        .collect();

    let containment = ContainmentSpec {
        center: ring.center,
        radius: ring.radius,
    };
    registry.insert(
        key,
        Entity::boundary(BoundaryEntity::new(
            body,
            segments,
            chords,
            ring.thickness,
            color,
            containment,
        )),
    )
}

/// Physics world, registry and the settings they were built from.
pub struct Simulation<P: PhysicsAdapter> {
    pub physics: P,
    pub registry: SceneRegistry,
    settings: Settings,
}

impl<P: PhysicsAdapter> Simulation<P> {
    /// Empty scene around an existing physics world.
    pub fn new(physics: P, settings: Settings) -> Self {
        Self {
            physics,
            registry: SceneRegistry::new(),
            settings,
        }
    }

    /// The standard scene: one white ball inside one white ring.
    pub fn build(physics: P, settings: Settings) -> Result<Self, SimError> {
        settings.validate()?;
        let mut sim = Self::new(physics, settings);
        spawn_ball(
            &mut sim.registry,
            &mut sim.physics,
            BALL_KEY,
            &sim.settings.ball,
            colors::WHITE,
        )?;
        spawn_boundary(
            &mut sim.registry,
            &mut sim.physics,
            RING_KEY,
            &sim.settings.boundary,
            colors::WHITE,
        )?;
        log::info!(
            "Scene built: {} entities, ring of {} segments",
            sim.registry.len(),
            sim.settings.boundary.segment_count - sim.settings.boundary.opening_size
        );
        Ok(sim)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Spin every ring body by `delta` radians.
    pub fn rotate_boundaries(&mut self, delta: f32) -> Result<(), SimError> {
        for (_, entity) in self.registry.iter_live() {
            let Some(boundary) = entity.as_boundary() else {
                continue;
            };
            let angle = self
                .physics
                .orientation(boundary.body)
                .ok_or(PhysicsError::UnknownBody(boundary.body))?;
            self.physics
                .set_orientation(boundary.body, normalize_angle(angle + delta))?;
        }
        Ok(())
    }

    /// Draw every live entity in registry order.
    ///
    /// An entity whose body is missing from the physics world fails the
    /// whole frame.
    pub fn render<R: RenderAdapter + ?Sized>(&self, renderer: &mut R) -> Result<(), SimError> {
        for (_, entity) in self.registry.iter_live() {
            let color = entity.color();
            match &entity.kind {
                EntityKind::Point(point) => {
                    let pos = self.body_position(point.body)?;
                    renderer.draw_circle(pos, point.radius, color);
                }
                EntityKind::Boundary(boundary) => {
                    let position = self.body_position(boundary.body)?;
                    let angle = self
                        .physics
                        .orientation(boundary.body)
                        .ok_or(PhysicsError::UnknownBody(boundary.body))?;
                    for chord in &boundary.chords {
                        let (p1, p2) = chord.to_world(position, angle);
                        renderer.draw_line(p1, p2, boundary.thickness, color);
                    }
                }
            }
        }
        Ok(())
    }

    fn body_position(&self, body: BodyHandle) -> Result<Vec2, PhysicsError> {
        self.physics
            .position(body)
            .ok_or(PhysicsError::UnknownBody(body))
    }
}
