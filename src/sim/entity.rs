//! Scene entities
//!
//! A scene holds two kinds of things: points that can escape (the ball) and
//! boundaries they can escape from (the ring).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Chord;
use crate::physics::{BodyHandle, ShapeHandle};
use crate::renderer::Color;

/// Circle used for the escape test, independent of the physical segments.
///
/// Rotation happens about `center`, so the circle never changes while the
/// ring spins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainmentSpec {
    pub center: Vec2,
    pub radius: f32,
}

impl ContainmentSpec {
    /// Strictly outside; a point exactly on the circle is still contained.
    #[inline]
    pub fn is_outside(&self, point: Vec2) -> bool {
        point.distance(self.center) > self.radius
    }
}

/// A body that can leave a boundary
#[derive(Debug, Clone)]
pub struct PointEntity {
    pub body: BodyHandle,
    pub shape: ShapeHandle,
    /// Render radius
    pub radius: f32,
    pub color: Color,
}

/// A segmented ring on a kinematic body
#[derive(Debug, Clone)]
pub struct BoundaryEntity {
    pub body: BodyHandle,
    /// One collider per chord, same order as `chords`
    pub segments: Vec<ShapeHandle>,
    /// Local-frame chords the segments were built from
    pub chords: Vec<Chord>,
    pub thickness: f32,
    pub color: Color,
    containment: ContainmentSpec,
}

impl BoundaryEntity {
    pub fn new(
        body: BodyHandle,
        segments: Vec<ShapeHandle>,
        chords: Vec<Chord>,
        thickness: f32,
        color: Color,
        containment: ContainmentSpec,
    ) -> Self {
        debug_assert_eq!(segments.len(), chords.len());
        Self {
            body,
            segments,
            chords,
            thickness,
            color,
            containment,
        }
    }

    #[inline]
    pub fn containment(&self) -> &ContainmentSpec {
        &self.containment
    }
}

#[derive(Debug, Clone)]
pub enum EntityKind {
    Point(PointEntity),
    Boundary(BoundaryEntity),
}

/// A registry entry
#[derive(Debug, Clone)]
pub struct Entity {
    pub kind: EntityKind,
    to_remove: bool,
}

impl Entity {
    pub fn point(point: PointEntity) -> Self {
        Self {
            kind: EntityKind::Point(point),
            to_remove: false,
        }
    }

    pub fn boundary(boundary: BoundaryEntity) -> Self {
        Self {
            kind: EntityKind::Boundary(boundary),
            to_remove: false,
        }
    }

    #[inline]
    pub fn to_remove(&self) -> bool {
        self.to_remove
    }

    /// One-way: there is no way to clear the flag.
    #[inline]
    pub fn mark_for_removal(&mut self) {
        self.to_remove = true;
    }

    pub fn color(&self) -> Color {
        match &self.kind {
            EntityKind::Point(p) => p.color,
            EntityKind::Boundary(b) => b.color,
        }
    }

    /// Body owned by this entity
    pub fn body(&self) -> BodyHandle {
        match &self.kind {
            EntityKind::Point(p) => p.body,
            EntityKind::Boundary(b) => b.body,
        }
    }

    /// Colliders owned by this entity
    pub fn shapes(&self) -> Vec<ShapeHandle> {
        match &self.kind {
            EntityKind::Point(p) => vec![p.shape],
            EntityKind::Boundary(b) => b.segments.clone(),
        }
    }

    pub fn as_point(&self) -> Option<&PointEntity> {
        match &self.kind {
            EntityKind::Point(p) => Some(p),
            EntityKind::Boundary(_) => None,
        }
    }

    pub fn as_boundary(&self) -> Option<&BoundaryEntity> {
        match &self.kind {
            EntityKind::Boundary(b) => Some(b),
            EntityKind::Point(_) => None,
        }
    }
}
