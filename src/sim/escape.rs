//! Escape detection
//!
//! Every point entity is tested against every boundary's containment circle.
//! This pass only reads; flagging and removal happen afterwards.

use super::entity::EntityKind;
use super::registry::SceneRegistry;
use crate::error::{PhysicsError, SimError};
use crate::physics::PhysicsAdapter;

/// Keys of point entities that have left a boundary, in registry order.
///
/// Boundaries are checked in registry order and the first one a point is
/// outside of claims it. With nested boundaries that makes the result depend
/// on insertion order. Entities already flagged are skipped. A point whose
/// body is gone from the physics world is an error.
///
/// O(points × boundaries); fine for a handful of entities.
pub fn detect<P: PhysicsAdapter + ?Sized>(
    registry: &SceneRegistry,
    physics: &P,
) -> Result<Vec<String>, SimError> {
    let mut escaped = Vec::new();

    for (key, entity) in registry.iter_live() {
        if entity.to_remove() {
            continue;
        }
        let EntityKind::Point(point) = &entity.kind else {
            continue;
        };
        let pos = physics
            .position(point.body)
            .ok_or(PhysicsError::UnknownBody(point.body))?;

        let outside = registry
            .iter_live()
            .filter_map(|(_, other)| other.as_boundary())
            .map(|boundary| boundary.containment())
            .find(|circle| circle.is_outside(pos));

        if let Some(circle) = outside {
            log::info!(
                "{key} has exited the circle: center=({:.1}, {:.1}) radius={:.1} at ({:.1}, {:.1})",
                circle.center.x,
                circle.center.y,
                circle.radius,
                pos.x,
                pos.y
            );
            escaped.push(key.to_string());
        }
    }

    Ok(escaped)
}
