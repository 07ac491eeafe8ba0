//! Removal of escaped entities
//!
//! Entities leave the registry first and only then give their handles back
//! to the physics world, so a live entry never points at a released handle.

use super::entity::Entity;
use super::registry::SceneRegistry;
use crate::error::SimError;
use crate::physics::PhysicsAdapter;

/// Flag `flagged`, drain the registry, and release every drained handle once.
///
/// Returns the removed keys in registry order. A failed release means the
/// registry and physics world disagree; it is returned as-is and the caller
/// should stop.
pub fn apply<P: PhysicsAdapter + ?Sized>(
    registry: &mut SceneRegistry,
    physics: &mut P,
    flagged: &[String],
) -> Result<Vec<String>, SimError> {
    for key in flagged {
        registry.mark_for_removal(key)?;
    }

    let drained = registry.drain_removed();
    let mut removed = Vec::with_capacity(drained.len());
    for (key, entity) in drained {
        release(physics, &entity)?;
        log::info!("Removed entity: {key}");
        removed.push(key);
    }
    Ok(removed)
}

/// Shapes first, then the body they hang off
fn release<P: PhysicsAdapter + ?Sized>(physics: &mut P, entity: &Entity) -> Result<(), SimError> {
    for shape in entity.shapes() {
        physics.remove_shape(shape)?;
    }
    physics.remove_body(entity.body())?;
    Ok(())
}
