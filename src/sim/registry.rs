//! Scene registry
//!
//! Authoritative set of live entities, in insertion order (which is also the
//! draw order). Removal is two-phase: entities are flagged while the scene is
//! scanned, then drained in one go, so nothing is mutated mid-iteration.

use super::entity::Entity;
use crate::error::SimError;

#[derive(Debug, Default)]
pub struct SceneRegistry {
    entries: Vec<(String, Entity)>,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity under a new key.
    pub fn insert(&mut self, key: impl Into<String>, entity: Entity) -> Result<(), SimError> {
        let key = key.into();
        if self.contains(&key) {
            return Err(SimError::DuplicateKey(key));
        }
        self.entries.push((key, entity));
        Ok(())
    }

    /// Flag an entity for the next drain. Idempotent.
    pub fn mark_for_removal(&mut self, key: &str) -> Result<(), SimError> {
        let entity = self
            .get_mut(key)
            .ok_or_else(|| SimError::UnknownKey(key.to_string()))?;
        entity.mark_for_removal();
        Ok(())
    }

    /// Remove and return every flagged entity, keeping survivors in order.
    pub fn drain_removed(&mut self) -> Vec<(String, Entity)> {
        let (removed, live): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|(_, entity)| entity.to_remove());
        self.entries = live;
        removed
    }

    /// Current entries in insertion order
    pub fn iter_live(&self) -> impl Iterator<Item = (&str, &Entity)> {
        self.entries.iter().map(|(key, entity)| (key.as_str(), entity))
    }

    pub fn get(&self, key: &str) -> Option<&Entity> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, entity)| entity)
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut Entity> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, entity)| entity)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{BodyHandle, ShapeHandle};
    use crate::sim::entity::PointEntity;

    fn ball(id: u32) -> Entity {
        Entity::point(PointEntity {
            body: BodyHandle::from_raw_parts(id, 0),
            shape: ShapeHandle::from_raw_parts(id, 0),
            radius: 20.0,
            color: [1.0; 4],
        })
    }

    #[test]
    fn test_insert_rejects_duplicates() {
        let mut registry = SceneRegistry::new();
        registry.insert("ball", ball(0)).unwrap();
        match registry.insert("ball", ball(1)) {
            Err(SimError::DuplicateKey(key)) => assert_eq!(key, "ball"),
            other => panic!("expected DuplicateKey, got {other:?}"),
        }
        assert_eq!(registry.len(), 1);
        // The original entry is untouched
        assert_eq!(registry.get("ball").unwrap().body(), BodyHandle::from_raw_parts(0, 0));
    }

    #[test]
    fn test_iteration_keeps_insertion_order() {
        let mut registry = SceneRegistry::new();
        for key in ["c", "a", "b"] {
            registry.insert(key, ball(0)).unwrap();
        }
        let keys: Vec<_> = registry.iter_live().map(|(k, _)| k).collect();
        assert_eq!(keys, ["c", "a", "b"]);
    }

    #[test]
    fn test_double_mark_drains_once() {
        let mut registry = SceneRegistry::new();
        registry.insert("ball", ball(0)).unwrap();
        registry.insert("other", ball(1)).unwrap();

        registry.mark_for_removal("ball").unwrap();
        registry.mark_for_removal("ball").unwrap();

        let removed = registry.drain_removed();
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].0, "ball");
        assert!(!registry.contains("ball"));
        assert!(registry.contains("other"));

        // Nothing left to drain
        assert!(registry.drain_removed().is_empty());
    }

    #[test]
    fn test_mark_unknown_key() {
        let mut registry = SceneRegistry::new();
        assert!(matches!(
            registry.mark_for_removal("ghost"),
            Err(SimError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_drain_without_flags_is_empty() {
        let mut registry = SceneRegistry::new();
        registry.insert("ball", ball(0)).unwrap();
        assert!(registry.drain_removed().is_empty());
        assert_eq!(registry.len(), 1);
    }
}
