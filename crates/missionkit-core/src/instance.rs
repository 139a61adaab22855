//! Live mission instances

use crate::{DefId, Error, InstanceId, MissionRegistry, Result};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// One concrete playthrough of a mission definition
///
/// Immutable after creation. `title` is captured from the definition at
/// creation time, not live-joined, so instances keep their display text
/// across pack reloads. `definition_id` is a plain foreign key; if the
/// definition disappears in a reload, readers treat the instance as an
/// unknown mission rather than failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    pub instance_id: InstanceId,
    pub definition_id: DefId,
    pub title: String,
    pub shared: bool,
}

/// Process-global table of live mission instances
///
/// The one store every world touches, so it is the one place that needs
/// real concurrent-mutation protection; everything world- or player-scoped
/// is single-owner state on that world's authoritative thread. Rebuilt
/// from persisted data on world load and serialized back on save.
#[derive(Debug, Default)]
pub struct InstanceStore {
    instances: DashMap<InstanceId, Mission>,
}

impl InstanceStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new instance of a definition
    ///
    /// Fails with [`Error::UnknownDefinition`] when the definition does not
    /// exist. The returned ID is freshly generated and never reused, even
    /// after removal.
    pub fn create(
        &self,
        registry: &MissionRegistry,
        definition_id: &DefId,
        shared: bool,
    ) -> Result<InstanceId> {
        let Some(definition) = registry.get(definition_id) else {
            return Err(Error::UnknownDefinition(definition_id.clone()));
        };
        let instance_id = InstanceId::generate();
        let mission = Mission {
            instance_id,
            definition_id: definition_id.clone(),
            title: definition.title().to_string(),
            shared,
        };
        self.instances.insert(instance_id, mission);
        Ok(instance_id)
    }

    /// Look up an instance, returning an owned copy
    ///
    /// Copies out rather than handing back a map guard so callers never
    /// hold a table lock across dispatch work.
    pub fn get(&self, instance_id: InstanceId) -> Option<Mission> {
        self.instances.get(&instance_id).map(|m| m.value().clone())
    }

    /// Remove an instance
    pub fn remove(&self, instance_id: InstanceId) -> Option<Mission> {
        self.instances.remove(&instance_id).map(|(_, m)| m)
    }

    /// All live instance IDs
    pub fn ids(&self) -> Vec<InstanceId> {
        self.instances.iter().map(|m| m.instance_id).collect()
    }

    /// Number of live instances
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Copy out every instance for the save path
    pub fn snapshot(&self) -> Vec<Mission> {
        self.instances.iter().map(|m| m.value().clone()).collect()
    }

    /// Replace the whole table from persisted data
    pub fn restore(&self, missions: Vec<Mission>) {
        self.instances.clear();
        for mission in missions {
            self.instances.insert(mission.instance_id, mission);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry_with(id: &str, shared: bool) -> MissionRegistry {
        let mut registry = MissionRegistry::with_builtin_triggers();
        registry.register_definition(
            DefId::new(id),
            format!("Mission {id}"),
            3,
            shared,
            json!({"type": "block_break", "block": "minecraft:stone"}),
        );
        registry
    }

    #[test]
    fn test_create_and_get() {
        let registry = registry_with("break_stone", true);
        let store = InstanceStore::new();

        let id = store
            .create(&registry, &DefId::new("break_stone"), true)
            .unwrap();
        let mission = store.get(id).unwrap();
        assert_eq!(mission.definition_id, DefId::new("break_stone"));
        assert_eq!(mission.title, "Mission break_stone");
        assert!(mission.shared);
    }

    #[test]
    fn test_unknown_definition_fails() {
        let registry = MissionRegistry::with_builtin_triggers();
        let store = InstanceStore::new();
        let result = store.create(&registry, &DefId::new("nope"), false);
        assert!(matches!(result, Err(Error::UnknownDefinition(_))));
    }

    #[test]
    fn test_ids_are_fresh() {
        let registry = registry_with("m", false);
        let store = InstanceStore::new();
        let a = store.create(&registry, &DefId::new("m"), false).unwrap();
        let b = store.create(&registry, &DefId::new("m"), false).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_remove_then_get_is_none() {
        let registry = registry_with("m", false);
        let store = InstanceStore::new();
        let id = store.create(&registry, &DefId::new("m"), false).unwrap();
        assert!(store.remove(id).is_some());
        assert!(store.get(id).is_none());
    }

    #[test]
    fn test_snapshot_restore_round_trip() {
        let registry = registry_with("m", true);
        let store = InstanceStore::new();
        store.create(&registry, &DefId::new("m"), true).unwrap();
        store.create(&registry, &DefId::new("m"), false).unwrap();

        let snapshot = store.snapshot();
        let restored = InstanceStore::new();
        restored.restore(snapshot.clone());

        assert_eq!(restored.len(), 2);
        for mission in snapshot {
            assert_eq!(restored.get(mission.instance_id), Some(mission));
        }
    }
}
