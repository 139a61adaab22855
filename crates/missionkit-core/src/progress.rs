//! World-scoped shared mission progress

use crate::port::{SharedTableSnapshot, SyncSink};
use crate::{InstanceId, PlayerId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Progress counter for one shared mission
///
/// `progress` is clamped to `target` and never decreases; `completed`
/// transitions false to true exactly once and never reverts. Once
/// completed, further updates are silent no-ops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedMission {
    pub instance_id: InstanceId,
    pub progress: u32,
    pub target: u32,
    pub completed: bool,
}

impl SharedMission {
    /// Create a fresh counter at zero progress
    pub fn new(instance_id: InstanceId, target: u32) -> Self {
        Self {
            instance_id,
            progress: 0,
            target,
            completed: false,
        }
    }

    /// Apply a progress delta, clamped to the target
    ///
    /// Returns true exactly when this update completes the mission.
    pub fn update_progress(&mut self, amount: u32) -> bool {
        if self.completed {
            return false;
        }
        self.progress = self.progress.saturating_add(amount).min(self.target);
        self.completed = self.progress >= self.target;
        if self.completed {
            info!(instance = %self.instance_id, target = self.target, "shared mission completed");
        }
        self.completed
    }
}

/// Per-world aggregate owning all shared mission records plus the
/// activation-intent table
///
/// Only the world's authoritative thread mutates this. The intent table
/// maps player identity to the instances they expect rewards for and is
/// consulted only at completion time.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct WorldMissions {
    shared: IndexMap<InstanceId, SharedMission>,
    intents: IndexMap<PlayerId, BTreeSet<InstanceId>>,
    #[serde(skip)]
    dirty: bool,
}

impl WorldMissions {
    /// Create an empty world table
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted parts
    pub fn restore(
        shared: impl IntoIterator<Item = SharedMission>,
        intents: IndexMap<PlayerId, BTreeSet<InstanceId>>,
    ) -> Self {
        Self {
            shared: shared.into_iter().map(|m| (m.instance_id, m)).collect(),
            intents,
            dirty: false,
        }
    }

    /// Activate a shared mission
    ///
    /// Idempotent: re-activating an already-present instance is a no-op and
    /// never resets progress.
    pub fn activate(&mut self, instance_id: InstanceId, target: u32) {
        self.shared
            .entry(instance_id)
            .or_insert_with(|| SharedMission::new(instance_id, target));
        self.dirty = true;
    }

    /// Delete a shared mission record outright
    pub fn remove(&mut self, instance_id: InstanceId) -> Option<SharedMission> {
        let removed = self.shared.shift_remove(&instance_id);
        if removed.is_some() {
            self.dirty = true;
        }
        removed
    }

    /// Look up one record
    pub fn get(&self, instance_id: InstanceId) -> Option<&SharedMission> {
        self.shared.get(&instance_id)
    }

    /// Iterate all records
    pub fn iter(&self) -> impl Iterator<Item = &SharedMission> {
        self.shared.values()
    }

    /// Number of shared missions in this world
    pub fn len(&self) -> usize {
        self.shared.len()
    }

    /// Check if the world has no shared missions
    pub fn is_empty(&self) -> bool {
        self.shared.is_empty()
    }

    /// Record that a player expects rewards for an instance
    pub fn add_intent(&mut self, player: PlayerId, instance_id: InstanceId) {
        self.intents.entry(player).or_default().insert(instance_id);
        self.dirty = true;
    }

    /// Drop a player's reward intent for an instance
    pub fn remove_intent(&mut self, player: PlayerId, instance_id: InstanceId) {
        if let Some(set) = self.intents.get_mut(&player) {
            set.remove(&instance_id);
            self.dirty = true;
        }
    }

    /// The intent table, for the save path
    pub fn intents(&self) -> &IndexMap<PlayerId, BTreeSet<InstanceId>> {
        &self.intents
    }

    /// Apply a progress delta to one shared mission
    ///
    /// Unknown instance IDs and already-completed missions are silent
    /// no-ops. An applied update marks the world dirty and pushes the full
    /// table to every player; the update that completes the mission first
    /// rewards every player whose intent set references it.
    pub fn update_progress(&mut self, instance_id: InstanceId, amount: u32, sink: &mut dyn SyncSink) {
        let Some(mission) = self.shared.get_mut(&instance_id) else {
            return;
        };
        if mission.completed {
            return;
        }
        let completed_now = mission.update_progress(amount);
        debug!(
            instance = %instance_id,
            progress = mission.progress,
            target = mission.target,
            "shared mission progress updated"
        );
        if completed_now {
            for (player, wanted) in &self.intents {
                if wanted.contains(&instance_id) {
                    sink.reward(*player, instance_id);
                }
            }
        }
        self.dirty = true;
        sink.shared_missions(&self.snapshot());
    }

    /// Copy out the full shared-mission table
    pub fn snapshot(&self) -> SharedTableSnapshot {
        self.shared.clone()
    }

    /// Push the full table to a freshly connected player's world
    pub fn sync_on_login(&self, sink: &mut dyn SyncSink) {
        sink.shared_missions(&self.snapshot());
    }

    /// Take and reset the dirty flag, for the host's save hook
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::NullSink;

    #[test]
    fn test_progress_clamps_to_target() {
        let id = InstanceId::generate();
        let mut mission = SharedMission::new(id, 3);
        assert!(!mission.update_progress(2));
        assert_eq!(mission.progress, 2);
        // Overshoot clamps and completes in the same update
        assert!(mission.update_progress(5));
        assert_eq!(mission.progress, 3);
        assert!(mission.completed);
    }

    #[test]
    fn test_completed_is_absorbing() {
        let id = InstanceId::generate();
        let mut mission = SharedMission::new(id, 1);
        assert!(mission.update_progress(1));
        assert!(!mission.update_progress(10));
        assert_eq!(mission.progress, 1);
        assert!(mission.completed);
    }

    #[test]
    fn test_activate_is_idempotent() {
        let mut world = WorldMissions::new();
        let mut sink = NullSink;
        let id = InstanceId::generate();

        world.activate(id, 3);
        world.update_progress(id, 2, &mut sink);
        world.activate(id, 3);
        assert_eq!(world.get(id).map(|m| m.progress), Some(2));
    }

    #[test]
    fn test_update_unknown_instance_is_noop() {
        let mut world = WorldMissions::new();
        let mut sink = NullSink;
        world.update_progress(InstanceId::generate(), 1, &mut sink);
        assert!(world.is_empty());
    }

    #[test]
    fn test_remove_deletes_row() {
        let mut world = WorldMissions::new();
        let id = InstanceId::generate();
        world.activate(id, 3);
        assert!(world.remove(id).is_some());
        assert!(world.get(id).is_none());
    }

    #[test]
    fn test_serde_round_trip() {
        let mut world = WorldMissions::new();
        let mut sink = NullSink;
        let a = InstanceId::generate();
        let b = InstanceId::generate();
        let player = PlayerId::generate();
        world.activate(a, 3);
        world.activate(b, 1);
        world.update_progress(a, 2, &mut sink);
        world.update_progress(b, 1, &mut sink);
        world.add_intent(player, a);

        let encoded = serde_json::to_string(&world).unwrap();
        let decoded: WorldMissions = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded.get(a), world.get(a));
        assert_eq!(decoded.get(b), world.get(b));
        assert_eq!(decoded.intents(), world.intents());
    }
}
