//! Per-player mission activation state

use crate::port::SyncSink;
use crate::{InstanceId, PlayerId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// The set of mission instances one player has opted into tracking
///
/// For shared missions this is pure opt-in (progress lives in the world
/// table); for personal missions it is the only per-player state. Every
/// mutation marks the record dirty and eagerly pushes the full set to that
/// player's client — full-set sync, not incremental diffs.
///
/// Persisted with the player's save data and restored verbatim on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMissions {
    player: PlayerId,
    activated: BTreeSet<InstanceId>,
    #[serde(skip)]
    dirty: bool,
}

impl PlayerMissions {
    /// Create an empty record for a player
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            activated: BTreeSet::new(),
            dirty: false,
        }
    }

    /// Rebuild from persisted parts
    pub fn restore(player: PlayerId, activated: BTreeSet<InstanceId>) -> Self {
        Self {
            player,
            activated,
            dirty: false,
        }
    }

    /// The player this record belongs to
    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// Opt into tracking an instance and push the new set to the client
    pub fn activate(&mut self, instance_id: InstanceId, sink: &mut dyn SyncSink) {
        self.activated.insert(instance_id);
        self.dirty = true;
        debug!(player = %self.player, instance = %instance_id, "activated mission instance");
        sink.player_activations(self.player, &self.activated);
    }

    /// Opt out of tracking an instance and push the new set to the client
    pub fn deactivate(&mut self, instance_id: InstanceId, sink: &mut dyn SyncSink) {
        self.activated.remove(&instance_id);
        self.dirty = true;
        debug!(player = %self.player, instance = %instance_id, "deactivated mission instance");
        sink.player_activations(self.player, &self.activated);
    }

    /// Check whether an instance is activated
    pub fn is_activated(&self, instance_id: InstanceId) -> bool {
        self.activated.contains(&instance_id)
    }

    /// The full activated set, read-only
    pub fn activated_set(&self) -> &BTreeSet<InstanceId> {
        &self.activated
    }

    /// Take and reset the dirty flag, for the host's save hook
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

/// Process-wide registry of per-player mission records
///
/// The host-engine "capability" attachment pattern flattened to
/// composition: per-player extension state keyed by player identity, with
/// explicit attach/detach lifecycle hooks.
#[derive(Debug, Default)]
pub struct PlayerTable {
    players: IndexMap<PlayerId, PlayerMissions>,
}

impl PlayerTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a record for a player entity
    ///
    /// Idempotent: re-attaching (respawn, dimension change) keeps the
    /// existing record, so the activated set survives respawn. Death does
    /// not clear it either.
    pub fn attach(&mut self, player: PlayerId) -> &mut PlayerMissions {
        self.players
            .entry(player)
            .or_insert_with(|| PlayerMissions::new(player))
    }

    /// Insert a record restored from the player's save data
    pub fn attach_restored(&mut self, record: PlayerMissions) {
        self.players.insert(record.player(), record);
    }

    /// Detach a player's record (logout), returning it for persistence
    pub fn detach(&mut self, player: PlayerId) -> Option<PlayerMissions> {
        self.players.shift_remove(&player)
    }

    /// Look up a player's record
    pub fn get(&self, player: PlayerId) -> Option<&PlayerMissions> {
        self.players.get(&player)
    }

    /// Look up a player's record mutably
    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut PlayerMissions> {
        self.players.get_mut(&player)
    }

    /// Number of attached players
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Check if no players are attached
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::{NullSink, SharedTableSnapshot};

    /// Records every push for assertions
    #[derive(Debug, Default)]
    struct RecordingSink {
        activation_pushes: Vec<(PlayerId, BTreeSet<InstanceId>)>,
    }

    impl SyncSink for RecordingSink {
        fn shared_missions(&mut self, _snapshot: &SharedTableSnapshot) {}

        fn player_activations(&mut self, player: PlayerId, activated: &BTreeSet<InstanceId>) {
            self.activation_pushes.push((player, activated.clone()));
        }

        fn reward(&mut self, _player: PlayerId, _instance_id: InstanceId) {}
    }

    #[test]
    fn test_activate_deactivate() {
        let player = PlayerId::generate();
        let id = InstanceId::generate();
        let mut record = PlayerMissions::new(player);
        let mut sink = NullSink;

        record.activate(id, &mut sink);
        assert!(record.is_activated(id));
        record.deactivate(id, &mut sink);
        assert!(!record.is_activated(id));
    }

    #[test]
    fn test_every_mutation_pushes_full_set() {
        let player = PlayerId::generate();
        let a = InstanceId::generate();
        let b = InstanceId::generate();
        let mut record = PlayerMissions::new(player);
        let mut sink = RecordingSink::default();

        record.activate(a, &mut sink);
        record.activate(b, &mut sink);
        record.deactivate(a, &mut sink);

        assert_eq!(sink.activation_pushes.len(), 3);
        let (to, set) = &sink.activation_pushes[2];
        assert_eq!(*to, player);
        assert_eq!(set, &BTreeSet::from([b]));
    }

    #[test]
    fn test_reattach_preserves_set() {
        let player = PlayerId::generate();
        let id = InstanceId::generate();
        let mut table = PlayerTable::new();
        let mut sink = NullSink;

        table.attach(player).activate(id, &mut sink);
        // Respawn: attach again, set survives
        assert!(table.attach(player).is_activated(id));
    }

    #[test]
    fn test_detach_returns_record() {
        let player = PlayerId::generate();
        let id = InstanceId::generate();
        let mut table = PlayerTable::new();
        let mut sink = NullSink;

        table.attach(player).activate(id, &mut sink);
        let record = table.detach(player).unwrap();
        assert!(record.is_activated(id));
        assert!(table.get(player).is_none());
    }

    #[test]
    fn test_serde_round_trip() {
        let player = PlayerId::generate();
        let mut record = PlayerMissions::new(player);
        let mut sink = NullSink;
        record.activate(InstanceId::generate(), &mut sink);
        record.activate(InstanceId::generate(), &mut sink);

        let encoded = serde_json::to_string(&record).unwrap();
        let decoded: PlayerMissions = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, record);
    }
}
