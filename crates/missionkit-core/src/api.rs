//! Synchronous admin and integration surface
//!
//! Thin facade over the stores for command handlers and host integrations.
//! Command-line parsing and permission checks live with the host; these
//! calls assume the caller is already on the world's authoritative thread.

use crate::port::SyncSink;
use crate::{
    DefId, Error, InstanceId, InstanceStore, Mission, MissionRegistry, PlayerId, PlayerTable,
    Result, WorldMissions,
};

/// Register a mission definition programmatically
///
/// `shared` is explicit on purpose: pack files default it to false, and a
/// silent API-side default is how the two entry points drift apart.
pub fn register_mission(
    registry: &mut MissionRegistry,
    id: impl Into<DefId>,
    title: impl Into<String>,
    target: u32,
    shared: bool,
    trigger_config: serde_json::Value,
) {
    registry.register_definition(id.into(), title, target, shared, trigger_config);
}

/// Create a personal instance of a definition and activate it for a player
///
/// The player record is attached if it does not exist yet; the new
/// activated set is pushed to the player immediately.
pub fn assign_to_player(
    registry: &MissionRegistry,
    instances: &InstanceStore,
    players: &mut PlayerTable,
    player: PlayerId,
    definition_id: &DefId,
    sink: &mut dyn SyncSink,
) -> Result<InstanceId> {
    let instance_id = instances.create(registry, definition_id, false)?;
    players.attach(player).activate(instance_id, sink);
    Ok(instance_id)
}

/// Create a shared instance of a definition and activate it in a world
///
/// The progress target is taken from the definition.
pub fn activate_shared(
    registry: &MissionRegistry,
    instances: &InstanceStore,
    world: &mut WorldMissions,
    definition_id: &DefId,
) -> Result<InstanceId> {
    let Some(definition) = registry.get(definition_id) else {
        return Err(Error::UnknownDefinition(definition_id.clone()));
    };
    let target = definition.target();
    let instance_id = instances.create(registry, definition_id, true)?;
    world.activate(instance_id, target);
    Ok(instance_id)
}

/// Admin removal of a shared mission: deletes the progress row and the
/// instance outright
pub fn remove_shared(
    world: &mut WorldMissions,
    instances: &InstanceStore,
    instance_id: InstanceId,
) {
    world.remove(instance_id);
    instances.remove(instance_id);
}

/// Add explicit progress to a shared mission (admin command path)
pub fn add_progress(
    world: &mut WorldMissions,
    instance_id: InstanceId,
    amount: u32,
    sink: &mut dyn SyncSink,
) {
    world.update_progress(instance_id, amount, sink);
}

/// Activate an existing instance for a named player
pub fn activate_for_player(
    players: &mut PlayerTable,
    player: PlayerId,
    instance_id: InstanceId,
    sink: &mut dyn SyncSink,
) {
    players.attach(player).activate(instance_id, sink);
}

/// Deactivate an instance for a named player
pub fn deactivate_for_player(
    players: &mut PlayerTable,
    player: PlayerId,
    instance_id: InstanceId,
    sink: &mut dyn SyncSink,
) {
    if let Some(record) = players.get_mut(player) {
        record.deactivate(instance_id, sink);
    }
}

/// Resolve a player's activated instances to mission records
///
/// Dangling instance IDs are skipped: an activation whose mission was
/// removed resolves to nothing rather than an error.
pub fn player_missions(
    instances: &InstanceStore,
    players: &PlayerTable,
    player: PlayerId,
) -> Vec<Mission> {
    let Some(record) = players.get(player) else {
        return Vec::new();
    };
    record
        .activated_set()
        .iter()
        .filter_map(|&id| instances.get(id))
        .collect()
}

/// Check whether a mission instance is completed
///
/// Personal missions have no progress store and always report false.
pub fn is_completed(
    world: &WorldMissions,
    instances: &InstanceStore,
    instance_id: InstanceId,
) -> bool {
    match instances.get(instance_id) {
        Some(mission) if mission.shared => world
            .get(instance_id)
            .map(|m| m.completed)
            .unwrap_or(false),
        _ => false,
    }
}

/// Current progress of a shared mission, zero if unknown
pub fn shared_progress(world: &WorldMissions, instance_id: InstanceId) -> u32 {
    world.get(instance_id).map(|m| m.progress).unwrap_or(0)
}

/// Target of a shared mission, zero if unknown
pub fn mission_target(world: &WorldMissions, instance_id: InstanceId) -> u32 {
    world.get(instance_id).map(|m| m.target).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::NullSink;
    use serde_json::json;

    fn registry() -> MissionRegistry {
        let mut registry = MissionRegistry::with_builtin_triggers();
        registry.register_definition(
            DefId::new("break_stone"),
            "Break stone",
            3,
            true,
            json!({"type": "block_break", "block": "minecraft:stone"}),
        );
        registry
    }

    #[test]
    fn test_assign_to_player_creates_personal_instance() {
        let registry = registry();
        let instances = InstanceStore::new();
        let mut players = PlayerTable::new();
        let mut sink = NullSink;
        let player = PlayerId::generate();

        let id = assign_to_player(
            &registry,
            &instances,
            &mut players,
            player,
            &DefId::new("break_stone"),
            &mut sink,
        )
        .unwrap();

        let mission = instances.get(id).unwrap();
        assert!(!mission.shared);
        assert!(players.get(player).unwrap().is_activated(id));
    }

    #[test]
    fn test_assign_unknown_definition_fails() {
        let registry = MissionRegistry::with_builtin_triggers();
        let instances = InstanceStore::new();
        let mut players = PlayerTable::new();
        let mut sink = NullSink;

        let result = assign_to_player(
            &registry,
            &instances,
            &mut players,
            PlayerId::generate(),
            &DefId::new("missing"),
            &mut sink,
        );
        assert!(matches!(result, Err(Error::UnknownDefinition(_))));
    }

    #[test]
    fn test_activate_shared_uses_definition_target() {
        let registry = registry();
        let instances = InstanceStore::new();
        let mut world = WorldMissions::new();

        let id =
            activate_shared(&registry, &instances, &mut world, &DefId::new("break_stone")).unwrap();
        assert_eq!(mission_target(&world, id), 3);
        assert_eq!(shared_progress(&world, id), 0);
    }

    #[test]
    fn test_remove_shared_deletes_both_rows() {
        let registry = registry();
        let instances = InstanceStore::new();
        let mut world = WorldMissions::new();

        let id =
            activate_shared(&registry, &instances, &mut world, &DefId::new("break_stone")).unwrap();
        remove_shared(&mut world, &instances, id);
        assert!(world.get(id).is_none());
        assert!(instances.get(id).is_none());
    }

    #[test]
    fn test_add_progress_and_completion() {
        let registry = registry();
        let instances = InstanceStore::new();
        let mut world = WorldMissions::new();
        let mut sink = NullSink;

        let id =
            activate_shared(&registry, &instances, &mut world, &DefId::new("break_stone")).unwrap();
        add_progress(&mut world, id, 2, &mut sink);
        assert!(!is_completed(&world, &instances, id));
        add_progress(&mut world, id, 1, &mut sink);
        assert!(is_completed(&world, &instances, id));
    }

    #[test]
    fn test_player_missions_skips_dangling() {
        let registry = registry();
        let instances = InstanceStore::new();
        let mut players = PlayerTable::new();
        let mut sink = NullSink;
        let player = PlayerId::generate();

        let kept = assign_to_player(
            &registry,
            &instances,
            &mut players,
            player,
            &DefId::new("break_stone"),
            &mut sink,
        )
        .unwrap();
        let removed = assign_to_player(
            &registry,
            &instances,
            &mut players,
            player,
            &DefId::new("break_stone"),
            &mut sink,
        )
        .unwrap();
        instances.remove(removed);

        let missions = player_missions(&instances, &players, player);
        assert_eq!(missions.len(), 1);
        assert_eq!(missions[0].instance_id, kept);
    }
}
