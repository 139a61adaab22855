//! Event dispatch and progress engine
//!
//! Fans each incoming game event out to every activated instance owned by
//! the event's originating player, resolves each instance's predicate, and
//! routes progress deltas to the right store. Fully synchronous: each event
//! is resolved to completion before the next is accepted, with no batching.

use crate::port::SyncSink;
use crate::{
    GameEvent, InstanceStore, Mission, MissionRegistry, PlayerId, PlayerTable, WorldMissions,
};
use tracing::debug;

/// Dispatch one game event against a world
///
/// Resolution misses (instance removed mid-session, definition gone after a
/// reload, trigger that failed to configure) are skipped silently: dangling
/// references are tolerated, and logging them per-event would flood.
pub fn dispatch(
    registry: &MissionRegistry,
    instances: &InstanceStore,
    world: &mut WorldMissions,
    players: &PlayerTable,
    event: &GameEvent,
    now_ms: u64,
    sink: &mut dyn SyncSink,
) {
    let player = event.player();
    let Some(record) = players.get(player) else {
        return;
    };

    for &instance_id in record.activated_set() {
        let Some(mission) = instances.get(instance_id) else {
            continue;
        };
        let Some(definition) = registry.get(&mission.definition_id) else {
            continue;
        };
        if !definition.fires(player, event, now_ms) {
            continue;
        }

        if mission.shared {
            debug!(player = %player, instance = %instance_id, "event advanced shared mission");
            world.update_progress(instance_id, 1, sink);
        } else {
            debug!(player = %player, instance = %instance_id, "event matched personal mission");
            on_personal_progress(player, &mission);
        }
    }
}

/// Routing point for personal (non-shared) mission progress
///
/// Personal progress tracking is not implemented: activation is the only
/// per-player mission state today. Matches land here so a personal progress
/// store can be wired in without touching the dispatch path.
fn on_personal_progress(_player: PlayerId, _mission: &Mission) {}
