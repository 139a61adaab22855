//! Outbound sync and reward ports
//!
//! The core does not know how snapshots are transmitted. The host wires a
//! [`SyncSink`] onto its outbound channel; every push is fire-and-forget,
//! best-effort, and never awaited.

use crate::{InstanceId, PlayerId, SharedMission};
use indexmap::IndexMap;
use std::collections::BTreeSet;

/// Full shared-mission table, keyed by instance ID
///
/// Sync is always the whole table, not incremental diffs: the authoritative
/// side is the only writer, so last-write full snapshots are consistent.
pub type SharedTableSnapshot = IndexMap<InstanceId, SharedMission>;

/// Receives sync pushes and reward grants from the stores
pub trait SyncSink {
    /// Push the full shared-mission table to every player in the world
    fn shared_missions(&mut self, snapshot: &SharedTableSnapshot);

    /// Push one player's full activated-instance set to that player
    fn player_activations(&mut self, player: PlayerId, activated: &BTreeSet<InstanceId>);

    /// Grant a completion reward to one player
    fn reward(&mut self, player: PlayerId, instance_id: InstanceId);
}

/// A sink that drops everything, for hosts without a transport
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl SyncSink for NullSink {
    fn shared_missions(&mut self, _snapshot: &SharedTableSnapshot) {}

    fn player_activations(&mut self, _player: PlayerId, _activated: &BTreeSet<InstanceId>) {}

    fn reward(&mut self, _player: PlayerId, _instance_id: InstanceId) {}
}
