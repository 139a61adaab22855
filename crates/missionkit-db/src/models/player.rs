//! Per-player save rows.

use missionkit_core::{InstanceId, PlayerId, PlayerMissions};
use native_db::*;
use native_model::{native_model, Model};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Stored per-player activation set, one row per player.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 3, version = 1)]
#[native_db]
pub struct StoredPlayerMissions {
    /// Primary key - player ID.
    #[primary_key]
    pub player_id: String,
    /// Activated mission instance IDs.
    pub activated: Vec<String>,
}

impl StoredPlayerMissions {
    /// Create from a core player record.
    pub fn from_record(record: &PlayerMissions) -> Self {
        Self {
            player_id: record.player().0.to_string(),
            activated: record
                .activated_set()
                .iter()
                .map(|id| id.to_string())
                .collect(),
        }
    }

    /// Convert to a core player record. Returns None when the stored key is
    /// not a valid player ID; unparseable instance entries are dropped.
    pub fn to_record(&self) -> Option<PlayerMissions> {
        let player = PlayerId::parse(&self.player_id)?;
        let activated: BTreeSet<InstanceId> = self
            .activated
            .iter()
            .filter_map(|id| InstanceId::parse(id))
            .collect();
        Some(PlayerMissions::restore(player, activated))
    }
}
