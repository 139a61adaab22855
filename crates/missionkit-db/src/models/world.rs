//! World-scoped rows: shared mission progress and the reward intent table.

use indexmap::IndexMap;
use missionkit_core::{InstanceId, PlayerId, SharedMission};
use native_db::*;
use native_model::{native_model, Model};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Stored shared mission progress, one row per shared mission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 1, version = 1)]
#[native_db]
pub struct StoredSharedMission {
    /// Primary key - mission instance ID.
    #[primary_key]
    pub instance_id: String,
    /// Current progress.
    pub progress: u32,
    /// Progress goal, fixed at activation.
    pub target: u32,
    /// Whether the mission has completed.
    pub completed: bool,
}

impl StoredSharedMission {
    /// Create from a core SharedMission.
    pub fn from_mission(mission: &SharedMission) -> Self {
        Self {
            instance_id: mission.instance_id.to_string(),
            progress: mission.progress,
            target: mission.target,
            completed: mission.completed,
        }
    }

    /// Convert to a core SharedMission. Returns None when the stored key is
    /// not a valid instance ID.
    pub fn to_mission(&self) -> Option<SharedMission> {
        let instance_id = InstanceId::parse(&self.instance_id)?;
        Some(SharedMission {
            instance_id,
            progress: self.progress,
            target: self.target,
            completed: self.completed,
        })
    }
}

/// Stored reward intent table - single row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 2, version = 1)]
#[native_db]
pub struct StoredIntentTable {
    /// Always "intents" - single row.
    #[primary_key]
    pub id: String,
    /// Serialized player -> instance set map.
    pub data: Vec<u8>,
}

impl StoredIntentTable {
    /// Create from an intent map.
    pub fn from_intents(intents: &IndexMap<PlayerId, BTreeSet<InstanceId>>) -> Self {
        let data = bincode::serialize(intents).unwrap_or_default();
        Self {
            id: "intents".to_string(),
            data,
        }
    }

    /// Convert to an intent map.
    pub fn to_intents(&self) -> IndexMap<PlayerId, BTreeSet<InstanceId>> {
        bincode::deserialize(&self.data).unwrap_or_default()
    }
}
