//! Mission instance rows.

use missionkit_core::{DefId, InstanceId, Mission};
use native_db::*;
use native_model::{native_model, Model};
use serde::{Deserialize, Serialize};

/// Stored mission instance, one row per live instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 4, version = 1)]
#[native_db]
pub struct StoredMissionInstance {
    /// Primary key - instance ID.
    #[primary_key]
    pub instance_id: String,
    /// Definition this instance was created from.
    #[secondary_key]
    pub definition_id: String,
    /// Title captured at creation time.
    pub title: String,
    /// Whether progress is shared across the world.
    pub shared: bool,
}

impl StoredMissionInstance {
    /// Create from a core Mission.
    pub fn from_mission(mission: &Mission) -> Self {
        Self {
            instance_id: mission.instance_id.to_string(),
            definition_id: mission.definition_id.as_str().to_string(),
            title: mission.title.clone(),
            shared: mission.shared,
        }
    }

    /// Convert to a core Mission. Returns None when the stored key is not a
    /// valid instance ID.
    pub fn to_mission(&self) -> Option<Mission> {
        let instance_id = InstanceId::parse(&self.instance_id)?;
        Some(Mission {
            instance_id,
            definition_id: DefId::new(self.definition_id.clone()),
            title: self.title.clone(),
            shared: self.shared,
        })
    }
}
