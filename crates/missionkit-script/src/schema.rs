//! Mission pack schema

use serde::{Deserialize, Serialize};

/// One mission entry in a pack file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionEntry {
    /// Unique definition ID
    pub id: String,
    /// Display title
    pub title: String,
    /// Progress goal
    pub target: u32,
    /// Whether progress is shared across the world; pack entries default to
    /// personal missions
    #[serde(default)]
    pub shared: bool,
    /// Opaque trigger configuration; must carry a `type` field resolving to
    /// a registered prototype. Absent or unresolvable configs still
    /// register, with the predicate disabled.
    #[serde(default)]
    pub trigger: serde_json::Value,
}

/// Pack file wrapper form: `{"missions": [...]}`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MissionFile {
    pub missions: Vec<MissionEntry>,
}
