//! Missionkit DB - Persistence layer using native_db
//!
//! Provides persistent storage for:
//! - Per-world shared mission progress and the reward intent table
//! - Per-player activation records
//! - The process-global mission instance table

mod error;
mod models;
mod store;

pub use error::{Error, Result};
pub use models::{
    StoredIntentTable, StoredMissionInstance, StoredPlayerMissions, StoredSharedMission,
};
pub use store::Store;
