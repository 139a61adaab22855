//! Database store wrapper.

use crate::error::{Error, Result};
use crate::models::*;
use missionkit_core::{InstanceStore, PlayerId, PlayerMissions, SharedMission, WorldMissions};
use native_db::*;
use std::path::Path;
use std::sync::LazyLock;

// Static models for the database
static MODELS: LazyLock<Models> = LazyLock::new(|| {
    let mut models = Models::new();
    models.define::<StoredSharedMission>().unwrap();
    models.define::<StoredIntentTable>().unwrap();
    models.define::<StoredPlayerMissions>().unwrap();
    models.define::<StoredMissionInstance>().unwrap();
    models
});

/// Database store for persistent mission state.
pub struct Store {
    pub(crate) db: Database<'static>,
}

impl Store {
    /// Open or create a database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = Builder::new()
            .create(&MODELS, path.as_ref())
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(Self { db })
    }

    /// Create an in-memory database.
    pub fn in_memory() -> Result<Self> {
        let db = Builder::new()
            .create_in_memory(&MODELS)
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(Self { db })
    }

    fn all_shared(&self) -> Result<Vec<StoredSharedMission>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().primary::<StoredSharedMission>()?;
        let iter = scan.all()?;
        let rows: std::result::Result<Vec<StoredSharedMission>, _> = iter.collect();
        rows.map_err(|e| Error::Database(e.to_string()))
    }

    fn all_players(&self) -> Result<Vec<StoredPlayerMissions>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().primary::<StoredPlayerMissions>()?;
        let iter = scan.all()?;
        let rows: std::result::Result<Vec<StoredPlayerMissions>, _> = iter.collect();
        rows.map_err(|e| Error::Database(e.to_string()))
    }

    fn all_instances(&self) -> Result<Vec<StoredMissionInstance>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().primary::<StoredMissionInstance>()?;
        let iter = scan.all()?;
        let rows: std::result::Result<Vec<StoredMissionInstance>, _> = iter.collect();
        rows.map_err(|e| Error::Database(e.to_string()))
    }

    /// Save the world's shared missions and intent table, replacing what
    /// was stored before so removed missions do not resurrect on load.
    pub fn save_world(&self, world: &WorldMissions) -> Result<()> {
        // Collect stale keys first, then replace in a single transaction
        let stale = self.all_shared()?;

        let rw = self.db.rw_transaction()?;
        for row in stale {
            if let Some(existing) = rw.get().primary::<StoredSharedMission>(row.instance_id)? {
                rw.remove(existing)?;
            }
        }
        for mission in world.iter() {
            rw.upsert(StoredSharedMission::from_mission(mission))?;
        }
        rw.upsert(StoredIntentTable::from_intents(world.intents()))?;
        rw.commit()?;
        Ok(())
    }

    /// Load the world's shared missions and intent table.
    pub fn load_world(&self) -> Result<WorldMissions> {
        let shared: Vec<SharedMission> = self
            .all_shared()?
            .iter()
            .filter_map(StoredSharedMission::to_mission)
            .collect();

        let r = self.db.r_transaction()?;
        let intents: Option<StoredIntentTable> = r.get().primary("intents".to_string())?;
        let intents = intents.map(|t| t.to_intents()).unwrap_or_default();

        Ok(WorldMissions::restore(shared, intents))
    }

    /// Save one player's activation record.
    pub fn save_player(&self, record: &PlayerMissions) -> Result<()> {
        let rw = self.db.rw_transaction()?;
        rw.upsert(StoredPlayerMissions::from_record(record))?;
        rw.commit()?;
        Ok(())
    }

    /// Load one player's activation record.
    pub fn load_player(&self, player: PlayerId) -> Result<Option<PlayerMissions>> {
        let r = self.db.r_transaction()?;
        let stored: Option<StoredPlayerMissions> = r.get().primary(player.0.to_string())?;
        Ok(stored.and_then(|s| s.to_record()))
    }

    /// Delete one player's activation record.
    pub fn delete_player(&self, player: PlayerId) -> Result<()> {
        let rw = self.db.rw_transaction()?;
        let stored: Option<StoredPlayerMissions> = rw.get().primary(player.0.to_string())?;
        if let Some(s) = stored {
            rw.remove(s)?;
        }
        rw.commit()?;
        Ok(())
    }

    /// Save the instance table, replacing what was stored before.
    pub fn save_instances(&self, instances: &InstanceStore) -> Result<()> {
        let stale = self.all_instances()?;

        let rw = self.db.rw_transaction()?;
        for row in stale {
            if let Some(existing) = rw.get().primary::<StoredMissionInstance>(row.instance_id)? {
                rw.remove(existing)?;
            }
        }
        for mission in instances.snapshot() {
            rw.upsert(StoredMissionInstance::from_mission(&mission))?;
        }
        rw.commit()?;
        Ok(())
    }

    /// Rebuild an instance table from stored rows.
    pub fn load_instances(&self, instances: &InstanceStore) -> Result<()> {
        let missions = self
            .all_instances()?
            .iter()
            .filter_map(StoredMissionInstance::to_mission)
            .collect();
        instances.restore(missions);
        Ok(())
    }

    /// Clear all data.
    pub fn clear(&self) -> Result<()> {
        let shared = self.all_shared()?;
        let players = self.all_players()?;
        let instances = self.all_instances()?;

        let rw = self.db.rw_transaction()?;
        for row in shared {
            if let Some(item) = rw.get().primary::<StoredSharedMission>(row.instance_id)? {
                rw.remove(item)?;
            }
        }
        for row in players {
            if let Some(item) = rw.get().primary::<StoredPlayerMissions>(row.player_id)? {
                rw.remove(item)?;
            }
        }
        for row in instances {
            if let Some(item) = rw.get().primary::<StoredMissionInstance>(row.instance_id)? {
                rw.remove(item)?;
            }
        }
        if let Some(intents) = rw.get().primary::<StoredIntentTable>("intents".to_string())? {
            rw.remove(intents)?;
        }
        rw.commit()?;
        Ok(())
    }
}

impl From<native_db::db_type::Error> for Error {
    fn from(err: native_db::db_type::Error) -> Self {
        Error::Database(err.to_string())
    }
}
