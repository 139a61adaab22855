//! Mission definition registry and trigger prototype registry

use crate::trigger::{
    BlockBreakTrigger, BlockStateChangeTrigger, EntityKillTrigger, MissionTrigger,
    PlayerInteractTrigger,
};
use crate::{DefId, MissionDefinition};
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Immutable catalog of mission templates plus the trigger prototype
/// sub-registry
///
/// Read-mostly after load-time construction: worlds read it concurrently,
/// mutation happens only through `&mut self` during registration and
/// reload. Definitions are `Arc`-wrapped so a caller can hold one across a
/// reload without dangling.
#[derive(Default)]
pub struct MissionRegistry {
    missions: IndexMap<DefId, Arc<MissionDefinition>>,
    prototypes: IndexMap<String, Box<dyn MissionTrigger>>,
}

impl MissionRegistry {
    /// Create an empty registry with no trigger prototypes
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the four built-in trigger prototypes
    ///
    /// Called at process start, before any pack is parsed.
    pub fn with_builtin_triggers() -> Self {
        let mut registry = Self::new();
        registry.register_trigger_prototype("block_break", Box::new(BlockBreakTrigger::default()));
        registry.register_trigger_prototype("entity_kill", Box::new(EntityKillTrigger::default()));
        registry.register_trigger_prototype(
            "block_state_change",
            Box::new(BlockStateChangeTrigger::default()),
        );
        registry.register_trigger_prototype(
            "player_interact",
            Box::new(PlayerInteractTrigger::default()),
        );
        info!(count = registry.prototypes.len(), "registered built-in trigger prototypes");
        registry
    }

    /// Register a trigger prototype under a type name
    pub fn register_trigger_prototype(&mut self, name: impl Into<String>, trigger: Box<dyn MissionTrigger>) {
        let name = name.into();
        debug!(trigger = %name, "registered trigger prototype");
        self.prototypes.insert(name, trigger);
    }

    /// Look up a trigger prototype by type name
    pub fn trigger_prototype(&self, name: &str) -> Option<&dyn MissionTrigger> {
        self.prototypes.get(name).map(Box::as_ref)
    }

    /// Build and register a definition, binding its trigger from the
    /// prototype registry
    ///
    /// A missing `type` field, an unknown type name, or a configure failure
    /// leaves the definition registered with no trigger: the mission never
    /// matches, which is a warning, not a load failure.
    pub fn register_definition(
        &mut self,
        id: DefId,
        title: impl Into<String>,
        target: u32,
        shared: bool,
        trigger_config: serde_json::Value,
    ) {
        let trigger = self.bind_trigger(&id, &trigger_config);
        let definition = MissionDefinition::new(id.clone(), title, target, shared, trigger_config, trigger);
        debug!(mission = %id, "registered mission");
        self.missions.insert(id, Arc::new(definition));
    }

    fn bind_trigger(
        &self,
        id: &DefId,
        config: &serde_json::Value,
    ) -> Option<Box<dyn MissionTrigger>> {
        let Some(type_name) = config.get("type").and_then(|v| v.as_str()) else {
            warn!(mission = %id, "trigger config has no 'type' field; mission will never match");
            return None;
        };
        let Some(prototype) = self.prototypes.get(type_name) else {
            warn!(mission = %id, trigger = type_name, "unknown trigger type; mission will never match");
            return None;
        };
        let mut instance = prototype.create_new_instance();
        match instance.configure(config) {
            Ok(()) => Some(instance),
            Err(error) => {
                warn!(mission = %id, trigger = type_name, %error, "trigger configuration failed; mission will never match");
                None
            }
        }
    }

    /// Look up a definition by ID
    pub fn get(&self, id: &DefId) -> Option<&Arc<MissionDefinition>> {
        self.missions.get(id)
    }

    /// Iterate all registered definitions
    pub fn all(&self) -> impl Iterator<Item = &Arc<MissionDefinition>> {
        self.missions.values()
    }

    /// Number of registered definitions
    pub fn len(&self) -> usize {
        self.missions.len()
    }

    /// Check if no definitions are registered
    pub fn is_empty(&self) -> bool {
        self.missions.is_empty()
    }

    /// Drop every definition
    ///
    /// Used only at the start of a full pack reload. Trigger prototypes
    /// survive; they are registered once at process start.
    pub fn clear(&mut self) {
        info!(dropped = self.missions.len(), "cleared mission registry");
        self.missions.clear();
    }
}

impl std::fmt::Debug for MissionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MissionRegistry")
            .field("missions", &self.missions.len())
            .field("prototypes", &self.prototypes.keys().collect::<Vec<_>>())
            .finish()
    }
}
