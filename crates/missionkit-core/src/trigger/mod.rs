//! Trigger predicates that decide when a mission advances
//!
//! Triggers follow a prototype pattern: the registry holds one unconfigured
//! prototype per type name, and each mission definition gets its own
//! independently configured clone. Configuration mutates instance fields
//! (matching criteria, debounce state), so instances are never shared
//! across missions.
//!
//! A trigger must filter by event variant itself: handed an event of the
//! wrong shape it returns `false`, never an error.

mod block_break;
mod block_state;
mod entity_kill;
mod interact;

pub use block_break::BlockBreakTrigger;
pub use block_state::BlockStateChangeTrigger;
pub use entity_kill::EntityKillTrigger;
pub use interact::{HandType, InteractionType, PlayerInteractTrigger};

use crate::{GameEvent, PlayerId, Result};

/// A configured rule that inspects a game event and decides whether it
/// advances a mission
///
/// `should_trigger` takes `&mut self` because some variants keep debounce
/// state (per-position cooldowns, per-player time buckets). `now_ms` is the
/// host's millisecond clock, passed in so evaluation never reads wall time
/// itself.
pub trait MissionTrigger: Send + Sync {
    /// Produce a fresh, unconfigured instance of this trigger type
    fn create_new_instance(&self) -> Box<dyn MissionTrigger>;

    /// Parse a configuration record into matching criteria
    ///
    /// Fails when a required field is absent. A failed configure leaves the
    /// owning definition without a bound trigger: the mission stays
    /// registered but never matches.
    fn configure(&mut self, config: &serde_json::Value) -> Result<()>;

    /// Decide whether this event advances the mission for `player`
    fn should_trigger(&mut self, player: PlayerId, event: &GameEvent, now_ms: u64) -> bool;
}

/// Read a required string field from a trigger config
pub(crate) fn require_str<'a>(
    config: &'a serde_json::Value,
    field: &str,
    trigger: &str,
) -> Result<&'a str> {
    config.get(field).and_then(|v| v.as_str()).ok_or_else(|| {
        crate::Error::InvalidTriggerConfig(format!("{trigger} requires a '{field}' field"))
    })
}

/// Read an optional string field from a trigger config
pub(crate) fn optional_str(config: &serde_json::Value, field: &str) -> Option<String> {
    config
        .get(field)
        .and_then(|v| v.as_str())
        .map(str::to_string)
}
