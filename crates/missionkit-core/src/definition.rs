//! Mission definition templates

use crate::trigger::MissionTrigger;
use crate::{DefId, GameEvent, PlayerId};
use std::sync::Mutex;

/// An immutable mission template
///
/// Built in bulk during a pack load and never mutated afterwards. The
/// trigger is bound once at construction from the prototype registry; a
/// definition whose configuration failed keeps `trigger: None` and is
/// registered anyway — it simply never matches any event.
///
/// The bound trigger sits behind a `Mutex` because definitions are shared
/// read-only across worlds while trigger debounce state mutates during
/// evaluation.
pub struct MissionDefinition {
    id: DefId,
    title: String,
    target: u32,
    shared: bool,
    trigger_config: serde_json::Value,
    trigger: Option<Mutex<Box<dyn MissionTrigger>>>,
}

impl MissionDefinition {
    /// Assemble a definition with an already-bound trigger
    pub(crate) fn new(
        id: DefId,
        title: impl Into<String>,
        target: u32,
        shared: bool,
        trigger_config: serde_json::Value,
        trigger: Option<Box<dyn MissionTrigger>>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            target,
            shared,
            trigger_config,
            trigger: trigger.map(Mutex::new),
        }
    }

    pub fn id(&self) -> &DefId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn shared(&self) -> bool {
        self.shared
    }

    /// The raw configuration record this definition was built from
    pub fn trigger_config(&self) -> &serde_json::Value {
        &self.trigger_config
    }

    /// Whether a trigger was successfully bound at load time
    pub fn has_trigger(&self) -> bool {
        self.trigger.is_some()
    }

    /// Evaluate the bound trigger against an event
    ///
    /// A definition without a bound trigger never fires.
    pub fn fires(&self, player: PlayerId, event: &GameEvent, now_ms: u64) -> bool {
        let Some(trigger) = &self.trigger else {
            return false;
        };
        let mut guard = trigger.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.should_trigger(player, event, now_ms)
    }
}

impl std::fmt::Debug for MissionDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MissionDefinition")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("target", &self.target)
            .field("shared", &self.shared)
            .field("has_trigger", &self.trigger.is_some())
            .finish()
    }
}
