//! Block state change trigger

use super::{optional_str, require_str, MissionTrigger};
use crate::{BlockPos, GameEvent, PlayerId, Result};
use std::collections::HashMap;

/// Default debounce window for repeated notifications at one position
const DEFAULT_COOLDOWN_MS: u64 = 100;

/// Matches a "neighbor notify / state change" event for a configured block,
/// optionally restricted to a state property and expected value
///
/// Neighbor notifications arrive in bursts for a single logical change, so
/// a per-position cooldown suppresses duplicates within the window. This is
/// a debounce, not a correctness gate.
#[derive(Debug)]
pub struct BlockStateChangeTrigger {
    block: Option<String>,
    property: Option<String>,
    value: Option<String>,
    cooldown_ms: u64,
    // Last accepted time per position
    last_seen: HashMap<BlockPos, u64>,
}

impl Default for BlockStateChangeTrigger {
    fn default() -> Self {
        Self {
            block: None,
            property: None,
            value: None,
            cooldown_ms: DEFAULT_COOLDOWN_MS,
            last_seen: HashMap::new(),
        }
    }
}

impl MissionTrigger for BlockStateChangeTrigger {
    fn create_new_instance(&self) -> Box<dyn MissionTrigger> {
        Box::new(BlockStateChangeTrigger::default())
    }

    fn configure(&mut self, config: &serde_json::Value) -> Result<()> {
        self.block = Some(require_str(config, "block", "block_state_change")?.to_string());
        self.property = optional_str(config, "property");
        self.value = optional_str(config, "value");
        if let Some(ms) = config.get("cooldown_ms").and_then(|v| v.as_u64()) {
            self.cooldown_ms = ms;
        }
        Ok(())
    }

    fn should_trigger(&mut self, _player: PlayerId, event: &GameEvent, now_ms: u64) -> bool {
        let Some(required) = &self.block else {
            return false;
        };
        let GameEvent::BlockStateChange { pos, block, .. } = event else {
            return false;
        };
        if block.block != *required {
            return false;
        }

        // Debounce before the property filter: a non-matching update still
        // arms the cooldown for its position.
        if let Some(last) = self.last_seen.get(pos) {
            if now_ms.saturating_sub(*last) < self.cooldown_ms {
                return false;
            }
        }
        self.last_seen.insert(*pos, now_ms);

        let Some(property) = &self.property else {
            return true;
        };
        let Some(current) = block.state.get(property) else {
            return false;
        };
        match &self.value {
            Some(expected) => current == expected,
            None => true,
        }
    }
}
