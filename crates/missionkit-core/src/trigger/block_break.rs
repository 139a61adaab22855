//! Block break trigger

use super::{require_str, MissionTrigger};
use crate::{GameEvent, PlayerId, Result};

/// Matches a "block broken" event against one configured block identity
#[derive(Debug, Default)]
pub struct BlockBreakTrigger {
    block: Option<String>,
}

impl MissionTrigger for BlockBreakTrigger {
    fn create_new_instance(&self) -> Box<dyn MissionTrigger> {
        Box::new(BlockBreakTrigger::default())
    }

    fn configure(&mut self, config: &serde_json::Value) -> Result<()> {
        self.block = Some(require_str(config, "block", "block_break")?.to_string());
        Ok(())
    }

    fn should_trigger(&mut self, _player: PlayerId, event: &GameEvent, _now_ms: u64) -> bool {
        let Some(required) = &self.block else {
            return false;
        };
        matches!(event, GameEvent::BlockBreak { block, .. } if block == required)
    }
}
