//! Entity kill trigger

use super::{require_str, MissionTrigger};
use crate::{GameEvent, PlayerId, Result};

/// Matches a "living entity death" event attributed to the subject player,
/// comparing the victim's entity-type identity
#[derive(Debug, Default)]
pub struct EntityKillTrigger {
    entity: Option<String>,
}

impl MissionTrigger for EntityKillTrigger {
    fn create_new_instance(&self) -> Box<dyn MissionTrigger> {
        Box::new(EntityKillTrigger::default())
    }

    fn configure(&mut self, config: &serde_json::Value) -> Result<()> {
        self.entity = Some(require_str(config, "entity", "entity_kill")?.to_string());
        Ok(())
    }

    fn should_trigger(&mut self, player: PlayerId, event: &GameEvent, _now_ms: u64) -> bool {
        let Some(required) = &self.entity else {
            return false;
        };
        match event {
            GameEvent::EntityKill { entity, killer, .. } => {
                *killer == Some(player) && entity == required
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_matches_only_attributed_kills() {
        let player = PlayerId::generate();
        let other = PlayerId::generate();
        let mut trigger = EntityKillTrigger::default();
        trigger.configure(&json!({"entity": "minecraft:zombie"})).unwrap();

        let kill = |killer: Option<PlayerId>| GameEvent::EntityKill {
            player,
            entity: "minecraft:zombie".into(),
            killer,
        };

        assert!(trigger.should_trigger(player, &kill(Some(player)), 0));
        assert!(!trigger.should_trigger(player, &kill(Some(other)), 0));
        assert!(!trigger.should_trigger(player, &kill(None), 0));
    }

    #[test]
    fn test_entity_type_must_match() {
        let player = PlayerId::generate();
        let mut trigger = EntityKillTrigger::default();
        trigger.configure(&json!({"entity": "minecraft:zombie"})).unwrap();

        let kill = GameEvent::EntityKill {
            player,
            entity: "minecraft:skeleton".into(),
            killer: Some(player),
        };
        assert!(!trigger.should_trigger(player, &kill, 0));
    }

    #[test]
    fn test_entity_field_is_required() {
        let mut trigger = EntityKillTrigger::default();
        assert!(trigger.configure(&json!({"type": "entity_kill"})).is_err());
    }
}
