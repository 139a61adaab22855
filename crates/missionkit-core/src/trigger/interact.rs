//! Player interaction trigger

use super::{optional_str, MissionTrigger};
use crate::{BlockInfo, GameEvent, Hand, InteractionKind, PlayerId, Result};
use indexmap::IndexMap;
use std::collections::HashMap;

/// Default width of the per-player dedup bucket
const DEFAULT_COOLDOWN_MS: u64 = 200;

/// Which interaction shapes this trigger accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionType {
    LeftClickBlock,
    #[default]
    RightClickBlock,
    RightClickItem,
    AnyInteraction,
}

impl InteractionType {
    fn parse(s: &str) -> Self {
        // Unrecognized values fall back to AnyInteraction
        match s.to_ascii_lowercase().as_str() {
            "left_click_block" => InteractionType::LeftClickBlock,
            "right_click_block" => InteractionType::RightClickBlock,
            "right_click_item" => InteractionType::RightClickItem,
            _ => InteractionType::AnyInteraction,
        }
    }

    fn accepts(&self, kind: InteractionKind) -> bool {
        match self {
            InteractionType::LeftClickBlock => kind == InteractionKind::LeftClickBlock,
            InteractionType::RightClickBlock => kind == InteractionKind::RightClickBlock,
            InteractionType::RightClickItem => kind == InteractionKind::RightClickItem,
            InteractionType::AnyInteraction => true,
        }
    }
}

/// Which hand this trigger accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandType {
    MainHand,
    OffHand,
    #[default]
    EitherHand,
}

impl HandType {
    fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "main_hand" => HandType::MainHand,
            "off_hand" => HandType::OffHand,
            _ => HandType::EitherHand,
        }
    }

    fn accepts(&self, hand: Hand) -> bool {
        match self {
            HandType::MainHand => hand == Hand::Main,
            HandType::OffHand => hand == Hand::Off,
            HandType::EitherHand => true,
        }
    }
}

/// Matches player interaction events, optionally restricted by hand, held
/// item, target block, block tag membership, and block-state pairs
///
/// Interactions fire several host events per click, so repeats are deduped
/// per player with a coarse time bucket: events landing in the same
/// `now_ms / cooldown_ms` bucket are suppressed. This is floor-division
/// bucketing, not a sliding window: two events 1ms apart can land in
/// adjacent buckets and both pass.
#[derive(Debug)]
pub struct PlayerInteractTrigger {
    interaction: InteractionType,
    hand: HandType,
    item: Option<String>,
    block: Option<String>,
    block_tag: Option<String>,
    block_state: Option<IndexMap<String, String>>,
    cooldown_ms: u64,
    // (player, time bucket) -> time of the event that claimed the bucket
    seen_buckets: HashMap<(PlayerId, u64), u64>,
}

impl Default for PlayerInteractTrigger {
    fn default() -> Self {
        Self {
            interaction: InteractionType::default(),
            hand: HandType::default(),
            item: None,
            block: None,
            block_tag: None,
            block_state: None,
            cooldown_ms: DEFAULT_COOLDOWN_MS,
            seen_buckets: HashMap::new(),
        }
    }
}

impl PlayerInteractTrigger {
    fn wants_block(&self) -> bool {
        self.block.is_some() || self.block_tag.is_some() || self.block_state.is_some()
    }

    fn check_block(&self, info: &BlockInfo) -> bool {
        if let Some(required) = &self.block {
            if info.block != *required {
                return false;
            }
        }
        if let Some(tag) = &self.block_tag {
            if !info.tags.iter().any(|t| t == tag) {
                return false;
            }
        }
        if let Some(pairs) = &self.block_state {
            for (property, expected) in pairs {
                match info.state.get(property) {
                    Some(actual) if actual == expected => {}
                    _ => return false,
                }
            }
        }
        true
    }

    /// Claim the player's current time bucket; false if already claimed
    fn claim_bucket(&mut self, player: PlayerId, now_ms: u64) -> bool {
        let bucket = now_ms / self.cooldown_ms.max(1);
        if self.seen_buckets.contains_key(&(player, bucket)) {
            return false;
        }
        self.seen_buckets.insert((player, bucket), now_ms);
        // Drop records older than two windows
        let horizon = self.cooldown_ms * 2;
        self.seen_buckets
            .retain(|_, at| now_ms.saturating_sub(*at) <= horizon);
        true
    }
}

impl MissionTrigger for PlayerInteractTrigger {
    fn create_new_instance(&self) -> Box<dyn MissionTrigger> {
        Box::new(PlayerInteractTrigger::default())
    }

    fn configure(&mut self, config: &serde_json::Value) -> Result<()> {
        if let Some(s) = config.get("interaction_type").and_then(|v| v.as_str()) {
            self.interaction = InteractionType::parse(s);
        }
        if let Some(s) = config.get("hand_type").and_then(|v| v.as_str()) {
            self.hand = HandType::parse(s);
        }
        self.item = optional_str(config, "item");
        self.block = optional_str(config, "block");
        self.block_tag = optional_str(config, "block_tag");
        if let Some(obj) = config.get("block_state").and_then(|v| v.as_object()) {
            let mut pairs = IndexMap::new();
            for (property, value) in obj {
                let Some(value) = value.as_str() else {
                    return Err(crate::Error::InvalidTriggerConfig(format!(
                        "block_state value for '{property}' must be a string"
                    )));
                };
                pairs.insert(property.clone(), value.to_string());
            }
            self.block_state = Some(pairs);
        }
        if let Some(ms) = config.get("cooldown_ms").and_then(|v| v.as_u64()) {
            self.cooldown_ms = ms;
        }
        Ok(())
    }

    fn should_trigger(&mut self, player: PlayerId, event: &GameEvent, now_ms: u64) -> bool {
        let GameEvent::PlayerInteract {
            kind,
            hand,
            held_item,
            block,
            ..
        } = event
        else {
            return false;
        };

        // Dedup runs ahead of every filter
        if !self.claim_bucket(player, now_ms) {
            return false;
        }

        if !self.interaction.accepts(*kind) {
            return false;
        }
        if !self.hand.accepts(*hand) {
            return false;
        }
        if let Some(required) = &self.item {
            if held_item.as_deref() != Some(required.as_str()) {
                return false;
            }
        }
        if self.wants_block() {
            match block {
                Some((_, info)) => {
                    if !self.check_block(info) {
                        return false;
                    }
                }
                None => return false,
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BlockPos;
    use serde_json::json;

    fn interact(player: PlayerId, kind: InteractionKind, hand: Hand) -> GameEvent {
        GameEvent::PlayerInteract {
            player,
            kind,
            hand,
            held_item: None,
            block: None,
        }
    }

    fn interact_with_block(player: PlayerId, info: BlockInfo) -> GameEvent {
        GameEvent::PlayerInteract {
            player,
            kind: InteractionKind::RightClickBlock,
            hand: Hand::Main,
            held_item: None,
            block: Some((BlockPos::new(0, 64, 0), info)),
        }
    }

    #[test]
    fn test_defaults_right_click_block_either_hand() {
        let player = PlayerId::generate();
        let mut trigger = PlayerInteractTrigger::default();
        trigger.configure(&json!({})).unwrap();

        assert!(trigger.should_trigger(
            player,
            &interact(player, InteractionKind::RightClickBlock, Hand::Off),
            0
        ));
        assert!(!trigger.should_trigger(
            player,
            &interact(player, InteractionKind::LeftClickBlock, Hand::Main),
            1_000
        ));
    }

    #[test]
    fn test_unknown_interaction_type_accepts_anything() {
        let player = PlayerId::generate();
        let mut trigger = PlayerInteractTrigger::default();
        trigger
            .configure(&json!({"interaction_type": "sneeze"}))
            .unwrap();

        assert!(trigger.should_trigger(
            player,
            &interact(player, InteractionKind::RightClickItem, Hand::Main),
            0
        ));
    }

    #[test]
    fn test_bucket_dedup_suppresses_same_bucket() {
        let player = PlayerId::generate();
        let mut trigger = PlayerInteractTrigger::default();
        trigger.configure(&json!({})).unwrap();

        let event = interact(player, InteractionKind::RightClickBlock, Hand::Main);
        // 1000 and 1150 share bucket 5 with a 200ms window
        assert!(trigger.should_trigger(player, &event, 1_000));
        assert!(!trigger.should_trigger(player, &event, 1_150));
        // 1250 falls into bucket 6
        assert!(trigger.should_trigger(player, &event, 1_250));
    }

    #[test]
    fn test_bucket_dedup_is_per_player() {
        let a = PlayerId::generate();
        let b = PlayerId::generate();
        let mut trigger = PlayerInteractTrigger::default();
        trigger.configure(&json!({})).unwrap();

        assert!(trigger.should_trigger(
            a,
            &interact(a, InteractionKind::RightClickBlock, Hand::Main),
            1_000
        ));
        assert!(trigger.should_trigger(
            b,
            &interact(b, InteractionKind::RightClickBlock, Hand::Main),
            1_010
        ));
    }

    #[test]
    fn test_held_item_filter() {
        let player = PlayerId::generate();
        let mut trigger = PlayerInteractTrigger::default();
        trigger
            .configure(&json!({
                "interaction_type": "right_click_item",
                "item": "minecraft:flint_and_steel"
            }))
            .unwrap();

        let with_item = GameEvent::PlayerInteract {
            player,
            kind: InteractionKind::RightClickItem,
            hand: Hand::Main,
            held_item: Some("minecraft:flint_and_steel".into()),
            block: None,
        };
        let empty_hand = GameEvent::PlayerInteract {
            player,
            kind: InteractionKind::RightClickItem,
            hand: Hand::Main,
            held_item: None,
            block: None,
        };
        assert!(trigger.should_trigger(player, &with_item, 0));
        assert!(!trigger.should_trigger(player, &empty_hand, 1_000));
    }

    #[test]
    fn test_block_criteria_require_block_payload() {
        let player = PlayerId::generate();
        let mut trigger = PlayerInteractTrigger::default();
        trigger
            .configure(&json!({"block": "minecraft:chest"}))
            .unwrap();

        // No block payload on the event: cannot satisfy a block criterion
        assert!(!trigger.should_trigger(
            player,
            &interact(player, InteractionKind::RightClickBlock, Hand::Main),
            0
        ));
        assert!(trigger.should_trigger(
            player,
            &interact_with_block(player, BlockInfo::new("minecraft:chest")),
            1_000
        ));
    }

    #[test]
    fn test_block_tag_and_state_filters() {
        let player = PlayerId::generate();
        let mut trigger = PlayerInteractTrigger::default();
        trigger
            .configure(&json!({
                "block_tag": "minecraft:doors",
                "block_state": {"open": "true"}
            }))
            .unwrap();

        let matching = BlockInfo::new("minecraft:oak_door")
            .with_tag("minecraft:doors")
            .with_state("open", "true");
        let closed = BlockInfo::new("minecraft:oak_door")
            .with_tag("minecraft:doors")
            .with_state("open", "false");

        assert!(trigger.should_trigger(player, &interact_with_block(player, matching), 0));
        assert!(!trigger.should_trigger(player, &interact_with_block(player, closed), 1_000));
    }

    #[test]
    fn test_non_string_block_state_fails_configure() {
        let mut trigger = PlayerInteractTrigger::default();
        let result = trigger.configure(&json!({"block_state": {"open": true}}));
        assert!(result.is_err());
    }
}
