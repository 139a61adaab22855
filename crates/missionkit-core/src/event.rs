//! Abstract game events consumed by the dispatch engine
//!
//! The core never talks to the host engine directly. The host translates
//! its native events into `GameEvent` values: a discriminant tag, the
//! originating player, and a variant-specific payload. Block state is
//! captured as a snapshot at event time because the core has no live world
//! to query.

use crate::PlayerId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A block coordinate in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    /// Create a new position
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// Which hand a player used for an interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hand {
    Main,
    Off,
}

/// The shape of a player interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionKind {
    LeftClickBlock,
    RightClickBlock,
    RightClickItem,
}

/// Snapshot of a block's identity, state properties, and tag membership
///
/// Captured by the host when the event is produced.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BlockInfo {
    /// Block identity (e.g. "minecraft:stone")
    pub block: String,
    /// State properties as name -> value strings (e.g. "powered" -> "true")
    #[serde(default)]
    pub state: IndexMap<String, String>,
    /// Tags this block belongs to
    #[serde(default)]
    pub tags: Vec<String>,
}

impl BlockInfo {
    /// Create a snapshot with just a block identity
    pub fn new(block: impl Into<String>) -> Self {
        Self {
            block: block.into(),
            state: IndexMap::new(),
            tags: Vec::new(),
        }
    }

    /// Add a state property
    pub fn with_state(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.state.insert(name.into(), value.into());
        self
    }

    /// Add a tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// An abstract game event tagged with its originating player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A block was broken by a player
    BlockBreak {
        player: PlayerId,
        block: String,
        pos: BlockPos,
    },
    /// A living entity died
    EntityKill {
        player: PlayerId,
        /// Entity type identity of the victim (e.g. "minecraft:zombie")
        entity: String,
        /// The actor the death is attributed to, if any
        killer: Option<PlayerId>,
    },
    /// A block's state changed (neighbor notify)
    BlockStateChange {
        player: PlayerId,
        pos: BlockPos,
        block: BlockInfo,
    },
    /// A player interacted with a block or item
    PlayerInteract {
        player: PlayerId,
        kind: InteractionKind,
        hand: Hand,
        /// Item identity held in the interacting hand, if any
        held_item: Option<String>,
        /// Target block, when the interaction has one
        block: Option<(BlockPos, BlockInfo)>,
    },
}

impl GameEvent {
    /// The player this event originated from, used for fan-out
    pub fn player(&self) -> PlayerId {
        match self {
            GameEvent::BlockBreak { player, .. }
            | GameEvent::EntityKill { player, .. }
            | GameEvent::BlockStateChange { player, .. }
            | GameEvent::PlayerInteract { player, .. } => *player,
        }
    }
}
