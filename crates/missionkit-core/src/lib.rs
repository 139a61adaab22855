//! Missionkit Core - Mission tracking engine
//!
//! This crate provides the authoritative state and evaluation core for a
//! mission-tracking layer hosted inside a game engine:
//! - Identity types for definitions, instances, and players
//! - Abstract game events (`GameEvent`) delivered by the host
//! - Trigger predicates with prototype-based, config-driven construction
//! - The mission definition registry and the live instance store
//! - Per-world shared progress and per-player activation stores
//! - The synchronous event dispatch engine and a thin admin API
//!
//! ## Authority model
//!
//! All world- and player-scoped state is mutated on one authoritative
//! thread per world; callers on other threads (network receipt, timers)
//! must marshal onto it first. The only cross-world shared table is the
//! [`InstanceStore`], which is concurrency-safe on its own. Sync pushes go
//! through the [`SyncSink`] port and are fire-and-forget: nothing in the
//! core blocks on I/O.

mod activation;
pub mod api;
mod definition;
mod engine;
mod error;
mod event;
mod identity;
mod instance;
mod port;
mod progress;
mod registry;
pub mod trigger;

pub use activation::{PlayerMissions, PlayerTable};
pub use definition::MissionDefinition;
pub use engine::dispatch;
pub use error::{Error, Result};
pub use event::{BlockInfo, BlockPos, GameEvent, Hand, InteractionKind};
pub use identity::{DefId, InstanceId, PlayerId};
pub use instance::{InstanceStore, Mission};
pub use port::{NullSink, SharedTableSnapshot, SyncSink};
pub use progress::{SharedMission, WorldMissions};
pub use registry::MissionRegistry;
pub use trigger::MissionTrigger;
