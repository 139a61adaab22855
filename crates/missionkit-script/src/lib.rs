//! Missionkit Script - Mission pack loader and schema
//!
//! Loads mission definitions from pack files:
//! - JSON packs: a bare array of entries or a `{"missions": [...]}` wrapper
//! - RON packs in the same shape
//!
//! A full load is a reload: the registry is cleared first, then every
//! entry re-registered. One bad entry never aborts the rest of the pack.

mod error;
mod loader;
mod schema;

pub use error::{Error, Result};
pub use loader::Loader;
pub use schema::{MissionEntry, MissionFile};
