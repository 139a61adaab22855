//! Mission pack loader
//!
//! Packs are JSON (a bare array of entries or a `{"missions": [...]}`
//! wrapper) or RON in the same shape, dispatched on file extension.
//! Loading is two-phase: `load_*` calls accumulate entries, then `apply`
//! runs the reload protocol against a registry — clear everything, then
//! register every collected entry.

use crate::error::{Error, Result};
use crate::schema::MissionEntry;
use missionkit_core::{DefId, MissionRegistry};
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

/// Loader for mission pack files
#[derive(Debug, Default)]
pub struct Loader {
    entries: Vec<MissionEntry>,
}

impl Loader {
    /// Create a new loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Load entries from a JSON string
    pub fn load_json_str(&mut self, content: &str) -> Result<()> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        self.collect(value)
    }

    /// Load entries from a RON string
    ///
    /// Accepts a `(missions: [...])` wrapper or a bare entry list. RON
    /// packs parse as a whole: a malformed entry fails the file.
    pub fn load_ron_str(&mut self, content: &str) -> Result<()> {
        let missions = match ron::from_str::<crate::MissionFile>(content) {
            Ok(file) => file.missions,
            Err(_) => ron::from_str::<Vec<MissionEntry>>(content)?,
        };
        for entry in missions {
            self.push(entry);
        }
        Ok(())
    }

    /// Load a single pack file, dispatching on extension
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("ron") => self.load_ron_str(&content),
            _ => self.load_json_str(&content),
        }
    }

    /// Load all pack files from a directory, recursively
    pub fn load_directory(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Not a directory: {:?}", path),
            )));
        }
        for entry in fs::read_dir(path)? {
            let file_path = entry?.path();
            if file_path.is_dir() {
                self.load_directory(&file_path)?;
            } else if matches!(
                file_path.extension().and_then(|e| e.to_str()),
                Some("json") | Some("ron")
            ) {
                self.load_file(&file_path)?;
            }
        }
        Ok(())
    }

    /// Pull entries out of a parsed pack value
    ///
    /// Accepts a bare array, a `{"missions": [...]}` wrapper, or a single
    /// entry object. Malformed entries are skipped with an error log; the
    /// rest of the pack still loads.
    fn collect(&mut self, value: serde_json::Value) -> Result<()> {
        let elements = match value {
            serde_json::Value::Array(elements) => elements,
            serde_json::Value::Object(mut object) => {
                if let Some(serde_json::Value::Array(elements)) = object.remove("missions") {
                    elements
                } else if object.contains_key("id") {
                    vec![serde_json::Value::Object(object)]
                } else {
                    return Err(Error::InvalidFormat(
                        "expected a mission array, a {\"missions\": [...]} wrapper, or a single mission object".to_string(),
                    ));
                }
            }
            _ => {
                return Err(Error::InvalidFormat(
                    "pack root must be an array or object".to_string(),
                ))
            }
        };

        for element in elements {
            match serde_json::from_value::<MissionEntry>(element) {
                Ok(entry) => self.push(entry),
                Err(err) => {
                    error!(%err, "malformed mission entry skipped");
                }
            }
        }
        Ok(())
    }

    fn push(&mut self, entry: MissionEntry) {
        if entry.target == 0 {
            error!(mission = %entry.id, "mission target must be positive; entry skipped");
            return;
        }
        self.entries.push(entry);
    }

    /// Collected entries, in load order
    pub fn entries(&self) -> &[MissionEntry] {
        &self.entries
    }

    /// Run the full reload protocol against a registry
    ///
    /// Drops every existing definition, then registers each collected
    /// entry. Later entries win on duplicate IDs.
    pub fn apply(&self, registry: &mut MissionRegistry) {
        registry.clear();
        for entry in &self.entries {
            let id = DefId::new(entry.id.clone());
            if registry.get(&id).is_some() {
                warn!(mission = %id, "duplicate mission id in pack; later entry wins");
            }
            registry.register_definition(
                id,
                entry.title.clone(),
                entry.target,
                entry.shared,
                entry.trigger.clone(),
            );
        }
        info!(count = registry.len(), "loaded mission definitions");
    }
}
