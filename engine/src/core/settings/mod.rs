//! Style Settings
//!
//! Loading and saving a style document, and the preset-store capability.
//!
//! - Loading is tolerant: a missing or corrupt file yields defaults
//! - Saving normalizes first and writes atomically (temp file + rename)
//! - Presets live behind [`PresetStore`]; this crate ships only an
//!   in-memory implementation

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::core::captions::StyleConfig;
use crate::core::fs::atomic_write_json_pretty;
use crate::core::{CoreError, CoreResult};

// =============================================================================
// Style File
// =============================================================================

/// A style document on disk
#[derive(Clone, Debug)]
pub struct StyleFile {
    path: PathBuf,
}

impl StyleFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the file without falling back
    pub fn try_load(&self) -> CoreResult<StyleConfig> {
        let content = std::fs::read_to_string(&self.path)?;
        let style: StyleConfig = serde_json::from_str(&content)?;
        Ok(style.normalized())
    }

    /// Loads the style, returning defaults if the file is missing or invalid
    pub fn load(&self) -> StyleConfig {
        if !self.path.exists() {
            info!("Style file {:?} not found, using defaults", self.path);
            return StyleConfig::default();
        }

        match self.try_load() {
            Ok(style) => style,
            Err(e) => {
                warn!("Failed to load style from {:?}, using defaults: {}", self.path, e);
                StyleConfig::default()
            }
        }
    }

    /// Normalizes and writes the style; returns what was written
    pub fn save(&self, style: &StyleConfig) -> CoreResult<StyleConfig> {
        let normalized = style.clone().normalized();
        atomic_write_json_pretty(&self.path, &normalized)?;
        info!("Style saved to {:?}", self.path);
        Ok(normalized)
    }
}

// =============================================================================
// Presets
// =============================================================================

/// Named style presets, injected by the embedding application
pub trait PresetStore {
    fn get(&self, name: &str) -> Option<StyleConfig>;

    fn put(&mut self, name: &str, style: StyleConfig) -> CoreResult<()>;

    /// Removes a preset; returns whether it existed
    fn remove(&mut self, name: &str) -> bool;

    /// Preset names in sorted order
    fn names(&self) -> Vec<String>;
}

/// Preset store that lives only as long as the process
#[derive(Clone, Debug, Default)]
pub struct InMemoryPresetStore {
    presets: BTreeMap<String, StyleConfig>,
}

impl InMemoryPresetStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PresetStore for InMemoryPresetStore {
    fn get(&self, name: &str) -> Option<StyleConfig> {
        self.presets.get(name.trim()).cloned()
    }

    fn put(&mut self, name: &str, style: StyleConfig) -> CoreResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::ValidationError(
                "Preset name cannot be empty".to_string(),
            ));
        }
        self.presets.insert(name.to_string(), style.normalized());
        Ok(())
    }

    fn remove(&mut self, name: &str) -> bool {
        self.presets.remove(name.trim()).is_some()
    }

    fn names(&self) -> Vec<String> {
        self.presets.keys().cloned().collect()
    }
}
