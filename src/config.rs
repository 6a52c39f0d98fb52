//! Runtime configuration.
//!
//! Every field has a default, so a partial (or empty) JSON document is a
//! valid configuration. On native targets the file named by
//! [`CONFIG_ENV_VAR`] is read at startup.

use crate::constants::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming the JSON configuration file.
pub const CONFIG_ENV_VAR: &str = "GALLERY_WALL_CONFIG";

/// Errors raised while reading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid configuration JSON
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// How far the frame group may travel from the neutral position, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Boundary {
    /// Maximum travel to the left
    pub left: f32,
    /// Maximum travel to the right
    pub right: f32,
    /// Maximum travel upwards
    pub top: f32,
    /// Maximum travel downwards
    pub bottom: f32,
}

impl Default for Boundary {
    fn default() -> Self {
        Self {
            left: BOUNDARY_LEFT,
            right: BOUNDARY_RIGHT,
            top: BOUNDARY_TOP,
            bottom: BOUNDARY_BOTTOM,
        }
    }
}

/// Drag engine tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Boundary of the group offset
    pub boundary: Boundary,
    /// Share of the overshoot kept while dragging past the boundary
    pub resistance: f32,
    /// Movement after which a group press is a drag
    pub group_threshold: f32,
    /// Movement after which an individual frame press is a drag
    pub individual_threshold: f32,
}

impl DragConfig {
    /// Whether every distance is finite and non-negative and the resistance
    /// lies in `0.0..=1.0`.
    pub fn is_valid(&self) -> bool {
        let b = &self.boundary;
        let distances = [
            b.left,
            b.right,
            b.top,
            b.bottom,
            self.group_threshold,
            self.individual_threshold,
        ];
        distances.iter().all(|d| d.is_finite() && *d >= 0.0) && (0.0..=1.0).contains(&self.resistance)
    }
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            boundary: Boundary::default(),
            resistance: ELASTIC_RESISTANCE,
            group_threshold: GROUP_DRAG_THRESHOLD,
            individual_threshold: INDIVIDUAL_DRAG_THRESHOLD,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Drag engine tuning
    pub drag: DragConfig,
    /// Maximum number of undo entries
    pub history_depth: usize,
    /// Catalog cards revealed per chunk
    pub reveal_chunk: usize,
    /// Minimum delay between reveals
    pub reveal_debounce_ms: u64,
    /// Storefront domain used for checkout, e.g. `shop.example.com`
    pub shop_domain: Option<String>,
    /// Viewport width below which the mobile layout is used
    pub mobile_breakpoint: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            drag: DragConfig::default(),
            history_depth: MAX_UNDO_HISTORY,
            reveal_chunk: REVEAL_CHUNK,
            reveal_debounce_ms: REVEAL_DEBOUNCE_MS,
            shop_domain: None,
            mobile_breakpoint: MOBILE_BREAKPOINT,
        }
    }
}

impl AppConfig {
    /// Parses a configuration from JSON. Unusable drag tuning is replaced
    /// by the defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.validated())
    }

    /// Replaces an invalid drag section with [`DragConfig::default`].
    pub fn validated(mut self) -> Self {
        if !self.drag.is_valid() {
            log::warn!("ignoring invalid drag config {:?}", self.drag);
            self.drag = DragConfig::default();
        }
        self
    }

    /// Reads a configuration file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&json)?)
    }

    /// Loads the configuration named by [`CONFIG_ENV_VAR`], falling back to
    /// defaults when the variable is unset or the file is unusable.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(CONFIG_ENV_VAR) else {
            return Self::default();
        };
        match Self::from_file(&path) {
            Ok(config) => {
                log::info!("loaded config from {path}");
                config
            }
            Err(err) => {
                log::warn!("ignoring config {path}: {err}");
                Self::default()
            }
        }
    }

    /// Web builds always run with defaults.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(AppConfig::from_json("{}").unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_drag_config_keeps_other_defaults() {
        let config = AppConfig::from_json(r#"{"drag":{"resistance":0.5,"boundary":{"right":100}}}"#).unwrap();
        assert_eq!(config.drag.resistance, 0.5);
        assert_eq!(config.drag.boundary.right, 100.0);
        assert_eq!(config.drag.boundary.left, BOUNDARY_LEFT);
        assert_eq!(config.history_depth, MAX_UNDO_HISTORY);
    }

    #[test]
    fn negative_boundary_falls_back_to_default_drag() {
        let config = AppConfig::from_json(r#"{"drag":{"boundary":{"left":-300}},"history_depth":10}"#).unwrap();
        assert_eq!(config.drag, DragConfig::default());
        assert_eq!(config.history_depth, 10);
    }

    #[test]
    fn out_of_range_resistance_or_threshold_is_rejected() {
        for json in [
            r#"{"drag":{"resistance":1.5}}"#,
            r#"{"drag":{"resistance":-0.1}}"#,
            r#"{"drag":{"group_threshold":-1}}"#,
        ] {
            assert_eq!(AppConfig::from_json(json).unwrap().drag, DragConfig::default(), "{json}");
        }
        let mut config = AppConfig::default();
        config.drag.boundary.top = f32::NAN;
        assert_eq!(config.validated().drag, DragConfig::default());
    }

    #[test]
    fn store_loads_with_a_hand_built_bad_boundary() {
        let mut config = AppConfig::default();
        config.drag.boundary.left = -300.0;
        let store = crate::store::SelectionStore::load(Box::new(crate::storage::MemoryStorage::new()), config);
        assert_eq!(store.config().drag, DragConfig::default());
    }

    #[test]
    fn unreadable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(AppConfig::from_file(&missing), Err(ConfigError::Io(_))));

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{not json").unwrap();
        assert!(matches!(AppConfig::from_file(&bad), Err(ConfigError::Parse(_))));
    }
}
