//! Observer configuration

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use observer_protocol::{BridgeConfig, DEFAULT_CALLBACK_NAME, DEFAULT_TARGET_ID};
use serde::{Deserialize, Serialize};

/// Environment variable naming the config file when no argument is given
pub const CONFIG_ENV: &str = "SNAPWATCH_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserverConfig {
    /// Host object receiving capture callbacks
    pub target_id: String,
    /// Method invoked on `target_id`
    pub callback_name: String,
    /// Android only: media-store detection instead of the Android 14+ callback
    pub use_legacy_detection: bool,
    /// Main loop tick in milliseconds
    pub tick_interval_ms: u64,
    /// Start listening as soon as the observer is up
    pub auto_start: bool,
    /// Use the simulation bridge even on mobile targets
    pub simulation: bool,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            target_id: DEFAULT_TARGET_ID.to_string(),
            callback_name: DEFAULT_CALLBACK_NAME.to_string(),
            use_legacy_detection: true,
            tick_interval_ms: 16,
            auto_start: true,
            simulation: true,
        }
    }
}

impl ObserverConfig {
    /// Load from `path`, or from `$SNAPWATCH_CONFIG`, or fall back to defaults
    pub fn load(path: Option<PathBuf>) -> anyhow::Result<Self> {
        let path = path.or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        match path {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.tick_interval_ms == 0 {
            bail!("tick_interval_ms must be greater than zero");
        }
        Ok(())
    }

    pub fn bridge_config(&self) -> BridgeConfig {
        BridgeConfig {
            use_legacy_detection: self.use_legacy_detection,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = ObserverConfig::from_json("{}").unwrap();
        assert_eq!(config, ObserverConfig::default());
        assert_eq!(config.target_id, "NativeMsgRx");
        assert!(config.bridge_config().use_legacy_detection);
    }

    #[test]
    fn test_partial_override() {
        let config = ObserverConfig::from_json(
            r#"{"target_id": "Rx", "callback_name": "OnShot", "use_legacy_detection": false}"#,
        )
        .unwrap();

        assert_eq!(config.target_id, "Rx");
        assert_eq!(config.callback_name, "OnShot");
        assert!(!config.bridge_config().use_legacy_detection);
        assert_eq!(config.tick_interval_ms, 16);
    }

    #[test]
    fn test_zero_tick_rejected() {
        assert!(ObserverConfig::from_json(r#"{"tick_interval_ms": 0}"#).is_err());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = ObserverConfig::from_file(Path::new("/nonexistent/snapwatch.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/snapwatch.json"));
    }
}
