//! TOML configuration for the bridge CLI.
//!
//! One optional config file under the user config dir; anything unset
//! falls back to defaults and CLI flags override whatever was loaded.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use bridge_core::ConsumerConfig;
use serde::Deserialize;

/// Configuration as stored in TOML (optional fields for merging)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBridgeConfig {
    #[serde(default)]
    pub consumer: RawConsumerSection,
}

/// Consumer section as stored in TOML
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConsumerSection {
    /// Path to the intent queue file
    pub queue_path: Option<PathBuf>,

    /// Path to the offset sidecar file
    pub offset_path: Option<PathBuf>,

    /// Interval between poll ticks, e.g. "2s"
    #[serde(default, with = "humantime_serde")]
    pub poll_interval: Option<Duration>,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the user config with defaults applied for anything unset.
    pub fn load() -> Result<ConsumerConfig> {
        let path = Self::config_path();

        let raw = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            toml::from_str(&contents)?
        } else {
            RawBridgeConfig::default()
        };

        Ok(Self::finalize(raw))
    }

    /// Get the user config file path.
    ///
    /// Can be overridden with the BRIDGE_CONFIG_DIR env var (useful for
    /// isolated tests).
    pub fn config_path() -> PathBuf {
        if let Ok(dir) = std::env::var("BRIDGE_CONFIG_DIR") {
            PathBuf::from(dir).join("config.toml")
        } else {
            bridge_paths::config_dir().join("config.toml")
        }
    }

    /// Convert raw config to final config with defaults applied
    fn finalize(raw: RawBridgeConfig) -> ConsumerConfig {
        let mut config = ConsumerConfig::default();
        if let Some(queue) = raw.consumer.queue_path {
            config = config.with_queue_path(queue);
        }
        if let Some(offset) = raw.consumer.offset_path {
            config = config.with_offset_path(offset);
        }
        if let Some(interval) = raw.consumer.poll_interval {
            config = config.with_poll_interval(interval);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn raw_config_partial_parsing() {
        let toml_str = r#"
[consumer]
queue_path = "/data/queue.jsonl"
"#;
        let raw: RawBridgeConfig = toml::from_str(toml_str).unwrap();

        assert_eq!(
            raw.consumer.queue_path,
            Some(PathBuf::from("/data/queue.jsonl"))
        );
        assert!(raw.consumer.offset_path.is_none());
        assert!(raw.consumer.poll_interval.is_none());
    }

    #[test]
    fn raw_config_empty_uses_none() {
        let raw: RawBridgeConfig = toml::from_str("").unwrap();

        assert!(raw.consumer.queue_path.is_none());
        assert!(raw.consumer.offset_path.is_none());
        assert!(raw.consumer.poll_interval.is_none());
    }

    #[test]
    fn finalize_applies_defaults_for_unset_fields() {
        let raw: RawBridgeConfig = toml::from_str(
            r#"
[consumer]
poll_interval = "500ms"
"#,
        )
        .unwrap();

        let config = ConfigLoader::finalize(raw);

        assert_eq!(config.poll_interval, Duration::from_millis(500));
        assert!(config.queue_path.ends_with(bridge_core::QUEUE_FILE));
        assert!(config.offset_path.ends_with(bridge_core::OFFSET_FILE));
    }

    #[test]
    #[serial]
    fn load_reads_config_from_override_dir() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            r#"
[consumer]
queue_path = "/custom/queue.jsonl"
poll_interval = "3s"
"#,
        )
        .unwrap();

        unsafe {
            std::env::set_var("BRIDGE_CONFIG_DIR", dir.path());
        }
        let config = ConfigLoader::load().unwrap();
        unsafe {
            std::env::remove_var("BRIDGE_CONFIG_DIR");
        }

        assert_eq!(config.queue_path, PathBuf::from("/custom/queue.jsonl"));
        assert_eq!(config.poll_interval, Duration::from_secs(3));
    }

    #[test]
    #[serial]
    fn load_without_config_file_uses_defaults() {
        let dir = TempDir::new().unwrap();

        unsafe {
            std::env::set_var("BRIDGE_CONFIG_DIR", dir.path());
        }
        let config = ConfigLoader::load().unwrap();
        unsafe {
            std::env::remove_var("BRIDGE_CONFIG_DIR");
        }

        assert_eq!(config.poll_interval, Duration::from_secs(2));
    }
}
