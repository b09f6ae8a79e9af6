//! XDG Base Directory paths for the bridge consumer.
//!
//! The consumer keeps its queue and offset files under XDG paths for
//! cross-platform consistency, not platform-native paths. This matches
//! tools like gh, docker, kubectl.

use std::path::PathBuf;

/// Get the bridge config directory.
///
/// Returns `$XDG_CONFIG_HOME/bridge` if set, otherwise `~/.config/bridge`.
/// This is where `config.toml` lives.
///
/// # Examples
///
/// ```
/// use bridge_paths::config_dir;
///
/// let config = config_dir();
/// let config_file = config.join("config.toml");
/// ```
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg_config).join("bridge")
    } else if let Some(home) = dirs::home_dir() {
        home.join(".config/bridge")
    } else {
        PathBuf::from(".config/bridge")
    }
}

/// Get the bridge data directory.
///
/// Returns `$XDG_DATA_HOME/bridge` if set, otherwise `~/.local/share/bridge`.
/// This is where the intent queue and its offset sidecar are stored.
///
/// # Examples
///
/// ```
/// use bridge_paths::data_dir;
///
/// let data = data_dir();
/// let queue = data.join("oram_intent_queue.jsonl");
/// ```
pub fn data_dir() -> PathBuf {
    if let Ok(xdg_data) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg_data).join("bridge")
    } else if let Some(home) = dirs::home_dir() {
        home.join(".local/share/bridge")
    } else {
        PathBuf::from(".local/share/bridge")
    }
}
