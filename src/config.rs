use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Streaming configuration for the reasoning coalescer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Minimum milliseconds between streamed reasoning emissions.
    /// `0` emits on every delta.
    #[serde(default = "default_flush_interval_ms")]
    pub flush_interval_ms: u64,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            flush_interval_ms: default_flush_interval_ms(),
        }
    }
}

fn default_flush_interval_ms() -> u64 {
    200
}

pub fn default_stream_config_path() -> PathBuf {
    let Some(dirs) = ProjectDirs::from("com", "zaguan", "zreason") else {
        return Path::new("zreason.json").to_path_buf();
    };
    dirs.config_dir().join("stream.json")
}

pub fn load_stream_config(path: &Path) -> StreamConfig {
    let Ok(bytes) = fs::read(path) else {
        return StreamConfig::default();
    };
    serde_json::from_slice::<StreamConfig>(&bytes).unwrap_or_default()
}

pub fn save_stream_config(path: &Path, cfg: &StreamConfig) -> Result<(), String> {
    let json = serde_json::to_vec_pretty(cfg).map_err(|e| e.to_string())?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }
    fs::write(path, json).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_stream_config(&dir.path().join("nope.json"));
        assert_eq!(cfg.flush_interval_ms, 200);
    }

    #[test]
    fn test_serde_default_applied() {
        let cfg: StreamConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.flush_interval_ms, 200);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("stream.json");

        let cfg = StreamConfig {
            flush_interval_ms: 50,
        };
        save_stream_config(&path, &cfg).unwrap();

        let loaded = load_stream_config(&path);
        assert_eq!(loaded.flush_interval_ms, 50);
    }

    #[test]
    fn test_invalid_json_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stream.json");
        fs::write(&path, "not json").unwrap();

        let cfg = load_stream_config(&path);
        assert_eq!(cfg.flush_interval_ms, 200);
    }
}
