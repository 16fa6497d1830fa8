use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/vivace/config.toml` or `~/.config/vivace/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `VIVACE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub scan: ScanSettings,
    pub probe: ProbeSettings,
    pub output: OutputSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scan: ScanSettings::default(),
            probe: ProbeSettings::default(),
            output: OutputSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
    /// Number of worker threads probing files concurrently.
    pub workers: usize,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            extensions: vec![
                "mp3".into(),
                "flac".into(),
                "wav".into(),
                "m4a".into(),
                "aac".into(),
                "ogg".into(),
                "wma".into(),
            ],
            follow_links: true,
            max_depth: None,
            workers: 10,
        }
    }
}

#[derive(Debug, Copy, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProbeBackend {
    /// Read stream properties in-process with lofty.
    Lofty,
    /// Shell out to an ffprobe binary.
    Ffprobe,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    /// Which probing backend to use.
    pub backend: ProbeBackend,
    /// Path to the ffprobe binary (only read by the ffprobe backend).
    pub ffprobe_path: PathBuf,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            backend: ProbeBackend::Lofty,
            ffprobe_path: PathBuf::from("ffprobe"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// File written by `-o` mode, resolved against the current directory.
    pub log_file: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from("music_metadata.log"),
        }
    }
}
