use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub mod defaults;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Config {
    pub input: InputConfig,
    pub paths: PathsConfig,
    pub lrclib: LrclibConfig,
    pub analysis: AnalysisConfig,
    pub playback: PlaybackConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub mouse: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LrclibConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Gemini API key. Falls back to `GEMINI_API_KEY`, then `API_KEY`.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    /// Language the answers are written in
    pub language: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Wall-clock interval between clock ticks
    pub tick_millis: u64,
    /// Simulated seconds added per tick
    pub tick_step_secs: f64,
    /// Used when a track reports no duration
    pub fallback_duration_secs: f64,
    /// Start playing as soon as a track is selected
    pub autoplay: bool,
    pub seek_step_secs: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Keep the display awake while a track is open
    pub keep_awake: bool,
    /// Override for the inhibitor command (program followed by args)
    pub inhibit_command: Option<Vec<String>>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { mouse: true }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        let data_dir = ProjectDirs::from("dev", "lyrasync", "lyrasync")
            .map(|p| p.data_dir().to_path_buf())
            .unwrap_or_else(|| std::env::temp_dir().join("lyrasync"));
        Self { data_dir }
    }
}

impl Default for LrclibConfig {
    fn default() -> Self {
        Self {
            base_url: "https://lrclib.net/api".to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-3-flash-preview".to_string(),
            language: "Spanish".to_string(),
            timeout_secs: 30,
        }
    }
}

impl AnalysisConfig {
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .or_else(|| std::env::var("API_KEY").ok())
            .filter(|k| !k.trim().is_empty())
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_millis: 500,
            tick_step_secs: 0.5,
            fallback_duration_secs: 300.0,
            autoplay: true,
            seek_step_secs: 10.0,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            keep_awake: true,
            inhibit_command: None,
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let proj =
        ProjectDirs::from("dev", "lyrasync", "lyrasync").context("ProjectDirs unavailable")?;
    Ok(proj.config_dir().join("config.toml"))
}

pub fn load(override_path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match override_path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };

    if !path.exists() {
        let cfg = defaults::defaults();
        write_config(&cfg, &path).context("write default config")?;
        tracing::info!(path = %path.display(), "created default config");
        return Ok(cfg);
    }

    let raw = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let cfg = toml::from_str::<Config>(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

fn write_config(cfg: &Config, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create dir {}", parent.display()))?;
    }
    let raw = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, raw).with_context(|| format!("write {}", path.display()))?;
    // The file may hold an API key.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o600));
    }
    Ok(())
}
