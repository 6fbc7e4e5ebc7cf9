//! Bridge configuration loading from file and environment variables.

use hasip_hub::{HubConfig, TtsSettings, DEFAULT_TTS_LANGUAGE};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Top-level bridge configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Hub connection settings.
    #[serde(default = "default_hub")]
    pub hub: HubConfig,

    /// Speech pipeline settings.
    #[serde(default)]
    pub tts: TtsSettings,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "hasip_hub=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

fn default_hub() -> HubConfig {
    HubConfig::new(
        "http://localhost:8123/api",
        "",
        "google_translate",
        DEFAULT_TTS_LANGUAGE,
        "",
    )
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hub: default_hub(),
            tts: TtsSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `HASIP_BASE_URL` overrides `hub.base_url`
/// - `HASIP_TOKEN` overrides `hub.token`
/// - `HASIP_TTS_ENGINE` overrides `hub.tts_engine`
/// - `HASIP_TTS_LANGUAGE` overrides `hub.tts_language`
/// - `HASIP_WEBHOOK_ID` overrides `hub.webhook_id`
/// - `HASIP_ASSETS_DIR` overrides `tts.assets_dir`
/// - `HASIP_TRANSCODER` overrides `tts.transcoder`
/// - `HASIP_LOG_LEVEL` overrides `logging.level`
/// - `HASIP_LOG_JSON` overrides `logging.json` (set to "true" to enable)
/// - `HASIP_ROOT` sets the application root (see [`application_root`])
///
/// Relative `tts` directories are then anchored at the application root, so
/// the fallback recording is found regardless of the working directory.
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let (config, file) = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => (toml::from_str::<Config>(&contents)?, Some(Path::new(p))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                (Config::default(), None)
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => (Config::default(), None),
    };

    let lookup = |key: &str| std::env::var(key).ok();
    let mut config = apply_env_overrides(config, lookup);
    match application_root(file, lookup) {
        Some(root) => {
            tracing::debug!(root = %root.display(), "resolved application root");
            config.tts = config.tts.resolve_against(&root);
        }
        None => tracing::warn!("could not determine application root, using relative paths"),
    }
    Ok(config)
}

/// Directory that relative asset paths are resolved against.
///
/// `HASIP_ROOT` wins; otherwise the directory holding the loaded config file;
/// otherwise the directory of the running executable.
pub fn application_root(
    config_file: Option<&Path>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<PathBuf> {
    if let Some(root) = lookup("HASIP_ROOT").filter(|r| !r.trim().is_empty()) {
        return absolute(Path::new(&root));
    }
    if let Some(dir) = config_file.and_then(|f| absolute(f)?.parent().map(Path::to_path_buf)) {
        return Some(dir);
    }
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}

fn absolute(path: &Path) -> Option<PathBuf> {
    std::fs::canonicalize(path).ok()
}

/// Applies `HASIP_*` overrides using `lookup` to read variables.
pub fn apply_env_overrides(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
    if let Some(base_url) = lookup("HASIP_BASE_URL") {
        config.hub.base_url = base_url;
    }
    if let Some(token) = lookup("HASIP_TOKEN") {
        config.hub.token = token;
    }
    if let Some(engine) = lookup("HASIP_TTS_ENGINE") {
        config.hub.tts_engine = engine;
    }
    if let Some(language) = lookup("HASIP_TTS_LANGUAGE") {
        if !language.is_empty() {
            config.hub.tts_language = language;
        }
    }
    if let Some(webhook_id) = lookup("HASIP_WEBHOOK_ID") {
        config.hub.webhook_id = webhook_id;
    }
    if let Some(assets_dir) = lookup("HASIP_ASSETS_DIR") {
        config.tts.assets_dir = assets_dir.into();
    }
    if let Some(transcoder) = lookup("HASIP_TRANSCODER") {
        config.tts.transcoder = transcoder.into();
    }
    if let Some(level) = lookup("HASIP_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = lookup("HASIP_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }
    config
}
