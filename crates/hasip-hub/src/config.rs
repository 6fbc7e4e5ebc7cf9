use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Language used for synthesis when none is configured.
pub const DEFAULT_TTS_LANGUAGE: &str = "en";

/// Location of the fallback recording, relative to the assets directory.
pub const FALLBACK_AUDIO: &str = "sound/answer.wav";

fn default_tts_language() -> String {
    DEFAULT_TTS_LANGUAGE.to_string()
}

/// Connection settings for the home-automation hub.
///
/// Every endpoint the bridge talks to is derived from `base_url` here; no
/// other code builds hub URLs.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct HubConfig {
    /// API root, e.g. `http://homeassistant.local:8123/api`.
    pub base_url: String,
    /// Long-lived access token sent as a bearer credential.
    pub token: String,
    /// TTS platform name passed through to the hub (e.g. `google_translate`).
    pub tts_engine: String,
    #[serde(default = "default_tts_language")]
    pub tts_language: String,
    /// Webhook identifier. Empty disables webhook delivery.
    #[serde(default)]
    pub webhook_id: String,
}

impl fmt::Debug for HubConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HubConfig")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .field("tts_engine", &self.tts_engine)
            .field("tts_language", &self.tts_language)
            .field("webhook_id", &self.webhook_id)
            .finish()
    }
}

impl HubConfig {
    /// Builds a config. An empty `tts_language` falls back to `"en"`.
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        tts_engine: impl Into<String>,
        tts_language: impl Into<String>,
        webhook_id: impl Into<String>,
    ) -> Self {
        let tts_language = tts_language.into();
        Self {
            base_url: base_url.into(),
            token: token.into(),
            tts_engine: tts_engine.into(),
            tts_language: if tts_language.is_empty() {
                default_tts_language()
            } else {
                tts_language
            },
            webhook_id: webhook_id.into(),
        }
    }

    /// Headers sent with every hub request.
    ///
    /// The token is not validated; an empty token yields `"Bearer "`.
    pub fn headers(&self) -> BTreeMap<&'static str, String> {
        BTreeMap::from([
            ("Authorization", format!("Bearer {}", self.token)),
            ("content-type", "application/json".to_string()),
        ])
    }

    /// Endpoint that synthesizes a message and answers with an audio URL.
    pub fn tts_url(&self) -> String {
        format!("{}/tts_get_url", self.base_url)
    }

    /// Path segments are inserted verbatim; callers must pass URL-safe names.
    pub fn service_url(&self, domain: &str, service: &str) -> String {
        format!("{}/services/{}/{}", self.base_url, domain, service)
    }

    /// Returns a URL ending in `/webhook/` when no webhook is configured.
    pub fn webhook_url(&self) -> String {
        format!("{}/webhook/{}", self.base_url, self.webhook_id)
    }

    /// Whether a webhook id is configured.
    pub fn has_webhook(&self) -> bool {
        !self.webhook_id.is_empty()
    }
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("assets")
}

fn default_transcoder() -> PathBuf {
    PathBuf::from("ffmpeg")
}

fn default_transcode_timeout_secs() -> u64 {
    30
}

/// Local settings for the speech pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TtsSettings {
    /// Directory holding bundled audio; the fallback lives at
    /// `<assets_dir>/sound/answer.wav`.
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,
    /// Decoder binary used to turn downloaded audio into WAV.
    #[serde(default = "default_transcoder")]
    pub transcoder: PathBuf,
    /// Upper bound on a single decoder run.
    #[serde(default = "default_transcode_timeout_secs")]
    pub transcode_timeout_secs: u64,
    /// Where scratch and output files are created. System temp dir if unset.
    #[serde(default)]
    pub scratch_dir: Option<PathBuf>,
}

impl Default for TtsSettings {
    fn default() -> Self {
        Self {
            assets_dir: default_assets_dir(),
            transcoder: default_transcoder(),
            transcode_timeout_secs: default_transcode_timeout_secs(),
            scratch_dir: None,
        }
    }
}

impl TtsSettings {
    /// Path of the bundled recording returned when the hub refuses to
    /// synthesize.
    pub fn fallback_audio(&self) -> PathBuf {
        self.assets_dir.join(FALLBACK_AUDIO)
    }

    /// Anchors relative directories at `root`, the application root.
    ///
    /// Absolute paths are kept. Without this a relative `assets_dir` would be
    /// looked up from whatever directory the process happens to run in.
    pub fn resolve_against(mut self, root: &Path) -> Self {
        if self.assets_dir.is_relative() {
            self.assets_dir = root.join(&self.assets_dir);
        }
        if let Some(scratch) = self.scratch_dir.as_mut() {
            if scratch.is_relative() {
                *scratch = root.join(&*scratch);
            }
        }
        self
    }
}
