use crate::config::{HubConfig, TtsSettings};
use crate::error::HubError;
use crate::request::with_auth;
use crate::transcode::Transcoder;
use hasip_types::TtsAudio;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Serialize)]
struct TtsRequest<'a> {
    platform: &'a str,
    message: &'a str,
    language: &'a str,
}

#[derive(Debug, Deserialize)]
struct TtsResponse {
    url: Option<String>,
}

/// Turns text into a WAV file via the hub's TTS endpoint.
///
/// The hub synthesizes the message and hands back a URL to compressed audio,
/// which is downloaded and decoded locally. When the hub refuses the request
/// the bundled fallback recording is returned instead.
#[derive(Debug, Clone)]
pub struct TtsService {
    http: reqwest::Client,
    transcoder: Transcoder,
    fallback_audio: PathBuf,
    scratch_dir: PathBuf,
}

impl TtsService {
    pub fn new(http: reqwest::Client, settings: &TtsSettings) -> Self {
        Self {
            http,
            transcoder: Transcoder::new(
                &settings.transcoder,
                Duration::from_secs(settings.transcode_timeout_secs),
            ),
            fallback_audio: settings.fallback_audio(),
            scratch_dir: settings
                .scratch_dir
                .clone()
                .unwrap_or_else(std::env::temp_dir),
        }
    }

    /// Synthesizes `message` and returns a playable WAV file.
    ///
    /// `language` defaults to the configured TTS language. A non-200 answer
    /// from the hub yields the fallback recording (`owned = false`); transport
    /// failures, a response without `url`, and undecodable audio are errors.
    pub async fn synthesize(
        &self,
        config: &HubConfig,
        message: &str,
        language: Option<&str>,
    ) -> Result<TtsAudio, HubError> {
        let language = language.unwrap_or(&config.tts_language);
        let request = TtsRequest {
            platform: &config.tts_engine,
            message,
            language,
        };

        let response = with_auth(self.http.post(config.tts_url()), config)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            match response.text().await {
                Ok(body) => warn!(
                    status = status.as_u16(),
                    body = %body,
                    fallback = %self.fallback_audio.display(),
                    "error getting tts file, using fallback"
                ),
                Err(e) => warn!(
                    status = status.as_u16(),
                    body_error = %e,
                    fallback = %self.fallback_audio.display(),
                    "error getting tts file, using fallback"
                ),
            }
            return Ok(TtsAudio::bundled(&self.fallback_audio));
        }

        let created: TtsResponse = response
            .json()
            .await
            .map_err(|e| HubError::MalformedResponse(format!("invalid tts response: {}", e)))?;
        let audio_url = created
            .url
            .ok_or_else(|| HubError::MalformedResponse("tts response has no url".to_string()))?;

        debug!(url = %audio_url, "fetching synthesized audio");
        let audio = with_auth(self.http.get(&audio_url), config)
            .send()
            .await?
            .bytes()
            .await?;

        let wav = self.transcode(&audio).await?;
        Ok(TtsAudio::owned(wav))
    }

    async fn transcode(&self, compressed: &[u8]) -> Result<PathBuf, HubError> {
        // Dropped on return, which removes the scratch input.
        let input = tempfile::Builder::new()
            .prefix("hasip-tts-")
            .suffix(".mp3")
            .tempfile_in(&self.scratch_dir)?;
        tokio::fs::write(input.path(), compressed).await?;

        let output = tempfile::Builder::new()
            .prefix("hasip-tts-")
            .suffix(".wav")
            .tempfile_in(&self.scratch_dir)?;

        self.transcoder.to_wav(input.path(), output.path()).await?;

        let (_, path) = output.keep().map_err(|e| HubError::Io(e.error))?;
        debug!(path = %path.display(), bytes = compressed.len(), "transcoded tts audio");
        Ok(path)
    }
}
