//! Hub client for the ha-sip bridge.
//!
//! Talks to a home-automation hub's REST API on behalf of the telephony
//! layer:
//!
//! - [`HubClient::trigger_webhook`] delivers a [`WebhookEvent`] to the hub's
//!   webhook endpoint.
//! - [`HubClient::call_service`] fires a service such as `switch.toggle`.
//! - [`HubClient::synthesize`] asks the hub for speech, downloads it, and
//!   decodes it into a WAV file the telephony layer can play.
//!
//! All endpoints and auth headers come from [`HubConfig`]. Every operation
//! makes a single attempt; there is no retry or queuing.
//!
//! ```rust,ignore
//! use hasip_hub::{HubClient, HubConfig, TtsSettings, WebhookEvent};
//!
//! let config = HubConfig::new("http://hass:8123/api", token, "google_translate", "en", "sip");
//! let client = HubClient::new(config, &TtsSettings::default());
//!
//! client.trigger_webhook(&WebhookEvent::dtmf_digit(caller, None, '1')).await?;
//! let audio = client.synthesize("Door opened", None).await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
mod request;
pub mod transcode;
pub mod tts;

pub use client::{DispatchOutcome, HubClient};
pub use config::{HubConfig, TtsSettings, DEFAULT_TTS_LANGUAGE, FALLBACK_AUDIO};
pub use error::HubError;
pub use hasip_types::{parse_caller, TtsAudio, WebhookEvent};
pub use transcode::Transcoder;
pub use tts::TtsService;
