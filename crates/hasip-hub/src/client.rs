use crate::config::{HubConfig, TtsSettings};
use crate::error::HubError;
use crate::request::with_auth;
use crate::tts::TtsService;
use hasip_types::{TtsAudio, WebhookEvent};
use serde::Serialize;
use tracing::{info, warn};

/// Result of a one-shot call to the hub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The hub answered with a 2xx status.
    Delivered { status: u16, body: String },
    /// The hub answered with any other status.
    Rejected { status: u16, body: String },
    /// Nothing was sent.
    Skipped { reason: String },
}

impl DispatchOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Delivered { status, .. } | Self::Rejected { status, .. } => Some(*status),
            Self::Skipped { .. } => None,
        }
    }
}

#[derive(Debug, Serialize)]
struct ServiceCall<'a> {
    entity_id: &'a str,
}

/// Client for the hub's REST API.
///
/// Each operation makes exactly one attempt. Hub-side failures come back as
/// [`DispatchOutcome::Rejected`] and are already logged, so callers that only
/// want "log and move on" can discard the outcome. Transport failures are
/// returned as [`HubError::Network`].
#[derive(Debug, Clone)]
pub struct HubClient {
    config: HubConfig,
    http: reqwest::Client,
    tts: TtsService,
}

impl HubClient {
    pub fn new(config: HubConfig, tts_settings: &TtsSettings) -> Self {
        let http = reqwest::Client::new();
        let tts = TtsService::new(http.clone(), tts_settings);
        Self { config, http, tts }
    }

    /// Synthesizes `message` into a WAV file for playback.
    pub async fn synthesize(
        &self,
        message: &str,
        language: Option<&str>,
    ) -> Result<TtsAudio, HubError> {
        self.tts.synthesize(&self.config, message, language).await
    }

    /// Invokes `domain.service` on `entity_id`, e.g. `switch.toggle`.
    pub async fn call_service(
        &self,
        domain: &str,
        service: &str,
        entity_id: &str,
    ) -> Result<DispatchOutcome, HubError> {
        let url = self.config.service_url(domain, service);
        let response = with_auth(self.http.post(&url), &self.config)
            .json(&ServiceCall { entity_id })
            .send()
            .await?;

        let outcome = read_outcome(response).await?;
        log_outcome("service", &outcome);
        Ok(outcome)
    }

    /// Delivers `event` to the configured webhook.
    ///
    /// Returns [`DispatchOutcome::Skipped`] without touching the network when
    /// no webhook id is configured.
    pub async fn trigger_webhook(&self, event: &WebhookEvent) -> Result<DispatchOutcome, HubError> {
        if !self.config.has_webhook() {
            warn!(event = event.event_type(), "no webhook defined");
            return Ok(DispatchOutcome::Skipped {
                reason: "no webhook defined".to_string(),
            });
        }

        info!(webhook_id = %self.config.webhook_id, data = %event, "calling webhook");
        let response = with_auth(self.http.post(self.config.webhook_url()), &self.config)
            .json(event)
            .send()
            .await?;

        let outcome = read_outcome(response).await?;
        log_outcome("webhook", &outcome);
        Ok(outcome)
    }
}

async fn read_outcome(response: reqwest::Response) -> Result<DispatchOutcome, HubError> {
    let status = response.status();
    let body = response.text().await?;
    Ok(if status.is_success() {
        DispatchOutcome::Delivered {
            status: status.as_u16(),
            body,
        }
    } else {
        DispatchOutcome::Rejected {
            status: status.as_u16(),
            body,
        }
    })
}

fn log_outcome(kind: &'static str, outcome: &DispatchOutcome) {
    match outcome {
        DispatchOutcome::Delivered { status, body } => {
            info!(kind, status, body = %body, "hub response");
        }
        DispatchOutcome::Rejected { status, body } => {
            warn!(kind, status, body = %body, "hub rejected request");
        }
        DispatchOutcome::Skipped { reason } => {
            info!(kind, reason = %reason, "request skipped");
        }
    }
}
