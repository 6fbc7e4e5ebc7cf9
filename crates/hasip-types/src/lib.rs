//! Shared types for the ha-sip hub bridge.
//!
//! This crate holds the data that crosses the boundary between the telephony
//! layer and the hub client: the closed set of webhook events raised during a
//! call, caller-id normalization, and the audio handle returned by speech
//! synthesis.
//!
//! Nothing here performs I/O except [`TtsAudio::release`], which removes an
//! owned temporary file.

mod audio;
mod caller;
mod event;

pub use audio::TtsAudio;
pub use caller::parse_caller;
pub use event::WebhookEvent;
