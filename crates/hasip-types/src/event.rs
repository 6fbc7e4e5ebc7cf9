//! Webhook event taxonomy.

use serde::{Deserialize, Serialize};

/// Telephony lifecycle events delivered to the hub webhook.
///
/// Serialised as a flat JSON object whose `event` field names the variant,
/// e.g. `{"event":"dtmf_digit","caller":"sip:1@h","parsed_caller":"1","digit":"5"}`.
/// The variant fully determines the remaining fields. Unknown fields on input
/// are ignored and never written back out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WebhookEvent {
    /// A call is ringing and has not been answered yet.
    IncomingCall {
        /// Raw caller identifier as reported by the SIP stack.
        caller: String,
        /// Normalised caller number, if one could be extracted.
        parsed_caller: Option<String>,
    },

    /// The call was answered and media is flowing.
    CallEstablished {
        caller: String,
        parsed_caller: Option<String>,
    },

    /// The remote side hung up or the call was torn down.
    CallDisconnected {
        caller: String,
        parsed_caller: Option<String>,
    },

    /// The caller navigated into a menu.
    EnteredMenu {
        caller: String,
        parsed_caller: Option<String>,
        /// Identifier of the menu that was entered.
        menu_id: String,
    },

    /// The caller pressed a key.
    DtmfDigit {
        caller: String,
        parsed_caller: Option<String>,
        /// The key, serialised as a one-character string.
        digit: char,
    },

    /// No input arrived before the menu timed out.
    Timeout,
}

impl WebhookEvent {
    /// Builds [`WebhookEvent::IncomingCall`] for a ringing call.
    pub fn incoming_call(caller: impl Into<String>, parsed_caller: Option<String>) -> Self {
        Self::IncomingCall {
            caller: caller.into(),
            parsed_caller,
        }
    }

    /// Builds [`WebhookEvent::CallEstablished`] once the call is answered.
    pub fn call_established(caller: impl Into<String>, parsed_caller: Option<String>) -> Self {
        Self::CallEstablished {
            caller: caller.into(),
            parsed_caller,
        }
    }

    /// Builds [`WebhookEvent::CallDisconnected`] after hang-up.
    pub fn call_disconnected(caller: impl Into<String>, parsed_caller: Option<String>) -> Self {
        Self::CallDisconnected {
            caller: caller.into(),
            parsed_caller,
        }
    }

    /// Builds [`WebhookEvent::EnteredMenu`] for the menu `menu_id`.
    pub fn entered_menu(
        caller: impl Into<String>,
        parsed_caller: Option<String>,
        menu_id: impl Into<String>,
    ) -> Self {
        Self::EnteredMenu {
            caller: caller.into(),
            parsed_caller,
            menu_id: menu_id.into(),
        }
    }

    /// Builds [`WebhookEvent::DtmfDigit`]. `digit` is passed through unchecked.
    pub fn dtmf_digit(caller: impl Into<String>, parsed_caller: Option<String>, digit: char) -> Self {
        Self::DtmfDigit {
            caller: caller.into(),
            parsed_caller,
            digit,
        }
    }

    /// Builds [`WebhookEvent::Timeout`], which carries no caller.
    pub fn timeout() -> Self {
        Self::Timeout
    }

    /// Returns the wire tag for this event.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::IncomingCall { .. } => "incoming_call",
            Self::CallEstablished { .. } => "call_established",
            Self::CallDisconnected { .. } => "call_disconnected",
            Self::EnteredMenu { .. } => "entered_menu",
            Self::DtmfDigit { .. } => "dtmf_digit",
            Self::Timeout => "timeout",
        }
    }

    /// Returns the raw caller, or `None` for events not tied to a caller.
    pub fn caller(&self) -> Option<&str> {
        match self {
            Self::IncomingCall { caller, .. }
            | Self::CallEstablished { caller, .. }
            | Self::CallDisconnected { caller, .. }
            | Self::EnteredMenu { caller, .. }
            | Self::DtmfDigit { caller, .. } => Some(caller),
            Self::Timeout => None,
        }
    }

    /// Returns the normalised caller if the event carries one.
    pub fn parsed_caller(&self) -> Option<&str> {
        match self {
            Self::IncomingCall { parsed_caller, .. }
            | Self::CallEstablished { parsed_caller, .. }
            | Self::CallDisconnected { parsed_caller, .. }
            | Self::EnteredMenu { parsed_caller, .. }
            | Self::DtmfDigit { parsed_caller, .. } => parsed_caller.as_deref(),
            Self::Timeout => None,
        }
    }
}

impl std::fmt::Display for WebhookEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => f.write_str(self.event_type()),
        }
    }
}
