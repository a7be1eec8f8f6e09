//! On-disk config schema.
//!
//! ```toml
//! [twilio]
//! account_id         = "ACxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx"
//! auth_token         = "${TWILIO_AUTH_TOKEN}"
//! sender_identity    = "whatsapp:+14155238886"
//! recipient_identity = "whatsapp:+5215550001111"
//! ```

use {secrecy::Secret, serde::Deserialize};

/// Root configuration. Every field is optional here; required options are
/// enforced when resolving into [`crate::DispatchSettings`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HeraldConfig {
    pub twilio: TwilioSection,
}

/// Gateway account and addressing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TwilioSection {
    /// Channel-prefixed sender address, e.g. `whatsapp:+14155238886`.
    pub sender_identity: Option<String>,

    /// Channel-prefixed recipient address.
    pub recipient_identity: Option<String>,

    /// Account SID.
    pub account_id: Option<String>,

    pub auth_token: Option<Secret<String>>,

    /// Override the API base URL (defaults to `https://api.twilio.com`).
    pub api_base_url: Option<String>,
}

impl HeraldConfig {
    /// Replace the configured identities with per-invocation values.
    pub fn override_identities(&mut self, sender: Option<String>, recipient: Option<String>) {
        if let Some(sender) = sender {
            self.twilio.sender_identity = Some(sender);
        }
        if let Some(recipient) = recipient {
            self.twilio.recipient_identity = Some(recipient);
        }
    }
}
