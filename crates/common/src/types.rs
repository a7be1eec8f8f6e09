use std::fmt;

use serde::{Deserialize, Serialize};

/// One outbound text message. Addresses are provider-formatted
/// (`whatsapp:+14155238886`) and are never checked locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub from: String,
    pub to: String,
    pub body: String,
}

impl OutboundMessage {
    pub fn new(from: impl Into<String>, to: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            body: body.into(),
        }
    }

    /// Channel tag of the recipient address (`whatsapp` for
    /// `whatsapp:+1555...`). Only used for log fields.
    pub fn channel(&self) -> Option<&str> {
        self.to
            .split_once(':')
            .map(|(prefix, _)| prefix)
            .filter(|prefix| !prefix.is_empty())
    }
}

/// Opaque identifier the gateway assigns to an accepted message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub String);

impl MessageId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for MessageId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
