use {
    async_trait::async_trait,
    herald_common::{MessageId, OutboundMessage, SubmissionError},
};

/// Submit messages to an external messaging gateway.
#[async_trait]
pub trait ChannelOutbound: Send + Sync {
    /// Gateway identifier (e.g. "twilio").
    fn id(&self) -> &str;

    /// Submit one message and return the gateway's acknowledgment id.
    ///
    /// Implementations must not validate or rewrite the message, and must
    /// not retry.
    async fn send_text(&self, message: &OutboundMessage) -> Result<MessageId, SubmissionError>;
}
