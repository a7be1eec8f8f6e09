use {
    herald_common::{MessageId, OutboundMessage, SubmissionError},
    tracing::{debug, info, warn},
};

use crate::plugin::ChannelOutbound;

/// Builds one [`OutboundMessage`] per call and hands it to the gateway.
///
/// Each call is an independent submission: nothing is cached or
/// deduplicated, and failures are returned as-is.
pub struct Dispatcher<G> {
    gateway: G,
}

impl<G: ChannelOutbound> Dispatcher<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub async fn send(
        &self,
        sender: &str,
        recipient: &str,
        body: &str,
    ) -> Result<MessageId, SubmissionError> {
        let message = OutboundMessage::new(sender, recipient, body);
        debug!(
            gateway = self.gateway.id(),
            channel = message.channel().unwrap_or("-"),
            body_len = message.body.len(),
            "submitting message"
        );

        match self.gateway.send_text(&message).await {
            Ok(id) => {
                info!(gateway = self.gateway.id(), message_id = %id, "message accepted");
                Ok(id)
            },
            Err(e) => {
                warn!(
                    gateway = self.gateway.id(),
                    status = e.status,
                    provider_code = e.provider_code,
                    error = %e,
                    "message rejected"
                );
                Err(e)
            },
        }
    }
}
