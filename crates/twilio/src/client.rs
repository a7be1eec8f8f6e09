use {
    async_trait::async_trait,
    herald_channels::ChannelOutbound,
    herald_common::{MessageId, OutboundMessage, SubmissionError},
    reqwest::Client,
    secrecy::ExposeSecret,
    serde::Deserialize,
    tracing::debug,
};

use crate::account::TwilioAccount;

/// REST API version segment used by the Messages resource.
const API_VERSION: &str = "2010-04-01";

/// Upper bound on raw response text copied into an error reason.
const MAX_ERROR_BODY: usize = 512;

/// Twilio Messages API client. One instance per dispatch.
pub struct TwilioClient {
    client: Client,
    account: TwilioAccount,
}

impl std::fmt::Debug for TwilioClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwilioClient")
            .field("account", &self.account)
            .finish()
    }
}

impl TwilioClient {
    #[must_use]
    pub fn new(account: TwilioAccount) -> Self {
        Self {
            client: Client::new(),
            account,
        }
    }

    pub fn account(&self) -> &TwilioAccount {
        &self.account
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/{API_VERSION}/Accounts/{}/Messages.json",
            self.account.api_base_url.trim_end_matches('/'),
            urlencoding::encode(&self.account.account_sid)
        )
    }
}

#[async_trait]
impl ChannelOutbound for TwilioClient {
    fn id(&self) -> &str {
        "twilio"
    }

    async fn send_text(&self, message: &OutboundMessage) -> Result<MessageId, SubmissionError> {
        let url = self.messages_url();
        debug!(url = %url, to = %message.to, "posting message to Twilio");

        let response = self
            .client
            .post(&url)
            .basic_auth(
                &self.account.account_sid,
                Some(self.account.auth_token.expose_secret()),
            )
            .form(&[
                ("From", message.from.as_str()),
                ("To", message.to.as_str()),
                ("Body", message.body.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SubmissionError::new("failed to reach Twilio").with_source(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(rejection(status.as_u16(), &body));
        }

        let resource: MessageResource = response
            .json()
            .await
            .map_err(|e| SubmissionError::new("unreadable Twilio response").with_source(e))?;

        debug!(
            sid = %resource.sid,
            status = resource.status.as_deref().unwrap_or("-"),
            "Twilio accepted message"
        );
        Ok(MessageId(resource.sid))
    }
}

/// Build the error for a non-2xx answer, preferring Twilio's JSON error
/// body over the raw text.
fn rejection(status: u16, body: &str) -> SubmissionError {
    match serde_json::from_str::<TwilioErrorBody>(body) {
        Ok(TwilioErrorBody {
            code,
            message: Some(message),
            more_info,
        }) => {
            let mut reason = match code {
                Some(code) => format!("Twilio error {code}: {message}"),
                None => format!("Twilio error: {message}"),
            };
            if let Some(more_info) = more_info {
                reason.push_str(&format!(" ({more_info})"));
            }
            SubmissionError::rejected(status, code, reason)
        },
        _ => {
            let snippet: String = body.trim().chars().take(MAX_ERROR_BODY).collect();
            let reason = if snippet.is_empty() {
                format!("Twilio returned HTTP {status}")
            } else {
                format!("Twilio returned HTTP {status}: {snippet}")
            };
            SubmissionError::rejected(status, None, reason)
        },
    }
}

// ── API Types ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct MessageResource {
    sid: String,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TwilioErrorBody {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    more_info: Option<String>,
}
