use secrecy::{ExposeSecret, Secret};

use crate::{
    error::{ConfigError, MissingOption},
    schema::HeraldConfig,
};

pub const DEFAULT_API_BASE_URL: &str = "https://api.twilio.com";

/// Fully resolved settings for one dispatch. Every required option is
/// present and non-empty.
#[derive(Clone)]
pub struct DispatchSettings {
    pub sender_identity: String,
    pub recipient_identity: String,
    pub account_id: String,
    pub auth_token: Secret<String>,
    pub api_base_url: String,
}

impl std::fmt::Debug for DispatchSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchSettings")
            .field("sender_identity", &self.sender_identity)
            .field("recipient_identity", &self.recipient_identity)
            .field("account_id", &self.account_id)
            .field("auth_token", &"[REDACTED]")
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

/// Blank values count as absent. Unresolved `${VAR}` placeholders are
/// already dropped by the loader.
fn present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

impl HeraldConfig {
    /// Validate and resolve into [`DispatchSettings`].
    ///
    /// All missing options are reported together.
    pub fn resolve(self) -> Result<DispatchSettings, ConfigError> {
        let t = self.twilio;
        let mut missing = Vec::new();

        if !present(t.sender_identity.as_deref()) {
            missing.push(MissingOption::SenderIdentity);
        }
        if !present(t.recipient_identity.as_deref()) {
            missing.push(MissingOption::RecipientIdentity);
        }
        if !present(t.account_id.as_deref()) {
            missing.push(MissingOption::AccountId);
        }
        if !present(t.auth_token.as_ref().map(|s| s.expose_secret().as_str())) {
            missing.push(MissingOption::AuthToken);
        }

        match (t.sender_identity, t.recipient_identity, t.account_id, t.auth_token) {
            (Some(sender_identity), Some(recipient_identity), Some(account_id), Some(auth_token))
                if missing.is_empty() =>
            {
                let api_base_url = t
                    .api_base_url
                    .filter(|url| present(Some(url.as_str())))
                    .unwrap_or_else(|| DEFAULT_API_BASE_URL.into());
                Ok(DispatchSettings {
                    sender_identity,
                    recipient_identity,
                    account_id,
                    auth_token,
                    api_base_url,
                })
            },
            _ => Err(ConfigError::Missing(missing)),
        }
    }
}
