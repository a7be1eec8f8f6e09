use {
    herald_config::{DEFAULT_API_BASE_URL, DispatchSettings},
    secrecy::Secret,
};

/// Credential pair plus the API endpoint it is valid for.
#[derive(Clone)]
pub struct TwilioAccount {
    pub account_sid: String,
    pub auth_token: Secret<String>,
    pub api_base_url: String,
}

impl std::fmt::Debug for TwilioAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwilioAccount")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"[REDACTED]")
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

impl TwilioAccount {
    /// Account against the public Twilio API.
    pub fn new(account_sid: impl Into<String>, auth_token: Secret<String>) -> Self {
        Self {
            account_sid: account_sid.into(),
            auth_token,
            api_base_url: DEFAULT_API_BASE_URL.into(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

impl From<&DispatchSettings> for TwilioAccount {
    fn from(settings: &DispatchSettings) -> Self {
        Self {
            account_sid: settings.account_id.clone(),
            auth_token: settings.auth_token.clone(),
            api_base_url: settings.api_base_url.clone(),
        }
    }
}
