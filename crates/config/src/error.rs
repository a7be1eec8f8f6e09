use std::{fmt, path::PathBuf};

use thiserror::Error;

/// A required option that was not supplied by any source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingOption {
    SenderIdentity,
    RecipientIdentity,
    AccountId,
    AuthToken,
}

impl MissingOption {
    pub fn key(self) -> &'static str {
        match self {
            Self::SenderIdentity => "sender_identity",
            Self::RecipientIdentity => "recipient_identity",
            Self::AccountId => "account_id",
            Self::AuthToken => "auth_token",
        }
    }

    pub fn env_var(self) -> &'static str {
        match self {
            Self::SenderIdentity => "HERALD_SENDER_IDENTITY",
            Self::RecipientIdentity => "HERALD_RECIPIENT_IDENTITY",
            Self::AccountId => "HERALD_ACCOUNT_ID",
            Self::AuthToken => "HERALD_AUTH_TOKEN",
        }
    }
}

impl fmt::Display for MissingOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (set {} or twilio.{})", self.key(), self.env_var(), self.key())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("unsupported config format: .{0}")]
    UnsupportedFormat(String),

    #[error("missing required configuration: {}", join_missing(.0))]
    Missing(Vec<MissingOption>),
}

fn join_missing(missing: &[MissingOption]) -> String {
    missing
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
