use thiserror::Error;

/// The one failure a dispatch can end in.
///
/// Authentication rejections, malformed addresses, transport errors and
/// unreadable gateway responses all land here. `status` and
/// `provider_code` are diagnostic only.
#[derive(Debug, Error)]
#[error("submission failed: {reason}")]
pub struct SubmissionError {
    pub reason: String,
    pub status: Option<u16>,
    pub provider_code: Option<i64>,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl SubmissionError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            status: None,
            provider_code: None,
            source: None,
        }
    }

    /// Rejection returned by the gateway with an HTTP status.
    pub fn rejected(status: u16, provider_code: Option<i64>, reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            status: Some(status),
            provider_code,
            source: None,
        }
    }

    #[must_use]
    pub fn with_source(
        mut self,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_submission_failed() {
        let err = SubmissionError::rejected(401, Some(20003), "Authenticate");
        assert_eq!(err.to_string(), "submission failed: Authenticate");
        assert_eq!(err.status, Some(401));
        assert_eq!(err.provider_code, Some(20003));
    }

    #[test]
    fn source_is_chained() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = SubmissionError::new("transport error").with_source(io);
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("refused"));
    }
}
