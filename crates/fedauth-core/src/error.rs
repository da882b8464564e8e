// Error type shared across the fedauth crates.
//
// One enum covers the whole library: the single structural failure the
// adapter contract defines (a response missing its expected top-level key),
// plus configuration and transport failures from the surrounding machinery.

/// Library-wide error type.
#[derive(Debug, thiserror::Error)]
pub enum FedAuthError {
    /// The provider API response is structurally missing an expected key.
    /// Fatal to the call: no retry, no partial result.
    #[error("Provider API returned an unexpected response: {0}")]
    UnexpectedApiResponse(String),

    /// Bad adapter configuration (empty client id, unparseable base URL, ...).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The HTTP request failed, returned a non-success status, or the body
    /// could not be parsed as JSON.
    #[error("API request failed: {0}")]
    Transport(String),

    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl FedAuthError {
    /// Shorthand for the missing-key protocol violation.
    pub fn unexpected(missing_key: &str) -> Self {
        Self::UnexpectedApiResponse(format!("missing `{missing_key}`"))
    }
}

/// Unified result type for fedauth operations.
pub type Result<T> = std::result::Result<T, FedAuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_names_the_key() {
        let err = FedAuthError::unexpected("resourceName");
        assert_eq!(
            err.to_string(),
            "Provider API returned an unexpected response: missing `resourceName`"
        );
    }

    #[test]
    fn test_transport_display() {
        let err = FedAuthError::Transport("status 500".into());
        assert_eq!(err.to_string(), "API request failed: status 500");
    }

    #[test]
    fn test_anyhow_is_transparent() {
        let err: FedAuthError = anyhow::anyhow!("boom").into();
        assert_eq!(err.to_string(), "boom");
    }
}
