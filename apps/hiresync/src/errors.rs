use thiserror::Error;

/// Error type shared by every network-facing operation in the crate.
///
/// Normalizers never produce this; only requests, fallbacks and validation
/// before a write do.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error for {url}: {message}")]
    Transport { url: String, message: String },

    #[error("{message}")]
    Http {
        status: u16,
        url: String,
        message: String,
    },

    #[error("Expected JSON from {url} but received: {snippet}")]
    UnexpectedBody { url: String, snippet: String },

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Validation(String),

    #[error("No candidate endpoints were provided")]
    NoCandidates,

    #[error("Invalid request URL '{0}'")]
    InvalidUrl(String),
}

impl ClientError {
    pub fn transport(url: impl Into<String>, err: reqwest::Error) -> Self {
        ClientError::Transport {
            url: url.into(),
            message: err.to_string(),
        }
    }

    /// HTTP status for server rejections, `None` for everything else.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_displays_message_only() {
        let err = ClientError::Http {
            status: 404,
            url: "http://localhost/api/jobs".to_string(),
            message: "Job not found".to_string(),
        };
        assert_eq!(err.to_string(), "Job not found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_validation_has_no_status() {
        let err = ClientError::Validation("Job title is required".to_string());
        assert!(err.is_validation());
        assert_eq!(err.status(), None);
    }
}
