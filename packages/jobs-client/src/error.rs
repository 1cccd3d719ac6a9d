use thiserror::Error;

pub type Result<T> = std::result::Result<T, JobsClientError>;

/// Errors returned by [`crate::JobsClient`].
///
/// The `Display` output is what ends up in front of the user, so `Api`
/// renders the backend's message verbatim.
#[derive(Debug, Error)]
pub enum JobsClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl JobsClientError {
    /// HTTP status code, when the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            JobsClientError::Api { status, .. } => Some(*status),
            JobsClientError::Network(e) => e.status().map(|s| s.as_u16()),
            JobsClientError::Parse(_) => None,
        }
    }
}
