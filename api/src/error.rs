//! Failure taxonomy for calls against the ledger node.

/// Everything that can go wrong between issuing a request and holding a value.
///
/// Failures fall into two classes that callers report differently:
/// the node answered and said no ([`ApiError::is_rejection`]), or the
/// exchange itself broke down ([`ApiError::is_transport`]).
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The node answered `success: false`.
    #[error("request rejected by node: {}", message.as_deref().unwrap_or("no reason given"))]
    Rejected { message: Option<String> },

    /// The node answered `success: true` without the payload the call requires.
    #[error("node reported success but sent no data")]
    MissingData,

    #[error("node responded with HTTP status {0}")]
    Status(u16),

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
}

impl ApiError {
    /// The node itself reported the failure.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. } | Self::MissingData)
    }

    /// The request never produced a usable answer.
    pub fn is_transport(&self) -> bool {
        !self.is_rejection()
    }

    /// The reason given by the node, if it gave one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message } => message.as_deref().filter(|m| !m.is_empty()),
            _ => None,
        }
    }
}
