use elasticsearch::http::transport::BuildError;
use elasticsearch::Error as ElasticsearchError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid Elasticsearch URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Transport build error: {0}")]
    Build(#[from] BuildError),

    /// The engine could not be reached or the connection failed mid-request.
    #[error("Transport error: {0}")]
    Transport(#[from] ElasticsearchError),

    /// The engine answered with a non-success status.
    #[error("Request rejected with status {status}: {reason}")]
    Rejected { status: u16, reason: String },

    /// The response body did not have the expected shape.
    #[error("Decode error: {0}")]
    Decode(#[from] SerdeJsonError),
}

impl AppError {
    pub fn is_transport(&self) -> bool {
        matches!(self, AppError::Transport(_))
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, AppError::Rejected { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, AppError::Decode(_))
    }
}
