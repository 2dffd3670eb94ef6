use sdp_core::LaunchError;
use sdp_model::ContainerId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("unsupported container engine endpoint: {0}")]
    UnsupportedEndpoint(String),

    #[error("invalid container engine endpoint {url:?}: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{op} failed with status {status}: {message}")]
    Status {
        op: &'static str,
        status: u16,
        message: String,
    },

    #[error("invalid engine response: {0}")]
    InvalidResponse(String),

    #[error("container {0} has no IP address")]
    NoAddress(ContainerId),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<EngineError> for LaunchError {
    fn from(e: EngineError) -> Self {
        LaunchError::engine(e)
    }
}
