use std::error::Error as StdError;

use sdp_model::SlaveName;
use thiserror::Error;

/// Errors produced by a [`crate::Launcher`] strategy.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("unsupported slave type for this launcher: {0}")]
    UnsupportedKind(String),
    #[error("invalid slave spec: {0}")]
    InvalidSpec(String),
    #[error("container engine error: {0}")]
    Engine(#[source] Box<dyn StdError + Send + Sync>),
}

impl LaunchError {
    pub fn engine<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        LaunchError::Engine(Box::new(err))
    }
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("slave not found: {0}")]
    SlaveNotFound(SlaveName),

    #[error("slave {0} is already running or being started")]
    SlaveActive(SlaveName),

    #[error("failed to start \"{name}\": \"{kind}\" is not a known slave type")]
    UnknownSlaveType { name: SlaveName, kind: String },

    #[error("failed to start \"{name}\": {source}")]
    Launch {
        name: SlaveName,
        #[source]
        source: LaunchError,
    },

    #[error("invalid slave map: {0}")]
    SlaveMap(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Per-slave configuration problems that must not abort configuration of other slaves.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CoreError::UnknownSlaveType { .. })
    }
}
