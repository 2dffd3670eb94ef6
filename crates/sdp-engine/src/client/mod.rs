use std::{fmt, path::PathBuf, sync::Arc};

use async_trait::async_trait;
use sdp_model::ContainerId;

use crate::error::EngineError;

mod http;
pub use http::{EngineConfig, HttpConnector, HttpEngine};

/// Access mode of a bind mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindMode {
    ReadWrite,
    ReadOnly,
}

impl BindMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BindMode::ReadWrite => "rw",
            BindMode::ReadOnly => "ro",
        }
    }
}

/// Host directory mounted into the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bind {
    pub host: PathBuf,
    pub container: String,
    pub mode: BindMode,
}

impl fmt::Display for Bind {
    /// Engine notation: `host:container:mode`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.host.display(),
            self.container,
            self.mode.as_str()
        )
    }
}

/// Container creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateContainer {
    pub image: String,
    /// Command run in the container, program first.
    pub cmd: Vec<String>,
    /// In-container paths declared as volumes.
    pub volumes: Vec<String>,
    pub binds: Vec<Bind>,
}

/// The parts of `inspect` the launcher needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerInfo {
    pub id: ContainerId,
    /// Address on the engine's default network; empty when the container has none.
    pub ip_address: String,
}

/// A remote container engine.
#[async_trait]
pub trait ContainerEngine: Send + Sync {
    async fn create_container(&self, request: &CreateContainer) -> Result<ContainerId, EngineError>;

    async fn start_container(&self, id: &ContainerId) -> Result<(), EngineError>;

    async fn inspect_container(&self, id: &ContainerId) -> Result<ContainerInfo, EngineError>;
}

/// Opens a client for the engine named in a slave's `engine_url`.
pub trait EngineConnector: Send + Sync + 'static {
    fn connect(&self, engine_url: &str) -> Result<Arc<dyn ContainerEngine>, EngineError>;
}
