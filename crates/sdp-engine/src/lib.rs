//! Container-engine backed slaves.
//!
//! [`HttpEngine`] speaks the Docker Engine HTTP API (create, start, inspect);
//! [`ContainerLauncher`] is the [`sdp_core::Launcher`] for [`sdp_model::SlaveKind::Container`] slaves.

mod error;
pub use error::EngineError;

pub mod endpoint;

pub mod client;
pub use client::{
    Bind, BindMode, ContainerEngine, ContainerInfo, CreateContainer, EngineConfig, EngineConnector,
    HttpConnector, HttpEngine,
};

mod wire;

pub mod launcher;
pub use launcher::{ContainerLaunchConfig, ContainerLauncher};
