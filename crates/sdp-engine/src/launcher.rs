use std::{
    env,
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use sdp_core::{LaunchError, Launcher};
use sdp_model::{SlaveKind, SlaveName, SlaveSpec, StartedSlave};
use tracing::{debug, trace, warn};

use crate::{
    client::{Bind, BindMode, CreateContainer, EngineConnector},
    error::EngineError,
};

/// Program started inside the slave container.
pub const DEFAULT_ENTRYPOINT: &str = "/home/sdp/docker_slave.py";
/// Host directory holding the slave components.
pub const DEFAULT_COMPONENTS_DIR: &str = "components";
/// Where the components directory is mounted inside the container.
pub const DEFAULT_MOUNT_PATH: &str = "/home/sdp/components/";

/// How slave containers are laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerLaunchConfig {
    pub entrypoint: String,
    /// Relative paths are resolved against the working directory at launch time.
    pub components_dir: PathBuf,
    pub mount_path: String,
}

impl Default for ContainerLaunchConfig {
    fn default() -> Self {
        Self {
            entrypoint: DEFAULT_ENTRYPOINT.to_string(),
            components_dir: PathBuf::from(DEFAULT_COMPONENTS_DIR),
            mount_path: DEFAULT_MOUNT_PATH.to_string(),
        }
    }
}

impl ContainerLaunchConfig {
    /// Absolute host path of the components directory.
    pub fn resolve_components_dir(&self) -> Result<PathBuf, EngineError> {
        if self.components_dir.is_absolute() {
            return Ok(self.components_dir.clone());
        }
        Ok(env::current_dir()?.join(&self.components_dir))
    }
}

/// [`Launcher`] for [`SlaveKind::Container`] slaves.
///
/// Creates a container from the slave's image on the engine named in the slave map, starts it and reports the
/// address the engine assigned to it.
pub struct ContainerLauncher {
    cfg: ContainerLaunchConfig,
    connector: Arc<dyn EngineConnector>,
}

impl ContainerLauncher {
    pub fn new(connector: Arc<dyn EngineConnector>) -> Self {
        Self::with_config(connector, ContainerLaunchConfig::default())
    }

    pub fn with_config(connector: Arc<dyn EngineConnector>, cfg: ContainerLaunchConfig) -> Self {
        Self { cfg, connector }
    }

    /// Creation request for one slave, with the components directory mounted from `host_dir`.
    pub fn build_request(
        &self,
        name: &SlaveName,
        image: &str,
        spec: &SlaveSpec,
        host_dir: &Path,
    ) -> CreateContainer {
        CreateContainer {
            image: image.to_string(),
            cmd: vec![
                self.cfg.entrypoint.clone(),
                name.to_string(),
                spec.heartbeat_port.to_string(),
                spec.rpc_port.to_string(),
            ],
            volumes: vec![self.cfg.mount_path.clone()],
            binds: vec![Bind {
                host: host_dir.to_path_buf(),
                container: self.cfg.mount_path.clone(),
                mode: BindMode::ReadWrite,
            }],
        }
    }
}

#[async_trait]
impl Launcher for ContainerLauncher {
    fn name(&self) -> &'static str {
        "container-launcher"
    }

    fn supports(&self, kind: &SlaveKind) -> bool {
        kind.is_container()
    }

    async fn launch(&self, name: &SlaveName, spec: &SlaveSpec) -> Result<StartedSlave, LaunchError> {
        let SlaveKind::Container { image, engine_url } = &spec.kind else {
            return Err(LaunchError::UnsupportedKind(spec.kind.kind().to_string()));
        };
        if spec.heartbeat_port == 0 || spec.rpc_port == 0 {
            return Err(LaunchError::InvalidSpec(format!(
                "{name}: heartbeat_port and rpc_port must be set"
            )));
        }

        let engine = self.connector.connect(engine_url)?;
        let host_dir = self.cfg.resolve_components_dir()?;
        let request = self.build_request(name, image, spec, &host_dir);

        let id = engine.create_container(&request).await?;
        debug!(target: "sdp.engine.container", slave = %name, container = %id, %image, "container created");

        engine.start_container(&id).await?;
        trace!(target: "sdp.engine.container", slave = %name, container = %id, "container started");

        let info = engine.inspect_container(&id).await?;
        if info.ip_address.is_empty() {
            warn!(
                target: "sdp.engine.container",
                slave = %name,
                container = %id,
                "container is running without an IP address and is left in place; remove it manually"
            );
            return Err(EngineError::NoAddress(id).into());
        }

        Ok(StartedSlave {
            address: info.ip_address,
            container_id: id,
        })
    }
}
