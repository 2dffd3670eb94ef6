use std::sync::Arc;

use sdp_model::SlaveName;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    error::CoreError,
    heartbeat::HeartbeatListener,
    registry::{SlaveRegistry, StartAttempt},
    router::LauncherRouter,
};

/// Starts slaves from the registry.
///
/// Dispatches each slave to the launch strategy for its kind, applies the result to the registry and
/// points the heartbeat listener at the started slave.
pub struct SlaveLauncher {
    registry: SlaveRegistry,
    router: LauncherRouter,
    listener: Arc<dyn HeartbeatListener>,
}

impl SlaveLauncher {
    pub fn new(
        registry: SlaveRegistry,
        router: LauncherRouter,
        listener: Arc<dyn HeartbeatListener>,
    ) -> Self {
        Self {
            registry,
            router,
            listener,
        }
    }

    pub fn registry(&self) -> &SlaveRegistry {
        &self.registry
    }

    /// Start one slave.
    ///
    /// Returns `Ok(())` when the slave was started, and also when it was skipped on a per-slave
    /// configuration problem (unknown type, already running or being started by another caller); those are
    /// logged and leave the registry untouched. Launch failures are returned as [`CoreError::Launch`].
    #[instrument(level = "debug", skip(self), fields(slave = %name))]
    pub async fn start_slave(&self, name: &SlaveName) -> Result<(), CoreError> {
        let claim = match self.registry.begin_start(name.as_str())? {
            StartAttempt::Claimed(claim) => claim,
            StartAttempt::Running(descriptor) => {
                warn!(
                    target: "sdp.core.launcher",
                    container = ?descriptor.container_id(),
                    "slave is already running; not starting it again"
                );
                return Ok(());
            }
            StartAttempt::InProgress => {
                warn!(target: "sdp.core.launcher", "slave is already being started; not starting it again");
                return Ok(());
            }
        };
        let spec = claim.descriptor().spec.clone();

        let launcher = match self.router.route(name, &spec.kind) {
            Ok(launcher) => launcher,
            Err(e) if e.is_recoverable() => {
                error!(target: "sdp.core.launcher", "{e}");
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        debug!(
            target: "sdp.core.launcher",
            launcher = launcher.name(),
            kind = spec.kind.kind(),
            "launching slave"
        );
        let started = launcher
            .launch(name, &spec)
            .await
            .map_err(|source| CoreError::Launch {
                name: name.clone(),
                source,
            })?;

        let address = started.address.clone();
        let container_id = started.container_id.clone();
        claim.complete(started)?;

        info!(target: "sdp.core.launcher", "{name} started in container {container_id} at {address}");

        self.listener.connect(&address, spec.heartbeat_port);
        Ok(())
    }
}
