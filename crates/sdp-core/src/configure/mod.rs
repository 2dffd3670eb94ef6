use std::sync::Arc;

use sdp_model::SlaveName;
use tokio::task::JoinHandle;
use tracing::{error, trace};

use crate::{
    controller::{Controller, ControllerEvent},
    error::CoreError,
    starter::SlaveLauncher,
};

/// Slave started by the configuration task unless overridden: the local telescope state.
pub const DEFAULT_SLAVE: &str = "lts";

/// Single-shot configuration of the system.
///
/// Starts one slave, then tells the controller it is done. Runs off the caller's task so the controller's
/// event loop keeps running during the container-engine round trip.
pub struct Configure {
    launcher: Arc<SlaveLauncher>,
    controller: Arc<dyn Controller>,
    slave: SlaveName,
}

impl Configure {
    pub fn new(launcher: Arc<SlaveLauncher>, controller: Arc<dyn Controller>) -> Self {
        Self {
            launcher,
            controller,
            slave: SlaveName::from(DEFAULT_SLAVE),
        }
    }

    pub fn with_slave(mut self, slave: impl Into<SlaveName>) -> Self {
        self.slave = slave.into();
        self
    }

    pub fn slave(&self) -> &SlaveName {
        &self.slave
    }

    /// Run on a tokio task; the handle yields the outcome of the launch.
    pub fn spawn(self) -> JoinHandle<Result<(), CoreError>> {
        tokio::spawn(self.run())
    }

    /// Start the slave and post exactly one event.
    ///
    /// `configure done` is posted when the launch returns normally, including when the slave was skipped
    /// for a bad type. Otherwise `configure failed` is posted and the error is returned.
    pub async fn run(self) -> Result<(), CoreError> {
        trace!(target: "sdp.core.configure", slave = %self.slave, "starting configuration");

        match self.launcher.start_slave(&self.slave).await {
            Ok(()) => {
                trace!(target: "sdp.core.configure", "configure done");
                self.controller.post_event(ControllerEvent::ConfigureDone);
                Ok(())
            }
            Err(e) => {
                error!(target: "sdp.core.configure", slave = %self.slave, "configuration failed: {e}");
                self.controller.post_event(ControllerEvent::ConfigureFailed {
                    reason: e.to_string(),
                });
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use sdp_model::{SlaveKind, SlaveSpec};

    use super::*;
    use crate::{
        controller::event_channel,
        heartbeat::HeartbeatTargets,
        registry::SlaveRegistry,
        router::LauncherRouter,
        testing::{FakeLauncher, container_spec},
    };

    fn launcher_with(spec: SlaveSpec, fake: Arc<FakeLauncher>) -> (Arc<SlaveLauncher>, HeartbeatTargets) {
        let registry = SlaveRegistry::new();
        registry.insert(DEFAULT_SLAVE, spec).unwrap();
        let targets = HeartbeatTargets::new();
        let launcher = SlaveLauncher::new(
            registry,
            LauncherRouter::new().with_launcher(fake),
            Arc::new(targets.clone()),
        );
        (Arc::new(launcher), targets)
    }

    #[tokio::test]
    async fn posts_done_once_after_successful_start() {
        let fake = Arc::new(FakeLauncher::succeeding("172.17.0.2", "abc123"));
        let (launcher, targets) = launcher_with(container_spec(), Arc::clone(&fake));
        let (channel, mut events) = event_channel();

        let configure = Configure::new(Arc::clone(&launcher), Arc::new(channel));
        assert_eq!(configure.slave().as_str(), "lts");
        configure.spawn().await.unwrap().unwrap();

        assert_eq!(events.recv().await, Some(ControllerEvent::ConfigureDone));
        assert!(events.try_recv().is_err());
        assert!(launcher.registry().get("lts").unwrap().is_running());
        assert!(targets.contains("172.17.0.2", 9001));
    }

    #[tokio::test]
    async fn posts_done_after_unknown_type() {
        let fake = Arc::new(FakeLauncher::succeeding("172.17.0.2", "abc123"));
        let spec = SlaveSpec {
            kind: SlaveKind::Unsupported { kind: "vm".into() },
            heartbeat_port: 0,
            rpc_port: 0,
            timeout: 0,
        };
        let (launcher, _targets) = launcher_with(spec, Arc::clone(&fake));
        let (channel, mut events) = event_channel();

        Configure::new(launcher, Arc::new(channel))
            .spawn()
            .await
            .unwrap()
            .unwrap();

        assert_eq!(events.recv().await, Some(ControllerEvent::ConfigureDone));
        assert!(events.try_recv().is_err());
        assert_eq!(fake.calls(), 0);
    }

    #[tokio::test]
    async fn launch_failure_posts_failed_instead_of_done() {
        let fake = Arc::new(FakeLauncher::failing("engine unreachable"));
        let (launcher, _targets) = launcher_with(container_spec(), Arc::clone(&fake));
        let (channel, mut events) = event_channel();

        let err = Configure::new(launcher, Arc::new(channel))
            .spawn()
            .await
            .unwrap()
            .unwrap_err();
        assert!(matches!(err, CoreError::Launch { .. }));

        match events.recv().await {
            Some(ControllerEvent::ConfigureFailed { reason }) => {
                assert!(reason.contains("engine unreachable"))
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn with_slave_overrides_target() {
        let fake = Arc::new(FakeLauncher::succeeding("172.17.0.2", "abc123"));
        let (launcher, _targets) = launcher_with(container_spec(), Arc::clone(&fake));
        let (channel, mut events) = event_channel();

        let err = Configure::new(launcher, Arc::new(channel))
            .with_slave("ingest")
            .run()
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::SlaveNotFound(ref name) if name.as_str() == "ingest"));
        assert!(matches!(
            events.recv().await,
            Some(ControllerEvent::ConfigureFailed { .. })
        ));
        assert_eq!(fake.calls(), 0);
    }
}
