use std::{env, sync::Arc};

use sdp_core::{
    Configure, ControllerEvent, DEFAULT_SLAVE, HeartbeatTargets, LauncherRouter, SlaveLauncher,
    SlaveRegistry, event_channel,
};
use sdp_engine::{ContainerLauncher, EngineConfig, HttpConnector};
use sdp_model::SlaveState;
use sdp_observe::{LoggerConfig, logger_init};
use tracing::{error, info};

const ENV_SLAVE_MAP: &str = "SDP_SLAVE_MAP";
const ENV_CONFIGURE_SLAVE: &str = "SDP_CONFIGURE_SLAVE";
const DEFAULT_SLAVE_MAP: &str = "slave_map.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger_init(&LoggerConfig::from_env()?)?;

    let map_path = env::args()
        .nth(1)
        .or_else(|| env::var(ENV_SLAVE_MAP).ok())
        .unwrap_or_else(|| DEFAULT_SLAVE_MAP.to_string());
    let slave = env::var(ENV_CONFIGURE_SLAVE).unwrap_or_else(|_| DEFAULT_SLAVE.to_string());

    let registry = SlaveRegistry::load(&map_path)?;
    let names: Vec<String> = registry.names().iter().map(ToString::to_string).collect();
    info!("loaded {} slaves from {map_path}: {}", registry.len(), names.join(", "));

    let connector = HttpConnector::new(&EngineConfig::default())?;
    let router = LauncherRouter::new().with_launcher(Arc::new(ContainerLauncher::new(Arc::new(connector))));
    let heartbeats = HeartbeatTargets::new();
    let launcher = Arc::new(SlaveLauncher::new(
        registry.clone(),
        router,
        Arc::new(heartbeats.clone()),
    ));

    let (controller, mut events) = event_channel();
    let task = Configure::new(launcher, Arc::new(controller))
        .with_slave(slave)
        .spawn();

    match events.recv().await {
        Some(ControllerEvent::ConfigureDone) => info!("configure done"),
        Some(event) => error!("{event}"),
        None => error!("configuration task ended without reporting"),
    }
    let outcome = task.await?;

    for d in registry.list_by_state(SlaveState::Running) {
        info!(
            "{} running (address={}, container={})",
            d.name,
            d.address().unwrap_or("-"),
            d.container_id().map(|c| c.as_str()).unwrap_or("-"),
        );
    }
    let unstarted = registry.list_by_state(SlaveState::Unstarted);
    if !unstarted.is_empty() {
        let names: Vec<&str> = unstarted.iter().map(|d| d.name.as_str()).collect();
        info!("not started: {}", names.join(", "));
    }
    for target in heartbeats.targets() {
        info!("expecting heartbeats from {target}");
    }

    outcome?;
    Ok(())
}
