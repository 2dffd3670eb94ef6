//! Test doubles shared by the unit tests of this crate.

use std::{
    io,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use sdp_model::{ContainerId, SlaveKind, SlaveName, SlaveSpec, StartedSlave};
use tracing::subscriber::DefaultGuard;

use crate::{error::LaunchError, launcher::Launcher};

pub fn container_spec() -> SlaveSpec {
    SlaveSpec {
        kind: SlaveKind::Container {
            image: "slave:latest".into(),
            engine_url: "tcp://host:2375".into(),
        },
        heartbeat_port: 9001,
        rpc_port: 9002,
        timeout: 30,
    }
}

/// Container launcher that never talks to an engine.
pub struct FakeLauncher {
    outcome: Result<StartedSlave, String>,
    calls: AtomicUsize,
}

impl FakeLauncher {
    pub fn succeeding(address: &str, container_id: &str) -> Self {
        Self {
            outcome: Ok(StartedSlave {
                address: address.to_string(),
                container_id: ContainerId::from(container_id),
            }),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            outcome: Err(reason.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Launcher for FakeLauncher {
    fn name(&self) -> &'static str {
        "fake-container"
    }

    fn supports(&self, kind: &SlaveKind) -> bool {
        kind.is_container()
    }

    async fn launch(&self, _name: &SlaveName, _spec: &SlaveSpec) -> Result<StartedSlave, LaunchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Ok(started) => Ok(started.clone()),
            Err(reason) => Err(LaunchError::engine(io::Error::other(reason.clone()))),
        }
    }
}

/// Container launcher that yields to the scheduler mid-launch and hands out a new container per call.
#[derive(Default)]
pub struct YieldingLauncher {
    calls: AtomicUsize,
}

impl YieldingLauncher {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Launcher for YieldingLauncher {
    fn name(&self) -> &'static str {
        "yielding-container"
    }

    fn supports(&self, kind: &SlaveKind) -> bool {
        kind.is_container()
    }

    async fn launch(&self, _name: &SlaveName, _spec: &SlaveSpec) -> Result<StartedSlave, LaunchError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        Ok(StartedSlave {
            address: format!("10.0.0.{n}"),
            container_id: ContainerId::from(format!("c{n}")),
        })
    }
}

/// Log lines written while the returned guard is alive (current thread only).
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn capture_logs() -> (CapturedLogs, DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .with_writer(move || writer.clone())
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}
