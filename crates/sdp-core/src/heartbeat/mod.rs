//! Seam towards the heartbeat listener.
//!
//! The listener itself (socket handling, heartbeat decoding) lives outside this crate; the core only tells it
//! which source to expect heartbeats from once a slave has started.

use std::{
    fmt,
    sync::{Arc, PoisonError, RwLock},
};

use sdp_model::Port;
use tracing::debug;

/// Receives heartbeats from started slaves.
pub trait HeartbeatListener: Send + Sync + 'static {
    /// Register `(address, port)` as an expected heartbeat source.
    fn connect(&self, address: &str, port: Port);
}

/// An expected heartbeat source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HeartbeatTarget {
    pub address: String,
    pub port: Port,
}

impl fmt::Display for HeartbeatTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.address, self.port)
    }
}

/// In-memory [`HeartbeatListener`] that records every `connect` call in order.
#[derive(Clone, Default)]
pub struct HeartbeatTargets {
    inner: Arc<RwLock<Vec<HeartbeatTarget>>>,
}

impl HeartbeatTargets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the registered sources.
    pub fn targets(&self) -> Vec<HeartbeatTarget> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn contains(&self, address: &str, port: Port) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|t| t.address == address && t.port == port)
    }
}

impl HeartbeatListener for HeartbeatTargets {
    fn connect(&self, address: &str, port: Port) {
        let target = HeartbeatTarget {
            address: address.to_string(),
            port,
        };
        debug!(target: "sdp.core.heartbeat", source = %target, "expecting heartbeats");
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_connects_in_order() {
        let targets = HeartbeatTargets::new();
        let listener: Arc<dyn HeartbeatListener> = Arc::new(targets.clone());

        listener.connect("172.17.0.2", 9001);
        listener.connect("172.17.0.3", 9011);

        let seen = targets.targets();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].to_string(), "172.17.0.2:9001");
        assert!(targets.contains("172.17.0.3", 9011));
        assert!(!targets.contains("172.17.0.3", 9001));
    }
}
