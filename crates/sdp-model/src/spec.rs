use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Port, SlaveKind, SlaveName, TimeoutSecs};

/// Static description of a slave, as written in the slave map.
///
/// ```json
/// { "type": "docker", "image": "slave:latest", "engine_url": "tcp://host:2375",
///   "heartbeat_port": 9001, "rpc_port": 9002, "timeout": 30 }
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SlaveSpec {
    /// Launch strategy and its parameters (`type`, `image`, `engine_url`).
    #[serde(flatten)]
    pub kind: SlaveKind,
    /// Port the slave sends heartbeats from. `0` means "not configured".
    #[serde(default)]
    pub heartbeat_port: Port,
    /// Port the slave serves RPC on. `0` means "not configured".
    #[serde(default)]
    pub rpc_port: Port,
    /// Configured timeout in seconds.
    #[serde(default)]
    pub timeout: TimeoutSecs,
}

/// The slave map: slave name to its static description.
pub type SlaveMap = BTreeMap<SlaveName, SlaveSpec>;
