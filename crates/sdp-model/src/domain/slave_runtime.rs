use serde::{Deserialize, Serialize};

use crate::{ContainerId, TimeoutSecs};

/// Outcome of a successful launch, before it is applied to the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartedSlave {
    /// Address the slave is reachable at (container IP).
    pub address: String,
    /// Handle of the container running the slave.
    pub container_id: ContainerId,
}

/// Runtime fields of a started slave.
///
/// All fields are set together, see [`crate::SlaveDescriptor::mark_running`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlaveRuntime {
    pub address: String,
    pub container_id: ContainerId,
    /// Seconds remaining before the slave is considered lost.
    ///
    /// Initialised from the configured timeout; nothing decrements it yet.
    pub timeout_counter: TimeoutSecs,
}
