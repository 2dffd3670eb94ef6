use serde::{Deserialize, Serialize};

use crate::{ContainerId, SlaveName, SlaveRuntime, SlaveSpec, SlaveState, StartedSlave, TimeoutSecs};

/// One entry of the slave registry: static spec plus runtime state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlaveDescriptor {
    pub name: SlaveName,
    #[serde(flatten)]
    pub spec: SlaveSpec,
    #[serde(default)]
    pub state: SlaveState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<SlaveRuntime>,
}

impl SlaveDescriptor {
    /// Create an unstarted descriptor.
    pub fn new(name: impl Into<SlaveName>, spec: SlaveSpec) -> Self {
        Self {
            name: name.into(),
            spec,
            state: SlaveState::Unstarted,
            runtime: None,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == SlaveState::Running
    }

    /// Apply a successful start.
    ///
    /// Sets `address`, `container_id`, `timeout_counter` (from `spec.timeout`) and `state = Running` in one step.
    pub fn mark_running(&mut self, started: StartedSlave) {
        self.runtime = Some(SlaveRuntime {
            address: started.address,
            container_id: started.container_id,
            timeout_counter: self.spec.timeout,
        });
        self.state = SlaveState::Running;
    }

    pub fn address(&self) -> Option<&str> {
        self.runtime.as_ref().map(|r| r.address.as_str())
    }

    pub fn container_id(&self) -> Option<&ContainerId> {
        self.runtime.as_ref().map(|r| &r.container_id)
    }

    pub fn timeout_counter(&self) -> Option<TimeoutSecs> {
        self.runtime.as_ref().map(|r| r.timeout_counter)
    }
}
