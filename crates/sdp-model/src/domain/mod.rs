mod slave_name;
pub use slave_name::SlaveName;

mod container_id;
pub use container_id::ContainerId;

mod slave_state;
pub use slave_state::SlaveState;

mod slave_runtime;
pub use slave_runtime::{SlaveRuntime, StartedSlave};

mod slave_descriptor;
pub use slave_descriptor::SlaveDescriptor;

/// Timeout value in seconds.
///
/// Stored per slave and copied into the runtime `timeout_counter` on start.
pub type TimeoutSecs = u64;

/// Network port of a slave endpoint (heartbeat or RPC).
pub type Port = u16;
