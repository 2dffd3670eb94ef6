use async_trait::async_trait;
use sdp_model::{SlaveKind, SlaveName, SlaveSpec, StartedSlave};

use crate::error::LaunchError;

/// A launch strategy for one family of [`SlaveKind`]s.
///
/// Implementations perform the external side effects (e.g. creating a container) and report where the
/// slave can be reached. They never touch the registry; the caller applies the returned [`StartedSlave`].
#[async_trait]
pub trait Launcher: Send + Sync + 'static {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Whether this strategy can start slaves of the given kind.
    fn supports(&self, kind: &SlaveKind) -> bool;

    /// Start the slave and return its address and handle.
    async fn launch(&self, name: &SlaveName, spec: &SlaveSpec) -> Result<StartedSlave, LaunchError>;
}
