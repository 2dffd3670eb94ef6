use std::sync::Arc;

use sdp_model::{SlaveKind, SlaveName};
use tracing::{instrument, trace};

use crate::{error::CoreError, launcher::Launcher};

/// Picks the launch strategy for a slave kind.
///
/// Launchers are tried in registration order; the first one that supports the kind wins.
#[derive(Default)]
pub struct LauncherRouter {
    launchers: Vec<Arc<dyn Launcher>>,
}

impl LauncherRouter {
    #[inline]
    pub fn new() -> Self {
        Self {
            launchers: Vec::new(),
        }
    }

    #[inline]
    pub fn register(&mut self, launcher: Arc<dyn Launcher>) {
        self.launchers.push(launcher);
    }

    #[inline]
    pub fn with_launcher(mut self, launcher: Arc<dyn Launcher>) -> Self {
        self.register(launcher);
        self
    }

    pub fn pick(&self, kind: &SlaveKind) -> Option<&Arc<dyn Launcher>> {
        self.launchers.iter().find(|l| l.supports(kind))
    }

    /// Like [`LauncherRouter::pick`], but reports a missing strategy as
    /// [`CoreError::UnknownSlaveType`] for the given slave.
    #[instrument(level = "trace", skip(self, kind), fields(kind = kind.kind()))]
    pub fn route(&self, name: &SlaveName, kind: &SlaveKind) -> Result<&Arc<dyn Launcher>, CoreError> {
        let launcher = self.pick(kind).ok_or_else(|| CoreError::UnknownSlaveType {
            name: name.clone(),
            kind: kind.kind().to_string(),
        })?;
        trace!(launcher = launcher.name(), "launcher selected");
        Ok(launcher)
    }

    pub fn len(&self) -> usize {
        self.launchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.launchers.is_empty()
    }
}
