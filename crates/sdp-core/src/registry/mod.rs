use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::Path,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use sdp_model::{SlaveDescriptor, SlaveMap, SlaveName, SlaveSpec, SlaveState, StartedSlave};
use tracing::{debug, trace};

use crate::error::CoreError;

/// In-memory slave registry.
///
/// Cloning yields another handle to the same table.
/// Every mutation happens under the write lock, so a reader never sees a half-applied start.
#[derive(Clone, Default)]
pub struct SlaveRegistry {
    inner: Arc<RwLock<RegistryInner>>,
}

#[derive(Default)]
struct RegistryInner {
    slaves: BTreeMap<SlaveName, SlaveDescriptor>,
    /// Slaves claimed by an in-flight launch.
    starting: BTreeSet<SlaveName>,
}

impl RegistryInner {
    fn is_active(&self, name: &str) -> bool {
        self.starting.contains(name) || self.slaves.get(name).is_some_and(SlaveDescriptor::is_running)
    }
}

/// Result of [`SlaveRegistry::begin_start`].
pub enum StartAttempt<'a> {
    /// The caller owns the start until the claim is completed or dropped.
    Claimed(StartClaim<'a>),
    /// Already running; nothing to do.
    Running(SlaveDescriptor),
    /// Another caller holds the claim.
    InProgress,
}

/// Exclusive right to start one slave.
///
/// Dropping the claim without [`StartClaim::complete`] releases it and leaves the slave unstarted.
pub struct StartClaim<'a> {
    registry: &'a SlaveRegistry,
    descriptor: SlaveDescriptor,
    armed: bool,
}

impl StartClaim<'_> {
    /// Snapshot taken when the claim was made.
    pub fn descriptor(&self) -> &SlaveDescriptor {
        &self.descriptor
    }

    /// Record the started slave and release the claim.
    pub fn complete(mut self, started: StartedSlave) -> Result<SlaveDescriptor, CoreError> {
        self.armed = false;
        self.registry.mark_running(self.descriptor.name.as_str(), started)
    }
}

impl Drop for StartClaim<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.registry.write().starting.remove(&self.descriptor.name);
            trace!(target: "sdp.core.registry", slave = %self.descriptor.name, "start claim released");
        }
    }
}

impl SlaveRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry with every entry of the slave map unstarted.
    pub fn from_map(map: SlaveMap) -> Self {
        let slaves = map
            .into_iter()
            .map(|(name, spec)| (name.clone(), SlaveDescriptor::new(name, spec)))
            .collect();

        Self {
            inner: Arc::new(RwLock::new(RegistryInner {
                slaves,
                starting: BTreeSet::new(),
            })),
        }
    }

    /// Parse a JSON slave map.
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let map: SlaveMap = serde_json::from_str(json)?;
        Ok(Self::from_map(map))
    }

    /// Load a JSON slave map from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let registry = Self::from_json_str(&content)?;
        debug!(target: "sdp.core.registry", path = %path.display(), slaves = registry.len(), "slave map loaded");
        Ok(registry)
    }

    /// Register a slave as unstarted.
    ///
    /// An unstarted entry may be replaced; a running or starting one may not.
    pub fn insert(&self, name: impl Into<SlaveName>, spec: SlaveSpec) -> Result<(), CoreError> {
        let name = name.into();
        let mut inner = self.write();
        if inner.is_active(name.as_str()) {
            return Err(CoreError::SlaveActive(name));
        }
        let descriptor = SlaveDescriptor::new(name.clone(), spec);
        inner.slaves.insert(name, descriptor);
        Ok(())
    }

    /// Get a snapshot of a slave's descriptor.
    pub fn get(&self, name: &str) -> Option<SlaveDescriptor> {
        self.read().slaves.get(name).cloned()
    }

    /// Claim a slave for starting.
    ///
    /// The running check and the claim happen under one write lock, so of several concurrent callers
    /// exactly one gets [`StartAttempt::Claimed`].
    pub fn begin_start(&self, name: &str) -> Result<StartAttempt<'_>, CoreError> {
        let mut inner = self.write();
        let descriptor = inner
            .slaves
            .get(name)
            .cloned()
            .ok_or_else(|| CoreError::SlaveNotFound(SlaveName::from(name)))?;

        if descriptor.is_running() {
            return Ok(StartAttempt::Running(descriptor));
        }
        if !inner.starting.insert(descriptor.name.clone()) {
            return Ok(StartAttempt::InProgress);
        }

        trace!(target: "sdp.core.registry", slave = name, "start claimed");
        Ok(StartAttempt::Claimed(StartClaim {
            registry: self,
            descriptor,
            armed: true,
        }))
    }

    /// Apply a successful start to a slave and return the updated record.
    ///
    /// Runtime fields and state are written in one locked step. A running slave is never overwritten.
    pub fn mark_running(&self, name: &str, started: StartedSlave) -> Result<SlaveDescriptor, CoreError> {
        let mut inner = self.write();
        inner.starting.remove(name);
        let descriptor = inner
            .slaves
            .get_mut(name)
            .ok_or_else(|| CoreError::SlaveNotFound(SlaveName::from(name)))?;
        if descriptor.is_running() {
            return Err(CoreError::SlaveActive(descriptor.name.clone()));
        }

        descriptor.mark_running(started);
        trace!(target: "sdp.core.registry", slave = name, "slave marked running");
        Ok(descriptor.clone())
    }

    /// Names of all registered slaves, in order.
    pub fn names(&self) -> Vec<SlaveName> {
        self.read().slaves.keys().cloned().collect()
    }

    /// List all slaves.
    pub fn list_all(&self) -> Vec<SlaveDescriptor> {
        self.read().slaves.values().cloned().collect()
    }

    /// List slaves in the given state.
    pub fn list_by_state(&self, state: SlaveState) -> Vec<SlaveDescriptor> {
        self.read()
            .slaves
            .values()
            .filter(|d| d.state == state)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.read().slaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().slaves.is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, RegistryInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
