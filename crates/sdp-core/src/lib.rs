//! Master-controller core: slave registry, launch dispatch and the configuration task.
//!
//! The flow is `Configure -> SlaveLauncher -> LauncherRouter -> Launcher`, after which the
//! registry entry is updated and the heartbeat listener is pointed at the new slave.

pub mod error;
pub use error::{CoreError, LaunchError};

mod registry;
pub use registry::{SlaveRegistry, StartAttempt, StartClaim};

pub mod launcher;
pub use launcher::Launcher;

pub mod router;
pub use router::LauncherRouter;

mod starter;
pub use starter::SlaveLauncher;

pub mod heartbeat;
pub use heartbeat::{HeartbeatListener, HeartbeatTarget, HeartbeatTargets};

pub mod controller;
pub use controller::{Controller, ControllerEvent, EventChannel, event_channel};

mod configure;
pub use configure::{Configure, DEFAULT_SLAVE};

#[cfg(test)]
mod testing;
