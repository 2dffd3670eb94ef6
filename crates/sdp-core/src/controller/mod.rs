//! One-way event posting towards the owning controller (the master controller's state machine).

use std::fmt;

use tokio::sync::mpsc;
use tracing::warn;

/// Events the configuration work posts to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    /// Configuration finished; the launch returned normally.
    ConfigureDone,
    /// Configuration aborted on an unrecoverable error.
    ConfigureFailed { reason: String },
}

impl ControllerEvent {
    /// Literal event tag understood by the controller.
    pub fn tag(&self) -> &'static str {
        match self {
            ControllerEvent::ConfigureDone => "configure done",
            ControllerEvent::ConfigureFailed { .. } => "configure failed",
        }
    }
}

impl fmt::Display for ControllerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerEvent::ConfigureDone => f.write_str(self.tag()),
            ControllerEvent::ConfigureFailed { reason } => write!(f, "{}: {reason}", self.tag()),
        }
    }
}

/// Event sink of the controller. Posting never blocks and expects no reply.
pub trait Controller: Send + Sync + 'static {
    fn post_event(&self, event: ControllerEvent);
}

/// [`Controller`] backed by an unbounded tokio channel.
#[derive(Clone, Debug)]
pub struct EventChannel {
    tx: mpsc::UnboundedSender<ControllerEvent>,
}

/// Create a controller event channel: the sender side for the workers, the receiver for the event loop.
pub fn event_channel() -> (EventChannel, mpsc::UnboundedReceiver<ControllerEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventChannel { tx }, rx)
}

impl Controller for EventChannel {
    fn post_event(&self, event: ControllerEvent) {
        if let Err(e) = self.tx.send(event) {
            warn!(target: "sdp.core.controller", event = %e.0, "controller is gone; event dropped");
        }
    }
}
