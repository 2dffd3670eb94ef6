use serde::{Deserialize, Serialize};

/// Lifecycle state of a slave.
///
/// The only transition is `Unstarted -> Running`; a failed start leaves the slave `Unstarted`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlaveState {
    /// Not started yet (or the start attempt failed).
    #[default]
    Unstarted,
    /// Started successfully; runtime fields are populated.
    Running,
}

impl SlaveState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlaveState::Unstarted => "unstarted",
            SlaveState::Running => "running",
        }
    }
}
