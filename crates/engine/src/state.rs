use serde::{Deserialize, Serialize};

/// Whether the shared reference follows the wall clock
///
/// Only an explicit toggle moves between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RunState {
    /// `advance` overwrites the reference timestamp
    #[default]
    Running,
    /// `advance` is ignored; the reference stays frozen
    Paused,
}

impl RunState {
    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running)
    }

    /// The other state
    pub fn toggled(&self) -> Self {
        match self {
            RunState::Running => RunState::Paused,
            RunState::Paused => RunState::Running,
        }
    }
}
