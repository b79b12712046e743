//! Observable controller state.

use serde::Serialize;
use strum::Display;

/// Runtime availability combined with swarm membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ControllerState {
    /// No probe has run yet.
    Unknown,
    /// The last probe found no usable runtime.
    Unavailable,
    /// The runtime answers and no project is recorded.
    AvailableIdle,
    /// The runtime answers and a project was joined.
    AvailableJoined,
}

impl ControllerState {
    /// Derives the state from the last probe result and project bookkeeping.
    #[must_use]
    pub const fn derive(availability: Option<bool>, joined: bool) -> Self {
        match availability {
            None => Self::Unknown,
            Some(false) => Self::Unavailable,
            Some(true) if joined => Self::AvailableJoined,
            Some(true) => Self::AvailableIdle,
        }
    }

    /// Whether the runtime answered the last probe.
    #[must_use]
    pub const fn is_available(self) -> bool {
        matches!(self, Self::AvailableIdle | Self::AvailableJoined)
    }
}
