//! Host platform families and their service managers.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::ControllerError;

/// Host platform family; selects the commands used to restart the daemon.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Platform {
    /// Unix-like hosts where the daemon is a `systemd` unit.
    Posix,
    /// Windows hosts where the daemon is a Windows service.
    Windows,
}

impl Platform {
    /// Detects the family of the running host.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::UnsupportedPlatform`] on targets that are
    /// neither Unix nor Windows.
    pub fn detect() -> Result<Self, ControllerError> {
        Self::from_family(std::env::consts::FAMILY)
    }

    /// Maps an OS family name (as in [`std::env::consts::FAMILY`]).
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::UnsupportedPlatform`] for any family other
    /// than `unix` or `windows`.
    pub fn from_family(family: &str) -> Result<Self, ControllerError> {
        match family {
            "unix" => Ok(Self::Posix),
            "windows" => Ok(Self::Windows),
            other => Err(ControllerError::UnsupportedPlatform {
                family: other.to_owned(),
            }),
        }
    }

    /// Program that stops and starts services on this platform.
    #[must_use]
    pub const fn service_manager(self) -> &'static str {
        match self {
            Self::Posix => "systemctl",
            Self::Windows => "net",
        }
    }
}
