//! Layered configuration shared by the dockwarden controller and its hosts.
//!
//! Values are resolved by `ortho_config` in increasing precedence: built-in
//! defaults, a TOML file (`--config-path` or `DOCKWARDEN_CONFIG_PATH`),
//! `DOCKWARDEN_*` environment variables, then command-line flags.
//!
//! ```rust,no_run
//! use dockwarden_config::Config;
//!
//! let config = Config::load().expect("configuration loads");
//! println!("managing {} via {}", config.posix_service(), config.tool_binary());
//! ```

mod defaults;
mod logging;

use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_COMMAND_TIMEOUT_SECS, DEFAULT_LOG_FILTER, DEFAULT_POSIX_SERVICE, DEFAULT_TOOL_BINARY,
    DEFAULT_VERSION_BANNER, DEFAULT_WINDOWS_SERVICE, default_command_timeout_secs,
    default_log_filter, default_log_filter_string, default_log_format, default_posix_service,
    default_tool_binary, default_version_banner, default_windows_service,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Resolved controller configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "DOCKWARDEN")]
pub struct Config {
    /// Container runtime executable, resolved through `PATH` when relative.
    #[serde(default = "default_tool_binary")]
    #[ortho_config(default = default_tool_binary())]
    pub tool_binary: Utf8PathBuf,
    /// Prefix the runtime prints in reply to `-v`.
    #[serde(default = "default_version_banner")]
    #[ortho_config(default = default_version_banner())]
    pub version_banner: String,
    /// Service unit restarted through `systemctl` on POSIX hosts.
    #[serde(default = "default_posix_service")]
    #[ortho_config(default = default_posix_service())]
    pub posix_service: String,
    /// Service restarted through `net` on Windows hosts.
    #[serde(default = "default_windows_service")]
    #[ortho_config(default = default_windows_service())]
    pub windows_service: String,
    /// Seconds a single child process may run before it is killed.
    #[serde(default = "default_command_timeout_secs")]
    #[ortho_config(default = default_command_timeout_secs())]
    pub command_timeout_secs: u64,
    /// Forget the active project once the node leaves the swarm.
    #[serde(default)]
    #[ortho_config(default = false)]
    pub clear_project_on_leave: bool,
    /// `tracing` filter directive applied to emitted events.
    #[serde(default = "default_log_filter_string")]
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Output format of emitted events.
    #[serde(default = "default_log_format")]
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tool_binary: default_tool_binary(),
            version_banner: default_version_banner(),
            posix_service: default_posix_service(),
            windows_service: default_windows_service(),
            command_timeout_secs: default_command_timeout_secs(),
            clear_project_on_leave: false,
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Container runtime executable.
    #[must_use]
    pub fn tool_binary(&self) -> &Utf8Path {
        self.tool_binary.as_path()
    }

    /// Expected prefix of the version banner.
    #[must_use]
    pub fn version_banner(&self) -> &str {
        self.version_banner.as_str()
    }

    /// Daemon service name on POSIX hosts.
    #[must_use]
    pub fn posix_service(&self) -> &str {
        self.posix_service.as_str()
    }

    /// Daemon service name on Windows hosts.
    #[must_use]
    pub fn windows_service(&self) -> &str {
        self.windows_service.as_str()
    }

    /// Child-process timeout as a [`Duration`].
    #[must_use]
    pub const fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }

    /// Whether a successful leave forgets the active project.
    #[must_use]
    pub const fn clear_project_on_leave(&self) -> bool {
        self.clear_project_on_leave
    }

    /// Log filter directive.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }
}
