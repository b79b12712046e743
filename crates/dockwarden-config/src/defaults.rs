use camino::Utf8PathBuf;

/// Container runtime binary invoked when no override is configured.
pub const DEFAULT_TOOL_BINARY: &str = "docker";

/// Prefix the runtime prints in answer to a version query.
pub const DEFAULT_VERSION_BANNER: &str = "Docker version";

/// Service unit managed through `systemctl` on POSIX hosts.
pub const DEFAULT_POSIX_SERVICE: &str = "docker";

/// Service name managed through `net` on Windows hosts.
pub const DEFAULT_WINDOWS_SERVICE: &str = "com.docker.service";

/// Upper bound on how long a single child process may run.
pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 60;

/// Default log filter expression.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default runtime binary as a path.
pub fn default_tool_binary() -> Utf8PathBuf {
    Utf8PathBuf::from(DEFAULT_TOOL_BINARY)
}

/// Owned version banner used where allocation is required (e.g. serde).
pub fn default_version_banner() -> String {
    DEFAULT_VERSION_BANNER.to_owned()
}

/// Owned POSIX service name.
pub fn default_posix_service() -> String {
    DEFAULT_POSIX_SERVICE.to_owned()
}

/// Owned Windows service name.
pub fn default_windows_service() -> String {
    DEFAULT_WINDOWS_SERVICE.to_owned()
}

/// Default child-process timeout in seconds.
pub const fn default_command_timeout_secs() -> u64 {
    DEFAULT_COMMAND_TIMEOUT_SECS
}

/// Default log filter expression.
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format.
pub fn default_log_format() -> crate::logging::LogFormat {
    crate::logging::LogFormat::Json
}
