//! Default values for runtime settings.

/// Macro to generate default functions for settings fields
macro_rules! default_fn {
    ($name:ident, $type:ty, $value:expr) => {
        pub(crate) fn $name() -> $type {
            $value
        }
    };
}

default_fn!(default_http_timeout_secs, u64, 10);
default_fn!(default_gh_program, String, "gh".to_string());
default_fn!(default_warn_days, i64, 30);
default_fn!(
    default_user_agent,
    String,
    format!("eol-check/{}", env!("CARGO_PKG_VERSION"))
);

/// Environment variable names consulted by [`super::Settings::from_env`].
pub mod env_vars {
    /// HTTP timeout in seconds for endoflife.date requests
    pub const HTTP_TIMEOUT: &str = "EOL_CHECK_HTTP_TIMEOUT";
    /// Program used for GitHub issue operations
    pub const GH_PROGRAM: &str = "EOL_CHECK_GH";
    /// Warn window for entries that do not set `warn_days`
    pub const WARN_DAYS: &str = "EOL_CHECK_WARN_DAYS";
    /// Token consumed by `gh`; required before issues are opened
    pub const GH_TOKEN: &str = "GH_TOKEN";
    /// Log filter directive for tracing output
    pub const LOG: &str = "EOL_CHECK_LOG";
    /// Quiet mode toggle (`1` or `true`)
    pub const QUIET: &str = "EOL_CHECK_QUIET";
}
