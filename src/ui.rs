//! Terminal output helpers: quiet mode, color control, and state icons.

use colored::{ColoredString, Colorize};

use crate::config::env_vars;
use crate::status::EolState;

/// Check if quiet mode is enabled via environment variable
pub fn is_quiet() -> bool {
    std::env::var(env_vars::QUIET)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Disable colors when stdout is not a terminal or `NO_COLOR` is set.
pub fn init_color() {
    if std::env::var_os("NO_COLOR").is_some() || !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }
}

/// Colored icon for an EOL state.
///
/// - Expired: ✗ (red)
/// - Due: ⚠ (yellow)
/// - Ok: ● (green)
/// - Unknown: ? (dimmed)
pub fn state_icon(state: EolState) -> ColoredString {
    match state {
        EolState::Expired => "✗".red(),
        EolState::Due => "⚠".yellow(),
        EolState::Ok => "●".green(),
        EolState::Unknown => "?".dimmed(),
    }
}

pub mod colors {
    use colored::{ColoredString, Colorize};

    pub fn success(text: &str) -> ColoredString {
        text.green()
    }

    pub fn warning(text: &str) -> ColoredString {
        text.yellow()
    }

    pub fn error(text: &str) -> ColoredString {
        text.red()
    }

    /// Cyan for identifiers (repos, entry labels)
    pub fn identifier(text: &str) -> ColoredString {
        text.cyan()
    }

    pub fn secondary(text: &str) -> ColoredString {
        text.dimmed()
    }

    pub fn heading(text: &str) -> ColoredString {
        text.bold()
    }
}

pub mod format {
    /// Human-readable distance to an EOL date
    pub fn days_left(days: i64) -> String {
        match days {
            0 => "today".to_string(),
            1 => "in 1 day".to_string(),
            -1 => "1 day ago".to_string(),
            d if d < 0 => format!("{} days ago", -d),
            d => format!("in {} days", d),
        }
    }

    /// Pad `text` to `width` columns, counting chars rather than bytes
    pub fn pad(text: &str, width: usize) -> String {
        let len = text.chars().count();
        if len >= width {
            text.to_string()
        } else {
            format!("{}{}", text, " ".repeat(width - len))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_state_icon_all_states() {
        state_icon(EolState::Expired);
        state_icon(EolState::Due);
        state_icon(EolState::Ok);
        state_icon(EolState::Unknown);
    }

    #[test]
    fn test_days_left() {
        assert_eq!(format::days_left(0), "today");
        assert_eq!(format::days_left(1), "in 1 day");
        assert_eq!(format::days_left(45), "in 45 days");
        assert_eq!(format::days_left(-1), "1 day ago");
        assert_eq!(format::days_left(-12), "12 days ago");
    }

    #[test]
    fn test_pad() {
        assert_eq!(format::pad("ab", 4), "ab  ");
        assert_eq!(format::pad("é", 2), "é ");
        assert_eq!(format::pad("toolong", 3), "toolong");
    }

    #[test]
    #[serial]
    fn test_is_quiet_env() {
        std::env::set_var("EOL_CHECK_QUIET", "TRUE");
        assert!(is_quiet());
        std::env::set_var("EOL_CHECK_QUIET", "0");
        assert!(!is_quiet());
        std::env::remove_var("EOL_CHECK_QUIET");
        assert!(!is_quiet());
    }
}
