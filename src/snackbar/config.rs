//! Snackbar configuration and timeout validation.
//!
//! [`Config`] is the serializable form of every recognised option. Hosts can
//! deserialize it from TOML or JSON and hand it to
//! [`Model::from_config`](super::Model::from_config):
//!
//! ```rust
//! use bubbletea_snackbar::snackbar::Config;
//!
//! let config = Config {
//!     label_text: "Message archived".into(),
//!     action_label: Some("Undo".into()),
//!     close_on_escape: true,
//!     ..Config::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Auto-close delay used when none is configured.
pub const DEFAULT_TIMEOUT_MS: i64 = 5000;
/// Shortest accepted auto-close delay.
pub const MIN_TIMEOUT_MS: i64 = 4000;
/// Longest accepted auto-close delay.
pub const MAX_TIMEOUT_MS: i64 = 10000;
/// Sentinel that turns auto-close off.
pub const TIMEOUT_DISABLED_MS: i64 = -1;

/// Configuration problems. None of them stop the widget from working.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `timeout_ms` was neither `-1` nor within `[4000, 10000]`.
    #[error(
        "timeout_ms must be -1 or between {min} and {max}, got {ms} (using {clamped})",
        min = MIN_TIMEOUT_MS,
        max = MAX_TIMEOUT_MS
    )]
    TimeoutOutOfRange {
        /// The rejected value.
        ms: i64,
        /// The nearest accepted value.
        clamped: i64,
    },
}

impl ConfigError {
    /// The timeout to use in place of the rejected one.
    pub fn fallback_timeout(&self) -> Timeout {
        match self {
            ConfigError::TimeoutOutOfRange { clamped, .. } => Timeout::clamped(*clamped),
        }
    }
}

/// Auto-close behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeout {
    /// Stay open until closed explicitly.
    Disabled,
    /// Close with reason `dismiss` after this long.
    After(Duration),
}

impl Timeout {
    /// Validates a millisecond value.
    ///
    /// ```rust
    /// use bubbletea_snackbar::snackbar::Timeout;
    /// use std::time::Duration;
    ///
    /// assert_eq!(Timeout::from_millis(-1), Ok(Timeout::Disabled));
    /// assert_eq!(
    ///     Timeout::from_millis(4000),
    ///     Ok(Timeout::After(Duration::from_millis(4000)))
    /// );
    /// assert!(Timeout::from_millis(3999).is_err());
    /// ```
    pub fn from_millis(ms: i64) -> Result<Self, ConfigError> {
        match ms {
            TIMEOUT_DISABLED_MS => Ok(Timeout::Disabled),
            MIN_TIMEOUT_MS..=MAX_TIMEOUT_MS => Ok(Timeout::After(Duration::from_millis(ms as u64))),
            _ => Err(ConfigError::TimeoutOutOfRange {
                ms,
                clamped: ms.clamp(MIN_TIMEOUT_MS, MAX_TIMEOUT_MS),
            }),
        }
    }

    /// Like [`from_millis`](Self::from_millis), but pulls out-of-range values
    /// to the nearest bound. `-1` still disables the timeout.
    pub fn clamped(ms: i64) -> Self {
        Self::from_millis(ms).unwrap_or_else(|_| {
            Timeout::After(Duration::from_millis(
                ms.clamp(MIN_TIMEOUT_MS, MAX_TIMEOUT_MS) as u64,
            ))
        })
    }

    /// Millisecond form, `-1` when disabled.
    pub fn as_millis(&self) -> i64 {
        match self {
            Timeout::Disabled => TIMEOUT_DISABLED_MS,
            Timeout::After(delay) => delay.as_millis() as i64,
        }
    }

    /// The delay, if auto-close is enabled.
    pub fn duration(&self) -> Option<Duration> {
        match self {
            Timeout::Disabled => None,
            Timeout::After(delay) => Some(*delay),
        }
    }
}

impl Default for Timeout {
    fn default() -> Self {
        Timeout::After(Duration::from_millis(DEFAULT_TIMEOUT_MS as u64))
    }
}

/// Every option a snackbar recognises.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Auto-close delay in milliseconds, or `-1` to disable.
    pub timeout_ms: i64,
    /// Whether Escape closes an open snackbar.
    pub close_on_escape: bool,
    /// The message.
    pub label_text: String,
    /// Put the controls on their own line below the label.
    pub stacked: bool,
    /// Align the bar to the leading edge instead of centring it.
    pub leading: bool,
    /// Text of the action control. No action control when `None`.
    pub action_label: Option<String>,
    /// Text of the dismiss control. No dismiss control when `None`.
    pub dismiss_label: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            close_on_escape: false,
            label_text: String::new(),
            stacked: false,
            leading: false,
            action_label: None,
            dismiss_label: None,
        }
    }
}

impl Config {
    /// Checks the configuration without applying it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Timeout::from_millis(self.timeout_ms).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_bounds() {
        assert_eq!(
            Timeout::from_millis(MIN_TIMEOUT_MS),
            Ok(Timeout::After(Duration::from_millis(4000)))
        );
        assert_eq!(
            Timeout::from_millis(MAX_TIMEOUT_MS),
            Ok(Timeout::After(Duration::from_millis(10000)))
        );
        assert_eq!(Timeout::from_millis(-1), Ok(Timeout::Disabled));
    }

    #[test]
    fn test_timeout_out_of_range() {
        assert_eq!(
            Timeout::from_millis(3999),
            Err(ConfigError::TimeoutOutOfRange {
                ms: 3999,
                clamped: 4000
            })
        );
        assert_eq!(
            Timeout::from_millis(10001),
            Err(ConfigError::TimeoutOutOfRange {
                ms: 10001,
                clamped: 10000
            })
        );
        assert_eq!(
            Timeout::from_millis(-2),
            Err(ConfigError::TimeoutOutOfRange {
                ms: -2,
                clamped: 4000
            })
        );
        assert!(Timeout::from_millis(0).is_err());
    }

    #[test]
    fn test_clamped_keeps_disabled_sentinel() {
        assert_eq!(Timeout::clamped(-1), Timeout::Disabled);
        assert_eq!(Timeout::clamped(0).as_millis(), 4000);
        assert_eq!(Timeout::clamped(60_000).as_millis(), 10000);
        assert_eq!(Timeout::clamped(7500).as_millis(), 7500);
    }

    #[test]
    fn test_error_fallback_and_message() {
        let err = Timeout::from_millis(20_000).unwrap_err();
        assert_eq!(err.fallback_timeout().as_millis(), 10000);
        assert_eq!(
            err.to_string(),
            "timeout_ms must be -1 or between 4000 and 10000, got 20000 (using 10000)"
        );
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.timeout_ms, 5000);
        assert!(!config.close_on_escape);
        assert_eq!(config.label_text, "");
        assert!(!config.stacked);
        assert!(!config.leading);
        assert!(config.validate().is_ok());
        assert_eq!(Timeout::default().as_millis(), DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn test_config_from_toml() {
        let config: Config = toml::from_str(
            r#"
            timeout_ms = -1
            close_on_escape = true
            label_text = "Connection lost"
            action_label = "Retry"
            "#,
        )
        .expect("valid toml");

        assert_eq!(config.timeout_ms, -1);
        assert!(config.close_on_escape);
        assert_eq!(config.label_text, "Connection lost");
        assert_eq!(config.action_label.as_deref(), Some("Retry"));
        assert_eq!(config.dismiss_label, None);
        assert!(!config.stacked);
    }

    #[test]
    fn test_invalid_config_reports_error() {
        let config: Config = toml::from_str("timeout_ms = 1000").expect("valid toml");
        assert_eq!(
            config.validate(),
            Err(ConfigError::TimeoutOutOfRange {
                ms: 1000,
                clamped: 4000
            })
        );
    }
}
