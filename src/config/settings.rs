//! RLS client settings snapshot
//!
//! This module reads the client's settings through a
//! [`ConfigurationAccessor`] and packages them into an immutable
//! [`RlsConfiguration`].

use crate::config::accessor::ConfigurationAccessor;
use serde::Serialize;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

pub const SHOW_STDOUT_KEY: &str = "rust-client.showStdOut";
pub const SHOW_STDERR_KEY: &str = "rust-client.showStdErr";
pub const LOG_TO_FILE_KEY: &str = "rust-client.logToFile";
pub const REVEAL_OUTPUT_CHANNEL_ON_KEY: &str = "rust-client.revealOutputChannelOn";
/// Hidden, not exposed in the client's settings UI
pub const RLS_PATH_KEY: &str = "rls.path";
/// Hidden, not exposed in the client's settings UI
pub const RLS_ROOT_KEY: &str = "rls.root";

/// Every key the loader reads, in field order
pub const RECOGNIZED_KEYS: [&str; 6] = [
    SHOW_STDOUT_KEY,
    SHOW_STDERR_KEY,
    LOG_TO_FILE_KEY,
    REVEAL_OUTPUT_CHANNEL_ON_KEY,
    RLS_PATH_KEY,
    RLS_ROOT_KEY,
];

/// When the language client surfaces its output channel
///
/// Discriminants match the language client protocol library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum RevealOutputChannelOn {
    Info = 1,
    Warn = 2,
    Error = 3,
    #[default]
    Never = 4,
}

impl RevealOutputChannelOn {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Never => "never",
        }
    }
}

impl fmt::Display for RevealOutputChannelOn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RevealOutputChannelOn {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(reveal_output_channel_on_from_str(Some(s)))
    }
}

/// Translate a raw setting into a reveal policy.
///
/// Matching is case-insensitive. Anything other than `info`, `warn` or
/// `error` (including a missing value) means `Never`.
pub fn reveal_output_channel_on_from_str(value: Option<&str>) -> RevealOutputChannelOn {
    match value.map(str::to_ascii_lowercase).as_deref() {
        Some("info") => RevealOutputChannelOn::Info,
        Some("warn") => RevealOutputChannelOn::Warn,
        Some("error") => RevealOutputChannelOn::Error,
        _ => RevealOutputChannelOn::Never,
    }
}

/// Point-in-time copy of the RLS client settings
///
/// There are no setters. Load a new snapshot to observe changes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RlsConfiguration {
    show_stdout_in_output_channel: bool,
    show_stderr_in_output_channel: bool,
    log_to_file: bool,
    reveal_output_channel_on: RevealOutputChannelOn,
    rls_path: Option<String>,
    rls_root: Option<String>,
}

impl RlsConfiguration {
    /// Read every client setting from `configuration`, defaulting what is unset.
    pub fn load_from_workspace<A: ConfigurationAccessor>(configuration: &A) -> Self {
        let config = Self {
            show_stdout_in_output_channel: configuration.get(SHOW_STDOUT_KEY, false),
            show_stderr_in_output_channel: configuration.get(SHOW_STDERR_KEY, false),
            log_to_file: configuration.get(LOG_TO_FILE_KEY, false),
            reveal_output_channel_on: Self::read_reveal_output_channel_on(configuration),
            rls_path: configuration.get(RLS_PATH_KEY, None),
            rls_root: configuration.get(RLS_ROOT_KEY, None),
        };

        debug!(
            "Loaded RLS configuration: stdout={} stderr={} log_to_file={} reveal={} path={:?} root={:?}",
            config.show_stdout_in_output_channel,
            config.show_stderr_in_output_channel,
            config.log_to_file,
            config.reveal_output_channel_on,
            config.rls_path,
            config.rls_root,
        );

        config
    }

    fn read_reveal_output_channel_on<A: ConfigurationAccessor>(configuration: &A) -> RevealOutputChannelOn {
        let setting: String = configuration.get(REVEAL_OUTPUT_CHANNEL_ON_KEY, "never".to_string());
        reveal_output_channel_on_from_str(Some(setting.as_str()))
    }

    pub fn show_stdout_in_output_channel(&self) -> bool {
        self.show_stdout_in_output_channel
    }

    pub fn show_stderr_in_output_channel(&self) -> bool {
        self.show_stderr_in_output_channel
    }

    pub fn log_to_file(&self) -> bool {
        self.log_to_file
    }

    pub fn reveal_output_channel_on(&self) -> RevealOutputChannelOn {
        self.reveal_output_channel_on
    }

    /// Executable to spawn instead of the toolchain's RLS (e.g. `/usr/bin/rls`)
    pub fn rls_path(&self) -> Option<&str> {
        self.rls_path.as_deref()
    }

    /// RLS checkout to launch with `cargo run --release` (e.g. `/home/<user>/rls`)
    pub fn rls_root(&self) -> Option<&str> {
        self.rls_root.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::accessor::InMemoryConfiguration;

    #[test]
    fn test_defaults_when_unset() {
        let config = RlsConfiguration::load_from_workspace(&InMemoryConfiguration::new());

        assert!(!config.show_stdout_in_output_channel());
        assert!(!config.show_stderr_in_output_channel());
        assert!(!config.log_to_file());
        assert_eq!(config.reveal_output_channel_on(), RevealOutputChannelOn::Never);
        assert_eq!(config.rls_path(), None);
        assert_eq!(config.rls_root(), None);
        assert_eq!(config, RlsConfiguration::default());
    }

    #[test]
    fn test_reveal_policy_is_case_insensitive() {
        for value in ["INFO", "Info", "info"] {
            assert_eq!(
                reveal_output_channel_on_from_str(Some(value)),
                RevealOutputChannelOn::Info,
                "{value}"
            );
        }
        assert_eq!(reveal_output_channel_on_from_str(Some("WaRn")), RevealOutputChannelOn::Warn);
    }

    #[test]
    fn test_reveal_policy_known_values() {
        assert_eq!(reveal_output_channel_on_from_str(Some("warn")), RevealOutputChannelOn::Warn);
        assert_eq!(reveal_output_channel_on_from_str(Some("error")), RevealOutputChannelOn::Error);
    }

    #[test]
    fn test_reveal_policy_falls_back_to_never() {
        for value in [Some("never"), Some(""), None, Some("bogus"), Some(" info ")] {
            assert_eq!(
                reveal_output_channel_on_from_str(value),
                RevealOutputChannelOn::Never,
                "{value:?}"
            );
        }
    }

    #[test]
    fn test_reveal_policy_from_str_and_display() {
        let policy: RevealOutputChannelOn = "Error".parse().unwrap();
        assert_eq!(policy, RevealOutputChannelOn::Error);
        assert_eq!(policy.to_string(), "error");
        assert_eq!(RevealOutputChannelOn::Info.as_u8(), 1);
        assert_eq!(RevealOutputChannelOn::Never.as_u8(), 4);
    }

    #[test]
    fn test_load_with_partial_settings() {
        let source = InMemoryConfiguration::new()
            .with(SHOW_STDOUT_KEY, true)
            .with(LOG_TO_FILE_KEY, true)
            .with(RLS_PATH_KEY, "/usr/bin/rls");

        let config = RlsConfiguration::load_from_workspace(&source);

        assert!(config.show_stdout_in_output_channel());
        assert!(!config.show_stderr_in_output_channel());
        assert!(config.log_to_file());
        assert_eq!(config.reveal_output_channel_on(), RevealOutputChannelOn::Never);
        assert_eq!(config.rls_path(), Some("/usr/bin/rls"));
        assert_eq!(config.rls_root(), None);
    }

    #[test]
    fn test_load_translates_reveal_setting() {
        let source = InMemoryConfiguration::new().with(REVEAL_OUTPUT_CHANNEL_ON_KEY, "Warn");
        let config = RlsConfiguration::load_from_workspace(&source);
        assert_eq!(config.reveal_output_channel_on(), RevealOutputChannelOn::Warn);
    }

    #[test]
    fn test_load_ignores_non_string_reveal_setting() {
        let source = InMemoryConfiguration::new().with(REVEAL_OUTPUT_CHANNEL_ON_KEY, 3);
        let config = RlsConfiguration::load_from_workspace(&source);
        assert_eq!(config.reveal_output_channel_on(), RevealOutputChannelOn::Never);
    }

    #[test]
    fn test_rls_overrides_are_not_validated() {
        let source = InMemoryConfiguration::new()
            .with(RLS_PATH_KEY, "")
            .with(RLS_ROOT_KEY, "not/a/real dir");

        let config = RlsConfiguration::load_from_workspace(&source);
        assert_eq!(config.rls_path(), Some(""));
        assert_eq!(config.rls_root(), Some("not/a/real dir"));
    }

    #[test]
    fn test_successive_loads_are_independent_values() {
        let mut source = InMemoryConfiguration::new().with(SHOW_STDERR_KEY, true);

        let first = RlsConfiguration::load_from_workspace(&source);
        let second = RlsConfiguration::load_from_workspace(&source);
        assert_eq!(first, second);
        assert!(!std::ptr::eq(&first, &second));

        source.set(SHOW_STDERR_KEY, false);
        let third = RlsConfiguration::load_from_workspace(&source);
        assert!(first.show_stderr_in_output_channel());
        assert!(!third.show_stderr_in_output_channel());
    }

    #[test]
    fn test_serializes_with_client_field_names() {
        let source = InMemoryConfiguration::new()
            .with(REVEAL_OUTPUT_CHANNEL_ON_KEY, "info")
            .with(RLS_ROOT_KEY, "/src/rls");
        let config = RlsConfiguration::load_from_workspace(&source);

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["revealOutputChannelOn"], "info");
        assert_eq!(json["rlsRoot"], "/src/rls");
        assert_eq!(json["rlsPath"], serde_json::Value::Null);
        assert_eq!(json["showStdoutInOutputChannel"], false);
    }
}
