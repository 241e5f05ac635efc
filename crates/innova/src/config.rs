//! CLI-owned configuration: an optional TOML file plus `INNOVA_*`
//! variables, translated into `innova_core::ConnectionConfig`.
//!
//! Core never sees these types -- it receives a pre-built `ConnectionConfig`.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use innova_core::ConnectionConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── TOML config struct ───────────────────────────────────────────────

/// Contents of `config.toml`. Every field may be overridden by a flag.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Unit hostname or IP (local mode).
    pub host: Option<String>,

    /// Serial number (cloud mode).
    pub serial: Option<String>,

    /// MAC address registered with the cloud (cloud mode).
    pub uid: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Attempts per request, including the first.
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,

    /// Seconds between attempts.
    #[serde(default = "default_retry_delay")]
    pub retry_delay: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: None,
            serial: None,
            uid: None,
            timeout: default_timeout(),
            retry_attempts: default_retry_attempts(),
            retry_delay: default_retry_delay(),
        }
    }
}

fn default_timeout() -> u64 {
    20
}
fn default_retry_attempts() -> u32 {
    2
}
fn default_retry_delay() -> u64 {
    2
}

// ── Config file path ─────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "innova", "innova").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("innova");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ───────────────────────────────────────────────────

fn figment(path: &std::path::Path) -> Figment {
    // Connection identifiers and the timeout arrive through clap, which
    // already reads their INNOVA_* variables.
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("INNOVA_").only(&["retry_attempts", "retry_delay"]))
}

/// Load the config from the default file location + environment. A
/// missing file yields the defaults.
pub fn load_config() -> Result<Config, CliError> {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &std::path::Path) -> Result<Config, CliError> {
    Ok(figment(path).extract()?)
}

// ── Resolution ───────────────────────────────────────────────────────

/// Combine file settings with flags (flags win) into a core config.
pub fn resolve(config: &Config, global: &GlobalOpts) -> Result<ConnectionConfig, CliError> {
    let host = global.host.as_deref().or(config.host.as_deref());
    let serial = global.serial.as_deref().or(config.serial.as_deref());
    let uid = global.uid.as_deref().or(config.uid.as_deref());

    let mut resolved =
        ConnectionConfig::from_parts(host, serial, uid).map_err(|_| CliError::NoConnection {
            path: config_path().display().to_string(),
        })?;

    let timeout = global.timeout.unwrap_or(config.timeout);
    if timeout == 0 {
        return Err(CliError::Validation {
            field: "timeout".into(),
            reason: "must be at least one second".into(),
        });
    }
    if config.retry_attempts == 0 {
        return Err(CliError::Validation {
            field: "retry_attempts".into(),
            reason: "must be at least 1".into(),
        });
    }

    resolved.timeout = Duration::from_secs(timeout);
    resolved.retry_attempts = config.retry_attempts;
    resolved.retry_delay = Duration::from_secs(config.retry_delay);
    Ok(resolved)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use figment::Jail;

    use innova_core::Connection;

    use super::*;
    use crate::cli::OutputFormat;

    fn global(host: Option<&str>, serial: Option<&str>, uid: Option<&str>) -> GlobalOpts {
        GlobalOpts {
            host: host.map(Into::into),
            serial: serial.map(Into::into),
            uid: uid.map(Into::into),
            timeout: None,
            output: OutputFormat::Table,
            verbose: 0,
        }
    }

    #[test]
    fn missing_file_yields_defaults() {
        Jail::expect_with(|jail| {
            let config = load_config_from(&jail.directory().join("absent.toml")).unwrap();
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn file_and_env_layers() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                    host = "192.168.1.40"
                    timeout = 5
                    retry_attempts = 3
                "#,
            )?;
            jail.set_env("INNOVA_RETRY_ATTEMPTS", "4");

            let config = load_config_from(&jail.directory().join("config.toml")).unwrap();
            assert_eq!(config.host.as_deref(), Some("192.168.1.40"));
            assert_eq!(config.timeout, 5);
            assert_eq!(config.retry_attempts, 4);
            assert_eq!(config.retry_delay, 2);
            Ok(())
        });
    }

    #[test]
    fn flags_override_file() {
        let config = Config {
            host: Some("from-file".into()),
            timeout: 9,
            ..Config::default()
        };
        let resolved = resolve(&config, &global(Some("from-flag"), None, None)).unwrap();
        assert_eq!(
            resolved.connection,
            Connection::Local {
                host: "from-flag".into()
            }
        );
        assert_eq!(resolved.timeout, Duration::from_secs(9));
    }

    #[test]
    fn cloud_from_mixed_sources() {
        let config = Config {
            serial: Some("IN123".into()),
            ..Config::default()
        };
        let resolved = resolve(&config, &global(None, None, Some("aa:bb"))).unwrap();
        assert!(!resolved.connection.is_local());
    }

    #[test]
    fn nothing_to_connect_to() {
        let err = resolve(&Config::default(), &global(None, Some("IN123"), None)).unwrap_err();
        assert!(matches!(err, CliError::NoConnection { .. }));
    }

    #[test]
    fn zero_timeout_rejected() {
        let mut opts = global(Some("unit.lan"), None, None);
        opts.timeout = Some(0);
        let err = resolve(&Config::default(), &opts).unwrap_err();
        assert!(matches!(err, CliError::Validation { .. }));
    }
}
