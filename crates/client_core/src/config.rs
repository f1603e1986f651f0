use std::{path::Path, time::Duration};

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat, Map};
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "console.toml";
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_LOG_FILTER: &str = "info";

const ENV_PREFIX: &str = "APP";
const ENV_SEPARATOR: &str = "__";
/// Bare variable kept for deployments that only export the API root.
const API_URL_VAR: &str = "API_URL";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub api_url: String,
    #[serde(default)]
    pub request_timeout_seconds: Option<u64>,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            request_timeout_seconds: None,
            log_filter: DEFAULT_LOG_FILTER.into(),
        }
    }
}

impl Settings {
    /// `None` leaves the transport default in place.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_seconds
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

/// Loads settings once at startup from the process environment.
///
/// Without an explicit path, `console.toml` in the working directory is read if present.
pub fn load_settings(config_path: Option<&Path>) -> Result<Settings> {
    let env: Map<String, String> = std::env::vars().collect();
    load_settings_with_env(config_path, env)
}

/// Precedence, lowest first: defaults, config file, `APP__*` variables, `API_URL`.
pub fn load_settings_with_env(
    config_path: Option<&Path>,
    env: Map<String, String>,
) -> Result<Settings> {
    let defaults = Settings::default();
    let path = config_path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    let api_url_override = env
        .get(API_URL_VAR)
        .filter(|value| !value.trim().is_empty())
        .cloned();

    let settings = Config::builder()
        .set_default("api_url", defaults.api_url)?
        .set_default("log_filter", defaults.log_filter)?
        .add_source(
            File::from(path)
                .format(FileFormat::Toml)
                .required(config_path.is_some()),
        )
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator(ENV_SEPARATOR)
                .try_parsing(true)
                .source(Some(env)),
        )
        .set_override_option("api_url", api_url_override)?
        .build()
        .with_context(|| format!("failed to load console settings ('{}')", path.display()))?;

    settings
        .try_deserialize::<Settings>()
        .context("console settings have an unexpected shape")
}

#[cfg(test)]
mod tests {
    use std::{
        env, fs,
        path::PathBuf,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    fn env_of(pairs: &[(&str, &str)]) -> Map<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn temp_config(contents: &str) -> PathBuf {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let dir = env::temp_dir().join(format!("user_console_config_test_{suffix}"));
        fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("console.toml");
        fs::write(&path, contents).expect("write config");
        path
    }

    #[test]
    fn defaults_apply_without_file_or_env() {
        let settings = load_settings_with_env(None, env_of(&[])).expect("settings");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let path = temp_config(
            "api_url = \"https://users.example.com/api\"\nrequest_timeout_seconds = 15\n",
        );
        let settings = load_settings_with_env(Some(&path), env_of(&[])).expect("settings");
        assert_eq!(settings.api_url, "https://users.example.com/api");
        assert_eq!(settings.request_timeout(), Some(Duration::from_secs(15)));
        assert_eq!(settings.log_filter, DEFAULT_LOG_FILTER);
        fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
    }

    #[test]
    fn prefixed_env_overrides_file_and_bare_api_url_wins() {
        let path = temp_config("api_url = \"https://file.example.com\"\n");

        let settings = load_settings_with_env(
            Some(&path),
            env_of(&[
                ("APP__API_URL", "https://env.example.com"),
                ("APP__LOG_FILTER", "debug"),
            ]),
        )
        .expect("settings");
        assert_eq!(settings.api_url, "https://env.example.com");
        assert_eq!(settings.log_filter, "debug");

        let settings = load_settings_with_env(
            Some(&path),
            env_of(&[
                ("APP__API_URL", "https://env.example.com"),
                ("API_URL", "https://bare.example.com"),
            ]),
        )
        .expect("settings");
        assert_eq!(settings.api_url, "https://bare.example.com");

        fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
    }

    #[test]
    fn blank_bare_api_url_is_ignored() {
        let settings =
            load_settings_with_env(None, env_of(&[("API_URL", "  ")])).expect("settings");
        assert_eq!(settings.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn explicit_config_path_must_exist() {
        let missing = env::temp_dir()
            .join("user_console_missing_config")
            .join("console.toml");
        assert!(load_settings_with_env(Some(&missing), env_of(&[])).is_err());
    }

    #[test]
    fn zero_timeout_means_transport_default() {
        let settings = Settings {
            request_timeout_seconds: Some(0),
            ..Settings::default()
        };
        assert_eq!(settings.request_timeout(), None);
    }
}
