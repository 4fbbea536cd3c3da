//! Configuration for pull/push runs.
//!
//! Values are resolved once at startup, in increasing priority:
//! built-in defaults, the YAML config file, `LOKALISE_*` environment
//! variables, then explicit CLI overrides. The result is immutable and is
//! handed to the orchestrators by reference.

use miette::Diagnostic;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = ".lokalise.yml";
pub const DEFAULT_API_URL: &str = "https://lokalise.co/api/";
pub const DEFAULT_STORAGE_URL: &str = "https://s3-eu-west-1.amazonaws.com/lokalise-assets/";
pub const DEFAULT_LOCALE: &str = "en";
pub const DEFAULT_LOCALE_PATH: &str = "src/Locale";
/// Lokalise accepts at most one upload every five seconds.
pub const DEFAULT_THROTTLE_SECS: u64 = 5;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("Missing required configuration value: {field}")]
    #[diagnostic(
        code(lokalise::config::missing),
        help("Set it in .lokalise.yml, export the matching LOKALISE_* variable or pass it as a flag.")
    )]
    Missing { field: &'static str },

    #[error("Invalid configuration value for {field}: {message}")]
    #[diagnostic(code(lokalise::config::invalid))]
    Invalid {
        field: &'static str,
        message: String,
    },

    #[error("Failed to read config file {path}")]
    #[diagnostic(code(lokalise::config::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}")]
    #[diagnostic(code(lokalise::config::parse))]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Project credentials and locale defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    pub project_id: String,
    pub api_token: String,
    pub default_locale: String,
}

/// Where things live, locally and remotely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSettings {
    /// Locale roots scanned for templates. Pull extracts into the first one.
    pub locale_paths: Vec<PathBuf>,
    pub api_url: String,
    pub storage_url: String,
    pub throttle: Duration,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            locale_paths: vec![PathBuf::from(DEFAULT_LOCALE_PATH)],
            api_url: DEFAULT_API_URL.to_string(),
            storage_url: DEFAULT_STORAGE_URL.to_string(),
            throttle: Duration::from_secs(DEFAULT_THROTTLE_SECS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub project: ProjectConfig,
    pub sync: SyncSettings,
}

/// On-disk shape of `.lokalise.yml`. Every key is optional.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConfigFile {
    pub project_id: Option<String>,
    pub api_token: Option<String>,
    pub default_locale: Option<String>,
    pub locale_paths: Option<Vec<PathBuf>>,
    pub api_url: Option<String>,
    pub storage_url: Option<String>,
    pub throttle_secs: Option<u64>,
}

impl ConfigFile {
    pub fn from_yaml(path: &Path, contents: &str) -> ConfigResult<Self> {
        // An empty file deserializes to unit, not an empty map
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the explicit path if given, otherwise `.lokalise.yml` when present.
    pub fn load(explicit: Option<&Path>) -> ConfigResult<Self> {
        let (path, required) = match explicit {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        if !required && !path.exists() {
            tracing::debug!("No {} found, using environment only", DEFAULT_CONFIG_FILE);
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        Self::from_yaml(&path, &contents)
    }
}

/// Values given on the command line. They beat everything else.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub project_id: Option<String>,
    pub api_token: Option<String>,
    pub api_url: Option<String>,
}

impl Settings {
    /// Resolve settings from the config file, process environment and overrides.
    pub fn load(overrides: &ConfigOverrides) -> ConfigResult<Self> {
        let file = ConfigFile::load(overrides.config_path.as_deref())?;
        Self::resolve(file, |key| std::env::var(key).ok(), overrides)
    }

    /// Merge the layers. `env` looks up a variable by name.
    pub fn resolve<F>(file: ConfigFile, env: F, overrides: &ConfigOverrides) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |v: &String| !v.trim().is_empty();
        let pick = |cli: &Option<String>, var: &str, from_file: Option<String>| {
            cli.clone()
                .filter(present)
                .or_else(|| env(var).filter(present))
                .or_else(|| from_file.filter(present))
        };

        let project_id = pick(&overrides.project_id, "LOKALISE_PROJECT_ID", file.project_id)
            .ok_or(ConfigError::Missing {
                field: "project_id",
            })?;
        let api_token = pick(&overrides.api_token, "LOKALISE_API_TOKEN", file.api_token)
            .ok_or(ConfigError::Missing { field: "api_token" })?;
        let default_locale = pick(&None, "LOKALISE_DEFAULT_LOCALE", file.default_locale)
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string());

        let defaults = SyncSettings::default();
        let sync = SyncSettings {
            locale_paths: file
                .locale_paths
                .filter(|paths| !paths.is_empty())
                .unwrap_or(defaults.locale_paths),
            api_url: with_trailing_slash(
                pick(&overrides.api_url, "LOKALISE_API_URL", file.api_url)
                    .unwrap_or(defaults.api_url),
            ),
            storage_url: with_trailing_slash(file.storage_url.unwrap_or(defaults.storage_url)),
            throttle: match file.throttle_secs {
                Some(0) => {
                    return Err(ConfigError::Invalid {
                        field: "throttle_secs",
                        message: "uploads must be at least one second apart".to_string(),
                    });
                }
                Some(secs) => Duration::from_secs(secs),
                None => defaults.throttle,
            },
        };

        Ok(Self {
            project: ProjectConfig {
                project_id,
                api_token,
                default_locale,
            },
            sync,
        })
    }
}

fn with_trailing_slash(mut url: String) -> String {
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}
