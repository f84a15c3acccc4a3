use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "pixy.toml";
pub const ENV_PREFIX: &str = "PIXY";

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub submission: SubmissionConfig,
    pub backup: BackupConfig,
    pub server: ServerConfig,
    pub widget: WidgetConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SubmissionConfig {
    pub endpoint_url: String,
    pub timeout_secs: u64,
    pub fallback_email: String,
    pub fallback_phone: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BackupConfig {
    pub path: PathBuf,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    pub graceful_shutdown_secs: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WidgetConfig {
    pub typing_delay_ms: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub endpoint_url: Option<String>,
    pub submission_timeout_secs: Option<u64>,
    pub backup_path: Option<PathBuf>,
    pub bind_address: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            submission: SubmissionConfig {
                endpoint_url: "https://pixydigital.example/api/pixy-lead".to_string(),
                timeout_secs: 10,
                fallback_email: "hello@pixydigital.example".to_string(),
                fallback_phone: "+91 98765 43210".to_string(),
            },
            backup: BackupConfig { path: PathBuf::from("pixy_backup_leads.json") },
            server: ServerConfig {
                bind_address: "127.0.0.1".to_string(),
                port: 8080,
                graceful_shutdown_secs: 15,
            },
            widget: WidgetConfig { typing_delay_ms: 900 },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

/// Partial mirror of [`AppConfig`] for TOML deserialization. Every field is
/// optional so a config file only has to name what it changes.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    submission: Option<FileSubmission>,
    backup: Option<FileBackup>,
    server: Option<FileServer>,
    widget: Option<FileWidget>,
    logging: Option<FileLogging>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSubmission {
    endpoint_url: Option<String>,
    timeout_secs: Option<u64>,
    fallback_email: Option<String>,
    fallback_phone: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileBackup {
    path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileServer {
    bind_address: Option<String>,
    port: Option<u16>,
    graceful_shutdown_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileWidget {
    typing_delay_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileLogging {
    level: Option<String>,
    format: Option<LogFormat>,
}

impl AppConfig {
    /// Load order: defaults, then config file, then `PIXY_*` environment
    /// variables, then explicit overrides. Later sources win.
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let path = options
            .config_path
            .clone()
            .or_else(|| env::var(format!("{ENV_PREFIX}_CONFIG")).ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        if path.exists() {
            config.apply_file(&path)?;
        } else if options.require_file || options.config_path.is_some() {
            return Err(ConfigError::MissingConfigFile(path));
        }

        config.apply_env()?;
        config.apply_overrides(&options.overrides);
        config.validate()?;
        Ok(config)
    }

    fn apply_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;
        let file: FileConfig = toml::from_str(&raw)
            .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })?;

        if let Some(submission) = file.submission {
            merge(&mut self.submission.endpoint_url, submission.endpoint_url);
            merge(&mut self.submission.timeout_secs, submission.timeout_secs);
            merge(&mut self.submission.fallback_email, submission.fallback_email);
            merge(&mut self.submission.fallback_phone, submission.fallback_phone);
        }
        if let Some(backup) = file.backup {
            merge(&mut self.backup.path, backup.path);
        }
        if let Some(server) = file.server {
            merge(&mut self.server.bind_address, server.bind_address);
            merge(&mut self.server.port, server.port);
            merge(&mut self.server.graceful_shutdown_secs, server.graceful_shutdown_secs);
        }
        if let Some(widget) = file.widget {
            merge(&mut self.widget.typing_delay_ms, widget.typing_delay_ms);
        }
        if let Some(logging) = file.logging {
            merge(&mut self.logging.level, logging.level);
            merge(&mut self.logging.format, logging.format);
        }
        Ok(())
    }

    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(value) = env::var(format!("{ENV_PREFIX}_SUBMISSION_ENDPOINT_URL")) {
            self.submission.endpoint_url = value;
        }
        if let Ok(value) = env::var(format!("{ENV_PREFIX}_SUBMISSION_TIMEOUT_SECS")) {
            self.submission.timeout_secs =
                parse_env("PIXY_SUBMISSION_TIMEOUT_SECS", &value, value.parse())?;
        }
        if let Ok(value) = env::var(format!("{ENV_PREFIX}_BACKUP_PATH")) {
            self.backup.path = PathBuf::from(value);
        }
        if let Ok(value) = env::var(format!("{ENV_PREFIX}_SERVER_BIND_ADDRESS")) {
            self.server.bind_address = value;
        }
        if let Ok(value) = env::var(format!("{ENV_PREFIX}_SERVER_PORT")) {
            self.server.port = parse_env("PIXY_SERVER_PORT", &value, value.parse())?;
        }
        if let Ok(value) = env::var(format!("{ENV_PREFIX}_LOG_LEVEL")) {
            self.logging.level = value;
        }
        if let Ok(value) = env::var(format!("{ENV_PREFIX}_LOG_FORMAT")) {
            self.logging.format = parse_env("PIXY_LOG_FORMAT", &value, value.parse())?;
        }
        Ok(())
    }

    fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        merge(&mut self.submission.endpoint_url, overrides.endpoint_url.clone());
        merge(&mut self.submission.timeout_secs, overrides.submission_timeout_secs);
        merge(&mut self.backup.path, overrides.backup_path.clone());
        merge(&mut self.server.bind_address, overrides.bind_address.clone());
        merge(&mut self.server.port, overrides.port);
        merge(&mut self.logging.level, overrides.log_level.clone());
        merge(&mut self.logging.format, overrides.log_format);
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.submission.endpoint_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "submission.endpoint_url must not be empty".to_string(),
            ));
        }
        if !self.submission.endpoint_url.starts_with("http://")
            && !self.submission.endpoint_url.starts_with("https://")
        {
            return Err(ConfigError::Validation(format!(
                "submission.endpoint_url must be an http(s) url, got `{}`",
                self.submission.endpoint_url
            )));
        }
        if self.submission.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "submission.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.backup.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation("backup.path must not be empty".to_string()));
        }
        if self.server.bind_address.trim().is_empty() {
            return Err(ConfigError::Validation(
                "server.bind_address must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn merge<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

fn parse_env<T, E>(key: &str, value: &str, parsed: Result<T, E>) -> Result<T, ConfigError> {
    parsed.map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}
