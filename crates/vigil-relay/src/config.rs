//! Relay configuration loading from file and environment variables.

use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use thiserror::Error;
use vigil_handlers::Destinations;

/// Top-level relay configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Platform connection settings.
    #[serde(default)]
    pub platform: PlatformConfig,

    /// Category → notification-channel bindings.
    #[serde(default)]
    pub destinations: DestinationsConfig,

    /// Liveness endpoint settings.
    #[serde(default)]
    pub health: HealthConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Connection settings for the chat platform.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlatformConfig {
    /// Bot token used for both the gateway and the REST API.
    #[serde(default)]
    pub token: String,

    /// WebSocket URL of the platform gateway.
    #[serde(default)]
    pub gateway_url: String,

    /// Base URL of the platform REST API.
    #[serde(default)]
    pub api_base: String,
}

/// Notification-channel bindings, one optional channel per category.
/// An unbound category silently drops its notifications.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct DestinationsConfig {
    pub channels: Option<u64>,
    pub guilds: Option<u64>,
    pub messages: Option<u64>,
    pub members: Option<u64>,
    pub reactions: Option<u64>,
    pub roles: Option<u64>,
}

impl DestinationsConfig {
    /// Converts the configured bindings into the handler-facing form.
    pub fn bindings(self) -> Destinations {
        Destinations {
            channels: self.channels,
            guilds: self.guilds,
            messages: self.messages,
            members: self.members,
            reactions: self.reactions,
            roles: self.roles,
        }
    }
}

/// Network configuration for the liveness endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "vigil_relay=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
}

fn default_port() -> u16 {
    3400
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A required setting has no value.
    #[error("missing required setting: {0}")]
    Missing(&'static str),
}

impl Config {
    /// Checks that every setting the relay cannot run without is present.
    ///
    /// Destination bindings are not required: an unbound category drops
    /// its notifications while the rest keep working.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` naming the first absent setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.platform.token.is_empty() {
            return Err(ConfigError::Missing("platform.token"));
        }
        if self.platform.gateway_url.is_empty() {
            return Err(ConfigError::Missing("platform.gateway_url"));
        }
        if self.platform.api_base.is_empty() {
            return Err(ConfigError::Missing("platform.api_base"));
        }
        Ok(())
    }
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `VIGIL_TOKEN` overrides `platform.token`
/// - `VIGIL_GATEWAY_URL` overrides `platform.gateway_url`
/// - `VIGIL_API_BASE` overrides `platform.api_base`
/// - `VIGIL_<CATEGORY>_UPDATES_CHANNEL_ID` (e.g.
///   `VIGIL_CHANNELS_UPDATES_CHANNEL_ID`) overrides the matching
///   destination binding
/// - `VIGIL_LOG_LEVEL` overrides `logging.level`
/// - `VIGIL_LOG_JSON` overrides `logging.json` (set to "true" to enable)
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    // Environment variable overrides
    if let Ok(token) = std::env::var("VIGIL_TOKEN") {
        config.platform.token = token;
    }
    if let Ok(url) = std::env::var("VIGIL_GATEWAY_URL") {
        config.platform.gateway_url = url;
    }
    if let Ok(base) = std::env::var("VIGIL_API_BASE") {
        config.platform.api_base = base;
    }
    if let Some(id) = env_channel("VIGIL_CHANNELS_UPDATES_CHANNEL_ID") {
        config.destinations.channels = Some(id);
    }
    if let Some(id) = env_channel("VIGIL_GUILDS_UPDATES_CHANNEL_ID") {
        config.destinations.guilds = Some(id);
    }
    if let Some(id) = env_channel("VIGIL_MESSAGES_UPDATES_CHANNEL_ID") {
        config.destinations.messages = Some(id);
    }
    if let Some(id) = env_channel("VIGIL_MEMBERS_UPDATES_CHANNEL_ID") {
        config.destinations.members = Some(id);
    }
    if let Some(id) = env_channel("VIGIL_REACTIONS_UPDATES_CHANNEL_ID") {
        config.destinations.reactions = Some(id);
    }
    if let Some(id) = env_channel("VIGIL_ROLES_UPDATES_CHANNEL_ID") {
        config.destinations.roles = Some(id);
    }
    if let Ok(level) = std::env::var("VIGIL_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Ok(json) = std::env::var("VIGIL_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }

    Ok(config)
}

fn env_channel(var: &str) -> Option<u64> {
    let value = std::env::var(var).ok()?;
    match value.parse() {
        Ok(id) => Some(id),
        Err(_) => {
            tracing::warn!(var, value, "ignoring non-numeric channel id override");
            None
        }
    }
}
