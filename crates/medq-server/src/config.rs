use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use time::UtcOffset;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub queue: QueueConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Demo/dev seed data applied to the in-memory store at boot.
    #[serde(default)]
    pub seed: SeedConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("server.port must be > 0".into());
        }
        let lvl = self.logging.level.to_ascii_lowercase();
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !valid_levels.contains(&lvl.as_str()) {
            return Err(format!("logging.level must be one of {valid_levels:?}"));
        }
        if self.queue.utc_offset_minutes.abs() > 14 * 60 {
            return Err("queue.utc_offset_minutes must be within +-840".into());
        }
        for counter in &self.seed.counters {
            if !self.seed.categories.iter().any(|c| c.name == counter.category) {
                return Err(format!(
                    "seed.counters entry '{}' references unknown category '{}'",
                    counter.name, counter.category
                ));
            }
        }
        Ok(())
    }

    pub fn addr(&self) -> SocketAddr {
        use std::net::{IpAddr, Ipv4Addr};
        let host: IpAddr = self
            .server
            .host
            .parse()
            .unwrap_or(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)));
        SocketAddr::from((host, self.server.port))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Facility UTC offset in minutes; local midnight is the day boundary
    /// for token numbering and stats.
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 0,
        }
    }
}

impl QueueConfig {
    pub fn utc_offset(&self) -> UtcOffset {
        UtcOffset::from_whole_seconds(self.utc_offset_minutes * 60).unwrap_or(UtcOffset::UTC)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NotificationsConfig {
    /// HTTP SMS gateway endpoint. Leave unset to disable SMS delivery;
    /// push delivery always goes to each patient's registered endpoint.
    #[serde(default)]
    pub sms_gateway_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SeedConfig {
    #[serde(default)]
    pub categories: Vec<SeedCategory>,
    #[serde(default)]
    pub counters: Vec<SeedCounter>,
    #[serde(default)]
    pub patients: Vec<SeedPatient>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedCategory {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedCounter {
    pub name: String,
    /// Name of a `seed.categories` entry.
    pub category: String,
    #[serde(default)]
    pub department: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedPatient {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub push_endpoint: Option<String>,
}

/// Loads configuration from an optional TOML file plus `MEDQ_`-prefixed
/// environment overrides (e.g. `MEDQ_SERVER__PORT=9090`).
pub fn load_config(path: Option<&str>) -> Result<AppConfig, config::ConfigError> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::with_name(path).required(false));
    }
    let cfg: AppConfig = builder
        .add_source(config::Environment::with_prefix("MEDQ").separator("__"))
        .build()?
        .try_deserialize()?;
    cfg.validate().map_err(config::ConfigError::Message)?;
    Ok(cfg)
}
