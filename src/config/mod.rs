use crate::orders::EnrichmentConfig;
use crate::simulator::RiskConfig;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub dataset: DatasetConfig,
    pub enrichment: EnrichmentConfig,
    pub risk: RiskConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let data_path = env::var("ORDERS_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_PATH));

        let enrichment_defaults = EnrichmentConfig::default();
        let enrichment = EnrichmentConfig {
            return_carbon_waste_kg: env_f64(
                "ORDERS_RETURN_CARBON_WASTE_KG",
                enrichment_defaults.return_carbon_waste_kg,
            )?,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            dataset: DatasetConfig { path: data_path },
            enrichment,
            risk: load_risk_config()?,
        })
    }
}

const DEFAULT_DATA_PATH: &str = "data/orders.csv";

fn load_risk_config() -> Result<RiskConfig, ConfigError> {
    let defaults = RiskConfig::default();
    Ok(RiskConfig {
        baseline_risk_percent: env_f64("RISK_BASELINE_PERCENT", defaults.baseline_risk_percent)?,
        high_price_threshold: env_f64(
            "RISK_HIGH_PRICE_THRESHOLD",
            defaults.high_price_threshold,
        )?,
        high_price_penalty: env_f64("RISK_HIGH_PRICE_PENALTY", defaults.high_price_penalty)?,
        low_feedback_penalty: env_f64(
            "RISK_LOW_FEEDBACK_PENALTY",
            defaults.low_feedback_penalty,
        )?,
        high_recycled_threshold: env_f64(
            "RISK_HIGH_RECYCLED_THRESHOLD",
            defaults.high_recycled_threshold,
        )?,
        high_recycled_discount: env_f64(
            "RISK_HIGH_RECYCLED_DISCOUNT",
            defaults.high_recycled_discount,
        )?,
        high_risk_classification_threshold: env_f64(
            "RISK_HIGH_RISK_THRESHOLD",
            defaults.high_risk_classification_threshold,
        )?,
        ..defaults
    })
}

fn env_f64(key: &'static str, default: f64) -> Result<f64, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or(ConfigError::InvalidNumber { key, value: raw }),
        Err(_) => Ok(default),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Location of the order export loaded at startup.
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    pub path: PathBuf,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{key} must be a finite number (got '{value}')")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidNumber { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
