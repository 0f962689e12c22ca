//! Application configuration management.

use chrono_tz::Tz;
use serde::Deserialize;

use crate::error::AppError;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Finance rules configuration.
    #[serde(default)]
    pub finance: FinanceConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
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

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Scale of the stored money columns (`NUMERIC(18, 4)`).
pub const MAX_DECIMAL_PLACES: u32 = 4;

/// Longest monthly report series.
pub const MAX_REPORT_MONTHS: u32 = 120;

/// Finance rules that vary per deployment.
#[derive(Debug, Clone, Deserialize)]
pub struct FinanceConfig {
    /// IANA timezone used to decide what "today" is.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Decimal places of the minimal currency unit.
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
    /// Largest installment count accepted for a single draft.
    #[serde(default = "default_max_installments")]
    pub max_installments: u32,
    /// Default length of the monthly report series.
    #[serde(default = "default_report_months")]
    pub report_months: u32,
}

impl Default for FinanceConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            decimal_places: default_decimal_places(),
            max_installments: default_max_installments(),
            report_months: default_report_months(),
        }
    }
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_decimal_places() -> u32 {
    2
}

fn default_max_installments() -> u32 {
    120
}

fn default_report_months() -> u32 {
    6
}

impl FinanceConfig {
    /// Parses the configured timezone.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the name is not a known IANA zone.
    pub fn tz(&self) -> Result<Tz, AppError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| AppError::Config(format!("unknown timezone: {}", self.timezone)))
    }

    /// Checks the values that serde cannot constrain.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` describing the first invalid value.
    pub fn validate(&self) -> Result<(), AppError> {
        self.tz()?;
        if self.decimal_places > MAX_DECIMAL_PLACES {
            return Err(AppError::Config(format!(
                "decimal_places must be at most {MAX_DECIMAL_PLACES}, got {}",
                self.decimal_places
            )));
        }
        if self.max_installments == 0 {
            return Err(AppError::Config(
                "max_installments must be at least 1".to_string(),
            ));
        }
        if !(1..=MAX_REPORT_MONTHS).contains(&self.report_months) {
            return Err(AppError::Config(format!(
                "report_months must be between 1 and {MAX_REPORT_MONTHS}, got {}",
                self.report_months
            )));
        }
        Ok(())
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones winning: `DATABASE_URL` (as `database.url`),
    /// `config/default`, `config/{RUN_MODE}`, then `BIZDESK__SECTION__KEY`
    /// environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, AppError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let mut builder = config::Config::builder();
        // The migrator reads DATABASE_URL; accept it here as the lowest layer.
        if let Ok(url) = std::env::var("DATABASE_URL") {
            builder = builder.set_default("database.url", url)?;
        }

        let config = builder
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("BIZDESK").separator("__"))
            .build()?;

        let app: Self = config.try_deserialize()?;
        app.finance.validate()?;
        Ok(app)
    }
}
