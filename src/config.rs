use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;
use std::env;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use strum::{AsRefStr, Display, EnumString};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub planner: PlannerConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlannerConfig {
    #[serde(default = "default_season_days")]
    pub default_season_days: u32,
    #[serde(default = "default_min_season_days")]
    pub min_season_days: u32,
    #[serde(default = "default_max_season_days")]
    pub max_season_days: u32,
    /// Fixed RNG seed; plans vary between runs when unset.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            default_season_days: default_season_days(),
            min_season_days: default_min_season_days(),
            max_season_days: default_max_season_days(),
            seed: None,
        }
    }
}

fn default_season_days() -> u32 {
    90
}

fn default_min_season_days() -> u32 {
    21
}

fn default_max_season_days() -> u32 {
    364
}

impl PlannerConfig {
    pub fn season_range(&self) -> RangeInclusive<u32> {
        self.min_season_days..=self.max_season_days
    }

    pub fn check_season(&self, days: u32) -> Result<(), String> {
        if !self.season_range().contains(&days) {
            return Err(format!(
                "Season length must be between {} and {} days, got {}",
                self.min_season_days, self.max_season_days, days
            ));
        }
        Ok(())
    }

    /// RNG for one plan. An explicit seed wins over the configured one.
    pub fn rng(&self, seed: Option<u64>) -> StdRng {
        match seed.or(self.seed) {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, EnumString, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    /// Directory of `<crop>.json` documents replacing the embedded catalog.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (AGROPLAN__PLANNER__SEED, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("planner.default_season_days", default_season_days())?
            .set_default("planner.min_season_days", default_min_season_days())?
            .set_default("planner.max_season_days", default_max_season_days())?
            .set_default("observability.log_level", default_log_level())?
            .set_default("observability.format", "pretty")?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Config file is optional
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("AGROPLAN")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        let planner = &self.planner;
        if planner.min_season_days == 0 || planner.min_season_days > planner.max_season_days {
            return Err(format!(
                "Planner season range {}..={} is empty",
                planner.min_season_days, planner.max_season_days
            ));
        }
        if !planner.season_range().contains(&planner.default_season_days) {
            return Err(format!(
                "Default season of {} days is outside {}..={}",
                planner.default_season_days, planner.min_season_days, planner.max_season_days
            ));
        }
        if self.observability.log_level.trim().is_empty() {
            return Err("Log level must not be empty".to_string());
        }
        Ok(())
    }
}
