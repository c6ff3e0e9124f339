use config::{Config, ConfigError, File};
use harbor_core::Environment;
use postgres::PsqlSettings;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub environment: Environment,
    pub postgres: PsqlSettings,
    #[serde(default)]
    pub allocation: AllocationSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AllocationSettings {
    /// How far in the past a submitted arrival may lie, to tolerate clock skew.
    #[serde(with = "humantime_serde")]
    pub submission_grace: Duration,
    pub min_request_days: i64,
    pub max_request_days: i64,
    /// Used when a ship's length falls outside every size bracket.
    pub default_size_multiplier: Decimal,
    /// Used when a ship type has no multiplier.
    pub default_type_multiplier: Decimal,
}

impl Default for AllocationSettings {
    fn default() -> Self {
        Self {
            submission_grace: Duration::from_secs(15 * 60),
            min_request_days: 1,
            max_request_days: 90,
            default_size_multiplier: Decimal::ONE,
            default_type_multiplier: Decimal::ONE,
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();

        Config::builder()
            .add_source(File::with_name(&environment.config_file()).required(true))
            .add_source(config::Environment::with_prefix("HARBOR_ENGINE").separator("__"))
            .set_override("environment", environment.as_ref())?
            .build()?
            .try_deserialize()
    }
}
