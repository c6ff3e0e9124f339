use config::{Config, File};
use harbor_core::{Environment, LogLevel};
use postgres::PsqlSettings;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub log_level: LogLevel,
    pub postgres: PsqlSettings,
}

impl Settings {
    pub fn new() -> Result<Settings, config::ConfigError> {
        let environment = Environment::from_env();

        Config::builder()
            .add_source(File::with_name(&environment.config_file()).required(true))
            .add_source(
                config::Environment::with_prefix("HARBOR_DATABASE_MIGRATOR").separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}
