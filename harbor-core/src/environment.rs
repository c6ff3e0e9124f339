use serde::Deserialize;
use strum::{AsRefStr, Display, EnumString};

/// The environment a binary is deployed to, selects which `config/<environment>.yml` is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, EnumString, AsRefStr, Display)]
pub enum Environment {
    Local,
    Development,
    Production,
    Test,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl Environment {
    /// Reads `APP_ENVIRONMENT`, falling back to [`Environment::Test`] when it is unset or unknown.
    pub fn from_env() -> Environment {
        std::env::var("APP_ENVIRONMENT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(Environment::Test)
    }

    pub fn config_file(&self) -> String {
        format!("config/{}", self.as_ref().to_lowercase())
    }
}

impl LogLevel {
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}
