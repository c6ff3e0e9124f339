use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct PsqlSettings {
    pub ip: String,
    pub port: u16,
    pub db_name: Option<String>,
    pub username: String,
    pub password: Option<String>,
    pub max_connections: u32,
    pub root_cert: Option<String>,
    #[serde(default)]
    pub log_statements: PsqlLogStatements,
    pub application_name: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum PsqlLogStatements {
    #[default]
    Enable,
    Disable,
}
