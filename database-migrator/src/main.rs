#![deny(warnings)]
#![deny(rust_2018_idioms)]

use error::{
    Result,
    error::{PostgresSnafu, SettingsSnafu},
};
use postgres::PostgresAdapter;
use settings::Settings;
use snafu::ResultExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod error;
mod settings;

#[snafu::report]
#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::new().context(SettingsSnafu)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(settings.log_level.as_filter()))
        .init();

    let adapter = PostgresAdapter::new(&settings.postgres)
        .await
        .context(PostgresSnafu)?;
    adapter.do_migrations().await.context(PostgresSnafu)?;

    info!("database migrations completed");
    Ok(())
}
