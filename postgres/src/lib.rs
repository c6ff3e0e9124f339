#![deny(rust_2018_idioms)]

mod adapter;
mod error;
mod models;
mod queries;
mod settings;
#[cfg(feature = "test")]
mod test_db;

pub use adapter::PostgresAdapter;
pub use error::{Error, Result};
pub use settings::{PsqlLogStatements, PsqlSettings};
#[cfg(feature = "test")]
pub use test_db::{POSTGRES_HANDLE, TestDb, postgres_composition, test_settings};
