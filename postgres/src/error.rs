use harbor_core::error::error::StorageSnafu;
use snafu::{IntoError, Location, Snafu};

pub type Result<T> = std::result::Result<T, Error>;

/// SQLSTATE of an exclusion constraint violation.
pub(crate) const EXCLUSION_VIOLATION: &str = "23P01";

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum Error {
    #[snafu(display("Failed to connect to postgres"))]
    Connection {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: sqlx::Error,
    },
    #[snafu(display("Failed to run migrations"))]
    Migration {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: sqlx::migrate::MigrateError,
    },
    #[snafu(display("Failed a database query"))]
    Query {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: sqlx::Error,
    },
    #[snafu(display("Stored {entity} value '{value}' is not recognized"))]
    UnknownValue {
        #[snafu(implicit)]
        location: Location,
        entity: &'static str,
        value: String,
    },
}

impl From<sqlx::Error> for Error {
    #[track_caller]
    fn from(error: sqlx::Error) -> Self {
        error::QuerySnafu.into_error(error)
    }
}

impl From<Error> for harbor_core::Error {
    #[track_caller]
    fn from(error: Error) -> Self {
        StorageSnafu.into_error(Box::new(error))
    }
}

pub(crate) fn is_exclusion_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(e) => e.code().as_deref() == Some(EXCLUSION_VIOLATION),
        _ => false,
    }
}
