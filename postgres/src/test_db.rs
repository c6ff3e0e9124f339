use crate::{PostgresAdapter, PsqlLogStatements, PsqlSettings, models};
use dockertest::{Composition, Image, waitfor::MessageSource, waitfor::MessageWait};
use harbor_core::{Berth, BerthAssignment, NewBerth};
use std::{collections::HashMap, time::Duration};

static DATABASE_PASSWORD: &str = "test123";
/// Container name of [`postgres_composition`], used to look up its handle.
pub static POSTGRES_HANDLE: &str = "postgres";

/// Postgres container shared by every test of a test binary.
pub fn postgres_composition() -> Composition {
    let env = HashMap::from([("POSTGRES_PASSWORD".to_string(), DATABASE_PASSWORD.to_string())]);

    Composition::with_image(Image::with_repository("postgres").tag("16"))
        .with_container_name(POSTGRES_HANDLE)
        .with_env(env)
        .with_wait_for(Box::new(MessageWait {
            message: "database system is ready to accept connections".into(),
            source: MessageSource::Stderr,
            timeout: 30,
        }))
        .with_log_options(None)
}

/// Settings for a database inside the container at `ip`.
pub fn test_settings(ip: String, db_name: &str) -> PsqlSettings {
    PsqlSettings {
        ip,
        port: 5432,
        db_name: Some(db_name.to_string()),
        username: "postgres".to_string(),
        password: Some(DATABASE_PASSWORD.to_string()),
        max_connections: 2,
        root_cert: None,
        log_statements: PsqlLogStatements::Enable,
        application_name: None,
    }
}

/// Wrapper with additional methods intended for testing purposes.
#[derive(Debug, Clone)]
pub struct TestDb {
    pub db: PostgresAdapter,
}

impl TestDb {
    /// Connects with retries, the container accepts connections shortly after it logs readiness.
    pub async fn connect(settings: &PsqlSettings) -> TestDb {
        let mut attempts = 0;
        loop {
            match PostgresAdapter::new(settings).await {
                Ok(db) => return TestDb { db },
                Err(e) if attempts < 20 => {
                    attempts += 1;
                    tracing::debug!("postgres not ready yet: {e:?}");
                    tokio::time::sleep(Duration::from_millis(500)).await;
                }
                Err(e) => panic!("failed to connect to test postgres: {e:?}"),
            }
        }
    }

    pub async fn create_test_database(&self, db_name: &str) {
        sqlx::query(&format!("CREATE DATABASE \"{db_name}\";"))
            .execute(&self.db.pool)
            .await
            .unwrap();
    }

    pub async fn drop_db(&self, db_name: &str) {
        sqlx::query(&format!("DROP DATABASE \"{db_name}\" WITH (FORCE);"))
            .execute(&self.db.pool)
            .await
            .unwrap();
        self.db.pool.close().await;
    }

    pub async fn add_berth(&self, berth: NewBerth) -> Berth {
        sqlx::query_as::<_, models::Berth>(
            r#"
INSERT INTO
    berths (
        name,
        max_length,
        max_draft,
        base_rate_per_day,
        is_available
    )
VALUES
    ($1, $2, $3, $4, $5)
RETURNING
    berth_id,
    name,
    max_length,
    max_draft,
    base_rate_per_day,
    is_available
            "#,
        )
        .bind(berth.name)
        .bind(berth.max_length)
        .bind(berth.max_draft)
        .bind(berth.base_rate_per_day)
        .bind(berth.is_available)
        .fetch_one(&self.db.pool)
        .await
        .unwrap()
        .into()
    }

    pub async fn all_assignments(&self) -> Vec<BerthAssignment> {
        sqlx::query_as::<_, models::BerthAssignment>(
            r#"
SELECT
    berth_assignment_id,
    ship_id,
    berth_id,
    eta,
    etd,
    status,
    actual_arrival,
    actual_departure,
    created_by,
    overridden,
    created_at
FROM
    berth_assignments
ORDER BY
    berth_assignment_id
            "#,
        )
        .fetch_all(&self.db.pool)
        .await
        .unwrap()
        .into_iter()
        .map(|a| BerthAssignment::try_from(a).unwrap())
        .collect()
    }
}
