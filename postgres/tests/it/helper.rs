use chrono::{DateTime, TimeZone, Utc};
use dockertest::{DockerTest, Source, StaticManagementPolicy};
use futures::Future;
use harbor_core::{
    AssignmentInbound, Berth, BerthAssignment, DockingWindow, NewBerth, NewBerthAssignment,
    NewShip, Ship, ShipInbound, UserId,
};
use postgres::{POSTGRES_HANDLE, PostgresAdapter, TestDb, postgres_composition, test_settings};
use rand::random;
use std::{
    panic,
    sync::{
        Once,
        atomic::{AtomicI64, Ordering},
    },
};
use tracing_subscriber::FmtSubscriber;

static TRACING: Once = Once::new();

pub struct TestHelper {
    pub db: TestDb,
    counter: AtomicI64,
}

pub fn ts(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, day, hour, 0, 0).unwrap()
}

pub fn window(eta: DateTime<Utc>, etd: DateTime<Utc>) -> DockingWindow {
    DockingWindow::new(eta, etd).unwrap()
}

impl TestHelper {
    pub fn adapter(&self) -> &PostgresAdapter {
        &self.db.db
    }

    fn next(&self) -> i64 {
        self.counter.fetch_add(1, Ordering::SeqCst)
    }

    pub async fn berth(&self) -> Berth {
        let mut berth = NewBerth::test_default();
        berth.name = format!("Quay {}", self.next());
        self.db.add_berth(berth).await
    }

    pub async fn ship(&self) -> Ship {
        let n = self.next();
        let mut ship = NewShip::test_default(UserId::new(1000 + n));
        ship.registry_number = format!("IMO{}", 9_000_000 + n);
        self.adapter().add_ship(ship).await.unwrap()
    }

    pub async fn reserve(
        &self,
        berth: &Berth,
        ship: &Ship,
        eta: DateTime<Utc>,
        etd: DateTime<Utc>,
    ) -> harbor_core::Result<BerthAssignment> {
        self.adapter()
            .add_assignment(NewBerthAssignment {
                ship_id: ship.id,
                berth_id: berth.id,
                window: window(eta, etd),
                created_by: ship.owner_id,
                overridden: false,
            })
            .await
    }
}

pub async fn test<T, Fut>(test: T)
where
    T: FnOnce(TestHelper) -> Fut + panic::UnwindSafe + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    TRACING.call_once(|| {
        tracing::subscriber::set_global_default(
            FmtSubscriber::builder()
                .with_max_level(tracing::Level::INFO)
                .with_test_writer()
                .finish(),
        )
        .unwrap();
    });

    let mut docker_test = DockerTest::new().with_default_source(Source::DockerHub);

    let mut composition = postgres_composition();
    composition.static_container(StaticManagementPolicy::Dynamic);
    docker_test.add_composition(composition);

    let db_name = random::<u32>().to_string();

    docker_test
        .run_async(|ops| async move {
            let ip = ops.handle(POSTGRES_HANDLE).ip().to_string();

            let admin = TestDb::connect(&test_settings(ip.clone(), "postgres")).await;
            admin.create_test_database(&db_name).await;

            let db = TestDb::connect(&test_settings(ip, &db_name)).await;
            db.db.do_migrations().await.unwrap();

            test(TestHelper {
                db,
                counter: AtomicI64::new(1),
            })
            .await;

            admin.drop_db(&db_name).await;
        })
        .await;
}
