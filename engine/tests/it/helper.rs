use chrono::{DateTime, TimeZone, Utc};
use dockertest::{DockerTest, Source, StaticManagementPolicy};
use engine::*;
use futures::Future;
use harbor_core::{ActingUser, Environment, TestStateBuilder, TestStorage, UserId, UserRole};
use postgres::{POSTGRES_HANDLE, TestDb, postgres_composition, test_settings};
use rand::random;
use std::{
    panic,
    sync::{Arc, Once},
};
use tracing_subscriber::FmtSubscriber;

static TRACING: Once = Once::new();

pub struct TestHelper {
    pub app: App,
    pub storage: Arc<TestStorage>,
}

impl TestHelper {
    pub fn builder(&self) -> TestStateBuilder {
        TestStateBuilder::new(self.storage.clone())
    }
}

/// Services built from settings against a fresh postgres database.
pub struct PostgresHelper {
    pub app: App,
    pub db: TestDb,
}

/// A timestamp in January 2025, the month generated test windows start in.
pub fn ts(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, day, hour, 0, 0).unwrap()
}

pub fn operator() -> ActingUser {
    ActingUser::new(UserId::new(1), UserRole::Operator)
}

pub fn harbor_master() -> ActingUser {
    ActingUser::new(UserId::new(2), UserRole::HarborMaster)
}

pub fn admin() -> ActingUser {
    ActingUser::new(UserId::new(3), UserRole::Admin)
}

pub fn owner(id: UserId) -> ActingUser {
    ActingUser::new(id, UserRole::ShipOwner)
}

pub async fn test<T, Fut>(test: T)
where
    T: FnOnce(TestHelper, TestStateBuilder) -> Fut,
    Fut: Future<Output = ()>,
{
    test_with_settings(AllocationSettings::default(), test).await
}

pub async fn test_with_settings<T, Fut>(settings: AllocationSettings, test: T)
where
    T: FnOnce(TestHelper, TestStateBuilder) -> Fut,
    Fut: Future<Output = ()>,
{
    init_tracing();

    let storage = Arc::new(TestStorage::new());
    let app = App::with_storage(storage.clone(), &settings);

    let helper = TestHelper { app, storage };
    let builder = helper.builder();

    test(helper, builder).await;
}

pub async fn postgres_test<T, Fut>(test: T)
where
    T: FnOnce(PostgresHelper) -> Fut + panic::UnwindSafe + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    init_tracing();

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

            let settings = Settings {
                environment: Environment::Local,
                postgres: test_settings(ip, &db_name),
                allocation: AllocationSettings::default(),
            };
            let app = App::build(&settings).await.unwrap();
            let db = TestDb::connect(&settings.postgres).await;

            test(PostgresHelper { app, db }).await;

            admin.drop_db(&db_name).await;
        })
        .await;
}

fn init_tracing() {
    TRACING.call_once(|| {
        tracing::subscriber::set_global_default(
            FmtSubscriber::builder()
                .with_max_level(tracing::Level::INFO)
                .with_test_writer()
                .finish(),
        )
        .unwrap();
    });
}
