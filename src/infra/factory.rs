use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;
use tera::Tera;

use crate::config::Config;
use crate::state::AppState;
use crate::domain::ports::{EventStore, JobRepository, KeyValueStore, RemoteTableService, WebhookService};
use crate::domain::services::autosave::AutosaveService;
use crate::domain::services::local_store::LocalEventStore;
use crate::infra::table::baserow_service::BaserowTableService;
use crate::infra::webhook::http_webhook_service::HttpWebhookService;
use crate::infra::repositories::{
    postgres_job_repo::PostgresJobRepo, postgres_kv_repo::PostgresKvRepo,
    sqlite_job_repo::SqliteJobRepo, sqlite_kv_repo::SqliteKvRepo,
};

pub const REPORT_TEMPLATE: &str = "report.html";

pub fn load_templates() -> Arc<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_template(REPORT_TEMPLATE, include_str!("../../templates/report.html"))
        .expect("Failed to load report template");
    Arc::new(tera)
}

/// Wires the store-independent services around the given persistence ports.
pub fn assemble_state(
    config: &Config,
    kv: Arc<dyn KeyValueStore>,
    job_repo: Arc<dyn JobRepository>,
    remote_table: Arc<dyn RemoteTableService>,
    webhook_service: Option<Arc<dyn WebhookService>>,
) -> AppState {
    let event_store: Arc<dyn EventStore> = Arc::new(LocalEventStore::new(kv, config.timezone));
    let autosave = Arc::new(AutosaveService::new(event_store.clone(), config.autosave_debounce));

    AppState {
        config: config.clone(),
        event_store,
        job_repo,
        remote_table,
        webhook_service,
        autosave,
        templates: load_templates(),
    }
}

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;

    let remote_table: Arc<dyn RemoteTableService> = Arc::new(BaserowTableService::new(
        config.baserow_url.clone(),
        config.baserow_token.clone(),
        config.baserow_table_id.clone(),
    ));

    let webhook_service: Option<Arc<dyn WebhookService>> = config
        .webhook_url
        .clone()
        .map(|url| Arc::new(HttpWebhookService::new(url)) as Arc<dyn WebhookService>);

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        assemble_state(
            config,
            Arc::new(PostgresKvRepo::new(pool.clone())),
            Arc::new(PostgresJobRepo::new(pool)),
            remote_table,
            webhook_service,
        )
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        assemble_state(
            config,
            Arc::new(SqliteKvRepo::new(pool.clone())),
            Arc::new(SqliteJobRepo::new(pool)),
            remote_table,
            webhook_service,
        )
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
