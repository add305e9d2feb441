use event_report_backend::{
    api::router::create_router,
    state::AppState,
    config::Config,
    infra::factory::assemble_state,
    infra::repositories::{sqlite_job_repo::SqliteJobRepo, sqlite_kv_repo::SqliteKvRepo},
    domain::models::event::Photo,
    domain::models::table_row::{TableRow, TableRowFields},
    domain::ports::{RemoteTableService, WebhookService},
    error::AppError,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, header},
    response::Response,
    Router,
};
use std::str::FromStr;
use async_trait::async_trait;
use tower::ServiceExt;
use serde_json::Value;

pub const ADMIN_PASSWORD: &str = "segredo";

#[derive(Default)]
pub struct MockRemoteTable {
    pub rows: Mutex<Vec<TableRow>>,
    pub uploads: Mutex<Vec<String>>,
    pub failing: AtomicBool,
}

impl MockRemoteTable {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), AppError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::RemoteTable { status: 503, body: "unavailable".to_string() });
        }
        Ok(())
    }

    fn to_row(id: i64, fields: &TableRowFields) -> TableRow {
        TableRow {
            id,
            title: Some(fields.title.clone()),
            date: Some(fields.date.clone()),
            location: Some(fields.location.clone()),
            organizers: Some(fields.organizers.clone()),
            axes: Some(fields.axes.clone()),
            projects: Some(fields.projects.clone()),
            photos: Some(fields.photos.clone()),
            method_and_scale: Some(fields.method_and_scale.clone()),
            rationale: Some(fields.rationale.clone()),
            summary: None,
            article: None,
        }
    }

    pub fn insert_row(&self, fields: &TableRowFields) -> i64 {
        let mut rows = self.rows.lock().unwrap();
        let id = 1000 + rows.len() as i64;
        rows.push(Self::to_row(id, fields));
        id
    }
}

#[async_trait]
impl RemoteTableService for MockRemoteTable {
    async fn list_rows(&self) -> Result<Vec<TableRow>, AppError> {
        self.check()?;
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn get_row(&self, id: i64) -> Result<TableRow, AppError> {
        self.check()?;
        self.rows.lock().unwrap().iter().find(|r| r.id == id).cloned()
            .ok_or(AppError::RemoteTable { status: 404, body: "row does not exist".to_string() })
    }

    async fn create_row(&self, fields: &TableRowFields) -> Result<i64, AppError> {
        self.check()?;
        Ok(self.insert_row(fields))
    }

    async fn update_row(&self, id: i64, fields: &TableRowFields) -> Result<TableRow, AppError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let row = rows.iter_mut().find(|r| r.id == id)
            .ok_or(AppError::RemoteTable { status: 404, body: "row does not exist".to_string() })?;
        *row = Self::to_row(id, fields);
        Ok(row.clone())
    }

    async fn upload_file(&self, file_name: &str, _data: Vec<u8>, _mime: &str) -> Result<Photo, AppError> {
        self.check()?;
        self.uploads.lock().unwrap().push(file_name.to_string());
        Ok(Photo {
            name: file_name.to_string(),
            url: format!("https://files.test/{}", file_name),
        })
    }
}

#[derive(Default)]
pub struct MockWebhook {
    pub received: Mutex<Vec<Value>>,
    pub failing: AtomicBool,
}

#[async_trait]
impl WebhookService for MockWebhook {
    async fn notify(&self, payload: &Value) -> Result<(), AppError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::Upstream("webhook down".to_string()));
        }
        self.received.lock().unwrap().push(payload.clone());
        Ok(())
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub remote: Arc<MockRemoteTable>,
    pub webhook: Arc<MockWebhook>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        Self::build(true).await
    }

    pub async fn without_webhook() -> Self {
        Self::build(false).await
    }

    async fn build(with_webhook: bool) -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            admin_password: Some(ADMIN_PASSWORD.to_string()),
            baserow_url: "http://localhost".to_string(),
            baserow_token: None,
            baserow_table_id: "1".to_string(),
            webhook_url: with_webhook.then(|| "http://localhost/hook".to_string()),
            timezone: chrono_tz::America::Fortaleza,
            autosave_debounce: Duration::from_millis(50),
            job_poll_interval: Duration::from_millis(50),
        };

        let remote = Arc::new(MockRemoteTable::default());
        let webhook = Arc::new(MockWebhook::default());
        let webhook_service: Option<Arc<dyn WebhookService>> = if with_webhook {
            Some(webhook.clone() as Arc<dyn WebhookService>)
        } else {
            None
        };

        let state = Arc::new(assemble_state(
            &config,
            Arc::new(SqliteKvRepo::new(pool.clone())),
            Arc::new(SqliteJobRepo::new(pool.clone())),
            remote.clone(),
            webhook_service,
        ));

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            remote,
            webhook,
        }
    }

    /// Returns the `Cookie` header value for an admin session.
    pub async fn login(&self) -> String {
        let payload = serde_json::json!({ "password": ADMIN_PASSWORD });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("Login failed in test helper: status {}", response.status());
        }

        let session_cookie = response.headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|h| h.to_str().unwrap().to_string())
            .find(|c| c.starts_with("auth_session="))
            .expect("No auth_session cookie returned");

        session_cookie.split(';').next().unwrap().to_string()
    }

    pub async fn request(&self, method: &str, uri: &str, cookie: Option<&str>, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        self.router.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}

#[allow(dead_code)]
pub async fn parse_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[allow(dead_code)]
pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[allow(dead_code)]
pub fn workshop_payload() -> Value {
    serde_json::json!({
        "title": "Workshop",
        "date": "2024-03-10",
        "organizer": ["Ana"],
        "eixos": ["Inovação"],
        "projetos": ["PLURAL CARIRI"],
        "comoQuanto": ["capacitar equipes"],
        "porQue": ["aumentar produtividade"],
        "tone": "institucional",
        "length": "curto",
        "cta": false
    })
}
