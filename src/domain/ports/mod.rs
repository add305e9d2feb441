use crate::domain::models::{
    event::{EventRecord, Photo},
    job::Job,
    table_row::{TableRow, TableRowFields},
};
use crate::error::AppError;
use async_trait::async_trait;
use serde_json::Value;

/// Raw keyed blob storage. Values are written wholesale.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;
    async fn put(&self, key: &str, value: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait EventStore: Send + Sync {
    async fn list(&self) -> Result<Vec<EventRecord>, AppError>;
    async fn get(&self, id: &str) -> Result<Option<EventRecord>, AppError>;
    async fn save(&self, record: &EventRecord) -> Result<EventRecord, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait RemoteTableService: Send + Sync {
    async fn list_rows(&self) -> Result<Vec<TableRow>, AppError>;
    async fn get_row(&self, id: i64) -> Result<TableRow, AppError>;
    async fn create_row(&self, fields: &TableRowFields) -> Result<i64, AppError>;
    async fn update_row(&self, id: i64, fields: &TableRowFields) -> Result<TableRow, AppError>;
    async fn upload_file(&self, file_name: &str, data: Vec<u8>, mime: &str) -> Result<Photo, AppError>;
}

#[async_trait]
pub trait WebhookService: Send + Sync {
    async fn notify(&self, payload: &Value) -> Result<(), AppError>;
}

#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn create(&self, job: &Job) -> Result<Job, AppError>;
    async fn find_pending(&self, limit: i32) -> Result<Vec<Job>, AppError>;
    async fn list_jobs(&self) -> Result<Vec<Job>, AppError>;
    async fn update_status(&self, id: &str, status: &str, error_message: Option<String>) -> Result<(), AppError>;
}
