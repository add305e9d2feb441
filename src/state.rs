use std::sync::Arc;
use crate::domain::ports::{EventStore, JobRepository, RemoteTableService, WebhookService};
use crate::domain::services::autosave::AutosaveService;
use crate::config::Config;
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub event_store: Arc<dyn EventStore>,
    pub job_repo: Arc<dyn JobRepository>,
    pub remote_table: Arc<dyn RemoteTableService>,
    /// `None` when no webhook URL is configured.
    pub webhook_service: Option<Arc<dyn WebhookService>>,
    pub autosave: Arc<AutosaveService>,
    pub templates: Arc<Tera>,
}
