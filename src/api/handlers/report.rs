use axum::{extract::{State, Path}, response::{Html, IntoResponse}};
use crate::state::AppState;
use crate::api::extractors::session::AdminSession;
use crate::api::handlers::event::find_event;
use crate::domain::services::report::ReportView;
use crate::infra::factory::REPORT_TEMPLATE;
use crate::error::AppError;
use std::sync::Arc;
use tracing::error;

/// Print-ready HTML report, handed to the PDF exporter as is.
pub async fn get_report(
    State(state): State<Arc<AppState>>,
    _session: AdminSession,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = find_event(&state, &id).await?;
    let view = ReportView::from_event(&event, state.config.timezone);

    let context = tera::Context::from_serialize(&view).map_err(|e| {
        error!("Report context error: {:?}", e);
        AppError::InternalWithMsg(format!("Report context error: {}", e))
    })?;
    let html = state.templates.render(REPORT_TEMPLATE, &context).map_err(|e| {
        error!("Report render error: {:?}", e);
        AppError::InternalWithMsg(format!("Report render error: {}", e))
    })?;

    Ok(Html(html))
}
