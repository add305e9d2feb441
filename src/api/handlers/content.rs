use axum::{extract::{State, Path}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::session::AdminSession;
use crate::api::dtos::{
    requests::{ContentUpdateRequest, CoverUpdateRequest, RegenerateRequest, StatusUpdateRequest},
    responses::{AutosaveAccepted, PromptResponse},
};
use crate::api::handlers::event::{attach_uploaded_cover, find_event, find_or_import};
use crate::domain::models::event::{EventStatus, GeneratedContent, Photo};
use crate::domain::models::table_row::TableRowFields;
use crate::domain::services::content_generator::{build_llm_prompt, generate};
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::{info, warn};

/// Manual edit of the generated text. Persisted after the debounce window.
pub async fn update_content(
    State(state): State<Arc<AppState>>,
    _session: AdminSession,
    Path(id): Path<String>,
    Json(payload): Json<ContentUpdateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let event = find_or_import(&state, &id).await?;
    let generation = state.autosave.schedule(
        &event.id,
        GeneratedContent { summary: payload.summary, article: payload.article },
    );
    Ok((StatusCode::ACCEPTED, Json(AutosaveAccepted { generation })))
}

pub async fn regenerate_content(
    State(state): State<Arc<AppState>>,
    _session: AdminSession,
    Path(id): Path<String>,
    Json(payload): Json<RegenerateRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !payload.confirm {
        return Err(AppError::Validation(
            "Regenerating overwrites manual edits; resend with confirm=true".to_string(),
        ));
    }

    let mut event = find_or_import(&state, &id).await?;
    let errors = event.generation_errors();
    if !errors.is_empty() {
        return Err(AppError::InvalidFields(errors));
    }

    state.autosave.cancel(&event.id);
    event.generated = generate(&event, state.config.timezone);
    event.updated_at = Utc::now();
    let saved = state.event_store.save(&event).await?;
    info!("Regenerated content for {}", id);
    Ok(Json(saved))
}

pub async fn update_status(
    State(state): State<Arc<AppState>>,
    _session: AdminSession,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut event = find_or_import(&state, &id).await?;

    // Content must exist once a record leaves draft.
    if payload.status != EventStatus::Draft && event.generated.is_empty() {
        let errors = event.generation_errors();
        if !errors.is_empty() {
            return Err(AppError::InvalidFields(errors));
        }
        state.autosave.cancel(&event.id);
        event.generated = generate(&event, state.config.timezone);
    }

    event.status = payload.status;
    event.updated_at = Utc::now();
    let saved = state.event_store.save(&event).await?;
    info!("Event {} status set to {:?}", id, saved.status);
    Ok(Json(saved))
}

pub async fn update_cover(
    State(state): State<Arc<AppState>>,
    _session: AdminSession,
    Path(id): Path<String>,
    Json(payload): Json<CoverUpdateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let url = payload.cover_url.filter(|u| !u.trim().is_empty());
    let embedded = payload.cover_base64.filter(|b| !b.trim().is_empty());
    if url.is_none() && embedded.is_none() {
        return Err(AppError::Validation("Provide coverUrl or coverBase64".to_string()));
    }

    let mut event = find_or_import(&state, &id).await?;
    match url {
        Some(url) => {
            if !event.photos.iter().any(|p| p.url == url) {
                let name = url.rsplit('/').next().unwrap_or_default().to_string();
                event.photos.insert(0, Photo { name, url: url.clone() });
            }
            event.cover_url = Some(url);
            event.cover_base64 = None;
        }
        None => {
            event.cover_url = None;
            event.cover_base64 = embedded;
            attach_uploaded_cover(&state, &mut event).await;
        }
    }

    if let Some(row_id) = event.remote_row_id
        && let Err(e) = state.remote_table.update_row(row_id, &TableRowFields::from(&event)).await {
        warn!("Remote row {} not updated with new cover: {}", row_id, e);
    }

    event.updated_at = Utc::now();
    let saved = state.event_store.save(&event).await?;
    info!("Cover updated for {}", id);
    Ok(Json(saved))
}

pub async fn get_prompt(
    State(state): State<Arc<AppState>>,
    _session: AdminSession,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = find_event(&state, &id).await?;
    Ok(Json(PromptResponse { prompt: build_llm_prompt(&event) }))
}
