use axum::{extract::{State, Path, Query}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::session::AdminSession;
use crate::api::dtos::{
    requests::EventInput,
    responses::{EventListResponse, EventSource},
};
use crate::domain::models::event::{generation_errors, EventRecord, EventStatus, GeneratedContent};
use crate::domain::models::job::{Job, JOB_TYPE_WEBHOOK};
use crate::domain::models::table_row::TableRowFields;
use crate::domain::services::content_generator::generate;
use crate::domain::services::date_parser::canonical_date;
use crate::domain::services::filters::{sort_by_date_desc, EventFilter, FilterOptions};
use crate::domain::services::media::decode_data_uri;
use crate::error::AppError;
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;
use chrono::Utc;
use tracing::{debug, error, info, warn};

pub async fn list_events(
    State(state): State<Arc<AppState>>,
    _session: AdminSession,
    Query(filter): Query<EventFilter>,
) -> Result<impl IntoResponse, AppError> {
    let (events, source) = load_all(&state).await?;
    let mut events = filter.apply(events, state.config.timezone);
    sort_by_date_desc(&mut events, state.config.timezone);

    Ok(Json(EventListResponse { source, events }))
}

pub async fn list_filter_options(
    State(state): State<Arc<AppState>>,
    _session: AdminSession,
) -> Result<impl IntoResponse, AppError> {
    let (mut events, _) = load_all(&state).await?;
    sort_by_date_desc(&mut events, state.config.timezone);
    Ok(Json(FilterOptions::from_events(&events, state.config.timezone)))
}

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    _session: AdminSession,
    Json(input): Json<EventInput>,
) -> Result<impl IntoResponse, AppError> {
    let errors = generation_errors(&input.title, &input.date, &input.method_and_scale, &input.rationale);
    if !errors.is_empty() {
        return Err(AppError::InvalidFields(errors));
    }

    let tz = state.config.timezone;
    let mut record = new_record(input, EventStatus::Published, &state);
    info!("Creating event: {} ({})", record.title, record.id);

    record.generated = generate(&record, tz);
    attach_uploaded_cover(&state, &mut record).await;

    match state.remote_table.create_row(&TableRowFields::from(&record)).await {
        Ok(row_id) => {
            info!("Event {} mirrored to remote row {}", record.id, row_id);
            record.remote_row_id = Some(row_id);
        }
        Err(e) => warn!("Remote row creation failed for {}, keeping local copy only: {}", record.id, e),
    }

    let saved = state.event_store.save(&record).await?;
    enqueue_webhook(&state, &saved).await;

    Ok((StatusCode::CREATED, Json(saved)))
}

pub async fn create_draft(
    State(state): State<Arc<AppState>>,
    _session: AdminSession,
    Json(input): Json<EventInput>,
) -> Result<impl IntoResponse, AppError> {
    if input.title.trim().is_empty() {
        let mut errors = BTreeMap::new();
        errors.insert("title".to_string(), "Título é obrigatório para salvar rascunho.".to_string());
        return Err(AppError::InvalidFields(errors));
    }

    let record = new_record(input, EventStatus::Draft, &state);
    let saved = state.event_store.save(&record).await?;
    info!("Saved draft: {} ({})", saved.title, saved.id);

    Ok((StatusCode::CREATED, Json(saved)))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    _session: AdminSession,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(find_event(&state, &id).await?))
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    _session: AdminSession,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if state.event_store.get(&id).await?.is_none() {
        return Err(AppError::NotFound(format!("Event {} not found", id)));
    }
    state.event_store.delete(&id).await?;
    info!("Deleted event {}", id);
    Ok(StatusCode::NO_CONTENT)
}

fn new_record(input: EventInput, status: EventStatus, state: &AppState) -> EventRecord {
    let now = Utc::now();
    let mut record = EventRecord {
        id: Uuid::new_v4().to_string(),
        title: input.title.trim().to_string(),
        date: canonical_date(&input.date, state.config.timezone),
        location: input.location,
        organizer: input.organizer,
        axes: input.axes,
        projects: input.projects,
        target_audience: input.target_audience,
        attendance_count: input.attendance_count,
        rationale: input.rationale,
        method_and_scale: input.method_and_scale,
        cover_base64: input.cover_base64,
        cover_url: input.cover_url,
        photos: input.photos,
        tone: input.tone,
        length: input.length,
        include_cta: input.include_cta,
        status,
        generated: GeneratedContent::default(),
        view_count: 0,
        remote_row_id: None,
        created_at: now,
        updated_at: now,
    };
    record.normalize(state.config.timezone);
    record
}

/// Remote table first; the local store is the fallback when it is unreachable.
pub(crate) async fn load_all(state: &AppState) -> Result<(Vec<EventRecord>, EventSource), AppError> {
    match state.remote_table.list_rows().await {
        Ok(rows) => {
            let tz = state.config.timezone;
            Ok((rows.into_iter().map(|row| row.into_event(tz)).collect(), EventSource::Remote))
        }
        Err(e) => {
            warn!("Remote table unavailable, falling back to local store: {}", e);
            Ok((state.event_store.list().await?, EventSource::Local))
        }
    }
}

/// Local record if present, else the remote row with content filled in when
/// the row has none.
pub(crate) async fn find_event(state: &AppState, id: &str) -> Result<EventRecord, AppError> {
    if let Some(event) = state.event_store.get(id).await? {
        return Ok(event);
    }

    let not_found = || AppError::NotFound(format!("Event {} not found", id));
    let row_id: i64 = id.parse().map_err(|_| not_found())?;

    let row = state.remote_table.get_row(row_id).await.map_err(|e| {
        warn!("Remote lookup for {} failed: {}", id, e);
        not_found()
    })?;

    let tz = state.config.timezone;
    let mut event = row.into_event(tz);
    if event.generated.is_empty() {
        debug!("Remote row {} has no content, generating", row_id);
        event.generated = generate(&event, tz);
    }
    Ok(event)
}

/// Like [`find_event`], but a remote-only record is copied into the local
/// store so it can be edited.
pub(crate) async fn find_or_import(state: &AppState, id: &str) -> Result<EventRecord, AppError> {
    if let Some(event) = state.event_store.get(id).await? {
        return Ok(event);
    }
    let event = find_event(state, id).await?;
    info!("Importing remote event {} into the local store", id);
    state.event_store.save(&event).await
}

/// Uploads an embedded data URI cover. On success the remote URL replaces
/// the embedded copy; on failure the embedded copy is kept.
pub(crate) async fn attach_uploaded_cover(state: &AppState, record: &mut EventRecord) {
    if record.cover_url.is_some() {
        return;
    }
    let Some(data_uri) = record.cover_base64.as_deref() else {
        return;
    };

    let image = match decode_data_uri(data_uri) {
        Ok(image) => image,
        Err(e) => {
            warn!("Cover for {} is not an uploadable image: {}", record.id, e);
            return;
        }
    };

    let file_name = image.file_name(&format!("capa-{}", record.id));
    match state.remote_table.upload_file(&file_name, image.bytes, &image.mime).await {
        Ok(photo) => {
            info!("Uploaded cover for {} as {}", record.id, photo.name);
            record.cover_url = Some(photo.url.clone());
            record.cover_base64 = None;
            if !record.photos.iter().any(|p| p.url == photo.url) {
                record.photos.insert(0, photo);
            }
        }
        Err(e) => warn!("Cover upload failed for {}, keeping embedded image: {}", record.id, e),
    }
}

async fn enqueue_webhook(state: &AppState, record: &EventRecord) {
    if state.webhook_service.is_none() {
        return;
    }
    let job = Job::new(JOB_TYPE_WEBHOOK, record.id.clone(), record.remote_row_id, Utc::now());
    match state.job_repo.create(&job).await {
        Ok(job) => debug!("Queued webhook job {} for {}", job.id, record.id),
        Err(e) => error!("Failed to queue webhook for {}: {:?}", record.id, e),
    }
}
