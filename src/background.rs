use std::sync::Arc;
use tokio::time::sleep;
use tracing::{error, info, info_span, Instrument};
use serde_json::Value;
use crate::state::AppState;
use crate::domain::models::job::{Job, JOB_TYPE_WEBHOOK};
use crate::error::AppError;

pub async fn start_background_worker(state: Arc<AppState>) {
    info!("Starting background job worker...");

    loop {
        run_pending_jobs(&state).await;
        sleep(state.config.job_poll_interval).await;
    }
}

/// One polling pass: claims up to ten due jobs and settles each one.
pub async fn run_pending_jobs(state: &Arc<AppState>) {
    match state.job_repo.find_pending(10).await {
        Ok(jobs) => {
            for job in jobs {
                let span = info_span!(
                    "background_job",
                    job_id = %job.id,
                    job_type = %job.job_type,
                    event_id = %job.payload.event_id
                );

                async {
                    info!("Processing job: {}", job.job_type);
                    match process_job(state, &job).await {
                        Ok(_) => {
                            info!("Job completed successfully");
                            if let Err(e) = state.job_repo.update_status(&job.id, "COMPLETED", None).await {
                                error!("Failed to mark job as completed: {:?}", e);
                            }
                        }
                        Err(e) => {
                            let err_msg = format!("{}", e);
                            error!("Job failed with error: {}", err_msg);
                            if let Err(up_err) = state.job_repo.update_status(&job.id, "FAILED", Some(err_msg)).await {
                                error!("Failed to mark job as failed: {:?}", up_err);
                            }
                        }
                    }
                }
                    .instrument(span)
                    .await;
            }
        }
        Err(e) => error!("Failed to fetch pending jobs: {:?}", e),
    }
}

async fn process_job(state: &Arc<AppState>, job: &Job) -> Result<(), AppError> {
    match job.job_type.as_str() {
        JOB_TYPE_WEBHOOK => send_webhook(state, job).await,
        other => Err(AppError::InternalWithMsg(format!("Unknown job type {}", other))),
    }
}

async fn send_webhook(state: &Arc<AppState>, job: &Job) -> Result<(), AppError> {
    let webhook = state
        .webhook_service
        .as_ref()
        .ok_or_else(|| AppError::InternalWithMsg("No webhook configured".to_string()))?;

    let event_id = &job.payload.event_id;
    let event = state.event_store.get(event_id).await?
        .ok_or(AppError::NotFound(format!("Event {} not found", event_id)))?;

    let mut payload = serde_json::to_value(&event)?;
    if let Value::Object(map) = &mut payload {
        let row_id = job.payload.remote_row_id.or(event.remote_row_id);
        map.insert("baserowId".to_string(), row_id.map(Value::from).unwrap_or(Value::Null));
    }

    info!("Posting webhook for event {}", event_id);
    webhook.notify(&payload).await
}
