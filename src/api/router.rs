use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{auth, content, dashboard, event, health, job, report};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Session
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))

        // Events
        .route("/api/v1/events", get(event::list_events).post(event::create_event))
        .route("/api/v1/events/drafts", post(event::create_draft))
        .route("/api/v1/events/filters", get(event::list_filter_options))
        .route("/api/v1/events/{id}", get(event::get_event).delete(event::delete_event))

        // Content & Media
        .route("/api/v1/events/{id}/content", put(content::update_content))
        .route("/api/v1/events/{id}/regenerate", post(content::regenerate_content))
        .route("/api/v1/events/{id}/status", put(content::update_status))
        .route("/api/v1/events/{id}/cover", put(content::update_cover))
        .route("/api/v1/events/{id}/prompt", get(content::get_prompt))
        .route("/api/v1/events/{id}/report", get(report::get_report))

        // Dashboard
        .route("/api/v1/dashboard/charts", get(dashboard::get_charts))
        .route("/api/v1/dashboard/charts/{file}", get(dashboard::get_chart_svg))

        // Jobs
        .route("/api/v1/jobs", get(job::list_jobs))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
