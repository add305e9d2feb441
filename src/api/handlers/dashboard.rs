use axum::{extract::{State, Path}, http::header, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::session::AdminSession;
use crate::api::handlers::event::load_all;
use crate::domain::services::aggregation::{aggregate, ChartKind, DashboardCharts};
use crate::domain::services::charts::{render_bars, render_donut};
use crate::error::AppError;
use std::sync::Arc;

pub async fn get_charts(
    State(state): State<Arc<AppState>>,
    _session: AdminSession,
) -> Result<impl IntoResponse, AppError> {
    let (events, _) = load_all(&state).await?;
    Ok(Json(DashboardCharts::from_events(&events, state.config.timezone)))
}

/// `GET /api/v1/dashboard/charts/{kind}.svg`
pub async fn get_chart_svg(
    State(state): State<Arc<AppState>>,
    _session: AdminSession,
    Path(file): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let kind: ChartKind = file
        .strip_suffix(".svg")
        .and_then(|name| name.parse().ok())
        .ok_or_else(|| AppError::NotFound(format!("Chart {} not found", file)))?;

    let (events, _) = load_all(&state).await?;
    let buckets = aggregate(kind, &events, state.config.timezone);

    let svg = match kind {
        ChartKind::Month => render_bars("Eventos por Mês", &buckets),
        ChartKind::Organizer => render_bars("Eventos por Analista", &buckets),
        ChartKind::Project => render_donut("Eventos por Projeto", &buckets),
        ChartKind::Axis => render_donut("Eventos por Eixo", &buckets),
        ChartKind::TargetAudience => render_donut("Público Atendido", &buckets),
    };

    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}
