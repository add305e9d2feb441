use crate::domain::models::event::{EventRecord, EventStatus};
use crate::domain::services::date_parser::{short_month_label, try_parse_date};
use chrono_tz::Tz;
use serde::Serialize;
use std::collections::HashMap;
use std::str::FromStr;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ChartBucket {
    pub label: String,
    pub count: usize,
    /// Share of all increments, 0..=100.
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Month,
    Organizer,
    Project,
    Axis,
    TargetAudience,
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "month" => Ok(ChartKind::Month),
            "organizer" => Ok(ChartKind::Organizer),
            "project" => Ok(ChartKind::Project),
            "axis" => Ok(ChartKind::Axis),
            "audience" => Ok(ChartKind::TargetAudience),
            other => Err(format!("Unknown chart '{}'", other)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardCharts {
    pub by_month: Vec<ChartBucket>,
    pub by_organizer: Vec<ChartBucket>,
    pub by_project: Vec<ChartBucket>,
    pub by_axis: Vec<ChartBucket>,
    pub by_target_audience: Vec<ChartBucket>,
}

impl DashboardCharts {
    pub fn from_events(events: &[EventRecord], tz: Tz) -> Self {
        Self {
            by_month: by_month(events, tz),
            by_organizer: by_organizer(events),
            by_project: by_project(events),
            by_axis: by_axis(events),
            by_target_audience: by_target_audience(events),
        }
    }
}

pub fn aggregate(kind: ChartKind, events: &[EventRecord], tz: Tz) -> Vec<ChartBucket> {
    match kind {
        ChartKind::Month => by_month(events, tz),
        ChartKind::Organizer => by_organizer(events),
        ChartKind::Project => by_project(events),
        ChartKind::Axis => by_axis(events),
        ChartKind::TargetAudience => by_target_audience(events),
    }
}

/// Buckets by short month label in chronological order of first occurrence.
/// Records whose date does not parse are skipped.
pub fn by_month(events: &[EventRecord], tz: Tz) -> Vec<ChartBucket> {
    let mut dated: Vec<_> = events
        .iter()
        .filter_map(|e| try_parse_date(&e.date, tz))
        .collect();
    dated.sort();

    tally(dated.into_iter().map(|dt| short_month_label(dt, tz)))
}

pub fn by_organizer(events: &[EventRecord]) -> Vec<ChartBucket> {
    ranked(tally(events.iter().flat_map(|e| e.organizer.iter().map(String::as_str))))
}

pub fn by_project(events: &[EventRecord]) -> Vec<ChartBucket> {
    ranked(tally(events.iter().flat_map(|e| e.projects.iter().map(String::as_str))))
}

pub fn by_axis(events: &[EventRecord]) -> Vec<ChartBucket> {
    ranked(tally(events.iter().flat_map(|e| e.axes.iter().map(String::as_str))))
}

pub fn by_target_audience(events: &[EventRecord]) -> Vec<ChartBucket> {
    ranked(tally(
        events
            .iter()
            .filter(|e| e.status == EventStatus::Published)
            .flat_map(|e| e.target_audience.iter().map(String::as_str)),
    ))
}

fn tally<'a, I>(values: I) -> Vec<ChartBucket>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut positions: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<(&'a str, usize)> = Vec::new();

    for value in values {
        match positions.get(value) {
            Some(&idx) => counts[idx].1 += 1,
            None => {
                positions.insert(value, counts.len());
                counts.push((value, 1));
            }
        }
    }

    let total: usize = counts.iter().map(|(_, c)| c).sum();

    counts
        .into_iter()
        .map(|(label, count)| ChartBucket {
            label: label.to_string(),
            count,
            percentage: if total == 0 { 0.0 } else { count as f64 * 100.0 / total as f64 },
        })
        .collect()
}

// `sort_by` is stable, so ties keep first-encountered order.
fn ranked(mut buckets: Vec<ChartBucket>) -> Vec<ChartBucket> {
    buckets.sort_by(|a, b| b.count.cmp(&a.count));
    buckets
}
