use crate::domain::models::event::{CoverImage, EventRecord};
use crate::domain::services::date_parser::{format_day_month, try_parse_date};
use chrono_tz::Tz;
use serde::Serialize;

const EMPTY: &str = "-";
const NO_DESCRIPTION: &str = "Sem descrição prévia registrada.";

/// Template context for the one-page event report.
#[derive(Debug, Serialize, PartialEq)]
pub struct ReportView {
    pub title: String,
    pub who: String,
    pub when: String,
    pub location: String,
    pub what: String,
    pub how_paragraphs: Vec<String>,
    pub audience_line: Option<String>,
    pub axes_sentence: Option<String>,
    pub why_paragraphs: Vec<String>,
    pub images: Vec<String>,
}

impl ReportView {
    pub fn from_event(event: &EventRecord, tz: Tz) -> Self {
        let when = try_parse_date(&event.date, tz)
            .map(|dt| format_day_month(dt, tz))
            .unwrap_or_else(|| "Data não informada".to_string());

        let what = if event.projects.is_empty() {
            event.title.to_uppercase()
        } else {
            event.projects.join(" / ").to_uppercase()
        };

        let how_paragraphs = if !event.method_and_scale.is_empty() {
            event.method_and_scale.clone()
        } else if !event.generated.article.is_empty() {
            vec![event.generated.article.clone()]
        } else if !event.generated.summary.is_empty() {
            vec![event.generated.summary.clone()]
        } else {
            vec![NO_DESCRIPTION.to_string()]
        };

        let audience_line = event.attendance_count.as_ref().map(|count| {
            if event.target_audience.is_empty() {
                format!("Público alcançado/atendido: {}", count)
            } else {
                format!("Público alcançado/atendido: {} ({})", count, event.target_audience.join(", "))
            }
        });

        let axes_sentence = (!event.axes.is_empty()).then(|| {
            format!("O evento está alinhado aos eixos estratégicos de {}.", event.axes.join(" e "))
        });

        Self {
            title: event.title.clone(),
            who: event.organizers_display().unwrap_or_else(|| EMPTY.to_string()),
            when,
            location: event.location.clone().unwrap_or_else(|| EMPTY.to_string()),
            what,
            how_paragraphs,
            audience_line,
            axes_sentence,
            why_paragraphs: event.rationale.clone(),
            images: report_images(event),
        }
    }
}

/// Cover first unless it already appears among the photos.
fn report_images(event: &EventRecord) -> Vec<String> {
    let mut images = Vec::with_capacity(event.photos.len() + 1);
    let cover = match event.cover() {
        Some(CoverImage::Remote(url)) | Some(CoverImage::Embedded(url)) => Some(url),
        None => None,
    };
    if let Some(cover) = cover
        && !event.photos.iter().any(|p| p.url == cover) {
        images.push(cover.to_string());
    }
    images.extend(event.photos.iter().map(|p| p.url.clone()));
    images
}
