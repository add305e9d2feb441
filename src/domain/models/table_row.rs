use crate::domain::models::event::{EventRecord, EventStatus, GeneratedContent, Length, Photo, Tone};
use crate::domain::services::date_parser::canonical_date;
use chrono::Utc;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Writable columns of the remote events table. `resumo`/`materia` are filled
/// server-side and never written from here.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct TableRowFields {
    #[serde(rename = "Evento")]
    pub title: String,
    #[serde(rename = "Data_Evento")]
    pub date: String,
    #[serde(rename = "Local")]
    pub location: String,
    #[serde(rename = "Agente")]
    pub organizers: String,
    #[serde(rename = "eixo")]
    pub axes: String,
    #[serde(rename = "projeto")]
    pub projects: String,
    #[serde(rename = "Fotos")]
    pub photos: Vec<Photo>,
    #[serde(rename = "como/quanto")]
    pub method_and_scale: String,
    #[serde(rename = "porque")]
    pub rationale: String,
}

impl From<&EventRecord> for TableRowFields {
    fn from(record: &EventRecord) -> Self {
        Self {
            title: record.title.clone(),
            date: record.date.clone(),
            location: record.location.clone().unwrap_or_default(),
            organizers: record.organizer.join(", "),
            axes: record.axes.join(", "),
            projects: record.projects.join(", "),
            photos: record.photos.clone(),
            method_and_scale: record.method_and_scale.join(", "),
            rationale: record.rationale.join(", "),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TableRow {
    pub id: i64,
    #[serde(rename = "Evento", default)]
    pub title: Option<String>,
    #[serde(rename = "Data_Evento", default)]
    pub date: Option<String>,
    #[serde(rename = "Local", default)]
    pub location: Option<String>,
    #[serde(rename = "Agente", default)]
    pub organizers: Option<String>,
    #[serde(rename = "eixo", default)]
    pub axes: Option<String>,
    #[serde(rename = "projeto", default)]
    pub projects: Option<String>,
    #[serde(rename = "Fotos", default)]
    pub photos: Option<Vec<Photo>>,
    #[serde(rename = "como/quanto", default)]
    pub method_and_scale: Option<String>,
    #[serde(rename = "porque", default)]
    pub rationale: Option<String>,
    #[serde(rename = "resumo", default)]
    pub summary: Option<String>,
    #[serde(rename = "materia", default)]
    pub article: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TableRowPage {
    pub results: Vec<TableRow>,
}

impl TableRow {
    /// Rows carry no style knobs, so they map to the defaults
    /// (journalistic, medium, no CTA) and are considered published.
    pub fn into_event(self, tz: Tz) -> EventRecord {
        let now = Utc::now();
        let photos = self.photos.unwrap_or_default();
        let mut record = EventRecord {
            id: self.id.to_string(),
            title: self.title.unwrap_or_default(),
            date: canonical_date(self.date.as_deref().unwrap_or_default(), tz),
            location: self.location,
            organizer: split_tags(self.organizers.as_deref()),
            axes: split_tags(self.axes.as_deref()),
            projects: split_tags(self.projects.as_deref()),
            target_audience: Vec::new(),
            attendance_count: None,
            rationale: split_free_text(self.rationale.as_deref()),
            method_and_scale: split_free_text(self.method_and_scale.as_deref()),
            cover_base64: None,
            cover_url: photos.first().map(|p| p.url.clone()),
            photos,
            tone: Tone::default(),
            length: Length::default(),
            include_cta: false,
            status: EventStatus::Published,
            generated: GeneratedContent {
                summary: self.summary.unwrap_or_default(),
                article: self.article.unwrap_or_default(),
            },
            view_count: 0,
            remote_row_id: Some(self.id),
            created_at: now,
            updated_at: now,
        };
        record.normalize(tz);
        record
    }
}

fn split_tags(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| v.split(", ").filter(|s| !s.is_empty()).map(str::to_string).collect())
        .unwrap_or_default()
}

fn split_free_text(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| v.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect())
        .unwrap_or_default()
}
