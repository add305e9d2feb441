use crate::domain::services::date_parser::canonical_date;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

pub const STORAGE_KEY: &str = "relatorio_evento_data";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    #[serde(rename = "jornalistico", alias = "journalistic")]
    Journalistic,
    #[serde(rename = "institucional", alias = "institutional")]
    Institutional,
    #[serde(rename = "descontraido", alias = "casual")]
    Casual,
}

/// Declaration order is the elaboration order: `Short < Medium < Long`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Length {
    #[serde(rename = "curto", alias = "short")]
    Short,
    #[default]
    #[serde(rename = "medio", alias = "medium")]
    Medium,
    #[serde(rename = "longo", alias = "long")]
    Long,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventStatus {
    #[serde(rename = "Publicado", alias = "Published")]
    Published,
    #[default]
    #[serde(rename = "Rascunho", alias = "Draft")]
    Draft,
    #[serde(rename = "Destaque", alias = "Featured")]
    Featured,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Photo {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct GeneratedContent {
    pub summary: String,
    pub article: String,
}

impl GeneratedContent {
    pub fn is_empty(&self) -> bool {
        self.summary.is_empty() && self.article.is_empty()
    }
}

pub enum CoverImage<'a> {
    Remote(&'a str),
    Embedded(&'a str),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub id: String,
    pub title: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub organizer: Vec<String>,
    #[serde(default, rename = "eixos", alias = "axes", deserialize_with = "string_or_list")]
    pub axes: Vec<String>,
    #[serde(default, rename = "projetos", alias = "projects", deserialize_with = "string_or_list")]
    pub projects: Vec<String>,
    #[serde(default, rename = "publico", alias = "targetAudience", deserialize_with = "string_or_list")]
    pub target_audience: Vec<String>,
    #[serde(
        default,
        rename = "quantidade",
        alias = "attendanceCount",
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub attendance_count: Option<String>,
    #[serde(default, rename = "porQue", alias = "rationale", deserialize_with = "string_or_list")]
    pub rationale: Vec<String>,
    #[serde(default, rename = "comoQuanto", alias = "methodAndScale", deserialize_with = "string_or_list")]
    pub method_and_scale: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_base64: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(default, rename = "fotos", alias = "photos")]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub tone: Tone,
    #[serde(default)]
    pub length: Length,
    #[serde(default, rename = "cta", alias = "includeCTA")]
    pub include_cta: bool,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default, alias = "generatedContent")]
    pub generated: GeneratedContent,
    #[serde(default, rename = "views", alias = "viewCount")]
    pub view_count: i64,
    #[serde(default, rename = "baserowId", skip_serializing_if = "Option::is_none")]
    pub remote_row_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EventRecord {
    /// Read-boundary normalization: canonical date, blank optionals dropped,
    /// remote cover wins over an embedded one.
    pub fn normalize(&mut self, tz: Tz) {
        self.date = canonical_date(&self.date, tz);
        self.location = self.location.take().filter(|l| !l.trim().is_empty());
        self.attendance_count = self.attendance_count.take().filter(|q| !q.trim().is_empty());
        self.cover_url = self.cover_url.take().filter(|u| !u.trim().is_empty());
        self.cover_base64 = self.cover_base64.take().filter(|b| !b.trim().is_empty());
        if self.cover_url.is_some() {
            self.cover_base64 = None;
        }
        for list in [
            &mut self.organizer,
            &mut self.axes,
            &mut self.projects,
            &mut self.target_audience,
            &mut self.rationale,
            &mut self.method_and_scale,
        ] {
            list.retain(|v| !v.trim().is_empty());
        }
    }

    pub fn cover(&self) -> Option<CoverImage<'_>> {
        if let Some(url) = self.cover_url.as_deref() {
            return Some(CoverImage::Remote(url));
        }
        self.cover_base64.as_deref().map(CoverImage::Embedded)
    }

    pub fn organizers_display(&self) -> Option<String> {
        if self.organizer.is_empty() {
            None
        } else {
            Some(self.organizer.join(", "))
        }
    }

    pub fn generation_errors(&self) -> BTreeMap<String, String> {
        generation_errors(&self.title, &self.date, &self.method_and_scale, &self.rationale)
    }
}

/// Field-level checks required before content can be generated.
pub fn generation_errors(
    title: &str,
    date: &str,
    method_and_scale: &[String],
    rationale: &[String],
) -> BTreeMap<String, String> {
    let mut errors = BTreeMap::new();
    if title.trim().is_empty() {
        errors.insert("title".to_string(), "O título do evento é obrigatório.".to_string());
    }
    if date.trim().is_empty() {
        errors.insert("date".to_string(), "A data é obrigatória.".to_string());
    }
    if !has_entry(method_and_scale) {
        errors.insert("comoQuanto".to_string(), "Adicione pelo menos um item em Como/Quanto.".to_string());
    }
    if !has_entry(rationale) {
        errors.insert("porQue".to_string(), "Adicione pelo menos um item em Por quê?.".to_string());
    }
    errors
}

fn has_entry(list: &[String]) -> bool {
    list.iter().any(|v| !v.trim().is_empty())
}

/// Upsert by id, keeping insertion order for existing records.
pub fn upsert_record(records: &mut Vec<EventRecord>, record: EventRecord) {
    match records.iter_mut().find(|e| e.id == record.id) {
        Some(existing) => *existing = record,
        None => records.push(record),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

pub fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<OneOrMany>::deserialize(deserializer)?;
    Ok(match value {
        None => Vec::new(),
        Some(OneOrMany::One(s)) if s.trim().is_empty() => Vec::new(),
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(list)) => list,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<TextOrNumber>::deserialize(deserializer)?;
    Ok(match value {
        None => None,
        Some(TextOrNumber::Text(s)) => Some(s),
        Some(TextOrNumber::Number(n)) => Some(n.to_string()),
    })
}
