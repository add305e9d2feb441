use crate::domain::models::event::{optional_text, string_or_list, EventStatus, Length, Photo, Tone};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// Form payload shared by creation and draft saving.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct EventInput {
    pub title: String,
    pub date: String,
    pub location: Option<String>,
    #[serde(deserialize_with = "string_or_list")]
    pub organizer: Vec<String>,
    #[serde(rename = "eixos", alias = "axes", deserialize_with = "string_or_list")]
    pub axes: Vec<String>,
    #[serde(rename = "projetos", alias = "projects", deserialize_with = "string_or_list")]
    pub projects: Vec<String>,
    #[serde(rename = "publico", alias = "targetAudience", deserialize_with = "string_or_list")]
    pub target_audience: Vec<String>,
    #[serde(rename = "quantidade", alias = "attendanceCount", deserialize_with = "optional_text")]
    pub attendance_count: Option<String>,
    #[serde(rename = "porQue", alias = "rationale", deserialize_with = "string_or_list")]
    pub rationale: Vec<String>,
    #[serde(rename = "comoQuanto", alias = "methodAndScale", deserialize_with = "string_or_list")]
    pub method_and_scale: Vec<String>,
    pub cover_base64: Option<String>,
    pub cover_url: Option<String>,
    #[serde(rename = "fotos", alias = "photos")]
    pub photos: Vec<Photo>,
    pub tone: Tone,
    pub length: Length,
    #[serde(rename = "cta", alias = "includeCTA")]
    pub include_cta: bool,
}

#[derive(Deserialize)]
pub struct ContentUpdateRequest {
    pub summary: String,
    pub article: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct RegenerateRequest {
    pub confirm: bool,
}

#[derive(Deserialize)]
pub struct StatusUpdateRequest {
    pub status: EventStatus,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CoverUpdateRequest {
    pub cover_base64: Option<String>,
    pub cover_url: Option<String>,
}
