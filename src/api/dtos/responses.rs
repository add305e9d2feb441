use crate::domain::models::event::EventRecord;
use serde::Serialize;

#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum EventSource {
    Remote,
    Local,
}

#[derive(Serialize)]
pub struct EventListResponse {
    pub source: EventSource,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct AutosaveAccepted {
    pub generation: u64,
}

#[derive(Serialize)]
pub struct PromptResponse {
    pub prompt: String,
}
