use crate::domain::models::event::EventRecord;
use crate::domain::services::date_parser::{format_month_year, try_parse_date};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const ALL: &str = "Todos";

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct EventFilter {
    pub search: Option<String>,
    /// "Março de 2024"
    pub month: Option<String>,
    pub project: Option<String>,
    pub axis: Option<String>,
    pub organizer: Option<String>,
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty() && *v != ALL)
}

impl EventFilter {
    pub fn matches(&self, event: &EventRecord, tz: Tz) -> bool {
        if let Some(search) = active(&self.search)
            && !event.title.to_lowercase().contains(&search.to_lowercase()) {
            return false;
        }
        if let Some(month) = active(&self.month) {
            let label = try_parse_date(&event.date, tz).map(|dt| format_month_year(dt, tz));
            if label.as_deref() != Some(month) {
                return false;
            }
        }
        if let Some(project) = active(&self.project)
            && !event.projects.iter().any(|p| p == project) {
            return false;
        }
        if let Some(axis) = active(&self.axis)
            && !event.axes.iter().any(|a| a == axis) {
            return false;
        }
        if let Some(organizer) = active(&self.organizer)
            && !event.organizer.iter().any(|o| o == organizer) {
            return false;
        }
        true
    }

    pub fn apply(&self, events: Vec<EventRecord>, tz: Tz) -> Vec<EventRecord> {
        events.into_iter().filter(|e| self.matches(e, tz)).collect()
    }
}

/// Newest first. Unparseable dates sort last.
pub fn sort_by_date_desc(events: &mut [EventRecord], tz: Tz) {
    events.sort_by_cached_key(|e| std::cmp::Reverse(try_parse_date(&e.date, tz)));
}

#[derive(Debug, Serialize, PartialEq)]
pub struct FilterOptions {
    pub months: Vec<String>,
    pub projects: Vec<String>,
    pub axes: Vec<String>,
    pub organizers: Vec<String>,
}

impl FilterOptions {
    /// Months keep the order of `events`; the tag lists are sorted.
    pub fn from_events(events: &[EventRecord], tz: Tz) -> Self {
        let mut months: Vec<String> = Vec::new();
        for label in events.iter().filter_map(|e| try_parse_date(&e.date, tz)).map(|dt| format_month_year(dt, tz)) {
            if !months.contains(&label) {
                months.push(label);
            }
        }

        let collect = |pick: fn(&EventRecord) -> &Vec<String>| -> Vec<String> {
            events
                .iter()
                .flat_map(|e| pick(e).iter().cloned())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect()
        };

        Self {
            months,
            projects: collect(|e| &e.projects),
            axes: collect(|e| &e.axes),
            organizers: collect(|e| &e.organizer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::event::{EventStatus, GeneratedContent, Length, Tone};
    use chrono::Utc;

    const TZ: Tz = chrono_tz::America::Fortaleza;

    fn event(title: &str, date: &str, projects: &[&str], organizer: &[&str]) -> EventRecord {
        let now = Utc::now();
        EventRecord {
            id: title.to_string(),
            title: title.to_string(),
            date: date.to_string(),
            location: None,
            organizer: organizer.iter().map(|s| s.to_string()).collect(),
            axes: vec![],
            projects: projects.iter().map(|s| s.to_string()).collect(),
            target_audience: vec![],
            attendance_count: None,
            rationale: vec![],
            method_and_scale: vec![],
            cover_base64: None,
            cover_url: None,
            photos: vec![],
            tone: Tone::default(),
            length: Length::default(),
            include_cta: false,
            status: EventStatus::Published,
            generated: GeneratedContent::default(),
            view_count: 0,
            remote_row_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample() -> Vec<EventRecord> {
        vec![
            event("Feira de Moda", "2024-03-10", &["PLURAL CARIRI"], &["Ana"]),
            event("Oficina ALI", "2024-01-05", &["COMP. EMP. - ALI RURAL"], &["Bob", "Ana"]),
            event("Missão Técnica", "2024-03-22", &[], &["Bob"]),
        ]
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let filter = EventFilter { search: Some("feira".into()), ..Default::default() };
        let titles: Vec<_> = filter.apply(sample(), TZ).into_iter().map(|e| e.title).collect();
        assert_eq!(titles, vec!["Feira de Moda"]);
    }

    #[test]
    fn test_all_sentinel_disables_filter() {
        let filter = EventFilter {
            month: Some("Todos".into()),
            organizer: Some("Todos".into()),
            ..Default::default()
        };
        assert_eq!(filter.apply(sample(), TZ).len(), 3);
    }

    #[test]
    fn test_month_and_organizer_combine() {
        let filter = EventFilter {
            month: Some("Março de 2024".into()),
            organizer: Some("Bob".into()),
            ..Default::default()
        };
        let titles: Vec<_> = filter.apply(sample(), TZ).into_iter().map(|e| e.title).collect();
        assert_eq!(titles, vec!["Missão Técnica"]);
    }

    #[test]
    fn test_sort_and_options() {
        let mut events = sample();
        sort_by_date_desc(&mut events, TZ);
        let titles: Vec<_> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Missão Técnica", "Feira de Moda", "Oficina ALI"]);

        let options = FilterOptions::from_events(&events, TZ);
        assert_eq!(options.months, vec!["Março de 2024", "Janeiro de 2024"]);
        assert_eq!(options.organizers, vec!["Ana", "Bob"]);
        assert_eq!(options.projects, vec!["COMP. EMP. - ALI RURAL", "PLURAL CARIRI"]);
        assert!(options.axes.is_empty());
    }
}
