use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::warn;

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const MONTHS_PT: [&str; 12] = [
    "janeiro", "fevereiro", "março", "abril", "maio", "junho",
    "julho", "agosto", "setembro", "outubro", "novembro", "dezembro",
];

const SHORT_MONTHS_PT: [&str; 12] = [
    "JAN", "FEV", "MAR", "ABR", "MAI", "JUN", "JUL", "AGO", "SET", "OUT", "NOV", "DEZ",
];

/// Strict parse. Offset-less inputs are read as wall-clock time in `tz`.
pub fn try_parse_date(input: &str, tz: Tz) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, fmt) {
            return localize(naive, tz);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return localize(date.and_hms_opt(0, 0, 0)?, tz);
    }

    let date = parse_day_month_year(input)?;
    localize(date.and_hms_opt(0, 0, 0)?, tz)
}

/// Never fails: unparseable input falls back to the current time.
pub fn parse_date(input: &str, tz: Tz) -> DateTime<Utc> {
    match try_parse_date(input, tz) {
        Some(dt) => dt,
        None => {
            warn!("Could not parse date: {:?}", input);
            Utc::now()
        }
    }
}

pub fn canonical_date(input: &str, tz: Tz) -> String {
    to_canonical(parse_date(input, tz))
}

pub fn to_canonical(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_day_month_year(input: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = input.split('/').collect();
    if parts.len() != 3 {
        return None;
    }

    let day: u32 = parts[0].trim().parse().ok()?;
    let month: u32 = parts[1].trim().parse().ok()?;
    let year: i32 = parts[2].trim().parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Wall times skipped by a DST jump move forward past the gap.
fn localize(naive: NaiveDateTime, tz: Tz) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + chrono::Duration::hours(1))).earliest())
        .map(|dt| dt.with_timezone(&Utc))
}

/// `10/03/2024`
pub fn format_short_date(dt: DateTime<Utc>, tz: Tz) -> String {
    dt.with_timezone(&tz).format("%d/%m/%Y").to_string()
}

/// `15 de Março`
pub fn format_day_month(dt: DateTime<Utc>, tz: Tz) -> String {
    let local = dt.with_timezone(&tz);
    format!("{} de {}", local.day(), capitalize(month_name(local.month0())))
}

/// `Março de 2024`
pub fn format_month_year(dt: DateTime<Utc>, tz: Tz) -> String {
    let local = dt.with_timezone(&tz);
    format!("{} de {}", capitalize(month_name(local.month0())), local.year())
}

pub fn short_month_label(dt: DateTime<Utc>, tz: Tz) -> &'static str {
    SHORT_MONTHS_PT[dt.with_timezone(&tz).month0() as usize]
}

fn month_name(month0: u32) -> &'static str {
    MONTHS_PT[month0 as usize]
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
