use chrono_tz::Tz;
use std::env;
use std::time::Duration;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub admin_password: Option<String>,
    pub baserow_url: String,
    pub baserow_token: Option<String>,
    pub baserow_table_id: String,
    pub webhook_url: Option<String>,
    pub timezone: Tz,
    pub autosave_debounce: Duration,
    pub job_poll_interval: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            admin_password: non_empty(env::var("ADMIN_PASSWORD").ok()),
            baserow_url: env::var("BASEROW_URL").unwrap_or_else(|_| "https://api.baserow.io".to_string()),
            baserow_token: non_empty(env::var("BASEROW_TOKEN").ok()),
            baserow_table_id: env::var("BASEROW_TABLE_ID").unwrap_or_else(|_| "800242".to_string()),
            webhook_url: non_empty(env::var("WEBHOOK_URL").ok()),
            timezone: env::var("APP_TIMEZONE")
                .unwrap_or_else(|_| "America/Fortaleza".to_string())
                .parse()
                .expect("APP_TIMEZONE must be an IANA timezone name"),
            autosave_debounce: Duration::from_millis(
                env::var("AUTOSAVE_DEBOUNCE_MS").unwrap_or_else(|_| "1000".to_string()).parse().expect("AUTOSAVE_DEBOUNCE_MS must be a number"),
            ),
            job_poll_interval: Duration::from_millis(
                env::var("JOB_POLL_INTERVAL_MS").unwrap_or_else(|_| "5000".to_string()).parse().expect("JOB_POLL_INTERVAL_MS must be a number"),
            ),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
