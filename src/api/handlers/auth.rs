use axum::{extract::State, response::IntoResponse, http::StatusCode};
use crate::api::dtos::requests::LoginRequest;
use crate::state::AppState;
use crate::error::AppError;
use crate::domain::services::session::{password_matches, session_token, SESSION_COOKIE};
use axum::Json;
use std::sync::Arc;
use tower_cookies::{Cookies, Cookie};
use tower_cookies::cookie::SameSite;
use time::Duration;
use tracing::{info, warn};

pub async fn login(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !password_matches(state.config.admin_password.as_deref(), &payload.password) {
        warn!("Rejected login attempt");
        return Err(AppError::Unauthorized);
    }

    let token = match state.config.admin_password.as_deref() {
        Some(password) => session_token(password),
        None => session_token(&payload.password),
    };
    set_session_cookie(&cookies, token);

    info!("Admin session started");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn logout(cookies: Cookies) -> Result<impl IntoResponse, AppError> {
    cookies.remove(Cookie::build((SESSION_COOKIE, "")).path("/").into());
    info!("Admin session ended");
    Ok(StatusCode::NO_CONTENT)
}

fn set_session_cookie(cookies: &Cookies, token: String) {
    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_http_only(true);
    cookie.set_secure(true);
    cookie.set_same_site(SameSite::Strict);
    cookie.set_path("/");
    cookie.set_max_age(Duration::days(7));
    cookies.add(cookie);
}
