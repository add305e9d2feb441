use axum::{
    extract::{FromRequestParts, FromRef},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use crate::state::AppState;
use crate::domain::services::session::{is_valid_session, SESSION_COOKIE};
use std::sync::Arc;
use tower_cookies::Cookies;
use tracing::debug;

/// Admin gate for staff routes. Rejects with a redirect to the login page.
pub struct AdminSession;

impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let cookies = parts.extensions.get::<Cookies>()
            .ok_or_else(|| StatusCode::INTERNAL_SERVER_ERROR.into_response())?;

        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        let valid = cookies
            .get(SESSION_COOKIE)
            .is_some_and(|c| is_valid_session(app_state.config.admin_password.as_deref(), c.value()));

        if !valid {
            debug!("Rejected request without a valid session: {}", parts.uri.path());
            return Err(Redirect::temporary("/login").into_response());
        }

        Ok(AdminSession)
    }
}
