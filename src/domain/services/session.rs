use sha2::{Digest, Sha256};

pub const SESSION_COOKIE: &str = "auth_session";

/// Cookie value for a password; the password itself never leaves the server.
pub fn session_token(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Without a configured password any present session passes.
pub fn is_valid_session(admin_password: Option<&str>, cookie_value: &str) -> bool {
    match admin_password {
        Some(password) => cookie_value == session_token(password),
        None => !cookie_value.is_empty(),
    }
}

pub fn password_matches(admin_password: Option<&str>, attempt: &str) -> bool {
    match admin_password {
        Some(password) => attempt == password,
        None => true,
    }
}
