use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub fn init_logging() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
}

const DEFAULT_BIND_ADDR: &str = "127.0.0.1";
const DEFAULT_BIND_PORT: u16 = 8080;

pub fn bind_addr() -> String {
    env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
}

pub fn bind_port() -> u16 {
    env::var("BIND_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_BIND_PORT)
}

const DEFAULT_UPSTREAM_BASE: &str = "http://localhost:8000";

/// Base URL of the email backend (`/api/emails`, `/api/stats`, `/api/fetch-emails`).
pub fn upstream_base_url() -> String {
    env::var("UPSTREAM_API_URL")
        .unwrap_or_else(|_| DEFAULT_UPSTREAM_BASE.to_string())
        .trim_end_matches('/')
        .to_string()
}

// The product ships with a fixed 5-digit numeric admin password compared by
// exact string equality. No hashing, no rate limiting, no lockout. It gates
// dashboard visibility only and grants no authority over the email backend.
const DEFAULT_ADMIN_PASSWORD: &str = "12345";

pub fn admin_password() -> String {
    env::var("ADMIN_PASSWORD").unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.to_string())
}

const DEFAULT_AUTH_STATE_PATH: &str = "auth_state.json";

pub fn auth_state_path() -> PathBuf {
    env::var("AUTH_STATE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_AUTH_STATE_PATH))
}

const DEFAULT_EMAIL_CACHE_TTL_SECS: u64 = 30;

pub fn email_cache_ttl() -> Duration {
    let secs = env::var("EMAIL_CACHE_TTL_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_EMAIL_CACHE_TTL_SECS);
    Duration::from_secs(secs)
}
