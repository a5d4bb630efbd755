use actix_session::Session;
use log::warn;

pub mod auth_handler;
pub mod chat_handler;
pub mod session_handler;

/// Session id from the cookie, falling back to one supplied in the request.
pub(crate) fn resolve_session_id(session: &Session, fallback: Option<&str>) -> String {
    if let Ok(Some(id)) = session.get::<String>("session_id") {
        id
    } else {
        warn!("No valid session_id found in cookie; falling back to request payload");
        fallback.unwrap_or_default().to_string()
    }
}
