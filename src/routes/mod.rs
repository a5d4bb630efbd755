pub mod app_state;
pub mod auth_routes;
pub mod chat_routes;
pub mod email_routes;
pub mod session_routes;
