use std::sync::Arc;

use crate::auth::SessionGate;
use crate::services::email_service::UpstreamClient;
use crate::session_manager::ChatSessionManager;

#[derive(Clone)]
pub struct AppState {
    pub session_manager: ChatSessionManager,
    pub gate: Arc<SessionGate>,
    pub emails: UpstreamClient,
}
