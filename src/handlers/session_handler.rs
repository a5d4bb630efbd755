use actix_session::Session;
use actix_web::web;
use log::{error, info};
use serde_json::json;
use uuid::Uuid;

use crate::models::chat_message::ChatSession;
use crate::routes::app_state::AppState;

pub async fn initialize_session(
    data: web::Data<AppState>,
    session: Session,
) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let session_id = Uuid::new_v4().to_string();
    if let Err(e) = session.insert("session_id", session_id.clone()) {
        error!("Failed to insert session_id into cookie: {:?}", e);
    } else {
        info!("Stored session_id {} in cookie", session_id);
    }

    if data.session_manager.get(&session_id).is_some() {
        return Ok(json!({ "initialized": true, "session_id": session_id }));
    }

    // A fresh session opens with the assistant welcome message.
    data.session_manager
        .insert(session_id.clone(), ChatSession::new());
    info!("Initialized chat session: {}", session_id);

    Ok(json!({ "initialized": true, "session_id": session_id }))
}
