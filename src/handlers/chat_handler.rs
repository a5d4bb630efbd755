use std::time::Duration;

use actix_session::Session;
use actix_web::{web, HttpResponse};
use log::{debug, error, info, warn};
use rand::Rng;
use serde::Deserialize;
use serde_json::json;
use tokio::time::sleep;

use crate::handlers::resolve_session_id;
use crate::models::chat_message::Feedback;
use crate::routes::app_state::AppState;
use crate::services::responder;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub message_id: String,
    pub feedback: Feedback,
    pub session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub session_id: Option<String>,
}

pub async fn handle_chat_request(
    data: web::Data<AppState>,
    session: Session,
    req_body: web::Json<ChatRequest>,
) -> HttpResponse {
    let session_id = resolve_session_id(&session, req_body.session_id.as_deref());
    let message = req_body.message.clone();

    // The user message is appended immediately; the assistant reply follows
    // after the thinking pause.
    let appended = data.session_manager.with_session(&session_id, |s| {
        s.push_user(&message);
    });
    if appended.is_none() {
        error!("Session \"{}\" not found!", session_id);
        return HttpResponse::InternalServerError().json(json!({"error": "Session not initialized"}));
    }
    info!("Processing message for session {}: {}", session_id, message);

    sleep(thinking_delay()).await;

    // A dead backend degrades to an empty inbox; the responder still answers.
    let emails = match data.emails.emails().await {
        Ok(emails) => emails,
        Err(e) => {
            warn!("email backend unavailable, answering over an empty inbox: {}", e);
            Vec::new()
        }
    };
    let response = responder::select_response(&message, &emails);

    // The session may have been torn down while we were thinking; in that
    // case dropping the append silently is the contract.
    let stored = data.session_manager.with_session(&session_id, |s| {
        s.push_assistant(&response);
    });
    if stored.is_none() {
        debug!(
            "session {} disappeared during the thinking delay; response not stored",
            session_id
        );
    }

    HttpResponse::Ok().json(json!({"response": response}))
}

pub async fn handle_feedback(
    data: web::Data<AppState>,
    session: Session,
    req_body: web::Json<FeedbackRequest>,
) -> HttpResponse {
    let session_id = resolve_session_id(&session, req_body.session_id.as_deref());

    match data
        .session_manager
        .with_session(&session_id, |s| s.set_feedback(&req_body.message_id, req_body.feedback))
    {
        Some(Some(updated)) => HttpResponse::Ok().json(json!({
            "message_id": req_body.message_id.clone(),
            "feedback": updated,
        })),
        Some(None) => HttpResponse::NotFound().json(json!({"error": "Message not found"})),
        None => {
            error!("Session \"{}\" not found!", session_id);
            HttpResponse::InternalServerError().json(json!({"error": "Session not initialized"}))
        }
    }
}

pub async fn handle_history(
    data: web::Data<AppState>,
    session: Session,
    query: web::Query<HistoryQuery>,
) -> HttpResponse {
    let session_id = resolve_session_id(&session, query.session_id.as_deref());

    match data.session_manager.get(&session_id) {
        Some(chat) => HttpResponse::Ok().json(json!({"messages": chat.messages()})),
        None => {
            error!("Session \"{}\" not found!", session_id);
            HttpResponse::InternalServerError().json(json!({"error": "Session not initialized"}))
        }
    }
}

// Jittered pause before the assistant answers. Presentation only; the
// selection itself is synchronous and deterministic.
fn thinking_delay() -> Duration {
    Duration::from_millis(rand::rng().random_range(800..2000))
}
