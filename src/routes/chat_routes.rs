use actix_session::Session;
use actix_web::{get, post, web, Responder};

use crate::handlers::chat_handler::{self, ChatRequest, FeedbackRequest, HistoryQuery};
use crate::routes::app_state::AppState;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(chat).service(chat_feedback).service(chat_history);
}

#[post("/api/chat")]
async fn chat(
    data: web::Data<AppState>,
    session: Session,
    req_body: web::Json<ChatRequest>,
) -> impl Responder {
    chat_handler::handle_chat_request(data, session, req_body).await
}

#[post("/api/chat/feedback")]
async fn chat_feedback(
    data: web::Data<AppState>,
    session: Session,
    req_body: web::Json<FeedbackRequest>,
) -> impl Responder {
    chat_handler::handle_feedback(data, session, req_body).await
}

#[get("/api/chat/history")]
async fn chat_history(
    data: web::Data<AppState>,
    session: Session,
    query: web::Query<HistoryQuery>,
) -> impl Responder {
    chat_handler::handle_history(data, session, query).await
}
