use actix_web::{get, post, web, HttpResponse, Responder};
use log::error;
use serde_json::json;

use crate::models::email::FetchEmailsRequest;
use crate::routes::app_state::AppState;
use crate::services::email_service::UpstreamError;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(get_emails).service(get_stats).service(fetch_emails);
}

fn bad_gateway(e: UpstreamError) -> HttpResponse {
    error!("upstream email API call failed: {}", e);
    HttpResponse::BadGateway().json(json!({"error": e.to_string()}))
}

#[get("/api/emails")]
async fn get_emails(data: web::Data<AppState>) -> impl Responder {
    match data.emails.emails().await {
        Ok(emails) => {
            let count = emails.len();
            HttpResponse::Ok().json(json!({"emails": emails, "count": count}))
        }
        Err(e) => bad_gateway(e),
    }
}

#[get("/api/stats")]
async fn get_stats(data: web::Data<AppState>) -> impl Responder {
    match data.emails.stats().await {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => bad_gateway(e),
    }
}

#[post("/api/fetch-emails")]
async fn fetch_emails(
    data: web::Data<AppState>,
    req_body: web::Json<FetchEmailsRequest>,
) -> impl Responder {
    match data.emails.trigger_fetch(&req_body).await {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(e) => bad_gateway(e),
    }
}
