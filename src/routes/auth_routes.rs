use actix_web::{get, post, web, Responder};

use crate::handlers::auth_handler::{self, LoginRequest};
use crate::routes::app_state::AppState;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(login).service(logout).service(status);
}

#[post("/api/auth/login")]
async fn login(data: web::Data<AppState>, req_body: web::Json<LoginRequest>) -> impl Responder {
    auth_handler::handle_login(data, req_body).await
}

#[post("/api/auth/logout")]
async fn logout(data: web::Data<AppState>) -> impl Responder {
    auth_handler::handle_logout(data).await
}

#[get("/api/auth/status")]
async fn status(data: web::Data<AppState>) -> impl Responder {
    auth_handler::handle_status(data).await
}
