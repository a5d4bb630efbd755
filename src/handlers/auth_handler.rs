use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::routes::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// A wrong password is a normal `false` result surfaced inline, never a 5xx.
pub async fn handle_login(data: web::Data<AppState>, req_body: web::Json<LoginRequest>) -> HttpResponse {
    if data.gate.login(&req_body.password) {
        HttpResponse::Ok().json(json!({"authenticated": true}))
    } else {
        HttpResponse::Ok().json(json!({
            "authenticated": false,
            "error": "Invalid password. Please try again.",
        }))
    }
}

pub async fn handle_logout(data: web::Data<AppState>) -> HttpResponse {
    data.gate.logout();
    HttpResponse::Ok().json(json!({"authenticated": false}))
}

pub async fn handle_status(data: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({"authenticated": data.gate.is_authenticated()}))
}
