use std::sync::Arc;

use actix_files::Files;
use actix_web::{cookie::Key, middleware::Logger, web, App, HttpServer};
use actix_session::{storage::CookieSessionStore, SessionMiddleware};

use inboxprism::auth::SessionGate;
use inboxprism::routes::app_state::AppState;
use inboxprism::services::email_service::UpstreamClient;
use inboxprism::session_manager::ChatSessionManager;
use inboxprism::{config, routes};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    config::init_logging();

    let state = AppState {
        session_manager: ChatSessionManager::new(),
        gate: Arc::new(SessionGate::new(
            config::admin_password(),
            config::auth_state_path(),
        )),
        emails: UpstreamClient::new(config::upstream_base_url(), config::email_cache_ttl()),
    };

    let cookie_key = Key::generate();
    let addr = config::bind_addr();
    let port = config::bind_port();

    log::info!("Starting server on http://{}:{}", addr, port);
    log::info!("Email backend at {}", config::upstream_base_url());

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), cookie_key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .app_data(web::Data::new(state.clone()))
            .configure(routes::session_routes::init_routes)
            .configure(routes::chat_routes::init_routes)
            .configure(routes::auth_routes::init_routes)
            .configure(routes::email_routes::init_routes)
            // Landing shell and other static assets.
            .service(Files::new("/", "./static").index_file("index.html"))
    })
    .bind((addr, port))?
    .run()
    .await
}
