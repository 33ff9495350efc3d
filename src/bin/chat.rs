use actix_cors::Cors;
use actix_web::{web, App, HttpServer};

use campus_services::chat_api;
use campus_services::message_store::MessageStore;

const DEFAULT_BIND: &str = "0.0.0.0:80";

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();

    let bind = std::env::var("CHAT_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());
    let store = web::Data::new(MessageStore::new());

    tracing::info!(%bind, "starting chat service");
    HttpServer::new(move || {
        App::new()
            // Browser clients poll from anywhere; let everything through.
            .wrap(Cors::permissive())
            .app_data(store.clone())
            .configure(chat_api::configure)
    })
    .bind(&bind)?
    .run()
    .await
}
