use actix_web::{web, App, HttpServer};

use campus_services::student_registry::StudentRegistry;
use campus_services::students_api;

const DEFAULT_BIND: &str = "0.0.0.0:8000";

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();

    let bind = std::env::var("STUDENTS_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());
    let registry = web::Data::new(StudentRegistry::new());

    tracing::info!(%bind, "starting students service");
    HttpServer::new(move || {
        App::new()
            .app_data(registry.clone())
            .configure(students_api::configure)
    })
    .bind(&bind)?
    .run()
    .await
}
