pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod storage;

use actix_web::web;

/// Registers every route of the service: the JSON API, the raw file
/// passthrough, and the embedded gallery client.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/upload", web::post().to(handlers::images::upload_image))
            .route("/images", web::get().to(handlers::images::list_images)),
    )
    .route(
        "/uploads/{filename}",
        web::get().to(handlers::images::serve_image),
    )
    .route("/", web::get().to(handlers::assets::index))
    .route("/app.js", web::get().to(handlers::assets::app_js))
    .route("/styles.css", web::get().to(handlers::assets::styles_css));
}
