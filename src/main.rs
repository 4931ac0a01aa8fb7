use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{App, HttpServer, middleware, web};

use image_gallery::config::Config;
use image_gallery::storage::ImageStorage;
use image_gallery::{database, routes};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    dotenv::dotenv().ok();

    let config = Config::from_env().map_err(std::io::Error::other)?;

    let pool = database::create_pool(&config.database_url);
    let storage = ImageStorage::new(&config.upload_dir);
    storage.ensure_upload_dir_exists()?;

    log::info!(
        "listening on http://{}:{}, serving uploads from {}",
        config.host,
        config.port,
        config.upload_dir.display()
    );

    let bind_addr = config.bind_addr();

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&config.allowed_origin)
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .wrap(middleware::Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(config.clone()))
            .configure(routes)
    })
    .bind(bind_addr)?
    .run()
    .await
}
