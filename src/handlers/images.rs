use actix_multipart::Multipart;
use actix_web::http::header;
use actix_web::{HttpResponse, web};
use futures_util::StreamExt;
use mime_guess::from_path;
use tokio_util::io::ReaderStream;

use crate::config::Config;
use crate::database::DbPool;
use crate::error::ApiError;
use crate::models::images::{ImageResponse, NewImage};
use crate::repositories::images::{insert_image, load_all_images};
use crate::storage::ImageStorage;

/// POST /api/upload
/// Accepts one multipart `image` field, writes it to disk, and records its
/// metadata. The file is on disk before the record exists; an insert failure
/// leaves an orphaned file behind and no record.
pub async fn upload_image(
    pool: web::Data<DbPool>,
    storage: web::Data<ImageStorage>,
    config: web::Data<Config>,
    mut payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| ApiError::Multipart(e.to_string()))?;

        // Only the first `image` field is consumed; other fields are ignored.
        if field.name() != "image" {
            continue;
        }

        let original_name = field
            .content_disposition()
            .get_filename()
            .unwrap_or("file")
            .to_string();

        let mime_type = field
            .content_type()
            .map(|m| m.to_string())
            .unwrap_or_default();
        if !mime_type.starts_with("image/") {
            return Err(ApiError::UnsupportedMediaType(mime_type));
        }

        let stored = storage
            .save_stream(&original_name, &mut field, config.max_upload_bytes)
            .await?;

        let new_image = NewImage {
            stored_name: stored.stored_name,
            original_name,
            storage_path: stored.path.to_string_lossy().to_string(),
            mime_type,
            size: stored.size,
        };

        let record = insert_image(&pool, &new_image)?;
        log::info!(
            "stored {} ({} bytes) as {}",
            record.original_name,
            record.size,
            record.stored_name
        );

        return Ok(HttpResponse::Created().json(ImageResponse::from(record)));
    }

    Err(ApiError::MissingFile)
}

/// GET /api/images
/// Returns every stored record, newest first.
pub async fn list_images(pool: web::Data<DbPool>) -> Result<HttpResponse, ApiError> {
    let records = load_all_images(&pool)?;
    let body: Vec<ImageResponse> = records.into_iter().map(ImageResponse::from).collect();

    Ok(HttpResponse::Ok().json(body))
}

/// GET /uploads/{filename}
/// Streams a stored file back by its storage name, with the content type
/// guessed from the extension.
pub async fn serve_image(
    storage: web::Data<ImageStorage>,
    filename: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let name = filename.into_inner();
    let path = storage.resolve(&name).ok_or(ApiError::NotFound)?;

    let file = match tokio::fs::File::open(&path).await {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(ApiError::NotFound),
        Err(e) => return Err(e.into()),
    };

    let content_type = from_path(&name).first_or_octet_stream().to_string();

    Ok(HttpResponse::Ok()
        .append_header((header::CONTENT_TYPE, content_type))
        .streaming(ReaderStream::new(file)))
}
