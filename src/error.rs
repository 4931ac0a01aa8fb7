use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Errors surfaced by the upload, list, and serving handlers.
///
/// Client input problems keep their own status codes; everything that goes
/// wrong on the server side collapses to a 500 with the underlying message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing multipart field `image`")]
    MissingFile,

    #[error("unsupported media type `{0}`, expected an image")]
    UnsupportedMediaType(String),

    #[error("file exceeds the upload limit of {0} bytes")]
    FileTooLarge(u64),

    #[error("file not found")]
    NotFound,

    #[error("malformed multipart payload: {0}")]
    Multipart(String),

    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("connection pool error: {0}")]
    Pool(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingFile | ApiError::Multipart(_) => StatusCode::BAD_REQUEST,
            ApiError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::FileTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Io(_) | ApiError::Database(_) | ApiError::Pool(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": self.to_string() }))
    }
}
