use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Infrastructure failures. Portal actions themselves never fail; they are
/// refused silently instead.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("template error: {0}")]
    Template(#[from] tera::Error),
    #[error("upload error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {}", self);
        let status = match self {
            AppError::Multipart(_) => StatusCode::BAD_REQUEST,
            AppError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}
