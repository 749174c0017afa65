use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use biography_database::StoreError;
use biography_service::FormError;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum BiographyError {
    #[error("multipart error: {0}")]
    Multipart(#[from] MultipartError),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl BiographyError {
    pub fn status(&self) -> StatusCode {
        match self {
            BiographyError::Multipart(_) | BiographyError::Form(_) => StatusCode::BAD_REQUEST,
            BiographyError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for BiographyError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            warn!(error = %self, "request rejected");
        }

        (status, self.to_string()).into_response()
    }
}
