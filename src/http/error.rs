//! HTTP mapping for [`NotesError`].

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::NotesError;

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Error returned from handlers; renders as `{"error": "..."}` with a matching status.
#[derive(Debug)]
pub struct ApiError(NotesError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            NotesError::Validation { .. } | NotesError::MalformedId(_) => StatusCode::BAD_REQUEST,
            NotesError::NotFound(_) => StatusCode::NOT_FOUND,
            NotesError::Storage(_)
            | NotesError::Config(_)
            | NotesError::Io(_)
            | NotesError::Json(_)
            | NotesError::Loro(_)
            | NotesError::LoroEncode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// A request body that could not be decoded as a create payload.
    pub fn from_rejection(rejection: &JsonRejection) -> Self {
        Self(NotesError::validation("body", rejection.body_text()))
    }

    /// A path segment that could not be decoded as an id.
    pub fn from_path_rejection(rejection: &PathRejection) -> Self {
        Self(NotesError::MalformedId(rejection.body_text()))
    }
}

impl From<NotesError> for ApiError {
    fn from(err: NotesError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if self.0.is_client_error() {
            tracing::debug!(status = status.as_u16(), error = %self.0, "request rejected");
            self.0.to_string()
        } else {
            tracing::error!(error = %self.0, "request failed");
            "internal server error".to_string()
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
