use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use super::error::{ApiError, ErrorBody};
use crate::entity::{NewNote, Note};
use crate::service::NotesService;

/// `GET /api/notes`
pub async fn list_notes(State(service): State<NotesService>) -> Result<Json<Vec<Note>>, ApiError> {
    Ok(Json(service.list().await?))
}

/// `POST /api/notes`
///
/// Answers 200 with the stored note, not 201.
pub async fn create_note(
    State(service): State<NotesService>,
    payload: Result<Json<NewNote>, JsonRejection>,
) -> Result<Json<Note>, ApiError> {
    let Json(payload) = payload.map_err(|rejection| ApiError::from_rejection(&rejection))?;
    Ok(Json(service.create(payload).await?))
}

/// `GET /api/notes/{id}`
pub async fn get_note(
    State(service): State<NotesService>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<Note>, ApiError> {
    let Path(id) = id.map_err(|rejection| ApiError::from_path_rejection(&rejection))?;
    Ok(Json(service.get(&id).await?))
}

/// `DELETE /api/notes/{id}`
pub async fn delete_note(
    State(service): State<NotesService>,
    id: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id.map_err(|rejection| ApiError::from_path_rejection(&rejection))?;
    service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn unknown_endpoint() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "unknown endpoint".to_string(),
        }),
    )
}

pub async fn method_not_allowed() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody {
            error: "method not allowed".to_string(),
        }),
    )
}
