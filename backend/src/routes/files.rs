//! File upload and download routes
//!
//! Upload requires a bearer token (the paths are outside the public
//! allow-list); download is public. Download URIs are relative so they
//! work behind any proxy prefix.

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::services::FileStorageService;
use crate::state::AppState;
use axum::{
    extract::{multipart::Field, Multipart, Path, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use user_management_shared::types::UploadFileResponse;

/// Create file routes
pub fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/uploadFile", post(upload_file))
        .route("/uploadMultipleFiles", post(upload_multiple_files))
        .route("/downloadFile/:file_name", get(download_file))
}

async fn store_field(
    state: &AppState,
    field: Field<'_>,
) -> ApiResult<UploadFileResponse> {
    let original_name = field
        .file_name()
        .ok_or_else(|| ApiError::Validation("File part has no file name".to_string()))?
        .to_string();
    // Prefer the client-declared content type, fall back to extension guess
    let file_type = field
        .content_type()
        .map(str::to_string)
        .unwrap_or_else(|| FileStorageService::content_type(&original_name));

    let bytes = field
        .bytes()
        .await
        .map_err(|e| ApiError::Validation(format!("Failed to read upload: {}", e)))?;

    let file_name = state.files().store(&original_name, &bytes).await?;

    Ok(UploadFileResponse {
        file_download_uri: format!("/downloadFile/{}", file_name),
        file_name,
        file_type,
        size: bytes.len() as u64,
    })
}

/// POST /uploadFile - store a single multipart file part
async fn upload_file(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadFileResponse>> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("Invalid multipart body: {}", e)))?
        .ok_or_else(|| ApiError::Validation("No file part in request".to_string()))?;

    let response = store_field(&state, field).await?;
    tracing::info!(uploader = %user.login_id, file = %response.file_name, "File uploaded");
    Ok(Json(response))
}

/// POST /uploadMultipleFiles - store every file part in the body
async fn upload_multiple_files(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> ApiResult<Json<Vec<UploadFileResponse>>> {
    let mut responses = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("Invalid multipart body: {}", e)))?
    {
        responses.push(store_field(&state, field).await?);
    }

    if responses.is_empty() {
        return Err(ApiError::Validation("No file part in request".to_string()));
    }

    tracing::info!(
        uploader = %user.login_id,
        count = responses.len(),
        "Files uploaded"
    );
    Ok(Json(responses))
}

/// GET /downloadFile/{fileName} - stream a stored file back
///
/// Content type is a best-effort guess from the extension, defaulting to
/// application/octet-stream.
async fn download_file(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> ApiResult<Response> {
    let bytes = state.files().load(&file_name).await?;
    let content_type = FileStorageService::content_type(&file_name);

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        bytes,
    )
        .into_response())
}
