use aws_sdk_s3::primitives::ByteStream;
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::BearerToken;
use crate::documents::store::{self, NewDocument};
use crate::errors::AppError;
use crate::events;
use crate::models::document::DocumentRow;
use crate::state::AppState;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Serialize)]
pub struct DocumentStatusResponse {
    pub id: Uuid,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// POST /api/v1/documents (multipart: `file`, optional `candidate_id`)
///
/// The tracking row is written in `pending` before the S3 put so a storage
/// failure is visible as a `failed` row rather than a vanished upload.
pub async fn handle_upload_document(
    State(state): State<AppState>,
    _auth: BearerToken,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<DocumentRow>), AppError> {
    let mut file_name: Option<String> = None;
    let mut content_type: Option<String> = None;
    let mut data: Option<Bytes> = None;
    let mut candidate_id: Option<Uuid> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                file_name = field.file_name().map(str::to_string);
                content_type = field.content_type().map(str::to_string);
                data = Some(field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read file field: {e}"))
                })?);
            }
            Some("candidate_id") => {
                let text = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read candidate_id field: {e}"))
                })?;
                let id = Uuid::parse_str(text.trim()).map_err(|_| {
                    AppError::Validation(format!("'{text}' is not a valid candidate id"))
                })?;
                candidate_id = Some(id);
            }
            _ => {}
        }
    }

    let data = data.ok_or_else(|| AppError::Validation("Missing 'file' field".to_string()))?;
    if data.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }
    let file_name = file_name.unwrap_or_else(|| "upload.bin".to_string());
    let content_type = content_type.unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

    let s3_key = format!("documents/{}/{}", Uuid::new_v4(), file_name);
    let row = store::insert_document(
        &state.db,
        NewDocument {
            candidate_id,
            file_name: &file_name,
            content_type: &content_type,
            size_bytes: data.len() as i64,
            s3_key: &s3_key,
        },
    )
    .await?;

    let put = state
        .s3
        .put_object()
        .bucket(&state.config.s3_bucket)
        .key(&s3_key)
        .body(ByteStream::from(data.to_vec()))
        .content_type(&content_type)
        .send()
        .await;

    match put {
        Ok(_) => {
            let stored = store::mark_stored(&state.db, row.id).await?.ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!("document {} row disappeared", row.id))
            })?;
            info!("Stored document {} at s3://{}/{}", row.id, state.config.s3_bucket, s3_key);
            events::emit(state.events.as_ref(), "document.stored", &stored).await;
            Ok((StatusCode::CREATED, Json(stored)))
        }
        Err(e) => {
            let message = format!("S3 upload failed: {e}");
            store::mark_failed(&state.db, row.id, &message).await?;
            Err(AppError::Storage(message))
        }
    }
}

/// GET /api/v1/documents/:id
pub async fn handle_get_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DocumentRow>, AppError> {
    let row = store::fetch_document(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Document {id} not found")))?;
    Ok(Json(row))
}

/// GET /api/v1/documents/:id/status
pub async fn handle_get_document_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DocumentStatusResponse>, AppError> {
    let row = store::fetch_document(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Document {id} not found")))?;
    Ok(Json(DocumentStatusResponse {
        id: row.id,
        status: row.status,
        error_message: row.error_message,
    }))
}
