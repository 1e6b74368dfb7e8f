use sqlx::PgPool;
use uuid::Uuid;

use crate::models::document::DocumentRow;

pub struct NewDocument<'a> {
    pub candidate_id: Option<Uuid>,
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub size_bytes: i64,
    pub s3_key: &'a str,
}

/// Inserts the tracking row in `pending` before the S3 write is attempted.
pub async fn insert_document(
    pool: &PgPool,
    document: NewDocument<'_>,
) -> Result<DocumentRow, sqlx::Error> {
    sqlx::query_as::<_, DocumentRow>(
        r#"
        INSERT INTO documents (candidate_id, file_name, content_type, size_bytes, s3_key, status)
        VALUES ($1, $2, $3, $4, $5, 'pending')
        RETURNING *
        "#,
    )
    .bind(document.candidate_id)
    .bind(document.file_name)
    .bind(document.content_type)
    .bind(document.size_bytes)
    .bind(document.s3_key)
    .fetch_one(pool)
    .await
}

pub async fn mark_stored(pool: &PgPool, id: Uuid) -> Result<Option<DocumentRow>, sqlx::Error> {
    sqlx::query_as::<_, DocumentRow>(
        r#"
        UPDATE documents
        SET status = 'stored', error_message = NULL, updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn mark_failed(
    pool: &PgPool,
    id: Uuid,
    error_message: &str,
) -> Result<Option<DocumentRow>, sqlx::Error> {
    sqlx::query_as::<_, DocumentRow>(
        r#"
        UPDATE documents
        SET status = 'failed', error_message = $2, updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(error_message)
    .fetch_optional(pool)
    .await
}

pub async fn fetch_document(pool: &PgPool, id: Uuid) -> Result<Option<DocumentRow>, sqlx::Error> {
    sqlx::query_as::<_, DocumentRow>("SELECT * FROM documents WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}
