use sqlx::PgPool;
use uuid::Uuid;

use crate::models::billing::PayoutRow;
use crate::payouts::lifecycle::PayoutStatus;

pub async fn fetch_payout(pool: &PgPool, id: Uuid) -> Result<Option<PayoutRow>, sqlx::Error> {
    sqlx::query_as::<_, PayoutRow>("SELECT * FROM payouts WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_payouts(
    pool: &PgPool,
    placement_id: Option<Uuid>,
    status: Option<&str>,
) -> Result<Vec<PayoutRow>, sqlx::Error> {
    sqlx::query_as::<_, PayoutRow>(
        r#"
        SELECT * FROM payouts
        WHERE ($1::uuid IS NULL OR placement_id = $1)
          AND ($2::text IS NULL OR status = $2)
        ORDER BY created_at ASC
        "#,
    )
    .bind(placement_id)
    .bind(status)
    .fetch_all(pool)
    .await
}

/// Compare-and-swap status transition, same shape as the proposal store:
/// `None` means the observed status moved underneath the caller.
pub async fn transition_status(
    pool: &PgPool,
    id: Uuid,
    from: PayoutStatus,
    to: PayoutStatus,
) -> Result<Option<PayoutRow>, sqlx::Error> {
    sqlx::query_as::<_, PayoutRow>(
        r#"
        UPDATE payouts
        SET status = $3, updated_at = NOW()
        WHERE id = $1 AND status = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(from.as_str())
    .bind(to.as_str())
    .fetch_optional(pool)
    .await
}

/// Records a successful transfer. Only valid from `processing`.
pub async fn mark_completed(
    pool: &PgPool,
    id: Uuid,
    stripe_transfer_id: &str,
) -> Result<Option<PayoutRow>, sqlx::Error> {
    sqlx::query_as::<_, PayoutRow>(
        r#"
        UPDATE payouts
        SET status = 'completed',
            stripe_transfer_id = $2,
            failure_message = NULL,
            updated_at = NOW()
        WHERE id = $1 AND status = 'processing'
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(stripe_transfer_id)
    .fetch_optional(pool)
    .await
}

/// Records a failed transfer with the provider's message. Only valid from
/// `processing`.
pub async fn mark_failed(
    pool: &PgPool,
    id: Uuid,
    failure_message: &str,
) -> Result<Option<PayoutRow>, sqlx::Error> {
    sqlx::query_as::<_, PayoutRow>(
        r#"
        UPDATE payouts
        SET status = 'failed',
            failure_message = $2,
            updated_at = NOW()
        WHERE id = $1 AND status = 'processing'
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(failure_message)
    .fetch_optional(pool)
    .await
}
