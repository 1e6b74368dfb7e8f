use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::billing::{PayoutRow, PlacementCollaboratorRow, PlacementRow};
use crate::placements::fee_split::CollaboratorShare;

pub struct NewPlacement {
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    pub recruiter_id: Uuid,
    pub salary: i64,
    pub fee_percentage: f64,
    pub fee_amount: i64,
    pub recruiter_share_amount: i64,
}

/// A placement with its collaborator and payout rows.
#[derive(Debug, Clone, Serialize)]
pub struct PlacementDetail {
    pub placement: PlacementRow,
    pub collaborators: Vec<PlacementCollaboratorRow>,
    pub payouts: Vec<PayoutRow>,
}

/// Inserts the placement, its collaborators, and one pending payout per
/// collaborator in a single transaction. Either the whole graph lands or
/// none of it does.
pub async fn insert_placement_graph(
    pool: &PgPool,
    new: NewPlacement,
    shares: &[CollaboratorShare],
) -> Result<PlacementDetail, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let placement: PlacementRow = sqlx::query_as(
        r#"
        INSERT INTO placements
            (job_id, candidate_id, recruiter_id, salary, fee_percentage,
             fee_amount, recruiter_share_amount)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(new.job_id)
    .bind(new.candidate_id)
    .bind(new.recruiter_id)
    .bind(new.salary)
    .bind(new.fee_percentage)
    .bind(new.fee_amount)
    .bind(new.recruiter_share_amount)
    .fetch_one(&mut *tx)
    .await?;

    let mut collaborators = Vec::with_capacity(shares.len());
    let mut payouts = Vec::with_capacity(shares.len());

    for share in shares {
        let collaborator: PlacementCollaboratorRow = sqlx::query_as(
            r#"
            INSERT INTO placement_collaborators
                (placement_id, recruiter_user_id, role, split_percentage, split_amount)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(placement.id)
        .bind(share.recruiter_user_id)
        .bind(share.role.as_str())
        .bind(share.split_percentage)
        .bind(share.split_amount)
        .fetch_one(&mut *tx)
        .await?;

        let payout: PayoutRow = sqlx::query_as(
            r#"
            INSERT INTO payouts (placement_id, recruiter_id, payout_amount, status)
            VALUES ($1, $2, $3, 'pending')
            RETURNING *
            "#,
        )
        .bind(placement.id)
        .bind(share.recruiter_user_id)
        .bind(share.split_amount)
        .fetch_one(&mut *tx)
        .await?;

        collaborators.push(collaborator);
        payouts.push(payout);
    }

    tx.commit().await?;

    Ok(PlacementDetail {
        placement,
        collaborators,
        payouts,
    })
}

pub async fn fetch_placement(pool: &PgPool, id: Uuid) -> Result<Option<PlacementRow>, sqlx::Error> {
    sqlx::query_as::<_, PlacementRow>("SELECT * FROM placements WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn fetch_collaborators(
    pool: &PgPool,
    placement_id: Uuid,
) -> Result<Vec<PlacementCollaboratorRow>, sqlx::Error> {
    sqlx::query_as::<_, PlacementCollaboratorRow>(
        "SELECT * FROM placement_collaborators WHERE placement_id = $1 ORDER BY created_at ASC",
    )
    .bind(placement_id)
    .fetch_all(pool)
    .await
}

pub async fn list_placements(
    pool: &PgPool,
    recruiter_id: Option<Uuid>,
) -> Result<Vec<PlacementRow>, sqlx::Error> {
    sqlx::query_as::<_, PlacementRow>(
        r#"
        SELECT * FROM placements
        WHERE ($1::uuid IS NULL OR recruiter_id = $1)
        ORDER BY created_at DESC
        "#,
    )
    .bind(recruiter_id)
    .fetch_all(pool)
    .await
}
