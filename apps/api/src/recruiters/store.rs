use sqlx::PgPool;
use uuid::Uuid;

use crate::models::network::RecruiterRow;
use crate::recruiters::reputation::ReputationInputs;

pub struct NewRecruiter<'a> {
    pub user_id: Uuid,
    pub display_name: &'a str,
    pub bio: Option<&'a str>,
    pub specialties: &'a [String],
    pub stripe_account_id: Option<&'a str>,
}

pub async fn insert_recruiter(
    pool: &PgPool,
    recruiter: NewRecruiter<'_>,
) -> Result<RecruiterRow, sqlx::Error> {
    sqlx::query_as::<_, RecruiterRow>(
        r#"
        INSERT INTO recruiters (user_id, display_name, bio, specialties, stripe_account_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(recruiter.user_id)
    .bind(recruiter.display_name)
    .bind(recruiter.bio)
    .bind(recruiter.specialties)
    .bind(recruiter.stripe_account_id)
    .fetch_one(pool)
    .await
}

pub async fn fetch_recruiter(pool: &PgPool, id: Uuid) -> Result<Option<RecruiterRow>, sqlx::Error> {
    sqlx::query_as::<_, RecruiterRow>("SELECT * FROM recruiters WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_recruiters(pool: &PgPool) -> Result<Vec<RecruiterRow>, sqlx::Error> {
    sqlx::query_as::<_, RecruiterRow>("SELECT * FROM recruiters ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

pub async fn recruiter_exists(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM recruiters WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(exists)
}

/// Stripe connected account for a collaborator, keyed by user id (payouts
/// store the collaborator's user id, not the profile id).
pub async fn stripe_account_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar::<_, Option<String>>(
        "SELECT stripe_account_id FROM recruiters WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .map(|row| row.flatten())
}

pub async fn reputation_inputs(
    pool: &PgPool,
    recruiter_id: Uuid,
) -> Result<ReputationInputs, sqlx::Error> {
    let (accepted, declined): (i64, i64) = sqlx::query_as(
        r#"
        SELECT
            COUNT(*) FILTER (WHERE state = 'accepted'),
            COUNT(*) FILTER (WHERE state = 'declined')
        FROM proposals
        WHERE recruiter_id = $1
        "#,
    )
    .bind(recruiter_id)
    .fetch_one(pool)
    .await?;

    let placements: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM placements WHERE recruiter_id = $1")
            .bind(recruiter_id)
            .fetch_one(pool)
            .await?;

    Ok(ReputationInputs {
        proposals_accepted: accepted,
        proposals_declined: declined,
        placements,
    })
}
