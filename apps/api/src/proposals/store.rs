use sqlx::PgPool;
use uuid::Uuid;

use crate::models::network::ProposalRow;
use crate::proposals::lifecycle::ProposalState;

pub struct NewProposal<'a> {
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    pub recruiter_id: Uuid,
    pub proposal_notes: Option<&'a str>,
    pub due_days: i32,
}

pub async fn insert_proposal(
    pool: &PgPool,
    proposal: NewProposal<'_>,
) -> Result<ProposalRow, sqlx::Error> {
    sqlx::query_as::<_, ProposalRow>(
        r#"
        INSERT INTO proposals
            (job_id, candidate_id, recruiter_id, state, proposal_notes, response_due_at)
        VALUES ($1, $2, $3, 'proposed', $4, NOW() + make_interval(days => $5))
        RETURNING *
        "#,
    )
    .bind(proposal.job_id)
    .bind(proposal.candidate_id)
    .bind(proposal.recruiter_id)
    .bind(proposal.proposal_notes)
    .bind(proposal.due_days)
    .fetch_one(pool)
    .await
}

pub async fn fetch_proposal(pool: &PgPool, id: Uuid) -> Result<Option<ProposalRow>, sqlx::Error> {
    sqlx::query_as::<_, ProposalRow>("SELECT * FROM proposals WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_proposals(
    pool: &PgPool,
    recruiter_id: Option<Uuid>,
    job_id: Option<Uuid>,
    state: Option<&str>,
) -> Result<Vec<ProposalRow>, sqlx::Error> {
    sqlx::query_as::<_, ProposalRow>(
        r#"
        SELECT * FROM proposals
        WHERE ($1::uuid IS NULL OR recruiter_id = $1)
          AND ($2::uuid IS NULL OR job_id = $2)
          AND ($3::text IS NULL OR state = $3)
        ORDER BY created_at DESC
        "#,
    )
    .bind(recruiter_id)
    .bind(job_id)
    .bind(state)
    .fetch_all(pool)
    .await
}

/// Compare-and-swap state transition: the UPDATE only lands if the row is
/// still in the state the caller observed. Returns `None` when another
/// request won the race.
pub async fn transition_state(
    pool: &PgPool,
    id: Uuid,
    from: ProposalState,
    to: ProposalState,
    response_notes: Option<&str>,
) -> Result<Option<ProposalRow>, sqlx::Error> {
    sqlx::query_as::<_, ProposalRow>(
        r#"
        UPDATE proposals
        SET state = $3,
            response_notes = COALESCE($4, response_notes),
            updated_at = NOW()
        WHERE id = $1 AND state = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(from.as_str())
    .bind(to.as_str())
    .bind(response_notes)
    .fetch_optional(pool)
    .await
}
