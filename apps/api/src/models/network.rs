use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RecruiterRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub display_name: String,
    pub bio: Option<String>,
    pub specialties: Vec<String>,
    /// Stripe connected account receiving payout transfers.
    pub stripe_account_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A candidate-role proposal. Rows are never deleted; a re-proposal after
/// decline is a new row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProposalRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    pub recruiter_id: Uuid,
    pub state: String,
    pub proposal_notes: Option<String>,
    pub response_due_at: DateTime<Utc>,
    pub response_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
