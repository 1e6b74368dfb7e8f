use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A confirmed hire. Immutable once created; only the payouts derived from it
/// change state afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PlacementRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    pub recruiter_id: Uuid,
    /// First-year salary in minor units.
    pub salary: i64,
    pub fee_percentage: f64,
    pub fee_amount: i64,
    pub recruiter_share_amount: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PlacementCollaboratorRow {
    pub id: Uuid,
    pub placement_id: Uuid,
    pub recruiter_user_id: Uuid,
    pub role: String,
    pub split_percentage: f64,
    pub split_amount: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PayoutRow {
    pub id: Uuid,
    pub placement_id: Uuid,
    /// User id of the collaborator this payout belongs to.
    pub recruiter_id: Uuid,
    pub payout_amount: i64,
    pub status: String,
    pub stripe_transfer_id: Option<String>,
    pub failure_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
