// Placements: a confirmed hire and the money attached to it.
// Creation computes the fee split and fans out one pending payout per
// collaborator; the placement row itself is immutable afterwards.

pub mod fee_split;
pub mod handlers;
pub mod store;

use uuid::Uuid;

use crate::ats::store as ats_store;
use crate::errors::AppError;
use crate::events;
use crate::recruiters::store as recruiter_store;
use crate::state::AppState;

use self::fee_split::SplitSpec;
use self::store::{NewPlacement, PlacementDetail};

pub struct CreatePlacement {
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    pub recruiter_id: Uuid,
    pub salary: i64,
    pub fee_percentage: f64,
    pub collaborators: Vec<SplitSpec>,
}

/// Validates references, computes the fee split, persists the placement
/// graph, and emits `placement.created`. Called from the placements endpoint
/// and from the hire transition in the applications workflow.
pub async fn create_placement(
    state: &AppState,
    input: CreatePlacement,
) -> Result<PlacementDetail, AppError> {
    if !ats_store::job_exists(&state.db, input.job_id).await? {
        return Err(AppError::Validation(format!(
            "Job {} does not exist",
            input.job_id
        )));
    }
    if !ats_store::candidate_exists(&state.db, input.candidate_id).await? {
        return Err(AppError::Validation(format!(
            "Candidate {} does not exist",
            input.candidate_id
        )));
    }
    if !recruiter_store::recruiter_exists(&state.db, input.recruiter_id).await? {
        return Err(AppError::Validation(format!(
            "Recruiter {} does not exist",
            input.recruiter_id
        )));
    }

    let distribution =
        fee_split::distribute(input.salary, input.fee_percentage, &input.collaborators)
            .map_err(|e| AppError::Validation(e.to_string()))?;

    let detail = store::insert_placement_graph(
        &state.db,
        NewPlacement {
            job_id: input.job_id,
            candidate_id: input.candidate_id,
            recruiter_id: input.recruiter_id,
            salary: input.salary,
            fee_percentage: input.fee_percentage,
            fee_amount: distribution.fee_amount,
            recruiter_share_amount: distribution.recruiter_share_amount,
        },
        &distribution.shares,
    )
    .await?;

    events::emit(state.events.as_ref(), "placement.created", &detail).await;
    Ok(detail)
}
