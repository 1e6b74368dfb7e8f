use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::ats::store as ats_store;
use crate::auth::BearerToken;
use crate::errors::AppError;
use crate::events;
use crate::models::network::ProposalRow;
use crate::proposals::lifecycle::{self, ProposalAction, ProposalState};
use crate::proposals::store::{self, NewProposal};
use crate::recruiters::store as recruiter_store;
use crate::state::AppState;

const DEFAULT_RESPONSE_DUE_DAYS: i32 = 7;

#[derive(Deserialize)]
pub struct CreateProposalRequest {
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    pub recruiter_id: Uuid,
    pub notes: Option<String>,
    pub due_days: Option<i32>,
}

#[derive(Deserialize)]
pub struct TransitionRequest {
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct ProposalListQuery {
    pub recruiter_id: Option<Uuid>,
    pub job_id: Option<Uuid>,
    pub state: Option<String>,
}

/// POST /api/v1/proposals
pub async fn handle_create_proposal(
    State(state): State<AppState>,
    _auth: BearerToken,
    Json(req): Json<CreateProposalRequest>,
) -> Result<(StatusCode, Json<ProposalRow>), AppError> {
    if !ats_store::job_exists(&state.db, req.job_id).await? {
        return Err(AppError::Validation(format!(
            "Job {} does not exist",
            req.job_id
        )));
    }
    if !ats_store::candidate_exists(&state.db, req.candidate_id).await? {
        return Err(AppError::Validation(format!(
            "Candidate {} does not exist",
            req.candidate_id
        )));
    }
    if !recruiter_store::recruiter_exists(&state.db, req.recruiter_id).await? {
        return Err(AppError::Validation(format!(
            "Recruiter {} does not exist",
            req.recruiter_id
        )));
    }

    let due_days = req.due_days.unwrap_or(DEFAULT_RESPONSE_DUE_DAYS);
    if due_days <= 0 {
        return Err(AppError::Validation(
            "due_days must be a positive number of days".to_string(),
        ));
    }

    let row = store::insert_proposal(
        &state.db,
        NewProposal {
            job_id: req.job_id,
            candidate_id: req.candidate_id,
            recruiter_id: req.recruiter_id,
            proposal_notes: req.notes.as_deref(),
            due_days,
        },
    )
    .await?;

    events::emit(state.events.as_ref(), "proposal.created", &row).await;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/proposals
pub async fn handle_list_proposals(
    State(state): State<AppState>,
    Query(params): Query<ProposalListQuery>,
) -> Result<Json<Vec<ProposalRow>>, AppError> {
    let rows = store::list_proposals(
        &state.db,
        params.recruiter_id,
        params.job_id,
        params.state.as_deref(),
    )
    .await?;
    Ok(Json(rows))
}

/// GET /api/v1/proposals/:id
pub async fn handle_get_proposal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProposalRow>, AppError> {
    let row = store::fetch_proposal(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Proposal {id} not found")))?;
    Ok(Json(row))
}

/// POST /api/v1/proposals/:id/accept
pub async fn handle_accept_proposal(
    State(state): State<AppState>,
    _auth: BearerToken,
    Path(id): Path<Uuid>,
    body: Option<Json<TransitionRequest>>,
) -> Result<Json<ProposalRow>, AppError> {
    let notes = body.and_then(|Json(b)| b.notes);
    transition(&state, id, ProposalAction::Accept, notes)
        .await
        .map(Json)
}

/// POST /api/v1/proposals/:id/decline
pub async fn handle_decline_proposal(
    State(state): State<AppState>,
    _auth: BearerToken,
    Path(id): Path<Uuid>,
    body: Option<Json<TransitionRequest>>,
) -> Result<Json<ProposalRow>, AppError> {
    let notes = body.and_then(|Json(b)| b.notes);
    transition(&state, id, ProposalAction::Decline, notes)
        .await
        .map(Json)
}

/// POST /api/v1/proposals/:id/submit
pub async fn handle_submit_proposal(
    State(state): State<AppState>,
    _auth: BearerToken,
    Path(id): Path<Uuid>,
) -> Result<Json<ProposalRow>, AppError> {
    transition(&state, id, ProposalAction::Submit, None)
        .await
        .map(Json)
}

/// POST /api/v1/proposals/:id/close
pub async fn handle_close_proposal(
    State(state): State<AppState>,
    _auth: BearerToken,
    Path(id): Path<Uuid>,
) -> Result<Json<ProposalRow>, AppError> {
    transition(&state, id, ProposalAction::Close, None)
        .await
        .map(Json)
}

/// Shared transition path: load, validate against the lifecycle table, then
/// CAS-update on the observed state. The domain event goes out only after the
/// write commits.
async fn transition(
    state: &AppState,
    id: Uuid,
    action: ProposalAction,
    notes: Option<String>,
) -> Result<ProposalRow, AppError> {
    let row = store::fetch_proposal(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Proposal {id} not found")))?;

    let current = ProposalState::parse(&row.state).ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!(
            "proposal {id} has unrecognized state '{}'",
            row.state
        ))
    })?;

    let next = lifecycle::transition(current, action)
        .map_err(|e| AppError::InvalidState(e.to_string()))?;

    let updated = store::transition_state(&state.db, id, current, next, notes.as_deref())
        .await?
        .ok_or_else(|| {
            AppError::InvalidState(format!("Proposal {id} was modified by another request"))
        })?;

    events::emit(state.events.as_ref(), action.event_type(), &updated).await;
    Ok(updated)
}
