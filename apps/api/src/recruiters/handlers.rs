use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::BearerToken;
use crate::errors::AppError;
use crate::identity::store as identity_store;
use crate::models::network::RecruiterRow;
use crate::recruiters::reputation::{reputation_score, ReputationInputs};
use crate::recruiters::store::{self, NewRecruiter};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateRecruiterRequest {
    pub user_id: Uuid,
    pub display_name: String,
    pub bio: Option<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
    pub stripe_account_id: Option<String>,
}

#[derive(Serialize)]
pub struct ReputationResponse {
    pub recruiter_id: Uuid,
    pub score: u32,
    #[serde(flatten)]
    pub inputs: ReputationInputs,
}

/// POST /api/v1/recruiters
pub async fn handle_create_recruiter(
    State(state): State<AppState>,
    _auth: BearerToken,
    Json(req): Json<CreateRecruiterRequest>,
) -> Result<(StatusCode, Json<RecruiterRow>), AppError> {
    if !identity_store::user_exists(&state.db, req.user_id).await? {
        return Err(AppError::Validation(format!(
            "User {} does not exist",
            req.user_id
        )));
    }
    if req.display_name.trim().is_empty() {
        return Err(AppError::Validation(
            "display_name must not be empty".to_string(),
        ));
    }

    let row = store::insert_recruiter(
        &state.db,
        NewRecruiter {
            user_id: req.user_id,
            display_name: &req.display_name,
            bio: req.bio.as_deref(),
            specialties: &req.specialties,
            stripe_account_id: req.stripe_account_id.as_deref(),
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/recruiters
pub async fn handle_list_recruiters(
    State(state): State<AppState>,
) -> Result<Json<Vec<RecruiterRow>>, AppError> {
    let rows = store::list_recruiters(&state.db).await?;
    Ok(Json(rows))
}

/// GET /api/v1/recruiters/:id
pub async fn handle_get_recruiter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RecruiterRow>, AppError> {
    let row = store::fetch_recruiter(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Recruiter {id} not found")))?;
    Ok(Json(row))
}

/// GET /api/v1/recruiters/:id/reputation
pub async fn handle_get_reputation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReputationResponse>, AppError> {
    if !store::recruiter_exists(&state.db, id).await? {
        return Err(AppError::NotFound(format!("Recruiter {id} not found")));
    }

    let inputs = store::reputation_inputs(&state.db, id).await?;
    Ok(Json(ReputationResponse {
        recruiter_id: id,
        score: reputation_score(&inputs),
        inputs,
    }))
}
