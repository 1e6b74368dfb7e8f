use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::BearerToken;
use crate::errors::AppError;
use crate::models::billing::PlacementRow;
use crate::payouts::store as payout_store;
use crate::placements::fee_split::SplitSpec;
use crate::placements::store::{self, PlacementDetail};
use crate::placements::{create_placement, CreatePlacement};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreatePlacementRequest {
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    pub recruiter_id: Uuid,
    /// First-year salary in minor units.
    pub salary: i64,
    pub fee_percentage: f64,
    #[serde(default)]
    pub collaborators: Vec<SplitSpec>,
}

#[derive(Deserialize)]
pub struct PlacementListQuery {
    pub recruiter_id: Option<Uuid>,
}

/// POST /api/v1/placements
pub async fn handle_create_placement(
    State(state): State<AppState>,
    _auth: BearerToken,
    Json(req): Json<CreatePlacementRequest>,
) -> Result<(StatusCode, Json<PlacementDetail>), AppError> {
    let detail = create_placement(
        &state,
        CreatePlacement {
            job_id: req.job_id,
            candidate_id: req.candidate_id,
            recruiter_id: req.recruiter_id,
            salary: req.salary,
            fee_percentage: req.fee_percentage,
            collaborators: req.collaborators,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// GET /api/v1/placements
pub async fn handle_list_placements(
    State(state): State<AppState>,
    Query(params): Query<PlacementListQuery>,
) -> Result<Json<Vec<PlacementRow>>, AppError> {
    let rows = store::list_placements(&state.db, params.recruiter_id).await?;
    Ok(Json(rows))
}

/// GET /api/v1/placements/:id
pub async fn handle_get_placement(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PlacementDetail>, AppError> {
    let placement = store::fetch_placement(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Placement {id} not found")))?;
    let collaborators = store::fetch_collaborators(&state.db, id).await?;
    let payouts = payout_store::list_payouts(&state.db, Some(id), None).await?;

    Ok(Json(PlacementDetail {
        placement,
        collaborators,
        payouts,
    }))
}
