use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::identity::store;
use crate::models::identity::{MembershipRow, OrganizationRow, UserRow};
use crate::state::AppState;

/// GET /api/v1/users/:id
pub async fn handle_get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserRow>, AppError> {
    let row = store::fetch_user(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {id} not found")))?;
    Ok(Json(row))
}

/// GET /api/v1/organizations/:id
pub async fn handle_get_organization(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrganizationRow>, AppError> {
    let row = store::fetch_organization(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Organization {id} not found")))?;
    Ok(Json(row))
}

/// GET /api/v1/organizations/:id/memberships
pub async fn handle_list_memberships(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<MembershipRow>>, AppError> {
    let rows = store::memberships_for_org(&state.db, id).await?;
    Ok(Json(rows))
}
