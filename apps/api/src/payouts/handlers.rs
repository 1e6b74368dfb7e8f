use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use crate::auth::BearerToken;
use crate::errors::AppError;
use crate::events;
use crate::models::billing::PayoutRow;
use crate::payouts::lifecycle::{self, PayoutStatus};
use crate::payouts::store;
use crate::recruiters::store as recruiter_store;
use crate::state::AppState;

/// All transfers settle in USD. Multi-currency payouts would need a currency
/// column on placements first.
const PAYOUT_CURRENCY: &str = "usd";

#[derive(Deserialize)]
pub struct PayoutListQuery {
    pub placement_id: Option<Uuid>,
    pub status: Option<String>,
}

/// GET /api/v1/payouts
pub async fn handle_list_payouts(
    State(state): State<AppState>,
    Query(params): Query<PayoutListQuery>,
) -> Result<Json<Vec<PayoutRow>>, AppError> {
    let rows = store::list_payouts(&state.db, params.placement_id, params.status.as_deref()).await?;
    Ok(Json(rows))
}

/// GET /api/v1/payouts/:id
pub async fn handle_get_payout(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PayoutRow>, AppError> {
    let row = store::fetch_payout(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Payout {id} not found")))?;
    Ok(Json(row))
}

/// POST /api/v1/payouts/:id/process
///
/// Moves the payout to `processing`, makes one Stripe transfer attempt, and
/// records the outcome. A failed transfer leaves the payout in `failed` for
/// manual retry via this same endpoint.
pub async fn handle_process_payout(
    State(state): State<AppState>,
    _auth: BearerToken,
    Path(id): Path<Uuid>,
) -> Result<Json<PayoutRow>, AppError> {
    let payout = store::fetch_payout(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Payout {id} not found")))?;
    let current = parse_status(&payout)?;

    if !lifecycle::can_transition(current, PayoutStatus::Processing) {
        return Err(AppError::InvalidState(format!(
            "Payout {id} cannot be processed from status '{current}'"
        )));
    }

    // Resolve the destination account before touching payout state so a
    // recruiter without a connected account leaves the payout untouched.
    let destination = recruiter_store::stripe_account_for_user(&state.db, payout.recruiter_id)
        .await?
        .ok_or_else(|| {
            AppError::Validation(format!(
                "Recruiter {} has no connected payout account",
                payout.recruiter_id
            ))
        })?;

    let processing = store::transition_status(&state.db, id, current, PayoutStatus::Processing)
        .await?
        .ok_or_else(|| {
            AppError::InvalidState(format!("Payout {id} was modified by another request"))
        })?;

    let transfer_group = processing.placement_id.to_string();
    match state
        .stripe
        .create_transfer(
            processing.payout_amount,
            PAYOUT_CURRENCY,
            &destination,
            &transfer_group,
        )
        .await
    {
        Ok(transfer) => {
            let row = store::mark_completed(&state.db, id, &transfer.id)
                .await?
                .ok_or_else(|| {
                    AppError::Internal(anyhow::anyhow!(
                        "payout {id} left processing before completion was recorded"
                    ))
                })?;
            events::emit(state.events.as_ref(), "payout.completed", &row).await;
            Ok(Json(row))
        }
        Err(e) => {
            warn!("Stripe transfer for payout {id} failed: {e}");
            if let Some(row) = store::mark_failed(&state.db, id, &e.to_string()).await? {
                events::emit(state.events.as_ref(), "payout.failed", &row).await;
            }
            Err(AppError::Stripe(e))
        }
    }
}

/// POST /api/v1/payouts/:id/hold
pub async fn handle_hold_payout(
    State(state): State<AppState>,
    _auth: BearerToken,
    Path(id): Path<Uuid>,
) -> Result<Json<PayoutRow>, AppError> {
    let row = guarded_transition(&state, id, PayoutStatus::OnHold).await?;
    events::emit(state.events.as_ref(), "payout.held", &row).await;
    Ok(Json(row))
}

/// POST /api/v1/payouts/:id/release
pub async fn handle_release_payout(
    State(state): State<AppState>,
    _auth: BearerToken,
    Path(id): Path<Uuid>,
) -> Result<Json<PayoutRow>, AppError> {
    let row = guarded_transition(&state, id, PayoutStatus::Pending).await?;
    events::emit(state.events.as_ref(), "payout.released", &row).await;
    Ok(Json(row))
}

async fn guarded_transition(
    state: &AppState,
    id: Uuid,
    to: PayoutStatus,
) -> Result<PayoutRow, AppError> {
    let payout = store::fetch_payout(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Payout {id} not found")))?;
    let current = parse_status(&payout)?;

    if !lifecycle::can_transition(current, to) {
        return Err(AppError::InvalidState(format!(
            "Payout {id} cannot move from '{current}' to '{to}'"
        )));
    }

    store::transition_status(&state.db, id, current, to)
        .await?
        .ok_or_else(|| AppError::InvalidState(format!("Payout {id} was modified by another request")))
}

fn parse_status(payout: &PayoutRow) -> Result<PayoutStatus, AppError> {
    PayoutStatus::parse(&payout.status).ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!(
            "payout {} has unrecognized status '{}'",
            payout.id,
            payout.status
        ))
    })
}
