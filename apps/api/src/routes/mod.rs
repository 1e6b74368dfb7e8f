pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::ats::handlers as ats;
use crate::documents::handlers as documents;
use crate::identity::handlers as identity;
use crate::payouts::handlers as payouts;
use crate::placements::handlers as placements;
use crate::proposals::handlers as proposals;
use crate::recruiters::handlers as recruiters;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Identity
        .route("/api/v1/users/:id", get(identity::handle_get_user))
        .route(
            "/api/v1/organizations/:id",
            get(identity::handle_get_organization),
        )
        .route(
            "/api/v1/organizations/:id/memberships",
            get(identity::handle_list_memberships),
        )
        // Recruiters
        .route(
            "/api/v1/recruiters",
            get(recruiters::handle_list_recruiters).post(recruiters::handle_create_recruiter),
        )
        .route("/api/v1/recruiters/:id", get(recruiters::handle_get_recruiter))
        .route(
            "/api/v1/recruiters/:id/reputation",
            get(recruiters::handle_get_reputation),
        )
        // Jobs & candidates
        .route(
            "/api/v1/jobs",
            get(ats::handle_list_jobs).post(ats::handle_create_job),
        )
        .route("/api/v1/jobs/:id", get(ats::handle_get_job))
        .route("/api/v1/candidates", post(ats::handle_create_candidate))
        .route("/api/v1/candidates/:id", get(ats::handle_get_candidate))
        // Applications
        .route(
            "/api/v1/applications",
            get(ats::handle_list_applications).post(ats::handle_create_application),
        )
        .route("/api/v1/applications/:id", get(ats::handle_get_application))
        .route(
            "/api/v1/applications/:id/status",
            patch(ats::handle_update_application_status),
        )
        // Proposals
        .route(
            "/api/v1/proposals",
            get(proposals::handle_list_proposals).post(proposals::handle_create_proposal),
        )
        .route("/api/v1/proposals/:id", get(proposals::handle_get_proposal))
        .route(
            "/api/v1/proposals/:id/accept",
            post(proposals::handle_accept_proposal),
        )
        .route(
            "/api/v1/proposals/:id/decline",
            post(proposals::handle_decline_proposal),
        )
        .route(
            "/api/v1/proposals/:id/submit",
            post(proposals::handle_submit_proposal),
        )
        .route(
            "/api/v1/proposals/:id/close",
            post(proposals::handle_close_proposal),
        )
        // Placements
        .route(
            "/api/v1/placements",
            get(placements::handle_list_placements).post(placements::handle_create_placement),
        )
        .route("/api/v1/placements/:id", get(placements::handle_get_placement))
        // Payouts
        .route("/api/v1/payouts", get(payouts::handle_list_payouts))
        .route("/api/v1/payouts/:id", get(payouts::handle_get_payout))
        .route(
            "/api/v1/payouts/:id/process",
            post(payouts::handle_process_payout),
        )
        .route("/api/v1/payouts/:id/hold", post(payouts::handle_hold_payout))
        .route(
            "/api/v1/payouts/:id/release",
            post(payouts::handle_release_payout),
        )
        // Documents
        .route("/api/v1/documents", post(documents::handle_upload_document))
        .route("/api/v1/documents/:id", get(documents::handle_get_document))
        .route(
            "/api/v1/documents/:id/status",
            get(documents::handle_get_document_status),
        )
        .with_state(state)
}
