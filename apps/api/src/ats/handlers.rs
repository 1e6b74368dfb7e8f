use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ats::status::{self, ApplicationStatus};
use crate::ats::store::{self, NewCandidate, NewJob};
use crate::auth::{AuthUser, BearerToken};
use crate::errors::AppError;
use crate::events;
use crate::identity::store as identity_store;
use crate::models::ats::{ApplicationRow, CandidateRow, JobRow};
use crate::placements::fee_split::SplitSpec;
use crate::placements::store::PlacementDetail;
use crate::placements::{create_placement, CreatePlacement};
use crate::recruiters::store as recruiter_store;
use crate::state::AppState;

/// Roles allowed to manage an organization's jobs.
const JOB_MANAGER_ROLES: [&str; 3] = ["owner", "admin", "recruiter"];

#[derive(Deserialize)]
pub struct CreateJobRequest {
    pub organization_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub fee_percentage: f64,
}

#[derive(Deserialize)]
pub struct JobListQuery {
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateCandidateRequest {
    pub full_name: String,
    pub email: String,
    pub headline: Option<String>,
    pub linkedin_url: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateApplicationRequest {
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    pub recruiter_id: Uuid,
}

#[derive(Deserialize)]
pub struct ApplicationListQuery {
    pub job_id: Option<Uuid>,
    pub recruiter_id: Option<Uuid>,
}

#[derive(Deserialize)]
pub struct UpdateApplicationStatusRequest {
    pub status: String,
    /// Required when moving to `hired`: first-year salary in minor units.
    pub salary: Option<i64>,
    /// Defaults to the job's fee percentage.
    pub fee_percentage: Option<f64>,
    #[serde(default)]
    pub collaborators: Vec<SplitSpec>,
}

#[derive(Serialize)]
pub struct ApplicationStatusResponse {
    pub application: ApplicationRow,
    /// Present only when the transition was a hire.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<PlacementDetail>,
}

/// POST /api/v1/jobs
///
/// Only members with a managing role in the organization may post jobs.
pub async fn handle_create_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<JobRow>), AppError> {
    let role = identity_store::membership_role(&state.db, auth.user_id, req.organization_id)
        .await?
        .ok_or(AppError::Forbidden)?;
    if !JOB_MANAGER_ROLES.contains(&role.as_str()) {
        return Err(AppError::Forbidden);
    }

    if !(0.0..=100.0).contains(&req.fee_percentage) {
        return Err(AppError::Validation(format!(
            "fee_percentage must be between 0 and 100, got {}",
            req.fee_percentage
        )));
    }

    let row = store::insert_job(
        &state.db,
        NewJob {
            organization_id: req.organization_id,
            title: &req.title,
            description: req.description.as_deref(),
            location: req.location.as_deref(),
            salary_min: req.salary_min,
            salary_max: req.salary_max,
            fee_percentage: req.fee_percentage,
        },
    )
    .await?;

    events::emit(state.events.as_ref(), "job.created", &row).await;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobListQuery>,
) -> Result<Json<Vec<JobRow>>, AppError> {
    let rows = store::list_jobs(&state.db, params.status.as_deref()).await?;
    Ok(Json(rows))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobRow>, AppError> {
    let row = store::fetch_job(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    Ok(Json(row))
}

/// POST /api/v1/candidates
pub async fn handle_create_candidate(
    State(state): State<AppState>,
    _auth: BearerToken,
    Json(req): Json<CreateCandidateRequest>,
) -> Result<(StatusCode, Json<CandidateRow>), AppError> {
    if req.full_name.trim().is_empty() {
        return Err(AppError::Validation("full_name must not be empty".to_string()));
    }
    if !req.email.contains('@') {
        return Err(AppError::Validation(format!(
            "'{}' is not a valid email address",
            req.email
        )));
    }

    let row = store::insert_candidate(
        &state.db,
        NewCandidate {
            full_name: &req.full_name,
            email: &req.email,
            headline: req.headline.as_deref(),
            linkedin_url: req.linkedin_url.as_deref(),
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/candidates/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CandidateRow>, AppError> {
    let row = store::fetch_candidate(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))?;
    Ok(Json(row))
}

/// POST /api/v1/applications
pub async fn handle_create_application(
    State(state): State<AppState>,
    _auth: BearerToken,
    Json(req): Json<CreateApplicationRequest>,
) -> Result<(StatusCode, Json<ApplicationRow>), AppError> {
    if !store::job_exists(&state.db, req.job_id).await? {
        return Err(AppError::Validation(format!(
            "Job {} does not exist",
            req.job_id
        )));
    }
    if !store::candidate_exists(&state.db, req.candidate_id).await? {
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
    if store::application_exists_for(&state.db, req.job_id, req.candidate_id).await? {
        return Err(AppError::Validation(format!(
            "Candidate {} has already applied to job {}",
            req.candidate_id, req.job_id
        )));
    }

    let row =
        store::insert_application(&state.db, req.job_id, req.candidate_id, req.recruiter_id)
            .await?;
    events::emit(state.events.as_ref(), "application.created", &row).await;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/applications
pub async fn handle_list_applications(
    State(state): State<AppState>,
    Query(params): Query<ApplicationListQuery>,
) -> Result<Json<Vec<ApplicationRow>>, AppError> {
    let rows = store::list_applications(&state.db, params.job_id, params.recruiter_id).await?;
    Ok(Json(rows))
}

/// GET /api/v1/applications/:id
pub async fn handle_get_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApplicationRow>, AppError> {
    let row = store::fetch_application(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;
    Ok(Json(row))
}

/// PATCH /api/v1/applications/:id/status
///
/// Advances the application through the pipeline. A move to `hired` also
/// creates the placement: the status write commits first and the placement
/// insert follows, with no compensation if the latter fails.
pub async fn handle_update_application_status(
    State(state): State<AppState>,
    _auth: BearerToken,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateApplicationStatusRequest>,
) -> Result<Json<ApplicationStatusResponse>, AppError> {
    let application = store::fetch_application(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;

    let from = ApplicationStatus::parse(&application.status).ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!(
            "application {id} has unrecognized status '{}'",
            application.status
        ))
    })?;
    let to = ApplicationStatus::parse(&req.status)
        .ok_or_else(|| AppError::Validation(format!("Unknown status '{}'", req.status)))?;

    if !status::can_advance(from, to) {
        return Err(AppError::InvalidState(format!(
            "Application {id} cannot move from '{from}' to '{to}'"
        )));
    }

    if to == ApplicationStatus::Hired {
        let salary = req.salary.ok_or_else(|| {
            AppError::Validation("salary is required when marking an application hired".to_string())
        })?;
        let job = store::fetch_job(&state.db, application.job_id)
            .await?
            .ok_or_else(|| {
                AppError::Validation(format!("Job {} does not exist", application.job_id))
            })?;
        let fee_percentage = req.fee_percentage.unwrap_or(job.fee_percentage);

        let updated = store::update_status(&state.db, id, from, to)
            .await?
            .ok_or_else(|| {
                AppError::InvalidState(format!("Application {id} was modified by another request"))
            })?;

        let placement = create_placement(
            &state,
            CreatePlacement {
                job_id: application.job_id,
                candidate_id: application.candidate_id,
                recruiter_id: application.recruiter_id,
                salary,
                fee_percentage,
                collaborators: req.collaborators,
            },
        )
        .await?;

        events::emit(state.events.as_ref(), "application.hired", &updated).await;
        return Ok(Json(ApplicationStatusResponse {
            application: updated,
            placement: Some(placement),
        }));
    }

    let updated = store::update_status(&state.db, id, from, to)
        .await?
        .ok_or_else(|| {
            AppError::InvalidState(format!("Application {id} was modified by another request"))
        })?;
    events::emit(state.events.as_ref(), "application.status_changed", &updated).await;
    Ok(Json(ApplicationStatusResponse {
        application: updated,
        placement: None,
    }))
}
