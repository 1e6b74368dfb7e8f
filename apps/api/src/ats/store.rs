use sqlx::PgPool;
use uuid::Uuid;

use crate::ats::status::ApplicationStatus;
use crate::models::ats::{ApplicationRow, CandidateRow, JobRow};

pub struct NewJob<'a> {
    pub organization_id: Uuid,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub location: Option<&'a str>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub fee_percentage: f64,
}

pub struct NewCandidate<'a> {
    pub full_name: &'a str,
    pub email: &'a str,
    pub headline: Option<&'a str>,
    pub linkedin_url: Option<&'a str>,
}

pub async fn insert_job(pool: &PgPool, job: NewJob<'_>) -> Result<JobRow, sqlx::Error> {
    sqlx::query_as::<_, JobRow>(
        r#"
        INSERT INTO jobs
            (organization_id, title, description, location, salary_min, salary_max, fee_percentage)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(job.organization_id)
    .bind(job.title)
    .bind(job.description)
    .bind(job.location)
    .bind(job.salary_min)
    .bind(job.salary_max)
    .bind(job.fee_percentage)
    .fetch_one(pool)
    .await
}

pub async fn fetch_job(pool: &PgPool, id: Uuid) -> Result<Option<JobRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_jobs(pool: &PgPool, status: Option<&str>) -> Result<Vec<JobRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRow>(
        r#"
        SELECT * FROM jobs
        WHERE ($1::text IS NULL OR status = $1)
        ORDER BY created_at DESC
        "#,
    )
    .bind(status)
    .fetch_all(pool)
    .await
}

pub async fn job_exists(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM jobs WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(exists)
}

pub async fn insert_candidate(
    pool: &PgPool,
    candidate: NewCandidate<'_>,
) -> Result<CandidateRow, sqlx::Error> {
    sqlx::query_as::<_, CandidateRow>(
        r#"
        INSERT INTO candidates (full_name, email, headline, linkedin_url)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(candidate.full_name)
    .bind(candidate.email)
    .bind(candidate.headline)
    .bind(candidate.linkedin_url)
    .fetch_one(pool)
    .await
}

pub async fn fetch_candidate(pool: &PgPool, id: Uuid) -> Result<Option<CandidateRow>, sqlx::Error> {
    sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn candidate_exists(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM candidates WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(exists)
}

pub async fn insert_application(
    pool: &PgPool,
    job_id: Uuid,
    candidate_id: Uuid,
    recruiter_id: Uuid,
) -> Result<ApplicationRow, sqlx::Error> {
    sqlx::query_as::<_, ApplicationRow>(
        r#"
        INSERT INTO applications (job_id, candidate_id, recruiter_id, status)
        VALUES ($1, $2, $3, 'applied')
        RETURNING *
        "#,
    )
    .bind(job_id)
    .bind(candidate_id)
    .bind(recruiter_id)
    .fetch_one(pool)
    .await
}

pub async fn fetch_application(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<ApplicationRow>, sqlx::Error> {
    sqlx::query_as::<_, ApplicationRow>("SELECT * FROM applications WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn application_exists_for(
    pool: &PgPool,
    job_id: Uuid,
    candidate_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM applications WHERE job_id = $1 AND candidate_id = $2)",
    )
    .bind(job_id)
    .bind(candidate_id)
    .fetch_one(pool)
    .await?;
    Ok(exists)
}

pub async fn list_applications(
    pool: &PgPool,
    job_id: Option<Uuid>,
    recruiter_id: Option<Uuid>,
) -> Result<Vec<ApplicationRow>, sqlx::Error> {
    sqlx::query_as::<_, ApplicationRow>(
        r#"
        SELECT * FROM applications
        WHERE ($1::uuid IS NULL OR job_id = $1)
          AND ($2::uuid IS NULL OR recruiter_id = $2)
        ORDER BY created_at DESC
        "#,
    )
    .bind(job_id)
    .bind(recruiter_id)
    .fetch_all(pool)
    .await
}

/// Compare-and-swap status update; `None` when the observed status moved.
pub async fn update_status(
    pool: &PgPool,
    id: Uuid,
    from: ApplicationStatus,
    to: ApplicationStatus,
) -> Result<Option<ApplicationRow>, sqlx::Error> {
    sqlx::query_as::<_, ApplicationRow>(
        r#"
        UPDATE applications
        SET status = $3, updated_at = NOW()
        WHERE id = $1 AND status = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(from.as_str())
    .bind(to.as_str())
    .fetch_optional(pool)
    .await
}
