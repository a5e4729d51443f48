use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::job_dto::{
        CreateJobPayload, DeleteJobQuery, JobListQuery, JobListResponse, JobPublicListResponse,
        JobPublicQuery, JobPublicSummary, JobResponse, ProcessedJobsResponse, RejectJobPayload,
        UpdateJobPayload,
    },
    error::{Error, Result},
    middleware::auth::Claims,
    models::status::{SubmitAction, UserRole},
    AppState,
};

fn ensure_can_publish_direct(claims: &Claims, action: SubmitAction) -> Result<()> {
    if action == SubmitAction::PublicarDireto
        && !matches!(
            claims.parsed_role(),
            Some(UserRole::Admin) | Some(UserRole::Manager)
        )
    {
        return Err(Error::Forbidden(
            "Only admins and managers can publish directly".to_string(),
        ));
    }
    Ok(())
}

async fn audit(state: &AppState, claims: &Claims, action: &str, job_id: Uuid) {
    if let Err(err) = state
        .audit_service
        .log(claims.user_id(), action, "job", job_id, None)
        .await
    {
        tracing::warn!(error = ?err, action, "failed to write audit log");
    }
}

#[utoipa::path(
    post,
    path = "/api/admin/jobs",
    request_body = CreateJobPayload,
    responses(
        (status = 201, description = "Job created", body = Json<JobResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Direct publish requires elevated role")
    )
)]
#[axum::debug_handler]
pub async fn create_job(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateJobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    ensure_can_publish_direct(&claims, payload.submit_action)?;

    let job = state.job_service.create(payload, claims.user_id()).await?;
    audit(&state, &claims, "create", job.id).await;
    Ok((StatusCode::CREATED, Json(JobResponse::from(job))))
}

#[utoipa::path(
    patch,
    path = "/api/admin/jobs/{id}",
    params(("id" = Uuid, Path, description = "Job ID")),
    request_body = UpdateJobPayload,
    responses(
        (status = 200, description = "Job updated", body = Json<JobResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn update_job(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateJobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    ensure_can_publish_direct(&claims, payload.submit_action)?;

    let job = state.job_service.submit_edit(id, payload).await?;
    audit(&state, &claims, "update", job.id).await;
    Ok(Json(JobResponse::from(job)))
}

#[utoipa::path(
    get,
    path = "/api/admin/jobs",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Items per page"),
        ("approval_status" = Option<String>, Query, description = "Filter by approval status"),
        ("flow_status" = Option<String>, Query, description = "Filter by flow status"),
        ("state" = Option<String>, Query, description = "Filter by state"),
        ("city" = Option<String>, Query, description = "Filter by city"),
        ("search" = Option<String>, Query, description = "Search query")
    ),
    responses((status = 200, description = "List of jobs", body = Json<JobListResponse>))
)]
#[axum::debug_handler]
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
) -> Result<impl IntoResponse> {
    let result = state.job_service.list(query).await?;
    Ok(Json(JobListResponse::from(result)))
}

#[utoipa::path(
    get,
    path = "/api/admin/jobs/processed",
    responses(
        (status = 200, description = "Management view with aggregates", body = Json<ProcessedJobsResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_processed_jobs(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let scope = claims.reviewer_scope();
    let (jobs, stats) = state.job_service.list_processed(&scope).await?;
    Ok(Json(ProcessedJobsResponse {
        items: jobs.into_iter().map(Into::into).collect(),
        stats,
    }))
}

#[utoipa::path(
    get,
    path = "/api/admin/dashboard/stats",
    responses((status = 200, description = "Quantity-weighted dashboard tiles"))
)]
#[axum::debug_handler]
pub async fn dashboard_stats(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let scope = claims.reviewer_scope();
    let stats = state.job_service.dashboard_stats(&scope).await?;
    Ok(Json(stats))
}

#[utoipa::path(
    get,
    path = "/api/admin/jobs/{id}",
    params(("id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job found", body = Json<JobResponse>),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.get_by_id(id).await?;
    Ok(Json(JobResponse::from(job)))
}

#[utoipa::path(
    post,
    path = "/api/admin/jobs/{id}/approve",
    params(("id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job approved", body = Json<JobResponse>),
        (status = 409, description = "Job is not pending approval")
    )
)]
#[axum::debug_handler]
pub async fn approve_job(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let approver = claims
        .user_id()
        .ok_or_else(|| Error::Unauthorized("Token has no user id".to_string()))?;
    let job = state.job_service.approve(id, approver).await?;

    let payload = serde_json::json!({
        "job_id": job.id,
        "title": job.title,
        "approved_by": approver,
    });
    if let Err(err) = state.notification_service.enqueue("job_approved", &payload).await {
        tracing::warn!(error = ?err, "failed to enqueue job_approved notification");
    }
    audit(&state, &claims, "approve", job.id).await;

    Ok(Json(JobResponse::from(job)))
}

#[utoipa::path(
    post,
    path = "/api/admin/jobs/{id}/reject",
    params(("id" = Uuid, Path, description = "Job ID")),
    request_body = RejectJobPayload,
    responses(
        (status = 200, description = "Submission rejected", body = Json<JobResponse>),
        (status = 409, description = "Job is not pending approval")
    )
)]
#[axum::debug_handler]
pub async fn reject_job(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RejectJobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let job = state.job_service.reject(id, &payload.reason).await?;

    let notification = serde_json::json!({
        "job_id": job.id,
        "title": job.title,
        "reason": payload.reason,
    });
    if let Err(err) = state
        .notification_service
        .enqueue("job_rejected", &notification)
        .await
    {
        tracing::warn!(error = ?err, "failed to enqueue job_rejected notification");
    }
    audit(&state, &claims, "reject", job.id).await;

    Ok(Json(JobResponse::from(job)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job ID"),
        ("permanent" = Option<bool>, Query, description = "Hard delete instead of soft delete"),
        ("confirm" = Option<bool>, Query, description = "Required confirmation for hard delete")
    ),
    responses(
        (status = 204, description = "Job deleted"),
        (status = 403, description = "The talent bank cannot be deleted")
    )
)]
#[axum::debug_handler]
pub async fn delete_job(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Query(query): Query<DeleteJobQuery>,
) -> Result<impl IntoResponse> {
    if query.permanent {
        state.job_service.purge(id, query.confirm).await?;
        audit(&state, &claims, "purge", id).await;
    } else {
        state.job_service.soft_delete(id).await?;
        audit(&state, &claims, "soft_delete", id).await;
    }
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/public/jobs",
    params(("limit" = Option<i64>, Query, description = "Number of items to return")),
    responses((status = 200, description = "Open positions", body = Json<JobPublicListResponse>))
)]
#[axum::debug_handler]
pub async fn list_public_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobPublicQuery>,
) -> Result<impl IntoResponse> {
    let limit = query.limit.unwrap_or(20).min(100);
    let items = state.job_service.list_public(limit).await?;
    let summaries: Vec<JobPublicSummary> = items.into_iter().map(Into::into).collect();
    Ok(Json(JobPublicListResponse { items: summaries }))
}

#[utoipa::path(
    get,
    path = "/api/public/jobs/{id}",
    params(("id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Open position", body = Json<JobPublicSummary>),
        (status = 404, description = "Not publicly visible")
    )
)]
#[axum::debug_handler]
pub async fn get_public_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    use crate::models::status::{ApprovalStatus, FlowStatus};
    use crate::rules::classification::is_expired;
    use crate::utils::time;

    let job = state.job_service.get_by_id(id).await?;
    let visible = job.approval_status == ApprovalStatus::Active
        && job.flow_status == FlowStatus::Ativa
        && !is_expired(&job, time::today());
    if !visible {
        return Err(Error::NotFound("Job is not open".to_string()));
    }
    Ok(Json(JobPublicSummary::from(job)))
}
