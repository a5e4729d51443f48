use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::job_dto::JobResponse,
    dto::job_request_dto::{
        ApproveRequestPayload, CreateJobRequestPayload, JobRequestListQuery, JobRequestResponse,
        RejectRequestPayload,
    },
    error::{Error, Result},
    middleware::auth::Claims,
    AppState,
};

fn approver_id(claims: &Claims) -> Result<Uuid> {
    claims
        .user_id()
        .ok_or_else(|| Error::Unauthorized("Token has no user id".to_string()))
}

#[utoipa::path(
    post,
    path = "/api/admin/job-requests",
    request_body = CreateJobRequestPayload,
    responses(
        (status = 201, description = "Request created", body = Json<JobRequestResponse>),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_request(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateJobRequestPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let request = state
        .job_request_service
        .create(payload, claims.user_id(), claims.name.clone())
        .await?;

    let notification = serde_json::json!({
        "request_id": request.id,
        "title": request.title,
        "requested_by": request.requested_by_name,
    });
    if let Err(err) = state
        .notification_service
        .enqueue("job_request_created", &notification)
        .await
    {
        tracing::warn!(error = ?err, "failed to enqueue job_request_created notification");
    }

    Ok((StatusCode::CREATED, Json(JobRequestResponse::from(request))))
}

#[utoipa::path(
    get,
    path = "/api/admin/job-requests",
    params(
        ("status" = Option<String>, Query, description = "Filter by request status"),
        ("requested_by" = Option<Uuid>, Query, description = "Filter by requester")
    ),
    responses((status = 200, description = "List of requests"))
)]
#[axum::debug_handler]
pub async fn list_requests(
    State(state): State<AppState>,
    Query(query): Query<JobRequestListQuery>,
) -> Result<impl IntoResponse> {
    let requests = state.job_request_service.list(query).await?;
    let items: Vec<JobRequestResponse> = requests.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/api/admin/job-requests/{id}",
    params(("id" = Uuid, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request found", body = Json<JobRequestResponse>),
        (status = 404, description = "Request not found")
    )
)]
#[axum::debug_handler]
pub async fn get_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let request = state.job_request_service.get_by_id(id).await?;
    Ok(Json(JobRequestResponse::from(request)))
}

#[utoipa::path(
    post,
    path = "/api/admin/job-requests/{id}/approve",
    params(("id" = Uuid, Path, description = "Request ID")),
    request_body = ApproveRequestPayload,
    responses(
        (status = 200, description = "Request approved", body = Json<JobRequestResponse>),
        (status = 409, description = "Request already reviewed")
    )
)]
#[axum::debug_handler]
pub async fn approve_request(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ApproveRequestPayload>,
) -> Result<impl IntoResponse> {
    let approver = approver_id(&claims)?;
    let request = state
        .job_request_service
        .approve(id, approver, payload.notes)
        .await?;

    let notification = serde_json::json!({
        "request_id": request.id,
        "title": request.title,
        "requested_by": request.requested_by,
    });
    if let Err(err) = state
        .notification_service
        .enqueue("job_request_approved", &notification)
        .await
    {
        tracing::warn!(error = ?err, "failed to enqueue job_request_approved notification");
    }

    Ok(Json(JobRequestResponse::from(request)))
}

#[utoipa::path(
    post,
    path = "/api/admin/job-requests/{id}/reject",
    params(("id" = Uuid, Path, description = "Request ID")),
    request_body = RejectRequestPayload,
    responses(
        (status = 200, description = "Request rejected", body = Json<JobRequestResponse>),
        (status = 400, description = "Rejection requires notes"),
        (status = 409, description = "Request already reviewed")
    )
)]
#[axum::debug_handler]
pub async fn reject_request(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RejectRequestPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let reviewer = approver_id(&claims)?;
    let request = state
        .job_request_service
        .reject(id, reviewer, payload.notes)
        .await?;

    let notification = serde_json::json!({
        "request_id": request.id,
        "title": request.title,
        "requested_by": request.requested_by,
        "notes": request.notes,
    });
    if let Err(err) = state
        .notification_service
        .enqueue("job_request_rejected", &notification)
        .await
    {
        tracing::warn!(error = ?err, "failed to enqueue job_request_rejected notification");
    }

    Ok(Json(JobRequestResponse::from(request)))
}

#[utoipa::path(
    post,
    path = "/api/admin/job-requests/{id}/create-job",
    params(("id" = Uuid, Path, description = "Request ID")),
    responses(
        (status = 201, description = "Job materialized from request", body = Json<JobResponse>),
        (status = 409, description = "Request not approved, already materialized or in flight")
    )
)]
#[axum::debug_handler]
pub async fn create_job_from_request(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let actor = approver_id(&claims)?;
    let job = state
        .job_request_service
        .create_job_from_request(id, actor)
        .await?;
    Ok((StatusCode::CREATED, Json(JobResponse::from(job))))
}

#[utoipa::path(
    post,
    path = "/api/admin/job-requests/{id}/approve-and-create-job",
    params(("id" = Uuid, Path, description = "Request ID")),
    request_body = ApproveRequestPayload,
    responses(
        (status = 201, description = "Request approved and job created"),
        (status = 409, description = "Request already reviewed or in flight")
    )
)]
#[axum::debug_handler]
pub async fn approve_and_create_job(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ApproveRequestPayload>,
) -> Result<impl IntoResponse> {
    let approver = approver_id(&claims)?;
    let (request, job) = state
        .job_request_service
        .approve_and_create_job(id, approver, payload.notes)
        .await?;

    let notification = serde_json::json!({
        "request_id": request.id,
        "job_id": job.id,
        "title": job.title,
    });
    if let Err(err) = state
        .notification_service
        .enqueue("job_request_approved", &notification)
        .await
    {
        tracing::warn!(error = ?err, "failed to enqueue job_request_approved notification");
    }

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "request": JobRequestResponse::from(request),
            "job": JobResponse::from(job),
        })),
    ))
}
