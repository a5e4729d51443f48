use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::candidate_dto::{CandidateResponse, RegisterCandidatePayload, UpdateStagePayload},
    error::{Error, Result},
    AppState,
};

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct CandidateListQuery {
    pub job_id: Option<Uuid>,
}

#[utoipa::path(
    post,
    path = "/api/public/candidates",
    request_body = RegisterCandidatePayload,
    responses(
        (status = 201, description = "Candidate registered", body = Json<CandidateResponse>),
        (status = 409, description = "Already applied for this job")
    )
)]
#[axum::debug_handler]
pub async fn register_candidate(
    State(state): State<AppState>,
    Json(payload): Json<RegisterCandidatePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let candidate = state.candidate_service.register(payload).await?;
    Ok((StatusCode::CREATED, Json(CandidateResponse::from(candidate))))
}

/// Accepts a single `resume` file field, stores it under the uploads dir and
/// records the public path on the candidate.
#[utoipa::path(
    post,
    path = "/api/public/candidates/{id}/resume",
    params(("id" = Uuid, Path, description = "Candidate ID")),
    responses(
        (status = 200, description = "Resume stored", body = Json<CandidateResponse>),
        (status = 400, description = "No file in request")
    )
)]
#[axum::debug_handler]
pub async fn upload_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    state.candidate_service.get_by_id(id).await?;

    let mut stored: Option<String> = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("resume") {
            continue;
        }
        let original = field.file_name().unwrap_or("resume.bin").to_string();
        let data = field.bytes().await?;
        if data.is_empty() {
            continue;
        }

        let extension = std::path::Path::new(&original)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("bin");
        let filename = format!("{}_{}.{}", id, Uuid::new_v4(), extension);
        let uploads_dir = &crate::config::get_config().uploads_dir;
        tokio::fs::create_dir_all(uploads_dir).await?;
        tokio::fs::write(format!("{}/{}", uploads_dir, filename), &data).await?;
        stored = Some(format!("/uploads/{}", filename));
    }

    let resume_url =
        stored.ok_or_else(|| Error::BadRequest("Missing 'resume' file field".to_string()))?;
    let candidate = state.candidate_service.update_resume(id, resume_url).await?;
    Ok(Json(CandidateResponse::from(candidate)))
}

#[utoipa::path(
    get,
    path = "/api/admin/candidates",
    params(("job_id" = Option<Uuid>, Query, description = "Filter by job")),
    responses((status = 200, description = "List of candidates"))
)]
#[axum::debug_handler]
pub async fn list_candidates(
    State(state): State<AppState>,
    Query(query): Query<CandidateListQuery>,
) -> Result<impl IntoResponse> {
    let candidates = match query.job_id {
        Some(job_id) => state.candidate_service.list_by_job(job_id).await?,
        None => state.candidate_service.list_all().await?,
    };
    let items: Vec<CandidateResponse> = candidates.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/api/admin/candidates/{id}",
    params(("id" = Uuid, Path, description = "Candidate ID")),
    responses(
        (status = 200, description = "Candidate found", body = Json<CandidateResponse>),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn get_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let candidate = state.candidate_service.get_by_id(id).await?;
    Ok(Json(CandidateResponse::from(candidate)))
}

#[utoipa::path(
    post,
    path = "/api/admin/candidates/{id}/stage",
    params(("id" = Uuid, Path, description = "Candidate ID")),
    request_body = UpdateStagePayload,
    responses(
        (status = 200, description = "Stage updated", body = Json<CandidateResponse>),
        (status = 409, description = "Stage requires an approved legal review")
    )
)]
#[axum::debug_handler]
pub async fn update_candidate_stage(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStagePayload>,
) -> Result<impl IntoResponse> {
    let candidate = state
        .candidate_service
        .update_stage(id, payload.stage)
        .await?;
    Ok(Json(CandidateResponse::from(candidate)))
}
